//! Contract Invariant Tests
//!
//! These tests verify the guarantees of `generate`.

use iconpack_core::{
    compute_package_digest, generate, GenerateError, GenerationRequest, GeneratorConfig,
    ImageSource, MarkupError, PackageConfig, PackageGenerator,
};

const CHECK_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M9 16.17L4.83 12l-1.42 1.41L9 19 21 7l-1.41-1.41z"/></svg>"#;

fn image(path: &str, source: &str) -> ImageSource {
    ImageSource {
        path: path.to_string(),
        source: source.to_string(),
    }
}

fn request(images: Vec<ImageSource>, version: &str) -> GenerationRequest {
    GenerationRequest {
        images,
        version: version.to_string(),
    }
}

fn sample_request() -> GenerationRequest {
    request(
        vec![
            image("icons/close.svg", r#"<svg viewBox="0 0 16 16"><path d="M0 0L16 16"/></svg>"#),
            image("icons/arrow-left.svg", r#"<svg viewBox="2 4 20 12"><path d="M2 10h20"/></svg>"#),
            image("folder/check.svg", CHECK_SVG),
        ],
        "3.1.0",
    )
}

#[test]
fn invariant_end_to_end_single_image() {
    let files = generate(&request(vec![image("folder/check.svg", CHECK_SVG)], "1.2.3")).unwrap();

    assert_eq!(files.len(), 4);
    assert_eq!(files[0].filepath, "package.json");
    assert_eq!(files[1].filepath, "index.ts");
    assert_eq!(files[2].filepath, "Box.tsx");
    assert_eq!(files[3].filepath, "CheckIcon.tsx");

    assert!(files[0].source.contains(r#""1.2.3""#));
    assert!(files[1]
        .source
        .contains(r#"export const ICONS = [{"fileName":"CheckIcon","componentName":"CheckIcon"}];"#));
    assert!(files[3].source.contains("width={24} height={24}"));
    assert!(files[3].source.contains(r#"CheckIcon.displayName = "CheckIcon";"#));
    assert!(files[3].source.contains(r#"style={svgStyle} fill="currentColor""#));
}

#[test]
fn invariant_output_count_and_order() {
    let req = sample_request();
    let files = generate(&req).unwrap();

    assert_eq!(files.len(), 3 + req.images.len());
    let paths: Vec<_> = files.iter().map(|f| f.filepath.as_str()).collect();
    assert_eq!(
        paths,
        vec!["package.json", "index.ts", "Box.tsx", "CloseIcon.tsx", "ArrowLeftIcon.tsx", "CheckIcon.tsx"]
    );
}

#[test]
fn invariant_index_follows_input_order() {
    let files = generate(&sample_request()).unwrap();
    let index = &files[1].source;

    let close = index.find("default as CloseIcon").unwrap();
    let arrow = index.find("default as ArrowLeftIcon").unwrap();
    let check = index.find("default as CheckIcon").unwrap();
    assert!(close < arrow && arrow < check);
    assert!(index.contains("console.warn("));
}

#[test]
fn invariant_size_ignores_view_box_origin() {
    let at_origin = request(vec![image("a.svg", r#"<svg viewBox="0 0 20 12"/>"#)], "1.0.0");
    let offset = request(vec![image("a.svg", r#"<svg viewBox="2 4 20 12"/>"#)], "1.0.0");

    let a = generate(&at_origin).unwrap();
    let b = generate(&offset).unwrap();
    assert!(a[3].source.contains("width={20} height={12}"));
    assert!(b[3].source.contains("width={20} height={12}"));
}

#[test]
fn invariant_idempotent() {
    let req = sample_request();
    let first = generate(&req).unwrap();
    let second = generate(&req).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        compute_package_digest(&first).unwrap(),
        compute_package_digest(&second).unwrap()
    );
}

#[test]
fn invariant_manifest_only_varies_by_version() {
    let a = generate(&request(vec![], "1.0.0")).unwrap();
    let b = generate(&request(vec![], "4.2.0-beta.1")).unwrap();

    assert!(a[0].source.contains(r#""version": "1.0.0""#));
    assert!(b[0].source.contains(r#""version": "4.2.0-beta.1""#));
    assert_eq!(
        a[0].source.replace("1.0.0", "V"),
        b[0].source.replace("4.2.0-beta.1", "V")
    );
    // Nothing else depends on the version
    assert_eq!(a[1..], b[1..]);
}

#[test]
fn invariant_empty_request_still_packages() {
    let files = generate(&request(vec![], "0.0.1")).unwrap();
    assert_eq!(files.len(), 3);
    assert!(files[1].source.contains("export const ICONS = [];"));
}

#[test]
fn invariant_missing_view_box_fails_whole_call() {
    let req = request(
        vec![image("ok.svg", CHECK_SVG), image("bad.svg", "<svg><rect/></svg>")],
        "1.0.0",
    );

    match generate(&req) {
        Err(GenerateError::MalformedInput { path, reason }) => {
            assert_eq!(path, "bad.svg");
            assert_eq!(reason, MarkupError::MissingViewBox);
        }
        other => panic!("expected MalformedInput, got {:?}", other),
    }
}

#[test]
fn invariant_bad_view_box_tokens_fail() {
    for view_box in ["0 0 24", "0 0 a 24", "0 0 24 24 24"] {
        let markup = format!(r#"<svg viewBox="{}"/>"#, view_box);
        let err = generate(&request(vec![image("x.svg", &markup)], "1.0.0")).unwrap_err();
        assert!(
            matches!(err, GenerateError::MalformedInput { reason: MarkupError::InvalidViewBox(_), .. }),
            "viewBox {:?} should be rejected",
            view_box
        );
    }
}

#[test]
fn invariant_symbol_names() {
    let files = generate(&request(
        vec![
            image("arrow-left.svg", r#"<svg viewBox="0 0 1 1"/>"#),
            image("close.svg", r#"<svg viewBox="0 0 1 1"/>"#),
        ],
        "1.0.0",
    ))
    .unwrap();
    assert_eq!(files[3].filepath, "ArrowLeftIcon.tsx");
    assert_eq!(files[4].filepath, "CloseIcon.tsx");
    assert!(files[3].source.contains("export default ArrowLeftIcon;"));
}

#[test]
fn invariant_custom_package_identity() {
    let config = GeneratorConfig {
        package: PackageConfig {
            name: "@acme/glyphs".to_string(),
            ..PackageConfig::default()
        },
        ..GeneratorConfig::default()
    };
    let files = PackageGenerator::new(config)
        .generate(&request(vec![], "2.0.0"))
        .unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&files[0].source).unwrap();
    assert_eq!(manifest["name"], "@acme/glyphs");
    assert_eq!(manifest["version"], "2.0.0");
}

#[test]
fn invariant_request_deserializes_from_json() {
    let req: GenerationRequest = serde_json::from_str(
        r#"{"version": "1.2.3", "images": [{"path": "folder/check.svg", "source": "<svg viewBox=\"0 0 24 24\"/>"}]}"#,
    )
    .unwrap();
    let files = generate(&req).unwrap();
    assert_eq!(files[3].filepath, "CheckIcon.tsx");
}

#[test]
fn invariant_ill_formed_markup_fails() {
    let cases = [
        r#"<svg viewBox="0 0 1 1"><text>1 < 2</text></svg>"#,
        r#"<svg viewBox="0 0 1 1"/><svg/>"#,
    ];
    for markup in cases {
        let err = generate(&request(vec![image("x.svg", markup)], "1.0.0")).unwrap_err();
        assert!(
            matches!(err, GenerateError::MalformedInput { .. }),
            "{:?} should be rejected",
            markup
        );
    }
}
