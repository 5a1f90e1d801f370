//! Package Generator - Single Entry Point
//!
//! (images, version) -> ordered output files. Pure: no disk, no network,
//! no state carried between calls. Any malformed image aborts the whole
//! call; there is never partial output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::markup::{FragmentOptions, JsxTransformer, MarkupError, MarkupTransformer, ViewBox};
use crate::naming::{is_valid_identifier, symbol_name};
use crate::render::{
    self, ComponentTemplate, IndexEntry, ABSOLUTE_FILL, COMPONENT_EXTENSION, INDEX_PATH,
    MANIFEST_PATH, PRIMITIVE_PATH,
};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Malformed input {path}: {reason}")]
    MalformedInput {
        path: String,
        #[source]
        reason: MarkupError,
    },

    #[error("Symbol {symbol} derived from {path} is not a valid identifier")]
    InvalidSymbolName { path: String, symbol: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub path: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub images: Vec<ImageSource>,
    pub version: String,
}

/// Per-image result before it is flattened into an `OutputFile`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentUnit {
    pub symbol_name: String,
    pub file_stem: String,
    pub view_box: ViewBox,
    pub rendered_source: String,
}

impl ComponentUnit {
    pub fn filepath(&self) -> String {
        format!("{}.{}", self.file_stem, COMPONENT_EXTENSION)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    pub filepath: String,
    pub source: String,
}

impl OutputFile {
    fn new(filepath: impl Into<String>, source: String) -> Self {
        Self { filepath: filepath.into(), source }
    }
}

/// The package generator - owns configuration and the markup transformer
pub struct PackageGenerator {
    config: GeneratorConfig,
    transformer: Box<dyn MarkupTransformer>,
    fragment_options: FragmentOptions,
}

impl PackageGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_transformer(config, Box::new(JsxTransformer))
    }

    pub fn with_transformer(config: GeneratorConfig, transformer: Box<dyn MarkupTransformer>) -> Self {
        Self {
            config,
            transformer,
            fragment_options: FragmentOptions::icon(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Derive the symbol for one image without touching its markup
    pub fn symbol_for(&self, path: &str) -> Result<String, GenerateError> {
        let symbol = symbol_name(path, &self.config.symbol_suffix);
        if !is_valid_identifier(&symbol) {
            return Err(GenerateError::InvalidSymbolName {
                path: path.to_string(),
                symbol,
            });
        }
        Ok(symbol)
    }

    /// Build the component file for a single image
    pub fn build_component(&self, image: &ImageSource) -> Result<ComponentUnit, GenerateError> {
        let malformed = |reason: MarkupError| GenerateError::MalformedInput {
            path: image.path.clone(),
            reason,
        };

        let symbol = self.symbol_for(&image.path)?;
        let fragment = self
            .transformer
            .fragmentize(&image.source, &self.fragment_options)
            .map_err(malformed)?;
        let view_box = self
            .transformer
            .extract_view_box(&image.source)
            .map_err(malformed)?;

        let rendered_source = render::render_component(
            &ComponentTemplate {
                symbol_name: &symbol,
                width: view_box.width,
                height: view_box.height,
                fragment: &fragment,
            },
            &ABSOLUTE_FILL,
        )?;

        debug!(
            path = %image.path,
            symbol = %symbol,
            width = view_box.width,
            height = view_box.height,
            "Built component"
        );

        Ok(ComponentUnit {
            file_stem: symbol.clone(),
            symbol_name: symbol,
            view_box,
            rendered_source,
        })
    }

    /// Generate the full package.
    ///
    /// Order: manifest, index, primitive, then one component per image in
    /// input order.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Vec<OutputFile>, GenerateError> {
        if semver::Version::parse(&request.version).is_err() {
            warn!(version = %request.version, "Package version is not valid semver; passing through");
        }

        let components = request
            .images
            .iter()
            .map(|image| self.build_component(image))
            .collect::<Result<Vec<_>, _>>()?;

        let collisions = warn_on_collisions(&request.images, &components);

        let entries: Vec<IndexEntry<'_>> = components
            .iter()
            .map(|c| IndexEntry {
                file_stem: &c.file_stem,
                symbol_name: &c.symbol_name,
            })
            .collect();

        let mut files = Vec::with_capacity(3 + components.len());
        files.push(OutputFile::new(
            MANIFEST_PATH,
            render::render_manifest(&self.config.package, &request.version)?,
        ));
        files.push(OutputFile::new(INDEX_PATH, render::render_index(&entries)?));
        files.push(OutputFile::new(PRIMITIVE_PATH, render::render_primitive()));
        files.extend(
            components
                .iter()
                .map(|c| OutputFile::new(c.filepath(), c.rendered_source.clone())),
        );

        info!(
            version = %request.version,
            transformer = self.transformer.name(),
            components = components.len(),
            collisions = collisions.len(),
            files = files.len(),
            "Generated package"
        );

        Ok(files)
    }
}

/// Two images that derived the same symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCollision {
    pub symbol: String,
    pub first: String,
    pub second: String,
}

/// Same-named components shadow each other in the index; all files are still emitted
fn warn_on_collisions(images: &[ImageSource], components: &[ComponentUnit]) -> Vec<SymbolCollision> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut collisions = vec![];
    for (image, component) in images.iter().zip(components) {
        if let Some(previous) = seen.insert(&component.symbol_name, &image.path) {
            warn!(
                symbol = %component.symbol_name,
                first = %previous,
                second = %image.path,
                "Symbol collision; later entry shadows earlier one in the index"
            );
            collisions.push(SymbolCollision {
                symbol: component.symbol_name.clone(),
                first: previous.to_string(),
                second: image.path.clone(),
            });
        }
    }
    collisions
}

impl Default for PackageGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Generate with the default configuration and transformer
pub fn generate(request: &GenerationRequest) -> Result<Vec<OutputFile>, GenerateError> {
    PackageGenerator::default().generate(request)
}
