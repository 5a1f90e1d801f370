//! Markup System - SVG to Embeddable JSX
//!
//! Two capabilities sit behind the `MarkupTransformer` seam:
//! - `fragmentize`: SVG markup -> JSX fragment with injected root props
//! - `extract_view_box`: intrinsic size from the root `viewBox`
//!
//! The default implementation is a regex tokenizer. It handles the markup
//! icon exporters produce; it is not a validating XML parser.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)<!--.*?-->",
        r"|<\?.*?\?>",
        r"|<!\[CDATA\[(?P<cdata>.*?)\]\]>",
        r"|<![^>]*>",
        r#"|<(?P<close>/)?(?P<name>[A-Za-z_][\w:.-]*)"#,
        r#"(?P<attrs>(?:\s+[^\s=/>]+(?:\s*=\s*(?:"[^"]*"|'[^']*'))?)*)"#,
        r"\s*(?P<selfclose>/)?>",
    ))
    .unwrap()
});

static ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<name>[^\s=/>]+)(?:\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'))?"#).unwrap()
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("No root element found")]
    NoRootElement,

    #[error("Root element has no viewBox attribute")]
    MissingViewBox,

    #[error("Invalid viewBox \"{0}\": expected four integers \"minX minY width height\"")]
    InvalidViewBox(String),

    #[error("Unbalanced tag: {0}")]
    UnbalancedTag(String),

    #[error("Unescaped '<' in text content: {0}")]
    UnescapedText(String),

    #[error("Element <{0}> follows the root element")]
    MultipleRoots(String),
}

/// Parsed `viewBox`; only `width` and `height` size the generated component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBox {
    pub min_x: i64,
    pub min_y: i64,
    pub width: u32,
    pub height: u32,
}

impl ViewBox {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Value of a prop injected on the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    /// Rendered as `name="value"`
    Literal(String),
    /// Rendered as `name={expr}`
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentOptions {
    /// Append `{...props}` to the root element
    pub expand_props: bool,
    /// Props set on the root element, replacing same-named attributes
    pub root_props: Vec<(String, PropValue)>,
}

impl FragmentOptions {
    /// Root receives `style={svgStyle}` and `fill="currentColor"`, no spread
    pub fn icon() -> Self {
        Self {
            expand_props: false,
            root_props: vec![
                ("style".to_string(), PropValue::Expression("svgStyle".to_string())),
                ("fill".to_string(), PropValue::Literal("currentColor".to_string())),
            ],
        }
    }
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self::icon()
    }
}

/// Markup transformer trait - the only place raw SVG is interpreted
pub trait MarkupTransformer {
    fn name(&self) -> &'static str;
    fn fragmentize(&self, markup: &str, options: &FragmentOptions) -> Result<String, MarkupError>;
    fn extract_view_box(&self, markup: &str) -> Result<ViewBox, MarkupError>;
}

/// Regex-based SVG -> JSX transformer
#[derive(Debug, Clone, Copy, Default)]
pub struct JsxTransformer;

impl MarkupTransformer for JsxTransformer {
    fn name(&self) -> &'static str { "jsx" }

    fn fragmentize(&self, markup: &str, options: &FragmentOptions) -> Result<String, MarkupError> {
        fragmentize(markup, options)
    }

    fn extract_view_box(&self, markup: &str) -> Result<ViewBox, MarkupError> {
        extract_view_box(markup)
    }
}

// --- Tokenizer ---

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribute {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Open { name: String, attrs: Vec<Attribute>, self_closing: bool },
    Close { name: String },
    Text(String),
    CData(String),
}

fn parse_attributes(raw: &str) -> Vec<Attribute> {
    ATTR_REGEX
        .captures_iter(raw)
        .map(|caps| Attribute {
            name: caps["name"].to_string(),
            value: caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .map(|m| m.as_str().to_string()),
        })
        .collect()
}

fn tokenize(markup: &str) -> Vec<Node> {
    let mut nodes = vec![];
    let mut cursor = 0;

    for caps in TOKEN_REGEX.captures_iter(markup) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            nodes.push(Node::Text(markup[cursor..whole.start()].to_string()));
        }
        cursor = whole.end();

        if let Some(cdata) = caps.name("cdata") {
            nodes.push(Node::CData(cdata.as_str().to_string()));
        } else if let Some(name) = caps.name("name") {
            let name = name.as_str().to_string();
            if caps.name("close").is_some() {
                nodes.push(Node::Close { name });
            } else {
                let attrs = caps.name("attrs").map(|a| parse_attributes(a.as_str())).unwrap_or_default();
                let self_closing = caps.name("selfclose").is_some();
                nodes.push(Node::Open { name, attrs, self_closing });
            }
        }
        // Comments, processing instructions and doctypes are dropped
    }

    if cursor < markup.len() {
        nodes.push(Node::Text(markup[cursor..].to_string()));
    }

    nodes
}

fn root_attributes(nodes: &[Node]) -> Option<&[Attribute]> {
    nodes.iter().find_map(|node| match node {
        Node::Open { attrs, .. } => Some(attrs.as_slice()),
        _ => None,
    })
}

// --- viewBox ---

/// Parse `"minX minY width height"`; whitespace and commas both separate
pub fn parse_view_box(value: &str) -> Result<ViewBox, MarkupError> {
    let invalid = || MarkupError::InvalidViewBox(value.to_string());
    let tokens: Vec<&str> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let [min_x, min_y, width, height] = tokens.as_slice() else {
        return Err(invalid());
    };

    Ok(ViewBox {
        min_x: min_x.parse().map_err(|_| invalid())?,
        min_y: min_y.parse().map_err(|_| invalid())?,
        width: width.parse().map_err(|_| invalid())?,
        height: height.parse().map_err(|_| invalid())?,
    })
}

/// Read the root element's `viewBox`
pub fn extract_view_box(markup: &str) -> Result<ViewBox, MarkupError> {
    let nodes = tokenize(markup);
    let attrs = root_attributes(&nodes).ok_or(MarkupError::NoRootElement)?;
    let value = attrs
        .iter()
        .find(|a| a.name == "viewBox")
        .and_then(|a| a.value.as_deref())
        .ok_or(MarkupError::MissingViewBox)?;
    parse_view_box(value)
}

// --- JSX emission ---

/// Attribute name as JSX expects it
pub fn jsx_attribute_name(name: &str) -> String {
    match name {
        "class" => return "className".to_string(),
        "for" => return "htmlFor".to_string(),
        _ => {}
    }
    if name.starts_with("data-") || name.starts_with("aria-") {
        return name.to_string();
    }
    camel_case(name, &['-', ':'])
}

fn camel_case(name: &str, separators: &[char]) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, part) in name.split(separators).enumerate() {
        if i == 0 {
            out.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// `"fill: red; stroke-width: 2"` -> `{{ fill: "red", strokeWidth: "2" }}`
fn style_object(css: &str) -> String {
    let entries: Vec<String> = css
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| format!("{}: {}", camel_case(key, &['-']), quote(value)))
        .collect();
    format!("{{{{ {} }}}}", entries.join(", "))
}

fn render_attribute(attr: &Attribute) -> String {
    let name = jsx_attribute_name(&attr.name);
    match &attr.value {
        None => name,
        Some(value) if name == "style" => format!("{}={}", name, style_object(value)),
        Some(value) if value.contains('"') => format!("{}={{{}}}", name, quote(value)),
        Some(value) => format!("{}=\"{}\"", name, value),
    }
}

fn render_prop(name: &str, value: &PropValue) -> String {
    match value {
        PropValue::Expression(expr) => format!("{}={{{}}}", name, expr),
        PropValue::Literal(lit) if lit.contains('"') => format!("{}={{{}}}", name, quote(lit)),
        PropValue::Literal(lit) => format!("{}=\"{}\"", name, lit),
    }
}

fn render_text(text: &str) -> Option<String> {
    if text.trim().is_empty() && text.contains('\n') {
        return None;
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' | '}' | '>' => {
                out.push('{');
                out.push_str(&quote(&c.to_string()));
                out.push('}');
            }
            _ => out.push(c),
        }
    }
    Some(out)
}

fn render_open_tag(name: &str, attrs: Vec<String>, self_closing: bool) -> String {
    let mut tag = format!("<{}", name);
    for attr in attrs {
        tag.push(' ');
        tag.push_str(&attr);
    }
    tag.push_str(if self_closing { " />" } else { ">" });
    tag
}

/// Element has no content other than newline-only whitespace before its close tag
fn is_empty_element(nodes: &[Node], open_idx: usize, name: &str) -> bool {
    for node in &nodes[open_idx + 1..] {
        match node {
            Node::Close { name: close } => return close == name,
            Node::Text(text) if render_text(text).is_none() => continue,
            _ => return false,
        }
    }
    false
}

/// Convert SVG markup into a single JSX expression.
///
/// Only the element tree is emitted; wrapping it in a component is the
/// caller's job.
pub fn fragmentize(markup: &str, options: &FragmentOptions) -> Result<String, MarkupError> {
    let nodes = tokenize(markup);
    let mut out = String::with_capacity(markup.len() + 64);
    let mut stack: Vec<String> = vec![];
    let mut seen_root = false;
    let mut skip_close = vec![false; nodes.len()];

    for (idx, node) in nodes.iter().enumerate() {
        match node {
            Node::Open { name, attrs, self_closing } => {
                if seen_root && stack.is_empty() {
                    return Err(MarkupError::MultipleRoots(name.clone()));
                }
                let is_root = !seen_root;
                seen_root = true;

                let mut rendered: Vec<String> = attrs
                    .iter()
                    .filter(|a| {
                        !is_root
                            || !options
                                .root_props
                                .iter()
                                .any(|(prop, _)| *prop == jsx_attribute_name(&a.name))
                    })
                    .map(render_attribute)
                    .collect();

                if is_root {
                    rendered.extend(options.root_props.iter().map(|(n, v)| render_prop(n, v)));
                    if options.expand_props {
                        rendered.push("{...props}".to_string());
                    }
                }

                let collapse = !*self_closing && is_empty_element(&nodes, idx, name);
                out.push_str(&render_open_tag(name, rendered, *self_closing || collapse));

                if collapse {
                    if let Some(close_idx) = nodes[idx + 1..]
                        .iter()
                        .position(|n| matches!(n, Node::Close { .. }))
                    {
                        skip_close[idx + 1 + close_idx] = true;
                    }
                } else if !*self_closing {
                    stack.push(name.clone());
                }
            }
            Node::Close { name } => {
                if skip_close[idx] {
                    continue;
                }
                match stack.pop() {
                    Some(open) if open == *name => {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                    _ => return Err(MarkupError::UnbalancedTag(name.clone())),
                }
            }
            Node::Text(text) => {
                // Nothing outside the root element survives
                if stack.is_empty() {
                    continue;
                }
                // Well-formed XML writes a literal '<' as &lt;
                if text.contains('<') {
                    return Err(MarkupError::UnescapedText(text.trim().to_string()));
                }
                if let Some(text) = render_text(text) {
                    out.push_str(&text);
                }
            }
            Node::CData(data) => {
                if !stack.is_empty() {
                    out.push('{');
                    out.push_str(&quote(data));
                    out.push('}');
                }
            }
        }
    }

    if !seen_root {
        return Err(MarkupError::NoRootElement);
    }
    if let Some(unclosed) = stack.pop() {
        return Err(MarkupError::UnbalancedTag(unclosed));
    }

    Ok(out)
}
