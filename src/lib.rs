//! IconPack Core - SVG to React Component Package Compiler
//!
//! # Ground Rules
//! 1. SVG Is Truth (size comes from the root viewBox, nothing else)
//! 2. One Template Per Output Kind
//! 3. Malformed Input Aborts Everything
//! 4. Deterministic Output
//! 5. No I/O In The Core

pub mod naming;
pub mod markup;
pub mod render;
pub mod config;
pub mod hashing;
pub mod generator;

pub use naming::{symbol_name, pascal_case};
pub use markup::{MarkupTransformer, JsxTransformer, MarkupError, ViewBox, FragmentOptions};
pub use render::FillStyle;
pub use config::{GeneratorConfig, PackageConfig, ConfigError};
pub use hashing::{compute_package_digest, canonical_json};
pub use generator::{
    generate, PackageGenerator, GenerationRequest, ImageSource, ComponentUnit, OutputFile, GenerateError,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
