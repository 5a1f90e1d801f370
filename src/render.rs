//! Render System - One Template Per Output Kind
//!
//! Every emitted file has its own typed render function. JSON-shaped
//! content goes through serde_json so strings are always escaped.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::PackageConfig;

pub const MANIFEST_PATH: &str = "package.json";
pub const INDEX_PATH: &str = "index.ts";
pub const PRIMITIVE_PATH: &str = "Box.tsx";
pub const COMPONENT_EXTENSION: &str = "tsx";

/// Absolute-fill style applied to every embedded SVG root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillStyle {
    pub position: &'static str,
    pub top: &'static str,
    pub right: &'static str,
    pub bottom: &'static str,
    pub left: &'static str,
    pub width: &'static str,
    pub height: &'static str,
}

pub static ABSOLUTE_FILL: FillStyle = FillStyle {
    position: "absolute",
    top: "0",
    right: "0",
    bottom: "0",
    left: "0",
    width: "100%",
    height: "100%",
};

/// Inputs for a single component file
#[derive(Debug, Clone, Copy)]
pub struct ComponentTemplate<'a> {
    pub symbol_name: &'a str,
    pub width: u32,
    pub height: u32,
    pub fragment: &'a str,
}

/// One row of the index's `ICONS` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry<'a> {
    #[serde(rename = "fileName")]
    pub file_stem: &'a str,
    #[serde(rename = "componentName")]
    pub symbol_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest<'a> {
    name: &'a str,
    version: &'a str,
    peer_dependencies: &'a BTreeMap<String, String>,
    main: &'a str,
    types: &'a str,
    publish_config: PublishManifest<'a>,
}

#[derive(Serialize)]
struct PublishManifest<'a> {
    access: &'a str,
    registry: &'a str,
}

fn primitive_module() -> &'static str {
    PRIMITIVE_PATH.trim_end_matches(".tsx")
}

/// Per-image component: Box sized to the viewBox, SVG fragment as children
pub fn render_component(
    template: &ComponentTemplate<'_>,
    style: &FillStyle,
) -> Result<String, serde_json::Error> {
    let style_json = serde_json::to_string(style)?;
    let name = template.symbol_name;

    Ok(format!(
        r#"import * as React from "react";
import {{ Box, BoxProps }} from "./{primitive}";

const svgStyle: React.CSSProperties = {style_json};

const {name} = (props: BoxProps) => {{
  return (
    <Box position="relative" width={{{width}}} height={{{height}}} {{...props}}>{fragment}</Box>
  );
}};

{name}.displayName = {display_name};

export default {name};
"#,
        primitive = primitive_module(),
        style_json = style_json,
        name = name,
        width = template.width,
        height = template.height,
        fragment = template.fragment,
        display_name = serde_json::to_string(name)?,
    ))
}

/// Aggregating index, discouraged for direct consumption
pub fn render_index(entries: &[IndexEntry<'_>]) -> Result<String, serde_json::Error> {
    let mut out = String::from(
        "console.warn(\"For internal use only. Import from the individual files rather than from the index.\");\n",
    );
    out.push_str(&format!("export const ICONS = {};\n", serde_json::to_string(entries)?));

    if !entries.is_empty() {
        out.push('\n');
    }
    for entry in entries {
        out.push_str(&format!(
            "export {{ default as {} }} from {};\n",
            entry.symbol_name,
            serde_json::to_string(&format!("./{}", entry.file_stem))?,
        ));
    }

    Ok(out)
}

/// Shared layout primitive. The styled-system `color` prop is omitted so
/// foreground color only ever comes from the SVG `fill`.
pub fn render_primitive() -> String {
    r#"import styled from "styled-components";
import {
  ColorProps,
  FlexboxProps,
  LayoutProps,
  PositionProps,
  SpaceProps,
  color,
  flexbox,
  layout,
  position,
  space,
} from "styled-system";

export interface BoxProps
  extends FlexboxProps,
    LayoutProps,
    PositionProps,
    SpaceProps,
    Omit<ColorProps, "color"> {}

export const Box = styled.div<BoxProps>(flexbox, layout, position, space, color);
"#
    .to_string()
}

/// `package.json`; only `version` varies between calls
pub fn render_manifest(package: &PackageConfig, version: &str) -> Result<String, serde_json::Error> {
    let manifest = PackageManifest {
        name: &package.name,
        version,
        peer_dependencies: &package.peer_dependencies,
        main: &package.main,
        types: &package.types,
        publish_config: PublishManifest {
            access: &package.publish_config.access,
            registry: &package.publish_config.registry,
        },
    };
    let mut out = serde_json::to_string_pretty(&manifest)?;
    out.push('\n');
    Ok(out)
}
