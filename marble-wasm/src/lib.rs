//! WebAssembly bindings for the marble diagram compiler

use marble_core::{Config, DiagramSpec, Theme};
use wasm_bindgen::prelude::*;

/// Render a diagram written in the inline format to SVG
///
/// # Arguments
/// * `input` - Inline diagram source (`title ...`, `producer: a---b---|`, ...)
///
/// # Returns
/// The rendered SVG as a string, or an error message
#[wasm_bindgen]
pub fn render(input: &str) -> Result<String, String> {
    match marble_core::parse(input) {
        Ok(spec) => Ok(marble_core::render(&spec)),
        Err(e) => Err(e.to_string()),
    }
}

/// Render an inline diagram with a specific theme
///
/// # Arguments
/// * `input` - Inline diagram source
/// * `theme_name` - The name of the theme to use (e.g., "default", "high-contrast")
#[wasm_bindgen]
pub fn render_with_theme(input: &str, theme_name: &str) -> Result<String, String> {
    let theme = Theme::by_name(theme_name).unwrap_or_else(Theme::default);
    let config = Config::default().with_theme(theme);

    match marble_core::parse(input) {
        Ok(spec) => Ok(marble_core::render_with_config(&spec, &config)),
        Err(e) => Err(e.to_string()),
    }
}

/// Render one named diagram from a YAML configuration document
#[wasm_bindgen]
pub fn render_config(document: &str, name: &str) -> Result<String, String> {
    let specs = marble_core::from_yaml_str(document).map_err(|e| e.to_string())?;
    specs
        .iter()
        .find(|spec| spec.name == name)
        .map(marble_core::render)
        .ok_or_else(|| format!("No diagram named `{}`", name))
}

/// Names of the diagrams in a YAML configuration document, in document order
#[wasm_bindgen]
pub fn diagram_names(document: &str) -> Result<Vec<String>, String> {
    marble_core::from_yaml_str(document)
        .map(|specs| names(&specs))
        .map_err(|e| e.to_string())
}

/// Names of the built-in diagrams
#[wasm_bindgen]
pub fn default_diagram_names() -> Vec<String> {
    names(&marble_core::default_diagrams())
}

/// Get a list of available theme names
#[wasm_bindgen]
pub fn available_themes() -> Vec<String> {
    Theme::available_themes()
        .into_iter()
        .map(|s| s.to_string())
        .collect()
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn names(specs: &[DiagramSpec]) -> Vec<String> {
    specs.iter().map(|spec| spec.name.clone()).collect()
}
