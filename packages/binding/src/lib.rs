#![deny(clippy::all)]

use std::sync::Arc;

use napi::bindgen_prelude::*;
use napi_derive::napi;

use css_modules::Options;

#[napi(object)]
#[derive(Default)]
pub struct CompileOptions {
    /// "local", "global" or "pure". Anything else falls back to "local".
    pub mode: Option<String>,
    /// Path of the file being compiled.
    pub from: Option<String>,
    /// Use the content-hashed name generator instead of the path-derived
    /// one.
    pub hashed: Option<bool>,
}

#[napi(object)]
pub struct ExportEntry {
    pub name: String,
    pub value: String,
}

#[napi(object)]
pub struct CompileResult {
    /// Rewritten stylesheet.
    pub css: String,
    /// `:export` table in declaration order.
    pub exports: Vec<ExportEntry>,
    pub warnings: Vec<String>,
}

fn build_options(options: Option<CompileOptions>) -> Options {
    let options = options.unwrap_or_default();
    let mut built = Options::default();
    if let Some(mode) = options.mode.as_deref() {
        built.mode = mode.parse().unwrap_or_default();
    }
    built.from = options.from;
    if options.hashed.unwrap_or(false) {
        built.generate_scoped_name = Some(Arc::new(css_modules::hashed_scoped_name));
    }
    built
}

fn format_warning(warning: &css_modules::Warning) -> String {
    match warning.position {
        Some(position) => format!("{} ({}:{})", warning.message, position.line, position.column),
        None => warning.message.clone(),
    }
}

/// Scope a stylesheet and return the rewritten CSS plus its exports.
#[napi]
pub fn compile(source: String, options: Option<CompileOptions>) -> Result<CompileResult> {
    let options = build_options(options);
    let output = css_modules::compile(&source, &options)
        .map_err(|error| Error::from_reason(error.to_string()))?;
    Ok(CompileResult {
        css: output.css,
        exports: output
            .exports
            .iter()
            .map(|(name, value)| ExportEntry {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
        warnings: output.warnings.iter().map(format_warning).collect(),
    })
}

/// Run only the localization pass, leaving names and exports alone.
#[napi]
pub fn localize(source: String, options: Option<CompileOptions>) -> Result<String> {
    let options = build_options(options);
    css_modules::localize(&source, &options).map_err(|error| Error::from_reason(error.to_string()))
}

/// Like `compile`, but returns the whole result as one JSON string with
/// the exports as an ordered object.
#[napi]
pub fn compile_to_json(source: String, options: Option<CompileOptions>) -> Result<String> {
    let options = build_options(options);
    let output = css_modules::compile(&source, &options)
        .map_err(|error| Error::from_reason(error.to_string()))?;
    let result = serde_json::json!({
        "css": output.css,
        "exports": output.exports,
        "warnings": output.warnings,
    });
    Ok(result.to_string())
}

/// Engine version, for the JS side's diagnostics.
#[napi]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
