//! Shared helpers for the integration specs.

#![allow(dead_code)]

use css_modules::{compile, localize, Options, Output, ScopeMode};

pub fn mode_options(mode: ScopeMode) -> Options {
    Options {
        mode,
        ..Options::default()
    }
}

pub fn from_options(from: &str) -> Options {
    Options {
        from: Some(from.to_string()),
        ..Options::default()
    }
}

/// Localize under the default (local) mode.
pub fn localized(css: &str) -> String {
    match localize(css, &Options::default()) {
        Ok(out) => out,
        Err(error) => panic!("localize failed on {:?}: {}", css, error),
    }
}

pub fn localized_in(css: &str, mode: ScopeMode) -> String {
    match localize(css, &mode_options(mode)) {
        Ok(out) => out,
        Err(error) => panic!("localize failed on {:?}: {}", css, error),
    }
}

/// Error message produced by localizing under the given mode.
pub fn localize_error(css: &str, mode: ScopeMode) -> String {
    localize(css, &mode_options(mode))
        .expect_err("localize should have failed")
        .to_string()
}

/// Full compilation with a path, so generated names are predictable.
pub fn compiled(css: &str, from: &str) -> Output {
    match compile(css, &from_options(from)) {
        Ok(output) => output,
        Err(error) => panic!("compile failed on {:?}: {}", css, error),
    }
}

/// Export table flattened to `name=value` lines for compact asserts.
pub fn export_lines(output: &Output) -> Vec<String> {
    output
        .exports
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect()
}
