//! Configuration
//!
//! Options for a compilation pass and the built-in scoped-name
//! generators.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

/// How identifiers are scoped when no marker says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeMode {
    /// Classes and ids are local unless marked `:global`.
    Local,
    /// Classes and ids are global unless marked `:local`.
    Global,
    /// Like `Local`, but every rule must contain at least one local class
    /// or id.
    Pure,
}

impl Default for ScopeMode {
    fn default() -> ScopeMode {
        ScopeMode::Local
    }
}

impl FromStr for ScopeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<ScopeMode, String> {
        match s {
            "local" => Ok(ScopeMode::Local),
            "global" => Ok(ScopeMode::Global),
            "pure" => Ok(ScopeMode::Pure),
            other => Err(format!("unknown scope mode \"{}\"", other)),
        }
    }
}

/// Signature of a scoped-name generator: identifier, path of the file
/// being compiled, full source text.
pub type ScopedNameFn = dyn Fn(&str, &str, &str) -> String + Send + Sync;

/// Options for one compilation pass.
#[derive(Clone, Default)]
pub struct Options {
    pub mode: ScopeMode,
    /// Path of the file being compiled. Feeds the name generators and is
    /// attached to errors.
    pub from: Option<String>,
    /// Generator used for aliases; [`default_scoped_name`] when `None`.
    pub generate_scoped_name: Option<Arc<ScopedNameFn>>,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("mode", &self.mode)
            .field("from", &self.from)
            .field(
                "generate_scoped_name",
                &self.generate_scoped_name.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

impl Options {
    pub(crate) fn scoped_name(&self, identifier: &str, source: &str) -> String {
        let from = self.from.as_deref().unwrap_or("");
        match &self.generate_scoped_name {
            Some(generate) => generate(identifier, from, source),
            None => default_scoped_name(identifier, from, source),
        }
    }
}

// Constants
static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());
static FILE_EXTENSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[^./\\]+$").unwrap());

/// Path-derived generator: `_<sanitized path without extension>__<name>`.
/// Stable across runs for the same file, which keeps snapshots and
/// server/client builds in sync.
pub fn default_scoped_name(identifier: &str, from: &str, _source: &str) -> String {
    let stem = FILE_EXTENSION_RE.replace(from, "");
    let sanitized = NON_WORD_RE.replace_all(&stem, "_");
    format!("_{}__{}", sanitized.trim_matches('_'), identifier)
}

/// Content-addressed generator: `_<name>_<8 hex chars of xxh3>`. The hash
/// covers path, source text and identifier, so any edit to the file
/// produces fresh names.
pub fn hashed_scoped_name(identifier: &str, from: &str, source: &str) -> String {
    let mut data = String::with_capacity(from.len() + source.len() + identifier.len());
    data.push_str(from);
    data.push_str(source);
    data.push_str(identifier);
    let hash = xxh3_64(data.as_bytes()) & 0xffff_ffff;
    format!("_{}_{:08x}", identifier, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_sanitize_the_path_in_default_names() {
        assert_eq!(
            default_scoped_name("foobar", "/foo/bar/test.css", ""),
            "_foo_bar_test__foobar"
        );
        assert_eq!(
            default_scoped_name("a", "c:\\styles\\app.module.css", ""),
            "_c_styles_app_module__a"
        );
    }

    #[test]
    fn should_produce_stable_hashed_names() {
        let first = hashed_scoped_name("foo", "a.css", ".foo {}");
        let second = hashed_scoped_name("foo", "a.css", ".foo {}");
        assert_eq!(first, second);
        assert!(first.starts_with("_foo_"));
        assert_eq!(first.len(), "_foo_".len() + 8);
    }

    #[test]
    fn should_change_hashed_names_when_the_source_changes() {
        let before = hashed_scoped_name("foo", "a.css", ".foo {}");
        let after = hashed_scoped_name("foo", "a.css", ".foo { color: red }");
        assert_ne!(before, after);
    }

    #[test]
    fn should_parse_scope_modes_from_strings() {
        assert_eq!("local".parse::<ScopeMode>().unwrap(), ScopeMode::Local);
        assert_eq!("global".parse::<ScopeMode>().unwrap(), ScopeMode::Global);
        assert_eq!("pure".parse::<ScopeMode>().unwrap(), ScopeMode::Pure);
        assert!("shadow".parse::<ScopeMode>().is_err());
    }
}
