//! Error and diagnostic types
//!
//! Fatal conditions abort the whole pass and carry the source position of
//! the rule that produced them. Non-fatal conditions are collected as
//! `Warning` values on the pass output instead of being logged.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::css::SourcePosition;

/// The failure conditions a compilation pass can hit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A scope marker appeared inside the argument of another marker.
    /// `found` is the offending token as written, `:local` or
    /// `:local(...)`.
    #[error("A {found} is not allowed inside of a :{inside}(...)")]
    MarkerInsideMarker { found: String, inside: String },

    /// A broad marker directly touched the token before it.
    #[error("Missing whitespace before :{marker}")]
    MissingWhitespaceBefore { marker: String },

    /// A broad marker directly touched the token after it.
    #[error("Missing whitespace after :{marker}")]
    MissingWhitespaceAfter { marker: String },

    /// The alternatives of one selector list did not all end in the same
    /// scope.
    #[error("Inconsistent rule scoping in \"{selector}\": every selector must end local or every selector must end global")]
    InconsistentSelectorResult { selector: String },

    /// Pure mode requires at least one local class or id per rule.
    #[error("Selector \"{selector}\" is not pure (pure selectors must contain at least one local class or id)")]
    SelectorNotPure { selector: String },

    /// `composes` appeared in a rule whose selector is not a single local
    /// class.
    #[error("Composition is only allowed when the selector is a single local class, got \"{selector}\"")]
    InvalidComposition { selector: String },

    /// The stylesheet itself could not be parsed.
    #[error("{message}")]
    Syntax { message: String },
}

impl ErrorKind {
    pub(crate) fn syntax(message: impl Into<String>) -> ErrorKind {
        ErrorKind::Syntax {
            message: message.into(),
        }
    }
}

/// A fatal error, located at the rule that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub file: Option<String>,
    pub position: SourcePosition,
}

impl CompileError {
    pub fn new(kind: ErrorKind, position: SourcePosition) -> CompileError {
        CompileError {
            kind,
            file: None,
            position,
        }
    }

    pub(crate) fn with_file(mut self, file: Option<&str>) -> CompileError {
        if self.file.is_none() {
            self.file = file.map(str::to_string);
        }
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.kind)?;
        if let Some(file) = &self.file {
            write!(f, "{}@", file)?;
        }
        write!(f, "{}:{}", self.position.line, self.position.column)
    }
}

impl std::error::Error for CompileError {}

/// A non-fatal diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub message: String,
    pub position: Option<SourcePosition>,
}

impl Warning {
    pub fn new(message: impl Into<String>, position: SourcePosition) -> Warning {
        Warning {
            message: message.into(),
            position: Some(position),
        }
    }
}
