#![deny(clippy::all)]

/**
 * CSS Modules Engine
 *
 * Scopes class and id selectors to the file they were written in.
 * Stylesheets opt in or out per selector with `:local` / `:global`
 * markers. Scoped names are generated per identifier and recorded in an
 * alias registry, then published as an ICSS `:export` block with
 * `composes` edges expanded through a shared message bus.
 */

// Core modules
pub mod config;
pub mod css;
pub mod error;
pub mod localize;
pub mod messages;
pub mod registry;

// Pipeline modules
mod compiler;
mod exports;
mod scope;

// Re-exports
pub use compiler::{compile, compile_files, compile_with_bus, Output, SourceFile};
pub use config::{default_scoped_name, hashed_scoped_name, Options, ScopeMode, ScopedNameFn};
pub use error::{CompileError, ErrorKind, Warning};
pub use exports::ExportTable;
pub use messages::{Message, MessageBus, MessageKind, ENGINE_ORIGIN};

#[doc(inline)]
pub use compiler::localize;
