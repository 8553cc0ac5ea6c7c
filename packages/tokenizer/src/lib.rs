//! CSS Selector Tokenizer
//!
//! Parses CSS selector strings into a typed node tree and serializes the
//! tree back to text. The tree distinguishes exactly the constructs a
//! selector-rewriting pass needs to see (classes, ids, pseudo-classes and
//! their arguments, spacing, combinators); everything else is carried as
//! verbatim spans, so parsing and serializing an arbitrary selector
//! reproduces it unchanged.

pub mod ast;
mod parse;

pub use ast::{Selector, SelectorList, SelectorNode};
pub use parse::parse;

/// Serialize a selector list back to its string form.
pub fn stringify(list: &SelectorList) -> String {
    list.to_string()
}
