//! Stylesheet model: raws-preserving AST, parser and serializer.

pub mod ast;
mod parser;
mod serializer;

pub use ast::{
    AtRule, AtRuleRaws, Declaration, DeclarationRaws, Node, Root, Rule, RuleRaws, SourcePosition,
};
pub use parser::parse;
pub use serializer::serialize;
