//! Stylesheet AST
//!
//! A small rule tree that keeps every piece of trivia (whitespace,
//! comments, stray semicolons) attached to its nodes, so an untouched
//! stylesheet serializes back byte for byte and a rewritten one only
//! changes where the rewrite happened.

use serde::{Deserialize, Serialize};

/// Location of a node in the source text. `offset` counts characters,
/// `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for SourcePosition {
    fn default() -> SourcePosition {
        SourcePosition {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Trivia around a rule: `before` precedes the selector, `between` sits
/// between the selector and `{`, `after` sits between the last child and
/// `}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleRaws {
    pub before: String,
    pub between: String,
    pub after: String,
}

/// Trivia around an at-rule. `after_name` separates `@name` from the
/// params, `between` separates the params from `{` (or from `;` for
/// statements), `after` sits before the closing `}` of bodied forms.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AtRuleRaws {
    pub before: String,
    pub after_name: String,
    pub between: String,
    pub after: String,
}

/// Trivia around a declaration. `between` covers the colon and its
/// surrounding whitespace, `after_value` is whitespace between the value
/// and the terminating `;` or `}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeclarationRaws {
    pub before: String,
    pub between: String,
    pub after_value: String,
}

/// A `selector { ... }` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    pub raws: RuleRaws,
    pub pos: SourcePosition,
}

/// An `@name params;` statement or `@name params { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    /// `None` for statement form, `Some` for block form (even when the
    /// block is empty).
    pub nodes: Option<Vec<Node>>,
    pub has_semicolon: bool,
    pub raws: AtRuleRaws,
    pub pos: SourcePosition,
}

/// A `prop: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub has_semicolon: bool,
    pub raws: DeclarationRaws,
    pub pos: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
}

impl Node {
    /// Mutable access to the node's leading trivia.
    pub(crate) fn before_mut(&mut self) -> &mut String {
        match self {
            Node::Rule(rule) => &mut rule.raws.before,
            Node::AtRule(at_rule) => &mut at_rule.raws.before,
            Node::Declaration(declaration) => &mut declaration.raws.before,
        }
    }
}

/// A whole stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Root {
    pub nodes: Vec<Node>,
    /// Trivia after the last node.
    pub after: String,
}
