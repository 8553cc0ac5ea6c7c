//! Selector AST
//!
//! Node tree produced by the selector tokenizer. Nodes serialize with a
//! kebab-case `type` tag so the JSON form matches the node records emitted
//! by the CSS tooling this crate interoperates with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A comma-separated selector list, e.g. `.a > .b, .c`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectorList {
    pub nodes: Vec<Selector>,
}

/// One alternative of a selector list.
///
/// `before` holds the whitespace that followed the comma separating this
/// alternative from the previous one (empty for the first alternative).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selector {
    pub nodes: Vec<SelectorNode>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub before: String,
}

/// A single token within a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SelectorNode {
    /// Type selector, e.g. `input`.
    Element { name: String },
    /// The universal selector `*`.
    Universal,
    /// Class selector `.name`. The name keeps escape sequences verbatim.
    Class { name: String },
    /// Id selector `#name`.
    Id { name: String },
    /// Attribute selector; `content` is the raw text between `[` and `]`.
    Attribute { content: String },
    /// Pseudo-class without arguments, e.g. `:hover`. Single-colon
    /// pseudo-element syntax (`:after`) also lands here.
    PseudoClass { name: String },
    /// Double-colon pseudo-element, e.g. `::before`.
    PseudoElement { name: String },
    /// Functional pseudo-class, e.g. `:not(.foo)`. The parenthesized
    /// argument is a single selector; commas inside it are represented as
    /// `Operator` nodes so generalized lists like `:is(.a, .b)` keep this
    /// shape.
    NestedPseudoClass { name: String, selector: Selector },
    /// A run of whitespace acting as a descendant combinator.
    Spacing { value: String },
    /// Combinator (`>`, `+`, `~`) or an in-argument comma, together with
    /// the whitespace on either side of it.
    Operator {
        value: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        before: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        after: String,
    },
    /// Verbatim span the tokenizer does not model (quoted strings,
    /// nth-formula fragments, stray characters). Serializes back exactly
    /// as scanned.
    Invalid { value: String },
}

impl SelectorList {
    pub fn new(nodes: Vec<Selector>) -> Self {
        SelectorList { nodes }
    }
}

impl Selector {
    pub fn new(nodes: Vec<SelectorNode>) -> Self {
        Selector {
            nodes,
            before: String::new(),
        }
    }

    /// Selector wrapping a single node, used when synthesizing wrappers.
    pub fn from_node(node: SelectorNode) -> Self {
        Selector::new(vec![node])
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SelectorNode {
    pub fn is_spacing(&self) -> bool {
        matches!(self, SelectorNode::Spacing { .. })
    }

    /// Name of the identifier carried by a class or id node.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            SelectorNode::Class { name } | SelectorNode::Id { name } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for SelectorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorNode::Element { name } => write!(f, "{}", name),
            SelectorNode::Universal => write!(f, "*"),
            SelectorNode::Class { name } => write!(f, ".{}", name),
            SelectorNode::Id { name } => write!(f, "#{}", name),
            SelectorNode::Attribute { content } => write!(f, "[{}]", content),
            SelectorNode::PseudoClass { name } => write!(f, ":{}", name),
            SelectorNode::PseudoElement { name } => write!(f, "::{}", name),
            SelectorNode::NestedPseudoClass { name, selector } => {
                write!(f, ":{}({})", name, selector)
            }
            SelectorNode::Spacing { value } => write!(f, "{}", value),
            SelectorNode::Operator {
                value,
                before,
                after,
            } => write!(f, "{}{}{}", before, value, after),
            SelectorNode::Invalid { value } => write!(f, "{}", value),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, selector) in self.nodes.iter().enumerate() {
            if index != 0 {
                write!(f, ",{}", selector.before)?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}
