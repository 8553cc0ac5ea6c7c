//! Selector Localization
//!
//! First pass over a selector: every class and id that applies in local
//! scope is wrapped in a synthetic `:local(...)` pseudo-class, and the
//! `:local` / `:global` markers that drove the decision are consumed.
//! The output only contains the functional forms, which is what makes the
//! pass idempotent: running it over its own output wraps nothing new.
//!
//! Markers come in two shapes. The broad form (`:local`, `:global`)
//! switches the scope for the rest of the alternative and must be
//! separated from surrounding tokens by whitespace or a combinator. The
//! narrow form (`:local(...)`, `:global(...)`) scopes only its argument;
//! its children are rewritten under that scope and spliced in place of
//! the wrapper. Markers may not nest.

use css_selector_tokenizer::{Selector, SelectorNode};

use crate::config::ScopeMode;
use crate::error::ErrorKind;

/// Scope in effect at a point of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Local,
    Global,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Local => "local",
            Mode::Global => "global",
        }
    }

    fn from_marker(name: &str) -> Option<Mode> {
        match name {
            "local" => Some(Mode::Local),
            "global" => Some(Mode::Global),
            _ => None,
        }
    }
}

/// Scope a pass starts in, derived from the configured mode.
pub fn initial_mode(mode: ScopeMode) -> Mode {
    match mode {
        ScopeMode::Global => Mode::Global,
        ScopeMode::Local | ScopeMode::Pure => Mode::Local,
    }
}

/// State threaded through the walk of one alternative.
#[derive(Debug, Clone, Copy)]
pub struct ModeContext {
    /// Scope applied to the next class or id.
    pub mode: Mode,
    /// Set while inside a narrow marker's argument, where further markers
    /// are illegal.
    pub inside: Option<Mode>,
    /// Whether the walk localized at least one identifier.
    pub saw_local: bool,
}

impl ModeContext {
    pub fn new(mode: Mode) -> ModeContext {
        ModeContext {
            mode,
            inside: None,
            saw_local: false,
        }
    }
}

/// Rewrite one alternative. Returns the rewritten nodes and the context
/// as it stood at the end of the walk; the final `mode` is what the
/// consistency check across alternatives compares.
pub fn localize_selector(
    selector: &Selector,
    mut context: ModeContext,
) -> Result<(Selector, ModeContext), ErrorKind> {
    let nodes = localize_nodes(&selector.nodes, &mut context)?;
    Ok((
        Selector {
            nodes,
            before: selector.before.clone(),
        },
        context,
    ))
}

fn is_broad_marker(node: Option<&SelectorNode>) -> bool {
    matches!(node, Some(SelectorNode::PseudoClass { name }) if Mode::from_marker(name).is_some())
}

fn is_spacing_or_operator(node: &SelectorNode) -> bool {
    matches!(
        node,
        SelectorNode::Spacing { .. } | SelectorNode::Operator { .. }
    )
}

fn trim_spacing(nodes: Vec<SelectorNode>) -> Vec<SelectorNode> {
    let start = nodes
        .iter()
        .position(|node| !node.is_spacing())
        .unwrap_or(nodes.len());
    let end = nodes
        .iter()
        .rposition(|node| !node.is_spacing())
        .map_or(start, |last| last + 1);
    nodes.into_iter().take(end).skip(start).collect()
}

fn localize_nodes(
    nodes: &[SelectorNode],
    context: &mut ModeContext,
) -> Result<Vec<SelectorNode>, ErrorKind> {
    let mut out = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        match node {
            // Whitespace and combinators swallow the gap that separated
            // them from a following broad marker; the marker itself is
            // consumed, so the gap must not survive it.
            SelectorNode::Spacing { .. } => {
                if is_broad_marker(nodes.get(index + 1)) {
                    out.push(SelectorNode::Spacing {
                        value: String::new(),
                    });
                } else {
                    out.push(node.clone());
                }
            }
            SelectorNode::Operator { value, before, .. } => {
                if is_broad_marker(nodes.get(index + 1)) {
                    out.push(SelectorNode::Operator {
                        value: value.clone(),
                        before: before.clone(),
                        after: String::new(),
                    });
                } else {
                    out.push(node.clone());
                }
            }
            SelectorNode::PseudoClass { name } => {
                let Some(mode) = Mode::from_marker(name) else {
                    out.push(node.clone());
                    continue;
                };
                if let Some(inside) = context.inside {
                    return Err(ErrorKind::MarkerInsideMarker {
                        found: format!(":{}", name),
                        inside: inside.as_str().to_string(),
                    });
                }
                if index != 0 && !is_spacing_or_operator(&nodes[index - 1]) {
                    return Err(ErrorKind::MissingWhitespaceBefore {
                        marker: name.clone(),
                    });
                }
                if index != nodes.len() - 1 && !is_spacing_or_operator(&nodes[index + 1]) {
                    return Err(ErrorKind::MissingWhitespaceAfter {
                        marker: name.clone(),
                    });
                }
                context.mode = mode;
            }
            SelectorNode::NestedPseudoClass { name, selector } => match Mode::from_marker(name) {
                Some(mode) => {
                    if let Some(inside) = context.inside {
                        return Err(ErrorKind::MarkerInsideMarker {
                            found: format!(":{}(...)", name),
                            inside: inside.as_str().to_string(),
                        });
                    }
                    let mut inner = ModeContext {
                        mode,
                        inside: Some(mode),
                        saw_local: false,
                    };
                    let rewritten = localize_nodes(&selector.nodes, &mut inner)?;
                    context.saw_local |= inner.saw_local;
                    out.extend(rewritten);
                }
                None => {
                    // Ordinary functional pseudo like :not(...). Its
                    // argument is rewritten under the current scope, but
                    // a broad marker inside it does not leak back out.
                    let mut inner = ModeContext {
                        mode: context.mode,
                        inside: context.inside,
                        saw_local: false,
                    };
                    let rewritten = localize_nodes(&selector.nodes, &mut inner)?;
                    context.saw_local |= inner.saw_local;
                    out.push(SelectorNode::NestedPseudoClass {
                        name: name.clone(),
                        selector: Selector {
                            nodes: rewritten,
                            before: selector.before.clone(),
                        },
                    });
                }
            },
            SelectorNode::Class { .. } | SelectorNode::Id { .. } => {
                if context.mode == Mode::Local {
                    context.saw_local = true;
                    out.push(SelectorNode::NestedPseudoClass {
                        name: "local".to_string(),
                        selector: Selector::from_node(node.clone()),
                    });
                } else {
                    out.push(node.clone());
                }
            }
            _ => out.push(node.clone()),
        }
    }
    Ok(trim_spacing(out))
}
