//! Scoping Pass
//!
//! Second pass over a rule, consuming the functional forms produced by
//! localization. Class and id names inside `:local(...)` are replaced
//! with their aliases and the wrapper is dropped; `:global(...)` wrappers
//! are dropped with their content untouched. `composes` declarations
//! become composition edges on the message bus.

use css_selector_tokenizer::{parse, Selector, SelectorList, SelectorNode};

use crate::config::Options;
use crate::css::{Node, Rule};
use crate::error::{CompileError, ErrorKind, Warning};
use crate::messages::{Message, MessageBus, MessageKind, ENGINE_ORIGIN};
use crate::registry::AliasRegistry;

pub(crate) struct ScopeContext<'a> {
    pub registry: &'a mut AliasRegistry,
    pub options: &'a Options,
    pub source: &'a str,
    pub warnings: &'a mut Vec<Warning>,
}

/// Scope one rule in place: harvest `composes` first (edges refer to the
/// original class name), then substitute aliases in the selector.
pub(crate) fn scope_rule(
    rule: &mut Rule,
    context: &mut ScopeContext<'_>,
    bus: &mut MessageBus,
) -> Result<(), CompileError> {
    let list = parse(&rule.selector);
    collect_composes(rule, &list, bus)?;
    let scoped = scope_selector_list(&list, context, bus, rule);
    rule.selector = scoped.to_string();
    Ok(())
}

fn scope_selector_list(
    list: &SelectorList,
    context: &mut ScopeContext<'_>,
    bus: &MessageBus,
    rule: &Rule,
) -> SelectorList {
    SelectorList::new(
        list.nodes
            .iter()
            .map(|selector| Selector {
                nodes: scope_nodes(&selector.nodes, false, context, bus, rule),
                before: selector.before.clone(),
            })
            .collect(),
    )
}

fn scope_nodes(
    nodes: &[SelectorNode],
    in_local: bool,
    context: &mut ScopeContext<'_>,
    bus: &MessageBus,
    rule: &Rule,
) -> Vec<SelectorNode> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            SelectorNode::NestedPseudoClass { name, selector } if name == "local" => {
                out.extend(scope_nodes(&selector.nodes, true, context, bus, rule));
            }
            SelectorNode::NestedPseudoClass { name, selector } if name == "global" => {
                out.extend(scope_nodes(&selector.nodes, false, context, bus, rule));
            }
            SelectorNode::NestedPseudoClass { name, selector } => {
                out.push(SelectorNode::NestedPseudoClass {
                    name: name.clone(),
                    selector: Selector {
                        nodes: scope_nodes(&selector.nodes, in_local, context, bus, rule),
                        before: selector.before.clone(),
                    },
                });
            }
            SelectorNode::Class { name } if in_local => {
                out.push(SelectorNode::Class {
                    name: resolve_alias(name, context, bus, rule),
                });
            }
            SelectorNode::Id { name } if in_local => {
                out.push(SelectorNode::Id {
                    name: resolve_alias(name, context, bus, rule),
                });
            }
            _ => out.push(node.clone()),
        }
    }
    out
}

fn resolve_alias(
    name: &str,
    context: &mut ScopeContext<'_>,
    bus: &MessageBus,
    rule: &Rule,
) -> String {
    context.registry.resolve(
        name,
        context.options,
        context.source,
        bus,
        rule.pos,
        context.warnings,
    )
}

fn is_composes_prop(prop: &str) -> bool {
    prop == "composes" || prop == "compose-with"
}

/// True when the localized selector is exactly one `:local` class, the
/// only shape allowed to carry `composes`.
fn single_local_class(list: &SelectorList) -> Option<&str> {
    let [selector] = list.nodes.as_slice() else {
        return None;
    };
    let [SelectorNode::NestedPseudoClass { name, selector }] = selector.nodes.as_slice() else {
        return None;
    };
    if name != "local" {
        return None;
    }
    let [node] = selector.nodes.as_slice() else {
        return None;
    };
    match node {
        SelectorNode::Class { name } => Some(name),
        _ => None,
    }
}

/// Remove `composes` / `compose-with` declarations from the rule and
/// publish one `ComposedEdge` per referenced class. Values carrying a
/// `from` qualifier belong to an import resolver stage and are left in
/// place.
fn collect_composes(
    rule: &mut Rule,
    list: &SelectorList,
    bus: &mut MessageBus,
) -> Result<(), CompileError> {
    let has_composes = rule.nodes.iter().any(|node| {
        matches!(node, Node::Declaration(declaration) if is_composes_prop(&declaration.prop))
    });
    if !has_composes {
        return Ok(());
    }
    let Some(class_name) = single_local_class(list) else {
        return Err(CompileError::new(
            ErrorKind::InvalidComposition {
                selector: list.to_string(),
            },
            rule.pos,
        ));
    };
    let class_name = class_name.to_string();
    let mut kept = Vec::with_capacity(rule.nodes.len());
    for node in rule.nodes.drain(..) {
        match node {
            Node::Declaration(declaration)
                if is_composes_prop(&declaration.prop)
                    && !declaration
                        .value
                        .split_whitespace()
                        .any(|token| token == "from") =>
            {
                for token in declaration.value.split_whitespace() {
                    bus.append(Message::new(
                        MessageKind::ComposedEdge,
                        &class_name,
                        token,
                        ENGINE_ORIGIN,
                    ));
                }
            }
            other => kept.push(other),
        }
    }
    rule.nodes = kept;
    Ok(())
}
