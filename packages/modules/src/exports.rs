//! Export Composition
//!
//! ICSS surface of the engine. Before the scoping passes run,
//! `:import(...)` rules seed value bindings and pre-existing `:export`
//! declarations seed the export table. Afterwards the composer expands
//! every registry entry through its composition edges and writes the
//! final table into a single `:export` block at the top of the
//! stylesheet.

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::css::{
    Declaration, DeclarationRaws, Node, Root, Rule, RuleRaws, SourcePosition,
};
use crate::messages::{Message, MessageBus, MessageKind, ENGINE_ORIGIN};
use crate::registry::AliasRegistry;

/// Export table, ordered the way entries were introduced.
pub type ExportTable = IndexMap<String, String>;

static IMPORT_SELECTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^:import\((?:"[^"]*"|'[^']*'|[^"')]+)\)$"#).unwrap());

pub(crate) fn is_import_rule(selector: &str) -> bool {
    IMPORT_SELECTOR_RE.is_match(selector)
}

pub(crate) fn is_export_rule(selector: &str) -> bool {
    selector == ":export"
}

/// Seed pass. `:import` declarations become `ValueBinding` messages,
/// `:export` declarations fill the table first-wins. The first `:export`
/// block stays in the tree so its raws survive the rewrite; duplicate
/// blocks are dropped.
pub(crate) fn extract_icss(root: &mut Root, bus: &mut MessageBus) -> ExportTable {
    let mut table = ExportTable::new();
    let mut saw_export = false;
    let mut kept = Vec::with_capacity(root.nodes.len());
    for node in root.nodes.drain(..) {
        match node {
            Node::Rule(rule) if is_export_rule(&rule.selector) => {
                for child in &rule.nodes {
                    if let Node::Declaration(declaration) = child {
                        if !table.contains_key(&declaration.prop) {
                            table.insert(declaration.prop.clone(), declaration.value.clone());
                        }
                    }
                }
                if !saw_export {
                    saw_export = true;
                    kept.push(Node::Rule(rule));
                }
            }
            Node::Rule(rule) if is_import_rule(&rule.selector) => {
                for child in &rule.nodes {
                    if let Node::Declaration(declaration) = child {
                        if bus.value_binding(&declaration.prop).is_none() {
                            bus.append(Message::new(
                                MessageKind::ValueBinding,
                                &declaration.prop,
                                &declaration.value,
                                ENGINE_ORIGIN,
                            ));
                        }
                    }
                }
                kept.push(Node::Rule(rule));
            }
            other => kept.push(other),
        }
    }
    root.nodes = kept;
    table
}

/// Expand every registry entry through its composition edges and merge
/// the result under the seeded entries. Seeded names win. Expansion
/// starts with the entry's own alias and follows edges depth-first in
/// declaration order; cycles are cut at the back-edge and repeated
/// tokens keep their first occurrence.
pub(crate) fn compose_exports(
    registry: &AliasRegistry,
    bus: &MessageBus,
    mut table: ExportTable,
) -> ExportTable {
    for (identifier, _) in registry.iter() {
        if table.contains_key(identifier) {
            continue;
        }
        let mut tokens = Vec::new();
        let mut visiting = Vec::new();
        expand(identifier, registry, bus, &mut visiting, &mut tokens);
        let mut seen: IndexSet<String> = IndexSet::new();
        for token in tokens {
            seen.insert(token);
        }
        let value = seen
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        table.insert(identifier.to_string(), value);
    }
    table
}

fn expand<'a>(
    identifier: &'a str,
    registry: &'a AliasRegistry,
    bus: &'a MessageBus,
    visiting: &mut Vec<&'a str>,
    out: &mut Vec<String>,
) {
    let Some(alias) = registry.get(identifier) else {
        return;
    };
    out.push(alias.to_string());
    visiting.push(identifier);
    for edge in bus.composed_edges(identifier) {
        let value = edge.value.as_str();
        match registry.get(value) {
            // Back-edge of a cycle: take the direct alias, do not recurse.
            Some(alias) if visiting.contains(&value) => out.push(alias.to_string()),
            Some(_) => expand(value, registry, bus, visiting, out),
            // Opaque token from another stage, exported verbatim.
            None => out.push(value.to_string()),
        }
    }
    visiting.pop();
}

/// Write the table into one `:export` block at the top of the stylesheet.
/// The block kept by [`extract_icss`] is reused so untouched declarations
/// keep their bytes; entries it does not have yet are appended.
pub(crate) fn emit_exports(root: &mut Root, table: &ExportTable) {
    let existing = root
        .nodes
        .iter()
        .position(|node| matches!(node, Node::Rule(rule) if is_export_rule(&rule.selector)));
    if table.is_empty() && existing.is_none() {
        return;
    }
    let mut rule = match existing {
        Some(index) => {
            let Node::Rule(rule) = root.nodes.remove(index) else {
                return;
            };
            rule
        }
        None => Rule {
            selector: ":export".to_string(),
            nodes: Vec::new(),
            raws: RuleRaws {
                before: String::new(),
                between: " ".to_string(),
                after: "\n".to_string(),
            },
            pos: SourcePosition::default(),
        },
    };
    let mut present_props: IndexSet<String> = IndexSet::new();
    rule.nodes.retain(|node| match node {
        Node::Declaration(declaration) => present_props.insert(declaration.prop.clone()),
        _ => true,
    });
    for (name, value) in table {
        let present = present_props.contains(name.as_str());
        if !present {
            rule.nodes.push(Node::Declaration(Declaration {
                prop: name.clone(),
                value: value.clone(),
                has_semicolon: true,
                raws: DeclarationRaws {
                    before: "\n  ".to_string(),
                    between: ": ".to_string(),
                    after_value: String::new(),
                },
                pos: SourcePosition::default(),
            }));
        }
    }
    if let Some(next) = root.nodes.first_mut() {
        let before = next.before_mut();
        if before.is_empty() {
            *before = "\n".to_string();
        }
    }
    root.nodes.insert(0, Node::Rule(rule));
}
