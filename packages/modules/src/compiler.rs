//! Compilation Pipeline
//!
//! Drives the passes over a stylesheet: ICSS seeding, localization,
//! scoping, then export composition. Rules inside `@keyframes` bodies
//! and the reserved `:export` / `:import(...)` rules are never visited.

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use css_selector_tokenizer::SelectorList;

use crate::config::{Options, ScopeMode};
use crate::css::{self, Node, Rule};
use crate::error::{CompileError, ErrorKind, Warning};
use crate::exports::{self, ExportTable};
use crate::localize::{initial_mode, localize_selector, Mode, ModeContext};
use crate::messages::{Message, MessageBus, MessageKind, ENGINE_ORIGIN};
use crate::registry::AliasRegistry;
use crate::scope::{self, ScopeContext};

static KEYFRAMES_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)keyframes$").unwrap());

/// Result of a full compilation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub css: String,
    pub exports: ExportTable,
    pub warnings: Vec<Warning>,
}

/// A stylesheet paired with its path, for batch compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

/// Run only the localization pass: selectors are rewritten into their
/// functional `:local(...)` / `:global(...)` forms, nothing is renamed
/// and no exports are produced. Running it over its own output is a
/// no-op.
pub fn localize(source: &str, options: &Options) -> Result<String, CompileError> {
    localize_source(source, options).map_err(|error| error.with_file(options.from.as_deref()))
}

fn localize_source(source: &str, options: &Options) -> Result<String, CompileError> {
    let mut root = css::parse(source)?;
    walk_rules(&mut root.nodes, &mut |rule| localize_rule(rule, options))?;
    Ok(css::serialize(&root))
}

/// Full pass with a private message bus.
pub fn compile(source: &str, options: &Options) -> Result<Output, CompileError> {
    let mut bus = MessageBus::new();
    compile_with_bus(source, options, &mut bus)
}

/// Full pass against a caller-owned message bus. Bindings published by
/// earlier stages are honored and the pass publishes one `ScopedBinding`
/// per renamed identifier for later stages.
pub fn compile_with_bus(
    source: &str,
    options: &Options,
    bus: &mut MessageBus,
) -> Result<Output, CompileError> {
    compile_source(source, options, bus).map_err(|error| error.with_file(options.from.as_deref()))
}

fn compile_source(
    source: &str,
    options: &Options,
    bus: &mut MessageBus,
) -> Result<Output, CompileError> {
    let mut root = css::parse(source)?;
    let seeded = exports::extract_icss(&mut root, bus);
    let mut registry = AliasRegistry::new();
    let mut warnings = Vec::new();

    walk_rules(&mut root.nodes, &mut |rule| localize_rule(rule, options))?;

    let mut context = ScopeContext {
        registry: &mut registry,
        options,
        source,
        warnings: &mut warnings,
    };
    walk_rules(&mut root.nodes, &mut |rule| {
        scope::scope_rule(rule, &mut context, bus)
    })?;

    let table = exports::compose_exports(&registry, bus, seeded);
    for (identifier, alias) in registry.iter() {
        bus.append(Message::new(
            MessageKind::ScopedBinding,
            identifier,
            alias,
            ENGINE_ORIGIN,
        ));
    }
    exports::emit_exports(&mut root, &table);

    Ok(Output {
        css: css::serialize(&root),
        exports: table,
        warnings,
    })
}

/// Compile a batch of files in parallel. Each file gets its own registry
/// and message bus; results come back in input order.
pub fn compile_files(files: &[SourceFile], options: &Options) -> Vec<Result<Output, CompileError>> {
    files
        .par_iter()
        .map(|file| {
            let mut per_file = options.clone();
            per_file.from = Some(file.path.clone());
            compile(&file.content, &per_file)
        })
        .collect()
}

/// Visit every rule in document order. `@keyframes` bodies are opaque and
/// the reserved ICSS rules are never handed to `callback`.
fn walk_rules<F>(nodes: &mut Vec<Node>, callback: &mut F) -> Result<(), CompileError>
where
    F: FnMut(&mut Rule) -> Result<(), CompileError>,
{
    for node in nodes {
        match node {
            Node::Rule(rule) => {
                if exports::is_export_rule(&rule.selector) || exports::is_import_rule(&rule.selector)
                {
                    continue;
                }
                callback(rule)?;
                walk_rules(&mut rule.nodes, callback)?;
            }
            Node::AtRule(at_rule) => {
                if KEYFRAMES_NAME_RE.is_match(&at_rule.name) {
                    continue;
                }
                if let Some(children) = &mut at_rule.nodes {
                    walk_rules(children, callback)?;
                }
            }
            Node::Declaration(_) => {}
        }
    }
    Ok(())
}

/// Localize one rule's selector list and enforce the per-rule checks:
/// all alternatives must end in the same scope, and pure mode requires
/// at least one localized identifier somewhere in the rule.
fn localize_rule(rule: &mut Rule, options: &Options) -> Result<(), CompileError> {
    let list = css_selector_tokenizer::parse(&rule.selector);
    let mut localized = Vec::with_capacity(list.nodes.len());
    let mut final_modes: SmallVec<[Mode; 4]> = SmallVec::new();
    let mut saw_local = false;
    for selector in &list.nodes {
        let (rewritten, context) =
            localize_selector(selector, ModeContext::new(initial_mode(options.mode)))
                .map_err(|kind| CompileError::new(kind, rule.pos))?;
        final_modes.push(context.mode);
        saw_local |= context.saw_local;
        localized.push(rewritten);
    }
    if final_modes.windows(2).any(|pair| pair[0] != pair[1]) {
        return Err(CompileError::new(
            ErrorKind::InconsistentSelectorResult {
                selector: rule.selector.clone(),
            },
            rule.pos,
        ));
    }
    if options.mode == ScopeMode::Pure && !saw_local {
        return Err(CompileError::new(
            ErrorKind::SelectorNotPure {
                selector: rule.selector.clone(),
            },
            rule.pos,
        ));
    }
    rule.selector = SelectorList::new(localized).to_string();
    Ok(())
}
