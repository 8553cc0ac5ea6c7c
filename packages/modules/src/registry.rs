//! Alias Registry
//!
//! Identifier to alias table for one pass. Insertion order is the order
//! identifiers were first seen in the stylesheet, and the export composer
//! relies on it.

use indexmap::IndexMap;

use crate::config::Options;
use crate::css::SourcePosition;
use crate::error::Warning;
use crate::messages::MessageBus;

#[derive(Debug, Default)]
pub struct AliasRegistry {
    entries: IndexMap<String, String>,
}

impl AliasRegistry {
    pub fn new() -> AliasRegistry {
        AliasRegistry::default()
    }

    /// Alias for `identifier`, generating and recording one on first use.
    ///
    /// An identifier with a `ValueBinding` on the bus was resolved by an
    /// earlier stage and passes through as itself. An identifier with a
    /// `ScopedBinding` was already scoped once; renaming it again is
    /// legal but usually a copy-paste accident, so a warning is recorded.
    pub fn resolve(
        &mut self,
        identifier: &str,
        options: &Options,
        source: &str,
        bus: &MessageBus,
        position: SourcePosition,
        warnings: &mut Vec<Warning>,
    ) -> String {
        if let Some(alias) = self.entries.get(identifier) {
            return alias.clone();
        }
        let alias = if bus.value_binding(identifier).is_some() {
            identifier.to_string()
        } else {
            if bus.scoped_binding(identifier).is_some() {
                warnings.push(Warning::new(
                    format!("'{}' already declared", identifier),
                    position,
                ));
            }
            options.scoped_name(identifier, source)
        };
        self.entries
            .insert(identifier.to_string(), alias.clone());
        alias
    }

    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(identifier, alias)| (identifier.as_str(), alias.as_str()))
    }
}
