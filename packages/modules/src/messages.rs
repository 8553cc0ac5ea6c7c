//! Message Bus
//!
//! Typed, append-only log shared across pipeline stages. Earlier stages
//! (a value importer, a previous run over the same file) publish bindings
//! here; the scoping pass reads them to decide what may be renamed and
//! publishes its own results for later stages.

use serde::{Deserialize, Serialize};

/// Origin tag used for messages published by this crate.
pub const ENGINE_ORIGIN: &str = "css-modules";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    /// `name` was already resolved by an earlier stage and must pass
    /// through the scoping pass unrenamed.
    ValueBinding,
    /// `name` was scoped to the alias in `value`.
    ScopedBinding,
    /// `name` composes the class in `value`.
    ComposedEdge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub name: String,
    pub value: String,
    /// Stage that published the message.
    pub origin: String,
}

impl Message {
    pub fn new(kind: MessageKind, name: &str, value: &str, origin: &str) -> Message {
        Message {
            kind,
            name: name.to_string(),
            value: value.to_string(),
            origin: origin.to_string(),
        }
    }
}

/// The bus itself. Messages are only ever appended and keep publication
/// order, so consumers can rely on first-wins lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBus {
    messages: Vec<Message>,
}

impl MessageBus {
    pub fn new() -> MessageBus {
        MessageBus::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// First `ValueBinding` for `name`, if any.
    pub fn value_binding(&self, name: &str) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.kind == MessageKind::ValueBinding && m.name == name)
    }

    /// First `ScopedBinding` for `name`, if any.
    pub fn scoped_binding(&self, name: &str) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.kind == MessageKind::ScopedBinding && m.name == name)
    }

    /// All `ComposedEdge` messages for `name`, in publication order.
    pub fn composed_edges<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages
            .iter()
            .filter(move |m| m.kind == MessageKind::ComposedEdge && m.name == name)
    }
}
