//! Assertion message normalization.
//!
//! Messages may be plain text, a list of parts, or a lazily built string that
//! is only constructed when a report line actually needs it.

use std::fmt;

/// A message argument accepted by assertions and block titles.
#[derive(Default)]
pub enum Message {
    #[default]
    Empty,
    Text(String),
    Lazy(Box<dyn FnOnce() -> String>),
    Parts(Vec<Option<String>>),
}

impl Message {
    /// Wraps a closure that builds the message on demand.
    pub fn lazy<F>(build: F) -> Self
    where
        F: FnOnce() -> String + 'static,
    {
        Message::Lazy(Box::new(build))
    }

    /// Produces the final text. Parts are joined with `" - "`.
    pub fn resolve(self) -> String {
        match self {
            Message::Empty => String::new(),
            Message::Text(text) => text,
            Message::Lazy(build) => build(),
            Message::Parts(parts) => combine(parts, " - "),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Empty => write!(f, "Message::Empty"),
            Message::Text(text) => f.debug_tuple("Message::Text").field(text).finish(),
            Message::Lazy(_) => write!(f, "Message::Lazy(..)"),
            Message::Parts(parts) => f.debug_tuple("Message::Parts").field(parts).finish(),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Message::Text(text.clone())
    }
}

impl From<Option<String>> for Message {
    fn from(text: Option<String>) -> Self {
        text.map_or(Message::Empty, Message::Text)
    }
}

impl From<Vec<Option<String>>> for Message {
    fn from(parts: Vec<Option<String>>) -> Self {
        Message::Parts(parts)
    }
}

impl From<Vec<&str>> for Message {
    fn from(parts: Vec<&str>) -> Self {
        Message::Parts(parts.into_iter().map(|p| Some(p.to_string())).collect())
    }
}

/// Resolves `message`, prefixing it with `prefix - ` when a prefix is given.
pub fn format(message: impl Into<Message>, prefix: impl Into<Message>) -> String {
    let message = message.into().resolve();
    let prefix = prefix.into().resolve();
    if prefix.is_empty() {
        message
    } else {
        format!("{} - {}", prefix, message)
    }
}

/// Joins the present fragments with `separator`.
pub fn combine<I>(messages: I, separator: &str) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    messages
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(separator)
}
