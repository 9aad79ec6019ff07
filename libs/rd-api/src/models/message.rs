//! Message documents returned by the action endpoints
//!
//! The server wraps action results in an XHTML page whose body holds a list
//! of items, each with a label span followed by a value span:
//!
//! ```text
//! <html><body>
//!   <div>...</div>
//!   <div><div><ul>
//!     <li><span>Deployment Job ID</span><span>1042</span></li>
//!     <li><span>Deployment Job Status</span><span>QUEUED</span></li>
//!   </ul></div></div>
//! </body></html>
//! ```
//!
//! Lookups go by label substring instead of position so layout changes on
//! the server side do not shift values around.

use roxmltree::Node;
use serde::Serialize;

use crate::error::ParseError;
use crate::models::{children_named, text_of, with_root};

/// One label/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub label: String,
    pub value: String,
}

impl Message {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Parsed message document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageDocument {
    title: Option<String>,
    messages: Vec<Message>,
}

impl MessageDocument {
    /// Build a document from already extracted messages
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            title: None,
            messages,
        }
    }

    /// Parse a response body.
    ///
    /// The first `ul` whose items carry a label/value span pair is taken as
    /// the message list. A well-formed page without such a list yields an
    /// empty document.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        with_root(bytes, |root| {
            let title = root
                .descendants()
                .find(|n| n.is_element() && n.tag_name().name() == "title")
                .map(text_of)
                .filter(|t| !t.is_empty());

            let messages = root
                .descendants()
                .filter(|n| n.is_element() && n.tag_name().name() == "ul")
                .find(|list| list_items(*list).any(|item| spans(item).len() >= 2))
                .map(|list| list_items(list).filter_map(message_from_item).collect())
                .unwrap_or_default();

            Self { title, messages }
        })
    }

    /// Page title, when the server sent one
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// All messages in document order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Value of the first message whose label contains `fragment`
    pub fn find(&self, fragment: &str) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.label.contains(fragment))
            .map(|m| m.value.as_str())
    }

    /// Whether any value contains `fragment`
    pub fn any_value_contains(&self, fragment: &str) -> bool {
        self.messages.iter().any(|m| m.value.contains(fragment))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

fn list_items<'a, 'input>(list: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    children_named(list, "li")
}

fn spans(item: Node<'_, '_>) -> Vec<String> {
    children_named(item, "span").map(text_of).collect()
}

fn message_from_item(item: Node<'_, '_>) -> Option<Message> {
    let mut spans = spans(item).into_iter();
    let label = spans.next()?;
    let value = spans.next().unwrap_or_default();
    Some(Message { label, value })
}
