use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One chat line. Fields are private so a recorded message cannot be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
    timestamp: String,
}

impl Message {
    pub fn role(&self) -> Role { self.role }
    pub fn content(&self) -> &str { &self.content }
    /// Local wall-clock time of the append, `HH:MM`.
    pub fn timestamp(&self) -> &str { &self.timestamp }
}

/// Append-only chat log. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self { Self::default() }

    pub fn append(&mut self, role: Role, content: impl Into<String>) -> &Message {
        self.append_at(role, content, Local::now())
    }

    /// Like [`Transcript::append`] with an explicit clock reading.
    pub fn append_at<Tz: TimeZone>(&mut self, role: Role, content: impl Into<String>, at: DateTime<Tz>) -> &Message
    where
        Tz::Offset: fmt::Display,
    {
        self.messages.push(Message {
            role,
            content: content.into(),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn all(&self) -> &[Message] { &self.messages }

    pub fn last(&self) -> Option<&Message> { self.messages.last() }

    pub fn len(&self) -> usize { self.messages.len() }

    pub fn is_empty(&self) -> bool { self.messages.is_empty() }

    /// The most recent message, if it came from the assistant.
    pub fn latest_solution(&self) -> Option<&Message> {
        self.last().filter(|m| m.role == Role::Assistant)
    }
}
