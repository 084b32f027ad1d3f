//! Message and transcript types for intake conversations.
//!
//! Messages are immutable records of user/assistant exchanges. A transcript is
//! the ordered list of messages exchanged so far; order matters because it
//! decides which topics had been asked about before a given answer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

/// Role of a message author in an intake conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The pet owner.
    User,
    /// The triage assistant.
    Assistant,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(DomainError::new(
                ErrorCode::UnknownRole,
                format!("Unknown message role '{}'", other),
            )
            .with_detail("field", "role")),
        }
    }
}

/// An immutable message within an intake conversation.
///
/// # Invariants
///
/// - `content` is non-blank (validated at construction)
/// - `timestamp` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
    timestamp: Timestamp,
}

impl Message {
    /// Creates a new message stamped with the current time.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self, DomainError> {
        Self::at(role, content, Timestamp::now())
    }

    /// Creates a message with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank
    pub fn at(
        role: Role,
        content: impl Into<String>,
        timestamp: Timestamp,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }

        Ok(Self {
            role,
            content,
            timestamp,
        })
    }

    /// Creates a user message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank
    pub fn user(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank
    pub fn assistant(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Role::Assistant, content)
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was created.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Returns true if this message is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this message is from the assistant.
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Untyped message as received from the chat layer.
///
/// Converted into [`Message`] by [`Transcript::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

impl RawMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            timestamp: None,
        }
    }
}

/// Ordered sequence of messages in one intake conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a transcript from already validated messages.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Validates raw chat messages and builds a transcript.
    ///
    /// # Errors
    ///
    /// - `UnknownRole` if a role is neither `user` nor `assistant`
    /// - `ValidationFailed` if a message has blank content
    ///
    /// The failing message's position is attached as the `index` detail.
    pub fn from_raw<I>(raw: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = RawMessage>,
    {
        let messages = raw
            .into_iter()
            .enumerate()
            .map(|(index, msg)| {
                let role: Role = msg
                    .role
                    .parse()
                    .map_err(|e: DomainError| e.with_detail("index", index.to_string()))?;
                let timestamp = msg.timestamp.unwrap_or_default();
                Message::at(role, msg.content, timestamp)
                    .map_err(|e| e.with_detail("index", index.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { messages })
    }

    /// Appends a message at the end of the conversation.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns all messages in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if no messages have been exchanged.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
