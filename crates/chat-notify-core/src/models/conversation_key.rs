use crate::constants::kinds;
use std::fmt;

use super::message::{IncomingMessage, Recipient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationKind {
    Stream,
    Group,
    Private,
}

impl ConversationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationKind::Stream => kinds::STREAM,
            ConversationKind::Group => kinds::GROUP,
            ConversationKind::Private => kinds::PRIVATE,
        }
    }
}

impl fmt::Display for ConversationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a conversation inside a notification group.
///
/// Compared field by field, so a `:` inside a name or stream can never make
/// two conversations collide.
///
/// - stream message: `(sender full name, stream name, Stream)`
/// - group message: `(sender full name, pm users, Group)`
/// - private message: `(sender full name, sender email, Private)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub name: String,
    pub discriminator: String,
    pub kind: ConversationKind,
}

impl ConversationKey {
    pub fn new(
        name: impl Into<String>,
        discriminator: impl Into<String>,
        kind: ConversationKind,
    ) -> Self {
        Self {
            name: name.into(),
            discriminator: discriminator.into(),
            kind,
        }
    }

    pub fn for_message(message: &IncomingMessage) -> Self {
        let name = message.sender.full_name.clone();
        match &message.recipient {
            Recipient::Stream { stream, .. } => {
                Self::new(name, stream.clone(), ConversationKind::Stream)
            }
            Recipient::GroupPm { pm_users } => {
                Self::new(name, pm_users.clone(), ConversationKind::Group)
            }
            Recipient::Private => {
                Self::new(name, message.sender.email.clone(), ConversationKind::Private)
            }
        }
    }

    /// Name shown in the notification (always the sender's full name)
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Legacy `name:discriminator:kind` form; for logs only.
impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.discriminator, self.kind)
    }
}
