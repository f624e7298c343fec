use super::conversation_key::ConversationKey;

/// The author of an incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub full_name: String,
    pub email: String,
    /// Consumed by the renderer for the large icon; never part of the key
    pub avatar_url: Option<String>,
}

impl Sender {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            avatar_url: None,
        }
    }
}

/// Where a message was sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Stream message. The topic is carried for display only; conversations
    /// are grouped per stream.
    Stream {
        stream: String,
        topic: Option<String>,
    },
    /// Group private message, `pm_users` as delivered (comma separated user ids)
    GroupPm { pm_users: String },
    /// One-to-one private message
    Private,
}

/// A newly received message, as handed over by ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub sender: Sender,
    pub recipient: Recipient,
    pub content: String,
    pub message_id: u64,
}

impl IncomingMessage {
    pub fn new(
        sender: Sender,
        recipient: Recipient,
        content: impl Into<String>,
        message_id: u64,
    ) -> Self {
        Self {
            sender,
            recipient,
            content: content.into(),
            message_id,
        }
    }

    pub fn conversation_key(&self) -> ConversationKey {
        ConversationKey::for_message(self)
    }

    pub fn to_record(&self) -> MessageRecord {
        MessageRecord {
            content: self.content.clone(),
            message_id: self.message_id,
        }
    }
}

/// One notified message inside a conversation bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub content: String,
    pub message_id: u64,
}
