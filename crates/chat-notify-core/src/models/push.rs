//! Decoding of push notification payloads.
//!
//! Payloads arrive as a flat JSON object whose values are usually strings
//! (numbers are accepted too). Two event shapes exist: `message`, which
//! carries one new message, and `remove`, which lists ids the user has read.

use crate::constants::{events, fields};
use serde::Serialize;
use serde_json::{Map, Value};

use super::message::{IncomingMessage, Recipient, Sender};

/// The account a notification group belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub realm_uri: String,
    /// Absent on payloads from older servers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Identity {
    pub fn new(realm_uri: impl Into<String>, user_id: Option<u64>) -> Self {
        Self {
            realm_uri: realm_uri.into(),
            user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    Message {
        identity: Identity,
        message: IncomingMessage,
    },
    Remove {
        identity: Identity,
        message_ids: Vec<u64>,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Payload is not a JSON object")]
    NotAnObject,

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid id in {field}: {value:?}")]
    InvalidId { field: &'static str, value: String },

    #[error("Unknown event type: {0}")]
    UnknownEvent(String),

    #[error("Unknown recipient type: {0}")]
    UnknownRecipientType(String),
}

impl PushEvent {
    pub fn identity(&self) -> &Identity {
        match self {
            PushEvent::Message { identity, .. } => identity,
            PushEvent::Remove { identity, .. } => identity,
        }
    }

    /// Decode a push payload
    pub fn from_value(payload: &Value) -> Result<Self, PayloadError> {
        let data = payload.as_object().ok_or(PayloadError::NotAnObject)?;

        let identity = Identity {
            realm_uri: required(data, fields::REALM_URI)?,
            user_id: optional(data, fields::USER_ID)
                .map(|raw| parse_id(fields::USER_ID, &raw))
                .transpose()?,
        };

        // Older servers omit the event type on message pushes
        let event = optional(data, fields::EVENT).unwrap_or_else(|| events::MESSAGE.to_string());
        match event.as_str() {
            events::MESSAGE => Ok(PushEvent::Message {
                identity,
                message: message_from_data(data)?,
            }),
            events::REMOVE => Ok(PushEvent::Remove {
                identity,
                message_ids: removed_ids_from_data(data)?,
            }),
            _ => Err(PayloadError::UnknownEvent(event)),
        }
    }
}

fn message_from_data(data: &Map<String, Value>) -> Result<IncomingMessage, PayloadError> {
    let sender = Sender {
        full_name: required(data, fields::SENDER_FULL_NAME)?,
        email: required(data, fields::SENDER_EMAIL)?,
        avatar_url: optional(data, fields::SENDER_AVATAR_URL),
    };

    let recipient_type = required(data, fields::RECIPIENT_TYPE)?;
    let recipient = match recipient_type.as_str() {
        "stream" => Recipient::Stream {
            stream: required(data, fields::STREAM)?,
            topic: optional(data, fields::TOPIC),
        },
        "private" => match optional(data, fields::PM_USERS) {
            Some(pm_users) => Recipient::GroupPm { pm_users },
            None => Recipient::Private,
        },
        _ => return Err(PayloadError::UnknownRecipientType(recipient_type)),
    };

    let message_id = parse_id(fields::MESSAGE_ID, &required(data, fields::MESSAGE_ID)?)?;

    Ok(IncomingMessage {
        sender,
        recipient,
        content: required(data, fields::CONTENT)?,
        message_id,
    })
}

fn removed_ids_from_data(data: &Map<String, Value>) -> Result<Vec<u64>, PayloadError> {
    if let Some(raw) = optional(data, fields::MESSAGE_IDS) {
        return raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| parse_id(fields::MESSAGE_IDS, s))
            .collect();
    }

    // Legacy single-id remove
    let raw = optional(data, fields::MESSAGE_ID).ok_or(PayloadError::MissingField(fields::MESSAGE_IDS))?;
    Ok(vec![parse_id(fields::MESSAGE_ID, &raw)?])
}

/// Read a field as a string, accepting JSON strings and numbers
fn optional(data: &Map<String, Value>, field: &str) -> Option<String> {
    match data.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required(data: &Map<String, Value>, field: &'static str) -> Result<String, PayloadError> {
    optional(data, field).ok_or(PayloadError::MissingField(field))
}

fn parse_id(field: &'static str, raw: &str) -> Result<u64, PayloadError> {
    raw.trim().parse().map_err(|_| PayloadError::InvalidId {
        field,
        value: raw.to_string(),
    })
}
