pub mod conversation_key;
pub mod message;
pub mod preview;
pub mod push;

pub use conversation_key::{ConversationKey, ConversationKind};
pub use message::{IncomingMessage, MessageRecord, Recipient, Sender};
pub use preview::{NotificationSummary, PreviewLine};
pub use push::{Identity, PayloadError, PushEvent};
