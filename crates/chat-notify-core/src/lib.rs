pub mod config;
pub mod constants;
pub mod models;
pub mod store;
pub mod tracing_setup;

// Re-export the index and registry at crate root for convenience
pub use models::{ConversationKey, IncomingMessage, MessageRecord, PreviewLine, PushEvent};
pub use store::{ConversationIndex, NotificationGroups, SharedNotificationGroups};
