pub mod conversation_index;
pub mod notification_groups;

pub use conversation_index::ConversationIndex;
pub use notification_groups::{GroupUpdate, NotificationGroups, SharedNotificationGroups};
