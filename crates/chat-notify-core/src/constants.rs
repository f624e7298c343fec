//! Application-wide constants
//!
//! Push payload field names and notification defaults shared by the
//! core and the CLI.

/// Default log file environment variable; when set, logs are also appended there
pub const LOG_FILE_ENV: &str = "CHAT_NOTIFY_LOG_FILE";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "chat-notify";

/// Config file name inside `CONFIG_DIR_NAME`
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Placeholder substituted with the message count in count suffix templates
pub const COUNT_PLACEHOLDER: &str = "{count}";

// Count suffix defaults (English)
pub const DEFAULT_SUFFIX_ONE: &str = "";
pub const DEFAULT_SUFFIX_OTHER: &str = " ({count})";

// Conversation kind tags
pub mod kinds {
    pub const STREAM: &str = "stream";
    pub const GROUP: &str = "group";
    pub const PRIVATE: &str = "private";
}

// Push payload fields, as delivered by the server
pub mod fields {
    pub const EVENT: &str = "event";
    pub const REALM_URI: &str = "realm_uri";
    pub const USER_ID: &str = "user_id";
    pub const MESSAGE_ID: &str = "zulip_message_id";
    pub const MESSAGE_IDS: &str = "zulip_message_ids";
    pub const SENDER_FULL_NAME: &str = "sender_full_name";
    pub const SENDER_EMAIL: &str = "sender_email";
    pub const SENDER_AVATAR_URL: &str = "sender_avatar_url";
    pub const RECIPIENT_TYPE: &str = "recipient_type";
    pub const STREAM: &str = "stream";
    pub const TOPIC: &str = "topic";
    pub const PM_USERS: &str = "pm_users";
    pub const CONTENT: &str = "content";
}

// Push event types
pub mod events {
    pub const MESSAGE: &str = "message";
    pub const REMOVE: &str = "remove";
}
