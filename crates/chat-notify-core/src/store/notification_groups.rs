use crate::models::{Identity, NotificationSummary, PushEvent};
use crate::store::ConversationIndex;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Registry handle shared between ingestion and rendering. The mutex is the
/// only serialization point; indexes themselves hold no locks.
pub type SharedNotificationGroups = Arc<Mutex<NotificationGroups>>;

/// What a push did to its account's notification group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupUpdate {
    /// The group still has messages; re-render it
    Updated(Identity),
    /// The group has no messages left; cancel its notification
    Cleared(Identity),
}

/// One `ConversationIndex` per account.
#[derive(Debug, Default)]
pub struct NotificationGroups {
    groups: BTreeMap<Identity, ConversationIndex>,
}

impl NotificationGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedNotificationGroups {
        Arc::new(Mutex::new(Self::new()))
    }

    // ===== Getters =====

    pub fn get(&self, identity: &Identity) -> Option<&ConversationIndex> {
        self.groups.get(identity)
    }

    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.groups.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_message_count(&self) -> usize {
        self.groups.values().map(|g| g.total_message_count()).sum()
    }

    pub fn summary<F>(&self, identity: &Identity, count_suffix: F) -> Option<NotificationSummary>
    where
        F: Fn(usize) -> String,
    {
        self.groups.get(identity).map(|g| g.summary(count_suffix))
    }

    // ===== Mutations =====

    pub fn apply(&mut self, event: PushEvent) -> GroupUpdate {
        match event {
            PushEvent::Message { identity, message } => {
                debug!(
                    realm = %identity.realm_uri,
                    message_id = message.message_id,
                    "adding message to notification group"
                );
                self.groups.entry(identity.clone()).or_default().append(&message);
                GroupUpdate::Updated(identity)
            }
            PushEvent::Remove {
                identity,
                message_ids,
            } => {
                let ids: HashSet<u64> = message_ids.into_iter().collect();
                let now_empty = match self.groups.get_mut(&identity) {
                    Some(group) => {
                        group.remove_by_ids(&ids);
                        group.is_empty()
                    }
                    None => true,
                };

                if now_empty {
                    self.groups.remove(&identity);
                    GroupUpdate::Cleared(identity)
                } else {
                    GroupUpdate::Updated(identity)
                }
            }
        }
    }

    /// The user dismissed the whole notification for this account
    pub fn dismiss(&mut self, identity: &Identity) {
        if let Some(mut group) = self.groups.remove(identity) {
            info!(
                realm = %identity.realm_uri,
                messages = group.total_message_count(),
                "notification group dismissed"
            );
            group.clear();
        }
    }

    /// Dismiss every account on a realm (e.g. on logout)
    pub fn dismiss_realm(&mut self, realm_uri: &str) {
        let identities: Vec<Identity> = self
            .groups
            .keys()
            .filter(|i| i.realm_uri == realm_uri)
            .cloned()
            .collect();
        for identity in &identities {
            self.dismiss(identity);
        }
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}
