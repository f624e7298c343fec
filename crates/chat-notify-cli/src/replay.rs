use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use chat_notify_core::config::CoreConfig;
use chat_notify_core::models::{Identity, NotificationSummary};
use chat_notify_core::store::GroupUpdate;
use chat_notify_core::{NotificationGroups, PushEvent};
use serde::Serialize;
use tracing::{debug, info, warn};

/// The notification an account would show after the replay
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReport {
    pub identity: Identity,
    #[serde(flatten)]
    pub summary: NotificationSummary,
}

pub fn replay_file(path: &Path, dismiss: &[String], config: &CoreConfig) -> Result<Vec<GroupReport>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open push log: {}", path.display()))?;
    replay(BufReader::new(file), dismiss, config)
}

/// Feed every payload line through a fresh registry. Lines that fail to
/// decode are logged and skipped.
pub fn replay<R: BufRead>(reader: R, dismiss: &[String], config: &CoreConfig) -> Result<Vec<GroupReport>> {
    let mut groups = NotificationGroups::new();
    let mut applied = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let event = match serde_json::from_str::<serde_json::Value>(&line)
            .map_err(anyhow::Error::from)
            .and_then(|value| PushEvent::from_value(&value).map_err(anyhow::Error::from))
        {
            Ok(event) => event,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "skipping push payload");
                continue;
            }
        };

        match groups.apply(event) {
            GroupUpdate::Updated(identity) => debug!(realm = %identity.realm_uri, "group updated"),
            GroupUpdate::Cleared(identity) => debug!(realm = %identity.realm_uri, "group cleared"),
        }
        applied += 1;
    }

    for realm in dismiss {
        groups.dismiss_realm(realm);
    }

    info!(applied, remaining = groups.total_message_count(), "replay finished");

    let suffixes = &config.count_suffixes;
    Ok(groups
        .identities()
        .filter_map(|identity| {
            let summary = groups.summary(identity, |n| suffixes.render(n))?;
            Some(GroupReport {
                identity: identity.clone(),
                summary,
            })
        })
        .collect())
}
