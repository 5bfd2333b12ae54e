use serde::{Deserialize, Serialize};
use std::path::Path;

use super::friends::{FriendActivity, FriendEdge};
use super::goal::RecurringGoal;
use super::storage::StorageUsage;
use super::task::TaskRecord;
use crate::error::Result;

/// Everything the stores handed over for one render, as read from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub tasks: Vec<TaskRecord>,
    pub goals: Vec<RecurringGoal>,
    pub friends: Vec<FriendEdge>,
    pub friend_activity: Vec<FriendActivity>,
    pub storage: StorageUsage,
}

/// A missing file is an empty snapshot; a malformed one is an error.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let mut snapshot: Snapshot = serde_json::from_str(&content)?;
            snapshot.goals = snapshot.goals.iter().map(RecurringGoal::normalized).collect();
            Ok(snapshot)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("no snapshot at {}, starting empty", path.display());
            Ok(Snapshot::default())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    Ok(())
}
