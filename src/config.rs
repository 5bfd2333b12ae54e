use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::agenda::Layout;
use crate::core::goal::{MIN_DURATION_DAYS, RecurringGoal};
use crate::core::storage::StorageQuota;
use crate::error::{AgendaError, Result};

pub const CONFIG_VERSION: u64 = 1;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("carbon-agenda")
}

/// `$XDG_CONFIG_HOME/carbon-agenda/config.json` or the platform equivalent.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("carbon-agenda")
        .join("config.json")
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct AgendaConfig {
    pub version: u64,
    pub data_directory: PathBuf,
    pub layout: Layout,
    pub storage_limit: u32,
    pub item_weight: f64,
    pub task_weight: f64,
    pub minimum_goal_days: u32,
    pub debug_logging: bool,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        let quota = StorageQuota::default();
        Self {
            version: CONFIG_VERSION,
            data_directory: default_data_dir(),
            layout: Layout::Wide,
            storage_limit: quota.limit,
            item_weight: quota.item_weight,
            task_weight: quota.task_weight,
            minimum_goal_days: MIN_DURATION_DAYS,
            debug_logging: false,
        }
    }
}

impl AgendaConfig {
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_directory.join("snapshot.json")
    }

    pub fn storage_quota(&self) -> StorageQuota {
        StorageQuota {
            limit: self.storage_limit,
            item_weight: self.item_weight,
            task_weight: self.task_weight,
        }
    }

    /// Create a goal, enforcing the configured minimum duration.
    pub fn new_goal(&self, name: impl Into<String>, duration_days: u32) -> Result<RecurringGoal> {
        RecurringGoal::try_new(name, duration_days, self.minimum_goal_days)
    }

    /// Read the config at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.version > CONFIG_VERSION {
            return Err(AgendaError::Config(format!(
                "config version {} is newer than supported version {}",
                self.version, CONFIG_VERSION
            )));
        }
        if self.item_weight < 0.0 || self.task_weight < 0.0 {
            return Err(AgendaError::Config("storage weights must not be negative".into()));
        }
        if self.minimum_goal_days < MIN_DURATION_DAYS {
            log::warn!(
                "minimum_goal_days {} is below {}, using {}",
                self.minimum_goal_days,
                MIN_DURATION_DAYS,
                MIN_DURATION_DAYS
            );
        }
        Ok(())
    }
}
