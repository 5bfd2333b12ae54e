use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task as the agenda engine sees it.
///
/// `due` and `created` live in the viewer's local frame; use
/// [`TaskRecord::localize`] to get there from the store's UTC timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub due: Option<NaiveDateTime>,
    pub completed: bool,
    /// The "important" flag.
    pub pinned: bool,
    pub created: Option<NaiveDateTime>,
    pub column_id: Option<Uuid>,
    pub board_id: Option<Uuid>,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            due: None,
            completed: false,
            pinned: false,
            created: Some(chrono::Local::now().naive_local()),
            column_id: None,
            board_id: None,
        }
    }

    pub fn with_due(mut self, due: NaiveDateTime) -> Self {
        self.due = Some(due);
        self
    }

    pub fn is_scheduled(&self) -> bool {
        self.due.is_some()
    }
}

/// Wire shape of a task as supplied by the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub column_id: Option<Uuid>,
    #[serde(default)]
    pub board_id: Option<Uuid>,
}

impl TaskRecord {
    /// Convert store timestamps into the viewer's timezone.
    pub fn localize<Tz: TimeZone>(&self, tz: &Tz) -> Task {
        let local = |dt: DateTime<Utc>| dt.with_timezone(tz).naive_local();
        Task {
            id: self.id,
            name: self.name.clone(),
            due: self.due.map(local),
            completed: self.completed,
            pinned: self.pinned,
            created: self.created_at.map(local),
            column_id: self.column_id,
            board_id: self.board_id,
        }
    }
}
