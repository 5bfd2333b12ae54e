use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::task::Task;
use crate::error::AgendaError;

/// Flat task lists shown outside the agenda columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    /// Due at or before now and still open.
    Backlog,
    /// Due at or after now and still open.
    Upcoming,
    Unscheduled,
    Completed,
}

impl Stream {
    pub fn includes(&self, task: &Task, now: NaiveDateTime) -> bool {
        match self {
            Self::Backlog => !task.completed && task.due.is_some_and(|due| due <= now),
            Self::Upcoming => !task.completed && task.due.is_some_and(|due| due >= now),
            Self::Unscheduled => task.due.is_none(),
            Self::Completed => task.completed,
        }
    }

    /// Tasks of this stream in input order.
    pub fn collect(&self, tasks: &[Task], now: NaiveDateTime) -> Vec<Task> {
        tasks
            .iter()
            .filter(|t| self.includes(t, now))
            .cloned()
            .collect()
    }
}

impl FromStr for Stream {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backlog" => Ok(Self::Backlog),
            "upcoming" => Ok(Self::Upcoming),
            "unscheduled" => Ok(Self::Unscheduled),
            "completed" => Ok(Self::Completed),
            _ => Err(AgendaError::InvalidStream(s.to_string())),
        }
    }
}

/// Counts for every stream at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamCounts {
    pub backlog: usize,
    pub upcoming: usize,
    pub unscheduled: usize,
    pub completed: usize,
}

impl StreamCounts {
    pub fn tally(tasks: &[Task], now: NaiveDateTime) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            if Stream::Backlog.includes(task, now) {
                counts.backlog += 1;
            }
            if Stream::Upcoming.includes(task, now) {
                counts.upcoming += 1;
            }
            if Stream::Unscheduled.includes(task, now) {
                counts.unscheduled += 1;
            }
            if Stream::Completed.includes(task, now) {
                counts.completed += 1;
            }
        }
        counts
    }
}
