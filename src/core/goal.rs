use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{AgendaError, Result};

/// Shortest goal a user can create, in days.
pub const MIN_DURATION_DAYS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Dissatisfied,
    Neutral,
    Satisfied,
}

impl FromStr for Feedback {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dissatisfied" => Ok(Self::Dissatisfied),
            "neutral" => Ok(Self::Neutral),
            "satisfied" => Ok(Self::Satisfied),
            _ => Err(AgendaError::InvalidFeedback(s.to_string())),
        }
    }
}

/// A multi-day habit goal, advanced at most once per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringGoal {
    pub id: Uuid,
    pub name: String,
    pub duration_days: u32,
    #[serde(default)]
    pub progress: u32,
    #[serde(default, rename = "lastCompleted")]
    pub last_completed: Option<NaiveDate>,
    /// Hour of day, display and sort only.
    #[serde(default)]
    pub time_of_day: u8,
    /// Sunday first.
    #[serde(default = "every_day")]
    pub days_of_week: [bool; 7],
    #[serde(default)]
    pub feedback: Option<Feedback>,
    #[serde(default, rename = "completed")]
    pub archived: bool,
}

fn every_day() -> [bool; 7] {
    [true; 7]
}

/// Result of completing a goal. The caller owns the trophy ledger and must
/// credit `trophies_granted` to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedGoal {
    pub goal: RecurringGoal,
    pub trophies_granted: u32,
}

impl RecurringGoal {
    /// Durations below [`MIN_DURATION_DAYS`] are raised to it.
    pub fn new(name: impl Into<String>, duration_days: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration_days: duration_days.max(MIN_DURATION_DAYS),
            progress: 0,
            last_completed: None,
            time_of_day: 7,
            days_of_week: every_day(),
            feedback: None,
            archived: false,
        }
    }

    /// Like [`RecurringGoal::new`] but rejects durations under `minimum`.
    pub fn try_new(name: impl Into<String>, duration_days: u32, minimum: u32) -> Result<Self> {
        let minimum = minimum.max(MIN_DURATION_DAYS);
        if duration_days < minimum {
            return Err(AgendaError::DurationTooShort {
                requested: duration_days,
                minimum,
            });
        }
        Ok(Self::new(name, duration_days))
    }

    /// Copy with `progress` clamped to `duration_days`, for records the
    /// goal store handed over already past their length.
    pub fn normalized(&self) -> Self {
        let mut goal = self.clone();
        if goal.progress > goal.duration_days {
            log::warn!(
                "goal {} has progress {} past its {} days, clamping",
                goal.id,
                goal.progress,
                goal.duration_days
            );
            goal.progress = goal.duration_days;
        }
        goal
    }

    pub fn days_left(&self) -> u32 {
        self.duration_days.saturating_sub(self.progress)
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= self.duration_days
    }

    /// Rounded half up; 0 for a zero-length goal loaded from a bad record.
    pub fn percent_complete(&self) -> u32 {
        if self.duration_days == 0 {
            return 0;
        }
        let progress = self.progress.min(self.duration_days) as u64;
        let duration = self.duration_days as u64;
        ((200 * progress + duration) / (2 * duration)) as u32
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.last_completed == Some(date)
    }

    pub fn is_active_on(&self, weekday: Weekday) -> bool {
        self.days_of_week[weekday.num_days_from_sunday() as usize]
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        !self.archived
            && !self.is_finished()
            && !self.is_completed_on(today)
            && self.is_active_on(today.weekday())
    }

    /// Record one day of progress. Returns the updated goal; `self` is untouched.
    pub fn advance(&self, today: NaiveDate) -> Result<Self> {
        if self.archived {
            log::warn!("refusing to advance archived goal {}", self.id);
            return Err(AgendaError::AlreadyArchived { goal_id: self.id });
        }
        if self.is_completed_on(today) {
            return Err(AgendaError::AlreadyCompletedToday {
                goal_id: self.id,
                date: today,
            });
        }
        let mut next = self.clone();
        next.progress = self.progress.saturating_add(1).min(self.duration_days);
        next.last_completed = Some(today);
        log::debug!(
            "goal {} advanced to {}/{}",
            next.id,
            next.progress,
            next.duration_days
        );
        Ok(next)
    }

    /// Archive a finished goal with the user's feedback and grant one trophy.
    pub fn complete(&self, feedback: Feedback) -> Result<FinishedGoal> {
        if self.archived {
            log::warn!("goal {} completed twice, no trophy granted", self.id);
            return Err(AgendaError::AlreadyArchived { goal_id: self.id });
        }
        if !self.is_finished() {
            return Err(AgendaError::GoalNotFinished {
                goal_id: self.id,
                progress: self.progress,
                duration_days: self.duration_days,
            });
        }
        let mut goal = self.normalized();
        goal.feedback = Some(feedback);
        goal.archived = true;
        log::info!("goal {} finished after {} days", goal.id, goal.duration_days);
        Ok(FinishedGoal {
            goal,
            trophies_granted: 1,
        })
    }
}
