use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AgendaError {
    #[error("unknown bucket unit '{0}' (expected day, week, month or year)")]
    InvalidGranularity(String),

    #[error("unknown agenda view '{0}' (expected days, weeks or months)")]
    InvalidView(String),

    #[error("unknown task stream '{0}' (expected backlog, upcoming, unscheduled or completed)")]
    InvalidStream(String),

    #[error("unknown sort mode '{0}'")]
    InvalidSortMode(String),

    #[error("unknown feedback '{0}' (expected dissatisfied, neutral or satisfied)")]
    InvalidFeedback(String),

    /// Informational: the goal was already advanced on this calendar day.
    #[error("goal {goal_id} was already completed on {date}")]
    AlreadyCompletedToday { goal_id: Uuid, date: NaiveDate },

    #[error("goal {goal_id} is not finished yet ({progress}/{duration_days} days)")]
    GoalNotFinished {
        goal_id: Uuid,
        progress: u32,
        duration_days: u32,
    },

    #[error("goal {goal_id} is already archived")]
    AlreadyArchived { goal_id: Uuid },

    #[error("goal duration of {requested} days is below the minimum of {minimum}")]
    DurationTooShort { requested: u32, minimum: u32 },

    #[error("date out of range")]
    DateOutOfRange,

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
