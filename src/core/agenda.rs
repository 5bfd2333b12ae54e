use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::assign::assign;
use super::bucket::{Granularity, TimeBucket, buckets_spanning};
use super::order::order;
use super::task::Task;
use crate::error::{AgendaError, Result};

/// Which columns the agenda shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Days,
    Weeks,
    Months,
}

/// Screen class. A compact screen shows one column at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Wide,
    Compact,
}

impl ViewKind {
    pub fn column_unit(&self) -> Granularity {
        match self {
            Self::Days => Granularity::Day,
            Self::Weeks => Granularity::Week,
            Self::Months => Granularity::Month,
        }
    }

    /// Unit covered by the whole view.
    pub fn span_unit(&self, layout: Layout) -> Granularity {
        match (self, layout) {
            (_, Layout::Compact) => self.column_unit(),
            (Self::Days, Layout::Wide) => Granularity::Week,
            (Self::Weeks, Layout::Wide) => Granularity::Month,
            (Self::Months, Layout::Wide) => Granularity::Year,
        }
    }
}

impl FromStr for ViewKind {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "days" => Ok(Self::Days),
            "weeks" => Ok(Self::Weeks),
            "months" => Ok(Self::Months),
            _ => Err(AgendaError::InvalidView(s.to_string())),
        }
    }
}

/// One agenda column with its tasks in display order.
#[derive(Debug, Clone)]
pub struct AgendaColumn {
    pub bucket: TimeBucket,
    pub tasks: Vec<Task>,
}

impl AgendaColumn {
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn tasks_left(&self) -> usize {
        self.tasks.len() - self.completed_count()
    }
}

/// The agenda window around a reference date.
#[derive(Debug, Clone)]
pub struct AgendaView {
    pub kind: ViewKind,
    pub layout: Layout,
    pub date: NaiveDate,
    pub span: TimeBucket,
    pub columns: Vec<TimeBucket>,
}

impl AgendaView {
    pub fn new(kind: ViewKind, layout: Layout, date: NaiveDate) -> Result<Self> {
        let span = TimeBucket::containing(date.and_time(NaiveTime::MIN), kind.span_unit(layout))?;
        let columns = buckets_spanning(span.start, span.end, kind.column_unit())?;
        log::debug!(
            "{:?} view for {} spans {} .. {} in {} columns",
            kind,
            date,
            span.start,
            span.end,
            columns.len()
        );
        Ok(Self {
            kind,
            layout,
            date,
            span,
            columns,
        })
    }

    /// Reference date one span forward.
    pub fn next_date(&self) -> Result<NaiveDate> {
        self.shifted(1)
    }

    pub fn previous_date(&self) -> Result<NaiveDate> {
        self.shifted(-1)
    }

    fn shifted(&self, n: i64) -> Result<NaiveDate> {
        self.kind
            .span_unit(self.layout)
            .shift(self.date, n)
            .ok_or(AgendaError::DateOutOfRange)
    }

    pub fn next(&self) -> Result<Self> {
        Self::new(self.kind, self.layout, self.next_date()?)
    }

    pub fn previous(&self) -> Result<Self> {
        Self::new(self.kind, self.layout, self.previous_date()?)
    }

    /// Index of the column containing `now`, if it is on screen.
    pub fn active_column(&self, now: NaiveDateTime) -> Option<usize> {
        self.columns.iter().position(|c| c.is_current(now))
    }

    /// Bucket and order `tasks` into this view's columns.
    pub fn project(&self, tasks: &[Task]) -> Vec<AgendaColumn> {
        let assignment = assign(tasks, &self.columns);
        self.columns
            .iter()
            .zip(assignment.columns)
            .map(|(bucket, tasks)| AgendaColumn {
                bucket: *bucket,
                tasks: order(&tasks),
            })
            .collect()
    }
}
