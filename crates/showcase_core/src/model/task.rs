//! Task domain model.
//!
//! # Responsibility
//! - Define the single record rendered and persisted by the to-do list.
//! - Define the display-only filter predicate over that record.
//!
//! # Invariants
//! - `id` is unique within a list and never reused.
//! - `due_date` carries minute precision only; persisted form is `HH:MM`.
//! - An empty persisted `dueDate` string means "no due time".

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Millisecond timestamp assigned at creation time.
pub type TaskId = i64;

/// Time of day (hour:minute) a task is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueTime(NaiveTime);

impl DueTime {
    /// Builds a due time from 24h hour and minute.
    ///
    /// Returns `None` when either component is out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }
}

/// Error returned when due time input is not `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueTimeParseError {
    input: String,
}

impl Display for DueTimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid due time `{}`; expected HH:MM", self.input)
    }
}

impl Error for DueTimeParseError {}

impl FromStr for DueTime {
    type Err = DueTimeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(|time| Self(time.with_second(0).unwrap_or(time)))
            .map_err(|_| DueTimeParseError {
                input: value.to_string(),
            })
    }
}

impl Display for DueTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for DueTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_due_date"
    )]
    pub due_date: Option<DueTime>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates a pending task with the given identity.
    pub fn new(id: TaskId, text: impl Into<String>, due_date: Option<DueTime>) -> Self {
        Self {
            id,
            text: text.into(),
            due_date,
            completed: false,
        }
    }
}

// Older snapshots store `""` when no time was picked.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<DueTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Display-only predicate over the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl TaskFilter {
    /// Stable string id used by hosts and CLI flags.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    /// Returns whether `task` is visible under this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilterParseError(String);

impl Display for TaskFilterParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported filter `{}`; expected all|completed|pending",
            self.0
        )
    }
}

impl Error for TaskFilterParseError {}

impl FromStr for TaskFilter {
    type Err = TaskFilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            other => Err(TaskFilterParseError(other.to_string())),
        }
    }
}
