use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single to-do entry. Everything except `done` is fixed at creation;
/// tasks are only ever built through [`TaskStore::create`](crate::TaskStore::create).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub priority: Priority,
    /// Creation date, `YYYY-MM-DD` in local time.
    pub start_date: String,
    /// `YYYY-MM-DD`; `None` means no deadline. An unparsable value is
    /// tolerated and simply never counts as overdue.
    #[serde(default)]
    pub due_date: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Task priority. `Low`, `Medium` and `High` are the recognized values
/// (case-sensitive); anything else found in persisted data is carried
/// through untouched rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    Medium,
    High,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Other(s) => s,
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Low" => Priority::Low,
            "Medium" => Priority::Medium,
            "High" => Priority::High,
            _ => Priority::Other(s),
        }
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Other(s) => s,
            _ => p.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown priority {0:?} (expected Low, Medium or High)")]
pub struct ParsePriorityError(String);

/// Strict parse for user input: only the three recognized values.
impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}
