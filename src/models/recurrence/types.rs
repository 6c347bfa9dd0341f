use std::fmt;

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// How a recurring item repeats, in the shape clients send it.
///
/// Stored as received; [`RecurrencePattern::schedule`] turns it into a
/// checked [`Schedule`] for date math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    pub frequency: String,
    pub interval: i64,
    #[serde(default)]
    pub days_of_week: Vec<String>,
}

impl RecurrencePattern {
    pub fn new(frequency: &str, interval: i64) -> Self {
        Self {
            frequency: frequency.to_string(),
            interval,
            days_of_week: Vec::new(),
        }
    }

    pub fn on_days(mut self, days: &[&str]) -> Self {
        self.days_of_week = days.iter().map(|d| d.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated pattern: what the recurrence engine works from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub frequency: Frequency,
    pub interval: u32,
    /// Only populated for weekly schedules.
    pub weekdays: Vec<Weekday>,
}

/// A recurring rule plus the content copied into each instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringItemDefinition {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub assigned_to: Vec<String>,
    pub pattern: RecurrencePattern,
    pub start_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Body of create/update definition requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_to: Vec<String>,
    pub pattern: RecurrencePattern,
    /// Defaults to the current instant on create; left as is on update.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
}

impl DefinitionInput {
    pub fn new(title: &str, pattern: RecurrencePattern) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            assigned_to: Vec::new(),
            pattern,
            start_date: None,
        }
    }
}

/// What the store needs to insert a definition; id and `created_at` are
/// assigned on insert.
#[derive(Debug, Clone)]
pub struct NewDefinition {
    pub title: String,
    pub description: String,
    pub assigned_to: Vec<String>,
    pub pattern: RecurrencePattern,
    pub start_date: DateTime<Utc>,
}

/// Body of `POST /api/todos/{id}/convert-recurring`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub to_recurring: bool,
    #[serde(default)]
    pub pattern: Option<RecurrencePattern>,
}
