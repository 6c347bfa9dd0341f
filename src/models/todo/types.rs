use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub assigned_to: Vec<String>,
    pub completed: bool,
    pub position: i64,
    pub is_recurring: bool,
    /// Weak link to a recurring definition; cleared when that definition is deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// First completion time. Later toggles leave it alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    pub fn link_to(&mut self, definition_id: i64) {
        self.is_recurring = true;
        self.recurrence_id = Some(definition_id);
    }

    pub fn unlink(&mut self) {
        self.is_recurring = false;
        self.recurrence_id = None;
    }

    /// Set the completion flag, stamping `completed_at` on the first completion.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        if completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        self.completed = completed;
    }
}

/// A todo about to be inserted. `position == 0` means "append".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_to: Vec<String>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Set only by the recurrence workflow, never from a request body.
    #[serde(skip)]
    pub recurrence_id: Option<i64>,
}

impl NewTodo {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

/// Body of `PUT /api/todos/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_to: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    /// Replaces the due date when present; absent keeps the current one.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: i64,
    pub position: i64,
}
