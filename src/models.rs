use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

pub type RoleId = String;
pub type GoalId = String;
pub type TaskId = String;

/// Top-level life area. Owns its goals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

/// An objective under a role. Owns its tasks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub description: String,
    /// Id of the owning role. A lookup key only.
    pub role_id: RoleId,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A schedulable unit of work.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Id of the owning goal. A lookup key only.
    pub goal_id: GoalId,
    /// Calendar day the task is placed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// Hour of the day (0-23). Only set together with `scheduled_date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_hour: Option<u8>,
}

/// Partial update merged into a task by `Store::update_task`.
///
/// `None` leaves a field untouched. For the schedule fields, `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub scheduled_date: Option<Option<NaiveDate>>,
    pub scheduled_hour: Option<Option<u8>>,
}

impl Role {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Role {
        Role {
            id: new_id(),
            title: title.into(),
            description: description.into(),
            goals: Vec::new(),
        }
    }
}

impl Goal {
    pub fn new(role_id: &str, title: impl Into<String>, description: impl Into<String>) -> Goal {
        Goal {
            id: new_id(),
            title: title.into(),
            description: description.into(),
            role_id: role_id.to_string(),
            tasks: Vec::new(),
        }
    }
}

impl Task {
    pub fn new(goal_id: &str, title: impl Into<String>, description: impl Into<String>) -> Task {
        Task {
            id: new_id(),
            title: title.into(),
            description: description.into(),
            completed: false,
            goal_id: goal_id.to_string(),
            scheduled_date: None,
            scheduled_hour: None,
        }
    }

    /// Merges `update` into the task, keeping the hour tied to the date.
    ///
    /// The date is applied first. Moving or clearing the date drops the old
    /// hour unless the update supplies one, and a task without a date never
    /// keeps an hour. Hours past 23 are ignored.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(date) = update.scheduled_date {
            if date != self.scheduled_date && update.scheduled_hour.is_none() {
                self.scheduled_hour = None;
            }
            self.scheduled_date = date;
        }
        match update.scheduled_hour {
            Some(Some(hour)) if hour < 24 => self.scheduled_hour = Some(hour),
            Some(None) => self.scheduled_hour = None,
            _ => {}
        }
        if self.scheduled_date.is_none() {
            self.scheduled_hour = None;
        }
    }
}

impl TaskUpdate {
    pub fn completed(completed: bool) -> TaskUpdate {
        TaskUpdate { completed: Some(completed), ..TaskUpdate::default() }
    }

    pub fn schedule(date: NaiveDate, hour: Option<u8>) -> TaskUpdate {
        TaskUpdate {
            scheduled_date: Some(Some(date)),
            scheduled_hour: Some(hour),
            ..TaskUpdate::default()
        }
    }

    pub fn unschedule() -> TaskUpdate {
        TaskUpdate {
            scheduled_date: Some(None),
            scheduled_hour: Some(None),
            ..TaskUpdate::default()
        }
    }
}

/// Generates a fresh unique id for a new role, goal or task.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trims the fields of a new item and rejects an empty title.
pub fn clean_item_fields(title: &str, description: &str) -> Result<(String, String)> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }
    Ok((title.to_string(), description.trim().to_string()))
}
