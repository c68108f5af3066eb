use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

pub const DUE_DATE_FORMAT: &str =
  "%Y-%m-%d";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
  pub fn generate() -> Self {
    Self(Uuid::new_v4().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for TaskId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

impl From<String> for TaskId {
  fn from(value: String) -> Self {
    Self(value)
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High
}

impl Priority {
  pub const ALL: [Priority; 3] = [
    Priority::Low,
    Priority::Medium,
    Priority::High
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | Priority::Low => "low",
      | Priority::Medium => "medium",
      | Priority::High => "high"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Priority::Low => "Low",
      | Priority::Medium => "Medium",
      | Priority::High => "High"
    }
  }
}

impl FromStr for Priority {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s.trim() {
      | "low" => Ok(Priority::Low),
      | "medium" => Ok(Priority::Medium),
      | "high" => Ok(Priority::High),
      | other => Err(anyhow!(
        "unknown priority: {other}"
      ))
    }
  }
}

/// A single to-do item as stored in the
/// snapshot.
///
/// Field names on the wire follow the
/// popup's storage layout (`dueDate`).
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:        TaskId,
  pub text:      String,
  #[serde(default)]
  pub completed: bool,
  #[serde(default)]
  pub priority:  Priority,
  #[serde(default)]
  pub due_date:  String
}

impl Task {
  pub fn new(
    text: String,
    priority: Priority,
    due_date: String
  ) -> Self {
    Self {
      id: TaskId::generate(),
      text,
      completed: false,
      priority,
      due_date
    }
  }

  /// The due date as a calendar date, or
  /// `None` when unset or not
  /// `YYYY-MM-DD`.
  pub fn due(&self) -> Option<NaiveDate> {
    parse_due_date(&self.due_date)
  }
}

pub fn parse_due_date(
  raw: &str
) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  NaiveDate::parse_from_str(
    trimmed,
    DUE_DATE_FORMAT
  )
  .ok()
}

/// Partial update applied by
/// [`crate::store::TaskStore::update`].
/// `None` leaves a field untouched.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskPatch {
  pub text:      Option<String>,
  pub completed: Option<bool>,
  pub priority:  Option<Priority>,
  pub due_date:  Option<String>
}

impl TaskPatch {
  /// Applies the patch, returning whether
  /// any field actually changed.
  pub fn apply_to(
    &self,
    task: &mut Task
  ) -> bool {
    let mut changed = false;
    if let Some(text) = &self.text
      && task.text != *text
    {
      task.text = text.clone();
      changed = true;
    }
    if let Some(completed) = self.completed
      && task.completed != completed
    {
      task.completed = completed;
      changed = true;
    }
    if let Some(priority) = self.priority
      && task.priority != priority
    {
      task.priority = priority;
      changed = true;
    }
    if let Some(due_date) = &self.due_date
      && task.due_date != *due_date
    {
      task.due_date = due_date.clone();
      changed = true;
    }
    changed
  }
}
