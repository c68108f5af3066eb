use chrono::NaiveDate;

use crate::task::{
  Priority,
  Task,
  TaskId
};

/// Display model for one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowModel {
  pub id:             TaskId,
  pub text:           String,
  pub completed:      bool,
  pub priority:       Priority,
  pub priority_class: &'static str,
  pub due_label:      Option<String>,
  pub overdue:        bool
}

impl RowModel {
  pub fn from_task(
    task: &Task,
    today: NaiveDate
  ) -> Self {
    let due_date = task.due_date.trim();
    let due_label = if due_date.is_empty() {
      None
    } else {
      Some(format!("📅 {due_date}"))
    };
    let overdue = !task.completed
      && task.due().is_some_and(|due| {
        due < today
      });

    Self {
      id: task.id.clone(),
      text: task.text.clone(),
      completed: task.completed,
      priority: task.priority,
      priority_class: priority_class(
        task.priority
      ),
      due_label,
      overdue
    }
  }

  pub fn row_class(&self) -> String {
    let mut class = format!(
      "row {}",
      self.priority_class
    );
    if self.completed {
      class.push_str(" completed");
    }
    if self.overdue {
      class.push_str(" overdue");
    }
    class
  }
}

pub fn priority_class(
  priority: Priority
) -> &'static str {
  match priority {
    | Priority::High => "priority-high",
    | Priority::Medium => "priority-medium",
    | Priority::Low => "priority-low"
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::RowModel;
  use crate::task::{
    Priority,
    Task
  };

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10)
      .expect("valid date")
  }

  #[test]
  fn row_without_due_date() {
    let task = Task::new(
      "read".to_string(),
      Priority::Low,
      String::new()
    );
    let row = RowModel::from_task(&task, today());
    assert_eq!(row.due_label, None);
    assert!(!row.overdue);
    assert_eq!(row.row_class(), "row priority-low");
  }

  #[test]
  fn past_due_open_task_is_overdue() {
    let mut task = Task::new(
      "file taxes".to_string(),
      Priority::High,
      "2024-03-09".to_string()
    );
    let row = RowModel::from_task(&task, today());
    assert_eq!(
      row.due_label.as_deref(),
      Some("📅 2024-03-09")
    );
    assert!(row.overdue);
    assert_eq!(
      row.row_class(),
      "row priority-high overdue"
    );

    task.completed = true;
    let row = RowModel::from_task(&task, today());
    assert!(!row.overdue);
    assert_eq!(
      row.row_class(),
      "row priority-high completed"
    );
  }

  #[test]
  fn due_today_is_not_overdue() {
    let task = Task::new(
      "standup".to_string(),
      Priority::Medium,
      "2024-03-10".to_string()
    );
    assert!(
      !RowModel::from_task(&task, today())
        .overdue
    );
  }

  #[test]
  fn unparsable_due_date_is_shown_verbatim()
  {
    let task = Task::new(
      "odd".to_string(),
      Priority::Medium,
      "someday".to_string()
    );
    let row = RowModel::from_task(&task, today());
    assert_eq!(
      row.due_label.as_deref(),
      Some("📅 someday")
    );
    assert!(!row.overdue);
  }
}
