use std::str::FromStr;

use anyhow::anyhow;

use crate::task::{
  Priority,
  Task
};

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq,
)]
pub enum StatusFilter {
  #[default]
  All,
  Active,
  Completed
}

impl StatusFilter {
  pub const ALL: [StatusFilter; 3] = [
    StatusFilter::All,
    StatusFilter::Active,
    StatusFilter::Completed
  ];

  pub fn matches(
    self,
    task: &Task
  ) -> bool {
    match self {
      | StatusFilter::All => true,
      | StatusFilter::Active => {
        !task.completed
      }
      | StatusFilter::Completed => {
        task.completed
      }
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | StatusFilter::All => "all",
      | StatusFilter::Active => "active",
      | StatusFilter::Completed => {
        "completed"
      }
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | StatusFilter::All => "All",
      | StatusFilter::Active => "Active",
      | StatusFilter::Completed => {
        "Completed"
      }
    }
  }
}

impl FromStr for StatusFilter {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s.trim() {
      | "all" => Ok(StatusFilter::All),
      | "active" => Ok(StatusFilter::Active),
      | "completed" => {
        Ok(StatusFilter::Completed)
      }
      | other => Err(anyhow!(
        "unknown status filter: {other}"
      ))
    }
  }
}

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq,
)]
pub enum PriorityFilter {
  #[default]
  All,
  Only(Priority)
}

impl PriorityFilter {
  /// Button order in the filter bar.
  pub const ALL: [PriorityFilter; 4] = [
    PriorityFilter::All,
    PriorityFilter::Only(Priority::High),
    PriorityFilter::Only(Priority::Medium),
    PriorityFilter::Only(Priority::Low)
  ];

  pub fn matches(
    self,
    task: &Task
  ) -> bool {
    match self {
      | PriorityFilter::All => true,
      | PriorityFilter::Only(priority) => {
        task.priority == priority
      }
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | PriorityFilter::All => "all",
      | PriorityFilter::Only(priority) => {
        priority.as_str()
      }
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | PriorityFilter::All => {
        "All Priorities"
      }
      | PriorityFilter::Only(priority) => {
        priority.label()
      }
    }
  }
}

impl FromStr for PriorityFilter {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s.trim() {
      | "all" => Ok(PriorityFilter::All),
      | other => other
        .parse::<Priority>()
        .map(PriorityFilter::Only)
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub struct StatusCounts {
  pub all:       usize,
  pub active:    usize,
  pub completed: usize
}

impl StatusCounts {
  pub fn get(
    &self,
    status: StatusFilter
  ) -> usize {
    match status {
      | StatusFilter::All => self.all,
      | StatusFilter::Active => self.active,
      | StatusFilter::Completed => {
        self.completed
      }
    }
  }
}

/// Read-time projection over the task list.
/// Never persisted.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq,
)]
pub struct TaskFilter {
  pub status:   StatusFilter,
  pub priority: PriorityFilter
}

impl TaskFilter {
  pub fn set_status(
    &mut self,
    status: StatusFilter
  ) {
    self.status = status;
  }

  pub fn set_priority(
    &mut self,
    priority: PriorityFilter
  ) {
    self.priority = priority;
  }

  pub fn matches(
    &self,
    task: &Task
  ) -> bool {
    self.status.matches(task)
      && self.priority.matches(task)
  }

  /// Matching tasks in list order.
  pub fn apply<'a>(
    &self,
    tasks: &'a [Task]
  ) -> Vec<&'a Task> {
    tasks
      .iter()
      .filter(|task| self.matches(task))
      .collect()
  }

  pub fn counts(
    tasks: &[Task]
  ) -> StatusCounts {
    let completed = tasks
      .iter()
      .filter(|task| task.completed)
      .count();
    StatusCounts {
      all: tasks.len(),
      active: tasks.len() - completed,
      completed
    }
  }
}
