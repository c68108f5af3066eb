use tracing::debug;

use crate::storage::KeyValueStorage;
use crate::store::TaskStore;
use crate::task::{
  Priority,
  Task,
  TaskId,
  TaskPatch
};

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub enum EditorMode {
  #[default]
  Adding,
  Editing(TaskId)
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct Draft {
  pub text:     String,
  pub priority: Priority,
  pub due_date: String
}

impl Draft {
  fn from_task(task: &Task) -> Self {
    Self {
      text:     task.text.clone(),
      priority: task.priority,
      due_date: task.due_date.clone()
    }
  }

  fn has_text(&self) -> bool {
    !self.text.trim().is_empty()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
  /// Draft text was empty after trimming;
  /// nothing changed.
  Ignored,
  Added(TaskId),
  Updated(TaskId),
  /// The task being edited is gone. The
  /// editor was reset.
  Stale(TaskId)
}

/// Form state shared by the add and edit
/// flows.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct Editor {
  mode:  EditorMode,
  draft: Draft
}

impl Editor {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn mode(&self) -> &EditorMode {
    &self.mode
  }

  pub fn draft(&self) -> &Draft {
    &self.draft
  }

  pub fn editing_id(
    &self
  ) -> Option<&TaskId> {
    match &self.mode {
      | EditorMode::Adding => None,
      | EditorMode::Editing(id) => Some(id)
    }
  }

  pub fn is_editing(&self) -> bool {
    matches!(
      self.mode,
      EditorMode::Editing(_)
    )
  }

  pub fn set_text(
    &mut self,
    text: impl Into<String>
  ) {
    self.draft.text = text.into();
  }

  pub fn set_priority(
    &mut self,
    priority: Priority
  ) {
    self.draft.priority = priority;
  }

  pub fn set_due_date(
    &mut self,
    due_date: impl Into<String>
  ) {
    self.draft.due_date = due_date.into();
  }

  /// Switches to editing `task`, replacing
  /// whatever draft was in progress.
  pub fn begin_edit(
    &mut self,
    task: &Task
  ) {
    debug!(id = %task.id, "begin edit");
    self.mode =
      EditorMode::Editing(task.id.clone());
    self.draft = Draft::from_task(task);
  }

  pub fn cancel_edit(&mut self) {
    if self.is_editing() {
      debug!("cancel edit");
    }
    self.reset();
  }

  fn reset(&mut self) {
    self.mode = EditorMode::Adding;
    self.draft = Draft::default();
  }

  /// Adds or updates a task from the draft.
  ///
  /// On a store write error the store is
  /// left unchanged and so is the draft, so
  /// the commit can be retried.
  pub fn commit<S: KeyValueStorage>(
    &mut self,
    store: &mut TaskStore<S>
  ) -> anyhow::Result<CommitOutcome> {
    if !self.draft.has_text() {
      debug!("commit ignored; empty text");
      return Ok(CommitOutcome::Ignored);
    }

    let outcome = match &self.mode {
      | EditorMode::Adding => {
        let task = Task::new(
          self.draft.text.clone(),
          self.draft.priority,
          self.draft.due_date.clone()
        );
        let id = task.id.clone();
        store.append(task)?;
        CommitOutcome::Added(id)
      }
      | EditorMode::Editing(id) => {
        let id = id.clone();
        if store.contains(&id) {
          store.update(&id, &TaskPatch {
            text: Some(
              self.draft.text.clone()
            ),
            priority: Some(
              self.draft.priority
            ),
            due_date: Some(
              self.draft.due_date.clone()
            ),
            completed: None
          })?;
          CommitOutcome::Updated(id)
        } else {
          debug!(id = %id, "commit on stale edit");
          CommitOutcome::Stale(id)
        }
      }
    };

    self.reset();
    Ok(outcome)
  }
}

#[cfg(test)]
mod tests {
  use super::{
    CommitOutcome,
    Draft,
    Editor,
    EditorMode
  };
  use crate::config::PopupConfig;
  use crate::storage::MemoryStorage;
  use crate::store::TaskStore;
  use crate::task::Priority;

  fn store() -> TaskStore<MemoryStorage> {
    TaskStore::load(
      MemoryStorage::new(),
      &PopupConfig::default()
    )
  }

  #[test]
  fn add_commit_appends_and_resets_draft() {
    let mut store = store();
    let mut editor = Editor::new();
    editor.set_text("  Buy milk ");
    editor.set_priority(Priority::High);
    editor.set_due_date("2024-01-01");

    let outcome = editor
      .commit(&mut store)
      .expect("commit");
    let CommitOutcome::Added(id) = outcome
    else {
      panic!("expected add, got {outcome:?}");
    };

    let task =
      store.get(&id).expect("task added");
    assert_eq!(task.text, "  Buy milk ");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.due_date, "2024-01-01");
    assert!(!task.completed);
    assert_eq!(editor.draft(), &Draft::default());
    assert_eq!(editor.mode(), &EditorMode::Adding);
  }

  #[test]
  fn blank_commit_keeps_edit_session() {
    let mut store = store();
    let mut editor = Editor::new();
    editor.set_text("task");
    editor.commit(&mut store).expect("commit");
    let task = store.tasks()[0].clone();

    editor.begin_edit(&task);
    editor.set_text("   ");
    editor.set_priority(Priority::Low);
    assert_eq!(
      editor
        .commit(&mut store)
        .expect("commit"),
      CommitOutcome::Ignored
    );
    assert_eq!(
      editor.editing_id(),
      Some(&task.id)
    );
    assert_eq!(
      editor.draft().priority,
      Priority::Low
    );
    assert_eq!(store.tasks()[0], task);
  }

  #[test]
  fn begin_edit_seeds_draft_from_task() {
    let mut store = store();
    let mut editor = Editor::new();
    editor.set_text("walk dog");
    editor.set_priority(Priority::Low);
    editor.set_due_date("2025-06-30");
    editor.commit(&mut store).expect("commit");

    editor.set_text("half typed");
    editor.begin_edit(&store.tasks()[0]);
    assert_eq!(editor.draft().text, "walk dog");
    assert_eq!(
      editor.draft().priority,
      Priority::Low
    );
    assert_eq!(
      editor.draft().due_date,
      "2025-06-30"
    );
    assert!(editor.is_editing());
  }

  #[test]
  fn stale_edit_resets_without_touching_store()
   {
    let mut store = store();
    let mut editor = Editor::new();
    editor.set_text("temp");
    editor.commit(&mut store).expect("commit");
    let task = store.tasks()[0].clone();

    editor.begin_edit(&task);
    store.remove(&task.id).expect("remove");
    editor.set_text("renamed");

    assert_eq!(
      editor
        .commit(&mut store)
        .expect("commit"),
      CommitOutcome::Stale(task.id)
    );
    assert!(store.is_empty());
    assert!(!editor.is_editing());
  }

  #[test]
  fn cancel_edit_discards_draft() {
    let mut store = store();
    let mut editor = Editor::new();
    editor.set_text("keep");
    editor.commit(&mut store).expect("commit");

    editor.begin_edit(&store.tasks()[0]);
    editor.set_text("discard me");
    editor.cancel_edit();

    assert_eq!(editor, Editor::new());
    assert_eq!(store.tasks()[0].text, "keep");
  }
}
