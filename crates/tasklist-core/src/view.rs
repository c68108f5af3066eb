use chrono::NaiveDate;
use tracing::debug;

use crate::config::PopupConfig;
use crate::editor::{
  CommitOutcome,
  Editor
};
use crate::filter::{
  PriorityFilter,
  StatusCounts,
  StatusFilter,
  TaskFilter
};
use crate::render::RowModel;
use crate::storage::KeyValueStorage;
use crate::store::TaskStore;
use crate::task::{
  Priority,
  Task,
  TaskId
};

/// The popup's whole state: stored tasks,
/// the add/edit form and the active
/// filters.
#[derive(Debug, Clone)]
pub struct TaskListView<S> {
  store:  TaskStore<S>,
  editor: Editor,
  filter: TaskFilter
}

impl<S: KeyValueStorage> TaskListView<S> {
  pub fn load(
    storage: S,
    config: &PopupConfig
  ) -> Self {
    Self {
      store:  TaskStore::load(
        storage, config
      ),
      editor: Editor::new(),
      filter: TaskFilter::default()
    }
  }

  pub fn tasks(&self) -> &[Task] {
    self.store.tasks()
  }

  pub fn editor(&self) -> &Editor {
    &self.editor
  }

  pub fn filter(&self) -> TaskFilter {
    self.filter
  }

  pub fn visible(&self) -> Vec<&Task> {
    self.filter.apply(self.store.tasks())
  }

  pub fn visible_rows(
    &self,
    today: NaiveDate
  ) -> Vec<RowModel> {
    self
      .visible()
      .into_iter()
      .map(|task| {
        RowModel::from_task(task, today)
      })
      .collect()
  }

  pub fn status_counts(
    &self
  ) -> StatusCounts {
    TaskFilter::counts(self.store.tasks())
  }

  pub fn set_draft_text(
    &mut self,
    text: impl Into<String>
  ) {
    self.editor.set_text(text);
  }

  pub fn set_draft_priority(
    &mut self,
    priority: Priority
  ) {
    self.editor.set_priority(priority);
  }

  pub fn set_draft_due_date(
    &mut self,
    due_date: impl Into<String>
  ) {
    self.editor.set_due_date(due_date);
  }

  pub fn commit(
    &mut self
  ) -> anyhow::Result<CommitOutcome> {
    self.editor.commit(&mut self.store)
  }

  /// Returns `false` when `id` is not in
  /// the list.
  pub fn begin_edit(
    &mut self,
    id: &TaskId
  ) -> bool {
    match self.store.get(id) {
      | Some(task) => {
        self.editor.begin_edit(task);
        true
      }
      | None => {
        debug!(id = %id, "begin edit on unknown id");
        false
      }
    }
  }

  pub fn cancel_edit(&mut self) {
    self.editor.cancel_edit();
  }

  /// Flips completion. Edit mode is left
  /// alone.
  pub fn toggle(
    &mut self,
    id: &TaskId
  ) -> anyhow::Result<bool> {
    self.store.toggle_completed(id)
  }

  /// Removes the task. An edit session on
  /// the same id stays open; its commit
  /// resolves as [`CommitOutcome::Stale`].
  pub fn delete(
    &mut self,
    id: &TaskId
  ) -> anyhow::Result<bool> {
    self.store.remove(id)
  }

  pub fn set_status_filter(
    &mut self,
    status: StatusFilter
  ) {
    self.filter.set_status(status);
  }

  pub fn set_priority_filter(
    &mut self,
    priority: PriorityFilter
  ) {
    self.filter.set_priority(priority);
  }
}
