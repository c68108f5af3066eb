use std::collections::BTreeSet;

use anyhow::Context;
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::config::{
  CorruptSnapshotPolicy,
  PopupConfig
};
use crate::storage::KeyValueStorage;
use crate::task::{
  Task,
  TaskId,
  TaskPatch
};

/// The ordered task list, mirrored to a
/// single storage key as a full JSON
/// snapshot after every change.
#[derive(Debug, Clone)]
pub struct TaskStore<S> {
  storage:     S,
  storage_key: String,
  tasks:       Vec<Task>
}

impl<S: KeyValueStorage> TaskStore<S> {
  /// Reads the persisted snapshot. Never
  /// fails: an absent, unreadable or
  /// malformed snapshot yields an empty
  /// list.
  #[tracing::instrument(skip_all, fields(key = %config.storage_key))]
  pub fn load(
    storage: S,
    config: &PopupConfig
  ) -> Self {
    let storage_key =
      config.storage_key.clone();

    let raw = match storage
      .get_item(&storage_key)
      .with_context(|| {
        format!(
          "failed reading {storage_key}"
        )
      }) {
      | Ok(raw) => raw,
      | Err(error) => {
        error!(
          ?error,
          "storage unavailable; starting \
           with an empty list"
        );
        None
      }
    };

    let tasks = match raw {
      | None => {
        debug!("no stored snapshot");
        Vec::new()
      }
      | Some(raw) => {
        match decode_snapshot(&raw) {
          | Ok(tasks) => tasks,
          | Err(error) => {
            warn!(
              ?error,
              policy = ?config.on_corrupt_snapshot,
              "malformed snapshot; starting \
               with an empty list"
            );
            if config.on_corrupt_snapshot
              == CorruptSnapshotPolicy::Backup
            {
              backup_raw_snapshot(
                &storage,
                &config.backup_key(),
                &raw
              );
            }
            Vec::new()
          }
        }
      }
    };

    info!(
      count = tasks.len(),
      "loaded task list"
    );

    Self {
      storage,
      storage_key,
      tasks
    }
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn get(
    &self,
    id: &TaskId
  ) -> Option<&Task> {
    self.tasks.iter().find(|t| t.id == *id)
  }

  pub fn contains(
    &self,
    id: &TaskId
  ) -> bool {
    self.get(id).is_some()
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  /// Writes the whole list under the
  /// storage key.
  #[tracing::instrument(skip(self), fields(count = self.tasks.len()))]
  pub fn save(&self) -> anyhow::Result<()> {
    let json =
      serde_json::to_string(&self.tasks)
        .context(
          "failed to encode task snapshot"
        )?;
    self
      .storage
      .set_item(&self.storage_key, &json)
      .with_context(|| {
        format!(
          "failed writing {}",
          self.storage_key
        )
      })?;
    debug!(
      bytes = json.len(),
      "saved task snapshot"
    );
    Ok(())
  }

  /// Adds `task` at the end. A failed
  /// write takes the task back out.
  #[tracing::instrument(skip(self, task), fields(id = %task.id))]
  pub fn append(
    &mut self,
    task: Task
  ) -> anyhow::Result<()> {
    self.tasks.push(task);
    if let Err(error) = self.save() {
      self.tasks.pop();
      warn!("append rolled back");
      return Err(error);
    }
    debug!(
      count = self.tasks.len(),
      "appended task"
    );
    Ok(())
  }

  /// Applies `patch` to the task with `id`.
  /// Returns `Ok(false)` without writing
  /// when the id is unknown or nothing
  /// changed. A failed write restores the
  /// previous task.
  #[tracing::instrument(skip_all, fields(id = %id))]
  pub fn update(
    &mut self,
    id: &TaskId,
    patch: &TaskPatch
  ) -> anyhow::Result<bool> {
    let Some(idx) = self
      .tasks
      .iter()
      .position(|t| t.id == *id)
    else {
      debug!("update skipped; unknown id");
      return Ok(false);
    };

    let previous = self.tasks[idx].clone();
    if !patch.apply_to(&mut self.tasks[idx])
    {
      debug!("update changed nothing");
      return Ok(false);
    }

    if let Err(error) = self.save() {
      self.tasks[idx] = previous;
      warn!("update rolled back");
      return Err(error);
    }
    debug!("updated task");
    Ok(true)
  }

  /// Removes the task with `id`. A failed
  /// write puts it back in place.
  #[tracing::instrument(skip_all, fields(id = %id))]
  pub fn remove(
    &mut self,
    id: &TaskId
  ) -> anyhow::Result<bool> {
    let Some(idx) = self
      .tasks
      .iter()
      .position(|t| t.id == *id)
    else {
      debug!("remove skipped; unknown id");
      return Ok(false);
    };

    let removed = self.tasks.remove(idx);
    if let Err(error) = self.save() {
      self.tasks.insert(idx, removed);
      warn!("remove rolled back");
      return Err(error);
    }
    debug!(
      remaining = self.tasks.len(),
      "removed task"
    );
    Ok(true)
  }

  #[tracing::instrument(skip_all, fields(id = %id))]
  pub fn toggle_completed(
    &mut self,
    id: &TaskId
  ) -> anyhow::Result<bool> {
    let Some(completed) =
      self.get(id).map(|t| t.completed)
    else {
      debug!("toggle skipped; unknown id");
      return Ok(false);
    };

    self.update(id, &TaskPatch {
      completed: Some(!completed),
      ..TaskPatch::default()
    })
  }
}

/// Parses a stored snapshot. Later
/// duplicates of an id are dropped so ids
/// stay unique within the list.
pub fn decode_snapshot(
  raw: &str
) -> anyhow::Result<Vec<Task>> {
  let tasks: Vec<Task> =
    serde_json::from_str(raw)
      .context("failed parsing snapshot")?;

  let mut seen = BTreeSet::new();
  let mut out =
    Vec::with_capacity(tasks.len());
  for task in tasks {
    if seen.insert(task.id.clone()) {
      out.push(task);
    } else {
      warn!(
        id = %task.id,
        "dropping duplicate task id from \
         snapshot"
      );
    }
  }
  Ok(out)
}

fn backup_raw_snapshot<S: KeyValueStorage>(
  storage: &S,
  backup_key: &str,
  raw: &str
) {
  match storage.set_item(backup_key, raw) {
    | Ok(()) => {
      info!(
        backup_key,
        bytes = raw.len(),
        "kept malformed snapshot"
      );
    }
    | Err(error) => {
      error!(
        ?error,
        backup_key,
        "failed to back up malformed \
         snapshot"
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use anyhow::anyhow;

  use super::{
    TaskStore,
    decode_snapshot
  };
  use crate::config::{
    CorruptSnapshotPolicy,
    PopupConfig
  };
  use crate::storage::{
    KeyValueStorage,
    MemoryStorage
  };
  use crate::task::{
    Priority,
    Task,
    TaskId,
    TaskPatch
  };

  struct BrokenStorage;

  impl KeyValueStorage for BrokenStorage {
    fn get_item(
      &self,
      _key: &str
    ) -> anyhow::Result<Option<String>> {
      Err(anyhow!("storage disabled"))
    }

    fn set_item(
      &self,
      _key: &str,
      _value: &str
    ) -> anyhow::Result<()> {
      Err(anyhow!("quota exceeded"))
    }
  }

  fn task(text: &str) -> Task {
    Task::new(
      text.to_string(),
      Priority::Medium,
      String::new()
    )
  }

  #[test]
  fn absent_snapshot_starts_empty() {
    let store = TaskStore::load(
      MemoryStorage::new(),
      &PopupConfig::default()
    );
    assert!(store.is_empty());
    assert!(store.storage().is_empty());
  }

  #[test]
  fn unreadable_storage_starts_empty() {
    let store = TaskStore::load(
      BrokenStorage,
      &PopupConfig::default()
    );
    assert!(store.is_empty());
  }

  #[test]
  fn malformed_snapshot_is_backed_up() {
    let storage = MemoryStorage::with_item(
      "todos", "[{not json"
    );
    let store = TaskStore::load(
      &storage,
      &PopupConfig::default()
    );
    assert!(store.is_empty());
    assert_eq!(
      storage
        .get_item("todos.corrupt")
        .expect("read backup")
        .as_deref(),
      Some("[{not json")
    );
  }

  #[test]
  fn malformed_snapshot_without_backup() {
    let storage = MemoryStorage::with_item(
      "todos",
      "{\"id\":1}"
    );
    let config = PopupConfig {
      on_corrupt_snapshot:
        CorruptSnapshotPolicy::Empty,
      ..PopupConfig::default()
    };
    let store =
      TaskStore::load(&storage, &config);
    assert!(store.is_empty());
    assert_eq!(storage.len(), 1);
  }

  #[test]
  fn duplicate_ids_keep_first_occurrence() {
    let tasks = decode_snapshot(
      r#"[
        {"id":"1","text":"a","completed":false,"priority":"low","dueDate":""},
        {"id":"1","text":"b","completed":true,"priority":"high","dueDate":""},
        {"id":"2","text":"c","completed":false,"priority":"medium","dueDate":""}
      ]"#
    )
    .expect("decode snapshot");
    let texts: Vec<&str> = tasks
      .iter()
      .map(|t| t.text.as_str())
      .collect();
    assert_eq!(texts, vec!["a", "c"]);
  }

  #[test]
  fn every_mutation_rewrites_full_snapshot()
  {
    let storage = MemoryStorage::new();
    let mut store = TaskStore::load(
      &storage,
      &PopupConfig::default()
    );

    let first = task("first");
    let first_id = first.id.clone();
    store.append(first).expect("append");
    store
      .append(task("second"))
      .expect("append");

    let stored: Vec<Task> =
      serde_json::from_str(
        &storage
          .get_item("todos")
          .expect("read")
          .expect("snapshot present")
      )
      .expect("decode");
    assert_eq!(stored, store.tasks());

    assert!(
      store
        .toggle_completed(&first_id)
        .expect("toggle")
    );
    let stored: Vec<Task> =
      serde_json::from_str(
        &storage
          .get_item("todos")
          .expect("read")
          .expect("snapshot present")
      )
      .expect("decode");
    assert!(stored[0].completed);
    assert_eq!(stored.len(), 2);
  }

  #[test]
  fn unknown_ids_are_noops() {
    let storage = MemoryStorage::new();
    let mut store = TaskStore::load(
      &storage,
      &PopupConfig::default()
    );
    store.append(task("only")).expect("append");
    let before = storage
      .get_item("todos")
      .expect("read");

    let missing = TaskId::from("missing");
    assert!(
      !store.remove(&missing).expect("remove")
    );
    assert!(
      !store
        .toggle_completed(&missing)
        .expect("toggle")
    );
    assert!(
      !store
        .update(&missing, &TaskPatch {
          text: Some("x".to_string()),
          ..TaskPatch::default()
        })
        .expect("update")
    );

    assert_eq!(store.len(), 1);
    assert_eq!(
      storage.get_item("todos").expect("read"),
      before
    );
  }

  #[test]
  fn failed_append_is_rolled_back() {
    let mut store = TaskStore::load(
      BrokenStorage,
      &PopupConfig::default()
    );
    assert!(store.append(task("x")).is_err());
    assert!(store.is_empty());
  }

  #[test]
  fn failed_update_and_remove_are_rolled_back()
   {
    let mut store = TaskStore::load(
      BrokenStorage,
      &PopupConfig::default()
    );
    let a = task("a");
    let b = task("b");
    let b_id = b.id.clone();
    store.tasks = vec![a, b];
    let before = store.tasks.clone();

    assert!(
      store.toggle_completed(&b_id).is_err()
    );
    assert!(
      store
        .update(&b_id, &TaskPatch {
          text: Some("renamed".to_string()),
          ..TaskPatch::default()
        })
        .is_err()
    );
    assert_eq!(store.tasks(), &before[..]);

    assert!(store.remove(&b_id).is_err());
    assert_eq!(store.tasks(), &before[..]);
  }

  #[test]
  fn remove_preserves_order_of_the_rest() {
    let mut store = TaskStore::load(
      MemoryStorage::new(),
      &PopupConfig::default()
    );
    let a = task("a");
    let b = task("b");
    let c = task("c");
    let b_id = b.id.clone();
    for t in [a, b, c] {
      store.append(t).expect("append");
    }

    assert!(store.remove(&b_id).expect("remove"));
    let texts: Vec<&str> = store
      .tasks()
      .iter()
      .map(|t| t.text.as_str())
      .collect();
    assert_eq!(texts, vec!["a", "c"]);
    assert!(!store.contains(&b_id));
  }
}
