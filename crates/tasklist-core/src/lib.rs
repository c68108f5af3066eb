//! State and persistence for the task
//! list popup.
//!
//! Everything here is host independent:
//! the browser's storage is reached only
//! through [`storage::KeyValueStorage`].

pub mod config;
pub mod editor;
pub mod filter;
pub mod render;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use config::PopupConfig;
pub use editor::{
  CommitOutcome,
  EditorMode
};
pub use filter::{
  PriorityFilter,
  StatusFilter,
  TaskFilter
};
pub use storage::{
  KeyValueStorage,
  MemoryStorage
};
pub use task::{
  Priority,
  Task,
  TaskId
};
pub use view::TaskListView;
