use std::rc::Rc;

use anyhow::anyhow;
use tasklist_core::{
  KeyValueStorage,
  MemoryStorage
};

/// Storage behind the popup: the
/// extension's `localStorage`, or an
/// in-memory map when the browser refuses
/// access (private windows, disabled
/// storage).
#[derive(Debug, Clone)]
pub enum PopupStorage {
  Browser(web_sys::Storage),
  Memory(Rc<MemoryStorage>)
}

impl PopupStorage {
  pub fn open() -> Self {
    match web_sys::window().and_then(
      |window| {
        window
          .local_storage()
          .ok()
          .flatten()
      }
    ) {
      | Some(storage) => {
        Self::Browser(storage)
      }
      | None => {
        tracing::warn!(
          "localStorage unavailable; \
           tasks will not survive the \
           popup closing"
        );
        Self::Memory(Rc::new(
          MemoryStorage::new()
        ))
      }
    }
  }
}

impl KeyValueStorage for PopupStorage {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    match self {
      | Self::Browser(storage) => storage
        .get_item(key)
        .map_err(|error| {
          anyhow!(
            "localStorage read failed: \
             {error:?}"
          )
        }),
      | Self::Memory(storage) => {
        storage.get_item(key)
      }
    }
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    match self {
      | Self::Browser(storage) => storage
        .set_item(key, value)
        .map_err(|error| {
          anyhow!(
            "localStorage write failed: \
             {error:?}"
          )
        }),
      | Self::Memory(storage) => {
        storage.set_item(key, value)
      }
    }
  }
}
