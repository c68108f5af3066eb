use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Synchronous string key-value storage
/// scoped to the extension.
///
/// Receivers are `&self` because the
/// browser's Web Storage is shared and
/// interior-mutable.
pub trait KeyValueStorage {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

impl<S: KeyValueStorage + ?Sized>
  KeyValueStorage for &S
{
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    (**self).get_item(key)
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    (**self).set_item(key, value)
  }
}

impl<S: KeyValueStorage + ?Sized>
  KeyValueStorage for Rc<S>
{
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    (**self).get_item(key)
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    (**self).set_item(key, value)
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  items: RefCell<BTreeMap<String, String>>
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_item(
    key: &str,
    value: &str
  ) -> Self {
    let storage = Self::new();
    storage.items.borrow_mut().insert(
      key.to_string(),
      value.to_string()
    );
    storage
  }

  pub fn len(&self) -> usize {
    self.items.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.borrow().is_empty()
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.items.borrow().get(key).cloned())
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self.items.borrow_mut().insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }
}
