//! Key/value storage seam. Mirrors the
//! browser `Storage` interface so the
//! task store can run against
//! `localStorage`, `sessionStorage` or
//! an in-memory map.

use thiserror::Error;

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
#[error("storage {op} failed: {message}")]
pub struct StorageError {
  pub op:      &'static str,
  pub message: String
}

impl StorageError {
  pub fn new(
    op: &'static str,
    message: impl Into<String>
  ) -> Self {
    Self {
      op,
      message: message.into()
    }
  }
}

pub trait KeyValueStorage {
  fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>;

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError>;

  fn remove(
    &mut self,
    key: &str
  ) -> Result<(), StorageError>;

  /// Key at a positional index. The
  /// order is backend defined.
  fn key(
    &self,
    index: usize
  ) -> Result<Option<String>, StorageError>;

  fn length(
    &self
  ) -> Result<usize, StorageError>;

  fn clear(
    &mut self
  ) -> Result<(), StorageError>;
}

/// Insertion-ordered in-memory backend.
/// Overwriting a key keeps its
/// position; removing it shifts later
/// keys down, like the browser stores.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  entries: Vec<(String, String)>
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  fn position(
    &self,
    key: &str
  ) -> Option<usize> {
    self
      .entries
      .iter()
      .position(|(k, _)| k == key)
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    Ok(self.position(key).map(|idx| {
      self.entries[idx].1.clone()
    }))
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    match self.position(key) {
      | Some(idx) => {
        self.entries[idx].1 =
          value.to_string();
      }
      | None => {
        self.entries.push((
          key.to_string(),
          value.to_string()
        ));
      }
    }
    Ok(())
  }

  fn remove(
    &mut self,
    key: &str
  ) -> Result<(), StorageError> {
    if let Some(idx) = self.position(key)
    {
      self.entries.remove(idx);
    }
    Ok(())
  }

  fn key(
    &self,
    index: usize
  ) -> Result<Option<String>, StorageError>
  {
    Ok(
      self
        .entries
        .get(index)
        .map(|(k, _)| k.clone())
    )
  }

  fn length(
    &self
  ) -> Result<usize, StorageError> {
    Ok(self.entries.len())
  }

  fn clear(
    &mut self
  ) -> Result<(), StorageError> {
    self.entries.clear();
    Ok(())
  }
}

/// Memory backend whose `set` fails for
/// keys ending in a given suffix.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct FailingSetStorage {
  pub inner:       MemoryStorage,
  pub fail_suffix: &'static str
}

#[cfg(test)]
impl FailingSetStorage {
  pub fn new(
    fail_suffix: &'static str
  ) -> Self {
    Self {
      inner: MemoryStorage::new(),
      fail_suffix
    }
  }
}

#[cfg(test)]
impl KeyValueStorage for FailingSetStorage {
  fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    self.inner.get(key)
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    if key.ends_with(self.fail_suffix) {
      return Err(StorageError::new(
        "set",
        "QuotaExceededError"
      ));
    }
    self.inner.set(key, value)
  }

  fn remove(
    &mut self,
    key: &str
  ) -> Result<(), StorageError> {
    self.inner.remove(key)
  }

  fn key(
    &self,
    index: usize
  ) -> Result<Option<String>, StorageError>
  {
    self.inner.key(index)
  }

  fn length(
    &self
  ) -> Result<usize, StorageError> {
    self.inner.length()
  }

  fn clear(
    &mut self
  ) -> Result<(), StorageError> {
    self.inner.clear()
  }
}
