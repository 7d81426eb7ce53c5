use ticklist_core::config::StoragePreference;
use ticklist_core::storage::{
  KeyValueStorage,
  StorageError
};
use ticklist_core::store::StoreError;
use wasm_bindgen::JsValue;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum StorageKind {
  Local,
  Session
}

/// `window.localStorage` or
/// `window.sessionStorage`.
#[derive(Debug, Clone)]
pub struct BrowserStorage {
  kind:  StorageKind,
  inner: web_sys::Storage
}

impl BrowserStorage {
  /// Durable store first, tab-scoped
  /// store second.
  pub fn detect(
    preference: StoragePreference
  ) -> Result<Self, StoreError> {
    let window = web_sys::window()
      .ok_or(
        StoreError::StorageUnavailable
      )?;

    if preference
      == StoragePreference::Auto
      && let Some(inner) = window
        .local_storage()
        .ok()
        .flatten()
    {
      tracing::info!(
        "using localStorage"
      );
      return Ok(Self {
        kind: StorageKind::Local,
        inner
      });
    }

    let inner = window
      .session_storage()
      .ok()
      .flatten()
      .ok_or(
        StoreError::StorageUnavailable
      )?;
    tracing::warn!(
      ?preference,
      "using sessionStorage; tasks \
       last only for this tab"
    );
    Ok(Self {
      kind: StorageKind::Session,
      inner
    })
  }

  pub fn kind(&self) -> StorageKind {
    self.kind
  }
}

fn js_error(
  op: &'static str,
  value: JsValue
) -> StorageError {
  let message = value
    .as_string()
    .unwrap_or_else(|| {
      format!("{value:?}")
    });
  StorageError::new(op, message)
}

impl KeyValueStorage for BrowserStorage {
  fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    self
      .inner
      .get_item(key)
      .map_err(|e| js_error("get", e))
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    self
      .inner
      .set_item(key, value)
      .map_err(|e| js_error("set", e))
  }

  fn remove(
    &mut self,
    key: &str
  ) -> Result<(), StorageError> {
    self
      .inner
      .remove_item(key)
      .map_err(|e| js_error("remove", e))
  }

  fn key(
    &self,
    index: usize
  ) -> Result<Option<String>, StorageError>
  {
    let Ok(index) = u32::try_from(index)
    else {
      return Ok(None);
    };
    self
      .inner
      .key(index)
      .map_err(|e| js_error("key", e))
  }

  fn length(
    &self
  ) -> Result<usize, StorageError> {
    self
      .inner
      .length()
      .map(|len| len as usize)
      .map_err(|e| js_error("length", e))
  }

  fn clear(
    &mut self
  ) -> Result<(), StorageError> {
    self
      .inner
      .clear()
      .map_err(|e| js_error("clear", e))
  }
}
