use thiserror::Error;
use tracing::{
  debug,
  info,
  warn
};

use crate::storage::{
  KeyValueStorage,
  StorageError
};
use crate::task::{
  ID_COUNTER_KEY,
  StoredEntry,
  Task,
  TaskId,
  TaskKey,
  TaskState
};

#[derive(Debug, Error)]
pub enum StoreError {
  #[error(
    "no key/value storage is available \
     (durable and volatile stores are \
     both missing)"
  )]
  StorageUnavailable,
  #[error(transparent)]
  Backend(#[from] StorageError),
  #[error(
    "id counter holds an unusable \
     value: {value:?}"
  )]
  CorruptCounter { value: String }
}

/// Both task lists as read from
/// storage, in backend enumeration
/// order.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct StoredTasks {
  pub incomplete: Vec<StoredEntry>,
  pub complete:   Vec<StoredEntry>
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskSnapshot {
  pub incomplete: Vec<Task>,
  pub complete:   Vec<Task>
}

#[derive(Debug)]
pub struct TaskStore<S> {
  storage: S
}

impl<S: KeyValueStorage> TaskStore<S> {
  #[tracing::instrument(skip(storage))]
  pub fn initialize(
    mut storage: S
  ) -> Result<Self, StoreError> {
    if storage
      .get(ID_COUNTER_KEY)?
      .is_none()
    {
      info!(
        "no id counter found; \
         starting at 0"
      );
      storage.set(ID_COUNTER_KEY, "0")?;
    }
    Ok(Self { storage })
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  /// Last id handed out; 0 before the
  /// first task.
  pub fn last_id(
    &self
  ) -> Result<u64, StoreError> {
    let raw = self
      .storage
      .get(ID_COUNTER_KEY)?
      .unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Ok(0);
    }
    trimmed.parse::<u64>().map_err(|_| {
      StoreError::CorruptCounter {
        value: raw.clone()
      }
    })
  }

  #[tracing::instrument(skip(self))]
  pub fn load_all(
    &self
  ) -> Result<StoredTasks, StoreError>
  {
    let mut out = StoredTasks::default();
    let len = self.storage.length()?;
    for index in 0..len {
      let Some(key) =
        self.storage.key(index)?
      else {
        continue;
      };
      if key == ID_COUNTER_KEY {
        continue;
      }
      let Some(parsed) =
        TaskKey::parse(&key)
      else {
        debug!(%key, "skipping non-task key");
        continue;
      };
      let Some(value) =
        self.storage.get(&key)?
      else {
        continue;
      };
      let entry = StoredEntry { key, value };
      match parsed.state {
        | TaskState::Incomplete => {
          out.incomplete.push(entry)
        }
        | TaskState::Complete => {
          out.complete.push(entry)
        }
      }
    }

    debug!(
      incomplete = out.incomplete.len(),
      complete = out.complete.len(),
      "loaded tasks from storage"
    );
    Ok(out)
  }

  /// `load_all` parsed into tasks, each
  /// list ordered by id.
  pub fn load_tasks(
    &self
  ) -> Result<TaskSnapshot, StoreError>
  {
    let stored = self.load_all()?;
    let mut incomplete: Vec<Task> =
      stored
        .incomplete
        .iter()
        .filter_map(StoredEntry::to_task)
        .collect();
    let mut complete: Vec<Task> = stored
      .complete
      .iter()
      .filter_map(StoredEntry::to_task)
      .collect();
    incomplete.sort_by_key(|t| t.id);
    complete.sort_by_key(|t| t.id);
    Ok(TaskSnapshot {
      incomplete,
      complete
    })
  }

  #[tracing::instrument(skip(self, text))]
  pub fn add_task(
    &mut self,
    text: &str
  ) -> Result<TaskId, StoreError> {
    let last = self.last_id()?;
    let id = last
      .checked_add(1)
      .map(TaskId)
      .ok_or_else(|| {
        StoreError::CorruptCounter {
          value: last.to_string()
        }
      })?;
    self.storage.set(
      ID_COUNTER_KEY,
      &id.to_string()
    )?;
    self.storage.set(
      &TaskKey::incomplete(id)
        .to_string(),
      text
    )?;
    debug!(%id, "added task");
    Ok(id)
  }

  /// Remove-then-insert. A failure
  /// after the remove leaves the task in
  /// neither list.
  #[tracing::instrument(skip(self, text))]
  pub fn complete_task(
    &mut self,
    id: TaskId,
    text: &str
  ) -> Result<(), StoreError> {
    self.storage.remove(
      &TaskKey::incomplete(id)
        .to_string()
    )?;
    if let Err(error) = self.storage.set(
      &TaskKey::complete(id).to_string(),
      text
    ) {
      warn!(
        %id,
        %error,
        "task removed from incomplete \
         list but not written as complete"
      );
      return Err(error.into());
    }
    debug!(%id, "completed task");
    Ok(())
  }

  #[tracing::instrument(skip(self))]
  pub fn clear_all(
    &mut self
  ) -> Result<(), StoreError> {
    self.storage.clear()?;
    self.storage.set(ID_COUNTER_KEY, "0")?;
    info!("cleared task storage");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::{
    FailingSetStorage,
    MemoryStorage
  };

  fn store() -> TaskStore<MemoryStorage> {
    TaskStore::initialize(
      MemoryStorage::new()
    )
    .expect("initialize store")
  }

  #[test]
  fn initialize_sets_counter_once() {
    let mut storage =
      MemoryStorage::new();
    storage
      .set(ID_COUNTER_KEY, "5")
      .expect("seed counter");
    let seeded =
      TaskStore::initialize(storage)
        .expect("initialize");
    assert_eq!(
      seeded.last_id().expect("counter"),
      5
    );

    let fresh = store();
    assert_eq!(
      fresh
        .storage()
        .get(ID_COUNTER_KEY)
        .expect("get counter"),
      Some("0".to_string())
    );
  }

  #[test]
  fn add_task_issues_increasing_ids() {
    let mut store = store();
    let first = store
      .add_task("Alpha")
      .expect("add alpha");
    let second = store
      .add_task("Beta")
      .expect("add beta");

    assert_eq!(first, TaskId(1));
    assert_eq!(second, TaskId(2));
    assert_eq!(
      store
        .storage()
        .get("2-incomplete")
        .expect("get beta"),
      Some("Beta".to_string())
    );
    assert_eq!(
      store.last_id().expect("counter"),
      2
    );
  }

  #[test]
  fn ids_are_not_reused_after_completion(
  ) {
    let mut store = store();
    let first = store
      .add_task("Alpha")
      .expect("add alpha");
    store
      .complete_task(first, "Alpha")
      .expect("complete alpha");
    let second = store
      .add_task("Beta")
      .expect("add beta");
    assert!(second > first);
  }

  #[test]
  fn complete_task_moves_entry() {
    let mut store = store();
    let id = store
      .add_task("Buy milk")
      .expect("add");
    store
      .complete_task(id, "Buy milk")
      .expect("complete");

    let storage = store.storage();
    assert_eq!(
      storage
        .get("1-incomplete")
        .expect("get incomplete"),
      None
    );
    assert_eq!(
      storage
        .get("1-complete")
        .expect("get complete"),
      Some("Buy milk".to_string())
    );
  }

  #[test]
  fn completing_twice_leaves_other_tasks_alone(
  ) {
    let mut store = store();
    let alpha = store
      .add_task("Alpha")
      .expect("add alpha");
    let beta = store
      .add_task("Beta")
      .expect("add beta");
    store
      .complete_task(alpha, "Alpha")
      .expect("complete alpha");
    store
      .complete_task(alpha, "Alpha")
      .expect("complete alpha again");

    let snapshot =
      store.load_tasks().expect("load");
    assert_eq!(snapshot.complete.len(), 1);
    assert_eq!(
      snapshot.incomplete,
      vec![Task::new_incomplete(
        beta,
        "Beta".to_string()
      )]
    );
  }

  #[test]
  fn load_all_partitions_and_skips_foreign_keys(
  ) {
    let mut storage =
      MemoryStorage::new();
    storage
      .set("theme", "night")
      .expect("foreign key");
    let mut store =
      TaskStore::initialize(storage)
        .expect("initialize");
    let alpha = store
      .add_task("Alpha")
      .expect("add alpha");
    store
      .add_task("Beta")
      .expect("add beta");
    store
      .complete_task(alpha, "Alpha")
      .expect("complete alpha");

    let stored =
      store.load_all().expect("load all");
    assert_eq!(
      stored.incomplete,
      vec![StoredEntry {
        key:   "2-incomplete".to_string(),
        value: "Beta".to_string()
      }]
    );
    assert_eq!(
      stored.complete,
      vec![StoredEntry {
        key:   "1-complete".to_string(),
        value: "Alpha".to_string()
      }]
    );
  }

  #[test]
  fn load_tasks_orders_by_id() {
    let mut storage =
      MemoryStorage::new();
    storage
      .set(ID_COUNTER_KEY, "10")
      .expect("counter");
    storage
      .set("10-complete", "ten")
      .expect("ten");
    storage
      .set("2-complete", "two")
      .expect("two");
    let store =
      TaskStore::initialize(storage)
        .expect("initialize");

    let ids: Vec<TaskId> = store
      .load_tasks()
      .expect("load")
      .complete
      .iter()
      .map(|t| t.id)
      .collect();
    assert_eq!(
      ids,
      vec![TaskId(2), TaskId(10)]
    );
  }

  #[test]
  fn clear_all_resets_counter() {
    let mut store = store();
    store.add_task("Alpha").expect("add");
    store.clear_all().expect("clear");

    assert_eq!(
      store.last_id().expect("counter"),
      0
    );
    assert_eq!(
      store
        .storage()
        .length()
        .expect("length"),
      1
    );
    assert_eq!(
      store
        .add_task("Beta")
        .expect("add after clear"),
      TaskId(1)
    );
  }

  #[test]
  fn corrupt_counter_is_reported() {
    let mut storage =
      MemoryStorage::new();
    storage
      .set(ID_COUNTER_KEY, "many")
      .expect("seed");
    let mut store =
      TaskStore::initialize(storage)
        .expect("initialize");
    let err = store
      .add_task("Alpha")
      .expect_err("corrupt counter");
    assert!(matches!(
      err,
      StoreError::CorruptCounter { .. }
    ));
  }

  #[test]
  fn counter_at_u64_max_is_not_wrapped() {
    let mut storage =
      MemoryStorage::new();
    storage
      .set(
        ID_COUNTER_KEY,
        &u64::MAX.to_string()
      )
      .expect("seed");
    let mut store =
      TaskStore::initialize(storage)
        .expect("initialize");

    let err = store
      .add_task("Alpha")
      .expect_err("counter overflow");
    assert!(matches!(
      err,
      StoreError::CorruptCounter { .. }
    ));
    assert_eq!(
      store.last_id().expect("counter"),
      u64::MAX
    );
    assert_eq!(
      store
        .storage()
        .length()
        .expect("length"),
      1
    );
  }

  #[test]
  fn failed_complete_write_loses_the_task(
  ) {
    let mut store = TaskStore::initialize(
      FailingSetStorage::new("-complete")
    )
    .expect("initialize");
    let id = store
      .add_task("Buy milk")
      .expect("add");

    let err = store
      .complete_task(id, "Buy milk")
      .expect_err("complete write fails");
    assert!(matches!(
      err,
      StoreError::Backend(_)
    ));

    // remove-then-insert: the entry is
    // gone from both lists
    let storage = store.storage();
    assert_eq!(
      storage
        .get("1-incomplete")
        .expect("get incomplete"),
      None
    );
    assert_eq!(
      storage
        .get("1-complete")
        .expect("get complete"),
      None
    );
    let snapshot =
      store.load_tasks().expect("load");
    assert!(snapshot.incomplete.is_empty());
    assert!(snapshot.complete.is_empty());
  }

  #[test]
  fn failed_entry_write_consumes_the_id()
  {
    let mut store = TaskStore::initialize(
      FailingSetStorage::new(
        "-incomplete"
      )
    )
    .expect("initialize");

    store
      .add_task("Alpha")
      .expect_err("entry write fails");

    // the counter write landed first, so
    // id 1 is spent and never reissued
    assert_eq!(
      store.last_id().expect("counter"),
      1
    );
    assert!(
      store
        .load_all()
        .expect("load all")
        .incomplete
        .is_empty()
    );
  }

  #[test]
  fn failed_counter_write_stores_nothing(
  ) {
    let mut storage =
      FailingSetStorage::new(
        ID_COUNTER_KEY
      );
    storage
      .inner
      .set(ID_COUNTER_KEY, "0")
      .expect("seed counter");
    let mut store =
      TaskStore::initialize(storage)
        .expect("initialize");

    store
      .add_task("Alpha")
      .expect_err("counter write fails");
    assert_eq!(
      store.last_id().expect("counter"),
      0
    );
    assert_eq!(
      store
        .storage()
        .length()
        .expect("length"),
      1
    );
  }
}
