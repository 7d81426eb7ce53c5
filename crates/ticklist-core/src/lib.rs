//! Task list core: storage-backed task
//! store and the UI state machine that
//! drives it.

pub mod config;
pub mod controller;
pub mod filter;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use controller::{
  AddOutcome,
  ClickTarget,
  Controller
};
pub use storage::{
  KeyValueStorage,
  MemoryStorage,
  StorageError
};
pub use store::{
  StoreError,
  TaskStore
};
pub use task::{
  Task,
  TaskId,
  TaskState
};
