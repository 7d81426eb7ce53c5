use std::fmt;
use std::str::FromStr;

/// Storage key holding the last issued
/// task id.
pub const ID_COUNTER_KEY: &str =
  "idCounter";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for TaskId {
  type Err = std::num::ParseIntError;

  fn from_str(
    raw: &str
  ) -> Result<Self, Self::Err> {
    raw.parse::<u64>().map(TaskId)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
)]
pub enum TaskState {
  Incomplete,
  Complete
}

impl TaskState {
  pub fn key_suffix(
    self
  ) -> &'static str {
    match self {
      | TaskState::Incomplete => {
        "incomplete"
      }
      | TaskState::Complete => {
        "complete"
      }
    }
  }
}

/// A parsed `<id>-incomplete` or
/// `<id>-complete` storage key.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
)]
pub struct TaskKey {
  pub id:    TaskId,
  pub state: TaskState
}

impl TaskKey {
  pub fn new(
    id: TaskId,
    state: TaskState
  ) -> Self {
    Self { id, state }
  }

  pub fn incomplete(
    id: TaskId
  ) -> Self {
    Self::new(
      id,
      TaskState::Incomplete
    )
  }

  pub fn complete(id: TaskId) -> Self {
    Self::new(id, TaskState::Complete)
  }

  /// Returns `None` for the counter key
  /// and for anything else sharing the
  /// origin's storage.
  pub fn parse(
    key: &str
  ) -> Option<Self> {
    let (raw_id, suffix) =
      key.split_once('-')?;
    if raw_id.is_empty()
      || !raw_id
        .bytes()
        .all(|b| b.is_ascii_digit())
    {
      return None;
    }
    let state = match suffix {
      | "incomplete" => {
        TaskState::Incomplete
      }
      | "complete" => {
        TaskState::Complete
      }
      | _ => return None
    };
    let id = raw_id.parse().ok()?;
    Some(Self { id, state })
  }
}

impl fmt::Display for TaskKey {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "{}-{}",
      self.id,
      self.state.key_suffix()
    )
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct Task {
  pub id:    TaskId,
  pub text:  String,
  pub state: TaskState
}

impl Task {
  pub fn new_incomplete(
    id: TaskId,
    text: String
  ) -> Self {
    Self {
      id,
      text,
      state: TaskState::Incomplete
    }
  }

  pub fn is_completed(&self) -> bool {
    self.state == TaskState::Complete
  }
}

/// Raw `{key, value}` pair as read back
/// from storage.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct StoredEntry {
  pub key:   String,
  pub value: String
}

impl StoredEntry {
  pub fn to_task(
    &self
  ) -> Option<Task> {
    let key = TaskKey::parse(&self.key)?;
    Some(Task {
      id:    key.id,
      text:  self.value.clone(),
      state: key.state
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn task_key_formats_with_suffix() {
    assert_eq!(
      TaskKey::incomplete(TaskId(7))
        .to_string(),
      "7-incomplete"
    );
    assert_eq!(
      TaskKey::complete(TaskId(12))
        .to_string(),
      "12-complete"
    );
  }

  #[test]
  fn task_key_parse_distinguishes_suffixes(
  ) {
    assert_eq!(
      TaskKey::parse("3-incomplete"),
      Some(TaskKey::incomplete(TaskId(
        3
      )))
    );
    assert_eq!(
      TaskKey::parse("3-complete"),
      Some(TaskKey::complete(TaskId(3)))
    );
  }

  #[test]
  fn task_key_parse_rejects_foreign_keys(
  ) {
    for key in [
      ID_COUNTER_KEY,
      "theme",
      "-complete",
      "abc-complete",
      "4-completed",
      "4-incomplete-x",
      "4"
    ] {
      assert_eq!(
        TaskKey::parse(key),
        None,
        "{key} should not parse"
      );
    }
  }

  #[test]
  fn stored_entry_converts_to_task() {
    let entry = StoredEntry {
      key:   "9-complete".to_string(),
      value: "Buy milk".to_string()
    };
    let task = entry
      .to_task()
      .expect("task entry");
    assert_eq!(task.id, TaskId(9));
    assert_eq!(task.text, "Buy milk");
    assert!(task.is_completed());
  }
}
