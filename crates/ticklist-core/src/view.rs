//! Rendered list contents, derived from
//! task records alone.

use crate::store::TaskSnapshot;
use crate::task::{
  Task,
  TaskId,
  TaskState
};

pub const TASK_CLASS: &str = "task";
pub const HIDDEN_CLASS: &str = "hidden";
pub const ERROR_CLASS: &str = "err";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Visibility {
  Shown,
  Hidden
}

impl Visibility {
  pub fn class_name(
    self
  ) -> &'static str {
    match self {
      | Visibility::Shown => TASK_CLASS,
      | Visibility::Hidden => HIDDEN_CLASS
    }
  }
}

/// One `li`: a checkbox followed by a
/// label.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskItem {
  pub id:         TaskId,
  pub text:       String,
  pub checked:    bool,
  pub visibility: Visibility
}

impl TaskItem {
  pub fn from_task(task: &Task) -> Self {
    Self {
      id:         task.id,
      text:       task.text.clone(),
      checked:    task.is_completed(),
      visibility: Visibility::Shown
    }
  }

  pub fn class_name(
    &self
  ) -> &'static str {
    self.visibility.class_name()
  }

  /// Completed items keep their checkbox
  /// ticked but out of sight.
  pub fn checkbox_class(
    &self
  ) -> Option<&'static str> {
    self.checked.then_some(HIDDEN_CLASS)
  }

  pub fn is_visible(&self) -> bool {
    self.visibility == Visibility::Shown
  }

  pub fn mark_completed(&mut self) {
    self.checked = true;
  }
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskLists {
  pub incomplete: Vec<TaskItem>,
  pub completed:  Vec<TaskItem>
}

impl TaskLists {
  pub fn list_for(
    &mut self,
    state: TaskState
  ) -> &mut Vec<TaskItem> {
    match state {
      | TaskState::Incomplete => {
        &mut self.incomplete
      }
      | TaskState::Complete => {
        &mut self.completed
      }
    }
  }

  pub fn visible_completed(
    &self
  ) -> impl Iterator<Item = &TaskItem> {
    self
      .completed
      .iter()
      .filter(|item| item.is_visible())
  }
}

pub fn render_lists(
  snapshot: &TaskSnapshot
) -> TaskLists {
  TaskLists {
    incomplete: snapshot
      .incomplete
      .iter()
      .map(TaskItem::from_task)
      .collect(),
    completed:  snapshot
      .complete
      .iter()
      .map(TaskItem::from_task)
      .collect()
  }
}
