use tracing::{
  debug,
  info,
  warn
};

use crate::filter::SearchFilter;
use crate::storage::KeyValueStorage;
use crate::store::{
  StoreError,
  TaskStore
};
use crate::task::{
  Task,
  TaskId,
  TaskState
};
use crate::view::{
  ERROR_CLASS,
  TaskItem,
  TaskLists,
  Visibility,
  render_lists
};

/// Legacy `keyCode` for Enter.
pub const ENTER_KEY_CODE: u32 = 13;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum AddOutcome {
  Added(TaskId),
  /// Draft was empty; the input is
  /// flagged and nothing is stored.
  EmptyText
}

/// The element a click on the incomplete
/// list landed on, as seen by the single
/// listener on the list container.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ClickTarget {
  pub node_name: String,
  pub parent_id: Option<String>
}

impl ClickTarget {
  pub fn new(
    node_name: impl Into<String>,
    parent_id: Option<String>
  ) -> Self {
    Self {
      node_name: node_name.into(),
      parent_id
    }
  }

  fn is_checkbox(&self) -> bool {
    self
      .node_name
      .eq_ignore_ascii_case("input")
  }

  fn task_id(&self) -> Option<TaskId> {
    self
      .parent_id
      .as_deref()
      .and_then(|raw| raw.parse().ok())
  }
}

#[derive(Debug)]
pub struct Controller<S> {
  store:       TaskStore<S>,
  lists:       TaskLists,
  draft:       String,
  input_error: bool,
  search:      SearchFilter
}

impl<S: KeyValueStorage> Controller<S> {
  pub fn new(store: TaskStore<S>) -> Self {
    Self {
      store,
      lists: TaskLists::default(),
      draft: String::new(),
      input_error: false,
      search: SearchFilter::default()
    }
  }

  pub fn store(&self) -> &TaskStore<S> {
    &self.store
  }

  pub fn lists(&self) -> &TaskLists {
    &self.lists
  }

  pub fn draft(&self) -> &str {
    &self.draft
  }

  pub fn set_draft(
    &mut self,
    text: impl Into<String>
  ) {
    self.draft = text.into();
  }

  pub fn input_class(
    &self
  ) -> &'static str {
    if self.input_error {
      ERROR_CLASS
    } else {
      ""
    }
  }

  /// Replaces both lists with what the
  /// store currently holds.
  #[tracing::instrument(skip(self))]
  pub fn load_from_storage(
    &mut self
  ) -> Result<(), StoreError> {
    let snapshot =
      self.store.load_tasks()?;
    self.lists = render_lists(&snapshot);
    self.apply_search();
    let incomplete =
      self.lists.incomplete.len();
    let completed =
      self.lists.completed.len();
    info!(
      incomplete,
      completed,
      "loaded task lists"
    );
    Ok(())
  }

  #[tracing::instrument(skip(self))]
  pub fn add_task(
    &mut self
  ) -> Result<AddOutcome, StoreError> {
    self.input_error = false;
    if self.draft.is_empty() {
      debug!("rejecting empty task text");
      self.input_error = true;
      return Ok(AddOutcome::EmptyText);
    }

    let text =
      std::mem::take(&mut self.draft);
    let id = match self.store.add_task(&text)
    {
      | Ok(id) => id,
      | Err(error) => {
        self.draft = text;
        return Err(error);
      }
    };
    let item = TaskItem::from_task(
      &Task::new_incomplete(id, text)
    );
    self
      .lists
      .list_for(TaskState::Incomplete)
      .push(item);
    Ok(AddOutcome::Added(id))
  }

  /// Key-up on the task input. Only Enter
  /// adds.
  pub fn key_up(
    &mut self,
    key_code: u32
  ) -> Result<Option<AddOutcome>, StoreError>
  {
    if key_code != ENTER_KEY_CODE {
      return Ok(None);
    }
    self.add_task().map(Some)
  }

  /// Delegated click on the incomplete
  /// list. Clicks that did not land on a
  /// checkbox of a known item are
  /// ignored.
  #[tracing::instrument(skip(self))]
  pub fn click_incomplete(
    &mut self,
    target: &ClickTarget
  ) -> Result<Option<TaskId>, StoreError>
  {
    if !target.is_checkbox() {
      return Ok(None);
    }
    let Some(id) = target.task_id() else {
      warn!(
        parent_id = ?target.parent_id,
        "checkbox click outside a task item"
      );
      return Ok(None);
    };
    let Some(index) = self
      .lists
      .incomplete
      .iter()
      .position(|item| item.id == id)
    else {
      warn!(
        %id,
        "clicked task is not in the \
         incomplete list"
      );
      return Ok(None);
    };

    let text = self.lists.incomplete[index]
      .text
      .clone();
    self.store.complete_task(id, &text)?;

    let mut item =
      self.lists.incomplete.remove(index);
    item.mark_completed();
    item.visibility =
      self.visibility_for(&item.text);
    self.lists.completed.push(item);
    Ok(Some(id))
  }

  /// Show every completed item, then hide
  /// those that do not contain `query`.
  pub fn filter_completed(
    &mut self,
    query: &str
  ) {
    self.search = SearchFilter::parse(query);
    self.apply_search();
    let visible = self
      .lists
      .visible_completed()
      .count();
    debug!(
      query,
      visible,
      "filtered completed tasks"
    );
  }

  pub fn search_is_active(&self) -> bool {
    !self.search.is_empty()
  }

  fn apply_search(&mut self) {
    for item in &mut self.lists.completed {
      item.visibility = Visibility::Shown;
    }
    if self.search.is_empty() {
      return;
    }
    for item in &mut self.lists.completed {
      if !self.search.matches(&item.text) {
        item.visibility = Visibility::Hidden;
      }
    }
  }

  fn visibility_for(
    &self,
    text: &str
  ) -> Visibility {
    if self.search.matches(text) {
      Visibility::Shown
    } else {
      Visibility::Hidden
    }
  }
}
