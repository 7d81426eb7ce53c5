mod storage;

use std::cell::RefCell;
use std::rc::Rc;

pub use storage::BrowserStorage;
use ticklist_core::view::TaskLists;
use ticklist_core::{
  AddOutcome,
  ClickTarget,
  Controller,
  StoreError
};
use web_sys::{
  Element,
  HtmlInputElement,
  InputEvent,
  KeyboardEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

use crate::components::TaskList;

pub type SharedController =
  Rc<RefCell<Controller<BrowserStorage>>>;

#[derive(Properties)]
pub struct AppProps {
  pub controller: SharedController
}

impl PartialEq for AppProps {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(
      &self.controller,
      &other.controller
    )
  }
}

#[derive(Clone, PartialEq)]
struct ViewState {
  lists:       TaskLists,
  draft:       String,
  input_class: &'static str
}

impl ViewState {
  fn capture(
    controller: &Controller<BrowserStorage>
  ) -> Self {
    Self {
      lists:       controller
        .lists()
        .clone(),
      draft:       controller
        .draft()
        .to_string(),
      input_class: controller.input_class()
    }
  }
}

fn report_add(
  result: Result<AddOutcome, StoreError>
) {
  match result {
    | Ok(AddOutcome::Added(id)) => {
      tracing::info!(%id, "task added");
    }
    | Ok(AddOutcome::EmptyText) => {}
    | Err(error) => {
      tracing::error!(
        %error,
        "failed to store new task"
      );
    }
  }
}

fn click_target(
  event: &MouseEvent
) -> Option<ClickTarget> {
  let element: Element =
    event.target_dyn_into()?;
  let parent_id = element
    .parent_element()
    .map(|parent| parent.id())
    .filter(|id| !id.is_empty());
  Some(ClickTarget::new(
    element.node_name(),
    parent_id
  ))
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
  let view = {
    let controller =
      props.controller.clone();
    use_state(move || {
      ViewState::capture(
        &controller.borrow()
      )
    })
  };

  let on_task_input = {
    let controller =
      props.controller.clone();
    let view = view.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        let mut ctl =
          controller.borrow_mut();
        ctl.set_draft(input.value());
        view.set(ViewState::capture(&ctl));
      }
    )
  };

  let on_submit = {
    let controller =
      props.controller.clone();
    let view = view.clone();
    Callback::from(
      move |_: MouseEvent| {
        let mut ctl =
          controller.borrow_mut();
        report_add(ctl.add_task());
        view.set(ViewState::capture(&ctl));
      }
    )
  };

  let on_task_key_up = {
    let controller =
      props.controller.clone();
    let view = view.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        e.prevent_default();
        let mut ctl =
          controller.borrow_mut();
        match ctl.key_up(e.key_code()) {
          | Ok(Some(outcome)) => {
            report_add(Ok(outcome));
          }
          | Ok(None) => return,
          | Err(error) => {
            report_add(Err(error));
          }
        }
        view.set(ViewState::capture(&ctl));
      }
    )
  };

  let on_todo_click = {
    let controller =
      props.controller.clone();
    let view = view.clone();
    Callback::from(
      move |e: MouseEvent| {
        let Some(target) = click_target(&e)
        else {
          return;
        };
        let mut ctl =
          controller.borrow_mut();
        match ctl.click_incomplete(&target) {
          | Ok(Some(id)) => {
            e.prevent_default();
            tracing::info!(%id, "task completed");
          }
          | Ok(None) => return,
          | Err(error) => {
            e.prevent_default();
            tracing::error!(
              %error,
              "failed to store task completion"
            );
          }
        }
        view.set(ViewState::capture(&ctl));
      }
    )
  };

  let on_search_input = {
    let controller =
      props.controller.clone();
    let view = view.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        let mut ctl =
          controller.borrow_mut();
        ctl.filter_completed(&input.value());
        view.set(ViewState::capture(&ctl));
      }
    )
  };

  html! {
      <div class="ticklist">
          <div class="new-task">
              <input
                  id="taskInput"
                  type="text"
                  placeholder="New task"
                  class={view.input_class}
                  value={view.draft.clone()}
                  oninput={on_task_input}
                  onkeyup={on_task_key_up}
              />
              <button id="submitButton" onclick={on_submit}>{ "Add" }</button>
          </div>
          <TaskList
              list_id="todoList"
              title="To do"
              items={view.lists.incomplete.clone()}
              on_click={on_todo_click}
          />
          <input
              id="searchInput"
              type="text"
              placeholder="Search completed"
              oninput={on_search_input}
          />
          <TaskList
              list_id="completedList"
              title="Completed"
              items={view.lists.completed.clone()}
          />
      </div>
  }
}
