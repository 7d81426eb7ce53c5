use ticklist_core::view::TaskItem;
use web_sys::MouseEvent;
use yew::{
  AttrValue,
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub list_id:  AttrValue,
  pub title:    AttrValue,
  pub items:    Vec<TaskItem>,
  /// Single listener on the container;
  /// rows carry no handlers of their own.
  #[prop_or_default]
  pub on_click: Option<Callback<MouseEvent>>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <div class="panel list">
          <div class="header">{ props.title.clone() }</div>
          <ul id={props.list_id.clone()} onclick={props.on_click.clone()}>
              {
                  for props.items.iter().cloned().map(|item| html! {
                      <TaskListRow key={item.id.to_string()} item={item} />
                  })
              }
          </ul>
      </div>
  }
}
