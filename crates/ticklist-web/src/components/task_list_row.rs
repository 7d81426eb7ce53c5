use ticklist_core::view::TaskItem;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub item: TaskItem
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let item = &props.item;

  html! {
      <li id={item.id.to_string()} class={item.class_name()}>
          <input
              type="checkbox"
              checked={item.checked}
              class={classes!(item.checkbox_class())}
          />
          <label>{ &item.text }</label>
      </li>
  }
}
