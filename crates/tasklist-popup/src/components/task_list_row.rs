use tasklist_core::TaskId;
use tasklist_core::render::RowModel;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:       RowModel,
  pub editing:   bool,
  pub on_toggle: Callback<TaskId>,
  pub on_edit:   Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let row = &props.row;
  let mut class = row.row_class();
  if props.editing {
    class.push_str(" editing");
  }

  let on_toggle = {
    let on_toggle =
      props.on_toggle.clone();
    let id = row.id.clone();
    move |_: web_sys::Event| {
      on_toggle.emit(id.clone())
    }
  };
  let on_edit = {
    let on_edit = props.on_edit.clone();
    let id = row.id.clone();
    move |_: yew::MouseEvent| {
      on_edit.emit(id.clone())
    }
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    let id = row.id.clone();
    move |_: yew::MouseEvent| {
      on_delete.emit(id.clone())
    }
  };

  html! {
      <li class={class}>
          <div class="row-main">
              <input
                  type="checkbox"
                  class="check"
                  checked={row.completed}
                  onchange={on_toggle}
              />
              <div class={if row.completed { "row-text done" } else { "row-text" }}>
                  <div>{ &row.text }</div>
                  {
                      match &row.due_label {
                          Some(label) => html! { <div class="due">{ label }</div> },
                          None => html! {}
                      }
                  }
              </div>
          </div>
          <div class="row-actions">
              <button class="icon edit" title="Edit" onclick={on_edit}>{ "✏️" }</button>
              <button class="icon delete" title="Delete" onclick={on_delete}>{ "🗑️" }</button>
          </div>
      </li>
  }
}
