use tasklist_core::TaskId;
use tasklist_core::render::RowModel;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub rows:      Vec<RowModel>,
  pub editing:   Option<TaskId>,
  pub on_toggle: Callback<TaskId>,
  pub on_edit:   Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.rows.is_empty() {
    return html! {
        <div class="panel list empty">{ "No tasks" }</div>
    };
  }

  html! {
      <ul class="panel list">
          {
              for props.rows.iter().cloned().map(|row| {
                  let editing = props.editing.as_ref() == Some(&row.id);
                  let key = row.id.to_string();
                  html! {
                      <TaskListRow
                          key={key}
                          row={row}
                          editing={editing}
                          on_toggle={props.on_toggle.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  }
              })
          }
      </ul>
  }
}
