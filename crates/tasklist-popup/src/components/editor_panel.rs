use tasklist_core::Priority;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct EditorPanelProps {
  pub text:               String,
  pub priority:           Priority,
  pub due_date:           String,
  pub editing:            bool,
  pub on_text_input:
    Callback<web_sys::InputEvent>,
  pub on_priority_change:
    Callback<web_sys::Event>,
  pub on_due_change:
    Callback<web_sys::Event>,
  pub on_commit:          Callback<()>,
  pub on_cancel:          Callback<()>
}

#[function_component(EditorPanel)]
pub fn editor_panel(
  props: &EditorPanelProps
) -> Html {
  let on_commit_click = {
    let on_commit = props.on_commit.clone();
    move |_: yew::MouseEvent| {
      on_commit.emit(())
    }
  };
  let on_keydown = {
    let on_commit = props.on_commit.clone();
    move |e: yew::KeyboardEvent| {
      if e.key() == "Enter" {
        e.prevent_default();
        on_commit.emit(());
      }
    }
  };
  let on_cancel_click = {
    let on_cancel = props.on_cancel.clone();
    move |_: yew::MouseEvent| {
      on_cancel.emit(())
    }
  };

  html! {
      <div class="panel editor">
          <input
              type="text"
              class="field"
              value={props.text.clone()}
              placeholder="To do"
              oninput={props.on_text_input.clone()}
              onkeydown={on_keydown}
          />
          <div class="row-controls">
              <select
                  class="field"
                  onchange={props.on_priority_change.clone()}
              >
                  {
                      for Priority::ALL.into_iter().map(|priority| html! {
                          <option
                              value={priority.as_str()}
                              selected={priority == props.priority}
                          >
                              { priority.label() }
                          </option>
                      })
                  }
              </select>
              <input
                  type="date"
                  class="field"
                  value={props.due_date.clone()}
                  onchange={props.on_due_change.clone()}
              />
          </div>
          <button class="btn primary" onclick={on_commit_click}>
              { if props.editing { "Save Edit" } else { "Add Todo" } }
          </button>
          {
              if props.editing {
                  html! {
                      <button class="btn" onclick={on_cancel_click}>{ "Cancel" }</button>
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
