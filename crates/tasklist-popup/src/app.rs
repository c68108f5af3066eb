use chrono::Local;
use gloo::console::log;
use tasklist_core::{
  CommitOutcome,
  PopupConfig,
  Priority,
  PriorityFilter,
  StatusFilter,
  TaskId,
  TaskListView
};
use yew::{
  Callback,
  Html,
  TargetCast,
  function_component,
  html,
  use_state
};

use crate::components::{
  EditorPanel,
  FilterBar,
  TaskList
};
use crate::storage::PopupStorage;

const POPUP_CONFIG_TOML: &str =
  include_str!("../assets/popup.toml");

type PopupView = TaskListView<PopupStorage>;

fn load_view() -> PopupView {
  let config =
    PopupConfig::from_toml_or_default(
      POPUP_CONFIG_TOML
    );
  TaskListView::load(
    PopupStorage::open(),
    &config
  )
}

fn log_commit(
  outcome: &anyhow::Result<CommitOutcome>
) {
  match outcome {
    | Ok(CommitOutcome::Ignored) => {
      ui_debug(
        "editor.commit",
        "ignored empty text"
      );
    }
    | Ok(CommitOutcome::Added(id)) => {
      ui_debug(
        "editor.commit",
        &format!("added {id}")
      );
    }
    | Ok(CommitOutcome::Updated(id)) => {
      ui_debug(
        "editor.commit",
        &format!("updated {id}")
      );
    }
    | Ok(CommitOutcome::Stale(id)) => {
      tracing::warn!(
        id = %id,
        "edited task was deleted before \
         saving"
      );
    }
    | Err(error) => {
      tracing::error!(
        ?error,
        "failed saving task"
      );
    }
  }
}

fn log_mutation(
  event: &str,
  id: &TaskId,
  result: anyhow::Result<bool>
) {
  match result {
    | Ok(changed) => ui_debug(
      event,
      &format!("{id} changed={changed}")
    ),
    | Err(error) => {
      tracing::error!(
        ?error,
        event,
        id = %id,
        "failed persisting task list"
      );
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let view = use_state(load_view);

  let on_text_input = {
    let view = view.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        let mut next = (*view).clone();
        next.set_draft_text(input.value());
        view.set(next);
      }
    )
  };

  let on_draft_priority_change = {
    let view = view.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        match select.value().parse::<Priority>()
        {
          | Ok(priority) => {
            let mut next = (*view).clone();
            next.set_draft_priority(priority);
            view.set(next);
          }
          | Err(error) => {
            tracing::warn!(
              ?error,
              "ignoring priority selection"
            );
          }
        }
      }
    )
  };

  let on_due_change = {
    let view = view.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        let mut next = (*view).clone();
        next.set_draft_due_date(input.value());
        view.set(next);
      }
    )
  };

  let on_commit = {
    let view = view.clone();
    Callback::from(move |_: ()| {
      let mut next = (*view).clone();
      let outcome = next.commit();
      log_commit(&outcome);
      view.set(next);
    })
  };

  let on_cancel = {
    let view = view.clone();
    Callback::from(move |_: ()| {
      ui_debug("editor.cancel", "");
      let mut next = (*view).clone();
      next.cancel_edit();
      view.set(next);
    })
  };

  let on_status_filter = {
    let view = view.clone();
    Callback::from(
      move |status: StatusFilter| {
        ui_debug(
          "filter.status",
          status.as_str()
        );
        let mut next = (*view).clone();
        next.set_status_filter(status);
        view.set(next);
      }
    )
  };

  let on_priority_filter = {
    let view = view.clone();
    Callback::from(
      move |priority: PriorityFilter| {
        ui_debug(
          "filter.priority",
          priority.as_str()
        );
        let mut next = (*view).clone();
        next.set_priority_filter(priority);
        view.set(next);
      }
    )
  };

  let on_toggle = {
    let view = view.clone();
    Callback::from(move |id: TaskId| {
      let mut next = (*view).clone();
      let result = next.toggle(&id);
      log_mutation("row.toggle", &id, result);
      view.set(next);
    })
  };

  let on_edit = {
    let view = view.clone();
    Callback::from(move |id: TaskId| {
      let mut next = (*view).clone();
      if next.begin_edit(&id) {
        ui_debug(
          "row.edit",
          id.as_str()
        );
        view.set(next);
      }
    })
  };

  let on_delete = {
    let view = view.clone();
    Callback::from(move |id: TaskId| {
      let mut next = (*view).clone();
      let result = next.delete(&id);
      log_mutation("row.delete", &id, result);
      view.set(next);
    })
  };

  let today = Local::now().date_naive();
  let rows = view.visible_rows(today);
  let draft = view.editor().draft().clone();
  let editing_id =
    view.editor().editing_id().cloned();
  let filter = view.filter();
  let counts = view.status_counts();

  html! {
      <div class="popup">
          <EditorPanel
              text={draft.text}
              priority={draft.priority}
              due_date={draft.due_date}
              editing={editing_id.is_some()}
              on_text_input={on_text_input}
              on_priority_change={on_draft_priority_change}
              on_due_change={on_due_change}
              on_commit={on_commit}
              on_cancel={on_cancel}
          />
          <FilterBar
              status={filter.status}
              priority={filter.priority}
              counts={counts}
              on_status={on_status_filter}
              on_priority={on_priority_filter}
          />
          <TaskList
              rows={rows}
              editing={editing_id}
              on_toggle={on_toggle}
              on_edit={on_edit}
              on_delete={on_delete}
          />
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
