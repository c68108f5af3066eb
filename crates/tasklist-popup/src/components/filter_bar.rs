use tasklist_core::PriorityFilter;
use tasklist_core::StatusFilter;
use tasklist_core::filter::StatusCounts;
use tasklist_core::render::priority_class;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub status:      StatusFilter,
  pub priority:    PriorityFilter,
  pub counts:      StatusCounts,
  pub on_status:   Callback<StatusFilter>,
  pub on_priority:
    Callback<PriorityFilter>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let status_button =
    |status: StatusFilter| {
      let active = props.status == status;
      let on_status =
        props.on_status.clone();
      let count = props.counts.get(status);
      html! {
          <button
              class={classes!("filter", active.then_some("active"))}
              onclick={move |_| on_status.emit(status)}
          >
              { format!("{} ({count})", status.label()) }
          </button>
      }
    };

  let priority_button =
    |priority: PriorityFilter| {
      let active =
        props.priority == priority;
      let tone = match priority {
        | PriorityFilter::All => {
          "priority-all"
        }
        | PriorityFilter::Only(value) => {
          priority_class(value)
        }
      };
      let on_priority =
        props.on_priority.clone();
      html! {
          <button
              class={classes!("filter", tone, active.then_some("active"))}
              onclick={move |_| on_priority.emit(priority)}
          >
              { priority.label() }
          </button>
      }
    };

  html! {
      <div class="panel filters">
          <div class="filter-group">
              { for StatusFilter::ALL.into_iter().map(status_button) }
          </div>
          <div class="filter-group">
              { for PriorityFilter::ALL.into_iter().map(priority_button) }
          </div>
      </div>
  }
}
