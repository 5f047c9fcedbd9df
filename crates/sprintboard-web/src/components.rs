mod calendar_day;
mod kanban_board;
mod kanban_column;
mod loading_overlay;
mod nav_bar;
mod project_modal;
mod project_view;
mod sprint_modal;
mod task_card;
mod task_list;
mod task_modal;
mod week_calendar;

pub use calendar_day::CalendarDayCell;
pub use kanban_board::KanbanBoard;
pub use kanban_column::KanbanColumn;
pub use loading_overlay::LoadingOverlay;
pub use nav_bar::NavBar;
pub use project_modal::ProjectModal;
pub use project_view::ProjectView;
pub use sprint_modal::SprintModal;
pub use task_card::TaskCard;
pub use task_list::TaskList;
pub use task_modal::TaskModal;
pub use week_calendar::{
  DayCell,
  WeekCalendar
};
use wasm_bindgen::JsCast;
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement
};
use yew::Callback;

/// Current value of the control that
/// fired `event`.
pub(crate) fn event_value(
  event: &Event
) -> String {
  let Some(target) = event.target() else {
    return String::new();
  };
  if let Some(input) =
    target.dyn_ref::<HtmlInputElement>()
  {
    return input.value();
  }
  if let Some(area) =
    target.dyn_ref::<HtmlTextAreaElement>()
  {
    return area.value();
  }
  if let Some(select) =
    target.dyn_ref::<HtmlSelectElement>()
  {
    return select.value();
  }
  String::new()
}

/// Callback that copies `form`, writes the
/// event's value into it and emits the copy.
pub(crate) fn edit_form<F, E>(
  form: &F,
  on_change: &Callback<F>,
  apply: fn(&mut F, String)
) -> Callback<E>
where
  F: Clone + 'static,
  E: AsRef<Event> + 'static
{
  let form = form.clone();
  let on_change = on_change.clone();
  Callback::from(move |event: E| {
    let mut next = form.clone();
    apply(&mut next, event_value(event.as_ref()));
    on_change.emit(next);
  })
}

pub(crate) fn status_class(
  status: sprintboard_shared::TaskStatus
) -> String {
  format!("badge status-{}", status.as_key())
}

pub(crate) fn priority_class(
  priority: sprintboard_shared::TaskPriority
) -> String {
  format!("badge priority-{}", priority.as_key())
}
