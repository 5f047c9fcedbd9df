use sprintboard_shared::{
  ProjectDto,
  TaskStatus
};
use uuid::Uuid;
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_state
};

use super::{
  DayCell,
  TaskCard
};

#[derive(Properties, PartialEq)]
pub struct CalendarDayProps {
  pub day:           DayCell,
  pub projects:      Vec<ProjectDto>,
  pub dragging:      Option<Uuid>,
  pub on_drag_start: Callback<Uuid>,
  pub on_drag_end:   Callback<()>,
  /// Emits the cell's date key.
  pub on_drop:       Callback<String>,
  pub on_status:     Callback<(Uuid, TaskStatus)>,
  pub on_edit:       Callback<Uuid>,
  pub on_delete:     Callback<Uuid>
}

#[function_component(CalendarDayCell)]
pub fn calendar_day(
  props: &CalendarDayProps
) -> Html {
  let drop_hint = use_state(|| false);

  let ondragover = {
    let drop_hint = drop_hint.clone();
    Callback::from(move |event: DragEvent| {
      event.prevent_default();
      if let Some(data_transfer) =
        event.data_transfer()
      {
        data_transfer.set_drop_effect("move");
      }
      if !*drop_hint {
        drop_hint.set(true);
      }
    })
  };

  let ondragleave = {
    let drop_hint = drop_hint.clone();
    Callback::from(move |_: DragEvent| {
      drop_hint.set(false);
    })
  };

  let ondrop = {
    let drop_hint = drop_hint.clone();
    let on_drop = props.on_drop.clone();
    let key = props.day.key.clone();
    Callback::from(move |event: DragEvent| {
      event.prevent_default();
      event.stop_propagation();
      drop_hint.set(false);
      on_drop.emit(key.clone());
    })
  };

  let day = &props.day;

  html! {
      <div
          class={classes!(
              "calendar-day",
              day.is_today.then_some("today"),
              (*drop_hint).then_some("drop-target")
          )}
          {ondragover}
          {ondragleave}
          {ondrop}
      >
          <div class="calendar-day-header">
              <span class="weekday">{ day.date.format("%a").to_string() }</span>
              <span class="day-number">{ day.date.format("%-d").to_string() }</span>
          </div>
          <div class="calendar-day-tasks">
              {
                  for day.tasks.iter().map(|task| {
                      let project = task
                          .project_id
                          .and_then(|id| props.projects.iter().find(|project| project.id == id))
                          .cloned();
                      html! {
                          <TaskCard
                              key={task.id.to_string()}
                              task={task.clone()}
                              {project}
                              compact={true}
                              draggable={true}
                              is_dragging={props.dragging == Some(task.id)}
                              on_status={props.on_status.clone()}
                              on_edit={props.on_edit.clone()}
                              on_delete={props.on_delete.clone()}
                              on_drag_start={props.on_drag_start.clone()}
                              on_drag_end={props.on_drag_end.clone()}
                          />
                      }
                  })
              }
          </div>
      </div>
  }
}
