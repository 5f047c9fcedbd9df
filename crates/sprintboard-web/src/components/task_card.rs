use sprintboard_core::calendar::format_due_label;
use sprintboard_shared::{
  ProjectDto,
  TaskDto,
  TaskStatus
};
use uuid::Uuid;
use web_sys::{
  DragEvent,
  Event
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::{
  event_value,
  priority_class,
  status_class
};

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub task:          TaskDto,
  #[prop_or_default]
  pub project:       Option<ProjectDto>,
  /// Calendar cells render a short card
  /// without the description.
  #[prop_or_default]
  pub compact:       bool,
  #[prop_or_default]
  pub draggable:     bool,
  #[prop_or_default]
  pub is_dragging:   bool,
  pub on_status:     Callback<(Uuid, TaskStatus)>,
  pub on_edit:       Callback<Uuid>,
  pub on_delete:     Callback<Uuid>,
  #[prop_or_default]
  pub on_drag_start: Callback<Uuid>,
  #[prop_or_default]
  pub on_drag_end:   Callback<()>
}

#[function_component(TaskCard)]
pub fn task_card(props: &TaskCardProps) -> Html {
  let task = &props.task;
  let task_id = task.id;

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          let _ = data_transfer.set_data(
            "text/plain",
            &task_id.to_string()
          );
          data_transfer
            .set_drop_effect("move");
        }
        on_drag_start.emit(task_id);
      }
    )
  };

  let ondragend = {
    let on_drag_end = props.on_drag_end.clone();
    Callback::from(move |_| {
      on_drag_end.emit(());
    })
  };

  let onchange = {
    let on_status = props.on_status.clone();
    Callback::from(move |event: Event| {
      let value = event_value(&event);
      match TaskStatus::from_key(&value) {
        | Some(status) => {
          on_status.emit((task_id, status))
        }
        | None => {
          tracing::warn!(%value, "unknown status selected")
        }
      }
    })
  };

  let on_edit = {
    let on_edit = props.on_edit.clone();
    Callback::from(move |_| on_edit.emit(task_id))
  };

  let on_delete = {
    let on_delete = props.on_delete.clone();
    Callback::from(move |_| on_delete.emit(task_id))
  };

  let project_badge = props.project.as_ref().map(|project| {
    html! {
        <span class="project-badge" style={format!("background-color: {}", project.color)}>
            { &project.name }
        </span>
    }
  });

  html! {
      <div
          class={classes!(
              "task-card",
              props.compact.then_some("compact"),
              props.is_dragging.then_some("dragging")
          )}
          draggable={props.draggable.to_string()}
          {ondragstart}
          {ondragend}
      >
          <div class="task-card-header">
              <span class="task-title">{ &task.title }</span>
              <span class={priority_class(task.priority)} title={task.priority.label()}>
                  { task.priority.initial().to_string() }
              </span>
          </div>
          {
              match (&task.description, props.compact) {
                  (Some(description), false) if !description.trim().is_empty() => {
                      html! { <div class="task-description">{ description }</div> }
                  }
                  _ => html! {}
              }
          }
          <div class="task-meta">
              { project_badge.unwrap_or_default() }
              {
                  task.due_date.as_deref().map(|due| html! {
                      <span class="due-date">{ format_due_label(due) }</span>
                  }).unwrap_or_default()
              }
              {
                  task.story_points.map(|points| html! {
                      <span class="story-points">{ format!("{points} pts") }</span>
                  }).unwrap_or_default()
              }
          </div>
          <div class="task-actions">
              <select class={status_class(task.status)} {onchange}>
                  {
                      for TaskStatus::ALL.into_iter().map(|status| html! {
                          <option value={status.as_key()} selected={status == task.status}>
                              { status.label() }
                          </option>
                      })
                  }
              </select>
              <button class="ghost" onclick={on_edit}>{ "Edit" }</button>
              <button class="ghost danger" onclick={on_delete}>{ "Delete" }</button>
          </div>
      </div>
  }
}
