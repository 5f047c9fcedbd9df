use sprintboard_shared::{
  ProjectDto,
  TaskDto,
  TaskStatus
};
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::TaskCard;

#[derive(Properties, PartialEq)]
pub struct KanbanColumnProps {
  pub status:    TaskStatus,
  pub tasks:     Vec<TaskDto>,
  pub project:   ProjectDto,
  pub on_status: Callback<(Uuid, TaskStatus)>,
  pub on_edit:   Callback<Uuid>,
  pub on_delete: Callback<Uuid>
}

#[function_component(KanbanColumn)]
pub fn kanban_column(
  props: &KanbanColumnProps
) -> Html {
  html! {
      <div class={classes!("kanban-column", format!("column-{}", props.status.as_key()))}>
          <div class="kanban-column-header">
              <span>{ props.status.label() }</span>
              <span class="count">{ props.tasks.len().to_string() }</span>
          </div>
          <div class="kanban-column-body">
              {
                  for props.tasks.iter().map(|task| html! {
                      <TaskCard
                          key={task.id.to_string()}
                          task={task.clone()}
                          project={props.project.clone()}
                          compact={true}
                          on_status={props.on_status.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  })
              }
          </div>
      </div>
  }
}
