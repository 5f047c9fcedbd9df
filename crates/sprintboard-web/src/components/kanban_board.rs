use sprintboard_shared::{
  ProjectDto,
  SprintDto,
  TaskDto,
  TaskStatus
};
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::KanbanColumn;

#[derive(Properties, PartialEq)]
pub struct KanbanBoardProps {
  pub project:       ProjectDto,
  /// One entry per status, board order.
  pub columns:       Vec<(TaskStatus, Vec<TaskDto>)>,
  pub sprints:       Vec<SprintDto>,
  pub on_back:       Callback<()>,
  pub on_new_task:   Callback<()>,
  pub on_new_sprint: Callback<Uuid>,
  pub on_status:     Callback<(Uuid, TaskStatus)>,
  pub on_edit:       Callback<Uuid>,
  pub on_delete:     Callback<Uuid>
}

#[function_component(KanbanBoard)]
pub fn kanban_board(
  props: &KanbanBoardProps
) -> Html {
  let project_id = props.project.id;
  let on_back = {
    let on_back = props.on_back.clone();
    Callback::from(move |_| on_back.emit(()))
  };
  let on_new_task = {
    let on_new_task = props.on_new_task.clone();
    Callback::from(move |_| on_new_task.emit(()))
  };
  let on_new_sprint = {
    let on_new_sprint = props.on_new_sprint.clone();
    Callback::from(move |_| on_new_sprint.emit(project_id))
  };

  html! {
      <section class="kanban-board">
          <header class="section-header">
              <button class="ghost" onclick={on_back}>{ "← Projects" }</button>
              <h2>
                  <span class="color-dot" style={format!("background-color: {}", props.project.color)}></span>
                  { &props.project.name }
              </h2>
              <button class="ghost" onclick={on_new_sprint}>{ "New Sprint" }</button>
              <button class="primary" onclick={on_new_task}>{ "Add Task" }</button>
          </header>
          {
              if props.sprints.is_empty() {
                  html! {}
              } else {
                  html! {
                      <ul class="sprint-strip">
                          {
                              for props.sprints.iter().map(|sprint| html! {
                                  <li key={sprint.id.to_string()} class={format!("sprint sprint-{}", sprint.status.as_key())}>
                                      <strong>{ &sprint.name }</strong>
                                      {
                                          match (&sprint.start_date, &sprint.end_date) {
                                              (Some(start), Some(end)) => html! { <span>{ format!(" {start} → {end}") }</span> },
                                              _ => html! {}
                                          }
                                      }
                                  </li>
                              })
                          }
                      </ul>
                  }
              }
          }
          <div class="kanban-columns">
              {
                  for props.columns.iter().map(|(status, tasks)| html! {
                      <KanbanColumn
                          key={status.as_key()}
                          status={*status}
                          tasks={tasks.clone()}
                          project={props.project.clone()}
                          on_status={props.on_status.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  })
              }
          </div>
      </section>
  }
}
