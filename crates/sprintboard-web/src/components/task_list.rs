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
  function_component,
  html
};

use super::TaskCard;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:       Vec<TaskDto>,
  pub projects:    Vec<ProjectDto>,
  pub on_new_task: Callback<()>,
  pub on_status:   Callback<(Uuid, TaskStatus)>,
  pub on_edit:     Callback<Uuid>,
  pub on_delete:   Callback<Uuid>
}

#[function_component(TaskList)]
pub fn task_list(props: &TaskListProps) -> Html {
  let on_new_task = {
    let on_new_task = props.on_new_task.clone();
    Callback::from(move |_| on_new_task.emit(()))
  };

  html! {
      <section class="task-list">
          <header class="section-header">
              <h2>{ format!("All Tasks ({})", props.tasks.len()) }</h2>
              <button class="primary" onclick={on_new_task}>{ "Add Task" }</button>
          </header>
          {
              if props.tasks.is_empty() {
                  html! { <p class="empty">{ "No tasks yet." }</p> }
              } else {
                  html! {
                      <div class="task-grid">
                          {
                              for props.tasks.iter().map(|task| {
                                  let project = task
                                      .project_id
                                      .and_then(|id| props.projects.iter().find(|project| project.id == id))
                                      .cloned();
                                  html! {
                                      <TaskCard
                                          key={task.id.to_string()}
                                          task={task.clone()}
                                          {project}
                                          on_status={props.on_status.clone()}
                                          on_edit={props.on_edit.clone()}
                                          on_delete={props.on_delete.clone()}
                                      />
                                  }
                              })
                          }
                      </div>
                  }
              }
          }
      </section>
  }
}
