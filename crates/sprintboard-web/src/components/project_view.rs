use sprintboard_shared::ProjectDto;
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProjectViewProps {
  /// Each project with its task count.
  pub cards:          Vec<(ProjectDto, usize)>,
  pub on_open:        Callback<Uuid>,
  pub on_new_project: Callback<()>,
  pub on_edit:        Callback<Uuid>,
  pub on_delete:      Callback<Uuid>
}

#[function_component(ProjectView)]
pub fn project_view(
  props: &ProjectViewProps
) -> Html {
  let on_new_project = {
    let on_new_project =
      props.on_new_project.clone();
    Callback::from(move |_| on_new_project.emit(()))
  };

  html! {
      <section class="project-view">
          <header class="section-header">
              <h2>{ "Projects" }</h2>
              <button class="primary" onclick={on_new_project}>{ "New Project" }</button>
          </header>
          {
              if props.cards.is_empty() {
                  html! { <p class="empty">{ "No projects yet." }</p> }
              } else {
                  html! {
                      <div class="project-grid">
                          {
                              for props.cards.iter().map(|(project, task_count)| {
                                  let id = project.id;
                                  let on_open = {
                                      let on_open = props.on_open.clone();
                                      Callback::from(move |_| on_open.emit(id))
                                  };
                                  let on_edit = {
                                      let on_edit = props.on_edit.clone();
                                      Callback::from(move |_| on_edit.emit(id))
                                  };
                                  let on_delete = {
                                      let on_delete = props.on_delete.clone();
                                      Callback::from(move |_| on_delete.emit(id))
                                  };
                                  html! {
                                      <div key={id.to_string()} class="project-card" style={format!("border-top-color: {}", project.color)}>
                                          <div class="project-card-body" onclick={on_open}>
                                              <h3>{ &project.name }</h3>
                                              {
                                                  project.description.as_ref().map(|description| html! {
                                                      <p class="project-description">{ description }</p>
                                                  }).unwrap_or_default()
                                              }
                                              <span class="task-count">
                                                  { format!("{task_count} {}", if *task_count == 1 { "task" } else { "tasks" }) }
                                              </span>
                                          </div>
                                          <div class="project-actions">
                                              <button class="ghost" onclick={on_edit}>{ "Edit" }</button>
                                              <button class="ghost danger" onclick={on_delete}>{ "Delete" }</button>
                                          </div>
                                      </div>
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
