use sprintboard_core::forms::{
  EditorMode,
  TaskForm,
  parse_optional_id
};
use sprintboard_shared::{
  ProjectDto,
  SprintDto,
  TaskPriority,
  TaskStatus
};
use web_sys::{
  Event,
  InputEvent,
  MouseEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::edit_form;

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub mode:      EditorMode,
  pub form:      TaskForm,
  pub projects:  Vec<ProjectDto>,
  pub sprints:   Vec<SprintDto>,
  pub error:     Option<String>,
  pub loading:   bool,
  pub on_change: Callback<TaskForm>,
  pub on_submit: Callback<()>,
  pub on_close:  Callback<()>
}

#[function_component(TaskModal)]
pub fn task_modal(props: &TaskModalProps) -> Html {
  let form = &props.form;

  let on_title = edit_form::<_, InputEvent>(
    form,
    &props.on_change,
    |form, value| form.title = value
  );
  let on_description = edit_form::<_, InputEvent>(
    form,
    &props.on_change,
    |form, value| form.description = value
  );
  let on_due_date = edit_form::<_, Event>(
    form,
    &props.on_change,
    |form, value| form.due_date = value
  );
  let on_story_points = edit_form::<_, InputEvent>(
    form,
    &props.on_change,
    |form, value| form.story_points = value
  );
  let on_priority = edit_form::<_, Event>(
    form,
    &props.on_change,
    |form, value| {
      if let Some(priority) =
        TaskPriority::from_key(&value)
      {
        form.priority = priority;
      }
    }
  );
  let on_status = edit_form::<_, Event>(
    form,
    &props.on_change,
    |form, value| {
      if let Some(status) = TaskStatus::from_key(&value)
      {
        form.status = status;
      }
    }
  );
  let on_project = edit_form::<_, Event>(
    form,
    &props.on_change,
    |form, value| {
      match parse_optional_id("project", &value) {
        | Ok(project_id) => form.set_project(project_id),
        | Err(error) => {
          tracing::warn!(%error, "invalid project choice")
        }
      }
    }
  );
  let on_sprint = edit_form::<_, Event>(
    form,
    &props.on_change,
    |form, value| {
      match parse_optional_id("sprint", &value) {
        | Ok(sprint_id) => form.set_sprint(sprint_id),
        | Err(error) => {
          tracing::warn!(%error, "invalid sprint choice")
        }
      }
    }
  );

  let onsubmit = {
    let on_submit = props.on_submit.clone();
    Callback::from(move |event: SubmitEvent| {
      event.prevent_default();
      on_submit.emit(());
    })
  };
  let on_cancel = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| on_close.emit(()))
  };

  let heading = match props.mode {
    | EditorMode::Create => "New Task",
    | EditorMode::Edit(_) => "Edit Task"
  };
  let submit_label = match props.mode {
    | EditorMode::Create => "Create",
    | EditorMode::Edit(_) => "Save"
  };
  let project_id = form.project_id();
  let sprint_id = form.sprint_id();
  let sprint_choices = form.sprint_choices(&props.sprints);

  html! {
      <div class="modal-backdrop">
          <form class="modal" {onsubmit}>
              <h2>{ heading }</h2>
              {
                  props.error.as_ref().map(|error| html! {
                      <div class="form-error">{ error }</div>
                  }).unwrap_or_default()
              }
              <label>
                  { "Title" }
                  <input type="text" value={form.title.clone()} oninput={on_title} required={true} />
              </label>
              <label>
                  { "Description" }
                  <textarea value={form.description.clone()} oninput={on_description} />
              </label>
              <div class="form-row">
                  <label>
                      { "Priority" }
                      <select onchange={on_priority}>
                          {
                              for TaskPriority::ALL.into_iter().map(|priority| html! {
                                  <option value={priority.as_key()} selected={priority == form.priority}>
                                      { priority.label() }
                                  </option>
                              })
                          }
                      </select>
                  </label>
                  <label>
                      { "Status" }
                      <select onchange={on_status}>
                          {
                              for TaskStatus::ALL.into_iter().map(|status| html! {
                                  <option value={status.as_key()} selected={status == form.status}>
                                      { status.label() }
                                  </option>
                              })
                          }
                      </select>
                  </label>
              </div>
              <div class="form-row">
                  <label>
                      { "Project" }
                      <select onchange={on_project}>
                          <option value="" selected={project_id.is_none()}>{ "No project" }</option>
                          {
                              for props.projects.iter().map(|project| html! {
                                  <option value={project.id.to_string()} selected={project_id == Some(project.id)}>
                                      { &project.name }
                                  </option>
                              })
                          }
                      </select>
                  </label>
                  {
                      if project_id.is_some() {
                          html! {
                              <label>
                                  { "Sprint" }
                                  <select onchange={on_sprint}>
                                      <option value="" selected={sprint_id.is_none()}>{ "No sprint" }</option>
                                      {
                                          for sprint_choices.iter().map(|sprint| html! {
                                              <option value={sprint.id.to_string()} selected={sprint_id == Some(sprint.id)}>
                                                  { &sprint.name }
                                              </option>
                                          })
                                      }
                                  </select>
                              </label>
                          }
                      } else {
                          html! {}
                      }
                  }
              </div>
              <div class="form-row">
                  <label>
                      { "Due date" }
                      <input type="date" value={form.due_date.clone()} onchange={on_due_date} />
                  </label>
                  <label>
                      { "Story points" }
                      <input type="number" min="1" max="21" value={form.story_points.clone()} oninput={on_story_points} />
                  </label>
              </div>
              <div class="modal-actions">
                  <button type="button" class="ghost" onclick={on_cancel}>{ "Cancel" }</button>
                  <button type="submit" class="primary" disabled={props.loading}>{ submit_label }</button>
              </div>
          </form>
      </div>
  }
}
