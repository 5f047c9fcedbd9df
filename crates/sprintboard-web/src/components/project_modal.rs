use sprintboard_core::forms::{
  EditorMode,
  ProjectForm
};
use web_sys::{
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
pub struct ProjectModalProps {
  pub mode:      EditorMode,
  pub form:      ProjectForm,
  pub error:     Option<String>,
  pub loading:   bool,
  pub on_change: Callback<ProjectForm>,
  pub on_submit: Callback<()>,
  pub on_close:  Callback<()>
}

#[function_component(ProjectModal)]
pub fn project_modal(
  props: &ProjectModalProps
) -> Html {
  let form = &props.form;

  let on_name = edit_form::<_, InputEvent>(
    form,
    &props.on_change,
    |form, value| form.name = value
  );
  let on_description = edit_form::<_, InputEvent>(
    form,
    &props.on_change,
    |form, value| form.description = value
  );
  let on_color = edit_form::<_, InputEvent>(
    form,
    &props.on_change,
    |form, value| form.color = value
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

  let (heading, submit_label) = match props.mode {
    | EditorMode::Create => ("New Project", "Create"),
    | EditorMode::Edit(_) => ("Edit Project", "Save")
  };

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
                  { "Name" }
                  <input type="text" value={form.name.clone()} oninput={on_name} required={true} />
              </label>
              <label>
                  { "Description" }
                  <textarea value={form.description.clone()} oninput={on_description} />
              </label>
              <label>
                  { "Color" }
                  <input type="color" value={form.color.clone()} oninput={on_color} />
              </label>
              <div class="modal-actions">
                  <button type="button" class="ghost" onclick={on_cancel}>{ "Cancel" }</button>
                  <button type="submit" class="primary" disabled={props.loading}>{ submit_label }</button>
              </div>
          </form>
      </div>
  }
}
