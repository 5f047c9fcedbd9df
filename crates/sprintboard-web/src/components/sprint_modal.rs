use sprintboard_core::forms::SprintForm;
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
pub struct SprintModalProps {
  pub form:         SprintForm,
  /// Shown in the heading; the form
  /// already carries the id.
  pub project_name: String,
  pub error:        Option<String>,
  pub loading:      bool,
  pub on_change:    Callback<SprintForm>,
  pub on_submit:    Callback<()>,
  pub on_close:     Callback<()>
}

#[function_component(SprintModal)]
pub fn sprint_modal(
  props: &SprintModalProps
) -> Html {
  let form = &props.form;

  let on_name = edit_form::<_, InputEvent>(
    form,
    &props.on_change,
    |form, value| form.name = value
  );
  let on_goal = edit_form::<_, InputEvent>(
    form,
    &props.on_change,
    |form, value| form.goal = value
  );
  let on_description = edit_form::<_, InputEvent>(
    form,
    &props.on_change,
    |form, value| form.description = value
  );
  let on_start = edit_form::<_, Event>(
    form,
    &props.on_change,
    |form, value| form.start_date = value
  );
  let on_end = edit_form::<_, Event>(
    form,
    &props.on_change,
    |form, value| form.end_date = value
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

  html! {
      <div class="modal-backdrop">
          <form class="modal" {onsubmit}>
              <h2>{ format!("New Sprint for {}", props.project_name) }</h2>
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
                  { "Goal" }
                  <input type="text" value={form.goal.clone()} oninput={on_goal} />
              </label>
              <label>
                  { "Description" }
                  <textarea value={form.description.clone()} oninput={on_description} />
              </label>
              <div class="form-row">
                  <label>
                      { "Start" }
                      <input type="date" value={form.start_date.clone()} onchange={on_start} />
                  </label>
                  <label>
                      { "End" }
                      <input type="date" value={form.end_date.clone()} onchange={on_end} />
                  </label>
              </div>
              <div class="modal-actions">
                  <button type="button" class="ghost" onclick={on_cancel}>{ "Cancel" }</button>
                  <button type="submit" class="primary" disabled={props.loading}>{ "Create" }</button>
              </div>
          </form>
      </div>
  }
}
