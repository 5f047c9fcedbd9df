//! Reducer around the shared `AppState`.

use std::rc::Rc;

use chrono::NaiveDate;
use sprintboard_core::AppState;
use sprintboard_core::forms::{
  ProjectForm,
  SprintForm,
  TaskForm
};
use sprintboard_core::sync::{
  Outcome,
  Refresh
};
use sprintboard_core::views::View;
use uuid::Uuid;
use yew::Reducible;

#[derive(Debug, Clone, PartialEq)]
pub struct Store {
  pub app:        AppState,
  /// Validation message shown in the
  /// open editor.
  pub form_error: Option<String>
}

impl Store {
  pub fn new(app: AppState) -> Self {
    Self {
      app,
      form_error: None
    }
  }
}

#[derive(Debug, Clone)]
pub enum Action {
  SetView(View),
  Loaded(Refresh),
  SetLoading(bool),
  /// Mutation without an editor attached.
  Finished(Outcome),
  /// Background mutation that never showed
  /// the overlay; loading is left as is.
  Synced(Outcome),
  NavigateWeek(i64),
  Today,
  /// Clock tick; the shown week stays put.
  SetToday(NaiveDate),
  SelectProject(Option<Uuid>),
  OpenNewTask,
  OpenEditTask(Uuid),
  EditTaskForm(TaskForm),
  CloseTaskEditor,
  TaskSaved(Outcome),
  OpenNewProject,
  OpenEditProject(Uuid),
  EditProjectForm(ProjectForm),
  CloseProjectEditor,
  ProjectSaved(Outcome),
  OpenNewSprint(Uuid),
  EditSprintForm(SprintForm),
  CloseSprintEditor,
  SprintSaved(Outcome),
  FormInvalid(String),
  BeginDrag(Uuid),
  EndDrag
}

impl Reducible for Store {
  type Action = Action;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    next.apply(action);
    Rc::new(next)
  }
}

impl Store {
  fn apply(&mut self, action: Action) {
    let app = &mut self.app;
    match action {
      | Action::SetView(view) => app.set_view(view),
      | Action::Loaded(refresh) => app.apply(refresh),
      | Action::SetLoading(loading) => {
        app.set_loading(loading)
      }
      | Action::Finished(outcome) => {
        app.finish(outcome);
      }
      | Action::Synced(outcome) => {
        app.finish_untracked(outcome);
      }
      | Action::NavigateWeek(weeks) => {
        app.navigate_week(weeks)
      }
      | Action::Today => app.go_to_today(),
      | Action::SetToday(today) => {
        if app.today() != today {
          app.set_today(today)
        }
      }
      | Action::SelectProject(project_id) => {
        app.select_project(project_id)
      }
      | Action::OpenNewTask => {
        self.form_error = None;
        app.open_new_task();
      }
      | Action::OpenEditTask(id) => {
        self.form_error = None;
        if !app.open_edit_task(id) {
          tracing::warn!(%id, "edit requested for unknown task");
        }
      }
      | Action::EditTaskForm(form) => {
        if let Some(editor) = app.task_editor_mut() {
          *editor.form_mut() = form;
        }
      }
      | Action::CloseTaskEditor => {
        self.form_error = None;
        app.close_task_editor();
      }
      | Action::TaskSaved(outcome) => {
        if app.finish_task_save(outcome) {
          self.form_error = None;
        }
      }
      | Action::OpenNewProject => {
        self.form_error = None;
        app.open_new_project();
      }
      | Action::OpenEditProject(id) => {
        self.form_error = None;
        if !app.open_edit_project(id) {
          tracing::warn!(%id, "edit requested for unknown project");
        }
      }
      | Action::EditProjectForm(form) => {
        if let Some(editor) = app.project_editor_mut() {
          *editor.form_mut() = form;
        }
      }
      | Action::CloseProjectEditor => {
        self.form_error = None;
        app.close_project_editor();
      }
      | Action::ProjectSaved(outcome) => {
        if app.finish_project_save(outcome) {
          self.form_error = None;
        }
      }
      | Action::OpenNewSprint(project_id) => {
        self.form_error = None;
        app.open_new_sprint(project_id);
      }
      | Action::EditSprintForm(form) => {
        if let Some(editor) = app.sprint_editor_mut() {
          *editor = form;
        }
      }
      | Action::CloseSprintEditor => {
        self.form_error = None;
        app.close_sprint_editor();
      }
      | Action::SprintSaved(outcome) => {
        if app.finish_sprint_save(outcome) {
          self.form_error = None;
        }
      }
      | Action::FormInvalid(message) => {
        self.form_error = Some(message);
      }
      | Action::BeginDrag(id) => {
        app.begin_drag(id);
      }
      | Action::EndDrag => app.end_drag()
    }
  }
}

#[cfg(test)]
mod tests {
  use sprintboard_core::calendar::{
    DateKeying,
    Zone
  };

  use super::*;

  fn store() -> Rc<Store> {
    let today = NaiveDate::from_ymd_opt(2024, 3, 13)
      .expect("valid date");
    Rc::new(Store::new(AppState::new(
      today,
      Zone::System,
      DateKeying::Local
    )))
  }

  fn failed() -> Outcome {
    Outcome {
      committed: false,
      refresh:   Refresh::default()
    }
  }

  #[test]
  fn form_error_survives_failed_save_and_clears_on_close() {
    let state = store()
      .reduce(Action::OpenNewTask)
      .reduce(Action::SetLoading(true))
      .reduce(Action::TaskSaved(failed()))
      .reduce(Action::FormInvalid("try again".to_string()));

    assert!(state.app.task_editor().is_some());
    assert!(!state.app.loading());
    assert_eq!(state.form_error.as_deref(), Some("try again"));

    let state = state.reduce(Action::CloseTaskEditor);
    assert!(state.app.task_editor().is_none());
    assert_eq!(state.form_error, None);
  }

  #[test]
  fn form_edits_replace_the_editor_buffer() {
    let state = store().reduce(Action::OpenNewTask);
    let mut form = state
      .app
      .task_editor()
      .expect("editor open")
      .form()
      .clone();
    form.title = "Typed".to_string();

    let state = state.reduce(Action::EditTaskForm(form));
    assert_eq!(
      state
        .app
        .task_editor()
        .expect("editor open")
        .form()
        .title,
      "Typed"
    );
  }

  #[test]
  fn status_sync_keeps_a_pending_save_overlay() {
    let state = store()
      .reduce(Action::OpenNewTask)
      .reduce(Action::SetLoading(true))
      .reduce(Action::Synced(failed()));

    assert!(state.app.loading());
    assert!(state.app.task_editor().is_some());

    let state = state.reduce(Action::TaskSaved(failed()));
    assert!(!state.app.loading());
  }

  #[test]
  fn set_today_keeps_the_shown_week() {
    let state = store();
    let week = state.app.week();
    let next_day = NaiveDate::from_ymd_opt(2024, 3, 14)
      .expect("valid date");

    let state = state.reduce(Action::SetToday(next_day));
    assert_eq!(state.app.today(), next_day);
    assert_eq!(state.app.week(), week);
  }
}
