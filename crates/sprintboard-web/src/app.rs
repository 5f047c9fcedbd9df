use std::rc::Rc;

use gloo::timers::callback::Interval;
use sprintboard_core::AppState;
use sprintboard_core::calendar::Zone;
use sprintboard_core::drag::Reschedule;
use sprintboard_core::forms::{
  ProjectSubmission,
  TaskSubmission
};
use sprintboard_core::sync::SyncClient;
use sprintboard_core::views::View;
use sprintboard_shared::{
  TaskDto,
  TaskStatus
};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::{
  Callback,
  Html,
  UseReducerHandle,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_reducer
};

use crate::api::WebApi;
use crate::components::{
  DayCell,
  KanbanBoard,
  LoadingOverlay,
  NavBar,
  ProjectModal,
  ProjectView,
  SprintModal,
  TaskList,
  TaskModal,
  WeekCalendar
};
use crate::config::load_config;
use crate::storage;
use crate::store::{
  Action,
  Store
};

const TODAY_CHECK_MS: u32 = 60_000;
const TASK_SAVE_FAILED: &str =
  "Could not save the task. Please try again.";
const PROJECT_SAVE_FAILED: &str =
  "Could not save the project. Please try again.";
const SPRINT_SAVE_FAILED: &str =
  "Could not create the sprint. Please try again.";

/// Every handler that talks to the API.
/// Each one issues the request, then
/// hands the outcome to the reducer.
#[derive(Clone)]
struct Actions {
  store: UseReducerHandle<Store>,
  sync:  Rc<SyncClient<WebApi>>
}

impl Actions {
  fn save_task(&self) {
    let Some(editor) = self.store.app.task_editor() else {
      return;
    };
    let sprints = self.store.app.cache().sprints();
    let submission = match editor.submission(sprints) {
      | Ok(submission) => submission,
      | Err(error) => {
        self
          .store
          .dispatch(Action::FormInvalid(error.to_string()));
        return;
      }
    };

    self.store.dispatch(Action::SetLoading(true));
    let store = self.store.clone();
    let sync = self.sync.clone();
    spawn_local(async move {
      let outcome = match submission {
        | TaskSubmission::Create(body) => {
          sync.create_task(&body).await
        }
        | TaskSubmission::Update { id, patch } => {
          sync.update_task(id, &patch).await
        }
      };
      let committed = outcome.committed;
      store.dispatch(Action::TaskSaved(outcome));
      if !committed {
        store.dispatch(Action::FormInvalid(
          TASK_SAVE_FAILED.to_string()
        ));
      }
    });
  }

  fn change_status(
    &self,
    id: Uuid,
    status: TaskStatus
  ) {
    let store = self.store.clone();
    let sync = self.sync.clone();
    spawn_local(async move {
      let outcome = sync.change_status(id, status).await;
      store.dispatch(Action::Synced(outcome));
    });
  }

  fn reschedule(&self, reschedule: Reschedule) {
    let store = self.store.clone();
    let sync = self.sync.clone();
    spawn_local(async move {
      let outcome = sync.reschedule(reschedule).await;
      store.dispatch(Action::Synced(outcome));
    });
  }

  fn delete_task(&self, id: Uuid) {
    if !confirm("Are you sure you want to delete this task?") {
      tracing::info!(%id, "task deletion canceled");
      return;
    }
    self.store.dispatch(Action::SetLoading(true));
    let store = self.store.clone();
    let sync = self.sync.clone();
    spawn_local(async move {
      let outcome = sync.delete_task(id).await;
      store.dispatch(Action::Finished(outcome));
    });
  }

  fn save_project(&self) {
    let Some(editor) = self.store.app.project_editor()
    else {
      return;
    };
    let submission = match editor.submission() {
      | Ok(submission) => submission,
      | Err(error) => {
        self
          .store
          .dispatch(Action::FormInvalid(error.to_string()));
        return;
      }
    };

    self.store.dispatch(Action::SetLoading(true));
    let store = self.store.clone();
    let sync = self.sync.clone();
    spawn_local(async move {
      let outcome = match submission {
        | ProjectSubmission::Create(body) => {
          sync.create_project(&body).await
        }
        | ProjectSubmission::Update { id, body } => {
          sync.update_project(id, &body).await
        }
      };
      let committed = outcome.committed;
      store.dispatch(Action::ProjectSaved(outcome));
      if !committed {
        store.dispatch(Action::FormInvalid(
          PROJECT_SAVE_FAILED.to_string()
        ));
      }
    });
  }

  fn delete_project(&self, id: Uuid) {
    if !confirm(
      "Delete this project? Its tasks and sprints are \
       deleted too."
    ) {
      tracing::info!(%id, "project deletion canceled");
      return;
    }
    self.store.dispatch(Action::SetLoading(true));
    let store = self.store.clone();
    let sync = self.sync.clone();
    spawn_local(async move {
      let outcome = sync.delete_project(id).await;
      store.dispatch(Action::Finished(outcome));
    });
  }

  fn save_sprint(&self) {
    let Some(form) = self.store.app.sprint_editor() else {
      return;
    };
    let body = match form.to_body() {
      | Ok(body) => body,
      | Err(error) => {
        self
          .store
          .dispatch(Action::FormInvalid(error.to_string()));
        return;
      }
    };

    self.store.dispatch(Action::SetLoading(true));
    let store = self.store.clone();
    let sync = self.sync.clone();
    spawn_local(async move {
      let outcome = sync.create_sprint(&body).await;
      let committed = outcome.committed;
      store.dispatch(Action::SprintSaved(outcome));
      if !committed {
        store.dispatch(Action::FormInvalid(
          SPRINT_SAVE_FAILED.to_string()
        ));
      }
    });
  }
}

fn confirm(message: &str) -> bool {
  web_sys::window()
    .and_then(|window| {
      window.confirm_with_message(message).ok()
    })
    .unwrap_or(false)
}

fn dispatcher<T: 'static>(
  store: &UseReducerHandle<Store>,
  action: fn(T) -> Action
) -> Callback<T> {
  let store = store.clone();
  Callback::from(move |value: T| {
    store.dispatch(action(value))
  })
}

fn trigger(
  store: &UseReducerHandle<Store>,
  action: Action
) -> Callback<()> {
  let store = store.clone();
  Callback::from(move |()| store.dispatch(action.clone()))
}

#[function_component(App)]
pub fn app() -> Html {
  let config = use_memo((), |_| load_config());
  let zone = use_memo((), {
    let config = config.clone();
    move |_| {
      config.zone().unwrap_or_else(|error| {
        tracing::warn!(%error, "falling back to the browser zone");
        Zone::System
      })
    }
  });
  let sync = use_memo((), {
    let config = config.clone();
    move |_| {
      SyncClient::new(WebApi::new(&config.api_base_url))
    }
  });

  let store = use_reducer({
    let config = config.clone();
    let zone = *zone;
    move || {
      let mut app =
        AppState::new(zone.today(), zone, config.date_keys);
      app.set_view(storage::load_view());
      Store::new(app)
    }
  });

  {
    let store = store.clone();
    let sync = sync.clone();
    use_effect_with((), move |_| {
      store.dispatch(Action::SetLoading(true));
      spawn_local(async move {
        let refresh = sync.load_all().await;
        if refresh.is_empty() {
          tracing::warn!("initial load returned nothing");
        }
        store.dispatch(Action::Loaded(refresh));
        store.dispatch(Action::SetLoading(false));
      });
      || ()
    });
  }

  {
    let store = store.clone();
    let zone = *zone;
    use_effect_with((), move |_| {
      let interval = Interval::new(TODAY_CHECK_MS, move || {
        store.dispatch(Action::SetToday(zone.today()));
      });
      move || drop(interval)
    });
  }

  use_effect_with(store.app.view(), |view| {
    storage::save_view(*view);
    || ()
  });

  let actions = Actions {
    store: store.clone(),
    sync:  sync.clone()
  };
  let app_state = &store.app;

  let on_select_view = dispatcher(&store, Action::SetView);
  let on_new_task = trigger(&store, Action::OpenNewTask);
  let on_edit_task = dispatcher(&store, Action::OpenEditTask);
  let on_status = {
    let actions = actions.clone();
    Callback::from(move |(id, status): (Uuid, TaskStatus)| {
      actions.change_status(id, status)
    })
  };
  let on_delete_task = {
    let actions = actions.clone();
    Callback::from(move |id: Uuid| actions.delete_task(id))
  };

  let projects = app_state.cache().projects().to_vec();

  let body = match app_state.view() {
    | View::Calendar => {
      let on_drop = {
        let store = store.clone();
        let actions = actions.clone();
        Callback::from(move |key: String| {
          let reschedule = store
            .app
            .dragging()
            .and_then(|dragged| dragged.drop_on(&key));
          store.dispatch(Action::EndDrag);
          if let Some(reschedule) = reschedule {
            actions.reschedule(reschedule);
          }
        })
      };
      let days: Vec<DayCell> = app_state
        .calendar_days()
        .into_iter()
        .map(DayCell::from)
        .collect();
      html! {
          <WeekCalendar
              title={app_state.week_title()}
              {days}
              projects={projects.clone()}
              dragging={app_state.dragging().map(|dragged| dragged.id)}
              on_navigate={dispatcher(&store, Action::NavigateWeek)}
              on_today={trigger(&store, Action::Today)}
              on_drag_start={dispatcher(&store, Action::BeginDrag)}
              on_drag_end={trigger(&store, Action::EndDrag)}
              {on_drop}
              on_status={on_status.clone()}
              on_edit={on_edit_task.clone()}
              on_delete={on_delete_task.clone()}
          />
      }
    }
    | View::Tasks => {
      html! {
          <TaskList
              tasks={app_state.cache().tasks().to_vec()}
              projects={projects.clone()}
              on_new_task={on_new_task.clone()}
              on_status={on_status.clone()}
              on_edit={on_edit_task.clone()}
              on_delete={on_delete_task.clone()}
          />
      }
    }
    | View::Projects => {
      match (app_state.selected_project(), app_state.kanban()) {
        | (Some(project), Some(columns)) => {
          let columns = columns
            .into_iter()
            .map(|column| {
              (
                column.status,
                column.tasks.into_iter().cloned().collect()
              )
            })
            .collect::<Vec<(TaskStatus, Vec<TaskDto>)>>();
          let sprints = app_state
            .cache()
            .sprints_for_project(project.id)
            .cloned()
            .collect::<Vec<_>>();
          html! {
              <KanbanBoard
                  project={project.clone()}
                  {columns}
                  {sprints}
                  on_back={trigger(&store, Action::SelectProject(None))}
                  on_new_task={on_new_task.clone()}
                  on_new_sprint={dispatcher(&store, Action::OpenNewSprint)}
                  on_status={on_status.clone()}
                  on_edit={on_edit_task.clone()}
                  on_delete={on_delete_task.clone()}
              />
          }
        }
        | _ => {
          let cards = app_state
            .project_cards()
            .into_iter()
            .map(|card| (card.project.clone(), card.task_count))
            .collect::<Vec<_>>();
          let on_delete = {
            let actions = actions.clone();
            Callback::from(move |id: Uuid| {
              actions.delete_project(id)
            })
          };
          html! {
              <ProjectView
                  {cards}
                  on_open={dispatcher(&store, |id: Uuid| Action::SelectProject(Some(id)))}
                  on_new_project={trigger(&store, Action::OpenNewProject)}
                  on_edit={dispatcher(&store, Action::OpenEditProject)}
                  {on_delete}
              />
          }
        }
      }
    }
  };

  let task_modal = app_state.task_editor().map(|editor| {
    let on_submit = {
      let actions = actions.clone();
      Callback::from(move |()| actions.save_task())
    };
    html! {
        <TaskModal
            mode={editor.mode()}
            form={editor.form().clone()}
            projects={projects.clone()}
            sprints={app_state.cache().sprints().to_vec()}
            error={store.form_error.clone()}
            loading={app_state.loading()}
            on_change={dispatcher(&store, Action::EditTaskForm)}
            {on_submit}
            on_close={trigger(&store, Action::CloseTaskEditor)}
        />
    }
  });

  let project_modal = app_state.project_editor().map(|editor| {
    let on_submit = {
      let actions = actions.clone();
      Callback::from(move |()| actions.save_project())
    };
    html! {
        <ProjectModal
            mode={editor.mode()}
            form={editor.form().clone()}
            error={store.form_error.clone()}
            loading={app_state.loading()}
            on_change={dispatcher(&store, Action::EditProjectForm)}
            {on_submit}
            on_close={trigger(&store, Action::CloseProjectEditor)}
        />
    }
  });

  let sprint_modal = app_state.sprint_editor().map(|form| {
    let project_name = form
      .project_id
      .and_then(|id| app_state.cache().project(id))
      .map(|project| project.name.clone())
      .unwrap_or_default();
    let on_submit = {
      let actions = actions.clone();
      Callback::from(move |()| actions.save_sprint())
    };
    html! {
        <SprintModal
            form={form.clone()}
            {project_name}
            error={store.form_error.clone()}
            loading={app_state.loading()}
            on_change={dispatcher(&store, Action::EditSprintForm)}
            {on_submit}
            on_close={trigger(&store, Action::CloseSprintEditor)}
        />
    }
  });

  html! {
      <div class="app">
          <NavBar
              view={app_state.view()}
              on_select={on_select_view}
              on_new_task={on_new_task.clone()}
          />
          <main class="content">
              { body }
          </main>
          { task_modal.unwrap_or_default() }
          { project_modal.unwrap_or_default() }
          { sprint_modal.unwrap_or_default() }
          {
              if app_state.loading() {
                  html! { <LoadingOverlay /> }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
