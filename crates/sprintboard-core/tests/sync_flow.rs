use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sprintboard_core::calendar::{
  DateKeying,
  Zone
};
use sprintboard_core::forms::TaskSubmission;
use sprintboard_core::views::View;
use sprintboard_core::{
  ApiError,
  AppState,
  SyncClient,
  TaskApi
};
use sprintboard_shared::{
  HealthDto,
  ProjectCreate,
  ProjectDto,
  SprintCreate,
  SprintDto,
  SprintStatus,
  TaskCreate,
  TaskDto,
  TaskPatch,
  TaskPriority,
  TaskStatus,
  TasksQuery
};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
enum Call {
  ListTasks,
  CreateTask(TaskCreate),
  UpdateTask(Uuid, TaskPatch),
  DeleteTask(Uuid),
  ListProjects,
  CreateProject,
  DeleteProject(Uuid),
  ListSprints,
  CreateSprint
}

#[derive(Default)]
struct Server {
  tasks:       Vec<TaskDto>,
  projects:    Vec<ProjectDto>,
  sprints:     Vec<SprintDto>,
  calls:       Vec<Call>,
  fail_writes: bool,
  fail_reads:  bool
}

/// In-memory stand-in for the REST
/// backend, cascading project deletes
/// like the real one.
#[derive(Clone, Default)]
struct FakeApi {
  server: Rc<RefCell<Server>>
}

impl FakeApi {
  fn calls(&self) -> Vec<Call> {
    self.server.borrow().calls.clone()
  }

  fn clear_calls(&self) {
    self.server.borrow_mut().calls.clear();
  }

  fn set_fail_writes(&self, fail: bool) {
    self.server.borrow_mut().fail_writes = fail;
  }

  fn set_fail_reads(&self, fail: bool) {
    self.server.borrow_mut().fail_reads = fail;
  }

  fn seed_task(&self, task: TaskDto) {
    self.server.borrow_mut().tasks.push(task);
  }

  fn seed_project(&self, project: ProjectDto) {
    self.server.borrow_mut().projects.push(project);
  }

  fn seed_sprint(&self, sprint: SprintDto) {
    self.server.borrow_mut().sprints.push(sprint);
  }

  fn record(
    &self,
    call: Call,
    write: bool
  ) -> Result<(), ApiError> {
    let mut server = self.server.borrow_mut();
    server.calls.push(call);
    let failing =
      if write { server.fail_writes } else { server.fail_reads };
    if failing {
      return Err(ApiError::Status {
        method: if write { "POST" } else { "GET" },
        url:    "fake://".to_string(),
        status: 500,
        body:   "boom".to_string()
      });
    }
    Ok(())
  }
}

fn not_found(id: Uuid) -> ApiError {
  ApiError::Status {
    method: "GET",
    url:    format!("fake://{id}"),
    status: 404,
    body:   "not found".to_string()
  }
}

#[async_trait(?Send)]
impl TaskApi for FakeApi {
  async fn list_tasks(
    &self,
    _query: &TasksQuery
  ) -> Result<Vec<TaskDto>, ApiError> {
    self.record(Call::ListTasks, false)?;
    Ok(self.server.borrow().tasks.clone())
  }

  async fn get_task(
    &self,
    id: Uuid
  ) -> Result<TaskDto, ApiError> {
    self
      .server
      .borrow()
      .tasks
      .iter()
      .find(|task| task.id == id)
      .cloned()
      .ok_or_else(|| not_found(id))
  }

  async fn create_task(
    &self,
    body: &TaskCreate
  ) -> Result<TaskDto, ApiError> {
    self.record(Call::CreateTask(body.clone()), true)?;
    let task = TaskDto {
      id:           Uuid::new_v4(),
      title:        body.title.clone(),
      description:  body.description.clone(),
      status:       body.status,
      priority:     body.priority,
      project_id:   body.project_id,
      sprint_id:    body.sprint_id,
      assigned_to:  body.assigned_to.clone(),
      due_date:     body.due_date.clone(),
      story_points: body.story_points,
      created_date: None,
      updated_date: None
    };
    self.server.borrow_mut().tasks.push(task.clone());
    Ok(task)
  }

  async fn update_task(
    &self,
    id: Uuid,
    patch: &TaskPatch
  ) -> Result<TaskDto, ApiError> {
    self.record(Call::UpdateTask(id, patch.clone()), true)?;
    let mut server = self.server.borrow_mut();
    let task = server
      .tasks
      .iter_mut()
      .find(|task| task.id == id)
      .ok_or_else(|| not_found(id))?;
    if let Some(status) = patch.status {
      task.status = status;
    }
    if let Some(due_date) = &patch.due_date {
      task.due_date = due_date.clone();
    }
    if let Some(title) = &patch.title {
      task.title = title.clone();
    }
    Ok(task.clone())
  }

  async fn delete_task(
    &self,
    id: Uuid
  ) -> Result<(), ApiError> {
    self.record(Call::DeleteTask(id), true)?;
    self
      .server
      .borrow_mut()
      .tasks
      .retain(|task| task.id != id);
    Ok(())
  }

  async fn list_projects(
    &self
  ) -> Result<Vec<ProjectDto>, ApiError> {
    self.record(Call::ListProjects, false)?;
    Ok(self.server.borrow().projects.clone())
  }

  async fn create_project(
    &self,
    body: &ProjectCreate
  ) -> Result<ProjectDto, ApiError> {
    self.record(Call::CreateProject, true)?;
    let project = ProjectDto {
      id:           Uuid::new_v4(),
      name:         body.name.clone(),
      description:  body.description.clone(),
      color:        body.color.clone(),
      created_date: None,
      updated_date: None
    };
    self.server.borrow_mut().projects.push(project.clone());
    Ok(project)
  }

  async fn update_project(
    &self,
    id: Uuid,
    _body: &ProjectCreate
  ) -> Result<ProjectDto, ApiError> {
    Err(not_found(id))
  }

  async fn delete_project(
    &self,
    id: Uuid
  ) -> Result<(), ApiError> {
    self.record(Call::DeleteProject(id), true)?;
    let mut server = self.server.borrow_mut();
    server.projects.retain(|project| project.id != id);
    server
      .tasks
      .retain(|task| task.project_id != Some(id));
    server
      .sprints
      .retain(|sprint| sprint.project_id != id);
    Ok(())
  }

  async fn list_sprints(
    &self,
    _project_id: Option<Uuid>
  ) -> Result<Vec<SprintDto>, ApiError> {
    self.record(Call::ListSprints, false)?;
    Ok(self.server.borrow().sprints.clone())
  }

  async fn create_sprint(
    &self,
    body: &SprintCreate
  ) -> Result<SprintDto, ApiError> {
    self.record(Call::CreateSprint, true)?;
    let sprint = SprintDto {
      id:           Uuid::new_v4(),
      name:         body.name.clone(),
      description:  body.description.clone(),
      project_id:   body.project_id,
      status:       SprintStatus::Planning,
      start_date:   body.start_date.clone(),
      end_date:     body.end_date.clone(),
      goal:         body.goal.clone(),
      created_date: None,
      updated_date: None
    };
    self.server.borrow_mut().sprints.push(sprint.clone());
    Ok(sprint)
  }

  async fn health(
    &self
  ) -> Result<HealthDto, ApiError> {
    Ok(HealthDto {
      status:    "healthy".to_string(),
      timestamp: None
    })
  }
}

fn date(
  year: i32,
  month: u32,
  day: u32
) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day)
    .expect("valid date")
}

fn state() -> AppState {
  AppState::new(
    date(2024, 3, 13),
    Zone::System,
    DateKeying::Local
  )
}

fn project(name: &str) -> ProjectDto {
  ProjectDto {
    id:           Uuid::new_v4(),
    name:         name.to_string(),
    description:  None,
    color:        "#8B5CF6".to_string(),
    created_date: None,
    updated_date: None
  }
}

fn task(title: &str) -> TaskDto {
  TaskDto {
    id:           Uuid::new_v4(),
    title:        title.to_string(),
    description:  None,
    status:       TaskStatus::Todo,
    priority:     TaskPriority::Medium,
    project_id:   None,
    sprint_id:    None,
    assigned_to:  None,
    due_date:     None,
    story_points: None,
    created_date: None,
    updated_date: None
  }
}

fn titles_in_cells(state: &AppState) -> Vec<(String, Vec<String>)> {
  state
    .calendar_days()
    .into_iter()
    .map(|day| {
      (
        day.key,
        day
          .tasks
          .iter()
          .map(|task| task.title.clone())
          .collect()
      )
    })
    .collect()
}

#[tokio::test]
async fn initial_load_fetches_all_collections() {
  let api = FakeApi::default();
  let board = project("Board");
  api.seed_project(board.clone());
  api.seed_task(task("one"));
  api.seed_sprint(SprintDto {
    id:           Uuid::new_v4(),
    name:         "S1".to_string(),
    description:  None,
    project_id:   board.id,
    status:       SprintStatus::Active,
    start_date:   None,
    end_date:     None,
    goal:         None,
    created_date: None,
    updated_date: None
  });
  let sync = SyncClient::new(api.clone());
  let mut state = state();

  state.apply(sync.load_all().await);

  assert_eq!(state.cache().tasks().len(), 1);
  assert_eq!(state.cache().projects().len(), 1);
  assert_eq!(state.cache().sprints().len(), 1);
  let mut calls = api.calls();
  calls.sort_by_key(|call| format!("{call:?}"));
  assert_eq!(
    calls,
    vec![Call::ListProjects, Call::ListSprints, Call::ListTasks]
  );
}

#[tokio::test]
async fn failed_initial_fetch_leaves_collection_empty() {
  let api = FakeApi::default();
  api.seed_task(task("hidden"));
  api.set_fail_reads(true);
  let sync = SyncClient::new(api.clone());
  let mut state = state();

  let refresh = sync.load_all().await;
  assert!(refresh.is_empty());
  state.apply(refresh);
  assert!(state.cache().tasks().is_empty());
}

#[tokio::test]
async fn created_task_shows_in_board_and_list_but_not_calendar() {
  let api = FakeApi::default();
  let board = project("Board");
  api.seed_project(board.clone());
  let sync = SyncClient::new(api.clone());
  let mut state = state();
  state.apply(sync.load_all().await);
  state.select_project(Some(board.id));

  state.open_new_task();
  {
    let form = state
      .task_editor_mut()
      .expect("editor open")
      .form_mut();
    form.title = "Write spec".to_string();
    form.priority = TaskPriority::High;
    form.set_project(Some(board.id));
  }
  let submission = state
    .task_editor()
    .expect("editor open")
    .submission(state.cache().sprints())
    .expect("valid form");
  let TaskSubmission::Create(body) = submission else {
    panic!("new task must be a create");
  };

  state.set_loading(true);
  let outcome = sync.create_task(&body).await;
  assert!(state.finish_task_save(outcome));
  assert!(state.task_editor().is_none());
  assert!(!state.loading());

  let created = state
    .cache()
    .tasks()
    .iter()
    .find(|task| task.title == "Write spec")
    .expect("refetched task");
  assert_eq!(created.status, TaskStatus::Todo);

  let columns = state.kanban().expect("project selected");
  assert_eq!(columns[0].status, TaskStatus::Todo);
  assert_eq!(columns[0].tasks.len(), 1);

  state.set_view(View::Tasks);
  assert_eq!(state.cache().tasks().len(), 1);

  assert!(
    titles_in_cells(&state)
      .iter()
      .all(|(_, titles)| titles.is_empty())
  );
}

#[tokio::test]
async fn drop_on_another_day_issues_one_due_date_update() {
  let api = FakeApi::default();
  let moving = TaskDto {
    due_date: Some("2024-03-10".to_string()),
    ..task("moving")
  };
  api.seed_task(moving.clone());
  let sync = SyncClient::new(api.clone());
  let mut state = state();
  state.apply(sync.load_all().await);
  api.clear_calls();

  assert!(state.begin_drag(moving.id));
  let reschedule =
    state.drop_on("2024-03-12").expect("new day");
  let outcome = sync.reschedule(reschedule).await;
  assert!(state.finish_untracked(outcome));

  assert_eq!(
    api.calls(),
    vec![
      Call::UpdateTask(
        moving.id,
        TaskPatch::due_date("2024-03-12")
      ),
      Call::ListTasks,
    ]
  );
  for (key, titles) in titles_in_cells(&state) {
    if key == "2024-03-12" {
      assert_eq!(titles, vec!["moving".to_string()]);
    } else {
      assert!(titles.is_empty(), "{key} should be empty");
    }
  }
}

#[tokio::test]
async fn failed_save_keeps_editor_and_skips_refetch() {
  let api = FakeApi::default();
  let sync = SyncClient::new(api.clone());
  let mut state = state();
  api.set_fail_writes(true);

  state.open_new_task();
  state
    .task_editor_mut()
    .expect("editor open")
    .form_mut()
    .title = "Doomed".to_string();
  let TaskSubmission::Create(body) = state
    .task_editor()
    .expect("editor open")
    .submission(state.cache().sprints())
    .expect("valid form")
  else {
    panic!("new task must be a create");
  };

  state.set_loading(true);
  let outcome = sync.create_task(&body).await;
  assert!(!state.finish_task_save(outcome));
  assert!(state.task_editor().is_some());
  assert!(!state.loading());
  assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn failed_refetch_after_save_closes_editor_and_keeps_cache() {
  let api = FakeApi::default();
  api.seed_task(task("existing"));
  let sync = SyncClient::new(api.clone());
  let mut state = state();
  state.apply(sync.load_all().await);
  api.set_fail_reads(true);

  state.open_new_task();
  state
    .task_editor_mut()
    .expect("editor open")
    .form_mut()
    .title = "Saved blind".to_string();
  let TaskSubmission::Create(body) = state
    .task_editor()
    .expect("editor open")
    .submission(state.cache().sprints())
    .expect("valid form")
  else {
    panic!("new task must be a create");
  };

  state.set_loading(true);
  let outcome = sync.create_task(&body).await;
  assert!(outcome.committed);
  assert!(outcome.refresh.is_empty());
  assert!(state.finish_task_save(outcome));
  assert!(state.task_editor().is_none());
  assert!(!state.loading());
  let titles: Vec<&str> = state
    .cache()
    .tasks()
    .iter()
    .map(|task| task.title.as_str())
    .collect();
  assert_eq!(titles, vec!["existing"]);
}

#[tokio::test]
async fn status_change_refetches_tasks_only() {
  let api = FakeApi::default();
  let queued = task("queued");
  api.seed_task(queued.clone());
  let sync = SyncClient::new(api.clone());
  let mut state = state();
  state.apply(sync.load_all().await);
  api.clear_calls();

  let outcome =
    sync.change_status(queued.id, TaskStatus::Done).await;
  state.apply(outcome.refresh);

  assert_eq!(
    api.calls(),
    vec![
      Call::UpdateTask(
        queued.id,
        TaskPatch::status(TaskStatus::Done)
      ),
      Call::ListTasks,
    ]
  );
  assert_eq!(
    state.cache().task(queued.id).map(|task| task.status),
    Some(TaskStatus::Done)
  );
}

#[tokio::test]
async fn empty_patch_sends_nothing() {
  let api = FakeApi::default();
  let sync = SyncClient::new(api.clone());

  let outcome =
    sync.update_task(Uuid::new_v4(), &TaskPatch::default()).await;
  assert!(outcome.committed);
  assert!(outcome.refresh.is_empty());
  assert!(api.calls().is_empty());
}

#[tokio::test]
async fn project_delete_refreshes_every_collection() {
  let api = FakeApi::default();
  let doomed = project("Doomed");
  api.seed_project(doomed.clone());
  api.seed_task(TaskDto {
    project_id: Some(doomed.id),
    ..task("member")
  });
  api.seed_task(task("loose"));
  let sync = SyncClient::new(api.clone());
  let mut state = state();
  state.apply(sync.load_all().await);
  state.select_project(Some(doomed.id));
  api.clear_calls();

  let outcome = sync.delete_project(doomed.id).await;
  assert!(outcome.committed);
  assert!(outcome.refresh.tasks.is_some());
  assert!(outcome.refresh.projects.is_some());
  assert!(outcome.refresh.sprints.is_some());
  state.apply(outcome.refresh);

  assert!(state.cache().projects().is_empty());
  let titles = state
    .cache()
    .tasks()
    .iter()
    .map(|task| task.title.as_str())
    .collect::<Vec<_>>();
  assert_eq!(titles, vec!["loose"]);
  assert!(state.selected_project().is_none());
  assert_eq!(api.calls()[0], Call::DeleteProject(doomed.id));
  assert_eq!(api.calls().len(), 4);
}

#[tokio::test]
async fn sprint_create_refetches_sprints() {
  let api = FakeApi::default();
  let board = project("Board");
  api.seed_project(board.clone());
  let sync = SyncClient::new(api.clone());
  let mut state = state();
  state.apply(sync.load_all().await);
  api.clear_calls();

  state.open_new_sprint(board.id);
  state
    .sprint_editor_mut()
    .expect("sprint editor")
    .name = "Sprint 1".to_string();
  let body = state
    .sprint_editor()
    .expect("sprint editor")
    .to_body()
    .expect("valid sprint");

  let outcome = sync.create_sprint(&body).await;
  assert!(state.finish_sprint_save(outcome));
  assert!(state.sprint_editor().is_none());
  assert_eq!(
    api.calls(),
    vec![Call::CreateSprint, Call::ListSprints]
  );
  assert_eq!(
    state
      .cache()
      .sprints_for_project(board.id)
      .count(),
    1
  );
}
