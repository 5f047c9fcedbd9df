//! Request/refetch cycles.
//!
//! Every mutation is followed by a full re-fetch of the collections it
//! touches. Server responses to mutations are never merged into the
//! cache, and failures are logged and swallowed: callers only learn
//! whether the mutation committed and which collections came back.

use std::future::Future;

use sprintboard_shared::{
  ProjectCreate,
  ProjectDto,
  SprintCreate,
  SprintDto,
  TaskCreate,
  TaskDto,
  TaskPatch,
  TaskStatus,
  TasksQuery
};
use tracing::{
  debug,
  error,
  info,
  instrument
};
use uuid::Uuid;

use crate::api::TaskApi;
use crate::cache::EntityCache;
use crate::drag::Reschedule;
use crate::error::ApiError;

/// Collections that came back from a
/// fetch. `None` means the fetch was not
/// attempted or failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Refresh {
  pub tasks:    Option<Vec<TaskDto>>,
  pub projects: Option<Vec<ProjectDto>>,
  pub sprints:  Option<Vec<SprintDto>>
}

impl Refresh {
  pub fn is_empty(&self) -> bool {
    self.tasks.is_none()
      && self.projects.is_none()
      && self.sprints.is_none()
  }

  pub fn apply_to(
    self,
    cache: &mut EntityCache
  ) {
    if let Some(tasks) = self.tasks {
      cache.replace_tasks(tasks);
    }
    if let Some(projects) = self.projects {
      cache.replace_projects(projects);
    }
    if let Some(sprints) = self.sprints {
      cache.replace_sprints(sprints);
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
  /// The mutating request itself
  /// succeeded.
  pub committed: bool,
  pub refresh:   Refresh
}

impl Outcome {
  fn failed() -> Self {
    Self {
      committed: false,
      refresh:   Refresh::default()
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshScope {
  Tasks,
  Projects,
  Sprints,
  All
}

#[derive(Debug, Clone)]
pub struct SyncClient<A> {
  api: A
}

impl<A: TaskApi> SyncClient<A> {
  pub fn new(api: A) -> Self {
    Self { api }
  }

  pub fn api(&self) -> &A {
    &self.api
  }

  #[instrument(skip(self))]
  pub async fn fetch_tasks(
    &self
  ) -> Option<Vec<TaskDto>> {
    swallow(
      "fetch_tasks",
      self.api.list_tasks(&TasksQuery::default())
    )
    .await
  }

  #[instrument(skip(self))]
  pub async fn fetch_projects(
    &self
  ) -> Option<Vec<ProjectDto>> {
    swallow("fetch_projects", self.api.list_projects())
      .await
  }

  #[instrument(skip(self))]
  pub async fn fetch_sprints(
    &self
  ) -> Option<Vec<SprintDto>> {
    swallow("fetch_sprints", self.api.list_sprints(None))
      .await
  }

  /// Server-side filtered listing. The
  /// result is not a cache refresh.
  #[instrument(skip(self))]
  pub async fn fetch_tasks_matching(
    &self,
    query: &TasksQuery
  ) -> Option<Vec<TaskDto>> {
    swallow("fetch_tasks_matching", self.api.list_tasks(query))
      .await
  }

  #[instrument(skip(self))]
  pub async fn fetch_sprints_of(
    &self,
    project_id: Option<Uuid>
  ) -> Option<Vec<SprintDto>> {
    swallow("fetch_sprints_of", self.api.list_sprints(project_id))
      .await
  }

  /// Initial mount: all three collections,
  /// concurrently.
  #[instrument(skip(self))]
  pub async fn load_all(&self) -> Refresh {
    self.refresh(RefreshScope::All).await
  }

  pub async fn refresh(
    &self,
    scope: RefreshScope
  ) -> Refresh {
    match scope {
      | RefreshScope::Tasks => {
        Refresh {
          tasks: self.fetch_tasks().await,
          ..Refresh::default()
        }
      }
      | RefreshScope::Projects => {
        Refresh {
          projects: self.fetch_projects().await,
          ..Refresh::default()
        }
      }
      | RefreshScope::Sprints => {
        Refresh {
          sprints: self.fetch_sprints().await,
          ..Refresh::default()
        }
      }
      | RefreshScope::All => {
        let (tasks, projects, sprints) = futures::join!(
          self.fetch_tasks(),
          self.fetch_projects(),
          self.fetch_sprints()
        );
        Refresh {
          tasks,
          projects,
          sprints
        }
      }
    }
  }

  #[instrument(skip(self, body), fields(title_len = body.title.len()))]
  pub async fn create_task(
    &self,
    body: &TaskCreate
  ) -> Outcome {
    self
      .mutate(
        "create_task",
        self.api.create_task(body),
        RefreshScope::Tasks
      )
      .await
  }

  #[instrument(skip(self, patch))]
  pub async fn update_task(
    &self,
    id: Uuid,
    patch: &TaskPatch
  ) -> Outcome {
    if patch.is_empty() {
      debug!(%id, "task patch is empty; skipping update");
      return Outcome {
        committed: true,
        refresh:   Refresh::default()
      };
    }
    self
      .mutate(
        "update_task",
        self.api.update_task(id, patch),
        RefreshScope::Tasks
      )
      .await
  }

  #[instrument(skip(self))]
  pub async fn change_status(
    &self,
    id: Uuid,
    status: TaskStatus
  ) -> Outcome {
    self
      .mutate(
        "change_status",
        self.api.update_task(id, &TaskPatch::status(status)),
        RefreshScope::Tasks
      )
      .await
  }

  /// Due-date-only update issued by a
  /// calendar drop.
  #[instrument(skip(self))]
  pub async fn reschedule(
    &self,
    reschedule: Reschedule
  ) -> Outcome {
    let (id, patch) = reschedule.into_patch();
    self
      .mutate(
        "reschedule",
        self.api.update_task(id, &patch),
        RefreshScope::Tasks
      )
      .await
  }

  #[instrument(skip(self))]
  pub async fn delete_task(
    &self,
    id: Uuid
  ) -> Outcome {
    self
      .mutate(
        "delete_task",
        self.api.delete_task(id),
        RefreshScope::Tasks
      )
      .await
  }

  #[instrument(skip(self, body), fields(name = %body.name))]
  pub async fn create_project(
    &self,
    body: &ProjectCreate
  ) -> Outcome {
    self
      .mutate(
        "create_project",
        self.api.create_project(body),
        RefreshScope::Projects
      )
      .await
  }

  #[instrument(skip(self, body), fields(name = %body.name))]
  pub async fn update_project(
    &self,
    id: Uuid,
    body: &ProjectCreate
  ) -> Outcome {
    self
      .mutate(
        "update_project",
        self.api.update_project(id, body),
        RefreshScope::Projects
      )
      .await
  }

  /// The server deletes the project's
  /// tasks and sprints too, so everything
  /// is refetched.
  #[instrument(skip(self))]
  pub async fn delete_project(
    &self,
    id: Uuid
  ) -> Outcome {
    self
      .mutate(
        "delete_project",
        self.api.delete_project(id),
        RefreshScope::All
      )
      .await
  }

  #[instrument(skip(self, body), fields(name = %body.name, project_id = %body.project_id))]
  pub async fn create_sprint(
    &self,
    body: &SprintCreate
  ) -> Outcome {
    self
      .mutate(
        "create_sprint",
        self.api.create_sprint(body),
        RefreshScope::Sprints
      )
      .await
  }

  async fn mutate<T>(
    &self,
    op: &'static str,
    request: impl Future<Output = Result<T, ApiError>>,
    scope: RefreshScope
  ) -> Outcome {
    match request.await {
      | Ok(_) => {
        info!(op, ?scope, "mutation committed; refetching");
        Outcome {
          committed: true,
          refresh:   self.refresh(scope).await
        }
      }
      | Err(error) => {
        error!(op, %error, "mutation failed");
        Outcome::failed()
      }
    }
  }
}

async fn swallow<T>(
  op: &'static str,
  request: impl Future<Output = Result<Vec<T>, ApiError>>
) -> Option<Vec<T>> {
  match request.await {
    | Ok(items) => {
      debug!(op, count = items.len(), "fetch succeeded");
      Some(items)
    }
    | Err(error) => {
      error!(op, %error, "fetch failed");
      None
    }
  }
}
