//! REST surface seen by the client.

use async_trait::async_trait;
use sprintboard_shared::{
  HealthDto,
  ProjectCreate,
  ProjectDto,
  SprintCreate,
  SprintDto,
  TaskCreate,
  TaskDto,
  TaskPatch,
  TasksQuery
};
use uuid::Uuid;

use crate::error::ApiError;

/// Transport for the task/project/sprint
/// endpoints.
///
/// `?Send` so the browser transport can
/// hold JS handles across awaits.
#[async_trait(?Send)]
pub trait TaskApi {
  async fn list_tasks(
    &self,
    query: &TasksQuery
  ) -> Result<Vec<TaskDto>, ApiError>;

  async fn get_task(
    &self,
    id: Uuid
  ) -> Result<TaskDto, ApiError>;

  async fn create_task(
    &self,
    body: &TaskCreate
  ) -> Result<TaskDto, ApiError>;

  async fn update_task(
    &self,
    id: Uuid,
    patch: &TaskPatch
  ) -> Result<TaskDto, ApiError>;

  async fn delete_task(
    &self,
    id: Uuid
  ) -> Result<(), ApiError>;

  async fn list_projects(
    &self
  ) -> Result<Vec<ProjectDto>, ApiError>;

  async fn create_project(
    &self,
    body: &ProjectCreate
  ) -> Result<ProjectDto, ApiError>;

  async fn update_project(
    &self,
    id: Uuid,
    body: &ProjectCreate
  ) -> Result<ProjectDto, ApiError>;

  async fn delete_project(
    &self,
    id: Uuid
  ) -> Result<(), ApiError>;

  async fn list_sprints(
    &self,
    project_id: Option<Uuid>
  ) -> Result<Vec<SprintDto>, ApiError>;

  async fn create_sprint(
    &self,
    body: &SprintCreate
  ) -> Result<SprintDto, ApiError>;

  async fn health(
    &self
  ) -> Result<HealthDto, ApiError>;
}

/// URL builder shared by the HTTP
/// transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
  base: String
}

impl Routes {
  pub fn new(base: &str) -> Self {
    Self {
      base: base.trim().trim_end_matches('/').to_string()
    }
  }

  pub fn base(&self) -> &str {
    &self.base
  }

  pub fn tasks(
    &self,
    query: &TasksQuery
  ) -> String {
    let mut params = Vec::new();
    if let Some(project_id) = query.project_id {
      params.push(format!("project_id={project_id}"));
    }
    if let Some(sprint_id) = query.sprint_id {
      params.push(format!("sprint_id={sprint_id}"));
    }
    with_params(format!("{}/tasks", self.base), &params)
  }

  pub fn task(&self, id: Uuid) -> String {
    format!("{}/tasks/{id}", self.base)
  }

  pub fn projects(&self) -> String {
    format!("{}/projects", self.base)
  }

  pub fn project(&self, id: Uuid) -> String {
    format!("{}/projects/{id}", self.base)
  }

  pub fn sprints(
    &self,
    project_id: Option<Uuid>
  ) -> String {
    let params = project_id
      .map(|id| vec![format!("project_id={id}")])
      .unwrap_or_default();
    with_params(format!("{}/sprints", self.base), &params)
  }

  pub fn health(&self) -> String {
    format!("{}/health", self.base)
  }
}

fn with_params(
  url: String,
  params: &[String]
) -> String {
  if params.is_empty() {
    url
  } else {
    format!("{url}?{}", params.join("&"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_trailing_slash_is_dropped() {
    let routes = Routes::new("http://localhost:8001/api/");
    assert_eq!(
      routes.projects(),
      "http://localhost:8001/api/projects"
    );
  }

  #[test]
  fn unfiltered_task_list_has_no_query() {
    let routes = Routes::new("http://host/api");
    assert_eq!(
      routes.tasks(&TasksQuery::default()),
      "http://host/api/tasks"
    );
  }

  #[test]
  fn task_filters_become_query_params() {
    let project_id = Uuid::nil();
    let routes = Routes::new("http://host/api");
    let url = routes.tasks(&TasksQuery {
      project_id: Some(project_id),
      sprint_id:  None
    });
    assert_eq!(
      url,
      format!(
        "http://host/api/tasks?project_id={project_id}"
      )
    );
  }
}
