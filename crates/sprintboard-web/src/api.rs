use async_trait::async_trait;
use gloo::net::http::{
  Request,
  RequestBuilder,
  Response
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sprintboard_core::{
  ApiError,
  Routes,
  TaskApi
};
use sprintboard_shared::{
  HealthDto,
  MessageDto,
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

/// `TaskApi` over the browser's fetch.
/// No timeout; the browser owns the
/// connection lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct WebApi {
  routes: Routes
}

impl WebApi {
  pub fn new(base_url: &str) -> Self {
    Self {
      routes: Routes::new(base_url)
    }
  }

  async fn fetch<T: DeserializeOwned>(
    method: &'static str,
    url: String,
    request: Request
  ) -> Result<T, ApiError> {
    let response =
      request.send().await.map_err(|error| {
        ApiError::Transport {
          method,
          url: url.clone(),
          reason: error.to_string()
        }
      })?;
    let response =
      check_status(method, &url, response).await?;
    response.json::<T>().await.map_err(|error| {
      ApiError::Decode {
        url,
        reason: error.to_string()
      }
    })
  }

  async fn without_body<T: DeserializeOwned>(
    method: &'static str,
    url: String,
    builder: RequestBuilder
  ) -> Result<T, ApiError> {
    let request = builder
      .build()
      .map_err(|error| ApiError::Encode(error.to_string()))?;
    Self::fetch(method, url, request).await
  }

  async fn with_body<B, T>(
    method: &'static str,
    url: String,
    builder: RequestBuilder,
    body: &B
  ) -> Result<T, ApiError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned
  {
    let request = builder
      .json(body)
      .map_err(|error| ApiError::Encode(error.to_string()))?;
    Self::fetch(method, url, request).await
  }
}

async fn check_status(
  method: &'static str,
  url: &str,
  response: Response
) -> Result<Response, ApiError> {
  if response.ok() {
    return Ok(response);
  }
  let status = response.status();
  let body = response.text().await.unwrap_or_default();
  Err(ApiError::Status {
    method,
    url: url.to_string(),
    status,
    body
  })
}

#[async_trait(?Send)]
impl TaskApi for WebApi {
  async fn list_tasks(
    &self,
    query: &TasksQuery
  ) -> Result<Vec<TaskDto>, ApiError> {
    let url = self.routes.tasks(query);
    Self::without_body("GET", url.clone(), Request::get(&url)).await
  }

  async fn get_task(
    &self,
    id: Uuid
  ) -> Result<TaskDto, ApiError> {
    let url = self.routes.task(id);
    Self::without_body("GET", url.clone(), Request::get(&url)).await
  }

  async fn create_task(
    &self,
    body: &TaskCreate
  ) -> Result<TaskDto, ApiError> {
    let url = self.routes.tasks(&TasksQuery::default());
    Self::with_body("POST", url.clone(), Request::post(&url), body)
      .await
  }

  async fn update_task(
    &self,
    id: Uuid,
    patch: &TaskPatch
  ) -> Result<TaskDto, ApiError> {
    let url = self.routes.task(id);
    Self::with_body("PUT", url.clone(), Request::put(&url), patch)
      .await
  }

  async fn delete_task(
    &self,
    id: Uuid
  ) -> Result<(), ApiError> {
    let url = self.routes.task(id);
    let message: MessageDto = Self::without_body(
      "DELETE",
      url.clone(),
      Request::delete(&url)
    )
    .await?;
    tracing::debug!(message = %message.message, "task deleted");
    Ok(())
  }

  async fn list_projects(
    &self
  ) -> Result<Vec<ProjectDto>, ApiError> {
    let url = self.routes.projects();
    Self::without_body("GET", url.clone(), Request::get(&url)).await
  }

  async fn create_project(
    &self,
    body: &ProjectCreate
  ) -> Result<ProjectDto, ApiError> {
    let url = self.routes.projects();
    Self::with_body("POST", url.clone(), Request::post(&url), body)
      .await
  }

  async fn update_project(
    &self,
    id: Uuid,
    body: &ProjectCreate
  ) -> Result<ProjectDto, ApiError> {
    let url = self.routes.project(id);
    Self::with_body("PUT", url.clone(), Request::put(&url), body)
      .await
  }

  async fn delete_project(
    &self,
    id: Uuid
  ) -> Result<(), ApiError> {
    let url = self.routes.project(id);
    let message: MessageDto = Self::without_body(
      "DELETE",
      url.clone(),
      Request::delete(&url)
    )
    .await?;
    tracing::debug!(message = %message.message, "project deleted");
    Ok(())
  }

  async fn list_sprints(
    &self,
    project_id: Option<Uuid>
  ) -> Result<Vec<SprintDto>, ApiError> {
    let url = self.routes.sprints(project_id);
    Self::without_body("GET", url.clone(), Request::get(&url)).await
  }

  async fn create_sprint(
    &self,
    body: &SprintCreate
  ) -> Result<SprintDto, ApiError> {
    let url = self.routes.sprints(None);
    Self::with_body("POST", url.clone(), Request::post(&url), body)
      .await
  }

  async fn health(
    &self
  ) -> Result<HealthDto, ApiError> {
    let url = self.routes.health();
    Self::without_body("GET", url.clone(), Request::get(&url)).await
  }
}
