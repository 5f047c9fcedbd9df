//! `TaskApi` over reqwest.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use sprintboard_core::{ApiError, Routes, TaskApi};
use sprintboard_shared::{
    HealthDto, MessageDto, ProjectCreate, ProjectDto, SprintCreate, SprintDto, TaskCreate,
    TaskDto, TaskPatch, TasksQuery,
};
use tracing::{debug, trace};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    routes: Routes,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building HTTP client for the task API")?;
        Ok(Self {
            client,
            routes: Routes::new(base_url),
        })
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    async fn send(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        trace!(method, url, "sending request");
        let response = request
            .send()
            .await
            .map_err(|error| ApiError::Transport {
                method,
                url: url.to_string(),
                reason: error.to_string(),
            })?;

        let status = response.status();
        debug!(method, url, status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: &'static str,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(method, &url, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|error| ApiError::Decode {
                url,
                reason: error.to_string(),
            })
    }

    async fn send_delete(&self, url: String) -> Result<(), ApiError> {
        let request = self.client.delete(&url);
        let message: MessageDto = self.send_json("DELETE", url, request).await?;
        debug!(message = %message.message, "delete acknowledged");
        Ok(())
    }
}

#[async_trait(?Send)]
impl TaskApi for HttpApi {
    async fn list_tasks(&self, query: &TasksQuery) -> Result<Vec<TaskDto>, ApiError> {
        let url = self.routes.tasks(query);
        let request = self.client.get(&url);
        self.send_json("GET", url, request).await
    }

    async fn get_task(&self, id: Uuid) -> Result<TaskDto, ApiError> {
        let url = self.routes.task(id);
        let request = self.client.get(&url);
        self.send_json("GET", url, request).await
    }

    async fn create_task(&self, body: &TaskCreate) -> Result<TaskDto, ApiError> {
        let url = self.routes.tasks(&TasksQuery::default());
        let request = self.client.post(&url).json(body);
        self.send_json("POST", url, request).await
    }

    async fn update_task(&self, id: Uuid, patch: &TaskPatch) -> Result<TaskDto, ApiError> {
        let url = self.routes.task(id);
        let request = self.client.put(&url).json(patch);
        self.send_json("PUT", url, request).await
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ApiError> {
        self.send_delete(self.routes.task(id)).await
    }

    async fn list_projects(&self) -> Result<Vec<ProjectDto>, ApiError> {
        let url = self.routes.projects();
        let request = self.client.get(&url);
        self.send_json("GET", url, request).await
    }

    async fn create_project(&self, body: &ProjectCreate) -> Result<ProjectDto, ApiError> {
        let url = self.routes.projects();
        let request = self.client.post(&url).json(body);
        self.send_json("POST", url, request).await
    }

    async fn update_project(
        &self,
        id: Uuid,
        body: &ProjectCreate,
    ) -> Result<ProjectDto, ApiError> {
        let url = self.routes.project(id);
        let request = self.client.put(&url).json(body);
        self.send_json("PUT", url, request).await
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), ApiError> {
        self.send_delete(self.routes.project(id)).await
    }

    async fn list_sprints(&self, project_id: Option<Uuid>) -> Result<Vec<SprintDto>, ApiError> {
        let url = self.routes.sprints(project_id);
        let request = self.client.get(&url);
        self.send_json("GET", url, request).await
    }

    async fn create_sprint(&self, body: &SprintCreate) -> Result<SprintDto, ApiError> {
        let url = self.routes.sprints(None);
        let request = self.client.post(&url).json(body);
        self.send_json("POST", url, request).await
    }

    async fn health(&self) -> Result<HealthDto, ApiError> {
        let url = self.routes.health();
        let request = self.client.get(&url);
        self.send_json("GET", url, request).await
    }
}
