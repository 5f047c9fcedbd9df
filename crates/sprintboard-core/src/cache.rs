use sprintboard_shared::{
  ProjectDto,
  SprintDto,
  TaskDto
};
use tracing::debug;
use uuid::Uuid;

/// Last full fetch of each collection.
///
/// Collections are only ever replaced
/// wholesale; nothing here patches a
/// single entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityCache {
  tasks:    Vec<TaskDto>,
  projects: Vec<ProjectDto>,
  sprints:  Vec<SprintDto>
}

impl EntityCache {
  pub fn tasks(&self) -> &[TaskDto] {
    &self.tasks
  }

  pub fn projects(&self) -> &[ProjectDto] {
    &self.projects
  }

  pub fn sprints(&self) -> &[SprintDto] {
    &self.sprints
  }

  pub fn replace_tasks(
    &mut self,
    tasks: Vec<TaskDto>
  ) {
    debug!(
      previous = self.tasks.len(),
      next = tasks.len(),
      "replacing task cache"
    );
    self.tasks = tasks;
  }

  pub fn replace_projects(
    &mut self,
    projects: Vec<ProjectDto>
  ) {
    debug!(
      previous = self.projects.len(),
      next = projects.len(),
      "replacing project cache"
    );
    self.projects = projects;
  }

  pub fn replace_sprints(
    &mut self,
    sprints: Vec<SprintDto>
  ) {
    debug!(
      previous = self.sprints.len(),
      next = sprints.len(),
      "replacing sprint cache"
    );
    self.sprints = sprints;
  }

  pub fn task(
    &self,
    id: Uuid
  ) -> Option<&TaskDto> {
    self.tasks.iter().find(|task| task.id == id)
  }

  pub fn project(
    &self,
    id: Uuid
  ) -> Option<&ProjectDto> {
    self
      .projects
      .iter()
      .find(|project| project.id == id)
  }

  pub fn sprint(
    &self,
    id: Uuid
  ) -> Option<&SprintDto> {
    self
      .sprints
      .iter()
      .find(|sprint| sprint.id == id)
  }

  pub fn tasks_for_project(
    &self,
    project_id: Uuid
  ) -> impl Iterator<Item = &TaskDto> {
    self.tasks.iter().filter(move |task| {
      task.project_id == Some(project_id)
    })
  }

  pub fn sprints_for_project(
    &self,
    project_id: Uuid
  ) -> impl Iterator<Item = &SprintDto> {
    self.sprints.iter().filter(move |sprint| {
      sprint.project_id == project_id
    })
  }
}
