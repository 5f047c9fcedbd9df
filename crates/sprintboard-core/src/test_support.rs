use sprintboard_shared::{
  DEFAULT_PROJECT_COLOR,
  ProjectDto,
  SprintDto,
  SprintStatus,
  TaskDto,
  TaskPriority,
  TaskStatus
};
use uuid::Uuid;

pub(crate) fn task(title: &str) -> TaskDto {
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

pub(crate) fn due_task(
  title: &str,
  due_date: &str
) -> TaskDto {
  TaskDto {
    due_date: Some(due_date.to_string()),
    ..task(title)
  }
}

pub(crate) fn project(name: &str) -> ProjectDto {
  ProjectDto {
    id:           Uuid::new_v4(),
    name:         name.to_string(),
    description:  None,
    color:        DEFAULT_PROJECT_COLOR
      .to_string(),
    created_date: None,
    updated_date: None
  }
}

pub(crate) fn sprint(
  name: &str,
  project_id: Uuid
) -> SprintDto {
  SprintDto {
    id: Uuid::new_v4(),
    name: name.to_string(),
    description: None,
    project_id,
    status: SprintStatus::Planning,
    start_date: None,
    end_date: None,
    goal: None,
    created_date: None,
    updated_date: None
  }
}
