use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

pub const DEFAULT_PROJECT_COLOR: &str =
  "#8B5CF6";
pub const STORY_POINTS_MIN: u8 = 1;
pub const STORY_POINTS_MAX: u8 = 21;

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  #[default]
  Todo,
  InProgress,
  Review,
  Done
}

impl TaskStatus {
  /// Board column order.
  pub const ALL: [Self; 4] = [
    Self::Todo,
    Self::InProgress,
    Self::Review,
    Self::Done
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Todo => "todo",
      | Self::InProgress => "in_progress",
      | Self::Review => "review",
      | Self::Done => "done"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Todo => "To Do",
      | Self::InProgress => "In Progress",
      | Self::Review => "Review",
      | Self::Done => "Done"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key.trim() {
      | "todo" => Some(Self::Todo),
      | "in_progress" | "in-progress" => {
        Some(Self::InProgress)
      }
      | "review" => Some(Self::Review),
      | "done" => Some(Self::Done),
      | _ => None
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
  Low,
  #[default]
  Medium,
  High,
  Urgent
}

impl TaskPriority {
  pub const ALL: [Self; 4] = [
    Self::Low,
    Self::Medium,
    Self::High,
    Self::Urgent
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Low => "low",
      | Self::Medium => "medium",
      | Self::High => "high",
      | Self::Urgent => "urgent"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Low => "Low",
      | Self::Medium => "Medium",
      | Self::High => "High",
      | Self::Urgent => "Urgent"
    }
  }

  /// Single-letter marker used on
  /// compact kanban cards.
  pub fn initial(self) -> char {
    match self {
      | Self::Low => 'L',
      | Self::Medium => 'M',
      | Self::High => 'H',
      | Self::Urgent => 'U'
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key.trim() {
      | "low" => Some(Self::Low),
      | "medium" => Some(Self::Medium),
      | "high" => Some(Self::High),
      | "urgent" => Some(Self::Urgent),
      | _ => None
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
  #[default]
  Planning,
  Active,
  Completed
}

impl SprintStatus {
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Planning => "planning",
      | Self::Active => "active",
      | Self::Completed => "completed"
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskDto {
  pub id:           Uuid,
  #[serde(default)]
  pub title:        String,
  #[serde(default)]
  pub description:  Option<String>,
  #[serde(default)]
  pub status:       TaskStatus,
  #[serde(default)]
  pub priority:     TaskPriority,
  #[serde(default)]
  pub project_id:   Option<Uuid>,
  #[serde(default)]
  pub sprint_id:    Option<Uuid>,
  #[serde(default)]
  pub assigned_to:  Option<String>,
  /// ISO `YYYY-MM-DD`, compared
  /// verbatim against calendar cells.
  #[serde(default)]
  pub due_date:     Option<String>,
  #[serde(default)]
  pub story_points: Option<u8>,
  #[serde(default)]
  pub created_date: Option<String>,
  #[serde(default)]
  pub updated_date: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct TaskCreate {
  pub title:        String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description:  Option<String>,
  pub status:       TaskStatus,
  pub priority:     TaskPriority,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub project_id:   Option<Uuid>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub sprint_id:    Option<Uuid>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub assigned_to:  Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub due_date:     Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub story_points: Option<u8>
}

/// Partial update body. The outer
/// `Option` decides whether a field is
/// sent at all; `Some(None)` sends an
/// explicit `null`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct TaskPatch {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub title:        Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description:
    Option<Option<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub status:       Option<TaskStatus>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub priority:
    Option<TaskPriority>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub project_id:
    Option<Option<Uuid>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub sprint_id:
    Option<Option<Uuid>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub assigned_to:
    Option<Option<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub due_date:
    Option<Option<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub story_points:
    Option<Option<u8>>
}

impl TaskPatch {
  pub fn status(
    status: TaskStatus
  ) -> Self {
    Self {
      status: Some(status),
      ..Self::default()
    }
  }

  pub fn due_date(
    due_date: impl Into<String>
  ) -> Self {
    Self {
      due_date: Some(Some(
        due_date.into()
      )),
      ..Self::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct TasksQuery {
  pub project_id: Option<Uuid>,
  pub sprint_id:  Option<Uuid>
}

impl TasksQuery {
  pub fn is_empty(&self) -> bool {
    self.project_id.is_none()
      && self.sprint_id.is_none()
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ProjectDto {
  pub id:           Uuid,
  #[serde(default)]
  pub name:         String,
  #[serde(default)]
  pub description:  Option<String>,
  #[serde(default = "default_color")]
  pub color:        String,
  #[serde(default)]
  pub created_date: Option<String>,
  #[serde(default)]
  pub updated_date: Option<String>
}

/// Body for both `POST /projects` and
/// `PUT /projects/{id}`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ProjectCreate {
  pub name:        String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description: Option<String>,
  #[serde(default = "default_color")]
  pub color:       String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct SprintDto {
  pub id:           Uuid,
  #[serde(default)]
  pub name:         String,
  #[serde(default)]
  pub description:  Option<String>,
  pub project_id:   Uuid,
  #[serde(default)]
  pub status:       SprintStatus,
  #[serde(default)]
  pub start_date:   Option<String>,
  #[serde(default)]
  pub end_date:     Option<String>,
  #[serde(default)]
  pub goal:         Option<String>,
  #[serde(default)]
  pub created_date: Option<String>,
  #[serde(default)]
  pub updated_date: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct SprintCreate {
  pub name:        String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description: Option<String>,
  pub project_id:  Uuid,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub start_date:  Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub end_date:    Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub goal:        Option<String>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct HealthDto {
  pub status:    String,
  #[serde(default)]
  pub timestamp: Option<String>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct MessageDto {
  #[serde(default)]
  pub message: String
}

fn default_color() -> String {
  DEFAULT_PROJECT_COLOR.to_string()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn task_decodes_server_shape() {
    let raw = json!({
      "id": "5b0c7a4e-3f7d-4d0e-9d43-4c1a3f0f9b21",
      "title": "Write spec",
      "description": null,
      "status": "in_progress",
      "priority": "urgent",
      "project_id": null,
      "sprint_id": null,
      "assigned_to": null,
      "due_date": "2024-03-15",
      "created_date": "2024-03-01T10:00:00",
      "updated_date": "2024-03-01T10:00:00",
      "story_points": 8
    });

    let task: TaskDto =
      serde_json::from_value(raw)
        .expect("decode task");
    assert_eq!(
      task.status,
      TaskStatus::InProgress
    );
    assert_eq!(
      task.priority,
      TaskPriority::Urgent
    );
    assert_eq!(
      task.due_date.as_deref(),
      Some("2024-03-15")
    );
    assert_eq!(task.story_points, Some(8));
  }

  #[test]
  fn create_body_omits_empty_optionals() {
    let body = TaskCreate {
      title: "Write spec".to_string(),
      priority: TaskPriority::High,
      ..TaskCreate::default()
    };

    let value = serde_json::to_value(&body)
      .expect("encode create");
    assert_eq!(
      value,
      json!({
        "title": "Write spec",
        "status": "todo",
        "priority": "high"
      })
    );
  }

  #[test]
  fn patch_distinguishes_unset_from_null() {
    let patch = TaskPatch {
      project_id: Some(None),
      sprint_id: Some(None),
      ..TaskPatch::default()
    };

    let value = serde_json::to_value(&patch)
      .expect("encode patch");
    assert_eq!(
      value,
      json!({
        "project_id": null,
        "sprint_id": null
      })
    );
  }

  #[test]
  fn due_date_patch_sends_only_due_date() {
    let value = serde_json::to_value(
      TaskPatch::due_date("2024-03-12")
    )
    .expect("encode patch");
    assert_eq!(
      value,
      json!({ "due_date": "2024-03-12" })
    );
  }

  #[test]
  fn project_color_defaults_when_missing() {
    let project: ProjectDto =
      serde_json::from_value(json!({
        "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
        "name": "Launch"
      }))
      .expect("decode project");
    assert_eq!(
      project.color,
      DEFAULT_PROJECT_COLOR
    );
  }

  #[test]
  fn status_keys_round_trip_through_from_key()
  {
    for status in TaskStatus::ALL {
      assert_eq!(
        TaskStatus::from_key(
          status.as_key()
        ),
        Some(status)
      );
    }
    assert_eq!(
      TaskStatus::from_key("blocked"),
      None
    );
  }
}
