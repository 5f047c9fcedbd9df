use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by a `TaskApi`
/// transport.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
  #[error("{method} {url} failed: {reason}")]
  Transport {
    method: &'static str,
    url:    String,
    reason: String
  },

  #[error(
    "{method} {url} returned HTTP \
     {status}: {body}"
  )]
  Status {
    method: &'static str,
    url:    String,
    status: u16,
    body:   String
  },

  #[error(
    "failed to decode response from \
     {url}: {reason}"
  )]
  Decode { url: String, reason: String },

  #[error(
    "failed to encode request body: \
     {0}"
  )]
  Encode(String)
}

impl ApiError {
  pub fn status(&self) -> Option<u16> {
    match self {
      | Self::Status { status, .. } => {
        Some(*status)
      }
      | _ => None
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.status() == Some(404)
  }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
  #[error("title is required")]
  TitleRequired,

  #[error("project name is required")]
  NameRequired,

  #[error(
    "story points must be a whole \
     number between {min} and {max}, \
     got {raw:?}"
  )]
  StoryPoints {
    raw: String,
    min: u8,
    max: u8
  },

  #[error(
    "{field} must be an ISO date \
     (YYYY-MM-DD), got {raw:?}"
  )]
  Date {
    field: &'static str,
    raw:   String
  },

  #[error(
    "sprint end date {end} is before \
     start date {start}"
  )]
  DateOrder { start: String, end: String },

  #[error(
    "color must be a #RRGGBB hex \
     string, got {0:?}"
  )]
  Color(String),

  #[error("{field} is not a valid id: {raw:?}")]
  Id {
    field: &'static str,
    raw:   String
  },

  #[error("{field} is not a known value: {raw:?}")]
  Choice {
    field: &'static str,
    raw:   String
  },

  #[error("a sprint needs a project")]
  SprintProjectRequired,

  #[error(
    "sprint {sprint_id} belongs to project \
     {sprint_project}, not {project_id}"
  )]
  SprintProjectMismatch {
    sprint_id:      Uuid,
    sprint_project: Uuid,
    project_id:     Uuid
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid config: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("unknown config key {0:?}")]
  UnknownKey(String),

  #[error(
    "invalid value {value:?} for \
     {key}: {reason}"
  )]
  Value {
    key:    String,
    value:  String,
    reason: String
  }
}
