//! Edit buffers for the task, project and sprint editors.
//!
//! Buffers hold raw input strings the way the input controls produce
//! them and are only converted into request bodies on submit.

use sprintboard_shared::{
  DEFAULT_PROJECT_COLOR,
  ProjectCreate,
  ProjectDto,
  STORY_POINTS_MAX,
  STORY_POINTS_MIN,
  SprintCreate,
  SprintDto,
  TaskCreate,
  TaskDto,
  TaskPatch,
  TaskPriority,
  TaskStatus
};
use uuid::Uuid;

use crate::calendar::{
  iso_date,
  parse_iso_date
};
use crate::error::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
  Create,
  Edit(Uuid)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
  pub title:        String,
  pub description:  String,
  pub priority:     TaskPriority,
  pub status:       TaskStatus,
  project_id:       Option<Uuid>,
  sprint_id:        Option<Uuid>,
  pub due_date:     String,
  pub story_points: String
}

impl Default for TaskForm {
  fn default() -> Self {
    Self {
      title:        String::new(),
      description:  String::new(),
      priority:     TaskPriority::Medium,
      status:       TaskStatus::Todo,
      project_id:   None,
      sprint_id:    None,
      due_date:     String::new(),
      story_points: String::new()
    }
  }
}

impl TaskForm {
  pub fn from_task(task: &TaskDto) -> Self {
    Self {
      title:        task.title.clone(),
      description:  task
        .description
        .clone()
        .unwrap_or_default(),
      priority:     task.priority,
      status:       task.status,
      project_id:   task.project_id,
      sprint_id:    task.sprint_id,
      due_date:     task
        .due_date
        .clone()
        .unwrap_or_default(),
      story_points: task
        .story_points
        .map(|points| points.to_string())
        .unwrap_or_default()
    }
  }

  pub fn project_id(&self) -> Option<Uuid> {
    self.project_id
  }

  pub fn sprint_id(&self) -> Option<Uuid> {
    self.sprint_id
  }

  /// Selecting a different project drops
  /// the sprint; reselecting the current
  /// one keeps it.
  pub fn set_project(
    &mut self,
    project_id: Option<Uuid>
  ) {
    if project_id != self.project_id {
      self.sprint_id = None;
    }
    self.project_id = project_id;
  }

  pub fn set_sprint(
    &mut self,
    sprint_id: Option<Uuid>
  ) {
    self.sprint_id = sprint_id;
  }

  /// Sprints offered by the selector:
  /// those of the selected project, none
  /// without a project.
  pub fn sprint_choices<'a>(
    &self,
    sprints: &'a [SprintDto]
  ) -> Vec<&'a SprintDto> {
    let Some(project_id) = self.project_id else {
      return Vec::new();
    };
    sprints
      .iter()
      .filter(|sprint| sprint.project_id == project_id)
      .collect()
  }

  /// Rejects a sprint that `sprints` lists
  /// under another project. Sprints missing
  /// from the list are left to the server.
  pub fn check_sprint(
    &self,
    sprints: &[SprintDto]
  ) -> Result<(), FormError> {
    let (Some(project_id), Some(sprint_id)) =
      (self.project_id, self.sprint_id)
    else {
      return Ok(());
    };
    match sprints
      .iter()
      .find(|sprint| sprint.id == sprint_id)
    {
      | Some(sprint) if sprint.project_id != project_id => {
        Err(FormError::SprintProjectMismatch {
          sprint_id,
          sprint_project: sprint.project_id,
          project_id
        })
      }
      | _ => Ok(())
    }
  }

  pub fn to_create(
    &self
  ) -> Result<TaskCreate, FormError> {
    let fields = self.validate()?;
    Ok(TaskCreate {
      title:        fields.title,
      description:  fields.description,
      status:       self.status,
      priority:     self.priority,
      project_id:   self.project_id,
      sprint_id:    fields.sprint_id,
      assigned_to:  None,
      due_date:     fields.due_date,
      story_points: fields.story_points
    })
  }

  /// Only fields that differ from
  /// `original` are included; cleared
  /// fields are sent as `null`.
  pub fn to_patch(
    &self,
    original: &TaskDto
  ) -> Result<TaskPatch, FormError> {
    let fields = self.validate()?;
    Ok(TaskPatch {
      title:        changed(&original.title, fields.title),
      description:  changed(
        &original.description,
        fields.description
      ),
      status:       changed(&original.status, self.status),
      priority:     changed(
        &original.priority,
        self.priority
      ),
      project_id:   changed(
        &original.project_id,
        self.project_id
      ),
      sprint_id:    changed(
        &original.sprint_id,
        fields.sprint_id
      ),
      assigned_to:  None,
      due_date:     changed(
        &original.due_date,
        fields.due_date
      ),
      story_points: changed(
        &original.story_points,
        fields.story_points
      )
    })
  }

  fn validate(
    &self
  ) -> Result<TaskFields, FormError> {
    let title = self.title.trim();
    if title.is_empty() {
      return Err(FormError::TitleRequired);
    }
    Ok(TaskFields {
      title:        title.to_string(),
      description:  optional_text(&self.description),
      sprint_id:    self
        .project_id
        .and(self.sprint_id),
      due_date:     parse_optional_date(
        "due date",
        &self.due_date
      )?,
      story_points: parse_story_points(
        &self.story_points
      )?
    })
  }
}

struct TaskFields {
  title:        String,
  description:  Option<String>,
  sprint_id:    Option<Uuid>,
  due_date:     Option<String>,
  story_points: Option<u8>
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskSubmission {
  Create(TaskCreate),
  Update { id: Uuid, patch: TaskPatch }
}

/// Open task editor: mode, buffer and
/// the task it was seeded from.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEditor {
  mode:     EditorMode,
  form:     TaskForm,
  original: Option<TaskDto>
}

impl TaskEditor {
  pub fn create() -> Self {
    Self {
      mode:     EditorMode::Create,
      form:     TaskForm::default(),
      original: None
    }
  }

  pub fn edit(task: &TaskDto) -> Self {
    Self {
      mode:     EditorMode::Edit(task.id),
      form:     TaskForm::from_task(task),
      original: Some(task.clone())
    }
  }

  pub fn mode(&self) -> EditorMode {
    self.mode
  }

  pub fn form(&self) -> &TaskForm {
    &self.form
  }

  pub fn form_mut(&mut self) -> &mut TaskForm {
    &mut self.form
  }

  /// `sprints` is the known sprint list the
  /// project/sprint pair is checked against.
  pub fn submission(
    &self,
    sprints: &[SprintDto]
  ) -> Result<TaskSubmission, FormError> {
    self.form.check_sprint(sprints)?;
    match (&self.mode, &self.original) {
      | (EditorMode::Edit(id), Some(original)) => {
        Ok(TaskSubmission::Update {
          id:    *id,
          patch: self.form.to_patch(original)?
        })
      }
      | _ => {
        Ok(TaskSubmission::Create(self.form.to_create()?))
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
  pub name:        String,
  pub description: String,
  pub color:       String
}

impl Default for ProjectForm {
  fn default() -> Self {
    Self {
      name:        String::new(),
      description: String::new(),
      color:       DEFAULT_PROJECT_COLOR.to_string()
    }
  }
}

impl ProjectForm {
  pub fn from_project(project: &ProjectDto) -> Self {
    Self {
      name:        project.name.clone(),
      description: project
        .description
        .clone()
        .unwrap_or_default(),
      color:       project.color.clone()
    }
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }

  pub fn to_body(
    &self
  ) -> Result<ProjectCreate, FormError> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(FormError::NameRequired);
    }
    Ok(ProjectCreate {
      name:        name.to_string(),
      description: optional_text(&self.description),
      color:       parse_color(&self.color)?
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectSubmission {
  Create(ProjectCreate),
  Update { id: Uuid, body: ProjectCreate }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEditor {
  mode: EditorMode,
  form: ProjectForm
}

impl ProjectEditor {
  pub fn create() -> Self {
    Self {
      mode: EditorMode::Create,
      form: ProjectForm::default()
    }
  }

  pub fn edit(project: &ProjectDto) -> Self {
    Self {
      mode: EditorMode::Edit(project.id),
      form: ProjectForm::from_project(project)
    }
  }

  pub fn mode(&self) -> EditorMode {
    self.mode
  }

  pub fn form(&self) -> &ProjectForm {
    &self.form
  }

  pub fn form_mut(&mut self) -> &mut ProjectForm {
    &mut self.form
  }

  pub fn submission(
    &self
  ) -> Result<ProjectSubmission, FormError> {
    let body = self.form.to_body()?;
    Ok(match self.mode {
      | EditorMode::Create => {
        ProjectSubmission::Create(body)
      }
      | EditorMode::Edit(id) => {
        ProjectSubmission::Update { id, body }
      }
    })
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SprintForm {
  pub name:        String,
  pub description: String,
  pub goal:        String,
  pub project_id:  Option<Uuid>,
  pub start_date:  String,
  pub end_date:    String
}

impl SprintForm {
  pub fn for_project(project_id: Uuid) -> Self {
    Self {
      project_id: Some(project_id),
      ..Self::default()
    }
  }

  pub fn to_body(
    &self
  ) -> Result<SprintCreate, FormError> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(FormError::NameRequired);
    }
    let project_id = self
      .project_id
      .ok_or(FormError::SprintProjectRequired)?;
    let start_date =
      parse_optional_date("start date", &self.start_date)?;
    let end_date =
      parse_optional_date("end date", &self.end_date)?;
    if let (Some(start), Some(end)) = (&start_date, &end_date)
      && end < start
    {
      return Err(FormError::DateOrder {
        start: start.clone(),
        end:   end.clone()
      });
    }
    Ok(SprintCreate {
      name: name.to_string(),
      description: optional_text(&self.description),
      project_id,
      start_date,
      end_date,
      goal: optional_text(&self.goal)
    })
  }
}

pub fn optional_text(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_string())
  }
}

/// Empty input means "no points";
/// anything else must be an integer in
/// the allowed range.
pub fn parse_story_points(
  raw: &str
) -> Result<Option<u8>, FormError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  let out_of_range = || FormError::StoryPoints {
    raw: trimmed.to_string(),
    min: STORY_POINTS_MIN,
    max: STORY_POINTS_MAX
  };
  let value = trimmed
    .parse::<i64>()
    .map_err(|_| out_of_range())?;
  u8::try_from(value)
    .ok()
    .filter(|points| {
      (STORY_POINTS_MIN..=STORY_POINTS_MAX).contains(points)
    })
    .map(Some)
    .ok_or_else(out_of_range)
}

pub fn parse_optional_date(
  field: &'static str,
  raw: &str
) -> Result<Option<String>, FormError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  parse_iso_date(trimmed)
    .map(|date| Some(iso_date(date)))
    .ok_or_else(|| FormError::Date {
      field,
      raw: trimmed.to_string()
    })
}

pub fn parse_color(
  raw: &str
) -> Result<String, FormError> {
  let trimmed = raw.trim();
  let valid = trimmed.len() == 7
    && trimmed.starts_with('#')
    && trimmed[1..].chars().all(|c| c.is_ascii_hexdigit());
  if valid {
    Ok(trimmed.to_string())
  } else {
    Err(FormError::Color(trimmed.to_string()))
  }
}

/// Select-box value to id; empty means
/// "none".
pub fn parse_optional_id(
  field: &'static str,
  raw: &str
) -> Result<Option<Uuid>, FormError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  Uuid::parse_str(trimmed).map(Some).map_err(|_| {
    FormError::Id {
      field,
      raw: trimmed.to_string()
    }
  })
}

pub fn parse_priority(
  raw: &str
) -> Result<TaskPriority, FormError> {
  TaskPriority::from_key(raw).ok_or_else(|| {
    FormError::Choice {
      field: "priority",
      raw:   raw.to_string()
    }
  })
}

pub fn parse_status(
  raw: &str
) -> Result<TaskStatus, FormError> {
  TaskStatus::from_key(raw).ok_or_else(|| {
    FormError::Choice {
      field: "status",
      raw:   raw.to_string()
    }
  })
}

fn changed<T: PartialEq>(
  original: &T,
  next: T
) -> Option<T> {
  if *original == next { None } else { Some(next) }
}
