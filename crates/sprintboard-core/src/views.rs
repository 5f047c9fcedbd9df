//! Derived, read-only presentations of the cache.

use chrono::NaiveDate;
use sprintboard_shared::{
  ProjectDto,
  TaskDto,
  TaskStatus
};
use uuid::Uuid;

use crate::calendar::{
  DateKeying,
  WeekWindow,
  Zone
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub enum View {
  #[default]
  Calendar,
  Tasks,
  Projects
}

impl View {
  pub const ALL: [Self; 3] =
    [Self::Calendar, Self::Tasks, Self::Projects];

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Calendar => "calendar",
      | Self::Tasks => "tasks",
      | Self::Projects => "projects"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Calendar => "Calendar",
      | Self::Tasks => "Tasks",
      | Self::Projects => "Projects"
    }
  }

  pub fn from_key(key: &str) -> Option<Self> {
    match key.trim() {
      | "calendar" => Some(Self::Calendar),
      | "tasks" | "list" => Some(Self::Tasks),
      | "projects" | "board" => {
        Some(Self::Projects)
      }
      | _ => None
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
  pub date:     NaiveDate,
  /// String compared against
  /// `due_date`.
  pub key:      String,
  pub is_today: bool,
  pub tasks:    Vec<&'a TaskDto>
}

/// One cell per window day, each holding
/// the tasks whose `due_date` equals the
/// cell key exactly.
pub fn calendar_days<'a>(
  window: &WeekWindow,
  tasks: &'a [TaskDto],
  today: NaiveDate,
  keying: DateKeying,
  zone: Zone
) -> Vec<CalendarDay<'a>> {
  window
    .dates()
    .into_iter()
    .map(|date| {
      let key = keying.key(date, zone);
      let bucket = tasks
        .iter()
        .filter(|task| {
          task.due_date.as_deref() == Some(key.as_str())
        })
        .collect();
      CalendarDay {
        date,
        is_today: date == today,
        key,
        tasks: bucket
      }
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct KanbanColumn<'a> {
  pub status: TaskStatus,
  pub tasks:  Vec<&'a TaskDto>
}

/// Project tasks split by status, in
/// board order.
pub fn kanban_columns(
  tasks: &[TaskDto],
  project_id: Uuid
) -> Vec<KanbanColumn<'_>> {
  TaskStatus::ALL
    .into_iter()
    .map(|status| {
      KanbanColumn {
        status,
        tasks: tasks
          .iter()
          .filter(|task| {
            task.project_id == Some(project_id)
              && task.status == status
          })
          .collect()
      }
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard<'a> {
  pub project:    &'a ProjectDto,
  pub task_count: usize
}

pub fn project_cards<'a>(
  projects: &'a [ProjectDto],
  tasks: &[TaskDto]
) -> Vec<ProjectCard<'a>> {
  projects
    .iter()
    .map(|project| {
      ProjectCard {
        project,
        task_count: tasks
          .iter()
          .filter(|task| {
            task.project_id == Some(project.id)
          })
          .count()
      }
    })
    .collect()
}
