use sprintboard_shared::{
  TaskDto,
  TaskPatch
};
use uuid::Uuid;

/// Task picked up from a calendar cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggedTask {
  pub id:       Uuid,
  pub due_date: Option<String>
}

impl DraggedTask {
  pub fn of(task: &TaskDto) -> Self {
    Self {
      id:       task.id,
      due_date: task.due_date.clone()
    }
  }

  /// Dropping on the cell it came from
  /// is a no-op.
  pub fn drop_on(
    &self,
    date_key: &str
  ) -> Option<Reschedule> {
    if self.due_date.as_deref() == Some(date_key) {
      return None;
    }
    Some(Reschedule {
      task_id:  self.id,
      due_date: date_key.to_string()
    })
  }
}

/// Due-date change produced by a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reschedule {
  pub task_id:  Uuid,
  pub due_date: String
}

impl Reschedule {
  pub fn into_patch(self) -> (Uuid, TaskPatch) {
    (self.task_id, TaskPatch::due_date(self.due_date))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::due_task;

  #[test]
  fn drop_on_other_day_reschedules() {
    let task = due_task("Move me", "2024-03-10");
    let dragged = DraggedTask::of(&task);

    let reschedule = dragged
      .drop_on("2024-03-12")
      .expect("different day");
    let (id, patch) = reschedule.into_patch();
    assert_eq!(id, task.id);
    assert_eq!(patch, TaskPatch::due_date("2024-03-12"));
  }

  #[test]
  fn drop_on_same_day_is_ignored() {
    let task = due_task("Stay", "2024-03-10");
    assert_eq!(
      DraggedTask::of(&task).drop_on("2024-03-10"),
      None
    );
  }
}
