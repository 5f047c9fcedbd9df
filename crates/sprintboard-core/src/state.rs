//! Application state shared by every view.
//!
//! The root owner (a reducer in the browser, a local in the terminal)
//! holds one `AppState` and drives it through the setters below. Views
//! only read from it.

use chrono::NaiveDate;
use sprintboard_shared::ProjectDto;
use tracing::{
  debug,
  warn
};
use uuid::Uuid;

use crate::cache::EntityCache;
use crate::calendar::{
  DateKeying,
  WeekWindow,
  Zone
};
use crate::drag::{
  DraggedTask,
  Reschedule
};
use crate::forms::{
  ProjectEditor,
  SprintForm,
  TaskEditor
};
use crate::sync::{
  Outcome,
  Refresh
};
use crate::views::{
  self,
  CalendarDay,
  KanbanColumn,
  ProjectCard,
  View
};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
  view:             View,
  cache:            EntityCache,
  week:             WeekWindow,
  today:            NaiveDate,
  zone:             Zone,
  keying:           DateKeying,
  selected_project: Option<Uuid>,
  task_editor:      Option<TaskEditor>,
  project_editor:   Option<ProjectEditor>,
  sprint_editor:    Option<SprintForm>,
  drag:             Option<DraggedTask>,
  loading:          bool
}

impl AppState {
  pub fn new(
    today: NaiveDate,
    zone: Zone,
    keying: DateKeying
  ) -> Self {
    if keying == DateKeying::Utc {
      warn!(
        zone = %zone.name(),
        "utc date keying enabled; calendar cells \
         east of UTC match the previous day"
      );
    }
    Self {
      view: View::default(),
      cache: EntityCache::default(),
      week: WeekWindow::new(today),
      today,
      zone,
      keying,
      selected_project: None,
      task_editor: None,
      project_editor: None,
      sprint_editor: None,
      drag: None,
      loading: false
    }
  }

  pub fn view(&self) -> View {
    self.view
  }

  /// Pure presentation switch; the cache
  /// is left alone.
  pub fn set_view(&mut self, view: View) {
    debug!(from = self.view.as_key(), to = view.as_key(), "switching view");
    self.view = view;
  }

  pub fn cache(&self) -> &EntityCache {
    &self.cache
  }

  pub fn apply(&mut self, refresh: Refresh) {
    let projects_refreshed = refresh.projects.is_some();
    refresh.apply_to(&mut self.cache);
    if projects_refreshed
      && let Some(id) = self.selected_project
      && self.cache.project(id).is_none()
    {
      debug!(%id, "selected project disappeared");
      self.selected_project = None;
    }
  }

  pub fn loading(&self) -> bool {
    self.loading
  }

  pub fn set_loading(&mut self, loading: bool) {
    self.loading = loading;
  }

  /// Applies whatever came back from a
  /// mutation and clears the loading flag.
  pub fn finish(&mut self, outcome: Outcome) -> bool {
    self.apply(outcome.refresh);
    self.loading = false;
    outcome.committed
  }

  /// Like [`AppState::finish`] for mutations
  /// that never raised the loading flag, so
  /// a concurrent save keeps its overlay.
  pub fn finish_untracked(
    &mut self,
    outcome: Outcome
  ) -> bool {
    self.apply(outcome.refresh);
    outcome.committed
  }

  pub fn week(&self) -> WeekWindow {
    self.week
  }

  pub fn today(&self) -> NaiveDate {
    self.today
  }

  pub fn zone(&self) -> Zone {
    self.zone
  }

  pub fn keying(&self) -> DateKeying {
    self.keying
  }

  pub fn navigate_week(&mut self, weeks: i64) {
    self.week = self.week.shift(weeks);
  }

  pub fn go_to_today(&mut self) {
    self.week = WeekWindow::new(self.today);
  }

  pub fn show_week_of(&mut self, date: NaiveDate) {
    self.week = WeekWindow::new(date);
  }

  /// Used when the clock crosses
  /// midnight.
  pub fn set_today(&mut self, today: NaiveDate) {
    self.today = today;
  }

  pub fn week_title(&self) -> String {
    self.week.title()
  }

  pub fn calendar_days(&self) -> Vec<CalendarDay<'_>> {
    views::calendar_days(
      &self.week,
      self.cache.tasks(),
      self.today,
      self.keying,
      self.zone
    )
  }

  pub fn selected_project(&self) -> Option<&ProjectDto> {
    self
      .selected_project
      .and_then(|id| self.cache.project(id))
  }

  pub fn select_project(
    &mut self,
    project_id: Option<Uuid>
  ) {
    self.selected_project = project_id;
  }

  /// Board of the selected project, if
  /// any.
  pub fn kanban(&self) -> Option<Vec<KanbanColumn<'_>>> {
    self.selected_project().map(|project| {
      views::kanban_columns(self.cache.tasks(), project.id)
    })
  }

  pub fn project_cards(&self) -> Vec<ProjectCard<'_>> {
    views::project_cards(
      self.cache.projects(),
      self.cache.tasks()
    )
  }

  pub fn task_editor(&self) -> Option<&TaskEditor> {
    self.task_editor.as_ref()
  }

  pub fn task_editor_mut(
    &mut self
  ) -> Option<&mut TaskEditor> {
    self.task_editor.as_mut()
  }

  pub fn open_new_task(&mut self) {
    self.task_editor = Some(TaskEditor::create());
  }

  /// Returns `false` when the task is not
  /// in the cache.
  pub fn open_edit_task(&mut self, id: Uuid) -> bool {
    match self.cache.task(id) {
      | Some(task) => {
        self.task_editor = Some(TaskEditor::edit(task));
        true
      }
      | None => false
    }
  }

  pub fn close_task_editor(&mut self) {
    self.task_editor = None;
  }

  /// The editor stays open unless the
  /// save was committed.
  pub fn finish_task_save(
    &mut self,
    outcome: Outcome
  ) -> bool {
    let committed = self.finish(outcome);
    if committed {
      self.task_editor = None;
    }
    committed
  }

  pub fn project_editor(&self) -> Option<&ProjectEditor> {
    self.project_editor.as_ref()
  }

  pub fn project_editor_mut(
    &mut self
  ) -> Option<&mut ProjectEditor> {
    self.project_editor.as_mut()
  }

  pub fn open_new_project(&mut self) {
    self.project_editor = Some(ProjectEditor::create());
  }

  pub fn open_edit_project(&mut self, id: Uuid) -> bool {
    match self.cache.project(id) {
      | Some(project) => {
        self.project_editor =
          Some(ProjectEditor::edit(project));
        true
      }
      | None => false
    }
  }

  pub fn close_project_editor(&mut self) {
    self.project_editor = None;
  }

  pub fn finish_project_save(
    &mut self,
    outcome: Outcome
  ) -> bool {
    let committed = self.finish(outcome);
    if committed {
      self.project_editor = None;
    }
    committed
  }

  pub fn sprint_editor(&self) -> Option<&SprintForm> {
    self.sprint_editor.as_ref()
  }

  pub fn sprint_editor_mut(
    &mut self
  ) -> Option<&mut SprintForm> {
    self.sprint_editor.as_mut()
  }

  pub fn open_new_sprint(&mut self, project_id: Uuid) {
    self.sprint_editor =
      Some(SprintForm::for_project(project_id));
  }

  pub fn close_sprint_editor(&mut self) {
    self.sprint_editor = None;
  }

  pub fn finish_sprint_save(
    &mut self,
    outcome: Outcome
  ) -> bool {
    let committed = self.finish(outcome);
    if committed {
      self.sprint_editor = None;
    }
    committed
  }

  pub fn dragging(&self) -> Option<&DraggedTask> {
    self.drag.as_ref()
  }

  pub fn begin_drag(&mut self, id: Uuid) -> bool {
    self.drag = self.cache.task(id).map(DraggedTask::of);
    self.drag.is_some()
  }

  pub fn end_drag(&mut self) {
    self.drag = None;
  }

  /// Consumes the drag; `None` when
  /// nothing was dragged or the day did
  /// not change.
  pub fn drop_on(
    &mut self,
    date_key: &str
  ) -> Option<Reschedule> {
    self.drag.take()?.drop_on(date_key)
  }
}
