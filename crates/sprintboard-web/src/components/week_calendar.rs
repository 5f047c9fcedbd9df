use chrono::NaiveDate;
use sprintboard_core::views::CalendarDay;
use sprintboard_shared::{
  ProjectDto,
  TaskDto,
  TaskStatus
};
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::CalendarDayCell;

/// Owned copy of a `CalendarDay` so it can
/// travel through props.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
  pub date:     NaiveDate,
  pub key:      String,
  pub is_today: bool,
  pub tasks:    Vec<TaskDto>
}

impl From<CalendarDay<'_>> for DayCell {
  fn from(day: CalendarDay<'_>) -> Self {
    Self {
      date:     day.date,
      key:      day.key,
      is_today: day.is_today,
      tasks:    day.tasks.into_iter().cloned().collect()
    }
  }
}

#[derive(Properties, PartialEq)]
pub struct WeekCalendarProps {
  pub title:         String,
  pub days:          Vec<DayCell>,
  pub projects:      Vec<ProjectDto>,
  pub dragging:      Option<Uuid>,
  pub on_navigate:   Callback<i64>,
  pub on_today:      Callback<()>,
  pub on_drag_start: Callback<Uuid>,
  pub on_drag_end:   Callback<()>,
  pub on_drop:       Callback<String>,
  pub on_status:     Callback<(Uuid, TaskStatus)>,
  pub on_edit:       Callback<Uuid>,
  pub on_delete:     Callback<Uuid>
}

#[function_component(WeekCalendar)]
pub fn week_calendar(
  props: &WeekCalendarProps
) -> Html {
  let on_previous = {
    let on_navigate = props.on_navigate.clone();
    Callback::from(move |_| on_navigate.emit(-1))
  };
  let on_next = {
    let on_navigate = props.on_navigate.clone();
    Callback::from(move |_| on_navigate.emit(1))
  };
  let on_today = {
    let on_today = props.on_today.clone();
    Callback::from(move |_| on_today.emit(()))
  };

  html! {
      <section class="week-calendar">
          <header class="calendar-header">
              <button class="ghost" onclick={on_previous}>{ "‹" }</button>
              <h2>{ &props.title }</h2>
              <button class="ghost" onclick={on_next}>{ "›" }</button>
              <button class="ghost" onclick={on_today}>{ "Today" }</button>
          </header>
          <div class="calendar-grid">
              {
                  for props.days.iter().map(|day| html! {
                      <CalendarDayCell
                          key={day.key.clone()}
                          day={day.clone()}
                          projects={props.projects.clone()}
                          dragging={props.dragging}
                          on_drag_start={props.on_drag_start.clone()}
                          on_drag_end={props.on_drag_end.clone()}
                          on_drop={props.on_drop.clone()}
                          on_status={props.on_status.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  })
              }
          </div>
      </section>
  }
}
