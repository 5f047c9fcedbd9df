use std::io::{self, IsTerminal, Write};

use sprintboard_core::EntityCache;
use sprintboard_core::calendar::format_due_label;
use sprintboard_core::views::{CalendarDay, KanbanColumn, ProjectCard};
use sprintboard_shared::{ProjectDto, SprintDto, TaskDto, TaskPriority, TaskStatus};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colour only when enabled and stdout
    /// is a terminal.
    pub fn for_stdout(color: bool) -> Self {
        Self::new(color && io::stdout().is_terminal())
    }

    #[tracing::instrument(skip_all, fields(count = tasks.len()))]
    pub fn task_table<W: Write>(
        &self,
        out: &mut W,
        tasks: &[&TaskDto],
        cache: &EntityCache,
    ) -> anyhow::Result<()> {
        if tasks.is_empty() {
            writeln!(out, "No tasks.")?;
            return Ok(());
        }

        let headers = ["ID", "Status", "Priority", "Due", "Points", "Project", "Title"]
            .map(String::from)
            .to_vec();

        let rows = tasks
            .iter()
            .map(|task| {
                vec![
                    self.paint(&task.id.to_string(), "33"),
                    self.status(task.status),
                    self.priority(task.priority),
                    task.due_date
                        .as_deref()
                        .map(format_due_label)
                        .unwrap_or_default(),
                    task.story_points
                        .map(|points| points.to_string())
                        .unwrap_or_default(),
                    project_name(cache, task),
                    task.title.clone(),
                ]
            })
            .collect();

        write_table(out, headers, rows)
    }

    #[tracing::instrument(skip_all, fields(id = %task.id))]
    pub fn task_detail<W: Write>(
        &self,
        out: &mut W,
        task: &TaskDto,
        cache: &EntityCache,
    ) -> anyhow::Result<()> {
        writeln!(out, "id          {}", task.id)?;
        writeln!(out, "title       {}", task.title)?;
        writeln!(out, "status      {}", self.status(task.status))?;
        writeln!(out, "priority    {}", self.priority(task.priority))?;
        if let Some(description) = &task.description {
            writeln!(out, "description {description}")?;
        }
        if let Some(due) = &task.due_date {
            writeln!(out, "due         {due} ({})", format_due_label(due))?;
        }
        if let Some(points) = task.story_points {
            writeln!(out, "points      {points}")?;
        }
        let project = project_name(cache, task);
        if !project.is_empty() {
            writeln!(out, "project     {project}")?;
        }
        if let Some(sprint) = task.sprint_id.and_then(|id| cache.sprint(id)) {
            writeln!(out, "sprint      {}", sprint.name)?;
        }
        if let Some(assignee) = &task.assigned_to {
            writeln!(out, "assigned    {assignee}")?;
        }
        if let Some(created) = &task.created_date {
            writeln!(out, "created     {created}")?;
        }
        if let Some(updated) = &task.updated_date {
            writeln!(out, "updated     {updated}")?;
        }
        Ok(())
    }

    pub fn week<W: Write>(
        &self,
        out: &mut W,
        title: &str,
        days: &[CalendarDay<'_>],
    ) -> anyhow::Result<()> {
        writeln!(out, "{title}")?;
        for day in days {
            let label = day.date.format("%a %b %-d").to_string();
            let label = if day.is_today {
                self.paint(&format!("{label} (today)"), "1")
            } else {
                label
            };
            writeln!(out)?;
            writeln!(out, "{label}")?;
            if day.tasks.is_empty() {
                writeln!(out, "  -")?;
            }
            for task in &day.tasks {
                writeln!(
                    out,
                    "  [{}] {} {}",
                    task.priority.initial(),
                    task.title,
                    self.paint(&task.id.to_string(), "2")
                )?;
            }
        }
        Ok(())
    }

    pub fn board<W: Write>(
        &self,
        out: &mut W,
        project: &ProjectDto,
        columns: &[KanbanColumn<'_>],
    ) -> anyhow::Result<()> {
        writeln!(out, "{} ({})", project.name, project.color)?;
        if let Some(description) = &project.description {
            writeln!(out, "{description}")?;
        }
        for column in columns {
            writeln!(out)?;
            writeln!(
                out,
                "{} ({})",
                self.status(column.status),
                column.tasks.len()
            )?;
            for task in &column.tasks {
                let points = task
                    .story_points
                    .map(|points| format!(" {points}pt"))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "  [{}] {}{} {}",
                    task.priority.initial(),
                    task.title,
                    points,
                    self.paint(&task.id.to_string(), "2")
                )?;
            }
        }
        Ok(())
    }

    pub fn project_cards<W: Write>(
        &self,
        out: &mut W,
        cards: &[ProjectCard<'_>],
    ) -> anyhow::Result<()> {
        if cards.is_empty() {
            writeln!(out, "No projects.")?;
            return Ok(());
        }
        let headers = ["ID", "Name", "Color", "Tasks", "Description"]
            .map(String::from)
            .to_vec();
        let rows = cards
            .iter()
            .map(|card| {
                vec![
                    self.paint(&card.project.id.to_string(), "33"),
                    card.project.name.clone(),
                    card.project.color.clone(),
                    card.task_count.to_string(),
                    card.project.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        write_table(out, headers, rows)
    }

    pub fn sprint_table<W: Write>(
        &self,
        out: &mut W,
        sprints: &[SprintDto],
        cache: &EntityCache,
    ) -> anyhow::Result<()> {
        if sprints.is_empty() {
            writeln!(out, "No sprints.")?;
            return Ok(());
        }
        let headers = ["ID", "Name", "Status", "Project", "Start", "End", "Goal"]
            .map(String::from)
            .to_vec();
        let rows = sprints
            .iter()
            .map(|sprint| {
                vec![
                    self.paint(&sprint.id.to_string(), "33"),
                    sprint.name.clone(),
                    sprint.status.as_key().to_string(),
                    cache
                        .project(sprint.project_id)
                        .map(|project| project.name.clone())
                        .unwrap_or_default(),
                    sprint.start_date.clone().unwrap_or_default(),
                    sprint.end_date.clone().unwrap_or_default(),
                    sprint.goal.clone().unwrap_or_default(),
                ]
            })
            .collect();
        write_table(out, headers, rows)
    }

    fn status(&self, status: TaskStatus) -> String {
        let code = match status {
            TaskStatus::Todo => "37",
            TaskStatus::InProgress => "34",
            TaskStatus::Review => "35",
            TaskStatus::Done => "32",
        };
        self.paint(status.label(), code)
    }

    fn priority(&self, priority: TaskPriority) -> String {
        let code = match priority {
            TaskPriority::Low => "32",
            TaskPriority::Medium => "33",
            TaskPriority::High => "31",
            TaskPriority::Urgent => "1;31",
        };
        self.paint(priority.label(), code)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn project_name(cache: &EntityCache, task: &TaskDto) -> String {
    task.project_id
        .and_then(|id| cache.project(id))
        .map(|project| project.name.clone())
        .unwrap_or_default()
}

fn write_table<W: Write>(
    writer: &mut W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_wide_characters_by_display_width() {
        let mut out = Vec::new();
        write_table(
            &mut out,
            vec!["A".to_string(), "B".to_string()],
            vec![
                vec!["日本".to_string(), "x".to_string()],
                vec!["ab".to_string(), "y".to_string()],
            ],
        )
        .expect("write table");

        let text = String::from_utf8(out).expect("utf8");
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "A    B ");
        assert_eq!(lines[2], "日本 x ");
        assert_eq!(lines[3], "ab   y ");
    }

    #[test]
    fn painted_cells_do_not_widen_columns() {
        let renderer = Renderer::new(true);
        let cell = renderer.paint("ok", "32");
        assert_eq!(strip_ansi(&cell), "ok");
        assert_eq!(Renderer::new(false).paint("ok", "32"), "ok");
    }
}
