use std::io::{self, BufRead, Write};

use anyhow::{Context, anyhow, bail};
use sprintboard_core::calendar::parse_iso_date;
use sprintboard_core::drag::DraggedTask;
use sprintboard_core::forms::{
    ProjectEditor, ProjectForm, ProjectSubmission, SprintForm, TaskEditor, TaskForm,
    TaskSubmission, parse_optional_date,
};
use sprintboard_core::sync::{Refresh, RefreshScope};
use sprintboard_core::{AppState, ClientConfig, SyncClient, TaskApi};
use sprintboard_shared::{TaskDto, TasksQuery};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::cli::{Command, EditArgs, ProjectCommand, SprintCommand, TaskArgs};
use crate::render::Renderer;

/// Yes/no gate in front of destructive
/// commands.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool>;
}

/// Prompts on stderr and reads one line
/// from stdin.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
        eprint!("{prompt} [y/N] ");
        io::stderr().flush().context("failed flushing prompt")?;
        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("failed reading confirmation")?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Everything a command needs: the sync
/// client, application state and output.
pub struct Session<'a, A, W> {
    pub sync: SyncClient<A>,
    pub state: AppState,
    pub renderer: Renderer,
    pub out: &'a mut W,
    pub confirm: &'a mut dyn Confirm,
}

impl<'a, A: TaskApi, W: Write> Session<'a, A, W> {
    pub fn new(
        api: A,
        config: &ClientConfig,
        renderer: Renderer,
        out: &'a mut W,
        confirm: &'a mut dyn Confirm,
    ) -> anyhow::Result<Self> {
        let zone = config.zone().context("invalid timezone")?;
        Ok(Self {
            sync: SyncClient::new(api),
            state: AppState::new(zone.today(), zone, config.date_keys),
            renderer,
            out,
            confirm,
        })
    }

    #[instrument(skip(self, command))]
    pub async fn dispatch(&mut self, command: Command) -> anyhow::Result<()> {
        debug!(?command, "dispatching command");
        match command {
            Command::Week { date, offset } => self.week(date, offset).await,
            Command::List { project, sprint } => self.list(project, sprint).await,
            Command::Show { id } => self.show(id).await,
            Command::Board { project } => self.board(project).await,
            Command::Add(args) => self.add(args).await,
            Command::Edit(args) => self.edit(args).await,
            Command::Status { id, status } => {
                let outcome = self.sync.change_status(id, status).await;
                if !self.state.finish_untracked(outcome) {
                    bail!("failed to update status of task {id}");
                }
                writeln!(self.out, "Task {id} is now {}.", status.label())?;
                Ok(())
            }
            Command::Move { id, date } => self.move_task(id, &date).await,
            Command::Delete { id, yes } => self.delete(id, yes).await,
            Command::Project(command) => self.project(command).await,
            Command::Sprint(command) => self.sprint(command).await,
            Command::Ping => {
                let health = self
                    .sync
                    .api()
                    .health()
                    .await
                    .context("API health check failed")?;
                let timestamp = health.timestamp.unwrap_or_default();
                writeln!(self.out, "{} {}", health.status, timestamp)?;
                Ok(())
            }
        }
    }

    async fn week(&mut self, date: Option<String>, offset: i64) -> anyhow::Result<()> {
        if let Some(raw) = date {
            let date = parse_iso_date(&raw)
                .ok_or_else(|| anyhow!("--date must be YYYY-MM-DD, got {raw:?}"))?;
            self.state.show_week_of(date);
        }
        self.state.navigate_week(offset);
        self.load().await;

        let title = self.state.week_title();
        let days = self.state.calendar_days();
        self.renderer.week(self.out, &title, &days)
    }

    async fn list(&mut self, project: Option<Uuid>, sprint: Option<Uuid>) -> anyhow::Result<()> {
        let query = TasksQuery {
            project_id: project,
            sprint_id: sprint,
        };
        if query.is_empty() {
            self.load().await;
            let tasks = self.state.cache().tasks().iter().collect::<Vec<_>>();
            return self.renderer.task_table(self.out, &tasks, self.state.cache());
        }

        let (tasks, projects) = tokio::join!(
            self.sync.fetch_tasks_matching(&query),
            self.sync.fetch_projects(),
        );
        self.state.apply(Refresh {
            projects,
            ..Refresh::default()
        });
        let tasks = tasks.unwrap_or_default();
        let rows = tasks.iter().collect::<Vec<_>>();
        self.renderer.task_table(self.out, &rows, self.state.cache())
    }

    async fn show(&mut self, id: Uuid) -> anyhow::Result<()> {
        let task = self.fetch_task(id).await?;
        self.load().await;
        self.renderer.task_detail(self.out, &task, self.state.cache())
    }

    async fn board(&mut self, project: Option<Uuid>) -> anyhow::Result<()> {
        self.load().await;
        match project {
            Some(id) => {
                self.state.select_project(Some(id));
                let Some(project) = self.state.selected_project() else {
                    bail!("no project with id {id}");
                };
                let columns = self.state.kanban().unwrap_or_default();
                self.renderer.board(self.out, project, &columns)
            }
            None => {
                let cards = self.state.project_cards();
                self.renderer.project_cards(self.out, &cards)
            }
        }
    }

    async fn add(&mut self, args: TaskArgs) -> anyhow::Result<()> {
        let mut editor = TaskEditor::create();
        apply_task_args(editor.form_mut(), &args);
        self.load_sprints_for(editor.form()).await;
        let TaskSubmission::Create(body) = editor.submission(self.state.cache().sprints())?
        else {
            bail!("new task editor produced an update");
        };

        let outcome = self.sync.create_task(&body).await;
        if !self.state.finish(outcome) {
            bail!("failed to create task {:?}", body.title);
        }
        info!(title = %body.title, "task created");
        writeln!(self.out, "Created task {:?}.", body.title)?;
        Ok(())
    }

    async fn edit(&mut self, args: EditArgs) -> anyhow::Result<()> {
        let original = self.fetch_task(args.id).await?;
        let mut editor = TaskEditor::edit(&original);
        let form = editor.form_mut();
        apply_task_args(form, &args.fields);
        if args.clear_description {
            form.description.clear();
        }
        if args.clear_project {
            form.set_project(None);
        }
        if args.clear_sprint {
            form.set_sprint(None);
        }
        if args.clear_due {
            form.due_date.clear();
        }
        if args.clear_points {
            form.story_points.clear();
        }

        self.load_sprints_for(editor.form()).await;
        let TaskSubmission::Update { id, patch } =
            editor.submission(self.state.cache().sprints())?
        else {
            bail!("edit produced a create");
        };
        if patch.is_empty() {
            writeln!(self.out, "No changes to task {id}.")?;
            return Ok(());
        }
        let outcome = self.sync.update_task(id, &patch).await;
        if !self.state.finish(outcome) {
            bail!("failed to update task {id}");
        }
        writeln!(self.out, "Updated task {id}.")?;
        Ok(())
    }

    async fn move_task(&mut self, id: Uuid, raw: &str) -> anyhow::Result<()> {
        let date = parse_optional_date("date", raw)?
            .ok_or_else(|| anyhow!("a target date is required"))?;
        let task = self.fetch_task(id).await?;

        let Some(reschedule) = DraggedTask::of(&task).drop_on(&date) else {
            writeln!(self.out, "Task {id} is already due on {date}.")?;
            return Ok(());
        };
        let outcome = self.sync.reschedule(reschedule).await;
        if !self.state.finish_untracked(outcome) {
            bail!("failed to move task {id}");
        }
        writeln!(self.out, "Moved task {id} to {date}.")?;
        Ok(())
    }

    async fn delete(&mut self, id: Uuid, yes: bool) -> anyhow::Result<()> {
        let task = self.fetch_task(id).await?;
        if !yes && !self.confirm.confirm(&format!("Delete task {:?}?", task.title))? {
            writeln!(self.out, "Kept task {id}.")?;
            return Ok(());
        }
        let outcome = self.sync.delete_task(id).await;
        if !self.state.finish(outcome) {
            bail!("failed to delete task {id}");
        }
        writeln!(self.out, "Deleted task {id}.")?;
        Ok(())
    }

    async fn project(&mut self, command: ProjectCommand) -> anyhow::Result<()> {
        match command {
            ProjectCommand::List => self.board(None).await,
            ProjectCommand::Add {
                name,
                description,
                color,
            } => {
                let mut editor = ProjectEditor::create();
                apply_project_args(editor.form_mut(), Some(name), description, color);
                let ProjectSubmission::Create(body) = editor.submission()? else {
                    bail!("new project editor produced an update");
                };
                let outcome = self.sync.create_project(&body).await;
                if !self.state.finish_project_save(outcome) {
                    bail!("failed to create project {:?}", body.name);
                }
                writeln!(self.out, "Created project {:?}.", body.name)?;
                Ok(())
            }
            ProjectCommand::Edit {
                id,
                name,
                description,
                color,
            } => {
                self.load().await;
                if !self.state.open_edit_project(id) {
                    bail!("no project with id {id}");
                }
                let editor = self
                    .state
                    .project_editor_mut()
                    .ok_or_else(|| anyhow!("project editor did not open"))?;
                apply_project_args(editor.form_mut(), name, description, color);
                let ProjectSubmission::Update { id, body } = editor.submission()? else {
                    bail!("project edit produced a create");
                };
                let outcome = self.sync.update_project(id, &body).await;
                if !self.state.finish_project_save(outcome) {
                    bail!("failed to update project {id}");
                }
                writeln!(self.out, "Updated project {id}.")?;
                Ok(())
            }
            ProjectCommand::Delete { id, yes } => {
                self.load().await;
                let name = self
                    .state
                    .cache()
                    .project(id)
                    .map(|project| project.name.clone())
                    .ok_or_else(|| anyhow!("no project with id {id}"))?;
                let prompt = format!("Delete project {name:?} with all its tasks and sprints?");
                if !yes && !self.confirm.confirm(&prompt)? {
                    writeln!(self.out, "Kept project {id}.")?;
                    return Ok(());
                }
                let outcome = self.sync.delete_project(id).await;
                if !self.state.finish(outcome) {
                    bail!("failed to delete project {id}");
                }
                writeln!(self.out, "Deleted project {id}.")?;
                Ok(())
            }
        }
    }

    async fn sprint(&mut self, command: SprintCommand) -> anyhow::Result<()> {
        match command {
            SprintCommand::List { project } => {
                let (sprints, projects) = tokio::join!(
                    self.sync.fetch_sprints_of(project),
                    self.sync.fetch_projects(),
                );
                self.state.apply(Refresh {
                    projects,
                    ..Refresh::default()
                });
                let sprints = sprints.unwrap_or_default();
                self.renderer.sprint_table(self.out, &sprints, self.state.cache())
            }
            SprintCommand::Add {
                project,
                name,
                description,
                goal,
                start,
                end,
            } => {
                self.state.open_new_sprint(project);
                let form = self
                    .state
                    .sprint_editor_mut()
                    .ok_or_else(|| anyhow!("sprint editor did not open"))?;
                *form = SprintForm {
                    name,
                    description: description.unwrap_or_default(),
                    goal: goal.unwrap_or_default(),
                    project_id: Some(project),
                    start_date: start.unwrap_or_default(),
                    end_date: end.unwrap_or_default(),
                };
                let body = form.to_body()?;
                let outcome = self.sync.create_sprint(&body).await;
                if !self.state.finish_sprint_save(outcome) {
                    bail!("failed to create sprint {:?}", body.name);
                }
                writeln!(self.out, "Created sprint {:?}.", body.name)?;
                Ok(())
            }
        }
    }

    /// Initial load; failed collections stay
    /// empty.
    async fn load(&mut self) {
        let refresh = self.sync.load_all().await;
        self.state.apply(refresh);
    }

    /// Pulls the sprint list when the form pairs a
    /// project with a sprint, so the pair can be checked.
    async fn load_sprints_for(&mut self, form: &TaskForm) {
        if form.project_id().is_some() && form.sprint_id().is_some() {
            let refresh = self.sync.refresh(RefreshScope::Sprints).await;
            self.state.apply(refresh);
        }
    }

    async fn fetch_task(&self, id: Uuid) -> anyhow::Result<TaskDto> {
        self.sync
            .api()
            .get_task(id)
            .await
            .with_context(|| format!("failed to fetch task {id}"))
    }
}

fn apply_task_args(form: &mut TaskForm, args: &TaskArgs) {
    if let Some(title) = &args.title {
        form.title = title.clone();
    }
    if let Some(description) = &args.description {
        form.description = description.clone();
    }
    if let Some(priority) = args.priority {
        form.priority = priority;
    }
    if let Some(status) = args.status {
        form.status = status;
    }
    if let Some(project) = args.project {
        form.set_project(Some(project));
    }
    if let Some(sprint) = args.sprint {
        form.set_sprint(Some(sprint));
    }
    if let Some(due) = &args.due {
        form.due_date = due.clone();
    }
    if let Some(points) = &args.points {
        form.story_points = points.clone();
    }
}

fn apply_project_args(
    form: &mut ProjectForm,
    name: Option<String>,
    description: Option<String>,
    color: Option<String>,
) {
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(color) = color {
        form.color = color;
    }
}
