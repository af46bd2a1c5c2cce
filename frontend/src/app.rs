use std::collections::HashSet;

use sauron::prelude::*;
use shared::{Task, TaskId, TaskList};
use tracing::{debug, info, warn};

use crate::api::{self, ApiRequest, Reply};
use crate::config::Config;
use crate::dialogs::{BrowserDialogs, Dialogs};
use crate::error::ApiError;
use crate::form::{Field, FormError, FormMode, TaskForm};
use crate::notice::{NoticeKind, Notifier, NOTICE_TIMEOUT_MS};
use crate::timer;
use crate::validator::REQUIRED_FIELDS_ALERT;
use crate::view;

pub const DELETE_PROMPT: &str = "¿Estás seguro de que deseas eliminar esta tarea?";

#[derive(Debug, Clone)]
pub enum Msg {
    LoadTasks,
    TasksLoaded(Result<Vec<Task>, ApiError>),
    ShowCreateForm,
    EditTask(TaskId),
    TaskFetched(Result<Task, ApiError>),
    HideForm,
    SetField(Field, String),
    SubmitForm,
    TaskSaved(FormMode, Result<(), ApiError>),
    DeleteTask(TaskId),
    TaskDeleted(TaskId, Result<(), ApiError>),
    NoticeExpired(u64),
    FormRevealed,
}

impl Msg {
    /// The message a finished `request` feeds back into the model.
    pub fn from_reply(request: &ApiRequest, reply: Result<Reply, ApiError>) -> Msg {
        match request {
            ApiRequest::List => {
                Msg::TasksLoaded(reply.and_then(|r| r.decode::<TaskList>()).map(|list| list.tasks))
            }
            ApiRequest::Get(_) => Msg::TaskFetched(reply.and_then(|r| r.decode())),
            ApiRequest::Create(_) => Msg::TaskSaved(FormMode::Create, reply.and_then(|r| r.decode_empty())),
            ApiRequest::Update(task_id, _) => {
                Msg::TaskSaved(FormMode::Edit(*task_id), reply.and_then(|r| r.decode_empty()))
            }
            ApiRequest::Delete(task_id) => Msg::TaskDeleted(*task_id, reply.and_then(|r| r.decode_empty())),
        }
    }
}

/// Side effects requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Request(ApiRequest),
    ExpireNotice { seq: u64, after_ms: u32 },
    /// Scroll the form panel into view once it is rendered.
    RevealForm,
    Batch(Vec<Effect>),
}

impl Effect {
    /// Every request contained in this effect, in dispatch order.
    pub fn requests(&self) -> Vec<&ApiRequest> {
        match self {
            Effect::None | Effect::ExpireNotice { .. } | Effect::RevealForm => vec![],
            Effect::Request(request) => vec![request],
            Effect::Batch(effects) => effects.iter().flat_map(Effect::requests).collect(),
        }
    }

    fn into_cmd(self, api_base: &str) -> Cmd<Msg> {
        match self {
            Effect::None => Cmd::none(),
            Effect::Request(request) => {
                let base = api_base.to_string();
                Cmd::new(async move {
                    let reply = api::fetch(&base, &request).await;
                    Msg::from_reply(&request, reply)
                })
            }
            Effect::ExpireNotice { seq, after_ms } => Cmd::new(async move {
                timer::sleep(i32::try_from(after_ms).unwrap_or(i32::MAX)).await;
                Msg::NoticeExpired(seq)
            }),
            Effect::RevealForm => Cmd::new(async {
                timer::sleep(0).await;
                view::scroll_form_into_view();
                Msg::FormRevealed
            }),
            Effect::Batch(effects) => Cmd::batch(
                effects
                    .into_iter()
                    .map(|effect| effect.into_cmd(api_base))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) config: Config,
    /// `None` until the first successful load.
    pub(crate) tasks: Option<Vec<Task>>,
    pub(crate) loading: bool,
    pub(crate) form: Option<TaskForm>,
    pub(crate) notifier: Notifier,
    pub(crate) saving: bool,
    pub(crate) deleting: HashSet<TaskId>,
}

impl Model {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tasks: None,
            loading: false,
            form: None,
            notifier: Notifier::default(),
            saving: false,
            deleting: HashSet::new(),
        }
    }

    fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) -> Effect {
        let seq = self.notifier.show(kind, text);
        Effect::ExpireNotice { seq, after_ms: NOTICE_TIMEOUT_MS }
    }

    fn reload(&mut self) -> Effect {
        self.loading = true;
        Effect::Request(ApiRequest::List)
    }

    /// State transition for `msg`. All browser interaction happens through
    /// `dialogs` or the returned effect.
    pub fn apply(&mut self, msg: Msg, dialogs: &impl Dialogs) -> Effect {
        match msg {
            Msg::LoadTasks => self.reload(),
            Msg::TasksLoaded(Ok(tasks)) => {
                debug!(count = tasks.len(), "tasks loaded");
                self.loading = false;
                self.tasks = Some(tasks);
                Effect::None
            }
            Msg::TasksLoaded(Err(e)) => {
                warn!(%e, "loading tasks failed");
                self.loading = false;
                self.notify(
                    NoticeKind::Error,
                    e.describe("Error al cargar las tareas", "No se pudieron cargar las tareas"),
                )
            }
            Msg::ShowCreateForm => {
                self.form = Some(TaskForm::blank());
                Effect::RevealForm
            }
            Msg::EditTask(task_id) => Effect::Request(ApiRequest::Get(task_id)),
            Msg::TaskFetched(Ok(task)) => {
                debug!(task_id = %task.id, "editing task");
                self.form = Some(TaskForm::from_task(&task));
                Effect::RevealForm
            }
            Msg::TaskFetched(Err(e)) => {
                warn!(%e, "fetching task failed");
                self.notify(NoticeKind::Error, e.describe("Error al cargar la tarea", "No se pudo cargar la tarea"))
            }
            Msg::HideForm => {
                self.form = None;
                Effect::None
            }
            Msg::SetField(field, input) => {
                if let Some(form) = self.form.as_mut() {
                    form.set(field, input);
                }
                Effect::None
            }
            Msg::SubmitForm => self.submit(dialogs),
            Msg::TaskSaved(mode, result) => {
                self.saving = false;
                match result {
                    Ok(()) => {
                        info!(?mode, "task saved");
                        self.form = None;
                        Effect::Batch(vec![self.notify(NoticeKind::Success, mode.success_message()), self.reload()])
                    }
                    Err(e) => {
                        warn!(?mode, %e, "saving task failed");
                        self.notify(NoticeKind::Error, e.describe("Error al guardar la tarea", "No se pudo guardar la tarea"))
                    }
                }
            }
            Msg::DeleteTask(task_id) => {
                if self.deleting.contains(&task_id) {
                    debug!(%task_id, "delete already in flight");
                    return Effect::None;
                }
                if !dialogs.confirm(DELETE_PROMPT) {
                    return Effect::None;
                }
                self.deleting.insert(task_id);
                Effect::Request(ApiRequest::Delete(task_id))
            }
            Msg::TaskDeleted(task_id, result) => {
                self.deleting.remove(&task_id);
                match result {
                    Ok(()) => {
                        info!(%task_id, "task deleted");
                        Effect::Batch(vec![
                            self.notify(NoticeKind::Success, "Tarea eliminada exitosamente"),
                            self.reload(),
                        ])
                    }
                    Err(e) => {
                        warn!(%task_id, %e, "deleting task failed");
                        self.notify(
                            NoticeKind::Error,
                            e.describe("Error al eliminar la tarea", "No se pudo eliminar la tarea"),
                        )
                    }
                }
            }
            Msg::NoticeExpired(seq) => {
                self.notifier.expire(seq);
                Effect::None
            }
            Msg::FormRevealed => Effect::None,
        }
    }

    fn submit(&mut self, dialogs: &impl Dialogs) -> Effect {
        if self.saving {
            debug!("save already in flight");
            return Effect::None;
        }
        let Some(form) = self.form.as_mut() else {
            return Effect::None;
        };
        match form.request() {
            Ok(request) => {
                self.saving = true;
                Effect::Request(request)
            }
            Err(FormError::Payload(shared::PayloadError::MissingTitle)) => {
                form.title_invalid = true;
                dialogs.alert(REQUIRED_FIELDS_ALERT);
                Effect::None
            }
            Err(e) => self.notify(NoticeKind::Error, format!("Error: {}", e)),
        }
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::new(async { Msg::LoadTasks })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        let effect = self.apply(msg, &BrowserDialogs);
        effect.into_cmd(&self.config.api_base)
    }

    fn view(&self) -> Node<Msg> {
        self.view_board()
    }
}
