use shared::{PayloadError, Priority, Status, Task, TaskId, TaskPayload};
use tracing::warn;

use crate::api::ApiRequest;

/// What the shared form is currently used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TaskId),
}

impl FormMode {
    pub fn heading(self) -> &'static str {
        match self {
            FormMode::Create => "Nueva Tarea",
            FormMode::Edit(_) => "Editar Tarea",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormMode::Create => "Tarea creada exitosamente",
            FormMode::Edit(_) => "Tarea actualizada exitosamente",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Priority,
    EffortHours,
    Status,
    AssignedTo,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("las horas estimadas deben ser un número: {0}")]
    InvalidEffort(String),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Raw contents of the task form, as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub effort_hours: String,
    pub status: Status,
    pub assigned_to: String,
    /// Set when a submit found the title blank; cleared once it is filled.
    pub title_invalid: bool,
}

impl TaskForm {
    pub fn blank() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            priority: Priority::default(),
            effort_hours: String::new(),
            status: Status::default(),
            assigned_to: String::new(),
            title_invalid: false,
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            effort_hours: task
                .effort_hours
                .filter(|hours| *hours != 0.0)
                .map(|hours| hours.to_string())
                .unwrap_or_default(),
            status: task.status,
            assigned_to: task.assigned_to.clone().unwrap_or_default(),
            title_invalid: false,
        }
    }

    pub fn set(&mut self, field: Field, input: String) {
        match field {
            Field::Title => {
                if !input.trim().is_empty() {
                    self.title_invalid = false;
                }
                self.title = input;
            }
            Field::Description => self.description = input,
            Field::EffortHours => self.effort_hours = input,
            Field::AssignedTo => self.assigned_to = input,
            Field::Priority => match input.parse() {
                Ok(priority) => self.priority = priority,
                Err(e) => warn!(%e, "ignoring priority selection"),
            },
            Field::Status => match input.parse() {
                Ok(status) => self.status = status,
                Err(e) => warn!(%e, "ignoring status selection"),
            },
        }
    }

    pub fn to_payload(&self) -> Result<TaskPayload, FormError> {
        let effort_hours = match self.effort_hours.trim() {
            "" => None,
            raw => {
                let hours: f64 = raw.parse().map_err(|_| FormError::InvalidEffort(raw.to_string()))?;
                if !hours.is_finite() {
                    return Err(FormError::InvalidEffort(raw.to_string()));
                }
                Some(hours)
            }
        };

        let assigned_to = match self.assigned_to.trim() {
            "" => None,
            name => Some(name.to_string()),
        };

        let payload = TaskPayload {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            priority: self.priority,
            effort_hours,
            status: self.status,
            assigned_to,
        };
        payload.validate()?;
        Ok(payload)
    }

    /// The create or update call this form submits to.
    pub fn request(&self) -> Result<ApiRequest, FormError> {
        let payload = self.to_payload()?;
        Ok(match self.mode {
            FormMode::Create => ApiRequest::Create(payload),
            FormMode::Edit(task_id) => ApiRequest::Update(task_id, payload),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stored_task() -> Task {
        Task {
            id: TaskId(4),
            title: "Deploy".to_string(),
            description: None,
            priority: Priority::High,
            effort_hours: Some(1.5),
            status: Status::InReview,
            assigned_to: None,
            created_at: Some("2025-01-10T14:30:00".to_string()),
        }
    }

    #[test]
    fn blank_form_creates() {
        let form = TaskForm::blank();
        assert_eq!(form.mode, FormMode::Create);
        assert_eq!(form.title, "");
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.status, Status::Pending);
    }

    #[test]
    fn edit_form_is_populated_with_fallbacks() {
        let form = TaskForm::from_task(&stored_task());
        assert_eq!(form.mode, FormMode::Edit(TaskId(4)));
        assert_eq!(form.title, "Deploy");
        assert_eq!(form.description, "");
        assert_eq!(form.effort_hours, "1.5");
        assert_eq!(form.assigned_to, "");
        assert_eq!(form.status, Status::InReview);
    }

    #[test]
    fn zero_effort_is_left_blank_when_editing() {
        let mut task = stored_task();
        task.effort_hours = Some(0.0);
        assert_eq!(TaskForm::from_task(&task).effort_hours, "");
    }

    #[test]
    fn blank_optionals_become_absent() {
        let mut form = TaskForm::blank();
        form.set(Field::Title, "X".to_string());
        form.set(Field::AssignedTo, "   ".to_string());

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.effort_hours, None);
        assert_eq!(payload.assigned_to, None);
    }

    #[test]
    fn effort_is_parsed() {
        let mut form = TaskForm::blank();
        form.set(Field::Title, "X".to_string());
        form.set(Field::EffortHours, " 2.5 ".to_string());
        assert_eq!(form.to_payload().unwrap().effort_hours, Some(2.5));

        form.set(Field::EffortHours, "dos".to_string());
        assert_eq!(form.to_payload(), Err(FormError::InvalidEffort("dos".to_string())));

        form.set(Field::EffortHours, "-3".to_string());
        assert_eq!(form.to_payload(), Err(FormError::Payload(PayloadError::NegativeEffort(-3.0))));
    }

    #[test]
    fn whitespace_title_is_missing() {
        let mut form = TaskForm::blank();
        form.set(Field::Title, " \t ".to_string());
        assert_eq!(form.to_payload(), Err(FormError::Payload(PayloadError::MissingTitle)));
    }

    #[test]
    fn mode_picks_create_or_update() {
        let mut form = TaskForm::blank();
        form.set(Field::Title, "X".to_string());
        assert!(matches!(form.request(), Ok(ApiRequest::Create(_))));

        let mut form = TaskForm::from_task(&stored_task());
        form.set(Field::Priority, "bloqueante".to_string());
        match form.request() {
            Ok(ApiRequest::Update(task_id, payload)) => {
                assert_eq!(task_id, TaskId(4));
                assert_eq!(payload.priority, Priority::Blocking);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn unknown_select_value_keeps_previous_choice() {
        let mut form = TaskForm::blank();
        form.set(Field::Status, "archivada".to_string());
        assert_eq!(form.status, Status::Pending);
    }
}
