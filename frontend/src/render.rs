//! Turns tasks into display-ready cards.
//!
//! [`CardView`] is what the live view draws; [`Board::to_html`] renders the
//! same cards as an escaped HTML fragment.

use std::fmt::Write;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use shared::{Task, TaskId};

pub const EMPTY_TITLE: &str = "📭 No hay tareas";
pub const EMPTY_HINT: &str = "Crea tu primera tarea para comenzar";
pub const UNASSIGNED: &str = "👤 Sin asignar";

const MONTHS: [&str; 12] = ["ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic"];

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub class_name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Assignee {
    Assigned(String),
    Unassigned,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// Target of the card's edit and delete controls.
    pub task_id: TaskId,
    pub title: String,
    pub info: String,
    pub description: Option<String>,
    pub priority: Badge,
    pub status: Badge,
    pub effort: Option<String>,
    pub assignee: Assignee,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Board {
    Empty,
    Cards(Vec<CardView>),
}

pub fn render_board(tasks: &[Task]) -> Board {
    if tasks.is_empty() {
        Board::Empty
    } else {
        Board::Cards(tasks.iter().map(CardView::from_task).collect())
    }
}

impl CardView {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id,
            title: task.title.clone(),
            info: format!(
                "ID: {} | Creada: {}",
                task.id,
                task.created_at.as_deref().map(format_created).unwrap_or_default()
            ),
            description: task.description.clone().filter(|d| !d.is_empty()),
            priority: Badge {
                class_name: format!("badge badge-priority-{}", task.priority.as_str()),
                label: task.priority.label(),
            },
            status: Badge {
                class_name: format!("badge badge-status-{}", task.status.as_str()),
                label: task.status.label(),
            },
            effort: task
                .effort_hours
                .filter(|hours| *hours != 0.0)
                .map(|hours| format!("⏱️ {}h", hours)),
            assignee: match task.assigned_to.as_deref() {
                Some(name) if !name.is_empty() => Assignee::Assigned(name.to_string()),
                _ => Assignee::Unassigned,
            },
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<div class="task-card"><div class="task-header"><div><div class="task-title">{}</div><div class="task-info">{}</div></div></div>"#,
            escape_html(&self.title),
            escape_html(&self.info),
        );
        if let Some(description) = &self.description {
            let _ = write!(out, r#"<div class="task-description">{}</div>"#, escape_html(description));
        }
        out.push_str(r#"<div class="task-meta">"#);
        for badge in [&self.priority, &self.status] {
            let _ = write!(out, r#"<span class="{}">{}</span>"#, badge.class_name, escape_html(&badge.label));
        }
        if let Some(effort) = &self.effort {
            let _ = write!(out, r#"<span class="badge badge-hours">{}</span>"#, escape_html(effort));
        }
        out.push_str(r#"</div><div class="task-info">"#);
        match &self.assignee {
            Assignee::Assigned(name) => {
                let _ = write!(out, "👤 Asignado a: <strong>{}</strong>", escape_html(name));
            }
            Assignee::Unassigned => out.push_str(UNASSIGNED),
        }
        let _ = write!(
            out,
            r#"</div><div class="task-actions"><button class="btn btn-edit" data-action="edit" data-task-id="{id}">✏️ Editar</button><button class="btn btn-danger" data-action="delete" data-task-id="{id}">🗑️ Eliminar</button></div></div>"#,
            id = self.task_id,
        );
        out
    }
}

impl Board {
    pub fn to_html(&self) -> String {
        match self {
            Board::Empty => format!(r#"<div class="empty-state"><h3>{}</h3><p>{}</p></div>"#, EMPTY_TITLE, EMPTY_HINT),
            Board::Cards(cards) => cards.iter().map(CardView::to_html).collect(),
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Backend timestamps as "10 ene 2025, 14:30"; unknown formats are shown as-is.
pub fn format_created(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"));

    match parsed {
        Ok(dt) => format!(
            "{} {} {}, {:02}:{:02}",
            dt.day(),
            MONTHS[dt.month0() as usize],
            dt.year(),
            dt.hour(),
            dt.minute()
        ),
        Err(_) => raw.to_string(),
    }
}
