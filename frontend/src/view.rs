use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{Priority, Status};
use tracing::warn;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::app::{Model, Msg};
use crate::form::{Field, TaskForm};
use crate::render::{render_board, Assignee, Board, CardView, EMPTY_HINT, EMPTY_TITLE, UNASSIGNED};

const FORM_ID: &str = "task-form";
const INPUT_CLASS: &str = "w-full px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent";
const INVALID_INPUT_CLASS: &str = "w-full px-3 py-2 bg-ctp-surface0 border border-ctp-red rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-red";

impl Model {
    pub(crate) fn view_board(&self) -> Node<Msg> {
        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [
                self.view_header(),
                div(
                    [class("max-w-6xl mx-auto px-6 py-8 space-y-6")],
                    [self.view_notice(), self.view_form(), self.view_tasks()],
                ),
            ],
        )
    }

    fn view_header(&self) -> Node<Msg> {
        header([class("bg-ctp-mantle shadow-lg border-b border-ctp-surface0")], [
            div([class("max-w-6xl mx-auto px-6 py-4 flex items-center justify-between")], [
                h1([class("text-2xl font-bold text-ctp-text")], [text("📋 Gestor de Tareas")]),
                button([
                    r#type("button"),
                    on_click(|_| Msg::ShowCreateForm),
                    class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200"),
                ], [text("➕ Nueva Tarea")]),
            ]),
        ])
    }

    fn view_notice(&self) -> Node<Msg> {
        match self.notifier.current() {
            Some(notice) => div(
                [class(&format!("message {} rounded-lg px-4 py-3 font-medium", notice.kind.class_name()))],
                [text(&notice.text)],
            ),
            None => span([], []),
        }
    }

    fn view_form(&self) -> Node<Msg> {
        let Some(form) = &self.form else {
            return span([], []);
        };

        div([id(FORM_ID), class("p-6 bg-ctp-surface1 rounded-lg border border-ctp-surface2")], [
            h2([class("text-xl font-semibold text-ctp-text mb-4 pb-2 border-b border-ctp-surface2")], [
                text(form.mode.heading()),
            ]),
            div([class("space-y-4")], [
                field_label("Título *"),
                input([
                    r#type("text"),
                    placeholder("Título de la tarea"),
                    value(&form.title),
                    on_input(|event| Msg::SetField(Field::Title, event.value())),
                    class(if form.title_invalid { INVALID_INPUT_CLASS } else { INPUT_CLASS }),
                ], []),
                field_label("Descripción"),
                textarea([
                    placeholder("Descripción de la tarea"),
                    value(&form.description),
                    on_input(|event| Msg::SetField(Field::Description, event.value())),
                    class(&format!("{} h-20 resize-y", INPUT_CLASS)),
                ], []),
                div([class("grid grid-cols-1 md:grid-cols-2 gap-4")], [
                    div([], [field_label("Prioridad"), view_priority_select(form)]),
                    div([], [field_label("Estado"), view_status_select(form)]),
                    div([], [
                        field_label("Horas estimadas"),
                        input([
                            r#type("number"),
                            placeholder("0"),
                            value(&form.effort_hours),
                            on_input(|event| Msg::SetField(Field::EffortHours, event.value())),
                            class(INPUT_CLASS),
                        ], []),
                    ]),
                    div([], [
                        field_label("Asignado a"),
                        input([
                            r#type("text"),
                            placeholder("Nombre de la persona"),
                            value(&form.assigned_to),
                            on_input(|event| Msg::SetField(Field::AssignedTo, event.value())),
                            class(INPUT_CLASS),
                        ], []),
                    ]),
                ]),
                div([class("flex gap-2")], [
                    button([
                        r#type("button"),
                        on_click(|_| Msg::SubmitForm),
                        disabled(self.saving),
                        class("bg-ctp-green hover:bg-ctp-teal text-ctp-base font-medium px-4 py-2 rounded-md transition-colors duration-200"),
                    ], [
                        if self.saving {
                            text("Guardando...")
                        } else {
                            text("💾 Guardar")
                        }
                    ]),
                    button([
                        r#type("button"),
                        on_click(|_| Msg::HideForm),
                        class("bg-ctp-overlay0 hover:bg-ctp-overlay1 text-ctp-text font-medium px-4 py-2 rounded-md transition-colors duration-200"),
                    ], [text("Cancelar")]),
                ]),
            ]),
        ])
    }

    fn view_tasks(&self) -> Node<Msg> {
        let Some(tasks) = &self.tasks else {
            return if self.loading {
                div([class("text-center py-10 text-ctp-subtext0 italic")], [text("Cargando...")])
            } else {
                span([], [])
            };
        };

        match render_board(tasks) {
            Board::Empty => div([class("empty-state text-center py-12")], [
                h3([class("text-lg font-medium text-ctp-text mb-2")], [text(EMPTY_TITLE)]),
                p([class("text-ctp-subtext0")], [text(EMPTY_HINT)]),
            ]),
            Board::Cards(cards) => div(
                [class("space-y-4")],
                cards.iter().map(|card| self.view_card(card)).collect::<Vec<_>>(),
            ),
        }
    }

    fn view_card(&self, card: &CardView) -> Node<Msg> {
        let task_id = card.task_id;
        let is_deleting = self.deleting.contains(&task_id);

        div([
            key(task_id.to_string()),
            class("task-card border rounded-xl p-6 bg-ctp-surface0 shadow-sm border-ctp-surface1 hover:border-ctp-blue space-y-3"),
        ], [
            div([class("task-header")], [
                h3([class("task-title text-lg font-semibold text-ctp-text")], [text(&card.title)]),
                p([class("task-info text-sm text-ctp-subtext0")], [text(&card.info)]),
            ]),
            match &card.description {
                Some(description) => p([class("task-description text-sm text-ctp-subtext1 break-words")], [text(description)]),
                None => span([], []),
            },
            div([class("task-meta flex flex-wrap gap-2")], [
                span([class(&card.priority.class_name)], [text(&card.priority.label)]),
                span([class(&card.status.class_name)], [text(&card.status.label)]),
                match &card.effort {
                    Some(effort) => span([class("badge badge-hours")], [text(effort)]),
                    None => span([], []),
                },
            ]),
            p(
                [class("task-info text-sm text-ctp-subtext1")],
                match &card.assignee {
                    Assignee::Assigned(name) => vec![text("👤 Asignado a: "), strong([], [text(name)])],
                    Assignee::Unassigned => vec![text(UNASSIGNED)],
                },
            ),
            div([class("task-actions flex gap-2")], [
                button([
                    r#type("button"),
                    on_click(move |_| Msg::EditTask(task_id)),
                    class("btn btn-edit bg-ctp-blue/20 text-ctp-blue hover:bg-ctp-blue/30 px-3 py-1 rounded-lg text-sm"),
                ], [text("✏️ Editar")]),
                button([
                    r#type("button"),
                    on_click(move |_| Msg::DeleteTask(task_id)),
                    disabled(is_deleting),
                    class("btn btn-danger bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30 px-3 py-1 rounded-lg text-sm"),
                ], [
                    if is_deleting {
                        text("⏳ Eliminando...")
                    } else {
                        text("🗑️ Eliminar")
                    }
                ]),
            ]),
        ])
    }
}

fn field_label(caption: &str) -> Node<Msg> {
    label([class("block text-sm font-medium text-ctp-subtext1 mb-1")], [text(caption)])
}

fn view_priority_select(form: &TaskForm) -> Node<Msg> {
    select(
        [
            value(form.priority.as_str()),
            on_input(|event| Msg::SetField(Field::Priority, event.value())),
            class(INPUT_CLASS),
        ],
        Priority::ALL
            .iter()
            .map(|priority| {
                option(
                    [value(priority.as_str()), selected(*priority == form.priority)],
                    [text(priority.label())],
                )
            })
            .collect::<Vec<_>>(),
    )
}

fn view_status_select(form: &TaskForm) -> Node<Msg> {
    select(
        [
            value(form.status.as_str()),
            on_input(|event| Msg::SetField(Field::Status, event.value())),
            class(INPUT_CLASS),
        ],
        Status::ALL
            .iter()
            .map(|status| option([value(status.as_str()), selected(*status == form.status)], [text(status.label())]))
            .collect::<Vec<_>>(),
    )
}

/// Smoothly scrolls the form panel into view, if it is on the page.
pub(crate) fn scroll_form_into_view() {
    let Some(panel) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(FORM_ID))
    else {
        warn!("form panel not found, not scrolling");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    panel.scroll_into_view_with_scroll_into_view_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::form::FormMode;
    use crate::render::CardView;
    use shared::{Task, TaskId};

    fn model() -> Model {
        Model::new(Config::new(Some("http://api.test"), true))
    }

    fn stored_task() -> Task {
        Task {
            id: TaskId(7),
            title: "<script>alert('x')</script>".to_string(),
            description: Some("a & b".to_string()),
            priority: Priority::High,
            effort_hours: Some(2.0),
            status: Status::Done,
            assigned_to: Some("Ana".to_string()),
            created_at: None,
        }
    }

    /// The `<option ...>` opening tag whose value is `option_value`.
    fn option_tag<'a>(html: &'a str, option_value: &str) -> &'a str {
        let needle = format!(r#"value="{}""#, option_value);
        html.split("<option")
            .skip(1)
            .find(|chunk| chunk.contains(&needle))
            .and_then(|chunk| chunk.split('>').next())
            .unwrap_or_else(|| panic!("no option {} in {}", option_value, html))
    }

    #[test]
    fn edit_form_preselects_stored_values() {
        let mut model = model();
        model.form = Some(TaskForm::from_task(&stored_task()));

        let html = model.view_form().render_to_string();

        assert!(html.contains("Editar Tarea"));
        assert!(option_tag(&html, "alta").contains("selected"));
        assert!(option_tag(&html, "completada").contains("selected"));
        assert!(html.contains(FORM_ID));
    }

    #[test]
    fn create_form_preselects_defaults() {
        let mut model = model();
        model.form = Some(TaskForm::blank());

        let html = model.view_form().render_to_string();

        assert_eq!(model.form.as_ref().map(|f| f.mode), Some(FormMode::Create));
        assert!(html.contains("Nueva Tarea"));
        assert!(option_tag(&html, "media").contains("selected"));
        assert!(option_tag(&html, "pendiente").contains("selected"));
        assert!(html.contains("💾 Guardar"));
    }

    #[test]
    fn save_button_shows_pending_save() {
        let mut model = model();
        model.form = Some(TaskForm::blank());
        model.saving = true;

        let html = model.view_form().render_to_string();
        assert!(html.contains("Guardando..."));
        assert!(!html.contains("💾 Guardar"));
    }

    #[test]
    fn hidden_form_renders_nothing() {
        let html = model().view_form().render_to_string();
        assert!(!html.contains("Tarea"));
        assert!(!html.contains(FORM_ID));
    }

    #[test]
    fn card_text_is_escaped() {
        let model = model();
        let html = model.view_card(&CardView::from_task(&stored_task())).render_to_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("ID: 7"));
        assert!(html.contains("Alta"));
        assert!(html.contains("Completada"));
        assert!(html.contains("⏱️ 2h"));
        assert!(html.contains("Ana"));
        assert!(html.contains("✏️ Editar"));
        assert!(html.contains("🗑️ Eliminar"));
    }

    #[test]
    fn card_shows_pending_delete() {
        let mut model = model();
        model.deleting.insert(TaskId(7));

        let html = model.view_card(&CardView::from_task(&stored_task())).render_to_string();
        assert!(html.contains("⏳ Eliminando..."));
        assert!(!html.contains("🗑️ Eliminar"));
    }

    #[test]
    fn unassigned_card_uses_placeholder() {
        let mut task = stored_task();
        task.assigned_to = None;
        task.description = None;

        let html = model().view_card(&CardView::from_task(&task)).render_to_string();
        assert!(html.contains(UNASSIGNED));
        assert!(!html.contains("task-description"));
    }
}
