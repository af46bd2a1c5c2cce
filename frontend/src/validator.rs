//! Required-field checking and delete confirmation for ordinary HTML forms.
//!
//! Applies to every `<form>` on the page, independent of the task board.

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dialogs::Dialogs;

pub const REQUIRED_FIELDS_ALERT: &str = "Por favor, completa todos los campos requeridos.";
pub const DELETE_ITEM_PROMPT: &str = "¿Estás seguro de que deseas eliminar este elemento?";
pub const INVALID_BORDER: &str = "#ef4444";

/// The parts of a form the validator looks at.
pub trait FormSurface {
    /// Value of the `action` attribute, or "".
    fn action(&self) -> String;
    /// Current values of the `[required]` controls, in document order.
    fn required_values(&self) -> Vec<String>;
    /// Marks the `index`-th required control as invalid, or clears the mark.
    fn flag(&self, index: usize, invalid: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    /// A delete was not confirmed.
    Cancelled,
    /// Indices of the blank required controls.
    Invalid(Vec<usize>),
}

pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

pub fn is_delete_action(action: &str) -> bool {
    let action = action.to_lowercase();
    action.contains("eliminar") || action.contains("delete")
}

/// Decides whether a submission may go ahead.
pub fn review(form: &impl FormSurface, dialogs: &impl Dialogs) -> Verdict {
    if is_delete_action(&form.action()) && !dialogs.confirm(DELETE_ITEM_PROMPT) {
        return Verdict::Cancelled;
    }

    let mut blank = Vec::new();
    for (index, current) in form.required_values().iter().enumerate() {
        let invalid = is_blank(current);
        form.flag(index, invalid);
        if invalid {
            blank.push(index);
        }
    }

    if blank.is_empty() {
        Verdict::Proceed
    } else {
        dialogs.alert(REQUIRED_FIELDS_ALERT);
        Verdict::Invalid(blank)
    }
}

struct DomForm {
    action: String,
    required: Vec<Element>,
}

impl DomForm {
    fn new(form: &HtmlFormElement) -> Self {
        let mut required = Vec::new();
        if let Ok(nodes) = form.query_selector_all("[required]") {
            for index in 0..nodes.length() {
                if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                    required.push(element);
                }
            }
        }
        Self {
            action: form.get_attribute("action").unwrap_or_default(),
            required,
        }
    }
}

fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        textarea.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

impl FormSurface for DomForm {
    fn action(&self) -> String {
        self.action.clone()
    }

    fn required_values(&self) -> Vec<String> {
        self.required.iter().map(control_value).collect()
    }

    fn flag(&self, index: usize, invalid: bool) {
        let Some(element) = self.required.get(index).and_then(|e| e.dyn_ref::<HtmlElement>()) else {
            return;
        };
        let style = element.style();
        let result = if invalid {
            style.set_property("border-color", INVALID_BORDER)
        } else {
            style.remove_property("border-color").map(|_| ())
        };
        if result.is_err() {
            warn!(index, "could not update field border");
        }
    }
}

/// Attaches the submit check to every form currently in `document`.
/// Returns how many forms were registered.
pub fn register_forms<D>(document: &Document, dialogs: D) -> u32
where
    D: Dialogs + Clone + 'static,
{
    let forms = match document.query_selector_all("form") {
        Ok(forms) => forms,
        Err(_) => {
            warn!("could not query forms");
            return 0;
        }
    };

    let mut registered = 0;
    for index in 0..forms.length() {
        let Some(form) = forms.item(index).and_then(|node| node.dyn_into::<HtmlFormElement>().ok()) else {
            continue;
        };
        attach(form, dialogs.clone());
        registered += 1;
    }
    debug!(registered, "form validation registered");
    registered
}

fn attach<D: Dialogs + 'static>(form: HtmlFormElement, dialogs: D) {
    let target = form.clone();
    let callback = Closure::wrap(Box::new(move |event: Event| {
        let verdict = review(&DomForm::new(&target), &dialogs);
        if verdict != Verdict::Proceed {
            debug!(?verdict, "form submission blocked");
            event.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);

    if form
        .add_event_listener_with_callback("submit", callback.as_ref().unchecked_ref())
        .is_err()
    {
        warn!("could not attach submit listener");
    }

    callback.forget();
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::dialogs::testing::ScriptedDialogs;
    use pretty_assertions::assert_eq;

    struct FakeForm {
        action: &'static str,
        values: Vec<&'static str>,
        flags: RefCell<Vec<Option<bool>>>,
    }

    impl FakeForm {
        fn new(action: &'static str, values: Vec<&'static str>) -> Self {
            let flags = RefCell::new(vec![None; values.len()]);
            Self { action, values, flags }
        }
    }

    impl FormSurface for FakeForm {
        fn action(&self) -> String {
            self.action.to_string()
        }

        fn required_values(&self) -> Vec<String> {
            self.values.iter().map(|v| v.to_string()).collect()
        }

        fn flag(&self, index: usize, invalid: bool) {
            self.flags.borrow_mut()[index] = Some(invalid);
        }
    }

    #[test]
    fn filled_form_proceeds() {
        let form = FakeForm::new("/tareas/nueva", vec!["Comprar pan", "ana@example.com"]);
        let dialogs = ScriptedDialogs::accepting();

        assert_eq!(review(&form, &dialogs), Verdict::Proceed);
        assert_eq!(*form.flags.borrow(), vec![Some(false), Some(false)]);
        assert!(dialogs.alerts.borrow().is_empty());
        assert!(dialogs.confirms.borrow().is_empty());
    }

    #[test]
    fn blank_and_whitespace_fields_block() {
        let form = FakeForm::new("/tareas/nueva", vec!["", "ok", "  \n"]);
        let dialogs = ScriptedDialogs::accepting();

        assert_eq!(review(&form, &dialogs), Verdict::Invalid(vec![0, 2]));
        assert_eq!(*form.flags.borrow(), vec![Some(true), Some(false), Some(true)]);
        assert_eq!(dialogs.alerts.borrow().as_slice(), [REQUIRED_FIELDS_ALERT.to_string()]);
    }

    #[test]
    fn declined_delete_is_cancelled_before_validation() {
        let form = FakeForm::new("/tareas/3/eliminar", vec![""]);
        let dialogs = ScriptedDialogs::declining();

        assert_eq!(review(&form, &dialogs), Verdict::Cancelled);
        assert_eq!(dialogs.confirms.borrow().as_slice(), [DELETE_ITEM_PROMPT.to_string()]);
        assert!(dialogs.alerts.borrow().is_empty());
        assert_eq!(*form.flags.borrow(), vec![None]);
    }

    #[test]
    fn confirmed_delete_still_validates() {
        let form = FakeForm::new("/tareas/3/eliminar", vec![]);
        let dialogs = ScriptedDialogs::accepting();
        assert_eq!(review(&form, &dialogs), Verdict::Proceed);
        assert_eq!(dialogs.confirms.borrow().len(), 1);
    }

    #[test]
    fn delete_intent_detection() {
        assert!(is_delete_action("/tareas/3/eliminar"));
        assert!(is_delete_action("/users/3/DELETE"));
        assert!(!is_delete_action("/tareas/3/editar"));
        assert!(!is_delete_action(""));
    }
}
