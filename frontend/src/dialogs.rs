//! Blocking browser dialogs behind a trait so controllers can be driven
//! without a window.

use tracing::warn;

pub trait Dialogs {
    /// Asks a yes/no question. `false` means the user declined.
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// `window.confirm` / `window.alert`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn confirm(&self, message: &str) -> bool {
        match web_sys::window().map(|w| w.confirm_with_message(message)) {
            Some(Ok(answer)) => answer,
            _ => {
                warn!("confirm dialog unavailable, treating as declined");
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_err() {
                warn!("alert dialog unavailable");
            }
        }
    }
}
