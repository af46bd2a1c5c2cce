//! Fades out server-rendered flash messages.

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

pub const FLASH_SELECTOR: &str = ".flash-message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTiming {
    /// Time on screen before the fade starts.
    pub delay_ms: i32,
    /// Length of the opacity transition; the element is removed afterwards.
    pub fade_ms: i32,
}

impl Default for FlashTiming {
    fn default() -> Self {
        Self { delay_ms: 5_000, fade_ms: 500 }
    }
}

impl FlashTiming {
    /// CSS `transition` value for the fade.
    pub fn transition(&self) -> String {
        format!("opacity {}s", f64::from(self.fade_ms) / 1000.0)
    }
}

/// Schedules fading and removal of every flash message present now.
/// Returns how many were scheduled.
pub fn schedule_fade(window: &Window, document: &Document, timing: FlashTiming) -> u32 {
    let Ok(messages) = document.query_selector_all(FLASH_SELECTOR) else {
        warn!("could not query flash messages");
        return 0;
    };

    let mut scheduled = 0;
    for index in 0..messages.length() {
        let Some(element) = messages.item(index).and_then(|node| node.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let fade_window = window.clone();
        let fade = Closure::once_into_js(move || fade_out(&fade_window, element, timing));
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(fade.unchecked_ref(), timing.delay_ms)
            .is_err()
        {
            warn!("could not schedule flash fade");
            continue;
        }
        scheduled += 1;
    }
    debug!(scheduled, "flash messages scheduled");
    scheduled
}

fn fade_out(window: &Window, element: HtmlElement, timing: FlashTiming) {
    let style = element.style();
    if style.set_property("transition", &timing.transition()).is_err()
        || style.set_property("opacity", "0").is_err()
    {
        warn!("could not start flash fade");
    }
    let remove = Closure::once_into_js(move || element.remove());
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(remove.unchecked_ref(), timing.fade_ms)
        .is_err()
    {
        warn!("could not schedule flash removal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing() {
        let timing = FlashTiming::default();
        assert_eq!(timing.delay_ms, 5_000);
        assert_eq!(timing.fade_ms, 500);
        assert_eq!(timing.transition(), "opacity 0.5s");
    }
}
