//! Browser client for the task backend.
//!
//! Pages marked with `<body data-task-board>` get the task board; every page
//! gets required-field validation on its forms and fading flash messages.

pub mod api;
pub mod app;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod flash;
pub mod form;
pub mod notice;
pub mod render;
mod timer;
pub mod validator;
mod view;

use sauron::prelude::*;
use tracing::info;

use crate::app::Model;
use crate::config::Config;
use crate::dialogs::BrowserDialogs;
use crate::flash::FlashTiming;

/// Composition root: the only place listeners are registered.
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = Config::from_document(&document);
    info!(api_base = %config.api_base, mount_board = config.mount_board, "starting");

    validator::register_forms(&document, BrowserDialogs);
    flash::schedule_fade(&window, &document, FlashTiming::default());

    if config.mount_board {
        Program::mount_to_body(Model::new(config));
    }
}
