use js_sys::Promise;
use tracing::warn;
use wasm_bindgen_futures::JsFuture;

/// Resolves after `ms` milliseconds using `setTimeout`.
pub async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .is_err()
            {
                warn!(ms, "could not schedule timer");
            }
        }
    });
    if JsFuture::from(promise).await.is_err() {
        warn!(ms, "timer rejected");
    }
}
