use serde::de::DeserializeOwned;
use shared::{ErrorBody, TaskId, TaskPayload};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::error::ApiError;

/// One call against the task backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    List,
    Get(TaskId),
    Create(TaskPayload),
    Update(TaskId, TaskPayload),
    Delete(TaskId),
}

impl ApiRequest {
    pub fn method(&self) -> &'static str {
        match self {
            ApiRequest::List | ApiRequest::Get(_) => "GET",
            ApiRequest::Create(_) => "POST",
            ApiRequest::Update(..) => "PUT",
            ApiRequest::Delete(_) => "DELETE",
        }
    }

    pub fn path(&self) -> String {
        match self {
            ApiRequest::List | ApiRequest::Create(_) => "/tasks".to_string(),
            ApiRequest::Get(task_id) | ApiRequest::Update(task_id, _) | ApiRequest::Delete(task_id) => {
                format!("/tasks/{}", task_id)
            }
        }
    }

    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base, self.path())
    }

    /// JSON body, for the requests that carry one.
    pub fn body(&self) -> Result<Option<String>, serde_json::Error> {
        match self {
            ApiRequest::Create(payload) | ApiRequest::Update(_, payload) => serde_json::to_string(payload).map(Some),
            _ => Ok(None),
        }
    }
}

/// Raw outcome of a request that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses a 2xx body as `T`; any other status becomes `ApiError::Server`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(self.server_error());
        }
        serde_json::from_str(&self.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Like [`Reply::decode`] but ignores the body of a 2xx response.
    pub fn decode_empty(&self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.server_error())
        }
    }

    fn server_error(&self) -> ApiError {
        let message = serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.error);
        ApiError::Server { status: self.status, message }
    }
}

fn js_error(context: &str, err: JsValue) -> ApiError {
    let detail = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string());
    match detail {
        Some(detail) => ApiError::Transport(detail),
        None => ApiError::Transport(context.to_string()),
    }
}

/// Sends `request` to `base` and reads the response text.
pub async fn fetch(base: &str, request: &ApiRequest) -> Result<Reply, ApiError> {
    let url = request.url(base);
    debug!(method = request.method(), %url, "sending request");

    let body = request
        .body()
        .map_err(|_| ApiError::Transport("Failed to serialize request".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method(request.method());
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let http_request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| js_error("Failed to create request", e))?;

    if body.is_some() {
        http_request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| js_error("Failed to set header", e))?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Transport("No window available".to_string()))?;

    let response: Response = JsFuture::from(window.fetch_with_request(&http_request))
        .await
        .map_err(|e| js_error("Failed to send request", e))?
        .dyn_into()
        .map_err(|e| js_error("Unexpected fetch result", e))?;

    let text_promise = response.text().map_err(|e| js_error("Failed to read response", e))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| js_error("Failed to get text", e))?
        .as_string()
        .ok_or_else(|| ApiError::Transport("Failed to convert to string".to_string()))?;

    debug!(status = response.status(), %url, "response received");

    Ok(Reply { status: response.status(), body: text })
}
