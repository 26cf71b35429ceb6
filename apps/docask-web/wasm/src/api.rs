//! Backend request client over browser fetch.
//!
//! Wraps the five backend calls and funnels every failure through
//! [`docask_core::outcome`] so callers see a single Ok/Fail shape, whether
//! the transport rejected, the status was non-2xx, or a success status
//! arrived with an error body.

use docask_core::{outcome, ApiFailure, ApiResult};
use serde::de::DeserializeOwned;
use shared_types::{DocumentSummary, SearchResponse, SuggestResponse, UploadResponse};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FileList, FormData, Request, RequestInit, RequestMode, Response};

/// Client for the docask backend.
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    /// `base` is the API origin, empty for same-origin relative paths.
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `GET /documents`
    pub async fn list_documents(&self) -> ApiResult<Vec<DocumentSummary>> {
        let response = self.send("GET", "/documents", None, false).await?;
        read_success(response).await
    }

    /// `POST /upload` with a multipart payload.
    pub async fn upload(&self, form: &FormData) -> ApiResult<UploadResponse> {
        let response = self
            .send("POST", "/upload", Some(form.as_ref()), false)
            .await?;
        read_success(response).await
    }

    /// `POST /search`
    pub async fn search(&self, query: &str) -> ApiResult<SearchResponse> {
        let body = json_body(&serde_json::json!({ "query": query }))?;
        let response = self.send("POST", "/search", Some(&body), true).await?;
        read_success(response).await
    }

    /// `POST /suggestions`
    pub async fn suggestions(&self, query: &str) -> ApiResult<Vec<String>> {
        let body = json_body(&serde_json::json!({ "query": query }))?;
        let response = self.send("POST", "/suggestions", Some(&body), true).await?;
        let parsed: SuggestResponse = read_success(response).await?;
        Ok(parsed.suggestions)
    }

    /// `DELETE /documents/{id}`; the response body is ignored.
    pub async fn delete_document(&self, id: &str) -> ApiResult<()> {
        self.send("DELETE", &format!("/documents/{}", id), None, false)
            .await?;
        Ok(())
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&JsValue>,
        json_body: bool,
    ) -> ApiResult<Response> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            opts.set_body(body);
        }

        let request = Request::new_with_str_and_init(&self.url(path), &opts)
            .map_err(|e| ApiFailure::transport(js_error_message(&e)))?;
        if json_body {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|e| ApiFailure::transport(js_error_message(&e)))?;
        }

        let window =
            web_sys::window().ok_or_else(|| ApiFailure::transport("no window available"))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiFailure::transport(js_error_message(&e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ApiFailure::transport("fetch returned a non-Response value"))?;

        if !response.ok() {
            return Err(status_failure(response).await);
        }
        Ok(response)
    }
}

/// Build the multipart payload for `/upload` from the user's selection.
pub fn multipart_from(files: &FileList) -> ApiResult<FormData> {
    let form = FormData::new().map_err(|e| ApiFailure::transport(js_error_message(&e)))?;
    for index in 0..files.length() {
        if let Some(file) = files.get(index) {
            form.append_with_blob_and_filename("file", &file, &file.name())
                .map_err(|e| ApiFailure::transport(js_error_message(&e)))?;
        }
    }
    Ok(form)
}

async fn status_failure(response: Response) -> ApiFailure {
    let status = response.status();
    let body = body_text(response).await;
    ApiFailure::from_status(status, &body)
}

async fn read_success<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let body = body_text(response).await;
    outcome::parse_success(status, &body)
}

async fn body_text(response: Response) -> String {
    match response.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

fn json_body(value: &serde_json::Value) -> ApiResult<JsValue> {
    let body =
        serde_json::to_string(value).map_err(|e| ApiFailure::transport(e.to_string()))?;
    Ok(JsValue::from_str(&body))
}

fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| "Network request failed".to_string())
}
