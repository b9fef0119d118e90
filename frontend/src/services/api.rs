//! HTTP client for the kiosk catalogue backend.
//!
//! [`Backend`] is the seam the dashboard controller talks to; [`HttpBackend`]
//! is the browser implementation built on `gloo-net`.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::config::API_BASE_URL;
use crate::forms::{InfoForm, MasterUpload, OfferForm};
use crate::types::{ApiError, ApiResult, InfoRecord, MasterItem, OfferRecord};

/// Route paths relative to the backend origin.
pub mod routes {
    pub const LIST_MASTER: &str = "/getliquormaster";
    pub const LIST_INFO: &str = "/getliquorinfo";
    pub const LIST_OFFERS: &str = "/getoffers";
    pub const ADD_MASTER: &str = "/addliquormaster";
    pub const ADD_INFO: &str = "/addliquorinfo";
    pub const ADD_OFFER: &str = "/addoffer";
}

/// Operations the dashboard needs from the backend.
///
/// Create operations only report acknowledgement; the dashboard reloads
/// everything afterwards instead of using the created record.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// File type carried by the master item upload.
    type Image: Clone + 'static;

    async fn list_master(&self) -> ApiResult<Vec<MasterItem>>;

    async fn list_info(&self) -> ApiResult<Vec<InfoRecord>>;

    async fn list_offers(&self) -> ApiResult<Vec<OfferRecord>>;

    async fn create_master(&self, upload: &MasterUpload<Self::Image>) -> ApiResult<()>;

    async fn create_info(&self, form: &InfoForm) -> ApiResult<()>;

    async fn create_offer(&self, form: &OfferForm) -> ApiResult<()>;
}

/// `gloo-net` backend against a fixed origin.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = Request::get(&self.url(path)).send().await?;
        let response = ensure_ok(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B: serde::Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let request = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ApiError::Request(e.to_string()))?;

        acknowledge(request.send().await?).await
    }
}

impl Backend for HttpBackend {
    type Image = File;

    async fn list_master(&self) -> ApiResult<Vec<MasterItem>> {
        self.get_json(routes::LIST_MASTER).await
    }

    async fn list_info(&self) -> ApiResult<Vec<InfoRecord>> {
        self.get_json(routes::LIST_INFO).await
    }

    async fn list_offers(&self) -> ApiResult<Vec<OfferRecord>> {
        self.get_json(routes::LIST_OFFERS).await
    }

    async fn create_master(&self, upload: &MasterUpload<File>) -> ApiResult<()> {
        let form_data = FormData::new().map_err(|e| js_error("Failed to create FormData", e))?;

        for (key, value) in [
            ("name", &upload.name),
            ("category", &upload.category),
            ("Aisle", &upload.aisle),
            ("Size", &upload.size),
        ] {
            form_data
                .append_with_str(key, value)
                .map_err(|e| js_error("Failed to append field", e))?;
        }

        form_data
            .append_with_blob_and_filename("image", &upload.image, &upload.image.name())
            .map_err(|e| js_error("Failed to append image", e))?;

        let request = Request::post(&self.url(routes::ADD_MASTER))
            .body(form_data)
            .map_err(|e| ApiError::Request(e.to_string()))?;

        acknowledge(request.send().await?).await
    }

    async fn create_info(&self, form: &InfoForm) -> ApiResult<()> {
        self.post_json(routes::ADD_INFO, form).await
    }

    async fn create_offer(&self, form: &OfferForm) -> ApiResult<()> {
        self.post_json(routes::ADD_OFFER, form).await
    }
}

/// Turn a non-success status into [`ApiError::Status`].
async fn ensure_ok(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ApiError::Status { status, body })
}

/// A create counts as acknowledged once the status is a success and the body is JSON.
async fn acknowledge(response: Response) -> ApiResult<()> {
    let response = ensure_ok(response).await?;
    response
        .json::<serde_json::Value>()
        .await
        .map(|_| ())
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn js_error(context: &str, value: JsValue) -> ApiError {
    ApiError::Request(format!("{}: {:?}", context, value))
}
