//! HTTP Server for the kiosk catalogue API.
//!
//! Serves the same routes and payload shapes as the production backend so the
//! dashboard can be developed and tested locally.
//!
//! # API Endpoints
//!
//! | Method | Path                | Description                          |
//! |--------|---------------------|--------------------------------------|
//! | GET    | `/health`           | Health check with record counts      |
//! | GET    | `/getliquormaster`  | List master items                    |
//! | GET    | `/getliquorinfo`    | List info records                    |
//! | GET    | `/getoffers`        | List offers                          |
//! | POST   | `/addliquormaster`  | Multipart create with image upload   |
//! | POST   | `/addliquorinfo`    | JSON create                          |
//! | POST   | `/addoffer`         | JSON create                          |
//! | GET    | `/images/{file}`    | Uploaded image bytes                 |

use axum::{
    extract::{
        multipart::Field, rejection::JsonRejection, DefaultBodyLimit, Multipart, Path, State,
    },
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::types::HealthResponse;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult, StoreResult};
use crate::models::{
    ImageUpload, InfoRecord, MasterItem, NewInfoRecord, NewMasterItem, NewOfferRecord,
    OfferRecord,
};
use crate::store::RecordStore;

/// Upper bound for a master item upload
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<RecordStore>>,
    /// Origin prefixed to stored image paths
    pub public_url: Arc<str>,
}

impl AppState {
    pub fn new(store: RecordStore, public_url: impl Into<String>) -> Self {
        let public_url: String = public_url.into();
        Self {
            store: Arc::new(RwLock::new(store)),
            public_url: Arc::from(public_url.trim_end_matches('/')),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/getliquormaster", get(list_master))
        .route("/getliquorinfo", get(list_info))
        .route("/getoffers", get(list_offers))
        .route("/addliquormaster", post(add_master))
        .route("/addliquorinfo", post(add_info))
        .route("/addoffer", post(add_offer))
        .route("/images/{file}", get(serve_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, state: AppState) -> ServerResult<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Open the configured store, bind and serve until shutdown
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let store = match &config.data_dir {
        Some(dir) => RecordStore::open(dir)?,
        None => RecordStore::in_memory(),
    };

    let counts = store.counts();
    let state = AppState::new(store, config.public_url());
    let listener = TcpListener::bind(config.addr()).await?;

    tracing::info!(
        addr = %config.addr(),
        public_url = %state.public_url,
        data_dir = ?config.data_dir,
        master = counts.master,
        info = counts.info,
        offers = counts.offers,
        "kiosk devserver listening"
    );

    serve(listener, state).await
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let counts = state.store.read().await.counts();
    Json(HealthResponse::ok(counts))
}

async fn list_master(State(state): State<AppState>) -> Json<Vec<MasterItem>> {
    Json(state.store.read().await.master().to_vec())
}

async fn list_info(State(state): State<AppState>) -> Json<Vec<InfoRecord>> {
    Json(state.store.read().await.info().to_vec())
}

async fn list_offers(State(state): State<AppState>) -> Json<Vec<OfferRecord>> {
    Json(state.store.read().await.offers().to_vec())
}

/// Multipart create: `name`, `category`, `Aisle`, `Size` and an `image` file
async fn add_master(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<(StatusCode, Json<MasterItem>)> {
    let mut item = NewMasterItem::default();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;

                image = Some(ImageUpload { file_name, content_type, bytes: bytes.to_vec() });
            }
            "name" => item.name = field_text(field).await?,
            "category" => item.category = field_text(field).await?,
            "Aisle" => item.aisle = field_text(field).await?,
            "Size" => item.size = field_text(field).await?,
            other => tracing::debug!(field = other, "ignoring multipart field"),
        }
    }

    let mut missing = item.missing();
    let image = image.filter(|upload| !upload.bytes.is_empty());
    if image.is_none() {
        missing.push("image");
    }

    let Some(image) = image.filter(|_| missing.is_empty()) else {
        return Err(ServerError::MissingFields(missing));
    };

    let public_url = Arc::clone(&state.public_url);
    let record = write_store(&state, move |store| store.add_master(item, image, &public_url)).await?;

    tracing::info!(id = record.id, name = %record.name, "master item created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn add_info(
    State(state): State<AppState>,
    payload: Result<Json<NewInfoRecord>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<InfoRecord>)> {
    let Json(record) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let missing = record.missing();
    if !missing.is_empty() {
        return Err(ServerError::MissingFields(missing));
    }

    let record = write_store(&state, move |store| store.add_info(record)).await?;
    tracing::info!(id = record.id, name = %record.name, "info record created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn add_offer(
    State(state): State<AppState>,
    payload: Result<Json<NewOfferRecord>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<OfferRecord>)> {
    let Json(offer) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let missing = offer.missing();
    if !missing.is_empty() {
        return Err(ServerError::MissingFields(missing));
    }

    let record = write_store(&state, move |store| store.add_offer(offer)).await?;
    tracing::info!(id = record.id, brand = %record.brand, "offer created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Uploaded image with its stored content type
async fn serve_image(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> ServerResult<Response> {
    let store = state.store.read().await;
    let image = store
        .image(&file)
        .ok_or_else(|| ServerError::NotFound(format!("image {}", file)))?;

    Ok((
        [(header::CONTENT_TYPE, image.content_type.clone())],
        image.bytes.clone(),
    )
        .into_response())
}

/// Run a store mutation on the blocking pool; its file writes never block a runtime worker.
async fn write_store<T, F>(state: &AppState, mutate: F) -> ServerResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut RecordStore) -> StoreResult<T> + Send + 'static,
{
    let mut store = Arc::clone(&state.store).write_owned().await;
    let record = tokio::task::spawn_blocking(move || mutate(&mut *store))
        .await
        .map_err(|e| ServerError::Task(e.to_string()))??;
    Ok(record)
}

async fn field_text(field: Field<'_>) -> ServerResult<String> {
    field
        .text()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ErrorBody;
    use reqwest::multipart::{Form, Part};
    use serde_json::{json, Value};
    use tempfile::tempdir;

    async fn spawn(store: RecordStore) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let state = AppState::new(store, base.clone());
        tokio::spawn(serve(listener, state));
        base
    }

    fn master_form(with_image: bool) -> Form {
        let form = Form::new()
            .text("name", "Glenfoo")
            .text("category", "Whiskey")
            .text("Aisle", "A3")
            .text("Size", "750ml");

        if with_image {
            let part = Part::bytes(vec![0x89, b'P', b'N', b'G'])
                .file_name("bottle.png")
                .mime_str("image/png")
                .unwrap();
            form.part("image", part)
        } else {
            form
        }
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let base = spawn(RecordStore::in_memory()).await;

        let body: Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "ok");
        assert_eq!(body["records"], json!({ "master": 0, "info": 0, "offers": 0 }));
    }

    #[tokio::test]
    async fn test_offer_round_trip() {
        let base = spawn(RecordStore::in_memory()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/addoffer", base))
            .json(&json!({ "category": "Whiskey", "size": "750ml", "brand": "Acme", "flavors": "Smoky" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let offers: Value = client
            .get(format!("{}/getoffers", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(
            offers,
            json!([{ "id": 1, "category": "Whiskey", "size": "750ml", "brand": "Acme", "flavors": "Smoky" }])
        );
    }

    #[tokio::test]
    async fn test_info_submission_and_display_keys() {
        let base = spawn(RecordStore::in_memory()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/addliquorinfo", base))
            .json(&json!({
                "Name": "Glenfoo", "Type": "Single Malt", "Alcohol_Content": "40%",
                "Country": "Scotland", "Flavor": "Peat", "Age": "12", "Best_For": "Neat"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let info: Value = client
            .get(format!("{}/getliquorinfo", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(info[0]["Id"], 1);
        assert_eq!(info[0]["Alcohol Content"], "40%");
        assert_eq!(info[0]["Best For"], "Neat");
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let base = spawn(RecordStore::in_memory()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/addoffer", base))
            .json(&json!({ "category": "Gin", "size": "" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "Missing required fields: size, brand, flavors");

        let response = client
            .post(format!("{}/addliquorinfo", base))
            .header("content-type", "application/json")
            .body("not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_master_upload_serves_image() {
        let base = spawn(RecordStore::in_memory()).await;
        let client = reqwest::Client::new();

        let created: Value = client
            .post(format!("{}/addliquormaster", base))
            .multipart(master_form(true))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(created["id"], 1);
        assert_eq!(created["Aisle"], "A3");
        let image_url = created["image"].as_str().unwrap().to_string();
        assert!(image_url.starts_with(&format!("{}/images/", base)));

        let image = client.get(&image_url).send().await.unwrap();
        assert_eq!(image.status(), reqwest::StatusCode::OK);
        assert_eq!(image.headers()["content-type"], "image/png");
        assert_eq!(image.bytes().await.unwrap().len(), 4);

        let listed: Value = client
            .get(format!("{}/getliquormaster", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed[0]["name"], "Glenfoo");
        assert_eq!(listed[0]["Size"], "750ml");
    }

    #[tokio::test]
    async fn test_master_upload_requires_image() {
        let base = spawn(RecordStore::in_memory()).await;

        let response = reqwest::Client::new()
            .post(format!("{}/addliquormaster", base))
            .multipart(master_form(false))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "Missing required fields: image");
    }

    #[tokio::test]
    async fn test_unknown_image_is_not_found() {
        let base = spawn(RecordStore::in_memory()).await;

        let response = reqwest::get(format!("{}/images/nope.png", base)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_hides_the_record() {
        let dir = tempdir().unwrap();
        let base = spawn(RecordStore::open(dir.path()).unwrap()).await;
        std::fs::create_dir(dir.path().join("snapshot.json.tmp")).unwrap();
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/addoffer", base))
            .json(&json!({ "category": "Rum", "size": "1L", "brand": "Cane", "flavors": "Vanilla" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

        let response = client
            .post(format!("{}/addliquormaster", base))
            .multipart(master_form(true))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

        let health: Value = client
            .get(format!("{}/health", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["records"], json!({ "master": 0, "info": 0, "offers": 0 }));
    }

    #[tokio::test]
    async fn test_data_dir_survives_restart() {
        let dir = tempdir().unwrap();

        let base = spawn(RecordStore::open(dir.path()).unwrap()).await;
        reqwest::Client::new()
            .post(format!("{}/addoffer", base))
            .json(&json!({ "category": "Rum", "size": "1L", "brand": "Cane", "flavors": "Vanilla" }))
            .send()
            .await
            .unwrap();

        let base = spawn(RecordStore::open(dir.path()).unwrap()).await;
        let offers: Value = reqwest::get(format!("{}/getoffers", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(offers[0]["brand"], "Cane");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let base = spawn(RecordStore::in_memory()).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{}/addoffer", base))
            .header("origin", "http://localhost:8080")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .unwrap();

        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
