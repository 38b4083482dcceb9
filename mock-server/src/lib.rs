use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const REGION: &str = "us-east-1";
pub const MISSING_SIGNATURE: &str = "access denied: missing signature";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaybackConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_initialization_endpoint_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_decision_server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_content_source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slate_ad_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_configuration: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hls_configuration: Option<HlsConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_endpoint_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HlsConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_endpoint_prefix: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    pub message: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

pub type Db = Arc<RwLock<HashMap<String, PlaybackConfiguration>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/playbackConfiguration", put(put_config))
        .route("/playbackConfiguration/{name}", get(get_config).delete(delete_config))
        .layer(middleware::from_fn(require_signature))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
}

/// Rejects unsigned requests with a plain-text 403, like the real service.
async fn require_signature(request: Request, next: Next) -> Response {
    if request.headers().contains_key(header::AUTHORIZATION) {
        next.run(request).await
    } else {
        (StatusCode::FORBIDDEN, MISSING_SIGNATURE).into_response()
    }
}

async fn get_config(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> ApiResult<Json<PlaybackConfiguration>> {
    let configs = db.read().await;
    configs
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("playback configuration {name} not found")))
}

async fn put_config(
    State(db): State<Db>,
    Json(mut input): Json<PlaybackConfiguration>,
) -> ApiResult<Json<PlaybackConfiguration>> {
    let name = match input.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(api_error(StatusCode::BAD_REQUEST, "Name is required")),
    };

    let mut configs = db.write().await;
    let host = configs
        .get(&name)
        .and_then(|existing| existing.playback_endpoint_prefix.clone())
        .unwrap_or_else(|| format!("https://{}.mediatailor.{REGION}.amazonaws.com", Uuid::new_v4().simple()));

    input.session_initialization_endpoint_prefix = Some(format!("{host}/v1/session/{name}/"));
    input.hls_configuration = Some(HlsConfiguration {
        manifest_endpoint_prefix: Some(format!("{host}/v1/master/{name}/")),
    });
    input.playback_endpoint_prefix = Some(host);

    info!(%name, "stored playback configuration");
    configs.insert(name, input.clone());
    Ok(Json(input))
}

async fn delete_config(State(db): State<Db>, Path(name): Path<String>) -> StatusCode {
    if db.write().await.remove(&name).is_some() {
        info!(%name, "deleted playback configuration");
    }
    StatusCode::NO_CONTENT
}
