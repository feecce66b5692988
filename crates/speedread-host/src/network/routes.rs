use axum::{
    Json,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode, header},
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{
    AppState,
    error::{ContentError, Result},
};

const UNKNOWN_SOURCE: &str = "unknown";
const CANONICAL_ID_LEN: usize = 36;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentResponse {
    pub uuid: String,
    pub expires_at: u64,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub text: String,
    pub created_at: u64,
    pub expires_at: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteContentResponse {
    pub deleted: bool,
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

pub(crate) async fn not_found() -> ContentError {
    ContentError::NoRoute
}

pub(crate) async fn create_content(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<CreateContentResponse>)> {
    let now_ms = state.now_ms();
    let config = state.config();
    let max = config.max_content_size;
    let source_id = source_identifier(request.headers());

    if let Err(retry_ms) = state.limiter().check(&source_id, now_ms) {
        info!("content: rate limited source={}", source_id);
        return Err(ContentError::RateLimited {
            max: config.rate_limit_max,
            window_secs: config.rate_limit_window_seconds,
            retry_after_secs: retry_ms.div_ceil(1_000),
        });
    }

    if declared_length(request.headers()) > max as u64 {
        return Err(ContentError::TooLarge { max });
    }

    let body = axum::body::to_bytes(request.into_body(), max)
        .await
        .map_err(|_| ContentError::TooLarge { max })?;
    let payload: Value = serde_json::from_slice(&body).map_err(|_| ContentError::InvalidJson)?;

    let text = payload
        .get("text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .ok_or(ContentError::InvalidText)?;
    if text.len() > max {
        return Err(ContentError::TooLarge { max });
    }
    let source = payload
        .get("source")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let (id, content) = state.store().insert(text.to_owned(), source, now_ms);
    info!(
        "content: stored id={} bytes={} source={}",
        id,
        content.text.len(),
        source_id
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateContentResponse {
            uuid: id.to_string(),
            expires_at: state.store().expires_at(&content),
        }),
    ))
}

pub(crate) async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentResponse>> {
    let id = parse_id(&id)?;
    let content = state
        .store()
        .get(&id, state.now_ms())
        .ok_or(ContentError::NotFound)?;

    Ok(Json(ContentResponse {
        expires_at: state.store().expires_at(&content),
        text: content.text,
        created_at: content.created_at,
    }))
}

pub(crate) async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteContentResponse>> {
    let id = parse_id(&id)?;
    if state.store().delete(&id) {
        info!("content: deleted id={}", id);
    }
    Ok(Json(DeleteContentResponse { deleted: true }))
}

/// Client identity for rate limiting: the edge proxy's connecting address,
/// then the first forwarded hop.
pub fn source_identifier(headers: &HeaderMap) -> String {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    header_str("cf-connecting-ip")
        .or_else(|| {
            header_str("x-forwarded-for")
                .and_then(|list| list.split(',').next())
                .map(str::trim)
                .filter(|first| !first.is_empty())
        })
        .unwrap_or(UNKNOWN_SOURCE)
        .to_owned()
}

fn declared_length(headers: &HeaderMap) -> u64 {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

fn parse_id(raw: &str) -> Result<Uuid> {
    parse_content_id(raw).ok_or(ContentError::InvalidId)
}

/// Accepts only the lowercase hyphenated 36-character form.
pub fn parse_content_id(raw: &str) -> Option<Uuid> {
    if raw.len() != CANONICAL_ID_LEN {
        return None;
    }
    let id = Uuid::try_parse(raw).ok()?;
    (id.hyphenated().to_string() == raw).then_some(id)
}
