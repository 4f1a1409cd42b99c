use crate::db::DbActorHandle;
use crate::server::routes::items::{self, MutatedItem};

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Shared handler state. Holds no mutable data; every request goes to the store.
#[derive(Clone)]
pub struct ItemboxState {
    pub store: DbActorHandle,
}

impl ItemboxState {
    pub fn new(store: DbActorHandle) -> Self {
        Self { store }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let protocol = format_http_version(req.version());

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status().as_u16();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    // "-" for reads and for failed mutations.
    let item = resp
        .extensions()
        .get::<MutatedItem>()
        .map_or_else(|| "-".to_string(), |MutatedItem(id)| id.to_string());

    macro_rules! log_request {
        ($level:ident) => {
            $level!(
                status,
                request_id = %request_id,
                item = %item,
                latency_ms,
                user_agent = %user_agent,
                "{} {} {}",
                method,
                path,
                protocol
            )
        };
    }

    if resp.status().is_server_error() {
        log_request!(error);
    } else if resp.status().is_client_error() {
        log_request!(warn);
    } else {
        log_request!(info);
    }

    resp
}

pub fn itembox_router(state: ItemboxState) -> Router {
    Router::new()
        .merge(items::router())
        .fallback(not_found_handler)
        .with_state(state)
        // Browser UIs are served from a different origin than the API.
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(access_log))
}
