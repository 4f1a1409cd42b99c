use crate::error::ItemboxError;
use crate::server::router::ItemboxState;
use crate::server::routes::extract::ItemBody;
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use itembox_schema::{Item, MessageBody};
use tracing::debug;

pub const ITEM_UPDATED: &str = "Item updated successfully";
pub const ITEM_DELETED: &str = "Item deleted successfully";

/// Response extension naming the item a successful mutation touched; picked up by the access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutatedItem(pub i64);

pub fn router() -> Router<ItemboxState> {
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/{id}", put(update_item).delete(delete_item))
}

/// Accepts whatever SQLite would compare equal to an integer id (`7`, ` 7 `, `7.0`, `7e0`).
/// Anything else cannot match a row.
fn parse_item_id(raw: &str) -> Result<i64, ItemboxError> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(id);
    }
    match raw.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation)]
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(f as i64),
        _ => Err(ItemboxError::NotFound),
    }
}

/// GET /api/items
pub async fn list_items(State(state): State<ItemboxState>) -> Result<Json<Vec<Item>>, ItemboxError> {
    let items = state.store.list_items().await?;
    debug!(count = items.len(), "listed items");
    Ok(Json(items))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<ItemboxState>,
    ItemBody(payload): ItemBody,
) -> Result<(StatusCode, Extension<MutatedItem>, Json<Item>), ItemboxError> {
    with_pretty_json_debug(&payload, |body| debug!(body = %body, "create item payload"));
    let item = state.store.create_item(payload).await?;
    Ok((StatusCode::CREATED, Extension(MutatedItem(item.id)), Json(item)))
}

/// PUT /api/items/{id}
pub async fn update_item(
    State(state): State<ItemboxState>,
    Path(raw_id): Path<String>,
    ItemBody(payload): ItemBody,
) -> Result<(Extension<MutatedItem>, Json<MessageBody>), ItemboxError> {
    let id = parse_item_id(&raw_id)?;
    with_pretty_json_debug(&payload, |body| debug!(id, body = %body, "update item payload"));
    state.store.update_item(id, payload).await?;
    Ok((Extension(MutatedItem(id)), Json(MessageBody::new(ITEM_UPDATED))))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<ItemboxState>,
    Path(raw_id): Path<String>,
) -> Result<(Extension<MutatedItem>, Json<MessageBody>), ItemboxError> {
    let id = parse_item_id(&raw_id)?;
    state.store.delete_item(id).await?;
    Ok((Extension(MutatedItem(id)), Json(MessageBody::new(ITEM_DELETED))))
}
