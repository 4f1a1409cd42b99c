use crate::error::ItemboxError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};
use itembox_schema::ItemPayload;
use serde_json::Value;

/// `{name, description}` request body, read the way a plain JSON body parser would.
///
/// - No JSON content type, or an empty body: treated as `{}`.
/// - Bytes that are not JSON: 400.
/// - Anything else is accepted; fields that are not scalars become `NULL`.
pub(crate) struct ItemBody(pub(crate) ItemPayload);

impl<S> FromRequest<S> for ItemBody
where
    S: Send + Sync,
{
    type Rejection = ItemboxError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(&req);
        let bytes = Bytes::from_request(req, state).await?;
        if !is_json || bytes.is_empty() {
            return Ok(Self(ItemPayload::default()));
        }

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| ItemboxError::RequestRejected {
                status: StatusCode::BAD_REQUEST,
                message: format!("Failed to parse the request body as JSON: {e}"),
            })?;
        Ok(Self(payload_from_value(&value)))
    }
}

fn has_json_content_type(req: &Request) -> bool {
    let Some(content_type) = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn payload_from_value(value: &Value) -> ItemPayload {
    ItemPayload {
        name: value.get("name").and_then(scalar_text),
        description: value.get("description").and_then(scalar_text),
    }
}

/// Strings pass through; numbers and booleans are stored as their text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
