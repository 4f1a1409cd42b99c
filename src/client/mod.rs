//! Typed HTTP client for the items API.
//!
//! Mirrors what the browser UI does: list, create, update, delete. Callers are
//! expected to refetch the full list after every mutation instead of merging
//! results locally.

mod session;

pub use session::{Action, Refresh, run, write_items};

use crate::error::ItemboxError;
use itembox_schema::{Item, ItemPayload, MessageBody};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

/// Shown when the list cannot be loaded.
pub const LOAD_FAILED_BANNER: &str =
    "Failed to load items. Please ensure the backend server is running.";

#[derive(Clone, Debug)]
pub struct ItemsClient {
    http: reqwest::Client,
    base: Url,
}

impl ItemsClient {
    pub fn new(base: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(http: reqwest::Client, mut base: Url) -> Self {
        // `Url::join` drops the last segment unless the base ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { http, base }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn list(&self) -> Result<Vec<Item>, ItemboxError> {
        let req = self.request(Method::GET, "api/items")?;
        decode(send(req).await?).await
    }

    pub async fn create(&self, payload: &ItemPayload) -> Result<Item, ItemboxError> {
        let req = self.request(Method::POST, "api/items")?.json(payload);
        decode(send(req).await?).await
    }

    pub async fn update(&self, id: i64, payload: &ItemPayload) -> Result<MessageBody, ItemboxError> {
        let req = self
            .request(Method::PUT, &format!("api/items/{id}"))?
            .json(payload);
        decode(send(req).await?).await
    }

    pub async fn delete(&self, id: i64) -> Result<MessageBody, ItemboxError> {
        let req = self.request(Method::DELETE, &format!("api/items/{id}"))?;
        decode(send(req).await?).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ItemboxError> {
        let url = self.base.join(path)?;
        Ok(self.http.request(method, url))
    }
}

/// Non-2xx statuses are errors, like a `fetch` wrapper that checks `response.ok`.
async fn send(req: RequestBuilder) -> Result<Response, ItemboxError> {
    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ItemboxError::UpstreamStatus(status));
    }
    Ok(resp)
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ItemboxError> {
    Ok(resp.json::<T>().await?)
}
