//! Typed client for the backend API as seen through the router.
//!
//! Thin CRUD helpers over `<base>/api/<resource>[/<id>]`. List calls add a
//! `t=<millis>` query parameter and `cache-control: no-store` so that no
//! intermediate cache answers them. Any non-2xx status is an error.

pub mod types;

use reqwest::header::{HeaderValue, CACHE_CONTROL};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

pub use types::{Fahrt, FahrtUpdate, KvEntry, NewFahrt};
use types::{KvSet, ListBody};

/// Client-side failure.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    BaseUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Entry point; cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// `base_url` is the router (or backend) origin, e.g. `http://localhost:8787`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|e| ClientError::BaseUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::BaseUrl(format!("{} cannot be a base", base_url)));
        }
        Ok(Self { client, base })
    }

    pub fn kv(&self) -> KvApi<'_> {
        KvApi { api: self }
    }

    pub fn fahrten(&self) -> FahrtenApi<'_> {
        FahrtenApi { api: self }
    }

    /// `GET /api/ping`.
    pub async fn ping(&self) -> Result<Value, ClientError> {
        self.send_json(self.client.get(self.url(&["api", "ping"]))).await
    }

    /// `<base>/<segments...>`, segments percent-encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn list_request(&self, mut url: Url) -> RequestBuilder {
        let millis = chrono::Utc::now().timestamp_millis().to_string();
        url.query_pairs_mut().append_pair("t", &millis);
        self.client
            .get(url)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = ensure_success(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

/// `/api/kv`: key/value entries grouped by page.
pub struct KvApi<'a> {
    api: &'a ApiClient,
}

impl KvApi<'_> {
    /// All entries for `page`, newest first.
    pub async fn list(&self, page: &str) -> Result<Vec<KvEntry>, ClientError> {
        let mut url = self.api.url(&["api", "kv"]);
        url.query_pairs_mut().append_pair("page", page);
        let body: ListBody<KvEntry> = self.api.send_json(self.api.list_request(url)).await?;
        Ok(body.into_items())
    }

    /// Insert or replace `key` on `page`.
    pub async fn set(&self, page: &str, key: &str, value: &Value) -> Result<KvEntry, ClientError> {
        let request = self
            .api
            .client
            .post(self.api.url(&["api", "kv"]))
            .json(&KvSet { page, key, value });
        self.api.send_json(request).await
    }

    pub async fn remove(&self, id: i64) -> Result<(), ClientError> {
        let request = self.api.client.delete(self.api.url(&["api", "kv", &id.to_string()]));
        ensure_success(request.send().await?).await?;
        Ok(())
    }
}

/// `/api/fahrten`: trip CRUD.
pub struct FahrtenApi<'a> {
    api: &'a ApiClient,
}

impl FahrtenApi<'_> {
    pub async fn list(&self) -> Result<Vec<Fahrt>, ClientError> {
        let url = self.api.url(&["api", "fahrten"]);
        let body: ListBody<Fahrt> = self.api.send_json(self.api.list_request(url)).await?;
        Ok(body.into_items())
    }

    pub async fn create(&self, payload: &NewFahrt) -> Result<Fahrt, ClientError> {
        let request = self
            .api
            .client
            .post(self.api.url(&["api", "fahrten"]))
            .json(payload);
        self.api.send_json(request).await
    }

    pub async fn update(&self, id: i64, payload: &FahrtUpdate) -> Result<Fahrt, ClientError> {
        let request = self
            .api
            .client
            .put(self.api.url(&["api", "fahrten", &id.to_string()]))
            .json(payload);
        self.api.send_json(request).await
    }

    pub async fn remove(&self, id: i64) -> Result<(), ClientError> {
        let request = self
            .api
            .client
            .delete(self.api.url(&["api", "fahrten", &id.to_string()]));
        ensure_success(request.send().await?).await?;
        Ok(())
    }
}
