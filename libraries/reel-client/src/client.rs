//! HTTP resource loader over the backend JSON API.

use crate::error::{ClientError, Result};
use crate::types::{Ack, Envelope};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reel_core::types::{CollectionId, CollectionSummary, Item, ItemId, SortDirection, SortKey};
use reel_session::{CancelFlag, LoadError, LoadResult, ResourceLoader, SearchField, ThumbFormat};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Loader for a Reel Player backend.
///
/// All routes share the `{status, message?, data?}` envelope: `data` carries
/// the payload on success and `message` the reason on failure.
///
/// # Example
///
/// ```ignore
/// use reel_client::HttpLoader;
///
/// let loader = HttpLoader::new("https://reel.example.com")?;
/// let collections = loader.fetch_collections().await?;
/// println!("Found {} collections", collections.len());
/// ```
pub struct HttpLoader {
    http: Client,
    base_url: String,
}

impl HttpLoader {
    /// Create a loader for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ReelPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// The normalized backend URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sidebar listing of all collections.
    pub async fn fetch_collections(&self) -> Result<Vec<CollectionSummary>> {
        let url = format!("{}/api/playlists", self.base_url);
        self.get_json(&url).await
    }

    fn send_error(error: reqwest::Error) -> ClientError {
        if error.is_connect() || error.is_timeout() {
            ClientError::Unreachable(error.to_string())
        } else {
            ClientError::Request(error)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(Self::send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        envelope.into_result()
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        debug!(url = %url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Self::send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        envelope.into_result()
    }

    async fn post_ack<B: Serialize + Sync>(&self, url: &str, body: &B) -> Result<()> {
        debug!(url = %url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Self::send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let ack: Ack = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        ack.into_result()
    }
}

#[async_trait]
impl ResourceLoader for HttpLoader {
    async fn fetch_collection(
        &self,
        id: &CollectionId,
        sort_key: SortKey,
        sort_direction: SortDirection,
    ) -> LoadResult<Vec<Item>> {
        let url = format!(
            "{}/api/playlist/{}?sort={}&direction={}",
            self.base_url,
            id,
            sort_key.as_str(),
            sort_direction.as_str()
        );
        Ok(self.get_json(&url).await?)
    }

    async fn fetch_item(&self, id: &ItemId) -> LoadResult<Item> {
        let url = format!("{}/api/video/{}", self.base_url, id);
        Ok(self.get_json(&url).await?)
    }

    async fn fetch_search(
        &self,
        field: SearchField,
        query: &str,
        cancel: CancelFlag,
    ) -> LoadResult<Vec<Item>> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled.into());
        }

        let url = format!(
            "{}/api/search?field={}&q={}",
            self.base_url,
            field.as_str(),
            urlencoding::encode(query)
        );
        let results: Vec<Item> = self.get_json(&url).await?;

        // Superseded while in flight: drop the payload before it is handed on
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled.into());
        }
        Ok(results)
    }

    async fn fetch_thumbnails(
        &self,
        ids: &[ItemId],
        format: ThumbFormat,
    ) -> LoadResult<HashMap<ItemId, Vec<u8>>> {
        #[derive(Serialize)]
        struct ThumbRequest<'a> {
            ids: &'a [ItemId],
            format: &'a str,
        }

        let url = format!("{}/api/thumbnails", self.base_url);
        let encoded: HashMap<String, String> = self
            .post_json(
                &url,
                &ThumbRequest {
                    ids,
                    format: format.as_str(),
                },
            )
            .await?;

        let mut thumbnails = HashMap::with_capacity(encoded.len());
        for (id, data) in encoded {
            let bytes = BASE64
                .decode(data.as_bytes())
                .map_err(|e| LoadError::new(format!("invalid thumbnail encoding: {}", e)))?;
            thumbnails.insert(ItemId::new(id), bytes);
        }
        Ok(thumbnails)
    }

    async fn persist_preference(&self, name: &str, value: &str) -> LoadResult<()> {
        #[derive(Serialize)]
        struct Preference<'a> {
            name: &'a str,
            value: &'a str,
        }

        let url = format!("{}/api/preference", self.base_url);
        self.post_ack(&url, &Preference { name, value }).await?;
        Ok(())
    }
}
