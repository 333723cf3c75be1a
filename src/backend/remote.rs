use std::collections::BTreeMap;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::Backend;
use crate::config::RemoteConfig;
use crate::error::BackendError;

/// Wire form of one stored record
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct ItemRecord {
    quantity: u32,
}

/// Characters that cannot appear raw in a URL path segment. Item names
/// are arbitrary strings used verbatim as record keys, so anything
/// reserved (`?`, `#`, `/`, ...) must be percent-encoded or the request
/// would target the wrong record.
const RECORD_KEY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Remote backend: one document per item in a hosted collection.
///
/// The record key is the item name, the body `{"quantity": n}`. Writes
/// are last-writer-wins; two sessions racing a read-modify-write can
/// lose an update, an accepted limitation of this single-user design.
pub struct RemoteBackend {
    client: Client,
    collection_url: String,
    api_key: Option<String>,
}

impl RemoteBackend {
    /// Create a backend for the collection described by `config`
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            collection_url: format!(
                "{}/projects/{}/collections/{}",
                config.base_url.trim_end_matches('/'),
                config.project_id,
                config.collection,
            ),
            api_key: config.resolve_api_key(),
        }
    }

    fn record_url(&self, name: &str) -> String {
        format!("{}/{}", self.collection_url, utf8_percent_encode(name, RECORD_KEY))
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        builder
    }

    async fn check(resp: Response) -> Result<Response, BackendError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(BackendError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Backend for RemoteBackend {
    async fn read_all(&self) -> Result<BTreeMap<String, u32>, BackendError> {
        let resp = self
            .request(Method::GET, self.collection_url.clone())
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let records: BTreeMap<String, ItemRecord> = resp.json().await?;
        debug!(records = records.len(), "fetched inventory collection");
        Ok(records
            .into_iter()
            .map(|(name, record)| (name, record.quantity))
            .collect())
    }

    async fn upsert(&self, name: &str, quantity: u32) -> Result<(), BackendError> {
        let resp = self
            .request(Method::PUT, self.record_url(name))
            .json(&ItemRecord { quantity })
            .send()
            .await?;
        Self::check(resp).await?;
        debug!(item = name, quantity, "upserted remote record");
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), BackendError> {
        let resp = self
            .request(Method::DELETE, self.record_url(name))
            .send()
            .await?;
        // An absent record is already the desired state
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(resp).await?;
        debug!(item = name, "deleted remote record");
        Ok(())
    }
}
