//! Record store client for Sheetmarks.
//!
//! The record store is a spreadsheet-backed REST API exposing four verbs:
//! list all rows, create a row, patch a row by id, delete a row by id.
//! Mutations answer with a small JSON body (e.g. `{"created":1}`); an empty
//! body means the store did not confirm the change.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::types::bookmark::{BookmarkRecord, RecordId};
use crate::types::errors::StoreError;

/// Body returned by a create, update or delete call.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreAck(pub Value);

impl StoreAck {
    /// Parses a response body. A blank body becomes `Value::Null`.
    pub fn from_body(body: &str) -> Result<Self, StoreError> {
        if body.trim().is_empty() {
            return Ok(Self(Value::Null));
        }
        serde_json::from_str(body)
            .map(Self)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// True when the store sent back anything non-empty.
    pub fn is_confirmed(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }
}

/// Operations against the authoritative bookmark store.
#[async_trait]
pub trait RecordStoreTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<BookmarkRecord>, StoreError>;
    async fn create(&self, record: &BookmarkRecord) -> Result<StoreAck, StoreError>;
    async fn update(&self, id: &RecordId, record: &BookmarkRecord) -> Result<StoreAck, StoreError>;
    async fn delete(&self, id: &RecordId) -> Result<StoreAck, StoreError>;
}

/// Record store reached over HTTP.
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the collection (`GET` / `POST`).
    pub fn collection_url(&self) -> Result<Url, StoreError> {
        Url::parse(&self.base_url).map_err(|e| StoreError::Network(format!("invalid store url: {}", e)))
    }

    /// URL addressing one row: `{base}/id/{id}`, with the id percent-encoded.
    pub fn record_url(&self, id: &RecordId) -> Result<Url, StoreError> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Network(format!("store url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("id")
            .push(id.as_str());
        Ok(url)
    }

    async fn read_ack(response: reqwest::Response) -> Result<StoreAck, StoreError> {
        let response = response.error_for_status()?;
        let body = response.text().await?;
        StoreAck::from_body(&body)
    }
}

#[async_trait]
impl RecordStoreTrait for HttpRecordStore {
    async fn list(&self) -> Result<Vec<BookmarkRecord>, StoreError> {
        let url = self.collection_url()?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let records: Vec<BookmarkRecord> =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        debug!("listed {} bookmark records", records.len());
        Ok(records)
    }

    async fn create(&self, record: &BookmarkRecord) -> Result<StoreAck, StoreError> {
        let url = self.collection_url()?;
        let response = self.client.post(url).json(record).send().await?;
        Self::read_ack(response).await
    }

    async fn update(&self, id: &RecordId, record: &BookmarkRecord) -> Result<StoreAck, StoreError> {
        let url = self.record_url(id)?;
        let response = self.client.patch(url).json(record).send().await?;
        Self::read_ack(response).await
    }

    async fn delete(&self, id: &RecordId) -> Result<StoreAck, StoreError> {
        let url = self.record_url(id)?;
        let response = self.client.delete(url).send().await?;
        Self::read_ack(response).await
    }
}
