//! Suggestion store client for Sheetmarks.
//!
//! A second spreadsheet API queried only for bookmark-name autocomplete.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::types::errors::StoreError;
use crate::types::suggestion::SuggestionRow;

/// Lookup of existing bookmark names.
#[async_trait]
pub trait SuggestionStoreTrait: Send + Sync {
    /// Rows whose `bookmark` column matches `query`. Empty when nothing matches.
    async fn search_bookmarks(&self, query: &str) -> Result<Vec<SuggestionRow>, StoreError>;
}

pub struct HttpSuggestionStore {
    client: Client,
    base_url: String,
}

impl HttpSuggestionStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `{base}?search=bookmark:{query}`
    pub fn search_url(&self, query: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StoreError::Network(format!("invalid suggestion store url: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("search", &format!("bookmark:{}", query));
        Ok(url)
    }
}

#[async_trait]
impl SuggestionStoreTrait for HttpSuggestionStore {
    async fn search_bookmarks(&self, query: &str) -> Result<Vec<SuggestionRow>, StoreError> {
        let url = self.search_url(query)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}
