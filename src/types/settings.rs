use serde::{Deserialize, Serialize};

pub const DEFAULT_RECORD_STORE_URL: &str = "https://sheetdb.io/api/v1/xst6grt6c9tow";
pub const DEFAULT_SUGGESTION_STORE_URL: &str = "https://sheetdb.io/api/v1/3nh9gsmivu5e4";
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Client configuration: where the two stores live and how the table pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    pub record_store_url: String,
    pub suggestion_store_url: String,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            record_store_url: DEFAULT_RECORD_STORE_URL.to_string(),
            suggestion_store_url: DEFAULT_SUGGESTION_STORE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 30, 40, 50],
        }
    }
}
