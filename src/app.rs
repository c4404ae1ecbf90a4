//! App Core for Sheetmarks.
//!
//! Central struct wiring settings, the two remote stores, the list controller,
//! the editor and the notification queue together.

use std::sync::{Arc, Mutex};

use crate::managers::bookmark_editor::{BookmarkEditor, EditorMode};
use crate::managers::bookmark_list::BookmarkListController;
use crate::managers::notification_center::NotificationCenter;
use crate::managers::pagination::Pager;
use crate::services::record_store::{HttpRecordStore, RecordStoreTrait};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::suggestion_store::{HttpSuggestionStore, SuggestionStoreTrait};
use crate::types::operation::OperationState;

/// Central application struct holding all controllers and services.
pub struct App {
    pub settings_engine: Mutex<SettingsEngine>,
    pub notifications: Arc<NotificationCenter>,
    pub bookmark_list: Arc<BookmarkListController>,
    pub bookmark_editor: BookmarkEditor,
}

impl App {
    /// Loads settings (file, then environment overrides) and connects to the
    /// configured HTTP stores.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        settings_engine.load()?;
        settings_engine.apply_env_overrides();

        let settings = settings_engine.get_settings();
        let client = reqwest::Client::builder()
            .user_agent(concat!("sheetmarks/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let record_store = Arc::new(HttpRecordStore::with_client(
            client.clone(),
            settings.record_store_url.clone(),
        ));
        let suggestion_store = Arc::new(HttpSuggestionStore::with_client(
            client,
            settings.suggestion_store_url.clone(),
        ));

        Ok(Self::with_stores(settings_engine, record_store, suggestion_store))
    }

    /// Builds the app around already-constructed stores.
    pub fn with_stores(
        settings_engine: SettingsEngine,
        record_store: Arc<dyn RecordStoreTrait>,
        suggestion_store: Arc<dyn SuggestionStoreTrait>,
    ) -> Self {
        let settings = settings_engine.get_settings();
        let pager = Pager::new(settings.page_size, settings.page_size_options.clone());
        let notifications = Arc::new(NotificationCenter::new());

        let bookmark_list = Arc::new(BookmarkListController::new(
            record_store.clone(),
            notifications.clone(),
            pager,
        ));
        let bookmark_editor = BookmarkEditor::new(
            record_store,
            suggestion_store,
            bookmark_list.clone(),
            notifications.clone(),
        );

        Self {
            settings_engine: Mutex::new(settings_engine),
            notifications,
            bookmark_list,
            bookmark_editor,
        }
    }

    /// Startup sequence: fetch the bookmark table.
    pub async fn startup(&self) -> OperationState {
        self.bookmark_list.load_all().await
    }

    /// Opens the editor in add mode (`None`) or on the record with the given
    /// table key.
    pub fn open_editor(&self, key: Option<&str>) -> Result<EditorMode, String> {
        let record = match key {
            Some(key) => Some(
                self.bookmark_list
                    .find_by_key(key)
                    .ok_or_else(|| format!("bookmark not found: {}", key))?,
            ),
            None => None,
        };
        let mode = self.bookmark_list.open_editor(record);
        self.bookmark_editor.open(mode.clone());
        Ok(mode)
    }
}
