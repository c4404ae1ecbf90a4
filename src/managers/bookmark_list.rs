//! Bookmark List Controller for Sheetmarks.
//!
//! Owns the authoritative in-memory list of bookmark records fetched from the
//! record store, the filtered view derived from it, and the table's paging.
//! Every mutation goes to the store first and is followed by a full reload;
//! nothing is removed or inserted locally.
//!
//! State lives behind a mutex that is never held across an `.await`, so
//! concurrent requests interleave like UI callbacks. Concurrent reloads are
//! last-write-wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error};
use serde::Serialize;

use crate::managers::bookmark_editor::EditorMode;
use crate::managers::notification_center::NotificationCenter;
use crate::managers::pagination::{PageView, Pager};
use crate::services::record_store::RecordStoreTrait;
use crate::types::bookmark::{BookmarkRecord, RecordId, RecordKey};
use crate::types::errors::PaginationError;
use crate::types::notification::Notification;
use crate::types::operation::OperationState;

/// A table row: the record plus the key the table renders it under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub key: RecordKey,
    #[serde(flatten)]
    pub record: BookmarkRecord,
}

impl From<&BookmarkRecord> for TableRow {
    fn from(record: &BookmarkRecord) -> Self {
        Self {
            key: record.key(),
            record: record.clone(),
        }
    }
}

/// Serializable view of the controller's state.
#[derive(Debug, Clone, Serialize)]
pub struct ListSnapshot {
    pub records: Vec<BookmarkRecord>,
    pub visible: Vec<TableRow>,
    pub active_query: Option<String>,
    pub is_loading: bool,
    pub load_state: OperationState,
    pub is_editor_open: bool,
    pub record_being_edited: Option<BookmarkRecord>,
}

struct ListState {
    records: Vec<BookmarkRecord>,
    visible: Vec<BookmarkRecord>,
    active_query: Option<String>,
    is_loading: bool,
    loads_in_flight: usize,
    load_state: OperationState,
    delete_states: HashMap<RecordId, OperationState>,
    is_editor_open: bool,
    record_being_edited: Option<BookmarkRecord>,
    pager: Pager,
}

pub struct BookmarkListController {
    store: Arc<dyn RecordStoreTrait>,
    notifications: Arc<NotificationCenter>,
    state: Mutex<ListState>,
}

impl BookmarkListController {
    pub fn new(
        store: Arc<dyn RecordStoreTrait>,
        notifications: Arc<NotificationCenter>,
        pager: Pager,
    ) -> Self {
        Self {
            store,
            notifications,
            state: Mutex::new(ListState {
                records: Vec::new(),
                visible: Vec::new(),
                active_query: None,
                is_loading: false,
                loads_in_flight: 0,
                load_state: OperationState::Idle,
                delete_states: HashMap::new(),
                is_editor_open: false,
                record_being_edited: None,
                pager,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches every record and replaces both the list and the visible view.
    ///
    /// Any active search is dropped. On failure the previous records stay in
    /// place and an error notification is raised. Overlapping loads apply in
    /// arrival order; `is_loading` stays set until the last one finishes.
    pub async fn load_all(&self) -> OperationState {
        {
            let mut state = self.lock();
            state.loads_in_flight += 1;
            state.is_loading = true;
            state.load_state = OperationState::Pending;
        }

        let result = self.store.list().await;

        let outcome = {
            let mut state = self.lock();
            state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
            state.is_loading = state.loads_in_flight > 0;

            let outcome = match result {
                Ok(records) => {
                    debug!("loaded {} bookmarks", records.len());
                    state.delete_states.retain(|id, op| {
                        op.is_pending() || records.iter().any(|r| r.id.as_deref() == Some(id.as_str()))
                    });
                    state.visible = records.clone();
                    state.records = records;
                    state.active_query = None;
                    Ok(())
                }
                Err(e) => Err(e),
            };
            state.load_state = match (&outcome, state.is_loading) {
                (_, true) => OperationState::Pending,
                (Ok(()), false) => OperationState::Succeeded,
                (Err(e), false) => OperationState::Failed(e.to_string()),
            };
            outcome
        };

        match outcome {
            Ok(()) => OperationState::Succeeded,
            Err(e) => {
                error!("failed to fetch bookmarks: {}", e);
                self.notifications
                    .push(Notification::error(format!("Failed to fetch bookmarks: {}", e)));
                OperationState::Failed(e.to_string())
            }
        }
    }

    /// Filters the visible view to records whose bookmark, type or priority
    /// contains `query`, ignoring case. Returns the new visible sequence.
    pub fn search(&self, query: &str) -> Vec<BookmarkRecord> {
        let needle = query.to_lowercase();
        let mut state = self.lock();
        let filtered: Vec<BookmarkRecord> = state
            .records
            .iter()
            .filter(|r| r.matches(&needle))
            .cloned()
            .collect();
        state.visible = filtered.clone();
        state.active_query = Some(query.to_string());
        filtered
    }

    /// Drops the active search and shows every record again.
    pub fn clear_search(&self) -> Vec<BookmarkRecord> {
        let mut state = self.lock();
        state.visible = state.records.clone();
        state.active_query = None;
        state.visible.clone()
    }

    /// Deletes a record in the store, then reloads the list.
    ///
    /// A second call for an id whose delete is still in flight returns
    /// `Pending` without sending another request. Only failed deletes keep an
    /// entry in the per-id state, and only while the id is still listed.
    pub async fn remove(&self, id: &RecordId) -> OperationState {
        {
            let mut state = self.lock();
            if state
                .delete_states
                .get(id)
                .is_some_and(OperationState::is_pending)
            {
                debug!("delete of {} already in flight", id);
                return OperationState::Pending;
            }
            state.delete_states.insert(id.clone(), OperationState::Pending);
        }

        let outcome = match self.store.delete(id).await {
            Ok(ack) if ack.is_confirmed() => {
                self.load_all().await;
                self.notifications
                    .push(Notification::success("Data deleted successfully!"));
                OperationState::Succeeded
            }
            Ok(_) => {
                let msg = "the store did not confirm the delete".to_string();
                error!("delete of {} failed: {}", id, msg);
                self.notifications
                    .push(Notification::error(format!("Error during deletion: {}", msg)));
                OperationState::Failed(msg)
            }
            Err(e) => {
                error!("delete of {} failed: {}", id, e);
                self.notifications
                    .push(Notification::error(format!("Error during deletion: {}", e)));
                OperationState::Failed(e.to_string())
            }
        };

        let mut state = self.lock();
        if outcome == OperationState::Succeeded {
            state.delete_states.remove(id);
        } else {
            state.delete_states.insert(id.clone(), outcome.clone());
        }
        outcome
    }

    /// Marks the editor open. `None` means add mode, a record means edit mode.
    pub fn open_editor(&self, record: Option<BookmarkRecord>) -> EditorMode {
        let mut state = self.lock();
        state.is_editor_open = true;
        state.record_being_edited = record.clone();
        match record {
            Some(record) => EditorMode::Edit(record),
            None => EditorMode::Add,
        }
    }

    pub fn mark_editor_closed(&self) {
        let mut state = self.lock();
        state.is_editor_open = false;
        state.record_being_edited = None;
    }

    /// Looks a record up by table key: its id, or its bookmark when it has none.
    pub fn find_by_key(&self, key: &str) -> Option<BookmarkRecord> {
        self.lock()
            .records
            .iter()
            .find(|r| r.key().as_str() == key)
            .cloned()
    }

    /// Current page of the visible view. Changing the size keeps the page
    /// clamped into range.
    pub fn page(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> Result<PageView<TableRow>, PaginationError> {
        let mut state = self.lock();
        if let Some(size) = page_size {
            state.pager.set_page_size(size)?;
        }
        if let Some(page) = page {
            state.pager.jump_to(page);
        }
        let rows: Vec<TableRow> = state.visible.iter().map(TableRow::from).collect();
        Ok(state.pager.view(&rows))
    }

    pub fn records(&self) -> Vec<BookmarkRecord> {
        self.lock().records.clone()
    }

    pub fn visible_records(&self) -> Vec<BookmarkRecord> {
        self.lock().visible.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn is_editor_open(&self) -> bool {
        self.lock().is_editor_open
    }

    pub fn record_being_edited(&self) -> Option<BookmarkRecord> {
        self.lock().record_being_edited.clone()
    }

    pub fn load_state(&self) -> OperationState {
        self.lock().load_state.clone()
    }

    pub fn delete_state(&self, id: &RecordId) -> OperationState {
        self.lock().delete_states.get(id).cloned().unwrap_or_default()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let state = self.lock();
        ListSnapshot {
            records: state.records.clone(),
            visible: state.visible.iter().map(TableRow::from).collect(),
            active_query: state.active_query.clone(),
            is_loading: state.is_loading,
            load_state: state.load_state.clone(),
            is_editor_open: state.is_editor_open,
            record_being_edited: state.record_being_edited.clone(),
        }
    }
}
