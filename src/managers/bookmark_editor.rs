//! Bookmark Editor for Sheetmarks.
//!
//! The modal form that creates or updates one record. While the user types a
//! bookmark name, the suggestion store is queried for existing names; those
//! suggestions double as a duplicate guard on submit, together with the list
//! controller's authoritative records.
//!
//! ```text
//! Closed --open--> Open(Add) | Open(Edit)
//! Open(*) --submit completes | cancel--> Closed
//! ```
//!
//! Submit closes the editor whether the request succeeded or failed; only a
//! validation error keeps it open.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, warn};
use serde::Serialize;

use crate::managers::bookmark_list::BookmarkListController;
use crate::managers::notification_center::NotificationCenter;
use crate::services::record_store::{RecordStoreTrait, StoreAck};
use crate::services::suggestion_store::SuggestionStoreTrait;
use crate::types::bookmark::{
    BookmarkRecord, BookmarkType, FormInput, PickerOption, Priority, RecordId,
};
use crate::types::errors::{EditorError, StoreError};
use crate::types::notification::Notification;
use crate::types::operation::OperationState;
use crate::types::suggestion::Suggestion;

/// Which record, if any, the modal is working on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Closed,
    Add,
    Edit(BookmarkRecord),
}

impl EditorMode {
    pub fn name(&self) -> &'static str {
        match self {
            EditorMode::Closed => "closed",
            EditorMode::Add => "add",
            EditorMode::Edit(_) => "edit",
        }
    }

    /// Modal title for the open modes.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            EditorMode::Closed => None,
            EditorMode::Add => Some("Add Bookmark"),
            EditorMode::Edit(_) => Some("Update Bookmark"),
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store confirmed the change and the list was reloaded.
    Saved,
    /// The request was sent but failed or went unconfirmed.
    Failed(String),
    /// Validation stopped the submit before any request.
    Rejected(EditorError),
    /// An earlier submit is still in flight; nothing was sent.
    InFlight,
}

/// Serializable view of the editor's state.
#[derive(Debug, Clone, Serialize)]
pub struct EditorSnapshot {
    pub mode: &'static str,
    pub title: Option<&'static str>,
    pub record: Option<BookmarkRecord>,
    pub form: FormInput,
    pub suggestions: Vec<Suggestion>,
    pub validation_error: Option<String>,
    pub submit_state: OperationState,
    pub type_options: Vec<PickerOption>,
    pub priority_options: Vec<PickerOption>,
}

#[derive(Default)]
struct EditorState {
    mode: EditorMode,
    form: FormInput,
    suggestions: Vec<Suggestion>,
    validation_error: Option<String>,
    submit_state: OperationState,
}

enum StoreRequest {
    Create(BookmarkRecord),
    Update {
        id: Option<RecordId>,
        record: BookmarkRecord,
    },
}

impl StoreRequest {
    fn success_message(&self) -> &'static str {
        match self {
            StoreRequest::Create(_) => "Data added successfully!",
            StoreRequest::Update { .. } => "Data updated successfully!",
        }
    }

    fn unconfirmed_message(&self) -> &'static str {
        match self {
            StoreRequest::Create(_) => "Failed to add data.",
            StoreRequest::Update { .. } => "Failed to update data.",
        }
    }
}

pub struct BookmarkEditor {
    records: Arc<dyn RecordStoreTrait>,
    suggestions: Arc<dyn SuggestionStoreTrait>,
    list: Arc<BookmarkListController>,
    notifications: Arc<NotificationCenter>,
    state: Mutex<EditorState>,
}

impl BookmarkEditor {
    pub fn new(
        records: Arc<dyn RecordStoreTrait>,
        suggestions: Arc<dyn SuggestionStoreTrait>,
        list: Arc<BookmarkListController>,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            records,
            suggestions,
            list,
            notifications,
            state: Mutex::new(EditorState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the modal. In edit mode the form starts from the record's values.
    pub fn open(&self, mode: EditorMode) {
        let mut state = self.lock();
        state.form = match &mode {
            EditorMode::Edit(record) => FormInput::from_record(record),
            _ => FormInput::default(),
        };
        state.mode = mode;
        state.suggestions.clear();
        state.validation_error = None;
        if !state.submit_state.is_pending() {
            state.submit_state = OperationState::Idle;
        }
    }

    /// Updates the bookmark name and refreshes the autocomplete list.
    ///
    /// Lookup failures are logged and shown as a disabled placeholder; they
    /// never block the form.
    pub async fn on_name_input_changed(&self, partial_query: &str) -> Vec<Suggestion> {
        {
            let mut state = self.lock();
            state.form.bookmark = Some(partial_query.to_string());
            if partial_query.is_empty() {
                state.suggestions.clear();
                return Vec::new();
            }
        }

        let next = match self.suggestions.search_bookmarks(partial_query).await {
            Ok(rows) if rows.is_empty() => vec![Suggestion::NoneFound],
            Ok(rows) => rows
                .into_iter()
                .map(|row| Suggestion::Candidate(row.bookmark))
                .collect(),
            Err(e) => {
                warn!("Failed to fetch suggestions: {}", e);
                vec![Suggestion::LookupFailed]
            }
        };

        self.lock().suggestions = next.clone();
        next
    }

    /// Validates the form and sends a create or update to the record store.
    ///
    /// `input` fields overwrite the current form values; absent fields keep
    /// what the form already holds. On a confirmed save the list controller
    /// reloads.
    pub async fn submit(&self, input: FormInput) -> SubmitOutcome {
        let authoritative = self.list.records();

        let request = {
            let mut state = self.lock();
            if state.submit_state.is_pending() {
                debug!("submit ignored: previous submit still in flight");
                return SubmitOutcome::InFlight;
            }
            if state.mode == EditorMode::Closed {
                drop(state);
                self.notifications
                    .push(Notification::error(EditorError::NotOpen.to_string()));
                return SubmitOutcome::Rejected(EditorError::NotOpen);
            }

            state.form.overlay(input);
            let form = match state.form.validate() {
                Ok(form) => form,
                Err(e) => {
                    state.validation_error = Some(e.to_string());
                    return SubmitOutcome::Rejected(e);
                }
            };

            let editing = match &state.mode {
                EditorMode::Edit(record) => Some(record),
                _ => None,
            };
            if is_duplicate(&form.bookmark, &state.suggestions, &authoritative, editing) {
                let err = EditorError::Duplicate(form.bookmark.clone());
                state.validation_error = Some(err.to_string());
                drop(state);
                self.notifications.push(Notification::error(err.to_string()));
                return SubmitOutcome::Rejected(err);
            }

            state.validation_error = None;
            state.submit_state = OperationState::Pending;
            match &state.mode {
                EditorMode::Edit(existing) => StoreRequest::Update {
                    id: existing.record_id(),
                    record: existing.merged_with(&form),
                },
                _ => StoreRequest::Create(BookmarkRecord::new_with_generated_id(&form)),
            }
        };

        let result: Result<StoreAck, StoreError> = match &request {
            StoreRequest::Create(record) => self.records.create(record).await,
            StoreRequest::Update { id: Some(id), record } => self.records.update(id, record).await,
            StoreRequest::Update { id: None, record } => {
                Err(StoreError::MissingId(record.bookmark.clone()))
            }
        };

        let outcome = match result {
            Ok(ack) if ack.is_confirmed() => {
                self.notifications
                    .push(Notification::success(request.success_message()));
                SubmitOutcome::Saved
            }
            Ok(_) => {
                let msg = request.unconfirmed_message();
                error!("{}", msg);
                self.notifications.push(Notification::error(msg));
                SubmitOutcome::Failed(msg.to_string())
            }
            Err(e) => {
                error!("bookmark save failed: {}", e);
                self.notifications
                    .push(Notification::error(format!("Error: {}", e)));
                SubmitOutcome::Failed(e.to_string())
            }
        };

        self.close(match &outcome {
            SubmitOutcome::Saved => OperationState::Succeeded,
            SubmitOutcome::Failed(msg) => OperationState::Failed(msg.clone()),
            _ => OperationState::Idle,
        });

        if outcome == SubmitOutcome::Saved {
            self.list.load_all().await;
        }
        outcome
    }

    /// Discards the form and closes the modal without contacting any store.
    pub fn cancel(&self) {
        let submit_state = self.lock().submit_state.clone();
        self.close(submit_state);
    }

    fn close(&self, submit_state: OperationState) {
        {
            let mut state = self.lock();
            state.mode = EditorMode::Closed;
            state.form = FormInput::default();
            state.suggestions.clear();
            state.validation_error = None;
            state.submit_state = submit_state;
        }
        self.list.mark_editor_closed();
    }

    pub fn mode(&self) -> EditorMode {
        self.lock().mode.clone()
    }

    pub fn is_open(&self) -> bool {
        self.lock().mode != EditorMode::Closed
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.lock().suggestions.clone()
    }

    pub fn form(&self) -> FormInput {
        self.lock().form.clone()
    }

    pub fn validation_error(&self) -> Option<String> {
        self.lock().validation_error.clone()
    }

    pub fn submit_state(&self) -> OperationState {
        self.lock().submit_state.clone()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        let state = self.lock();
        let record = match &state.mode {
            EditorMode::Edit(record) => Some(record.clone()),
            _ => None,
        };
        EditorSnapshot {
            mode: state.mode.name(),
            title: state.mode.title(),
            record,
            form: state.form.clone(),
            suggestions: state.suggestions.clone(),
            validation_error: state.validation_error.clone(),
            submit_state: state.submit_state.clone(),
            type_options: BookmarkType::options(),
            priority_options: Priority::options(),
        }
    }
}

/// True when `name` equals, ignoring case, an enabled suggestion or a record
/// in the authoritative list other than the one being edited.
pub fn is_duplicate(
    name: &str,
    suggestions: &[Suggestion],
    records: &[BookmarkRecord],
    editing: Option<&BookmarkRecord>,
) -> bool {
    let name = name.to_lowercase();
    let in_suggestions = suggestions
        .iter()
        .filter(|s| s.is_enabled())
        .any(|s| s.text().to_lowercase() == name);
    let in_records = records
        .iter()
        .filter(|r| editing.map_or(true, |e| r.key() != e.key()))
        .any(|r| r.bookmark.to_lowercase() == name);
    in_suggestions || in_records
}
