use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::EditorError;

/// A `{value, label}` pair for the type and priority pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
}

/// Category of a bookmark, stored as its lowercase wire string.
///
/// Rows written by other clients may carry any string in the `type` column;
/// those decode to `Unrecognized` and round-trip unchanged. The form only
/// accepts the known variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookmarkType {
    Python,
    Java,
    Javascript,
    Typescript,
    Project,
    Other,
    Unrecognized(String),
}

impl BookmarkType {
    pub const ALL: [BookmarkType; 6] = [
        BookmarkType::Python,
        BookmarkType::Java,
        BookmarkType::Javascript,
        BookmarkType::Typescript,
        BookmarkType::Project,
        BookmarkType::Other,
    ];

    /// The value sent to and received from the record store.
    pub fn as_str(&self) -> &str {
        match self {
            BookmarkType::Python => "python",
            BookmarkType::Java => "java",
            BookmarkType::Javascript => "javascript",
            BookmarkType::Typescript => "typescript",
            BookmarkType::Project => "project",
            BookmarkType::Other => "other",
            BookmarkType::Unrecognized(raw) => raw,
        }
    }

    /// Human-readable label shown in the type picker.
    pub fn label(&self) -> &str {
        match self {
            BookmarkType::Python => "Python",
            BookmarkType::Java => "Java",
            BookmarkType::Javascript => "JavaScript",
            BookmarkType::Typescript => "TypeScript",
            BookmarkType::Project => "Project",
            BookmarkType::Other => "Other",
            BookmarkType::Unrecognized(raw) => raw,
        }
    }

    /// Known variants only.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().find(|t| t.as_str() == value).cloned()
    }

    pub fn options() -> Vec<PickerOption> {
        Self::ALL
            .iter()
            .map(|t| PickerOption {
                value: t.as_str().to_string(),
                label: t.label().to_string(),
            })
            .collect()
    }
}

impl Default for BookmarkType {
    fn default() -> Self {
        BookmarkType::Unrecognized(String::new())
    }
}

impl From<String> for BookmarkType {
    fn from(raw: String) -> Self {
        Self::parse(&raw).unwrap_or(BookmarkType::Unrecognized(raw))
    }
}

impl From<BookmarkType> for String {
    fn from(kind: BookmarkType) -> Self {
        match kind {
            BookmarkType::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BookmarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How soon a bookmark needs attention. Unknown cells decode to
/// `Unrecognized`, as for [`BookmarkType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Important,
    NotSo,
    Urgent,
    Unrecognized(String),
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Important, Priority::NotSo, Priority::Urgent];

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Important => "important",
            Priority::NotSo => "not-so",
            Priority::Urgent => "urgent",
            Priority::Unrecognized(raw) => raw,
        }
    }

    /// Label shown in the priority picker. `Urgent` is presented as "Now".
    pub fn label(&self) -> &str {
        match self {
            Priority::Important => "Important",
            Priority::NotSo => "Not-so",
            Priority::Urgent => "Now",
            Priority::Unrecognized(raw) => raw,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().find(|p| p.as_str() == value).cloned()
    }

    pub fn options() -> Vec<PickerOption> {
        Self::ALL
            .iter()
            .map(|p| PickerOption {
                value: p.as_str().to_string(),
                label: p.label().to_string(),
            })
            .collect()
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Unrecognized(String::new())
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        Self::parse(&raw).unwrap_or(Priority::Unrecognized(raw))
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier the record store addresses rows by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps a non-empty identifier. Empty strings are not addressable.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Generates a fresh random identifier for a new record.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Row identity used by the table.
///
/// Only `Stable` keys can address the record store; `DisplayOnly` keys exist
/// so rows without an id still render with a unique key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RecordKey {
    Stable(RecordId),
    DisplayOnly(String),
}

impl RecordKey {
    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            RecordKey::Stable(id) => Some(id),
            RecordKey::DisplayOnly(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordKey::Stable(id) => id.as_str(),
            RecordKey::DisplayOnly(key) => key,
        }
    }
}

/// A bookmark row as stored in the remote spreadsheet.
///
/// Missing cells decode to empty values so a single incomplete row never
/// fails a whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub bookmark: String,
    #[serde(default, rename = "type")]
    pub kind: BookmarkType,
    #[serde(default)]
    pub priority: Priority,
}

impl BookmarkRecord {
    /// Builds a record for creation, with a freshly generated id.
    pub fn new_with_generated_id(form: &BookmarkForm) -> Self {
        Self {
            id: Some(RecordId::generate().to_string()),
            bookmark: form.bookmark.clone(),
            kind: form.kind.clone(),
            priority: form.priority.clone(),
        }
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.id.clone().and_then(RecordId::new)
    }

    /// Stable id when present, otherwise the bookmark string.
    pub fn key(&self) -> RecordKey {
        match self.record_id() {
            Some(id) => RecordKey::Stable(id),
            None => RecordKey::DisplayOnly(self.bookmark.clone()),
        }
    }

    /// Case-insensitive substring match over bookmark, type and priority.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.bookmark.to_lowercase().contains(needle)
            || self.kind.as_str().to_lowercase().contains(needle)
            || self.priority.as_str().to_lowercase().contains(needle)
    }

    /// Overwrites the editable fields with the submitted form, keeping the id.
    pub fn merged_with(&self, form: &BookmarkForm) -> Self {
        Self {
            id: self.id.clone(),
            bookmark: form.bookmark.clone(),
            kind: form.kind.clone(),
            priority: form.priority.clone(),
        }
    }
}

/// Raw, possibly partial field values coming from the editor form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub bookmark: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl FormInput {
    /// Form values pre-populated from an existing record.
    pub fn from_record(record: &BookmarkRecord) -> Self {
        Self {
            bookmark: Some(record.bookmark.clone()),
            kind: Some(record.kind.as_str().to_string()),
            priority: Some(record.priority.as_str().to_string()),
        }
    }

    /// Fields set in `other` replace the ones in `self`.
    pub fn overlay(&mut self, other: FormInput) {
        if other.bookmark.is_some() {
            self.bookmark = other.bookmark;
        }
        if other.kind.is_some() {
            self.kind = other.kind;
        }
        if other.priority.is_some() {
            self.priority = other.priority;
        }
    }

    pub fn validate(&self) -> Result<BookmarkForm, EditorError> {
        let bookmark = match self.bookmark.as_deref() {
            Some(b) if !b.trim().is_empty() => b.to_string(),
            _ => {
                return Err(EditorError::MissingField(
                    "Please enter your Bookmark Name!".to_string(),
                ))
            }
        };

        let kind = match self.kind.as_deref() {
            None | Some("") => {
                return Err(EditorError::MissingField("Please enter Bookmark Type".to_string()))
            }
            Some(raw) => BookmarkType::parse(raw)
                .ok_or_else(|| EditorError::InvalidValue(format!("unknown bookmark type '{}'", raw)))?,
        };

        let priority = match self.priority.as_deref() {
            None | Some("") => {
                return Err(EditorError::MissingField("Please enter Priority".to_string()))
            }
            Some(raw) => Priority::parse(raw)
                .ok_or_else(|| EditorError::InvalidValue(format!("unknown priority '{}'", raw)))?,
        };

        Ok(BookmarkForm {
            bookmark,
            kind,
            priority,
        })
    }
}

/// Validated editor submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkForm {
    pub bookmark: String,
    pub kind: BookmarkType,
    pub priority: Priority,
}
