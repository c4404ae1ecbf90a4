use std::fmt;

// === StoreError ===

/// Errors returned by the remote record and suggestion stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The request never produced a response (connect, DNS, TLS, body read).
    Network(String),
    /// The store answered with a non-success HTTP status.
    Status(u16, String),
    /// The response body could not be decoded.
    Decode(String),
    /// A mutation was attempted on a record that has no stable id.
    MissingId(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Network(msg) => write!(f, "Network error: {}", msg),
            StoreError::Status(code, msg) => {
                write!(f, "Request failed with status code {}: {}", code, msg)
            }
            StoreError::Decode(msg) => write!(f, "Invalid response body: {}", msg),
            StoreError::MissingId(bookmark) => {
                write!(f, "Bookmark has no id and cannot be addressed: {}", bookmark)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => StoreError::Status(status.as_u16(), e.to_string()),
            None if e.is_decode() => StoreError::Decode(e.to_string()),
            None => StoreError::Network(e.to_string()),
        }
    }
}

// === EditorError ===

/// Validation errors raised by the bookmark editor before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A required form field is empty. Carries the prompt shown to the user.
    MissingField(String),
    /// A field holds a value outside its allowed set.
    InvalidValue(String),
    /// The bookmark name is already taken.
    Duplicate(String),
    /// Submit was called while the editor is closed.
    NotOpen,
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::MissingField(prompt) => f.write_str(prompt),
            EditorError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            EditorError::Duplicate(_) => f.write_str("This bookmark already exists!"),
            EditorError::NotOpen => f.write_str("Invalid operation."),
        }
    }
}

impl std::error::Error for EditorError {}

// === SettingsError ===

/// Errors related to client settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === PaginationError ===

/// Errors related to table paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// The requested page size is not one of the configured options.
    InvalidPageSize(usize),
}

impl fmt::Display for PaginationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationError::InvalidPageSize(size) => write!(f, "Invalid page size: {}", size),
        }
    }
}

impl std::error::Error for PaginationError {}
