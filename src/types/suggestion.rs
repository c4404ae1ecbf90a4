use serde::{Deserialize, Serialize};

pub const NO_SUGGESTIONS_TEXT: &str = "No suggestions available";
pub const LOOKUP_FAILED_TEXT: &str = "Error fetching suggestions";

/// One row returned by the suggestion store. Only `bookmark` is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRow {
    pub bookmark: String,
}

/// An autocomplete entry under the bookmark name field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// An existing bookmark name; selectable and used by the duplicate check.
    Candidate(String),
    /// Disabled placeholder: the lookup returned no rows.
    NoneFound,
    /// Disabled placeholder: the lookup request failed.
    LookupFailed,
}

impl Suggestion {
    pub fn text(&self) -> &str {
        match self {
            Suggestion::Candidate(value) => value,
            Suggestion::NoneFound => NO_SUGGESTIONS_TEXT,
            Suggestion::LookupFailed => LOOKUP_FAILED_TEXT,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Suggestion::Candidate(_))
    }
}

impl Serialize for Suggestion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Suggestion", 2)?;
        s.serialize_field("value", self.text())?;
        s.serialize_field("disabled", &!self.is_enabled())?;
        s.end()
    }
}
