use serde::Serialize;

/// Lifecycle of a single remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum OperationState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl OperationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, OperationState::Pending)
    }
}
