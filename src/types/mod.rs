// Sheetmarks shared type definitions
// Each submodule defines types used across the client.

pub mod bookmark;
pub mod errors;
pub mod notification;
pub mod operation;
pub mod settings;
pub mod suggestion;
