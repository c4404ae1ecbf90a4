// Sheetmarks services
// Services reach the remote stores and manage client configuration.

pub mod record_store;
pub mod settings_engine;
pub mod suggestion_store;
