//! Sheetmarks: a bookmark table kept in sync with a spreadsheet-backed REST store.
//!
//! This library crate exposes all modules for use by the RPC binary and integration tests.

pub mod app;
pub mod managers;
pub mod rpc_handler;
pub mod services;
pub mod types;
