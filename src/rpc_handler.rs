//! RPC method handler for the Sheetmarks JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches method calls to the controllers held by `App`.

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_editor::SubmitOutcome;
use crate::managers::bookmark_list::TableRow;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::bookmark::{BookmarkRecord, FormInput, RecordId};

fn rows_json(records: &[BookmarkRecord]) -> Result<Value, String> {
    let rows: Vec<TableRow> = records.iter().map(TableRow::from).collect();
    serde_json::to_value(rows).map_err(|e| e.to_string())
}

fn optional_usize(params: &Value, name: &str) -> Result<Option<usize>, String> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| format!("invalid {}", name)),
    }
}

/// Converts a submit outcome into its wire form.
pub fn submit_outcome_json(outcome: &SubmitOutcome) -> Value {
    match outcome {
        SubmitOutcome::Saved => json!({"outcome": "saved"}),
        SubmitOutcome::Failed(msg) => json!({"outcome": "failed", "message": msg}),
        SubmitOutcome::Rejected(err) => json!({"outcome": "rejected", "message": err.to_string()}),
        SubmitOutcome::InFlight => json!({"outcome": "in_flight"}),
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmark table ───
        "bookmarks.load" => {
            let state = app.bookmark_list.load_all().await;
            let count = app.bookmark_list.records().len();
            Ok(json!({"state": state, "count": count}))
        }
        "bookmarks.search" => {
            let query = params.get("query").and_then(|v| v.as_str()).ok_or("missing query")?;
            let visible = app.bookmark_list.search(query);
            rows_json(&visible)
        }
        "bookmarks.clear_search" => {
            let visible = app.bookmark_list.clear_search();
            rows_json(&visible)
        }
        "bookmarks.page" => {
            let page = optional_usize(params, "page")?;
            let page_size = optional_usize(params, "page_size")?;
            let view = app
                .bookmark_list
                .page(page, page_size)
                .map_err(|e| e.to_string())?;
            serde_json::to_value(view).map_err(|e| e.to_string())
        }
        "bookmarks.delete" => {
            let id = params
                .get("id")
                .and_then(|v| v.as_str())
                .and_then(RecordId::new)
                .ok_or("missing id")?;
            let state = app.bookmark_list.remove(&id).await;
            Ok(json!({"state": state}))
        }
        "bookmarks.state" => {
            serde_json::to_value(app.bookmark_list.snapshot()).map_err(|e| e.to_string())
        }

        // ─── Editor ───
        "editor.open" => {
            let key = params.get("id").and_then(|v| v.as_str());
            app.open_editor(key)?;
            serde_json::to_value(app.bookmark_editor.snapshot()).map_err(|e| e.to_string())
        }
        "editor.input" => {
            let query = params.get("query").and_then(|v| v.as_str()).ok_or("missing query")?;
            let suggestions = app.bookmark_editor.on_name_input_changed(query).await;
            serde_json::to_value(suggestions).map_err(|e| e.to_string())
        }
        "editor.submit" => {
            let input: FormInput =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid form: {}", e))?;
            let outcome = app.bookmark_editor.submit(input).await;
            Ok(submit_outcome_json(&outcome))
        }
        "editor.cancel" => {
            app.bookmark_editor.cancel();
            Ok(json!({"ok": true}))
        }
        "editor.state" => {
            serde_json::to_value(app.bookmark_editor.snapshot()).map_err(|e| e.to_string())
        }

        // ─── Notifications ───
        "notifications.drain" => {
            serde_json::to_value(app.notifications.drain()).map_err(|e| e.to_string())
        }

        // ─── Settings ───
        "settings.get" => {
            let engine = app.settings_engine.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut engine = app.settings_engine.lock().map_err(|e| e.to_string())?;
            engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
