//! Sheetmarks RPC Server: JSON-RPC over stdin/stdout for a rendering front-end.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmarks.search", "params":{"query":"python"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Each request runs as its own task, so a slow store call never blocks the
//! next request. Responses may arrive out of request order; match them by id.

use std::sync::Arc;

use log::{debug, error};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use sheetmarks::app::App;
use sheetmarks::rpc_handler::handle_method;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let app = match App::new(None) {
        Ok(app) => Arc::new(app),
        Err(e) => {
            error!("failed to initialize sheetmarks: {}", e);
            std::process::exit(1);
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<Value>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(message) = rx.recv().await {
            let line = format!("{}\n", message);
            if stdout.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            let _ = stdout.flush().await;
        }
    });

    let _ = tx.send(json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    // Initial table fetch, as on page load.
    {
        let app = app.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let state = app.startup().await;
            let _ = tx.send(json!({"event": "loaded", "state": state}));
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("failed to read request: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let _ = tx.send(json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let app = app.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let id = req.get("id").cloned().unwrap_or(Value::Null);
            let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
            let params = req.get("params").cloned().unwrap_or(json!({}));
            debug!("rpc {} {}", id, method);

            let response = match handle_method(&app, method, &params).await {
                Ok(val) => json!({"id": id, "result": val}),
                Err(err) => json!({"id": id, "error": err}),
            };
            let _ = tx.send(response);
        });
    }

    drop(tx);
    let _ = writer.await;
}
