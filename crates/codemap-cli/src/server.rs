//! HTTP surface: GET /scan and GET /history
//!
//! A single-threaded blocking server. Each scan request performs the whole
//! walk/extract/aggregate/link pipeline before responding; concurrent scans
//! are not coordinated beyond the store's last-write-wins semantics.

use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use tiny_http::{Header, Method, Response, Server};
use tracing::{error, info, warn};

use codemap_core::{Scanner, SnapshotStore, LATEST_SNAPSHOT_KEY};

/// Everything a request handler needs
pub struct AppState {
    pub scanner: Scanner,
    pub store: SnapshotStore,
}

/// Status and JSON body of one handled request
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// Dispatch a request. Pure over (method, url, state) so it is testable
/// without sockets.
pub fn route(method: &Method, url: &str, state: &AppState) -> ApiResponse {
    let path = url.split('?').next().unwrap_or(url);
    match (method, path) {
        (Method::Get, "/scan") => scan(state),
        (Method::Get, "/history") => history(state),
        // Known path, wrong method
        (_, "/scan" | "/history") => ApiResponse {
            status: 405,
            body: json!({"detail": "Method Not Allowed"}),
        },
        _ => ApiResponse {
            status: 404,
            body: json!({"detail": "Not Found"}),
        },
    }
}

fn scan(state: &AppState) -> ApiResponse {
    match run_scan(state) {
        Ok(document) => ApiResponse {
            status: 200,
            body: document,
        },
        Err(err) => {
            error!(error = %err, "scan failed");
            ApiResponse {
                status: 500,
                body: json!({"detail": format!("Error scanning codebase: {}", err)}),
            }
        }
    }
}

fn run_scan(state: &AppState) -> Result<Value> {
    let report = state.scanner.scan()?;
    let document = serde_json::to_value(&report)?;
    // Persist only after the whole computation succeeded, so a failed scan
    // leaves the previous snapshot untouched
    state.store.put(LATEST_SNAPSHOT_KEY, &document)?;
    Ok(document)
}

fn history(state: &AppState) -> ApiResponse {
    match state.store.get(LATEST_SNAPSHOT_KEY) {
        Ok(Some(snapshot)) => ApiResponse {
            status: 200,
            body: snapshot,
        },
        Ok(None) => ApiResponse {
            status: 200,
            body: json!({"message": "No codebase snapshot available. Please scan first."}),
        },
        Err(err) => {
            error!(error = %err, "history lookup failed");
            ApiResponse {
                status: 500,
                body: json!({"detail": format!("Error retrieving codebase history: {}", err)}),
            }
        }
    }
}

/// Bind and serve until the process is terminated.
pub fn serve(addr: &str, state: AppState) -> Result<()> {
    let server = Server::http(addr).map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;
    let json_header: Header = "Content-Type: application/json"
        .parse()
        .map_err(|_| anyhow!("Invalid content-type header"))?;

    info!(
        addr = addr,
        root = %state.scanner.config().root.display(),
        "codemap listening"
    );

    for request in server.incoming_requests() {
        let api = route(request.method(), request.url(), &state);
        info!(method = %request.method(), url = request.url(), status = api.status, "request");

        let response = Response::from_string(api.body.to_string())
            .with_status_code(api.status)
            .with_header(json_header.clone());
        if let Err(err) = request.respond(response) {
            warn!(error = %err, "failed to send response");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemap_core::ScanConfig;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_file(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture_state(tmp: &TempDir) -> AppState {
        write_file(
            tmp.path(),
            "ui/src/pages/Home.tsx",
            "import React from 'react';\n",
        );
        AppState {
            scanner: Scanner::new(ScanConfig::new(tmp.path())),
            store: SnapshotStore::open_in_memory().unwrap(),
        }
    }

    #[test]
    fn test_history_before_any_scan() {
        let tmp = TempDir::new().unwrap();
        let state = fixture_state(&tmp);

        let response = route(&Method::Get, "/history", &state);
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body["message"],
            "No codebase snapshot available. Please scan first."
        );
    }

    #[test]
    fn test_scan_then_history_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let state = fixture_state(&tmp);

        let scan = route(&Method::Get, "/scan", &state);
        assert_eq!(scan.status, 200);
        assert!(scan.body.get("structure").is_some());
        assert!(scan.body.get("stats").is_some());
        assert!(scan.body.get("links").is_some());

        // History serves the stored document verbatim
        let history = route(&Method::Get, "/history", &state);
        assert_eq!(history.status, 200);
        assert_eq!(history.body, scan.body);
    }

    #[test]
    fn test_scan_failure_is_a_server_error() {
        let state = AppState {
            scanner: Scanner::new(ScanConfig::new("/definitely/not/here")),
            store: SnapshotStore::open_in_memory().unwrap(),
        };

        let response = route(&Method::Get, "/scan", &state);
        assert_eq!(response.status, 500);
        let detail = response.body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error scanning codebase:"));
    }

    #[test]
    fn test_failed_scan_leaves_previous_snapshot() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("proj");
        write_file(&root, "ui/src/pages/Home.tsx", "import React from 'react';\n");
        let state = AppState {
            scanner: Scanner::new(ScanConfig::new(&root)),
            store: SnapshotStore::open_in_memory().unwrap(),
        };
        let first = route(&Method::Get, "/scan", &state);
        assert_eq!(first.status, 200);

        // Remove the scan root so the next scan fails
        fs::remove_dir_all(&root).unwrap();
        let failed = route(&Method::Get, "/scan", &state);
        assert_eq!(failed.status, 500);

        let history = route(&Method::Get, "/history", &state);
        assert_eq!(history.body, first.body);
    }

    #[test]
    fn test_unknown_routes_and_methods() {
        let tmp = TempDir::new().unwrap();
        let state = fixture_state(&tmp);

        assert_eq!(route(&Method::Get, "/nope", &state).status, 404);
        // Known paths with the wrong method are 405, not 404
        assert_eq!(route(&Method::Post, "/scan", &state).status, 405);
        assert_eq!(route(&Method::Post, "/history", &state).status, 405);
    }

    #[test]
    fn test_query_string_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let state = fixture_state(&tmp);
        assert_eq!(route(&Method::Get, "/history?x=1", &state).status, 200);
    }
}
