//! Import edges between scanned files
//!
//! Targets are never validated against the file map, so edges may dangle;
//! duplicate imports produce duplicate edges.

use std::collections::BTreeMap;
use std::fs;
use tracing::debug;

use super::imports::API_CLIENT_MODULE;
use super::types::{CodebaseLink, FileNode, ImportKind, ScanConfig};

/// Call-site signatures of the generated API client, matched by plain
/// substring search, and the API module each one maps to
const API_CALL_SITES: &[(&str, &str)] = &[
    ("brain.scan_codebase", "src/app/apis/codebase"),
    ("brain.get_codebase_history", "src/app/apis/codebase"),
];

const FRONTEND_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js"];

/// Build the directed import graph over the scanned file map.
pub fn build_links(config: &ScanConfig, files: &BTreeMap<String, FileNode>) -> Vec<CodebaseLink> {
    let mut links = Vec::new();

    // Declared imports, minus third-party dependencies
    for (path, node) in files {
        let Some(imports) = &node.imports else {
            continue;
        };
        for import in imports {
            if import.kind == ImportKind::External {
                continue;
            }
            links.push(CodebaseLink {
                source: path.clone(),
                target: import.path.clone(),
                kind: import.kind,
            });
        }
    }

    // Frontend files that import the API client get an extra edge per
    // recognized call site found in their raw text
    for (path, node) in files {
        if !is_frontend_path(path) {
            continue;
        }
        let Some(imports) = &node.imports else {
            continue;
        };
        let uses_client = imports
            .iter()
            .any(|i| i.path == API_CLIENT_MODULE && i.kind == ImportKind::External);
        if !uses_client {
            continue;
        }

        let content = match fs::read_to_string(config.root.join(path)) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %path, error = %err, "cannot re-read file for call-site search");
                continue;
            }
        };
        for (signature, target) in API_CALL_SITES {
            if content.contains(signature) {
                links.push(CodebaseLink {
                    source: path.clone(),
                    target: (*target).to_string(),
                    kind: ImportKind::ApiUsage,
                });
            }
        }
    }

    links
}

fn is_frontend_path(path: &str) -> bool {
    FRONTEND_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
