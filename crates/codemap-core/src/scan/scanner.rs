//! Orchestrates a full scan over the category roots

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use super::links::build_links;
use super::stats::aggregate_stats;
use super::types::{CodebaseReport, FileNode, NodeKind, ScanConfig};
use super::walker::walk;

/// The fixed application areas a scan targets, as (display name, path
/// relative to the scan root)
const CATEGORY_ROOTS: &[(&str, &str)] = &[
    ("Pages", "ui/src/pages"),
    ("UI Components", "ui/src/components"),
    ("UI Files", "ui/src/utils"),
    ("APIs", "src/app/apis"),
];

/// Asset categories that are surfaced with a placeholder entry instead of
/// being walked
const PLACEHOLDER_CATEGORIES: &[(&str, &str)] = &[
    ("Media (Public)", "/static-assets"),
    ("Internal Storage", "/storage"),
];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root does not exist: {0}")]
    RootMissing(PathBuf),
}

/// Runs the walk over the category roots and shapes the combined report
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Perform one full scan: walk, classify, extract, aggregate, link.
    ///
    /// Individual unreadable entries are skipped by the walker; only a
    /// missing root is an error. A root with no category directories still
    /// produces a report carrying the placeholder categories.
    pub fn scan(&self) -> Result<CodebaseReport, ScanError> {
        if !self.config.root.is_dir() {
            return Err(ScanError::RootMissing(self.config.root.clone()));
        }

        let mut files = BTreeMap::new();
        let mut children = Vec::new();
        let mut total_size = 0u64;

        for (name, rel) in CATEGORY_ROOTS {
            if !self.config.root.join(rel).is_dir() {
                debug!(category = name, path = rel, "category directory absent");
                continue;
            }
            let mut category = FileNode::directory(*name, format!("/{}", rel));
            if let Some(node) = walk(&self.config, rel, self.config.max_depth, &mut files) {
                total_size += node.size;
                category.size = node.size;
                category.children = node.children;
            }
            if category.children.as_ref().is_some_and(|c| !c.is_empty()) {
                children.push(category);
            }
        }

        for (name, path) in PLACEHOLDER_CATEGORIES {
            let mut category = FileNode::directory(*name, *path);
            category.children = Some(vec![FileNode {
                name: format!("(No {})", name),
                path: (*path).to_string(),
                kind: NodeKind::File,
                // Small non-zero size so the entry is visible downstream
                size: 100,
                last_modified: None,
                children: None,
                imports: None,
                language: Some("Text".to_string()),
            }]);
            children.push(category);
        }

        let structure = FileNode {
            name: self.config.display_name(),
            path: "/".to_string(),
            kind: NodeKind::Directory,
            size: total_size,
            last_modified: None,
            children: Some(children),
            imports: None,
            language: None,
        };

        let stats = aggregate_stats(&structure);
        let links = build_links(&self.config, &files);
        info!(
            files = stats.total_files,
            directories = stats.total_directories,
            links = links.len(),
            "scan complete"
        );

        Ok(CodebaseReport {
            structure,
            stats,
            links,
        })
    }
}
