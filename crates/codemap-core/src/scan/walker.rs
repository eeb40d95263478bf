//! Bounded recursive directory walk
//!
//! Best-effort by design: unreadable entries are skipped, never fatal. The
//! only caller-visible failure is a missing scan root, which the scanner
//! checks before walking.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::{debug, warn};

use super::imports::{extract_imports, SOURCE_EXTENSIONS};
use super::language::{file_extension, language_for_path};
use super::types::{FileNode, ImportInfo, NodeKind, ScanConfig};

/// Directory names never descended into; they produce an empty placeholder
/// node instead, bounding worst-case walk cost
const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    "venv",
    ".venv",
    "dist",
    "build",
    ".next",
    ".idea",
];

/// Walk `rel_path` under the config's root, registering every discovered
/// file into `files` keyed by its root-relative path.
///
/// Returns `None` when the depth limit is exhausted or the target does not
/// exist.
pub fn walk(
    config: &ScanConfig,
    rel_path: &str,
    depth: usize,
    files: &mut BTreeMap<String, FileNode>,
) -> Option<FileNode> {
    if depth == 0 {
        return None;
    }

    let full_path = if rel_path.is_empty() {
        config.root.clone()
    } else {
        config.root.join(rel_path)
    };
    if !full_path.exists() {
        return None;
    }

    let mut name = Path::new(rel_path)
        .file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .unwrap_or_else(|| {
            config
                .root
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        });

    // An API module's canonical file is its package __init__.py; surface the
    // logical module name instead of the literal filename
    if name == "__init__.py" && rel_path.contains("/apis/") {
        if let Some(module) = Path::new(rel_path)
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
        {
            name = format!("{}.py", module);
        }
    }

    let node_path = if rel_path.is_empty() {
        "/".to_string()
    } else {
        rel_path.to_string()
    };

    if EXCLUDED_DIRS.contains(&name.as_str()) {
        debug!(path = %node_path, "skipping excluded directory");
        return Some(FileNode {
            name,
            path: node_path,
            kind: NodeKind::Directory,
            size: 0,
            last_modified: modified_epoch_secs(&full_path),
            children: Some(Vec::new()),
            imports: None,
            language: None,
        });
    }

    if full_path.is_dir() {
        let mut children = Vec::new();
        let mut total_size = 0u64;

        match fs::read_dir(&full_path) {
            Ok(entries) => {
                let mut items: Vec<String> = entries
                    .filter_map(|e| e.ok())
                    .filter_map(|e| e.file_name().to_str().map(String::from))
                    .collect();
                if items.len() > config.max_items {
                    debug!(
                        path = %node_path,
                        total = items.len(),
                        cap = config.max_items,
                        "directory listing capped"
                    );
                    items.truncate(config.max_items);
                }

                for item in items {
                    let item_rel = if rel_path.is_empty() {
                        item
                    } else {
                        format!("{}/{}", rel_path, item)
                    };
                    if let Some(child) = walk(config, &item_rel, depth - 1, files) {
                        total_size += child.size;
                        children.push(child);
                    }
                }
            }
            Err(err) => {
                warn!(path = %full_path.display(), error = %err, "cannot list directory");
            }
        }

        return Some(FileNode {
            name,
            path: node_path,
            kind: NodeKind::Directory,
            size: total_size,
            last_modified: modified_epoch_secs(&full_path),
            children: Some(children),
            imports: None,
            language: None,
        });
    }

    // File case
    let metadata = match fs::metadata(&full_path) {
        Ok(m) => m,
        Err(err) => {
            debug!(path = %full_path.display(), error = %err, "cannot stat file");
            return None;
        }
    };

    let ext = file_extension(rel_path);
    let imports: Option<Vec<ImportInfo>> = if SOURCE_EXTENSIONS.contains(&ext.as_str()) {
        match fs::read_to_string(&full_path) {
            Ok(content) => Some(extract_imports(rel_path, &content)),
            Err(err) => {
                warn!(path = %full_path.display(), error = %err, "cannot read file for import extraction");
                Some(Vec::new())
            }
        }
    } else {
        None
    };

    let node = FileNode {
        name,
        path: node_path.clone(),
        kind: NodeKind::File,
        size: metadata.len(),
        last_modified: metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs_f64()),
        children: None,
        imports,
        language: Some(language_for_path(rel_path)),
    };

    files.insert(node_path, node.clone());
    Some(node)
}

fn modified_epoch_secs(path: &Path) -> Option<f64> {
    fs::metadata(path)
        .ok()?
        .modified()
        .ok()?
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn write_file(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_walk_builds_tree_and_registers_files() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "ui/src/pages/Home.tsx", "import React from 'react';");
        write_file(tmp.path(), "ui/src/pages/notes.md", "# notes");

        let config = ScanConfig::new(tmp.path());
        let mut files = BTreeMap::new();
        let node = walk(&config, "ui/src/pages", 5, &mut files).unwrap();

        assert_eq!(node.kind, NodeKind::Directory);
        assert_eq!(node.name, "pages");
        let children = node.children.as_ref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(node.size, children.iter().map(|c| c.size).sum::<u64>());

        let tsx = files.get("ui/src/pages/Home.tsx").unwrap();
        assert_eq!(tsx.language.as_deref(), Some("TypeScript (React)"));
        assert_eq!(tsx.imports.as_ref().unwrap().len(), 1);

        // Non-source files carry no imports at all
        let md = files.get("ui/src/pages/notes.md").unwrap();
        assert!(md.imports.is_none());
    }

    #[test]
    fn test_excluded_directory_yields_empty_placeholder() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "node_modules/react/index.js", "module.exports = {};");

        let config = ScanConfig::new(tmp.path());
        let mut files = BTreeMap::new();
        let node = walk(&config, "node_modules", 5, &mut files).unwrap();

        assert_eq!(node.kind, NodeKind::Directory);
        assert_eq!(node.size, 0);
        assert!(node.children.as_ref().unwrap().is_empty());
        assert!(files.is_empty());
    }

    #[test]
    fn test_per_directory_item_cap() {
        let tmp = TempDir::new().unwrap();
        for i in 0..5 {
            write_file(tmp.path(), &format!("many/f{}.txt", i), "x");
        }

        let mut config = ScanConfig::new(tmp.path());
        config.max_items = 3;
        let mut files = BTreeMap::new();
        let node = walk(&config, "many", 5, &mut files).unwrap();

        assert_eq!(node.children.as_ref().unwrap().len(), 3);
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_depth_limit_prunes_recursion() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a/b/c/deep.txt", "deep");

        let config = ScanConfig::new(tmp.path());
        let mut files = BTreeMap::new();
        // Depth 2 covers "a" and "a/b" but not b's children
        let node = walk(&config, "a", 2, &mut files).unwrap();

        let b = &node.children.as_ref().unwrap()[0];
        assert_eq!(b.name, "b");
        assert!(b.children.as_ref().unwrap().is_empty());
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_path_returns_none() {
        let tmp = TempDir::new().unwrap();
        let config = ScanConfig::new(tmp.path());
        let mut files = BTreeMap::new();
        assert!(walk(&config, "does/not/exist", 5, &mut files).is_none());
    }

    #[test]
    fn test_api_init_file_renamed_to_module() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "src/app/apis/codebase/__init__.py", "import os\n");

        let config = ScanConfig::new(tmp.path());
        let mut files = BTreeMap::new();
        let node = walk(&config, "src/app/apis/codebase", 5, &mut files).unwrap();

        let init = &node.children.as_ref().unwrap()[0];
        assert_eq!(init.name, "codebase.py");
        assert_eq!(init.path, "src/app/apis/codebase/__init__.py");
    }
}
