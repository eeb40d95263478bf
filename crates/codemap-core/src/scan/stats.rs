//! Aggregate counters over a finished tree

use super::language::file_extension;
use super::types::{CodebaseStats, FileNode, NodeKind};

/// Sentinel bucket for files with no extension
const NO_EXTENSION: &str = "no_extension";

/// Compute file/directory counts, total size, and the extension histogram.
/// Pure function of the node set; traversal order does not matter.
pub fn aggregate_stats(root: &FileNode) -> CodebaseStats {
    let mut stats = CodebaseStats::default();
    traverse(root, &mut stats);
    stats
}

fn traverse(node: &FileNode, stats: &mut CodebaseStats) {
    match node.kind {
        NodeKind::Directory => {
            stats.total_directories += 1;
            if let Some(children) = &node.children {
                for child in children {
                    traverse(child, stats);
                }
            }
        }
        NodeKind::File => {
            stats.total_files += 1;
            stats.total_size_bytes += node.size;

            let ext = file_extension(&node.path);
            let bucket = if ext.is_empty() {
                NO_EXTENSION.to_string()
            } else {
                ext
            };
            *stats.file_types.entry(bucket).or_insert(0) += 1;
        }
    }
}
