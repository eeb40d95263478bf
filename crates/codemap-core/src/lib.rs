//! Codemap core library
//!
//! Scans a project tree, extracts import relationships via regex heuristics,
//! and persists the latest result as a single snapshot document.
//!
//! Key components:
//! - `scan` - tree walking, language classification, import extraction,
//!   stats aggregation, and link building
//! - `snapshot` - key/value document store for the latest scan result

pub mod scan;
pub mod snapshot;

pub use scan::{
    CodebaseLink, CodebaseReport, CodebaseStats, FileNode, ImportInfo, ImportKind, NodeKind,
    ScanConfig, ScanError, Scanner,
};
pub use snapshot::{SnapshotStore, LATEST_SNAPSHOT_KEY};
