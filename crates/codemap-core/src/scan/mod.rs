//! Codebase scanning
//!
//! Builds a tree representation of a project plus an import graph over it.
//!
//! Key components:
//! - `types` - data model shared by the whole subsystem
//! - `language` - file extension to language label mapping
//! - `imports` - regex-based import extraction for JS/TS and Python
//! - `walker` - bounded recursive directory walk
//! - `stats` - aggregate counters over a finished tree
//! - `links` - import edges between scanned files
//! - `scanner` - orchestrates a full scan over the category roots

pub mod imports;
pub mod language;
pub mod links;
pub mod scanner;
pub mod stats;
pub mod types;
pub mod walker;

pub use imports::extract_imports;
pub use language::{file_extension, language_for_path};
pub use links::build_links;
pub use scanner::{ScanError, Scanner};
pub use stats::aggregate_stats;
pub use types::{
    CodebaseLink, CodebaseReport, CodebaseStats, FileNode, ImportInfo, ImportKind, NodeKind,
    ScanConfig,
};
pub use walker::walk;
