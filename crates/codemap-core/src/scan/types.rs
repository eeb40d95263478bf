//! Data model for scan results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Whether a node is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// How an import reference was extracted, or what it was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// `import X from 'Y'` (JS/TS) or `import X` (Python)
    Module,
    /// Bare `import 'Y'` (JS/TS)
    Direct,
    /// `require('Y')` (JS/TS)
    Require,
    /// `from X import ...` (Python)
    From,
    /// Third-party package, excluded from the link graph
    External,
    /// Import of the internal application root package
    Internal,
    /// Hardcoded edge for a recognized API-client call site
    ApiUsage,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Direct => "direct",
            Self::Require => "require",
            Self::From => "from",
            Self::External => "external",
            Self::Internal => "internal",
            Self::ApiUsage => "api-usage",
        }
    }
}

/// One extracted import reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportInfo {
    /// Best-effort normalized target: a root-relative path, a bare package
    /// name, or the raw fragment when normalization failed
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ImportKind,
}

/// One filesystem entry in the scanned tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    /// Path relative to the scan root; the root itself uses `/`
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Byte length for files; sum of children's sizes for directories
    pub size: u64,
    /// Modification time as epoch seconds; omitted when unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    /// Present only for source files of recognized extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<Vec<ImportInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl FileNode {
    /// An empty directory node, used for category roots and placeholders
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory,
            size: 0,
            last_modified: None,
            children: Some(Vec::new()),
            imports: None,
            language: None,
        }
    }
}

/// A directed edge in the import graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodebaseLink {
    pub source: String,
    /// Target identifier; not validated against the scanned file map, so
    /// edges may dangle
    pub target: String,
    #[serde(rename = "type")]
    pub kind: ImportKind,
}

/// Aggregate counters over a scanned tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodebaseStats {
    pub total_files: u64,
    pub total_directories: u64,
    pub total_size_bytes: u64,
    /// Extension (or `no_extension`) -> occurrence count
    pub file_types: BTreeMap<String, u64>,
}

/// Full scan result: the tree, its stats, and the import graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodebaseReport {
    pub structure: FileNode,
    pub stats: CodebaseStats,
    pub links: Vec<CodebaseLink>,
}

/// Configuration for a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Base directory all relative paths are resolved against
    pub root: PathBuf,
    /// Display name of the structure root; defaults to the root's basename
    #[serde(default)]
    pub project_name: Option<String>,
    /// Maximum recursion depth for the walk
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Maximum entries processed per directory
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_max_depth() -> usize {
    5
}

fn default_max_items() -> usize {
    100
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            project_name: None,
            max_depth: default_max_depth(),
            max_items: default_max_items(),
        }
    }
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Display name for the structure root
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.project_name {
            return name.clone();
        }
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Codebase".to_string())
    }
}
