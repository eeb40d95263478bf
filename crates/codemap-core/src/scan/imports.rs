//! Regex-based import extraction for JS/TS and Python
//!
//! This is a heuristic, not a parser: aliasing, computed import paths, and
//! commented-out code are all matched textually. Results follow pattern-list
//! order then match order, with no deduplication.

use once_cell::sync::Lazy;
use regex::Regex;

use super::language::file_extension;
use super::types::{ImportInfo, ImportKind};

/// Extensions whose contents are read and scanned for imports
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "py"];

/// Bare module name of the generated API client used by frontend code
pub const API_CLIENT_MODULE: &str = "brain";

/// Bare JS/TS module names treated as third-party dependencies
const JS_EXTERNALS: &[&str] = &["react", "react-dom", "react-router-dom", "app", "brain"];

/// Python package names treated as third-party dependencies
const PY_EXTERNALS: &[&str] = &["databutton", "fastapi", "pydantic"];

/// Where frontend sources live, as an absolute-from-root path prefix
const UI_SRC_ROOT: &str = "/ui/src";

/// Where backend API modules live, as an absolute-from-root path prefix
const API_MODULE_ROOT: &str = "/src/app/apis";

static JS_PATTERNS: Lazy<Vec<(Regex, ImportKind)>> = Lazy::new(|| {
    vec![
        // import X from 'Y'
        (
            Regex::new(r#"import\s+.*?\s+from\s+['"]([^'"]*)['"]"#).unwrap(),
            ImportKind::Module,
        ),
        // import 'Y'
        (
            Regex::new(r#"import\s+['"]([^'"]*)['"]"#).unwrap(),
            ImportKind::Direct,
        ),
        // require('Y')
        (
            Regex::new(r#"require\s*\(\s*['"]([^'"]*)['"];?\)"#).unwrap(),
            ImportKind::Require,
        ),
    ]
});

static PY_PATTERNS: Lazy<Vec<(Regex, ImportKind)>> = Lazy::new(|| {
    vec![
        // import X
        (Regex::new(r"import\s+([\w.]+)").unwrap(), ImportKind::Module),
        // from X import ...
        (
            Regex::new(r"from\s+([\w.]+)\s+import").unwrap(),
            ImportKind::From,
        ),
    ]
});

/// Extract import references from a source file.
///
/// `path` is the file's path relative to the scan root; it drives both the
/// language dispatch and relative-import resolution. Unrecognized extensions
/// yield an empty result.
pub fn extract_imports(path: &str, content: &str) -> Vec<ImportInfo> {
    match file_extension(path).as_str() {
        "js" | "jsx" | "ts" | "tsx" => extract_js_imports(path, content),
        "py" => extract_py_imports(content),
        _ => Vec::new(),
    }
}

fn extract_js_imports(path: &str, content: &str) -> Vec<ImportInfo> {
    let mut imports = Vec::new();
    for (pattern, kind) in JS_PATTERNS.iter() {
        for caps in pattern.captures_iter(content) {
            let raw = &caps[1];
            if !raw.is_empty() {
                imports.push(normalize_js_import(path, raw, *kind));
            }
        }
    }
    imports
}

fn normalize_js_import(source_path: &str, raw: &str, kind: ImportKind) -> ImportInfo {
    // Project-convention prefixes rewrite under the frontend source root
    if raw.starts_with("components/") || raw.starts_with("utils/") {
        return ImportInfo {
            path: format!("{}/{}", UI_SRC_ROOT, raw),
            kind,
        };
    }
    if let Some(rest) = raw.strip_prefix("@/") {
        return ImportInfo {
            path: format!("{}/{}", UI_SRC_ROOT, rest),
            kind,
        };
    }
    if !raw.starts_with('.') && !raw.starts_with('/') {
        if JS_EXTERNALS.contains(&raw) {
            return ImportInfo {
                path: raw.to_string(),
                kind: ImportKind::External,
            };
        }
        // Unrecognized bare name, kept verbatim
        return ImportInfo {
            path: raw.to_string(),
            kind,
        };
    }
    if raw.starts_with('.') {
        return match resolve_relative(source_path, raw) {
            Some(resolved) => ImportInfo {
                path: resolved,
                kind,
            },
            // Resolution escaped the scan root
            None => ImportInfo {
                path: raw.to_string(),
                kind,
            },
        };
    }
    // Absolute-looking path, kept verbatim
    ImportInfo {
        path: raw.to_string(),
        kind,
    }
}

/// Lexically resolve a `./`- or `../`-style import against the directory of
/// the source file, yielding an absolute-from-root path. `None` when the
/// traversal climbs above the scan root.
fn resolve_relative(source_path: &str, import: &str) -> Option<String> {
    let mut stack: Vec<&str> = source_path
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    // Drop the file name, leaving the containing directory
    stack.pop();

    for segment in import.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    return None;
                }
            }
            other => stack.push(other),
        }
    }
    Some(format!("/{}", stack.join("/")))
}

fn extract_py_imports(content: &str) -> Vec<ImportInfo> {
    let mut imports = Vec::new();
    for (pattern, kind) in PY_PATTERNS.iter() {
        for caps in pattern.captures_iter(content) {
            let raw = &caps[1];
            if !raw.is_empty() {
                imports.push(classify_py_import(raw, *kind));
            }
        }
    }
    imports
}

fn classify_py_import(raw: &str, kind: ImportKind) -> ImportInfo {
    if raw == "app" || raw.starts_with("app.") {
        let module_path = raw.strip_prefix("app.").unwrap_or("");
        if let Some(api_name) = module_path.strip_prefix("apis.") {
            // Cross-API import, rewritten to the API module location
            return ImportInfo {
                path: format!("{}/{}", API_MODULE_ROOT, api_name),
                kind,
            };
        }
        return ImportInfo {
            path: raw.to_string(),
            kind: ImportKind::Internal,
        };
    }
    if PY_EXTERNALS.contains(&raw) {
        return ImportInfo {
            path: raw.to_string(),
            kind: ImportKind::External,
        };
    }
    ImportInfo {
        path: raw.to_string(),
        kind,
    }
}
