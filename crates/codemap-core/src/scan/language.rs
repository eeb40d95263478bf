//! File extension to language label mapping

use std::path::Path;

/// Lowercase extension after the final dot; empty string when there is none
pub fn file_extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// Human-readable language label for a path.
///
/// Unknown non-empty extensions come back uppercased; no extension at all
/// yields `Unknown`. Total - never fails.
pub fn language_for_path(path: &str) -> String {
    let ext = file_extension(path);
    match ext.as_str() {
        "py" => "Python".to_string(),
        "js" => "JavaScript".to_string(),
        "jsx" => "JavaScript (React)".to_string(),
        "ts" => "TypeScript".to_string(),
        "tsx" => "TypeScript (React)".to_string(),
        "html" => "HTML".to_string(),
        "css" => "CSS".to_string(),
        "json" => "JSON".to_string(),
        "md" => "Markdown".to_string(),
        "yml" | "yaml" => "YAML".to_string(),
        "txt" => "Text".to_string(),
        "" => "Unknown".to_string(),
        other => other.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(language_for_path("src/app.py"), "Python");
        assert_eq!(language_for_path("ui/src/App.tsx"), "TypeScript (React)");
        assert_eq!(language_for_path("config.yaml"), "YAML");
        assert_eq!(language_for_path("config.yml"), "YAML");
    }

    #[test]
    fn test_unknown_extension_uppercased() {
        assert_eq!(language_for_path("main.rs"), "RS");
        assert_eq!(language_for_path("lib.TOML"), "TOML");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(language_for_path("Makefile"), "Unknown");
        assert_eq!(file_extension("Makefile"), "");
        // Hidden files without a stem have no extension
        assert_eq!(file_extension(".gitignore"), "");
    }

    #[test]
    fn test_extension_is_last_segment() {
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("ui/src/Button.test.TSX"), "tsx");
    }
}
