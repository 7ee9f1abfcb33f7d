use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

/// Dependency directories are never walked.
const DEPENDENCY_DIR: &str = "node_modules";

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths relative to the root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Candidate source files, sorted by their path relative to the root.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Enumerate candidate component files under `root`.
///
/// `ignores` are glob patterns matched against the path relative to `root`, or
/// literal relative paths excluding everything below them.
pub fn scan_files(root: &Path, extensions: &[String], ignores: &[String], verbose: bool) -> ScanResult {
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(PathBuf::from(p));
        }
    }

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_dependency_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_str = relative.to_string_lossy().replace('\\', "/");

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| relative.starts_with(ignore_path))
        {
            continue;
        }
        if glob_patterns.iter().any(|p| p.matches(&relative_str)) {
            continue;
        }

        if is_scannable_file(path, extensions) {
            files.push((relative_str, path.to_path_buf()));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    ScanResult {
        files: files.into_iter().map(|(_, path)| path).collect(),
        skipped_count,
    }
}

fn is_dependency_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == DEPENDENCY_DIR
}

fn is_scannable_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn default_extensions() -> Vec<String> {
        ["js", "jsx", "ts", "tsx"].iter().map(|e| e.to_string()).collect()
    }

    fn relative_names(root: &Path, result: &ScanResult) -> Vec<String> {
        result
            .files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scan_component_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("index.jsx")).unwrap();
        File::create(dir_path.join("utils.js")).unwrap();
        File::create(dir_path.join("style.scss")).unwrap();

        let result = scan_files(dir_path, &default_extensions(), &[], false);

        assert_eq!(relative_names(dir_path, &result), vec!["index.jsx", "utils.js"]);
        assert_eq!(result.skipped_count, 0);
    }

    #[test]
    fn test_scan_ignores_node_modules() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let node_modules = dir_path.join("node_modules").join("lib");
        fs::create_dir_all(&node_modules).unwrap();
        File::create(node_modules.join("index.js")).unwrap();
        File::create(dir_path.join("index.jsx")).unwrap();

        let result = scan_files(dir_path, &default_extensions(), &[], false);

        assert_eq!(relative_names(dir_path, &result), vec!["index.jsx"]);
    }

    #[test]
    fn test_scan_is_sorted_by_relative_path() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let view = dir_path.join("view");
        fs::create_dir(&view).unwrap();
        File::create(view.join("input.jsx")).unwrap();
        File::create(view.join("hint.jsx")).unwrap();
        File::create(dir_path.join("index.jsx")).unwrap();

        let result = scan_files(dir_path, &default_extensions(), &[], false);

        assert_eq!(
            relative_names(dir_path, &result),
            vec!["index.jsx", "view/hint.jsx", "view/input.jsx"]
        );
    }

    #[test]
    fn test_scan_respects_extensions() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("a.jsx")).unwrap();
        File::create(dir_path.join("b.tsx")).unwrap();

        let result = scan_files(dir_path, &["jsx".to_string()], &[], false);

        assert_eq!(relative_names(dir_path, &result), vec!["a.jsx"]);
    }

    #[test]
    fn test_scan_ignores_glob_and_literal_paths() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let demo = dir_path.join("demo");
        fs::create_dir(&demo).unwrap();
        File::create(demo.join("basic.jsx")).unwrap();
        File::create(dir_path.join("index.jsx")).unwrap();
        File::create(dir_path.join("index.test.jsx")).unwrap();

        let result = scan_files(
            dir_path,
            &default_extensions(),
            &["demo".to_owned(), "**/*.test.jsx".to_owned()],
            false,
        );

        assert_eq!(relative_names(dir_path, &result), vec!["index.jsx"]);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("**/*.test.jsx"));
        assert!(is_glob_pattern("file?.js"));
        assert!(!is_glob_pattern("demo"));
        assert!(!is_glob_pattern("src/[locale]"));
    }
}
