//! Batch Processing Module
//!
//! File collection for directory sweeps. Listings are sorted by file name so
//! every run visits files in the same order.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lowercased extension of `path`, or an empty string when there is none.
pub fn get_extension_lowercase(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// Case-insensitive extension check. `extensions` are lowercase, without dot.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let ext = get_extension_lowercase(path);
    !ext.is_empty() && extensions.contains(&ext.as_str())
}

/// Files directly inside `dir` whose extension is in `extensions`.
///
/// Symlinks count when they resolve to a regular file; the returned path is
/// the link itself. Dangling links and unreadable entries are dropped.
pub fn collect_files(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_extension(e.path(), extensions))
        .map(|e| e.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EXTS: &[&str] = &["jpg", "jpeg", "png"];

    #[test]
    fn test_has_extension_case_insensitive() {
        assert!(has_extension(Path::new("a.JPG"), EXTS));
        assert!(has_extension(Path::new("dir/b.Png"), EXTS));
        assert!(has_extension(Path::new("c.jpeg"), EXTS));
        assert!(!has_extension(Path::new("d.webp"), EXTS));
        assert!(!has_extension(Path::new("noext"), EXTS));
        assert!(!has_extension(Path::new(".png"), EXTS));
    }

    #[test]
    fn test_collect_files_non_recursive_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for name in ["b.png", "a.JPG", "c.jpeg", "notes.txt", "d.webp"] {
            fs::write(root.join(name), b"x").unwrap();
        }
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("e.jpg"), b"x").unwrap();
        fs::create_dir(root.join("folder.png")).unwrap();

        let files = collect_files(root, EXTS);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.JPG", "b.png", "c.jpeg"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_follows_file_symlinks() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("images");
        let elsewhere = temp.path().join("originals");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&elsewhere).unwrap();
        fs::write(elsewhere.join("real.jpg"), b"x").unwrap();
        fs::create_dir(elsewhere.join("album")).unwrap();

        symlink(elsewhere.join("real.jpg"), root.join("a.jpg")).unwrap();
        symlink(elsewhere.join("gone.png"), root.join("b.png")).unwrap();
        symlink(elsewhere.join("album"), root.join("c.png")).unwrap();

        let files = collect_files(&root, EXTS);

        assert_eq!(files, vec![root.join("a.jpg")]);
    }

    #[test]
    fn test_collect_files_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(collect_files(&temp.path().join("missing"), EXTS).is_empty());
    }
}
