//! Collision-safe renaming and tagging.
//!
//! Existence checks always go to the filesystem; nothing is cached. Another
//! process can still take a name between the check and the rename, in which
//! case the rename fails and is reported.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use snapname_common::error::{SnapnameError, SnapnameResult};

use crate::synthesize::{clean_filename, INVALID_FILENAME_CHARS};
use crate::tags::TagPosition;

/// A desired stem paired with the file whose extension and directory it
/// inherits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameCandidate {
    pub stem: String,
    pub extension_source: PathBuf,
}

impl FilenameCandidate {
    pub fn new(stem: impl Into<String>, extension_source: impl Into<PathBuf>) -> Self {
        Self {
            stem: stem.into(),
            extension_source: extension_source.into(),
        }
    }

    /// Cleaned name with the source extension.
    pub fn file_name(&self) -> SnapnameResult<String> {
        let (base, ext) = self.parts()?;
        Ok(format!("{base}{ext}"))
    }

    /// Free target next to the source file. The source's own path counts as
    /// free, so keeping the current name resolves to the source itself.
    pub fn resolve(&self) -> SnapnameResult<PathBuf> {
        let (base, ext) = self.parts()?;
        let dir = parent_dir(&self.extension_source);

        let exact = dir.join(format!("{base}{ext}"));
        if exact == self.extension_source {
            return Ok(exact);
        }
        Ok(unique_in(&dir, OsStr::new(&base), OsStr::new(&ext)))
    }

    /// Cleaned base name and dotted extension, kept apart so collision
    /// handling never re-parses a joined path.
    fn parts(&self) -> SnapnameResult<(String, String)> {
        let cleaned = clean_filename(&self.stem);
        if cleaned.is_empty() {
            return Err(SnapnameError::EmptyName);
        }

        let ext = dotted_extension(&self.extension_source);
        let base = match cleaned.strip_suffix(ext.as_str()) {
            Some(base) if !ext.is_empty() && !base.is_empty() => base.to_string(),
            _ => cleaned,
        };

        // "." and ".." name directories, and trailing dots vanish on Windows.
        let name = format!("{base}{ext}");
        if name.chars().all(|c| c == '.') {
            return Err(SnapnameError::InvalidName { name });
        }
        Ok((base, ext))
    }
}

/// A pending rename of one file to a user-chosen stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub original_path: PathBuf,
    pub desired_stem: String,
}

impl RenameRequest {
    pub fn new(original_path: impl Into<PathBuf>, desired_stem: impl Into<String>) -> Self {
        Self {
            original_path: original_path.into(),
            desired_stem: desired_stem.into(),
        }
    }

    pub fn execute(&self) -> SnapnameResult<PathBuf> {
        rename_file(&self.original_path, &self.desired_stem)
    }
}

/// Return `candidate` if it is free, else the first free `"<stem> (N)<ext>"`.
pub fn make_unique(candidate: &Path) -> PathBuf {
    let (stem, ext) = split_file_name(candidate);
    unique_in(&parent_dir(candidate), &stem, &ext)
}

/// Rename `original` to `desired_stem` plus its extension, in the same
/// directory, without overwriting anything.
///
/// Returns the new path. Renaming a file to its current name succeeds
/// without touching the filesystem.
pub fn rename_file(original: &Path, desired_stem: &str) -> SnapnameResult<PathBuf> {
    let candidate = FilenameCandidate::new(desired_stem, original);
    candidate.file_name()?;

    if !original.exists() {
        return Err(SnapnameError::FileNotFound {
            path: original.to_path_buf(),
        });
    }

    let target = candidate.resolve()?;
    if target == original {
        tracing::info!(path = %original.display(), "Name unchanged, nothing to rename");
        return Ok(original.to_path_buf());
    }

    move_file(original, &target)
}

/// Insert `tag` before the base name (prefix) or before the extension
/// (suffix). Collisions get `" (N)"` right after the tagged base name.
///
/// A prefix tag's leading `+` separators are dropped since nothing precedes
/// them; suffix tags are used verbatim.
pub fn apply_tag(position: TagPosition, tag: &str, path: &Path) -> SnapnameResult<PathBuf> {
    if !path.exists() {
        return Err(SnapnameError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let tag = validate_tag(position, tag)?;
    let (stem, ext) = split_file_name(path);
    if stem.is_empty() {
        return Err(SnapnameError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut base = OsString::new();
    match position {
        TagPosition::Prefix => {
            base.push(tag);
            base.push(&stem);
        }
        TagPosition::Suffix => {
            base.push(&stem);
            base.push(tag);
        }
    }

    let target = unique_in(&parent_dir(path), &base, &ext);
    tracing::debug!(?position, tag, target = %target.display(), "Applying tag");
    move_file(path, &target)
}

/// The name `rename_file` would pick right now, for display. `None` when
/// the edited text does not make a usable name. Never touches the filesystem
/// beyond existence checks.
pub fn preview(original: &Path, edited_text: &str) -> Option<String> {
    let resolved = FilenameCandidate::new(edited_text, original).resolve().ok()?;
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn validate_tag(position: TagPosition, tag: &str) -> SnapnameResult<&str> {
    let tag = match position {
        TagPosition::Prefix => tag.trim_start_matches('+'),
        TagPosition::Suffix => tag,
    };

    if tag.trim().is_empty() {
        return Err(SnapnameError::InvalidTag {
            tag: tag.to_string(),
            reason: "tag is empty".to_string(),
        });
    }
    if tag.contains(&INVALID_FILENAME_CHARS[..]) {
        return Err(SnapnameError::InvalidTag {
            tag: tag.to_string(),
            reason: "tag contains characters not allowed in filenames".to_string(),
        });
    }
    Ok(tag)
}

fn unique_in(dir: &Path, base: &OsStr, ext: &OsStr) -> PathBuf {
    let mut name = base.to_os_string();
    name.push(ext);
    let first = dir.join(name);
    if !is_taken(&first) {
        return first;
    }

    let mut counter: u64 = 1;
    loop {
        let mut name = base.to_os_string();
        name.push(format!(" ({counter})"));
        name.push(ext);
        let candidate = dir.join(name);
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

// Dangling symlinks still occupy the name.
fn is_taken(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Stem and dotted extension (`".txt"` or empty).
fn split_file_name(path: &Path) -> (OsString, OsString) {
    let stem = path.file_stem().map(OsStr::to_os_string).unwrap_or_default();
    let mut ext = OsString::new();
    if let Some(e) = path.extension() {
        ext.push(".");
        ext.push(e);
    }
    (stem, ext)
}

fn dotted_extension(path: &Path) -> String {
    split_file_name(path).1.to_string_lossy().into_owned()
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn move_file(from: &Path, to: &Path) -> SnapnameResult<PathBuf> {
    std::fs::rename(from, to).map_err(|e| SnapnameError::RenameFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::info!(from = %from.display(), to = %to.display(), "File renamed");
    Ok(to.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snapname_test_rename_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_make_unique_free_path_unchanged() {
        let dir = scratch("free");
        let path = dir.join("Invoice.pdf");
        assert_eq!(make_unique(&path), path);
    }

    #[test]
    fn test_make_unique_counts_upward() {
        let dir = scratch("counter");
        let path = dir.join("Invoice.pdf");
        touch(&path);

        let first = make_unique(&path);
        assert_eq!(first, dir.join("Invoice (1).pdf"));
        touch(&first);

        let second = make_unique(&path);
        assert_eq!(second, dir.join("Invoice (2).pdf"));
        touch(&second);

        assert_eq!(make_unique(&path), dir.join("Invoice (3).pdf"));
    }

    #[test]
    fn test_make_unique_without_extension() {
        let dir = scratch("noext");
        let path = dir.join("README");
        touch(&path);
        assert_eq!(make_unique(&path), dir.join("README (1)"));
    }

    #[test]
    fn test_rename_keeps_extension_and_directory() {
        let dir = scratch("basic");
        let original = dir.join("scan_0001.pdf");
        touch(&original);

        let renamed = rename_file(&original, "Invoice 2023 Acme Corp").unwrap();
        assert_eq!(renamed, dir.join("Invoice 2023 Acme Corp.pdf"));
        assert!(renamed.exists());
        assert!(!original.exists());
    }

    #[test]
    fn test_rename_does_not_double_extension() {
        let dir = scratch("ext_present");
        let original = dir.join("a.txt");
        touch(&original);

        let renamed = rename_file(&original, "Notes.txt").unwrap();
        assert_eq!(renamed, dir.join("Notes.txt"));
    }

    #[test]
    fn test_rename_avoids_existing_target() {
        let dir = scratch("collide");
        let original = dir.join("a.txt");
        touch(&original);
        touch(&dir.join("Notes.txt"));

        let renamed = rename_file(&original, "Notes").unwrap();
        assert_eq!(renamed, dir.join("Notes (1).txt"));
        assert!(dir.join("Notes.txt").exists());
    }

    #[test]
    fn test_rename_cleans_stem() {
        let dir = scratch("clean");
        let original = dir.join("a.txt");
        touch(&original);

        let renamed = rename_file(&original, "  Q3: results / final  ").unwrap();
        assert_eq!(renamed, dir.join("Q3 results final.txt"));
    }

    #[test]
    fn test_empty_stem_touches_nothing() {
        let dir = scratch("empty");
        let original = dir.join("a.txt");
        touch(&original);

        let err = rename_file(&original, " ?* ").unwrap_err();
        assert!(matches!(err, SnapnameError::EmptyName));
        assert!(original.exists());
    }

    #[test]
    fn test_dot_names_are_rejected_and_never_leave_the_directory() {
        let dir = scratch("dots");
        let docs = dir.join("docs");
        fs::create_dir_all(&docs).unwrap();
        let original = docs.join("README");
        touch(&original);

        for stem in [".", "..", " ... "] {
            assert_eq!(preview(&original, stem), None, "{stem:?}");
            let err = rename_file(&original, stem).unwrap_err();
            assert!(matches!(err, SnapnameError::InvalidName { .. }), "{stem:?}: {err}");
        }
        assert!(original.exists());
        assert!(!dir.join("docs (1)").exists());
        assert!(!docs.join(" (1)").exists());
    }

    #[test]
    fn test_dotted_stem_keeps_extension_and_directory() {
        let dir = scratch("dot_ext");
        let docs = dir.join("docs");
        fs::create_dir_all(&docs).unwrap();
        let original = docs.join("a.txt");
        touch(&original);

        let renamed = rename_file(&original, ".").unwrap();
        assert_eq!(renamed, docs.join("..txt"));
        assert_eq!(renamed.parent(), Some(docs.as_path()));
    }

    #[test]
    fn test_extensionless_collision_stays_in_directory() {
        let dir = scratch("noext_collide");
        let original = dir.join("scan");
        touch(&original);
        touch(&dir.join("Notes"));

        let renamed = rename_file(&original, "Notes").unwrap();
        assert_eq!(renamed, dir.join("Notes (1)"));
    }

    #[test]
    fn test_failed_move_reports_reason_and_keeps_original() {
        let dir = scratch("move_fails");
        let original = dir.join("a.txt");
        touch(&original);
        let unreachable = dir.join("gone").join("b.txt");

        let err = move_file(&original, &unreachable).unwrap_err();
        match &err {
            SnapnameError::RenameFailed { from, to, reason } => {
                assert_eq!(from, &original);
                assert_eq!(to, &unreachable);
                assert!(!reason.is_empty());
            }
            other => panic!("expected RenameFailed, got {other:?}"),
        }
        assert!(!err.is_validation());
        assert!(original.exists());
        assert!(!unreachable.exists());
    }

    #[test]
    fn test_rename_to_same_name_is_noop() {
        let dir = scratch("same");
        let original = dir.join("Notes.txt");
        touch(&original);

        assert_eq!(rename_file(&original, "Notes").unwrap(), original);
        assert!(original.exists());
        assert!(!dir.join("Notes (1).txt").exists());
    }

    #[test]
    fn test_rename_missing_file() {
        let dir = scratch("missing");
        let err = rename_file(&dir.join("ghost.txt"), "Name").unwrap_err();
        assert!(matches!(err, SnapnameError::FileNotFound { .. }));
    }

    #[test]
    fn test_prefix_drops_leading_separators() {
        let dir = scratch("prefix");
        let original = dir.join("notes.txt");
        touch(&original);

        let tagged = apply_tag(TagPosition::Prefix, "+Thesis+2024+", &original).unwrap();
        assert_eq!(tagged, dir.join("Thesis+2024+notes.txt"));
    }

    #[test]
    fn test_suffix_goes_before_extension() {
        let dir = scratch("suffix");
        let original = dir.join("paper.pdf");
        touch(&original);
        touch(&dir.join("paper+authors.pdf"));

        let tagged = apply_tag(TagPosition::Suffix, "+authors", &original).unwrap();
        assert_eq!(tagged, dir.join("paper+authors (1).pdf"));
    }

    #[test]
    fn test_tag_on_missing_file() {
        let dir = scratch("tag_missing");
        let err = apply_tag(TagPosition::Suffix, "+authors", &dir.join("nope.pdf")).unwrap_err();
        assert!(matches!(err, SnapnameError::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_tags_are_rejected_before_renaming() {
        let dir = scratch("bad_tag");
        let original = dir.join("notes.txt");
        touch(&original);

        for (position, tag) in [
            (TagPosition::Prefix, "+++"),
            (TagPosition::Suffix, ""),
            (TagPosition::Suffix, "+a/b"),
        ] {
            let err = apply_tag(position, tag, &original).unwrap_err();
            assert!(err.is_validation(), "{tag:?} should be rejected");
        }
        assert!(original.exists());
    }

    #[test]
    fn test_preview_reflects_collisions() {
        let dir = scratch("preview");
        let original = dir.join("scan.png");
        touch(&original);

        assert_eq!(preview(&original, "Receipt"), Some("Receipt.png".to_string()));
        touch(&dir.join("Receipt.png"));
        assert_eq!(preview(&original, "Receipt"), Some("Receipt (1).png".to_string()));
        assert_eq!(preview(&original, "scan"), Some("scan.png".to_string()));
        assert_eq!(preview(&original, "  "), None);
        assert!(!dir.join("Receipt (1).png").exists());
    }

    #[test]
    fn test_request_executes_rename() {
        let dir = scratch("request");
        let original = dir.join("img.jpg");
        touch(&original);

        let renamed = RenameRequest::new(&original, "Holiday").execute().unwrap();
        assert_eq!(renamed, dir.join("Holiday.jpg"));
    }
}
