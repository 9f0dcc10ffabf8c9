//! State behind the result editor window.
//!
//! The UI owns one `ResultEditor` per recognition result and hands it to its
//! event handlers by reference.

use std::path::{Path, PathBuf};

use crate::rename::{preview, rename_file};
use crate::synthesize::{clean_filename, synthesize};

/// Last message shown under the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStatus {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ResultEditor {
    text: String,
    source: Option<PathBuf>,
    status: Option<EditorStatus>,
    renamed_to: Option<PathBuf>,
}

impl ResultEditor {
    /// Editor seeded with `text`. `source` is only bound when it is an
    /// existing file.
    pub fn new(text: impl Into<String>, source: Option<PathBuf>) -> Self {
        let source = source.filter(|path| {
            let usable = path.is_file();
            if !usable {
                tracing::warn!(path = %path.display(), "Source file missing, rename disabled");
            }
            usable
        });

        Self {
            text: text.into(),
            source,
            status: None,
            renamed_to: None,
        }
    }

    /// Seed from a recognition outcome: recognized text becomes a stem,
    /// diagnostics are shown as they are.
    pub fn from_recognition(text: &str, succeeded: bool, source: Option<PathBuf>) -> Self {
        let seeded = if succeeded {
            synthesize(text)
        } else {
            text.to_string()
        };
        Self::new(seeded, source)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable buffer for the text widget.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Rename and tag controls are only offered with a bound file.
    pub fn can_rename(&self) -> bool {
        self.source.is_some() && self.renamed_to.is_none()
    }

    pub fn insert_prefix(&mut self, tag: &str) {
        self.text.insert_str(0, tag);
    }

    pub fn insert_suffix(&mut self, tag: &str) {
        self.text.push_str(tag);
    }

    /// File name the rename would produce right now.
    pub fn preview(&self) -> Option<String> {
        let source = self.source.as_deref()?;
        preview(source, self.text.trim())
    }

    /// Validate and rename the bound file. On failure the returned message
    /// is ready to show to the user and the file is untouched.
    pub fn confirm_rename(&mut self) -> Result<PathBuf, String> {
        let result = self.try_rename();
        self.status = Some(match &result {
            Ok(path) => EditorStatus::Info(format!(
                "File renamed to:\n{}",
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            )),
            Err(message) => EditorStatus::Error(message.clone()),
        });
        result
    }

    fn try_rename(&mut self) -> Result<PathBuf, String> {
        let source = match &self.source {
            Some(source) => source.clone(),
            None => return Err("No source file to rename.".to_string()),
        };
        if self.renamed_to.is_some() {
            return Err("File was already renamed.".to_string());
        }

        let entered = self.text.trim();
        if entered.is_empty() {
            return Err("Please enter a filename in the text box.".to_string());
        }
        if clean_filename(entered).is_empty() {
            return Err("Filename cannot be empty after cleaning.".to_string());
        }

        let renamed = rename_file(&source, entered).map_err(|e| {
            if e.is_validation() {
                e.to_string()
            } else {
                format!("Failed to rename file:\n{e}")
            }
        })?;
        self.renamed_to = Some(renamed.clone());
        Ok(renamed)
    }

    pub fn status(&self) -> Option<&EditorStatus> {
        self.status.as_ref()
    }

    /// The rename went through; the window can close.
    pub fn is_done(&self) -> bool {
        self.renamed_to.is_some()
    }

    pub fn renamed_to(&self) -> Option<&Path> {
        self.renamed_to.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snapname_test_editor_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_recognized_text_is_synthesized() {
        let editor = ResultEditor::from_recognition("invoice   2023\nACME corp", true, None);
        assert_eq!(editor.text(), "Invoice 2023 Acme Corp");
        assert!(!editor.can_rename());
        assert_eq!(editor.preview(), None);
    }

    #[test]
    fn test_diagnostic_is_kept_verbatim() {
        let editor = ResultEditor::from_recognition("No text\n\nTips:", false, None);
        assert_eq!(editor.text(), "No text\n\nTips:");
    }

    #[test]
    fn test_missing_source_disables_rename() {
        let dir = scratch("missing");
        let mut editor = ResultEditor::new("Name", Some(dir.join("ghost.pdf")));
        assert!(editor.source_file().is_none());
        assert!(editor.confirm_rename().is_err());
        assert!(matches!(editor.status(), Some(EditorStatus::Error(_))));
    }

    #[test]
    fn test_tags_and_preview() {
        let dir = scratch("tags");
        let source = dir.join("scan.pdf");
        fs::write(&source, b"pdf").unwrap();

        let mut editor = ResultEditor::new("Deep Learning", Some(source));
        editor.insert_prefix("+Book+year+");
        editor.insert_suffix("+authors");
        assert_eq!(editor.text(), "+Book+year+Deep Learning+authors");
        assert_eq!(
            editor.preview(),
            Some("+Book+year+Deep Learning+authors.pdf".to_string())
        );
    }

    #[test]
    fn test_confirm_rename_success() {
        let dir = scratch("confirm");
        let source = dir.join("scan.pdf");
        fs::write(&source, b"pdf").unwrap();

        let mut editor = ResultEditor::new("Invoice 2023", Some(source.clone()));
        let renamed = editor.confirm_rename().unwrap();

        assert_eq!(renamed, dir.join("Invoice 2023.pdf"));
        assert!(editor.is_done());
        assert!(!editor.can_rename());
        assert!(!source.exists());
        assert_eq!(
            editor.status(),
            Some(&EditorStatus::Info("File renamed to:\nInvoice 2023.pdf".to_string()))
        );
    }

    #[test]
    fn test_confirm_rename_rejects_blank_text() {
        let dir = scratch("blank");
        let source = dir.join("scan.pdf");
        fs::write(&source, b"pdf").unwrap();

        let mut editor = ResultEditor::new("   ", Some(source.clone()));
        assert_eq!(
            editor.confirm_rename(),
            Err("Please enter a filename in the text box.".to_string())
        );

        editor.set_text("<>|");
        assert_eq!(
            editor.confirm_rename(),
            Err("Filename cannot be empty after cleaning.".to_string())
        );
        assert!(source.exists());
        assert!(!editor.is_done());
    }

    #[test]
    fn test_confirm_rename_rejects_dot_names() {
        let dir = scratch("dots");
        let source = dir.join("scan");
        fs::write(&source, b"raw").unwrap();

        let mut editor = ResultEditor::new("..", Some(source.clone()));
        assert_eq!(editor.preview(), None);
        assert_eq!(
            editor.confirm_rename(),
            Err("\"..\" is not a usable filename".to_string())
        );
        assert!(source.exists());
        assert!(!editor.is_done());
    }
}
