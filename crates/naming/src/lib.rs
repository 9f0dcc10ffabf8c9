//! SnapName Naming
//!
//! From recognized text to a renamed file:
//! - **Synthesis:** raw text to a clean, title-cased stem
//! - **Renaming:** extension-preserving, never overwrites, `" (N)"` counters
//! - **Tags:** prefix/suffix vocabulary and insertion
//! - **Editor:** UI-independent state for reviewing and applying a name

pub mod editor;
pub mod rename;
pub mod synthesize;
pub mod tags;

pub use editor::{EditorStatus, ResultEditor};
pub use rename::{apply_tag, make_unique, preview, rename_file, FilenameCandidate, RenameRequest};
pub use synthesize::{clean_filename, synthesize, INVALID_FILENAME_CHARS};
pub use tags::{label, vocabulary, Tag, TagPosition, PREFIX_TAGS, SUFFIX_TAGS};
