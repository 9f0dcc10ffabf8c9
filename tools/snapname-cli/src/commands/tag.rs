//! Apply a prefix or suffix tag to one file.

use std::path::Path;

use snapname_naming::{apply_tag, TagPosition};

pub fn run(position: TagPosition, tag: &str, file: &Path) -> anyhow::Result<()> {
    let renamed = apply_tag(position, tag, file)?;
    println!("{}", renamed.display());
    Ok(())
}
