//! Print the tag vocabulary for the shell launcher.

use snapname_naming::{vocabulary, TagPosition};

pub fn run(json: bool) -> anyhow::Result<()> {
    let tags = vocabulary();

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    for tag in &tags {
        let command = match tag.position {
            TagPosition::Prefix => "prefix",
            TagPosition::Suffix => "suffix",
        };
        println!("{:<14} {} {:?}", tag.label(), command, tag.text);
    }
    Ok(())
}
