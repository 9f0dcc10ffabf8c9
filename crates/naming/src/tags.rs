//! Tag vocabulary offered by the editor and the shell launcher.

use serde::{Deserialize, Serialize};

/// Where a tag goes in a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagPosition {
    /// Before the base name.
    Prefix,
    /// Between the base name and the extension.
    Suffix,
}

/// Prefix tags. `year` is a placeholder the user overwrites.
pub const PREFIX_TAGS: [&str; 7] = [
    "+Book+year+",
    "+Paper+year+",
    "+Thesis+year+",
    "+Report+year+",
    "+Slides+year+",
    "+Presentation+year+",
    "+Draft+year+",
];

pub const SUFFIX_TAGS: [&str; 1] = ["+authors"];

/// One entry of the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub text: &'static str,
    pub position: TagPosition,
}

impl Tag {
    /// Button label: the first `+`-separated segment.
    pub fn label(&self) -> &'static str {
        label(self.text)
    }
}

/// First non-empty `+`-separated segment of `tag`.
pub fn label(tag: &str) -> &str {
    tag.split('+').find(|segment| !segment.is_empty()).unwrap_or(tag)
}

/// All tags, prefixes first.
pub fn vocabulary() -> Vec<Tag> {
    PREFIX_TAGS
        .iter()
        .map(|&text| Tag {
            text,
            position: TagPosition::Prefix,
        })
        .chain(SUFFIX_TAGS.iter().map(|&text| Tag {
            text,
            position: TagPosition::Suffix,
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(label("+Thesis+year+"), "Thesis");
        assert_eq!(label("+authors"), "authors");
        assert_eq!(label("plain"), "plain");
    }

    #[test]
    fn test_vocabulary_order_and_positions() {
        let tags = vocabulary();
        assert_eq!(tags.len(), 8);
        assert_eq!(tags[0].label(), "Book");
        assert!(tags[..7].iter().all(|t| t.position == TagPosition::Prefix));
        assert_eq!(tags[7].text, "+authors");
        assert_eq!(tags[7].position, TagPosition::Suffix);
    }

    #[test]
    fn test_position_serializes_lowercase() {
        let json = serde_json::to_string(&TagPosition::Suffix).unwrap();
        assert_eq!(json, "\"suffix\"");
    }
}
