//! Recognized text to filename stem.

/// Characters rejected by common filesystems.
pub const INVALID_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace invalid characters with spaces and collapse whitespace.
///
/// Casing is preserved. Used on user-edited names.
pub fn clean_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { ' ' } else { c })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn raw recognized text into a readable title-cased stem.
///
/// `"invoice   2023\nACME corp"` becomes `"Invoice 2023 Acme Corp"`. The
/// output contains no invalid characters, no runs of whitespace, and no
/// leading or trailing whitespace. Applying it twice changes nothing.
/// Empty input yields an empty stem.
pub fn synthesize(raw: &str) -> String {
    clean_filename(raw)
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case `word`, then upper-case its first letter.
///
/// Letters whose upper-case form is more than one character (`ß`, `ﬁ`) stay
/// lower-case so the result is stable under a second pass.
fn title_case_word(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut capitalized = false;

    for c in lower.chars() {
        if !capitalized && c.is_alphabetic() {
            capitalized = true;
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => out.push(single),
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ocr_text_becomes_title_case_stem() {
        assert_eq!(synthesize("invoice   2023\nACME corp"), "Invoice 2023 Acme Corp");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(synthesize(""), "");
        assert_eq!(synthesize(" \n\t "), "");
        assert_eq!(synthesize("???"), "");
    }

    #[test]
    fn test_invalid_characters_become_spaces() {
        assert_eq!(synthesize("report: q3/q4*final?"), "Report Q3 Q4 Final");
        assert_eq!(synthesize("a<b>c\"d\\e|f"), "A B C D E F");
    }

    #[test]
    fn test_first_letter_after_digits_or_punctuation() {
        assert_eq!(synthesize("2023abc (draft)"), "2023Abc (Draft)");
    }

    #[test]
    fn test_multi_char_uppercase_is_left_alone() {
        assert_eq!(synthesize("ßtraße"), "ßtraße");
    }

    #[test]
    fn test_clean_filename_keeps_case() {
        assert_eq!(clean_filename("  My:Thesis\n  DRAFT "), "My Thesis DRAFT");
        assert_eq!(clean_filename("+Thesis+2024+Notes"), "+Thesis+2024+Notes");
    }

    proptest! {
        #[test]
        fn synthesize_is_idempotent(raw in "[\\p{Latin}0-9 <>:\"/\\\\|?*\\n\\t.,()+-]{0,64}") {
            let once = synthesize(&raw);
            prop_assert_eq!(synthesize(&once), once);
        }

        #[test]
        fn synthesize_output_is_sanitized(raw in "[a-zA-Z0-9 <>:\"/\\\\|?*\\n\\t\\r._-]{0,64}") {
            let out = synthesize(&raw);
            prop_assert!(!out.contains(&INVALID_FILENAME_CHARS[..]));
            prop_assert!(!out.contains("  "));
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
