//! Sentence splitting for journal entries.
//!
//! A plain delimiter heuristic: abbreviations, decimals and other embedded
//! terminators split too.

/// Characters that end a sentence.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Split `text` into trimmed, non-empty sentence fragments.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(&SENTENCE_TERMINATORS[..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_two_sentences() {
        assert_eq!(
            split_sentences("I failed. I am worthless."),
            vec!["I failed", "I am worthless"]
        );
    }

    #[test]
    fn test_split_mixed_terminators() {
        assert_eq!(
            split_sentences("Why does this always happen? Nobody cares! Fine."),
            vec!["Why does this always happen", "Nobody cares", "Fine"]
        );
    }

    #[test]
    fn test_split_discards_empty_fragments() {
        assert_eq!(split_sentences("Wait...   what.  "), vec!["Wait", "what"]);
        assert!(split_sentences("...").is_empty());
        assert!(split_sentences("   ").is_empty());
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn test_split_without_terminator() {
        assert_eq!(split_sentences("  no punctuation here "), vec!["no punctuation here"]);
    }

    #[test]
    fn test_split_does_not_special_case_decimals() {
        assert_eq!(split_sentences("I scored 2.5 points."), vec!["I scored 2", "5 points"]);
    }

    proptest! {
        #[test]
        fn prop_fragments_are_trimmed_and_terminator_free(text in "[a-z .!?]{0,64}") {
            for fragment in split_sentences(&text) {
                prop_assert!(!fragment.is_empty());
                prop_assert_eq!(fragment.trim(), fragment.as_str());
                prop_assert!(!fragment.contains(&SENTENCE_TERMINATORS[..]));
            }
        }

        #[test]
        fn prop_count_matches_joined_sentences(
            words in proptest::collection::vec("[a-z]{1,8}", 1..8)
        ) {
            let text = words.iter().map(|w| format!("{w}.")).collect::<Vec<_>>().join(" ");
            prop_assert_eq!(split_sentences(&text).len(), words.len());
        }
    }
}
