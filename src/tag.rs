//! Tag tokenizer and status/priority classifier.
//!
//! A tag is `@` followed by one or more ASCII word characters. Only a fixed set of
//! literals carry meaning; every other tag is inert text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::fields::{Priority, Status};

/// Matches a single annotation tag.
pub static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("tag pattern is valid"));

/// Distinct tags found on a line.
pub type TokenSet<'a> = BTreeSet<&'a str>;

/// Extract the distinct tags on `line`.
pub fn tokenize(line: &str) -> TokenSet<'_> {
    TAG_PATTERN
        .find_iter(line)
        .map(|m| m.as_str().trim())
        .collect()
}

/// Status of a token set; `@TODO` beats `@DONE` beats `@WAIT`.
pub fn extract_status(tokens: &TokenSet<'_>) -> Status {
    Status::DETECTION_ORDER
        .into_iter()
        .find(|status| status.tag().is_some_and(|tag| tokens.contains(tag)))
        .unwrap_or(Status::Unset)
}

/// Priority of a token set; `@P0` beats `@P1` beats `@P2`.
pub fn extract_priority(tokens: &TokenSet<'_>) -> Priority {
    Priority::DETECTION_ORDER
        .into_iter()
        .find(|priority| priority.tag().is_some_and(|tag| tokens.contains(tag)))
        .unwrap_or(Priority::Unset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_collapses_duplicates() {
        let tokens = tokenize("@TODO fix @P1 and @TODO again");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("@TODO"));
        assert!(tokens.contains("@P1"));
    }

    #[test]
    fn test_tokenize_is_idempotent_and_order_independent() {
        let a = tokenize("@WAIT review @P2 @owner_1");
        let b = tokenize("@owner_1 @P2 review @WAIT");
        assert_eq!(a, tokenize("@WAIT review @P2 @owner_1"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_tokenize_without_tags() {
        assert!(tokenize("plain text, an email-ish a@ b").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_stops_at_non_word_characters() {
        let tokens = tokenize("see @TODO: and @P0.");
        assert!(tokens.contains("@TODO"));
        assert!(tokens.contains("@P0"));
        // Mid-word matches still count, the pattern has no word boundary.
        assert!(tokenize("user@TODO").contains("@TODO"));
        // Non-ASCII letters end a tag.
        assert_eq!(tokenize("@TODOé").into_iter().collect::<Vec<_>>(), vec!["@TODO"]);
    }

    #[test]
    fn test_status_precedence() {
        assert_eq!(extract_status(&tokenize("@DONE @TODO")), Status::Todo);
        assert_eq!(extract_status(&tokenize("@WAIT @DONE")), Status::Done);
        assert_eq!(extract_status(&tokenize("@WAIT only")), Status::Wait);
        assert_eq!(extract_status(&tokenize("@todo lowercase")), Status::Unset);
        assert_eq!(extract_status(&tokenize("@TODOS")), Status::Unset);
    }

    #[test]
    fn test_priority_precedence() {
        assert_eq!(extract_priority(&tokenize("@P2 @P0")), Priority::P0);
        assert_eq!(extract_priority(&tokenize("@P2 @P1")), Priority::P1);
        assert_eq!(extract_priority(&tokenize("@P2")), Priority::P2);
        assert_eq!(extract_priority(&tokenize("@P3 @TODO")), Priority::Unset);
    }
}
