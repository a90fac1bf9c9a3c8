//! Tag parsing.
//!
//! Tags are declared as one string of tokens separated by spaces, e.g.
//! `"logging diagnostics  tracing"`.

/// Split a space-delimited tag string into tokens.
///
/// Runs of spaces act as a single separator, so no empty tokens are produced.
/// `None` and the empty string both yield no tokens. Only the space character
/// separates tags; other whitespace is kept inside the token.
///
/// # Examples
///
/// ```
/// use packsmith::metadata::parse_tags;
///
/// assert_eq!(parse_tags(Some("a  b   c")).collect::<Vec<_>>(), vec!["a", "b", "c"]);
/// assert_eq!(parse_tags(Some(" a ")).collect::<Vec<_>>(), vec!["a"]);
/// assert_eq!(parse_tags(None).count(), 0);
/// ```
pub fn parse_tags(tags: Option<&str>) -> impl Iterator<Item = &str> {
    tags.unwrap_or_default()
        .split(' ')
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: Option<&str>) -> Vec<&str> {
        parse_tags(input).collect()
    }

    #[test]
    fn test_none_yields_nothing() {
        assert!(parsed(None).is_empty());
    }

    #[test]
    fn test_empty_yields_nothing() {
        assert!(parsed(Some("")).is_empty());
        assert!(parsed(Some("    ")).is_empty());
    }

    #[test]
    fn test_consecutive_spaces_collapse() {
        assert_eq!(parsed(Some("a  b   c")), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_surrounding_spaces_trimmed() {
        assert_eq!(parsed(Some(" a ")), vec!["a"]);
    }

    #[test]
    fn test_order_preserved() {
        assert_eq!(
            parsed(Some("zeta alpha mid")),
            vec!["zeta", "alpha", "mid"]
        );
    }

    #[test]
    fn test_only_space_separates() {
        assert_eq!(parsed(Some("a\tb c")), vec!["a\tb", "c"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_tokens_never_empty_or_spaced(input in "[ a-z]{0,40}") {
                for token in parse_tags(Some(&input)) {
                    prop_assert!(!token.is_empty());
                    prop_assert!(!token.contains(' '));
                }
            }

            #[test]
            fn test_join_equals_collapsed_input(input in "[ a-z]{0,40}") {
                let joined = parse_tags(Some(&input)).collect::<Vec<_>>().join(" ");
                let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
                prop_assert_eq!(joined, collapsed);
            }
        }
    }
}
