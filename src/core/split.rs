//! Input tokenization
//!
//! Splits an input string into its first token and the remaining text, on
//! the first occurrence of a space or line-break delimiter:
//! "hello world" -> ("hello", "world"), "hello\r\nworld" -> ("hello", "world").

/// First token of an input string, plus the text after the delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitToken<'a> {
    /// Text before the first delimiter (the whole input when none is found).
    pub first: &'a str,
    /// Text after the delimiter, None when no delimiter was found.
    pub rest: Option<&'a str>,
}

/// Split `content` at the first space, `\n`, `\r`, or `\r\n`.
///
/// A `\r\n` pair counts as a single delimiter spanning two characters; a
/// lone `\r` or `\n` spans one. Only the delimiter itself is consumed, so
/// calling again on `rest` continues tokenizing the remainder.
pub fn split_first_token(content: &str) -> SplitToken<'_> {
    let bytes = content.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        let width = match b {
            b' ' | b'\n' => 1,
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => 2,
            b'\r' => 1,
            _ => continue,
        };
        return SplitToken {
            first: &content[..i],
            rest: Some(&content[i + width..]),
        };
    }
    SplitToken {
        first: content,
        rest: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_on_space() {
        let token = split_first_token("hello world");
        assert_eq!(token.first, "hello");
        assert_eq!(token.rest, Some("world"));
    }

    #[test]
    fn test_split_on_line_feed() {
        let token = split_first_token("hello\nworld");
        assert_eq!(token.first, "hello");
        assert_eq!(token.rest, Some("world"));
    }

    #[test]
    fn test_split_on_crlf_advances_two() {
        let token = split_first_token("hello\r\nworld");
        assert_eq!(token.first, "hello");
        assert_eq!(token.rest, Some("world"));
    }

    #[test]
    fn test_split_on_lone_carriage_return() {
        let token = split_first_token("hello\rworld");
        assert_eq!(token.first, "hello");
        assert_eq!(token.rest, Some("world"));
    }

    #[test]
    fn test_no_delimiter_yields_whole_input() {
        let token = split_first_token("hello");
        assert_eq!(token.first, "hello");
        assert_eq!(token.rest, None);
    }

    #[test]
    fn test_empty_input() {
        let token = split_first_token("");
        assert_eq!(token.first, "");
        assert_eq!(token.rest, None);
    }

    #[test]
    fn test_trailing_delimiter_leaves_empty_rest() {
        let token = split_first_token("hello ");
        assert_eq!(token.first, "hello");
        assert_eq!(token.rest, Some(""));
    }

    #[test]
    fn test_leading_delimiter_leaves_empty_first() {
        let token = split_first_token(" hello");
        assert_eq!(token.first, "");
        assert_eq!(token.rest, Some("hello"));
    }

    #[test]
    fn test_first_delimiter_wins() {
        let token = split_first_token("a b\nc");
        assert_eq!(token.first, "a");
        assert_eq!(token.rest, Some("b\nc"));
    }

    #[test]
    fn test_crlf_at_end_of_input() {
        let token = split_first_token("hello\r\n");
        assert_eq!(token.first, "hello");
        assert_eq!(token.rest, Some(""));
    }

    #[test]
    fn test_restartable_on_rest() {
        let token = split_first_token("one two three");
        assert_eq!(token.first, "one");
        let token = split_first_token(token.rest.unwrap());
        assert_eq!(token.first, "two");
        let token = split_first_token(token.rest.unwrap());
        assert_eq!(token.first, "three");
        assert_eq!(token.rest, None);
    }

    proptest! {
        #[test]
        fn prop_first_never_contains_delimiter(input in ".*") {
            let token = split_first_token(&input);
            prop_assert!(!token.first.contains([' ', '\r', '\n']));
        }

        #[test]
        fn prop_no_delimiter_means_no_rest(input in "[^ \r\n]*") {
            let token = split_first_token(&input);
            prop_assert_eq!(token.first, input.as_str());
            prop_assert_eq!(token.rest, None);
        }

        #[test]
        fn prop_split_preserves_content(input in ".*") {
            let token = split_first_token(&input);
            match token.rest {
                Some(rest) => {
                    // first + delimiter + rest reassembles the input
                    prop_assert!(input.starts_with(token.first));
                    prop_assert!(input.ends_with(rest));
                    let delim_len = input.len() - token.first.len() - rest.len();
                    prop_assert!(delim_len == 1 || delim_len == 2);
                }
                None => prop_assert_eq!(token.first, input.as_str()),
            }
        }

        #[test]
        fn prop_repeated_splitting_terminates(input in ".{0,200}") {
            let mut remaining = input.as_str();
            let mut steps = 0;
            loop {
                let token = split_first_token(remaining);
                steps += 1;
                match token.rest {
                    Some(rest) => remaining = rest,
                    None => break,
                }
                prop_assert!(steps <= input.len() + 1);
            }
        }
    }
}
