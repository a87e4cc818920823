//! Line tokenizer.
//!
//! A line is split shell-style, except that at most one trailing special
//! literal is kept as a single opaque token:
//!
//! ```text
//! User email="a@b.com" {"first_name": "Bob"}
//! └──┘ └─────────────┘ └───────────────────┘
//!  word     word          brace literal (not split further)
//! ```
//!
//! A brace literal (`{` up to the first `}` after it) wins over a bracket
//! literal (`[` up to the first `]`). Anything after the literal is dropped.
//!
//! Quoting follows the shell for whole-word quotes (`"New York"` becomes
//! `New York`), but a word mixing quoted and bare text keeps its quotes
//! verbatim (`name="California"` stays as written) so `key="value"`
//! parameters reach their handler intact. Commas at either end of a word are
//! stripped, which lets dotted-call arguments (`"id", "name"`) split cleanly.

use crate::error::TokenizeError;

/// Split one command line into tokens.
pub fn parse(line: &str) -> Result<Vec<String>, TokenizeError> {
    let literal = find_literal(line, '{', '}').or_else(|| find_literal(line, '[', ']'));
    match literal {
        Some((start, end)) => {
            let mut tokens = split_words(&line[..start])?;
            tokens.push(line[start..end].to_string());
            Ok(tokens)
        }
        None => split_words(line),
    }
}

/// Byte range of the first `open` and the first `close` after it.
fn find_literal(line: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = line.find(open)?;
    let rel = line[start..].find(close)?;
    Some((start, start + rel + close.len_utf8()))
}

#[derive(Debug)]
enum Segment {
    Bare(String),
    Quoted { raw: String, value: String },
}

/// Shell-style whitespace split honoring single and double quotes.
fn split_words(src: &str) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();
    let mut bare = String::new();
    let mut chars = src.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                flush_bare(&mut bare, &mut segments);
                if !segments.is_empty() {
                    words.push(finish_word(std::mem::take(&mut segments)));
                }
            }
            // Outside quotes a backslash escapes the next character.
            '\\' => match chars.next() {
                Some((_, next)) => bare.push(next),
                None => bare.push(c),
            },
            '"' | '\'' => {
                flush_bare(&mut bare, &mut segments);
                let mut raw = String::from(c);
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, q)) = chars.next() {
                    raw.push(q);
                    if q == c {
                        closed = true;
                        break;
                    }
                    if c == '"' && q == '\\' {
                        if let Some(&(_, escaped)) = chars.peek() {
                            if escaped == '"' || escaped == '\\' {
                                chars.next();
                                raw.push(escaped);
                                value.push(escaped);
                                continue;
                            }
                        }
                    }
                    value.push(q);
                }
                if !closed {
                    return Err(TokenizeError::UnterminatedQuote { offset: pos });
                }
                segments.push(Segment::Quoted { raw, value });
            }
            c => bare.push(c),
        }
    }

    flush_bare(&mut bare, &mut segments);
    if !segments.is_empty() {
        words.push(finish_word(segments));
    }
    Ok(words)
}

fn flush_bare(bare: &mut String, segments: &mut Vec<Segment>) {
    if !bare.is_empty() {
        segments.push(Segment::Bare(std::mem::take(bare)));
    }
}

fn finish_word(mut segments: Vec<Segment>) -> String {
    // Commas outside quotes at the word edges are separators, not content.
    while let Some(Segment::Bare(text)) = segments.last_mut() {
        let trimmed_len = text.trim_end_matches(',').len();
        text.truncate(trimmed_len);
        if !text.is_empty() {
            break;
        }
        segments.pop();
    }
    while let Some(Segment::Bare(text)) = segments.first_mut() {
        let trimmed = text.trim_start_matches(',').to_string();
        if !trimmed.is_empty() {
            *text = trimmed;
            break;
        }
        segments.remove(0);
    }

    let all_quoted = segments
        .iter()
        .all(|s| matches!(s, Segment::Quoted { .. }));
    let word: String = segments
        .iter()
        .map(|s| match s {
            Segment::Bare(text) => text.as_str(),
            Segment::Quoted { raw, value } => {
                if all_quoted {
                    value.as_str()
                } else {
                    raw.as_str()
                }
            }
        })
        .collect();
    word.trim_matches(',').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tokens(line: &str) -> Vec<String> {
        parse(line).unwrap()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokens("show  User\t1234 "), ["show", "User", "1234"]);
        assert!(tokens("   ").is_empty());
        assert!(tokens("").is_empty());
    }

    #[test]
    fn keeps_mixed_quotes_verbatim() {
        assert_eq!(
            tokens(r#"State name="California""#),
            ["State", r#"name="California""#]
        );
    }

    #[test]
    fn brace_literal_is_one_opaque_token() {
        assert_eq!(
            tokens(r#"User email="a@b.com" {"first_name": "Bob"}"#),
            ["User", r#"email="a@b.com""#, r#"{"first_name": "Bob"}"#]
        );
    }

    #[test]
    fn brace_wins_over_bracket() {
        assert_eq!(
            tokens(r#"Place 1 {"amenity_ids": ["a", "b"]}"#),
            ["Place", "1", r#"{"amenity_ids": ["a", "b"]}"#]
        );
        assert_eq!(tokens("Place 1 [1, 2] {}"), ["Place", "1", "[1", "2]", "{}"]);
    }

    #[test]
    fn bracket_literal_when_no_brace() {
        assert_eq!(
            tokens("Place 1 amenity_ids [1, 2]"),
            ["Place", "1", "amenity_ids", "[1, 2]"]
        );
    }

    #[test]
    fn text_after_literal_is_dropped() {
        assert_eq!(tokens("User 1 {} trailing"), ["User", "1", "{}"]);
    }

    #[test]
    fn unclosed_literal_is_split_normally() {
        assert_eq!(tokens("User 1 {oops"), ["User", "1", "{oops"]);
    }

    #[test]
    fn whole_word_quotes_are_removed() {
        assert_eq!(
            tokens(r#"update City 1 name "New York""#),
            ["update", "City", "1", "name", "New York"]
        );
        assert_eq!(tokens("'single quoted'"), ["single quoted"]);
        assert_eq!(tokens(r#""a"'b'"#), ["ab"]);
        assert_eq!(tokens(r#""""#), [""]);
    }

    #[test]
    fn escaped_quotes_inside_double_quotes() {
        assert_eq!(tokens(r#""say \"hi\"""#), [r#"say "hi""#]);
        assert_eq!(tokens(r#"'no \escape'"#), [r#"no \escape"#]);
    }

    #[test]
    fn strips_edge_commas() {
        assert_eq!(
            tokens(r#"User "1234", "first_name", "John""#),
            ["User", "1234", "first_name", "John"]
        );
        assert_eq!(tokens("a, b,, ,c"), ["a", "b", "c"]);
        assert_eq!(tokens("a , b"), ["a", "", "b"]);
    }

    #[test]
    fn backslash_escapes_outside_quotes() {
        assert_eq!(
            tokens(r"City 1 name New\ York"),
            ["City", "1", "name", "New York"]
        );
        assert_eq!(tokens(r#"a\"b"#), [r#"a"b"#]);
        assert_eq!(tokens(r"trailing\"), [r"trailing\"]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert_eq!(
            parse(r#"User "oops"#),
            Err(TokenizeError::UnterminatedQuote { offset: 5 })
        );
        assert!(parse("it's").is_err());
    }

    #[test]
    fn quote_inside_literal_prefix_is_checked() {
        assert!(parse(r#"User "x {"a": 1}"#).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: plain words separated by whitespace come back unchanged.
        #[test]
        fn plain_words_roundtrip(
            words in proptest::collection::vec("[A-Za-z0-9_@.=-]{1,12}", 0..8),
        ) {
            let line = words.join(" ");
            prop_assert_eq!(parse(&line).unwrap(), words);
        }

        /// Property: a trailing brace literal is preserved byte-for-byte.
        #[test]
        fn trailing_brace_literal_is_verbatim(
            words in proptest::collection::vec("[A-Za-z0-9_]{1,8}", 0..4),
            body in "[^{}\\[\\]]{0,24}",
        ) {
            let literal = format!("{{{body}}}");
            let line = format!("{} {literal}", words.join(" "));
            let parsed = parse(&line).unwrap();
            prop_assert_eq!(parsed.last(), Some(&literal));
            prop_assert_eq!(parsed.len(), words.len() + 1);
        }
    }
}
