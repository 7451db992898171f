//! Markdown fence and comment stripping for model replies.
//!
//! Models asked for "JSON only" still wrap replies in ```json fences or
//! annotate fields with `//` comments often enough that decoding the reply
//! verbatim fails. [`clean`] normalizes a reply to plain JSON text.
//!
//! Comment removal is a character scan that tracks string and escape state
//! rather than a regex pass: a `//` inside a quoted value (a URL, say)
//! must survive, and that distinction is exactly what a regex without
//! lookbehind cannot make.
//!
//! Cleaning never fails. Output that still isn't valid JSON is caught at
//! the decode step in [`Extraction::parse`](crate::Extraction::parse), not
//! here.

/// Strip markdown fences and JSON comments from a raw model reply.
///
/// Input that has no fences and no strippable comments comes back as its
/// trimmed self, byte for byte; already-clean JSON is never reformatted.
/// For the same reason `clean` is idempotent on fence-free input.
pub fn clean(raw: &str) -> String {
    let trimmed = raw.trim();
    let (body, had_fence) = strip_fences(trimmed);
    let stripped = strip_comments(body);

    // Untouched input passes through unmutated.
    if !had_fence && stripped == body {
        return body.to_string();
    }

    collapse_blank_lines(&stripped)
}

/// Strip a leading ``` fence (with optional case-insensitive `json` tag)
/// and the matching trailing fence.
///
/// Returns the inner text and whether a fence was found. Fences with other
/// language tags are treated as plain fences; the tag text is left alone.
fn strip_fences(text: &str) -> (&str, bool) {
    let Some(mut body) = text.strip_prefix("```") else {
        return (text, false);
    };

    if let Some(tag) = body.get(..4) {
        if tag.eq_ignore_ascii_case("json") {
            body = &body[4..];
        }
    }
    body = body.trim_start();

    if let Some(inner) = body.strip_suffix("```") {
        body = inner.trim_end();
    }

    (body, true)
}

/// Remove `//` line comments and `/* */` block comments lying outside
/// double-quoted strings.
///
/// The newline terminating a line comment is kept so line structure
/// survives for the blank-line collapse. An unterminated block comment
/// swallows the rest of the input, matching how a JSON decoder would have
/// choked on it anyway.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' => match chars.peek() {
                Some('/') => {
                    for next in chars.by_ref() {
                        if next == '\n' {
                            out.push('\n');
                            break;
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for next in chars.by_ref() {
                        if prev == '*' && next == '/' {
                            break;
                        }
                        prev = next;
                    }
                }
                _ => out.push(c),
            },
            _ => out.push(c),
        }
    }

    out
}

/// Drop lines left empty by comment removal and trim trailing spaces.
fn collapse_blank_lines(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_passes_through() {
        let input = r#"{"a": 1}"#;
        assert_eq!(clean(input), input);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean("  {\"a\": 1}\n\n"), "{\"a\": 1}");
    }

    #[test]
    fn strips_json_fence() {
        assert_eq!(clean("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_uppercase_fence_tag() {
        assert_eq!(clean("```JSON\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(clean("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn missing_trailing_fence_still_strips_leading() {
        assert_eq!(clean("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn strips_line_comment() {
        let input = "{\n\"a\": 1 // the premium\n}";
        assert_eq!(clean(input), "{\n\"a\": 1\n}");
    }

    #[test]
    fn strips_block_comment() {
        let input = "{\"a\": /* zero-padded */ 1}";
        assert_eq!(clean(input), "{\"a\":  1}");
    }

    #[test]
    fn comment_only_line_is_collapsed() {
        let input = "{\n// beneficiary block\n\"a\": 1\n}";
        assert_eq!(clean(input), "{\n\"a\": 1\n}");
    }

    #[test]
    fn preserves_slashes_inside_strings() {
        let input = r#"{"url":"http://x"}"#;
        assert_eq!(clean(input), input);
    }

    #[test]
    fn preserves_block_marker_inside_strings() {
        let input = r#"{"note":"rate /* nominal */ applies"}"#;
        assert_eq!(clean(input), input);
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let input = r#"{"note":"she said \"hi\" // not a comment"}"#;
        assert_eq!(clean(input), input);
    }

    #[test]
    fn fenced_and_commented() {
        let input = "```json\n{\n\"dob\": \"12/25/1985\", // MM/dd/yyyy\n\"ssn\": \"123-45-6789\"\n}\n```";
        assert_eq!(
            clean(input),
            "{\n\"dob\": \"12/25/1985\",\n\"ssn\": \"123-45-6789\"\n}"
        );
    }

    #[test]
    fn idempotent_without_fences() {
        let inputs = [
            r#"{"a": 1}"#,
            "{\n\"a\": 1 // note\n}",
            "Sorry, I cannot process this.",
        ];
        for input in inputs {
            let once = clean(input);
            assert_eq!(clean(&once), once, "input: {input}");
        }
    }

    #[test]
    fn unterminated_block_comment_swallows_rest() {
        assert_eq!(clean("{\"a\": 1} /* trailing"), "{\"a\": 1}");
    }

    #[test]
    fn date_fields_with_slashes_survive() {
        let input = r#"{"dob":"12/25/1985"}"#;
        assert_eq!(clean(input), input);
    }
}
