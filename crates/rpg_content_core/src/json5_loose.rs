//! Fallback reader for `.json5` packs the `json5` crate refuses.
//!
//! Handles comments, trailing commas, bare identifier keys and single-quoted
//! strings by rewriting the text into strict JSON. Anything else (hex numbers,
//! `Infinity`, multi-line strings) is left for the strict parser to reject.

/// Rewrites relaxed JSON5 text as strict JSON text. String contents are
/// never touched.
pub fn normalize(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => i = copy_double_quoted(&chars, i, &mut out),
            '\'' => i = copy_single_quoted(&chars, i, &mut out),
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            '}' | ']' => {
                drop_trailing_comma(&mut out);
                out.push(c);
                i += 1;
            }
            c if is_ident_start(c) && in_key_position(&out) => {
                let start = i;
                while i < chars.len() && is_ident_part(chars[i]) {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                if next_significant(&chars, i) == Some(':') {
                    out.push('"');
                    out.push_str(&ident);
                    out.push('"');
                } else {
                    out.push_str(&ident);
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn copy_double_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        match c {
            '\\' => {
                if let Some(&escaped) = chars.get(i) {
                    out.push(escaped);
                    i += 1;
                }
            }
            '"' => break,
            _ => {}
        }
    }
    i
}

fn copy_single_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '\\' => match chars.get(i) {
                Some('\'') => {
                    out.push('\'');
                    i += 1;
                }
                Some(&escaped) => {
                    out.push('\\');
                    out.push(escaped);
                    i += 1;
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            '\'' => break,
            other => out.push(other),
        }
    }
    out.push('"');
    i
}

fn drop_trailing_comma(out: &mut String) {
    let trimmed_len = out.trim_end().len();
    if out[..trimmed_len].ends_with(',') {
        out.truncate(trimmed_len - 1);
    }
}

fn in_key_position(out: &str) -> bool {
    matches!(out.trim_end().chars().last(), Some('{') | Some(','))
}

fn next_significant(chars: &[char], from: usize) -> Option<char> {
    chars[from..].iter().copied().find(|c| !c.is_whitespace())
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::normalize;

    fn parse(source: &str) -> Value {
        serde_json::from_str(&normalize(source)).expect("normalised text should be strict JSON")
    }

    #[test]
    fn strict_json_passes_through() {
        let source = r#"{"a": [1, 2.5, "x"], "b": {"c": null}}"#;
        assert_eq!(normalize(source), source);
    }

    #[test]
    fn strips_line_and_block_comments() {
        let doc = parse(
            "{\n  // leading comment\n  \"a\": 1, /* inline */ \"b\": 2 // trailing\n}\n",
        );
        assert_eq!(doc, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn drops_trailing_commas_even_after_comments() {
        let doc = parse("{\"items\": [1, 2, 3,], \"x\": {\"y\": 1, // note\n},}");
        assert_eq!(doc, json!({"items": [1, 2, 3], "x": {"y": 1}}));
    }

    #[test]
    fn quotes_bare_keys_but_not_literals() {
        let doc = parse("{schemaVersion: 1, enabled: true, nested: {_x$: null}, list: [false]}");
        assert_eq!(
            doc,
            json!({"schemaVersion": 1, "enabled": true, "nested": {"_x$": null}, "list": [false]})
        );
    }

    #[test]
    fn string_contents_are_left_alone() {
        let doc = parse(r#"{"url": "http://example.com/*x*/", "note": "a, ]", "k": "key: v"}"#);
        assert_eq!(
            doc,
            json!({"url": "http://example.com/*x*/", "note": "a, ]", "k": "key: v"})
        );
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        let doc = parse(r#"{"say": "he said \"hi\" // not a comment"}"#);
        assert_eq!(doc, json!({"say": "he said \"hi\" // not a comment"}));
    }

    #[test]
    fn single_quoted_strings_become_double_quoted() {
        let doc = parse(r#"{title: 'The "Big" Dig', note: 'it\'s fine'}"#);
        assert_eq!(doc, json!({"title": "The \"Big\" Dig", "note": "it's fine"}));
    }

    #[test]
    fn non_ascii_survives() {
        let doc = parse("{icon: '📜', name: \"Épée\",}");
        assert_eq!(doc, json!({"icon": "📜", "name": "Épée"}));
    }
}
