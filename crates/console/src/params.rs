//! `key=value` parameters accepted by `create`.
//!
//! Value forms:
//! - `"..."`: string; `_` becomes a space and `\"` a literal quote
//! - digits with a `.`: float
//! - digits: integer
//!
//! Anything else is not a parameter.

use hbnb_core::AttrValue;

/// Parse one `key=value` token. Returns `None` when the token is malformed.
pub fn parse_param(token: &str) -> Option<(String, AttrValue)> {
    let (key, raw) = token.split_once('=')?;
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let value = parse_value(raw)?;
    Some((key.to_string(), value))
}

fn parse_value(raw: &str) -> Option<AttrValue> {
    if let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return unquote(inner).map(AttrValue::Str);
    }
    if raw.contains('.') {
        return raw
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(AttrValue::Float);
    }
    raw.parse::<i64>().ok().map(AttrValue::Int)
}

/// Undo the parameter escaping. A bare `"` inside the value is malformed.
fn unquote(inner: &str) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('"') => out.push('"'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '"' => return None,
            '_' => out.push(' '),
            c => out.push(c),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(token: &str) -> Option<(String, AttrValue)> {
        parse_param(token)
    }

    #[test]
    fn quoted_strings_unescape() {
        assert_eq!(
            param(r#"name="My_little_house""#),
            Some(("name".into(), AttrValue::Str("My little house".into())))
        );
        assert_eq!(
            param(r#"text="say_\"hi\"""#),
            Some(("text".into(), AttrValue::Str(r#"say "hi""#.into())))
        );
    }

    #[test]
    fn numbers_by_shape() {
        assert_eq!(param("number_rooms=4"), Some(("number_rooms".into(), AttrValue::Int(4))));
        assert_eq!(param("latitude=37.77"), Some(("latitude".into(), AttrValue::Float(37.77))));
        assert_eq!(param("max_guest=-3"), Some(("max_guest".into(), AttrValue::Int(-3))));
    }

    #[test]
    fn malformed_params_are_rejected() {
        assert_eq!(param("name"), None);
        assert_eq!(param("=4"), None);
        assert_eq!(param("bad-key=4"), None);
        assert_eq!(param("name=unquoted"), None);
        assert_eq!(param(r#"name="a"b""#), None);
        assert_eq!(param("price=1.2.3"), None);
        assert_eq!(param("price=inf.x"), None);
        assert_eq!(param(r#"name=""#), None);
    }
}
