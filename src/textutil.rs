//! Shared URL-escaping and name-normalization helpers.
//!
//! Query strings and placeholder URLs need two slightly different encodings:
//! form-style (`+` for spaces) for search parameters, and RFC 3986
//! component escaping (`%20`) for text embedded in generated URLs.

/// Form-encode a query value. Spaces become `+`.
pub fn form_urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

/// Escape a URL component. Only RFC 3986 unreserved bytes pass through.
pub fn escape_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

/// Trim and lowercase a user-supplied label (Unicode-aware).
pub fn normalize_label(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Count characters, not bytes, for user-facing length limits.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
