//! Sanitation of CSS-like attribute values.

use crate::entity::{decode_entities, is_valid_code_point, REPLACEMENT};

/// Normalizes and checks a `style` value, replacing forbidden or unsafe
/// structures with a fixed diagnostic comment. The returned string may still
/// contain cleverly encoded character references and must be escaped before
/// it is embedded in HTML.
pub(crate) fn check_css(value: &str) -> String {
    let value = normalize_css(value);
    if value.contains(REPLACEMENT) || value.bytes().any(is_css_control) {
        return "/* invalid control char */".to_string();
    }
    if contains_problematic(&value) {
        return "/* insecure input */".to_string();
    }
    value
}

fn is_css_control(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0b | 0x0e..=0x1f | 0x7f)
}

/// Decodes character references and one escape sequence, and strips comments
/// unless `value` is nothing but a single well-formed comment.
pub(crate) fn normalize_css(value: &str) -> String {
    // Escape decoding must come after reference decoding, so no unsanitized
    // escape sequence can survive. The result may still contain character
    // references; the caller escapes those anyway.
    let mut value = decode_one_escape(&decode_entities(value));

    // Let a lone comment through so a caller that rejects the value can pass
    // a readable message along.
    if is_single_comment(&value) {
        return value;
    }

    // Flatten comments to spaces rather than removing them; IE got token
    // splitting wrong. Comment removal cannot re-introduce references or
    // escapes this way.
    loop {
        let open = match value.find("/*") {
            Some(open) => open,
            None => break,
        };
        let close = match value[open + 2..].find("*/") {
            Some(close) => open + 2 + close,
            None => break,
        };
        let mut next = String::with_capacity(value.len());
        next.push_str(&value[..open]);
        next.push(' ');
        next.push_str(&value[close + 2..]);
        value = next;
    }

    // Drop anything after a dangling comment-start token, to guard against
    // incorrect client implementations.
    if let Some(open) = value.find("/*") {
        value.truncate(open);
    }
    value
}

/// Decodes the first backslash escape sequence in `value` per the grammar in
/// the CSS2 spec, appendix D.
fn decode_one_escape(value: &str) -> String {
    let start = match value.find('\\') {
        Some(start) => start,
        None => return value.to_string(),
    };
    let rest = &value[start + 1..];
    let bytes = rest.as_bytes();
    let (decoded, consumed) = if rest.is_empty() {
        // A trailing backslash cannot begin a sequence; double it so clients
        // see a complete escape.
        ("\\\\".to_string(), 0)
    } else if matches!(bytes[0], b'\n' | b'\r' | b'\x0c') {
        // Line continuation.
        let len = if rest.starts_with("\r\n") { 2 } else { 1 };
        (String::new(), len)
    } else if bytes[0].is_ascii_hexdigit() {
        let mut n = 1;
        while n < 6 && n < bytes.len() && bytes[n].is_ascii_hexdigit() {
            n += 1;
        }
        let mut consumed = n;
        // A single whitespace character after the digits belongs to the
        // escape.
        if bytes.get(n).map_or(false, u8::is_ascii_whitespace) {
            consumed += 1;
        }
        let c = u32::from_str_radix(&rest[..n], 16)
            .ok()
            .and_then(char::from_u32)
            .filter(|&c| is_valid_code_point(c))
            .unwrap_or(REPLACEMENT);
        (reescape(c), consumed)
    } else {
        // A backslash cancelling the special meaning of the next character.
        let c = rest.chars().next().unwrap();
        (reescape(c), c.len_utf8())
    };
    let mut out = String::with_capacity(value.len());
    out.push_str(&value[..start]);
    out.push_str(&decoded);
    out.push_str(&value[start + 1 + consumed..]);
    out
}

/// Characters that need escaping inside CSS strings come back out in a
/// canonical hex form, to avoid parsing errors in clients.
fn reescape(c: char) -> String {
    if matches!(c, '\n' | '"' | '`' | '\\') {
        format!("\\{:02x} ", u32::from(c))
    } else {
        c.to_string()
    }
}

fn is_single_comment(value: &str) -> bool {
    let t = value.trim_matches(|c: char| c.is_ascii_whitespace());
    t.len() >= 4
        && t.starts_with("/*")
        && t.ends_with("*/")
        && !t[2..t.len() - 2].contains(&['*', '\\', '/'][..])
}

/// Keywords that are vectors for script execution or behavior injection in
/// legacy rendering engines.
fn contains_problematic(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    if lower.contains("expression") {
        return true;
    }
    const KEYWORDS: &[(&str, char)] = &[
        ("accelerator", ':'),
        ("-o-link", ':'),
        ("-o-link-source", ':'),
        ("-o-replace", ':'),
        ("url", '('),
        ("image", '('),
        ("image-set", '('),
    ];
    for &(keyword, delimiter) in KEYWORDS {
        if keyword_then(&lower, keyword, delimiter) {
            return true;
        }
    }
    attr_url(&lower)
}

/// Reports whether `s` contains `keyword` followed, after optional
/// whitespace, by `delimiter`.
fn keyword_then(s: &str, keyword: &str, delimiter: char) -> bool {
    let mut from = 0;
    while let Some(i) = s[from..].find(keyword) {
        let after = &s[from + i + keyword.len()..];
        if after
            .trim_start_matches(|c: char| c.is_ascii_whitespace())
            .starts_with(delimiter)
        {
            return true;
        }
        from += i + 1;
    }
    false
}

/// Matches `attr(...)` calls whose argument list smuggles in a `url` token.
fn attr_url(s: &str) -> bool {
    let mut from = 0;
    while let Some(i) = s[from..].find("attr") {
        let at = from + i + 4;
        let after = s[at..].trim_start_matches(|c: char| c.is_ascii_whitespace());
        if let Some(args) = after.strip_prefix('(') {
            let end = args.find(')').unwrap_or(args.len());
            let bytes = args[..end].as_bytes();
            for j in 2..bytes.len() {
                if bytes[j..].starts_with(b"url")
                    && (bytes[j - 1].is_ascii_whitespace() || bytes[j - 1] == b',')
                {
                    return true;
                }
            }
        }
        from += i + 4;
    }
    false
}
