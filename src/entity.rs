//! Decoding of HTML/XML character references, and re-encoding of attribute
//! values for safe embedding in sanitized output.

include!(concat!(env!("OUT_DIR"), "/entitydata.rs"));

/// Substituted for any reference that decodes to an illegal code point.
pub(crate) const REPLACEMENT: char = '\u{fffd}';

/// Spellings of `&rlm;` in Hebrew and Arabic that MediaWiki accepts even
/// though they are not part of the HTML standard.
const RLM_ALIASES: &[&str] = &["רלמ", "رلم"];

/// Decodes named, decimal, and hexadecimal character references in `text`.
///
/// Only semicolon-terminated references are recognized. References that
/// decode to a code point illegal in both HTML5 and XML become U+FFFD, as do
/// numeric references too large to parse. Anything else, including a bare
/// `&`, passes through literally.
///
/// ```
/// # use wikiscrub::decode_entities;
/// assert_eq!(decode_entities("Fish &amp; chips &#40;large&#x29;"),
///            "Fish & chips (large)");
/// ```
pub fn decode_entities(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        while i < bytes.len() && bytes[i] != b'&' {
            i += 1;
        }
        out.push_str(&text[start..i]);
        if i >= bytes.len() {
            break;
        }
        match decode_reference(&text[i + 1..]) {
            Some((decoded, len)) => {
                out.push_str(&decoded);
                i += 1 + len;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }
    out
}

/// Decodes the single reference at the start of `text` (sans the `&`),
/// returning the decoded text and the number of input bytes consumed.
fn decode_reference(text: &str) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    if bytes.first() == Some(&b'#') {
        return decode_numeric(text);
    }
    let mut end = None;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b';' {
            end = Some(i);
            break;
        }
        if !(b.is_ascii_alphanumeric() || b >= 0x80) {
            return None;
        }
    }
    let end = end?;
    if end == 0 {
        return None;
    }
    let decoded = lookup(&text[..end])?;
    Some((decoded.to_string(), end + 1))
}

fn lookup(name: &str) -> Option<&'static str> {
    if RLM_ALIASES.contains(&name) {
        return Some("\u{200f}");
    }
    entitydata::ENTITIES.get(name).copied()
}

/// `text` starts with `#`.
fn decode_numeric(text: &str) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let (radix, digits_at) = match bytes.get(1) {
        Some(b'x') | Some(b'X') => (16, 2),
        _ => (10, 1),
    };
    let mut i = digits_at;
    let mut value: Option<u32> = Some(0);
    while i < bytes.len() && (bytes[i] as char).is_digit(radix) {
        let digit = (bytes[i] as char).to_digit(radix).unwrap();
        value = value.and_then(|v| v.checked_mul(radix)?.checked_add(digit));
        i += 1;
    }
    if i == digits_at || bytes.get(i) != Some(&b';') {
        return None;
    }
    let decoded = value
        .and_then(char::from_u32)
        .filter(|&c| is_valid_code_point(c))
        .unwrap_or(REPLACEMENT);
    Some((decoded.to_string(), i + 1))
}

/// Reports whether `c` is simultaneously legal in HTML5 and XML text.
/// U+000C is valid in HTML5 but not XML; U+000D the reverse; U+007F–U+009F
/// are disallowed in HTML5.
pub(crate) fn is_valid_code_point(c: char) -> bool {
    matches!(
        u32::from(c),
        0x09 | 0x0a | 0x20..=0x7e | 0xa0..=0xd7ff | 0xe000..=0xfffd | 0x10000..=0x10ffff
    )
}

/// Escapes an attribute value for plain HTML output.
pub(crate) fn encode_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes an attribute value with extra armoring against a later wiki
/// processing pass: templates and links expanded downstream must not be able
/// to reinterpret any part of the sanitized output as their own syntax.
pub(crate) fn safe_encode_attribute(value: &str) -> String {
    let encoded = encode_attribute(value);
    let mut out = String::with_capacity(encoded.len());
    let mut i = 0;
    while i < encoded.len() {
        let rest = &encoded[i..];
        if let Some((replacement, len)) = armor_token(rest) {
            out.push_str(replacement);
            i += len;
            continue;
        }
        if let Some(len) = protocol_len(rest) {
            // Neutralize the colon so protocol-looking text cannot be
            // linkified by downstream processing.
            for c in rest[..len].chars() {
                if c == ':' {
                    out.push_str("&#58;");
                } else {
                    out.push(c);
                }
            }
            i += len;
            continue;
        }
        let c = rest.chars().next().unwrap();
        out.push(c);
        i += c.len_utf8();
    }
    out
}

fn armor_token(s: &str) -> Option<(&'static str, usize)> {
    const ARMOR: &[(&str, &str)] = &[
        ("{", "&#123;"),
        ("}", "&#125;"),
        ("[", "&#91;"),
        ("]", "&#93;"),
        ("''", "&#39;&#39;"),
        ("ISBN", "&#73;SBN"),
        ("RFC", "&#82;FC"),
        ("PMID", "&#80;MID"),
        ("|", "&#124;"),
        ("__", "&#95;_"),
    ];
    for &(pattern, replacement) in ARMOR {
        if s.starts_with(pattern) {
            return Some((replacement, pattern.len()));
        }
    }
    None
}

/// Valid URL protocols, in the order they are tried as prefixes. The final
/// `//` admits protocol-relative URLs.
pub(crate) const URL_PROTOCOLS: &[&str] = &[
    "bitcoin:",
    "ftp://",
    "ftps://",
    "geo:",
    "git://",
    "gopher://",
    "http://",
    "https://",
    "irc://",
    "ircs://",
    "magnet:",
    "mailto:",
    "matrix:",
    "mms://",
    "news:",
    "nntp://",
    "redis://",
    "sftp://",
    "sip:",
    "sips:",
    "sms:",
    "ssh://",
    "svn://",
    "tel:",
    "telnet://",
    "urn:",
    "worldwind://",
    "xmpp:",
    "//",
];

/// Length of the URL-protocol token at the start of `s`, matched
/// case-insensitively.
fn protocol_len(s: &str) -> Option<usize> {
    URL_PROTOCOLS.iter().find_map(|p| {
        if s.len() >= p.len() && s.as_bytes()[..p.len()].eq_ignore_ascii_case(p.as_bytes()) {
            Some(p.len())
        } else {
            None
        }
    })
}

/// Escapes `id` to be a valid HTML ID attribute value. The output is not
/// guaranteed to be HTML-safe on its own and still needs attribute escaping.
pub(crate) fn escape_id(id: &str) -> String {
    // Truncate overly-long IDs. This isn't an HTML limit, just griefer
    // protection.
    let mut id = id;
    if id.len() > 1024 {
        let mut end = 1024;
        while !id.is_char_boundary(end) {
            end -= 1;
        }
        id = &id[..end];
    }
    // The HTML5 spec forbids tab, LF, FF, CR, and SPACE in IDs; wikitext can
    // produce any Unicode whitespace via entities.
    id.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Interprets `ids` as a space-delimited list of IDs and escapes each.
pub(crate) fn escape_id_reference_list(ids: &str) -> String {
    ids.split_whitespace()
        .map(escape_id)
        .collect::<Vec<_>>()
        .join(" ")
}
