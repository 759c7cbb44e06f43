//! Tokenization, validation, and re-serialization of tag attributes.

use rustc_hash::FxHashMap;

use crate::allowed::allowed_attributes;
use crate::css::check_css;
use crate::entity::{
    decode_entities, escape_id, escape_id_reference_list, safe_encode_attribute, URL_PROTOCOLS,
};
use crate::strings::{collapse_whitespace, starts_with_ignore_ascii_case};

/// A decoded attribute value. HTML5 permits attributes with no value at all;
/// XHTML does not, and validation treats the two differently, so the
/// distinction is kept explicit rather than collapsed to an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrValue {
    /// An `=` was present, possibly with an empty value.
    Text(String),
    /// A bare name with no `=`.
    Bare,
}

impl AttrValue {
    pub(crate) fn is_non_empty(&self) -> bool {
        matches!(self, AttrValue::Text(v) if !v.is_empty())
    }
}

/// Decodes a partial tag string into a map of attribute names and values.
///
/// Names are lower-cased; names that are not valid XML-style attribute names
/// are dropped silently. Values may be double-quoted, single-quoted (either
/// unterminated at end of input), or unquoted; whitespace runs collapse to a
/// single space and character references are decoded.
pub(crate) fn decode_tag_attributes(text: &str) -> FxHashMap<String, AttrValue> {
    let mut attrs = FxHashMap::default();
    if text.trim().is_empty() {
        return attrs;
    }
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        // A name starts at any character other than whitespace or `/`.
        if bytes[i].is_ascii_whitespace() || bytes[i] == b'/' {
            i += 1;
            continue;
        }
        let name_start = i;
        // The first character is consumed unconditionally, even `=`.
        i += 1;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'/'
            && bytes[i] != b'='
        {
            i += 1;
        }
        let name = text[name_start..i].to_lowercase();

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let mut value = AttrValue::Bare;
        if j < bytes.len() && bytes[j] == b'=' {
            j += 1;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            let raw = if j < bytes.len() && (bytes[j] == b'"' || bytes[j] == b'\'') {
                let quote = bytes[j];
                j += 1;
                let start = j;
                while j < bytes.len() && bytes[j] != quote {
                    j += 1;
                }
                let raw = &text[start..j];
                if j < bytes.len() {
                    j += 1;
                }
                raw
            } else {
                let start = j;
                while j < bytes.len() && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                    j += 1;
                }
                &text[start..j]
            };
            value = AttrValue::Text(decode_entities(&collapse_whitespace(raw)));
            i = j;
        }

        if is_valid_attribute_name(&name) {
            attrs.insert(name, value);
        }
    }
    attrs
}

fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if matches!(c, ':' | '_') || c.is_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| matches!(c, ':' | '_' | '.' | '-') || c.is_alphanumeric())
}

/// Normalizes an element's raw attribute text to well-formed XML, discarding
/// unwanted attributes. The result is either empty or begins with a space.
pub(crate) fn fix_tag_attributes(text: &str, element: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let attrs = validate_tag_attributes(decode_tag_attributes(text), element);
    encode_tag_attributes(&attrs)
}

/// Normalizes attribute values and discards illegal and unsafe attributes
/// for `element`.
pub(crate) fn validate_tag_attributes(
    attrs: FxHashMap<String, AttrValue>,
    element: &str,
) -> FxHashMap<String, String> {
    let allowed = allowed_attributes(element);
    let mut out = FxHashMap::default();
    for (name, value) in attrs {
        let value = match value {
            AttrValue::Text(value) => value,
            // In XHTML, attributes must have a value.
            AttrValue::Bare => continue,
        };

        // Any attribute beginning with "data-" is allowed, except those
        // reserved for the wiki software's own use; banning colons keeps the
        // name un-namespaced.
        let in_allow_set = allowed.map_or(false, |set| set.contains(&name));
        if (!is_data_attribute(&name) && !in_allow_set) || is_reserved_data_attribute(&name) {
            continue;
        }

        let value = match name.as_str() {
            // Strip JavaScript "expression" and friends from stylesheets.
            "style" => check_css(&value),
            "id" => escape_id(&value),
            "aria-describedby" | "aria-flowto" | "aria-labelledby" | "aria-owns" => {
                escape_id_reference_list(&value)
            }
            // Paranoia: allow simple values but suppress javascript on the
            // RDFa and microdata attributes.
            "rel" | "rev" | "about" | "property" | "resource" | "datatype" | "typeof"
            | "itemid" | "itemprop" | "itemref" | "itemscope" | "itemtype" => {
                if has_evil_uri(&value) {
                    continue;
                }
                value
            }
            // Even though elements using href/src are not allowed directly,
            // the validation is supplied for tag hook handlers. Dropping
            // non-allowed protocols also drops all relative URLs.
            "href" | "src" | "poster" => {
                if !is_allowed_href(&value) {
                    continue;
                }
                value
            }
            // Only tabindex 0 is useful for accessibility.
            "tabindex" => {
                if value != "0" {
                    continue;
                }
                value
            }
            _ => value,
        };
        out.insert(name, value);
    }

    // itemtype, itemid, itemref don't make sense without itemscope.
    if out.get("itemscope").map_or(true, String::is_empty) {
        out.remove("itemtype");
        out.remove("itemid");
        out.remove("itemref");
    }

    out
}

fn is_data_attribute(name: &str) -> bool {
    starts_with_ignore_ascii_case(name, "data-") && !name[5..].contains(':')
}

fn is_reserved_data_attribute(name: &str) -> bool {
    ["data-ooui", "data-mw", "data-parsoid"]
        .iter()
        .any(|reserved| starts_with_ignore_ascii_case(name, reserved))
}

/// Screens for evil URIs like `javascript:`.
///
/// WARNING: not usable anywhere that actually requires denying certain URIs
/// for security; there are numerous ways to bypass pattern-based deny lists.
fn has_evil_uri(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut from = 0;
    loop {
        let (at, len) = match (lower[from..].find("javascript"), lower[from..].find("vbscript")) {
            (Some(a), Some(b)) if b < a => (from + b, 8),
            (Some(a), _) => (from + a, 10),
            (_, Some(b)) => (from + b, 8),
            (None, None) => return false,
        };
        if boundary_before(bytes, at) && boundary_after(bytes, at + len) {
            return true;
        }
        from = at + 1;
    }
}

fn boundary_before(bytes: &[u8], i: usize) -> bool {
    i == 0 || bytes[i - 1].is_ascii_whitespace() || (i >= 2 && &bytes[i - 2..i] == b"*/")
}

fn boundary_after(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i) {
        None => true,
        Some(&b) => !(b.is_ascii_alphanumeric() || b == b'_'),
    }
}

/// Reports whether `value` is an allowed protocol (case-sensitively)
/// followed by at least one character, with no whitespace anywhere.
fn is_allowed_href(value: &str) -> bool {
    let protocol = match URL_PROTOCOLS.iter().find(|p| value.starts_with(**p)) {
        Some(protocol) => protocol,
        None => return false,
    };
    value.len() > protocol.len() && !value.bytes().any(|b| b.is_ascii_whitespace())
}

/// Builds a partial tag string from a validated attribute map. Names are
/// sorted so output is reproducible.
pub(crate) fn encode_tag_attributes(attrs: &FxHashMap<String, String>) -> String {
    let mut names: Vec<&String> = attrs.keys().collect();
    names.sort();
    let mut out = String::new();
    for name in names {
        out.push(' ');
        out.push_str(&escape_attribute_name(name));
        out.push_str("=\"");
        out.push_str(&safe_encode_attribute(&attrs[name]));
        out.push('"');
    }
    out
}

fn escape_attribute_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}
