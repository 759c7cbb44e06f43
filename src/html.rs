//! HTML cleanup for wiki page text.

use phf::{phf_set, Set};

use crate::attr::{decode_tag_attributes, fix_tag_attributes, AttrValue};

/// Every tag that may appear in sanitized output, whether as a lone tag or
/// as a pair.
static HTML_ELEMENTS: Set<&'static str> = phf_set! {
    "abbr", "b", "bdi", "bdo", "big", "blockquote", "br", "caption", "center",
    "cite", "code", "data", "dd", "del", "dfn", "div", "dl", "dt", "em",
    "font", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "ins", "kbd", "li",
    "link", "mark", "meta", "ol", "p", "pre", "q", "rb", "rp", "rt", "rtc",
    "ruby", "s", "samp", "small", "span", "strike", "strong", "sub", "sup",
    "table", "td", "th", "time", "tr", "tt", "u", "ul", "var", "wbr",
};

/// Tags that can be self-closed. For tags not also in [`HTML_SINGLE_ONLY`],
/// a self-closed tag is emitted as an empty element.
static HTML_SINGLE: Set<&'static str> = phf_set! {
    "br", "wbr", "hr", "li", "dt", "dd", "meta", "link",
};

/// Elements that cannot have close tags.
static HTML_SINGLE_ONLY: Set<&'static str> = phf_set! {
    "br", "wbr", "hr", "meta", "link",
};

/// Cleans up HTML in `text`: removes comments, removes dangerous tags and
/// attributes, and escapes invalid tags.
///
/// ```
/// use wikiscrub::sanitize_html;
///
/// assert_eq!(
///     sanitize_html(r#"<span style="color:red" onclick="evil()">hi</span>"#),
///     r#"<span style="color:red">hi</span>"#,
/// );
/// assert_eq!(sanitize_html("<script>alert(1)</script>"),
///            "&lt;script&gt;alert(1)&lt;/script&gt;");
/// ```
pub fn sanitize_html(text: &str) -> String {
    let text = strip_comments(text);
    let mut chunks = text.split('<');
    let mut out = String::with_capacity(text.len());
    if let Some(head) = chunks.next() {
        out.push_str(&head.replace('>', "&gt;"));
    }

    for chunk in chunks {
        let tag = match parse_tag_chunk(chunk) {
            Some(tag) => tag,
            None => {
                push_escaped(&mut out, chunk);
                continue;
            }
        };
        let name = tag.name.to_lowercase();
        if !HTML_ELEMENTS.contains(&name) || !validate_tag(tag.attrs, &name) {
            push_escaped(&mut out, chunk);
            continue;
        }

        let attrs = fix_tag_attributes(tag.attrs, &name);

        let closer = if !tag.self_close {
            ">".to_string()
        } else if HTML_SINGLE_ONLY.contains(&name) {
            "/>".to_string()
        } else if HTML_SINGLE.contains(&name) {
            // Interpret a self-closed pair tag as an empty element, even
            // where HTML5 would read a plain start tag.
            format!("></{}>", name)
        } else {
            ">".to_string()
        };

        out.push('<');
        if tag.close {
            out.push('/');
        }
        out.push_str(&name);
        out.push_str(&attrs);
        out.push_str(&closer);
        out.push_str(&tag.rest.replace('>', "&gt;"));
    }
    out
}

/// The pieces of one `<`-split chunk that looks like a tag.
struct TagChunk<'a> {
    close: bool,
    name: &'a str,
    attrs: &'a str,
    self_close: bool,
    rest: &'a str,
}

/// Splits a chunk into slash, tag name, attribute text, closer, and trailing
/// text. Returns `None` when the chunk cannot be read as a tag at all.
fn parse_tag_chunk(chunk: &str) -> Option<TagChunk<'_>> {
    let bytes = chunk.as_bytes();
    let mut i = 0;
    let close = bytes.first() == Some(&b'/');
    if close {
        i += 1;
    }
    if !bytes.get(i).map_or(false, u8::is_ascii_alphabetic) {
        return None;
    }
    let name_start = i;
    while i < bytes.len()
        && !bytes[i].is_ascii_whitespace()
        && !matches!(bytes[i], b'/' | b'>' | b'\0')
    {
        i += 1;
    }
    let name = &chunk[name_start..i];

    // The tag ends at the first `>`; a `/` immediately before it marks a
    // self-closed tag.
    let gt = chunk[i..].find('>').map(|at| i + at)?;
    let self_close = gt > i && bytes[gt - 1] == b'/';
    let attrs_end = if self_close { gt - 1 } else { gt };
    Some(TagChunk {
        close,
        name,
        attrs: &chunk[i..attrs_end],
        self_close,
        rest: &chunk[gt + 1..],
    })
}

fn push_escaped(out: &mut String, chunk: &str) {
    out.push_str("&lt;");
    out.push_str(&chunk.replace('>', "&gt;"));
}

/// Reports whether a tag is allowed to be present at all. This does not
/// validate the attributes themselves; it only handles elements that are
/// allowed in content solely when specific attributes are set.
fn validate_tag(attrs_text: &str, element: &str) -> bool {
    if element != "meta" && element != "link" {
        return true;
    }
    let attrs = decode_tag_attributes(attrs_text);
    let set = |name: &str| attrs.get(name).map_or(false, AttrValue::is_non_empty);
    match element {
        "meta" => set("itemprop") && set("content"),
        _ => set("itemprop") && set("href"),
    }
}

/// Removes HTML comments from `text`. If a comment is preceded and followed
/// by a newline (ignoring spaces), the spaces and one of the newlines go
/// with it.
pub fn strip_comments(text: &str) -> String {
    let mut s = text.to_string();
    loop {
        let open = match s.find("<!--") {
            Some(open) => open,
            None => break,
        };
        let close = match s[open..].find("-->") {
            Some(close) => open + close + 3,
            None => break,
        };
        let bytes = s.as_bytes();
        let mut lead = open;
        while lead > 0 && bytes[lead - 1] == b' ' {
            lead -= 1;
        }
        let mut trail = close;
        while trail < bytes.len() && bytes[trail] == b' ' {
            trail += 1;
        }
        if lead > 0 && bytes[lead - 1] == b'\n' && trail < bytes.len() && bytes[trail] == b'\n' {
            s = format!("{}\n{}", &s[..lead - 1], &s[trail + 1..]);
        } else {
            s = format!("{}{}", &s[..open], &s[close..]);
        }
    }
    s
}
