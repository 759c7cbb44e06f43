//! Parsing of `{{...}}` template invocations in wiki source text.

use std::error::Error;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::entity::decode_entities;
use crate::html::strip_comments;
use crate::scanner::{next_delimiter, next_field};
use crate::strings::{ends_with_ignore_ascii_case, starts_with_ignore_ascii_case};

/// The named parameters of one template invocation.
pub type Params = FxHashMap<String, String>;

/// A single template invocation: its name and named parameters.
///
/// Positional (unnamed) parameters are discarded; the templates this crate
/// targets use named parameters exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub name: String,
    pub params: Params,
}

/// The error returned when a string cannot be read as a template invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateError {
    /// The input is not a single well-delimited `{{...}}` span.
    InvalidSyntax,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::InvalidSyntax => f.write_str("invalid template syntax"),
        }
    }
}

impl Error for TemplateError {}

/// Options controlling template parsing.
#[derive(Debug, Clone, Copy)]
pub struct TemplateOptions {
    /// Rewrite `[[...]]` internal links in the body to plain text before
    /// splitting fields. `File:` links become a synthetic `image` parameter
    /// and `User:` links shed any trailing signature. When false, link
    /// markup is preserved verbatim inside parameter values.
    pub resolve_links: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        TemplateOptions {
            resolve_links: true,
        }
    }
}

/// Parses a single self-contained template invocation.
///
/// ```
/// use wikiscrub::parse_template;
///
/// let t = parse_template("{{card|title=ABC|text=DEF}}")?;
/// assert_eq!(t.name, "card");
/// assert_eq!(t.params["title"], "ABC");
/// assert_eq!(t.params["text"], "DEF");
/// # Ok::<(), wikiscrub::TemplateError>(())
/// ```
pub fn parse_template(s: &str) -> Result<Template, TemplateError> {
    parse_template_with(s, &TemplateOptions::default())
}

/// Parses a single template invocation with explicit options.
///
/// The input must start with `{{` and end with `}}`, with no further `{{`
/// or `}}` inside; locating a self-contained span in running text is
/// [`extract_templates`]' job.
pub fn parse_template_with(s: &str, options: &TemplateOptions) -> Result<Template, TemplateError> {
    let body = s
        .strip_prefix("{{")
        .and_then(|b| b.strip_suffix("}}"))
        .ok_or(TemplateError::InvalidSyntax)?;
    if body.contains("{{") || body.contains("}}") {
        return Err(TemplateError::InvalidSyntax);
    }

    let body = if options.resolve_links {
        resolve_links(body)
    } else {
        body.to_string()
    };
    let fields = split_fields(&body);

    let mut name = fields[0].trim();
    if starts_with_ignore_ascii_case(name, "Template:") {
        name = &name["Template:".len()..];
    }
    if name.is_empty() {
        return Err(TemplateError::InvalidSyntax);
    }

    let mut params = Params::default();
    for field in &fields[1..] {
        let eq = match field.find('=') {
            Some(eq) => eq,
            // A positional value; discarded.
            None => continue,
        };
        let param = field[..eq].trim();
        if param.is_empty() {
            continue;
        }
        // Last write wins for repeated names.
        params.insert(
            param.to_string(),
            decode_entities(field[eq + 1..].trim()),
        );
    }

    Ok(Template {
        name: name.to_string(),
        params,
    })
}

/// Cuts a template body into `|`-separated fields, honoring `[[...]]` spans.
fn split_fields(body: &str) -> Vec<&str> {
    if !body.contains("[[") {
        return body.split('|').collect();
    }
    let mut fields = Vec::new();
    let mut rest = body;
    while let Some(i) = next_field(rest) {
        fields.push(&rest[..i]);
        rest = &rest[i + 1..];
    }
    fields.push(rest);
    fields
}

/// Rewrites every `[[...]]` span in `body` to plain text.
///
/// `File:` links vanish from the text; those naming a recognized image file
/// reappear as a synthetic `image` field appended to the body. `User:` links
/// become the user's display text, dragging along any talk-page signature
/// and UTC timestamp that follows. Every other link becomes its display
/// text. An unterminated `[[` is kept verbatim.
fn resolve_links(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut images = String::new();
    let mut rest = body;
    loop {
        let open = match rest.find("[[") {
            Some(open) => open,
            None => {
                out.push_str(rest);
                break;
            }
        };
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let close = match after.find("]]") {
            Some(close) => close,
            None => {
                out.push_str(&rest[open..]);
                break;
            }
        };
        let inner = &after[..close];
        let mut tail = &after[close + 2..];
        if starts_with_ignore_ascii_case(inner, "File:") {
            let filename = parse_link_text(inner);
            if !filename.is_empty() {
                images.push_str("|image=");
                images.push_str(filename);
            }
        } else {
            if starts_with_ignore_ascii_case(inner, "User:") {
                tail = &tail[signature_len(tail)..];
            }
            out.push_str(parse_link_text(inner));
        }
        rest = tail;
    }
    out.push_str(&images);
    out
}

/// The display text of an internal link whose `[[`/`]]` have been stripped.
///
/// A `File:` link yields its trimmed filename only when it names a plausible
/// image file, else nothing. Any other link yields its trimmed last
/// `|`-separated field, matching the wiki pipe trick: `[[A|B]]` displays
/// `B`, `[[A]]` displays `A`.
fn parse_link_text(inner: &str) -> &str {
    if starts_with_ignore_ascii_case(inner, "File:") {
        let after = &inner["File:".len()..];
        let filename = match after.find('|') {
            Some(pipe) => &after[..pipe],
            None => after,
        }
        .trim();
        if is_image_filename(filename) {
            filename
        } else {
            ""
        }
    } else {
        match inner.rfind('|') {
            Some(pipe) => inner[pipe + 1..].trim(),
            None => inner.trim(),
        }
    }
}

fn is_image_filename(name: &str) -> bool {
    name.len() >= 5
        && [".jpg", ".png", ".gif"]
            .iter()
            .any(|ext| ends_with_ignore_ascii_case(name, ext))
}

/// Byte length of the wiki signature at the start of `s`, or 0.
///
/// A signature is a parenthesized `[[User talk:...]]` link, optionally
/// followed by a timestamp ending in `(UTC)`.
fn signature_len(s: &str) -> usize {
    let paren = match s.strip_prefix(" (") {
        Some(paren) => paren,
        None => return 0,
    };
    if !starts_with_ignore_ascii_case(paren, "[[User talk:") {
        return 0;
    }
    let close = match paren.find("]]") {
        Some(close) => close + 2,
        None => return 0,
    };
    let rest = match paren[close..].strip_prefix(')') {
        Some(rest) => rest,
        None => return 0,
    };
    let mut len = s.len() - rest.len();
    if let Some(utc) = rest.find("(UTC)") {
        let between = &rest[..utc];
        if between
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | ':' | ',' | '.'))
        {
            len += utc + "(UTC)".len();
        }
    }
    len
}

/// Extracts every parseable template invocation from running text, in order.
///
/// HTML comments are stripped first, so commented-out invocations do not
/// appear. Matching is innermost-first: each top-level `}}` is paired with
/// the nearest `{{` before it, and spans that fail to parse are skipped.
///
/// ```
/// use wikiscrub::extract_templates;
///
/// let page = "{{card|title=A}}\nprose\n{{card|title=B}}";
/// let names: Vec<_> = extract_templates(page)
///     .iter()
///     .map(|t| t.params["title"].clone())
///     .collect();
/// assert_eq!(names, ["A", "B"]);
/// ```
pub fn extract_templates(text: &str) -> Vec<Template> {
    extract_templates_with(text, &TemplateOptions::default())
}

/// Extracts every parseable template invocation with explicit options.
pub fn extract_templates_with(text: &str, options: &TemplateOptions) -> Vec<Template> {
    let text = strip_comments(text);
    let mut templates = Vec::new();
    let mut rest = text.as_str();
    while let Some(close) = next_close(rest) {
        let after = close + 2;
        if let Some(open) = rest[..close].rfind("{{") {
            if let Ok(template) = parse_template_with(&rest[open..after], options) {
                templates.push(template);
            }
        }
        rest = &rest[after..];
    }
    templates
}

/// Byte offset of the first top-level `}}`, skipping `|` hits.
fn next_close(s: &str) -> Option<usize> {
    let mut base = 0;
    loop {
        let i = base + next_delimiter(&s[base..])?;
        if s[i..].starts_with("}}") {
            return Some(i);
        }
        base = i + 1;
    }
}
