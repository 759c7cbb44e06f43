//! Structured-data extraction and HTML sanitation for wiki page source.
//!
//! The crate does two jobs. [`parse_template`] and [`extract_templates`]
//! read `{{...}}` template invocations out of wiki markup, honoring
//! `[[...]]` internal links when splitting fields. [`sanitize_html`] cleans
//! embedded HTML the way the MediaWiki sanitizer does, removing comments
//! and dangerous tags and attributes and escaping everything else.
//!
//! ```
//! use wikiscrub::{extract_templates, sanitize_html};
//!
//! let page = "{{card|title=Fishing Rod|text=Gain control of a fish.}}";
//! let cards = extract_templates(page);
//! assert_eq!(cards[0].params["title"], "Fishing Rod");
//!
//! assert_eq!(
//!     sanitize_html("<b onclick=\"evil()\">ok</b><script>bad</script>"),
//!     "<b>ok</b>&lt;script&gt;bad&lt;/script&gt;",
//! );
//! ```

mod allowed;
mod attr;
mod css;
mod entity;
mod html;
mod scanner;
mod strings;
mod template;

#[cfg(test)]
mod tests;

pub use crate::entity::decode_entities;
pub use crate::html::{sanitize_html, strip_comments};
pub use crate::template::{
    extract_templates, extract_templates_with, parse_template, parse_template_with, Params,
    Template, TemplateError, TemplateOptions,
};
