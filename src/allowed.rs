//! The static table of attributes permitted per HTML element.

use phf::{phf_set, Set};

/// Attributes permitted on nearly every element.
static COMMON: Set<&'static str> = phf_set! {
    // HTML
    "id",
    "class",
    "style",
    "lang",
    "dir",
    "title",
    "tabindex",

    // WAI-ARIA
    "aria-describedby",
    "aria-flowto",
    "aria-hidden",
    "aria-label",
    "aria-labelledby",
    "aria-owns",
    "role",

    // RDFa, specified in section 9 of
    // https://www.w3.org/TR/2008/REC-rdfa-syntax-20081014
    "about",
    "property",
    "resource",
    "datatype",
    "typeof",

    // Microdata, specified by
    // https://html.spec.whatwg.org/multipage/microdata.html#the-microdata-model
    "itemid",
    "itemprop",
    "itemref",
    "itemscope",
    "itemtype",
};

static TABLE_CELL: Set<&'static str> = phf_set! {
    "abbr",
    "axis",
    "headers",
    "scope",
    "rowspan",
    "colspan",
    "nowrap",  // deprecated
    "width",   // deprecated
    "height",  // deprecated
    "bgcolor", // deprecated
};

#[derive(Debug, Clone, Copy)]
enum Base {
    /// Only the element-specific extras.
    Bespoke,
    Common,
    /// Common plus `align`.
    Block,
    /// Common plus `align` and `valign`.
    CommonAlign,
    /// Common plus the table alignment and cell attributes.
    CommonAlignCell,
}

/// The attribute names permitted on one element.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AllowSet {
    base: Base,
    extra: &'static [&'static str],
}

impl AllowSet {
    pub(crate) fn contains(&self, name: &str) -> bool {
        if self.extra.contains(&name) {
            return true;
        }
        match self.base {
            Base::Bespoke => false,
            Base::Common => COMMON.contains(name),
            Base::Block => name == "align" || COMMON.contains(name),
            Base::CommonAlign => matches!(name, "align" | "valign") || COMMON.contains(name),
            Base::CommonAlignCell => {
                matches!(name, "align" | "valign")
                    || TABLE_CELL.contains(name)
                    || COMMON.contains(name)
            }
        }
    }
}

/// Returns the allow-set for `element`, a lower-cased tag name.
/// Section numbers refer to the HTML 4.01 standard describing the element;
/// see <https://www.w3.org/TR/html4/>.
pub(crate) fn allowed_attributes(element: &str) -> Option<AllowSet> {
    use Base::*;
    let (base, extra): (Base, &'static [&'static str]) = match element {
        // 7.5.4
        "div" => (Block, &[]),
        "center" => (Common, &[]), // deprecated
        "span" => (Common, &[]),

        // 7.5.5
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => (Block, &[]),

        // 8.2.4
        "bdo" => (Common, &[]),

        // 9.2.1
        "em" | "strong" | "cite" | "dfn" | "code" | "samp" | "kbd" | "var" | "abbr" => {
            (Common, &[])
        }

        // 9.2.2
        "blockquote" | "q" => (Common, &["cite"]),

        // 9.2.3
        "sub" | "sup" => (Common, &[]),

        // 9.3.1
        "p" => (Block, &[]),

        // 9.3.2
        "br" => (Common, &["clear"]),

        // https://www.w3.org/TR/html5/text-level-semantics.html#the-wbr-element
        "wbr" => (Common, &[]),

        // 9.3.4
        "pre" => (Common, &["width"]),

        // 9.4
        "ins" | "del" => (Common, &["cite", "datetime"]),

        // 10.2
        "ul" => (Common, &["type"]),
        "ol" => (Common, &["type", "start", "reversed"]),
        "li" => (Common, &["type", "value"]),

        // 10.3
        "dl" | "dd" | "dt" => (Common, &[]),

        // 11.2.1
        "table" => (
            Common,
            &[
                "summary",
                "width",
                "border",
                "frame",
                "rules",
                "cellspacing",
                "cellpadding",
                "align",
                "bgcolor",
            ],
        ),

        // 11.2.2
        "caption" => (Block, &[]),

        // 11.2.3
        "thead" | "tfoot" | "tbody" => (Common, &[]),

        // 11.2.4
        "colgroup" | "col" => (Common, &["span"]),

        // 11.2.5
        "tr" => (CommonAlign, &["bgcolor"]),

        // 11.2.6
        "td" | "th" => (CommonAlignCell, &[]),

        // 12.2
        // <a> is not allowed directly, but this set is consulted by link
        // hook handlers; rel/rev especially for RDFa.
        "a" => (Common, &["href", "rel", "rev"]),

        // 13.2
        // Not usually allowed, but usable by extension-style hooks such as
        // rasterized math or explicitly enabled image tags.
        "img" => (Common, &["alt", "src", "width", "height", "srcset"]),
        "audio" => (Common, &["controls", "preload", "width", "height"]),
        "video" => (Common, &["poster", "controls", "preload", "width", "height"]),
        "source" => (Common, &["type", "src"]),
        "track" => (Common, &["type", "src", "srclang", "kind", "label"]),

        // 15.2.1
        "tt" | "b" | "i" | "big" | "small" | "strike" | "s" | "u" => (Common, &[]),

        // 15.2.2
        "font" => (Common, &["size", "color", "face"]),

        // 15.3
        "hr" => (Common, &["width"]),

        // HTML Ruby annotation text module, simple ruby only.
        // https://www.w3.org/TR/html5/text-level-semantics.html#the-ruby-element
        "ruby" | "rb" | "rp" | "rt" | "rtc" => (Common, &[]),

        // MathML root element, where used for extensions.
        "math" => (Bespoke, &["class", "style", "id", "title"]),

        // HTML5 section 4.5
        "figure" | "figcaption" => (Common, &[]),

        // HTML5 section 4.6
        "bdi" => (Common, &[]),

        // https://html.spec.whatwg.org/multipage/semantics.html#the-data-element
        "data" => (Common, &["value"]),
        "time" => (Common, &["datetime"]),
        "mark" => (Common, &[]),

        // meta and link are only valid as microdata carriers, so the common
        // attributes serve no purpose on them.
        "meta" => (Bespoke, &["itemprop", "content"]),
        "link" => (Bespoke, &["itemprop", "href", "title"]),

        // HTML5 section 4.3.5
        "aside" => (Common, &[]),

        _ => return None,
    };
    Some(AllowSet { base, extra })
}
