use pretty_assertions::assert_eq;

use crate::css::{check_css, normalize_css};

#[test]
fn benign_values_pass() {
    for value in [
        "",
        "color: red",
        "font-weight: bold; text-align: center",
        "background-color: #ffd700",
    ] {
        assert_eq!(check_css(value), value, "input: {:?}", value);
    }
}

#[test]
fn problematic_keywords() {
    for value in [
        "width: expression(alert(1))",
        "width:  eXpReSsIoN(alert(1))",
        "behavior: url(#default#time2)",
        "background: image( 'x.png' )",
        "background: image-set('x.png' 1x)",
        "accelerator : x",
        "-o-link: x",
        "-o-link-source: x",
        "-o-replace: x",
        "content: attr(title, url(x))",
        "content: attr(title url)",
    ] {
        assert_eq!(check_css(value), "/* insecure input */", "input: {:?}", value);
    }
    assert_eq!(check_css("content: attr(title)"), "content: attr(title)");
}

#[test]
fn encoded_keywords_are_decoded_first() {
    // A character reference hiding a keyword.
    assert_eq!(
        check_css("width: expr&#101;ssion(alert(1))"),
        "/* insecure input */",
    );
    // A CSS escape hiding a keyword.
    assert_eq!(
        check_css("width: \\65 xpression(alert(1))"),
        "/* insecure input */",
    );
}

#[test]
fn control_characters() {
    assert_eq!(check_css("color: re\u{0}d"), "/* invalid control char */");
    assert_eq!(check_css("color: re\u{7f}d"), "/* invalid control char */");
    // References to invalid code points decode to the replacement character.
    assert_eq!(check_css("color: re&#0;d"), "/* invalid control char */");
}

#[test]
fn comment_flattening() {
    assert_eq!(normalize_css("a/*x*/b"), "a b");
    assert_eq!(normalize_css("a/*x*/b/*y*/c"), "a b c");
    // A dangling comment start truncates the rest.
    assert_eq!(normalize_css("a/*b"), "a");
    // A lone well-formed comment passes through whole.
    assert_eq!(normalize_css("/* insecure input */"), "/* insecure input */");
}

#[test]
fn escape_decoding() {
    // Hex escapes decode, consuming one trailing whitespace character.
    assert_eq!(normalize_css("\\65 xpression"), "expression");
    // A non-hex character ends the digit run without being consumed.
    assert_eq!(normalize_css("\\65xpression"), "expression");
    // Up to six hex digits are absorbed.
    assert_eq!(normalize_css("\\65e"), "\u{65e}");
    assert_eq!(normalize_css("\\65 e"), "ee");
    // Line continuations vanish.
    assert_eq!(normalize_css("a\\\nb"), "ab");
    // A backslash cancelling an ordinary character yields that character.
    assert_eq!(normalize_css("a\\;b"), "a;b");
    // Characters special inside strings come back in canonical hex form.
    assert_eq!(normalize_css("a\\\"b"), "a\\22 b");
    // A trailing backslash is doubled into a complete escape.
    assert_eq!(normalize_css("a\\"), "a\\\\");
}
