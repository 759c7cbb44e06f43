use pretty_assertions::assert_eq;

use super::{sanitize_stable, sanitized};
use crate::strip_comments;

#[test]
fn passthrough_and_escaping() {
    sanitized("", "");
    sanitized("abc", "abc");
    sanitized("a > b", "a &gt; b");
    sanitized("<b>", "<b>");
    sanitized("<b>abc</b>", "<b>abc</b>");
    sanitized("<br>", "<br>");
    sanitized("<br/>", "<br/>");
    sanitized("<opponent>", "&lt;opponent&gt;");
    sanitized("<card title>", "&lt;card title&gt;");
    sanitized("<card  title   >", "&lt;card  title   &gt;");
    sanitized("<target opponent>", "&lt;target opponent&gt;");
    sanitized(
        "Destroy target Thing.<br>Draw a card.",
        "Destroy target Thing.<br>Draw a card.",
    );
    sanitized(
        "Replace <metal> with the type of metal",
        "Replace &lt;metal&gt; with the type of metal",
    );
    sanitized("<b", "&lt;b");
    sanitized("<<b>", "&lt;<b>");
    sanitized(
        "<SCRIPT>alert(1)</SCRIPT>",
        "&lt;SCRIPT&gt;alert(1)&lt;/SCRIPT&gt;",
    );
}

#[test]
fn quote_normalization() {
    for input in [
        "<font color=FFD700>Golden Text</font>",
        "<font color='FFD700'>Golden Text</font>",
        "<font color=\"FFD700\">Golden Text</font>",
    ] {
        sanitized(input, "<font color=\"FFD700\">Golden Text</font>");
    }
}

#[test]
fn case_folding() {
    sanitized("<B>abc</B>", "<b>abc</b>");
    sanitized("<SPAN CLASS=\"x\">y</SPAN>", "<span class=\"x\">y</span>");
}

#[test]
fn attribute_filtering() {
    sanitized("<b onclick=\"evil()\">x</b>", "<b>x</b>");
    sanitized(
        "<span style=\"color:red\">x</span>",
        "<span style=\"color:red\">x</span>",
    );
    sanitized(
        "<span style=\"width:expression(alert(1))\">x</span>",
        "<span style=\"/* insecure input */\">x</span>",
    );
    // A valueless attribute is not well-formed XML and is dropped.
    sanitized("<td nowrap>x</td>", "<td>x</td>");
    sanitized("<td nowrap=\"nowrap\">x</td>", "<td nowrap=\"nowrap\">x</td>");
}

#[test]
fn self_closing_fixups() {
    sanitized("<b/>x", "<b>x");
    sanitized("<div/>x", "<div>x");
    sanitized("<li/>x", "<li></li>x");
    sanitized("<dd/>x", "<dd></dd>x");
    sanitized("<br/>x", "<br/>x");
    sanitized("<hr/>x", "<hr/>x");
}

#[test]
fn microdata_gates() {
    sanitized("<meta>", "&lt;meta&gt;");
    sanitized("<meta itemprop=\"a\">", "&lt;meta itemprop=\"a\"&gt;");
    sanitized(
        "<meta itemprop=\"a\" content=\"b\">",
        "<meta content=\"b\" itemprop=\"a\">",
    );
    sanitized("<link itemprop=\"a\">", "&lt;link itemprop=\"a\"&gt;");
    sanitized(
        "<link itemprop=\"a\" href=\"http://example.com/\">",
        "<link href=\"http&#58;//example.com/\" itemprop=\"a\">",
    );
}

#[test]
fn armored_attribute_values() {
    sanitized(
        "<span title=\"[[x]]\">y</span>",
        "<span title=\"&#91;&#91;x&#93;&#93;\">y</span>",
    );
    sanitized(
        "<span title=\"a|b\">y</span>",
        "<span title=\"a&#124;b\">y</span>",
    );
}

#[test]
fn comments_removed() {
    sanitized("a<!-- <script>bad</script> -->b", "ab");
    sanitized("abc\n<!--comment-->\n", "abc\n");
}

#[test]
fn idempotent() {
    for input in [
        "",
        "plain text",
        "<b>abc</b>",
        "<opponent>",
        "a > b < c",
        "<font color=FFD700>Golden</font>",
        "<span style=\"width:expression(alert(1))\">x</span>",
        "<span title=\"[[x]]|ISBN\">y</span>",
        "<meta itemprop=\"a\" content=\"b\">",
        "<li/><br/><b/>",
        "<a href=\"javascript:alert(1)\">x</a>",
        "&lt;already&gt; escaped &amp; fine",
        "<!-- comment --><b>x</b>",
    ] {
        sanitize_stable(input);
    }
}

#[test]
fn comment_stripping() {
    for (s, want) in [
        ("", ""),
        ("a", "a"),
        ("<!--", "<!--"),
        ("-->", "-->"),
        ("<!---->", ""),
        ("<!--comment", "<!--comment"),
        ("<!--comment-->", ""),
        ("abc<!--comment-->", "abc"),
        ("abc <!--comment--> def", "abc  def"),
        ("abc\n<!--comment-->", "abc\n"),
        ("abc\n<!--comment-->\n", "abc\n"),
        ("abc\n <!--comment--> ", "abc\n  "),
        ("abc \n   <!--comment-->   \n  def", "abc \n  def"),
    ] {
        assert_eq!(strip_comments(s), want, "input: {:?}", s);
    }
}
