//! Small string helpers shared across the crate.

/// Collapses every run of ASCII whitespace in `s` to a single space.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_ascii_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

pub(crate) fn starts_with_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

pub(crate) fn ends_with_ignore_ascii_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.as_bytes()[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse() {
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("a b"), "a b");
        assert_eq!(collapse_whitespace("a \t\n b"), "a b");
        assert_eq!(collapse_whitespace("  a  "), " a ");
    }

    #[test]
    fn prefix_suffix() {
        assert!(starts_with_ignore_ascii_case("Template:Card", "template:"));
        assert!(!starts_with_ignore_ascii_case("Templ", "template:"));
        assert!(ends_with_ignore_ascii_case("pic.PNG", ".png"));
        assert!(!ends_with_ignore_ascii_case("png", ".png"));
    }
}
