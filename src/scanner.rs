//! Bracket-aware delimiter scanning.
//!
//! Wiki markup nests `[[...]]` internal links inside `|`-separated template
//! fields, so a field separator is only significant when it sits outside
//! every closed bracket pair. Two scans exist: [`next_field`] recognizes `|`
//! alone and is used once a template body has been isolated; [`next_delimiter`]
//! also recognizes the closing `}}` marker and is used while discovering
//! where an invocation ends.

/// Byte offset of the first top-level `|` or `}}` in `s`.
pub(crate) fn next_delimiter(s: &str) -> Option<usize> {
    scan(s, plain_delimiter)
}

/// Byte offset of the first top-level `|` in `s`.
pub(crate) fn next_field(s: &str) -> Option<usize> {
    scan(s, plain_field)
}

fn plain_delimiter(s: &str) -> Option<usize> {
    match (s.find('|'), s.find("}}")) {
        (Some(pipe), Some(close)) => Some(pipe.min(close)),
        (pipe, close) => pipe.or(close),
    }
}

fn plain_field(s: &str) -> Option<usize> {
    s.find('|')
}

fn scan(s: &str, plain: fn(&str) -> Option<usize>) -> Option<usize> {
    let mut base = 0;
    loop {
        let rest = &s[base..];
        let open = match rest.find("[[") {
            Some(open) => open,
            None => return plain(rest).map(|i| base + i),
        };
        if let Some(i) = plain(rest) {
            if i < open {
                return Some(base + i);
            }
        }
        match rest[open + 2..].find("]]") {
            // An unterminated bracket does not suppress delimiters after it.
            None => return plain(rest).map(|i| base + i),
            Some(close) => base += open + 2 + close + 2,
        }
    }
}
