use pretty_assertions::assert_eq;

use crate::sanitize_html;

mod css;
mod html;
mod scanner;

#[track_caller]
fn sanitized(input: &str, expected: &str) {
    assert_eq!(sanitize_html(input), expected, "input: {:?}", input);
}

#[track_caller]
fn sanitize_stable(input: &str) {
    let once = sanitize_html(input);
    assert_eq!(sanitize_html(&once), once, "input: {:?}", input);
}

macro_rules! params {
    ($($name:literal => $value:literal),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::Params::default();
        $(map.insert($name.to_string(), $value.to_string());)*
        map
    }};
}

pub(crate) use params;
