use pretty_assertions::assert_eq;

use crate::scanner::{next_delimiter, next_field};

#[test]
fn delimiters() {
    for (s, want) in [
        ("", None),
        ("[[", None),
        ("]]", None),
        ("|", Some(0)),
        ("}}", Some(0)),
        (" |", Some(1)),
        (" }}", Some(1)),
        ("Action}}", Some(6)),
        ("Action|longtext=true}}", Some(6)),
        ("[[Dvorak]]", None),
        ("[[Dvorak]]}}", Some(10)),
        ("[[Dvorak]]|longtext=true}}", Some(10)),
        ("[[User:ABC|ABC]]", None),
        ("[[User:ABC|ABC}}", Some(10)),
        ("[[User:ABC|ABC]]}}", Some(16)),
        ("[[User:ABC|ABC]]|longtext=true}}", Some(16)),
        ("[[User:ABC|ABC]], [[User:DEF|DEF]], and others", None),
        ("[[|]], [[|]]}}", Some(12)),
        ("[[|]], [[|]}}", Some(9)),
        ("Action|creator=[[User:ABC|ABC]]}}", Some(6)),
    ] {
        assert_eq!(next_delimiter(s), want, "input: {:?}", s);
    }
}

#[test]
fn fields() {
    for (s, want) in [
        ("", None),
        ("}}", None),
        ("title=ABC", None),
        ("title=ABC|text=DEF", Some(9)),
        ("[[A|B]]", None),
        ("[[A|B]]|x", Some(7)),
        ("[[A|B", Some(3)),
        ("x|[[A|B]]", Some(1)),
    ] {
        assert_eq!(next_field(s), want, "input: {:?}", s);
    }
}
