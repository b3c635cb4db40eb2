use dsl_sentence::completion::NoEnumerations;
use dsl_sentence::element::{Element, extract, parse};
use dsl_sentence::error::SentenceError;
use dsl_sentence::placeholder::Placeholder;

fn values(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn labels(elements: &[Element]) -> Vec<String> {
    elements
        .iter()
        .map(|e| match e {
            Element::Label(text) => format!("Label({text})"),
            Element::LineBreak => "LineBreak".to_string(),
            Element::TextField(f) => format!("Text({})", f.text()),
            Element::Dropdown(d) => format!("Dropdown({})", d.value()),
            Element::Toggle(t) => format!("Toggle({})", t.checked()),
            Element::DateControl(d) => format!("Date({})", d.text()),
        })
        .collect()
}

#[test]
fn no_placeholders_is_one_label() {
    for definition in ["There is a Person", "", "closing } only", r"with \n escape"] {
        let elements = parse(definition, &[], &NoEnumerations).expect("parse ok");
        assert_eq!(elements.len(), 1, "{definition}");
        assert_eq!(labels(&elements), vec![format!("Label({definition})")]);
        assert!(extract(&elements).is_empty());
    }
}

#[test]
fn free_text_scenario() {
    let elements = parse("Age is {age}", &values(&["42"]), &NoEnumerations).unwrap();
    // the trailing run is emitted even when empty
    assert_eq!(labels(&elements), vec!["Label(Age is )", "Text(42)", "Label()"]);
    assert_eq!(extract(&elements), vec!["42"]);
}

#[test]
fn leading_placeholder_gets_empty_label() {
    let elements = parse("{a} and {b}", &values(&["x", "y"]), &NoEnumerations).unwrap();
    assert_eq!(
        labels(&elements),
        vec!["Label()", "Text(x)", "Label( and )", "Text(y)", "Label()"]
    );
}

#[test]
fn line_breaks_between_placeholders() {
    let elements = parse(r"{a}A\nB{b}", &values(&["1", "2"]), &NoEnumerations).unwrap();
    assert_eq!(
        labels(&elements),
        vec!["Label()", "Text(1)", "Label(A)", "LineBreak", "Label(B)", "Text(2)", "Label()"]
    );
    // a real newline is label text, not a row break
    let elements = parse("{a}A\nB", &values(&["1"]), &NoEnumerations).unwrap();
    assert_eq!(labels(&elements), vec!["Label()", "Text(1)", "Label(A\nB)"]);
}

#[test]
fn round_trip_without_edits() {
    let definition = r"When {who} aged {age:[0-9]+}\nis {flag:BOOLEAN:checked} since {when:DATE:dd-MMM-yyyy}";
    let seeded = values(&["Bob", "42", "false", "15-Mar-2024"]);
    let elements = parse(definition, &seeded, &NoEnumerations).unwrap();
    assert_eq!(extract(&elements), seeded);
}

#[test]
fn classification_precedence() {
    assert_eq!(
        Placeholder::classify("x:ENUM:Type.field").unwrap(),
        Placeholder::Enum { tag: "ENUM".into(), fact_type: "Type".into(), field: "field".into() }
    );
    assert_eq!(Placeholder::classify("x:foo").unwrap(), Placeholder::Text { pattern: "foo".into() });
    assert_eq!(Placeholder::classify("x").unwrap(), Placeholder::FreeText);
    // tags win over everything else in the text
    assert!(matches!(
        Placeholder::classify("x:[0-9]:DATE:yyyy").unwrap(),
        Placeholder::Date { format } if format == "yyyy"
    ));
    assert!(matches!(
        Placeholder::classify("x:a:b:BOOLEAN:true").unwrap(),
        Placeholder::Boolean { .. }
    ));
    // only the first colon separates the pattern
    assert_eq!(
        Placeholder::classify("t:[0-9]{2}:[0-9]{2}").unwrap(),
        Placeholder::Text { pattern: "[0-9]{2}:[0-9]{2}".into() }
    );
    assert_eq!(
        Placeholder::classify("x:FOO:Bar.baz").unwrap(),
        Placeholder::Enum { tag: "FOO".into(), fact_type: "Bar".into(), field: "baz".into() }
    );
}

#[test]
fn too_few_values_is_fatal() {
    let err = parse("{a} {b} {c}", &values(&["1", "2"]), &NoEnumerations).unwrap_err();
    match err {
        SentenceError::MissingValue { index, available } => {
            assert_eq!(index, 2);
            assert_eq!(available, 2);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn unbalanced_brace_is_fatal() {
    let err = parse("Age is {age", &values(&["42"]), &NoEnumerations).unwrap_err();
    assert!(matches!(err, SentenceError::Parse { .. }));
    assert!(err.is_parse());
}

#[test]
fn invalid_pattern_is_fatal() {
    let err = parse("{x:[0-9}", &values(&["1"]), &NoEnumerations).unwrap_err();
    assert!(matches!(err, SentenceError::Pattern { .. }), "{err}");
}

#[test]
fn look_around_and_backreferences_are_rejected() {
    for definition in [r"{x:(?=\d)\d+}", r"{x:(a)\1}"] {
        let err = parse(definition, &values(&["1"]), &NoEnumerations).unwrap_err();
        assert!(matches!(err, SentenceError::Pattern { .. }), "{definition}: {err}");
    }
}
