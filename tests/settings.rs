use dsl_sentence::completion::EnumResolver;
use dsl_sentence::settings::Settings;

#[test]
fn defaults_without_a_file() {
    let settings = Settings::load("definitely/not/here/dsl_sentence.toml").expect("missing file is fine");
    assert!(settings.enumerations.is_empty());
    assert!(settings.resolver().is_empty());
    assert!(!settings.listen.is_empty());
}

#[test]
fn enumerations_from_toml() {
    let settings = Settings::from_toml(
        r#"
        listen = "0.0.0.0:9000"
        log_filter = "debug"

        [[enumerations]]
        fact_type = "Person"
        field = "gender"
        values = ["M=Male", "F=Female"]

        [[enumerations]]
        fact_type = "Person"
        field = "hair"
        "#,
    )
    .unwrap();
    assert_eq!(settings.listen, "0.0.0.0:9000");
    assert_eq!(settings.log_filter, "debug");
    let resolver = settings.resolver();
    assert_eq!(resolver.len(), 2);
    assert_eq!(
        resolver.enum_values("Person", "gender"),
        Some(vec!["M=Male".to_string(), "F=Female".to_string()])
    );
    assert_eq!(resolver.enum_values("Person", "hair"), Some(vec![]));
    assert_eq!(resolver.enum_values("Person", "eyes"), None);
}

#[test]
fn closures_resolve_enumerations() {
    let lookup = |fact_type: &str, field: &str| -> Option<Vec<String>> {
        (fact_type == "Car" && field == "make").then(|| vec!["vw=Volkswagen".to_string()])
    };
    assert_eq!(lookup.enum_values("Car", "make").unwrap().len(), 1);
    assert!(lookup.enum_values("Car", "model").is_none());
}
