use super::*;
use std::collections::BTreeMap;

fn helpers() -> Helpers {
    Helpers::new(
        "http://localhost:8000",
        "http://localhost:8000/public/static/logo.svg",
        Translations::new(BTreeMap::from([(
            "email.optin.confirmSub".to_string(),
            "Confirm subscription".to_string(),
        )])),
    )
}

fn render(template: &str) -> Result<String, Error> {
    let mut env = Environment::new();
    helpers().register(&mut env);
    env.render_str(template, ())
}

#[test]
fn test_translation_method() {
    assert_eq!(
        render(r#"{{ L.Ts("email.optin.confirmSub") }}"#).unwrap(),
        "Confirm subscription"
    );
    assert_eq!(render(r#"{{ L.T("email.unknown") }}"#).unwrap(), "email.unknown");
}

#[test]
fn test_translation_call_form() {
    assert_eq!(
        render(r#"{{ L().Ts("email.optin.confirmSub") }}"#).unwrap(),
        "Confirm subscription"
    );
    assert_eq!(render(r#"{{ t("other.key") }}"#).unwrap(), "other.key");
}

#[test]
fn test_translation_unknown_method() {
    assert!(render(r#"{{ L.Missing("x") }}"#).is_err());
}

#[test]
fn test_url_accessors() {
    assert_eq!(render("{{ RootURL() }}").unwrap(), "http://localhost:8000");
    assert_eq!(
        render("{{ LogoURL() }}").unwrap(),
        "http://localhost:8000/public/static/logo.svg"
    );
}

#[test]
fn test_safe_passthrough() {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::Html);
    helpers().register(&mut env);
    let out = env
        .render_str(r#"{{ Safe("<b>x</b>") }}|{{ "<b>x</b>" }}"#, ())
        .unwrap();
    assert!(out.starts_with("<b>x</b>|"));
    assert!(out.contains("&lt;b&gt;x&lt;"));
}

#[test]
fn test_case_folding() {
    assert_eq!(render(r#"{{ ToUpper("john") }}"#).unwrap(), "JOHN");
    assert_eq!(render(r#"{{ ToLower("JOHN") }}"#).unwrap(), "john");
    assert_eq!(render(r#"{{ "john" | upper }}"#).unwrap(), "JOHN");
}

#[test]
fn test_upper_lower_callable_as_functions() {
    assert_eq!(
        render(r#"{{ upper("john") }}|{{ lower("JOHN") }}"#).unwrap(),
        "JOHN|john"
    );
    assert_eq!(render(r#"{{ "Mixed" | lower }}"#).unwrap(), "mixed");
}

#[test]
fn test_eq_ne_same_kind() {
    let check = |cond: &str| {
        render(&format!("{{% if {cond} %}}yes{{% else %}}no{{% endif %}}")).unwrap()
    };
    assert_eq!(check(r#"eq("a", "a")"#), "yes");
    assert_eq!(check(r#"ne("a", "b")"#), "yes");
    assert_eq!(check("eq(1, 1.0)"), "yes");
    assert_eq!(check("eq(true, false)"), "no");
    assert_eq!(check(r#"ne("public", "public")"#), "no");
}

#[test]
fn test_eq_rejects_mixed_kinds() {
    let err = render(r#"{{ eq("1", 1) }}"#).unwrap_err();
    assert!(err.to_string().contains("cannot compare string with number"));
}

#[test]
fn test_eq_rejects_non_scalars() {
    assert!(render("{{ eq([1], [1]) }}").is_err());
    assert!(render("{{ ne(none, 1) }}").is_err());
}

#[test]
fn test_scalar_equals() {
    assert!(Scalar::Int(2).equals(&Scalar::Float(2.0)).unwrap());
    assert!(Scalar::Bool(true).equals(&Scalar::Int(1)).is_err());
}

#[test]
fn test_date_and_unix_time() {
    assert_eq!(
        render(r#"{{ Date("2024-01-15T09:30:00Z") }}"#).unwrap(),
        "2024-01-15 09:30"
    );
    assert_eq!(render(r#"{{ Date("soon") }}"#).unwrap(), "soon");
    assert_eq!(
        render(r#"{{ UnixTime("1970-01-01T00:01:00Z") }}"#).unwrap(),
        "60"
    );
    assert_eq!(render(r#"{{ UnixTime("not a date") }}"#).unwrap(), "0");
}
