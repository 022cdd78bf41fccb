use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("cache: false").unwrap();
    assert_eq!(config.template_dir, "static/email-templates");
    assert_eq!(config.extension, "html");
    assert_eq!(config.layouts, vec!["base".to_string()]);
    assert_eq!(
        config.aliases.get("subscriber-optin-campaign").map(String::as_str),
        Some("optin-campaign")
    );
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.host, "127.0.0.1");
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
template_dir: templates
extension: jinja
layouts: [base, footer]
aliases:
  welcome: optin-campaign
translations:
  email.greeting: Hello
root_url: https://lists.example.com
logo_url: https://cdn.example.com/logo.png
static_dir: public
route_prefix: /preview
cache: true
server:
  host: 0.0.0.0
  port: 9000
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.template_dir, "templates");
    assert_eq!(config.extension, "jinja");
    assert!(config.is_layout("footer"));
    assert!(!config.is_layout("welcome"));
    assert_eq!(config.aliases.len(), 1);
    assert_eq!(config.logo_url(), "https://cdn.example.com/logo.png");
    assert_eq!(config.route_prefix(), "/preview");
    assert!(config.cache);
    assert_eq!(config.server.port, 9000);
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("templates_dir: x");
    assert!(result.is_err());
}

#[test]
fn test_logo_url_derived_from_root() {
    let config = Config {
        root_url: "http://localhost:8000/".to_string(),
        ..Config::default()
    };
    assert_eq!(
        config.logo_url(),
        "http://localhost:8000/public/static/logo.svg"
    );
}

#[test]
fn test_route_prefix_trailing_slash() {
    let config = Config {
        route_prefix: "/email-templates/".to_string(),
        ..Config::default()
    };
    assert_eq!(config.route_prefix(), "/email-templates");
}

#[test]
fn test_template_pattern() {
    let config = Config::default();
    let root = PathBuf::from("/srv/app");
    assert_eq!(
        config.template_pattern(&root),
        "/srv/app/static/email-templates/*.html"
    );
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(&temp.path().join("mailpeek.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("mailpeek.yml"), "extension: htm\n").unwrap();
    fs::write(temp.path().join("mailpeek.yaml"), "extension: txt\n").unwrap();
    let config = Config::load_from_dir(temp.path()).unwrap();
    assert_eq!(config.extension, "htm");
}

#[test]
fn test_load_rejects_bad_prefix() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mailpeek.yml");
    fs::write(&path, "route_prefix: previews\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_load_rejects_dotted_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mailpeek.yml");
    fs::write(&path, "extension: .html\n").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
fn test_load_reports_parse_error_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mailpeek.yml");
    fs::write(&path, "aliases: [not, a, map]\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    match err {
        CoreError::ConfigParseError { path: p, .. } => assert!(p.ends_with("mailpeek.yml")),
        other => panic!("unexpected error: {other}"),
    }
}

// These tests modify environment variables and must run serially
use serial_test::serial;

#[test]
#[serial]
fn test_load_or_default_without_file() {
    let original = std::env::var(ROOT_URL_ENV).ok();
    std::env::remove_var(ROOT_URL_ENV);
    let temp = TempDir::new().unwrap();
    let config = Config::load_or_default(temp.path()).unwrap();
    assert_eq!(config, Config::default());
    if let Some(v) = original {
        std::env::set_var(ROOT_URL_ENV, v);
    }
}

#[test]
#[serial]
fn test_root_url_env_override() {
    let original = std::env::var(ROOT_URL_ENV).ok();
    std::env::set_var(ROOT_URL_ENV, "https://preview.internal");
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("mailpeek.yml"),
        "root_url: http://localhost:8000\n",
    )
    .unwrap();
    let config = Config::load_from_dir(temp.path()).unwrap();
    assert_eq!(config.root_url, "https://preview.internal");
    assert_eq!(
        config.logo_url(),
        "https://preview.internal/public/static/logo.svg"
    );
    match original {
        Some(v) => std::env::set_var(ROOT_URL_ENV, v),
        None => std::env::remove_var(ROOT_URL_ENV),
    }
}
