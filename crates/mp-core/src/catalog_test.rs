use super::*;
use std::fs;
use tempfile::TempDir;

fn write_templates(root: &Path, files: &[(&str, &str)]) {
    let dir = root.join("static/email-templates");
    fs::create_dir_all(&dir).unwrap();
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

#[test]
fn test_defined_names_from_directive() {
    let content = r#"{# define "optin-campaign" #}<p>Hi</p>"#;
    assert_eq!(
        defined_names(content, "subscriber-optin-campaign"),
        vec!["optin-campaign".to_string()]
    );
}

#[test]
fn test_defined_names_whitespace_control_and_duplicates() {
    let content = "{#- define \"a\" -#}\n{#define   \"b\"#}\n{# define \"a\" #}";
    assert_eq!(defined_names(content, "file"), vec!["a", "b"]);
}

#[test]
fn test_defined_names_falls_back_to_stem() {
    assert_eq!(defined_names("<p>{{ Token }}</p>", "welcome"), vec!["welcome"]);
}

#[test]
fn test_split_sections_per_marker() {
    let content = "{# define \"header\" #}HEADER-PART\n{# define \"footer\" #}FOOTER-PART";
    let sections = split_sections(content, "partials");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].0, "header");
    assert!(sections[0].1.ends_with("HEADER-PART\n"));
    assert!(!sections[0].1.contains("FOOTER-PART"));
    assert_eq!(sections[1].0, "footer");
    assert!(sections[1].1.ends_with("FOOTER-PART"));
    assert!(!sections[1].1.contains("HEADER-PART"));
}

#[test]
fn test_split_sections_leading_text_joins_first() {
    let content = "<!-- shared -->{# define \"welcome\" #}<p>Hi</p>";
    assert_eq!(split_sections(content, "file"), vec![("welcome", content)]);
    assert_eq!(
        split_sections("<p>{{ Token }}</p>", "welcome"),
        vec![("welcome", "<p>{{ Token }}</p>")]
    );
}

#[test]
fn test_source_sections_follow_content() {
    let source = TemplateSource::from_content(
        "partials.html",
        "{# define \"header\" #}H{# define \"footer\" #}F",
        false,
    );
    assert_eq!(source.defined_names, vec!["header", "footer"]);
    let bodies: Vec<&str> = source.sections().iter().map(|(_, body)| *body).collect();
    assert_eq!(bodies, vec!["{# define \"header\" #}H", "{# define \"footer\" #}F"]);
}

#[test]
fn test_list_templates_sorted_by_file_name() {
    let temp = TempDir::new().unwrap();
    write_templates(
        temp.path(),
        &[("zeta.html", "z"), ("alpha.html", "a"), ("base.html", "b")],
    );
    let pattern = Config::default().template_pattern(temp.path());
    let files = list_templates(&pattern).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["alpha.html", "base.html", "zeta.html"]);
}

#[test]
fn test_list_templates_skips_other_extensions_and_dirs() {
    let temp = TempDir::new().unwrap();
    write_templates(temp.path(), &[("welcome.html", "w"), ("notes.txt", "n")]);
    fs::create_dir_all(temp.path().join("static/email-templates/nested.html")).unwrap();
    let pattern = Config::default().template_pattern(temp.path());
    let files = list_templates(&pattern).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("welcome.html"));
}

#[test]
fn test_list_templates_invalid_pattern() {
    let err = list_templates("templates/[*.html").unwrap_err();
    assert!(matches!(err, CoreError::CatalogUnavailable { .. }));
}

#[test]
fn test_scan_marks_layouts() {
    let temp = TempDir::new().unwrap();
    write_templates(
        temp.path(),
        &[
            ("base.html", "<html>{% block body %}{% endblock %}</html>"),
            (
                "subscriber-optin-campaign.html",
                r#"{# define "optin-campaign" #}{% extends "base" %}"#,
            ),
            ("welcome.html", "<p>Welcome</p>"),
        ],
    );
    let catalog = Catalog::scan(&Config::default(), temp.path()).unwrap();
    assert_eq!(catalog.len(), 3);

    let renderable: Vec<&str> = catalog.renderable().map(|s| s.file_name.as_str()).collect();
    assert_eq!(renderable, vec!["subscriber-optin-campaign.html", "welcome.html"]);

    let base = &catalog.sources()[0];
    assert!(base.is_layout);
    assert_eq!(base.defined_names, vec!["base"]);

    let optin = catalog.source_defining("optin-campaign").unwrap();
    assert_eq!(optin.stem, "subscriber-optin-campaign");
}

#[test]
fn test_scan_missing_directory_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let err = Catalog::scan(&Config::default(), temp.path()).unwrap_err();
    assert!(matches!(err, CoreError::CatalogUnavailable { .. }));
}

#[test]
fn test_scan_empty_directory() {
    let temp = TempDir::new().unwrap();
    write_templates(temp.path(), &[]);
    let catalog = Catalog::scan(&Config::default(), temp.path()).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_checksum_tracks_edits() {
    let temp = TempDir::new().unwrap();
    write_templates(temp.path(), &[("welcome.html", "v1")]);
    let config = Config::default();
    let first = Catalog::scan(&config, temp.path()).unwrap().checksum();
    let again = Catalog::scan(&config, temp.path()).unwrap().checksum();
    assert_eq!(first, again);

    write_templates(temp.path(), &[("welcome.html", "v2")]);
    let edited = Catalog::scan(&config, temp.path()).unwrap().checksum();
    assert_ne!(first, edited);
}

#[test]
fn test_catalog_new_sorts_sources() {
    let catalog = Catalog::new(vec![
        TemplateSource::from_content("b.html", "b", false),
        TemplateSource::from_content("a.html", "a", false),
    ]);
    assert_eq!(catalog.sources()[0].file_name, "a.html");
}
