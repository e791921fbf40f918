use super::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const CONF_TEMPLATE: &str = r#"common:
  id: {{json common.id}}
  tags:
{{#each hosted.tags}}{{#each this}}    {{json @key}}: {{json this}}
{{/each}}{{/each}}"#;

fn renderer() -> TemplateRenderer {
    TemplateRenderer::new(InMemoryTemplateSource::new().with_template("conf.yaml.hbs", CONF_TEMPLATE))
}

#[test]
fn render_substitutes_namespaced_values_and_iterates_tag_sets() {
    let substitutions = SubstitutionMap::new()
        .with("common:id", "platform")
        .with("hosted:tags", json!([{"Team": "x"}, {"Env": "prod"}]));

    let document = renderer().render("conf.yaml.hbs", &substitutions).unwrap();

    assert_eq!(
        document,
        "common:\n  id: \"platform\"\n  tags:\n    \"Team\": \"x\"\n    \"Env\": \"prod\"\n"
    );
}

#[test]
fn render_with_empty_tag_set_emits_no_entries() {
    let substitutions = SubstitutionMap::new()
        .with("common:id", "platform")
        .with("hosted:tags", json!([]));

    let document = renderer().render("conf.yaml.hbs", &substitutions).unwrap();

    assert_eq!(document, "common:\n  id: \"platform\"\n  tags:\n");
}

#[test]
fn render_is_deterministic() {
    let substitutions = SubstitutionMap::new()
        .with("common:id", "platform")
        .with("hosted:tags", json!([{"A": "1", "B": "2"}]));
    let renderer = renderer();

    let first = renderer.render("conf.yaml.hbs", &substitutions).unwrap();
    let second = renderer.render("conf.yaml.hbs", &substitutions).unwrap();

    assert_eq!(first, second);
}

#[test]
fn render_missing_asset_fails_with_not_found() {
    let result = renderer().render("missing.yaml.hbs", &SubstitutionMap::new());

    assert!(matches!(result, Err(TemplateError::TemplateNotFound { .. })));
}

#[test]
fn render_malformed_asset_fails_with_syntax_error() {
    let renderer = TemplateRenderer::new(
        InMemoryTemplateSource::new().with_template("broken.hbs", "{{#if x}}never closed"),
    );

    let result = renderer.render("broken.hbs", &SubstitutionMap::new());

    assert!(matches!(result, Err(TemplateError::TemplateSyntax { .. })));
}

#[test]
fn render_reports_namespace_conflicts() {
    let substitutions = SubstitutionMap::new()
        .with("common", "flat")
        .with("common:id", "nested");

    let result = renderer().render("conf.yaml.hbs", &substitutions);

    assert!(matches!(result, Err(TemplateError::NamespaceConflict { .. })));
}

#[test]
fn render_reads_assets_from_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("conf.yaml.hbs"), CONF_TEMPLATE).unwrap();
    let renderer = TemplateRenderer::new(DirectoryTemplateSource::new(temp_dir.path()));

    let document = renderer
        .render(
            "conf.yaml.hbs",
            &SubstitutionMap::new().with("common:id", "from-disk"),
        )
        .unwrap();

    assert!(document.contains("id: \"from-disk\""));
}
