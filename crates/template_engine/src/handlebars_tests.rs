//! Tests for the Handlebars template engine functionality.

use crate::handlebars_engine::*;
use crate::TemplateError;
use serde_json::json;

fn engine_with(name: &str, template: &str) -> HandlebarsTemplateEngine {
    let mut engine = HandlebarsTemplateEngine::new();
    engine.register_custom_helpers();
    engine.compile(name, template).expect("template should compile");
    engine
}

// ================================
// Handlebars Engine Creation Tests
// ================================

#[test]
fn test_handlebars_engine_new() {
    let engine = HandlebarsTemplateEngine::new();

    assert!(!engine.config().strict_variables);
    assert_eq!(engine.config().max_template_size, 1_048_576);
}

#[test]
fn test_handlebars_engine_with_config() {
    let config = TemplateRenderConfig {
        strict_variables: true,
        max_template_size: 16,
    };

    let engine = HandlebarsTemplateEngine::with_config(config);

    assert!(engine.config().strict_variables);
    assert_eq!(engine.config().max_template_size, 16);
}

// ================================
// Rendering Tests
// ================================

#[test]
fn test_variable_substitution() {
    let engine = engine_with("t", "region: {{common.region}}");

    let result = engine.render("t", &json!({"common": {"region": "us-east-1"}}));

    assert_eq!(result.unwrap(), "region: us-east-1");
}

#[test]
fn test_output_is_not_html_escaped() {
    let engine = engine_with("t", "value: {{text}}");

    let result = engine.render("t", &json!({"text": "<a & 'b'>"}));

    assert_eq!(result.unwrap(), "value: <a & 'b'>");
}

#[test]
fn test_missing_variable_renders_empty_when_lenient() {
    let engine = engine_with("t", "value: [{{missing}}]");

    let result = engine.render("t", &json!({}));

    assert_eq!(result.unwrap(), "value: []");
}

#[test]
fn test_missing_variable_fails_when_strict() {
    let mut engine = HandlebarsTemplateEngine::with_config(TemplateRenderConfig {
        strict_variables: true,
        ..Default::default()
    });
    engine.compile("t", "value: {{missing}}").unwrap();

    let result = engine.render("t", &json!({}));

    assert!(matches!(result, Err(TemplateError::Render { .. })));
}

#[test]
fn test_each_iterates_lists() {
    let engine = engine_with("t", "{{#each zones}}- {{this}}\n{{/each}}");

    let result = engine.render("t", &json!({"zones": ["a", "b"]}));

    assert_eq!(result.unwrap(), "- a\n- b\n");
}

#[test]
fn test_each_iterates_map_entries_with_keys() {
    let engine = engine_with("t", "{{#each tags}}{{@key}}={{this}};{{/each}}");

    let result = engine.render("t", &json!({"tags": {"Env": "prod", "Team": "x"}}));

    let rendered = result.unwrap();
    assert!(rendered.contains("Env=prod;"));
    assert!(rendered.contains("Team=x;"));
}

#[test]
fn test_if_section_on_boolean_and_absent_keys() {
    let engine = engine_with("t", "{{#if enabled}}on{{else}}off{{/if}}");

    assert_eq!(engine.render("t", &json!({"enabled": true})).unwrap(), "on");
    assert_eq!(engine.render("t", &json!({"enabled": false})).unwrap(), "off");
    assert_eq!(engine.render("t", &json!({})).unwrap(), "off");
}

#[test]
fn test_render_unknown_template_is_not_found() {
    let engine = HandlebarsTemplateEngine::new();

    let result = engine.render("nope", &json!({}));

    assert!(matches!(result, Err(TemplateError::TemplateNotFound { .. })));
}

#[test]
fn test_compile_rejects_malformed_template() {
    let mut engine = HandlebarsTemplateEngine::new();

    let result = engine.compile("broken", "{{#each items}}unclosed");

    match result {
        Err(TemplateError::TemplateSyntax { name, .. }) => assert_eq!(name, "broken"),
        other => panic!("Expected TemplateSyntax, got {other:?}"),
    }
}

#[test]
fn test_compile_rejects_oversized_template() {
    let mut engine = HandlebarsTemplateEngine::with_config(TemplateRenderConfig {
        max_template_size: 8,
        ..Default::default()
    });

    let result = engine.compile("big", "0123456789");

    assert!(matches!(result, Err(TemplateError::ResourceLimit { .. })));
    assert!(!engine.has_template("big"));
}

// ================================
// Custom Helper Tests
// ================================

#[test]
fn test_json_helper_quotes_strings() {
    let engine = engine_with("t", "name: {{json name}}");

    let result = engine.render("t", &json!({"name": "say \"hi\": now"}));

    assert_eq!(result.unwrap(), r#"name: "say \"hi\": now""#);
}

#[test]
fn test_json_helper_renders_structures() {
    let engine = engine_with("t", "tags: {{json tags}}");

    let result = engine.render("t", &json!({"tags": [{"Team": "x"}]}));

    assert_eq!(result.unwrap(), r#"tags: [{"Team":"x"}]"#);
}

#[test]
fn test_json_helper_renders_map_keys() {
    let engine = engine_with("t", "{{#each tags}}{{json @key}}: {{json this}}\n{{/each}}");

    let result = engine.render("t", &json!({"tags": {"Team": "x"}}));

    assert_eq!(result.unwrap(), "\"Team\": \"x\"\n");
}

#[test]
fn test_case_helpers() {
    let engine = engine_with(
        "t",
        "{{lower_case a}}|{{upper_case b}}|{{kebab_case c}}",
    );

    let result = engine.render(
        "t",
        &json!({"a": "MiXeD", "b": "loud", "c": "Platform Release_v2"}),
    );

    assert_eq!(result.unwrap(), "mixed|LOUD|platform-release-v2");
}

#[test]
fn test_default_helper_uses_fallback_for_absent_value() {
    let engine = engine_with("t", "{{default version \"0.0.0\"}}");

    assert_eq!(engine.render("t", &json!({})).unwrap(), "0.0.0");
    assert_eq!(
        engine.render("t", &json!({"version": "1.2.3"})).unwrap(),
        "1.2.3"
    );
}

#[test]
fn test_case_helper_rejects_non_string() {
    let engine = engine_with("t", "{{upper_case count}}");

    let result = engine.render("t", &json!({"count": 3}));

    assert!(matches!(result, Err(TemplateError::Render { .. })));
}

#[test]
fn test_render_is_deterministic() {
    let engine = engine_with("t", "{{#each items}}{{json this}},{{/each}}");
    let data = json!({"items": [1, "two", {"three": 3}]});

    let first = engine.render("t", &data).unwrap();
    let second = engine.render("t", &data).unwrap();

    assert_eq!(first, second);
}
