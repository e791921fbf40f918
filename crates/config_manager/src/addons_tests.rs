use super::*;

#[test]
fn test_enabled_defaults_to_true() {
    let addons: AddonsConf = serde_yaml::from_str("charts: []\n").expect("Failed to parse");
    assert!(addons.enabled);
    assert!(addons.charts.is_empty());
    assert_eq!(addons, AddonsConf::default());
}

#[test]
fn test_chart_with_values() {
    let yaml = r#"
enabled: true
charts:
  - name: cert-manager
    chart: cert-manager
    repository: https://charts.jetstack.io
    version: v1.14.4
    namespace: cert-manager
    createNamespace: true
    values:
      installCRDs: true
"#;
    let addons: AddonsConf = serde_yaml::from_str(yaml).expect("Failed to parse");

    let chart = &addons.charts[0];
    assert_eq!(chart.name, "cert-manager");
    assert_eq!(chart.create_namespace, Some(true));
    assert_eq!(
        chart.values.as_ref().and_then(|v| v.get("installCRDs")),
        Some(&Value::Bool(true))
    );
}

#[test]
fn test_chart_requires_repository() {
    let yaml = "charts:\n  - name: a\n    chart: a\n    version: 1.0.0\n";
    let result: Result<AddonsConf, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}

#[test]
fn test_disabled_addons() {
    let addons: AddonsConf = serde_yaml::from_str("enabled: false\n").expect("Failed to parse");
    assert!(!addons.enabled);
}
