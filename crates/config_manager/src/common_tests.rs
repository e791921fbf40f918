use super::*;

fn common(name: Option<&str>, alias: Option<&str>) -> Common {
    Common {
        id: "platform".to_string(),
        account: "123456789012".to_string(),
        region: "us-west-2".to_string(),
        organization: None,
        name: name.map(str::to_string),
        alias: alias.map(str::to_string),
        environment: None,
        version: None,
        domain: None,
        tags: BTreeMap::new(),
    }
}

#[test]
fn test_deserialize_minimal_common() {
    let yaml = r#"
id: platform
account: "123456789012"
region: us-west-2
"#;
    let common: Common = serde_yaml::from_str(yaml).expect("Failed to parse");

    assert_eq!(common.id, "platform");
    assert_eq!(common.account, "123456789012");
    assert!(common.tags.is_empty());
    assert!(common.name.is_none());
}

#[test]
fn test_missing_account_fails() {
    let yaml = "id: platform\nregion: us-west-2\n";
    let result: Result<Common, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}

#[test]
fn test_display_name() {
    assert_eq!(
        common(Some("platform"), Some("prod")).display_name(),
        "platform prod release"
    );
    assert_eq!(common(Some("platform"), None).display_name(), "platform release");
    assert_eq!(common(None, None).display_name(), "platform release");
}

#[test]
fn test_merge_tags_later_layers_win() {
    let platform: BTreeMap<String, String> = [("Team", "platform"), ("Env", "dev")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let release: BTreeMap<String, String> = [("Env", "prod")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let merged = merge_tags([&platform, &release]);

    assert_eq!(merged.get("Team").map(String::as_str), Some("platform"));
    assert_eq!(merged.get("Env").map(String::as_str), Some("prod"));
}

#[test]
fn test_platform_defaults_to_empty() {
    let platform: Platform = serde_yaml::from_str("{}").unwrap();
    assert_eq!(platform, Platform::default());
}
