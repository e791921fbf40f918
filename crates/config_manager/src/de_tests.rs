use super::*;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct Sample {
    #[serde(default, deserialize_with = "null_as_default")]
    tags: BTreeMap<String, String>,
    #[serde(deserialize_with = "scalar_string")]
    account: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    version: Option<String>,
}

#[test]
fn test_null_tags_become_empty() {
    let sample: Sample = serde_yaml::from_str("tags:\naccount: \"1\"\n").unwrap();
    assert!(sample.tags.is_empty());
}

#[test]
fn test_absent_tags_become_empty() {
    let sample: Sample = serde_yaml::from_str("account: \"1\"\n").unwrap();
    assert!(sample.tags.is_empty());
    assert_eq!(sample.version, None);
}

#[test]
fn test_unquoted_account_is_read_as_text() {
    let sample: Sample = serde_yaml::from_str("account: 123456789012\nversion: 2\n").unwrap();
    assert_eq!(sample.account, "123456789012");
    assert_eq!(sample.version.as_deref(), Some("2"));
}

#[test]
fn test_list_is_not_a_scalar() {
    let result: Result<Sample, _> = serde_yaml::from_str("account: [1, 2]\n");
    assert!(result.is_err());
}

#[test]
fn test_null_account_is_rejected() {
    let result: Result<Sample, _> = serde_yaml::from_str("account: null\n");

    let message = result.expect_err("null account accepted").to_string();
    assert!(message.starts_with("account: "), "message: {}", message);
}

#[test]
fn test_null_version_is_absent() {
    let sample: Sample = serde_yaml::from_str("account: \"1\"\nversion: ~\n").unwrap();
    assert_eq!(sample.version, None);
}

#[derive(Debug, Deserialize)]
struct Named {
    #[serde(deserialize_with = "required_string")]
    id: String,
}

#[test]
fn test_required_string_rejects_null() {
    for document in ["id: null\n", "id: ~\n", "id:\n"] {
        let result: Result<Named, _> = serde_yaml::from_str(document);
        let message = result.expect_err(document).to_string();
        assert!(message.contains("required value is null"), "message: {}", message);
    }
}

#[test]
fn test_required_string_keeps_quoted_null_text() {
    let named: Named = serde_yaml::from_str("id: \"null\"\n").unwrap();
    assert_eq!(named.id, "null");
}

#[test]
fn test_required_string_rejects_numbers() {
    let result: Result<Named, _> = serde_yaml::from_str("id: 42\n");
    assert!(result.is_err());
}
