//! Tests for configuration resolution.

use super::*;
use crate::release::ClusterReleaseConf;

const VALID_RELEASE: &str = r#"
common:
  id: platform
  account: "123456789012"
  region: us-west-2
  tags:
    Team: x
release:
  vpc:
    name: platform-vpc
    cidr: 10.0.0.0/16
  eks:
    name: platform
    version: "1.30"
"#;

const SYNTHESIZER: &str = r#"
qualifier: platform-prod
cloudFormationExecutionRole: arn:aws:iam::123456789012:role/exec
deployRoleArn: arn:aws:iam::123456789012:role/deploy
lookupRoleArn: arn:aws:iam::123456789012:role/lookup
fileAssetPublishingRoleArn: arn:aws:iam::123456789012:role/assets
imageAssetPublishingRoleArn: arn:aws:iam::123456789012:role/images
bootstrapStackVersionSsmParameter: /cdk-bootstrap/platform-prod/version
fileAssetsBucketName: arn:aws:s3:::platform-assets/cdk
imageAssetsRepositoryName: platform-images
lookupRoleExternalId: key-123
"#;

#[test]
fn test_resolve_release() {
    let release: Release<ClusterReleaseConf> =
        resolve_release(VALID_RELEASE).expect("Failed to resolve");

    assert_eq!(release.common.id, "platform");
    assert_eq!(release.release.vpc.name, "platform-vpc");
    assert_eq!(
        release.common.tags.get("Team").map(String::as_str),
        Some("x")
    );
}

#[test]
fn test_missing_common_id_reports_field_path() {
    let document = VALID_RELEASE.replace("  id: platform\n", "");

    let result = resolve_release::<ClusterReleaseConf>(&document);

    match result {
        Err(ConfigurationError::Decode { path, reason }) => {
            assert_eq!(path, "common.id");
            assert!(reason.contains("missing field"), "reason: {}", reason);
        }
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[test]
fn test_null_common_id_reports_field_path() {
    let document = VALID_RELEASE.replace("  id: platform\n", "  id: null\n");

    match resolve_release::<ClusterReleaseConf>(&document) {
        Err(ConfigurationError::Decode { path, reason }) => {
            assert_eq!(path, "common.id");
            assert!(reason.contains("null"), "reason: {}", reason);
        }
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[test]
fn test_null_names_are_not_read_as_text() {
    let cases = [
        ("  region: us-west-2\n", "  region: null\n", "common.region"),
        ("    name: platform-vpc\n", "    name: null\n", "release.vpc.name"),
        ("    name: platform\n", "    name: null\n", "release.eks.name"),
    ];

    for (line, replacement, expected) in cases {
        let document = VALID_RELEASE.replace(line, replacement);

        match resolve_release::<ClusterReleaseConf>(&document) {
            Err(ConfigurationError::Decode { path, .. }) => assert_eq!(path, expected),
            other => panic!("Expected Decode error for {}, got {:?}", expected, other),
        }
    }
}

#[test]
fn test_missing_account_reports_field_path() {
    let document = VALID_RELEASE.replace("  account: \"123456789012\"\n", "");

    match resolve_release::<ClusterReleaseConf>(&document) {
        Err(ConfigurationError::Decode { path, reason }) => {
            assert_eq!(path, "common.account");
            assert!(reason.contains("missing field"), "reason: {}", reason);
        }
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[test]
fn test_null_account_reports_field_path() {
    let document = VALID_RELEASE.replace("  account: \"123456789012\"\n", "  account: null\n");

    match resolve_release::<ClusterReleaseConf>(&document) {
        Err(ConfigurationError::Decode { path, reason }) => {
            assert_eq!(path, "common.account");
            assert!(!reason.contains("untagged"), "reason: {}", reason);
        }
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[test]
fn test_missing_top_level_section_reports_field_name() {
    let document = "common:\n  id: a\n  account: \"1\"\n  region: r\n";

    match resolve_release::<ClusterReleaseConf>(document) {
        Err(ConfigurationError::Decode { path, .. }) => assert_eq!(path, "release"),
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[test]
fn test_wrong_type_reports_nested_path() {
    let document = VALID_RELEASE.replace("    name: platform\n", "    name: [1, 30]\n");

    match resolve_release::<ClusterReleaseConf>(&document) {
        Err(ConfigurationError::Decode { path, .. }) => {
            assert!(path.starts_with("release.eks"), "path: {}", path)
        }
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[test]
fn test_unknown_enum_value_is_a_decode_error() {
    let document = VALID_RELEASE.replace(
        "    version: \"1.30\"\n",
        "    version: \"1.30\"\n    endpointAccess: SOMETIMES\n",
    );

    match resolve_release::<ClusterReleaseConf>(&document) {
        Err(ConfigurationError::Decode { path, reason }) => {
            assert!(path.starts_with("release.eks"), "path: {}", path);
            assert!(reason.contains("SOMETIMES"));
        }
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[test]
fn test_malformed_document() {
    let result = resolve_release::<ClusterReleaseConf>("common: [unterminated");
    assert!(matches!(result, Err(ConfigurationError::Decode { .. })));
}

#[test]
fn test_blank_id_is_invalid() {
    let document = VALID_RELEASE.replace("  id: platform\n", "  id: \"\"\n");

    match resolve_release::<ClusterReleaseConf>(&document) {
        Err(ConfigurationError::InvalidConfiguration { field, .. }) => {
            assert_eq!(field, "common.id")
        }
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn test_json_documents_are_accepted() {
    let document = r#"{
        "common": {"id": "platform", "account": "1", "region": "eu-west-1"},
        "release": {
            "vpc": {"name": "v", "cidr": "10.0.0.0/16"},
            "eks": {"name": "c", "version": "1.30"}
        }
    }"#;

    let release: Release<ClusterReleaseConf> = resolve_release(document).unwrap();
    assert_eq!(release.common.region, "eu-west-1");
}

#[test]
fn test_resolve_synthesizer_reduces_bucket_arn() {
    let identity = resolve_synthesizer(SYNTHESIZER).expect("Failed to resolve");

    match identity {
        SynthesizerIdentity::Custom(conf) => {
            assert_eq!(conf.file_assets_bucket_name, "platform-assets");
            assert_eq!(conf.qualifier, "platform-prod");
            assert!(conf.generate_bootstrap_version_rule);
            assert_eq!(conf.lookup_role_external_id.as_deref(), Some("key-123"));
        }
        SynthesizerIdentity::Default => panic!("Expected a custom identity"),
    }
}

#[test]
fn test_resolve_synthesizer_rejects_non_storage_arn() {
    let document = SYNTHESIZER.replace(
        "arn:aws:s3:::platform-assets/cdk",
        "arn:aws:iam::123456789012:role/assets",
    );

    match resolve_synthesizer(&document) {
        Err(ConfigurationError::IdentityResolution { field, .. }) => {
            assert_eq!(field, "fileAssetsBucketName")
        }
        other => panic!("Expected IdentityResolution, got {:?}", other),
    }
}

#[test]
fn test_resolve_synthesizer_keeps_empty_bucket_name() {
    let document = SYNTHESIZER.replace("arn:aws:s3:::platform-assets/cdk", "\"arn:aws:s3::\"");

    let identity = resolve_synthesizer(&document).expect("Failed to resolve");

    match identity {
        SynthesizerIdentity::Custom(conf) => assert_eq!(conf.file_assets_bucket_name, ""),
        SynthesizerIdentity::Default => panic!("Expected a custom identity"),
    }
}

#[test]
fn test_unknown_fields_are_ignored() {
    let document = VALID_RELEASE.replace(
        "  region: us-west-2\n",
        "  region: us-west-2\n  costCenter: infra\n",
    ) + "  futureSection:\n    enabled: true\n";

    let release: Release<ClusterReleaseConf> = resolve_release(&document).unwrap();

    assert_eq!(release.common.region, "us-west-2");
}

#[test]
fn test_decode_reason_has_no_location_suffix() {
    let document = VALID_RELEASE.replace("    name: platform\n", "    name: [1, 30]\n");

    for _ in 0..2 {
        match resolve_release::<ClusterReleaseConf>(&document) {
            Err(ConfigurationError::Decode { reason, .. }) => {
                assert!(!reason.contains(" at line "), "reason: {}", reason)
            }
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }
}
