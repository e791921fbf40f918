use super::*;

#[test]
fn test_plain_bucket() {
    assert_eq!(extract_container_name("arn:aws:s3:::my-bucket"), Some("my-bucket"));
}

#[test]
fn test_bucket_with_object_path() {
    assert_eq!(
        extract_container_name("arn:aws:s3:::my-bucket/path/to/key"),
        Some("my-bucket")
    );
}

#[test]
fn test_leading_slash_is_ignored() {
    assert_eq!(extract_container_name("arn:aws:s3:::/my-bucket/x"), Some("my-bucket"));
}

#[test]
fn test_empty_resource_yields_empty_name() {
    assert_eq!(extract_container_name("arn:aws:s3::"), Some(""));
    assert_eq!(extract_container_name("arn:aws:s3:::"), Some(""));
}

#[test]
fn test_other_services_are_rejected() {
    assert_eq!(extract_container_name("arn:aws:iam::123:role/x"), None);
    assert_eq!(extract_container_name("my-bucket"), None);
    assert_eq!(extract_container_name(""), None);
}
