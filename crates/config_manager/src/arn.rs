//! Storage resource identifier handling.

#[cfg(test)]
#[path = "arn_tests.rs"]
mod tests;

/// Prefix shared by every S3 resource identifier.
pub const S3_ARN_PREFIX: &str = "arn:aws:s3::";

/// Extracts the bucket name from an S3 resource identifier.
///
/// The resource part is the text after the last `:`. A single leading `/`
/// is ignored and the name ends at the first `/` that follows, so object
/// paths inside the bucket are discarded.
///
/// Returns `None` when `identifier` is not an S3 identifier. An identifier
/// with an empty resource part yields `Some("")`.
///
/// # Examples
///
/// ```rust
/// use config_manager::extract_container_name;
///
/// assert_eq!(extract_container_name("arn:aws:s3:::my-bucket"), Some("my-bucket"));
/// assert_eq!(extract_container_name("arn:aws:s3:::my-bucket/a/b"), Some("my-bucket"));
/// assert_eq!(extract_container_name("arn:aws:iam::123:role/x"), None);
/// ```
pub fn extract_container_name(identifier: &str) -> Option<&str> {
    if !identifier.starts_with(S3_ARN_PREFIX) {
        return None;
    }

    let resource = identifier.rsplit(':').next().unwrap_or_default();
    let resource = resource.strip_prefix('/').unwrap_or(resource);

    resource.split('/').next()
}
