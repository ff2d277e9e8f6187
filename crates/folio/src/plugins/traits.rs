//! Base plugin trait definition.
//!
//! Every collaborator the loader talks to (extraction backend, file storage,
//! text splitter) implements [`Plugin`], so log lines can name the component
//! that produced or failed a result.

/// Base trait shared by all loader collaborators.
///
/// # Thread Safety
///
/// Collaborators are held as `Arc<dyn Trait>` and may be used from Tokio's
/// blocking pool, so they must be `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use folio::plugins::Plugin;
///
/// struct S3Storage;
///
/// impl Plugin for S3Storage {
///     fn name(&self) -> &str {
///         "s3-storage"
///     }
///
///     fn version(&self) -> String {
///         "1.0.0".to_string()
///     }
/// }
///
/// assert_eq!(S3Storage.name(), "s3-storage");
/// assert_eq!(S3Storage.description(), "");
/// ```
pub trait Plugin: Send + Sync {
    /// Returns the unique name/identifier for this collaborator.
    ///
    /// Lowercase with hyphens, e.g. `"lopdf-backend"`.
    fn name(&self) -> &str;

    /// Returns the semantic version of this collaborator.
    fn version(&self) -> String;

    /// Optional description for debugging and logging.
    fn description(&self) -> &str {
        ""
    }
}
