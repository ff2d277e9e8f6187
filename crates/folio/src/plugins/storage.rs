//! File storage trait.

use crate::Result;
use crate::plugins::Plugin;
use crate::types::StorageContext;
use async_trait::async_trait;

/// Trait for durable file storage backends.
///
/// Storage references in a load call's `source` field are resolved through
/// this trait, one `get_file` call per key, in key order. Fetches are treated
/// as idempotent reads; the loader never retries them.
///
/// # Errors
///
/// Return `FolioError::StorageFetch` when the key cannot be read. The loader
/// propagates the error unchanged and aborts the call.
#[async_trait]
pub trait FileStorage: Plugin {
    /// Fetch the bytes stored under `key` for the given organization and flow.
    async fn get_file(&self, key: &str, context: &StorageContext) -> Result<Vec<u8>>;
}
