//! Folder-to-archive building.
//!
//! [`build_folder_archive`] turns every object under a key prefix into one
//! downloadable ZIP: list the prefix, fetch each object sequentially in store
//! order, strip the prefix from each entry name, and serialize into an
//! in-memory buffer.
//!
//! The build is all-or-nothing: any list, fetch, or encoding failure aborts
//! the whole build and no partial archive ever reaches the caller. An empty
//! prefix match produces a structurally valid empty archive, not an error.

use std::io::{Cursor, Write};

use bytes::Bytes;
use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::StoreError;
use crate::store::ObjectStore;

/// Build a ZIP archive of every object in `bucket` under `prefix`.
///
/// Entry names are the object keys with `prefix` removed by plain string
/// prefix removal; a key that does not start with `prefix` keeps its full
/// name. Fetches run strictly sequentially in the order the store listed the
/// keys, so the entry order is deterministic for a given listing.
///
/// # Errors
///
/// Propagates any [`StoreError`] from listing or fetching unchanged.
/// Returns [`StoreError::Archive`] when the encoder rejects an entry, when
/// finalization fails, or when a stripped entry name is empty (the key equals
/// the prefix) — an empty name would produce an entry some decoders cannot
/// address, so the build is rejected outright.
pub async fn build_folder_archive<S>(
    store: &S,
    bucket: &str,
    prefix: &str,
) -> Result<Bytes, StoreError>
where
    S: ObjectStore + ?Sized,
{
    let keys = store.list_by_prefix(bucket, prefix).await?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for key in &keys {
        let content = store.get_object(bucket, key).await?;

        let name = key.strip_prefix(prefix).unwrap_or(key);
        if name.is_empty() {
            return Err(StoreError::archive(format!(
                "key {key:?} equals the requested prefix, leaving an empty entry name"
            )));
        }

        writer
            .start_file(name, options)
            .map_err(|err| StoreError::archive(err.to_string()))?;
        writer
            .write_all(&content)
            .map_err(|err| StoreError::archive(err.to_string()))?;

        debug!(key = %key, entry = %name, bytes = content.len(), "added archive entry");
    }

    let cursor = writer
        .finish()
        .map_err(|err| StoreError::archive(err.to_string()))?;

    debug!(
        bucket = %bucket,
        prefix = %prefix,
        entries = keys.len(),
        bytes = cursor.get_ref().len(),
        "finalized folder archive"
    );

    Ok(Bytes::from(cursor.into_inner()))
}
