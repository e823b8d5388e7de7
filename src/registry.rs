//! The process-wide collection of tags.
//!
//! The registry owns every [`TagRecord`] and maps handles to them. A single
//! read/write lock guards the map: creation takes it exclusively, lookups
//! share it. Lookups hand back an `Arc` and release the registry lock before
//! the caller touches the record's own lock, so the two locks are never
//! nested.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::debug::{tag_log, DebugLevel};
use crate::error::{Result, TagError};
use crate::handle::TagHandle;
use crate::tag::TagRecord;

/// Prefix attached to every stub-created tag name.
pub const DEFAULT_NAME_PREFIX: &str = "DUMMY_AQUA_DATA";

/// Owns all tag records, keyed by handle.
pub(crate) struct TagRegistry {
    prefix: String,
    tags: RwLock<BTreeMap<TagHandle, Arc<TagRecord>>>,
}

impl TagRegistry {
    pub(crate) fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            tags: RwLock::new(BTreeMap::new()),
        }
    }

    /// Allocates a tag and returns its handle.
    ///
    /// The handle is one past the highest existing handle, or
    /// [`TagHandle::FIRST`] for an empty registry. The stored name is
    /// `"<prefix>_<name>"`.
    ///
    /// # Errors
    ///
    /// Returns `TagError::BadParameter` if `name` is empty, either geometry
    /// value is zero, or the handle space is exhausted. The registry is left
    /// unchanged on failure.
    pub(crate) fn create(
        &self,
        name: &str,
        elem_count: usize,
        elem_size: usize,
    ) -> Result<TagHandle> {
        if name.is_empty() {
            return Err(TagError::bad_parameter("name", "must not be empty"));
        }
        if elem_count == 0 {
            return Err(TagError::bad_parameter("elem_count", "must be greater than 0"));
        }
        if elem_size == 0 {
            return Err(TagError::bad_parameter("elem_size", "must be greater than 0"));
        }
        let full_name = format!("{}_{}", self.prefix, name);

        let mut tags = self.tags.write();
        let handle = match tags.last_key_value() {
            None => TagHandle::FIRST,
            Some((last, _)) => last
                .next()
                .ok_or_else(|| TagError::bad_parameter("handle", "tag handles exhausted"))?,
        };

        let record = TagRecord::new(handle, full_name, elem_size, elem_count)?;
        tag_log!(
            DebugLevel::Info,
            "Created tag {} ({}) with {} elements of {} bytes",
            handle,
            record.name(),
            elem_count,
            elem_size
        );
        tags.insert(handle, Arc::new(record));

        Ok(handle)
    }

    /// Resolves a handle. Never creates a record.
    pub(crate) fn lookup(&self, handle: TagHandle) -> Option<Arc<TagRecord>> {
        self.tags.read().get(&handle).cloned()
    }

    /// Resolves a handle, failing with `TagError::NotFound` if it is unknown.
    pub(crate) fn resolve(&self, handle: TagHandle) -> Result<Arc<TagRecord>> {
        self.lookup(handle).ok_or_else(|| {
            tag_log!(DebugLevel::Warn, "Unknown tag {}", handle);
            TagError::not_found(handle)
        })
    }

    /// Returns all live handles in ascending order.
    pub(crate) fn handles(&self) -> Vec<TagHandle> {
        self.tags.read().keys().copied().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.tags.read().len()
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("prefix", &self.prefix)
            .field("tags", &self.len())
            .finish()
    }
}
