//! Tag records and the per-call access protocol.

use parking_lot::Mutex;

use crate::buffer::TagBuffer;
use crate::debug::{tag_log, DebugLevel};
use crate::error::{Result, Status, TagError};
use crate::event::{Access, TagCallback, TagEvent};
use crate::handle::TagHandle;

/// Mutable part of a tag, guarded by the record's lock.
struct TagState {
    data: TagBuffer,
    callback: Option<TagCallback>,
}

impl TagState {
    fn notify(&self, handle: TagHandle, event: TagEvent, status: Status) {
        if let Some(cb) = &self.callback {
            tag_log!(
                DebugLevel::Spew,
                "Calling cb for {} with PLCTAG_EVENT_{}",
                handle,
                event
            );
            cb(handle, event, status);
        }
    }
}

/// The owned state of one tag.
///
/// Geometry and name are fixed at creation. The data buffer and callback sit
/// behind a per-record mutex that is held for the whole of each access,
/// including callback dispatch.
pub(crate) struct TagRecord {
    handle: TagHandle,
    name: String,
    elem_size: usize,
    elem_count: usize,
    state: Mutex<TagState>,
}

impl TagRecord {
    /// Creates a record with a zero-filled buffer of `elem_size * elem_count`
    /// bytes.
    pub(crate) fn new(
        handle: TagHandle,
        name: String,
        elem_size: usize,
        elem_count: usize,
    ) -> Result<Self> {
        // Allocations are capped at isize::MAX bytes.
        let capacity = elem_size
            .checked_mul(elem_count)
            .filter(|&capacity| capacity <= isize::MAX as usize)
            .ok_or_else(|| {
                TagError::bad_parameter(
                    "elem_count",
                    format!(
                        "{elem_count} elements of {elem_size} bytes overflow the address space"
                    ),
                )
            })?;

        Ok(Self {
            handle,
            name,
            elem_size,
            elem_count,
            state: Mutex::new(TagState {
                data: TagBuffer::new(capacity),
                callback: None,
            }),
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn elem_size(&self) -> usize {
        self.elem_size
    }

    pub(crate) fn elem_count(&self) -> usize {
        self.elem_count
    }

    /// Total capacity in bytes.
    pub(crate) fn size(&self) -> usize {
        self.elem_size * self.elem_count
    }

    /// Replaces the callback. `None` clears it.
    pub(crate) fn set_callback(&self, callback: Option<TagCallback>) {
        self.state.lock().callback = callback;
    }

    /// Runs `op` against the buffer inside one critical section.
    ///
    /// Fires the `Started` event for `access`, then `Completed` if `op`
    /// succeeds or `Aborted` with the error's status if it fails.
    pub(crate) fn access<R>(
        &self,
        access: Access,
        op: impl FnOnce(&mut TagBuffer) -> Result<R>,
    ) -> Result<R> {
        let mut state = self.state.lock();
        state.notify(self.handle, access.started(), Status::Ok);

        match op(&mut state.data) {
            Ok(value) => {
                state.notify(self.handle, access.completed(), Status::Ok);
                Ok(value)
            }
            Err(e) => {
                tag_log!(DebugLevel::Warn, "Tag {}: {}", self.handle, e);
                state.notify(self.handle, TagEvent::Aborted, e.status());
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for TagRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRecord")
            .field("handle", &self.handle)
            .field("name", &self.name)
            .field("elem_size", &self.elem_size)
            .field("elem_count", &self.elem_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex as StdMutex};

    fn record(size: usize, count: usize) -> TagRecord {
        TagRecord::new(TagHandle::from(1), "T".to_string(), size, count).unwrap()
    }

    fn recorder(record: &TagRecord) -> Arc<StdMutex<Vec<(TagEvent, Status)>>> {
        let events = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        record.set_callback(Some(Arc::new(
            move |_: TagHandle, event: TagEvent, status: Status| {
                sink.lock().unwrap().push((event, status));
            },
        )));
        events
    }

    #[test]
    fn test_geometry() {
        let rec = record(4, 3);
        assert_eq!(rec.size(), 12);
        assert_eq!(rec.elem_size(), 4);
        assert_eq!(rec.elem_count(), 3);
        assert_eq!(rec.name(), "T");
    }

    #[test]
    fn test_capacity_overflow_rejected() {
        let err = TagRecord::new(TagHandle::from(1), "T".into(), usize::MAX, 2).unwrap_err();
        assert_eq!(err.status(), Status::BadParameter);

        let huge = isize::MAX as usize + 1;
        let err = TagRecord::new(TagHandle::from(1), "T".into(), huge, 1).unwrap_err();
        assert!(matches!(err, TagError::BadParameter { .. }));
        assert!(TagRecord::new(TagHandle::from(1), "T".into(), 1, huge).is_err());
    }

    #[test]
    fn test_access_success_events() {
        let rec = record(4, 1);
        let events = recorder(&rec);

        rec.access(Access::Write, |buf| buf.write(0, 9u32)).unwrap();
        let value = rec.access(Access::Read, |buf| buf.read::<u32>(0)).unwrap();
        assert_eq!(value, 9);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                (TagEvent::WriteStarted, Status::Ok),
                (TagEvent::WriteCompleted, Status::Ok),
                (TagEvent::ReadStarted, Status::Ok),
                (TagEvent::ReadCompleted, Status::Ok),
            ]
        );
    }

    #[test]
    fn test_access_failure_aborts() {
        let rec = record(4, 1);
        let events = recorder(&rec);

        let err = rec.access(Access::Read, |buf| buf.read::<u64>(0)).unwrap_err();
        assert_eq!(err.status(), Status::BadParameter);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                (TagEvent::ReadStarted, Status::Ok),
                (TagEvent::Aborted, Status::BadParameter),
            ]
        );
    }

    #[test]
    fn test_cleared_callback_is_silent() {
        let rec = record(1, 1);
        let events = recorder(&rec);
        rec.set_callback(None);
        rec.access(Access::Write, |buf| buf.write(0, 1u8)).unwrap();
        assert!(events.lock().unwrap().is_empty());
    }
}
