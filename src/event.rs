//! Tag lifecycle events and callbacks.
//!
//! Every read or write runs a short, per-call state machine:
//!
//! ```text
//! Idle -> Started -> Completed
//!                 \-> Aborted
//! ```
//!
//! A registered callback observes exactly two events per call: the matching
//! `*Started` event, then either the matching `*Completed` event or
//! [`TagEvent::Aborted`] carrying the failure status.
//!
//! Callbacks run synchronously on the caller's thread while the tag's lock is
//! held. A callback must not call back into an operation on the same tag; doing
//! so deadlocks.

use std::sync::Arc;

use crate::error::Status;
use crate::handle::TagHandle;

/// A lifecycle notification delivered to a tag's callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagEvent {
    /// A read has begun.
    ReadStarted,
    /// A read finished successfully.
    ReadCompleted,
    /// A write has begun.
    WriteStarted,
    /// A write finished successfully.
    WriteCompleted,
    /// The operation failed; the accompanying status gives the reason.
    Aborted,
}

impl TagEvent {
    /// Returns the libplctag-compatible event code.
    ///
    /// # Example
    ///
    /// ```
    /// use plctag_stub::TagEvent;
    ///
    /// assert_eq!(TagEvent::ReadStarted.code(), 1);
    /// assert_eq!(TagEvent::Aborted.code(), 5);
    /// ```
    pub fn code(self) -> i32 {
        match self {
            TagEvent::ReadStarted => 1,
            TagEvent::ReadCompleted => 2,
            TagEvent::WriteStarted => 3,
            TagEvent::WriteCompleted => 4,
            TagEvent::Aborted => 5,
        }
    }
}

impl std::fmt::Display for TagEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagEvent::ReadStarted => write!(f, "READ_STARTED"),
            TagEvent::ReadCompleted => write!(f, "READ_COMPLETED"),
            TagEvent::WriteStarted => write!(f, "WRITE_STARTED"),
            TagEvent::WriteCompleted => write!(f, "WRITE_COMPLETED"),
            TagEvent::Aborted => write!(f, "ABORTED"),
        }
    }
}

/// Direction of a tag access; selects which events it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
}

impl Access {
    pub(crate) fn started(self) -> TagEvent {
        match self {
            Access::Read => TagEvent::ReadStarted,
            Access::Write => TagEvent::WriteStarted,
        }
    }

    pub(crate) fn completed(self) -> TagEvent {
        match self {
            Access::Read => TagEvent::ReadCompleted,
            Access::Write => TagEvent::WriteCompleted,
        }
    }
}

/// Caller-supplied event handler.
///
/// Receives the tag's handle, the event, and the status of the call
/// ([`Status::Ok`] except for [`TagEvent::Aborted`]).
pub type TagCallback = Arc<dyn Fn(TagHandle, TagEvent, Status) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_codes() {
        assert_eq!(TagEvent::ReadStarted.code(), 1);
        assert_eq!(TagEvent::ReadCompleted.code(), 2);
        assert_eq!(TagEvent::WriteStarted.code(), 3);
        assert_eq!(TagEvent::WriteCompleted.code(), 4);
        assert_eq!(TagEvent::Aborted.code(), 5);
    }

    #[test]
    fn test_access_events() {
        assert_eq!(Access::Read.started(), TagEvent::ReadStarted);
        assert_eq!(Access::Read.completed(), TagEvent::ReadCompleted);
        assert_eq!(Access::Write.started(), TagEvent::WriteStarted);
        assert_eq!(Access::Write.completed(), TagEvent::WriteCompleted);
    }

    #[test]
    fn test_display() {
        assert_eq!(TagEvent::WriteCompleted.to_string(), "WRITE_COMPLETED");
        assert_eq!(TagEvent::Aborted.to_string(), "ABORTED");
    }
}
