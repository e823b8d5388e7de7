//! Error and status types for tag operations.

use thiserror::Error;

use crate::handle::TagHandle;

/// Result type alias for tag operations.
pub type Result<T> = std::result::Result<T, TagError>;

/// Numeric status code for success.
pub const STATUS_OK: i32 = 0;
/// Numeric status code for a malformed argument.
pub const ERR_BAD_PARAM: i32 = -7;
/// Numeric status code for an unknown tag handle.
pub const ERR_NOT_FOUND: i32 = -19;

/// Errors returned by the stub's public operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    /// A caller-supplied argument was rejected.
    #[error("Invalid parameter '{parameter}': {reason}")]
    BadParameter {
        /// Name of the rejected parameter.
        parameter: String,
        /// Why the parameter was rejected.
        reason: String,
    },

    /// An access addressed bytes outside the tag's buffer.
    #[error("Access of {width} bytes at offset {offset} is outside a {capacity}-byte tag")]
    OutOfBounds {
        /// Requested byte offset.
        offset: i64,
        /// Width of the access in bytes.
        width: usize,
        /// Total capacity of the tag in bytes.
        capacity: usize,
    },

    /// No tag exists with the given handle.
    #[error("Tag {handle} not found")]
    NotFound {
        /// The handle that failed to resolve.
        handle: TagHandle,
    },
}

impl TagError {
    /// Creates a new `BadParameter` error.
    ///
    /// # Example
    ///
    /// ```
    /// use plctag_stub::TagError;
    ///
    /// let err = TagError::bad_parameter("timeout", "must not be negative");
    /// assert_eq!(err.to_string(), "Invalid parameter 'timeout': must not be negative");
    /// ```
    pub fn bad_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `OutOfBounds` error.
    pub fn out_of_bounds(offset: i64, width: usize, capacity: usize) -> Self {
        Self::OutOfBounds {
            offset,
            width,
            capacity,
        }
    }

    /// Creates a new `NotFound` error.
    pub fn not_found(handle: TagHandle) -> Self {
        Self::NotFound { handle }
    }

    /// Returns the status this error reports to callers and callbacks.
    ///
    /// Bounds failures are reported as [`Status::BadParameter`].
    ///
    /// # Example
    ///
    /// ```
    /// use plctag_stub::{Status, TagError};
    ///
    /// assert_eq!(TagError::out_of_bounds(8, 4, 8).status(), Status::BadParameter);
    /// ```
    pub fn status(&self) -> Status {
        match self {
            Self::BadParameter { .. } | Self::OutOfBounds { .. } => Status::BadParameter,
            Self::NotFound { .. } => Status::NotFound,
        }
    }
}

/// Status reported by an operation, with libplctag-compatible codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The operation succeeded.
    Ok,
    /// An argument was malformed or out of range.
    BadParameter,
    /// The tag handle is unknown.
    NotFound,
}

impl Status {
    /// Returns the numeric status code.
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => STATUS_OK,
            Status::BadParameter => ERR_BAD_PARAM,
            Status::NotFound => ERR_NOT_FOUND,
        }
    }

    /// Maps a numeric code back to a status, if it is one the stub produces.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            STATUS_OK => Some(Status::Ok),
            ERR_BAD_PARAM => Some(Status::BadParameter),
            ERR_NOT_FOUND => Some(Status::NotFound),
            _ => None,
        }
    }

    /// Collapses an operation result into its status.
    ///
    /// # Example
    ///
    /// ```
    /// use plctag_stub::{Status, TagError, TagHandle};
    ///
    /// let res: plctag_stub::Result<()> = Err(TagError::not_found(TagHandle::from(3)));
    /// assert_eq!(Status::of(&res), Status::NotFound);
    /// ```
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(status_description(self.code()))
    }
}

/// Returns a human-readable description for a numeric status code.
///
/// # Example
///
/// ```
/// use plctag_stub::status_description;
///
/// assert_eq!(status_description(-19), "Not found");
/// assert_eq!(status_description(42), "Unknown status");
/// ```
pub fn status_description(code: i32) -> &'static str {
    match code {
        STATUS_OK => "OK",
        ERR_BAD_PARAM => "Bad parameter",
        ERR_NOT_FOUND => "Not found",
        _ => "Unknown status",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_parameter_display() {
        let err = TagError::bad_parameter("name", "missing attribute");
        assert_eq!(err.to_string(), "Invalid parameter 'name': missing attribute");
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = TagError::out_of_bounds(8, 4, 8);
        assert_eq!(
            err.to_string(),
            "Access of 4 bytes at offset 8 is outside a 8-byte tag"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = TagError::not_found(TagHandle::from(12));
        assert_eq!(err.to_string(), "Tag 12 not found");
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            TagError::bad_parameter("x", "y").status(),
            Status::BadParameter
        );
        assert_eq!(TagError::out_of_bounds(-1, 1, 4).status(), Status::BadParameter);
        assert_eq!(TagError::not_found(TagHandle::from(1)).status(), Status::NotFound);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Ok.code(), 0);
        assert_eq!(Status::BadParameter.code(), -7);
        assert_eq!(Status::NotFound.code(), -19);
        for status in [Status::Ok, Status::BadParameter, Status::NotFound] {
            assert_eq!(Status::from_code(status.code()), Some(status));
        }
        assert_eq!(Status::from_code(1), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Ok.to_string(), "OK");
        assert_eq!(Status::BadParameter.to_string(), "Bad parameter");
    }
}
