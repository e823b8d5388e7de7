//! Opaque tag handles.

/// Opaque identifier for a tag, handed out by tag creation.
///
/// Handles start at 1 and are never reused. Any integer can be turned into a
/// handle, but only those returned by creation resolve to a tag.
///
/// # Example
///
/// ```
/// use plctag_stub::TagHandle;
///
/// let handle = TagHandle::from(7);
/// assert_eq!(handle.id(), 7);
/// assert_eq!(handle.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagHandle(i32);

impl TagHandle {
    /// The handle assigned to the first tag of an empty registry.
    pub const FIRST: TagHandle = TagHandle(1);

    /// Returns the raw integer id.
    pub fn id(self) -> i32 {
        self.0
    }

    /// Returns the handle following this one, or `None` once ids run out.
    pub(crate) fn next(self) -> Option<TagHandle> {
        self.0.checked_add(1).map(TagHandle)
    }
}

impl From<i32> for TagHandle {
    fn from(id: i32) -> Self {
        TagHandle(id)
    }
}

impl From<TagHandle> for i32 {
    fn from(handle: TagHandle) -> Self {
        handle.0
    }
}

impl std::fmt::Display for TagHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
