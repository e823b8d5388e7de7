//! The stub's public entry point.
//!
//! [`PlcStub`] mirrors the surface of a PLC tag library: create a tag from an
//! attribute string, read and write typed values at byte offsets, and
//! subscribe to read/write events. Nothing leaves the process; every tag is a
//! block of memory owned by the stub.
//!
//! # Example
//!
//! ```
//! use plctag_stub::{PlcStub, StubConfig};
//!
//! let stub = PlcStub::new(StubConfig::default());
//!
//! let tag = stub.create_tag("name=X&elem_size=4&elem_count=2", 0)?;
//! assert_eq!(tag.id(), 1);
//!
//! stub.set_int32(tag, 0, 42)?;
//! assert_eq!(stub.get_int32(tag, 0)?, 42);
//!
//! // The buffer is 8 bytes; a 4-byte read at offset 8 runs past the end.
//! assert!(stub.get_int32(tag, 8).is_err());
//! # Ok::<(), plctag_stub::TagError>(())
//! ```
//!
//! # Thread Safety
//!
//! `PlcStub` is `Send + Sync`. Tag creation is serialized; lookups run
//! concurrently. Accesses to one tag are serialized end to end, callback
//! included, while different tags never block each other.

use std::sync::{Arc, OnceLock};

use crate::attributes::{GeometryMode, TagAttributes};
use crate::buffer::TagValue;
use crate::debug::{self, tag_log, DebugLevel};
use crate::error::{Result, Status, TagError};
use crate::event::{Access, TagCallback, TagEvent};
use crate::handle::TagHandle;
use crate::registry::{TagRegistry, DEFAULT_NAME_PREFIX};

/// Configuration for a [`PlcStub`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubConfig {
    /// Prefix joined to every created tag's name with an underscore.
    pub name_prefix: String,
    /// Handling of absent `elem_size`/`elem_count` attributes.
    pub geometry: GeometryMode,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            geometry: GeometryMode::Strict,
        }
    }
}

impl StubConfig {
    /// Sets the tag name prefix (default is `DUMMY_AQUA_DATA`).
    ///
    /// # Example
    ///
    /// ```
    /// use plctag_stub::StubConfig;
    ///
    /// let config = StubConfig::default().with_name_prefix("SIM");
    /// assert_eq!(config.name_prefix, "SIM");
    /// ```
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Sets the geometry mode (default is [`GeometryMode::Strict`]).
    pub fn with_geometry(mut self, geometry: GeometryMode) -> Self {
        self.geometry = geometry;
        self
    }
}

/// In-memory PLC tag service.
pub struct PlcStub {
    registry: TagRegistry,
    geometry: GeometryMode,
}

macro_rules! typed_accessors {
    ($( $ty:ty => $get:ident, $set:ident, $label:literal; )*) => {
        $(
            #[doc = concat!("Reads ", $label, " at byte `offset`. See [`PlcStub::get`].")]
            pub fn $get(&self, handle: TagHandle, offset: i32) -> Result<$ty> {
                self.get::<$ty>(handle, offset)
            }

            #[doc = concat!("Writes ", $label, " at byte `offset`. See [`PlcStub::set`].")]
            pub fn $set(&self, handle: TagHandle, offset: i32, value: $ty) -> Result<()> {
                self.set::<$ty>(handle, offset, value)
            }
        )*
    };
}

impl PlcStub {
    /// Creates a stub with an empty tag registry.
    pub fn new(config: StubConfig) -> Self {
        Self {
            registry: TagRegistry::new(config.name_prefix),
            geometry: config.geometry,
        }
    }

    /// Returns the process-wide stub, built with [`StubConfig::default`] on
    /// first use.
    ///
    /// Tests that need isolation should build their own with
    /// [`PlcStub::new`].
    pub fn global() -> &'static PlcStub {
        static GLOBAL: OnceLock<PlcStub> = OnceLock::new();
        GLOBAL.get_or_init(|| PlcStub::new(StubConfig::default()))
    }

    /// Reports whether the library satisfies the requested version.
    ///
    /// The stub has no compatibility constraints and always returns `true`.
    pub fn check_lib_version(&self, major: i32, minor: i32, patch: i32) -> bool {
        tag_log!(
            DebugLevel::Detail,
            "Version {}.{}.{} requested",
            major,
            minor,
            patch
        );
        true
    }

    /// Returns the process-wide debug level.
    #[doc(alias = "get_debug_level")]
    pub fn debug_level(&self) -> DebugLevel {
        debug::level()
    }

    /// Sets the process-wide debug level. Out-of-range values are clamped.
    pub fn set_debug_level(&self, level: i32) {
        debug::set_level(DebugLevel::from(level));
    }

    /// Creates a tag from an attribute string and returns its handle.
    ///
    /// `timeout` is accepted for API parity; creation completes immediately.
    ///
    /// # Errors
    ///
    /// Returns `TagError::BadParameter` if the attributes are malformed, the
    /// name is missing or empty, or the geometry is missing (in
    /// [`GeometryMode::Strict`]) or zero. No handle is allocated on failure.
    ///
    /// # Example
    ///
    /// ```
    /// use plctag_stub::{PlcStub, StubConfig};
    ///
    /// let stub = PlcStub::new(StubConfig::default());
    /// let tag = stub.create_tag("name=Level&elem_size=2&elem_count=4", 100).unwrap();
    /// assert_eq!(stub.name(tag).unwrap(), "DUMMY_AQUA_DATA_Level");
    /// assert_eq!(stub.size(tag).unwrap(), 8);
    ///
    /// assert!(stub.create_tag("elem_size=4", 0).is_err());
    /// ```
    pub fn create_tag(&self, attributes: &str, timeout: i32) -> Result<TagHandle> {
        tag_log!(
            DebugLevel::Detail,
            "Creating tag from '{}' (timeout {})",
            attributes,
            timeout
        );
        let attrs = TagAttributes::parse(attributes)?;
        let name = attrs.name()?;
        let (elem_size, elem_count) = attrs.geometry(self.geometry)?;
        self.registry.create(name, elem_count, elem_size)
    }

    /// Simulates a read from the controller.
    ///
    /// No data moves; a registered callback sees `ReadStarted` then
    /// `ReadCompleted`.
    ///
    /// # Errors
    ///
    /// Returns `TagError::BadParameter` if `timeout` is negative, or
    /// `TagError::NotFound` if the handle is unknown.
    pub fn read(&self, handle: TagHandle, timeout: i32) -> Result<()> {
        self.round_trip(handle, timeout, Access::Read)
    }

    /// Simulates a write to the controller. Symmetric to [`PlcStub::read`].
    pub fn write(&self, handle: TagHandle, timeout: i32) -> Result<()> {
        self.round_trip(handle, timeout, Access::Write)
    }

    fn round_trip(&self, handle: TagHandle, timeout: i32, access: Access) -> Result<()> {
        if timeout < 0 {
            tag_log!(DebugLevel::Warn, "Timeout must not be negative");
            return Err(TagError::bad_parameter("timeout", "must not be negative"));
        }
        let tag = self.registry.resolve(handle)?;
        tag.access(access, |_| Ok(()))
    }

    /// Returns the tag's status. Always `Ok` for a known tag, since nothing
    /// is ever in flight.
    pub fn status(&self, handle: TagHandle) -> Result<()> {
        self.registry.resolve(handle).map(|_| ())
    }

    /// Registers `callback` for the tag, replacing any previous one.
    ///
    /// The callback runs on the calling thread with the tag's lock held. It
    /// must not call any operation on the same tag.
    ///
    /// # Example
    ///
    /// ```
    /// use plctag_stub::{PlcStub, StubConfig, TagEvent};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let stub = PlcStub::new(StubConfig::default());
    /// let tag = stub.create_tag("name=X&elem_size=1&elem_count=1", 0).unwrap();
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    /// stub.register_callback(tag, move |_, event, _| sink.lock().unwrap().push(event))
    ///     .unwrap();
    ///
    /// stub.set_uint8(tag, 0, 1).unwrap();
    /// assert_eq!(
    ///     *seen.lock().unwrap(),
    ///     vec![TagEvent::WriteStarted, TagEvent::WriteCompleted]
    /// );
    /// ```
    pub fn register_callback<F>(&self, handle: TagHandle, callback: F) -> Result<()>
    where
        F: Fn(TagHandle, TagEvent, Status) + Send + Sync + 'static,
    {
        self.set_callback(handle, Some(Arc::new(callback)))
    }

    /// Removes the tag's callback, if any.
    pub fn unregister_callback(&self, handle: TagHandle) -> Result<()> {
        self.set_callback(handle, None)
    }

    fn set_callback(&self, handle: TagHandle, callback: Option<TagCallback>) -> Result<()> {
        let tag = self.registry.resolve(handle)?;
        tag.set_callback(callback);
        Ok(())
    }

    /// Returns the tag's stored name, including the prefix.
    pub fn name(&self, handle: TagHandle) -> Result<String> {
        Ok(self.registry.resolve(handle)?.name().to_string())
    }

    /// Returns the tag's capacity in bytes.
    pub fn size(&self, handle: TagHandle) -> Result<usize> {
        Ok(self.registry.resolve(handle)?.size())
    }

    /// Returns the size of one element in bytes.
    pub fn element_size(&self, handle: TagHandle) -> Result<usize> {
        Ok(self.registry.resolve(handle)?.elem_size())
    }

    /// Returns the number of elements.
    pub fn element_count(&self, handle: TagHandle) -> Result<usize> {
        Ok(self.registry.resolve(handle)?.elem_count())
    }

    /// Returns the handles of all tags created so far, ascending.
    pub fn tags(&self) -> Vec<TagHandle> {
        self.registry.handles()
    }

    /// Reads a `T` at byte `offset` in the host's byte order.
    ///
    /// Fires `ReadStarted`, then `ReadCompleted` or `Aborted`.
    ///
    /// # Errors
    ///
    /// Returns `TagError::NotFound` if the handle is unknown, or
    /// `TagError::OutOfBounds` unless `0 <= offset` and
    /// `offset + size_of::<T>() <= size`.
    pub fn get<T: TagValue>(&self, handle: TagHandle, offset: i32) -> Result<T> {
        let tag = self.registry.resolve(handle)?;
        tag.access(Access::Read, |data| data.read::<T>(offset))
    }

    /// Writes a `T` at byte `offset` in the host's byte order.
    ///
    /// Fires `WriteStarted`, then `WriteCompleted` or `Aborted`. A rejected
    /// write leaves the tag's bytes unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`PlcStub::get`].
    pub fn set<T: TagValue>(&self, handle: TagHandle, offset: i32, value: T) -> Result<()> {
        let tag = self.registry.resolve(handle)?;
        tag.access(Access::Write, |data| data.write(offset, value))
    }

    /// Copies `len` raw bytes starting at `offset`.
    pub fn get_raw_bytes(&self, handle: TagHandle, offset: i32, len: usize) -> Result<Vec<u8>> {
        let tag = self.registry.resolve(handle)?;
        tag.access(Access::Read, |data| data.read_bytes(offset, len))
    }

    /// Overwrites raw bytes starting at `offset`.
    pub fn set_raw_bytes(&self, handle: TagHandle, offset: i32, bytes: &[u8]) -> Result<()> {
        let tag = self.registry.resolve(handle)?;
        tag.access(Access::Write, |data| data.write_bytes(offset, bytes))
    }

    typed_accessors! {
        bool => get_bit, set_bit, "a bit (stored as a 4-byte integer)";
        u8 => get_uint8, set_uint8, "a `u8`";
        u16 => get_uint16, set_uint16, "a `u16`";
        u32 => get_uint32, set_uint32, "a `u32`";
        u64 => get_uint64, set_uint64, "a `u64`";
        i8 => get_int8, set_int8, "an `i8`";
        i16 => get_int16, set_int16, "an `i16`";
        i32 => get_int32, set_int32, "an `i32`";
        i64 => get_int64, set_int64, "an `i64`";
        f32 => get_float32, set_float32, "an `f32`";
        f64 => get_float64, set_float64, "an `f64`";
    }
}

impl Default for PlcStub {
    fn default() -> Self {
        Self::new(StubConfig::default())
    }
}

impl std::fmt::Debug for PlcStub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlcStub")
            .field("registry", &self.registry)
            .field("geometry", &self.geometry)
            .finish()
    }
}
