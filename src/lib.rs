//! # PLC Tag Stub
//!
//! An in-memory stand-in for a PLC tag-access library. Client code creates
//! named tags, reads and writes typed values inside them, and subscribes to
//! read/write events, all without a controller or network behind it.
//!
//! The stub exists so that code written against a tag library can be tested
//! deterministically.
//!
//! ## Features
//!
//! - **No I/O** — every tag is a zero-initialized block of process memory
//! - **Deterministic** — handles are assigned 1, 2, 3, ... and events fire in
//!   a fixed order
//! - **Bounds-checked** — typed accesses never read or write outside a tag
//! - **Thread-safe** — one lock per tag, one registry lock, never nested
//! - **No panics** — all errors returned as `Result<T, TagError>`
//!
//! ## Quick Start
//!
//! ```
//! use plctag_stub::{PlcStub, StubConfig};
//!
//! fn main() -> plctag_stub::Result<()> {
//!     let stub = PlcStub::new(StubConfig::default());
//!
//!     // Two 4-byte elements: an 8-byte tag
//!     let tag = stub.create_tag("protocol=ab_eip&name=Counter&elem_size=4&elem_count=2", 1000)?;
//!
//!     stub.set_int32(tag, 0, 42)?;
//!     stub.set_float32(tag, 4, 21.5)?;
//!
//!     assert_eq!(stub.get_int32(tag, 0)?, 42);
//!     assert_eq!(stub.get_float32(tag, 4)?, 21.5);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Events
//!
//! A tag may carry one callback. Every access delivers `*Started` followed by
//! `*Completed`, or by [`TagEvent::Aborted`] when the access is rejected:
//!
//! ```
//! use plctag_stub::{PlcStub, Status, StubConfig, TagEvent};
//! use std::sync::{Arc, Mutex};
//!
//! let stub = PlcStub::new(StubConfig::default());
//! let tag = stub.create_tag("name=Valve&elem_size=2&elem_count=1", 0).unwrap();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! stub.register_callback(tag, move |_, event, status| {
//!     sink.lock().unwrap().push((event, status));
//! }).unwrap();
//!
//! assert!(stub.get_uint16(tag, 1).is_err());
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     vec![(TagEvent::ReadStarted, Status::Ok), (TagEvent::Aborted, Status::BadParameter)]
//! );
//! ```
//!
//! Callbacks run on the caller's thread with the tag locked. A callback that
//! calls back into the same tag deadlocks.
//!
//! ## Error Handling
//!
//! ```
//! use plctag_stub::{PlcStub, StubConfig, TagError, TagHandle};
//!
//! let stub = PlcStub::new(StubConfig::default());
//!
//! match stub.get_int32(TagHandle::from(5), 0) {
//!     Ok(value) => println!("value = {}", value),
//!     Err(TagError::NotFound { handle }) => println!("no tag {}", handle),
//!     Err(TagError::OutOfBounds { offset, .. }) => println!("bad offset {}", offset),
//!     Err(e) => println!("error: {} (code {})", e, e.status().code()),
//! }
//! ```
//!
//! ## Configuration
//!
//! ```
//! use plctag_stub::{GeometryMode, PlcStub, StubConfig};
//!
//! let config = StubConfig::default()
//!     .with_name_prefix("SIM")                   // default: DUMMY_AQUA_DATA
//!     .with_geometry(GeometryMode::Defaulted);   // default: Strict
//! let stub = PlcStub::new(config);
//!
//! let tag = stub.create_tag("name=Flow", 0).unwrap();
//! assert_eq!(stub.name(tag).unwrap(), "SIM_Flow");
//! assert_eq!(stub.size(tag).unwrap(), 2);
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod debug;

mod attributes;
mod buffer;
mod error;
mod event;
mod handle;
mod registry;
mod stub;
mod tag;

// Public re-exports
pub use attributes::{
    GeometryMode, TagAttributes, DEFAULT_ELEM_COUNT, DEFAULT_ELEM_SIZE, ENTRY_SEPARATOR,
};
pub use buffer::{TagBuffer, TagValue};
pub use debug::DebugLevel;
pub use error::{
    status_description, Result, Status, TagError, ERR_BAD_PARAM, ERR_NOT_FOUND, STATUS_OK,
};
pub use event::{TagCallback, TagEvent};
pub use handle::TagHandle;
pub use registry::DEFAULT_NAME_PREFIX;
pub use stub::{PlcStub, StubConfig};
