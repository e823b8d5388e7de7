//! Bounds-checked typed access to a tag's bytes.
//!
//! A [`TagBuffer`] is a zero-initialized, fixed-size byte block. Values are
//! read and written at byte offsets in the host's native byte order; no
//! protocol-level byte swapping is done.
//!
//! Every access is checked against the whole width of the value, so an
//! access is accepted only when `0 <= offset` and `offset + width <= len`.
//! A rejected write leaves the buffer untouched.

use std::ops::Range;

use crate::error::{Result, TagError};

mod private {
    pub trait Sealed {}
}

/// A primitive that can be stored in a tag.
///
/// Implemented for the integer types `u8`..`u64` and `i8`..`i64`, for `f32`
/// and `f64`, and for `bool`, which is stored as a native 4-byte integer.
pub trait TagValue: Copy + private::Sealed {
    /// Number of bytes the value occupies in the buffer.
    const WIDTH: usize;

    /// Decodes a value from exactly `WIDTH` bytes.
    fn decode(bytes: &[u8]) -> Self;

    /// Encodes the value into exactly `WIDTH` bytes.
    fn encode(self, out: &mut [u8]);
}

macro_rules! impl_tag_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}

            impl TagValue for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }

                fn encode(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_tag_value!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl private::Sealed for bool {}

impl TagValue for bool {
    const WIDTH: usize = std::mem::size_of::<i32>();

    fn decode(bytes: &[u8]) -> Self {
        i32::decode(bytes) != 0
    }

    fn encode(self, out: &mut [u8]) {
        i32::from(self).encode(out);
    }
}

/// Fixed-size, zero-initialized byte storage for one tag.
///
/// # Example
///
/// ```
/// use plctag_stub::TagBuffer;
///
/// let mut buf = TagBuffer::new(8);
/// buf.write(4, 42i32).unwrap();
/// assert_eq!(buf.read::<i32>(4).unwrap(), 42);
/// assert!(buf.read::<i32>(6).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBuffer {
    bytes: Vec<u8>,
}

impl TagBuffer {
    /// Creates a zero-filled buffer of `len` bytes.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0; len],
        }
    }

    /// Returns the capacity in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the whole buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Resolves `offset`/`width` into a byte range inside the buffer.
    ///
    /// # Errors
    ///
    /// Returns `TagError::OutOfBounds` if the offset is negative or the range
    /// does not fit.
    pub fn range(&self, offset: i32, width: usize) -> Result<Range<usize>> {
        let out_of_bounds = || TagError::out_of_bounds(i64::from(offset), width, self.len());
        let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
        let end = start
            .checked_add(width)
            .filter(|&end| end <= self.len())
            .ok_or_else(out_of_bounds)?;
        Ok(start..end)
    }

    /// Reads a `T` at `offset`.
    pub fn read<T: TagValue>(&self, offset: i32) -> Result<T> {
        let range = self.range(offset, T::WIDTH)?;
        Ok(T::decode(&self.bytes[range]))
    }

    /// Writes `value` at `offset`.
    pub fn write<T: TagValue>(&mut self, offset: i32, value: T) -> Result<()> {
        let range = self.range(offset, T::WIDTH)?;
        value.encode(&mut self.bytes[range]);
        Ok(())
    }

    /// Copies `len` bytes starting at `offset`.
    pub fn read_bytes(&self, offset: i32, len: usize) -> Result<Vec<u8>> {
        let range = self.range(offset, len)?;
        Ok(self.bytes[range].to_vec())
    }

    /// Overwrites bytes starting at `offset` with `data`.
    pub fn write_bytes(&mut self, offset: i32, data: &[u8]) -> Result<()> {
        let range = self.range(offset, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }
}
