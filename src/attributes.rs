//! Tag attribute strings.
//!
//! Tags are described by an ampersand-separated list of `key=value` pairs,
//! the same format real tag libraries accept:
//!
//! ```text
//! protocol=ab_eip&gateway=10.0.0.2&path=1,0&name=Counter&elem_size=4&elem_count=10
//! ```
//!
//! Only `name`, `elem_size` and `elem_count` matter to the stub. Other pairs
//! are kept for inspection and otherwise ignored. The bare token `protocol` is
//! the single entry allowed without a value.
//!
//! # Example
//!
//! ```
//! use plctag_stub::{GeometryMode, TagAttributes};
//!
//! let attrs = TagAttributes::parse("name=Foo&elem_size=4&elem_count=10").unwrap();
//! assert_eq!(attrs.name().unwrap(), "Foo");
//! assert_eq!(attrs.geometry(GeometryMode::Strict).unwrap(), (4, 10));
//! ```

use std::collections::BTreeMap;

use crate::debug::{tag_log, DebugLevel};
use crate::error::{Result, TagError};

/// Separator between attribute entries.
pub const ENTRY_SEPARATOR: char = '&';

/// Element size used by [`GeometryMode::Defaulted`] when none is given.
pub const DEFAULT_ELEM_SIZE: usize = 2;

/// Element count used by [`GeometryMode::Defaulted`] when none is given.
pub const DEFAULT_ELEM_COUNT: usize = 1;

/// How missing tag geometry is handled at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryMode {
    /// `elem_size` and `elem_count` must both be present and non-zero.
    #[default]
    Strict,
    /// Absent `elem_size`/`elem_count` fall back to
    /// [`DEFAULT_ELEM_SIZE`]/[`DEFAULT_ELEM_COUNT`]. Kept for clients written
    /// against older stubs that filled them in silently.
    Defaulted,
}

/// Fields parsed out of a tag attribute string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttributes {
    name: Option<String>,
    elem_size: Option<usize>,
    elem_count: Option<usize>,
    extra: BTreeMap<String, String>,
}

impl TagAttributes {
    /// Parses an attribute string.
    ///
    /// Empty entries are skipped. A repeated key overwrites the earlier value.
    ///
    /// # Errors
    ///
    /// Returns `TagError::BadParameter` if:
    /// - An entry other than `protocol` lacks an `=`
    /// - `elem_size` or `elem_count` is not an unsigned integer
    ///
    /// # Example
    ///
    /// ```
    /// use plctag_stub::TagAttributes;
    ///
    /// let attrs = TagAttributes::parse("protocol&name=Foo&path=1,0").unwrap();
    /// assert_eq!(attrs.get("path"), Some("1,0"));
    ///
    /// assert!(TagAttributes::parse("name=Foo&bogus").is_err());
    /// ```
    pub fn parse(attributes: &str) -> Result<Self> {
        let mut parsed = TagAttributes::default();

        for entry in attributes.split(ENTRY_SEPARATOR).filter(|e| !e.is_empty()) {
            tag_log!(DebugLevel::Spew, "Current kv-pair: {}", entry);

            let Some((key, value)) = entry.split_once('=') else {
                if entry == "protocol" {
                    continue;
                }
                tag_log!(
                    DebugLevel::Warn,
                    "Missing '=' in non-'protocol' attribute {}",
                    entry
                );
                return Err(TagError::bad_parameter(
                    "attributes",
                    format!("entry '{entry}' is not a key=value pair"),
                ));
            };
            tag_log!(DebugLevel::Spew, "key={},val={}", key, value);

            match key {
                "name" => {
                    if parsed.name.is_some() {
                        tag_log!(DebugLevel::Warn, "Overwriting attribute {}", key);
                    }
                    parsed.name = Some(value.to_string());
                }
                "elem_size" => {
                    if parsed.elem_size.is_some() {
                        tag_log!(DebugLevel::Warn, "Overwriting attribute {}", key);
                    }
                    parsed.elem_size = Some(parse_count(key, value)?);
                }
                "elem_count" => {
                    if parsed.elem_count.is_some() {
                        tag_log!(DebugLevel::Warn, "Overwriting attribute {}", key);
                    }
                    parsed.elem_count = Some(parse_count(key, value)?);
                }
                _ => {
                    parsed.extra.insert(key.to_string(), value.to_string());
                }
            }
        }

        Ok(parsed)
    }

    /// Returns the logical tag name.
    ///
    /// # Errors
    ///
    /// Returns `TagError::BadParameter` if no `name` was given.
    pub fn name(&self) -> Result<&str> {
        self.name.as_deref().ok_or_else(|| {
            tag_log!(DebugLevel::Warn, "Missing attribute {}", "name");
            TagError::bad_parameter("name", "missing attribute")
        })
    }

    /// Resolves `(elem_size, elem_count)` under the given mode.
    ///
    /// # Errors
    ///
    /// Returns `TagError::BadParameter` if a value is zero, or absent in
    /// [`GeometryMode::Strict`].
    ///
    /// # Example
    ///
    /// ```
    /// use plctag_stub::{GeometryMode, TagAttributes};
    ///
    /// let attrs = TagAttributes::parse("name=Foo").unwrap();
    /// assert!(attrs.geometry(GeometryMode::Strict).is_err());
    /// assert_eq!(attrs.geometry(GeometryMode::Defaulted).unwrap(), (2, 1));
    /// ```
    pub fn geometry(&self, mode: GeometryMode) -> Result<(usize, usize)> {
        let (size, count) = match mode {
            GeometryMode::Strict => (self.elem_size, self.elem_count),
            GeometryMode::Defaulted => (
                self.elem_size.or(Some(DEFAULT_ELEM_SIZE)),
                self.elem_count.or(Some(DEFAULT_ELEM_COUNT)),
            ),
        };
        Ok((require("elem_size", size)?, require("elem_count", count)?))
    }

    /// Returns the raw value of an attribute the stub does not interpret.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        tag_log!(DebugLevel::Warn, "Attribute {} has non-numeric value {}", key, value);
        TagError::bad_parameter(key, format!("'{value}' is not an unsigned integer"))
    })
}

fn require(key: &str, value: Option<usize>) -> Result<usize> {
    match value {
        Some(v) if v > 0 => Ok(v),
        Some(_) => {
            tag_log!(DebugLevel::Warn, "Attribute {} must be greater than 0", key);
            Err(TagError::bad_parameter(key, "must be greater than 0"))
        }
        None => {
            tag_log!(DebugLevel::Warn, "Missing attribute {}", key);
            Err(TagError::bad_parameter(key, "missing attribute"))
        }
    }
}
