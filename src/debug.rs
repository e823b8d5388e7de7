//! Process-wide diagnostic verbosity.
//!
//! The stub keeps a single debug level for the whole process. Messages are
//! emitted through [`tracing`] only when their level is at or below the
//! configured one, so a subscriber sees nothing until the level is raised.
//!
//! # Example
//!
//! ```
//! use plctag_stub::DebugLevel;
//!
//! assert_eq!(DebugLevel::from(3), DebugLevel::Info);
//! assert_eq!(DebugLevel::from(-1), DebugLevel::None);
//! assert_eq!(DebugLevel::from(99), DebugLevel::Spew);
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

/// Verbosity of the stub's diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DebugLevel {
    /// No output.
    #[default]
    None = 0,
    /// Errors only.
    Error = 1,
    /// Errors and warnings.
    Warn = 2,
    /// General information.
    Info = 3,
    /// Detailed tracing of operations.
    Detail = 4,
    /// Everything, including per-attribute and per-callback messages.
    Spew = 5,
}

impl DebugLevel {
    /// Returns the numeric verbosity.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<i32> for DebugLevel {
    fn from(level: i32) -> Self {
        match level {
            i32::MIN..=0 => DebugLevel::None,
            1 => DebugLevel::Error,
            2 => DebugLevel::Warn,
            3 => DebugLevel::Info,
            4 => DebugLevel::Detail,
            _ => DebugLevel::Spew,
        }
    }
}

static LEVEL: AtomicU8 = AtomicU8::new(DebugLevel::None as u8);

/// Returns the current process-wide debug level.
pub fn level() -> DebugLevel {
    DebugLevel::from(i32::from(LEVEL.load(Ordering::Relaxed)))
}

/// Sets the process-wide debug level.
pub fn set_level(level: DebugLevel) {
    LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Returns whether messages at `at` should be emitted.
pub(crate) fn enabled(at: DebugLevel) -> bool {
    at != DebugLevel::None && at <= level()
}

/// Emits a [`tracing`] event if the process-wide level allows it.
macro_rules! tag_log {
    ($level:expr, $($arg:tt)+) => {{
        let at: $crate::debug::DebugLevel = $level;
        if $crate::debug::enabled(at) {
            match at {
                $crate::debug::DebugLevel::None => {}
                $crate::debug::DebugLevel::Error => ::tracing::error!($($arg)+),
                $crate::debug::DebugLevel::Warn => ::tracing::warn!($($arg)+),
                $crate::debug::DebugLevel::Info => ::tracing::info!($($arg)+),
                $crate::debug::DebugLevel::Detail => ::tracing::debug!($($arg)+),
                $crate::debug::DebugLevel::Spew => ::tracing::trace!($($arg)+),
            }
        }
    }};
}

pub(crate) use tag_log;

/// Serializes tests that change the process-wide level.
#[cfg(test)]
pub(crate) static TEST_LEVEL_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_i32_clamps() {
        assert_eq!(DebugLevel::from(i32::MIN), DebugLevel::None);
        assert_eq!(DebugLevel::from(0), DebugLevel::None);
        assert_eq!(DebugLevel::from(1), DebugLevel::Error);
        assert_eq!(DebugLevel::from(2), DebugLevel::Warn);
        assert_eq!(DebugLevel::from(4), DebugLevel::Detail);
        assert_eq!(DebugLevel::from(5), DebugLevel::Spew);
        assert_eq!(DebugLevel::from(i32::MAX), DebugLevel::Spew);
    }

    #[test]
    fn test_as_i32() {
        assert_eq!(DebugLevel::Warn.as_i32(), 2);
        assert_eq!(DebugLevel::default().as_i32(), 0);
    }

    #[test]
    fn test_none_is_never_enabled() {
        assert!(!enabled(DebugLevel::None));
    }

    #[test]
    fn test_enabled_threshold() {
        let _guard = TEST_LEVEL_LOCK.lock();
        let before = level();

        set_level(DebugLevel::Warn);
        assert!(enabled(DebugLevel::Error));
        assert!(enabled(DebugLevel::Warn));
        assert!(!enabled(DebugLevel::Info));
        assert!(!enabled(DebugLevel::None));

        set_level(DebugLevel::Error);
        assert!(enabled(DebugLevel::Error));
        assert!(!enabled(DebugLevel::Warn));

        set_level(DebugLevel::Spew);
        assert!(enabled(DebugLevel::Warn));
        assert!(enabled(DebugLevel::Spew));

        set_level(DebugLevel::None);
        assert!(!enabled(DebugLevel::Error));

        set_level(before);
    }
}
