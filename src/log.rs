//! Conditional logging macros.
//!
//! With the `tracing` feature these re-export the `tracing` macros. Without it they
//! expand to nothing.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

/// No-op stand-in for `tracing::debug!`.
#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

/// No-op stand-in for `tracing::warn!`.
#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use crate::{debug, warn};
