//! Crate-internal logging macros.
//!
//! Events go through `tracing` when the `tracing` feature is enabled and
//! compile to nothing otherwise. The crate never installs a subscriber.

macro_rules! log_debug {
    ($($argument:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($argument)*);
    }};
}

macro_rules! log_trace {
    ($($argument:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($argument)*);
    }};
}

pub(crate) use log_debug;
pub(crate) use log_trace;
