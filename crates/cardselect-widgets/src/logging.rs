#![forbid(unsafe_code)]

//! Logging support.
//!
//! With the `tracing` feature the macros below are `tracing`'s own. Without
//! it they expand to nothing and spans become [`NoopSpan`], so call sites can
//! log unconditionally.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, debug_span, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    pub(crate) use {debug, debug_span, trace};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop_macros::{debug, debug_span, trace};

/// Span stand-in when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span (does nothing).
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::entered`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
