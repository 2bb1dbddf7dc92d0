#![allow(dead_code)]

//! Internal logging macros. Without the `logging` feature the arguments are
//! still type-checked but nothing is emitted.

macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: $target, $($arg)+);
        #[cfg(not(feature = "logging"))]
        { let _ = ($target, format_args!($($arg)+)); }
    );
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: "dynarr", $($arg)+);
        #[cfg(not(feature = "logging"))]
        { let _ = format_args!($($arg)+); }
    )
}

macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: $target, $($arg)+);
        #[cfg(not(feature = "logging"))]
        { let _ = ($target, format_args!($($arg)+)); }
    );
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: "dynarr", $($arg)+);
        #[cfg(not(feature = "logging"))]
        { let _ = format_args!($($arg)+); }
    )
}
