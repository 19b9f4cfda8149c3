//! Logging macros
//!
//! `log_error!`, `log_warn!`, `log_info!`, `log_debug!` and `log_trace!` take
//! a format string and arguments.
//!
//! | Build | Output |
//! |-------|--------|
//! | `embassy` feature | `defmt` at the matching level |
//! | host unit tests | stdout with a `[LEVEL]` prefix |
//! | anything else | nothing (arguments are type-checked, never formatted) |
//!
//! Arguments must format under both `core::fmt` and `defmt`, so call sites
//! pass primitives, `&str` or types deriving `defmt::Format`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:ident, $tag:literal, $($arg:tt)*) => {{
        #[cfg(feature = "embassy")]
        ::defmt::$level!($($arg)*);

        #[cfg(all(not(feature = "embassy"), test))]
        ::std::println!(concat!("[", $tag, "] {}"), ::core::format_args!($($arg)*));

        #[cfg(all(not(feature = "embassy"), not(test)))]
        if false {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log!(error, "ERROR", $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__log!(warn, "WARN", $($arg)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log!(info, "INFO", $($arg)*) };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log!(debug, "DEBUG", $($arg)*) };
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => { $crate::__log!(trace, "TRACE", $($arg)*) };
}
