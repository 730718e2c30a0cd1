//! Format-argument convenience macros over the [`Logger`](crate::Logger)
//! entry points.

/// Logs a formatted message at Debug.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format!($($arg)+))
    };
}

/// Logs a formatted message at Info.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format!($($arg)+))
    };
}

/// Logs a formatted message at Warning; evaluates to the message as an
/// [`Error`](crate::Error) value.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format!($($arg)+))
    };
}

/// Logs a formatted message at Error; evaluates to the message as an
/// [`Error`](crate::Error) value.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}

/// Logs a formatted message at Error with a captured backtrace.
#[macro_export]
macro_rules! log_error_stack {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error_stack(format!($($arg)+))
    };
}
