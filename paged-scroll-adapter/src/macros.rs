// Logging shims, see `paged_scroll`'s equivalents. Compiled out without the `tracing` feature.

#[cfg(feature = "tracing")]
macro_rules! adebug {
    ($($tt:tt)*) => { tracing::debug!(target: "paged_scroll_adapter", $($tt)*) };
}

#[cfg(feature = "tracing")]
macro_rules! awarn {
    ($($tt:tt)*) => { tracing::warn!(target: "paged_scroll_adapter", $($tt)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adebug {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! awarn {
    ($($tt:tt)*) => {};
}
