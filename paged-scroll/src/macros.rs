// Logging shims. With the `tracing` feature disabled every macro expands to nothing, so field
// expressions passed to them must be free of side effects.

#[cfg(feature = "tracing")]
macro_rules! ptrace {
    ($($tt:tt)*) => { tracing::trace!(target: "paged_scroll", $($tt)*) };
}

#[cfg(feature = "tracing")]
macro_rules! pdebug {
    ($($tt:tt)*) => { tracing::debug!(target: "paged_scroll", $($tt)*) };
}

#[cfg(feature = "tracing")]
macro_rules! pwarn {
    ($($tt:tt)*) => { tracing::warn!(target: "paged_scroll", $($tt)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ptrace {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! pdebug {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! pwarn {
    ($($tt:tt)*) => {};
}
