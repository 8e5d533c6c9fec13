use crate::RealIndex;

/// Errors reported by [`crate::PagedScrollEngine`].
///
/// `MissingProvider` is fatal and only comes out of the builder. The other variants come from
/// per-call validation: the engine logs them, leaves its state untouched and returns them so
/// callers can react if they care.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("paged scroll engine requires a page provider")]
    MissingProvider,
    #[error("attempted to snap to non-existent page {index} (page count {count})")]
    PageOutOfRange { index: RealIndex, count: usize },
    #[error("page is not currently visible, cannot snap to it")]
    PageNotVisible,
}
