use kurbo::Point;

/// Page identity in scroll-offset space.
///
/// Unbounded when looping: every full revolution moves the real index by `page_count` while the
/// [`LogicalIndex`] wraps.
pub type RealIndex = i64;

/// Page identity in the provider's address space, always in `0..page_count`.
pub type LogicalIndex = usize;

/// Maps a real index to the provider's logical index using floored modulo.
///
/// Negative real indexes resolve to a valid logical index (`-1` with 5 pages is page `4`).
/// Returns `None` when `page_count` is zero.
pub fn logical_index(real_index: RealIndex, page_count: usize) -> Option<LogicalIndex> {
    if page_count == 0 {
        return None;
    }
    let count = i64::try_from(page_count).ok()?;
    usize::try_from(real_index.rem_euclid(count)).ok()
}

/// The scroll offset at which page `real_index` is centered.
pub fn offset_from_index(real_index: RealIndex, spacing: f64) -> f64 {
    real_index as f64 * spacing
}

/// Result of mapping a scroll offset back to a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexLookup {
    pub real_index: RealIndex,
    /// `true` when the rounded index fell outside `0..page_count` and was clamped.
    pub did_clamp: bool,
}

/// Rounds `offset / spacing` to the nearest page.
///
/// When `looping` is off the result is clamped to `0..page_count` and `did_clamp` reports whether
/// that changed it. Callers must ensure `spacing > 0` and `page_count > 0`.
pub fn index_from_offset(offset: f64, spacing: f64, page_count: usize, looping: bool) -> IndexLookup {
    let index = (offset / spacing).round() as RealIndex;
    if looping {
        return IndexLookup {
            real_index: index,
            did_clamp: false,
        };
    }
    let last = RealIndex::try_from(page_count)
        .unwrap_or(RealIndex::MAX)
        .saturating_sub(1)
        .max(0);
    let clamped = index.clamp(0, last);
    IndexLookup {
        real_index: clamped,
        did_clamp: clamped != index,
    }
}

/// A page reference carried by events: both of its identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRef {
    pub real_index: RealIndex,
    pub logical_index: LogicalIndex,
}

/// Coarse engine state as seen by hosts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    /// A touch is down but has not moved far enough horizontally to count as a scroll.
    Tracking,
    /// The touch is translating the target offset directly.
    Scrolling,
    /// The offset is animating toward a page.
    Snapping,
}

/// Which page a released gesture settles on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapDirection {
    /// Toward lower indexes (the finger moved right).
    Left,
    /// Toward higher indexes (the finger moved left).
    Right,
    Closest,
}

/// Notifications emitted through [`crate::PagedScrollOptions::on_event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollEvent {
    ActivePageChanged {
        previous: Option<PageRef>,
        next: PageRef,
    },
    SwipeLeft,
    SwipeRight,
    SnapClosest,
}

/// One touch position with the time it was observed, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    pub position: Point,
    pub time: f64,
}

impl TouchSample {
    pub fn new(position: Point, time: f64) -> Self {
        Self { position, time }
    }
}
