use kurbo::Point;

use crate::{LogicalIndex, RealIndex};

/// Data source for the pages shown by a [`crate::PagedScrollEngine`].
///
/// The engine never builds page visuals itself. It asks the provider for a page when an index
/// scrolls into the visible window and hands it back when the index leaves. Implementations may
/// allocate and drop, show and hide existing objects, or reuse objects from a pool.
pub trait PageProvider {
    /// Handle to a materialized page. The engine stores one per visible real index.
    type Page;

    fn page_count(&self) -> usize;

    /// Distance between adjacent page offsets. Queried on every use, never cached.
    fn spacing(&self) -> f64;

    fn provide_page(&mut self, index: LogicalIndex) -> Self::Page;

    /// Called when a page scrolls out of view or the engine is reset.
    fn remove_page(&mut self, index: LogicalIndex, page: Self::Page);
}

/// A single-pointer touch surface, polled once per [`crate::PagedScrollEngine::update`].
pub trait TouchInputSource {
    fn is_touching(&self) -> bool;

    /// `true` only on the frame the touch started.
    fn touch_down_edge(&self) -> bool;

    /// `true` only on the frame the touch ended.
    fn touch_up_edge(&self) -> bool;

    fn touch_position(&self) -> Point;
}

/// Input source that never reports a touch.
///
/// Use this when the host feeds gestures through `touch_down`/`touch_move`/`touch_up` directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTouchInput;

impl TouchInputSource for NoTouchInput {
    fn is_touching(&self) -> bool {
        false
    }

    fn touch_down_edge(&self) -> bool {
        false
    }

    fn touch_up_edge(&self) -> bool {
        false
    }

    fn touch_position(&self) -> Point {
        Point::ZERO
    }
}

/// Per-page data handed to every [`ScrollEffect`] on each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEffectUpdate {
    pub real_index: RealIndex,
    pub logical_index: LogicalIndex,
    pub page_count: usize,
    /// Offset at which this page is centered.
    pub page_offset: f64,
    pub scroll_offset: f64,
    pub spacing: f64,
    pub looping: bool,
    pub is_interactable: bool,
    /// Distance between the target and current offsets.
    pub move_distance: f64,
}

/// A cosmetic observer of scrolling (fade, translate, ...).
///
/// Effects run once per visible page per tick and must not assume anything about call order
/// between pages.
pub trait ScrollEffect<H> {
    fn apply(&mut self, page: &mut H, update: &ScrollEffectUpdate);

    /// Disabled effects are skipped.
    fn enabled(&self) -> bool {
        true
    }
}

impl<H, F: FnMut(&mut H, &ScrollEffectUpdate)> ScrollEffect<H> for F {
    fn apply(&mut self, page: &mut H, update: &ScrollEffectUpdate) {
        self(page, update);
    }
}
