use alloc::sync::Arc;

use crate::{PageWindow, RealIndex, ScrollEvent};

/// A callback fired for every [`ScrollEvent`].
pub type OnEventCallback = Arc<dyn Fn(ScrollEvent) + Send + Sync>;

/// Empirically tuned gesture constants.
///
/// The defaults were tuned for a small circular touchpad with positions normalized to `0..1`.
/// Retune them together for other input surfaces.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureTuning {
    /// Horizontal travel (touch units) before a touch counts as a scroll rather than a click.
    pub click_threshold: f64,
    /// Filtered horizontal velocity (touch units per second) needed for a swipe.
    pub swipe_threshold: f64,
    /// Bias, in page spacings, added to the target before rounding on a swipe.
    pub swipe_bias_coeff: f64,
    /// Move distance, in page spacings, above which the engine reports `is_moving`.
    pub moving_threshold_coeff: f64,
    /// Remaining distance, in page spacings, at which a snap lands on its target exactly.
    pub snap_epsilon_coeff: f64,
    /// Cutoff frequency of the velocity low-pass filter.
    pub velocity_cutoff_hz: f64,
    /// Touch samples closer together than this (seconds) are treated as duplicates.
    pub timestamp_epsilon: f64,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            click_threshold: 0.15,
            swipe_threshold: 0.75,
            swipe_bias_coeff: 0.55,
            moving_threshold_coeff: 0.1,
            snap_epsilon_coeff: 0.002,
            velocity_cutoff_hz: 10.0,
            timestamp_epsilon: 1.0e-7,
        }
    }
}

/// Configuration for [`crate::PagedScrollEngine`].
///
/// Cheap to clone: the event callback is stored in an `Arc`.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PagedScrollOptions {
    /// Multiplier applied to horizontal touch travel.
    pub scroll_sensitivity: f64,
    /// Rate (per second) at which the offset closes the gap to its target.
    pub snap_speed: f64,
    /// Page shown after construction and after [`crate::PagedScrollEngine::reset`].
    pub start_page: RealIndex,
    /// Scroll continuously in either direction with pages wrapping around.
    pub looping: bool,
    /// Require the pointer to hover the region before touches scroll it.
    pub only_scroll_when_pointing: bool,
    pub scrolling_enabled: bool,
    /// Extra pages kept on each side of the active page. `0` shows only the active page at rest.
    pub extra_pages_shown: usize,
    /// Keep the outermost extra pages visible while at rest.
    pub show_next_pages_at_rest: bool,
    /// When `false`, only the active page is reported as interactable to scroll effects.
    pub tiles_always_interactable: bool,
    pub tuning: GestureTuning,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_event: Option<OnEventCallback>,
}

impl Default for PagedScrollOptions {
    fn default() -> Self {
        Self {
            scroll_sensitivity: 1.0,
            snap_speed: 6.0,
            start_page: 0,
            looping: false,
            only_scroll_when_pointing: true,
            scrolling_enabled: true,
            extra_pages_shown: 0,
            show_next_pages_at_rest: false,
            tiles_always_interactable: true,
            tuning: GestureTuning::default(),
            on_event: None,
        }
    }
}

impl PagedScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scroll_sensitivity(mut self, scroll_sensitivity: f64) -> Self {
        self.scroll_sensitivity = scroll_sensitivity;
        self
    }

    pub fn with_snap_speed(mut self, snap_speed: f64) -> Self {
        self.snap_speed = snap_speed;
        self
    }

    pub fn with_start_page(mut self, start_page: RealIndex) -> Self {
        self.start_page = start_page;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_only_scroll_when_pointing(mut self, only_scroll_when_pointing: bool) -> Self {
        self.only_scroll_when_pointing = only_scroll_when_pointing;
        self
    }

    pub fn with_scrolling_enabled(mut self, scrolling_enabled: bool) -> Self {
        self.scrolling_enabled = scrolling_enabled;
        self
    }

    pub fn with_extra_pages_shown(mut self, extra_pages_shown: usize) -> Self {
        self.extra_pages_shown = extra_pages_shown;
        self
    }

    pub fn with_show_next_pages_at_rest(mut self, show_next_pages_at_rest: bool) -> Self {
        self.show_next_pages_at_rest = show_next_pages_at_rest;
        self
    }

    pub fn with_tiles_always_interactable(mut self, tiles_always_interactable: bool) -> Self {
        self.tiles_always_interactable = tiles_always_interactable;
        self
    }

    pub fn with_tuning(mut self, tuning: GestureTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: Option<impl Fn(ScrollEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn window(&self) -> PageWindow {
        PageWindow {
            looping: self.looping,
            extra_pages_shown: self.extra_pages_shown,
            show_next_pages_at_rest: self.show_next_pages_at_rest,
        }
    }
}

impl core::fmt::Debug for PagedScrollOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagedScrollOptions")
            .field("scroll_sensitivity", &self.scroll_sensitivity)
            .field("snap_speed", &self.snap_speed)
            .field("start_page", &self.start_page)
            .field("looping", &self.looping)
            .field("only_scroll_when_pointing", &self.only_scroll_when_pointing)
            .field("scrolling_enabled", &self.scrolling_enabled)
            .field("extra_pages_shown", &self.extra_pages_shown)
            .field("show_next_pages_at_rest", &self.show_next_pages_at_rest)
            .field("tiles_always_interactable", &self.tiles_always_interactable)
            .field("tuning", &self.tuning)
            .finish_non_exhaustive()
    }
}
