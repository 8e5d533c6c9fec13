use paged_scroll::{OffsetMode, PageProvider, PagedScrollEngine, TouchInputSource};

/// Rate (per second) at which an idle scroll bar eases toward the active page.
pub const SCROLL_BAR_LERP_SPEED: f64 = 12.0;

/// A framework-neutral scroll bar bound to a [`PagedScrollEngine`].
///
/// `value` runs from `0` (first page) to `1` (last page) and `size` is the handle size, `1 /
/// page_count`. While idle the bar follows the engine's active page. While dragged it drives the
/// engine through an offset override, and releasing it hands control back so the engine snaps to
/// the closest page.
///
/// Adapters drive it by calling:
/// - `begin_drag` / `end_drag` on pointer down / up over the bar
/// - `drag_to(value)` when the UI reports a new bar position
/// - `update(engine, dt)` each frame, before [`PagedScrollEngine::update`]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollBarAdapter {
    value: f64,
    size: f64,
    dragging: bool,
    lerp_speed: f64,
}

impl Default for ScrollBarAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollBarAdapter {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            size: 1.0,
            dragging: false,
            lerp_speed: SCROLL_BAR_LERP_SPEED,
        }
    }

    pub fn with_lerp_speed(mut self, lerp_speed: f64) -> Self {
        self.lerp_speed = lerp_speed;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Records the bar position reported by the UI. Clamped to `0..=1`.
    pub fn drag_to(&mut self, value: f64) {
        if value.is_finite() {
            self.value = value.clamp(0.0, 1.0);
        }
    }

    pub fn begin_drag<P: PageProvider, I: TouchInputSource>(
        &mut self,
        engine: &mut PagedScrollEngine<P, I>,
    ) {
        self.set_dragging(true, engine);
    }

    pub fn end_drag<P: PageProvider, I: TouchInputSource>(
        &mut self,
        engine: &mut PagedScrollEngine<P, I>,
    ) {
        self.set_dragging(false, engine);
    }

    /// Ending a drag releases the engine's offset override. Repeated calls with the same value
    /// are no-ops.
    pub fn set_dragging<P: PageProvider, I: TouchInputSource>(
        &mut self,
        dragging: bool,
        engine: &mut PagedScrollEngine<P, I>,
    ) {
        if self.dragging == dragging {
            return;
        }
        self.dragging = dragging;
        adebug!(dragging, "ScrollBarAdapter::set_dragging");
        if !dragging {
            engine.set_offset_override(OffsetMode::Gesture, false);
        }
    }

    /// Synchronizes the bar with the engine for one frame.
    pub fn update<P: PageProvider, I: TouchInputSource>(
        &mut self,
        engine: &mut PagedScrollEngine<P, I>,
        dt: f64,
    ) {
        let count = engine.page_count();
        if count == 0 {
            awarn!("ScrollBarAdapter: engine has no pages");
            return;
        }
        self.size = 1.0 / count as f64;

        if self.dragging {
            let offset = self.value * (count - 1) as f64 * engine.page_spacing();
            engine.set_offset_override(OffsetMode::Override(offset), false);
            return;
        }

        if count == 1 {
            self.value = 0.0;
            return;
        }
        let Some(active) = engine.active_page_index() else {
            return;
        };
        let desired = active as f64 / (count - 1) as f64;
        let t = (dt * self.lerp_speed).clamp(0.0, 1.0);
        self.value += (desired - self.value) * t;
    }
}
