use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::{
    Error, IndexLookup, LogicalIndex, NoTouchInput, OffsetMode, PageProvider, PageVirtualizer,
    PagedScrollOptions, RealIndex, ScrollEffect, ScrollEffectUpdate, ScrollEvent,
    ScrollOffsetController, ScrollPhase, ScrollSnapshot, SnapDirection, TouchInputSource,
    TouchSample, TouchVelocityTracker, VisiblePage, index_from_offset, logical_index,
    offset_from_index,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Idle,
    /// Touch is down; waiting to see whether it turns into a horizontal scroll.
    Tracking { initial: Point, last: Point },
    Scrolling { last: Point },
}

/// Builds a [`PagedScrollEngine`].
///
/// A page provider is mandatory; [`PagedScrollEngineBuilder::build`] fails with
/// [`Error::MissingProvider`] without one.
pub struct PagedScrollEngineBuilder<P: PageProvider, I = NoTouchInput> {
    provider: Option<P>,
    input: I,
    options: PagedScrollOptions,
    effects: Vec<Box<dyn ScrollEffect<P::Page>>>,
}

impl<P: PageProvider> Default for PagedScrollEngineBuilder<P, NoTouchInput> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PageProvider> PagedScrollEngineBuilder<P, NoTouchInput> {
    pub fn new() -> Self {
        Self {
            provider: None,
            input: NoTouchInput,
            options: PagedScrollOptions::default(),
            effects: Vec::new(),
        }
    }
}

impl<P: PageProvider, I: TouchInputSource> PagedScrollEngineBuilder<P, I> {
    pub fn provider(mut self, provider: P) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replaces the touch source polled by [`PagedScrollEngine::update`].
    pub fn input<J: TouchInputSource>(self, input: J) -> PagedScrollEngineBuilder<P, J> {
        PagedScrollEngineBuilder {
            provider: self.provider,
            input,
            options: self.options,
            effects: self.effects,
        }
    }

    pub fn options(mut self, options: PagedScrollOptions) -> Self {
        self.options = options;
        self
    }

    pub fn effect(mut self, effect: impl ScrollEffect<P::Page> + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    /// Creates the engine and jumps (without events other than the initial active page change)
    /// to `options.start_page`.
    pub fn build(self) -> Result<PagedScrollEngine<P, I>, Error> {
        let Some(provider) = self.provider else {
            pwarn!("PagedScrollEngine is missing a page provider");
            return Err(Error::MissingProvider);
        };

        pdebug!(
            page_count = provider.page_count(),
            spacing = provider.spacing(),
            looping = self.options.looping,
            start_page = self.options.start_page,
            "PagedScrollEngine::build"
        );
        Ok(PagedScrollEngine::assemble(
            provider,
            self.input,
            self.options,
            self.effects,
        ))
    }
}

/// A headless paged scroll engine.
///
/// The engine turns single-pointer touch input into a horizontally paged scroll:
/// - touches translate the target offset directly once they pass the click threshold
/// - on release, the filtered touch velocity picks a swipe direction or the closest page
/// - the offset eases toward the target once per [`PagedScrollEngine::update`]
/// - pages near the offset are requested from the [`PageProvider`] and handed back when they
///   leave the window
///
/// It does not hold any UI objects beyond the provider's page handles and never blocks.
pub struct PagedScrollEngine<P: PageProvider, I = NoTouchInput> {
    options: PagedScrollOptions,
    provider: P,
    input: I,
    effects: Vec<Box<dyn ScrollEffect<P::Page>>>,

    offset: ScrollOffsetController,
    velocity: TouchVelocityTracker,
    pages: PageVirtualizer<P::Page>,

    gesture: Gesture,
    snapping: bool,
    mode: OffsetMode,
    pointer_hovering: bool,
    clock: f64,
}

impl<P: PageProvider> PagedScrollEngine<P, NoTouchInput> {
    /// Shorthand for a builder with a provider and options, without input polling or effects.
    pub fn new(provider: P, options: PagedScrollOptions) -> Self {
        Self::assemble(provider, NoTouchInput, options, Vec::new())
    }

    pub fn builder() -> PagedScrollEngineBuilder<P, NoTouchInput> {
        PagedScrollEngineBuilder::new()
    }
}

impl<P: PageProvider, I: TouchInputSource> PagedScrollEngine<P, I> {
    fn assemble(
        provider: P,
        input: I,
        options: PagedScrollOptions,
        effects: Vec<Box<dyn ScrollEffect<P::Page>>>,
    ) -> Self {
        let tuning = options.tuning;
        let mut engine = Self {
            provider,
            input,
            effects,
            offset: ScrollOffsetController::new(0.0, tuning.snap_epsilon_coeff),
            velocity: TouchVelocityTracker::new(tuning.velocity_cutoff_hz, tuning.timestamp_epsilon),
            pages: PageVirtualizer::new(),
            gesture: Gesture::Idle,
            snapping: false,
            mode: OffsetMode::Gesture,
            pointer_hovering: false,
            clock: 0.0,
            options,
        };
        engine.jump_to_start_page();
        engine
    }

    pub fn options(&self) -> &PagedScrollOptions {
        &self.options
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider. Call [`PagedScrollEngine::reset`] after changing its
    /// page count or spacing.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn add_effect(&mut self, effect: impl ScrollEffect<P::Page> + 'static) {
        self.effects.push(Box::new(effect));
    }

    pub fn page_count(&self) -> usize {
        self.provider.page_count()
    }

    pub fn page_spacing(&self) -> f64 {
        self.provider.spacing()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.offset.current()
    }

    pub fn target_offset(&self) -> f64 {
        self.offset.target()
    }

    /// Distance left between the target and the current offset.
    pub fn current_move_distance(&self) -> f64 {
        self.offset.move_distance()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity.velocity()
    }

    pub fn offset_mode(&self) -> OffsetMode {
        self.mode
    }

    /// The real index of the active page, counting every loop when looping is on.
    ///
    /// With 5 looping pages and 8 swipes to the right this is `8` while
    /// [`PagedScrollEngine::active_page_index`] is `3`.
    pub fn active_real_index(&self) -> Option<RealIndex> {
        self.pages.active_real_index()
    }

    pub fn active_page_index(&self) -> Option<LogicalIndex> {
        let real = self.active_real_index()?;
        logical_index(real, self.page_count())
    }

    pub fn active_page(&self) -> Option<&P::Page> {
        self.pages.active_page().map(|p| &p.handle)
    }

    /// Visible pages in ascending real index order. Hosts should draw the active page last.
    pub fn visible_pages(&self) -> impl Iterator<Item = &VisiblePage<P::Page>> {
        self.pages.iter()
    }

    pub fn can_scroll(&self) -> bool {
        self.options.scrolling_enabled
            && (self.pointer_hovering || !self.options.only_scroll_when_pointing)
    }

    /// `true` while a scroll gesture is active or the offset is still visibly travelling.
    pub fn is_moving(&self) -> bool {
        self.offset.is_moving(
            matches!(self.gesture, Gesture::Scrolling { .. }),
            self.provider.spacing(),
            self.options.tuning.moving_threshold_coeff,
        )
    }

    pub fn phase(&self) -> ScrollPhase {
        match self.gesture {
            Gesture::Scrolling { .. } => ScrollPhase::Scrolling,
            Gesture::Tracking { .. } => ScrollPhase::Tracking,
            Gesture::Idle if self.snapping => ScrollPhase::Snapping,
            Gesture::Idle => ScrollPhase::Idle,
        }
    }

    /// Pointer enter/exit for hosts with `only_scroll_when_pointing`.
    pub fn set_pointer_hovering(&mut self, hovering: bool) {
        self.pointer_hovering = hovering;
        if !self.can_scroll() {
            self.stop_gesture(true, false);
        }
    }

    pub fn set_scrolling_enabled(&mut self, enabled: bool) {
        self.options.scrolling_enabled = enabled;
        if !self.can_scroll() {
            self.stop_gesture(true, false);
        }
    }

    /// Advances the engine by one frame.
    ///
    /// Polls the input source (unless an offset override is active), moves the offset one step
    /// toward its target, re-virtualizes pages if it moved and runs the scroll effects.
    pub fn update(&mut self, dt: f64) {
        self.clock += dt;

        match self.mode {
            OffsetMode::Override(value) => {
                self.offset.set_target(value, false);
            }
            OffsetMode::Gesture if !self.can_scroll() => self.stop_gesture(true, false),
            OffsetMode::Gesture => self.poll_input(),
        }

        self.advance(dt);
        self.apply_scroll_effects();
    }

    /// Starts tracking a touch at `position`.
    ///
    /// Ignored while an offset override is active, while scrolling is not allowed, or when a
    /// touch is already tracked.
    pub fn touch_down(&mut self, position: Point, time: f64) {
        if self.mode.is_override() || !self.can_scroll() {
            ptrace!("touch_down ignored");
            return;
        }
        if self.gesture != Gesture::Idle {
            return;
        }
        self.velocity.start(TouchSample::new(position, time));
        self.gesture = Gesture::Tracking {
            initial: position,
            last: position,
        };
    }

    pub fn touch_move(&mut self, position: Point, time: f64) {
        if self.mode.is_override() {
            return;
        }

        match self.gesture {
            Gesture::Idle => return,
            Gesture::Tracking { initial, last } => {
                // Only horizontal travel past the click threshold scrolls; taps and vertical
                // gestures stay in tracking.
                let delta = position - initial;
                let dx = delta.x.abs();
                if dx > self.options.tuning.click_threshold && dx > delta.y.abs() {
                    self.start_scrolling(last);
                } else {
                    self.gesture = Gesture::Tracking {
                        initial,
                        last: position,
                    };
                }
            }
            Gesture::Scrolling { .. } => {}
        }

        if let Gesture::Scrolling { last } = self.gesture {
            let dx = position.x - last.x;
            if dx != 0.0 {
                let spacing_coeff = -self.provider.spacing();
                self.offset
                    .nudge_target(dx * spacing_coeff * self.options.scroll_sensitivity);
            }
            self.gesture = Gesture::Scrolling { last: position };
        }

        self.velocity.update(TouchSample::new(position, time));
    }

    /// Ends the tracked touch. A scroll in progress snaps according to the release velocity.
    pub fn touch_up(&mut self, _time: f64) {
        self.stop_gesture(true, false);
    }

    /// Snaps to page `index` (a real index when looping).
    ///
    /// Unless `suppress_events` is set, fires `SwipeLeft` or `SwipeRight` depending on whether the
    /// destination lies below or above the current active page. A single page never swipes, even
    /// when looping moves its real index.
    pub fn snap_to_page(
        &mut self,
        index: RealIndex,
        immediate: bool,
        suppress_events: bool,
    ) -> Result<(), Error> {
        self.validate_index(index)?;

        let current = self.active_real_index();
        self.snap_to(index, immediate);

        if !suppress_events && self.provider.page_count() > 1 {
            match current {
                Some(current) if index < current => self.emit(ScrollEvent::SwipeLeft),
                Some(current) if index > current => self.emit(ScrollEvent::SwipeRight),
                _ => {}
            }
        }
        Ok(())
    }

    /// Snaps to a page by its handle. Only pages that are currently visible can be targeted.
    pub fn snap_to_visible_page(&mut self, page: &P::Page, immediate: bool) -> Result<(), Error>
    where
        P::Page: PartialEq,
    {
        let Some(index) = self.pages.find_by_handle(page) else {
            pwarn!("snap_to_visible_page: page is not visible");
            return Err(Error::PageNotVisible);
        };
        self.snap_to_page(index, immediate, false)
    }

    /// Snaps toward `direction` from the current target offset.
    ///
    /// Directional snaps fire their swipe event unless the page had to be clamped at a boundary;
    /// `Closest` always fires `SnapClosest`. With a single page there is no bias and no swipe.
    /// Returns the chosen page, or `None` when there are no pages to snap to.
    pub fn snap_to_page_in_direction(
        &mut self,
        direction: SnapDirection,
        immediate: bool,
    ) -> Option<IndexLookup> {
        let count = self.provider.page_count();
        let spacing = self.provider.spacing();
        if count == 0 || spacing <= 0.0 {
            pwarn!(count, spacing, "snap_to_page_in_direction: no pages");
            return None;
        }

        let single = count == 1;
        let bias = if single {
            0.0
        } else {
            spacing * self.options.tuning.swipe_bias_coeff
        };
        let target = self.offset.target();
        let looping = self.options.looping;

        let lookup = match direction {
            SnapDirection::Left => index_from_offset(target - bias, spacing, count, looping),
            SnapDirection::Right => index_from_offset(target + bias, spacing, count, looping),
            SnapDirection::Closest => index_from_offset(target, spacing, count, looping),
        };
        pdebug!(
            ?direction,
            real_index = lookup.real_index,
            did_clamp = lookup.did_clamp,
            "snap_to_page_in_direction"
        );

        match direction {
            SnapDirection::Left if !lookup.did_clamp && !single => {
                self.emit(ScrollEvent::SwipeLeft);
            }
            SnapDirection::Right if !lookup.did_clamp && !single => {
                self.emit(ScrollEvent::SwipeRight);
            }
            SnapDirection::Closest => self.emit(ScrollEvent::SnapClosest),
            _ => {}
        }

        self.snap_to(lookup.real_index, immediate);
        Some(lookup)
    }

    /// Hands control of the offset to an external source, or takes it back.
    ///
    /// Entering an override cancels any gesture or snap without firing swipe events; the target
    /// then follows the override value on every update. Releasing it snaps to the closest page.
    pub fn set_offset_override(&mut self, mode: impl Into<OffsetMode>, immediate: bool) {
        let mode = mode.into();
        let was_override = self.mode.is_override();

        match mode {
            OffsetMode::Override(value) => {
                if !was_override {
                    self.stop_gesture(false, false);
                    self.snapping = false;
                }
                self.mode = mode;
                self.set_target(value, immediate);
            }
            OffsetMode::Gesture => {
                self.mode = mode;
                if was_override {
                    self.snap_to_page_in_direction(SnapDirection::Closest, immediate);
                }
            }
        }
    }

    /// Removes all pages and returns to the start page.
    ///
    /// Call this after the provider's content changes.
    pub fn reset(&mut self) {
        pdebug!("PagedScrollEngine::reset");
        self.pages.clear(&mut self.provider);
        self.gesture = Gesture::Idle;
        self.velocity.stop();
        self.snapping = false;
        self.mode = OffsetMode::Gesture;
        self.jump_to_start_page();
    }

    /// Releases any override, settles any gesture immediately and stops tracking.
    ///
    /// Call this when the host hides or deactivates the scroll region.
    pub fn disable(&mut self) {
        if self.mode.is_override() {
            self.set_offset_override(OffsetMode::Gesture, true);
        }
        self.stop_gesture(true, true);
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            scroll_offset: self.offset.current(),
            target_offset: self.offset.target(),
            active_real_index: self.active_real_index(),
            phase: self.phase(),
            is_moving: self.is_moving(),
        }
    }

    /// Jumps to a previously captured snapshot without firing swipe events.
    ///
    /// `ActivePageChanged` still fires if the restored offset lands on a different page.
    ///
    /// Gestures and overrides are cancelled; if the snapshot was mid-animation the remaining
    /// distance is animated by subsequent updates.
    pub fn restore_snapshot(&mut self, snapshot: &ScrollSnapshot) {
        self.gesture = Gesture::Idle;
        self.velocity.stop();
        self.mode = OffsetMode::Gesture;
        self.offset.reset(snapshot.scroll_offset);
        self.offset.set_target(snapshot.target_offset, false);
        self.snapping = !self.offset.is_settled();
        self.refresh();
    }

    /// Runs every enabled scroll effect over every visible page.
    ///
    /// [`PagedScrollEngine::update`] calls this once per tick.
    pub fn apply_scroll_effects(&mut self) {
        if self.effects.is_empty() {
            return;
        }

        let page_count = self.provider.page_count();
        let spacing = self.provider.spacing();
        let scroll_offset = self.offset.current();
        let move_distance = self.offset.move_distance();
        let looping = self.options.looping;
        let always_interactable = self.options.tiles_always_interactable;
        let active = self.pages.active_real_index();

        for page in self.pages.iter_mut() {
            let update = ScrollEffectUpdate {
                real_index: page.real_index,
                logical_index: page.logical_index,
                page_count,
                page_offset: offset_from_index(page.real_index, spacing),
                scroll_offset,
                spacing,
                looping,
                is_interactable: always_interactable || active == Some(page.real_index),
                move_distance,
            };
            for effect in self.effects.iter_mut().filter(|e| e.enabled()) {
                effect.apply(&mut page.handle, &update);
            }
        }
    }

    fn poll_input(&mut self) {
        let touching = self.input.is_touching();
        let down = self.input.touch_down_edge();
        let up = self.input.touch_up_edge();
        let position = self.input.touch_position();
        let now = self.clock;

        if touching || down {
            if self.gesture == Gesture::Idle {
                self.touch_down(position, now);
            } else {
                self.touch_move(position, now);
            }
        }
        if up {
            self.touch_up(now);
        }
    }

    fn start_scrolling(&mut self, last: Point) {
        // Take over from wherever a running snap has got to.
        let current = self.offset.current();
        self.offset.set_target(current, false);
        self.snapping = false;
        self.gesture = Gesture::Scrolling { last };
        ptrace!(offset = current, "start_scrolling");
    }

    /// Ends the current gesture. A scroll in progress snaps when `snap` is set.
    fn stop_gesture(&mut self, snap: bool, immediate: bool) {
        let was_scrolling = matches!(self.gesture, Gesture::Scrolling { .. });
        let velocity = self.velocity.velocity();
        self.gesture = Gesture::Idle;
        self.velocity.stop();

        if !(was_scrolling && snap) {
            return;
        }

        let swipe = self.options.tuning.swipe_threshold;
        let direction = if velocity.x > swipe {
            SnapDirection::Left
        } else if velocity.x < -swipe {
            SnapDirection::Right
        } else {
            SnapDirection::Closest
        };
        ptrace!(vx = velocity.x, ?direction, "stop_gesture");
        self.snap_to_page_in_direction(direction, immediate);
    }

    fn validate_index(&self, index: RealIndex) -> Result<(), Error> {
        let count = self.provider.page_count();
        let in_range = index >= 0 && (index as u64) < count as u64;
        if count == 0 || (!self.options.looping && !in_range) {
            pwarn!(index, count, "attempting to snap to non-existent page");
            return Err(Error::PageOutOfRange { index, count });
        }
        Ok(())
    }

    fn snap_to(&mut self, index: RealIndex, immediate: bool) {
        let offset = offset_from_index(index, self.provider.spacing());
        if immediate {
            self.snapping = false;
            self.set_target(offset, true);
        } else {
            self.offset.set_target(offset, false);
            self.snapping = !self.offset.is_settled();
        }
    }

    fn set_target(&mut self, value: f64, immediate: bool) {
        if self.offset.set_target(value, immediate) {
            self.refresh();
        }
    }

    fn advance(&mut self, dt: f64) {
        let before = self.offset.current();
        let more = self
            .offset
            .advance(dt, self.options.snap_speed, self.provider.spacing());
        if self.offset.current() != before {
            self.refresh();
        }
        if !more {
            self.snapping = false;
        }
    }

    fn jump_to_start_page(&mut self) {
        let start = self.options.start_page;
        let index = match self.validate_index(start) {
            Ok(()) => start,
            Err(_) => 0,
        };
        let offset = offset_from_index(index, self.provider.spacing());
        self.offset.reset(if offset.is_finite() { offset } else { 0.0 });
        self.refresh();
    }

    fn refresh(&mut self) {
        let window = self.options.window();
        let Some(outcome) = self
            .pages
            .on_offset_changed(&mut self.provider, &window, self.offset.current())
        else {
            return;
        };
        if let Some(change) = outcome.active_changed {
            self.emit(ScrollEvent::ActivePageChanged {
                previous: change.previous,
                next: change.next,
            });
        }
    }

    fn emit(&self, event: ScrollEvent) {
        ptrace!(?event, "emit");
        if let Some(cb) = &self.options.on_event {
            cb(event);
        }
    }
}

impl<P, I> core::fmt::Debug for PagedScrollEngine<P, I>
where
    P: PageProvider,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagedScrollEngine")
            .field("options", &self.options)
            .field("offset", &self.offset)
            .field("velocity", &self.velocity)
            .field("gesture", &self.gesture)
            .field("snapping", &self.snapping)
            .field("mode", &self.mode)
            .field("pointer_hovering", &self.pointer_hovering)
            .field("visible_pages", &self.pages.len())
            .field("effects", &self.effects.len())
            .finish_non_exhaustive()
    }
}
