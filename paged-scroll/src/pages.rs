use alloc::vec::Vec;

use crate::{
    IndexLookup, LogicalIndex, PageProvider, PageRef, RealIndex, index_from_offset, logical_index,
    offset_from_index,
};

/// A materialized page and the single real index that owns it.
#[derive(Clone, Debug)]
pub struct VisiblePage<H> {
    pub real_index: RealIndex,
    pub logical_index: LogicalIndex,
    pub handle: H,
}

impl<H> VisiblePage<H> {
    pub fn page_ref(&self) -> PageRef {
        PageRef {
            real_index: self.real_index,
            logical_index: self.logical_index,
        }
    }
}

/// Visibility settings for [`PageVirtualizer::on_offset_changed`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageWindow {
    pub looping: bool,
    /// Extra pages kept on each side of the active page.
    pub extra_pages_shown: usize,
    /// Keep the outermost page at exactly `pages_shown` spacings visible while at rest.
    pub show_next_pages_at_rest: bool,
}

impl PageWindow {
    pub fn pages_shown(&self) -> usize {
        self.extra_pages_shown.saturating_add(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePageChange {
    pub previous: Option<PageRef>,
    pub next: PageRef,
}

/// What one virtualization pass decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VirtualizeOutcome {
    pub active_real_index: RealIndex,
    pub did_clamp: bool,
    pub active_changed: Option<ActivePageChange>,
}

/// Materializes pages near the scroll offset and evicts the rest.
///
/// Visible pages live in a single arena sorted by real index, so the real index ↔ page relation is
/// injective by construction: a real index is never inserted twice and each record owns its
/// handle.
#[derive(Clone, Debug)]
pub struct PageVirtualizer<H> {
    pages: Vec<VisiblePage<H>>,
    active: Option<RealIndex>,
}

impl<H> Default for PageVirtualizer<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> PageVirtualizer<H> {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Visible pages in ascending real index order.
    pub fn iter(&self) -> impl Iterator<Item = &VisiblePage<H>> {
        self.pages.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut VisiblePage<H>> {
        self.pages.iter_mut()
    }

    pub fn get(&self, real_index: RealIndex) -> Option<&VisiblePage<H>> {
        let pos = self.position(real_index).ok()?;
        Some(&self.pages[pos])
    }

    pub fn contains(&self, real_index: RealIndex) -> bool {
        self.position(real_index).is_ok()
    }

    /// Real index of the visible page holding `handle`.
    ///
    /// Providers that hand out the same handle for several real indexes (a looping carousel with
    /// fewer pages than the window) resolve to the copy nearest the active page. Equal distances
    /// resolve to the copy after it.
    pub fn find_by_handle(&self, handle: &H) -> Option<RealIndex>
    where
        H: PartialEq,
    {
        let active = self.active.unwrap_or(0);
        self.pages
            .iter()
            .filter(|p| p.handle == *handle)
            .map(|p| p.real_index)
            .min_by_key(|&real| (real.abs_diff(active), real < active))
    }

    pub fn active_real_index(&self) -> Option<RealIndex> {
        self.active.filter(|&i| self.contains(i))
    }

    pub fn active_page(&self) -> Option<&VisiblePage<H>> {
        self.active.and_then(|i| self.get(i))
    }

    /// Whether page `real_index` belongs in the window around `offset`.
    ///
    /// The distance is rounded before comparison, matching how offsets map back to indexes.
    pub fn should_show_index_for_offset(
        window: &PageWindow,
        spacing: f64,
        offset: f64,
        real_index: RealIndex,
    ) -> bool {
        let diff = (offset_from_index(real_index, spacing) - offset).round().abs();
        let limit = spacing * window.pages_shown() as f64;
        if window.show_next_pages_at_rest {
            diff <= limit
        } else {
            diff < limit
        }
    }

    /// Re-evaluates the visible set for a new scroll offset.
    ///
    /// Returns `None` (after evicting everything) when the provider has no pages or a
    /// non-positive spacing.
    pub fn on_offset_changed<P>(
        &mut self,
        provider: &mut P,
        window: &PageWindow,
        offset: f64,
    ) -> Option<VirtualizeOutcome>
    where
        P: PageProvider<Page = H>,
    {
        let count = provider.page_count();
        let spacing = provider.spacing();
        if count == 0 || spacing <= 0.0 || !spacing.is_finite() {
            pwarn!(count, spacing, "PageVirtualizer: nothing to show");
            self.clear(provider);
            return None;
        }

        let IndexLookup {
            real_index: active_index,
            did_clamp,
        } = index_from_offset(offset, spacing, count, window.looping);

        let previous = self.active_page().map(VisiblePage::page_ref);

        // Evict pages that left the window, and any stale page whose real index no longer maps
        // into a shrunken non-looping range. The active index itself always stays.
        let mut i = 0;
        while i < self.pages.len() {
            let real = self.pages[i].real_index;
            let in_range = window.looping || (real >= 0 && (real as u64) < count as u64);
            let keep = real == active_index
                || (in_range && Self::should_show_index_for_offset(window, spacing, offset, real));
            if keep {
                i += 1;
                continue;
            }
            let page = self.pages.remove(i);
            ptrace!(real_index = page.real_index, "PageVirtualizer: evict");
            if self.active == Some(page.real_index) {
                self.active = None;
            }
            provider.remove_page(page.logical_index, page.handle);
        }

        if !self.contains(active_index) {
            self.materialize(provider, active_index, count);
        }
        let active_changed = self.set_active(active_index, previous);

        // Walk outward on both sides; visibility falls off monotonically, so stop at the first
        // index outside the window. No window reaches further than `pages_shown` steps.
        for step in [-1, 1] {
            let mut next = active_index;
            for _ in 0..window.pages_shown() {
                let Some(candidate) = next.checked_add(step) else {
                    break;
                };
                next = candidate;
                if !window.looping && (next < 0 || next as u64 >= count as u64) {
                    break;
                }
                if !self.contains(next) {
                    if !Self::should_show_index_for_offset(window, spacing, offset, next) {
                        break;
                    }
                    self.materialize(provider, next, count);
                }
            }
        }

        self.debug_check_invariants();

        Some(VirtualizeOutcome {
            active_real_index: active_index,
            did_clamp,
            active_changed,
        })
    }

    /// Hands every visible page back to the provider.
    pub fn clear<P>(&mut self, provider: &mut P)
    where
        P: PageProvider<Page = H>,
    {
        for page in self.pages.drain(..) {
            provider.remove_page(page.logical_index, page.handle);
        }
        self.active = None;
    }

    fn position(&self, real_index: RealIndex) -> Result<usize, usize> {
        self.pages
            .binary_search_by_key(&real_index, |p| p.real_index)
    }

    fn materialize<P>(&mut self, provider: &mut P, real_index: RealIndex, count: usize)
    where
        P: PageProvider<Page = H>,
    {
        let Err(pos) = self.position(real_index) else {
            return;
        };
        let Some(logical) = logical_index(real_index, count) else {
            return;
        };
        ptrace!(real_index, logical, "PageVirtualizer: materialize");
        let handle = provider.provide_page(logical);
        self.pages.insert(
            pos,
            VisiblePage {
                real_index,
                logical_index: logical,
                handle,
            },
        );
    }

    /// Marks `real_index` active if it has a page. Returns the change, if any.
    fn set_active(
        &mut self,
        real_index: RealIndex,
        previous: Option<PageRef>,
    ) -> Option<ActivePageChange> {
        if self.active == Some(real_index) {
            return None;
        }
        let next = self.get(real_index)?.page_ref();
        self.active = Some(real_index);
        Some(ActivePageChange { previous, next })
    }

    fn debug_check_invariants(&self) {
        debug_assert!(
            self.pages
                .windows(2)
                .all(|w| w[0].real_index < w[1].real_index),
            "visible pages must be strictly sorted by real index"
        );
    }
}
