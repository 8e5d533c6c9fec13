use alloc::boxed::Box;
use alloc::vec::Vec;

use paged_scroll::{LogicalIndex, PageProvider};

/// Spacing used by the reference providers unless overridden.
pub const DEFAULT_PAGE_SPACING: f64 = 2000.0;

/// Handle for a child shown by [`ChildrenPageProvider`].
///
/// Every call to `provide_page` hands out a new handle, so two real indexes showing the same child
/// still have distinct handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChildPage {
    pub index: LogicalIndex,
    serial: u64,
}

/// Serves a fixed list of pre-built pages by showing and hiding them.
///
/// A looping engine with few pages can show the same child for more than one real index, so each
/// child keeps a count of how many real indexes reference it and stays shown until the last one is
/// removed.
#[derive(Clone, Debug)]
pub struct ChildrenPageProvider<T> {
    children: Vec<T>,
    shown: Vec<usize>,
    spacing: f64,
    next_serial: u64,
}

impl<T> ChildrenPageProvider<T> {
    pub fn new(children: impl IntoIterator<Item = T>) -> Self {
        let children: Vec<T> = children.into_iter().collect();
        let shown = alloc::vec![0; children.len()];
        Self {
            children,
            shown,
            spacing: DEFAULT_PAGE_SPACING,
            next_serial: 0,
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn children(&self) -> &[T] {
        &self.children
    }

    pub fn child(&self, index: LogicalIndex) -> Option<&T> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: LogicalIndex) -> Option<&mut T> {
        self.children.get_mut(index)
    }

    pub fn is_shown(&self, index: LogicalIndex) -> bool {
        self.shown.get(index).is_some_and(|&n| n > 0)
    }

    /// Indexes of the children currently shown.
    pub fn shown(&self) -> impl Iterator<Item = LogicalIndex> + '_ {
        self.shown
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(i, _)| i)
    }
}

impl<T> PageProvider for ChildrenPageProvider<T> {
    type Page = ChildPage;

    fn page_count(&self) -> usize {
        self.children.len()
    }

    fn spacing(&self) -> f64 {
        self.spacing
    }

    fn provide_page(&mut self, index: LogicalIndex) -> ChildPage {
        match self.shown.get_mut(index) {
            Some(n) => *n += 1,
            None => {
                awarn!(index, "ChildrenPageProvider: no child at index");
            }
        }
        let serial = self.next_serial;
        self.next_serial = self.next_serial.wrapping_add(1);
        ChildPage { index, serial }
    }

    fn remove_page(&mut self, _index: LogicalIndex, page: ChildPage) {
        if let Some(n) = self.shown.get_mut(page.index) {
            *n = n.saturating_sub(1);
        }
    }
}

type Factory<T> = Box<dyn FnMut() -> T>;
type PageHook<T> = Box<dyn FnMut(&mut T, LogicalIndex)>;

/// Reuses page objects from a free list instead of building one per index.
///
/// New objects come from the factory only when the pool is empty. The optional bind hook fills a
/// page for the index it is about to show, and the optional reset hook runs when a page goes back
/// to the pool.
pub struct PooledPageProvider<T> {
    page_count: usize,
    spacing: f64,
    factory: Factory<T>,
    bind: Option<PageHook<T>>,
    reset: Option<PageHook<T>>,
    free: Vec<T>,
    created: usize,
}

impl<T> PooledPageProvider<T> {
    pub fn new(page_count: usize, factory: impl FnMut() -> T + 'static) -> Self {
        Self {
            page_count,
            spacing: DEFAULT_PAGE_SPACING,
            factory: Box::new(factory),
            bind: None,
            reset: None,
            free: Vec::new(),
            created: 0,
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_bind(mut self, bind: impl FnMut(&mut T, LogicalIndex) + 'static) -> Self {
        self.bind = Some(Box::new(bind));
        self
    }

    pub fn with_reset(mut self, reset: impl FnMut(&mut T, LogicalIndex) + 'static) -> Self {
        self.reset = Some(Box::new(reset));
        self
    }

    /// Fills the free list up to `count` objects.
    pub fn prewarm(&mut self, count: usize) {
        while self.free.len() < count {
            let page = (self.factory)();
            self.created += 1;
            self.free.push(page);
        }
    }

    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
    }

    /// Objects built by the factory so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Objects currently waiting in the pool.
    pub fn available(&self) -> usize {
        self.free.len()
    }
}

impl<T> PageProvider for PooledPageProvider<T> {
    type Page = T;

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn spacing(&self) -> f64 {
        self.spacing
    }

    fn provide_page(&mut self, index: LogicalIndex) -> T {
        let mut page = match self.free.pop() {
            Some(page) => page,
            None => {
                self.created += 1;
                adebug!(created = self.created, "PooledPageProvider: pool grew");
                (self.factory)()
            }
        };
        if let Some(bind) = &mut self.bind {
            bind(&mut page, index);
        }
        page
    }

    fn remove_page(&mut self, index: LogicalIndex, mut page: T) {
        if let Some(reset) = &mut self.reset {
            reset(&mut page, index);
        }
        self.free.push(page);
    }
}

impl<T> core::fmt::Debug for PooledPageProvider<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PooledPageProvider")
            .field("page_count", &self.page_count)
            .field("spacing", &self.spacing)
            .field("available", &self.free.len())
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}
