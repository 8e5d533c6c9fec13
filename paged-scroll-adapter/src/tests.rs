use crate::*;

use std::sync::{Arc, Mutex};

use kurbo::Point;
use paged_scroll::{
    OffsetMode, PagedScrollEngine, PagedScrollOptions, ScrollEffectUpdate, ScrollEvent,
    TouchInputSource,
};

const DT: f64 = 1.0 / 60.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Card {
    index: Option<usize>,
    alpha: f64,
    x: f64,
}

impl FadeTarget for Card {
    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }
}

impl TranslateTarget for Card {
    fn set_translation(&mut self, x: f64) {
        self.x = x;
    }
}

fn effect_update(
    real_index: i64,
    page_count: usize,
    scroll_offset: f64,
    looping: bool,
) -> ScrollEffectUpdate {
    ScrollEffectUpdate {
        real_index,
        logical_index: paged_scroll::logical_index(real_index, page_count).unwrap(),
        page_count,
        page_offset: real_index as f64,
        scroll_offset,
        spacing: 1.0,
        looping,
        is_interactable: true,
        move_distance: 0.0,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn fade_alpha_falls_off_with_distance() {
    let fade = FadeScrollEffect::new(0.2);
    assert!(close(fade.alpha_for(&effect_update(2, 5, 2.0, false)), 1.0));
    assert!(close(fade.alpha_for(&effect_update(2, 5, 2.5, false)), 0.6));
    assert!(close(fade.alpha_for(&effect_update(2, 5, 1.0, false)), 0.2));
    assert!(close(fade.alpha_for(&effect_update(2, 5, 5.0, false)), 0.0));

    assert_eq!(FadeScrollEffect::new(3.0).min_alpha(), 1.0);
}

#[test]
fn fade_keeps_edge_pages_opaque_on_overscroll() {
    let fade = FadeScrollEffect::new(0.2);
    assert_eq!(fade.alpha_for(&effect_update(0, 5, -0.5, false)), 1.0);
    assert_eq!(fade.alpha_for(&effect_update(4, 5, 4.5, false)), 1.0);
    // Moving inward still fades.
    assert!(close(fade.alpha_for(&effect_update(0, 5, 0.5, false)), 0.6));
    // Looping has no edges.
    assert!(close(fade.alpha_for(&effect_update(0, 5, -0.5, true)), 0.6));
}

#[test]
fn translate_is_relative_to_scroll_offset() {
    let u = effect_update(2, 5, 1.5, false);
    assert!(close(TranslateScrollEffect::translation_for(&u), 0.5));
}

#[test]
fn effects_run_on_engine_pages() {
    let provider = PooledPageProvider::new(3, Card::default).with_spacing(1.0);
    let mut e = PagedScrollEngine::builder()
        .provider(provider)
        .options(PagedScrollOptions::new().with_extra_pages_shown(1))
        .effect(FadeScrollEffect::new(0.2))
        .effect(TranslateScrollEffect::new())
        .build()
        .unwrap();

    e.snap_to_page(1, false, true).unwrap();
    e.update(DT);
    assert!(close(e.scroll_offset(), 0.1));

    let cards: Vec<(i64, Card)> = e.visible_pages().map(|p| (p.real_index, p.handle)).collect();
    assert_eq!(cards.len(), 2);
    let (_, first) = cards[0];
    let (_, second) = cards[1];
    assert!(close(first.alpha, 0.92));
    assert!(close(first.x, -0.1));
    assert!(close(second.alpha, 0.28));
    assert!(close(second.x, 0.9));
}

#[test]
fn disabled_effect_is_skipped() {
    let mut fade = FadeScrollEffect::new(0.0);
    fade.enabled = false;
    let provider = PooledPageProvider::new(3, || Card {
        alpha: -1.0,
        ..Card::default()
    })
    .with_spacing(1.0);
    let mut e = PagedScrollEngine::builder()
        .provider(provider)
        .effect(fade)
        .build()
        .unwrap();
    e.update(DT);
    assert_eq!(e.active_page().map(|c| c.alpha), Some(-1.0));
}

#[test]
fn scroll_bar_drags_engine_and_releases_to_closest() {
    let events: Arc<Mutex<Vec<ScrollEvent>>> = Arc::default();
    let sink = Arc::clone(&events);
    let provider = ChildrenPageProvider::new(["a", "b", "c", "d", "e"]).with_spacing(1.0);
    let mut e = PagedScrollEngine::new(
        provider,
        PagedScrollOptions::new().with_on_event(Some(move |ev| sink.lock().unwrap().push(ev))),
    );
    let mut bar = ScrollBarAdapter::new();

    bar.update(&mut e, DT);
    assert!(close(bar.size(), 0.2));
    assert_eq!(bar.value(), 0.0);

    bar.begin_drag(&mut e);
    bar.drag_to(0.6);
    bar.update(&mut e, DT);
    assert_eq!(e.offset_mode(), OffsetMode::Override(0.6 * 4.0));

    for _ in 0..300 {
        bar.update(&mut e, DT);
        e.update(DT);
    }
    assert!(close(e.scroll_offset(), 2.4));
    assert_eq!(e.active_page_index(), Some(2));

    bar.end_drag(&mut e);
    bar.end_drag(&mut e);
    assert!(!bar.is_dragging());
    assert_eq!(e.offset_mode(), OffsetMode::Gesture);
    assert_eq!(e.target_offset(), 2.0);
    let snaps = events
        .lock()
        .unwrap()
        .iter()
        .filter(|&&ev| ev == ScrollEvent::SnapClosest)
        .count();
    assert_eq!(snaps, 1);
}

#[test]
fn idle_scroll_bar_follows_active_page() {
    let provider = ChildrenPageProvider::new(0..5).with_spacing(1.0);
    let mut e = PagedScrollEngine::new(provider, PagedScrollOptions::new());
    let mut bar = ScrollBarAdapter::new();

    e.snap_to_page(4, true, true).unwrap();
    for _ in 0..60 {
        bar.update(&mut e, DT);
    }
    assert!((bar.value() - 1.0).abs() < 1e-3);

    e.snap_to_page(2, true, true).unwrap();
    bar.update(&mut e, DT);
    assert!(bar.value() > 0.5 && bar.value() < 1.0);
}

#[test]
fn single_page_scroll_bar_is_pinned() {
    let mut e = PagedScrollEngine::new(
        ChildrenPageProvider::new(["only"]),
        PagedScrollOptions::new(),
    );
    let mut bar = ScrollBarAdapter::new();
    bar.drag_to(0.7);
    bar.update(&mut e, DT);
    assert_eq!(bar.value(), 0.0);
    assert_eq!(bar.size(), 1.0);
}

#[test]
fn children_provider_shows_and_hides() {
    let provider = ChildrenPageProvider::new(["a", "b", "c"]).with_spacing(1.0);
    let mut e = PagedScrollEngine::new(provider, PagedScrollOptions::new());
    assert_eq!(e.provider().shown().collect::<Vec<_>>(), [0]);
    assert_eq!(e.active_page().map(|p| p.index), Some(0));

    e.snap_to_page(2, true, true).unwrap();
    assert_eq!(e.provider().shown().collect::<Vec<_>>(), [2]);
    assert_eq!(e.provider().child(2), Some(&"c"));

    e.reset();
    assert_eq!(e.provider().shown().collect::<Vec<_>>(), [0]);
}

#[test]
fn children_provider_counts_shared_children_when_looping() {
    let provider = ChildrenPageProvider::new(["a", "b"]).with_spacing(1.0);
    let mut e = PagedScrollEngine::new(
        provider,
        PagedScrollOptions::new()
            .with_looping(true)
            .with_extra_pages_shown(1),
    );
    // Real pages -1, 0 and 1 map to children 1, 0 and 1.
    assert_eq!(e.visible_pages().count(), 3);
    assert!(e.provider().is_shown(0));
    assert!(e.provider().is_shown(1));

    // Real pages 4, 5 and 6 map to children 0, 1 and 0.
    e.snap_to_page(5, true, true).unwrap();
    assert!(e.provider().is_shown(0));
    assert!(e.provider().is_shown(1));

    e.reset();
    assert_eq!(e.provider().shown().count(), 2);
    if let Some(child) = e.provider_mut().child_mut(1) {
        *child = "z";
    }
    assert_eq!(e.provider().children(), ["a", "z"]);
}

#[test]
fn children_provider_handles_are_distinct_when_looping() {
    let provider = ChildrenPageProvider::new(["a", "b"]).with_spacing(1.0);
    let mut e = PagedScrollEngine::new(
        provider,
        PagedScrollOptions::new()
            .with_looping(true)
            .with_extra_pages_shown(1),
    );
    let pages: Vec<(i64, ChildPage)> = e
        .visible_pages()
        .map(|p| (p.real_index, p.handle))
        .collect();
    assert_eq!(
        pages.iter().map(|(real, h)| (*real, h.index)).collect::<Vec<_>>(),
        [(-1, 1), (0, 0), (1, 1)]
    );
    assert_ne!(pages[0].1, pages[2].1);

    e.snap_to_visible_page(&pages[2].1, true).unwrap();
    assert_eq!(e.active_real_index(), Some(1));

    // Real page -1 left the window, so its old handle no longer resolves.
    assert!(e.snap_to_visible_page(&pages[0].1, true).is_err());

    let handle_of = |e: &PagedScrollEngine<ChildrenPageProvider<&str>>, real: i64| {
        e.visible_pages()
            .find(|p| p.real_index == real)
            .map(|p| p.handle)
            .unwrap()
    };
    let first = handle_of(&e, 0);
    e.snap_to_visible_page(&first, true).unwrap();
    let before_first = handle_of(&e, -1);
    e.snap_to_visible_page(&before_first, true).unwrap();
    assert_eq!(e.active_real_index(), Some(-1));
    assert_eq!(e.active_page().map(|p| p.index), Some(1));
}

#[test]
fn pooled_provider_reuses_pages() {
    let resets = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&resets);
    let provider = PooledPageProvider::new(10, Card::default)
        .with_spacing(1.0)
        .with_bind(|card: &mut Card, index| card.index = Some(index))
        .with_reset(move |card: &mut Card, _| {
            card.index = None;
            *counter.lock().unwrap() += 1;
        });
    let mut e = PagedScrollEngine::new(
        provider,
        PagedScrollOptions::new().with_extra_pages_shown(1),
    );

    for i in 0..10 {
        e.snap_to_page(i, true, true).unwrap();
        for page in e.visible_pages() {
            assert_eq!(page.handle.index, Some(page.logical_index));
        }
    }
    assert_eq!(e.provider().created(), 3);
    assert_eq!(*resets.lock().unwrap(), 8);

    e.reset();
    assert_eq!(e.provider().created(), 3);
    assert_eq!(e.provider().available(), 1);
}

#[test]
fn pooled_provider_prewarms() {
    let mut provider = PooledPageProvider::new(4, Card::default);
    provider.prewarm(2);
    assert_eq!(provider.created(), 2);
    assert_eq!(provider.available(), 2);
    let e = PagedScrollEngine::new(provider, PagedScrollOptions::new());
    assert_eq!(e.provider().created(), 2);
    assert_eq!(e.provider().available(), 1);
}

#[test]
fn touchpad_derives_edges() {
    let mut pad = TouchpadState::new();
    pad.frame(true, Point::new(0.5, 0.5));
    assert!(pad.is_touching() && pad.touch_down_edge() && !pad.touch_up_edge());

    pad.frame(true, Point::new(0.4, 0.5));
    assert!(!pad.touch_down_edge() && !pad.touch_up_edge());
    assert_eq!(pad.touch_position(), Point::new(0.4, 0.5));

    pad.frame(false, Point::ZERO);
    assert!(!pad.is_touching() && pad.touch_up_edge());
    assert_eq!(pad.touch_position(), Point::new(0.4, 0.5));

    pad.frame(false, Point::ZERO);
    assert!(!pad.touch_up_edge());
}

#[test]
fn touchpad_drives_a_swipe() {
    let provider = ChildrenPageProvider::new(0..5).with_spacing(1.0);
    let mut e = PagedScrollEngine::builder()
        .provider(provider)
        .options(PagedScrollOptions::new().with_only_scroll_when_pointing(false))
        .input(TouchpadState::new())
        .build()
        .unwrap();

    for (touching, x) in [(true, 0.8), (true, 0.7), (true, 0.5), (false, 0.0)] {
        e.input_mut().frame(touching, Point::new(x, 0.5));
        e.update(DT);
    }
    for _ in 0..300 {
        e.input_mut().frame(false, Point::ZERO);
        e.update(DT);
    }
    assert_eq!(e.scroll_offset(), 1.0);
    assert_eq!(e.active_page_index(), Some(1));
}
