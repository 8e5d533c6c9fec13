use paged_scroll::{PagedScrollEngine, PagedScrollOptions};
use paged_scroll_adapter::{FadeScrollEffect, FadeTarget, PooledPageProvider, ScrollBarAdapter};

#[derive(Debug, Default)]
struct Card {
    alpha: f64,
}

impl FadeTarget for Card {
    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }
}

fn main() {
    // Example: a scroll bar dragging a pooled, fading carousel.
    //
    // An adapter would:
    // - call begin_drag / drag_to / end_drag from the bar's pointer events
    // - call bar.update then engine.update each frame
    // - use bar.value() and bar.size() to draw the handle
    let provider = PooledPageProvider::new(8, Card::default).with_spacing(1.0);
    let mut engine = PagedScrollEngine::builder()
        .provider(provider)
        .options(PagedScrollOptions::new().with_extra_pages_shown(1))
        .effect(FadeScrollEffect::new(0.25))
        .build()
        .expect("provider is set");
    let mut bar = ScrollBarAdapter::new();
    let dt = 1.0 / 60.0;

    bar.begin_drag(&mut engine);
    for step in 0..=20 {
        bar.drag_to(step as f64 / 20.0 * 0.55);
        bar.update(&mut engine, dt);
        engine.update(dt);
    }
    println!(
        "dragged: offset={:.3} active={:?}",
        engine.scroll_offset(),
        engine.active_page_index()
    );

    bar.end_drag(&mut engine);
    for _ in 0..120 {
        bar.update(&mut engine, dt);
        engine.update(dt);
    }

    let alphas: Vec<String> = engine
        .visible_pages()
        .map(|p| format!("{}:{:.2}", p.logical_index, p.handle.alpha))
        .collect();
    println!(
        "released: offset={} active={:?} bar={:.3}/{:.3} alphas={alphas:?}",
        engine.scroll_offset(),
        engine.active_page_index(),
        bar.value(),
        bar.size()
    );
    println!(
        "pool: created={} available={}",
        engine.provider().created(),
        engine.provider().available()
    );
}
