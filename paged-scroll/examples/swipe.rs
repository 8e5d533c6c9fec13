use paged_scroll::{PageProvider, PagedScrollEngine, PagedScrollOptions, Point, ScrollEvent};

/// Pages are plain labels built on demand.
struct Labels {
    count: usize,
}

impl PageProvider for Labels {
    type Page = String;

    fn page_count(&self) -> usize {
        self.count
    }

    fn spacing(&self) -> f64 {
        1.0
    }

    fn provide_page(&mut self, index: usize) -> String {
        println!("  provide page {index}");
        format!("page {index}")
    }

    fn remove_page(&mut self, index: usize, page: String) {
        println!("  remove {page} (index {index})");
    }
}

fn main() {
    // Example: a host feeding touch events directly and ticking the engine at 60 Hz.
    //
    // A host would:
    // - forward pointer down/move/up with timestamps
    // - call update(dt) once per frame
    // - draw visible_pages() at their offsets relative to scroll_offset()
    let options = PagedScrollOptions::new()
        .with_looping(true)
        .with_extra_pages_shown(1)
        .with_only_scroll_when_pointing(false)
        .with_on_event(Some(|event: ScrollEvent| println!("event: {event:?}")));
    let mut engine = PagedScrollEngine::new(Labels { count: 4 }, options);

    // A quick leftward flick.
    engine.touch_down(Point::new(0.8, 0.5), 0.0);
    engine.touch_move(Point::new(0.6, 0.5), 0.05);
    engine.touch_move(Point::new(0.4, 0.5), 0.1);
    engine.touch_up(0.1);

    let dt = 1.0 / 60.0;
    let mut frame = 0;
    while engine.is_moving() || engine.scroll_offset() != engine.target_offset() {
        engine.update(dt);
        frame += 1;
        if frame % 10 == 0 {
            println!(
                "frame={frame} offset={:.3} phase={:?}",
                engine.scroll_offset(),
                engine.phase()
            );
        }
    }

    println!(
        "done: offset={} active={:?} visible={:?}",
        engine.scroll_offset(),
        engine.active_page_index(),
        engine.visible_pages().map(|p| &p.handle).collect::<Vec<_>>()
    );
}
