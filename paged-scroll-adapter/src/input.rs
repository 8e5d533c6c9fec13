use kurbo::Point;
use paged_scroll::TouchInputSource;

/// Touch state for hosts that only know "is the pad touched, and where" each frame.
///
/// Call [`TouchpadState::frame`] once per frame before [`paged_scroll::PagedScrollEngine::update`];
/// the down and up edges are derived from the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchpadState {
    touching: bool,
    down: bool,
    up: bool,
    position: Point,
}

impl TouchpadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records this frame's touch. The position is ignored while not touching, so the release
    /// frame keeps the last touched position.
    pub fn frame(&mut self, is_touching: bool, position: Point) {
        self.down = is_touching && !self.touching;
        self.up = !is_touching && self.touching;
        self.touching = is_touching;
        if is_touching {
            self.position = position;
        }
    }
}

impl TouchInputSource for TouchpadState {
    fn is_touching(&self) -> bool {
        self.touching
    }

    fn touch_down_edge(&self) -> bool {
        self.down
    }

    fn touch_up_edge(&self) -> bool {
        self.up
    }

    fn touch_position(&self) -> Point {
        self.position
    }
}
