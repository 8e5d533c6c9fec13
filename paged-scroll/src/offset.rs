/// Where the engine's target offset comes from.
///
/// `Gesture` is the normal mode: touches and snaps drive the target. `Override(v)` pins the target
/// to an externally supplied value (for example a scroll bar being dragged) and suspends gesture
/// handling until the override is released.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OffsetMode {
    #[default]
    Gesture,
    Override(f64),
}

impl OffsetMode {
    pub fn is_override(self) -> bool {
        matches!(self, Self::Override(_))
    }
}

impl From<Option<f64>> for OffsetMode {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::Override(v),
            None => Self::Gesture,
        }
    }
}

/// Owns the authoritative scroll offset and the target it converges to.
///
/// Keeping the target separate lets external writers retarget freely while an animation is in
/// flight; [`ScrollOffsetController::advance`] is the only thing that moves `current` gradually.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOffsetController {
    current: f64,
    target: f64,
    snap_epsilon_coeff: f64,
}

impl ScrollOffsetController {
    pub fn new(initial: f64, snap_epsilon_coeff: f64) -> Self {
        Self {
            current: initial,
            target: initial,
            snap_epsilon_coeff,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Sets the target. With `immediate`, `current` jumps there too.
    ///
    /// Returns `true` if `current` changed.
    pub fn set_target(&mut self, value: f64, immediate: bool) -> bool {
        self.target = value;
        if !immediate || self.current == value {
            return false;
        }
        self.current = value;
        true
    }

    pub fn nudge_target(&mut self, delta: f64) {
        self.target += delta;
    }

    /// Forces both offsets to `value` regardless of their previous state.
    pub fn reset(&mut self, value: f64) {
        self.current = value;
        self.target = value;
    }

    /// Moves `current` one step toward `target`.
    ///
    /// Within `spacing * snap_epsilon_coeff` of the target the offset lands on it exactly, so an
    /// animation cannot approach it forever. Returns `true` while more advancing is needed.
    pub fn advance(&mut self, dt: f64, snap_speed: f64, spacing: f64) -> bool {
        if self.is_settled() {
            return false;
        }

        let diff = (self.current - self.target).abs();
        let threshold = spacing * self.snap_epsilon_coeff;
        if spacing <= 0.0 || diff < threshold {
            self.current = self.target;
        } else {
            let t = (snap_speed * dt).clamp(0.0, 1.0);
            self.current += (self.target - self.current) * t;
        }

        !self.is_settled()
    }

    /// `|target - current|`: how far the offset still has to travel.
    pub fn move_distance(&self) -> f64 {
        (self.target - self.current).abs()
    }

    pub fn is_moving(&self, gesture_active: bool, spacing: f64, moving_threshold_coeff: f64) -> bool {
        gesture_active || self.move_distance() > spacing * moving_threshold_coeff
    }
}
