use core::f64::consts::PI;

use kurbo::Vec2;

use crate::TouchSample;

/// Low-pass filtered 2D velocity of a single touch track.
///
/// Each accepted sample blends its instantaneous velocity into the running estimate with a
/// first-order IIR filter (`weight = dt / (rc + dt)`), so one jittery sample only nudges the
/// result. This is not an average over a window.
#[derive(Clone, Copy, Debug)]
pub struct TouchVelocityTracker {
    rc: f64,
    timestamp_epsilon: f64,
    last: Option<TouchSample>,
    velocity: Vec2,
}

impl TouchVelocityTracker {
    pub fn new(cutoff_hz: f64, timestamp_epsilon: f64) -> Self {
        Self {
            rc: 1.0 / (2.0 * PI * cutoff_hz),
            timestamp_epsilon,
            last: None,
            velocity: Vec2::ZERO,
        }
    }

    /// The filter time constant, `1 / (2π · cutoff_hz)`.
    pub fn time_constant(&self) -> f64 {
        self.rc
    }

    pub fn is_tracking(&self) -> bool {
        self.last.is_some()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn last_sample(&self) -> Option<TouchSample> {
        self.last
    }

    /// Begins a new track at `sample` with zero velocity.
    pub fn start(&mut self, sample: TouchSample) {
        self.last = Some(sample);
        self.velocity = Vec2::ZERO;
    }

    /// Feeds a sample. Returns `false` if it was ignored (no track, or a duplicate timestamp).
    pub fn update(&mut self, sample: TouchSample) -> bool {
        let Some(last) = self.last else {
            pwarn!("TouchVelocityTracker: start must be called before touches can be tracked");
            return false;
        };

        let dt = sample.time - last.time;
        if dt < self.timestamp_epsilon {
            return false;
        }

        let instant = (sample.position - last.position) / dt;
        let weight = dt / (self.rc + dt);
        self.velocity = self.velocity.lerp(instant, weight);
        self.last = Some(sample);
        ptrace!(
            vx = self.velocity.x,
            vy = self.velocity.y,
            dt,
            "TouchVelocityTracker::update"
        );
        true
    }

    pub fn stop(&mut self) {
        self.last = None;
        self.velocity = Vec2::ZERO;
    }
}
