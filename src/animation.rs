//! Per-frame animation helpers.
//!
//! Everything in here is a pure function of the elapsed time or a tiny
//! stateful oscillator that advances once per frame. Demos combine these in
//! their `on_update` hooks.

use std::f32::consts::PI;

use instant::Instant;

/// Time handed to the per-frame update step.
///
/// `elapsed` is the number of seconds since the clock started and only ever
/// grows. `delta` is the time since the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed: f32,
    pub delta: f32,
}

impl FrameTime {
    pub fn at(elapsed: f32) -> Self {
        Self {
            elapsed,
            delta: 0.0,
        }
    }
}

/// Monotonic clock that produces [`FrameTime`]s.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last: f32,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            last: 0.0,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let elapsed = self.start.elapsed().as_secs_f32();
        let delta = elapsed - self.last;
        self.last = elapsed;
        FrameTime { elapsed, delta }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::start()
    }
}

/// `sin(elapsed * frequency) * amplitude`
pub fn wave(elapsed: f32, frequency: f32, amplitude: f32) -> f32 {
    (elapsed * frequency).sin() * amplitude
}

/// Point on a circle of `radius` in the xz-plane, `speed` radians per second.
///
/// Returns `(x, z)` with `x = sin`, `z = cos` so that `elapsed = 0` sits on the
/// positive z axis.
pub fn orbit(elapsed: f32, speed: f32, radius: f32) -> (f32, f32) {
    let angle = elapsed * speed;
    (angle.sin() * radius, angle.cos() * radius)
}

/// Linear rotation accumulation: `elapsed * rate`. No wrap-around.
pub fn spin(elapsed: f32, rate: f32) -> f32 {
    elapsed * rate
}

/// Direction of a [`BounceOscillator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Descending,
    Ascending,
}

/// Two-state linear ramp with reversal thresholds.
///
/// While descending the value drops by `step` every frame until it falls below
/// `lower`; then it ascends until it rises above `upper`, and so on. The
/// thresholds are strict, so the value overshoots each bound by less than one
/// step before turning around.
#[derive(Clone, Debug)]
pub struct BounceOscillator {
    pub value: f32,
    pub heading: Heading,
    step: f32,
    lower: f32,
    upper: f32,
}

impl BounceOscillator {
    pub fn new(start: f32, step: f32, lower: f32, upper: f32) -> Self {
        Self {
            value: start,
            heading: Heading::Descending,
            step,
            lower,
            upper,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.lower, self.upper)
    }

    /// Advance by one frame and return the new value.
    pub fn advance(&mut self) -> f32 {
        match self.heading {
            Heading::Descending => {
                self.value -= self.step;
                if self.value < self.lower {
                    self.heading = Heading::Ascending;
                }
            }
            Heading::Ascending => {
                self.value += self.step;
                if self.value > self.upper {
                    self.heading = Heading::Descending;
                }
            }
        }
        self.value
    }
}

/// Flips a rotation between `0` and `π` while a [`BounceOscillator`] is close
/// to either end of its travel.
///
/// Descending below `flip_low` turns the angle towards `0`, ascending above
/// `flip_high` turns it back towards `π`, `rate` radians per frame.
#[derive(Clone, Debug)]
pub struct Flipper {
    pub angle: f32,
    rate: f32,
    flip_low: f32,
    flip_high: f32,
}

impl Flipper {
    pub fn new(angle: f32, rate: f32, flip_low: f32, flip_high: f32) -> Self {
        Self {
            angle,
            rate,
            flip_low,
            flip_high,
        }
    }

    /// Update the angle for a value reached while moving in `heading`.
    ///
    /// `heading` is the direction the oscillator moved in this frame, i.e. its
    /// heading *before* [`BounceOscillator::advance`] possibly reversed it.
    pub fn follow(&mut self, value: f32, heading: Heading) -> f32 {
        match heading {
            Heading::Descending if value < self.flip_low && self.angle > 0.0 => {
                self.angle -= self.rate;
            }
            Heading::Ascending if value > self.flip_high && self.angle < PI => {
                self.angle += self.rate;
            }
            _ => (),
        }
        self.angle
    }
}

/// Step `value` by `step` towards `limit` as long as it has not passed it yet.
///
/// Mirrors the guided-tour ramps: `if rotation <= limit { rotation += step }`.
/// A negative `step` ramps downwards and checks `value >= limit`.
pub fn ramp(value: f32, step: f32, limit: f32) -> f32 {
    if step >= 0.0 {
        if value <= limit { value + step } else { value }
    } else if value >= limit {
        value + step
    } else {
        value
    }
}
