//!
//! Timed animations.
//!
//! The terminal has no animation engine, so this is a small one.
//! [AnimationControls] hold a value and can run a tween of that value
//! towards a target. Time is always passed in explicitly, nothing
//! here reads the clock. That's the job of the event loop, which calls
//! [advance](AnimationControls::advance) regularly.
//!
//! [start](AnimationControls::start) returns the instant when the
//! tween will be finished. Register a timer for that instant to
//! wait for the end of the animation.
//!

use ratatui::style::Color;
use std::time::{Duration, Instant};

/// Easing curves.
///
/// Same cubic-bezier curves as CSS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start. `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// Slow end. `cubic-bezier(0, 0, 0.58, 1)`
    #[default]
    EaseOut,
    /// Slow start and end. `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
}

impl Easing {
    /// Map the linear progress `t` in 0..=1 to the eased progress.
    pub fn ease(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier((0.42, 0.0), (1.0, 1.0), t),
            Easing::EaseOut => cubic_bezier((0.0, 0.0), (0.58, 1.0), t),
            Easing::EaseInOut => cubic_bezier((0.42, 0.0), (0.58, 1.0), t),
        }
    }
}

fn bezier(p1: f32, p2: f32, s: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solve x(s) = t for s, then return y(s).
fn cubic_bezier(c1: (f32, f32), c2: (f32, f32), t: f32) -> f32 {
    const EPSILON: f32 = 1e-5;

    if t <= 0.0 {
        return 0.0;
    } else if t >= 1.0 {
        return 1.0;
    }

    // newton
    let mut s = t;
    for _ in 0..8 {
        let x = bezier(c1.0, c2.0, s) - t;
        if x.abs() < EPSILON {
            return bezier(c1.1, c2.1, s);
        }
        let d = bezier_slope(c1.0, c2.0, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - x / d).clamp(0.0, 1.0);
    }

    // bisection if newton didn't converge
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    s = t;
    for _ in 0..32 {
        let x = bezier(c1.0, c2.0, s);
        if (x - t).abs() < EPSILON {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(c1.1, c2.1, s)
}

/// Values that can be animated.
pub trait Interpolate: Clone {
    /// Value between self (t=0) and other (t=1).
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Color {
    /// Rgb colors are mixed per channel. Anything else
    /// switches over at the halfway point.
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        fn channel(a: u8, b: u8, t: f32) -> u8 {
            (a as f32 + (b as f32 - a as f32) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        }

        match (self, other) {
            (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => Color::Rgb(
                channel(*r0, *r1, t),
                channel(*g0, *g1, t),
                channel(*b0, *b1, t),
            ),
            _ => {
                if t < 0.5 {
                    *self
                } else {
                    *other
                }
            }
        }
    }
}

/// Duration and curve of one animation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Jump to the target without animation.
    pub const fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }
}

/// Named presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Open,
    Closed,
}

/// Target value and transition for a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variant<T> {
    pub value: T,
    pub transition: Transition,
}

/// The open and closed presets for one animated value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variants<T> {
    pub open: Variant<T>,
    pub closed: Variant<T>,
}

impl<T> Variants<T> {
    pub fn get(&self, preset: Preset) -> &Variant<T> {
        match preset {
            Preset::Open => &self.open,
            Preset::Closed => &self.closed,
        }
    }
}

#[derive(Debug, Clone)]
struct Tween<T> {
    from: T,
    to: T,
    start: Instant,
    transition: Transition,
}

/// Holds an animated value.
#[derive(Debug, Clone)]
pub struct AnimationControls<T> {
    value: T,
    tween: Option<Tween<T>>,
}

impl<T: Default> Default for AnimationControls<T> {
    fn default() -> Self {
        Self {
            value: Default::default(),
            tween: None,
        }
    }
}

impl<T: Interpolate> AnimationControls<T> {
    pub fn new(value: T) -> Self {
        Self { value, tween: None }
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Target of the running animation.
    pub fn target(&self) -> Option<&T> {
        self.tween.as_ref().map(|v| &v.to)
    }

    /// Is an animation running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.tween.is_some()
    }

    /// Jump to the value. Stops a running animation.
    pub fn set(&mut self, value: T) {
        self.tween = None;
        self.value = value;
    }

    /// Stop a running animation at the current value.
    pub fn stop(&mut self) {
        self.tween = None;
    }

    /// Animate from the current value to the target.
    /// A running animation is replaced and the new one starts
    /// where the old one is now.
    ///
    /// Returns the instant when the animation is finished.
    pub fn start(&mut self, target: T, transition: Transition, now: Instant) -> Instant {
        if transition.duration.is_zero() {
            self.set(target);
        } else {
            self.tween = Some(Tween {
                from: self.value.clone(),
                to: target,
                start: now,
                transition,
            });
        }
        now + transition.duration
    }

    /// Animate to a preset.
    pub fn start_variant(&mut self, variants: &Variants<T>, preset: Preset, now: Instant) -> Instant {
        let variant = variants.get(preset);
        self.start(variant.value.clone(), variant.transition, now)
    }

    /// Move the animation to the given time.
    /// Returns true if the value changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(tween) = &self.tween else {
            return false;
        };

        let elapsed = now.saturating_duration_since(tween.start);
        let t = elapsed.as_secs_f32() / tween.transition.duration.as_secs_f32();
        if t >= 1.0 {
            self.value = tween.to.clone();
            self.tween = None;
        } else {
            let eased = tween.transition.easing.ease(t);
            self.value = tween.from.interpolate(&tween.to, eased);
        }
        true
    }
}
