//! Pointer gesture capture and classification
//!
//! Mouse and touch input arrive as the same pair of events, a press and a
//! release. A [`PointerTracker`] records the press, turns the release into
//! a [`GestureSample`] and [`GestureThresholds::classify`] decides whether
//! the interaction was a tap, a horizontal swipe or nothing.
//!
//! # State Machine
//!
//! ```text
//! Idle ──press──► Pressed(PointerDown) ──release──► Idle
//!                   │      ▲
//!                   └press─┘ (restart)
//! ```

use serde::{Deserialize, Serialize};
use statum::{machine, state};
use tracing::debug;

/// Capability of the input surface, reported by the input collaborator.
///
/// `Compact` covers small or touch-primary screens. It enables tap-to-advance
/// on the center slide and a tighter swipe distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSurface {
    Compact,
    #[default]
    Regular,
}

impl InputSurface {
    pub fn is_compact(&self) -> bool {
        matches!(self, InputSurface::Compact)
    }
}

/// Outcome of a completed pointer interaction.
///
/// Swipes are named after the navigation they cause: a finger moving to
/// the right drags the previous slide in, which is `SwipeLeft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    SwipeLeft,
    SwipeRight,
    None,
}

/// Press position and time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDown {
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

/// One completed pointer interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    pub start_time_ms: u64,
}

impl GestureSample {
    pub fn delta_x(&self) -> f32 {
        self.end_x - self.start_x
    }

    pub fn delta_y(&self) -> f32 {
        self.end_y - self.start_y
    }
}

/// Limits separating taps, swipes and ignored movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// A tap must be released before this many milliseconds
    pub tap_time_ms: u64,

    /// A tap must stay within this many pixels on both axes
    pub tap_distance_px: f32,

    /// Minimum horizontal travel for a swipe on regular surfaces
    pub swipe_distance_px: f32,

    /// Minimum horizontal travel for a swipe on compact surfaces
    pub compact_swipe_distance_px: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            tap_time_ms: 300,
            tap_distance_px: 10.0,
            swipe_distance_px: 50.0,
            compact_swipe_distance_px: 30.0,
        }
    }
}

impl GestureThresholds {
    pub fn swipe_distance(&self, surface: InputSurface) -> f32 {
        if surface.is_compact() {
            self.compact_swipe_distance_px
        } else {
            self.swipe_distance_px
        }
    }

    /// Classifies `sample`, released at `now_ms`, on the given surface.
    pub fn classify(&self, sample: &GestureSample, now_ms: u64, surface: InputSurface) -> Gesture {
        let delta_x = sample.delta_x();
        let delta_y = sample.delta_y();
        let elapsed = now_ms.saturating_sub(sample.start_time_ms);

        if elapsed < self.tap_time_ms
            && delta_x.abs() < self.tap_distance_px
            && delta_y.abs() < self.tap_distance_px
        {
            return Gesture::Tap;
        }

        if delta_x.abs() > delta_y.abs() && delta_x.abs() > self.swipe_distance(surface) {
            if delta_x > 0.0 {
                Gesture::SwipeLeft
            } else {
                Gesture::SwipeRight
            }
        } else {
            Gesture::None
        }
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum PointerPhase {
    Idle,
    Pressed(PointerDown),
}

#[machine]
#[derive(Debug)]
pub struct PointerTracker<S: PointerPhase> {
    // Completed interactions, for diagnostics
    completed: u64,
}

impl<S: PointerPhase> PointerTracker<S> {
    pub fn completed(&self) -> u64 {
        self.completed
    }
}

impl PointerTracker<Idle> {
    pub fn create() -> Self {
        Self::new(0)
    }

    pub fn press(self, down: PointerDown) -> PointerTracker<Pressed> {
        debug!("Pointer pressed at ({:.1}, {:.1})", down.x, down.y);
        self.transition_with(down)
    }
}

impl PointerTracker<Pressed> {
    /// A second press before release replaces the recorded start
    pub fn press(self, down: PointerDown) -> PointerTracker<Pressed> {
        debug!("Pointer pressed again before release, restarting gesture");
        self.transition_with(down)
    }

    /// Completes the interaction and returns the sample it produced
    pub fn release(mut self, x: f32, y: f32) -> (PointerTracker<Idle>, Option<GestureSample>) {
        let sample = self.get_state_data().map(|down| GestureSample {
            start_x: down.x,
            start_y: down.y,
            end_x: x,
            end_y: y,
            start_time_ms: down.time_ms,
        });
        self.completed += 1;
        (self.transition(), sample)
    }
}

/// Runtime holder for the tracker, whose state is only known at runtime
#[derive(Debug)]
pub enum GestureTracker {
    Idle(PointerTracker<Idle>),
    Pressed(PointerTracker<Pressed>),
}

impl Default for GestureTracker {
    fn default() -> Self {
        GestureTracker::Idle(PointerTracker::create())
    }
}

impl GestureTracker {
    pub fn press(self, down: PointerDown) -> Self {
        match self {
            GestureTracker::Idle(tracker) => GestureTracker::Pressed(tracker.press(down)),
            GestureTracker::Pressed(tracker) => GestureTracker::Pressed(tracker.press(down)),
        }
    }

    /// Releases the pointer; a release without a press yields no sample
    pub fn release(self, x: f32, y: f32) -> (Self, Option<GestureSample>) {
        match self {
            GestureTracker::Idle(tracker) => {
                debug!("Pointer released without a recorded press, ignoring");
                (GestureTracker::Idle(tracker), None)
            }
            GestureTracker::Pressed(tracker) => {
                let (idle, sample) = tracker.release(x, y);
                (GestureTracker::Idle(idle), sample)
            }
        }
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self, GestureTracker::Pressed(_))
    }

    pub fn completed(&self) -> u64 {
        match self {
            GestureTracker::Idle(tracker) => tracker.completed(),
            GestureTracker::Pressed(tracker) => tracker.completed(),
        }
    }
}
