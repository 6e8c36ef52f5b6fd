//! Carousel subsystem: a circular slide sequence with gesture, click and timed navigation
//!
//! # Architecture
//!
//! ```text
//! Pointer / Keys ──► CarouselController ──► SlideRenderer (roles, affordances)
//!                        ▲
//!   AutoAdvanceTimer ────┘ (ticks over mpsc, applied on the UI thread)
//! ```
//!
//! 1. [`slides`] - Slide sources, the non-empty slide set and role assignment
//! 2. [`gesture`] - Pointer tracking (statum typestate) and tap/swipe classification
//! 3. [`auto_advance`] - The single auto-advance tokio task
//! 4. [`controller`] - Navigation state and input dispatch
//! 5. [`render`] - Render collaborator contract

pub mod auto_advance;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod render;
pub mod slides;

pub use auto_advance::{AutoAdvanceSettings, AutoAdvanceTimer};
pub use controller::{CarouselController, CarouselFeatures, CarouselSettings, CarouselState};
pub use error::CarouselError;
pub use gesture::{Gesture, GestureSample, GestureThresholds, InputSurface};
pub use render::SlideRenderer;
pub use slides::{Direction, Slide, SlideRole, SlideSet, SlideSource};
