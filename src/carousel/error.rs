//! Error definitions for the carousel module

use thiserror::Error;

/// Errors raised while building a carousel.
///
/// Only construction can fail. Once a [`SlideSet`](super::slides::SlideSet)
/// exists, every navigation, render and gesture operation is total.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    /// The slide source list was empty, so there is nothing to rotate through
    #[error("Carousel needs at least one slide source, got none")]
    EmptyInput,
}
