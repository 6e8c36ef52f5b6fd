//! Slide data model: sources, the circular slide set and role assignment.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::error::CarouselError;

/// Reference to the content shown on a slide (image path or URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideSource(String);

impl SlideSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name part of the source, used as a short caption
    pub fn file_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0)
    }
}

impl fmt::Display for SlideSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SlideSource {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SlideSource {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the previous slide
    Left,
    /// Towards the next slide
    Right,
}

/// Visual and interactive designation of a slide relative to the current index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideRole {
    Center,
    Left,
    Right,
    Hidden,
}

impl SlideRole {
    /// Role of `index` when `current` is centered in a set of `total` slides.
    ///
    /// Precedence is Center > Left > Right, which decides the degenerate
    /// cases: with one slide only Center exists, with two slides the
    /// non-current slide is Left.
    pub fn for_index(index: usize, current: usize, total: usize) -> Self {
        debug_assert!(total > 0 && current < total && index < total);
        let left = (current + total - 1) % total;
        let right = (current + 1) % total;

        if index == current {
            SlideRole::Center
        } else if index == left {
            SlideRole::Left
        } else if index == right {
            SlideRole::Right
        } else {
            SlideRole::Hidden
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, SlideRole::Hidden)
    }
}

/// A single navigable item in the carousel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub index: usize,
    pub source: SlideSource,
}

/// Ordered, non-empty and fixed sequence of slides.
///
/// The length never changes after [`SlideSet::initialize`], so every
/// modulo operation on it is safe.
#[derive(Debug, Clone)]
pub struct SlideSet {
    slides: Vec<Slide>,
}

impl SlideSet {
    /// Builds one slide per source, in source order.
    pub fn initialize<I, S>(sources: I) -> Result<Self, CarouselError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SlideSource>,
    {
        let slides: Vec<Slide> = sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| Slide {
                index,
                source: source.into(),
            })
            .collect();

        if slides.is_empty() {
            return Err(CarouselError::EmptyInput);
        }

        info!("Initialized slide set with {} slides", slides.len());
        for slide in &slides {
            debug!("  [{}] {}", slide.index, slide.source);
        }

        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    // Never true, a SlideSet cannot be built empty
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    /// Index reached by stepping once from `index` in `direction`, wrapping around
    pub fn step(&self, index: usize, direction: Direction) -> usize {
        let total = self.slides.len();
        match direction {
            Direction::Left => (index + total - 1) % total,
            Direction::Right => (index + 1) % total,
        }
    }
}
