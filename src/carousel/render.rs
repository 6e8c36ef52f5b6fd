//! Render collaborator contract.
//!
//! The controller never owns anything drawable. It only tells a
//! [`SlideRenderer`] which role each slide has and whether clicking it
//! should navigate somewhere.

use super::slides::{Direction, SlideRole};

/// Receiver of role and click-affordance updates from the controller
pub trait SlideRenderer {
    /// Assigns the visual role of slide `index`
    fn set_role(&mut self, index: usize, role: SlideRole);

    /// Marks slide `index` as clickable or not; `on_click` is the navigation a click triggers
    fn set_clickable(&mut self, index: usize, clickable: bool, on_click: Option<Direction>);
}

/// Renderer that drops every update, for headless controllers
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl SlideRenderer for NullRenderer {
    fn set_role(&mut self, _index: usize, _role: SlideRole) {}

    fn set_clickable(&mut self, _index: usize, _clickable: bool, _on_click: Option<Direction>) {}
}
