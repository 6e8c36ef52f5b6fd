//! # Shared UI Pieces
//!
//! Tab state for the top navigation bar and frame styling used by the
//! gallery and the section lists.
//!
//! ## Tab Navigation
//! [`Tab`] is a plain state enum. Any tab can switch to any other tab, so
//! there is no transition logic beyond assignment, and every section keeps
//! its own page position while hidden.

use eframe::egui::{self, Color32, Frame, Stroke};

/// Currently visible top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Photo carousel
    #[default]
    Gallery,
    /// Paginated section, by position in the configuration
    Section(usize),
}

/// Frame with the border and fill used for list entries.
///
/// Colors come from the active visuals so the frame follows the theme toggle.
pub fn entry_frame(ui: &egui::Ui) -> Frame {
    let visuals = ui.visuals();
    Frame::new()
        .stroke(Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color))
        .fill(visuals.faint_bg_color)
        .inner_margin(6)
        .outer_margin(2)
}

/// Fill of a slide by prominence; the center slide stands out against its neighbours
pub fn slide_fill(ui: &egui::Ui, center: bool) -> Color32 {
    let visuals = ui.visuals();
    if center {
        visuals.selection.bg_fill
    } else {
        visuals.widgets.inactive.bg_fill
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_is_the_start_tab() {
        assert_eq!(Tab::default(), Tab::Gallery);
        assert_ne!(Tab::Section(0), Tab::Section(1));
    }
}
