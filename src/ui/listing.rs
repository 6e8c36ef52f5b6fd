use eframe::egui::{Label, RichText, ScrollArea, Ui};
use tracing::debug;

use super::common::entry_frame;
use crate::config::SectionConfig;
use crate::page::Paginator;

/// One paginated section tab
pub struct SectionView {
    section: SectionConfig,
    paginator: Paginator,
    // Set on page change, consumed by the next frame's scroll area
    scroll_to_top: bool,
}

impl SectionView {
    pub fn new(section: SectionConfig) -> Self {
        let paginator = Paginator::new(section.entries.len(), section.items_per_page);
        Self {
            section,
            paginator,
            scroll_to_top: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.section.title
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    /// Switches to `page` and scrolls back up on the next frame.
    pub fn select_page(&mut self, page: usize) {
        if page == self.paginator.current_page() {
            return;
        }
        debug!("Section '{}' switching to page {}", self.section.title, page);
        self.paginator.show_page(page);
        self.scroll_to_top = true;
    }

    /// Renders the entries of the current page followed by the page buttons
    pub fn render(&mut self, ui: &mut Ui) {
        ui.heading(&self.section.title);

        let mut scroll_area = ScrollArea::vertical().max_height(ui.available_height() - 40.0);
        if std::mem::take(&mut self.scroll_to_top) {
            scroll_area = scroll_area.vertical_scroll_offset(0.0);
        }
        scroll_area.show(ui, |ui| {
            if self.section.entries.is_empty() {
                ui.label("No entries yet");
            }
            for entry in &self.section.entries[self.paginator.visible_range()] {
                entry_frame(ui).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(&entry.title).strong());
                    if !entry.body.is_empty() {
                        ui.add(Label::new(&entry.body).wrap());
                    }
                });
            }
        });

        if self.paginator.page_count() > 1 {
            ui.horizontal(|ui| {
                for page in 1..=self.paginator.page_count() {
                    let selected = page == self.paginator.current_page();
                    if ui.selectable_label(selected, page.to_string()).clicked() {
                        self.select_page(page);
                    }
                }
            });
        }
    }
}
