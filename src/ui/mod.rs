//! # Portfolio User Interface
//!
//! eframe/egui front-end composing the carousel and the section lists into
//! one window. This module is the UI root: it owns the
//! [`CarouselController`](crate::carousel::CarouselController) (through the
//! gallery view), every section's pagination state and the theme flag.
//! Nothing here is global; each component is a field of [`PortfolioUI`].
//!
//! ## Layout
//!
//! The window uses a three-panel layout:
//! - **Top Panel**: one button per tab (Gallery plus a tab per configured
//!   section) and the theme toggle
//! - **Central Panel**: the active tab
//! - **Bottom Panel**: slide position, slideshow state and input surface
//!
//! ## Frame Processing
//!
//! Requests a repaint every 33ms so auto-advance ticks queued by the timer
//! task are applied even while the user is idle. Ticks are drained at the
//! start of every frame, before any pointer input of that frame, which keeps
//! timer and input events in arrival order.
//!
//! ## Theme Persistence
//!
//! The theme toggle is the only persisted value. Saving runs as a tokio task
//! so the frame never waits on the filesystem; failures are logged and the
//! in-memory theme stays as toggled.

pub mod common;
pub mod gallery;
pub mod listing;

use eframe::egui::{self, Button, Layout};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{error, info};

use crate::carousel::{CarouselController, InputSurface, SlideSet};
use crate::config::PortfolioConfig;
use crate::page::{ThemeMode, ThemeStore};

use self::common::Tab;
use self::gallery::{EguiSlideRenderer, GalleryView};
use self::listing::SectionView;

pub struct PortfolioUI {
    /// Visible tab
    tab: Tab,

    /// Carousel and its input handling
    gallery: GalleryView,

    /// Paginated lists, in configuration order
    sections: Vec<SectionView>,

    theme: ThemeMode,
    theme_store: ThemeStore,

    /// Runtime for background work (theme saving)
    runtime: Handle,
}

impl PortfolioUI {
    /// Builds the UI root and starts auto-advance if the configuration enables it.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: PortfolioConfig,
        slides: SlideSet,
        theme: ThemeMode,
        theme_store: ThemeStore,
        runtime: Handle,
    ) -> Self {
        cc.egui_ctx.set_theme(theme.egui_theme());

        let renderer = EguiSlideRenderer::new(slides.len());
        let mut controller = CarouselController::new(slides, renderer, config.carousel)
            .with_runtime(runtime.clone());
        controller.apply_auto_advance_settings();

        let sections = config.sections.into_iter().map(SectionView::new).collect();

        info!("Portfolio UI initialized with theme {:?}", theme);
        Self {
            tab: Tab::default(),
            gallery: GalleryView::new(controller, config.compact_width_px),
            sections,
            theme,
            theme_store,
            runtime,
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        ctx.set_theme(self.theme.egui_theme());
        info!("Theme switched to {:?}", self.theme);

        let store = self.theme_store.clone();
        let theme = self.theme;
        self.runtime.spawn(async move {
            if let Err(e) = store.save(theme).await {
                error!("Failed to persist theme: {}", e);
            }
        });
    }

    fn tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            if ui
                .add(Button::new("Gallery").selected(self.tab == Tab::Gallery))
                .clicked()
            {
                self.tab = Tab::Gallery;
            }
            for (index, section) in self.sections.iter().enumerate() {
                let selected = self.tab == Tab::Section(index);
                if ui
                    .add(Button::new(section.title()).selected(selected))
                    .clicked()
                {
                    self.tab = Tab::Section(index);
                }
            }

            ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(self.theme.toggle_label()).clicked() {
                    self.toggle_theme(ui.ctx());
                }
            });
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        let controller = self.gallery.controller();
        let slideshow = if controller.auto_advance_running() {
            "playing"
        } else {
            "paused"
        };
        let surface = match controller.surface() {
            InputSurface::Compact => "compact",
            InputSurface::Regular => "regular",
        };
        ui.horizontal_centered(|ui| {
            ui.label(format!(
                "Slide {}/{}",
                controller.current_index() + 1,
                controller.slides().len()
            ));
            ui.label(format!("Slideshow: {}", slideshow));
            ui.label(format!("Input: {}", surface));
        });
    }
}

impl eframe::App for PortfolioUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(Duration::from_millis(33));
        self.gallery.tick();

        egui::TopBottomPanel::top("top_panel")
            .show_separator_line(false)
            .show(ctx, |ui| self.tab_bar(ui));

        egui::TopBottomPanel::bottom("bottom_panel")
            .show_separator_line(false)
            .show(ctx, |ui| self.status_bar(ui));

        let tab = self.tab;
        egui::CentralPanel::default().show(ctx, |ui| match tab {
            Tab::Gallery => self.gallery.render(ui),
            Tab::Section(index) => match self.sections.get_mut(index) {
                Some(section) => section.render(ui),
                None => self.tab = Tab::Gallery,
            },
        });
    }
}
