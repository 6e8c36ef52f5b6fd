//! Gallery tab: draws the carousel and feeds it pointer and keyboard input.
//!
//! egui delivers mouse and touch presses as the same `PointerButton` events,
//! so one code path serves both. Touch input is still noticed separately to
//! decide whether the surface is compact.

use eframe::egui::{
    vec2, Align2, CursorIcon, Event, FontId, Key, PointerButton, Pos2, Rect, Sense, Ui,
};
use tracing::debug;

use super::common::slide_fill;
use crate::carousel::{CarouselController, Direction, InputSurface, SlideRenderer, SlideRole};

const GALLERY_HEIGHT: f32 = 320.0;

/// What the gallery draws for one slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideView {
    pub role: SlideRole,
    pub clickable: bool,
    pub on_click: Option<Direction>,
}

impl Default for SlideView {
    fn default() -> Self {
        Self {
            role: SlideRole::Hidden,
            clickable: false,
            on_click: None,
        }
    }
}

/// Renderer keeping the latest role and affordance of every slide for painting
#[derive(Debug, Default)]
pub struct EguiSlideRenderer {
    views: Vec<SlideView>,
}

impl EguiSlideRenderer {
    pub fn new(slide_count: usize) -> Self {
        Self {
            views: vec![SlideView::default(); slide_count],
        }
    }

    pub fn views(&self) -> &[SlideView] {
        &self.views
    }

    fn view_mut(&mut self, index: usize) -> &mut SlideView {
        if self.views.len() <= index {
            self.views.resize(index + 1, SlideView::default());
        }
        &mut self.views[index]
    }
}

impl SlideRenderer for EguiSlideRenderer {
    fn set_role(&mut self, index: usize, role: SlideRole) {
        self.view_mut(index).role = role;
    }

    fn set_clickable(&mut self, index: usize, clickable: bool, on_click: Option<Direction>) {
        let view = self.view_mut(index);
        view.clickable = clickable;
        view.on_click = on_click;
    }
}

// Screen placement of a visible slide
#[derive(Debug, Clone, Copy)]
struct Placement {
    index: usize,
    role: SlideRole,
    rect: Rect,
}

/// Rectangle of a slide with the given role inside `area`
fn slide_rect(area: Rect, role: SlideRole) -> Option<Rect> {
    let center_size = vec2(area.width() * 0.5, area.height());
    let side_size = vec2(area.width() * 0.28, area.height() * 0.75);
    let side_offset = area.width() * 0.33;

    match role {
        SlideRole::Center => Some(Rect::from_center_size(area.center(), center_size)),
        SlideRole::Left => Some(Rect::from_center_size(
            area.center() - vec2(side_offset, 0.0),
            side_size,
        )),
        SlideRole::Right => Some(Rect::from_center_size(
            area.center() + vec2(side_offset, 0.0),
            side_size,
        )),
        SlideRole::Hidden => None,
    }
}

/// Topmost slide under `pos`; the center slide is painted last and wins overlaps
fn hit_test(placements: &[Placement], pos: Pos2) -> Option<usize> {
    placements
        .iter()
        .rev()
        .find(|placement| placement.rect.contains(pos))
        .map(|placement| placement.index)
}

pub struct GalleryView {
    controller: CarouselController<EguiSlideRenderer>,
    compact_width_px: f32,
    touch_seen: bool,
}

impl GalleryView {
    pub fn new(controller: CarouselController<EguiSlideRenderer>, compact_width_px: f32) -> Self {
        Self {
            controller,
            compact_width_px,
            touch_seen: false,
        }
    }

    pub fn controller(&self) -> &CarouselController<EguiSlideRenderer> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CarouselController<EguiSlideRenderer> {
        &mut self.controller
    }

    /// Applies pending auto-advance ticks; runs every frame, whichever tab is visible
    pub fn tick(&mut self) {
        if self.controller.poll_auto_advance() {
            debug!("Auto-advanced to slide {}", self.controller.current_index());
        }
    }

    fn surface_for(&self, screen_width: f32) -> InputSurface {
        if self.touch_seen || screen_width <= self.compact_width_px {
            InputSurface::Compact
        } else {
            InputSurface::Regular
        }
    }

    fn placements(&self, area: Rect) -> Vec<Placement> {
        let views = self.controller.renderer().views();
        let mut placements: Vec<Placement> = views
            .iter()
            .enumerate()
            .filter_map(|(index, view)| {
                slide_rect(area, view.role).map(|rect| Placement {
                    index,
                    role: view.role,
                    rect,
                })
            })
            .collect();
        // Center last so it is painted on top
        placements.sort_by_key(|placement| placement.role == SlideRole::Center);
        placements
    }

    fn paint(&self, ui: &Ui, area: Rect, placements: &[Placement]) {
        let painter = ui.painter_at(area);
        let text_color = ui.visuals().strong_text_color();
        let total = self.controller.slides().len();

        for placement in placements {
            let center = placement.role == SlideRole::Center;
            painter.rect_filled(placement.rect, 8.0, slide_fill(ui, center));

            let Some(slide) = self.controller.slides().get(placement.index) else {
                continue;
            };
            let font = FontId::proportional(if center { 18.0 } else { 13.0 });
            painter.text(
                placement.rect.center(),
                Align2::CENTER_CENTER,
                slide.source.file_name(),
                font,
                text_color,
            );
            if center {
                painter.text(
                    placement.rect.center_bottom() - vec2(0.0, 16.0),
                    Align2::CENTER_CENTER,
                    format!("{} / {}", placement.index + 1, total),
                    FontId::proportional(12.0),
                    text_color,
                );
            }
        }
    }

    pub fn render(&mut self, ui: &mut Ui) {
        let (events, time_ms, screen_width) = ui.input(|i| {
            (
                i.events.clone(),
                (i.time * 1000.0) as u64,
                i.screen_rect().width(),
            )
        });

        if !self.touch_seen && events.iter().any(|e| matches!(e, Event::Touch { .. })) {
            debug!("Touch input detected, treating surface as compact");
            self.touch_seen = true;
        }
        let surface = self.surface_for(screen_width);
        self.controller.set_surface(surface);

        let height = GALLERY_HEIGHT.min(ui.available_height() - 40.0).max(120.0);
        let (area, response) =
            ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::click_and_drag());
        let placements = self.placements(area);
        self.paint(ui, area, &placements);

        let hovered = response
            .hover_pos()
            .and_then(|pos| hit_test(&placements, pos))
            .and_then(|index| self.controller.renderer().views().get(index));
        if hovered.is_some_and(|view| view.clickable) {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        for event in &events {
            if let Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } = event
            {
                if *pressed {
                    if area.contains(*pos) {
                        let target = hit_test(&placements, *pos);
                        self.controller.pointer_down(pos.x, pos.y, time_ms, target);
                    }
                } else {
                    let target = hit_test(&placements, *pos);
                    self.controller.pointer_up(pos.x, pos.y, time_ms, target);
                }
            }
        }

        let (left, right) = ui.input(|i| {
            (
                i.key_pressed(Key::ArrowLeft),
                i.key_pressed(Key::ArrowRight),
            )
        });
        if left {
            self.controller.navigate_key(Direction::Left);
        }
        if right {
            self.controller.navigate_key(Direction::Right);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let label = if self.controller.auto_advance_running() {
                "⏸ Pause slideshow"
            } else {
                "▶ Play slideshow"
            };
            if ui.button(label).clicked() {
                self.controller.toggle_auto_advance();
            }
        });
    }
}
