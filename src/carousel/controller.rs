//! Carousel controller
//!
//! Owns the slide set, the current index, the pointer tracker and the
//! optional auto-advance timer. Everything here runs on the UI thread; the
//! timer task only enqueues ticks, which are applied in [`CarouselController::poll_auto_advance`].

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use super::auto_advance::{AutoAdvanceSettings, AutoAdvanceTimer};
use super::gesture::{
    Gesture, GestureSample, GestureThresholds, GestureTracker, InputSurface, PointerDown,
};
use super::render::SlideRenderer;
use super::slides::{Direction, SlideRole, SlideSet};

/// Input paths that may navigate the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselFeatures {
    /// Clicking the left/right (and, on compact surfaces, center) slide
    pub click_navigation: bool,
    /// Horizontal swipes
    pub swipe_navigation: bool,
    /// Tapping anywhere on a compact surface advances to the next slide
    pub tap_navigation: bool,
    /// Arrow keys
    pub keyboard_navigation: bool,
}

impl Default for CarouselFeatures {
    fn default() -> Self {
        Self {
            click_navigation: true,
            swipe_navigation: true,
            tap_navigation: true,
            keyboard_navigation: true,
        }
    }
}

/// Complete carousel behavior configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    pub auto_advance: AutoAdvanceSettings,
    pub gestures: GestureThresholds,
    pub features: CarouselFeatures,
}

/// Navigation state: which slide is centered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselState {
    current_index: usize,
}

impl CarouselState {
    pub fn current_index(&self) -> usize {
        self.current_index
    }
}

pub struct CarouselController<R: SlideRenderer> {
    slides: SlideSet,
    state: CarouselState,
    renderer: R,
    settings: CarouselSettings,
    surface: InputSurface,
    tracker: GestureTracker,
    /// Slide under the pointer when the current press started
    pressed_target: Option<usize>,
    auto_advance: Option<AutoAdvanceTimer>,
}

impl<R: SlideRenderer> CarouselController<R> {
    /// Creates a controller centered on the first slide and renders it once.
    ///
    /// Auto-advance is not started here, see [`Self::apply_auto_advance_settings`].
    pub fn new(slides: SlideSet, renderer: R, settings: CarouselSettings) -> Self {
        info!(
            "Creating carousel controller for {} slides with settings: {:?}",
            slides.len(),
            settings
        );
        let mut controller = Self {
            slides,
            state: CarouselState::default(),
            renderer,
            settings,
            surface: InputSurface::default(),
            tracker: GestureTracker::default(),
            pressed_target: None,
            auto_advance: None,
        };
        controller.render();
        controller
    }

    /// Binds auto-advance to `runtime` instead of the ambient one.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.auto_advance = Some(AutoAdvanceTimer::with_runtime(runtime));
        self
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn slides(&self) -> &SlideSet {
        &self.slides
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    pub fn surface(&self) -> InputSurface {
        self.surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn role_of(&self, index: usize) -> SlideRole {
        SlideRole::for_index(index, self.state.current_index, self.slides.len())
    }

    /// Navigation a click on slide `index` would trigger, if the slide is clickable.
    pub fn click_action(&self, index: usize) -> Option<Direction> {
        if !self.settings.features.click_navigation || index >= self.slides.len() {
            return None;
        }
        match self.role_of(index) {
            SlideRole::Center if self.surface.is_compact() => Some(Direction::Right),
            SlideRole::Center | SlideRole::Hidden => None,
            SlideRole::Left => Some(Direction::Left),
            SlideRole::Right => Some(Direction::Right),
        }
    }

    /// Pushes the role and click affordance of every slide to the renderer.
    pub fn render(&mut self) {
        for index in 0..self.slides.len() {
            let role = self.role_of(index);
            let action = self.click_action(index);
            self.renderer.set_role(index, role);
            self.renderer.set_clickable(index, action.is_some(), action);
        }
    }

    /// Manual navigation: moves one slide, re-renders and restarts auto-advance.
    pub fn advance(&mut self, direction: Direction) {
        self.step(direction);
        if let Some(timer) = self.auto_advance.as_mut() {
            timer.restart();
        }
    }

    fn step(&mut self, direction: Direction) {
        let previous = self.state.current_index;
        self.state.current_index = self.slides.step(previous, direction);
        debug!(
            "Carousel moved {:?}: {} -> {}",
            direction, previous, self.state.current_index
        );
        self.render();
    }

    /// Updates the input surface capability; affordances are re-rendered on change.
    pub fn set_surface(&mut self, surface: InputSurface) {
        if self.surface != surface {
            info!("Input surface changed to {:?}", surface);
            self.surface = surface;
            self.render();
        }
    }

    /// Clicks slide `index`; returns the navigation performed, if any.
    pub fn click(&mut self, index: usize) -> Option<Direction> {
        let action = self.click_action(index)?;
        self.advance(action);
        Some(action)
    }

    /// Arrow-key navigation; returns whether the key was handled.
    pub fn navigate_key(&mut self, direction: Direction) -> bool {
        if !self.settings.features.keyboard_navigation {
            return false;
        }
        self.advance(direction);
        true
    }

    /// Starts a pointer interaction; `target` is the slide under the press position.
    pub fn pointer_down(&mut self, x: f32, y: f32, time_ms: u64, target: Option<usize>) {
        let tracker = std::mem::take(&mut self.tracker);
        self.tracker = tracker.press(PointerDown { x, y, time_ms });
        self.pressed_target = target;
    }

    /// Completes a pointer interaction and acts on it.
    ///
    /// `target` is the slide under the release position, as hit-tested by the
    /// input collaborator.
    pub fn pointer_up(&mut self, x: f32, y: f32, time_ms: u64, target: Option<usize>) -> Gesture {
        let tracker = std::mem::take(&mut self.tracker);
        let (tracker, sample) = tracker.release(x, y);
        self.tracker = tracker;
        let pressed_target = self.pressed_target.take();

        let Some(sample) = sample else {
            return Gesture::None;
        };
        let gesture = self.handle_gesture(&sample, time_ms);
        self.dispatch(gesture, target, pressed_target);
        gesture
    }

    /// Classifies a completed interaction released at `now_ms`.
    pub fn handle_gesture(&self, sample: &GestureSample, now_ms: u64) -> Gesture {
        let gesture = self.settings.gestures.classify(sample, now_ms, self.surface);
        debug!(
            "Gesture dx={:.1} dy={:.1} classified as {:?}",
            sample.delta_x(),
            sample.delta_y(),
            gesture
        );
        gesture
    }

    fn dispatch(&mut self, gesture: Gesture, target: Option<usize>, pressed: Option<usize>) {
        let features = self.settings.features;
        match gesture {
            Gesture::SwipeLeft if features.swipe_navigation => self.advance(Direction::Left),
            Gesture::SwipeRight if features.swipe_navigation => self.advance(Direction::Right),
            Gesture::Tap => {
                if target.and_then(|index| self.click(index)).is_none()
                    && self.surface.is_compact()
                    && features.tap_navigation
                {
                    self.advance(Direction::Right);
                }
            }
            // Long or drifting press released on the slide it started on
            Gesture::None if target.is_some() && target == pressed => {
                if let Some(index) = target {
                    self.click(index);
                }
            }
            _ => {}
        }
    }

    /// Starts auto-advance with the given interval, replacing any running timer.
    ///
    /// Without [`Self::with_runtime`] the ambient tokio runtime is used; outside
    /// of one the call is logged and ignored.
    pub fn start_auto_advance(&mut self, interval: Duration) {
        if self.auto_advance.is_none() {
            match Handle::try_current() {
                Ok(runtime) => self.auto_advance = Some(AutoAdvanceTimer::with_runtime(runtime)),
                Err(e) => {
                    warn!("Cannot start auto-advance without a tokio runtime: {}", e);
                    return;
                }
            }
        }
        if let Some(timer) = self.auto_advance.as_mut() {
            timer.start(interval);
        }
    }

    pub fn stop_auto_advance(&mut self) {
        if let Some(timer) = self.auto_advance.as_mut() {
            timer.stop();
        }
    }

    pub fn auto_advance_running(&self) -> bool {
        self.auto_advance
            .as_ref()
            .is_some_and(AutoAdvanceTimer::is_running)
    }

    /// Starts or stops auto-advance according to the configured settings.
    pub fn apply_auto_advance_settings(&mut self) {
        let auto = self.settings.auto_advance;
        if auto.enabled {
            self.start_auto_advance(auto.interval());
        } else {
            self.stop_auto_advance();
        }
    }

    /// Flips auto-advance on or off, keeping the configured interval.
    pub fn toggle_auto_advance(&mut self) {
        self.settings.auto_advance.enabled = !self.settings.auto_advance.enabled;
        self.apply_auto_advance_settings();
    }

    /// Applies queued auto-advance ticks; returns whether the carousel moved.
    ///
    /// Ticks that piled up while nobody polled collapse into a single step.
    pub fn poll_auto_advance(&mut self) -> bool {
        let due = self
            .auto_advance
            .as_mut()
            .map(AutoAdvanceTimer::take_due_ticks)
            .unwrap_or(0);
        if due > 1 {
            debug!("Coalescing {} auto-advance ticks into one step", due);
        }
        if due == 0 {
            return false;
        }
        self.step(Direction::Right);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::render::NullRenderer;
    use tokio::time::sleep;

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        roles: Vec<Option<SlideRole>>,
        clicks: Vec<Option<Direction>>,
        clickable: Vec<bool>,
        renders: usize,
    }

    impl SlideRenderer for RecordingRenderer {
        fn set_role(&mut self, index: usize, role: SlideRole) {
            if self.roles.len() <= index {
                self.roles.resize(index + 1, None);
            }
            if index == 0 {
                self.renders += 1;
            }
            self.roles[index] = Some(role);
        }

        fn set_clickable(&mut self, index: usize, clickable: bool, on_click: Option<Direction>) {
            if self.clicks.len() <= index {
                self.clicks.resize(index + 1, None);
                self.clickable.resize(index + 1, false);
            }
            self.clicks[index] = on_click;
            self.clickable[index] = clickable;
        }
    }

    fn sources(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("slide-{i}.jpeg")).collect()
    }

    fn controller(n: usize) -> CarouselController<RecordingRenderer> {
        let slides = SlideSet::initialize(sources(n)).unwrap();
        CarouselController::new(
            slides,
            RecordingRenderer::default(),
            CarouselSettings::default(),
        )
    }

    fn count(roles: &[Option<SlideRole>], role: SlideRole) -> usize {
        roles.iter().filter(|r| **r == Some(role)).count()
    }

    #[test]
    fn index_never_leaves_range() {
        for n in 1..=6 {
            let mut c = controller(n);
            let mut seed: u32 = 17;
            for _ in 0..200 {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let direction = if seed & 0x100 == 0 {
                    Direction::Left
                } else {
                    Direction::Right
                };
                c.advance(direction);
                assert!(c.current_index() < n);
            }
        }
    }

    #[test]
    fn right_then_left_is_identity() {
        for n in 1..=6 {
            let mut c = controller(n);
            for start in 0..n {
                while c.current_index() != start {
                    c.advance(Direction::Right);
                }
                c.advance(Direction::Right);
                c.advance(Direction::Left);
                assert_eq!(c.current_index(), start, "n = {n}");
            }
        }
    }

    #[test]
    fn single_slide_never_moves() {
        let mut c = controller(1);
        c.advance(Direction::Right);
        assert_eq!(c.current_index(), 0);
        c.advance(Direction::Left);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn wraps_around_the_ends() {
        let mut c = controller(3);
        c.advance(Direction::Left);
        assert_eq!(c.current_index(), 2);
        c.advance(Direction::Right);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn render_assigns_one_center_and_distinct_neighbours() {
        for n in 1..=7 {
            let mut c = controller(n);
            for _ in 0..n {
                c.render();
                let roles = &c.renderer().roles;
                assert_eq!(roles.len(), n);
                assert_eq!(count(roles, SlideRole::Center), 1);
                assert_eq!(roles[c.current_index()], Some(SlideRole::Center));
                if n >= 3 {
                    assert_eq!(count(roles, SlideRole::Left), 1);
                    assert_eq!(count(roles, SlideRole::Right), 1);
                    assert_eq!(
                        roles[(c.current_index() + n - 1) % n],
                        Some(SlideRole::Left)
                    );
                    assert_eq!(roles[(c.current_index() + 1) % n], Some(SlideRole::Right));
                }
                c.advance(Direction::Right);
            }
        }
    }

    #[test]
    fn render_is_idempotent() {
        let mut c = controller(5);
        c.advance(Direction::Right);
        let before = c.renderer().roles.clone();
        c.render();
        c.render();
        assert_eq!(c.renderer().roles, before);
    }

    #[test]
    fn every_advance_rerenders() {
        let mut c = controller(4);
        let initial = c.renderer().renders;
        c.advance(Direction::Right);
        c.advance(Direction::Left);
        assert_eq!(c.renderer().renders, initial + 2);
    }

    #[test]
    fn center_is_clickable_only_on_compact_surfaces() {
        let mut c = controller(4);
        assert_eq!(c.renderer().clicks[0], None);
        assert!(!c.renderer().clickable[0]);
        assert_eq!(c.renderer().clicks[1], Some(Direction::Right));
        assert_eq!(c.renderer().clicks[3], Some(Direction::Left));
        assert!(!c.renderer().clickable[2]);

        c.set_surface(InputSurface::Compact);
        assert_eq!(c.renderer().clicks[0], Some(Direction::Right));
        assert!(c.renderer().clickable[0]);
    }

    #[test]
    fn clicking_neighbours_navigates() {
        let mut c = controller(4);
        assert_eq!(c.click(3), Some(Direction::Left));
        assert_eq!(c.current_index(), 3);
        assert_eq!(c.click(0), Some(Direction::Right));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn hidden_and_regular_center_clicks_do_nothing() {
        let mut c = controller(5);
        assert_eq!(c.click(2), None);
        assert_eq!(c.click(0), None);
        assert_eq!(c.click(99), None);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn disabled_click_navigation_removes_affordances() {
        let slides = SlideSet::initialize(sources(3)).unwrap();
        let mut settings = CarouselSettings::default();
        settings.features.click_navigation = false;
        let mut c = CarouselController::new(slides, RecordingRenderer::default(), settings);
        assert!(c.renderer().clickable.iter().all(|clickable| !clickable));
        assert_eq!(c.click(1), None);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn swipes_navigate_through_pointer_events() {
        let mut c = controller(5);
        c.pointer_down(300.0, 100.0, 1_000, None);
        assert_eq!(
            c.pointer_up(200.0, 105.0, 1_150, None),
            Gesture::SwipeRight
        );
        assert_eq!(c.current_index(), 1);

        c.pointer_down(100.0, 100.0, 2_000, None);
        assert_eq!(
            c.pointer_up(180.0, 95.0, 2_200, Some(1)),
            Gesture::SwipeLeft
        );
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn disabled_swipes_are_classified_but_ignored() {
        let slides = SlideSet::initialize(sources(3)).unwrap();
        let mut settings = CarouselSettings::default();
        settings.features.swipe_navigation = false;
        let mut c = CarouselController::new(slides, NullRenderer, settings);
        c.pointer_down(300.0, 100.0, 0, None);
        assert_eq!(c.pointer_up(100.0, 100.0, 100, None), Gesture::SwipeRight);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn tap_on_neighbour_clicks_it() {
        let mut c = controller(4);
        c.pointer_down(10.0, 10.0, 0, None);
        assert_eq!(c.pointer_up(12.0, 11.0, 100, Some(3)), Gesture::Tap);
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn tap_on_regular_center_does_nothing() {
        let mut c = controller(4);
        c.pointer_down(10.0, 10.0, 0, None);
        assert_eq!(c.pointer_up(12.0, 11.0, 100, Some(0)), Gesture::Tap);
        assert_eq!(c.pointer_up(12.0, 11.0, 100, None), Gesture::None);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn compact_tap_anywhere_advances_once() {
        let mut c = controller(4);
        c.set_surface(InputSurface::Compact);

        c.pointer_down(10.0, 10.0, 0, None);
        c.pointer_up(12.0, 11.0, 100, None);
        assert_eq!(c.current_index(), 1);

        c.pointer_down(10.0, 10.0, 500, None);
        c.pointer_up(10.0, 10.0, 550, Some(1));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn compact_tap_on_left_neighbour_goes_back() {
        let mut c = controller(4);
        c.set_surface(InputSurface::Compact);
        c.pointer_down(10.0, 10.0, 0, None);
        c.pointer_up(10.0, 10.0, 50, Some(3));
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn keyboard_navigation_respects_flag() {
        let mut c = controller(3);
        assert!(c.navigate_key(Direction::Left));
        assert_eq!(c.current_index(), 2);

        let slides = SlideSet::initialize(sources(3)).unwrap();
        let mut settings = CarouselSettings::default();
        settings.features.keyboard_navigation = false;
        let mut c = CarouselController::new(slides, NullRenderer, settings);
        assert!(!c.navigate_key(Direction::Right));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn long_press_on_neighbour_still_clicks_it() {
        let mut c = controller(4);
        c.pointer_down(700.0, 150.0, 0, Some(1));
        assert_eq!(c.pointer_up(700.0, 150.0, 450, Some(1)), Gesture::None);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn drifting_click_on_neighbour_still_clicks_it() {
        let mut c = controller(4);
        c.pointer_down(700.0, 150.0, 0, Some(3));
        assert_eq!(c.pointer_up(725.0, 150.0, 120, Some(3)), Gesture::None);
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn long_press_released_elsewhere_does_nothing() {
        let mut c = controller(4);
        c.pointer_down(700.0, 150.0, 0, Some(1));
        assert_eq!(c.pointer_up(700.0, 150.0, 450, Some(0)), Gesture::None);
        c.pointer_down(700.0, 150.0, 1_000, None);
        assert_eq!(c.pointer_up(700.0, 150.0, 1_450, None), Gesture::None);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn swipe_across_a_neighbour_navigates_once() {
        let mut c = controller(5);
        c.pointer_down(300.0, 100.0, 0, Some(1));
        assert_eq!(c.pointer_up(200.0, 100.0, 150, Some(1)), Gesture::SwipeRight);
        assert_eq!(c.current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn auto_advance_steps_each_interval() {
        let mut c = controller(7);
        c.start_auto_advance(Duration::from_millis(100));

        sleep(Duration::from_millis(50)).await;
        for _ in 0..10 {
            sleep(Duration::from_millis(100)).await;
            assert!(c.poll_auto_advance());
        }
        assert_eq!(c.current_index(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_does_not_double_speed() {
        let mut c = controller(20);
        c.start_auto_advance(Duration::from_millis(100));
        c.start_auto_advance(Duration::from_millis(100));

        sleep(Duration::from_millis(50)).await;
        for _ in 0..10 {
            sleep(Duration::from_millis(100)).await;
            c.poll_auto_advance();
        }
        assert_eq!(c.current_index(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_polling_advances_a_single_slide() {
        let mut c = controller(20);
        c.start_auto_advance(Duration::from_millis(100));

        sleep(Duration::from_secs(5)).await;
        assert!(c.poll_auto_advance());
        assert_eq!(c.current_index(), 1);
        assert!(!c.poll_auto_advance());
        assert_eq!(c.current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_advance_resets_auto_advance() {
        let mut c = controller(10);
        c.start_auto_advance(Duration::from_millis(100));

        sleep(Duration::from_millis(150)).await;
        assert!(c.poll_auto_advance());
        sleep(Duration::from_millis(100)).await; // t = 250
        assert!(c.poll_auto_advance());
        c.advance(Direction::Right); // next tick due at 350
        assert_eq!(c.current_index(), 3);

        sleep(Duration::from_millis(80)).await; // t = 330
        assert!(!c.poll_auto_advance());

        sleep(Duration::from_millis(40)).await; // t = 370
        assert!(c.poll_auto_advance());
        assert_eq!(c.current_index(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn configured_auto_advance_can_be_toggled() {
        let slides = SlideSet::initialize(sources(3)).unwrap();
        let mut settings = CarouselSettings::default();
        settings.auto_advance = AutoAdvanceSettings {
            enabled: true,
            interval_ms: 200,
        };
        let mut c = CarouselController::new(slides, NullRenderer, settings);
        assert!(!c.auto_advance_running());

        c.apply_auto_advance_settings();
        assert!(c.auto_advance_running());

        c.toggle_auto_advance();
        assert!(!c.auto_advance_running());
        sleep(Duration::from_millis(1000)).await;
        assert!(!c.poll_auto_advance());
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_runtime_drives_auto_advance() {
        let mut c = controller(4).with_runtime(Handle::current());
        assert!(!c.auto_advance_running());
        c.start_auto_advance(Duration::from_millis(500));

        sleep(Duration::from_millis(600)).await;
        assert!(c.poll_auto_advance());
        sleep(Duration::from_millis(500)).await;
        assert!(c.poll_auto_advance());
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn polling_without_timer_is_a_no_op() {
        let mut c = controller(3);
        assert!(!c.poll_auto_advance());
        assert!(!c.auto_advance_running());
    }

    #[test]
    fn starting_outside_a_runtime_is_ignored() {
        let mut c = controller(3);
        c.start_auto_advance(Duration::from_millis(100));
        assert!(!c.auto_advance_running());
        assert!(!c.poll_auto_advance());
    }
}
