use crate::clock::FrameClock;
use crate::color::Color;
use crate::config::{Settings, WheelConfig, valid_angle, valid_max_speed, valid_resistance};
use crate::events::{EventSink, WheelEvent};
use crate::geom::{Point, Size, WheelGeometry};
use crate::gesture::{DragSample, GestureRecognizer};
use crate::item::{Item, ItemConfig, Palette, resolve_items};
use crate::layout::Layout;
use crate::physics::{Direction, RotationState};
use crate::resolve::resolve;
use strum::Display as StrumDisplay;

/// Spins are randomised by up to this fraction either way.
pub const SPIN_JITTER: f64 = 0.15;

/// Pointer affordance; the names match the CSS cursor names hosts understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
}

/// What the renderer needs after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub rotation: f64,
    pub velocity: f64,
    pub current_item: Option<usize>,
}

pub struct Wheel {
    settings: Settings,
    item_configs: Vec<ItemConfig>,
    background_colors: Vec<Color>,
    label_colors: Vec<Color>,
    items: Vec<Item>,
    layout: Layout,
    state: RotationState,
    gesture: GestureRecognizer,
    geometry: WheelGeometry,
    clock: FrameClock,
    hovering: bool,
    rng: fastrand::Rng,
    on_event: Option<EventSink>,
}

impl Wheel {
    pub fn new(config: &WheelConfig) -> Self {
        let settings = Settings::from_config(config);
        let state = RotationState::new(
            valid_angle(config.rotation),
            settings.max_speed,
            settings.resistance,
        );

        let mut wheel = Self {
            settings,
            item_configs: config.items.clone(),
            background_colors: config.item_background_colors.clone(),
            label_colors: config.item_label_colors.clone(),
            items: Vec::new(),
            layout: Layout::default(),
            state,
            gesture: GestureRecognizer::new(),
            geometry: WheelGeometry::default(),
            clock: FrameClock::new(),
            hovering: false,
            rng: fastrand::Rng::new(),
            on_event: None,
        };
        wheel.relayout();
        wheel
    }

    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.rng = rng;
        self
    }

    pub fn on_event(&mut self, sink: impl FnMut(&WheelEvent) + 'static) {
        self.on_event = Some(Box::new(sink));
    }

    /// Takes new settings and items from a reloaded config. The wheel keeps its rotation,
    /// its speed (re-clamped to the new limit) and any drag in progress.
    pub fn apply_config(&mut self, config: &WheelConfig) {
        self.settings = Settings::from_config(config);
        self.state.set_resistance(self.settings.resistance);
        self.state.set_max_speed(self.settings.max_speed);
        self.item_configs = config.items.clone();
        self.background_colors = config.item_background_colors.clone();
        self.label_colors = config.item_label_colors.clone();
        self.relayout();
        let container = self.geometry.container;
        if container.width > 0.0 && container.height > 0.0 {
            self.resize(container);
        }
    }

    fn relayout(&mut self) {
        self.items = resolve_items(
            &self.item_configs,
            &Palette {
                backgrounds: &self.background_colors,
                labels: &self.label_colors,
            },
        );
        self.layout = Layout::compute(&self.items);
    }

    pub fn set_items(&mut self, items: Vec<ItemConfig>) {
        self.item_configs = items;
        self.relayout();
    }

    /// Reweights items by position; weights beyond the item count are ignored.
    pub fn set_weights(&mut self, weights: &[f64]) {
        for (cfg, &weight) in self.item_configs.iter_mut().zip(weights) {
            cfg.weight = Some(weight);
        }
        self.relayout();
    }

    pub fn set_item_background_colors(&mut self, colors: Vec<Color>) {
        self.background_colors = colors;
        self.relayout();
    }

    pub fn set_item_label_colors(&mut self, colors: Vec<Color>) {
        self.label_colors = colors;
        self.relayout();
    }

    pub fn set_resistance(&mut self, resistance: f64) {
        self.settings.resistance = valid_resistance(Some(resistance));
        self.state.set_resistance(self.settings.resistance);
    }

    pub fn set_max_speed(&mut self, max_speed: f64) {
        self.settings.max_speed = valid_max_speed(Some(max_speed));
        self.state.set_max_speed(self.settings.max_speed);
    }

    pub fn set_pointer_angle(&mut self, angle: f64) {
        self.settings.pointer_angle = valid_angle(Some(angle));
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.state.set_rotation(valid_angle(Some(rotation)));
    }

    /// Turning interaction off also drops a drag in progress, without a release spin.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.settings.is_interactive = interactive;
        if !interactive && self.gesture.drag_end(0.0).is_some() {
            log::debug!("Drag abandoned, wheel no longer interactive");
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    pub fn rotation(&self) -> f64 {
        self.state.rotation()
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity()
    }

    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// The item currently under the pointer.
    pub fn current_item(&self) -> Option<usize> {
        resolve(
            &self.layout,
            self.state.rotation(),
            self.settings.pointer_angle,
        )
    }

    /// Recent drag samples, newest first.
    pub fn drag_trail(&self) -> Vec<DragSample> {
        self.gesture
            .session()
            .map(|s| s.samples().iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn cursor(&self) -> Cursor {
        if self.gesture.is_dragging() {
            Cursor::Grabbing
        } else if self.settings.is_interactive && self.hovering {
            Cursor::Grab
        } else {
            Cursor::Default
        }
    }

    pub fn resize(&mut self, container: Size) -> WheelGeometry {
        self.geometry =
            WheelGeometry::fit(container, self.settings.radius, self.settings.offset);
        self.geometry
    }

    fn emit(&mut self, event: WheelEvent) {
        log::debug!("{:?}", event);
        if let Some(sink) = self.on_event.as_mut() {
            sink(&event);
        }
    }

    /// Adds `impulse` (deg/s, sign gives the direction), randomised by ±15%, to the
    /// current speed.
    pub fn spin(&mut self, impulse: f64) {
        let impulse = if impulse.is_finite() { impulse } else { 0.0 };
        let jitter = 1.0 - SPIN_JITTER + self.rng.f64() * SPIN_JITTER * 2.0;
        self.state
            .set_velocity(self.state.velocity() + impulse * jitter);

        self.emit(WheelEvent::Spin {
            direction: self.state.direction(),
            velocity: self.state.velocity(),
            drag_samples: None,
        });
    }

    /// Halts the wheel where it is. A moving wheel reports the item it stopped on.
    pub fn stop(&mut self) {
        if self.state.direction() == Direction::Stopped {
            return;
        }
        self.state.stop();
        let item = self.current_item();
        self.emit(WheelEvent::Rest { item });
    }

    /// Advances the simulation by `delta` seconds. A wheel being dragged follows the
    /// pointer instead.
    pub fn tick(&mut self, delta: f64) -> Frame {
        if !self.gesture.is_dragging() && self.state.tick(delta).came_to_rest {
            let item = self.current_item();
            self.emit(WheelEvent::Rest { item });
        }

        Frame {
            rotation: self.state.rotation(),
            velocity: self.state.velocity(),
            current_item: self.current_item(),
        }
    }

    /// [`Wheel::tick`] driven by a monotonic timestamp in milliseconds.
    pub fn advance(&mut self, now_ms: f64) -> Frame {
        let delta = self.clock.delta(now_ms);
        self.tick(delta)
    }

    pub fn pointer_hover(&mut self, point: Point) {
        self.hovering = self.geometry.hit_test(point);
    }

    /// Starts a drag if the wheel is interactive and `point` is on it. Grabbing the wheel
    /// stops it dead.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        self.hovering = self.geometry.hit_test(point);
        if !self.settings.is_interactive || !self.hovering {
            return false;
        }

        self.state.stop();
        self.gesture
            .drag_start(&self.geometry, point, self.state.rotation());
        true
    }

    pub fn pointer_move(&mut self, point: Point, timestamp_ms: f64) {
        self.hovering = self.geometry.hit_test(point);
        if let Some(rotation) = self.gesture.drag_move(&self.geometry, point, timestamp_ms) {
            self.state.set_rotation(rotation);
        }
    }

    pub fn pointer_up(&mut self, now_ms: f64) {
        let Some(release) = self.gesture.drag_end(now_ms) else {
            return;
        };

        if let Some(velocity) = release.velocity {
            self.state.set_velocity(velocity);
            self.emit(WheelEvent::Spin {
                direction: self.state.direction(),
                velocity: self.state.velocity(),
                drag_samples: Some(release.samples_used),
            });
        }
    }
}
