//! Drag-to-spin gesture recognition.
//!
//! While a drag is live the wheel's rotation is slaved to the pointer's bearing from the
//! center. Every move also records how far the pointer travelled (signed by the way it
//! went round), and on release the recent part of that history becomes the flick velocity.

use crate::geom::{HALF_TURN, Point, WheelGeometry, add_angle, short_path_delta};

/// Samples kept per drag; older ones are overwritten.
pub const SAMPLE_CAPACITY: usize = 50;
/// Only movement this recent contributes to the release velocity, so holding the wheel
/// still for a moment before letting go cancels the flick.
pub const RELEASE_WINDOW_MS: f64 = 250.0;
/// Converts summed pointer travel (px) into a spin speed (deg/s).
pub const RELEASE_AMPLIFICATION: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Distance travelled since the previous sample, negative when moving anticlockwise.
    pub distance: f64,
    pub point: Point,
    pub timestamp_ms: f64,
}

/// Fixed-size history of the most recent samples, written through a cursor.
#[derive(Debug, Clone)]
pub struct SampleRing {
    slots: [Option<DragSample>; SAMPLE_CAPACITY],
    cursor: usize,
    len: usize,
}

impl Default for SampleRing {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleRing {
    pub fn new() -> Self {
        Self {
            slots: [None; SAMPLE_CAPACITY],
            cursor: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, sample: DragSample) {
        self.slots[self.cursor] = Some(sample);
        self.cursor = (self.cursor + 1) % SAMPLE_CAPACITY;
        self.len = (self.len + 1).min(SAMPLE_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Newest sample first.
    pub fn iter(&self) -> impl Iterator<Item = &DragSample> + '_ {
        (1..=self.len).filter_map(move |back| {
            let idx = (self.cursor + SAMPLE_CAPACITY - back) % SAMPLE_CAPACITY;
            self.slots[idx].as_ref()
        })
    }
}

#[derive(Debug, Clone)]
pub struct DragSession {
    start_angle: f64,
    last_pointer_angle: f64,
    last_point: Point,
    rotation_delta_anchor: f64,
    samples: SampleRing,
}

impl DragSession {
    fn new(pointer_angle: f64, point: Point, rotation: f64) -> Self {
        Self {
            start_angle: pointer_angle,
            last_pointer_angle: pointer_angle,
            last_point: point,
            rotation_delta_anchor: add_angle(rotation, -pointer_angle),
            samples: SampleRing::new(),
        }
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn rotation_delta_anchor(&self) -> f64 {
        self.rotation_delta_anchor
    }

    pub fn samples(&self) -> &SampleRing {
        &self.samples
    }

    pub fn record(&mut self, sample: DragSample) {
        log::trace!(
            "Drag sample {:+.2}px at {:.1}ms",
            sample.distance,
            sample.timestamp_ms
        );
        self.samples.push(sample);
    }

    /// Sum of recent travel, amplified, along with how many samples fed it.
    pub fn release_velocity(&self, now_ms: f64) -> (f64, usize) {
        let recent: Vec<_> = self
            .samples
            .iter()
            .filter(|s| now_ms - s.timestamp_ms < RELEASE_WINDOW_MS)
            .collect();
        let distance: f64 = recent.iter().map(|s| s.distance).sum();
        (distance * RELEASE_AMPLIFICATION, recent.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// The flick speed, `None` when the recent samples cancel out or there are none.
    pub velocity: Option<f64>,
    pub samples_used: usize,
}

/// `Idle` when `session` is `None`, `Dragging` otherwise.
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    session: Option<DragSession>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Begins a drag anchored so the wheel keeps its current rotation under the pointer.
    /// The caller is responsible for halting any spin.
    pub fn drag_start(&mut self, geometry: &WheelGeometry, point: Point, rotation: f64) {
        let angle = geometry.pointer_angle(point);
        log::debug!("Drag start at {angle:.1} deg, wheel at {rotation:.1} deg");
        self.session = Some(DragSession::new(angle, point, rotation));
    }

    /// Follows the pointer and returns the rotation the wheel should now show, or `None`
    /// when no drag is in progress.
    pub fn drag_move(
        &mut self,
        geometry: &WheelGeometry,
        point: Point,
        timestamp_ms: f64,
    ) -> Option<f64> {
        let session = self.session.as_mut()?;
        let angle = geometry.pointer_angle(point);

        let turned = short_path_delta(angle, session.last_pointer_angle);
        let direction = if (0.0..HALF_TURN).contains(&turned) { 1.0 } else { -1.0 };
        let distance = point.distance_to(session.last_point) * direction;

        session.record(DragSample {
            distance,
            point,
            timestamp_ms,
        });
        session.last_pointer_angle = angle;
        session.last_point = point;

        Some(add_angle(angle, session.rotation_delta_anchor))
    }

    /// Finishes the drag, always returning to idle.
    pub fn drag_end(&mut self, now_ms: f64) -> Option<Release> {
        let session = self.session.take()?;
        let (velocity, samples_used) = session.release_velocity(now_ms);
        log::debug!("Drag end: {samples_used} recent samples, release speed {velocity:.2}");
        Some(Release {
            velocity: (velocity != 0.0).then_some(velocity),
            samples_used,
        })
    }
}
