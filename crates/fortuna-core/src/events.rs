use crate::physics::Direction;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum WheelEvent {
    /// A velocity was assigned, either by a programmatic spin or by releasing a drag.
    Spin {
        direction: Direction,
        velocity: f64,
        /// Number of drag samples that produced the velocity, for drag releases.
        drag_samples: Option<usize>,
    },
    /// The wheel stopped. `item` indexes the wheel's items; `None` when there are none.
    Rest { item: Option<usize> },
}

pub type EventSink = Box<dyn FnMut(&WheelEvent)>;
