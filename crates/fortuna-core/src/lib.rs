pub mod clock;
pub mod color;
pub mod config;
pub mod control;
pub mod events;
pub mod geom;
pub mod gesture;
pub mod item;
pub mod layout;
pub mod macros;
pub mod physics;
pub mod resolve;
pub mod wheel;

pub use events::WheelEvent;
pub use geom::{Point, Size};
pub use wheel::{Cursor, Frame, Wheel};
