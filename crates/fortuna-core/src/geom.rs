use serde::{Deserialize, Serialize};

pub const FULL_TURN: f64 = 360.0;
pub const HALF_TURN: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize_angle(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

pub fn add_angle(a: f64, b: f64) -> f64 {
    normalize_angle(a + b)
}

/// Signed difference from `from` to `to` going the short way round, in `(-180, 180]`.
pub fn short_path_delta(to: f64, from: f64) -> f64 {
    let delta = to - from;
    if !delta.is_finite() {
        return 0.0;
    }
    let wrapped = normalize_angle(delta);
    if wrapped > HALF_TURN {
        wrapped - FULL_TURN
    } else {
        wrapped
    }
}

/// Half-open circular range test: is `angle` inside `[start, end)` walking clockwise
/// from `start`? A range whose end is numerically below its start wraps past 360.
pub fn is_angle_between(angle: f64, start: f64, end: f64) -> bool {
    let (angle, start, end) = (
        normalize_angle(angle),
        normalize_angle(start),
        normalize_angle(end),
    );

    if start < end {
        start <= angle && angle < end
    } else if start > end {
        angle >= start || angle < end
    } else {
        false
    }
}

/// Bearing of `point` seen from `center`, in degrees. 0 is north and angles grow
/// clockwise (screen coordinates, y pointing down).
pub fn bearing(center: Point, point: Point) -> f64 {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    add_angle(dy.atan2(dx).to_degrees(), 90.0)
}

pub fn is_point_in_circle(point: Point, center: Point, radius: f64) -> bool {
    point.distance_to(center) <= radius
}

/// Where the wheel sits inside its container, derived from the container size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelGeometry {
    pub container: Size,
    pub center: Point,
    /// Edge length of the square the wheel (and its overlay image) is fitted into.
    pub size: f64,
    pub radius: f64,
}

impl WheelGeometry {
    /// Fits the wheel inside `container`. `radius` is the fraction of half the fitted size
    /// used by the wedges, `offset` shifts the wheel by a fraction of the container.
    pub fn fit(container: Size, radius: f64, offset: Offset) -> Self {
        let Size { width: w, height: h } = container;
        let center = Point::new(w / 2.0 + w * offset.w, h / 2.0 + h * offset.h);

        let min_size = w.min(h);
        let (wheel_w, wheel_h) = (
            min_size - min_size * offset.w,
            min_size - min_size * offset.h,
        );

        let scale = (w / wheel_w).min(h / wheel_h);
        let size = (wheel_w * scale).max(wheel_h * scale);
        let size = if size.is_finite() && size > 0.0 { size } else { 0.0 };

        Self {
            container,
            center,
            size,
            radius: size / 2.0 * radius,
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        is_point_in_circle(point, self.center, self.radius)
    }

    pub fn pointer_angle(&self, point: Point) -> f64 {
        bearing(self.center, point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearing_compass_points() {
        let c = Point::new(100.0, 100.0);
        let cases = vec![
            (Point::new(100.0, 0.0), 0.0),
            (Point::new(200.0, 100.0), 90.0),
            (Point::new(100.0, 200.0), 180.0),
            (Point::new(0.0, 100.0), 270.0),
            (Point::new(0.0, 0.0), 315.0),
        ];

        for (p, expected) in cases {
            assert!((bearing(c, p) - expected).abs() < 1e-9, "{p:?}");
        }
    }

    #[test]
    fn test_short_path_delta_wraps() {
        assert_eq!(short_path_delta(10.0, 350.0), 20.0);
        assert_eq!(short_path_delta(350.0, 10.0), -20.0);
        assert_eq!(short_path_delta(90.0, 90.0), 0.0);
        assert_eq!(short_path_delta(f64::NAN, 0.0), 0.0);
    }

    #[test]
    fn test_is_angle_between_across_north() {
        assert!(is_angle_between(0.0, 350.0, 10.0));
        assert!(is_angle_between(355.0, 350.0, 10.0));
        assert!(!is_angle_between(10.0, 350.0, 10.0));
        assert!(is_angle_between(350.0, 350.0, 10.0));
        assert!(!is_angle_between(180.0, 350.0, 10.0));
        assert!(is_angle_between(45.0, 0.0, 90.0));
        assert!(!is_angle_between(90.0, 0.0, 90.0));
        assert!(is_angle_between(-10.0, 340.0, 360.0));
    }

    #[test]
    fn test_normalize_tiny_negative() {
        let a = normalize_angle(-1e-20);
        assert!((0.0..FULL_TURN).contains(&a));
    }

    #[test]
    fn test_hit_test() {
        let center = Point::new(50.0, 50.0);
        assert!(is_point_in_circle(Point::new(50.0, 10.0), center, 40.0));
        assert!(!is_point_in_circle(Point::new(50.0, 9.0), center, 40.0));
    }

    #[test]
    fn test_fit_square_container() {
        let g = WheelGeometry::fit(Size::new(400.0, 400.0), 0.95, Offset::default());
        assert_eq!(g.center, Point::new(200.0, 200.0));
        assert_eq!(g.size, 400.0);
        assert!((g.radius - 190.0).abs() < 1e-9);
        assert!(g.hit_test(Point::new(200.0, 20.0)));
        assert!(!g.hit_test(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_fit_wide_container_uses_short_side() {
        let g = WheelGeometry::fit(Size::new(800.0, 300.0), 1.0, Offset::default());
        assert_eq!(g.center, Point::new(400.0, 150.0));
        assert_eq!(g.size, 300.0);
        assert_eq!(g.radius, 150.0);
    }

    #[test]
    fn test_fit_empty_container() {
        let g = WheelGeometry::fit(Size::default(), 0.95, Offset::default());
        assert_eq!(g.size, 0.0);
        assert_eq!(g.radius, 0.0);
        assert!(!g.hit_test(Point::new(1.0, 1.0)));
    }
}
