use crate::geom::normalize_angle;
use serde::Serialize;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, StrumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    AntiClockwise,
    #[default]
    Stopped,
    Clockwise,
}

impl Direction {
    /// Derives the direction from a freshly assigned velocity.
    pub fn of(velocity: f64) -> Self {
        if velocity > 0.0 {
            Self::Clockwise
        } else if velocity < 0.0 {
            Self::AntiClockwise
        } else {
            Self::Stopped
        }
    }

    pub fn signum(&self) -> f64 {
        match self {
            Self::AntiClockwise => -1.0,
            Self::Stopped => 0.0,
            Self::Clockwise => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    /// Set only on the tick where a moving wheel reached zero velocity.
    pub came_to_rest: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotationState {
    rotation: f64,
    velocity: f64,
    direction: Direction,
    max_speed: f64,
    resistance: f64,
}

impl RotationState {
    /// `resistance` is a magnitude in deg/s²; it always acts against the spin direction.
    pub fn new(rotation: f64, max_speed: f64, resistance: f64) -> Self {
        Self {
            rotation: normalize_angle(rotation),
            velocity: 0.0,
            direction: Direction::Stopped,
            max_speed,
            resistance: resistance.abs(),
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != 0.0
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = normalize_angle(rotation);
    }

    pub fn set_resistance(&mut self, resistance: f64) {
        self.resistance = resistance.abs();
    }

    /// Lowering the limit re-clamps a wheel that is already spinning faster.
    pub fn set_max_speed(&mut self, max_speed: f64) {
        self.max_speed = max_speed;
        self.set_velocity(self.velocity);
    }

    /// The single entry point for speed changes: clamps into `[-max_speed, max_speed]` and
    /// locks the decay direction to the sign of the clamped value.
    pub fn set_velocity(&mut self, velocity: f64) {
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let clamped = velocity.clamp(-self.max_speed, self.max_speed);
        self.velocity = clamped;
        self.direction = Direction::of(clamped);
    }

    /// Halts the wheel without it counting as coming to rest.
    pub fn stop(&mut self) {
        self.velocity = 0.0;
        self.direction = Direction::Stopped;
    }

    /// Advances the wheel by `delta` seconds: integrate the angle, then let resistance eat
    /// into the speed without ever carrying it past zero.
    pub fn tick(&mut self, delta: f64) -> TickOutcome {
        let delta = if delta.is_finite() && delta > 0.0 { delta } else { 0.0 };

        if delta > 0.0 {
            self.rotation = normalize_angle(self.rotation + self.velocity * delta);
        }

        if !self.is_moving() {
            return TickOutcome::default();
        }

        let decayed = self.velocity - self.resistance * delta * self.direction.signum();
        let overshot = match self.direction {
            Direction::Clockwise => decayed <= 0.0,
            Direction::AntiClockwise => decayed >= 0.0,
            Direction::Stopped => true,
        };

        if overshot {
            self.stop();
            TickOutcome { came_to_rest: true }
        } else {
            self.velocity = decayed;
            TickOutcome::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn test_set_velocity_clamps_and_locks_direction() {
        let mut s = RotationState::new(0.0, 250.0, 35.0);
        s.set_velocity(1000.0);
        assert_eq!(s.velocity(), 250.0);
        assert_eq!(s.direction(), Direction::Clockwise);

        s.set_velocity(-1000.0);
        assert_eq!(s.velocity(), -250.0);
        assert_eq!(s.direction(), Direction::AntiClockwise);

        s.set_velocity(f64::NAN);
        assert_eq!(s.velocity(), 0.0);
        assert_eq!(s.direction(), Direction::Stopped);
    }

    #[test]
    fn test_first_tick_with_zero_delta_is_a_no_op() {
        let mut s = RotationState::new(42.0, 250.0, 35.0);
        s.set_velocity(100.0);
        let outcome = s.tick(0.0);
        assert_eq!(s.rotation(), 42.0);
        assert_eq!(s.velocity(), 100.0);
        assert!(!outcome.came_to_rest);
    }

    #[test]
    fn test_rotation_wraps_both_ways() {
        let mut s = RotationState::new(350.0, 250.0, 0.0);
        s.set_velocity(20.0);
        s.tick(1.0);
        assert!((s.rotation() - 10.0).abs() < 1e-9);

        s.set_velocity(-30.0);
        s.tick(1.0);
        assert!((s.rotation() - 340.0).abs() < 1e-9);
    }

    #[test]
    fn test_decay_stops_exactly_at_zero_clockwise() {
        let mut s = RotationState::new(0.0, 250.0, 35.0);
        s.set_velocity(100.0);

        let mut rests = 0;
        for _ in 0..600 {
            assert!(s.velocity() >= 0.0);
            assert!(s.velocity().abs() <= s.max_speed());
            if s.tick(FRAME).came_to_rest {
                rests += 1;
            }
        }
        assert_eq!(s.velocity(), 0.0);
        assert_eq!(s.direction(), Direction::Stopped);
        assert_eq!(rests, 1);
    }

    #[test]
    fn test_decay_stops_exactly_at_zero_anticlockwise() {
        let mut s = RotationState::new(0.0, 250.0, 35.0);
        s.set_velocity(-50.0);

        let mut rests = 0;
        for _ in 0..600 {
            assert!(s.velocity() <= 0.0);
            if s.tick(FRAME).came_to_rest {
                rests += 1;
            }
        }
        assert_eq!(s.velocity(), 0.0);
        assert_eq!(rests, 1);
    }

    #[test]
    fn test_decay_landing_on_zero_comes_to_rest() {
        let mut s = RotationState::new(0.0, 250.0, 35.0);
        s.set_velocity(35.0);
        assert!(s.tick(1.0).came_to_rest);
        assert_eq!(s.velocity(), 0.0);
        assert_eq!(s.direction(), Direction::Stopped);
        assert!(!s.tick(1.0).came_to_rest);

        s.set_velocity(-35.0);
        assert!(s.tick(1.0).came_to_rest);
        assert_eq!(s.direction(), Direction::Stopped);
    }

    #[test]
    fn test_stop_time_matches_resistance() {
        let mut s = RotationState::new(0.0, 250.0, 35.0);
        s.set_velocity(100.0);
        let mut elapsed = 0.0;
        while s.is_moving() {
            s.tick(FRAME);
            elapsed += FRAME;
        }
        assert!(elapsed <= 100.0 / 35.0 + FRAME, "stopped after {elapsed}s");
        assert!(elapsed >= 100.0 / 35.0 - FRAME, "stopped after {elapsed}s");
    }

    #[test]
    fn test_stopped_wheel_stays_stopped() {
        let mut s = RotationState::new(10.0, 250.0, 35.0);
        for _ in 0..10 {
            assert!(!s.tick(FRAME).came_to_rest);
        }
        assert_eq!(s.rotation(), 10.0);
        assert_eq!(s.velocity(), 0.0);
    }

    #[test]
    fn test_negative_resistance_is_a_magnitude() {
        let mut s = RotationState::new(0.0, 250.0, -35.0);
        assert_eq!(s.resistance(), 35.0);
        s.set_velocity(10.0);
        s.tick(0.1);
        assert!((s.velocity() - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_lowering_max_speed_reclamps() {
        let mut s = RotationState::new(0.0, 250.0, 35.0);
        s.set_velocity(-200.0);
        s.set_max_speed(100.0);
        assert_eq!(s.velocity(), -100.0);
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let mut s = RotationState::new(0.0, 250.0, 35.0);
        s.set_velocity(100.0);
        s.tick(-1.0);
        s.tick(f64::NAN);
        assert_eq!(s.rotation(), 0.0);
        assert_eq!(s.velocity(), 100.0);
    }
}
