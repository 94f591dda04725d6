/// Turns the host's monotonic frame timestamps into per-tick deltas.
///
/// The very first timestamp only primes the clock, so a clock that started long before
/// the wheel was created doesn't produce one huge integration step.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. Never negative.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return 0.0;
        }

        let delta = match self.last_ms {
            Some(last) if now_ms > last => (now_ms - last) / 1000.0,
            Some(last) if now_ms < last => return 0.0,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(987_654.0), 0.0);
        assert_eq!(clock.delta(988_154.0), 0.5);
        assert_eq!(clock.delta(988_154.0), 0.0);
    }

    #[test]
    fn test_backwards_time_is_ignored() {
        let mut clock = FrameClock::new();
        clock.delta(1000.0);
        assert_eq!(clock.delta(900.0), 0.0);
        assert_eq!(clock.delta(1100.0), 0.1);
    }
}
