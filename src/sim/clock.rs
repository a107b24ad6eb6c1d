//! Frame timing
//!
//! Converts wall-clock timestamps from the external scheduler into a clamped
//! simulation delta, so one `tick` never integrates more than
//! [`MAX_FRAME_DT`](crate::consts::MAX_FRAME_DT) of simulated time.

use crate::consts::MAX_FRAME_DT;

/// Wall-clock to simulation-time converter.
///
/// The first call establishes a baseline and yields a zero delta; every later
/// call yields the elapsed seconds since the previous call, clamped to
/// `[0, MAX_FRAME_DT]`. Timestamps that go backwards clamp to zero.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock to `timestamp_ms` and return the clamped delta in
    /// seconds.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            None => 0.0,
            Some(prev) => (((timestamp_ms - prev) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
        };
        self.last_ms = Some(timestamp_ms);
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1234.5), 0.0);
    }

    #[test]
    fn test_normal_frame_delta() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        let dt = clock.tick(1016.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        // Five seconds of tab suspension collapses to one max-length frame
        assert_eq!(clock.tick(5000.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_backwards_timestamp_is_zero() {
        let mut clock = FrameClock::new();
        clock.tick(2000.0);
        assert_eq!(clock.tick(1000.0), 0.0);
        // Baseline still moved; the next forward step is measured from 1000
        let dt = clock.tick(1020.0);
        assert!((dt - 0.02).abs() < 1e-6);
    }
}
