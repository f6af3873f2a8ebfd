//! Rolling frame-time statistics.

use bevy_ecs::prelude::*;
use circular_buffer::CircularBuffer;
use std::time::Duration;

/// The last second of frame times, for budget warnings and spin-sleep tuning.
#[derive(Resource, Default)]
pub struct FrameStats {
    samples: CircularBuffer<60, f32>,
}

impl FrameStats {
    pub fn record(&mut self, frame_time: Duration) {
        self.samples.push_back(frame_time.as_secs_f32() * 1000.0);
    }

    /// Mean frame time in milliseconds over the window, `None` until a
    /// sample arrives.
    pub fn average_ms(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f32>() / self.samples.len() as f32)
    }

    pub fn worst_ms(&self) -> Option<f32> {
        self.samples.iter().copied().reduce(f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_over_window() {
        let mut stats = FrameStats::default();
        assert_eq!(stats.average_ms(), None);

        for _ in 0..10 {
            stats.record(Duration::from_millis(16));
        }
        let avg = stats.average_ms().unwrap();
        assert!((avg - 16.0).abs() < 0.1);
    }

    #[test]
    fn window_drops_old_samples() {
        let mut stats = FrameStats::default();
        for _ in 0..60 {
            stats.record(Duration::from_millis(100));
        }
        for _ in 0..60 {
            stats.record(Duration::from_millis(10));
        }
        let avg = stats.average_ms().unwrap();
        assert!((avg - 10.0).abs() < 0.1);
        assert!((stats.worst_ms().unwrap() - 10.0).abs() < 0.1);
    }
}
