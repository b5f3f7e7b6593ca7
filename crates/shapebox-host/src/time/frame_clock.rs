use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds. Never negative.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic counter of driven frames; the warm-up tick does not count.
    pub frame_index: u64,
}

/// Frame clock with an explicit warm-up tick.
///
/// The very first [`tick`] records its timestamp as the baseline and returns
/// `None` — the caller drives nothing that tick, so the first real delta is
/// measured against a defined baseline instead of an arbitrary epoch. Every
/// later tick returns a [`FrameTime`].
///
/// An optional maximum-delta clamp bounds `dt` after long stalls (debugger,
/// minimized window). The default clock is unclamped: `dt` is exactly the
/// measured gap.
///
/// [`tick`]: FrameClock::tick
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    max_delta: Option<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            frame_index: 0,
            max_delta: None,
        }
    }

    /// Creates a clock whose deltas are capped at `max_delta`.
    pub fn with_max_delta(max_delta: Duration) -> Self {
        Self {
            last: None,
            frame_index: 0,
            max_delta: Some(max_delta),
        }
    }

    /// Re-arms the warm-up tick. Useful when resuming from suspension.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advances the clock using the current instant.
    pub fn tick(&mut self) -> Option<FrameTime> {
        self.tick_at(Instant::now())
    }

    /// Advances the clock using a caller-supplied timestamp.
    pub fn tick_at(&mut self, now: Instant) -> Option<FrameTime> {
        let Some(last) = self.last.replace(now) else {
            return None;
        };

        let mut elapsed = now.saturating_duration_since(last);
        if let Some(max) = self.max_delta {
            elapsed = elapsed.min(max);
        }

        let ft = FrameTime {
            dt: elapsed.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);

        Some(ft)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_warm_up_only() {
        let mut clock = FrameClock::new();
        assert!(clock.tick_at(Instant::now()).is_none());
    }

    #[test]
    fn delta_is_the_measured_gap_in_seconds() {
        let base = Instant::now();
        let mut clock = FrameClock::new();

        clock.tick_at(base);
        let ft = clock.tick_at(base + Duration::from_millis(16)).unwrap();
        assert!((ft.dt - 0.016).abs() < 1e-6);

        let ft = clock.tick_at(base + Duration::from_millis(516)).unwrap();
        assert!((ft.dt - 0.5).abs() < 1e-6);
    }

    #[test]
    fn non_monotonic_timestamps_saturate_to_zero() {
        let base = Instant::now();
        let mut clock = FrameClock::new();

        clock.tick_at(base + Duration::from_millis(10));
        let ft = clock.tick_at(base).unwrap();
        assert_eq!(ft.dt, 0.0);
    }

    #[test]
    fn max_delta_caps_long_stalls() {
        let base = Instant::now();
        let mut clock = FrameClock::with_max_delta(Duration::from_millis(250));

        clock.tick_at(base);
        let ft = clock.tick_at(base + Duration::from_secs(10)).unwrap();
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn frame_index_counts_driven_frames_only() {
        let base = Instant::now();
        let mut clock = FrameClock::new();

        clock.tick_at(base);
        let first = clock.tick_at(base + Duration::from_millis(1)).unwrap();
        let second = clock.tick_at(base + Duration::from_millis(2)).unwrap();
        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
    }

    #[test]
    fn reset_rearms_the_warm_up() {
        let base = Instant::now();
        let mut clock = FrameClock::new();

        clock.tick_at(base);
        clock.tick_at(base + Duration::from_millis(5));
        clock.reset();
        assert!(clock.tick_at(base + Duration::from_secs(1)).is_none());
    }
}
