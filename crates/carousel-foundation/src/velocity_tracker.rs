//! Release velocity estimation.
//!
//! Uses the impulse strategy: each pair of consecutive samples imparts kinetic
//! energy to a unit mass, and the final velocity is recovered from the total
//! work. This weighs recent motion more than a least-squares fit and copes
//! well with uneven input sampling.

/// Ring buffer size.
const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between consecutive samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1-D velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    /// Slot of the newest sample.
    head: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            head: 0,
        }
    }

    /// Record the pointer position at `time_ms`.
    pub fn add_position(&mut self, time_ms: i64, position: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.samples[self.head] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second; 0.0 with fewer than two usable samples.
    pub fn velocity(&self) -> f32 {
        let mut window = [Sample::default(); HISTORY_SIZE];
        let count = self.collect_window(&mut window);
        if count < 2 {
            return 0.0;
        }
        // `window` is newest-first; walk it oldest-first.
        let ordered = &mut window[..count];
        ordered.reverse();
        impulse_velocity(ordered) * 1000.0
    }

    /// Velocity clamped to `±max_velocity`. Non-finite results read as zero.
    pub fn velocity_clamped(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.head = 0;
    }

    /// Copy the usable recent samples into `out`, newest first.
    fn collect_window(&self, out: &mut [Sample; HISTORY_SIZE]) -> usize {
        let Some(newest) = self.samples[self.head] else {
            return 0;
        };

        let mut count = 0;
        let mut previous = newest;
        let mut slot = self.head;
        while let Some(sample) = self.samples[slot] {
            let age = newest.time_ms - sample.time_ms;
            let gap = previous.time_ms - sample.time_ms;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            out[count] = sample;
            count += 1;
            previous = sample;
            if count == HISTORY_SIZE {
                break;
            }
            slot = (slot + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }
        count
    }
}

/// Impulse velocity in units per millisecond over samples ordered oldest-first.
fn impulse_velocity(samples: &[Sample]) -> f32 {
    let mut work = 0.0f32;
    for (i, pair) in samples.windows(2).enumerate() {
        let dt = (pair[1].time_ms - pair[0].time_ms) as f32;
        if dt == 0.0 {
            continue;
        }
        let v_curr = (pair[1].position - pair[0].position) / dt;
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == 0 {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work)
}

/// E = ½ m v² with m = 1, preserving sign.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(samples: &[(i64, f32)]) -> VelocityTracker1D {
        let mut tracker = VelocityTracker1D::new();
        for (time, position) in samples {
            tracker.add_position(*time, *position);
        }
        tracker
    }

    #[test]
    fn constant_motion_reports_its_speed() {
        // 2 px per ms = 2000 px/s
        let samples: Vec<(i64, f32)> = (0..8).map(|i| (i * 10, i as f32 * 20.0)).collect();
        let velocity = track(&samples).velocity();
        assert!((velocity - 2000.0).abs() < 1.0, "got {velocity}");
    }

    #[test]
    fn leftward_motion_is_negative() {
        let samples: Vec<(i64, f32)> = (0..6).map(|i| (i * 8, -(i as f32) * 8.0)).collect();
        assert!(track(&samples).velocity() < 0.0);
    }

    #[test]
    fn single_sample_has_no_velocity() {
        assert_eq!(track(&[(0, 10.0)]).velocity(), 0.0);
        assert_eq!(VelocityTracker1D::new().velocity(), 0.0);
    }

    #[test]
    fn pause_before_release_reads_as_stopped() {
        let mut samples: Vec<(i64, f32)> = (0..5).map(|i| (i * 10, i as f32 * 30.0)).collect();
        samples.push((200, 120.0));
        assert_eq!(track(&samples).velocity(), 0.0);
    }

    #[test]
    fn clamped_velocity_respects_max() {
        let samples: Vec<(i64, f32)> = (0..5).map(|i| (i, i as f32 * 100.0)).collect();
        let tracker = track(&samples);
        assert_eq!(tracker.velocity_clamped(8000.0), 8000.0);
        assert_eq!(tracker.velocity_clamped(0.0), 0.0);
        assert_eq!(tracker.velocity_clamped(f32::NAN), 0.0);
    }

    #[test]
    fn reset_forgets_history() {
        let mut tracker = track(&[(0, 0.0), (10, 10.0), (20, 20.0)]);
        tracker.reset();
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn ring_buffer_wraps_without_losing_recent_motion() {
        let samples: Vec<(i64, f32)> = (0..50).map(|i| (i * 4, i as f32 * 4.0)).collect();
        let velocity = track(&samples).velocity();
        assert!((velocity - 1000.0).abs() < 1.0, "got {velocity}");
    }
}
