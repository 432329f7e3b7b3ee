use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Counter interpolation
// ---------------------------------------------------------------------------

/// `steps + 1` evenly spaced values from `prev_total` to `new_total`, both
/// included. The last value is exactly `new_total`; `steps == 0` yields only it.
pub fn interpolate(prev_total: f64, new_total: f64, steps: usize) -> Vec<f64> {
    if steps == 0 {
        return vec![new_total];
    }
    let delta = new_total - prev_total;
    (0..=steps)
        .map(|i| {
            if i == steps {
                new_total
            } else {
                prev_total + delta * i as f64 / steps as f64
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Frame-driven counter for the KPI row
// ---------------------------------------------------------------------------

/// Walks through an [`interpolate`] sequence, at most one frame per
/// `step_interval` however often the UI repaints.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    frames: Vec<f64>,
    position: usize,
    delta: f64,
    step_interval: Duration,
    /// Set by the first [`tick`](Self::tick).
    last_step: Option<Instant>,
}

impl CounterAnimation {
    /// Start counting from the previous total to the new one.
    pub fn start(prev_total: f64, new_total: f64, steps: usize, step_interval: Duration) -> Self {
        Self {
            frames: interpolate(prev_total, new_total, steps),
            position: 0,
            delta: new_total - prev_total,
            step_interval,
            last_step: None,
        }
    }

    /// A finished animation resting on `total`.
    pub fn settled(total: f64) -> Self {
        Self::start(total, total, 0, Duration::ZERO)
    }

    /// Value to display this frame.
    pub fn current(&self) -> f64 {
        self.frames[self.position]
    }

    /// Where the counter will stop.
    pub fn target(&self) -> f64 {
        self.frames[self.frames.len() - 1]
    }

    /// Change against the previous total, shown as the KPI delta.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn is_running(&self) -> bool {
        self.position + 1 < self.frames.len()
    }

    /// Move to the next frame. Returns whether more frames remain.
    pub fn advance(&mut self) -> bool {
        if self.is_running() {
            self.position += 1;
        }
        self.is_running()
    }

    /// Advance if `step_interval` has passed since the previous step. The
    /// first call only starts the clock. Returns how long until the next
    /// step is due, or `None` once the counter has stopped.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        if !self.is_running() {
            return None;
        }
        match self.last_step {
            None => self.last_step = Some(now),
            Some(last) if now.saturating_duration_since(last) >= self.step_interval => {
                self.advance();
                self.last_step = Some(now);
            }
            Some(_) => {}
        }

        let since = self
            .last_step
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.is_running()
            .then(|| self.step_interval.saturating_sub(since))
    }
}

impl Default for CounterAnimation {
    fn default() -> Self {
        Self::settled(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_to_two_hundred_in_ten_steps() {
        let values = interpolate(100.0, 200.0, 10);

        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 100.0);
        assert_eq!(values[10], 200.0);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!((values[5] - 150.0).abs() < 1e-9);
    }

    #[test]
    fn zero_steps_is_just_the_target() {
        assert_eq!(interpolate(5.0, 42.0, 0), vec![42.0]);
    }

    #[test]
    fn counting_down_ends_exactly_on_target() {
        let values = interpolate(1_000_000.0, 0.1, 7);

        assert_eq!(values.len(), 8);
        assert_eq!(*values.last().unwrap(), 0.1);
        assert!(values.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn animation_advances_to_target_and_stops() {
        let mut anim = CounterAnimation::start(0.0, 300.0, 3, Duration::from_millis(10));

        assert_eq!(anim.delta(), 300.0);
        assert_eq!(anim.current(), 0.0);
        assert!(anim.is_running());

        let mut seen = vec![anim.current()];
        while anim.advance() {
            seen.push(anim.current());
        }
        seen.push(anim.current());

        assert_eq!(seen, vec![0.0, 100.0, 200.0, 300.0]);
        assert!(!anim.advance());
        assert_eq!(anim.current(), anim.target());
    }

    #[test]
    fn tick_waits_for_the_step_interval() {
        let step = Duration::from_millis(10);
        let mut anim = CounterAnimation::start(0.0, 200.0, 2, step);
        let t0 = Instant::now();

        assert_eq!(anim.tick(t0), Some(step));
        assert_eq!(anim.current(), 0.0);

        // Repaints in between must not move the counter.
        assert_eq!(anim.tick(t0 + Duration::from_millis(4)), Some(Duration::from_millis(6)));
        assert_eq!(anim.tick(t0 + Duration::from_millis(9)), Some(Duration::from_millis(1)));
        assert_eq!(anim.current(), 0.0);

        assert_eq!(anim.tick(t0 + step), Some(step));
        assert_eq!(anim.current(), 100.0);

        assert_eq!(anim.tick(t0 + step * 2), None);
        assert_eq!(anim.current(), 200.0);
        assert_eq!(anim.tick(t0 + step * 5), None);
    }

    #[test]
    fn settled_animation_is_idle() {
        let anim = CounterAnimation::settled(75.0);
        assert!(!anim.is_running());
        assert_eq!(anim.current(), 75.0);
        assert_eq!(anim.delta(), 0.0);
        assert_eq!(anim.target(), 75.0);
        assert_eq!(CounterAnimation::settled(75.0).tick(Instant::now()), None);
    }
}
