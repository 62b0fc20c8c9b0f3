use super::TARGET_FRAME_RATE;

/// Countdown driven by frame deltas.
///
/// Durations are expressed in ticks of the 60 fps baseline, so a timer fed
/// the clock's delta finishes after the same wall time regardless of the
/// actual frame rate. A repeating timer rewinds on the update that finishes
/// it; a one-shot timer stays finished.
#[derive(Debug, Clone)]
pub struct Timer {
    ticks: f32,
    repeating: bool,
    elapsed: f32,
    just_finished: bool,
}

impl Timer {
    pub fn new(ticks: f32, repeating: bool) -> Self {
        Self {
            ticks,
            repeating,
            elapsed: 0.0,
            just_finished: false,
        }
    }

    /// A timer of `seconds` at the 60 fps baseline (`seconds * 60` ticks).
    pub fn from_seconds(seconds: f32, repeating: bool) -> Self {
        Self::new(seconds * TARGET_FRAME_RATE, repeating)
    }

    /// Advances by `delta` ticks.
    pub fn update(&mut self, delta: f32) {
        let was_finished = self.is_finished();
        self.elapsed += delta;
        self.just_finished = !was_finished && self.is_finished();
        if self.just_finished && self.repeating {
            self.elapsed = 0.0;
        }
    }

    /// True for exactly the one update on which the timer crossed its
    /// duration.
    pub fn has_just_finished(&self) -> bool {
        self.just_finished
    }

    /// True from the finishing update onward for one-shot timers; for
    /// repeating timers only on the finishing update itself.
    pub fn is_finished(&self) -> bool {
        self.just_finished || self.elapsed >= self.ticks
    }

    pub fn elapsed_ticks(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── one-shot ────────────────────────────────────────────────────────────

    #[test]
    fn one_shot_finishes_once_and_stays_finished() {
        let mut timer = Timer::new(10.0, false);

        timer.update(9.0);
        assert!(!timer.is_finished());
        assert!(!timer.has_just_finished());

        timer.update(1.0);
        assert!(timer.is_finished());
        assert!(timer.has_just_finished());

        timer.update(1.0);
        assert!(timer.is_finished());
        assert!(!timer.has_just_finished());
        assert_eq!(timer.elapsed_ticks(), 11.0);
    }

    #[test]
    fn overshoot_still_counts_as_finishing() {
        let mut timer = Timer::new(5.0, false);
        timer.update(50.0);
        assert!(timer.has_just_finished());
    }

    // ── repeating ───────────────────────────────────────────────────────────

    #[test]
    fn repeating_rewinds_on_finish() {
        let mut timer = Timer::new(30.0, true);
        let mut finishes = Vec::new();
        for delta in [29.0, 1.0, 1.0, 28.0, 1.0] {
            timer.update(delta);
            finishes.push(timer.has_just_finished());
        }
        assert_eq!(finishes, [false, true, false, false, true]);
        assert_eq!(timer.elapsed_ticks(), 0.0);
    }

    #[test]
    fn repeating_is_finished_only_on_the_crossing_update() {
        let mut timer = Timer::new(2.0, true);
        timer.update(2.0);
        assert!(timer.is_finished());
        timer.update(1.0);
        assert!(!timer.is_finished());
    }

    // ── construction ────────────────────────────────────────────────────────

    #[test]
    fn from_seconds_converts_to_baseline_ticks() {
        let mut timer = Timer::from_seconds(0.5, false);
        timer.update(29.0);
        assert!(!timer.is_finished());
        timer.update(1.0);
        assert!(timer.is_finished());
    }
}
