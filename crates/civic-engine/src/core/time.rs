/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // A stalled tab can hand us seconds at once; never run more than 10 steps.
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Handle to a pending delayed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct PendingTimer {
    id: TimerId,
    remaining: f32,
}

/// One-shot delayed calls, polled by the frame loop.
///
/// Nothing blocks: each fixed step advances every pending timer and moves the
/// expired ones to a fired list the game drains in its next update.
#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<PendingTimer>,
    fired: Vec<TimerId>,
    next_id: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer that fires after `delay` seconds.
    pub fn delayed_call(&mut self, delay: f32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            id,
            remaining: delay,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        before != self.pending.len()
    }

    /// Advance all pending timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let fired = &mut self.fired;
        self.pending.retain_mut(|timer| {
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                fired.push(timer.id);
                false
            } else {
                true
            }
        });
    }

    /// Take the timers that expired since the last call.
    pub fn take_fired(&mut self) -> Vec<TimerId> {
        std::mem::take(&mut self.fired)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drop every pending and fired timer (scene teardown).
    pub fn clear(&mut self) {
        self.pending.clear();
        self.fired.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn timer_fires_once_after_delay() {
        let mut timers = Timers::new();
        let id = timers.delayed_call(0.5);

        timers.tick(0.3);
        assert!(timers.take_fired().is_empty());
        assert!(timers.is_pending(id));

        timers.tick(0.3);
        assert_eq!(timers.take_fired(), vec![id]);
        assert!(!timers.is_pending(id));

        timers.tick(1.0);
        assert!(timers.take_fired().is_empty());
    }

    #[test]
    fn cancelled_and_cleared_timers_never_fire() {
        let mut timers = Timers::new();
        let a = timers.delayed_call(0.1);
        let _b = timers.delayed_call(0.1);
        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));

        timers.clear();
        timers.tick(1.0);
        assert!(timers.take_fired().is_empty());
        assert_eq!(timers.pending_count(), 0);
    }
}
