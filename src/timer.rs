/// Rest-period countdown core. The owning component drives `tick` from a
/// one-second interval and reacts to the single expiry it reports; alerting
/// is the caller's job.
#[derive(Clone, Debug, PartialEq)]
pub struct RestTimer {
    remaining: i32,
    active: bool,
    reactivate_on_adjust: bool,
}

impl RestTimer {
    pub fn new() -> Self {
        Self::with_policy(false)
    }

    /// `reactivate_on_adjust` chooses whether a positive manual adjustment
    /// restarts an expired countdown.
    pub fn with_policy(reactivate_on_adjust: bool) -> Self {
        Self {
            remaining: 0,
            active: false,
            reactivate_on_adjust,
        }
    }

    /// Starting while already active simply resets the remaining count;
    /// there is no queue of pending countdowns.
    pub fn start(&mut self, duration_secs: u32) {
        self.remaining = duration_secs as i32;
        self.active = true;
    }

    /// Manual adjustment, clamped at zero.
    pub fn adjust(&mut self, delta_secs: i32) {
        self.remaining = (self.remaining + delta_secs).max(0);
        if self.reactivate_on_adjust && !self.active && self.remaining > 0 {
            self.active = true;
        }
    }

    /// Advance one second. Returns true exactly once, on the tick that
    /// reaches zero; the timer deactivates at that point.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= 1;
        if self.remaining <= 0 {
            self.remaining = 0;
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_exactly_once() {
        let mut timer = RestTimer::new();
        timer.start(5);
        let mut expiries = 0;
        for _ in 0..5 {
            if timer.tick() {
                expiries += 1;
            }
        }
        assert_eq!(expiries, 1);
        assert_eq!(timer.remaining(), 0);
        assert!(!timer.is_active());
        assert!(!timer.tick());
    }

    #[test]
    fn restart_while_active_resets_the_countdown() {
        let mut timer = RestTimer::new();
        timer.start(10);
        timer.tick();
        timer.start(90);
        assert_eq!(timer.remaining(), 90);
        assert!(timer.is_active());
    }

    #[test]
    fn adjust_clamps_at_zero() {
        let mut timer = RestTimer::new();
        timer.start(10);
        timer.adjust(-15);
        assert_eq!(timer.remaining(), 0);
        timer.adjust(15);
        assert_eq!(timer.remaining(), 15);
    }

    #[test]
    fn adjust_while_inactive_stays_inactive_by_default() {
        let mut timer = RestTimer::new();
        timer.start(1);
        assert!(timer.tick());
        timer.adjust(15);
        assert_eq!(timer.remaining(), 15);
        assert!(!timer.is_active());
        assert!(!timer.tick());
    }

    #[test]
    fn adjust_reactivates_under_the_opt_in_policy() {
        let mut timer = RestTimer::with_policy(true);
        timer.start(1);
        assert!(timer.tick());
        timer.adjust(15);
        assert!(timer.is_active());
        assert_eq!(timer.remaining(), 15);
        timer.adjust(-15);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn adjusting_an_active_timer_to_zero_expires_on_the_next_tick() {
        let mut timer = RestTimer::new();
        timer.start(10);
        timer.adjust(-15);
        assert!(timer.is_active());
        assert!(timer.tick());
        assert!(!timer.is_active());
    }
}
