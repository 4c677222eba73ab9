use std::time::Instant;

/// Once-per-second alarm for the final-attempt countdown.
///
/// Dropping the value cancels it; there is no way to deliver a tick
/// from a countdown that is no longer held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    armed_at: Instant,
    delivered: u32,
}

impl Countdown {
    pub fn arm(now: Instant) -> Self {
        Self {
            armed_at: now,
            delivered: 0,
        }
    }

    /// Whole seconds elapsed since arming that have not been handed out yet
    pub fn due(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.armed_at).as_secs();
        let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
        let due = elapsed.saturating_sub(self.delivered);
        self.delivered = self.delivered.saturating_add(due);
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_nothing_due_immediately() {
        let now = Instant::now();
        let mut countdown = Countdown::arm(now);

        assert_eq!(countdown.due(now), 0);
        assert_eq!(countdown.due(now + Duration::from_millis(999)), 0);
    }

    #[test]
    fn test_each_second_delivered_once() {
        let now = Instant::now();
        let mut countdown = Countdown::arm(now);

        assert_eq!(countdown.due(now + Duration::from_millis(1000)), 1);
        assert_eq!(countdown.due(now + Duration::from_millis(1500)), 0);
        assert_eq!(countdown.due(now + Duration::from_millis(4200)), 3);
        assert_eq!(countdown.due(now + Duration::from_millis(4200)), 0);
    }

    #[test]
    fn test_clock_before_arming_is_ignored() {
        let now = Instant::now() + Duration::from_secs(10);
        let mut countdown = Countdown::arm(now);

        assert_eq!(countdown.due(now - Duration::from_secs(5)), 0);
    }
}
