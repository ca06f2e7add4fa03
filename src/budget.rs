//! Wall-clock budgets for placement runs.
//!
//! Every stage that scales with region area checks the deadline: sample-grid
//! construction, candidate generation, and the selection loops. A run that
//! hits the budget returns whatever it has so far with the `incomplete` flag
//! set, so a pathological region can never hang the caller.

use std::time::{Duration, Instant};

/// Wall-clock budget for one placement run. Zero seconds disables it.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// Start a budget of `secs` seconds from now.
    pub fn new(secs: f32) -> Self {
        let expires_at = if secs > 0.0 {
            Some(Instant::now() + Duration::from_secs_f32(secs))
        } else {
            None
        };
        Self { expires_at }
    }

    /// True once the budget is spent.
    pub fn expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_disabled() {
        let deadline = Deadline::new(0.0);
        assert!(!deadline.expired());
    }

    #[test]
    fn test_deadline_expires() {
        let deadline = Deadline::new(1e-6);
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(deadline.expired());
    }
}
