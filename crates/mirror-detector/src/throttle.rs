use std::time::{Duration, Instant};

/// Lets an event through at most once per `period`.
#[derive(Debug)]
pub struct WarnThrottle {
    period: Duration,
    last_emit: Option<Instant>,
    suppressed: u64,
}

impl WarnThrottle {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_emit: None,
            suppressed: 0,
        }
    }

    /// `Some(dropped)` if the caller should log now, with the number of
    /// events suppressed since the previous one; otherwise `None`.
    pub fn should_emit(&mut self) -> Option<u64> {
        self.should_emit_at(Instant::now())
    }

    pub fn should_emit_at(&mut self, now: Instant) -> Option<u64> {
        match self.last_emit {
            Some(last) if now.saturating_duration_since(last) < self.period => {
                self.suppressed += 1;
                None
            }
            _ => {
                self.last_emit = Some(now);
                Some(std::mem::take(&mut self.suppressed))
            }
        }
    }
}
