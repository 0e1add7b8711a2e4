use std::cell::Cell;

pub trait TimeProvider {
    fn uptime_ms(&self) -> u64;
}

/// Clock advanced by hand, for driving schedules deterministically.
#[derive(Debug, Default)]
pub struct ManualTimeProvider {
    now_ms: Cell<u64>,
}

impl ManualTimeProvider {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now_ms.set(ms);
    }
}

impl TimeProvider for ManualTimeProvider {
    fn uptime_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

/// Fixed-period deadline tracker. The first deadline falls one period after
/// the start; deadlines missed while the owner was busy are skipped rather
/// than replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSchedule {
    period_ms: u64,
    next_due_ms: Option<u64>,
}

impl TickSchedule {
    pub fn new(period_ms: u64, start_ms: u64) -> Self {
        let period_ms = period_ms.max(1);

        Self {
            period_ms,
            next_due_ms: Some(start_ms + period_ms),
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// `None` once cancelled.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    /// Returns `true` if a deadline has passed, and moves to the next one.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                let missed = (now_ms - due) / self.period_ms;
                self.next_due_ms = Some(due + (missed + 1) * self.period_ms);
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.next_due_ms.is_none()
    }
}
