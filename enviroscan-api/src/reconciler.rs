use crate::reading::LatestReading;
use crate::state::DisplayedState;
use crate::trend::TREND_CAPACITY;

/// Copies the latest readings into the displayed state once per tick.
#[derive(Debug, Clone)]
pub struct ViewStateReconciler {
    displayed: DisplayedState,
    ticks: u64,
}

impl ViewStateReconciler {
    pub fn new(trend_capacity: usize) -> Self {
        Self {
            displayed: DisplayedState::new(trend_capacity),
            ticks: 0,
        }
    }

    /// Replaces every displayed value with the latest one and samples pm25
    /// into the trend, even when nothing arrived since the previous tick.
    pub fn tick(&mut self, latest: &LatestReading) {
        self.displayed.apply(latest);
        self.ticks += 1;

        tracing::debug!(
            tick = self.ticks,
            values = ?self.displayed.values,
            "Updated displayed state"
        );
    }

    pub fn displayed(&self) -> &DisplayedState {
        &self.displayed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for ViewStateReconciler {
    fn default() -> Self {
        Self::new(TREND_CAPACITY)
    }
}
