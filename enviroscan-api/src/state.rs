use serde::Serialize;

use crate::metric::Metric;
use crate::reading::{LatestReading, SensorValues};
use crate::status::ConnectionStatus;
use crate::trend::TrendBuffer;

/// Values shown on screen. Only changes when the view is reconciled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayedState {
    pub values: SensorValues,
    pub trend: TrendBuffer,
}

impl DisplayedState {
    pub fn new(trend_capacity: usize) -> Self {
        Self {
            values: SensorValues::default(),
            trend: TrendBuffer::new(trend_capacity),
        }
    }

    pub(crate) fn apply(&mut self, latest: &LatestReading) {
        self.values = latest.snapshot();
        self.trend.push(self.values.pm25);
    }
}

/// Immutable snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: ConnectionStatus,
    pub status_label: String,
    pub metrics: Vec<Metric>,
    pub values: SensorValues,
    pub trend: Vec<f64>,
    pub ticks: u64,
}

impl DashboardView {
    pub fn new(
        status: &ConnectionStatus,
        metrics: &[Metric],
        displayed: &DisplayedState,
        ticks: u64,
    ) -> Self {
        Self {
            status: status.clone(),
            status_label: status.to_string(),
            metrics: metrics.to_vec(),
            values: displayed.values,
            trend: displayed.trend.to_vec(),
            ticks,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }
}
