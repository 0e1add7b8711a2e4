use std::f64::consts::PI;

use enviroscan_api::SensorValues;
use rand::Rng;

const PM25_MAX: f64 = 80.0;
const PM25_STEP: f64 = 3.0;
const FAN_THRESHOLD: f64 = 12.0;

// Warmest at 15:00, most humid when coolest.
const PEAK_FRACTION: f64 = 0.625;

/// CO₂ in ppm. Background stays around 600, office hours (09:00 to 18:00)
/// add an occupancy bump peaking mid-afternoon.
pub fn simulated_co2(day_fraction: f64, noise: f64) -> f64 {
    const BASELINE: f64 = 600.0;
    const OCCUPANCY_PEAK: f64 = 550.0;
    const OCCUPIED_FROM: f64 = 0.375;
    const OCCUPIED_UNTIL: f64 = 0.75;

    let occupancy = if (OCCUPIED_FROM..OCCUPIED_UNTIL).contains(&day_fraction) {
        let progress = (day_fraction - OCCUPIED_FROM) / (OCCUPIED_UNTIL - OCCUPIED_FROM);
        (progress * PI).sin() * OCCUPANCY_PEAK
    } else {
        0.0
    };

    (BASELINE + occupancy + noise).round()
}

/// Temperature in °C, a daily sine between 18 and 28.
pub fn simulated_temperature(day_fraction: f64) -> f64 {
    let radians = (day_fraction - PEAK_FRACTION) * 2.0 * PI;

    round_tenths(23.0 + radians.cos() * 5.0)
}

/// Relative humidity in %, between 40 and 70.
pub fn simulated_humidity(day_fraction: f64) -> f64 {
    let radians = (day_fraction - PEAK_FRACTION) * 2.0 * PI;

    round_tenths(55.0 - radians.cos() * 15.0)
}

pub fn next_pm25(previous: f64, step: f64) -> f64 {
    round_tenths((previous + step).clamp(0.0, PM25_MAX))
}

pub fn fan_state(pm25: f64) -> f64 {
    if pm25 > FAN_THRESHOLD { 1.0 } else { 0.0 }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Keeps the PM2.5 walk between readings.
#[derive(Debug, Clone)]
pub struct Simulator {
    pm25: f64,
}

impl Simulator {
    pub fn new(pm25: f64) -> Self {
        Self {
            pm25: pm25.clamp(0.0, PM25_MAX),
        }
    }

    pub fn step<R: Rng>(&mut self, day_fraction: f64, rng: &mut R) -> SensorValues {
        self.pm25 = next_pm25(self.pm25, rng.random_range(-PM25_STEP..=PM25_STEP));

        SensorValues {
            co2: simulated_co2(day_fraction, rng.random_range(-25.0..=25.0)),
            pm25: self.pm25,
            temp: simulated_temperature(day_fraction),
            humidity: simulated_humidity(day_fraction),
            fan: fan_state(self.pm25),
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(8.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_co2_bumps_during_office_hours() {
        assert_eq!(simulated_co2(0.1, 0.0), 600.0);
        assert_eq!(simulated_co2(0.9, 0.0), 600.0);
        assert_eq!(simulated_co2(0.5625, 0.0), 1150.0);
        assert!(simulated_co2(0.45, 0.0) > 600.0);
    }

    #[test]
    fn test_temperature_and_humidity_ranges() {
        assert_eq!(simulated_temperature(PEAK_FRACTION), 28.0);
        assert_eq!(simulated_temperature(0.125), 18.0);
        assert_eq!(simulated_humidity(PEAK_FRACTION), 40.0);
        assert_eq!(simulated_humidity(0.125), 70.0);

        for step in 0..=96 {
            let day_fraction = step as f64 / 96.0;
            assert!((18.0..=28.0).contains(&simulated_temperature(day_fraction)));
            assert!((40.0..=70.0).contains(&simulated_humidity(day_fraction)));
        }
    }

    #[test]
    fn test_pm25_walk_is_clamped() {
        assert_eq!(next_pm25(1.0, -3.0), 0.0);
        assert_eq!(next_pm25(79.0, 3.0), 80.0);
        assert_eq!(next_pm25(10.0, 2.5), 12.5);
    }

    #[test]
    fn test_fan_follows_pm25() {
        assert_eq!(fan_state(12.0), 0.0);
        assert_eq!(fan_state(12.1), 1.0);
    }

    #[test]
    fn test_steps_stay_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut simulator = Simulator::default();

        for step in 0..500 {
            let values = simulator.step((step % 96) as f64 / 96.0, &mut rng);

            assert!((0.0..=PM25_MAX).contains(&values.pm25));
            assert_eq!(values.fan, fan_state(values.pm25));
            assert!(values.co2 >= 575.0);
        }
    }
}
