use serde::{Deserialize, Serialize};

pub const TOPIC_PREFIX: &str = "enviroscan";

/// A sensor channel published by the EnviroScan station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Carbon dioxide concentration in ppm
    Co2,
    /// Fine particulate matter in µg/m³
    Pm25,
    /// Temperature in degrees Celsius
    Temp,
    /// Relative humidity in percent
    Humidity,
    /// Fan state, `1` is on
    Fan,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Co2,
        Metric::Pm25,
        Metric::Temp,
        Metric::Humidity,
        Metric::Fan,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Co2 => "co2",
            Metric::Pm25 => "pm25",
            Metric::Temp => "temp",
            Metric::Humidity => "humidity",
            Metric::Fan => "fan",
        }
    }

    pub fn topic(&self) -> &'static str {
        match self {
            Metric::Co2 => "enviroscan/co2",
            Metric::Pm25 => "enviroscan/pm25",
            Metric::Temp => "enviroscan/temp",
            Metric::Humidity => "enviroscan/humidity",
            Metric::Fan => "enviroscan/fan",
        }
    }

    pub fn from_topic(topic: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|metric| metric.topic() == topic)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Co2 => "CO₂",
            Metric::Pm25 => "PM2.5",
            Metric::Temp => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Fan => "Fan",
        }
    }

    /// Display unit, `None` for the on/off fan channel.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Metric::Co2 => Some("ppm"),
            Metric::Pm25 => Some("µg/m³"),
            Metric::Temp => Some("°C"),
            Metric::Humidity => Some("%"),
            Metric::Fan => None,
        }
    }

    /// Upper bound of the recommended range.
    pub fn warning_threshold(&self) -> Option<f64> {
        match self {
            Metric::Co2 => Some(1000.0),
            Metric::Pm25 => Some(12.0),
            Metric::Temp => Some(30.0),
            Metric::Humidity => Some(70.0),
            Metric::Fan => None,
        }
    }

    pub fn is_warning(&self, value: f64) -> bool {
        self.warning_threshold()
            .is_some_and(|threshold| value > threshold)
    }
}

/// The fixed set of topics a dashboard session subscribes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSet {
    metrics: Vec<Metric>,
}

impl TopicSet {
    pub fn new(fan: bool) -> Self {
        if fan {
            Self::with_fan()
        } else {
            Self::standard()
        }
    }

    pub fn standard() -> Self {
        Self {
            metrics: vec![Metric::Co2, Metric::Pm25, Metric::Temp, Metric::Humidity],
        }
    }

    pub fn with_fan() -> Self {
        Self {
            metrics: Metric::ALL.to_vec(),
        }
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn topics(&self) -> Vec<&'static str> {
        self.metrics.iter().map(Metric::topic).collect()
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.metrics.contains(&metric)
    }

    /// Maps an inbound topic to its metric, ignoring topics outside the set.
    pub fn resolve(&self, topic: &str) -> Option<Metric> {
        Metric::from_topic(topic).filter(|metric| self.contains(*metric))
    }
}

impl Default for TopicSet {
    fn default() -> Self {
        Self::with_fan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_round_trip() {
        for metric in Metric::ALL {
            assert!(metric.topic().starts_with(TOPIC_PREFIX));
            assert!(metric.topic().ends_with(metric.key()));
            assert_eq!(Metric::from_topic(metric.topic()), Some(metric));
        }

        assert_eq!(Metric::from_topic("enviroscan/pressure"), None);
        assert_eq!(Metric::from_topic("co2"), None);
    }

    #[test]
    fn test_fan_topic_maps_to_fan() {
        assert_eq!(Metric::from_topic("enviroscan/fan"), Some(Metric::Fan));
    }

    #[test]
    fn test_standard_set_ignores_fan() {
        let topics = TopicSet::standard();

        assert_eq!(
            topics.topics(),
            vec!["enviroscan/co2", "enviroscan/pm25", "enviroscan/temp", "enviroscan/humidity"]
        );
        assert_eq!(topics.resolve("enviroscan/fan"), None);
        assert_eq!(TopicSet::with_fan().resolve("enviroscan/fan"), Some(Metric::Fan));
    }

    #[test]
    fn test_warning_thresholds() {
        assert!(Metric::Co2.is_warning(1000.1));
        assert!(!Metric::Co2.is_warning(1000.0));
        assert!(Metric::Pm25.is_warning(12.5));
        assert!(Metric::Temp.is_warning(31.0));
        assert!(Metric::Humidity.is_warning(71.0));
        assert!(!Metric::Fan.is_warning(1.0));
        assert!(!Metric::Pm25.is_warning(f64::NAN));
    }
}
