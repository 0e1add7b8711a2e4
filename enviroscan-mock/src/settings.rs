use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Broker {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub secure: bool,
}

impl Broker {
    pub fn url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };

        format!("{scheme}://{}:{}{}", self.host, self.port, self.path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mock {
    pub interval_ms: u64,
    /// Publish `enviroscan/fan` as well
    pub fan: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub broker: Broker,
    pub mock: Mock,
}

impl Settings {
    pub fn new() -> Result<Self, toml::de::Error> {
        toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/mock.toml"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_settings_parse() {
        let settings = Settings::new().unwrap();

        assert_eq!(settings.broker.port, 8884);
        assert!(settings.mock.interval_ms > 0);
        assert!(settings.mock.fan);
        assert!(settings.broker.url().starts_with("wss://"));
        assert!(settings.broker.url().ends_with(":8884/mqtt"));
    }
}
