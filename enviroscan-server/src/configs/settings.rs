use std::env;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broker {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub username: String,
    pub password: String,
    pub client_id_prefix: String,
    pub reconnect_period_ms: u64,
    pub connect_timeout_ms: u64,
    pub keep_alive_secs: u64,
    /// TLS on top of the chosen transport
    pub secure: bool,
    /// MQTT over websocket at `path`; raw MQTT over TCP when unset
    pub websocket: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub refresh_interval_ms: u64,
    pub fan: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub broker: Broker,
    pub dashboard: Dashboard,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Self::defaults()?
            .add_source(File::with_name("configs/default").required(false))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(
                Environment::with_prefix("ENVIROSCAN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in fallbacks only, without reading files or the environment.
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logger.level", "info")?
            .set_default("broker.host", "4547d51320d54e74be02bb04e3c1b342.s1.eu.hivemq.cloud")?
            .set_default("broker.port", 8884)?
            .set_default("broker.path", "/mqtt")?
            .set_default("broker.username", "envscan")?
            .set_default("broker.password", "Abcd1234")?
            .set_default("broker.client_id_prefix", "WebApp_EnviroScan_")?
            .set_default("broker.reconnect_period_ms", 1000)?
            .set_default("broker.connect_timeout_ms", 30000)?
            .set_default("broker.keep_alive_secs", 30)?
            .set_default("broker.secure", true)?
            .set_default("broker.websocket", true)?
            .set_default("dashboard.refresh_interval_ms", 10000)?
            .set_default("dashboard.fan", true)
    }
}
