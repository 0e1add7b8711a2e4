pub mod settings;

pub use settings::{Broker, Dashboard, Logger, Server, Settings};
