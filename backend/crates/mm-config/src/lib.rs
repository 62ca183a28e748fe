mod config;
mod error;
mod log_level;
mod logging_config;
mod mailgun_config;
mod server_config;
mod websocket_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use mailgun_config::MailgunConfig;
pub use server_config::ServerConfig;
pub use websocket_config::{
    DEFAULT_HEARTBEAT_INTERVAL_SECS, DEFAULT_SEND_BUFFER_SIZE, MAX_HEARTBEAT_INTERVAL_SECS,
    MAX_SEND_BUFFER_SIZE, MIN_HEARTBEAT_INTERVAL_SECS, MIN_SEND_BUFFER_SIZE, WebSocketConfig,
};

const CONFIG_DIR_ENV: &str = "MM_CONFIG_DIR";
const DEFAULT_CONFIG_DIRECTORY: &str = ".mm";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 80;
const DEFAULT_STATIC_DIR: &str = "./public";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
