//! Configuration: TOML settings and the config manager.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    DownloadSettings, EncodeSettings, LoggingSettings, PathSettings, Settings, SilenceSettings,
};
