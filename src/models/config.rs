use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// User settings from settings.yaml
///
/// Every field has a default, so partial files and environment-only
/// configurations load cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Project Quarm directory chosen last time
    pub last_directory: Option<Utf8PathBuf>,

    /// Log at debug level instead of info
    pub debug_mode: bool,

    /// Mirror log output to the console
    pub console_logging: bool,
}

/// Settings file written by earlier releases (config.json)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyConfig {
    #[serde(default)]
    pub quarm_directory: Option<String>,
}
