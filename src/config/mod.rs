use crate::models::{LegacyConfig, UserConfig};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use std::fs;

/// Prefix for environment overrides, e.g. `QUARM_CHARMGR_LAST_DIRECTORY`.
pub const ENV_PREFIX: &str = "QUARM_CHARMGR";

const USER_CONFIG_FILE: &str = "settings.yaml";
const LEGACY_CONFIG_FILE: &str = "config.json";

/// Persistence of the last chosen Project Quarm directory.
///
/// The command line layer only depends on this contract, not on where or how the
/// value is stored.
#[cfg_attr(test, mockall::automock)]
pub trait DirectoryStore {
    /// Returns the saved directory, if any.
    fn load_last_directory(&self) -> Option<Utf8PathBuf>;

    /// Remembers `directory` for the next run.
    fn save_last_directory(&self, directory: &Utf8Path) -> Result<()>;
}

/// Configuration manager for loading and saving the user settings file.
///
/// Settings are layered: defaults, then `settings.yaml`, then `QUARM_CHARMGR_*`
/// environment variables. When `settings.yaml` does not exist yet, the directory
/// from a legacy `config.json` is used as the default.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    user_config_path: Utf8PathBuf,
    legacy_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// The legacy `config.json` is looked up inside the same directory; use
    /// [`with_legacy_config`](Self::with_legacy_config) to point elsewhere.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            user_config_path: config_dir.join(USER_CONFIG_FILE),
            legacy_config_path: config_dir.join(LEGACY_CONFIG_FILE),
            config_dir,
        })
    }

    /// ConfigManager for the platform's per-user configuration directory.
    ///
    /// The legacy `config.json` is read from the working directory, where earlier
    /// releases wrote it.
    pub fn for_current_user() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "ProjectQuarm", "CharacterManager")
            .context("Could not determine the user configuration directory")?;
        let config_dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf())
            .map_err(|path| anyhow::anyhow!("Config directory is not UTF-8: {}", path.display()))?;

        Ok(Self::new(config_dir)?.with_legacy_config(LEGACY_CONFIG_FILE))
    }

    /// Override where the legacy `config.json` is looked up.
    pub fn with_legacy_config<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.legacy_config_path = path.as_ref().to_path_buf();
        self
    }

    /// Load the user configuration, applying environment overrides.
    ///
    /// # Returns
    /// The layered UserConfig, or defaults if nothing is configured
    pub fn load_user_config(&self) -> Result<UserConfig> {
        self.load_layered(None)
    }

    /// Same as [`load_user_config`](Self::load_user_config) but reads overrides from
    /// `environment` instead of the process environment.
    pub fn load_user_config_with_env(
        &self,
        environment: ::config::Map<String, String>,
    ) -> Result<UserConfig> {
        self.load_layered(Some(environment))
    }

    fn load_layered(&self, environment: Option<::config::Map<String, String>>) -> Result<UserConfig> {
        let mut builder = ::config::Config::builder();

        if self.user_config_path.exists() {
            builder = builder.add_source(::config::File::new(
                self.user_config_path.as_str(),
                ::config::FileFormat::Yaml,
            ));
        } else if let Some(directory) = self.load_legacy_directory()? {
            tracing::info!(
                "Using directory from legacy config {}: {}",
                self.legacy_config_path,
                directory
            );
            builder = builder
                .set_default("last_directory", directory)
                .context("Failed to apply legacy directory")?;
        } else {
            tracing::debug!(
                "User config file not found at {}, using defaults",
                self.user_config_path
            );
        }

        let config: UserConfig = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).source(environment))
            .build()
            .with_context(|| format!("Failed to read user config: {}", self.user_config_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse user config: {}", self.user_config_path))?;

        tracing::debug!("Loaded user config: {:?}", config);
        Ok(config)
    }

    /// Save the user configuration file.
    pub fn save_user_config(&self, config: &UserConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize user config to YAML")?;

        fs::write(&self.user_config_path, yaml_string)
            .with_context(|| format!("Failed to write user config: {}", self.user_config_path))?;

        tracing::info!("Saved user config to {}", self.user_config_path);
        Ok(())
    }

    /// Load only what is stored in `settings.yaml`, without environment overrides.
    ///
    /// # Returns
    /// The stored UserConfig, or default if the file doesn't exist
    pub fn load_stored_config(&self) -> Result<UserConfig> {
        if !self.user_config_path.exists() {
            return Ok(UserConfig::default());
        }

        let file_contents = fs::read_to_string(&self.user_config_path)
            .with_context(|| format!("Failed to read user config: {}", self.user_config_path))?;

        serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse user config: {}", self.user_config_path))
    }

    fn load_legacy_directory(&self) -> Result<Option<String>> {
        if !self.legacy_config_path.exists() {
            return Ok(None);
        }

        let file_contents = fs::read_to_string(&self.legacy_config_path).with_context(|| {
            format!("Failed to read legacy config: {}", self.legacy_config_path)
        })?;

        match serde_json::from_str::<LegacyConfig>(&file_contents) {
            Ok(legacy) => Ok(legacy.quarm_directory.filter(|dir| !dir.is_empty())),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable legacy config {}: {}",
                    self.legacy_config_path,
                    e
                );
                Ok(None)
            }
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Directory the rolling log files are written to.
    pub fn log_dir(&self) -> Utf8PathBuf {
        self.config_dir.join("logs")
    }
}

impl DirectoryStore for ConfigManager {
    fn load_last_directory(&self) -> Option<Utf8PathBuf> {
        match self.load_user_config() {
            Ok(config) => config.last_directory,
            Err(e) => {
                tracing::warn!("Could not load saved directory: {:#}", e);
                None
            }
        }
    }

    fn save_last_directory(&self, directory: &Utf8Path) -> Result<()> {
        let mut config = self.load_stored_config().unwrap_or_else(|e| {
            tracing::warn!("Replacing unreadable user config: {:#}", e);
            UserConfig::default()
        });
        if config.last_directory.as_deref() == Some(directory) {
            return Ok(());
        }

        config.last_directory = Some(directory.to_path_buf());
        self.save_user_config(&config)
    }
}
