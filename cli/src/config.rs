use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use dirs::home_dir;
use serde::Deserialize;

const CONFIG_TOML_FILE: &str = "config.toml";

/// Port the panel backend listens on out of the box.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8181";

/// Client settings read from `$MCPANEL_HOME/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PanelConfig {
    pub base_url: String,
    /// Route the session-expiry redirect sends the user to.
    pub login_route: String,
    /// Zero disables the timeout.
    pub request_timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login_route: "/login".to_string(),
            request_timeout_secs: 30,
            user_agent: None,
        }
    }
}

/// `$MCPANEL_HOME` if set, otherwise `~/.mcpanel`.
pub fn find_mcpanel_home() -> io::Result<PathBuf> {
    if let Ok(home) = std::env::var("MCPANEL_HOME")
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }
    let mut home = home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not find home directory")
    })?;
    home.push(".mcpanel");
    Ok(home)
}

impl PanelConfig {
    /// Loads `explicit` when given (it must exist), otherwise the default
    /// location, falling back to defaults when that file is absent.
    pub fn load(explicit: Option<&Path>) -> io::Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (find_mcpanel_home()?.join(CONFIG_TOML_FILE), false),
        };
        match read_config_from_path(&path, required)? {
            Some(config) => Ok(config),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Applies the environment override, then the command-line one.
    pub fn apply_overrides(&mut self, env_base_url: Option<String>, cli_base_url: Option<String>) {
        if let Some(url) = env_base_url.filter(|url| !url.is_empty()) {
            self.base_url = url;
        }
        if let Some(url) = cli_base_url {
            self.base_url = url;
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

fn read_config_from_path(path: &Path, required: bool) -> io::Result<Option<PanelConfig>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match PanelConfig::from_toml_str(&contents) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::error!("Failed to parse {}: {err}", path.display());
                Err(io::Error::new(io::ErrorKind::InvalidData, err))
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            tracing::info!("{} not found, using defaults", path.display());
            Ok(None)
        }
        Err(err) => {
            tracing::error!("Failed to read {}: {err}", path.display());
            Err(err)
        }
    }
}
