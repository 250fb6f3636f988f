//! Repository configuration
//!
//! Stored as TOML at `.git/config`:
//!
//! ```toml
//! [core]
//! repositoryformatversion = 0
//! filemode = true
//! bare = false
//!
//! [user]
//! name = "Ada"
//! email = "ada@example.com"
//! ```
//!
//! A user-level file with the same layout lives at
//! `$XDG_CONFIG_HOME/plumb/config.toml` (default `~/.config/plumb/config.toml`).

use crate::errors::{Error, IoResultExt, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    pub repositoryformatversion: u32,
    pub filemode: bool,
    pub bare: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            repositoryformatversion: 0,
            filemode: true,
            bare: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_path(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::corruption(format!("config {}: {e}", path.display())))
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidArgument(format!("config: {e}")))?;
        std::fs::write(path, content).with_path(path)
    }

    /// `(name, email)` when both are configured
    pub fn identity(&self) -> Option<(String, String)> {
        let user = self.user.as_ref()?;
        Some((user.name.clone()?, user.email.clone()?))
    }
}

/// `$XDG_CONFIG_HOME`, falling back to `~/.config`
pub fn xdg_config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

pub fn global_config_path() -> Option<PathBuf> {
    xdg_config_home().map(|config| config.join("plumb").join("config.toml"))
}

/// Identity from `GIT_AUTHOR_NAME` / `GIT_AUTHOR_EMAIL`
pub fn identity_from_env() -> Option<(String, String)> {
    let name = std::env::var("GIT_AUTHOR_NAME").ok()?;
    let email = std::env::var("GIT_AUTHOR_EMAIL").ok()?;
    Some((name, email))
}
