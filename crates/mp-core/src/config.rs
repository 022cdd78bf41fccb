//! Configuration types and parsing for mailpeek.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config file names searched for in a project directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["mailpeek.yml", "mailpeek.yaml"];

/// Environment variable overriding `root_url`
pub const ROOT_URL_ENV: &str = "MAILPEEK_ROOT_URL";

/// Main preview configuration from mailpeek.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the email template sources
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    /// File extension of template sources (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// File stems treated as shared layout fragments.
    ///
    /// Layouts are compiled into the template set but never listed as
    /// standalone previews.
    #[serde(default = "default_layouts")]
    pub layouts: Vec<String>,

    /// External identifier to internal template name
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,

    /// Translation strings served by `L.Ts()`
    #[serde(default = "default_translations")]
    pub translations: BTreeMap<String, String>,

    /// Site root returned by `RootURL()`
    #[serde(default = "default_root_url")]
    pub root_url: String,

    /// Logo location returned by `LogoURL()`; derived from `root_url` when unset
    #[serde(default)]
    pub logo_url: Option<String>,

    /// Directory served for every path outside `route_prefix`
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// URL prefix under which previews are served
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Reuse the compiled template set until a source file changes
    #[serde(default)]
    pub cache: bool,

    /// HTTP listener settings for `mailpeek serve`
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            extension: default_extension(),
            layouts: default_layouts(),
            aliases: default_aliases(),
            translations: default_translations(),
            root_url: default_root_url(),
            logo_url: None,
            static_dir: default_static_dir(),
            route_prefix: default_route_prefix(),
            cache: false,
            server: ServerConfig::default(),
        }
    }
}

fn default_template_dir() -> String {
    "static/email-templates".to_string()
}

fn default_extension() -> String {
    "html".to_string()
}

fn default_layouts() -> Vec<String> {
    vec!["base".to_string()]
}

fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "subscriber-optin-campaign".to_string(),
        "optin-campaign".to_string(),
    )])
}

fn default_translations() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("email.optin.confirmSubWelcome".to_string(), "Hi".to_string()),
        (
            "email.optin.confirmSub".to_string(),
            "Confirm subscription".to_string(),
        ),
    ])
}

fn default_root_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_route_prefix() -> String {
    "/email-templates".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for mailpeek.yml or mailpeek.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Load configuration from a project directory, falling back to the
    /// built-in defaults when no config file exists
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        if Self::find_in_dir(dir).is_some() {
            return Self::load_from_dir(dir);
        }
        log::debug!(
            "No {} in {}, using default configuration",
            CONFIG_FILE_NAMES[0],
            dir.display()
        );
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ROOT_URL_ENV) {
            if !url.is_empty() {
                self.root_url = url;
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "extension must be a bare file extension like 'html', got '{}'",
                    self.extension
                ),
            });
        }

        if !self.route_prefix.starts_with('/') {
            return Err(CoreError::ConfigInvalid {
                message: format!("route_prefix must start with '/', got '{}'", self.route_prefix),
            });
        }

        if self.root_url.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "root_url cannot be empty".to_string(),
            });
        }

        if let Some((from, _)) = self.aliases.iter().find(|(_, to)| to.is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: format!("alias '{}' maps to an empty template name", from),
            });
        }

        Ok(())
    }

    /// Logo URL, defaulting to `{root_url}/public/static/logo.svg`
    pub fn logo_url(&self) -> String {
        self.logo_url.clone().unwrap_or_else(|| {
            format!(
                "{}/public/static/logo.svg",
                self.root_url.trim_end_matches('/')
            )
        })
    }

    /// Route prefix without a trailing slash
    pub fn route_prefix(&self) -> &str {
        let trimmed = self.route_prefix.trim_end_matches('/');
        if trimmed.is_empty() {
            "/"
        } else {
            trimmed
        }
    }

    /// Absolute template directory for a project root
    pub fn template_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.template_dir)
    }

    /// Absolute static directory for a project root
    pub fn static_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.static_dir)
    }

    /// Glob pattern matching every template source under `root`
    pub fn template_pattern(&self, root: &Path) -> String {
        let dir = self.template_dir_absolute(root);
        let escaped = glob::Pattern::escape(&dir.to_string_lossy());
        format!("{}/*.{}", escaped.trim_end_matches('/'), self.extension)
    }

    /// Whether a file stem names a layout fragment
    pub fn is_layout(&self, stem: &str) -> bool {
        self.layouts.iter().any(|l| l == stem)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
