//! Site configuration for sitenav.
//!
//! Parses the declarative site settings (`sitenav.toml`, or a `.json` file
//! with the same shape) and resolves them into an immutable [`Config`]:
//! site title, base path, head tags and one [`LocaleConfig`] per locale
//! with its nav bar and sidebar roots.
//!
//! All structural problems (duplicated locale prefix, missing default
//! locale, duplicated sidebar page, malformed nav entry) are reported as
//! [`ConfigError`] at load time. Nothing is validated lazily.
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `title`, `base`, `themeConfig.logo`.

mod expand;
mod locale;
mod nav;
mod raw;

use std::path::{Path, PathBuf};

pub use locale::{LocaleConfig, LocaleMetadata, UpdatePopup};
pub use nav::{
    LinkTarget, NavDropdown, NavEntry, NavLink, SidebarGroup, SidebarNode, SidebarPage,
    SidebarRoot, normalize_prefix,
};

use raw::{ConfigRaw, PortRaw};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Port used when the declaration has none.
const DEFAULT_PORT: u16 = 8080;

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override dev server port.
    pub port: Option<u16>,
    /// Override base path.
    pub base: Option<String>,
}

/// Element declared for the page `<head>`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct HeadTag {
    /// Element name (e.g. `link`).
    pub tag: String,
    /// Attributes in declared order.
    pub attributes: Vec<(String, String)>,
}

/// Resolved site configuration.
///
/// Built once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct Config {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Base path the site is deployed under (e.g. `/frontend-summary/`).
    pub base: String,
    /// Dev server port.
    pub port: u16,
    /// Extra `<head>` elements.
    pub head: Vec<HeadTag>,
    /// Logo shown in the nav bar.
    pub logo: Option<String>,
    /// Locales in declaration order. Exactly one has prefix `/`.
    pub locales: Vec<LocaleConfig>,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            base: "/".to_owned(),
            port: DEFAULT_PORT,
            head: Vec::new(),
            logo: None,
            locales: vec![LocaleConfig::fallback("", "")],
            config_path: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// A locale prefix is declared more than once.
    #[error("Duplicate locale prefix: {prefix}")]
    DuplicateLocale {
        /// Normalized prefix (e.g. `/zh/`).
        prefix: String,
    },
    /// No locale is declared for `/`.
    #[error("Default locale '/' is missing")]
    MissingDefaultLocale,
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`base`").
        field: String,
        /// Error message (e.g., "${`SITE_BASE`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents,
    /// falling back to [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the declaration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse and resolve a TOML declaration.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: ConfigRaw = toml::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Parse and resolve a JSON declaration.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let raw: ConfigRaw = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Locale registered for the default prefix `/`.
    ///
    /// `None` only for a hand-built `Config` without locales; loading always
    /// yields a `/` locale.
    #[must_use]
    pub fn default_locale(&self) -> Option<&LocaleConfig> {
        self.locales.iter().find(|l| l.metadata.is_default())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(port) = settings.port {
            self.port = port;
        }
        if let Some(base) = &settings.base {
            self.base.clone_from(base);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    ///
    /// Files with a `.json` extension are parsed as JSON, anything else as TOML.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        config.config_path = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            locales = config.locales.len(),
            "Loaded site configuration"
        );

        Ok(config)
    }

    /// Expand, resolve and validate a parsed declaration.
    fn from_raw(mut raw: ConfigRaw) -> Result<Self, ConfigError> {
        Self::expand_env_vars(&mut raw)?;

        let locales = locale::resolve_locales(&raw)?;
        let port = match raw.port {
            None => DEFAULT_PORT,
            Some(PortRaw::Number(port)) => port,
            Some(PortRaw::Text(ref text)) => text.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("port must be a number, got '{text}'"))
            })?,
        };
        let head = raw
            .head
            .into_iter()
            .map(|tag| HeadTag {
                tag: tag.0,
                attributes: tag.1,
            })
            .collect();

        let config = Self {
            title: raw.title,
            description: raw.description,
            base: raw.base.unwrap_or_else(|| "/".to_owned()),
            port,
            head,
            logo: raw.theme_config.logo,
            locales,
            config_path: None,
        };
        config.validate()?;

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(raw: &mut ConfigRaw) -> Result<(), ConfigError> {
        raw.title = expand::expand_env(&raw.title, "title")?;
        expand::expand_opt(&mut raw.base, "base")?;
        expand::expand_opt(&mut raw.theme_config.logo, "themeConfig.logo")?;
        Ok(())
    }

    /// Validate site-wide values.
    ///
    /// Locale and navigation structure is checked during resolution; this
    /// covers the scalar settings that CLI overrides can change.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation("port cannot be 0".to_owned()));
        }
        if !self.base.starts_with('/') || !self.base.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "base must start and end with '/', got '{}'",
                self.base
            )));
        }
        for tag in &self.head {
            if tag.tag.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "head entries need a tag name".to_owned(),
                ));
            }
        }
        Ok(())
    }
}
