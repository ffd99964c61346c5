//! `sitenav nav` command implementation.

use std::path::PathBuf;

use clap::Args;
use sitenav_site::Site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Locale prefix or id (e.g. `/zh/` or `zh`; default: the `/` locale).
    locale: Option<String>,

    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the locale
    /// is not declared.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = Site::load(self.config.as_deref())?;

        let json = render(&site, self.locale.as_deref().unwrap_or("/"))?;
        output.data(&json)?;
        Ok(())
    }
}

fn render(site: &Site, locale: &str) -> Result<String, CliError> {
    // The library treats unknown locales as empty; here a typo deserves an error.
    let metadata = site
        .locales()
        .get(locale)
        .ok_or_else(|| CliError::Validation(format!("Unknown locale: {locale}")))?;

    let nav = site.content().nav_for(&metadata.prefix);
    Ok(serde_json::to_string_pretty(nav)?)
}
