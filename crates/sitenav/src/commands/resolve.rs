//! `sitenav resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use sitenav_site::Site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Request path, with or without the site base (e.g. `/zh/guide/ci`).
    path: String,

    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = Site::load(self.config.as_deref())?;

        let json = render(&site, &self.path, self.compact)?;
        output.data(&json)?;
        Ok(())
    }
}

fn render(site: &Site, path: &str, compact: bool) -> Result<String, CliError> {
    let page = site.page(path);
    tracing::info!(path, locale = %page.locale.prefix, "Resolved page");

    let json = if compact {
        serde_json::to_string(&page)?
    } else {
        serde_json::to_string_pretty(&page)?
    };
    Ok(json)
}
