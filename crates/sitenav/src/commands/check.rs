//! `sitenav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config, NavEntry, SidebarNode};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,

    /// Base path to validate instead of the configured one.
    #[arg(long)]
    base: Option<String>,

    /// Dev server port to validate instead of the configured one.
    #[arg(short, long)]
    port: Option<u16>,
}

/// Counts reported for one locale.
#[derive(Debug, PartialEq, Eq)]
struct LocaleSummary {
    prefix: String,
    label: String,
    nav_entries: usize,
    sidebar_roots: usize,
    sidebar_pages: usize,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns the configuration error that makes the declaration invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            port: self.port,
            base: self.base,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        match &config.config_path {
            Some(path) => output.info(&format!("Configuration: {}", path.display())),
            None => output.warning("No configuration file found, using defaults"),
        }
        if !config.title.is_empty() {
            output.highlight(&config.title);
        }
        output.info(&format!("Base: {}", config.base));
        output.info(&format!("Port: {}", config.port));

        for locale in summarize(&config) {
            output.info(&format!(
                "  {} ({}): {} nav entries, {} sidebar roots, {} sidebar pages",
                locale.prefix,
                locale.label,
                locale.nav_entries,
                locale.sidebar_roots,
                locale.sidebar_pages
            ));
            if locale.nav_entries == 0 {
                output.warning(&format!("  {} has no nav bar", locale.prefix));
            }
        }

        output.success("Configuration is valid");
        Ok(())
    }
}

fn summarize(config: &Config) -> Vec<LocaleSummary> {
    config
        .locales
        .iter()
        .map(|locale| LocaleSummary {
            prefix: locale.metadata.prefix.clone(),
            label: locale.metadata.label.clone(),
            nav_entries: locale.nav.iter().map(count_nav).sum(),
            sidebar_roots: locale.sidebar.len(),
            sidebar_pages: locale
                .sidebar
                .iter()
                .map(|root| count_pages(&root.nodes))
                .sum(),
        })
        .collect()
}

/// Count an entry and everything nested under it.
fn count_nav(entry: &NavEntry) -> usize {
    1 + entry.items().iter().map(count_nav).sum::<usize>()
}

fn count_pages(nodes: &[SidebarNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            SidebarNode::Page(_) => 1,
            SidebarNode::Group(group) => {
                usize::from(group.path.is_some()) + count_pages(&group.children)
            }
        })
        .sum()
}
