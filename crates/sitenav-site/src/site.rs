//! Whole-site navigation queries.
//!
//! [`Site`] is built once from a loaded [`Config`] and answers every
//! per-request question the page renderer needs: which locale a path belongs
//! to, its nav bar and sidebar, prev/next links and the language selector.
//!
//! # Thread Safety
//!
//! `Site` holds no interior mutability. Share it behind a plain reference or
//! an `Arc` across request handlers.
//!
//! # Example
//!
//! ```
//! use sitenav_config::Config;
//! use sitenav_site::Site;
//!
//! let config = Config::from_toml_str(r#"
//! [locales."/"]
//! lang = "en-US"
//!
//! [locales."/zh/"]
//! lang = "zh-CN"
//! "#).unwrap();
//! let site = Site::new(config);
//!
//! assert_eq!(site.resolve("/zh/guide/ci").lang, "zh-CN");
//! ```

use std::path::Path;

use serde::Serialize;
use sitenav_config::{Config, ConfigError, HeadTag, LocaleMetadata, NavEntry, SidebarNode};

use crate::content::{BreadcrumbItem, ContentTree, PageNeighbors};
use crate::locale::{LocaleResolver, clean_path, has_prefix};

/// Entry of the language selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocaleLink {
    /// Locale label (e.g. `简体中文`).
    pub label: String,
    /// Same page under the other locale's prefix.
    pub link: String,
    /// Whether this is the locale of the current page.
    pub active: bool,
}

/// Everything the renderer needs to draw the page shell around content.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext<'a> {
    /// Site-relative request path (base stripped).
    pub path: String,
    /// Locale title, falling back to the site title.
    pub title: &'a str,
    /// Locale of the page.
    pub locale: &'a LocaleMetadata,
    /// Base path the site is deployed under.
    pub base: &'a str,
    /// Extra `<head>` elements.
    pub head: &'a [HeadTag],
    /// Nav bar logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<&'a str>,
    /// Locale nav bar.
    pub nav: &'a [NavEntry],
    /// Sidebar for this path, empty when none applies.
    pub sidebar: &'a [SidebarNode],
    /// Sidebar groups enclosing the page.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trail: Vec<BreadcrumbItem>,
    /// Previous/next pages.
    pub neighbors: PageNeighbors<'a>,
    /// Language selector, empty for single-locale sites.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locales: Vec<LocaleLink>,
    /// Search service options of the locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algolia: Option<&'a serde_json::Value>,
}

/// Resolved navigation model of a site.
#[derive(Debug)]
pub struct Site {
    config: Config,
    resolver: LocaleResolver,
    content: ContentTree,
}

impl Site {
    /// Build the site from loaded configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let resolver = LocaleResolver::new(&config);
        let content = ContentTree::new(&config);

        tracing::info!(
            locales = config.locales.len(),
            sidebar_roots = config.locales.iter().map(|l| l.sidebar.len()).sum::<usize>(),
            base = %config.base,
            "Site navigation ready"
        );

        Self {
            config,
            resolver,
            content,
        }
    }

    /// Load configuration and build the site.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be loaded.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Config::load(config_path, None).map(Self::new)
    }

    /// Loaded configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Locale resolver.
    #[must_use]
    pub fn locales(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// Nav bars and sidebars.
    #[must_use]
    pub fn content(&self) -> &ContentTree {
        &self.content
    }

    /// Remove the deployment base from a request path.
    ///
    /// `/frontend-summary/zh/` becomes `/zh/` when the base is
    /// `/frontend-summary/`. Paths outside the base are returned unchanged
    /// (query and fragment removed).
    #[must_use]
    pub fn strip_base(&self, request_path: &str) -> String {
        let path = clean_path(request_path);
        let base = self.config.base.as_str();
        if base == "/" || !has_prefix(&path, base) {
            return path;
        }
        let rest = path.get(base.len()..).unwrap_or_default();
        format!("/{rest}")
    }

    /// Locale of a request path (base-aware).
    #[must_use]
    pub fn resolve(&self, request_path: &str) -> &LocaleMetadata {
        self.resolver.resolve(&self.strip_base(request_path))
    }

    /// Nav bar shown on a request path.
    #[must_use]
    pub fn nav(&self, request_path: &str) -> &[NavEntry] {
        self.content.nav_for(&self.resolve(request_path).prefix)
    }

    /// Sidebar shown on a request path.
    #[must_use]
    pub fn sidebar(&self, request_path: &str) -> &[SidebarNode] {
        let path = self.strip_base(request_path);
        let locale = self.resolver.resolve(&path);
        self.content.sidebar_for(&locale.prefix, &path)
    }

    /// Language selector entries for a request path.
    ///
    /// Each locale links to the current page with the active locale prefix
    /// swapped for its own. Empty for single-locale sites.
    #[must_use]
    pub fn locale_links(&self, request_path: &str) -> Vec<LocaleLink> {
        self.links_for(&self.strip_base(request_path))
    }

    fn links_for(&self, path: &str) -> Vec<LocaleLink> {
        let locales = self.resolver.locales();
        if locales.len() < 2 {
            return Vec::new();
        }

        let current = self.resolver.resolve(path);
        let rest = path.get(current.prefix.len()..).unwrap_or_default();

        locales
            .iter()
            .map(|locale| LocaleLink {
                label: locale.label.clone(),
                link: format!("{}{rest}", locale.prefix),
                active: locale.prefix == current.prefix,
            })
            .collect()
    }

    /// Page shell context for a request path.
    #[must_use]
    pub fn page(&self, request_path: &str) -> PageContext<'_> {
        let path = self.strip_base(request_path);
        let locale = self.resolver.resolve(&path);
        let prefix = locale.prefix.as_str();

        let algolia = self
            .config
            .locales
            .iter()
            .find(|l| l.metadata.prefix == prefix)
            .and_then(|l| l.algolia.as_ref());

        PageContext {
            title: &locale.title,
            locale,
            base: &self.config.base,
            head: &self.config.head,
            logo: self.config.logo.as_deref(),
            nav: self.content.nav_for(prefix),
            sidebar: self.content.sidebar_for(prefix, &path),
            trail: self.content.trail(prefix, &path),
            neighbors: self.content.neighbors(prefix, &path),
            locales: self.links_for(&path),
            algolia,
            path,
        }
    }
}
