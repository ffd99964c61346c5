//! Locale resolution and navigation lookup for sitenav.
//!
//! This crate provides:
//! - [`LocaleResolver`]: longest-prefix mapping from request path to locale
//! - [`ContentTree`]: per-locale nav bars and sidebars
//! - [`Site`]: both of the above plus page-level queries for the renderer
//!
//! Every lookup is a total function over data loaded once at startup:
//! unknown paths fall back to the default locale and to an empty sidebar.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use sitenav_site::Site;
//!
//! let site = Site::load(Some(Path::new("sitenav.toml")))?;
//!
//! // Nav bar of the Chinese locale
//! let nav = site.content().nav_for("zh");
//!
//! // Everything needed to draw a page shell
//! let page = site.page("/zh/guide/nestjs/introduction");
//! # Ok(())
//! # }
//! ```

mod content;
mod locale;
mod site;

pub use content::{BreadcrumbItem, ContentTree, PageNeighbors};
pub use locale::LocaleResolver;
pub use site::{LocaleLink, PageContext, Site};

// Re-export the navigation model for convenience
pub use sitenav_config::{
    Config, ConfigError, LinkTarget, LocaleMetadata, NavEntry, SidebarNode, SidebarPage,
};
