//! Per-locale nav bars and sidebar trees.
//!
//! # Architecture
//!
//! Each locale keeps its nav bar and its sidebar roots exactly as declared.
//! Sidebar lookup picks the longest root prefix of the request path, so
//! `/zh/guide/nestjs/introduction` gets the `/zh/guide/` sidebar even when
//! a `/zh/` root is declared too. Lookups go through an index ordered by
//! prefix length; the declared nodes themselves are never reordered.

use std::collections::HashMap;

use serde::Serialize;
use sitenav_config::{Config, NavEntry, SidebarNode, SidebarPage, SidebarRoot, normalize_prefix};

use crate::locale::{clean_path, has_prefix};

/// Previous and next pages in sidebar reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageNeighbors<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<&'a SidebarPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'a SidebarPage>,
}

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Link target path, if the group links to a page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug)]
struct LocaleContent {
    nav: Vec<NavEntry>,
    sidebars: Vec<SidebarRoot>,
    /// Indices into `sidebars`, longest prefix first.
    by_length: Vec<usize>,
}

/// Nav bars and sidebars of every locale.
#[derive(Debug)]
pub struct ContentTree {
    locales: HashMap<String, LocaleContent>,
}

impl ContentTree {
    /// Build the tree from loaded configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let locales = config
            .locales
            .iter()
            .map(|locale| {
                let sidebars = locale.sidebar.clone();
                let mut by_length: Vec<usize> = (0..sidebars.len()).collect();
                by_length.sort_by_key(|&i| std::cmp::Reverse(sidebars[i].prefix.len()));

                let content = LocaleContent {
                    nav: locale.nav.clone(),
                    sidebars,
                    by_length,
                };
                (locale.metadata.prefix.clone(), content)
            })
            .collect();

        Self { locales }
    }

    /// Nav bar of a locale, regardless of path.
    ///
    /// `locale` is a prefix (`/zh/`) or bare id (`zh`). Unknown locales get
    /// an empty nav bar.
    #[must_use]
    pub fn nav_for(&self, locale: &str) -> &[NavEntry] {
        self.content(locale).map(|c| c.nav.as_slice()).unwrap_or(&[])
    }

    /// Sidebar applying to `request_path` within a locale.
    ///
    /// Returns the nodes of the longest sidebar root that prefixes the path,
    /// in declared order. Returns an empty slice when no root applies; the
    /// page then renders without a sidebar.
    #[must_use]
    pub fn sidebar_for(&self, locale: &str, request_path: &str) -> &[SidebarNode] {
        self.sidebar_root_for(locale, request_path)
            .map(|root| root.nodes.as_slice())
            .unwrap_or(&[])
    }

    /// Sidebar root applying to `request_path` within a locale.
    #[must_use]
    pub fn sidebar_root_for(&self, locale: &str, request_path: &str) -> Option<&SidebarRoot> {
        let content = self.content(locale)?;
        let path = clean_path(request_path);

        let root = content
            .by_length
            .iter()
            .map(|&i| &content.sidebars[i])
            .find(|root| has_prefix(&path, &root.prefix));

        if root.is_none() {
            tracing::debug!(locale, path = %path, "No sidebar root matches path");
        }
        root
    }

    /// Sidebar pages around `request_path` flattened into reading order.
    ///
    /// Group headings are skipped; external links are not pages.
    #[must_use]
    pub fn pages(&self, locale: &str, request_path: &str) -> Vec<&SidebarPage> {
        let mut pages = Vec::new();
        flatten(self.sidebar_for(locale, request_path), &mut pages);
        pages
    }

    /// Previous and next pages of `request_path` in its sidebar.
    ///
    /// Both are `None` when the path is not a sidebar page.
    #[must_use]
    pub fn neighbors(&self, locale: &str, request_path: &str) -> PageNeighbors<'_> {
        let pages = self.pages(locale, request_path);
        let cleaned = clean_path(request_path);
        let key = page_key(&cleaned);

        let Some(idx) = pages.iter().position(|p| page_key(&p.path) == key) else {
            return PageNeighbors::default();
        };

        PageNeighbors {
            prev: idx.checked_sub(1).map(|i| pages[i]),
            next: pages.get(idx + 1).copied(),
        }
    }

    /// Titles of the sidebar groups enclosing `request_path`, outermost first.
    ///
    /// Empty when the path is not a sidebar page or sits at the top level.
    #[must_use]
    pub fn trail(&self, locale: &str, request_path: &str) -> Vec<BreadcrumbItem> {
        let cleaned = clean_path(request_path);
        let key = page_key(&cleaned);
        let mut groups = Vec::new();
        if find_trail(self.sidebar_for(locale, request_path), key, &mut groups) {
            groups
        } else {
            Vec::new()
        }
    }

    fn content(&self, locale: &str) -> Option<&LocaleContent> {
        self.locales.get(&normalize_prefix(locale))
    }
}

fn flatten<'a>(nodes: &'a [SidebarNode], out: &mut Vec<&'a SidebarPage>) {
    for node in nodes {
        match node {
            SidebarNode::Page(page) if page.path.starts_with('/') => out.push(page),
            SidebarNode::Page(_) => {}
            SidebarNode::Group(group) => flatten(&group.children, out),
        }
    }
}

/// Depth-first search for `key`, pushing enclosing groups on the way down.
fn find_trail(nodes: &[SidebarNode], key: &str, groups: &mut Vec<BreadcrumbItem>) -> bool {
    for node in nodes {
        match node {
            SidebarNode::Page(page) => {
                if page_key(&page.path) == key {
                    return true;
                }
            }
            SidebarNode::Group(group) => {
                if group.path.as_deref().is_some_and(|p| page_key(p) == key) {
                    return true;
                }
                groups.push(BreadcrumbItem {
                    title: group.title.clone(),
                    path: group.path.clone(),
                });
                if find_trail(&group.children, key, groups) {
                    return true;
                }
                groups.pop();
            }
        }
    }
    false
}

/// Comparable form of a page path.
///
/// `/guide/ci`, `/guide/ci/`, `/guide/ci.html` and `/guide/ci/index.html`
/// all map to `/guide/ci`.
fn page_key(path: &str) -> &str {
    let path = path
        .strip_suffix("index.html")
        .or_else(|| path.strip_suffix(".html"))
        .or_else(|| path.strip_suffix(".md"))
        .unwrap_or(path);
    path.strip_suffix('/').unwrap_or(path)
}
