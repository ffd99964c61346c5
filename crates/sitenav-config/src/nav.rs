//! Navigation bar and sidebar model.
//!
//! Declared nav entries and sidebar items come in several loose shapes
//! (bare strings, `[path, title]` pairs, tables). They are resolved here into
//! two sum types, [`NavEntry`] and [`SidebarNode`], with every sidebar path
//! made absolute against its sidebar root.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::ConfigError;
use crate::raw::{NavEntryRaw, SidebarGroupRaw, SidebarItemRaw, SidebarRaw};

/// Matches links that leave the site: any `scheme:` or protocol-relative `//`.
static EXTERNAL_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.-]*:|//)").unwrap());

/// Where a nav link points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "href", rename_all = "lowercase")]
pub enum LinkTarget {
    /// Path inside the site (e.g. `/zh/basics/`).
    Internal(String),
    /// Absolute URL (e.g. `https://github.com/tilkofjin`).
    External(String),
}

impl LinkTarget {
    /// Classify a declared link.
    #[must_use]
    pub fn parse(link: &str) -> Self {
        if EXTERNAL_LINK_RE.is_match(link) {
            Self::External(link.to_owned())
        } else {
            Self::Internal(link.to_owned())
        }
    }

    /// Link as written in the declaration.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Internal(href) | Self::External(href) => href,
        }
    }

    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// Single entry of a locale's nav bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavEntry {
    /// Plain link.
    Link(NavLink),
    /// Dropdown menu with nested entries.
    Dropdown(NavDropdown),
}

impl NavEntry {
    /// Display text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Link(link) => &link.text,
            Self::Dropdown(dropdown) => &dropdown.text,
        }
    }

    /// Nested entries (empty for plain links).
    #[must_use]
    pub fn items(&self) -> &[NavEntry] {
        match self {
            Self::Link(_) => &[],
            Self::Dropdown(dropdown) => &dropdown.items,
        }
    }
}

/// Nav bar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    /// Display text.
    pub text: String,
    /// Link target.
    pub target: LinkTarget,
    /// Browsing context to open the link in (e.g. `_self`, `_blank`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_target: Option<String>,
    /// Accessible label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
}

/// Nav bar dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavDropdown {
    /// Display text.
    pub text: String,
    /// Entries in declared order.
    pub items: Vec<NavEntry>,
    /// Accessible label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
}

/// Node of a sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarNode {
    /// Link to a content page.
    Page(SidebarPage),
    /// Titled group of nodes.
    Group(SidebarGroup),
}

/// Sidebar leaf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarPage {
    /// Absolute page path (e.g. `/zh/basics/css`).
    pub path: String,
    /// Explicit title; the renderer falls back to the page's own title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    /// Group heading.
    pub title: String,
    /// Optional page the heading links to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Whether the group can be collapsed.
    pub collapsable: bool,
    /// Children in declared order.
    pub children: Vec<SidebarNode>,
}

/// Ordered sidebar applying to every path under `prefix`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarRoot {
    /// Sidebar root, always ending with `/` (e.g. `/zh/guide/`).
    pub prefix: String,
    /// Top-level nodes in declared order.
    pub nodes: Vec<SidebarNode>,
}

/// Normalize a locale prefix or sidebar root to `/segment/` form.
///
/// `"zh"`, `"/zh"` and `"/zh/"` all become `"/zh/"`; the empty string and
/// `"/"` become `"/"`.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}/")
    }
}

/// Resolve a sidebar path against its root.
///
/// Absolute paths and external links are kept, relative ones are appended
/// to the root. A `.md` extension is dropped and `README` maps to its
/// directory.
pub(crate) fn resolve_page_path(root: &str, path: &str) -> String {
    if EXTERNAL_LINK_RE.is_match(path) {
        return path.to_owned();
    }

    let joined = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("{root}{path}")
    };
    let joined = joined.strip_suffix(".md").unwrap_or(&joined);
    match joined.strip_suffix("README") {
        Some(dir) if dir.ends_with('/') => dir.to_owned(),
        _ => joined.to_owned(),
    }
}

/// Resolve a declared nav bar.
pub(crate) fn resolve_nav(entries: &[NavEntryRaw], locale: &str) -> Result<Vec<NavEntry>, ConfigError> {
    entries.iter().map(|entry| resolve_nav_entry(entry, locale)).collect()
}

fn resolve_nav_entry(entry: &NavEntryRaw, locale: &str) -> Result<NavEntry, ConfigError> {
    if entry.text.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "nav entry in locale {locale} has empty text"
        )));
    }

    match (&entry.link, &entry.items) {
        (Some(link), None) => Ok(NavEntry::Link(NavLink {
            text: entry.text.clone(),
            target: LinkTarget::parse(link),
            window_target: entry.target.clone(),
            aria_label: entry.aria_label.clone(),
        })),
        (None, Some(items)) => Ok(NavEntry::Dropdown(NavDropdown {
            text: entry.text.clone(),
            items: resolve_nav(items, locale)?,
            aria_label: entry.aria_label.clone(),
        })),
        (Some(_), Some(_)) => Err(ConfigError::Validation(format!(
            "nav entry '{}' in locale {locale} cannot have both link and items",
            entry.text
        ))),
        (None, None) => Err(ConfigError::Validation(format!(
            "nav entry '{}' in locale {locale} needs either link or items",
            entry.text
        ))),
    }
}

/// Resolve a declared sidebar into its roots.
///
/// A plain list is rooted at the locale prefix. Page paths must be unique
/// across all roots of the locale.
pub(crate) fn resolve_sidebar(
    sidebar: &SidebarRaw,
    locale: &str,
) -> Result<Vec<SidebarRoot>, ConfigError> {
    let declared: Vec<(String, &[SidebarItemRaw])> = match sidebar {
        SidebarRaw::Items(items) => vec![(locale.to_owned(), items.as_slice())],
        SidebarRaw::Roots(roots) => roots
            .0
            .iter()
            .map(|(prefix, items)| (normalize_prefix(prefix), items.as_slice()))
            .collect(),
    };

    let mut seen_roots = HashSet::new();
    let mut seen_paths = HashSet::new();
    let mut roots = Vec::with_capacity(declared.len());

    for (prefix, items) in declared {
        if !seen_roots.insert(prefix.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate sidebar root {prefix} in locale {locale}"
            )));
        }
        if !prefix.starts_with(locale) {
            tracing::warn!(
                locale,
                root = %prefix,
                "Sidebar root lies outside its locale and will never match"
            );
        }

        let mut resolver = SidebarResolver {
            root: &prefix,
            locale,
            seen_paths: &mut seen_paths,
        };
        let nodes = resolver.resolve_items(items)?;
        roots.push(SidebarRoot { prefix, nodes });
    }

    Ok(roots)
}

struct SidebarResolver<'a> {
    root: &'a str,
    locale: &'a str,
    seen_paths: &'a mut HashSet<String>,
}

impl SidebarResolver<'_> {
    fn resolve_items(&mut self, items: &[SidebarItemRaw]) -> Result<Vec<SidebarNode>, ConfigError> {
        items.iter().map(|item| self.resolve_item(item)).collect()
    }

    fn resolve_item(&mut self, item: &SidebarItemRaw) -> Result<SidebarNode, ConfigError> {
        match item {
            SidebarItemRaw::Path(path) => Ok(SidebarNode::Page(SidebarPage {
                path: self.claim(path)?,
                title: None,
            })),
            SidebarItemRaw::Titled(path, title) => Ok(SidebarNode::Page(SidebarPage {
                path: self.claim(path)?,
                title: Some(title.clone()),
            })),
            SidebarItemRaw::Group(group) => self.resolve_group(group),
        }
    }

    fn resolve_group(&mut self, group: &SidebarGroupRaw) -> Result<SidebarNode, ConfigError> {
        if group.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "sidebar group under {} has empty title",
                self.root
            )));
        }

        let path = group.path.as_deref().map(|p| self.claim(p)).transpose()?;
        let children = self.resolve_items(&group.children)?;

        Ok(SidebarNode::Group(SidebarGroup {
            title: group.title.clone(),
            path,
            collapsable: group.collapsable.unwrap_or(true),
            children,
        }))
    }

    /// Resolve a page path and record it, rejecting repeats within the locale.
    fn claim(&mut self, path: &str) -> Result<String, ConfigError> {
        let resolved = resolve_page_path(self.root, path);
        if !self.seen_paths.insert(resolved.clone()) {
            return Err(ConfigError::Validation(format!(
                "sidebar page {resolved} appears more than once in locale {}",
                self.locale
            )));
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sidebar(json: &str) -> SidebarRaw {
        serde_json::from_str(json).unwrap()
    }

    fn nav(json: &str) -> Vec<NavEntryRaw> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/"), "/");
        assert_eq!(normalize_prefix(""), "/");
        assert_eq!(normalize_prefix("zh"), "/zh/");
        assert_eq!(normalize_prefix("/zh"), "/zh/");
        assert_eq!(normalize_prefix("/zh/"), "/zh/");
        assert_eq!(normalize_prefix("/zh/guide/"), "/zh/guide/");
    }

    #[test]
    fn test_link_target_classification() {
        assert_eq!(LinkTarget::parse("/zh/"), LinkTarget::Internal("/zh/".to_owned()));
        assert!(LinkTarget::parse("https://github.com/tilkofjin").is_external());
        assert!(LinkTarget::parse("mailto:someone@example.com").is_external());
        assert!(LinkTarget::parse("//cdn.example.com/x").is_external());
        assert!(!LinkTarget::parse("guide/nodejs/").is_external());
    }

    #[test]
    fn test_resolve_page_path() {
        assert_eq!(resolve_page_path("/zh/basics/", "css"), "/zh/basics/css");
        assert_eq!(resolve_page_path("/zh/basics/", ""), "/zh/basics/");
        assert_eq!(
            resolve_page_path("/zh/guide/", "/zh/guide/nestjs/introduction"),
            "/zh/guide/nestjs/introduction"
        );
        assert_eq!(resolve_page_path("/guide/", "setup.md"), "/guide/setup");
        assert_eq!(resolve_page_path("/guide/", "README.md"), "/guide/");
        assert_eq!(
            resolve_page_path("/guide/", "https://nestjs.com"),
            "https://nestjs.com"
        );
    }

    #[test]
    fn test_resolve_nav_link_and_dropdown() {
        let entries = nav(
            r#"[
                {"text": "首页", "link": "/zh/"},
                {"text": "进阶指南", "items": [{"text": "Nodejs", "link": "/zh/guide/nodejs/"}]},
                {"text": "Github", "link": "https://github.com/tilkofjin", "target": "_self"}
            ]"#,
        );

        let resolved = resolve_nav(&entries, "/zh/").unwrap();

        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].text(), "首页");
        assert_eq!(resolved[1].items().len(), 1);
        let NavEntry::Link(github) = &resolved[2] else {
            panic!("expected link");
        };
        assert!(github.target.is_external());
        assert_eq!(github.window_target.as_deref(), Some("_self"));
    }

    #[test]
    fn test_resolve_nav_requires_link_or_items() {
        let err = resolve_nav(&nav(r#"[{"text": "Empty"}]"#), "/").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("Empty"));

        let err = resolve_nav(
            &nav(r#"[{"text": "Both", "link": "/", "items": []}]"#),
            "/",
        )
        .unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_resolve_nav_rejects_empty_text() {
        let err = resolve_nav(&nav(r#"[{"text": " ", "link": "/"}]"#), "/zh/").unwrap_err();
        assert!(err.to_string().contains("empty text"));
    }

    #[test]
    fn test_resolve_sidebar_roots_relative_paths() {
        let raw = sidebar(r#"{"/zh/basics/": ["css", "js"]}"#);

        let roots = resolve_sidebar(&raw, "/zh/").unwrap();

        assert_eq!(
            roots,
            vec![SidebarRoot {
                prefix: "/zh/basics/".to_owned(),
                nodes: vec![
                    SidebarNode::Page(SidebarPage {
                        path: "/zh/basics/css".to_owned(),
                        title: None,
                    }),
                    SidebarNode::Page(SidebarPage {
                        path: "/zh/basics/js".to_owned(),
                        title: None,
                    }),
                ],
            }]
        );
    }

    #[test]
    fn test_resolve_sidebar_list_roots_at_locale() {
        let raw = sidebar(r#"["", "guide"]"#);

        let roots = resolve_sidebar(&raw, "/").unwrap();

        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].prefix, "/");
        let paths: Vec<_> = roots[0]
            .nodes
            .iter()
            .map(|n| match n {
                SidebarNode::Page(p) => p.path.as_str(),
                SidebarNode::Group(g) => g.title.as_str(),
            })
            .collect();
        assert_eq!(paths, ["/", "/guide"]);
    }

    #[test]
    fn test_resolve_sidebar_nested_groups_keep_order() {
        let raw = sidebar(
            r#"{"/zh/guide/": ["nodejs", {"title": "Nestjs", "children": [
                ["/zh/guide/nestjs/introduction", "介绍"],
                {"title": "概览", "collapsable": false, "children": [["/zh/guide/nestjs/overview/firstSteps", "第一步"]]}
            ]}, "ci"]}"#,
        );

        let roots = resolve_sidebar(&raw, "/zh/").unwrap();
        let nodes = &roots[0].nodes;

        assert_eq!(nodes.len(), 3);
        let SidebarNode::Group(nestjs) = &nodes[1] else {
            panic!("expected group");
        };
        assert_eq!(nestjs.title, "Nestjs");
        assert!(nestjs.collapsable);
        assert_eq!(
            nestjs.children[0],
            SidebarNode::Page(SidebarPage {
                path: "/zh/guide/nestjs/introduction".to_owned(),
                title: Some("介绍".to_owned()),
            })
        );
        let SidebarNode::Group(overview) = &nestjs.children[1] else {
            panic!("expected nested group");
        };
        assert!(!overview.collapsable);
        assert_eq!(
            nodes[2],
            SidebarNode::Page(SidebarPage {
                path: "/zh/guide/ci".to_owned(),
                title: None,
            })
        );
    }

    #[test]
    fn test_resolve_sidebar_duplicate_page_in_locale() {
        let raw = sidebar(r#"{"/zh/basics/": ["css"], "/zh/": ["basics/css"]}"#);

        let err = resolve_sidebar(&raw, "/zh/").unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("/zh/basics/css"));
    }

    #[test]
    fn test_resolve_sidebar_duplicate_root() {
        let raw = sidebar(r#"{"/zh/guide/": ["a"], "/zh/guide": ["b"]}"#);

        let err = resolve_sidebar(&raw, "/zh/").unwrap_err();

        assert!(err.to_string().contains("duplicate sidebar root /zh/guide/"));
    }

    #[test]
    fn test_resolve_sidebar_group_path_counts_as_page() {
        let raw = sidebar(r#"[{"title": "Guide", "path": "guide", "children": ["guide"]}]"#);

        let err = resolve_sidebar(&raw, "/").unwrap_err();

        assert!(err.to_string().contains("/guide"));
    }
}
