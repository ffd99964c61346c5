//! Per-locale settings.
//!
//! Locale metadata is declared in two places: `locales` (language tag, title,
//! description) and `themeConfig.locales` (selector label, UI strings, nav
//! and sidebar). Both are keyed by path prefix and are merged here into one
//! [`LocaleConfig`] per locale.

use std::collections::HashSet;

use serde::Serialize;

use crate::ConfigError;
use crate::nav::{NavEntry, SidebarRoot, normalize_prefix, resolve_nav, resolve_sidebar};
use crate::raw::{ConfigRaw, LocaleRaw, ThemeLocaleRaw};

/// Language tag used for the default locale when none is declared.
const DEFAULT_LANG: &str = "en-US";

/// Display metadata of one locale. Immutable after load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleMetadata {
    /// Path prefix identifying the locale (`/` or `/zh/`).
    pub prefix: String,
    /// BCP 47 language tag (e.g. `zh-CN`).
    pub lang: String,
    /// Site title shown for this locale.
    pub title: String,
    /// Site description for this locale.
    pub description: String,
    /// Label of this locale in the language selector.
    pub label: String,
    /// Title of the language selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_text: Option<String>,
    /// Accessible label of the language selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    /// Text of the "edit this page" link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link_text: Option<String>,
    /// Prompt shown when the service worker finds new content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_popup: Option<UpdatePopup>,
}

impl LocaleMetadata {
    /// Short identifier: the prefix without slashes (`zh`), empty for `/`.
    #[must_use]
    pub fn id(&self) -> &str {
        self.prefix.trim_matches('/')
    }

    /// Whether this is the default (`/`) locale.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.prefix == "/"
    }
}

/// Service worker update prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePopup {
    pub message: String,
    pub button_text: String,
}

/// Fully resolved settings of one locale.
#[derive(Clone, Debug, PartialEq)]
pub struct LocaleConfig {
    /// Display metadata.
    pub metadata: LocaleMetadata,
    /// Nav bar in declared order.
    pub nav: Vec<NavEntry>,
    /// Sidebar roots in declared order.
    pub sidebar: Vec<SidebarRoot>,
    /// Search service options, passed through untouched.
    pub algolia: Option<serde_json::Value>,
}

impl LocaleConfig {
    /// Default locale of a site without a `locales` section.
    #[must_use]
    pub fn fallback(title: &str, description: &str) -> Self {
        Self {
            metadata: LocaleMetadata {
                prefix: "/".to_owned(),
                lang: DEFAULT_LANG.to_owned(),
                title: title.to_owned(),
                description: description.to_owned(),
                label: DEFAULT_LANG.to_owned(),
                select_text: None,
                aria_label: None,
                edit_link_text: None,
                update_popup: None,
            },
            nav: Vec::new(),
            sidebar: Vec::new(),
            algolia: None,
        }
    }
}

/// Resolve the declared locales, merging theme settings into each.
///
/// Fails when a prefix is declared twice, when the default locale is
/// missing, or when theme settings name an undeclared locale.
pub(crate) fn resolve_locales(raw: &ConfigRaw) -> Result<Vec<LocaleConfig>, ConfigError> {
    let declared: Vec<(String, &LocaleRaw)> = if raw.locales.is_empty() {
        vec![("/".to_owned(), &EMPTY_LOCALE)]
    } else {
        raw.locales
            .iter()
            .map(|(prefix, locale)| (normalize_prefix(prefix), locale))
            .collect()
    };

    let mut seen = HashSet::new();
    for (prefix, _) in &declared {
        if !seen.insert(prefix.as_str()) {
            return Err(ConfigError::DuplicateLocale {
                prefix: prefix.clone(),
            });
        }
    }
    if !seen.contains("/") {
        return Err(ConfigError::MissingDefaultLocale);
    }

    let theme_locales = theme_locales(raw, &seen)?;

    declared
        .iter()
        .map(|(prefix, locale)| {
            let theme = theme_locales
                .iter()
                .find(|(p, _)| p == prefix)
                .map(|(_, t)| *t);
            resolve_locale(raw, prefix, locale, theme)
        })
        .collect()
}

static EMPTY_LOCALE: LocaleRaw = LocaleRaw {
    lang: None,
    title: None,
    description: None,
};

fn theme_locales<'a>(
    raw: &'a ConfigRaw,
    declared: &HashSet<&str>,
) -> Result<Vec<(String, &'a ThemeLocaleRaw)>, ConfigError> {
    let mut resolved: Vec<(String, &ThemeLocaleRaw)> =
        Vec::with_capacity(raw.theme_config.locales.len());

    for (prefix, theme) in &raw.theme_config.locales {
        let prefix = normalize_prefix(prefix);
        if !declared.contains(prefix.as_str()) {
            return Err(ConfigError::Validation(format!(
                "themeConfig.locales references undeclared locale {prefix}"
            )));
        }
        if resolved.iter().any(|(p, _)| *p == prefix) {
            return Err(ConfigError::Validation(format!(
                "themeConfig.locales declares {prefix} more than once"
            )));
        }
        resolved.push((prefix, theme));
    }

    Ok(resolved)
}

fn resolve_locale(
    raw: &ConfigRaw,
    prefix: &str,
    locale: &LocaleRaw,
    theme: Option<&ThemeLocaleRaw>,
) -> Result<LocaleConfig, ConfigError> {
    let lang = locale
        .lang
        .clone()
        .unwrap_or_else(|| DEFAULT_LANG.to_owned());
    let label = theme
        .and_then(|t| t.label.clone())
        .unwrap_or_else(|| lang.clone());

    let metadata = LocaleMetadata {
        prefix: prefix.to_owned(),
        title: locale.title.clone().unwrap_or_else(|| raw.title.clone()),
        description: locale
            .description
            .clone()
            .unwrap_or_else(|| raw.description.clone()),
        label,
        lang,
        select_text: theme.and_then(|t| t.select_text.clone()),
        aria_label: theme.and_then(|t| t.aria_label.clone()),
        edit_link_text: theme.and_then(|t| t.edit_link_text.clone()),
        update_popup: theme
            .and_then(|t| t.service_worker.as_ref())
            .and_then(|sw| sw.update_popup.as_ref())
            .map(|popup| UpdatePopup {
                message: popup.message.clone(),
                button_text: popup.button_text.clone(),
            }),
    };

    // Per-locale nav and sidebar replace the top-level ones entirely.
    let nav = match theme.and_then(|t| t.nav.as_ref()).or(raw.theme_config.nav.as_ref()) {
        Some(entries) => resolve_nav(entries, prefix)?,
        None => Vec::new(),
    };
    let sidebar = match theme
        .and_then(|t| t.sidebar.as_ref())
        .or(raw.theme_config.sidebar.as_ref())
    {
        Some(sidebar) => resolve_sidebar(sidebar, prefix)?,
        None => Vec::new(),
    };

    Ok(LocaleConfig {
        metadata,
        nav,
        sidebar,
        algolia: theme.and_then(|t| t.algolia.clone()),
    })
}
