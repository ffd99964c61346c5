//! Locale resolution by URL path prefix.

use sitenav_config::{Config, LocaleConfig, LocaleMetadata, normalize_prefix};

/// Maps request paths to locales.
///
/// The longest configured prefix of the request path wins, regardless of
/// declaration order. Paths matching no prefix get the default locale, so
/// resolution never fails.
#[derive(Debug)]
pub struct LocaleResolver {
    /// Locales in declaration order.
    locales: Vec<LocaleMetadata>,
    /// Indices into `locales`, longest prefix first.
    by_length: Vec<usize>,
    /// Index of the `/` locale. `locales` is never empty.
    default: usize,
}

impl LocaleResolver {
    /// Build the resolver from loaded configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut locales: Vec<LocaleMetadata> = config
            .locales
            .iter()
            .map(|l| l.metadata.clone())
            .collect();
        if locales.is_empty() {
            tracing::debug!("No locales configured, using the default locale");
            locales.push(LocaleConfig::fallback(&config.title, &config.description).metadata);
        }

        let mut by_length: Vec<usize> = (0..locales.len()).collect();
        // Stable sort keeps declaration order among equal lengths.
        by_length.sort_by_key(|&i| std::cmp::Reverse(locales[i].prefix.len()));

        let default = locales.iter().position(LocaleMetadata::is_default).unwrap_or(0);

        Self {
            locales,
            by_length,
            default,
        }
    }

    /// Resolve the locale of a request path.
    ///
    /// Query strings and fragments are ignored. A path equal to a prefix
    /// without its trailing slash (`/zh`) belongs to that prefix.
    #[must_use]
    pub fn resolve(&self, request_path: &str) -> &LocaleMetadata {
        let path = clean_path(request_path);
        self.by_length
            .iter()
            .map(|&i| &self.locales[i])
            .find(|locale| has_prefix(&path, &locale.prefix))
            .unwrap_or_else(|| self.default_locale())
    }

    /// Look a locale up by prefix (`/zh/`) or bare id (`zh`, `""` for default).
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&LocaleMetadata> {
        let prefix = normalize_prefix(locale);
        self.locales.iter().find(|l| l.prefix == prefix)
    }

    /// Default (`/`) locale.
    #[must_use]
    pub fn default_locale(&self) -> &LocaleMetadata {
        &self.locales[self.default]
    }

    /// All locales in declaration order.
    #[must_use]
    pub fn locales(&self) -> &[LocaleMetadata] {
        &self.locales
    }
}

/// Strip query and fragment, and make the path absolute.
pub(crate) fn clean_path(request_path: &str) -> String {
    let end = request_path.find(['?', '#']).unwrap_or(request_path.len());
    let path = &request_path[..end];
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

/// Whether `path` lies under `prefix` (a prefix always ends with `/`).
pub(crate) fn has_prefix(path: &str, prefix: &str) -> bool {
    path.starts_with(prefix) || prefix.strip_suffix('/') == Some(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolver(json: &str) -> LocaleResolver {
        LocaleResolver::new(&Config::from_json_str(json).unwrap())
    }

    fn two_locales() -> LocaleResolver {
        resolver(r#"{"locales": {"/": {"lang": "en-US"}, "/zh/": {"lang": "zh-CN"}}}"#)
    }

    #[test]
    fn test_longest_prefix_wins() {
        let resolver = two_locales();

        assert_eq!(resolver.resolve("/zh/guide/ci").prefix, "/zh/");
        assert_eq!(resolver.resolve("/zh/guide/nestjs/introduction").lang, "zh-CN");
    }

    #[test]
    fn test_longest_prefix_beats_declaration_order() {
        let forward = resolver(
            r#"{"locales": {"/": {}, "/zh/": {"lang": "zh-CN"}, "/zh/tw/": {"lang": "zh-TW"}}}"#,
        );
        assert_eq!(forward.resolve("/zh/tw/guide").lang, "zh-TW");

        let reversed = resolver(
            r#"{"locales": {"/zh/tw/": {"lang": "zh-TW"}, "/zh/": {"lang": "zh-CN"}, "/": {}}}"#,
        );
        assert_eq!(reversed.resolve("/zh/tw/guide").lang, "zh-TW");
        assert_eq!(reversed.resolve("/zh/guide").lang, "zh-CN");
    }

    #[test]
    fn test_unmatched_paths_fall_back_to_default() {
        let resolver = two_locales();

        for path in ["", "/", "/guide/", "/zhx/", "relative/path", "?q=1", "/fr/"] {
            assert_eq!(resolver.resolve(path).prefix, "/", "path {path:?}");
        }
    }

    #[test]
    fn test_empty_locale_list_still_resolves() {
        let mut config = Config::from_json_str(r#"{"title": "docs"}"#).unwrap();
        config.locales.clear();

        let resolver = LocaleResolver::new(&config);

        assert_eq!(resolver.resolve("/zh/").prefix, "/");
        assert_eq!(resolver.default_locale().title, "docs");
        assert_eq!(resolver.locales().len(), 1);
    }

    #[test]
    fn test_prefix_without_trailing_slash_matches() {
        let resolver = two_locales();
        assert_eq!(resolver.resolve("/zh").prefix, "/zh/");
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let resolver = two_locales();
        assert_eq!(resolver.resolve("/zh/basics/css?lang=en#intro").prefix, "/zh/");
        assert_eq!(resolver.resolve("/guide#/zh/").prefix, "/");
    }

    #[test]
    fn test_get_by_prefix_or_id() {
        let resolver = two_locales();

        assert_eq!(resolver.get("zh").unwrap().lang, "zh-CN");
        assert_eq!(resolver.get("/zh/").unwrap().lang, "zh-CN");
        assert_eq!(resolver.get("").unwrap().prefix, "/");
        assert!(resolver.get("fr").is_none());
    }

    #[test]
    fn test_locales_in_declaration_order() {
        let resolver = two_locales();
        let prefixes: Vec<&str> = resolver.locales().iter().map(|l| l.prefix.as_str()).collect();
        assert_eq!(prefixes, ["/", "/zh/"]);
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("zh/guide"), "/zh/guide");
        assert_eq!(clean_path("/zh/?a=b"), "/zh/");
        assert_eq!(clean_path(""), "/");
    }

    #[test]
    fn test_has_prefix() {
        assert!(has_prefix("/zh/guide", "/zh/"));
        assert!(has_prefix("/zh", "/zh/"));
        assert!(!has_prefix("/zhx", "/zh/"));
        assert!(has_prefix("/anything", "/"));
    }
}
