//! Declaration model as parsed from TOML or JSON.
//!
//! These types mirror the settings object one-to-one (camelCase keys) and
//! carry no invariants. [`Config`](crate::Config) resolves them into the
//! validated public model.

use std::fmt;
use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

/// Top-level settings object.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ConfigRaw {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) port: Option<PortRaw>,
    pub(crate) base: Option<String>,
    pub(crate) head: Vec<HeadTagRaw>,
    #[serde(deserialize_with = "entries")]
    pub(crate) locales: Vec<(String, LocaleRaw)>,
    pub(crate) theme_config: ThemeRaw,
}

/// Port given either as a number or as a numeric string (`port: "8005"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PortRaw {
    Number(u16),
    Text(String),
}

/// `[tag, { attr = value, ... }]` pair.
#[derive(Debug, Deserialize)]
pub(crate) struct HeadTagRaw(
    pub(crate) String,
    #[serde(deserialize_with = "entries")] pub(crate) Vec<(String, String)>,
);

/// Entry of the `locales` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LocaleRaw {
    pub(crate) lang: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
}

/// `themeConfig` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ThemeRaw {
    pub(crate) logo: Option<String>,
    pub(crate) nav: Option<Vec<NavEntryRaw>>,
    pub(crate) sidebar: Option<SidebarRaw>,
    #[serde(deserialize_with = "entries")]
    pub(crate) locales: Vec<(String, ThemeLocaleRaw)>,
}

/// Entry of `themeConfig.locales`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ThemeLocaleRaw {
    pub(crate) select_text: Option<String>,
    pub(crate) label: Option<String>,
    pub(crate) aria_label: Option<String>,
    pub(crate) edit_link_text: Option<String>,
    pub(crate) service_worker: Option<ServiceWorkerRaw>,
    pub(crate) algolia: Option<serde_json::Value>,
    pub(crate) nav: Option<Vec<NavEntryRaw>>,
    pub(crate) sidebar: Option<SidebarRaw>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ServiceWorkerRaw {
    pub(crate) update_popup: Option<UpdatePopupRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePopupRaw {
    pub(crate) message: String,
    pub(crate) button_text: String,
}

/// Nav bar entry: a link when `link` is set, a dropdown when `items` is set.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct NavEntryRaw {
    pub(crate) text: String,
    pub(crate) link: Option<String>,
    pub(crate) target: Option<String>,
    pub(crate) aria_label: Option<String>,
    pub(crate) items: Option<Vec<NavEntryRaw>>,
}

/// Sidebar declaration.
///
/// A plain list applies to the whole locale; a table maps sidebar roots
/// (e.g. `/zh/guide/`) to their own lists.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SidebarRaw {
    Items(Vec<SidebarItemRaw>),
    Roots(SidebarRootsRaw),
}

#[derive(Debug, Deserialize)]
pub(crate) struct SidebarRootsRaw(
    #[serde(deserialize_with = "entries")] pub(crate) Vec<(String, Vec<SidebarItemRaw>)>,
);

/// Sidebar item in any of its declared shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SidebarItemRaw {
    /// `"css"` or `"/zh/guide/ci"`.
    Path(String),
    /// `["/zh/guide/nestjs/introduction", "介绍"]`.
    Titled(String, String),
    /// `{ title = "...", children = [...] }`.
    Group(SidebarGroupRaw),
}

#[derive(Debug, Deserialize)]
pub(crate) struct SidebarGroupRaw {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) path: Option<String>,
    #[serde(default)]
    pub(crate) collapsable: Option<bool>,
    #[serde(default)]
    pub(crate) children: Vec<SidebarItemRaw>,
}

/// Deserialize a map into its entries, keeping declaration order and
/// repeated keys so that validation can report them.
pub(crate) fn entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a table keyed by path prefix")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, V>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}
