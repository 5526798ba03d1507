use serde::{Deserialize, Serialize};

use crate::components::{Component, ComponentSummary};
use crate::script::Script;
use crate::style::{GlobalStyles, Scalar, Style};
use crate::validator;
use crate::error::ValidationError;

/// Aggregate root: a component tree plus everything the exported document needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct App {
    pub title: String,
    pub description: String,
    pub author: String,
    pub keywords: Vec<String>,
    pub language: String,
    pub favicon: String,
    pub icon: String,
    pub apple_touch_icon: String,
    pub manifest: String,
    pub theme_color: String,
    pub background_color: String,
    pub robots: String,
    pub canonical_url: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub pwa: Pwa,
    pub config: AppConfig,
    pub root: Option<Component>,
    pub scripts: Vec<Script>,
    pub global_styles: GlobalStyles,
}

impl Default for App {
    fn default() -> Self {
        Self::new("Dars App")
    }
}

/// Open Graph fields. Title and description fall back to the app's own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpenGraph {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
    pub site_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwitterCard {
    pub card: String,
    pub site: String,
    pub creator: String,
}

impl Default for TwitterCard {
    fn default() -> Self {
        Self {
            card: "summary".to_string(),
            site: String::new(),
            creator: String::new(),
        }
    }
}

/// Progressive web app settings. Names fall back to the app title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Pwa {
    pub enabled: bool,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub display: String,
    pub orientation: String,
}

impl Default for Pwa {
    fn default() -> Self {
        Self {
            enabled: false,
            name: None,
            short_name: None,
            display: "standalone".to_string(),
            orientation: "portrait".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub viewport: Viewport,
    pub theme: String,
    pub responsive: bool,
    pub charset: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            theme: "light".to_string(),
            responsive: true,
            charset: "UTF-8".to_string(),
        }
    }
}

/// Viewport descriptor entries in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Viewport(Style);

impl Default for Viewport {
    fn default() -> Self {
        Viewport(
            Style::new()
                .with("width", "device-width")
                .with("initial_scale", 1.0)
                .with("user_scalable", "yes"),
        )
    }
}

impl Viewport {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.0.set(key, value);
        self
    }

    /// `content` value of the viewport meta tag.
    pub fn to_content(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| {
                let key = match key {
                    "initial_scale" => "initial-scale".to_string(),
                    "user_scalable" => "user-scalable".to_string(),
                    other => other.replace('_', "-"),
                };
                format!("{}={}", key, value)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Tree and registry counts, as reported by `dars info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppStats {
    pub total_components: usize,
    /// Deepest level of the tree; the root alone is depth 0.
    pub max_depth: usize,
    pub scripts_count: usize,
    pub global_styles_count: usize,
}

impl App {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            author: String::new(),
            keywords: Vec::new(),
            language: "es".to_string(),
            favicon: String::new(),
            icon: String::new(),
            apple_touch_icon: String::new(),
            manifest: String::new(),
            theme_color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
            robots: "index, follow".to_string(),
            canonical_url: String::new(),
            open_graph: OpenGraph::default(),
            twitter: TwitterCard::default(),
            pwa: Pwa::default(),
            config: AppConfig::default(),
            root: None,
            scripts: Vec::new(),
            global_styles: GlobalStyles::default(),
        }
    }

    pub fn set_root(&mut self, root: Component) {
        self.root = Some(root);
    }

    pub fn add_script(&mut self, script: Script) {
        self.scripts.push(script);
    }

    /// Registering a selector again replaces its rules in place.
    pub fn add_global_style(&mut self, selector: impl Into<String>, style: Style) {
        self.global_styles.insert(selector, style);
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.config.theme = theme.into();
    }

    pub fn set_favicon(&mut self, path: impl Into<String>) {
        self.favicon = path.into();
    }

    pub fn set_icon(&mut self, path: impl Into<String>) {
        self.icon = path.into();
    }

    pub fn set_apple_touch_icon(&mut self, path: impl Into<String>) {
        self.apple_touch_icon = path.into();
    }

    pub fn set_manifest(&mut self, path: impl Into<String>) {
        self.manifest = path.into();
    }

    pub fn add_keyword(&mut self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
    }

    pub fn add_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for keyword in keywords {
            self.add_keyword(keyword);
        }
    }

    /// Merge Open Graph fields; only the fields that are set overwrite.
    pub fn set_open_graph(&mut self, og: OpenGraph) {
        let current = &mut self.open_graph;
        let fields = [
            (&mut current.title, og.title),
            (&mut current.description, og.description),
            (&mut current.image, og.image),
            (&mut current.url, og.url),
            (&mut current.og_type, og.og_type),
            (&mut current.site_name, og.site_name),
        ];
        for (slot, value) in fields {
            if value.is_some() {
                *slot = value;
            }
        }
    }

    /// Empty `site` or `creator` keep their previous values.
    pub fn set_twitter_card(&mut self, card: impl Into<String>, site: &str, creator: &str) {
        self.twitter.card = card.into();
        if !site.is_empty() {
            self.twitter.site = site.to_string();
        }
        if !creator.is_empty() {
            self.twitter.creator = creator.to_string();
        }
    }

    pub fn enable_pwa(&mut self, name: Option<&str>, short_name: Option<&str>, display: &str) {
        self.pwa.enabled = true;
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            self.pwa.name = Some(name.to_string());
        }
        if let Some(short) = short_name.filter(|n| !n.is_empty()) {
            self.pwa.short_name = Some(short.to_string());
        }
        self.pwa.display = display.to_string();
    }

    pub fn set_theme_colors(&mut self, theme_color: impl Into<String>, background_color: Option<&str>) {
        self.theme_color = theme_color.into();
        if let Some(bg) = background_color.filter(|c| !c.is_empty()) {
            self.background_color = bg.to_string();
        }
    }

    pub fn pwa_name(&self) -> &str {
        self.pwa.name.as_deref().unwrap_or(&self.title)
    }

    /// Explicit short name, or the first 12 characters of the title.
    pub fn pwa_short_name(&self) -> String {
        match &self.pwa.short_name {
            Some(short) => short.clone(),
            None => self.title.chars().take(12).collect(),
        }
    }

    /// `<meta name=...>` pairs in document order; empty values are skipped.
    pub fn meta_tags(&self) -> Vec<(&'static str, String)> {
        let mut tags = Vec::new();
        let mut push = |name: &'static str, value: String| {
            if !value.is_empty() {
                tags.push((name, value));
            }
        };

        push("description", self.description.clone());
        push("author", self.author.clone());
        push("keywords", self.keywords.join(", "));
        push("robots", self.robots.clone());
        push("viewport", self.config.viewport.to_content());
        push("theme-color", self.theme_color.clone());
        if self.pwa.enabled {
            push("mobile-web-app-capable", "yes".to_string());
            push("apple-mobile-web-app-capable", "yes".to_string());
            push("apple-mobile-web-app-status-bar-style", "default".to_string());
            push("apple-mobile-web-app-title", self.pwa_short_name());
        }
        tags
    }

    /// `og:*` pairs: title, description, image, url, type, site name.
    pub fn open_graph_tags(&self) -> Vec<(&'static str, String)> {
        let og = &self.open_graph;
        let candidates = [
            ("og:title", og.title.as_deref().unwrap_or(&self.title)),
            (
                "og:description",
                og.description.as_deref().unwrap_or(&self.description),
            ),
            ("og:image", og.image.as_deref().unwrap_or_default()),
            ("og:url", og.url.as_deref().unwrap_or_default()),
            ("og:type", og.og_type.as_deref().unwrap_or("website")),
            ("og:site_name", og.site_name.as_deref().unwrap_or_default()),
        ];
        non_empty(candidates)
    }

    pub fn twitter_tags(&self) -> Vec<(&'static str, String)> {
        non_empty([
            ("twitter:card", self.twitter.card.as_str()),
            ("twitter:site", self.twitter.site.as_str()),
            ("twitter:creator", self.twitter.creator.as_str()),
        ])
    }

    /// Accumulated validation problems; empty when the app can be exported.
    pub fn validate(&self) -> Vec<ValidationError> {
        validator::validate(self)
    }

    pub fn stats(&self) -> AppStats {
        let (total_components, max_depth) = match &self.root {
            Some(root) => (root.count(), root.max_depth()),
            None => (0, 0),
        };
        AppStats {
            total_components,
            max_depth,
            scripts_count: self.scripts.len(),
            global_styles_count: self.global_styles.len(),
        }
    }

    pub fn find_component_by_id(&self, id: &str) -> Option<&Component> {
        self.root.as_ref()?.find_by_id(id)
    }

    pub fn find_component_by_id_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.root.as_mut()?.find_by_id_mut(id)
    }

    /// Parent of the component with `id`; `None` for the root or an unknown id.
    pub fn parent_of(&self, id: &str) -> Option<&Component> {
        self.root.as_ref()?.find_parent_of(id)
    }

    pub fn component_tree(&self) -> Option<ComponentSummary<'_>> {
        self.root.as_ref().map(Component::summary)
    }
}

fn non_empty<const N: usize>(candidates: [(&'static str, &str); N]) -> Vec<(&'static str, String)> {
    candidates
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (name, value.to_string()))
        .collect()
}
