//! Request validation and option parsing.
//!
//! Turns the raw query-parameter bag into a typed [`CardRequest`] or a
//! [`CardError`]. Layout and locale values fail loudly; everything else is
//! coerced permissively and falls back to defaults, including the
//! `lang_colors` JSON map which silently degrades to empty when malformed.

use std::collections::{HashMap, HashSet};

use crate::colors;
use crate::config::Config;
use crate::errors::CardError;
use crate::locale;

/// Recognized card layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Progress-bar rows
    #[default]
    Normal,
    /// Stacked bar with a two-column legend
    Compact,
    /// Ring chart with a legend
    Donut,
    /// Vertically stacked ring chart
    DonutVertical,
    /// Pie chart
    Pie,
}

impl Layout {
    /// Parses a layout selector. Returns `None` for unrecognized values.
    pub fn parse(value: &str) -> Option<Layout> {
        match value {
            "normal" => Some(Layout::Normal),
            "compact" => Some(Layout::Compact),
            "donut" => Some(Layout::Donut),
            "donut-vertical" => Some(Layout::DonutVertical),
            "pie" => Some(Layout::Pie),
            _ => None,
        }
    }
}

/// Validated rendering options for a language card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardOptions {
    /// Hide the card title
    pub hide_title: bool,
    /// Explicit card width in pixels, if requested
    pub card_width: Option<u32>,
    /// Title color (canonical hex)
    pub title_color: String,
    /// Body text color (canonical hex)
    pub text_color: String,
    /// Background color (canonical hex)
    pub bg_color: String,
    /// Border color (canonical hex)
    pub border_color: String,
    /// Card layout
    pub layout: Layout,
    /// Locale for the card title
    pub locale: String,
    /// Per-language color overrides
    pub lang_colors: HashMap<String, String>,
    /// Languages to exclude from display, lower-cased
    pub hide: Vec<String>,
    /// Maximum number of languages to display
    pub langs_count: usize,
    /// Whether error cards may show the repo-link affordance
    pub show_repo_link: bool,
}

const DEFAULT_TITLE_COLOR: &str = "#2f80ed";
const DEFAULT_TEXT_COLOR: &str = "#434d58";
const DEFAULT_BG_COLOR: &str = "#fffefe";
const DEFAULT_BORDER_COLOR: &str = "#e4e2e2";

/// Default number of displayed languages for the normal layout.
pub const DEFAULT_LANGS_COUNT: usize = 5;
/// Default number of displayed languages for the compact layouts.
pub const DEFAULT_COMPACT_LANGS_COUNT: usize = 6;
/// Display truncation is clamped to this many languages.
pub const MAX_LANGS_COUNT: usize = 20;

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            hide_title: false,
            card_width: None,
            title_color: DEFAULT_TITLE_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            bg_color: DEFAULT_BG_COLOR.to_string(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            layout: Layout::Normal,
            locale: locale::DEFAULT_LOCALE.to_string(),
            lang_colors: HashMap::new(),
            hide: Vec::new(),
            langs_count: DEFAULT_LANGS_COUNT,
            show_repo_link: true,
        }
    }
}

/// A validated request: the target username plus its rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRequest {
    /// GitHub username to generate a card for
    pub username: String,
    /// Validated rendering options
    pub options: CardOptions,
}

/// Validates raw query parameters against injected blacklist and locale sets.
///
/// Both sets are read-only after construction; substituting them in tests
/// keeps validation deterministic.
#[derive(Debug, Clone)]
pub struct Validator {
    blacklist: HashSet<String>,
    locales: HashSet<String>,
}

impl Validator {
    /// Creates a validator with explicit blacklist and locale sets.
    pub fn new(
        blacklist: impl IntoIterator<Item = String>,
        locales: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            blacklist: blacklist.into_iter().collect(),
            locales: locales.into_iter().collect(),
        }
    }

    /// Builds the production validator from configuration plus the built-in
    /// locale table.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.card.blacklist.iter().cloned(),
            locale::supported().map(str::to_string),
        )
    }

    /// Validates and normalizes a raw query-parameter bag.
    ///
    /// Check order is observable: username presence, blacklist, layout,
    /// locale. All of it runs before any upstream fetch, so a blacklisted
    /// user never triggers a network call and a bad layout dominates
    /// whatever the fetch would have returned.
    pub fn validate(
        &self,
        query: &HashMap<String, String>,
    ) -> std::result::Result<CardRequest, CardError> {
        let username = query
            .get("username")
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .ok_or(CardError::MissingUsername)?;

        if self.blacklist.contains(username) {
            return Err(CardError::Blacklisted);
        }

        let layout = match query.get("layout") {
            Some(value) => Layout::parse(value).ok_or(CardError::InvalidLayout)?,
            None => Layout::Normal,
        };

        let locale = match query.get("locale") {
            Some(value) => {
                let value = value.to_lowercase();
                if !self.locales.contains(value.as_str()) {
                    return Err(CardError::InvalidLocale);
                }
                value
            }
            None => locale::DEFAULT_LOCALE.to_string(),
        };

        let default_count = match layout {
            Layout::Normal => DEFAULT_LANGS_COUNT,
            _ => DEFAULT_COMPACT_LANGS_COUNT,
        };

        let options = CardOptions {
            hide_title: parse_bool(query.get("hide_title")).unwrap_or(false),
            card_width: parse_dimension(query.get("card_width")),
            title_color: parse_color(query.get("title_color"), DEFAULT_TITLE_COLOR),
            text_color: parse_color(query.get("text_color"), DEFAULT_TEXT_COLOR),
            bg_color: parse_color(query.get("bg_color"), DEFAULT_BG_COLOR),
            border_color: parse_color(query.get("border_color"), DEFAULT_BORDER_COLOR),
            layout,
            locale,
            lang_colors: parse_lang_colors(query.get("lang_colors")),
            hide: parse_hide_list(query.get("hide")),
            langs_count: parse_langs_count(query.get("langs_count"), default_count),
            show_repo_link: parse_bool(query.get("show_repo_link")).unwrap_or(true),
        };

        Ok(CardRequest {
            username: username.to_string(),
            options,
        })
    }
}

/// Permissive boolean parse: `true`/`false`/`1`/`0`, case-insensitive.
fn parse_bool(value: Option<&String>) -> Option<bool> {
    match value?.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Card width in pixels; out-of-range or unparseable values fall back to
/// the layout's own default.
fn parse_dimension(value: Option<&String>) -> Option<u32> {
    value?
        .parse::<u32>()
        .ok()
        .filter(|width| (200..=2000).contains(width))
}

/// A hex color field; anything that does not look like hex keeps the default.
fn parse_color(value: Option<&String>, default: &str) -> String {
    match value {
        Some(raw) if colors::is_valid_hex(raw) => colors::normalize_hex(raw),
        _ => default.to_string(),
    }
}

/// Parses the `lang_colors` JSON object.
///
/// Malformed input (bad syntax, non-string values) degrades to an empty map
/// rather than failing the request.
fn parse_lang_colors(value: Option<&String>) -> HashMap<String, String> {
    value
        .and_then(|raw| serde_json::from_str::<HashMap<String, String>>(raw).ok())
        .unwrap_or_default()
}

/// Comma-separated language names to hide, lower-cased for matching.
fn parse_hide_list(value: Option<&String>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn parse_langs_count(value: Option<&String>, default: usize) -> usize {
    value
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|count| (1..=MAX_LANGS_COUNT).contains(count))
        .unwrap_or(default)
}
