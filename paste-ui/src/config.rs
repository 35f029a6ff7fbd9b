use serde::Deserialize;
use shared_types::{CREATE_SNIPPET_PATH, THEME_STORAGE_KEY};
use std::sync::OnceLock;

use dioxus_logger::tracing::warn;

/// Id of the optional inline JSON element carrying page configuration.
pub const CONFIG_ELEMENT_ID: &str = "spaste-config";

/// CSS selectors for the elements the script wires up.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Selectors {
    pub input: String,
    pub language: String,
    pub save: String,
    pub share: String,
    pub theme_toggle: String,
    pub address: String,
    pub line_numbers: String,
    pub line_number: String,
    pub notice: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            input: ".main__input".to_string(),
            language: ".header__select".to_string(),
            save: ".header__save".to_string(),
            share: ".header__share".to_string(),
            theme_toggle: ".header__theme".to_string(),
            address: ".header__address".to_string(),
            line_numbers: ".main__numbers".to_string(),
            line_number: ".main__number".to_string(),
            notice: ".notice".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageConfig {
    /// Snippet-creation endpoint path, joined onto `api_base()`
    pub endpoint: String,
    /// API origin used when the page is served from localhost.
    /// Empty means same origin.
    pub dev_api_base: String,
    pub theme_storage_key: String,
    /// Class toggled on `<html>` while the light theme is active
    pub light_class: String,
    pub notice_timeout_ms: u32,
    pub log_level: String,
    pub selectors: Selectors,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            endpoint: CREATE_SNIPPET_PATH.to_string(),
            dev_api_base: String::new(),
            theme_storage_key: THEME_STORAGE_KEY.to_string(),
            light_class: "light-theme".to_string(),
            notice_timeout_ms: 4000,
            log_level: "info".to_string(),
            selectors: Selectors::default(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Read the inline config element, falling back to defaults.
    fn from_document() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(raw) = raw else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed page config: {}", e);
                Self::default()
            }
        }
    }

    /// Parsed log level, `INFO` for anything unrecognised.
    pub fn log_level(&self) -> dioxus_logger::tracing::Level {
        self.log_level
            .parse()
            .unwrap_or(dioxus_logger::tracing::Level::INFO)
    }

    /// Full URL of the snippet-creation endpoint.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", api_base(), self.endpoint)
    }
}

/// Page configuration, read from the document on first use
static PAGE_CONFIG: OnceLock<PageConfig> = OnceLock::new();

pub fn page_config() -> &'static PageConfig {
    PAGE_CONFIG.get_or_init(PageConfig::from_document)
}

/// Pick the API origin for the current host
/// - In development (localhost): the configured `dev_api_base`
/// - Otherwise: same origin
fn resolve_api_base(hostname: &str, dev_api_base: &str) -> String {
    if hostname == "localhost" || hostname == "127.0.0.1" {
        dev_api_base.trim_end_matches('/').to_string()
    } else {
        String::new()
    }
}

static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Get the cached API base URL
pub fn api_base() -> &'static str {
    API_BASE_CACHE
        .get_or_init(|| {
            let hostname = web_sys::window()
                .and_then(|w| w.location().hostname().ok())
                .unwrap_or_default();
            resolve_api_base(&hostname, &page_config().dev_api_base)
        })
        .as_str()
}
