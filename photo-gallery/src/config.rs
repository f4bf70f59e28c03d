//! Gallery configuration.
//!
//! Defaults mirror what the grid needs for a desktop-sized window; the API key comes from the
//! environment.

use std::time::Duration;

use virtual_masonry::{DEFAULT_GAP, DEFAULT_ITEM_WIDTH, DEFAULT_OVERSCAN, MasonryOptions};
use virtual_masonry_adapter::{
    DEFAULT_LOAD_MORE_THRESHOLD_PX, DEFAULT_SCROLL_DEBOUNCE_MS, DEFAULT_SCROLL_THRESHOLD_PX,
    SignalOptions,
};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.pexels.com/v1";
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const API_KEY_VAR: &str = "PEXELS_API_KEY";
pub const BASE_URL_VAR: &str = "PEXELS_BASE_URL";
pub const PER_PAGE_VAR: &str = "PEXELS_PER_PAGE";

/// Configuration for the gallery.
///
/// Use the builder methods to customize it.
///
/// # Example
///
/// ```ignore
/// use photo_gallery::GalleryConfig;
///
/// let config = GalleryConfig::new("my-key")
///     .with_per_page(40)
///     .with_item_width(240);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Sent verbatim in the `Authorization` header.
    pub api_key: String,
    /// API root, without a trailing slash.
    pub base_url: String,
    pub per_page: u32,
    pub timeout: Duration,
    pub search_debounce_ms: u64,
    /// Distance from the bottom of the grid at which the next page is requested.
    pub load_more_threshold_px: u32,
    pub item_width: u32,
    pub gap: u32,
    pub overscan: u32,
    pub scroll: SignalOptions,
}

impl GalleryConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            timeout: DEFAULT_TIMEOUT,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            load_more_threshold_px: DEFAULT_LOAD_MORE_THRESHOLD_PX,
            item_width: DEFAULT_ITEM_WIDTH,
            gap: DEFAULT_GAP,
            overscan: DEFAULT_OVERSCAN,
            scroll: SignalOptions {
                debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
                threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
            },
        }
    }

    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup` (the environment, in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }
        if let Some(raw) = lookup(PER_PAGE_VAR) {
            let per_page = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: PER_PAGE_VAR,
                    value: raw.clone(),
                })?;
            config.per_page = per_page;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_search_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.search_debounce_ms = debounce_ms;
        self
    }

    pub fn with_load_more_threshold_px(mut self, threshold_px: u32) -> Self {
        self.load_more_threshold_px = threshold_px;
        self
    }

    pub fn with_item_width(mut self, item_width: u32) -> Self {
        self.item_width = item_width;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_overscan(mut self, overscan: u32) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_scroll(mut self, scroll: SignalOptions) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn masonry_options<K>(&self) -> MasonryOptions<K> {
        MasonryOptions::new(self.item_width, self.gap).with_overscan(self.overscan)
    }
}
