use crate::statics;

/// Runtime settings. Built once at startup from the command line / environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub registry_base: String,
    /// Base URL of the grid-operator proxy. `None` disables the lookup entirely.
    pub proxy_base: Option<String>,
    pub tile_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_base: statics::DAWA_BASE_URL.to_string(),
            proxy_base: None,
            tile_url: statics::OSM_TILE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn new(registry_base: &str, proxy_base: Option<&str>, tile_url: &str) -> Self {
        Self {
            registry_base: normalize_base(registry_base)
                .unwrap_or_else(|| statics::DAWA_BASE_URL.to_string()),
            proxy_base: proxy_base.and_then(normalize_base),
            tile_url: tile_url.trim().to_string(),
        }
    }

    pub fn grid_operator_enabled(&self) -> bool {
        self.proxy_base.is_some()
    }
}

/// Trim whitespace and trailing slashes; an empty value means "not configured".
fn normalize_base(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
