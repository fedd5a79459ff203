use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub gating: GatingSettings,
}

/// Where the key-value store lives.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub path: String,
    pub max_connections: u32,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: "trait-scan.db".into(),
            max_connections: 4,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsSettings {
    /// Most recent events retained by the log.
    pub max_events: usize,
    /// Page size of the analytics viewer.
    pub recent_limit: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            max_events: crate::analytics::MAX_EVENTS,
            recent_limit: 20,
        }
    }
}

/// Analysis API boundary.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Artificial delay standing in for upload latency.
    pub simulated_latency_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api/mock".into(),
            timeout_secs: 5,
            simulated_latency_ms: 2000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatingSettings {
    /// Rows of a gated list shown to the free tier.
    pub preview_rows: usize,
    /// Seed creations per UTC day allowed on the free tier.
    pub daily_scan_limit: u32,
    pub near_limit_percent: u8,
}

impl Default for GatingSettings {
    fn default() -> Self {
        Self {
            preview_rows: 2,
            daily_scan_limit: 5,
            near_limit_percent: 80,
        }
    }
}

impl Settings {
    /// Loads defaults, then `trait-scan.{toml,yaml,json}` if present, then `TRAIT_SCAN__*` env vars.
    pub fn new() -> anyhow::Result<Self> {
        Self::load(None)
    }

    /// Same as [`Settings::new`] but reads an explicit file, which must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("storage.path", defaults.storage.path)?
            .set_default("storage.max_connections", defaults.storage.max_connections)?
            .set_default("analytics.max_events", defaults.analytics.max_events as u64)?
            .set_default("analytics.recent_limit", defaults.analytics.recent_limit as u64)?
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("api.simulated_latency_ms", defaults.api.simulated_latency_ms)?
            .set_default("gating.preview_rows", defaults.gating.preview_rows as u64)?
            .set_default("gating.daily_scan_limit", defaults.gating.daily_scan_limit)?
            .set_default(
                "gating.near_limit_percent",
                u64::from(defaults.gating.near_limit_percent),
            )?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("trait-scan").required(false)),
        };

        let config = builder
            .add_source(
                Environment::with_prefix("TRAIT_SCAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
