//! Active subscription tier.
//!
//! The tier is held in a `watch` channel so every gated component holding a
//! receiver sees a change the moment `set_tier` returns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::storage::{keys, SharedStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Pro => "pro",
        }
    }

    /// Bullet points shown on the pricing view.
    pub fn features(&self) -> &'static [&'static str] {
        match self {
            PlanTier::Free => &[
                "5 persona scans per day",
                "Basic personality insights",
                "Public data analysis only",
                "Standard support",
            ],
            PlanTier::Pro => &[
                "Unlimited persona scans",
                "Advanced AI analysis",
                "Cross-platform deep scanning",
                "Detailed behavioral patterns",
                "Priority support",
                "Export reports (PDF, JSON)",
                "API access",
                "Custom retention settings",
            ],
        }
    }

    pub fn other(&self) -> PlanTier {
        match self {
            PlanTier::Free => PlanTier::Pro,
            PlanTier::Pro => PlanTier::Free,
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("invalid plan tier: {0:?} (expected \"free\" or \"pro\")")]
    InvalidTier(String),
}

impl FromStr for PlanTier {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PlanTier::Free),
            "pro" => Ok(PlanTier::Pro),
            other => Err(PlanError::InvalidTier(other.to_string())),
        }
    }
}

/// Single source of truth for the current tier.
pub struct PlanState {
    store: SharedStore,
    tier: watch::Sender<PlanTier>,
}

impl PlanState {
    /// Reads the persisted tier, falling back to `free` when absent or invalid.
    pub fn new(store: SharedStore) -> Self {
        let initial = load_tier(&store);
        let (tier, _) = watch::channel(initial);
        Self { store, tier }
    }

    pub fn tier(&self) -> PlanTier {
        *self.tier.borrow()
    }

    pub fn is_pro(&self) -> bool {
        self.tier() == PlanTier::Pro
    }

    /// Makes `tier` current and persists it.
    pub fn set_tier(&self, tier: PlanTier) {
        let previous = self.tier.send_replace(tier);
        if previous != tier {
            info!("[Plan] Tier changed: {} -> {}", previous, tier);
        }
        if let Err(e) = self.store.set(keys::USER_PLAN, tier.as_str()) {
            warn!("[Plan] Failed to save tier: {}", e);
        }
    }

    /// Parses `name` and applies it. Anything but `"free"`/`"pro"` is rejected
    /// and the current tier is left untouched.
    pub fn set_tier_named(&self, name: &str) -> Result<PlanTier, PlanError> {
        let tier = name.parse::<PlanTier>()?;
        self.set_tier(tier);
        Ok(tier)
    }

    /// Developer switch between the two tiers.
    pub fn toggle(&self) -> PlanTier {
        let next = self.tier().other();
        self.set_tier(next);
        next
    }

    /// Receiver that observes every subsequent tier change.
    pub fn subscribe(&self) -> watch::Receiver<PlanTier> {
        self.tier.subscribe()
    }
}

fn load_tier(store: &SharedStore) -> PlanTier {
    match store.get(keys::USER_PLAN) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: PlanError| {
            warn!("[Plan] Ignoring persisted tier: {}", e);
            PlanTier::Free
        }),
        Ok(None) => PlanTier::Free,
        Err(e) => {
            warn!("[Plan] Failed to load tier: {}", e);
            PlanTier::Free
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parsing_is_exact() {
        assert_eq!("pro".parse::<PlanTier>(), Ok(PlanTier::Pro));
        assert_eq!("free".parse::<PlanTier>(), Ok(PlanTier::Free));
        assert!("Pro".parse::<PlanTier>().is_err());
        assert!(" free".parse::<PlanTier>().is_err());
    }
}
