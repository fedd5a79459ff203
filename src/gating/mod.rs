//! Feature gating: the allowed/blocked decision and the components built on it.
//!
//! Every gated interaction goes through [`gate`]. On the pro tier the real
//! action runs; on the free tier it never runs and the paywall prompt opens
//! naming the blocked feature instead.

pub mod graph;
pub mod list;
pub mod paywall;
pub mod route;
pub mod usage;

use std::fmt;

use serde::Serialize;

use crate::plan::PlanTier;

pub use graph::{GraphLink, GraphNode, RelationshipGraph};
pub use list::{ConfidenceBand, Connection, EvidenceLink, GatedList, ListView};
pub use paywall::{PaywallPrompt, UpgradeOutcome};
pub use route::{Route, RouteAccess, RouteGuard, SessionProvider, SessionState};
pub use usage::{UsageMeter, UsageQuota};

/// Capabilities reserved for the pro tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    ConnectedPeople,
    RelationshipGraph,
    DeeperScans,
    ReportExport,
    UnlimitedScans,
}

impl Feature {
    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::ConnectedPeople => "Connected People Analysis",
            Feature::RelationshipGraph => "Relationship Graph",
            Feature::DeeperScans => "Deeper Scans",
            Feature::ReportExport => "PDF Report Downloads",
            Feature::UnlimitedScans => "Unlimited Persona Scans",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    Blocked,
}

impl GateDecision {
    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Pro => GateDecision::Allowed,
            PlanTier::Free => GateDecision::Blocked,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allowed)
    }
}

/// Result of a gated interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<R> {
    /// The real action ran.
    Invoked(R),
    /// The action was withheld and the upgrade prompt opened.
    Blocked,
}

impl<R> Gated<R> {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Gated::Blocked)
    }

    pub fn invoked(self) -> Option<R> {
        match self {
            Gated::Invoked(value) => Some(value),
            Gated::Blocked => None,
        }
    }
}

/// Runs `action` when `tier` allows `feature`; otherwise opens `prompt`.
pub fn gate<R>(
    tier: PlanTier,
    prompt: &mut PaywallPrompt,
    feature: Feature,
    action: impl FnOnce() -> R,
) -> Gated<R> {
    match GateDecision::for_tier(tier) {
        GateDecision::Allowed => Gated::Invoked(action()),
        GateDecision::Blocked => {
            prompt.open(feature);
            Gated::Blocked
        }
    }
}
