use serde::{Deserialize, Serialize};

use super::{gate, Feature, Gated, PaywallPrompt};
use crate::plan::PlanTier;

pub const LIMITED_PREVIEW_BADGE: &str = "Limited Preview";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceLink {
    pub text: String,
    pub url: String,
}

/// An account linked to the analysed persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub platform: String,
    pub handle: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<EvidenceLink>>,
}

impl Connection {
    pub fn relation_label(&self) -> &str {
        self.relation.as_deref().unwrap_or("Connected")
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_score(self.confidence)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ConfidenceBand::High
        } else if score >= 0.6 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// A 0..1 score as a whole percentage.
pub fn percent(score: f64) -> u32 {
    (score * 100.0).round().clamp(0.0, u32::MAX as f64) as u32
}

/// Rows a tier may see, plus the upsell state for the rest.
#[derive(Debug, PartialEq)]
pub struct ListView<'a, T> {
    pub rows: &'a [T],
    pub hidden: usize,
    pub limited: bool,
}

impl<T> ListView<'_, T> {
    pub fn badge(&self) -> Option<&'static str> {
        self.limited.then_some(LIMITED_PREVIEW_BADGE)
    }

    /// Call-to-action label, present only when rows are held back.
    pub fn unlock_label(&self) -> Option<String> {
        (self.limited && self.hidden > 0).then(|| format!("Unlock {} More", self.hidden))
    }
}

/// A list whose full contents and row interactions are a pro feature.
#[derive(Debug, Clone)]
pub struct GatedList<T> {
    feature: Feature,
    rows: Vec<T>,
    preview_rows: usize,
}

impl<T> GatedList<T> {
    pub fn new(feature: Feature, rows: Vec<T>, preview_rows: usize) -> Self {
        Self {
            feature,
            rows,
            preview_rows,
        }
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    pub fn view(&self, tier: PlanTier) -> ListView<'_, T> {
        match tier {
            PlanTier::Pro => ListView {
                rows: &self.rows,
                hidden: 0,
                limited: false,
            },
            PlanTier::Free => {
                let shown = self.rows.len().min(self.preview_rows);
                ListView {
                    rows: &self.rows[..shown],
                    hidden: self.rows.len() - shown,
                    limited: true,
                }
            }
        }
    }

    /// Row click. `None` when `index` is not a visible row for this tier.
    pub fn activate<R>(
        &self,
        tier: PlanTier,
        index: usize,
        prompt: &mut PaywallPrompt,
        action: impl FnOnce(&T) -> R,
    ) -> Option<Gated<R>> {
        let row = self.view(tier).rows.get(index)?;
        Some(gate(tier, prompt, self.feature, || action(row)))
    }

    /// "Unlock N More" click. Returns whether the prompt opened.
    pub fn request_unlock(&self, tier: PlanTier, prompt: &mut PaywallPrompt) -> bool {
        let view = self.view(tier);
        if view.unlock_label().is_none() {
            return false;
        }
        prompt.open(self.feature);
        true
    }
}

impl GatedList<Connection> {
    /// Row click that hands the row's evidence to `on_evidence`, if it has any.
    /// The invoked value reports whether the callback ran.
    pub fn activate_evidence(
        &self,
        tier: PlanTier,
        index: usize,
        prompt: &mut PaywallPrompt,
        on_evidence: impl FnOnce(&[EvidenceLink]),
    ) -> Option<Gated<bool>> {
        self.activate(tier, index, prompt, |connection| {
            match connection.evidence.as_deref() {
                Some(evidence) => {
                    on_evidence(evidence);
                    true
                }
                None => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_bands() {
        assert_eq!(ConfidenceBand::from_score(0.92), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_score(0.8), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_score(0.6), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_score(0.59), ConfidenceBand::Low);
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(0.875), 88);
        assert_eq!(percent(0.0), 0);
    }
}
