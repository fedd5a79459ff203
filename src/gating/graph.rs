use serde::{Deserialize, Serialize};

use super::{gate, Feature, Gated, PaywallPrompt};
use crate::plan::PlanTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl GraphNode {
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Accounts and the links between them. Node interactions are pro-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl RelationshipGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Links with an endpoint missing from `nodes`.
    pub fn dangling_links(&self) -> impl Iterator<Item = &GraphLink> {
        self.links
            .iter()
            .filter(|l| self.node(&l.source).is_none() || self.node(&l.target).is_none())
    }

    /// Node click. `None` when no node has that id.
    pub fn activate<R>(
        &self,
        tier: PlanTier,
        id: &str,
        prompt: &mut PaywallPrompt,
        on_node: impl FnOnce(&GraphNode) -> R,
    ) -> Option<Gated<R>> {
        let node = self.node(id)?;
        Some(gate(tier, prompt, Feature::RelationshipGraph, || on_node(node)))
    }
}
