use serde::{Deserialize, Serialize};

use crate::gating::EvidenceLink;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaTrait {
    pub name: String,
    pub score: f64,
    pub confidence: f64,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaData {
    pub traits: Vec<PersonaTrait>,
    pub summary: String,
    #[serde(default)]
    pub top_interests: Vec<String>,
    #[serde(default)]
    pub sample_quotes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityAccount {
    pub platform: String,
    pub handle: String,
    pub url: String,
    pub confidence: f64,
    #[serde(default)]
    pub why: Vec<String>,
    #[serde(default)]
    pub evidence: Vec<EvidenceLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityMatches {
    pub accounts: Vec<IdentityAccount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contradiction {
    pub dimension: String,
    pub delta: f64,
    pub a_snippet: String,
    pub b_snippet: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contradictions {
    pub contradictions: Vec<Contradiction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarAccount {
    pub platform: String,
    pub handle: String,
    pub url: String,
    pub similarity: f64,
    pub why: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarAccounts {
    pub similar: Vec<SimilarAccount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedStatus {
    Queued,
    Running,
    Done,
    Failed,
}

impl SeedStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SeedStatus::Done | SeedStatus::Failed)
    }
}

/// State of one analysis job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResponse {
    pub seed_id: String,
    pub status: SeedStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLink {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAck {
    pub success: bool,
}

/// Request to take a profile out of the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalRequest {
    pub profile_url: String,
    pub reason: String,
    pub details: String,
    pub contact_email: String,
    pub proof: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalTicket {
    pub ticket_id: String,
}
