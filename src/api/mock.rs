//! Deterministic fixtures for offline use.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::models::*;
use super::{AnalysisApi, ApiError};
use crate::gating::EvidenceLink;

pub const REPORT_URL: &str = "/mock-report.pdf";

/// Fresh seed id in the `s_<millis>` form the backend also uses.
pub fn seed_id() -> String {
    format!("s_{}", Utc::now().timestamp_millis())
}

pub fn queued_seed() -> SeedResponse {
    SeedResponse {
        seed_id: seed_id(),
        status: SeedStatus::Queued,
        stage: None,
    }
}

pub fn finished_seed(seed_id: &str) -> SeedResponse {
    SeedResponse {
        seed_id: seed_id.to_string(),
        status: SeedStatus::Done,
        stage: None,
    }
}

fn persona_trait(name: &str, score: f64, confidence: f64, evidence: &str) -> PersonaTrait {
    PersonaTrait {
        name: name.into(),
        score,
        confidence,
        evidence: vec![evidence.into()],
    }
}

pub fn persona() -> PersonaData {
    PersonaData {
        traits: vec![
            persona_trait("Openness", 0.81, 0.75, "Frequently discusses new ideas and experiences"),
            persona_trait("Conscientiousness", 0.67, 0.82, "Shows organized approach to tasks"),
            persona_trait("Extraversion", 0.73, 0.68, "Active in social discussions"),
            persona_trait("Agreeableness", 0.59, 0.71, "Balanced approach to disagreements"),
            persona_trait("Neuroticism", 0.34, 0.77, "Generally stable emotional responses"),
        ],
        summary: "Creative and curious individual with strong organizational skills and active social engagement.".into(),
        top_interests: ["artificial intelligence", "travel", "photography", "startups", "design"]
            .into_iter()
            .map(String::from)
            .collect(),
        sample_quotes: vec![
            "I love exploring new places and meeting interesting people.".into(),
            "The intersection of AI and creativity fascinates me.".into(),
            "Organization is key to achieving ambitious goals.".into(),
        ],
    }
}

pub fn identity() -> IdentityMatches {
    IdentityMatches {
        accounts: vec![
            IdentityAccount {
                platform: "Twitter".into(),
                handle: "@johndoe".into(),
                url: "https://twitter.com/johndoe".into(),
                confidence: 0.87,
                why: vec![
                    "Writing style match".into(),
                    "Similar interests".into(),
                    "Timeline consistency".into(),
                ],
                evidence: vec![EvidenceLink {
                    text: "Just visited an amazing coffee shop in Portland...".into(),
                    url: "https://twitter.com/johndoe/status/123".into(),
                }],
            },
            IdentityAccount {
                platform: "LinkedIn".into(),
                handle: "john-doe-design".into(),
                url: "https://linkedin.com/in/john-doe-design".into(),
                confidence: 0.92,
                why: vec![
                    "Professional background match".into(),
                    "Network overlap".into(),
                    "Skill endorsements".into(),
                ],
                evidence: vec![EvidenceLink {
                    text: "Excited to share my latest UX project...".into(),
                    url: "https://linkedin.com/in/john-doe-design/post/456".into(),
                }],
            },
        ],
    }
}

pub fn contradictions() -> Contradictions {
    Contradictions {
        contradictions: vec![Contradiction {
            dimension: "Formality".into(),
            delta: 0.45,
            a_snippet: "Professional post about quarterly results".into(),
            b_snippet: "Casual tweet about weekend plans".into(),
            sources: vec!["LinkedIn".into(), "Twitter".into()],
        }],
    }
}

pub fn similar_accounts() -> SimilarAccounts {
    SimilarAccounts {
        similar: vec![SimilarAccount {
            platform: "Twitter".into(),
            handle: "@designguru".into(),
            url: "https://twitter.com/designguru".into(),
            similarity: 0.83,
            why: "Similar design interests and career trajectory".into(),
        }],
    }
}

pub fn report() -> ReportLink {
    ReportLink {
        url: REPORT_URL.into(),
    }
}

pub fn saved() -> SaveAck {
    SaveAck { success: true }
}

/// Backend stand-in that answers every call from the fixtures above.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAnalysisApi;

#[async_trait]
impl AnalysisApi for MockAnalysisApi {
    async fn create_seed(&self, _input: &str) -> Result<SeedResponse, ApiError> {
        Ok(queued_seed())
    }

    async fn seed_status(&self, seed_id: &str) -> Result<SeedResponse, ApiError> {
        Ok(finished_seed(seed_id))
    }

    async fn persona(&self, _seed_id: &str) -> Result<PersonaData, ApiError> {
        Ok(persona())
    }

    async fn identity(&self, _seed_id: &str) -> Result<IdentityMatches, ApiError> {
        Ok(identity())
    }

    async fn contradictions(&self, _seed_id: &str) -> Result<Contradictions, ApiError> {
        Ok(contradictions())
    }

    async fn similar_accounts(&self, _seed_id: &str) -> Result<SimilarAccounts, ApiError> {
        Ok(similar_accounts())
    }

    async fn generate_report(&self, _seed_id: &str) -> Result<ReportLink, ApiError> {
        Ok(report())
    }

    async fn save_persona(
        &self,
        _seed_id: &str,
        _persona: &PersonaData,
    ) -> Result<SaveAck, ApiError> {
        Ok(saved())
    }

    async fn submit_removal_request(
        &self,
        _request: &RemovalRequest,
    ) -> Result<RemovalTicket, ApiError> {
        Ok(RemovalTicket {
            ticket_id: format!("rr_{}", &Uuid::new_v4().simple().to_string()[..12]),
        })
    }
}
