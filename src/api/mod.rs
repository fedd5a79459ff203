//! Boundary to the analysis backend.
//!
//! [`AnalysisApi`] is the raw request/response surface; every method may fail.
//! [`ResilientApi`] wraps one and substitutes a deterministic fixture from
//! [`mock`] whenever a call with a fixture fails, tagging the result with
//! where it came from.

pub mod fallback;
pub mod http;
pub mod mock;
pub mod models;

use async_trait::async_trait;

pub use fallback::{ResilientApi, Sourced};
pub use http::HttpAnalysisApi;
pub use mock::MockAnalysisApi;
pub use models::*;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn create_seed(&self, input: &str) -> Result<SeedResponse, ApiError>;

    async fn seed_status(&self, seed_id: &str) -> Result<SeedResponse, ApiError>;

    async fn persona(&self, seed_id: &str) -> Result<PersonaData, ApiError>;

    async fn identity(&self, seed_id: &str) -> Result<IdentityMatches, ApiError>;

    async fn contradictions(&self, seed_id: &str) -> Result<Contradictions, ApiError>;

    async fn similar_accounts(&self, seed_id: &str) -> Result<SimilarAccounts, ApiError>;

    async fn generate_report(&self, seed_id: &str) -> Result<ReportLink, ApiError>;

    async fn save_persona(
        &self,
        seed_id: &str,
        persona: &PersonaData,
    ) -> Result<SaveAck, ApiError>;

    async fn submit_removal_request(
        &self,
        request: &RemovalRequest,
    ) -> Result<RemovalTicket, ApiError>;
}
