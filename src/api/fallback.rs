use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::models::*;
use super::{mock, AnalysisApi, ApiError};

/// A value together with whether the backend produced it or a fixture stood in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "data", rename_all = "lowercase")]
pub enum Sourced<T> {
    Live(T),
    Fallback(T),
}

impl<T> Sourced<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Sourced::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Sourced::Live(value) | Sourced::Fallback(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Sourced::Live(value) | Sourced::Fallback(value) => value,
        }
    }

    pub fn source_label(&self) -> &'static str {
        match self {
            Sourced::Live(_) => "live",
            Sourced::Fallback(_) => "mock",
        }
    }
}

/// Backend access that always has something to render.
///
/// Calls with a fixture never fail; the removal request has no fixture and
/// reports its error to the caller.
#[derive(Clone)]
pub struct ResilientApi {
    primary: Arc<dyn AnalysisApi>,
}

impl ResilientApi {
    pub fn new(primary: Arc<dyn AnalysisApi>) -> Self {
        Self { primary }
    }

    async fn or_fixture<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, ApiError>>,
        fixture: impl FnOnce() -> T,
    ) -> Sourced<T> {
        match call.await {
            Ok(value) => Sourced::Live(value),
            Err(e) => {
                info!("[Api] {} failed ({}), using mock data", operation, e);
                Sourced::Fallback(fixture())
            }
        }
    }

    pub async fn create_seed(&self, input: &str) -> Sourced<SeedResponse> {
        self.or_fixture("create_seed", self.primary.create_seed(input), mock::queued_seed)
            .await
    }

    pub async fn seed_status(&self, seed_id: &str) -> Sourced<SeedResponse> {
        self.or_fixture("seed_status", self.primary.seed_status(seed_id), || {
            mock::finished_seed(seed_id)
        })
        .await
    }

    pub async fn persona(&self, seed_id: &str) -> Sourced<PersonaData> {
        self.or_fixture("persona", self.primary.persona(seed_id), mock::persona)
            .await
    }

    pub async fn identity(&self, seed_id: &str) -> Sourced<IdentityMatches> {
        self.or_fixture("identity", self.primary.identity(seed_id), mock::identity)
            .await
    }

    pub async fn contradictions(&self, seed_id: &str) -> Sourced<Contradictions> {
        self.or_fixture(
            "contradictions",
            self.primary.contradictions(seed_id),
            mock::contradictions,
        )
        .await
    }

    pub async fn similar_accounts(&self, seed_id: &str) -> Sourced<SimilarAccounts> {
        self.or_fixture(
            "similar_accounts",
            self.primary.similar_accounts(seed_id),
            mock::similar_accounts,
        )
        .await
    }

    pub async fn generate_report(&self, seed_id: &str) -> Sourced<ReportLink> {
        self.or_fixture("generate_report", self.primary.generate_report(seed_id), mock::report)
            .await
    }

    pub async fn save_persona(&self, seed_id: &str, persona: &PersonaData) -> Sourced<SaveAck> {
        self.or_fixture(
            "save_persona",
            self.primary.save_persona(seed_id, persona),
            mock::saved,
        )
        .await
    }

    pub async fn submit_removal_request(
        &self,
        request: &RemovalRequest,
    ) -> Result<RemovalTicket, ApiError> {
        self.primary.submit_removal_request(request).await
    }
}
