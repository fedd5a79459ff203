use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use super::models::*;
use super::{AnalysisApi, ApiError};
use crate::config::ApiSettings;

/// JSON-over-HTTP client for the analysis backend.
#[derive(Debug, Clone)]
pub struct HttpAnalysisApi {
    client: Client,
    base: String,
}

#[derive(Serialize)]
struct SavePersonaBody<'a> {
    seed_id: &'a str,
    #[serde(flatten)]
    persona: &'a PersonaData,
}

impl HttpAnalysisApi {
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        let base = Url::parse(&settings.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid API base URL {}: {}", settings.base_url, e))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("HTTP client init failed: {}", e))?;
        Ok(Self {
            client,
            base: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> (String, RequestBuilder) {
        let endpoint = format!("{}/{}", self.base, path.trim_start_matches('/'));
        let builder = self.client.request(method, &endpoint);
        (endpoint, builder)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: String,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!("[Api] -> {}", endpoint);
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| ApiError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (endpoint, builder) = self.request(Method::GET, path);
        self.send(endpoint, builder).await
    }

    async fn post<B: Serialize + ?Sized + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let (endpoint, mut builder) = self.request(Method::POST, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(endpoint, builder).await
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisApi {
    async fn create_seed(&self, input: &str) -> Result<SeedResponse, ApiError> {
        self.post("seed", Some(&json!({ "input": input }))).await
    }

    async fn seed_status(&self, seed_id: &str) -> Result<SeedResponse, ApiError> {
        self.get(&format!("seed/{}/status", seed_id)).await
    }

    async fn persona(&self, seed_id: &str) -> Result<PersonaData, ApiError> {
        self.get(&format!("seed/{}/persona", seed_id)).await
    }

    async fn identity(&self, seed_id: &str) -> Result<IdentityMatches, ApiError> {
        self.get(&format!("seed/{}/identity", seed_id)).await
    }

    async fn contradictions(&self, seed_id: &str) -> Result<Contradictions, ApiError> {
        self.get(&format!("seed/{}/contradictions", seed_id)).await
    }

    async fn similar_accounts(&self, seed_id: &str) -> Result<SimilarAccounts, ApiError> {
        self.get(&format!("seed/{}/similar", seed_id)).await
    }

    async fn generate_report(&self, seed_id: &str) -> Result<ReportLink, ApiError> {
        self.post::<serde_json::Value, _>(&format!("report/{}", seed_id), None)
            .await
    }

    async fn save_persona(
        &self,
        seed_id: &str,
        persona: &PersonaData,
    ) -> Result<SaveAck, ApiError> {
        let body = SavePersonaBody { seed_id, persona };
        self.post("personas", Some(&body)).await
    }

    async fn submit_removal_request(
        &self,
        request: &RemovalRequest,
    ) -> Result<RemovalTicket, ApiError> {
        self.post("remove-request", Some(request)).await
    }
}
