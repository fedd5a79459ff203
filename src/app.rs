use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::analytics::{names, EventLog};
use crate::api::{
    AnalysisApi, HttpAnalysisApi, RemovalRequest, RemovalTicket, ReportLink, ResilientApi,
    SeedResponse, Sourced,
};
use crate::config::Settings;
use crate::gating::{
    gate, usage, Connection, Feature, Gated, GatedList, PaywallPrompt, Route, UsageMeter,
    UsageQuota,
};
use crate::intake::{self, UploadBatch, UploadFile};
use crate::notify::{Notice, Notifications};
use crate::plan::{PlanError, PlanState, PlanTier};
use crate::preferences::{AppSettings, Preferences, PrivacySettings};
use crate::storage::{SharedStore, SqliteStore};

/// Every client-side service, constructed once and handed to the UI tree.
///
/// Cloning is cheap and shares the same services.
#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub events: Arc<EventLog>,
    pub plan: Arc<PlanState>,
    pub preferences: Preferences,
    pub api: ResilientApi,
    pub notices: Arc<Notifications>,
    store: SharedStore,
}

impl AppContext {
    /// Production wiring: SQLite-backed store and the HTTP backend.
    pub fn open(settings: Settings) -> anyhow::Result<Self> {
        let store = SqliteStore::new(&settings.storage.path, settings.storage.max_connections)?;
        let api = HttpAnalysisApi::new(&settings.api)?;
        info!("[App] Analysis API at {}", api.base_url());
        Ok(Self::with_parts(settings, Arc::new(store), Arc::new(api)))
    }

    pub fn with_parts(settings: Settings, store: SharedStore, api: Arc<dyn AnalysisApi>) -> Self {
        let events = EventLog::with_capacity(store.clone(), settings.analytics.max_events);
        Self {
            events: Arc::new(events),
            plan: Arc::new(PlanState::new(store.clone())),
            preferences: Preferences::new(store.clone()),
            api: ResilientApi::new(api),
            notices: Arc::new(Notifications::new()),
            settings,
            store,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Pricing page selection.
    pub fn select_plan(&self, name: &str) -> Result<PlanTier, PlanError> {
        self.plan.set_tier_named(name).inspect_err(|e| {
            self.notices.push(Notice::destructive("Invalid plan", e.to_string()));
        })
    }

    pub fn connected_people(&self, connections: Vec<Connection>) -> GatedList<Connection> {
        GatedList::new(
            Feature::ConnectedPeople,
            connections,
            self.settings.gating.preview_rows,
        )
    }

    pub fn usage_quota(&self) -> UsageQuota {
        UsageQuota::for_tier(self.plan.tier(), self.settings.gating.daily_scan_limit)
    }

    pub fn scans_today(&self) -> u32 {
        usage::scans_on(&self.events.list(None), Utc::now().date_naive())
    }

    pub fn usage_meter(&self) -> Option<UsageMeter> {
        self.usage_quota()
            .meter(self.scans_today())
            .map(|m| m.with_threshold(self.settings.gating.near_limit_percent))
    }

    /// Handle form submission. Returns the new seed, or `None` after telling
    /// the user why nothing was started.
    pub async fn submit_handle(
        &self,
        input: &str,
        prompt: &mut PaywallPrompt,
    ) -> Option<Sourced<SeedResponse>> {
        let normalized = match intake::normalize_handle(input) {
            Ok(normalized) => normalized,
            Err(e) => {
                self.notices.push(Notice::destructive(e.title(), e.to_string()));
                return None;
            }
        };

        if !self.usage_quota().allows(self.scans_today()) {
            prompt.open(Feature::UnlimitedScans);
            return None;
        }

        let seed = self.api.create_seed(&normalized).await;
        self.events.record(
            names::SEED_CREATED,
            json!({
                "seedId": seed.value().seed_id,
                "input": normalized,
                "source": seed.source_label(),
            }),
        );
        self.notices.push(Notice::info(
            "Analysis Started",
            format!("Seed created: {}", seed.value().seed_id),
        ));
        Some(seed)
    }

    pub fn select_demo(&self, seed_id: &str, title: &str) -> Route {
        self.events.record(
            names::DEMO_SELECTED,
            json!({ "seedId": seed_id, "title": title }),
        );
        Route::Seed(seed_id.to_string())
    }

    /// Report download is a pro feature.
    pub async fn download_report(
        &self,
        seed_id: &str,
        prompt: &mut PaywallPrompt,
    ) -> Gated<Sourced<ReportLink>> {
        if gate(self.plan.tier(), prompt, Feature::ReportExport, || ()).is_blocked() {
            return Gated::Blocked;
        }
        let report = self.api.generate_report(seed_id).await;
        self.events.record(
            names::REPORT_DOWNLOADED,
            json!({ "seedId": seed_id, "url": report.value().url }),
        );
        self.notices.push(Notice::info("Report Ready", report.value().url.clone()));
        Gated::Invoked(report)
    }

    pub fn save_settings(&self, settings: &AppSettings) {
        self.preferences.save_app_settings(settings);
        self.notices.push(Notice::info(
            "Settings Saved",
            "Your preferences have been updated successfully.",
        ));
    }

    pub fn save_privacy_settings(&self, settings: &PrivacySettings) {
        self.preferences.save_privacy_settings(settings);
        self.notices.push(Notice::info(
            "Privacy Settings Saved",
            "Your preferences have been updated successfully.",
        ));
    }

    /// Removal requests have no offline stand-in: failure is reported, not hidden.
    pub async fn submit_removal_request(&self, request: &RemovalRequest) -> Option<RemovalTicket> {
        match self.api.submit_removal_request(request).await {
            Ok(ticket) => {
                self.notices.push(Notice::info(
                    "Removal Request Submitted",
                    format!(
                        "Your request has been received. Ticket ID: {}",
                        ticket.ticket_id
                    ),
                ));
                Some(ticket)
            }
            Err(e) => {
                info!("[App] Removal request failed: {}", e);
                self.notices.push(Notice::destructive(
                    "Error",
                    "Failed to submit removal request. Please try again.",
                ));
                None
            }
        }
    }

    /// Adds files to `batch`, notifying once per rejected file.
    pub fn add_upload_files(
        &self,
        batch: &mut UploadBatch,
        files: impl IntoIterator<Item = UploadFile>,
    ) -> usize {
        let before = batch.files().len();
        for rejected in batch.add_files(files) {
            self.notices.push(Notice::destructive(rejected.title(), rejected.to_string()));
        }
        batch.files().len() - before
    }

    pub async fn analyze_upload(&self, batch: &UploadBatch) -> bool {
        let latency = Duration::from_millis(self.settings.api.simulated_latency_ms);
        match batch.analyze(latency).await {
            Ok(()) => {
                self.notices.push(Notice::info(
                    "Analysis Started",
                    "Your content is being processed for persona analysis.",
                ));
                true
            }
            Err(e) => {
                self.notices.push(Notice::destructive(e.title(), e.to_string()));
                false
            }
        }
    }
}
