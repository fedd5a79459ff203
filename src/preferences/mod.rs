//! First-run flags and saved settings.

pub mod onboarding;
pub mod settings;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::gating::Route;
use crate::storage::{keys, read_flag, write_flag, SharedStore};

pub use onboarding::{OnboardingTour, TourEnd, TourStep};
pub use settings::{AppSettings, PrivacySettings};

pub const PRIVACY_BANNER_TEXT: &str =
    "We analyze public social media data to generate insights. Your privacy matters to us.";

#[derive(Clone)]
pub struct Preferences {
    store: SharedStore,
}

impl Preferences {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn onboarding_completed(&self) -> bool {
        read_flag(self.store.as_ref(), keys::ONBOARDING_COMPLETED)
    }

    pub fn mark_onboarding_completed(&self) {
        write_flag(self.store.as_ref(), keys::ONBOARDING_COMPLETED);
    }

    pub fn privacy_banner_visible(&self) -> bool {
        !read_flag(self.store.as_ref(), keys::PRIVACY_BANNER_DISMISSED)
    }

    pub fn dismiss_privacy_banner(&self) {
        write_flag(self.store.as_ref(), keys::PRIVACY_BANNER_DISMISSED);
    }

    /// Banner's "manage preferences": dismisses it and points at settings.
    pub fn manage_privacy_preferences(&self) -> Route {
        self.dismiss_privacy_banner();
        Route::Settings
    }

    pub fn privacy_settings(&self) -> PrivacySettings {
        self.load_json(keys::PRIVACY_SETTINGS)
    }

    pub fn save_privacy_settings(&self, settings: &PrivacySettings) {
        self.save_json(keys::PRIVACY_SETTINGS, settings);
    }

    /// Saved settings merged over the defaults.
    pub fn app_settings(&self) -> AppSettings {
        self.load_json(keys::APP_SETTINGS)
    }

    pub fn save_app_settings(&self, settings: &AppSettings) {
        self.save_json(keys::APP_SETTINGS, settings);
    }

    fn load_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("[Preferences] Ignoring unreadable {}: {}", key, e);
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!("[Preferences] Failed to load {}: {}", key, e);
                T::default()
            }
        }
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(crate::storage::StorageError::from)
            .and_then(|raw| self.store.set(key, &raw));
        if let Err(e) = result {
            warn!("[Preferences] Failed to save {}: {}", key, e);
        }
    }
}
