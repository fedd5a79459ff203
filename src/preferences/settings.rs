use serde::{Deserialize, Serialize};

use crate::plan::PlanTier;

/// Privacy page preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub allow_deeper_scans: bool,
    pub agree_to_public_data_analysis: bool,
    pub data_retention_days: String,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            allow_deeper_scans: false,
            agree_to_public_data_analysis: false,
            data_retention_days: "90".into(),
        }
    }
}

/// Settings page preferences; a superset of the privacy ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub allow_deeper_scans: bool,
    pub agree_to_public_data_analysis: bool,
    pub data_retention_days: String,
    pub email_notifications: bool,
    pub marketing_emails: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            allow_deeper_scans: false,
            agree_to_public_data_analysis: false,
            data_retention_days: "90".into(),
            email_notifications: true,
            marketing_emails: false,
        }
    }
}

impl AppSettings {
    /// Deeper scans only take effect on the pro tier, whatever was saved.
    pub fn deeper_scans_enabled(&self, tier: PlanTier) -> bool {
        self.allow_deeper_scans && tier == PlanTier::Pro
    }
}
