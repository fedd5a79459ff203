//! Names of every persisted entry.

/// JSON array of analytics events, newest first.
pub const ANALYTICS_EVENTS: &str = "analytics_events";
/// Stable pseudo-identifier of this installation.
pub const ANALYTICS_USER_ID: &str = "analytics_user_id";
/// `"free"` or `"pro"`.
pub const USER_PLAN: &str = "user_plan";
pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";
pub const PRIVACY_BANNER_DISMISSED: &str = "privacy_banner_dismissed";
pub const PRIVACY_SETTINGS: &str = "privacy_settings";
pub const APP_SETTINGS: &str = "app_settings";
