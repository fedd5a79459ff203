use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{names, AnalyticsEvent};
use crate::plan::PlanTier;

pub const DEFAULT_LABEL: &str = "Daily scans";
pub const NEAR_LIMIT_PERCENT: u8 = 80;

/// Progress of a usage counter against its limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageMeter {
    pub used: u32,
    pub limit: u32,
    pub label: String,
    near_limit_percent: u8,
}

impl UsageMeter {
    pub fn new(used: u32, limit: u32) -> Self {
        Self {
            used,
            limit,
            label: DEFAULT_LABEL.to_string(),
            near_limit_percent: NEAR_LIMIT_PERCENT,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_threshold(mut self, near_limit_percent: u8) -> Self {
        self.near_limit_percent = near_limit_percent;
        self
    }

    /// Filled share in percent, capped at 100. A zero limit reads as full.
    pub fn percentage(&self) -> f64 {
        if self.limit == 0 {
            return 100.0;
        }
        (f64::from(self.used) / f64::from(self.limit) * 100.0).min(100.0)
    }

    pub fn is_near_limit(&self) -> bool {
        self.percentage() >= f64::from(self.near_limit_percent)
    }

    pub fn warning(&self) -> Option<&'static str> {
        self.is_near_limit().then_some("You're approaching your daily limit")
    }
}

/// Per-day scan allowance for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageQuota {
    Limited(u32),
    Unlimited,
}

impl UsageQuota {
    pub fn for_tier(tier: PlanTier, daily_limit: u32) -> Self {
        match tier {
            PlanTier::Free => UsageQuota::Limited(daily_limit),
            PlanTier::Pro => UsageQuota::Unlimited,
        }
    }

    pub fn allows(&self, used: u32) -> bool {
        match self {
            UsageQuota::Limited(limit) => used < *limit,
            UsageQuota::Unlimited => true,
        }
    }

    /// Meter for display; the pro tier has nothing to meter.
    pub fn meter(&self, used: u32) -> Option<UsageMeter> {
        match self {
            UsageQuota::Limited(limit) => Some(UsageMeter::new(used, *limit)),
            UsageQuota::Unlimited => None,
        }
    }
}

/// Seeds created on `day` (UTC), counted from the event log.
pub fn scans_on(events: &[AnalyticsEvent], day: NaiveDate) -> u32 {
    let count = events
        .iter()
        .filter(|e| e.name == names::SEED_CREATED && e.timestamp.date_naive() == day)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_caps_and_warns() {
        let meter = UsageMeter::new(3, 5);
        assert!((meter.percentage() - 60.0).abs() < f64::EPSILON);
        assert!(!meter.is_near_limit());

        let meter = UsageMeter::new(4, 5);
        assert!(meter.is_near_limit());
        assert!(meter.warning().is_some());

        assert_eq!(UsageMeter::new(9, 5).percentage(), 100.0);
        assert_eq!(UsageMeter::new(0, 0).percentage(), 100.0);
    }

    #[test]
    fn quota_by_tier() {
        let free = UsageQuota::for_tier(PlanTier::Free, 5);
        assert!(free.allows(4));
        assert!(!free.allows(5));
        assert!(UsageQuota::for_tier(PlanTier::Pro, 5).allows(u32::MAX));
        assert!(UsageQuota::Unlimited.meter(3).is_none());
    }
}
