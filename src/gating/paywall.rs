use super::route::Route;
use super::Feature;

pub const DESCRIPTION: &str =
    "This feature requires a Pro plan to access advanced persona analysis capabilities.";

pub const PRO_FEATURES: &[&str] = &[
    "Unlimited persona scans",
    "Advanced identity matching",
    "Detailed contradiction analysis",
    "Priority processing",
    "PDF report downloads",
    "API access",
];

/// What the "Upgrade" button ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    HandlerInvoked,
    Navigate(Route),
}

/// Dismissible upgrade overlay.
///
/// Opening, dismissing and upgrading never touch plan state or the event log
/// themselves; a caller-supplied upgrade handler is the only way out.
#[derive(Default)]
pub struct PaywallPrompt {
    feature: Option<Feature>,
    on_upgrade: Option<Box<dyn FnMut()>>,
}

impl PaywallPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompt whose "Upgrade" runs `handler` instead of navigating to pricing.
    pub fn with_upgrade_handler(handler: impl FnMut() + 'static) -> Self {
        Self {
            feature: None,
            on_upgrade: Some(Box::new(handler)),
        }
    }

    pub fn open(&mut self, feature: Feature) {
        self.feature = Some(feature);
    }

    pub fn is_open(&self) -> bool {
        self.feature.is_some()
    }

    /// Feature named by the open overlay.
    pub fn feature(&self) -> Option<Feature> {
        self.feature
    }

    pub fn title(&self) -> Option<String> {
        self.feature.map(|f| format!("Unlock {}", f))
    }

    /// "Maybe Later".
    pub fn dismiss(&mut self) {
        self.feature = None;
    }

    /// "Upgrade": closes the overlay, then runs the handler or points at pricing.
    pub fn upgrade(&mut self) -> UpgradeOutcome {
        self.dismiss();
        match self.on_upgrade.as_mut() {
            Some(handler) => {
                handler();
                UpgradeOutcome::HandlerInvoked
            }
            None => UpgradeOutcome::Navigate(Route::Pricing),
        }
    }
}

impl std::fmt::Debug for PaywallPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaywallPrompt")
            .field("feature", &self.feature)
            .field("has_upgrade_handler", &self.on_upgrade.is_some())
            .finish()
    }
}
