use serde_json::json;

use super::Preferences;
use crate::analytics::{names, EventLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourStep {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

pub const STEPS: &[TourStep] = &[
    TourStep {
        title: "Enter a Handle",
        description: "Start by entering any public social media handle or profile URL.",
        action: "Try entering @username or a profile URL",
    },
    TourStep {
        title: "Review Persona Report",
        description: "Get AI-powered insights including personality traits, interests, and behavioral patterns.",
        action: "Explore the detailed persona analysis",
    },
    TourStep {
        title: "Save the Persona",
        description: "Keep interesting personas in your personal library for future reference.",
        action: "Click 'Save Persona' to add to your collection",
    },
    TourStep {
        title: "Share or Download",
        description: "Generate beautiful reports or share insights with your team.",
        action: "Use 'Download Report' or share links",
    },
];

/// How the tour ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEnd {
    Completed,
    Skipped,
}

/// First-run walkthrough.
#[derive(Debug, Default)]
pub struct OnboardingTour {
    current: usize,
    ended: Option<TourEnd>,
}

impl OnboardingTour {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tour is shown until it has been completed or skipped once.
    pub fn should_show(preferences: &Preferences) -> bool {
        !preferences.onboarding_completed()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn step(&self) -> &'static TourStep {
        &STEPS[self.current]
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == STEPS.len()
    }

    pub fn ended(&self) -> Option<TourEnd> {
        self.ended
    }

    /// Advances; on the last step this completes the tour.
    pub fn next(&mut self, preferences: &Preferences, events: &EventLog) -> Option<TourEnd> {
        if self.ended.is_some() {
            return self.ended;
        }
        if self.is_last() {
            self.complete(preferences, events);
        } else {
            self.current += 1;
        }
        self.ended
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn complete(&mut self, preferences: &Preferences, events: &EventLog) {
        preferences.mark_onboarding_completed();
        events.record(names::TOUR_COMPLETED, json!({ "step": self.current + 1 }));
        self.ended = Some(TourEnd::Completed);
    }

    pub fn skip(&mut self, preferences: &Preferences, events: &EventLog) {
        preferences.mark_onboarding_completed();
        events.record(names::TOUR_SKIPPED, json!({ "step": self.current }));
        self.ended = Some(TourEnd::Skipped);
    }
}
