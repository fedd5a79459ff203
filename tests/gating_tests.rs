use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use trait_scan::analytics::EventLog;
use trait_scan::gating::{
    gate, Connection, EvidenceLink, Feature, Gated, GatedList, GraphLink, GraphNode,
    PaywallPrompt, RelationshipGraph, Route, RouteAccess, RouteGuard, SessionProvider,
    SessionState, UpgradeOutcome,
};
use trait_scan::plan::{PlanState, PlanTier};
use trait_scan::preferences::AppSettings;
use trait_scan::storage::{MemoryStore, SharedStore};

fn connection(handle: &str, with_evidence: bool) -> Connection {
    Connection {
        platform: "Twitter".into(),
        handle: handle.into(),
        url: format!("https://twitter.com/{}", handle),
        relation: None,
        confidence: 0.7,
        bio: None,
        evidence: with_evidence.then(|| {
            vec![EvidenceLink {
                text: "shared post".into(),
                url: "https://twitter.com/x/status/1".into(),
            }]
        }),
    }
}

fn people(count: usize) -> GatedList<Connection> {
    let rows = (0..count)
        .map(|i| connection(&format!("user{}", i), true))
        .collect();
    GatedList::new(Feature::ConnectedPeople, rows, 2)
}

#[test]
fn free_tier_never_runs_the_action() {
    let mut prompt = PaywallPrompt::new();
    let ran = Cell::new(false);

    let outcome = gate(PlanTier::Free, &mut prompt, Feature::ConnectedPeople, || {
        ran.set(true)
    });

    assert!(outcome.is_blocked());
    assert!(!ran.get());
    assert!(prompt.is_open());
    assert_eq!(prompt.feature(), Some(Feature::ConnectedPeople));
    assert_eq!(prompt.title().as_deref(), Some("Unlock Connected People Analysis"));
}

#[test]
fn pro_tier_runs_the_action_without_prompt() {
    let mut prompt = PaywallPrompt::new();
    let outcome = gate(PlanTier::Pro, &mut prompt, Feature::ReportExport, || 7);

    assert_eq!(outcome, Gated::Invoked(7));
    assert!(!prompt.is_open());
}

#[test]
fn free_list_shows_preview_and_unlock_label() {
    let list = people(5);
    let view = list.view(PlanTier::Free);

    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.hidden, 3);
    assert_eq!(view.badge(), Some("Limited Preview"));
    assert_eq!(view.unlock_label().as_deref(), Some("Unlock 3 More"));
}

#[test]
fn short_free_list_has_badge_but_no_unlock() {
    let list = people(2);
    let view = list.view(PlanTier::Free);
    assert_eq!(view.rows.len(), 2);
    assert!(view.badge().is_some());
    assert!(view.unlock_label().is_none());

    let mut prompt = PaywallPrompt::new();
    assert!(!list.request_unlock(PlanTier::Free, &mut prompt));
    assert!(!prompt.is_open());
}

#[test]
fn pro_list_shows_everything() {
    let list = people(5);
    let view = list.view(PlanTier::Pro);
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.hidden, 0);
    assert!(view.badge().is_none());
    assert!(view.unlock_label().is_none());
}

#[test]
fn free_row_click_opens_paywall_instead_of_evidence() {
    let list = people(3);
    let mut prompt = PaywallPrompt::new();
    let mut seen = None;

    let outcome = list.activate_evidence(PlanTier::Free, 0, &mut prompt, |evidence| {
        seen = Some(evidence.len())
    });

    assert_eq!(outcome, Some(Gated::Blocked));
    assert!(seen.is_none());
    assert_eq!(prompt.feature(), Some(Feature::ConnectedPeople));
}

#[test]
fn pro_row_click_hands_over_evidence() {
    let list = people(3);
    let mut prompt = PaywallPrompt::new();
    let mut seen = None;

    let outcome = list.activate_evidence(PlanTier::Pro, 2, &mut prompt, |evidence| {
        seen = Some(evidence[0].text.clone())
    });

    assert_eq!(outcome, Some(Gated::Invoked(true)));
    assert_eq!(seen.as_deref(), Some("shared post"));
    assert!(!prompt.is_open());
}

#[test]
fn pro_row_without_evidence_skips_callback() {
    let list = GatedList::new(
        Feature::ConnectedPeople,
        vec![connection("quiet", false)],
        2,
    );
    let mut prompt = PaywallPrompt::new();
    let mut called = false;

    let outcome = list.activate_evidence(PlanTier::Pro, 0, &mut prompt, |_| called = true);
    assert_eq!(outcome, Some(Gated::Invoked(false)));
    assert!(!called);
}

#[test]
fn hidden_rows_are_not_clickable() {
    let list = people(5);
    let mut prompt = PaywallPrompt::new();
    assert!(list
        .activate(PlanTier::Free, 4, &mut prompt, |_| ())
        .is_none());
    assert!(!prompt.is_open());
}

#[test]
fn maybe_later_and_reopen_touch_nothing() {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let plan = PlanState::new(store.clone());
    let events = EventLog::new(store);
    let mut prompt = PaywallPrompt::new();

    prompt.open(Feature::RelationshipGraph);
    prompt.dismiss();
    prompt.open(Feature::RelationshipGraph);
    prompt.dismiss();

    assert!(!prompt.is_open());
    assert_eq!(plan.tier(), PlanTier::Free);
    assert!(events.is_empty());
}

#[test]
fn upgrade_without_handler_navigates_to_pricing() {
    let mut prompt = PaywallPrompt::new();
    prompt.open(Feature::ReportExport);

    assert_eq!(prompt.upgrade(), UpgradeOutcome::Navigate(Route::Pricing));
    assert!(!prompt.is_open());
}

#[test]
fn upgrade_handler_runs_after_dismissal() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let mut prompt = PaywallPrompt::with_upgrade_handler(move || counter.set(counter.get() + 1));
    prompt.open(Feature::DeeperScans);

    assert_eq!(prompt.upgrade(), UpgradeOutcome::HandlerInvoked);
    assert!(!prompt.is_open());
    assert_eq!(calls.get(), 1);
}

#[test]
fn upgrade_handler_may_set_the_tier() {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let plan = Arc::new(PlanState::new(store));
    let target = plan.clone();
    let mut prompt = PaywallPrompt::with_upgrade_handler(move || target.set_tier(PlanTier::Pro));

    let list = people(4);
    assert!(list.request_unlock(plan.tier(), &mut prompt));
    prompt.upgrade();

    assert!(plan.is_pro());
    assert_eq!(list.view(plan.tier()).rows.len(), 4);
}

#[test]
fn graph_node_clicks_are_gated() {
    let graph = RelationshipGraph {
        nodes: vec![
            GraphNode {
                id: "a".into(),
                label: None,
                group: None,
                platform: Some("Twitter".into()),
                confidence: Some(0.9),
            },
            GraphNode {
                id: "b".into(),
                label: Some("Bee".into()),
                group: None,
                platform: None,
                confidence: None,
            },
        ],
        links: vec![
            GraphLink {
                source: "a".into(),
                target: "b".into(),
                weight: Some(0.5),
            },
            GraphLink {
                source: "a".into(),
                target: "ghost".into(),
                weight: None,
            },
        ],
    };
    let mut prompt = PaywallPrompt::new();

    assert_eq!(graph.nodes[0].display_label(), "a");
    assert_eq!(graph.nodes[1].display_label(), "Bee");
    assert_eq!(graph.dangling_links().count(), 1);

    let blocked = graph.activate(PlanTier::Free, "b", &mut prompt, |n| n.id.clone());
    assert_eq!(blocked, Some(Gated::Blocked));
    assert_eq!(prompt.feature(), Some(Feature::RelationshipGraph));
    prompt.dismiss();

    let invoked = graph.activate(PlanTier::Pro, "b", &mut prompt, |n| n.id.clone());
    assert_eq!(invoked, Some(Gated::Invoked("b".to_string())));
    assert!(graph.activate(PlanTier::Pro, "zzz", &mut prompt, |_| ()).is_none());
}

#[test]
fn deeper_scans_need_pro() {
    let settings = AppSettings {
        allow_deeper_scans: true,
        ..AppSettings::default()
    };
    assert!(!settings.deeper_scans_enabled(PlanTier::Free));
    assert!(settings.deeper_scans_enabled(PlanTier::Pro));
    assert!(!AppSettings::default().deeper_scans_enabled(PlanTier::Pro));
}

struct FixedSession(SessionState);

impl SessionProvider for FixedSession {
    fn session(&self) -> SessionState {
        self.0
    }
}

#[test]
fn route_guard_follows_session() {
    let loading = FixedSession(SessionState::Loading);
    assert_eq!(RouteGuard::new(&loading).check("/reports"), RouteAccess::Loading);

    let signed_out = FixedSession(SessionState::SignedOut);
    assert_eq!(
        RouteGuard::new(&signed_out).check("/reports"),
        RouteAccess::Redirect {
            to: Route::SignIn,
            from: "/reports".into(),
        }
    );

    let signed_in = FixedSession(SessionState::SignedIn);
    assert_eq!(RouteGuard::new(&signed_in).check("/reports"), RouteAccess::Render);
}
