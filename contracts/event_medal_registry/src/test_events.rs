extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, TryIntoVal, Val, Vec,
};

use crate::events::{
    EventApproved, EventRejected, MedalAwarded, MedalClaimed, MedalCreated, MedalStatusChanged,
};
use crate::test::Harness;

fn registry_events(h: &Harness) -> std::vec::Vec<(Vec<Val>, Val)> {
    h.env
        .events()
        .all()
        .iter()
        .filter(|(contract, _, _)| *contract == h.registry.address)
        .map(|(_, topics, data)| (topics, data))
        .collect()
}

#[test]
fn test_submission_emits_event_then_medals() {
    let h = Harness::new();
    let organizer = Address::generate(&h.env);
    let event_id = h.submit(&organizer, 3);

    let emitted = registry_events(&h);
    let n = emitted.len();
    assert!(n >= 3);

    let (submit_topics, _) = &emitted[n - 3];
    assert_eq!(
        *submit_topics,
        vec![
            &h.env,
            symbol_short!("ev_submit").into_val(&h.env),
            event_id.into_val(&h.env),
        ]
    );

    let (medal_topics, medal_data) = &emitted[n - 1];
    let created: MedalCreated = medal_data.try_into_val(&h.env).unwrap();
    assert_eq!(
        *medal_topics,
        vec![
            &h.env,
            symbol_short!("medal_new").into_val(&h.env),
            created.medal_id.into_val(&h.env),
        ]
    );
    assert_eq!(created.event_id, event_id);
    assert_eq!(created.points, 20);
    assert_eq!(created.max_claims, 3);
}

#[test]
fn test_moderation_events() {
    let h = Harness::new();
    let organizer = Address::generate(&h.env);

    let approved_id = h.submit(&organizer, 0);
    h.registry.approve_event(&h.admin, &approved_id);
    let (topics, data) = registry_events(&h).pop().unwrap();
    assert_eq!(
        topics,
        vec![
            &h.env,
            symbol_short!("ev_approv").into_val(&h.env),
            approved_id.into_val(&h.env),
        ]
    );
    let approved: EventApproved = data.try_into_val(&h.env).unwrap();
    assert_eq!(approved.approved_by, h.admin);

    let rejected_id = h.submit(&organizer, 0);
    h.registry
        .reject_event(&h.admin, &rejected_id, &h.text("no venue"));
    let (topics, data) = registry_events(&h).pop().unwrap();
    assert_eq!(
        topics,
        vec![
            &h.env,
            symbol_short!("ev_reject").into_val(&h.env),
            rejected_id.into_val(&h.env),
        ]
    );
    let rejected: EventRejected = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        rejected,
        EventRejected {
            event_id: rejected_id,
            rejected_by: h.admin.clone(),
            reason: h.text("no venue"),
        }
    );
}

#[test]
fn test_claim_and_award_events() {
    let h = Harness::new();
    let organizer = Address::generate(&h.env);
    let alice = Address::generate(&h.env);
    let bob = Address::generate(&h.env);
    let event_id = h.approved(&organizer, 0);
    let medal_id = h.registry.get_event_medals(&event_id).get(0).unwrap().id;

    h.registry.claim_medal(&alice, &medal_id);
    let (topics, data) = registry_events(&h).pop().unwrap();
    assert_eq!(
        topics,
        vec![
            &h.env,
            symbol_short!("medal_clm").into_val(&h.env),
            medal_id.into_val(&h.env),
        ]
    );
    let claimed: MedalClaimed = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        claimed,
        MedalClaimed {
            medal_id,
            event_id,
            account: alice,
            points: 10,
            claims_count: 1,
        }
    );

    h.registry.award_medal(&organizer, &medal_id, &bob);
    let (topics, data) = registry_events(&h).pop().unwrap();
    assert_eq!(
        topics,
        vec![
            &h.env,
            symbol_short!("medal_awd").into_val(&h.env),
            medal_id.into_val(&h.env),
        ]
    );
    let awarded: MedalAwarded = data.try_into_val(&h.env).unwrap();
    assert_eq!(awarded.awarded_by, organizer);
    assert_eq!(awarded.recipient, bob);
    assert_eq!(awarded.claims_count, 2);
}

#[test]
fn test_medal_status_event() {
    let h = Harness::new();
    let organizer = Address::generate(&h.env);
    let event_id = h.approved(&organizer, 0);
    let medal_id = h.registry.get_event_medals(&event_id).get(1).unwrap().id;

    h.registry.set_medal_active(&organizer, &medal_id, &false);
    let (topics, data) = registry_events(&h).pop().unwrap();
    assert_eq!(
        topics,
        vec![
            &h.env,
            symbol_short!("medal_set").into_val(&h.env),
            medal_id.into_val(&h.env),
        ]
    );
    let changed: MedalStatusChanged = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        changed,
        MedalStatusChanged {
            medal_id,
            changed_by: organizer,
            active: false,
        }
    );
}
