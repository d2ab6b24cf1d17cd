extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{BoostGiven, GenesisAwarded, ParamsUpdated};
use crate::{ReputationLedger, ReputationLedgerClient};

fn setup_with_init() -> (Env, ReputationLedgerClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(ReputationLedger, ());
    let client = ReputationLedgerClient::new(&env, &contract_id);
    let super_admin = Address::generate(&env);
    client.init(&super_admin);
    (env, client, super_admin)
}

#[test]
fn test_genesis_awarded_event() {
    let (env, client, admin) = setup_with_init();
    let alice = Address::generate(&env);
    let category = String::from_str(&env, "hackathon");
    let reason = String::from_str(&env, "winner");

    client.award_genesis(&admin, &alice, &50, &category, &reason);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("genesis").into_val(&env),
        alice.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: GenesisAwarded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        GenesisAwarded {
            recipient: alice.clone(),
            amount: 50,
            category,
            reason,
            awarded_by: admin.clone(),
        }
    );
}

#[test]
fn test_boost_given_event() {
    let (env, client, admin) = setup_with_init();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    client.award_genesis(
        &admin,
        &alice,
        &144,
        &String::from_str(&env, "g"),
        &String::from_str(&env, "r"),
    );
    client.boost(&alice, &bob);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("boost").into_val(&env),
        bob.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: BoostGiven = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data.booster, alice);
    assert_eq!(event_data.recipient, bob);
    assert_eq!(event_data.power, 13);
}

#[test]
fn test_params_updated_event() {
    let (env, client, admin) = setup_with_init();

    client.set_params(&admin, &3_600, &2, &25);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&env, symbol_short!("params").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ParamsUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ParamsUpdated {
            caller: admin.clone(),
            cooldown: 3_600,
            baseline_power: 2,
            min_rep_to_boost: 25,
        }
    );
}
