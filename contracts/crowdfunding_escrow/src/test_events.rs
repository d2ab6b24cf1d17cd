extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, Symbol, TryIntoVal, Val, Vec,
};

use crate::events::{
    CofounderAdded, ContributionMade, FundsClaimed, NftMinted, ProjectCreated, ProjectDeleted,
    ProjectInspired, ProjectUpdated, RefundProcessed,
};
use crate::test::Harness;
use crate::INSPIRE_POINTS;

const DAY: u64 = 86_400;

fn topics(h: &Harness, name: Symbol, project_id: u64) -> Vec<Val> {
    vec![&h.env, name.into_val(&h.env), project_id.into_val(&h.env)]
}

/// Last event published by the escrow itself.
fn last_escrow_event(h: &Harness) -> (Vec<Val>, Val) {
    let all = h.env.events().all();
    let mut found = None;
    for (contract, topics, data) in all.iter() {
        if contract == h.escrow.address {
            found = Some((topics, data));
        }
    }
    found.expect("no escrow events")
}

#[test]
fn test_project_created_event() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let id = h.create(&creator, 500, DAY);

    let (t, data) = last_escrow_event(&h);
    assert_eq!(t, topics(&h, symbol_short!("created"), id));
    let event: ProjectCreated = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        ProjectCreated {
            project_id: id,
            creator,
            title: h.text("Solar Kiosk"),
            goal: 500,
            deadline: 1_700_000_000 + DAY,
            nft_contract: h.nft.address.clone(),
        }
    );
}

#[test]
fn test_funding_emits_funded_then_nft_mint() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(300);
    let id = h.create(&creator, 500, DAY);

    h.escrow.fund_project(&id, &alice, &100, &false);
    let token_id = h.escrow.fund_project(&id, &alice, &200, &true);

    let escrow_events: std::vec::Vec<_> = h
        .env
        .events()
        .all()
        .iter()
        .filter(|(contract, _, _)| *contract == h.escrow.address)
        .collect();
    let n = escrow_events.len();
    let (_, funded_topics, funded_data) = escrow_events[n - 2].clone();
    let (_, mint_topics, mint_data) = escrow_events[n - 1].clone();

    assert_eq!(funded_topics, topics(&h, symbol_short!("funded"), id));
    let funded: ContributionMade = funded_data.try_into_val(&h.env).unwrap();
    assert_eq!(
        funded,
        ContributionMade {
            project_id: id,
            backer: alice.clone(),
            amount: 200,
            is_anonymous: true,
            funds_raised: 300,
        }
    );

    assert_eq!(mint_topics, topics(&h, symbol_short!("nft_mint"), id));
    let minted: NftMinted = mint_data.try_into_val(&h.env).unwrap();
    assert_eq!(
        minted,
        NftMinted {
            project_id: id,
            token_id,
            backer: alice,
            amount: 200,
        }
    );
}

#[test]
fn test_claimed_event() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(500);
    let id = h.create(&creator, 500, DAY);
    h.escrow.fund_project(&id, &alice, &500, &false);
    h.advance(DAY);
    h.escrow.claim_funds(&id, &creator);

    let (t, data) = last_escrow_event(&h);
    assert_eq!(t, topics(&h, symbol_short!("claimed"), id));
    let event: FundsClaimed = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        FundsClaimed {
            project_id: id,
            creator,
            amount: 500,
        }
    );
}

#[test]
fn test_refunded_event() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(120);
    let id = h.create(&creator, 500, DAY);
    h.escrow.fund_project(&id, &alice, &120, &false);
    h.advance(DAY);
    h.escrow.claim_refund(&id, &alice);

    let (t, data) = last_escrow_event(&h);
    assert_eq!(t, topics(&h, symbol_short!("refunded"), id));
    let event: RefundProcessed = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        RefundProcessed {
            project_id: id,
            backer: alice,
            amount: 120,
        }
    );
}

#[test]
fn test_inspired_event() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let fan = Address::generate(&h.env);
    let id = h.create(&creator, 500, DAY);
    h.escrow.inspire_project(&id, &fan);

    let (t, data) = last_escrow_event(&h);
    assert_eq!(t, topics(&h, symbol_short!("inspired"), id));
    let event: ProjectInspired = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        ProjectInspired {
            project_id: id,
            account: fan,
            creator,
            points: INSPIRE_POINTS,
        }
    );
}

#[test]
fn test_cofounder_and_updated_events() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let cto = Address::generate(&h.env);
    let id = h.create(&creator, 500, DAY);

    h.escrow.add_cofounder(&id, &creator, &cto, &h.text("CTO"));
    let (t, data) = last_escrow_event(&h);
    assert_eq!(t, topics(&h, symbol_short!("cofounder"), id));
    let added: CofounderAdded = data.try_into_val(&h.env).unwrap();
    assert_eq!(added.cofounder, cto);
    assert_eq!(added.role, h.text("CTO"));

    h.escrow
        .update_project_details(&id, &cto, &h.text("New"), &h.text("D"), &h.text("I"));
    let (t, data) = last_escrow_event(&h);
    assert_eq!(t, topics(&h, symbol_short!("updated"), id));
    let updated: ProjectUpdated = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        updated,
        ProjectUpdated {
            project_id: id,
            editor: cto,
        }
    );
}

#[test]
fn test_deleted_event() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(40);
    let id = h.create(&creator, 500, DAY);
    h.escrow.fund_project(&id, &alice, &40, &false);
    h.escrow.delete_project(&id, &creator);

    let (t, data) = last_escrow_event(&h);
    assert_eq!(t, topics(&h, symbol_short!("deleted"), id));
    let event: ProjectDeleted = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        ProjectDeleted {
            project_id: id,
            creator,
            funds_raised: 40,
        }
    );
}

#[test]
fn test_rejected_call_emits_nothing() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let id = h.create(&creator, 500, DAY);

    let _ = h.escrow.try_inspire_project(&id, &creator);
    let inspired = topics(&h, symbol_short!("inspired"), id);
    assert!(h
        .env
        .events()
        .all()
        .iter()
        .all(|(_, t, _)| t != inspired));
}
