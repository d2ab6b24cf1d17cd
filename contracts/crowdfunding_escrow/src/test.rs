extern crate std;

use backer_nft::{BackerNft, BackerNftClient};
use reputation_ledger::{ReputationLedger, ReputationLedgerClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, Env, String,
};

use crate::{
    invariants, CollectionInfo, CrowdfundingEscrow, CrowdfundingEscrowClient, Error,
    ProjectDetails, ProjectPhase, Role, INSPIRE_POINTS,
};

const DAY: u64 = 86_400;
const START: u64 = 1_700_000_000;
/// One whole unit of the funding asset (7 decimals).
const UNIT: i128 = 10_000_000;

pub struct Harness {
    pub env: Env,
    pub escrow: CrowdfundingEscrowClient<'static>,
    pub ledger: ReputationLedgerClient<'static>,
    pub nft: BackerNftClient<'static>,
    pub token: token::Client<'static>,
    pub token_admin: token::StellarAssetClient<'static>,
    pub admin: Address,
}

impl Harness {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().with_mut(|li| li.timestamp = START);

        let admin = Address::generate(&env);
        let sac = env.register_stellar_asset_contract_v2(admin.clone());
        let token = token::Client::new(&env, &sac.address());
        let token_admin = token::StellarAssetClient::new(&env, &sac.address());

        let ledger = ReputationLedgerClient::new(&env, &env.register(ReputationLedger, ()));
        let nft = BackerNftClient::new(&env, &env.register(BackerNft, ()));
        let escrow = CrowdfundingEscrowClient::new(&env, &env.register(CrowdfundingEscrow, ()));

        ledger.init(&admin);
        ledger.grant_role(&admin, &escrow.address, &Role::Awarder);
        nft.init(&escrow.address);
        escrow.init(&admin, &sac.address(), &ledger.address, &nft.address);

        Harness {
            env,
            escrow,
            ledger,
            nft,
            token,
            token_admin,
            admin,
        }
    }

    pub fn text(&self, s: &str) -> String {
        String::from_str(&self.env, s)
    }

    pub fn funded_account(&self, amount: i128) -> Address {
        let account = Address::generate(&self.env);
        self.token_admin.mint(&account, &amount);
        account
    }

    pub fn create(&self, creator: &Address, goal: i128, duration: u64) -> u64 {
        self.escrow.create_project(
            creator,
            &self.details("Solar Kiosk"),
            &goal,
            &duration,
            &self.collection(),
            &self.text("Founder"),
        )
    }

    pub fn details(&self, title: &str) -> ProjectDetails {
        ProjectDetails {
            title: self.text(title),
            description: self.text("Off-grid charging for market stalls"),
            image_url: self.text("ipfs://kiosk.png"),
            category: self.text("energy"),
        }
    }

    pub fn collection(&self) -> CollectionInfo {
        CollectionInfo {
            name: self.text("Kiosk Backers"),
            symbol: self.text("KIOSK"),
            base_uri: self.text("ipfs://kiosk/"),
        }
    }

    pub fn advance(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }
}

// ─── Campaign lifecycle ──────────────────────────────────────────────

#[test]
fn test_successful_campaign_pays_creator() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(6 * UNIT);
    let bob = h.funded_account(4 * UNIT);

    let id = h.create(&creator, 10 * UNIT, 30 * DAY);
    assert_eq!(id, 0);

    h.escrow.fund_project(&id, &alice, &(6 * UNIT), &false);
    h.escrow.fund_project(&id, &bob, &(4 * UNIT), &false);
    assert_eq!(h.token.balance(&h.escrow.address), 10 * UNIT);

    // Goal met but the campaign is still running.
    assert_eq!(
        h.escrow.try_claim_funds(&id, &creator),
        Err(Ok(Error::DeadlineNotReached))
    );
    assert_eq!(h.escrow.project_phase(&id), ProjectPhase::Active);

    h.advance(30 * DAY);
    assert_eq!(h.escrow.project_phase(&id), ProjectPhase::Claimable);

    let paid = h.escrow.claim_funds(&id, &creator);
    assert_eq!(paid, 10 * UNIT);
    assert_eq!(h.token.balance(&creator), 10 * UNIT);
    assert_eq!(h.token.balance(&h.escrow.address), 0);
    assert_eq!(h.escrow.project_phase(&id), ProjectPhase::Claimed);

    assert_eq!(
        h.escrow.try_claim_funds(&id, &creator),
        Err(Ok(Error::AlreadyClaimed))
    );
    assert_eq!(
        h.escrow.try_claim_refund(&id, &alice),
        Err(Ok(Error::GoalReached))
    );

    let project = h.escrow.get_project(&id);
    invariants::assert_project_well_formed(&project);
    assert!(project.claimed);
    assert_eq!(project.contributor_count, 2);
}

#[test]
fn test_failed_payout_leaves_claim_open() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(5 * UNIT);
    let id = h.create(&creator, 5 * UNIT, DAY);
    h.escrow.fund_project(&id, &alice, &(5 * UNIT), &false);
    h.advance(DAY);

    // A frozen creator balance makes the asset transfer fail.
    h.token_admin.set_authorized(&creator, &false);
    assert!(h.escrow.try_claim_funds(&id, &creator).is_err());

    let project = h.escrow.get_project(&id);
    assert!(!project.claimed);
    assert_eq!(h.escrow.project_phase(&id), ProjectPhase::Claimable);
    assert_eq!(h.token.balance(&h.escrow.address), 5 * UNIT);
    invariants::assert_escrow_conserves(h.token.balance(&h.escrow.address), &[project]);

    h.token_admin.set_authorized(&creator, &true);
    assert_eq!(h.escrow.claim_funds(&id, &creator), 5 * UNIT);
    assert_eq!(h.token.balance(&creator), 5 * UNIT);
    assert!(h.escrow.get_project(&id).claimed);
}

#[test]
fn test_failed_campaign_refunds_backer() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(3 * UNIT);

    let id = h.create(&creator, 10 * UNIT, 30 * DAY);
    h.escrow.fund_project(&id, &alice, &(3 * UNIT), &false);
    assert_eq!(h.token.balance(&alice), 0);

    assert_eq!(
        h.escrow.try_claim_refund(&id, &alice),
        Err(Ok(Error::DeadlineNotReached))
    );

    h.advance(30 * DAY);
    assert_eq!(h.escrow.project_phase(&id), ProjectPhase::Refundable);
    assert_eq!(
        h.escrow.try_claim_funds(&id, &creator),
        Err(Ok(Error::GoalNotReached))
    );

    assert_eq!(h.escrow.claim_refund(&id, &alice), 3 * UNIT);
    assert_eq!(h.token.balance(&alice), 3 * UNIT);
    assert!(h.escrow.is_refunded(&id, &alice));
    assert_eq!(h.escrow.get_contribution(&id, &alice).amount, 0);

    assert_eq!(
        h.escrow.try_claim_refund(&id, &alice),
        Err(Ok(Error::AlreadyRefunded))
    );

    let project = h.escrow.get_project(&id);
    assert_eq!(project.funds_raised, 3 * UNIT);
    assert_eq!(project.total_refunded, 3 * UNIT);
}

#[test]
fn test_refund_without_contribution_rejected() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let stranger = Address::generate(&h.env);
    let id = h.create(&creator, 10 * UNIT, DAY);

    h.advance(DAY);
    assert_eq!(
        h.escrow.try_claim_refund(&id, &stranger),
        Err(Ok(Error::NoContribution))
    );
}

#[test]
fn test_exact_goal_counts_as_met() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(5 * UNIT);

    let id = h.create(&creator, 5 * UNIT, DAY);
    h.escrow.fund_project(&id, &alice, &(5 * UNIT), &false);

    h.advance(DAY);
    assert_eq!(h.escrow.claim_funds(&id, &creator), 5 * UNIT);
}

#[test]
fn test_funding_closes_at_deadline() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(2 * UNIT);
    let id = h.create(&creator, 10 * UNIT, DAY);

    h.advance(DAY - 1);
    h.escrow.fund_project(&id, &alice, &UNIT, &false);

    h.advance(1);
    assert_eq!(
        h.escrow.try_fund_project(&id, &alice, &UNIT, &false),
        Err(Ok(Error::DeadlinePassed))
    );
}

#[test]
fn test_create_project_validation() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);

    let bad_goal = h.escrow.try_create_project(
        &creator,
        &h.details("t"),
        &0,
        &DAY,
        &h.collection(),
        &h.text("r"),
    );
    assert_eq!(bad_goal, Err(Ok(Error::InvalidGoal)));

    let bad_duration = h.escrow.try_create_project(
        &creator,
        &h.details("t"),
        &UNIT,
        &0,
        &h.collection(),
        &h.text("r"),
    );
    assert_eq!(bad_duration, Err(Ok(Error::InvalidDuration)));
    assert_eq!(h.escrow.project_count(), 0);
}

#[test]
fn test_create_project_opens_nft_collection() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let id = h.create(&creator, UNIT, DAY);

    let project = h.escrow.get_project(&id);
    assert_eq!(project.nft_contract, h.nft.address);
    assert_eq!(project.deadline, START + DAY);
    assert_eq!(project.created_at, START);
    assert_eq!(project.creator_role, h.text("Founder"));

    let collection = h.nft.get_collection(&id).unwrap();
    assert_eq!(collection.symbol, h.text("KIOSK"));
    assert_eq!(collection.minted, 0);

    assert_eq!(h.escrow.get_projects_by_creator(&creator), vec![&h.env, id]);
}

// ─── Contributions ───────────────────────────────────────────────────

#[test]
fn test_contributions_accumulate_and_mint_nfts() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(10 * UNIT);
    let id = h.create(&creator, 20 * UNIT, DAY);

    let first = h.escrow.fund_project(&id, &alice, &(2 * UNIT), &false);
    let second = h.escrow.fund_project(&id, &alice, &(3 * UNIT), &false);
    assert_ne!(first, second);

    assert_eq!(h.escrow.get_contribution(&id, &alice).amount, 5 * UNIT);
    assert_eq!(h.escrow.get_contributors(&id), vec![&h.env, alice.clone()]);
    assert_eq!(h.escrow.get_project(&id).contributor_count, 1);

    assert_eq!(h.nft.balance_of(&alice), 2);
    let token = h.nft.get_token(&second).unwrap();
    assert_eq!(token.project_id, id);
    assert_eq!(token.amount, 3 * UNIT);
    assert_eq!(token.serial, 2);
}

#[test]
fn test_zero_contribution_rejected() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(UNIT);
    let id = h.create(&creator, UNIT, DAY);

    assert_eq!(
        h.escrow.try_fund_project(&id, &alice, &0, &false),
        Err(Ok(Error::ZeroContribution))
    );
    assert_eq!(
        h.escrow.try_fund_project(&id, &alice, &-5, &false),
        Err(Ok(Error::ZeroContribution))
    );
}

#[test]
fn test_creator_cannot_fund_own_project() {
    let h = Harness::new();
    let creator = h.funded_account(UNIT);
    let id = h.create(&creator, UNIT, DAY);

    assert_eq!(
        h.escrow.try_fund_project(&id, &creator, &UNIT, &false),
        Err(Ok(Error::CannotFundOwnProject))
    );
    assert_eq!(h.token.balance(&creator), UNIT);
}

#[test]
fn test_unknown_project_rejected() {
    let h = Harness::new();
    let alice = h.funded_account(UNIT);
    assert_eq!(
        h.escrow.try_fund_project(&7, &alice, &UNIT, &false),
        Err(Ok(Error::ProjectNotFound))
    );
    assert_eq!(h.escrow.try_get_project(&7), Err(Ok(Error::ProjectNotFound)));
}

#[test]
fn test_anonymous_backer_redacted_in_public_list() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(UNIT);
    let bob = h.funded_account(2 * UNIT);
    let id = h.create(&creator, 10 * UNIT, DAY);

    h.escrow.fund_project(&id, &alice, &UNIT, &false);
    h.escrow.fund_project(&id, &bob, &(2 * UNIT), &true);

    let public = h.escrow.get_public_contributors(&id);
    assert_eq!(public.len(), 2);
    assert_eq!(public.get(0).unwrap().backer, Some(alice.clone()));
    assert_eq!(public.get(1).unwrap().backer, None);
    assert_eq!(public.get(1).unwrap().amount, 2 * UNIT);

    // The full list still carries every address for refunds.
    assert_eq!(h.escrow.get_contributors(&id).len(), 2);
    assert!(h.escrow.get_contribution(&id, &bob).is_anonymous);
}

// ─── Refund sweep & deletion ─────────────────────────────────────────

#[test]
fn test_process_refunds_pays_remaining_backers() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(UNIT);
    let bob = h.funded_account(2 * UNIT);
    let carol = h.funded_account(3 * UNIT);
    let id = h.create(&creator, 100 * UNIT, DAY);

    h.escrow.fund_project(&id, &alice, &UNIT, &false);
    h.escrow.fund_project(&id, &bob, &(2 * UNIT), &false);
    h.escrow.fund_project(&id, &carol, &(3 * UNIT), &false);

    assert_eq!(
        h.escrow.try_process_refunds(&id),
        Err(Ok(Error::DeadlineNotReached))
    );

    h.advance(DAY);
    h.escrow.claim_refund(&id, &bob);

    assert_eq!(h.escrow.process_refunds(&id), 2);
    assert_eq!(h.token.balance(&alice), UNIT);
    assert_eq!(h.token.balance(&bob), 2 * UNIT);
    assert_eq!(h.token.balance(&carol), 3 * UNIT);
    assert_eq!(h.token.balance(&h.escrow.address), 0);

    // Nothing left to pay.
    assert_eq!(h.escrow.process_refunds(&id), 0);
}

#[test]
fn test_delete_project_opens_refunds_immediately() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(2 * UNIT);
    let id = h.create(&creator, 10 * UNIT, 30 * DAY);
    h.escrow.fund_project(&id, &alice, &(2 * UNIT), &false);

    let stranger = Address::generate(&h.env);
    assert_eq!(
        h.escrow.try_delete_project(&id, &stranger),
        Err(Ok(Error::NotCreator))
    );

    h.escrow.delete_project(&id, &creator);
    assert_eq!(h.escrow.project_phase(&id), ProjectPhase::Deleted);
    assert_eq!(h.escrow.try_get_project(&id), Err(Ok(Error::ProjectNotFound)));
    assert_eq!(h.escrow.get_projects(&0, &10).len(), 0);
    assert_eq!(
        h.escrow.try_fund_project(&id, &alice, &UNIT, &false),
        Err(Ok(Error::ProjectNotFound))
    );
    assert_eq!(
        h.escrow.try_delete_project(&id, &creator),
        Err(Ok(Error::ProjectNotFound))
    );

    // No deadline wait after deletion.
    assert_eq!(h.escrow.claim_refund(&id, &alice), 2 * UNIT);
    assert_eq!(h.token.balance(&alice), 2 * UNIT);
}

#[test]
fn test_delete_rejected_once_goal_reached() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(UNIT);
    let id = h.create(&creator, UNIT, DAY);
    h.escrow.fund_project(&id, &alice, &UNIT, &false);

    assert_eq!(
        h.escrow.try_delete_project(&id, &creator),
        Err(Ok(Error::GoalReached))
    );
}

#[test]
fn test_delete_rejected_after_deadline() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(2 * UNIT);
    let id = h.create(&creator, 10 * UNIT, DAY);
    h.escrow.fund_project(&id, &alice, &(2 * UNIT), &false);

    h.advance(2 * DAY);
    assert_eq!(h.escrow.project_phase(&id), ProjectPhase::Refundable);
    assert_eq!(
        h.escrow.try_delete_project(&id, &creator),
        Err(Ok(Error::DeadlinePassed))
    );
    assert_eq!(h.escrow.project_phase(&id), ProjectPhase::Refundable);
    assert_eq!(h.escrow.get_project(&id).funds_raised, 2 * UNIT);

    // The regular refund path is untouched.
    assert_eq!(h.escrow.claim_refund(&id, &alice), 2 * UNIT);
}

// ─── Cofounders, details, inspiration ────────────────────────────────

#[test]
fn test_cofounders_single_and_batch() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let cto = Address::generate(&h.env);
    let cfo = Address::generate(&h.env);
    let coo = Address::generate(&h.env);
    let id = h.create(&creator, UNIT, DAY);

    assert_eq!(
        h.escrow.try_add_cofounder(&id, &cto, &cto, &h.text("CTO")),
        Err(Ok(Error::NotCreator))
    );
    h.escrow.add_cofounder(&id, &creator, &cto, &h.text("CTO"));
    assert_eq!(
        h.escrow.try_add_cofounder(&id, &creator, &cto, &h.text("CTO")),
        Err(Ok(Error::AlreadyCofounder))
    );
    assert_eq!(
        h.escrow.try_add_cofounder(&id, &creator, &creator, &h.text("CEO")),
        Err(Ok(Error::AlreadyCofounder))
    );

    assert_eq!(
        h.escrow.try_add_cofounders_batch(
            &id,
            &creator,
            &vec![&h.env, cfo.clone(), coo.clone()],
            &vec![&h.env, h.text("CFO")],
        ),
        Err(Ok(Error::ArrayLengthMismatch))
    );
    // A duplicate inside the batch aborts all of it.
    assert_eq!(
        h.escrow.try_add_cofounders_batch(
            &id,
            &creator,
            &vec![&h.env, cfo.clone(), cto.clone()],
            &vec![&h.env, h.text("CFO"), h.text("CTO")],
        ),
        Err(Ok(Error::AlreadyCofounder))
    );
    assert!(!h.escrow.is_cofounder(&id, &cfo));

    h.escrow.add_cofounders_batch(
        &id,
        &creator,
        &vec![&h.env, cfo.clone(), coo.clone()],
        &vec![&h.env, h.text("CFO"), h.text("COO")],
    );
    let cofounders = h.escrow.get_cofounders(&id);
    assert_eq!(cofounders.len(), 3);
    assert_eq!(cofounders.get(2).unwrap().role, h.text("COO"));
    assert_eq!(h.escrow.get_project(&id).cofounders, cofounders);
}

#[test]
fn test_cofounder_cannot_settle() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let cto = Address::generate(&h.env);
    let alice = h.funded_account(UNIT);
    let id = h.create(&creator, UNIT, DAY);
    h.escrow.add_cofounder(&id, &creator, &cto, &h.text("CTO"));
    h.escrow.fund_project(&id, &alice, &UNIT, &false);

    h.advance(DAY);
    assert_eq!(
        h.escrow.try_claim_funds(&id, &cto),
        Err(Ok(Error::NotCreator))
    );
}

#[test]
fn test_update_project_details_by_cofounder() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let cto = Address::generate(&h.env);
    let stranger = Address::generate(&h.env);
    let id = h.create(&creator, UNIT, DAY);
    h.escrow.add_cofounder(&id, &creator, &cto, &h.text("CTO"));

    assert_eq!(
        h.escrow.try_update_project_details(
            &id,
            &stranger,
            &h.text("x"),
            &h.text("y"),
            &h.text("z"),
        ),
        Err(Ok(Error::NotCreatorOrCofounder))
    );

    h.escrow.update_project_details(
        &id,
        &cto,
        &h.text("Solar Kiosk v2"),
        &h.text("Now with storage"),
        &h.text("ipfs://v2.png"),
    );
    let project = h.escrow.get_project(&id);
    assert_eq!(project.title, h.text("Solar Kiosk v2"));
    assert_eq!(project.category, h.text("energy"));
}

#[test]
fn test_inspire_credits_creator_reputation() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = Address::generate(&h.env);
    let bob = Address::generate(&h.env);
    let id = h.create(&creator, UNIT, DAY);

    h.escrow.inspire_project(&id, &alice);
    h.escrow.inspire_project(&id, &bob);

    assert_eq!(h.ledger.reputation_of(&creator), 2 * INSPIRE_POINTS);
    assert_eq!(
        h.ledger
            .get_genesis_by_category(&creator, &h.text("inspiration")),
        2 * INSPIRE_POINTS
    );
    assert_eq!(h.escrow.get_project(&id).inspirations, 2);
    assert!(h.escrow.has_inspired(&id, &alice));

    assert_eq!(
        h.escrow.try_inspire_project(&id, &alice),
        Err(Ok(Error::AlreadyInspired))
    );
    assert_eq!(
        h.escrow.try_inspire_project(&id, &creator),
        Err(Ok(Error::CannotInspireOwnProject))
    );
    assert_eq!(h.ledger.reputation_of(&creator), 2 * INSPIRE_POINTS);
}

#[test]
fn test_inspire_fails_without_awarder_role() {
    let h = Harness::new();
    h.ledger.revoke_role(&h.admin, &h.escrow.address);

    let creator = Address::generate(&h.env);
    let alice = Address::generate(&h.env);
    let id = h.create(&creator, UNIT, DAY);

    assert!(h.escrow.try_inspire_project(&id, &alice).is_err());
    assert!(!h.escrow.has_inspired(&id, &alice));
    assert_eq!(h.ledger.reputation_of(&creator), 0);
}

// ─── Setup & queries ─────────────────────────────────────────────────

#[test]
fn test_init_twice_rejected() {
    let h = Harness::new();
    let settings = h.escrow.get_settings();
    assert_eq!(
        h.escrow.try_init(
            &h.admin,
            &settings.funding_token,
            &settings.reputation_ledger,
            &settings.backer_nft,
        ),
        Err(Ok(Error::AlreadyInitialized))
    );
    assert_eq!(h.escrow.role_of(&h.admin), Some(Role::SuperAdmin));
}

#[test]
fn test_get_projects_pages_in_id_order() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    for _ in 0..5 {
        h.create(&creator, UNIT, DAY);
    }
    h.escrow.delete_project(&1, &creator);

    let page = h.escrow.get_projects(&0, &3);
    let ids: std::vec::Vec<u64> = page.iter().map(|p| p.id).collect();
    assert_eq!(ids, [0, 2, 3]);

    let rest = h.escrow.get_projects(&3, &10);
    assert_eq!(rest.len(), 2);
    assert_eq!(h.escrow.project_count(), 5);
}

// ─── Conservation ────────────────────────────────────────────────────

#[test]
fn test_escrow_balance_matches_unreleased_funds() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let alice = h.funded_account(20 * UNIT);
    let bob = h.funded_account(20 * UNIT);

    let winner = h.create(&creator, 8 * UNIT, DAY);
    let loser = h.create(&creator, 50 * UNIT, 2 * DAY);

    let check = |h: &Harness| {
        let projects = [h.escrow.get_project(&winner), h.escrow.get_project(&loser)];
        for p in projects.iter() {
            invariants::assert_project_well_formed(p);
        }
        invariants::assert_escrow_conserves(h.token.balance(&h.escrow.address), &projects);
    };

    let mut raised_before = 0;
    for (backer, amount) in [(&alice, 5 * UNIT), (&bob, 4 * UNIT)] {
        h.escrow.fund_project(&winner, backer, &amount, &false);
        h.escrow.fund_project(&loser, backer, &(amount / 2), &true);
        let raised = h.escrow.get_project(&loser).funds_raised;
        invariants::assert_monotonic("funds_raised", raised_before, raised);
        raised_before = raised;
        check(&h);
    }

    let loser_project = h.escrow.get_project(&loser);
    invariants::assert_contributions_sum(
        &loser_project,
        &[
            h.escrow.get_contribution(&loser, &alice),
            h.escrow.get_contribution(&loser, &bob),
        ],
    );

    h.advance(DAY);
    h.escrow.claim_funds(&winner, &creator);
    check(&h);

    h.advance(DAY);
    h.escrow.claim_refund(&loser, &alice);
    check(&h);
    h.escrow.claim_refund(&loser, &bob);
    check(&h);
    assert_eq!(h.token.balance(&h.escrow.address), 0);
}
