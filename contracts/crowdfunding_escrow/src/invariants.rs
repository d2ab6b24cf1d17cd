#![allow(dead_code)]

//! Assertions over escrow state, shared by the scenario tests.

extern crate std;

use crate::types::{Contribution, Project};

/// Goal positive, deadline after creation, counters consistent.
pub fn assert_project_well_formed(project: &Project) {
    assert!(
        project.goal > 0,
        "project {} has non-positive goal ({})",
        project.id,
        project.goal
    );
    assert!(
        project.deadline > project.created_at,
        "project {} deadline {} not after creation {}",
        project.id,
        project.deadline,
        project.created_at
    );
    assert!(
        project.funds_raised >= 0 && project.total_refunded >= 0,
        "project {} has negative totals",
        project.id
    );
    assert!(
        project.total_refunded <= project.funds_raised,
        "project {} refunded {} of only {} raised",
        project.id,
        project.total_refunded,
        project.funds_raised
    );
    assert!(
        !(project.claimed && project.total_refunded > 0),
        "project {} was both claimed and refunded",
        project.id
    );
}

/// What the escrow should still hold for one project.
pub fn expected_escrow_share(project: &Project) -> i128 {
    if project.claimed {
        0
    } else {
        project.funds_raised - project.total_refunded
    }
}

/// The token balance of the escrow equals the sum of every project's
/// unreleased funds.
pub fn assert_escrow_conserves(escrow_balance: i128, projects: &[Project]) {
    let expected: i128 = projects.iter().map(expected_escrow_share).sum();
    assert_eq!(
        escrow_balance, expected,
        "escrow holds {} but projects account for {}",
        escrow_balance, expected
    );
}

/// A project's raised total is the sum of its backers' contributions until
/// refunds start zeroing them.
pub fn assert_contributions_sum(project: &Project, contributions: &[Contribution]) {
    let sum: i128 = contributions.iter().map(|c| c.amount).sum();
    assert_eq!(
        sum,
        project.funds_raised - project.total_refunded,
        "contributions to project {} sum to {}",
        project.id,
        sum
    );
}

/// Totals only ever grow.
pub fn assert_monotonic(label: &str, before: i128, after: i128) {
    assert!(
        after >= before,
        "{} decreased from {} to {}",
        label,
        before,
        after
    );
}
