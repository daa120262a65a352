extern crate std;

use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env,
};

use crate::{ContractError, StakingContract, StakingContractClient, MAX_APPROVED_STAKING_CONTRACTS};

// ── Test helpers ─────────────────────────────────────────────────────────────

const COOLDOWN: u64 = 86_400;

/// Single-instance environment with distinct manager identities, for
/// registry and role tests.
fn setup() -> (
    Env,
    StakingContractClient<'static>,
    Address, // migration manager
    Address, // emergency manager
    Address, // token
) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let migration_manager = Address::generate(&env);
    let emergency_manager = Address::generate(&env);
    client.initialize(&COOLDOWN, &migration_manager, &emergency_manager, &token);

    (env, client, migration_manager, emergency_manager, token)
}

/// Two independent ledger instances sharing one token, with a single
/// manager identity for both, for end-to-end migration tests.
fn setup_pair() -> (
    Env,
    StakingContractClient<'static>, // source
    StakingContractClient<'static>, // destination
    Address,                        // manager of both
    Address,                        // token
) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let source = StakingContractClient::new(&env, &env.register(StakingContract, ()));
    let destination = StakingContractClient::new(&env, &env.register(StakingContract, ()));

    let manager = Address::generate(&env);
    source.initialize(&COOLDOWN, &manager, &manager, &token);
    destination.initialize(&COOLDOWN, &manager, &manager, &token);

    (env, source, destination, manager, token)
}

fn mint(env: &Env, token: &Address, recipient: &Address, amount: i128) {
    StellarAssetClient::new(env, token).mint(recipient, &amount);
}

// ── Destination registry ──────────────────────────────────────────────────────

#[test]
fn test_add_destination_requires_migration_manager() {
    let (env, client, _, emergency_manager, _token) = setup();

    let destination = Address::generate(&env);
    let intruder = Address::generate(&env);

    assert_eq!(
        client.try_add_migration_destination(&intruder, &destination),
        Err(Ok(ContractError::NotMigrationManager))
    );
    assert_eq!(
        client.try_add_migration_destination(&emergency_manager, &destination),
        Err(Ok(ContractError::NotMigrationManager))
    );
    assert!(!client.is_migration_destination(&destination));
}

#[test]
fn test_add_and_list_destinations() {
    let (env, client, migration_manager, _, _token) = setup();

    let first = Address::generate(&env);
    let second = Address::generate(&env);
    client.add_migration_destination(&migration_manager, &first);
    client.add_migration_destination(&migration_manager, &second);

    assert!(client.is_migration_destination(&first));
    assert!(client.is_migration_destination(&second));
    let listed = client.get_migration_destinations();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&first));
    assert!(listed.contains(&second));
}

#[test]
fn test_add_duplicate_destination_fails() {
    let (env, client, migration_manager, _, _token) = setup();

    let destination = Address::generate(&env);
    client.add_migration_destination(&migration_manager, &destination);

    let result = client.try_add_migration_destination(&migration_manager, &destination);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::DestinationAlreadyApproved),
        _ => unreachable!("Expected DestinationAlreadyApproved error"),
    }
    assert_eq!(client.get_migration_destinations().len(), 1);
}

#[test]
fn test_remove_destination_then_readd() {
    let (env, client, migration_manager, _, _token) = setup();

    let destination = Address::generate(&env);
    client.add_migration_destination(&migration_manager, &destination);
    client.remove_migration_destination(&migration_manager, &destination);

    assert!(!client.is_migration_destination(&destination));
    assert_eq!(client.get_migration_destinations().len(), 0);

    // Removal is by membership; the address may be approved again later.
    client.add_migration_destination(&migration_manager, &destination);
    assert!(client.is_migration_destination(&destination));
}

#[test]
fn test_remove_absent_destination_fails() {
    let (env, client, migration_manager, _, _token) = setup();

    let destination = Address::generate(&env);
    let result = client.try_remove_migration_destination(&migration_manager, &destination);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::DestinationNotApproved),
        _ => unreachable!("Expected DestinationNotApproved error"),
    }
}

#[test]
fn test_remove_keeps_remaining_members() {
    let (env, client, migration_manager, _, _token) = setup();

    let first = Address::generate(&env);
    let second = Address::generate(&env);
    let third = Address::generate(&env);
    client.add_migration_destination(&migration_manager, &first);
    client.add_migration_destination(&migration_manager, &second);
    client.add_migration_destination(&migration_manager, &third);

    // Removing a non-tail member must not disturb the others.
    client.remove_migration_destination(&migration_manager, &first);

    assert!(!client.is_migration_destination(&first));
    assert!(client.is_migration_destination(&second));
    assert!(client.is_migration_destination(&third));
    assert_eq!(client.get_migration_destinations().len(), 2);
}

#[test]
fn test_registry_capacity_enforced() {
    let (env, client, migration_manager, _, _token) = setup();

    let mut destinations = std::vec::Vec::new();
    for _ in 0..MAX_APPROVED_STAKING_CONTRACTS {
        let destination = Address::generate(&env);
        client.add_migration_destination(&migration_manager, &destination);
        destinations.push(destination);
    }
    assert_eq!(
        client.get_migration_destinations().len(),
        MAX_APPROVED_STAKING_CONTRACTS
    );

    // The eleventh seat does not exist.
    let overflow = Address::generate(&env);
    let result = client.try_add_migration_destination(&migration_manager, &overflow);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::DestinationRegistryFull),
        _ => unreachable!("Expected DestinationRegistryFull error"),
    }

    // Freeing a seat makes the addition possible again.
    client.remove_migration_destination(&migration_manager, &destinations[3]);
    client.add_migration_destination(&migration_manager, &overflow);
    assert_eq!(
        client.get_migration_destinations().len(),
        MAX_APPROVED_STAKING_CONTRACTS
    );
}

// ── Migration flow ────────────────────────────────────────────────────────────

#[test]
fn test_migrate_moves_stake_between_contracts() {
    let (env, source, destination, manager, token) = setup_pair();

    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    source.stake(&alice, &1_000);

    source.add_migration_destination(&manager, &destination.address);
    source.migrate_staked_tokens(&alice, &destination.address, &400);

    // The stake and its backing tokens moved ledger to ledger; none of it
    // ever touched Alice's wallet.
    assert_eq!(source.get_stake_balance(&alice), 600);
    assert_eq!(source.get_total_staked_tokens(), 600);
    assert_eq!(TokenClient::new(&env, &token).balance(&source.address), 600);

    assert_eq!(destination.get_stake_balance(&alice), 400);
    assert_eq!(destination.get_total_staked_tokens(), 400);
    assert_eq!(
        TokenClient::new(&env, &token).balance(&destination.address),
        400
    );

    assert_eq!(TokenClient::new(&env, &token).balance(&alice), 0);
}

#[test]
fn test_migrate_whole_balance() {
    let (env, source, destination, manager, token) = setup_pair();

    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    source.stake(&alice, &1_000);
    source.add_migration_destination(&manager, &destination.address);

    source.migrate_staked_tokens(&alice, &destination.address, &1_000);

    assert_eq!(source.get_stake_balance(&alice), 0);
    assert_eq!(source.get_total_staked_tokens(), 0);
    assert_eq!(destination.get_stake_balance(&alice), 1_000);
}

#[test]
fn test_migrate_requires_approved_destination() {
    let (env, source, destination, _, token) = setup_pair();

    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    source.stake(&alice, &1_000);

    let result = source.try_migrate_staked_tokens(&alice, &destination.address, &400);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::DestinationNotApproved),
        _ => unreachable!("Expected DestinationNotApproved error"),
    }
}

#[test]
fn test_migrate_zero_fails() {
    let (env, source, destination, manager, token) = setup_pair();

    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    source.stake(&alice, &1_000);
    source.add_migration_destination(&manager, &destination.address);

    assert_eq!(
        source.try_migrate_staked_tokens(&alice, &destination.address, &0),
        Err(Ok(ContractError::InvalidAmount))
    );
}

#[test]
fn test_migrate_exceeding_stake_fails() {
    let (env, source, destination, manager, token) = setup_pair();

    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    source.stake(&alice, &1_000);
    source.add_migration_destination(&manager, &destination.address);

    let result = source.try_migrate_staked_tokens(&alice, &destination.address, &1_001);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientStake),
        _ => unreachable!("Expected InsufficientStake error"),
    }
}

#[test]
fn test_migrate_cooldown_tokens_do_not_move() {
    let (env, source, destination, manager, token) = setup_pair();

    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    source.stake(&alice, &1_000);
    source.unstake(&alice, &600);
    source.add_migration_destination(&manager, &destination.address);

    // Only the staked 400 are eligible.
    assert_eq!(
        source.try_migrate_staked_tokens(&alice, &destination.address, &500),
        Err(Ok(ContractError::InsufficientStake))
    );
    source.migrate_staked_tokens(&alice, &destination.address, &400);

    assert_eq!(source.get_stake_balance(&alice), 0);
    assert_eq!(source.get_unstake_status(&alice).cooldown_amount, 600);
    assert_eq!(TokenClient::new(&env, &token).balance(&source.address), 600);
}

#[test]
fn test_migrate_token_mismatch_fails() {
    let (env, source, _, manager, token) = setup_pair();

    // A destination on a different token.
    let other_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let foreign = StakingContractClient::new(&env, &env.register(StakingContract, ()));
    foreign.initialize(&COOLDOWN, &manager, &manager, &other_token);

    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    source.stake(&alice, &1_000);
    source.add_migration_destination(&manager, &foreign.address);

    let result = source.try_migrate_staked_tokens(&alice, &foreign.address, &400);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenMismatch),
        _ => unreachable!("Expected TokenMismatch error"),
    }
    assert_eq!(source.get_stake_balance(&alice), 1_000);
}

#[test]
fn test_migrate_to_stopped_destination_aborts_whole_operation() {
    let (env, source, destination, manager, token) = setup_pair();

    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    source.stake(&alice, &1_000);
    source.add_migration_destination(&manager, &destination.address);

    destination.stop_accepting_new_stakes(&manager);

    // The destination rejects the credit, which rolls the source back too.
    assert!(source
        .try_migrate_staked_tokens(&alice, &destination.address, &400)
        .is_err());
    assert_eq!(source.get_stake_balance(&alice), 1_000);
    assert_eq!(source.get_total_staked_tokens(), 1_000);
    assert_eq!(
        TokenClient::new(&env, &token).balance(&source.address),
        1_000
    );
    assert_eq!(destination.get_stake_balance(&alice), 0);
}

// ── Direct acceptance ─────────────────────────────────────────────────────────

#[test]
fn test_accept_migration_with_user_allowance() {
    let (env, client, _, _, token) = setup();

    let payer = Address::generate(&env);
    let owner = Address::generate(&env);
    mint(&env, &token, &payer, 1_000);

    // The payer funds a stake attributed to someone else.
    let live_until = env.ledger().sequence() + 100;
    TokenClient::new(&env, &token).approve(&payer, &client.address, &1_000, &live_until);
    let updated = client.accept_migration(&payer, &owner, &1_000);

    assert_eq!(updated, 1_000);
    assert_eq!(client.get_stake_balance(&owner), 1_000);
    assert_eq!(client.get_stake_balance(&payer), 0);
    assert_eq!(TokenClient::new(&env, &token).balance(&payer), 0);
}

#[test]
fn test_accept_migration_zero_fails() {
    let (env, client, _, _, _token) = setup();

    let payer = Address::generate(&env);
    let owner = Address::generate(&env);
    assert_eq!(
        client.try_accept_migration(&payer, &owner, &0),
        Err(Ok(ContractError::InvalidAmount))
    );
}

#[test]
fn test_accept_migration_requires_accepting() {
    let (env, client, _, emergency_manager, token) = setup();

    let payer = Address::generate(&env);
    let owner = Address::generate(&env);
    mint(&env, &token, &payer, 1_000);

    client.stop_accepting_new_stakes(&emergency_manager);
    assert_eq!(
        client.try_accept_migration(&payer, &owner, &1_000),
        Err(Ok(ContractError::NotAcceptingNewStakes))
    );
}

// ── Role handover ─────────────────────────────────────────────────────────────

#[test]
fn test_migration_manager_handover() {
    let (env, client, migration_manager, _, _token) = setup();

    let successor = Address::generate(&env);
    client.set_migration_manager(&migration_manager, &successor);
    assert_eq!(client.get_migration_manager(), successor);

    let destination = Address::generate(&env);
    assert_eq!(
        client.try_add_migration_destination(&migration_manager, &destination),
        Err(Ok(ContractError::NotMigrationManager))
    );
    client.add_migration_destination(&successor, &destination);
    assert!(client.is_migration_destination(&destination));
}

#[test]
fn test_migration_manager_handover_to_same_fails() {
    let (_env, client, migration_manager, _, _token) = setup();

    assert_eq!(
        client.try_set_migration_manager(&migration_manager, &migration_manager),
        Err(Ok(ContractError::SameAsCurrent))
    );
}
