use soroban_sdk::{contractclient, symbol_short, Address, Env, Symbol, Vec};

use crate::errors::ContractError;

/// Hard cap on the approved-destination registry.
pub const MAX_APPROVED_STAKING_CONTRACTS: u32 = 10;

const APPROVED: Symbol = symbol_short!("APPROVED");

/// Surface a destination contract must expose to receive migrated stake.
///
/// This contract exports the same two functions, so any instance can act as
/// a destination for any other instance custodying the same token.
#[contractclient(name = "MigratableStakingClient")]
pub trait MigratableStaking {
    /// The token the destination custodies.
    fn staked_token(env: Env) -> Address;

    /// Credit `amount` of stake to `owner`, drawing the backing tokens from
    /// the allowance `payer` has granted the destination.
    fn accept_migration(env: Env, payer: Address, owner: Address, amount: i128) -> i128;
}

// ── Registry ─────────────────────────────────────────────────────────────────

pub fn destinations(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&APPROVED)
        .unwrap_or_else(|| Vec::new(env))
}

fn store_destinations(env: &Env, list: &Vec<Address>) {
    env.storage().instance().set(&APPROVED, list);
}

pub fn is_approved(env: &Env, destination: &Address) -> bool {
    destinations(env).contains(destination)
}

/// Approve a destination. Rejects duplicates and additions past the cap.
pub fn add_destination(env: &Env, destination: &Address) -> Result<(), ContractError> {
    let mut list = destinations(env);
    if list.contains(destination) {
        return Err(ContractError::DestinationAlreadyApproved);
    }
    if list.len() >= MAX_APPROVED_STAKING_CONTRACTS {
        return Err(ContractError::DestinationRegistryFull);
    }
    list.push_back(destination.clone());
    store_destinations(env, &list);
    Ok(())
}

/// Revoke a destination. The registry is a set; removal pops the tail into
/// the vacated slot instead of shifting the remainder.
pub fn remove_destination(env: &Env, destination: &Address) -> Result<(), ContractError> {
    let mut list = destinations(env);
    let index = list
        .first_index_of(destination)
        .ok_or(ContractError::DestinationNotApproved)?;
    if let Some(tail) = list.pop_back() {
        if index < list.len() {
            list.set(index, tail);
        }
    }
    store_destinations(env, &list);
    Ok(())
}
