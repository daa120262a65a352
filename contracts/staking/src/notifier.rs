use soroban_sdk::{contractclient, Address, Env, Vec};

use crate::events;

/// Observer told about every change to an owner's staked balance.
///
/// Implementations are untrusted. Dispatch goes through `try_` invocations
/// after the triggering operation has fully committed, and a failing call
/// rolls back the notifier's own frame only. The host rejects reentrant
/// calls, so a notifier cannot call back into the ledger mid-operation.
#[contractclient(name = "StakeChangeNotifierClient")]
pub trait StakeChangeNotifier {
    /// One owner's staked balance changed by `amount` in direction `sign`
    /// (`true` is an increase), leaving `updated_stake` staked.
    fn stake_change(env: Env, owner: Address, amount: i128, sign: bool, updated_stake: i128);

    /// Batch form of `stake_change`. Entries are index-aligned.
    fn stake_change_batch(
        env: Env,
        owners: Vec<Address>,
        amounts: Vec<i128>,
        signs: Vec<bool>,
        updated_stakes: Vec<i128>,
    );

    /// An owner moved `amount` of stake out to an approved destination.
    fn stake_migration(env: Env, owner: Address, amount: i128);
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

/// Report a single stake change, swallowing notifier failure.
pub fn notify_stake_change(
    env: &Env,
    notifier: &Option<Address>,
    owner: &Address,
    amount: i128,
    sign: bool,
    updated_stake: i128,
) {
    let notifier = match notifier {
        Some(addr) => addr,
        None => return,
    };
    let client = StakeChangeNotifierClient::new(env, notifier);
    if client
        .try_stake_change(owner, &amount, &sign, &updated_stake)
        .is_err()
    {
        events::publish_notification_failed(env, notifier.clone(), Some(owner.clone()));
    }
}

/// Report a batch of stake changes as one call, swallowing notifier failure.
pub fn notify_stake_change_batch(
    env: &Env,
    notifier: &Option<Address>,
    owners: &Vec<Address>,
    amounts: &Vec<i128>,
    signs: &Vec<bool>,
    updated_stakes: &Vec<i128>,
) {
    let notifier = match notifier {
        Some(addr) => addr,
        None => return,
    };
    let client = StakeChangeNotifierClient::new(env, notifier);
    if client
        .try_stake_change_batch(owners, amounts, signs, updated_stakes)
        .is_err()
    {
        events::publish_notification_failed(env, notifier.clone(), None);
    }
}

/// Report an outbound migration, swallowing notifier failure.
pub fn notify_stake_migration(env: &Env, notifier: &Option<Address>, owner: &Address, amount: i128) {
    let notifier = match notifier {
        Some(addr) => addr,
        None => return,
    };
    let client = StakeChangeNotifierClient::new(env, notifier);
    if client.try_stake_migration(owner, &amount).is_err() {
        events::publish_notification_failed(env, notifier.clone(), Some(owner.clone()));
    }
}
