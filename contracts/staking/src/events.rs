#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub cooldown_period: u64,
    pub migration_manager: Address,
    pub emergency_manager: Address,
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when an owner's staked balance grows, by a deposit or a reward.
/// `total_staked` is the owner's staked amount after the operation.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub owner: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an owner moves staked tokens into cooldown.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub owner: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an owner takes tokens out of the contract.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrewEvent {
    pub owner: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an owner returns a cooldown bucket to the staked balance.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RestakedEvent {
    pub owner: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when stake migrated from another contract is credited here.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AcceptedMigrationEvent {
    pub owner: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an owner moves staked tokens to an approved destination.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigratedStakeEvent {
    pub owner: Address,
    pub destination: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when the emergency manager stops new stake from entering.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoppedAcceptingNewStakesEvent {
    pub emergency_manager: Address,
    pub timestamp: u64,
}

/// Fired when the emergency manager releases all stakes for withdrawal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleasedAllStakesEvent {
    pub emergency_manager: Address,
    pub timestamp: u64,
}

/// Fired when a destination joins the approved registry.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationDestinationAddedEvent {
    pub destination: Address,
    pub timestamp: u64,
}

/// Fired when a destination leaves the approved registry.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationDestinationRemovedEvent {
    pub destination: Address,
    pub timestamp: u64,
}

/// Fired when the migration manager role is handed over.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationManagerChangedEvent {
    pub old_manager: Address,
    pub new_manager: Address,
    pub timestamp: u64,
}

/// Fired when the emergency manager role is handed over.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyManagerChangedEvent {
    pub old_manager: Address,
    pub new_manager: Address,
    pub timestamp: u64,
}

/// Fired when the stake-change notifier is set, replaced or cleared.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeChangeNotifierChangedEvent {
    pub old_notifier: Option<Address>,
    pub new_notifier: Option<Address>,
    pub timestamp: u64,
}

/// Fired when a notifier invocation fails; the triggering operation has
/// already committed. `owner` is absent for batch notifications.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeChangeNotificationFailedEvent {
    pub notifier: Address,
    pub owner: Option<Address>,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    cooldown_period: u64,
    migration_manager: Address,
    emergency_manager: Address,
    token: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            cooldown_period,
            migration_manager,
            emergency_manager,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, owner: Address, amount: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), owner.clone()),
        StakedEvent {
            owner,
            amount,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, owner: Address, amount: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), owner.clone()),
        UnstakedEvent {
            owner,
            amount,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrew(env: &Env, owner: Address, amount: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDREW"), owner.clone()),
        WithdrewEvent {
            owner,
            amount,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_restaked(env: &Env, owner: Address, amount: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("RESTAKED"), owner.clone()),
        RestakedEvent {
            owner,
            amount,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_accepted_migration(env: &Env, owner: Address, amount: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("MIGACCEPT"), owner.clone()),
        AcceptedMigrationEvent {
            owner,
            amount,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_migrated_stake(
    env: &Env,
    owner: Address,
    destination: Address,
    amount: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("MIGRATED"), owner.clone()),
        MigratedStakeEvent {
            owner,
            destination,
            amount,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stopped_accepting_new_stakes(env: &Env, emergency_manager: Address) {
    env.events().publish(
        (symbol_short!("STOPPED"),),
        StoppedAcceptingNewStakesEvent {
            emergency_manager,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_released_all_stakes(env: &Env, emergency_manager: Address) {
    env.events().publish(
        (symbol_short!("RELEASED"),),
        ReleasedAllStakesEvent {
            emergency_manager,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_migration_destination_added(env: &Env, destination: Address) {
    env.events().publish(
        (symbol_short!("DEST_ADD"), destination.clone()),
        MigrationDestinationAddedEvent {
            destination,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_migration_destination_removed(env: &Env, destination: Address) {
    env.events().publish(
        (symbol_short!("DEST_RM"), destination.clone()),
        MigrationDestinationRemovedEvent {
            destination,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_migration_manager_changed(env: &Env, old_manager: Address, new_manager: Address) {
    env.events().publish(
        (symbol_short!("MIG_MGR"),),
        MigrationManagerChangedEvent {
            old_manager,
            new_manager,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_manager_changed(env: &Env, old_manager: Address, new_manager: Address) {
    env.events().publish(
        (symbol_short!("EMRG_MGR"),),
        EmergencyManagerChangedEvent {
            old_manager,
            new_manager,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_notifier_changed(
    env: &Env,
    old_notifier: Option<Address>,
    new_notifier: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("NOTIF_SET"),),
        StakeChangeNotifierChangedEvent {
            old_notifier,
            new_notifier,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_notification_failed(env: &Env, notifier: Address, owner: Option<Address>) {
    env.events().publish(
        (symbol_short!("NOTIFFAIL"), notifier.clone()),
        StakeChangeNotificationFailedEvent {
            notifier,
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}
