#![no_std]

//! Custodial stake ledger for a single token.
//!
//! Owners stake through a cooldown-gated lifecycle (stake, unstake, withdraw,
//! restake), rewards land as stake in batches, and whole balances can move to
//! an approved successor contract without leaving custody. Two one-way
//! latches cover emergencies.

pub mod emergency;
pub mod errors;
pub mod events;
pub mod migration;
pub mod notifier;
pub mod stake;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

pub use errors::ContractError;
pub use migration::{MigratableStaking, MigratableStakingClient, MAX_APPROVED_STAKING_CONTRACTS};
pub use notifier::{StakeChangeNotifier, StakeChangeNotifierClient};
pub use stake::Stake;

use stake::{
    checked_add, checked_sub, credit_stake, credit_total, debit_total, load_stake, store_stake,
    total_staked,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");

// Instance TTL (in ledgers): bumped by every state-mutating entry point.
const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

/// Ledgers an outbound migration allowance stays live. It is consumed within
/// the same transaction; the margin only covers sequence drift.
const ALLOWANCE_TTL_LEDGERS: u32 = 720;

// ── Configuration ────────────────────────────────────────────────────────────

/// Administrative configuration, written at `initialize` and mutated only
/// through the role-checked setters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    /// Seconds an unstaked bucket waits before it becomes withdrawable.
    pub cooldown_period: u64,
    /// Controls the destination registry and the notifier.
    pub migration_manager: Address,
    /// Controls the two one-way emergency latches.
    pub emergency_manager: Address,
    /// The custodied token contract.
    pub token: Address,
    /// Optional stake-change observer. `None` disables dispatch.
    pub notifier: Option<Address>,
}

/// An owner's cooldown position, as returned by `get_unstake_status`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CooldownStatus {
    pub cooldown_amount: i128,
    pub cooldown_end_time: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Bootstrap the ledger. Callable exactly once.
    pub fn initialize(
        env: Env,
        cooldown_period: u64,
        migration_manager: Address,
        emergency_manager: Address,
        token: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }
        if cooldown_period == 0 {
            return Err(ContractError::InvalidCooldownPeriod);
        }

        let config = LedgerConfig {
            cooldown_period,
            migration_manager: migration_manager.clone(),
            emergency_manager: emergency_manager.clone(),
            token: token.clone(),
            notifier: None,
        };
        Self::store_config(&env, &config);
        Self::extend_instance_ttl(&env);

        events::publish_initialized(
            &env,
            cooldown_period,
            migration_manager,
            emergency_manager,
            token,
        );
        Ok(())
    }

    // ── Role management ──────────────────────────────────────────────────────

    /// Hand the migration manager role to `new_manager`.
    pub fn set_migration_manager(
        env: Env,
        caller: Address,
        new_manager: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let mut config = Self::load_config(&env)?;
        Self::require_migration_manager(&config, &caller)?;
        if new_manager == config.migration_manager {
            return Err(ContractError::SameAsCurrent);
        }

        let old_manager = config.migration_manager.clone();
        config.migration_manager = new_manager.clone();
        Self::store_config(&env, &config);
        Self::extend_instance_ttl(&env);

        events::publish_migration_manager_changed(&env, old_manager, new_manager);
        Ok(())
    }

    /// Hand the emergency manager role to `new_manager`.
    pub fn set_emergency_manager(
        env: Env,
        caller: Address,
        new_manager: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let mut config = Self::load_config(&env)?;
        Self::require_emergency_manager(&config, &caller)?;
        if new_manager == config.emergency_manager {
            return Err(ContractError::SameAsCurrent);
        }

        let old_manager = config.emergency_manager.clone();
        config.emergency_manager = new_manager.clone();
        Self::store_config(&env, &config);
        Self::extend_instance_ttl(&env);

        events::publish_emergency_manager_changed(&env, old_manager, new_manager);
        Ok(())
    }

    /// Point stake-change notifications at `notifier`, or clear them with
    /// `None`. Migration-manager only.
    pub fn set_stake_change_notifier(
        env: Env,
        caller: Address,
        notifier: Option<Address>,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let mut config = Self::load_config(&env)?;
        Self::require_migration_manager(&config, &caller)?;
        if notifier == config.notifier {
            return Err(ContractError::SameAsCurrent);
        }

        let old_notifier = config.notifier.clone();
        config.notifier = notifier.clone();
        Self::store_config(&env, &config);
        Self::extend_instance_ttl(&env);

        events::publish_notifier_changed(&env, old_notifier, notifier);
        Ok(())
    }

    // ── Stake lifecycle ──────────────────────────────────────────────────────

    /// Pull `amount` tokens from `staker` and add them to the staked balance.
    /// Returns the staker's staked amount after the deposit.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        staker.require_auth();
        let config = Self::load_config(&env)?;
        emergency::require_accepting(&env)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        // Take custody before crediting.
        token::Client::new(&env, &config.token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        let updated_stake = credit_stake(&env, &staker, amount)?;
        Self::extend_instance_ttl(&env);

        events::publish_staked(&env, staker.clone(), amount, updated_stake);
        notifier::notify_stake_change(&env, &config.notifier, &staker, amount, true, updated_stake);
        Ok(updated_stake)
    }

    /// Credit `amount` of stake to `owner`, funded by `payer`.
    ///
    /// Receiving side of a migration: the sending contract approves this one
    /// and the backing tokens are drawn from that allowance here. Any payer
    /// holding an allowance-backed balance can use it to stake on behalf of
    /// another owner. Returns the owner's staked amount after the credit.
    pub fn accept_migration(
        env: Env,
        payer: Address,
        owner: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        payer.require_auth();
        let config = Self::load_config(&env)?;
        emergency::require_accepting(&env)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        token::Client::new(&env, &config.token).transfer_from(
            &env.current_contract_address(),
            &payer,
            &env.current_contract_address(),
            &amount,
        );

        let updated_stake = credit_stake(&env, &owner, amount)?;
        Self::extend_instance_ttl(&env);

        events::publish_accepted_migration(&env, owner.clone(), amount, updated_stake);
        notifier::notify_stake_change(&env, &config.notifier, &owner, amount, true, updated_stake);
        Ok(updated_stake)
    }

    /// Move `amount` from the staked balance into the cooldown bucket.
    /// The whole bucket restarts its clock at now + cooldown period.
    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        staker.require_auth();
        let config = Self::load_config(&env)?;
        emergency::require_not_releasing(&env)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut stake = load_stake(&env, &staker);
        if amount > stake.amount {
            return Err(ContractError::InsufficientStake);
        }
        let now = env.ledger().timestamp();
        // An elapsed bucket must be withdrawn before more tokens join it,
        // otherwise ready funds would be silently re-locked.
        if stake.cooldown_amount > 0 && stake.cooldown_end_time <= now {
            return Err(ContractError::WithdrawalPending);
        }

        stake.amount = checked_sub(stake.amount, amount)?;
        stake.cooldown_amount = checked_add(stake.cooldown_amount, amount)?;
        stake.cooldown_end_time = now
            .checked_add(config.cooldown_period)
            .ok_or(ContractError::MathOverflow)?;
        store_stake(&env, &staker, &stake);
        debit_total(&env, amount)?;
        Self::extend_instance_ttl(&env);

        events::publish_unstaked(&env, staker.clone(), amount, stake.amount);
        notifier::notify_stake_change(&env, &config.notifier, &staker, amount, false, stake.amount);
        Ok(())
    }

    /// Pay out whatever `staker` may take: the cooldown bucket once its clock
    /// has run out, plus the staked balance itself after a full release.
    /// Returns the amount paid out.
    pub fn withdraw(env: Env, staker: Address) -> Result<i128, ContractError> {
        staker.require_auth();
        let config = Self::load_config(&env)?;
        let (withdrawn, staked_released) = Self::apply_withdraw(&env, &config, &staker)?;
        Self::extend_instance_ttl(&env);

        // A plain cooldown payout changes no staked balance and stays silent;
        // only the released staked part is reported.
        if staked_released > 0 {
            notifier::notify_stake_change(
                &env,
                &config.notifier,
                &staker,
                staked_released,
                false,
                0,
            );
        }
        Ok(withdrawn)
    }

    /// Return the whole cooldown bucket to the staked balance, whether or not
    /// its clock has run out. Returns the staker's updated staked amount.
    pub fn restake(env: Env, staker: Address) -> Result<i128, ContractError> {
        staker.require_auth();
        let config = Self::load_config(&env)?;
        emergency::require_accepting(&env)?;

        let mut stake = load_stake(&env, &staker);
        let amount = stake.cooldown_amount;
        if amount == 0 {
            return Err(ContractError::NoUnstakedTokens);
        }

        stake.amount = checked_add(stake.amount, amount)?;
        stake.cooldown_amount = 0;
        stake.cooldown_end_time = 0;
        store_stake(&env, &staker, &stake);
        credit_total(&env, amount)?;
        Self::extend_instance_ttl(&env);

        events::publish_restaked(&env, staker.clone(), amount, stake.amount);
        notifier::notify_stake_change(&env, &config.notifier, &staker, amount, true, stake.amount);
        Ok(stake.amount)
    }

    // ── Rewards ──────────────────────────────────────────────────────────────

    /// Distribute `total_amount` of rewards as stake, split across
    /// `stake_owners` by the index-aligned `amounts`. One transfer from
    /// `distributor` funds the whole batch; the batch applies in full or
    /// not at all.
    pub fn distribute_rewards(
        env: Env,
        distributor: Address,
        total_amount: i128,
        stake_owners: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<(), ContractError> {
        distributor.require_auth();
        let config = Self::load_config(&env)?;
        emergency::require_accepting(&env)?;

        if total_amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if stake_owners.is_empty() {
            return Err(ContractError::EmptyBatch);
        }
        if stake_owners.len() != amounts.len() {
            return Err(ContractError::BatchLengthMismatch);
        }

        // Validate the whole batch before touching any balance.
        let mut expected_total: i128 = 0;
        for amount in amounts.iter() {
            if amount <= 0 {
                return Err(ContractError::InvalidAmount);
            }
            expected_total = checked_add(expected_total, amount)?;
        }
        if expected_total != total_amount {
            return Err(ContractError::BatchTotalMismatch);
        }

        // One pull funds the whole batch.
        token::Client::new(&env, &config.token).transfer(
            &distributor,
            &env.current_contract_address(),
            &total_amount,
        );

        let mut signs: Vec<bool> = Vec::new(&env);
        let mut updated_stakes: Vec<i128> = Vec::new(&env);
        for (owner, amount) in stake_owners.iter().zip(amounts.iter()) {
            let updated_stake = credit_stake(&env, &owner, amount)?;
            events::publish_staked(&env, owner, amount, updated_stake);
            signs.push_back(true);
            updated_stakes.push_back(updated_stake);
        }
        Self::extend_instance_ttl(&env);

        // Dispatched only after every entry is committed, so the notifier
        // never observes a partially applied batch.
        notifier::notify_stake_change_batch(
            &env,
            &config.notifier,
            &stake_owners,
            &amounts,
            &signs,
            &updated_stakes,
        );
        Ok(())
    }

    // ── Migration ────────────────────────────────────────────────────────────

    /// Approve `destination` as a migration target. Migration-manager only.
    pub fn add_migration_destination(
        env: Env,
        caller: Address,
        destination: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let config = Self::load_config(&env)?;
        Self::require_migration_manager(&config, &caller)?;
        migration::add_destination(&env, &destination)?;
        Self::extend_instance_ttl(&env);

        events::publish_migration_destination_added(&env, destination);
        Ok(())
    }

    /// Revoke an approved migration target. Migration-manager only.
    pub fn remove_migration_destination(
        env: Env,
        caller: Address,
        destination: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let config = Self::load_config(&env)?;
        Self::require_migration_manager(&config, &caller)?;
        migration::remove_destination(&env, &destination)?;
        Self::extend_instance_ttl(&env);

        events::publish_migration_destination_removed(&env, destination);
        Ok(())
    }

    /// Move `amount` of `staker`'s staked tokens to an approved destination
    /// contract, without the tokens ever leaving custody. The destination is
    /// granted a one-shot allowance and pulls the tokens while crediting the
    /// same owner. Cooldown tokens do not migrate.
    pub fn migrate_staked_tokens(
        env: Env,
        staker: Address,
        destination: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        staker.require_auth();
        let config = Self::load_config(&env)?;
        emergency::require_not_releasing(&env)?;
        if !migration::is_approved(&env, &destination) {
            return Err(ContractError::DestinationNotApproved);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut stake = load_stake(&env, &staker);
        if amount > stake.amount {
            return Err(ContractError::InsufficientStake);
        }

        let destination_client = MigratableStakingClient::new(&env, &destination);
        if destination_client.staked_token() != config.token {
            return Err(ContractError::TokenMismatch);
        }

        stake.amount = checked_sub(stake.amount, amount)?;
        store_stake(&env, &staker, &stake);
        debit_total(&env, amount)?;
        Self::extend_instance_ttl(&env);

        // Local effects are committed; hand the tokens over. A failure on the
        // destination side aborts the whole transaction.
        let live_until = env
            .ledger()
            .sequence()
            .saturating_add(ALLOWANCE_TTL_LEDGERS);
        token::Client::new(&env, &config.token).approve(
            &env.current_contract_address(),
            &destination,
            &amount,
            &live_until,
        );
        destination_client.accept_migration(&env.current_contract_address(), &staker, &amount);

        events::publish_migrated_stake(&env, staker.clone(), destination, amount, stake.amount);
        notifier::notify_stake_migration(&env, &config.notifier, &staker, amount);
        Ok(())
    }

    // ── Emergency ────────────────────────────────────────────────────────────

    /// Permanently stop new stake from entering. Emergency-manager only.
    pub fn stop_accepting_new_stakes(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        let config = Self::load_config(&env)?;
        Self::require_emergency_manager(&config, &caller)?;
        emergency::stop_accepting(&env)?;
        Self::extend_instance_ttl(&env);

        events::publish_stopped_accepting_new_stakes(&env, caller);
        Ok(())
    }

    /// Permanently unlock every balance for immediate withdrawal.
    /// Emergency-manager only.
    pub fn release_all_stakes(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        let config = Self::load_config(&env)?;
        Self::require_emergency_manager(&config, &caller)?;
        emergency::release_all(&env)?;
        Self::extend_instance_ttl(&env);

        events::publish_released_all_stakes(&env, caller);
        Ok(())
    }

    /// Pay out the full balance of every listed owner after a release. Any
    /// identity may trigger this; tokens only ever move to their owners.
    /// The batch applies in full or not at all.
    pub fn withdraw_released_stakes(
        env: Env,
        stake_owners: Vec<Address>,
    ) -> Result<(), ContractError> {
        let config = Self::load_config(&env)?;
        emergency::require_releasing(&env)?;
        if stake_owners.is_empty() {
            return Err(ContractError::EmptyBatch);
        }

        let mut amounts: Vec<i128> = Vec::new(&env);
        let mut signs: Vec<bool> = Vec::new(&env);
        let mut updated_stakes: Vec<i128> = Vec::new(&env);
        for owner in stake_owners.iter() {
            let (_, staked_released) = Self::apply_withdraw(&env, &config, &owner)?;
            amounts.push_back(staked_released);
            signs.push_back(false);
            updated_stakes.push_back(0);
        }
        Self::extend_instance_ttl(&env);

        notifier::notify_stake_change_batch(
            &env,
            &config.notifier,
            &stake_owners,
            &amounts,
            &signs,
            &updated_stakes,
        );
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────────────

    pub fn get_stake_balance(env: Env, owner: Address) -> i128 {
        load_stake(&env, &owner).amount
    }

    pub fn get_total_staked_tokens(env: Env) -> i128 {
        total_staked(&env)
    }

    /// The owner's cooldown bucket and its end time.
    pub fn get_unstake_status(env: Env, owner: Address) -> CooldownStatus {
        let stake = load_stake(&env, &owner);
        CooldownStatus {
            cooldown_amount: stake.cooldown_amount,
            cooldown_end_time: stake.cooldown_end_time,
        }
    }

    /// The custodied token. Part of the migration surface.
    pub fn staked_token(env: Env) -> Result<Address, ContractError> {
        Ok(Self::load_config(&env)?.token)
    }

    pub fn get_cooldown_period(env: Env) -> Result<u64, ContractError> {
        Ok(Self::load_config(&env)?.cooldown_period)
    }

    pub fn get_migration_manager(env: Env) -> Result<Address, ContractError> {
        Ok(Self::load_config(&env)?.migration_manager)
    }

    pub fn get_emergency_manager(env: Env) -> Result<Address, ContractError> {
        Ok(Self::load_config(&env)?.emergency_manager)
    }

    pub fn get_stake_change_notifier(env: Env) -> Result<Option<Address>, ContractError> {
        Ok(Self::load_config(&env)?.notifier)
    }

    pub fn get_migration_destinations(env: Env) -> Vec<Address> {
        migration::destinations(&env)
    }

    pub fn is_migration_destination(env: Env, destination: Address) -> bool {
        migration::is_approved(&env, &destination)
    }

    /// Whether new stake can currently enter. False once either latch is set.
    pub fn is_accepting_new_stakes(env: Env) -> bool {
        emergency::accepting(&env)
    }

    pub fn is_releasing_all_stakes(env: Env) -> bool {
        emergency::releasing(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&CONFIG)
    }

    // ── Internal ─────────────────────────────────────────────────────────────

    fn load_config(env: &Env) -> Result<LedgerConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    fn store_config(env: &Env, config: &LedgerConfig) {
        env.storage().instance().set(&CONFIG, config);
    }

    fn require_migration_manager(
        config: &LedgerConfig,
        caller: &Address,
    ) -> Result<(), ContractError> {
        if *caller != config.migration_manager {
            return Err(ContractError::NotMigrationManager);
        }
        Ok(())
    }

    fn require_emergency_manager(
        config: &LedgerConfig,
        caller: &Address,
    ) -> Result<(), ContractError> {
        if *caller != config.emergency_manager {
            return Err(ContractError::NotEmergencyManager);
        }
        Ok(())
    }

    /// Shared payout path for `withdraw` and `withdraw_released_stakes`.
    ///
    /// Checks, then effects, then the token transfer (checks-effects-
    /// interactions). Publishes the per-owner event; stake-change
    /// notification is left to the caller so batches can defer it.
    /// Returns (amount paid out, staked part released).
    fn apply_withdraw(
        env: &Env,
        config: &LedgerConfig,
        owner: &Address,
    ) -> Result<(i128, i128), ContractError> {
        let mut stake = load_stake(env, owner);
        let releasing = emergency::releasing(env);

        if !releasing {
            if stake.cooldown_amount == 0 {
                return Err(ContractError::NoUnstakedTokens);
            }
            if stake.cooldown_end_time > env.ledger().timestamp() {
                return Err(ContractError::CooldownNotFinished);
            }
        }

        let staked_released = if releasing { stake.amount } else { 0 };
        let withdrawn = checked_add(stake.cooldown_amount, staked_released)?;
        if withdrawn == 0 {
            return Err(ContractError::NoUnstakedTokens);
        }

        stake.amount = checked_sub(stake.amount, staked_released)?;
        stake.cooldown_amount = 0;
        stake.cooldown_end_time = 0;
        store_stake(env, owner, &stake);
        if staked_released > 0 {
            debit_total(env, staked_released)?;
        }

        token::Client::new(env, &config.token).transfer(
            &env.current_contract_address(),
            owner,
            &withdrawn,
        );

        events::publish_withdrew(env, owner.clone(), withdrawn, stake.amount);
        Ok((withdrawn, staked_released))
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

#[cfg(test)]
mod test_migration;
