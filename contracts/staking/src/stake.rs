use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

/// Sum of every owner's `amount`. Tokens in cooldown are not counted.
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

/// Per-owner records live under `(STAKE, owner)` in persistent storage.
const STAKE: Symbol = symbol_short!("STAKE");

// Persistent-entry TTL (in ledgers): refreshed on every write.
const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

// ── Types ────────────────────────────────────────────────────────────────────

/// Per-owner bookkeeping. A missing record reads as all-zero; emptied
/// records are written back as zero rather than deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    /// Tokens currently staked.
    pub amount: i128,
    /// Tokens waiting out the cooldown, or ready to withdraw once it ends.
    pub cooldown_amount: i128,
    /// Timestamp after which `cooldown_amount` becomes withdrawable.
    /// Meaningful only while `cooldown_amount > 0`.
    pub cooldown_end_time: u64,
}

impl Stake {
    pub fn zero() -> Self {
        Stake {
            amount: 0,
            cooldown_amount: 0,
            cooldown_end_time: 0,
        }
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn stake_key(owner: &Address) -> (Symbol, Address) {
    (STAKE, owner.clone())
}

/// Load an owner's record, defaulting to the zero record.
pub fn load_stake(env: &Env, owner: &Address) -> Stake {
    env.storage()
        .persistent()
        .get(&stake_key(owner))
        .unwrap_or_else(Stake::zero)
}

/// Persist an owner's record and keep the entry alive.
pub fn store_stake(env: &Env, owner: &Address, stake: &Stake) {
    let key = stake_key(owner);
    env.storage().persistent().set(&key, stake);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

fn set_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}

// ── Accounting primitives ────────────────────────────────────────────────────

/// Credit `amount` to an owner's staked balance and the global counter.
/// The caller is responsible for pulling the backing tokens first.
/// Returns the owner's staked amount after the credit.
pub fn credit_stake(env: &Env, owner: &Address, amount: i128) -> Result<i128, ContractError> {
    let mut stake = load_stake(env, owner);
    stake.amount = checked_add(stake.amount, amount)?;
    store_stake(env, owner, &stake);
    credit_total(env, amount)?;
    Ok(stake.amount)
}

/// Grow the global counter after the caller has updated the owner's record.
pub fn credit_total(env: &Env, amount: i128) -> Result<(), ContractError> {
    set_total_staked(env, checked_add(total_staked(env), amount)?);
    Ok(())
}

/// Shrink the global counter after the caller has updated the owner's record.
pub fn debit_total(env: &Env, amount: i128) -> Result<(), ContractError> {
    set_total_staked(env, checked_sub(total_staked(env), amount)?);
    Ok(())
}

pub fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::MathOverflow)
}

pub fn checked_sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::MathOverflow)
}
