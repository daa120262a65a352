//! One-way emergency latches.
//!
//! `stop_accepting` closes the door to new stake. `release_all` additionally
//! unlocks every balance for immediate withdrawal. Neither latch can be
//! reopened once set.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::errors::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ACCEPTING: Symbol = symbol_short!("ACCEPTING");
const RELEASING: Symbol = symbol_short!("RELEASING");

// ── Latch state ──────────────────────────────────────────────────────────────

/// Raw accepting flag. Starts true; `stop_accepting` is its only writer.
fn accepting_flag(env: &Env) -> bool {
    env.storage().instance().get(&ACCEPTING).unwrap_or(true)
}

pub fn releasing(env: &Env) -> bool {
    env.storage().instance().get(&RELEASING).unwrap_or(false)
}

/// Effective accepting state: the release latch overrides the raw flag.
pub fn accepting(env: &Env) -> bool {
    accepting_flag(env) && !releasing(env)
}

/// Close the door to new stake. Fails when already closed.
pub fn stop_accepting(env: &Env) -> Result<(), ContractError> {
    require_accepting(env)?;
    env.storage().instance().set(&ACCEPTING, &false);
    Ok(())
}

/// Unlock every balance for withdrawal. Fails when already released.
pub fn release_all(env: &Env) -> Result<(), ContractError> {
    require_not_releasing(env)?;
    env.storage().instance().set(&RELEASING, &true);
    Ok(())
}

// ── Guards ───────────────────────────────────────────────────────────────────

/// Gate for anything that adds stake. The release latch is checked first so
/// a released contract reports the stronger condition.
pub fn require_accepting(env: &Env) -> Result<(), ContractError> {
    require_not_releasing(env)?;
    if !accepting_flag(env) {
        return Err(ContractError::NotAcceptingNewStakes);
    }
    Ok(())
}

pub fn require_not_releasing(env: &Env) -> Result<(), ContractError> {
    if releasing(env) {
        return Err(ContractError::ReleasingAllStakes);
    }
    Ok(())
}

pub fn require_releasing(env: &Env) -> Result<(), ContractError> {
    if !releasing(env) {
        return Err(ContractError::NotReleasingAllStakes);
    }
    Ok(())
}
