use soroban_sdk::contracterror;

/// Closed error set for the staking ledger.
///
/// Codes are grouped by failure class so integrators can band-match them:
/// 1-9 lifecycle, 10-19 authorization, 20-29 invalid argument,
/// 30-49 state preconditions, 50+ arithmetic.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    // Lifecycle (1-9)
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidCooldownPeriod = 3,

    // Authorization (10-19)
    NotMigrationManager = 10,
    NotEmergencyManager = 11,

    // Invalid argument (20-29)
    InvalidAmount = 20,
    InsufficientStake = 21,
    EmptyBatch = 22,
    BatchLengthMismatch = 23,
    BatchTotalMismatch = 24,
    SameAsCurrent = 25,

    // State preconditions (30-49)
    NotAcceptingNewStakes = 30,
    ReleasingAllStakes = 31,
    NotReleasingAllStakes = 32,
    CooldownNotFinished = 33,
    WithdrawalPending = 34,
    NoUnstakedTokens = 35,
    DestinationNotApproved = 36,
    DestinationAlreadyApproved = 37,
    DestinationRegistryFull = 38,
    TokenMismatch = 39,

    // Arithmetic (50+)
    MathOverflow = 50,
}

impl ContractError {
    /// Human-readable detail for off-chain diagnostics. The numeric code is
    /// the programmatic surface; messages may change between releases.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "contract has not been initialized",
            ContractError::AlreadyInitialized => "contract is already initialized",
            ContractError::InvalidCooldownPeriod => "cooldown period must be greater than 0",
            ContractError::NotMigrationManager => "caller is not the migration manager",
            ContractError::NotEmergencyManager => "caller is not the emergency manager",
            ContractError::InvalidAmount => "amount must be greater than 0",
            ContractError::InsufficientStake => "amount exceeds the staked balance",
            ContractError::EmptyBatch => "batch must not be empty",
            ContractError::BatchLengthMismatch => "owners and amounts lengths differ",
            ContractError::BatchTotalMismatch => "declared total differs from the sum of amounts",
            ContractError::SameAsCurrent => "new value is the same as the current one",
            ContractError::NotAcceptingNewStakes => "not accepting new stakes",
            ContractError::ReleasingAllStakes => "all stakes are being released",
            ContractError::NotReleasingAllStakes => "all stakes are not being released",
            ContractError::CooldownNotFinished => "unstaked tokens are still in cooldown",
            ContractError::WithdrawalPending => {
                "outstanding tokens must be withdrawn before unstaking again"
            }
            ContractError::NoUnstakedTokens => "no unstaked tokens to withdraw or restake",
            ContractError::DestinationNotApproved => {
                "destination is not an approved staking contract"
            }
            ContractError::DestinationAlreadyApproved => "destination is already approved",
            ContractError::DestinationRegistryFull => "cannot approve more staking contracts",
            ContractError::TokenMismatch => "destination custodies a different token",
            ContractError::MathOverflow => "arithmetic overflow",
        }
    }
}
