#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};
use staking::{StakingContract, StakingContractClient};

const COOLDOWN: u64 = 3_600;
const FUNDING: i128 = 1_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, amount: u64 },
    Unstake { user: u8, amount: u64 },
    Withdraw { user: u8 },
    Restake { user: u8 },
    AdvanceTime { seconds: u16 },
    StopAccepting,
    ReleaseAll,
    WithdrawReleased { user: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let token_client = TokenClient::new(&env, &token);

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let migration_manager = Address::generate(&env);
    let emergency_manager = Address::generate(&env);
    client.initialize(&COOLDOWN, &migration_manager, &emergency_manager, &token);

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&user, &FUNDING);
        users.push(user);
    }

    let mut now: u64 = 0;
    env.ledger().set_timestamp(now);

    // Individual calls are free to fail on arbitrary inputs; what must never
    // happen is an unhandled panic or a custody shortfall.
    for action in actions {
        match action {
            FuzzAction::Stake { user, amount } => {
                let owner = &users[user as usize % users.len()];
                let _ = client.try_stake(owner, &(amount as i128));
            }
            FuzzAction::Unstake { user, amount } => {
                let owner = &users[user as usize % users.len()];
                let _ = client.try_unstake(owner, &(amount as i128));
            }
            FuzzAction::Withdraw { user } => {
                let owner = &users[user as usize % users.len()];
                let _ = client.try_withdraw(owner);
            }
            FuzzAction::Restake { user } => {
                let owner = &users[user as usize % users.len()];
                let _ = client.try_restake(owner);
            }
            FuzzAction::AdvanceTime { seconds } => {
                now = now.saturating_add(seconds as u64);
                env.ledger().set_timestamp(now);
            }
            FuzzAction::StopAccepting => {
                let _ = client.try_stop_accepting_new_stakes(&emergency_manager);
            }
            FuzzAction::ReleaseAll => {
                let _ = client.try_release_all_stakes(&emergency_manager);
            }
            FuzzAction::WithdrawReleased { user } => {
                let owner = users[user as usize % users.len()].clone();
                let _ = client.try_withdraw_released_stakes(&soroban_sdk::vec![&env, owner]);
            }
        }
    }

    let mut staked_sum: i128 = 0;
    let mut cooldown_sum: i128 = 0;
    for user in &users {
        staked_sum += client.get_stake_balance(user);
        cooldown_sum += client.get_unstake_status(user).cooldown_amount;
    }
    assert_eq!(client.get_total_staked_tokens(), staked_sum);
    assert_eq!(
        token_client.balance(&client.address),
        staked_sum + cooldown_sum
    );
});
