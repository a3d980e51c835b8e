//! Liquidity ledger tests: conservation, drain bounds, counter rollback on
//! transfer failure, and the documented divergence between the tracked
//! counter and the contract's raw holdings.

use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::{Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use conversion_bridge::hash::{
    conversion_digest, eth_signed_message_hash, TAG_CONVERSION_IN, TAG_CONVERSION_OUT,
};
use conversion_bridge::msg::{
    BalanceResponse, ExecuteMsg, InstantiateMsg, LiquidityResponse, QueryMsg,
};
use conversion_bridge::verify::{identity_from_pubkey, identity_to_hex};
use conversion_bridge::ContractError;

// ============================================================================
// Test Setup
// ============================================================================

const AUTHORIZER_KEY: [u8; 32] = [0x42; 32];
const MIN_AMOUNT: u128 = 1_000;
const MAX_AMOUNT: u128 = 1_000_000_000_000;
const INITIAL_BALANCE: u128 = 10_000_000_000;

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        conversion_bridge::contract::execute,
        conversion_bridge::contract::instantiate,
        conversion_bridge::contract::query,
    )
    .with_reply(conversion_bridge::contract::reply);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn authorizer_key() -> SigningKey {
    SigningKey::from_slice(&AUTHORIZER_KEY).unwrap()
}

fn authorizer_hex(key: &SigningKey) -> String {
    let point = key.verifying_key().to_encoded_point(false);
    let identity = identity_from_pubkey(point.as_bytes()).unwrap();
    identity_to_hex(&identity)
}

fn sign_conversion(
    key: &SigningKey,
    tag: &str,
    amount: u128,
    caller: &str,
    conversion_id: &str,
    contract: &str,
) -> Binary {
    let digest = conversion_digest(tag, amount, caller, conversion_id, contract);
    let wrapped = eth_signed_message_hash(&digest);
    let (signature, recovery_id) = key.sign_prehash_recoverable(&wrapped).unwrap();
    let mut bytes = signature.to_bytes().to_vec();
    bytes.push(recovery_id.to_byte() + 27);
    Binary::from(bytes)
}

fn setup() -> (App, Addr, Addr, Addr, Addr) {
    let mut app = App::default();

    let owner = Addr::unchecked("terra1owner");
    let user = Addr::unchecked("terra1user");

    let cw20_code = app.store_code(contract_cw20());
    let token_addr = app
        .instantiate_contract(
            cw20_code,
            owner.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Bridged Asset".to_string(),
                symbol: "BAST".to_string(),
                decimals: 6,
                initial_balances: vec![
                    Cw20Coin {
                        address: owner.to_string(),
                        amount: Uint128::from(INITIAL_BALANCE),
                    },
                    Cw20Coin {
                        address: user.to_string(),
                        amount: Uint128::from(INITIAL_BALANCE),
                    },
                ],
                mint: None,
                marketing: None,
            },
            &[],
            "bridged-asset",
            None,
        )
        .unwrap();

    let bridge_code = app.store_code(contract_bridge());
    let bridge_addr = app
        .instantiate_contract(
            bridge_code,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                token: token_addr.to_string(),
                authorizer: authorizer_hex(&authorizer_key()),
                min_amount: Uint128::from(MIN_AMOUNT),
                max_amount: Uint128::from(MAX_AMOUNT),
            },
            &[],
            "conversion-bridge",
            Some(owner.to_string()),
        )
        .unwrap();

    (app, bridge_addr, token_addr, owner, user)
}

fn approve(app: &mut App, token: &Addr, holder: &Addr, bridge: &Addr, amount: u128) {
    app.execute_contract(
        holder.clone(),
        token.clone(),
        &Cw20ExecuteMsg::IncreaseAllowance {
            spender: bridge.to_string(),
            amount: Uint128::from(amount),
            expires: None,
        },
        &[],
    )
    .unwrap();
}

fn token_balance(app: &App, token: &Addr, account: &Addr) -> u128 {
    let resp: cw20::BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: account.to_string(),
            },
        )
        .unwrap();
    resp.balance.u128()
}

fn liquidity(app: &App, bridge: &Addr) -> u128 {
    let resp: LiquidityResponse = app
        .wrap()
        .query_wasm_smart(bridge, &QueryMsg::Liquidity {})
        .unwrap();
    resp.internal_liquidity.u128()
}

fn increase_liquidity(app: &mut App, owner: &Addr, bridge: &Addr, amount: u128) {
    app.execute_contract(
        owner.clone(),
        bridge.clone(),
        &ExecuteMsg::IncreaseLiquidity {
            amount: Uint128::from(amount),
        },
        &[],
    )
    .unwrap();
}

fn decrease_liquidity(app: &mut App, owner: &Addr, bridge: &Addr, amount: u128) {
    app.execute_contract(
        owner.clone(),
        bridge.clone(),
        &ExecuteMsg::DecreaseLiquidity {
            amount: Uint128::from(amount),
        },
        &[],
    )
    .unwrap();
}

// ============================================================================
// Conservation
// ============================================================================

/// For a sequence of individually successful operations the counter equals
/// the sum of increases minus decreases, and tracks the funds the owner
/// actually moved.
#[test]
fn test_liquidity_conservation() {
    let (mut app, bridge_addr, token_addr, owner, _user) = setup();

    approve(&mut app, &token_addr, &owner, &bridge_addr, 100_000);

    increase_liquidity(&mut app, &owner, &bridge_addr, 5_000);
    assert_eq!(liquidity(&app, &bridge_addr), 5_000);

    increase_liquidity(&mut app, &owner, &bridge_addr, 3_000);
    assert_eq!(liquidity(&app, &bridge_addr), 8_000);

    decrease_liquidity(&mut app, &owner, &bridge_addr, 2_000);
    assert_eq!(liquidity(&app, &bridge_addr), 6_000);

    increase_liquidity(&mut app, &owner, &bridge_addr, 4_000);
    decrease_liquidity(&mut app, &owner, &bridge_addr, 9_000);
    assert_eq!(liquidity(&app, &bridge_addr), 1_000);

    // With only owner operations, the counter matches raw holdings exactly
    assert_eq!(token_balance(&app, &token_addr, &bridge_addr), 1_000);
    assert_eq!(
        token_balance(&app, &token_addr, &owner),
        INITIAL_BALANCE - 1_000
    );
}

// ============================================================================
// Drain Bounds
// ============================================================================

#[test]
fn test_decrease_with_empty_deposit() {
    let (mut app, bridge_addr, _token_addr, owner, _user) = setup();

    let err = app
        .execute_contract(
            owner.clone(),
            bridge_addr.clone(),
            &ExecuteMsg::DecreaseLiquidity {
                amount: Uint128::from(1u128),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::InsufficientLiquidity)
    );
}

#[test]
fn test_decrease_beyond_deposit() {
    let (mut app, bridge_addr, token_addr, owner, _user) = setup();

    approve(&mut app, &token_addr, &owner, &bridge_addr, 5_000);
    increase_liquidity(&mut app, &owner, &bridge_addr, 5_000);

    let err = app
        .execute_contract(
            owner.clone(),
            bridge_addr.clone(),
            &ExecuteMsg::DecreaseLiquidity {
                amount: Uint128::from(5_001u128),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::ExceedsDeposit {
            available: Uint128::from(5_000u128),
            requested: Uint128::from(5_001u128),
        })
    );

    // The failed drain changed nothing
    assert_eq!(liquidity(&app, &bridge_addr), 5_000);
}

/// Locked user funds inflate the raw balance but are never drainable as
/// liquidity: the counter is the cap, not the balance.
#[test]
fn test_locked_funds_not_drainable() {
    let (mut app, bridge_addr, token_addr, owner, user) = setup();

    // User locks 50_000 through a signed outbound conversion
    approve(&mut app, &token_addr, &user, &bridge_addr, 50_000);
    let signature = sign_conversion(
        &authorizer_key(),
        TAG_CONVERSION_OUT,
        50_000,
        user.as_str(),
        "lock-1",
        bridge_addr.as_str(),
    );
    app.execute_contract(
        user.clone(),
        bridge_addr.clone(),
        &ExecuteMsg::ConvertOut {
            amount: Uint128::from(50_000u128),
            conversion_id: "lock-1".to_string(),
            signature,
        },
        &[],
    )
    .unwrap();

    assert_eq!(token_balance(&app, &token_addr, &bridge_addr), 50_000);
    assert_eq!(liquidity(&app, &bridge_addr), 0);

    // Raw balance is 50_000, tracked deposit is zero: nothing to drain
    let err = app
        .execute_contract(
            owner.clone(),
            bridge_addr.clone(),
            &ExecuteMsg::DecreaseLiquidity {
                amount: Uint128::from(1_000u128),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::InsufficientLiquidity)
    );
}

#[test]
fn test_liquidity_owner_only() {
    let (mut app, bridge_addr, token_addr, _owner, user) = setup();

    approve(&mut app, &token_addr, &user, &bridge_addr, 5_000);

    let err = app
        .execute_contract(
            user.clone(),
            bridge_addr.clone(),
            &ExecuteMsg::IncreaseLiquidity {
                amount: Uint128::from(5_000u128),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::Unauthorized)
    );

    let err = app
        .execute_contract(
            user.clone(),
            bridge_addr.clone(),
            &ExecuteMsg::DecreaseLiquidity {
                amount: Uint128::from(1u128),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::Unauthorized)
    );
}

// ============================================================================
// Atomic Rollback
// ============================================================================

/// A failed deposit transfer rolls the counter increment back with it.
#[test]
fn test_increase_rollback_on_transfer_failure() {
    let (mut app, bridge_addr, _token_addr, owner, _user) = setup();

    // No allowance granted: the debit fails
    let err = app
        .execute_contract(
            owner.clone(),
            bridge_addr.clone(),
            &ExecuteMsg::IncreaseLiquidity {
                amount: Uint128::from(5_000u128),
            },
            &[],
        )
        .unwrap_err();
    assert!(
        err.root_cause().to_string().contains("Transfer failed"),
        "expected TransferFailed, got: {err:?}"
    );

    assert_eq!(liquidity(&app, &bridge_addr), 0);
}

// ============================================================================
// Counter vs Raw Holdings (documented divergence)
// ============================================================================

/// Inbound conversions check the raw balance, not the tracked counter: a
/// release can draw on locked user funds while the counter is zero, and can
/// leave the counter above the raw balance afterwards. Owner drains stay
/// capped by the counter and abort when the holdings cannot cover them.
#[test]
fn test_convert_in_draws_on_locked_funds_not_liquidity() {
    let (mut app, bridge_addr, token_addr, owner, user) = setup();

    // 100_000 arrives purely from a user lock; no owner liquidity at all
    approve(&mut app, &token_addr, &user, &bridge_addr, 100_000);
    let lock_sig = sign_conversion(
        &authorizer_key(),
        TAG_CONVERSION_OUT,
        100_000,
        user.as_str(),
        "div-lock",
        bridge_addr.as_str(),
    );
    app.execute_contract(
        user.clone(),
        bridge_addr.clone(),
        &ExecuteMsg::ConvertOut {
            amount: Uint128::from(100_000u128),
            conversion_id: "div-lock".to_string(),
            signature: lock_sig,
        },
        &[],
    )
    .unwrap();
    assert_eq!(liquidity(&app, &bridge_addr), 0);

    // A release for 50_000 succeeds against the locked funds
    let release_sig = sign_conversion(
        &authorizer_key(),
        TAG_CONVERSION_IN,
        50_000,
        user.as_str(),
        "div-release",
        bridge_addr.as_str(),
    );
    app.execute_contract(
        user.clone(),
        bridge_addr.clone(),
        &ExecuteMsg::ConvertIn {
            recipient: user.to_string(),
            amount: Uint128::from(50_000u128),
            conversion_id: "div-release".to_string(),
            signature: release_sig,
        },
        &[],
    )
    .unwrap();
    assert_eq!(token_balance(&app, &token_addr, &bridge_addr), 50_000);

    // Owner deposits 30_000: balance 80_000, counter 30_000
    approve(&mut app, &token_addr, &owner, &bridge_addr, 30_000);
    increase_liquidity(&mut app, &owner, &bridge_addr, 30_000);
    assert_eq!(token_balance(&app, &token_addr, &bridge_addr), 80_000);
    assert_eq!(liquidity(&app, &bridge_addr), 30_000);

    // Another release for 60_000 passes the raw-balance check and leaves
    // the counter (30_000) above the remaining holdings (20_000)
    let big_sig = sign_conversion(
        &authorizer_key(),
        TAG_CONVERSION_IN,
        60_000,
        user.as_str(),
        "div-big",
        bridge_addr.as_str(),
    );
    app.execute_contract(
        user.clone(),
        bridge_addr.clone(),
        &ExecuteMsg::ConvertIn {
            recipient: user.to_string(),
            amount: Uint128::from(60_000u128),
            conversion_id: "div-big".to_string(),
            signature: big_sig,
        },
        &[],
    )
    .unwrap();
    assert_eq!(token_balance(&app, &token_addr, &bridge_addr), 20_000);
    assert_eq!(liquidity(&app, &bridge_addr), 30_000);

    let balance: BalanceResponse = app
        .wrap()
        .query_wasm_smart(&bridge_addr, &QueryMsg::Balance {})
        .unwrap();
    assert_eq!(balance.balance, Uint128::from(20_000u128));

    // Draining the full tracked deposit now fails in the token contract;
    // the counter decrement is rolled back atomically
    let err = app
        .execute_contract(
            owner.clone(),
            bridge_addr.clone(),
            &ExecuteMsg::DecreaseLiquidity {
                amount: Uint128::from(30_000u128),
            },
            &[],
        )
        .unwrap_err();
    assert!(
        err.root_cause().to_string().contains("Transfer failed"),
        "expected TransferFailed, got: {err:?}"
    );
    assert_eq!(liquidity(&app, &bridge_addr), 30_000);

    // A drain within the remaining holdings still succeeds
    decrease_liquidity(&mut app, &owner, &bridge_addr, 20_000);
    assert_eq!(liquidity(&app, &bridge_addr), 10_000);
    assert_eq!(token_balance(&app, &token_addr, &bridge_addr), 0);
}
