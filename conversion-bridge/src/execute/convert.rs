//! Conversion handlers (lock and release).
//!
//! Both directions run the same gate, in the same order: amount bounds,
//! authorizer signature over the canonical message, replay check. Only then
//! is the digest marked used and the value transfer dispatched. The digest
//! write happens before the transfer message runs, so a reentrant call made
//! by the token contract is rejected by the ordinary replay check; if the
//! transfer fails, the reply handler aborts the call and every write here
//! is rolled back with it.

use cosmwasm_std::{
    to_json_binary, Binary, DepsMut, Env, MessageInfo, Response, SubMsg, Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20QueryMsg};

use crate::error::ContractError;
use crate::execute::{REPLY_CREDIT, REPLY_DEBIT};
use crate::hash::{bytes32_to_hex, conversion_digest, TAG_CONVERSION_IN, TAG_CONVERSION_OUT};
use crate::state::{Config, CONFIG, STATS, USED_MESSAGES};
use crate::verify::{parse_authorizer, recover_signer};

/// Lock tokens on this side of the bridge.
///
/// Pulls `amount` from the caller through the CW20 allowance they granted
/// this contract, after the authorizer's signature over
/// `("__conversionOut", amount, caller, conversion_id, contract)` checks out.
pub fn execute_convert_out(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    conversion_id: String,
    signature: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    check_limits(&config, amount)?;

    let digest = conversion_digest(
        TAG_CONVERSION_OUT,
        amount.u128(),
        info.sender.as_str(),
        &conversion_id,
        env.contract.address.as_str(),
    );
    check_authorized(deps.api, &config, &digest, &signature)?;
    check_unused(&deps, &digest)?;

    // Mark the digest consumed before the transfer message is dispatched
    USED_MESSAGES.save(deps.storage, &digest, &true)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_conversions_out += 1;
    STATS.save(deps.storage, &stats)?;

    let debit = WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_error(debit, REPLY_DEBIT))
        .add_attribute("method", "convert_out")
        .add_attribute("caller", info.sender)
        .add_attribute("conversion_id", conversion_id)
        .add_attribute("amount", amount.to_string())
        .add_attribute("digest", bytes32_to_hex(&digest)))
}

/// Release tokens on this side of the bridge.
///
/// The sufficiency check runs against the contract's actual token holdings,
/// not the tracked liquidity counter.
pub fn execute_convert_in(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
    conversion_id: String,
    signature: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    check_limits(&config, amount)?;

    if recipient.is_empty() {
        return Err(ContractError::NullIdentity);
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    let digest = conversion_digest(
        TAG_CONVERSION_IN,
        amount.u128(),
        info.sender.as_str(),
        &conversion_id,
        env.contract.address.as_str(),
    );
    check_authorized(deps.api, &config, &digest, &signature)?;
    check_unused(&deps, &digest)?;

    let holdings: cw20::BalanceResponse = deps.querier.query_wasm_smart(
        config.token.clone(),
        &Cw20QueryMsg::Balance {
            address: env.contract.address.to_string(),
        },
    )?;
    if holdings.balance < amount {
        return Err(ContractError::InsufficientLedgerBalance {
            available: holdings.balance,
            requested: amount,
        });
    }

    USED_MESSAGES.save(deps.storage, &digest, &true)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_conversions_in += 1;
    STATS.save(deps.storage, &stats)?;

    let credit = WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_error(credit, REPLY_CREDIT))
        .add_attribute("method", "convert_in")
        .add_attribute("caller", info.sender)
        .add_attribute("recipient", recipient)
        .add_attribute("conversion_id", conversion_id)
        .add_attribute("amount", amount.to_string())
        .add_attribute("digest", bytes32_to_hex(&digest)))
}

/// Amount must sit inside the configured per-transaction limits
fn check_limits(config: &Config, amount: Uint128) -> Result<(), ContractError> {
    if amount < config.min_amount || amount > config.max_amount {
        return Err(ContractError::LimitViolation {
            amount,
            min: config.min_amount,
            max: config.max_amount,
        });
    }
    Ok(())
}

/// Signature must recover to the configured authorizer
fn check_authorized(
    api: &dyn cosmwasm_std::Api,
    config: &Config,
    digest: &[u8; 32],
    signature: &Binary,
) -> Result<(), ContractError> {
    let expected = parse_authorizer(&config.authorizer)?;
    let recovered = recover_signer(api, digest, signature.as_slice())?;
    if recovered != expected {
        return Err(ContractError::InvalidSignature);
    }
    Ok(())
}

/// Digest must not already be consumed
fn check_unused(deps: &DepsMut, digest: &[u8; 32]) -> Result<(), ContractError> {
    let used = USED_MESSAGES
        .may_load(deps.storage, digest)?
        .unwrap_or(false);
    if used {
        return Err(ContractError::ReplayedMessage {
            digest: bytes32_to_hex(digest),
        });
    }
    Ok(())
}
