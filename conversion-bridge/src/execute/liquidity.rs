//! Owner liquidity handlers.
//!
//! The counter is adjusted before the transfer message is dispatched; a
//! failed transfer aborts through the reply handler and rolls the counter
//! change back with it, so the tracked value never drifts from what the
//! owner actually moved.

use cosmwasm_std::{to_json_binary, DepsMut, Env, MessageInfo, Response, SubMsg, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::execute::{REPLY_CREDIT, REPLY_DEBIT};
use crate::state::{CONFIG, INTERNAL_LIQUIDITY};

/// Deposit owner funds backing inbound releases.
pub fn execute_increase_liquidity(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let liquidity = INTERNAL_LIQUIDITY.load(deps.storage)?;
    INTERNAL_LIQUIDITY.save(deps.storage, &(liquidity + amount))?;

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
        .add_attribute("method", "increase_liquidity")
        .add_attribute("amount", amount.to_string())
        .add_attribute("internal_liquidity", (liquidity + amount).to_string()))
}

/// Drain previously deposited liquidity back to the owner.
///
/// Capped by the tracked deposit: funds locked by users for outbound
/// conversions are never drainable as liquidity, whatever the raw balance.
pub fn execute_decrease_liquidity(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let liquidity = INTERNAL_LIQUIDITY.load(deps.storage)?;
    if liquidity.is_zero() {
        return Err(ContractError::InsufficientLiquidity);
    }
    if amount > liquidity {
        return Err(ContractError::ExceedsDeposit {
            available: liquidity,
            requested: amount,
        });
    }

    INTERNAL_LIQUIDITY.save(deps.storage, &(liquidity - amount))?;

    let credit = WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_error(credit, REPLY_CREDIT))
        .add_attribute("method", "decrease_liquidity")
        .add_attribute("amount", amount.to_string())
        .add_attribute("internal_liquidity", (liquidity - amount).to_string()))
}
