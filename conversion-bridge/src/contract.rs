//! Conversion bridge contract - entry points.
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult, SubMsgResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_ownership, execute_cancel_owner_proposal, execute_convert_in,
    execute_convert_out, execute_decrease_liquidity, execute_increase_liquidity,
    execute_propose_owner, execute_update_authorizer, execute_update_limits, validate_limits,
    REPLY_CREDIT, REPLY_DEBIT,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_authorizer, query_balance, query_config, query_conversion_digest, query_limits,
    query_liquidity, query_message_used, query_pending_owner, query_stats,
};
use crate::state::{Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, INTERNAL_LIQUIDITY, STATS};
use crate::verify::{identity_to_hex, parse_authorizer};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let token = deps.api.addr_validate(&msg.token)?;

    // Same rules as the corresponding update operations
    let authorizer = identity_to_hex(&parse_authorizer(&msg.authorizer)?);
    validate_limits(msg.min_amount, msg.max_amount)?;

    let config = Config {
        owner,
        token,
        authorizer,
        min_amount: msg.min_amount,
        max_amount: msg.max_amount,
    };
    CONFIG.save(deps.storage, &config)?;

    INTERNAL_LIQUIDITY.save(deps.storage, &Uint128::zero())?;
    STATS.save(
        deps.storage,
        &Stats {
            total_conversions_out: 0,
            total_conversions_in: 0,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("token", config.token)
        .add_attribute("authorizer", config.authorizer)
        .add_attribute("min_amount", config.min_amount.to_string())
        .add_attribute("max_amount", config.max_amount.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Conversions
        ExecuteMsg::ConvertOut {
            amount,
            conversion_id,
            signature,
        } => execute_convert_out(deps, env, info, amount, conversion_id, signature),
        ExecuteMsg::ConvertIn {
            recipient,
            amount,
            conversion_id,
            signature,
        } => execute_convert_in(deps, env, info, recipient, amount, conversion_id, signature),

        // Liquidity management
        ExecuteMsg::IncreaseLiquidity { amount } => {
            execute_increase_liquidity(deps, env, info, amount)
        }
        ExecuteMsg::DecreaseLiquidity { amount } => {
            execute_decrease_liquidity(deps, env, info, amount)
        }

        // Configuration
        ExecuteMsg::UpdateAuthorizer { authorizer } => {
            execute_update_authorizer(deps, info, authorizer)
        }
        ExecuteMsg::UpdateLimits {
            min_amount,
            max_amount,
        } => execute_update_limits(deps, info, min_amount, max_amount),

        // Ownership
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwnership {} => execute_accept_ownership(deps, info),
        ExecuteMsg::CancelOwnerProposal {} => execute_cancel_owner_proposal(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Value-transfer submessages are dispatched with `reply_on_error`. A failed
/// transfer lands here and is rejected as `TransferFailed`, which aborts the
/// whole call - the used-digest insert and any liquidity counter change are
/// rolled back with it.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        REPLY_DEBIT | REPLY_CREDIT => match msg.result {
            SubMsgResult::Err(reason) => Err(ContractError::TransferFailed { reason }),
            // reply_on_error never delivers a success
            SubMsgResult::Ok(_) => Ok(Response::new()),
        },
        id => Err(ContractError::Std(StdError::generic_err(format!(
            "unknown reply id: {id}"
        )))),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Authorizer {} => to_json_binary(&query_authorizer(deps)?),
        QueryMsg::Limits {} => to_json_binary(&query_limits(deps)?),
        QueryMsg::Balance {} => to_json_binary(&query_balance(deps, env)?),
        QueryMsg::Liquidity {} => to_json_binary(&query_liquidity(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::MessageUsed { digest } => to_json_binary(&query_message_used(deps, digest)?),
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
        QueryMsg::ConversionDigest {
            direction,
            amount,
            caller,
            conversion_id,
        } => to_json_binary(&query_conversion_digest(
            env,
            direction,
            amount,
            caller,
            conversion_id,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
