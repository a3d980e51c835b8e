//! Query message handlers. All side-effect free.

use cosmwasm_std::{Binary, Deps, Env, StdResult, Uint128};
use cw20::Cw20QueryMsg;

use crate::hash::{conversion_digest, TAG_CONVERSION_IN, TAG_CONVERSION_OUT};
use crate::msg::{
    AuthorizerResponse, BalanceResponse, ConfigResponse, ConversionDigestResponse,
    ConversionDirection, LimitsResponse, LiquidityResponse, MessageUsedResponse,
    PendingOwnerResponse, StatsResponse,
};
use crate::state::{CONFIG, INTERNAL_LIQUIDITY, PENDING_OWNER, STATS, USED_MESSAGES};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        token: config.token,
        authorizer: config.authorizer,
        min_amount: config.min_amount,
        max_amount: config.max_amount,
    })
}

pub fn query_authorizer(deps: Deps) -> StdResult<AuthorizerResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(AuthorizerResponse {
        authorizer: config.authorizer,
    })
}

pub fn query_limits(deps: Deps) -> StdResult<LimitsResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(LimitsResponse {
        min_amount: config.min_amount,
        max_amount: config.max_amount,
    })
}

/// Current transferable holdings, straight from the token contract
pub fn query_balance(deps: Deps, env: Env) -> StdResult<BalanceResponse> {
    let config = CONFIG.load(deps.storage)?;
    let holdings: cw20::BalanceResponse = deps.querier.query_wasm_smart(
        config.token,
        &Cw20QueryMsg::Balance {
            address: env.contract.address.to_string(),
        },
    )?;
    Ok(BalanceResponse {
        balance: holdings.balance,
    })
}

pub fn query_liquidity(deps: Deps) -> StdResult<LiquidityResponse> {
    let internal_liquidity = INTERNAL_LIQUIDITY.load(deps.storage)?;
    Ok(LiquidityResponse { internal_liquidity })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_conversions_out: stats.total_conversions_out,
        total_conversions_in: stats.total_conversions_in,
    })
}

pub fn query_message_used(deps: Deps, digest: Binary) -> StdResult<MessageUsedResponse> {
    let used = USED_MESSAGES
        .may_load(deps.storage, digest.as_slice())?
        .unwrap_or(false);
    Ok(MessageUsedResponse { used })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<Option<PendingOwnerResponse>> {
    let pending = PENDING_OWNER.may_load(deps.storage)?;
    Ok(pending.map(|new_owner| PendingOwnerResponse { new_owner }))
}

/// Compute the canonical digest for the given parameters against this
/// deployment, without touching state.
pub fn query_conversion_digest(
    env: Env,
    direction: ConversionDirection,
    amount: Uint128,
    caller: String,
    conversion_id: String,
) -> StdResult<ConversionDigestResponse> {
    let tag = match direction {
        ConversionDirection::Out => TAG_CONVERSION_OUT,
        ConversionDirection::In => TAG_CONVERSION_IN,
    };
    let digest = conversion_digest(
        tag,
        amount.u128(),
        &caller,
        &conversion_id,
        env.contract.address.as_str(),
    );
    Ok(ConversionDigestResponse {
        digest: Binary::from(digest.to_vec()),
    })
}
