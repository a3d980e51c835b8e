//! Owner-gated configuration and ownership handlers.

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::state::{CONFIG, PENDING_OWNER};
use crate::verify::{identity_to_hex, parse_authorizer};

// ============================================================================
// Authorizer & Limits
// ============================================================================

/// Replace the authorizer identity.
///
/// Effective immediately for all subsequent verifications; signatures from
/// the previous authorizer stop verifying, already-consumed digests stay
/// consumed.
pub fn execute_update_authorizer(
    deps: DepsMut,
    info: MessageInfo,
    authorizer: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let identity = parse_authorizer(&authorizer)?;
    config.authorizer = identity_to_hex(&identity);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_authorizer")
        .add_attribute("authorizer", config.authorizer))
}

/// Atomically replace both conversion limits.
pub fn execute_update_limits(
    deps: DepsMut,
    info: MessageInfo,
    min_amount: Uint128,
    max_amount: Uint128,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    validate_limits(min_amount, max_amount)?;

    config.min_amount = min_amount;
    config.max_amount = max_amount;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_limits")
        .add_attribute("min_amount", min_amount.to_string())
        .add_attribute("max_amount", max_amount.to_string()))
}

/// Limits must be a non-empty, strictly ordered range
pub fn validate_limits(min_amount: Uint128, max_amount: Uint128) -> Result<(), ContractError> {
    if min_amount.is_zero() {
        return Err(ContractError::InvalidConfiguration {
            reason: "min_amount must be greater than zero".to_string(),
        });
    }
    if max_amount <= min_amount {
        return Err(ContractError::InvalidConfiguration {
            reason: "max_amount must exceed min_amount".to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Ownership Transfer
// ============================================================================

/// Propose a new owner (step one of the two-step handoff).
pub fn execute_propose_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let new_owner_addr = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(deps.storage, &new_owner_addr)?;

    Ok(Response::new()
        .add_attribute("method", "propose_owner")
        .add_attribute("new_owner", new_owner_addr))
}

/// Accept a pending ownership proposal (step two, candidate only).
pub fn execute_accept_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;

    if info.sender != pending {
        return Err(ContractError::UnauthorizedPendingOwner);
    }

    let mut config = CONFIG.load(deps.storage)?;
    config.owner = pending.clone();
    CONFIG.save(deps.storage, &config)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_ownership")
        .add_attribute("new_owner", pending))
}

/// Cancel a pending ownership proposal.
pub fn execute_cancel_owner_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_owner_proposal"))
}
