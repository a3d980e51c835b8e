//! Error types for the conversion bridge contract.
//!
//! Every rejection is a distinct kind so callers can tell "try again later"
//! conditions (balance/liquidity shortfalls) from "never valid" ones
//! (replay, bad signature, bad configuration).

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only the owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the pending owner can accept")]
    UnauthorizedPendingOwner,

    #[error("No pending ownership proposal")]
    NoPendingOwner,

    // ========================================================================
    // Conversion Errors
    // ========================================================================

    #[error("Amount {amount} outside allowed limits [{min}, {max}]")]
    LimitViolation {
        amount: Uint128,
        min: Uint128,
        max: Uint128,
    },

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Message already consumed: {digest}")]
    ReplayedMessage { digest: String },

    #[error("Insufficient ledger balance: have {available}, need {requested}")]
    InsufficientLedgerBalance {
        available: Uint128,
        requested: Uint128,
    },

    // ========================================================================
    // Liquidity Errors
    // ========================================================================

    #[error("No liquidity deposited")]
    InsufficientLiquidity,

    #[error("Drain exceeds tracked deposit: have {available}, requested {requested}")]
    ExceedsDeposit {
        available: Uint128,
        requested: Uint128,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Null identity not allowed")]
    NullIdentity,

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    // ========================================================================
    // Collaborator Errors
    // ========================================================================

    #[error("Transfer failed: {reason}")]
    TransferFailed { reason: String },
}
