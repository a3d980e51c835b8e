//! Message types for the conversion bridge contract.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address for contract management
    pub owner: String,
    /// CW20 token contract this ledger moves value through
    pub token: String,
    /// Authorizer identity (0x-prefixed hex, 20 bytes, non-zero)
    pub authorizer: String,
    /// Minimum conversion amount per transaction (must be > 0)
    pub min_amount: Uint128,
    /// Maximum conversion amount per transaction (must be > min_amount)
    pub max_amount: Uint128,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Direction of a conversion, as bound into its canonical message
#[cw_serde]
pub enum ConversionDirection {
    /// Lock side: tokens move from the caller into the ledger
    Out,
    /// Release side: tokens move from the ledger to a recipient
    In,
}

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Conversions
    // ========================================================================
    /// Lock tokens for conversion to the counterpart chain.
    ///
    /// Authorization: anyone holding a valid authorizer signature over
    /// `("__conversionOut", amount, caller, conversion_id, contract)`.
    /// The caller must have approved a CW20 allowance for this contract.
    ConvertOut {
        /// Amount to lock (within configured limits)
        amount: Uint128,
        /// Unique conversion identifier chosen off-chain
        conversion_id: String,
        /// 65-byte r||s||v signature by the authorizer
        signature: Binary,
    },

    /// Release tokens arriving from the counterpart chain.
    ///
    /// Authorization: anyone holding a valid authorizer signature over
    /// `("__conversionIn", amount, caller, conversion_id, contract)`.
    ConvertIn {
        /// Recipient of the released tokens
        recipient: String,
        /// Amount to release (within configured limits)
        amount: Uint128,
        /// Unique conversion identifier chosen off-chain
        conversion_id: String,
        /// 65-byte r||s||v signature by the authorizer
        signature: Binary,
    },

    // ========================================================================
    // Liquidity Management
    // ========================================================================
    /// Deposit owner funds backing inbound releases.
    ///
    /// Authorization: Owner only. Requires a CW20 allowance from the owner.
    IncreaseLiquidity {
        /// Amount to deposit
        amount: Uint128,
    },

    /// Drain previously deposited liquidity back to the owner.
    ///
    /// Authorization: Owner only. Capped by the tracked deposit, not by the
    /// raw contract balance.
    DecreaseLiquidity {
        /// Amount to drain
        amount: Uint128,
    },

    // ========================================================================
    // Configuration
    // ========================================================================
    /// Replace the authorizer identity
    ///
    /// Authorization: Owner only
    UpdateAuthorizer {
        /// New authorizer identity (0x-prefixed hex, 20 bytes, non-zero)
        authorizer: String,
    },

    /// Atomically replace both conversion limits
    ///
    /// Authorization: Owner only
    UpdateLimits {
        /// New minimum amount (must be > 0)
        min_amount: Uint128,
        /// New maximum amount (must be > min_amount)
        max_amount: Uint128,
    },

    // ========================================================================
    // Ownership
    // ========================================================================
    /// Propose a new owner (two-step handoff, step one)
    ///
    /// Authorization: Owner only
    ProposeOwner {
        /// Candidate address
        new_owner: String,
    },

    /// Accept a pending ownership proposal (step two)
    ///
    /// Authorization: proposed candidate only
    AcceptOwnership {},

    /// Cancel a pending ownership proposal
    ///
    /// Authorization: Owner only
    CancelOwnerProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns the current authorizer identity
    #[returns(AuthorizerResponse)]
    Authorizer {},

    /// Returns the per-transaction conversion limits
    #[returns(LimitsResponse)]
    Limits {},

    /// Returns the contract's current transferable token holdings
    #[returns(BalanceResponse)]
    Balance {},

    /// Returns the tracked owner-deposited liquidity
    #[returns(LiquidityResponse)]
    Liquidity {},

    /// Returns conversion counters
    #[returns(StatsResponse)]
    Stats {},

    /// Check whether a canonical digest has been consumed
    #[returns(MessageUsedResponse)]
    MessageUsed {
        /// 32-byte digest
        digest: Binary,
    },

    /// Returns pending ownership proposal details
    #[returns(Option<PendingOwnerResponse>)]
    PendingOwner {},

    /// Compute the canonical conversion digest without storing (for
    /// off-chain signers and verification tooling)
    #[returns(ConversionDigestResponse)]
    ConversionDigest {
        direction: ConversionDirection,
        amount: Uint128,
        caller: String,
        conversion_id: String,
    },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub token: Addr,
    pub authorizer: String,
    pub min_amount: Uint128,
    pub max_amount: Uint128,
}

#[cw_serde]
pub struct AuthorizerResponse {
    pub authorizer: String,
}

#[cw_serde]
pub struct LimitsResponse {
    pub min_amount: Uint128,
    pub max_amount: Uint128,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct LiquidityResponse {
    pub internal_liquidity: Uint128,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_conversions_out: u64,
    pub total_conversions_in: u64,
}

#[cw_serde]
pub struct MessageUsedResponse {
    pub used: bool,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub new_owner: Addr,
}

#[cw_serde]
pub struct ConversionDigestResponse {
    pub digest: Binary,
}
