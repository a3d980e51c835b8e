//! State definitions for the conversion bridge contract.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Owner address for contract management
    pub owner: Addr,
    /// CW20 token this ledger moves value through
    pub token: Addr,
    /// Authorizer identity (canonical lowercase 0x-hex, 20 bytes)
    pub authorizer: String,
    /// Minimum conversion amount per transaction (in smallest unit)
    pub min_amount: Uint128,
    /// Maximum conversion amount per transaction (in smallest unit)
    pub max_amount: Uint128,
}

/// Conversion counters, for external observers
#[cw_serde]
pub struct Stats {
    /// Total accepted outbound (lock) conversions
    pub total_conversions_out: u64,
    /// Total accepted inbound (release) conversions
    pub total_conversions_in: u64,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:conversion-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "1.0.0";

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending ownership proposal (if any)
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

/// Funds deliberately supplied by the owner to back inbound releases.
/// Tracked separately from funds arriving via outbound locks; caps owner
/// drains, never pruned below zero.
pub const INTERNAL_LIQUIDITY: Item<Uint128> = Item::new("internal_liquidity");

/// Consumed canonical message digests (the replay-prevention set).
/// Key: 32-byte digest. Append-only for the contract's lifetime; an entry
/// is written before the value-transfer message is dispatched.
pub const USED_MESSAGES: Map<&[u8], bool> = Map::new("used_messages");

/// Conversion counters
pub const STATS: Item<Stats> = Item::new("stats");
