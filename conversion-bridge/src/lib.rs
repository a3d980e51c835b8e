//! Conversion Bridge Contract - Signature-Gated Two-Way Token Bridging
//!
//! This contract is the authorization and bookkeeping engine of a two-way
//! token bridge: it locks CW20 value on this chain and releases value
//! arriving from the counterpart chain, gated entirely by off-chain-issued,
//! on-chain-verified authorizer signatures.
//!
//! # Outgoing Flow (Lock)
//! 1. The authorizer signs `("__conversionOut", amount, caller, id, contract)`
//! 2. The caller submits `ConvertOut` with the signature; the contract
//!    verifies it, consumes the message digest, and pulls the tokens in
//!    through the caller's CW20 allowance
//! 3. Off-chain infrastructure observes the record and releases value on
//!    the counterpart chain
//!
//! # Incoming Flow (Release)
//! 1. The authorizer signs `("__conversionIn", amount, caller, id, contract)`
//! 2. The caller submits `ConvertIn`; after verification the contract
//!    consumes the digest and transfers tokens to the recipient
//!
//! # Security
//! - Every signature binds amount, caller, conversion id, and this
//!   deployment's address; altering any component invalidates it
//! - Consumed digests are recorded permanently before value moves,
//!   preventing replay including through reentrancy
//! - Per-transaction min/max limits on every conversion
//! - Owner-deposited liquidity is tracked separately from locked user
//!   funds and caps owner drains
//! - Failed token transfers abort the whole operation; no partial state

pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod state;
pub mod verify;

pub use crate::error::ContractError;
pub use crate::hash::{conversion_digest, keccak256, TAG_CONVERSION_IN, TAG_CONVERSION_OUT};
