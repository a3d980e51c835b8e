//! Canonical conversion message construction.
//!
//! A conversion is authorized by a signature over a digest that binds every
//! parameter of the request to one specific deployment:
//!
//! ```text
//! packed  = len(tag) || tag
//!        || len(amount) || amount      (32 bytes, big-endian, left-padded)
//!        || len(caller) || caller      (address string bytes)
//!        || len(id) || id              (conversion identifier bytes)
//!        || len(contract) || contract  (this contract's address bytes)
//! digest  = keccak256(keccak256(packed))
//! wrapped = keccak256("\x19Ethereum Signed Message:\n32" || digest)
//! ```
//!
//! Length prefixes are 4-byte big-endian, so no two field boundaries can be
//! confused regardless of field content. `digest` is the replay key stored
//! in the used-message set; `wrapped` is what the authorizer actually signs.

use tiny_keccak::{Hasher, Keccak};

/// Message tag for outbound (lock) conversions
pub const TAG_CONVERSION_OUT: &str = "__conversionOut";

/// Message tag for inbound (release) conversions
pub const TAG_CONVERSION_IN: &str = "__conversionIn";

/// Signature-scheme wrapper prefix for a 32-byte digest
pub const ETH_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the canonical conversion digest (the replay key).
///
/// `caller` binds the message to the initiating account, `contract` to this
/// deployment, so neither a different sender nor a different instance can
/// reuse an overheard signature.
pub fn conversion_digest(
    tag: &str,
    amount: u128,
    caller: &str,
    conversion_id: &str,
    contract: &str,
) -> [u8; 32] {
    // uint256-style amount: left-padded to 32 bytes, big-endian
    let mut amount_bytes = [0u8; 32];
    amount_bytes[16..].copy_from_slice(&amount.to_be_bytes());

    let mut packed = Vec::with_capacity(
        5 * 4 + tag.len() + 32 + caller.len() + conversion_id.len() + contract.len(),
    );
    push_field(&mut packed, tag.as_bytes());
    push_field(&mut packed, &amount_bytes);
    push_field(&mut packed, caller.as_bytes());
    push_field(&mut packed, conversion_id.as_bytes());
    push_field(&mut packed, contract.as_bytes());

    keccak256(&keccak256(&packed))
}

/// Wrap a digest with the Ethereum signed-message prefix.
///
/// The authorizer signs this value, not the bare digest.
pub fn eth_signed_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut data = Vec::with_capacity(ETH_MESSAGE_PREFIX.len() + 32);
    data.extend_from_slice(ETH_MESSAGE_PREFIX);
    data.extend_from_slice(digest);
    keccak256(&data)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) to 32-byte array
pub fn hex_to_bytes32(input: &str) -> Result<[u8; 32], &'static str> {
    let input = input.strip_prefix("0x").unwrap_or(input);
    if input.len() != 64 {
        return Err("Invalid hex length: expected 64 characters");
    }

    let bytes = hex::decode(input).map_err(|_| "Invalid hex character")?;
    let mut result = [0u8; 32];
    result.copy_from_slice(&bytes);
    Ok(result)
}

/// Append one length-prefixed field to the packed buffer
fn push_field(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
}
