//! Authorizer signature recovery.
//!
//! Signatures are 65 bytes `r || s || v` over the prefix-wrapped conversion
//! digest (see [`crate::hash`]). The signer identity is the 20-byte
//! keccak-derived address of the recovered secp256k1 public key, compared
//! against the configured authorizer. Anything malformed fails closed as
//! `InvalidSignature` — no detail about which part was wrong leaks out.

use cosmwasm_std::Api;

use crate::error::ContractError;
use crate::hash::{eth_signed_message_hash, keccak256};

/// Expected signature length: 64-byte r||s plus one recovery byte
pub const SIGNATURE_LEN: usize = 65;

/// Length of a public-key-derived identity
pub const IDENTITY_LEN: usize = 20;

/// Recover the signer identity from a signature over `digest`.
///
/// Accepts recovery bytes in both raw (0/1) and Ethereum-offset (27/28)
/// form. The digest is wrapped with the signed-message prefix before
/// recovery, matching what off-chain signers produce.
pub fn recover_signer(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
) -> Result<[u8; IDENTITY_LEN], ContractError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(ContractError::InvalidSignature);
    }

    let recovery_param = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return Err(ContractError::InvalidSignature),
    };

    let wrapped = eth_signed_message_hash(digest);
    let pubkey = api
        .secp256k1_recover_pubkey(&wrapped, &signature[..64], recovery_param)
        .map_err(|_| ContractError::InvalidSignature)?;

    identity_from_pubkey(&pubkey)
}

/// Derive the 20-byte identity from an uncompressed SEC1 public key:
/// the last 20 bytes of keccak256 over the 64 coordinate bytes.
pub fn identity_from_pubkey(pubkey: &[u8]) -> Result<[u8; IDENTITY_LEN], ContractError> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return Err(ContractError::InvalidSignature);
    }

    let hash = keccak256(&pubkey[1..]);
    let mut identity = [0u8; IDENTITY_LEN];
    identity.copy_from_slice(&hash[12..]);
    Ok(identity)
}

/// Parse an authorizer identity from its `0x`-prefixed hex form.
///
/// The zero identity is never a valid authorizer.
pub fn parse_authorizer(input: &str) -> Result<[u8; IDENTITY_LEN], ContractError> {
    let hex_part = input
        .strip_prefix("0x")
        .ok_or_else(|| ContractError::InvalidAddress {
            reason: "authorizer must be 0x-prefixed hex".to_string(),
        })?;

    if hex_part.len() != IDENTITY_LEN * 2 {
        return Err(ContractError::InvalidAddress {
            reason: format!(
                "authorizer must be {} hex characters, got {}",
                IDENTITY_LEN * 2,
                hex_part.len()
            ),
        });
    }

    let bytes = hex::decode(hex_part).map_err(|_| ContractError::InvalidAddress {
        reason: "authorizer contains non-hex characters".to_string(),
    })?;

    let mut identity = [0u8; IDENTITY_LEN];
    identity.copy_from_slice(&bytes);

    if identity == [0u8; IDENTITY_LEN] {
        return Err(ContractError::NullIdentity);
    }

    Ok(identity)
}

/// Canonical lowercase hex form, as stored in config and emitted in records
pub fn identity_to_hex(identity: &[u8; IDENTITY_LEN]) -> String {
    format!("0x{}", hex::encode(identity))
}
