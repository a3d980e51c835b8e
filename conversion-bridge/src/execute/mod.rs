//! Execute message handlers.

mod admin;
mod convert;
mod liquidity;

pub use admin::{
    execute_accept_ownership, execute_cancel_owner_proposal, execute_propose_owner,
    execute_update_authorizer, execute_update_limits, validate_limits,
};
pub use convert::{execute_convert_in, execute_convert_out};
pub use liquidity::{execute_decrease_liquidity, execute_increase_liquidity};

/// Reply id for debit submessages (funds moving into the ledger)
pub const REPLY_DEBIT: u64 = 1;

/// Reply id for credit submessages (funds moving out of the ledger)
pub const REPLY_CREDIT: u64 = 2;
