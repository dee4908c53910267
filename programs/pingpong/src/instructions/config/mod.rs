use anchor_lang::prelude::*;

use crate::{constants::STORE_SEED, state::Store};

/// Accounts for admin-gated configuration setters.
#[derive(Accounts)]
pub struct SetConfig<'info> {
    #[account(
        mut,
        has_one = admin @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [STORE_SEED],
        bump = store.bump
    )]
    pub store: Account<'info, Store>,

    /// The admin recorded in the store.
    pub admin: Signer<'info>,
}

#[error_code]
pub enum ConfigError {
    #[msg("Unauthorized to update configuration")]
    UnauthorizedConfigUpdate,
}

pub mod set_admin;
pub mod set_fee_config;
pub mod set_peer;

pub use set_admin::*;
pub use set_fee_config::*;
pub use set_peer::*;
