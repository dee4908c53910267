use anchor_lang::prelude::*;

use crate::{
    constants::{ENDPOINT_SEED, STORE_SEED},
    instructions::{validate_fee_config, ConfigError},
    state::{Endpoint, FeeConfig, Store},
};

#[derive(Accounts)]
pub struct SetFeeConfig<'info> {
    #[account(
        has_one = admin @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [STORE_SEED],
        bump = store.bump
    )]
    pub store: Account<'info, Store>,

    pub admin: Signer<'info>,

    #[account(mut, seeds = [ENDPOINT_SEED], bump = endpoint.bump)]
    pub endpoint: Account<'info, Endpoint>,
}

pub fn set_fee_config_handler(ctx: Context<SetFeeConfig>, fee_config: FeeConfig) -> Result<()> {
    validate_fee_config(&fee_config)?;
    ctx.accounts.endpoint.fee_config = fee_config;
    Ok(())
}
