use anchor_lang::prelude::*;

use crate::{
    constants::{DISCRIMINATOR_LEN, ENDPOINT_SEED, STORE_SEED},
    state::{Endpoint, FeeConfig, Store},
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays for the Store and Endpoint account creation.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        seeds = [STORE_SEED],
        bump,
        space = DISCRIMINATOR_LEN + Store::INIT_SPACE
    )]
    pub store: Account<'info, Store>,

    #[account(
        init,
        payer = payer,
        seeds = [ENDPOINT_SEED],
        bump,
        space = DISCRIMINATOR_LEN + Endpoint::INIT_SPACE
    )]
    pub endpoint: Account<'info, Endpoint>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(
    ctx: Context<Initialize>,
    admin: Pubkey,
    local_eid: u32,
    fee_config: FeeConfig,
    abort_on_reply_failure: bool,
) -> Result<()> {
    validate_fee_config(&fee_config)?;

    *ctx.accounts.store = Store::new(admin, ctx.bumps.store, abort_on_reply_failure);
    *ctx.accounts.endpoint = Endpoint {
        local_eid,
        nonce: 0,
        fee_config,
        bump: ctx.bumps.endpoint,
    };

    Ok(())
}

pub fn validate_fee_config(fee_config: &FeeConfig) -> Result<()> {
    require!(
        fee_config.gas_cost_scaler_dp > 0 && fee_config.lz_token_dp > 0,
        InitializeError::InvalidFeeConfig
    );
    Ok(())
}

#[error_code]
pub enum InitializeError {
    #[msg("Fee config precision denominators must be non-zero")]
    InvalidFeeConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::fee::tests::test_fee_config;

    #[test]
    fn validate_rejects_zero_denominators() {
        let mut cfg = test_fee_config();
        cfg.gas_cost_scaler_dp = 0;
        assert!(validate_fee_config(&cfg).is_err());

        let mut cfg = test_fee_config();
        cfg.lz_token_dp = 0;
        assert!(validate_fee_config(&cfg).is_err());

        assert!(validate_fee_config(&test_fee_config()).is_ok());
    }
}
