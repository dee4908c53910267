use anchor_lang::prelude::*;

use crate::{
    constants::{DISCRIMINATOR_LEN, MAX_ENFORCED_OPTIONS_LEN, PEER_SEED, STORE_SEED},
    instructions::ConfigError,
    options::{self, OptionsError},
    state::{EnforcedOptions, PeerConfig, Store},
};

#[derive(Accounts)]
#[instruction(dst_eid: u32)]
pub struct SetPeer<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        has_one = admin @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [STORE_SEED],
        bump = store.bump
    )]
    pub store: Account<'info, Store>,

    pub admin: Signer<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        seeds = [PEER_SEED, &dst_eid.to_be_bytes()],
        bump,
        space = DISCRIMINATOR_LEN + PeerConfig::INIT_SPACE
    )]
    pub peer: Account<'info, PeerConfig>,

    pub system_program: Program<'info, System>,
}

pub fn set_peer_handler(
    ctx: Context<SetPeer>,
    _dst_eid: u32,
    peer_address: [u8; 32],
    enforced_options: EnforcedOptions,
) -> Result<()> {
    validate_enforced_options(&enforced_options)?;

    *ctx.accounts.peer = PeerConfig {
        peer_address,
        enforced_options,
        bump: ctx.bumps.peer,
    };

    Ok(())
}

/// Enforced options are validated once here so the send and receive paths can
/// combine them without re-checking the stored side.
pub fn validate_enforced_options(enforced: &EnforcedOptions) -> Result<()> {
    for blob in [&enforced.vanilla, &enforced.aba] {
        require!(
            blob.len() <= MAX_ENFORCED_OPTIONS_LEN,
            OptionsError::OptionsTooLong
        );
        if !blob.is_empty() {
            require!(options::is_type_3(blob), OptionsError::InvalidOptions);
            // A malformed enforced blob must never poison later quotes.
            options::lz_receive_budget(blob)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{add_executor_lz_receive_option, new_options};

    #[test]
    fn validate_accepts_empty_and_typed_blobs() {
        assert!(validate_enforced_options(&EnforcedOptions::default()).is_ok());

        let mut aba = new_options();
        add_executor_lz_receive_option(&mut aba, 200_000, 0);
        let enforced = EnforcedOptions {
            vanilla: new_options(),
            aba,
        };
        assert!(validate_enforced_options(&enforced).is_ok());
    }

    #[test]
    fn validate_rejects_untyped_or_broken_blobs() {
        let enforced = EnforcedOptions {
            vanilla: vec![0xFF, 0xFF],
            aba: Vec::new(),
        };
        assert!(validate_enforced_options(&enforced).is_err());

        let mut truncated = new_options();
        add_executor_lz_receive_option(&mut truncated, 1, 0);
        truncated.pop();
        let enforced = EnforcedOptions {
            vanilla: Vec::new(),
            aba: truncated,
        };
        assert!(validate_enforced_options(&enforced).is_err());
    }

    #[test]
    fn validate_rejects_oversized_blobs() {
        let enforced = EnforcedOptions {
            vanilla: Vec::new(),
            aba: vec![0u8; MAX_ENFORCED_OPTIONS_LEN + 1],
        };
        assert!(validate_enforced_options(&enforced).is_err());
    }
}
