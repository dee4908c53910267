use anchor_lang::prelude::*;

use crate::instructions::SetConfig;

pub fn set_admin_handler(ctx: Context<SetConfig>, admin: Pubkey) -> Result<()> {
    ctx.accounts.store.admin = admin;
    Ok(())
}
