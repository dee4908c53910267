use anchor_lang::prelude::*;

use crate::{
    constants::{ENDPOINT_SEED, PEER_SEED, STORE_SEED},
    internal::{fee, MessagingFee},
    msg_codec::{self, VANILLA_TYPE},
    state::{Endpoint, PeerConfig, Store},
};

/// Prices the reply leg a delivery on this path would trigger, for a given
/// set of return options. Senders on the far side use this to size the
/// value they forward with an ABA message.
#[derive(Accounts)]
#[instruction(src_eid: u32)]
pub struct QuoteReply<'info> {
    #[account(seeds = [STORE_SEED], bump = store.bump)]
    pub store: Account<'info, Store>,

    #[account(seeds = [PEER_SEED, &src_eid.to_be_bytes()], bump = peer.bump)]
    pub peer: Account<'info, PeerConfig>,

    #[account(seeds = [ENDPOINT_SEED], bump = endpoint.bump)]
    pub endpoint: Account<'info, Endpoint>,
}

pub fn quote_reply_handler(
    ctx: Context<QuoteReply>,
    _src_eid: u32,
    return_options: Vec<u8>,
    pay_in_lz_token: bool,
) -> Result<MessagingFee> {
    let payload = msg_codec::encode(&ctx.accounts.store.ball);
    let options = ctx
        .accounts
        .peer
        .enforced_options
        .combine(VANILLA_TYPE, &return_options)?;

    fee::quote(
        &ctx.accounts.endpoint.fee_config,
        payload.len(),
        &options,
        pay_in_lz_token,
    )
}
