use anchor_lang::prelude::*;

use crate::{
    constants::{ENDPOINT_SEED, PEER_SEED, STORE_SEED},
    internal::{engine, fee, MessagingFee},
    state::{Endpoint, PeerConfig, Store},
};

/// Read-only pricing of a forward send. Mirrors the send path exactly so a
/// quoted fee is always sufficient for the matching `send` call.
#[derive(Accounts)]
#[instruction(dst_eid: u32)]
pub struct QuoteSend<'info> {
    #[account(seeds = [STORE_SEED], bump = store.bump)]
    pub store: Account<'info, Store>,

    #[account(seeds = [PEER_SEED, &dst_eid.to_be_bytes()], bump = peer.bump)]
    pub peer: Account<'info, PeerConfig>,

    #[account(seeds = [ENDPOINT_SEED], bump = endpoint.bump)]
    pub endpoint: Account<'info, Endpoint>,
}

pub fn quote_send_handler(
    ctx: Context<QuoteSend>,
    _dst_eid: u32,
    return_options: Vec<u8>,
    extra_options: Vec<u8>,
    return_gas: u64,
    pay_in_lz_token: bool,
) -> Result<MessagingFee> {
    let plan = engine::plan_send(
        &ctx.accounts.store.ball,
        &return_options,
        &extra_options,
        return_gas,
        &ctx.accounts.peer.enforced_options,
    )?;

    fee::quote(
        &ctx.accounts.endpoint.fee_config,
        plan.payload.len(),
        &plan.options,
        pay_in_lz_token,
    )
}
