use anchor_lang::prelude::*;

use crate::{
    constants::{ENDPOINT_SEED, OUTBOUND_SEED, PEER_SEED, STORE_SEED},
    internal::{engine, fee, MessagingFee},
    state::{Endpoint, OutboundMessage, PeerConfig, Store},
};

#[derive(Accounts)]
#[instruction(dst_eid: u32)]
pub struct Send<'info> {
    /// Pays the messaging fee and the outbox account rent.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut, seeds = [STORE_SEED], bump = store.bump)]
    pub store: Account<'info, Store>,

    /// Destination-path configuration: peer address and enforced options.
    #[account(seeds = [PEER_SEED, &dst_eid.to_be_bytes()], bump = peer.bump)]
    pub peer: Account<'info, PeerConfig>,

    #[account(mut, seeds = [ENDPOINT_SEED], bump = endpoint.bump)]
    pub endpoint: Account<'info, Endpoint>,

    /// CHECK: Validated against the configured fee receiver.
    #[account(
        mut,
        address = endpoint.fee_config.fee_receiver @ SendError::IncorrectFeeReceiver
    )]
    pub fee_receiver: AccountInfo<'info>,

    #[account(
        init,
        payer = payer,
        seeds = [OUTBOUND_SEED, &endpoint.nonce.to_be_bytes()],
        bump,
        space = OutboundMessage::space()
    )]
    pub outbound_message: Account<'info, OutboundMessage>,

    pub system_program: Program<'info, System>,
}

pub fn send_handler(
    ctx: Context<Send>,
    dst_eid: u32,
    return_options: Vec<u8>,
    extra_options: Vec<u8>,
    return_gas: u64,
    native_fee: u64,
    lz_token_fee: u64,
) -> Result<()> {
    let store = &mut ctx.accounts.store;
    let endpoint = &mut ctx.accounts.endpoint;

    let plan = engine::plan_send(
        &store.ball,
        &return_options,
        &extra_options,
        return_gas,
        &ctx.accounts.peer.enforced_options,
    )?;

    let fee = fee::quote(
        &endpoint.fee_config,
        plan.payload.len(),
        &plan.options,
        lz_token_fee > 0,
    )?;
    require!(
        native_fee >= fee.native_fee && lz_token_fee >= fee.lz_token_fee,
        SendError::InsufficientFee
    );

    // Only the quoted native amount is taken; the rest of the offered fee
    // stays with the payer.
    if fee.native_fee > 0 {
        let cpi_ctx = CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            anchor_lang::system_program::Transfer {
                from: ctx.accounts.payer.to_account_info(),
                to: ctx.accounts.fee_receiver.clone(),
            },
        );
        anchor_lang::system_program::transfer(cpi_ctx, fee.native_fee)?;
    }

    let nonce = endpoint.nonce;
    let sender = store.key().to_bytes();
    let guid = engine::message_guid(
        nonce,
        endpoint.local_eid,
        &sender,
        dst_eid,
        &ctx.accounts.peer.peer_address,
    );

    store.set_ball(plan.new_ball);

    *ctx.accounts.outbound_message = OutboundMessage {
        nonce,
        sender: store.key(),
        dst_eid,
        receiver: ctx.accounts.peer.peer_address,
        guid,
        payload: plan.payload,
        options: plan.options,
        native_fee: fee.native_fee,
        lz_token_fee: fee.lz_token_fee,
    };
    endpoint.nonce += 1;

    emit!(BallSent {
        old_ball: plan.old_ball,
        new_ball: plan.new_ball,
        dst_eid,
        nonce,
        guid,
        fee,
    });

    Ok(())
}

#[event]
pub struct BallSent {
    pub old_ball: [u8; 32],
    pub new_ball: [u8; 32],
    pub dst_eid: u32,
    pub nonce: u64,
    pub guid: [u8; 32],
    pub fee: MessagingFee,
}

#[error_code]
pub enum SendError {
    #[msg("Offered fee does not cover the quoted messaging fee")]
    InsufficientFee,
    #[msg("Incorrect fee receiver")]
    IncorrectFeeReceiver,
}
