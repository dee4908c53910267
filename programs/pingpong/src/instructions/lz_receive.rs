use anchor_lang::prelude::*;
use anchor_lang::AccountsClose;

use crate::{
    constants::{
        DELIVERED_SEED, DISCRIMINATOR_LEN, ENDPOINT_SEED, OUTBOUND_SEED, PEER_SEED, STORE_SEED,
    },
    internal::{engine, engine::ReplyOutcome, MessagingFee},
    state::{Delivered, Endpoint, OutboundMessage, PeerConfig, Store},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct LzReceiveParams {
    pub src_eid: u32,
    /// Sender address on the source chain, padded to 32 bytes.
    pub sender: [u8; 32],
    pub nonce: u64,
    pub guid: [u8; 32],
    pub message: Vec<u8>,
    /// Native value forwarded alongside the delivery, available to pay for
    /// a reply send.
    pub forwarded_value: u64,
}

#[derive(Accounts)]
#[instruction(params: LzReceiveParams)]
pub struct LzReceive<'info> {
    /// Executor delivering the message. Pays rent for the delivery marker
    /// and fronts the forwarded value.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut, seeds = [STORE_SEED], bump = store.bump)]
    pub store: Account<'info, Store>,

    /// Source-path configuration. Deliveries from any other sender on this
    /// path are rejected.
    #[account(
        seeds = [PEER_SEED, &params.src_eid.to_be_bytes()],
        bump = peer.bump,
        constraint = params.sender == peer.peer_address @ LzReceiveError::InvalidSender
    )]
    pub peer: Account<'info, PeerConfig>,

    #[account(mut, seeds = [ENDPOINT_SEED], bump = endpoint.bump)]
    pub endpoint: Account<'info, Endpoint>,

    /// Replay guard: init fails if this (src_eid, nonce) was already
    /// delivered.
    #[account(
        init,
        payer = payer,
        seeds = [
            DELIVERED_SEED,
            &params.src_eid.to_be_bytes(),
            &params.nonce.to_be_bytes(),
        ],
        bump,
        space = DISCRIMINATOR_LEN + Delivered::INIT_SPACE
    )]
    pub delivered: Account<'info, Delivered>,

    /// Outbox for the reply leg. Only required when the delivered message
    /// asks for one; the `init` runs before the outcome is known, so when no
    /// reply ends up written the handler closes this account back to the
    /// payer, keeping the nonce seed free for the next send.
    #[account(
        init,
        payer = payer,
        seeds = [OUTBOUND_SEED, &endpoint.nonce.to_be_bytes()],
        bump,
        space = OutboundMessage::space()
    )]
    pub reply: Option<Account<'info, OutboundMessage>>,

    /// CHECK: Validated against the configured fee receiver.
    #[account(
        mut,
        address = endpoint.fee_config.fee_receiver @ LzReceiveError::IncorrectFeeReceiver
    )]
    pub fee_receiver: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

/// What the handler must do with the optional reply outbox account, given the
/// planned outcome and whether the executor supplied one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReplyAccountAction {
    /// A reply goes out: write it into the supplied account.
    Write,
    /// No reply goes out but an account was created during validation: close
    /// it back to the payer so the nonce seed stays usable.
    CloseUnused,
    /// No reply, no account.
    Nothing,
}

pub(crate) fn reply_account_action(
    outcome: &ReplyOutcome,
    supplied: bool,
) -> Result<ReplyAccountAction> {
    match (outcome, supplied) {
        (ReplyOutcome::Send(_), true) => Ok(ReplyAccountAction::Write),
        (ReplyOutcome::Send(_), false) => Err(LzReceiveError::MissingReplyAccount.into()),
        (_, true) => Ok(ReplyAccountAction::CloseUnused),
        (_, false) => Ok(ReplyAccountAction::Nothing),
    }
}

pub fn lz_receive_handler(ctx: Context<LzReceive>, params: LzReceiveParams) -> Result<()> {
    let store = &mut ctx.accounts.store;
    let endpoint = &mut ctx.accounts.endpoint;

    let plan = engine::plan_receive(
        &params.message,
        &ctx.accounts.peer.enforced_options,
        &endpoint.fee_config,
        params.forwarded_value,
        store.abort_on_reply_failure,
    )?;

    let action = reply_account_action(&plan.reply, ctx.accounts.reply.is_some())?;
    if action == ReplyAccountAction::CloseUnused {
        if let Some(reply) = ctx.accounts.reply.as_ref() {
            reply.close(ctx.accounts.payer.to_account_info())?;
        }
    }

    *ctx.accounts.delivered = Delivered {
        guid: params.guid,
        bump: ctx.bumps.delivered,
    };

    store.set_ball(plan.final_ball());
    emit!(BallReceived {
        src_eid: params.src_eid,
        nonce: params.nonce,
        guid: params.guid,
        ball: plan.ball,
    });

    match plan.reply {
        ReplyOutcome::None => {}
        ReplyOutcome::Dropped { required, forwarded } => {
            emit!(ReplyDropped {
                src_eid: params.src_eid,
                nonce: params.nonce,
                required,
                forwarded,
            });
        }
        ReplyOutcome::Send(reply_plan) => {
            let Some(reply) = ctx.accounts.reply.as_mut() else {
                return Err(LzReceiveError::MissingReplyAccount.into());
            };

            if reply_plan.fee.native_fee > 0 {
                let cpi_ctx = CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    anchor_lang::system_program::Transfer {
                        from: ctx.accounts.payer.to_account_info(),
                        to: ctx.accounts.fee_receiver.clone(),
                    },
                );
                anchor_lang::system_program::transfer(cpi_ctx, reply_plan.fee.native_fee)?;
            }

            let nonce = endpoint.nonce;
            let sender = store.key().to_bytes();
            let guid = engine::message_guid(
                nonce,
                endpoint.local_eid,
                &sender,
                params.src_eid,
                &ctx.accounts.peer.peer_address,
            );

            **reply = OutboundMessage {
                nonce,
                sender: store.key(),
                dst_eid: params.src_eid,
                receiver: ctx.accounts.peer.peer_address,
                guid,
                payload: reply_plan.payload,
                options: reply_plan.options,
                native_fee: reply_plan.fee.native_fee,
                lz_token_fee: reply_plan.fee.lz_token_fee,
            };
            endpoint.nonce += 1;

            emit!(ReplySent {
                ball: reply_plan.ball,
                dst_eid: params.src_eid,
                nonce,
                guid,
                fee: reply_plan.fee,
            });
        }
    }

    Ok(())
}

#[event]
pub struct BallReceived {
    pub src_eid: u32,
    pub nonce: u64,
    pub guid: [u8; 32],
    pub ball: [u8; 32],
}

#[event]
pub struct ReplySent {
    pub ball: [u8; 32],
    pub dst_eid: u32,
    pub nonce: u64,
    pub guid: [u8; 32],
    pub fee: MessagingFee,
}

#[event]
pub struct ReplyDropped {
    pub src_eid: u32,
    pub nonce: u64,
    pub required: u64,
    pub forwarded: u64,
}

#[error_code]
pub enum LzReceiveError {
    #[msg("Sender does not match the configured peer")]
    InvalidSender,
    #[msg("Incorrect fee receiver")]
    IncorrectFeeReceiver,
    #[msg("Message requires a reply but no reply account was provided")]
    MissingReplyAccount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::engine::ReplyPlan;
    use crate::options::new_options;

    fn send_outcome() -> ReplyOutcome {
        ReplyOutcome::Send(ReplyPlan {
            ball: [0u8; 32],
            payload: vec![0u8; 32],
            options: new_options(),
            fee: MessagingFee::default(),
        })
    }

    #[test]
    fn reply_written_when_owed_and_supplied() {
        assert_eq!(
            reply_account_action(&send_outcome(), true).unwrap(),
            ReplyAccountAction::Write
        );
    }

    #[test]
    fn missing_account_fails_when_reply_owed() {
        let err = reply_account_action(&send_outcome(), false).unwrap_err();
        assert!(err.to_string().contains("MissingReplyAccount"));
    }

    // A supplied account that no reply ends up using must be closed, not left
    // behind: it sits at the current nonce seed and would block the next send.
    #[test]
    fn unused_account_is_closed_for_vanilla_deliveries() {
        assert_eq!(
            reply_account_action(&ReplyOutcome::None, true).unwrap(),
            ReplyAccountAction::CloseUnused
        );
    }

    #[test]
    fn unused_account_is_closed_when_reply_dropped() {
        let dropped = ReplyOutcome::Dropped {
            required: 100,
            forwarded: 99,
        };
        assert_eq!(
            reply_account_action(&dropped, true).unwrap(),
            ReplyAccountAction::CloseUnused
        );
        assert_eq!(
            reply_account_action(&dropped, false).unwrap(),
            ReplyAccountAction::Nothing
        );
    }

    #[test]
    fn vanilla_delivery_without_account_needs_no_action() {
        assert_eq!(
            reply_account_action(&ReplyOutcome::None, false).unwrap(),
            ReplyAccountAction::Nothing
        );
    }
}
