use alloy_primitives::U256;
use anchor_lang::{prelude::*, solana_program::keccak};

use crate::{
    constants::{BASE_RECEIVE_GAS, MAX_CALLER_OPTIONS_LEN, MAX_RETURN_OPTIONS_LEN},
    internal::fee::{self, MessagingFee},
    msg_codec::{self, Message, ABA_TYPE, VANILLA_TYPE},
    options::{self, OptionsError},
    state::{EnforcedOptions, FeeConfig},
};

/// Everything a forward send writes or emits, computed before any account is
/// touched. `quote_send` builds the same plan to price it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendPlan {
    pub old_ball: [u8; 32],
    pub new_ball: [u8; 32],
    pub payload: Vec<u8>,
    pub options: Vec<u8>,
}

/// Reply decision taken on receive, from the decoded message alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Vanilla or foreign-tagged message: no reply is ever owed.
    None,
    /// ABA message with sufficient forwarded value: send this reply.
    Send(ReplyPlan),
    /// ABA message whose forwarded value cannot cover the reply fee, under
    /// the commit-regardless policy: the ball update stands, the reply is
    /// lost.
    Dropped { required: u64, forwarded: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPlan {
    /// Ball value after the local reply step, to be stored and echoed back.
    pub ball: [u8; 32],
    pub payload: Vec<u8>,
    pub options: Vec<u8>,
    /// Quoted reply fee, charged out of the forwarded value.
    pub fee: MessagingFee,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivePlan {
    pub ball: [u8; 32],
    pub reply: ReplyOutcome,
}

impl ReceivePlan {
    /// Ball value the store ends up with once the plan is applied.
    pub fn final_ball(&self) -> [u8; 32] {
        match &self.reply {
            ReplyOutcome::Send(reply) => reply.ball,
            _ => self.ball,
        }
    }
}

fn decrement(ball: &[u8; 32]) -> [u8; 32] {
    U256::from_be_bytes(*ball)
        .saturating_sub(U256::from(1u8))
        .to_be_bytes::<32>()
}

/// Composes the forward (A→B) leg: the decremented ball, the ABA payload
/// carrying `return_options` verbatim, and the options blob whose lzReceive
/// reservation is the fixed receive budget plus the caller's estimate of the
/// reply leg. The estimate is a required input: the cost of execution on
/// the far side cannot be quoted from here.
pub fn plan_send(
    ball: &[u8; 32],
    return_options: &[u8],
    extra_options: &[u8],
    return_gas: u64,
    enforced: &EnforcedOptions,
) -> Result<SendPlan> {
    require!(
        return_options.len() <= MAX_RETURN_OPTIONS_LEN,
        OptionsError::OptionsTooLong
    );
    require!(
        extra_options.len() <= MAX_CALLER_OPTIONS_LEN,
        OptionsError::OptionsTooLong
    );

    let new_ball = decrement(ball);
    let payload = msg_codec::encode_aba(&new_ball, return_options);

    let mut built = options::new_options();
    options::add_executor_lz_receive_option(
        &mut built,
        BASE_RECEIVE_GAS + return_gas as u128,
        0,
    );
    let caller_options = options::merge(&built, extra_options)?;
    let combined = enforced.combine(ABA_TYPE, &caller_options)?;

    Ok(SendPlan {
        old_ball: *ball,
        new_ball,
        payload,
        options: combined,
    })
}

/// Decodes a delivered payload and decides the receive transition: the new
/// ball value, and whether a reply goes out. Exactly one reply per ABA
/// message; the reply reuses the embedded return options and is paid from
/// `forwarded_value`. When that value cannot cover the quoted reply fee the
/// outcome follows `abort_on_shortfall`: error out (the caller reverts the
/// whole receive) or keep the ball update and drop the reply.
pub fn plan_receive(
    payload: &[u8],
    enforced: &EnforcedOptions,
    fee_config: &FeeConfig,
    forwarded_value: u64,
    abort_on_shortfall: bool,
) -> Result<ReceivePlan> {
    let message = msg_codec::decode(payload)?;
    let ball = message.ball();

    let return_options = match &message {
        Message::Aba { return_options, .. } if message.wants_reply() => return_options.as_slice(),
        _ => {
            // Vanilla or a tag from a future protocol version: accepted, no
            // reply owed.
            return Ok(ReceivePlan {
                ball,
                reply: ReplyOutcome::None,
            });
        }
    };

    let reply_ball = decrement(&ball);
    let reply_payload = msg_codec::encode(&reply_ball);
    let reply_options = enforced.combine(VANILLA_TYPE, return_options)?;
    let reply_fee = fee::quote(fee_config, reply_payload.len(), &reply_options, false)?;

    if forwarded_value < reply_fee.native_fee {
        if abort_on_shortfall {
            return Err(EngineError::InsufficientForwardedValue.into());
        }
        return Ok(ReceivePlan {
            ball,
            reply: ReplyOutcome::Dropped {
                required: reply_fee.native_fee,
                forwarded: forwarded_value,
            },
        });
    }

    Ok(ReceivePlan {
        ball,
        reply: ReplyOutcome::Send(ReplyPlan {
            ball: reply_ball,
            payload: reply_payload,
            options: reply_options,
            fee: reply_fee,
        }),
    })
}

/// Tracking identifier the transport assigns to a delivery, derived from the
/// path endpoints and the outbound nonce.
pub fn message_guid(
    nonce: u64,
    src_eid: u32,
    sender: &[u8; 32],
    dst_eid: u32,
    receiver: &[u8; 32],
) -> [u8; 32] {
    keccak::hashv(&[
        &nonce.to_be_bytes(),
        &src_eid.to_be_bytes(),
        sender,
        &dst_eid.to_be_bytes(),
        receiver,
    ])
    .0
}

#[error_code]
pub enum EngineError {
    #[msg("Forwarded value does not cover the reply fee")]
    InsufficientForwardedValue,
}
