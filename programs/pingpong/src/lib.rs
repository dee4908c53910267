#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

mod constants;
mod instructions;
mod internal;
mod msg_codec;
mod options;
mod state;

use instructions::*;
use internal::*;
use state::*;

declare_id!("2ecSSjiDJSqkv5NXHVa6N4huwyHJXnhtzPLAZgfbYtHK");

#[program]
pub mod pingpong {

    use super::*;

    /// Initializes the ping-pong program.
    /// Creates the `Store` PDA holding the admin authority, the ball counter
    /// at its starting value, and the reply-failure policy, plus the
    /// `Endpoint` PDA holding the local endpoint id, the outbound nonce, and
    /// the fee schedule. Must be called once during deployment.
    ///
    /// # Arguments
    /// * `ctx`        - The context containing accounts for initialization:
    ///                  `payer` funds account creation, `store` and
    ///                  `endpoint` PDAs are created with seeds.
    /// * `admin`      - Authority allowed to update configuration.
    /// * `local_eid`  - Endpoint id of this deployment.
    /// * `fee_config` - Initial messaging fee schedule.
    /// * `abort_on_reply_failure` - Whether a receive whose reply cannot be
    ///                  paid fails entirely instead of dropping the reply.
    pub fn initialize(
        ctx: Context<Initialize>,
        admin: Pubkey,
        local_eid: u32,
        fee_config: FeeConfig,
        abort_on_reply_failure: bool,
    ) -> Result<()> {
        initialize_handler(ctx, admin, local_eid, fee_config, abort_on_reply_failure)
    }

    /// Updates the configured admin.
    /// Only the current `admin` may call this instruction.
    pub fn set_admin(ctx: Context<SetConfig>, admin: Pubkey) -> Result<()> {
        set_admin_handler(ctx, admin)
    }

    /// Updates the messaging fee schedule.
    /// Only the recorded `admin` may call this instruction.
    pub fn set_fee_config(ctx: Context<SetFeeConfig>, fee_config: FeeConfig) -> Result<()> {
        set_fee_config_handler(ctx, fee_config)
    }

    /// Sets or updates the peer for a destination endpoint: its address on
    /// the remote chain and the options enforced on every message to it.
    /// Only the recorded `admin` may call this instruction.
    pub fn set_peer(
        ctx: Context<SetPeer>,
        dst_eid: u32,
        peer_address: [u8; 32],
        enforced_options: EnforcedOptions,
    ) -> Result<()> {
        set_peer_handler(ctx, dst_eid, peer_address, enforced_options)
    }

    /// Sends the ball to `dst_eid`, decremented by one. The message embeds
    /// `return_options` for the far side's reply and reserves enough
    /// execution gas over there to both process the delivery and pay for
    /// that reply.
    ///
    /// # Arguments
    /// * `ctx`            - The context including `payer`, the `store` and
    ///                      `endpoint` PDAs, the destination `peer`, the
    ///                      configured `fee_receiver`, and a new
    ///                      `outbound_message` account at the current nonce.
    /// * `dst_eid`        - Destination endpoint id.
    /// * `return_options` - Options the far side must attach to its reply.
    /// * `extra_options`  - Additional caller options for the forward leg.
    /// * `return_gas`     - Caller's estimate of the gas the far side needs
    ///                      to pay for the reply send.
    /// * `native_fee`     - Maximum native fee the payer is offering.
    /// * `lz_token_fee`   - Maximum alt-token fee the payer is offering;
    ///                      zero selects native payment.
    ///
    /// # Errors
    /// Returns an error if the offered fee does not cover the quote, the
    /// options are malformed or oversized, or the fee receiver does not
    /// match the configured one.
    pub fn send(
        ctx: Context<Send>,
        dst_eid: u32,
        return_options: Vec<u8>,
        extra_options: Vec<u8>,
        return_gas: u64,
        native_fee: u64,
        lz_token_fee: u64,
    ) -> Result<()> {
        send_handler(
            ctx,
            dst_eid,
            return_options,
            extra_options,
            return_gas,
            native_fee,
            lz_token_fee,
        )
    }

    /// Delivers a message from a configured peer. Records the delivered
    /// nonce (replays fail on account creation), stores the received ball
    /// value, and, when the message asks for one, sends exactly one reply
    /// paid from the forwarded value.
    ///
    /// # Errors
    /// Returns an error if the sender is not the configured peer for
    /// `src_eid`, the payload is malformed, a reply is owed but no reply
    /// account was provided, or the forwarded value cannot cover the reply
    /// fee while the abort-on-reply-failure policy is active.
    pub fn lz_receive(ctx: Context<LzReceive>, params: LzReceiveParams) -> Result<()> {
        lz_receive_handler(ctx, params)
    }

    /// Quotes the messaging fee of a `send` with the same arguments.
    pub fn quote_send(
        ctx: Context<QuoteSend>,
        dst_eid: u32,
        return_options: Vec<u8>,
        extra_options: Vec<u8>,
        return_gas: u64,
        pay_in_lz_token: bool,
    ) -> Result<MessagingFee> {
        quote_send_handler(
            ctx,
            dst_eid,
            return_options,
            extra_options,
            return_gas,
            pay_in_lz_token,
        )
    }

    /// Quotes the fee of the reply leg a delivery from `src_eid` would
    /// trigger, given the return options it would carry.
    pub fn quote_reply(
        ctx: Context<QuoteReply>,
        src_eid: u32,
        return_options: Vec<u8>,
        pay_in_lz_token: bool,
    ) -> Result<MessagingFee> {
        quote_reply_handler(ctx, src_eid, return_options, pay_in_lz_token)
    }
}
