use anchor_lang::prelude::*;

use crate::constants::{
    DISCRIMINATOR_LEN, MAX_CALLER_OPTIONS_LEN, MAX_ENFORCED_OPTIONS_LEN, MAX_RETURN_OPTIONS_LEN,
};

/// One accepted outbound message, parked at the endpoint nonce it was
/// assigned until the off-chain relayer drains it. Creating this account is
/// the local acceptance point of a send: delivery happens later and is not
/// observable from here.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub nonce: u64,
    pub sender: Pubkey,
    pub dst_eid: u32,
    pub receiver: [u8; 32],
    pub guid: [u8; 32],
    pub payload: Vec<u8>,
    pub options: Vec<u8>,
    /// Fee actually charged for this message.
    pub native_fee: u64,
    pub lz_token_fee: u64,
}

impl OutboundMessage {
    /// Largest ABA payload: 96-byte head plus length word plus padded
    /// return options.
    pub const MAX_PAYLOAD_LEN: usize = 96 + 32 + MAX_RETURN_OPTIONS_LEN.next_multiple_of(32);

    /// Largest combined options blob: enforced prefix, the locally built
    /// lzReceive reservation, and caller extras.
    pub const MAX_OPTIONS_LEN: usize = MAX_ENFORCED_OPTIONS_LEN + 36 + MAX_CALLER_OPTIONS_LEN;

    pub fn space() -> usize {
        DISCRIMINATOR_LEN
            + 8
            + 32
            + 4
            + 32
            + 32
            + (4 + Self::MAX_PAYLOAD_LEN)
            + (4 + Self::MAX_OPTIONS_LEN)
            + 8
            + 8
    }
}
