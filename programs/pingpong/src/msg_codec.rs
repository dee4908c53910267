use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolValue;
use anchor_lang::prelude::*;

/// Byte width of the ball value on the wire.
pub const UINT256_SIZE: usize = 32;

/// Head region of the ABA layout: ball slot, type slot, tail-offset slot.
pub const ABA_HEAD_LEN: usize = 96;

/// Message type tag carried by plain one-way messages.
pub const VANILLA_TYPE: u16 = 1;

/// Message type tag that obligates the receiver to send a reply.
pub const ABA_TYPE: u16 = 2;

/// Decoded wire message. The two shapes have non-overlapping lengths
/// (32 vs >= 96 bytes), so the length alone selects the variant; no
/// version byte exists on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Vanilla {
        ball: [u8; 32],
    },
    Aba {
        ball: [u8; 32],
        msg_type: u16,
        return_options: Vec<u8>,
    },
}

impl Message {
    pub fn ball(&self) -> [u8; 32] {
        match self {
            Message::Vanilla { ball } => *ball,
            Message::Aba { ball, .. } => *ball,
        }
    }

    /// True exactly when the message obligates a reply.
    pub fn wants_reply(&self) -> bool {
        matches!(self, Message::Aba { msg_type, .. } if *msg_type == ABA_TYPE)
    }
}

/// Encodes a vanilla message: the ball as a single big-endian 256-bit word,
/// `abi.encode(uint256)` on the EVM side.
pub fn encode(ball: &[u8; 32]) -> Vec<u8> {
    U256::from_be_bytes(*ball).abi_encode()
}

/// Decodes a vanilla message. Anything but exactly 32 bytes is rejected.
pub fn decode_vanilla(payload: &[u8]) -> Result<[u8; 32]> {
    require!(
        payload.len() == UINT256_SIZE,
        MsgCodecError::InvalidMessageLength
    );
    let mut ball = [0u8; 32];
    ball.copy_from_slice(payload);
    Ok(ball)
}

/// Encodes an ABA message, `abi.encode(uint256, uint16, bytes)` on the EVM
/// side: 96-byte head (ball, right-aligned type tag, tail offset) followed by
/// the return-options tail (length word + data padded to a 32-byte boundary).
pub fn encode_aba(ball: &[u8; 32], return_options: &[u8]) -> Vec<u8> {
    (
        U256::from_be_bytes(*ball),
        ABA_TYPE,
        Bytes::copy_from_slice(return_options),
    )
        .abi_encode_params()
}

/// Decodes either message shape from the raw payload.
///
/// The ABA branch re-validates every offset against the actual buffer length
/// before slicing: the tail offset must land inside `[96, len]` with room for
/// the length word, and the declared tail length must not overrun the buffer.
/// Out-of-bounds values are errors, never truncated or wrapped.
pub fn decode(payload: &[u8]) -> Result<Message> {
    if payload.len() == UINT256_SIZE {
        return Ok(Message::Vanilla {
            ball: decode_vanilla(payload)?,
        });
    }

    require!(
        payload.len() >= ABA_HEAD_LEN,
        MsgCodecError::InvalidMessageLength
    );
    let len = U256::from(payload.len());
    let word = U256::from(32u8);

    let mut ball = [0u8; 32];
    ball.copy_from_slice(&payload[0..32]);

    // Type tag is right-aligned in the second head slot.
    let msg_type = u16::from_be_bytes([payload[62], payload[63]]);

    // Tail offset word, full width. The range check against the buffer
    // length also disposes of any value too wide to address real memory.
    let offset = U256::from_be_slice(&payload[64..96]);
    require!(
        offset >= U256::from(ABA_HEAD_LEN) && offset.saturating_add(word) <= len,
        MsgCodecError::InvalidTailOffset
    );

    let tail = offset.to::<usize>();
    let options_len = U256::from_be_slice(&payload[tail..tail + 32]);
    require!(
        offset.saturating_add(word).saturating_add(options_len) <= len,
        MsgCodecError::InvalidTailBounds
    );

    let data_start = tail + 32;
    let return_options = payload[data_start..data_start + options_len.to::<usize>()].to_vec();

    Ok(Message::Aba {
        ball,
        msg_type,
        return_options,
    })
}

#[error_code]
pub enum MsgCodecError {
    #[msg("Payload is neither a 32-byte vanilla message nor a valid ABA head")]
    InvalidMessageLength,
    #[msg("ABA tail offset points outside the buffer")]
    InvalidTailOffset,
    #[msg("ABA tail length overruns the buffer")]
    InvalidTailBounds,
}
