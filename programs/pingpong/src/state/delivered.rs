use anchor_lang::prelude::*;

/// Receipt marker created per `(src_eid, nonce)` on receive. Its `init`
/// constraint is the replay guard: a second delivery of the same nonce fails
/// at account creation, before any state is touched.
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct Delivered {
    pub guid: [u8; 32],
    pub bump: u8,
}
