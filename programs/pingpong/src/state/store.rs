use alloy_primitives::U256;
use anchor_lang::prelude::*;

use crate::constants::INITIAL_BALL;

/// Application state PDA. Holds the single logical value ("the ball") shared
/// with the remote endpoint; only `send` and `lz_receive` mutate it, and each
/// instruction runs to completion under the runtime's per-transaction
/// atomicity, so no further locking discipline exists around it.
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct Store {
    pub admin: Pubkey,
    pub bump: u8,
    /// Current ball value, big-endian 256-bit.
    pub ball: [u8; 32],
    /// Receive-side policy when the forwarded value cannot cover the reply
    /// fee: `true` fails the whole receive (all-or-nothing), `false` keeps
    /// the forward-leg ball update and drops the reply.
    pub abort_on_reply_failure: bool,
}

impl Store {
    pub fn new(admin: Pubkey, bump: u8, abort_on_reply_failure: bool) -> Self {
        Self {
            admin,
            bump,
            ball: U256::from(INITIAL_BALL).to_be_bytes::<32>(),
            abort_on_reply_failure,
        }
    }

    pub fn set_ball(&mut self, ball: [u8; 32]) {
        self.ball = ball;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_starts_at_initial_ball() {
        let store = Store::new(Pubkey::new_unique(), 255, true);
        assert_eq!(
            U256::from_be_bytes(store.ball),
            U256::from(100_000_000_000_000_000_000u128)
        );
    }
}
