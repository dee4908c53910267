use anchor_lang::prelude::*;

/// Pricing parameters the local endpoint charges for outbound delivery.
/// Guardian-style updatable through `set_fee_config`; the quote path reads it
/// and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace)]
pub struct FeeConfig {
    /// Flat gas charged for any delivery before per-byte and executor costs.
    pub base_delivery_gas: u64,
    /// Gas charged per payload byte.
    pub gas_per_byte: u64,
    /// Native price of one gas unit, before scaling.
    pub lamports_per_gas: u64,
    /// Scaler applied to the gas cost, with its decimal precision. Lets the
    /// operator tune pricing without redeploying.
    pub gas_cost_scaler: u64,
    pub gas_cost_scaler_dp: u64,
    /// Alt-token units per native unit (scaled by `lz_token_dp`) used when a
    /// caller asks to pay fees in the alt token.
    pub lz_token_per_native: u64,
    pub lz_token_dp: u64,
    /// Account the native fee is transferred to on send.
    pub fee_receiver: Pubkey,
}

/// Local messaging-endpoint state: the path-independent outbound nonce and
/// the fee schedule. The nonce orders the outbox; delivery ordering on the
/// wire is the transport's concern, not re-derived here.
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct Endpoint {
    /// Identifier of this endpoint's own path, embedded in outbound GUIDs.
    pub local_eid: u32,
    /// Next outbound nonce; also the seed of the next outbox account.
    pub nonce: u64,
    pub fee_config: FeeConfig,
    pub bump: u8,
}
