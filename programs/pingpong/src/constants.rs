use anchor_lang::prelude::*;

#[constant]
pub const STORE_SEED: &[u8] = b"store";

#[constant]
pub const ENDPOINT_SEED: &[u8] = b"endpoint";

#[constant]
pub const PEER_SEED: &[u8] = b"peer";

#[constant]
pub const OUTBOUND_SEED: &[u8] = b"outbound";

#[constant]
pub const DELIVERED_SEED: &[u8] = b"delivered";

pub const DISCRIMINATOR_LEN: usize = 8;

/// Ball value every fresh deployment starts from: 100 * 10^18, matching the
/// EVM counterpart contract.
pub const INITIAL_BALL: u128 = 100_000_000_000_000_000_000u128;

/// Gas reserved for the local work of `lz_receive` itself, before any
/// caller-supplied budget for the reply leg is added on top.
pub const BASE_RECEIVE_GAS: u128 = 180_000;

// Executor options (type-3) encoding.

pub const OPTIONS_TYPE_3: u16 = 3;

pub const EXECUTOR_WORKER_ID: u8 = 1;

pub const OPTION_TYPE_LZRECEIVE: u8 = 1;

// Upper bounds used for outbox account sizing. Inputs are validated against
// these before any account is written.

pub const MAX_RETURN_OPTIONS_LEN: usize = 256;

pub const MAX_CALLER_OPTIONS_LEN: usize = 256;

pub const MAX_ENFORCED_OPTIONS_LEN: usize = 256;
