use anchor_lang::prelude::*;

use crate::{options, state::FeeConfig};

/// Quote result: the fee due for one delivery, in native lamports and, when
/// requested, denominated in the alt token instead. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct MessagingFee {
    pub native_fee: u64,
    pub lz_token_fee: u64,
}

/// Prices one delivery against the configured fee schedule.
///
/// The chargeable gas is the flat delivery cost, the per-byte payload cost,
/// and the executor `lzReceive` budget declared by the options blob; native
/// value drops ride on top at face value. With `pay_in_lz_token` the whole
/// charge is converted through the configured rate and owed in the alt token.
pub fn quote(
    cfg: &FeeConfig,
    payload_len: usize,
    options_blob: &[u8],
    pay_in_lz_token: bool,
) -> Result<MessagingFee> {
    let (gas_budget, native_drop) = options::lz_receive_budget(options_blob)?;

    let gas = (cfg.base_delivery_gas as u128)
        .checked_add((cfg.gas_per_byte as u128).saturating_mul(payload_len as u128))
        .and_then(|g| g.checked_add(gas_budget))
        .ok_or(QuoteError::FeeOverflow)?;

    let native = gas
        .checked_mul(cfg.lamports_per_gas as u128)
        .and_then(|c| c.checked_mul(cfg.gas_cost_scaler as u128))
        .map(|c| c / cfg.gas_cost_scaler_dp.max(1) as u128)
        .and_then(|c| c.checked_add(native_drop))
        .ok_or(QuoteError::FeeOverflow)?;

    if pay_in_lz_token {
        let lz_token = native
            .checked_mul(cfg.lz_token_per_native as u128)
            .map(|c| c / cfg.lz_token_dp.max(1) as u128)
            .ok_or(QuoteError::FeeOverflow)?;
        return Ok(MessagingFee {
            native_fee: 0,
            lz_token_fee: u64::try_from(lz_token).map_err(|_| QuoteError::FeeOverflow)?,
        });
    }

    Ok(MessagingFee {
        native_fee: u64::try_from(native).map_err(|_| QuoteError::FeeOverflow)?,
        lz_token_fee: 0,
    })
}

#[error_code]
pub enum QuoteError {
    #[msg("Computed fee does not fit the fee accounting width")]
    FeeOverflow,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::options::{add_executor_lz_receive_option, new_options};

    pub(crate) fn test_fee_config() -> FeeConfig {
        FeeConfig {
            base_delivery_gas: 21_000,
            gas_per_byte: 40,
            lamports_per_gas: 2,
            gas_cost_scaler: 1_000_000,
            gas_cost_scaler_dp: 1_000_000,
            lz_token_per_native: 5_000,
            lz_token_dp: 1_000,
            fee_receiver: Pubkey::new_unique(),
        }
    }

    #[test]
    fn quote_prices_gas_and_payload() {
        let cfg = test_fee_config();
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, 200_000, 0);

        let fee = quote(&cfg, 128, &opts, false).unwrap();
        // (21_000 + 40 * 128 + 200_000) * 2
        assert_eq!(fee.native_fee, 2 * (21_000 + 5_120 + 200_000));
        assert_eq!(fee.lz_token_fee, 0);
    }

    #[test]
    fn quote_adds_native_drops_at_face_value() {
        let cfg = test_fee_config();
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, 100_000, 7_777);

        let with_drop = quote(&cfg, 32, &opts, false).unwrap();
        let mut bare = new_options();
        add_executor_lz_receive_option(&mut bare, 100_000, 0);
        let without_drop = quote(&cfg, 32, &bare, false).unwrap();
        assert_eq!(with_drop.native_fee, without_drop.native_fee + 7_777);
    }

    #[test]
    fn quote_in_lz_token_converts_whole_charge() {
        let cfg = test_fee_config();
        let opts = new_options();
        let native = quote(&cfg, 32, &opts, false).unwrap();
        let token = quote(&cfg, 32, &opts, true).unwrap();
        assert_eq!(token.native_fee, 0);
        assert_eq!(
            token.lz_token_fee,
            native.native_fee * cfg.lz_token_per_native / cfg.lz_token_dp
        );
    }

    #[test]
    fn quote_is_deterministic() {
        let cfg = test_fee_config();
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, 230_000, 0);
        let a = quote(&cfg, 128, &opts, false).unwrap();
        let b = quote(&cfg, 128, &opts, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn quote_rejects_overflowing_budget() {
        let mut cfg = test_fee_config();
        cfg.lamports_per_gas = u64::MAX;
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, u128::MAX / 2, 0);
        assert!(quote(&cfg, 32, &opts, false).is_err());
    }
}
