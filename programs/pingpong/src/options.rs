use anchor_lang::prelude::*;

use crate::constants::{EXECUTOR_WORKER_ID, OPTIONS_TYPE_3, OPTION_TYPE_LZRECEIVE};

/// Starts a fresh type-3 executor options blob.
pub fn new_options() -> Vec<u8> {
    OPTIONS_TYPE_3.to_be_bytes().to_vec()
}

/// Appends an executor `lzReceive` entry bounding the gas and native value the
/// destination executor spends on delivery.
///
/// Entries of the same type are additive: the executor sums the budgets of
/// every `lzReceive` entry it finds, so callers composing a reply reservation
/// on top of a base budget simply add a single combined entry.
pub fn add_executor_lz_receive_option(options: &mut Vec<u8>, gas: u128, value: u128) {
    let payload_len: u16 = if value == 0 { 16 } else { 32 };
    options.push(EXECUTOR_WORKER_ID);
    options.extend_from_slice(&(payload_len + 1).to_be_bytes());
    options.push(OPTION_TYPE_LZRECEIVE);
    options.extend_from_slice(&gas.to_be_bytes());
    if value > 0 {
        options.extend_from_slice(&value.to_be_bytes());
    }
}

/// True when the blob carries the type-3 header.
pub fn is_type_3(options: &[u8]) -> bool {
    options.len() >= 2 && options[0..2] == OPTIONS_TYPE_3.to_be_bytes()
}

/// Concatenates two type-3 blobs, keeping `head` strictly ahead of `extra`.
/// Empty sides pass through untouched; a non-empty side missing the type-3
/// header is rejected rather than guessed at.
pub fn merge(head: &[u8], extra: &[u8]) -> Result<Vec<u8>> {
    if extra.is_empty() {
        if head.is_empty() {
            return Ok(new_options());
        }
        require!(is_type_3(head), OptionsError::InvalidOptions);
        return Ok(head.to_vec());
    }
    require!(is_type_3(extra), OptionsError::InvalidOptions);
    if head.is_empty() {
        return Ok(extra.to_vec());
    }
    require!(is_type_3(head), OptionsError::InvalidOptions);

    let mut combined = Vec::with_capacity(head.len() + extra.len() - 2);
    combined.extend_from_slice(head);
    combined.extend_from_slice(&extra[2..]);
    Ok(combined)
}

/// Total executor `lzReceive` budget declared by a type-3 blob, as
/// `(gas, native_drop)` sums over every matching entry.
///
/// Entries for other workers or option types are skipped, not rejected; a
/// structurally broken entry is an error.
pub fn lz_receive_budget(options: &[u8]) -> Result<(u128, u128)> {
    require!(is_type_3(options), OptionsError::InvalidOptions);

    let mut gas: u128 = 0;
    let mut value: u128 = 0;
    let mut cursor = 2usize;
    while cursor < options.len() {
        require!(cursor + 3 <= options.len(), OptionsError::InvalidOptions);
        let worker_id = options[cursor];
        let size = u16::from_be_bytes([options[cursor + 1], options[cursor + 2]]) as usize;
        cursor += 3;
        require!(
            size >= 1 && cursor + size <= options.len(),
            OptionsError::InvalidOptions
        );
        let option_type = options[cursor];
        let payload = &options[cursor + 1..cursor + size];
        cursor += size;

        if worker_id != EXECUTOR_WORKER_ID || option_type != OPTION_TYPE_LZRECEIVE {
            continue;
        }
        match payload.len() {
            16 => {
                gas = gas.saturating_add(u128::from_be_bytes(payload.try_into().unwrap()));
            }
            32 => {
                gas = gas
                    .saturating_add(u128::from_be_bytes(payload[0..16].try_into().unwrap()));
                value = value
                    .saturating_add(u128::from_be_bytes(payload[16..32].try_into().unwrap()));
            }
            _ => return Err(OptionsError::InvalidOptions.into()),
        }
    }
    Ok((gas, value))
}

#[error_code]
pub enum OptionsError {
    #[msg("Options blob is not a well-formed type-3 encoding")]
    InvalidOptions,
    #[msg("Options blob exceeds the configured size bound")]
    OptionsTooLong,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BASE_RECEIVE_GAS;

    #[test]
    fn new_options_is_bare_type_3_header() {
        assert_eq!(new_options(), vec![0x00, 0x03]);
    }

    #[test]
    fn lz_receive_entry_layout() {
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, 200_000, 0);
        // header + worker id + size + option type + 16-byte gas
        assert_eq!(opts.len(), 2 + 1 + 2 + 1 + 16);
        assert_eq!(opts[2], EXECUTOR_WORKER_ID);
        assert_eq!(u16::from_be_bytes([opts[3], opts[4]]), 17);
        assert_eq!(opts[5], OPTION_TYPE_LZRECEIVE);
        assert_eq!(u128::from_be_bytes(opts[6..22].try_into().unwrap()), 200_000);
    }

    #[test]
    fn lz_receive_entry_with_value_drop() {
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, 50_000, 1_000_000);
        assert_eq!(u16::from_be_bytes([opts[3], opts[4]]), 33);
        assert_eq!(lz_receive_budget(&opts).unwrap(), (50_000, 1_000_000));
    }

    // returnGasEstimate = 50_000 on top of the fixed receive budget.
    #[test]
    fn reply_gas_reservation_composes_additively() {
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, BASE_RECEIVE_GAS + 50_000, 0);
        assert_eq!(lz_receive_budget(&opts).unwrap(), (230_000, 0));
    }

    #[test]
    fn budget_sums_repeated_entries() {
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, 100_000, 0);
        add_executor_lz_receive_option(&mut opts, 30_000, 500);
        assert_eq!(lz_receive_budget(&opts).unwrap(), (130_000, 500));
    }

    #[test]
    fn budget_skips_foreign_workers_and_types() {
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, 70_000, 0);
        // A DVN-style entry from another worker.
        opts.extend_from_slice(&[0x02, 0x00, 0x03, 0x05, 0xAA, 0xBB]);
        // An executor entry of a different option type.
        opts.extend_from_slice(&[EXECUTOR_WORKER_ID, 0x00, 0x02, 0x07, 0x01]);
        assert_eq!(lz_receive_budget(&opts).unwrap(), (70_000, 0));
    }

    #[test]
    fn merge_keeps_head_prefix_intact() {
        let mut enforced = new_options();
        add_executor_lz_receive_option(&mut enforced, 100_000, 0);
        let mut caller = new_options();
        add_executor_lz_receive_option(&mut caller, 25_000, 9);

        let combined = merge(&enforced, &caller).unwrap();
        assert!(combined.starts_with(&enforced));
        assert_eq!(&combined[enforced.len()..], &caller[2..]);
        assert_eq!(lz_receive_budget(&combined).unwrap(), (125_000, 9));
    }

    #[test]
    fn merge_passes_single_sides_through() {
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, 10, 0);
        assert_eq!(merge(&opts, &[]).unwrap(), opts);
        assert_eq!(merge(&[], &opts).unwrap(), opts);
        assert_eq!(merge(&[], &[]).unwrap(), new_options());
    }

    #[test]
    fn merge_rejects_untyped_blobs() {
        let opts = new_options();
        assert!(merge(&[0x00, 0x01], &opts).is_err());
        assert!(merge(&opts, &[0xFF]).is_err());
    }

    #[test]
    fn budget_rejects_truncated_entry() {
        let mut opts = new_options();
        add_executor_lz_receive_option(&mut opts, 10, 0);
        opts.truncate(opts.len() - 1);
        assert!(lz_receive_budget(&opts).is_err());
    }

    #[test]
    fn budget_rejects_bad_lz_receive_payload_width() {
        let mut opts = new_options();
        opts.extend_from_slice(&[EXECUTOR_WORKER_ID, 0x00, 0x09, OPTION_TYPE_LZRECEIVE]);
        opts.extend_from_slice(&[0u8; 8]);
        assert!(lz_receive_budget(&opts).is_err());
    }
}
