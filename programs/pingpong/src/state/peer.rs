use anchor_lang::prelude::*;

use crate::{
    constants::MAX_ENFORCED_OPTIONS_LEN,
    msg_codec::ABA_TYPE,
    options,
};

/// Per-path enforced executor options, keyed by the type of the outbound
/// message. Always placed ahead of caller-supplied options so a peer cannot
/// be sent a message that undercuts the configured execution floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace)]
pub struct EnforcedOptions {
    #[max_len(MAX_ENFORCED_OPTIONS_LEN)]
    pub vanilla: Vec<u8>,
    #[max_len(MAX_ENFORCED_OPTIONS_LEN)]
    pub aba: Vec<u8>,
}

impl EnforcedOptions {
    pub fn for_msg_type(&self, msg_type: u16) -> &[u8] {
        if msg_type == ABA_TYPE {
            &self.aba
        } else {
            &self.vanilla
        }
    }

    /// Enforced options for `msg_type`, followed by `caller` options.
    pub fn combine(&self, msg_type: u16, caller: &[u8]) -> Result<Vec<u8>> {
        options::merge(self.for_msg_type(msg_type), caller)
    }
}

/// Configuration for one destination path: the peer OApp's address on that
/// chain and the options floor enforced for messages sent to it.
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct PeerConfig {
    pub peer_address: [u8; 32],
    pub enforced_options: EnforcedOptions,
    pub bump: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg_codec::VANILLA_TYPE;
    use crate::options::{add_executor_lz_receive_option, new_options};

    fn enforced() -> EnforcedOptions {
        let mut vanilla = new_options();
        add_executor_lz_receive_option(&mut vanilla, 60_000, 0);
        let mut aba = new_options();
        add_executor_lz_receive_option(&mut aba, 90_000, 0);
        EnforcedOptions { vanilla, aba }
    }

    #[test]
    fn combine_selects_options_by_message_type() {
        let enforced = enforced();
        let vanilla = enforced.combine(VANILLA_TYPE, &[]).unwrap();
        let aba = enforced.combine(ABA_TYPE, &[]).unwrap();
        assert_eq!(vanilla, enforced.vanilla);
        assert_eq!(aba, enforced.aba);
    }

    #[test]
    fn combine_prefixes_enforced_before_caller() {
        let enforced = enforced();
        let mut caller = new_options();
        add_executor_lz_receive_option(&mut caller, 10_000, 0);
        let combined = enforced.combine(ABA_TYPE, &caller).unwrap();
        assert!(combined.starts_with(&enforced.aba));
    }

    #[test]
    fn combine_with_no_enforced_side_passes_caller_through() {
        let enforced = EnforcedOptions::default();
        let mut caller = new_options();
        add_executor_lz_receive_option(&mut caller, 10_000, 0);
        assert_eq!(enforced.combine(ABA_TYPE, &caller).unwrap(), caller);
    }
}
