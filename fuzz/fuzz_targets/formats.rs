#![no_main]

use libfuzzer_sys::fuzz_target;
use med_common::{is_account_address, is_identity, is_zero_account, strip_account_prefix};

fuzz_target!(|data: &[u8]| {
    if is_identity(data) {
        assert_eq!(data.len(), 12);
        assert!(data.iter().all(u8::is_ascii_digit));
    }

    if is_account_address(data) {
        let digits = strip_account_prefix(data);
        assert_eq!(digits.len(), 40);
        assert!(digits.iter().all(u8::is_ascii_hexdigit));
    } else {
        assert!(!is_zero_account(data));
    }
});
