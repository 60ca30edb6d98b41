// Property-based tests for check digits and scanning.
//
// Sizes stay small so the suite runs quickly.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;

use gs1_core::{
    gs1_check_digit, gs1_checksum_is_valid, iban_checksum_is_valid, parse_to_vec,
};

fn arb_digits(len: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

fn with_check_digit(body: &str) -> String {
    let check = gs1_check_digit(body).expect("digit body");
    format!("{body}{check}")
}

/// Check digits for an IBAN whose check digits are currently `00`.
fn iban_check_digits(country: &str, bban: &str) -> String {
    let rearranged = format!("{bban}{country}00");
    let mut remainder = 0u32;
    for c in rearranged.chars() {
        let n = c.to_digit(36).expect("alphanumeric");
        remainder = if n < 10 {
            (remainder * 10 + n) % 97
        } else {
            (remainder * 100 + n) % 97
        };
    }
    format!("{:02}", 98 - remainder)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn appended_check_digit_validates(body in arb_digits(1..30)) {
        prop_assert!(gs1_checksum_is_valid(&with_check_digit(&body)));
    }

    #[test]
    fn single_digit_change_is_detected(
        body in arb_digits(1..20),
        index in any::<prop::sample::Index>(),
        delta in 1u32..10,
    ) {
        let valid = with_check_digit(&body);
        let at = index.index(valid.len());
        let mut chars: Vec<char> = valid.chars().collect();
        let d = chars[at].to_digit(10).expect("digit");
        chars[at] = char::from_digit((d + delta) % 10, 10).expect("digit");
        let changed: String = chars.into_iter().collect();
        prop_assert!(!gs1_checksum_is_valid(&changed), "{valid} -> {changed}");
    }

    #[test]
    fn valid_gtins_scan_clean(body in arb_digits(13..14)) {
        let input = format!("01{}", with_check_digit(&body));
        let fields = parse_to_vec(Some(&input));
        prop_assert_eq!(fields.len(), 1);
        prop_assert!(!fields[0].is_error(), "{:?}", fields[0].diagnostics());
    }

    #[test]
    fn measures_apply_the_implied_decimal_point(
        exponent in 0u32..=6,
        value in arb_digits(6..7),
    ) {
        let input = format!("310{exponent}{value}");
        let fields = parse_to_vec(Some(&input));
        prop_assert_eq!(fields.len(), 1);
        let decimal = fields[0].decimal_value().expect("decimal");
        let expected = rust_decimal::Decimal::new(value.parse::<i64>().unwrap(), exponent);
        prop_assert_eq!(decimal, expected);
    }

    #[test]
    fn generated_ibans_validate(bank in "[A-Z]{4}", account in arb_digits(14..15)) {
        let bban = format!("{bank}{account}");
        let iban = format!("GB{}{bban}", iban_check_digits("GB", &bban));
        prop_assert!(iban_checksum_is_valid(&iban), "{iban}");
        let fields = parse_to_vec(Some(&format!("8007{iban}")));
        prop_assert!(!fields[0].is_error(), "{:?}", fields[0].diagnostics());
    }

    #[test]
    fn scanning_never_panics_and_always_delivers(input in "\\PC{0,64}") {
        let fields = parse_to_vec(Some(&input));
        prop_assert!(!fields.is_empty());
        prop_assert_eq!(parse_to_vec(Some(&input)), fields);
    }
}
