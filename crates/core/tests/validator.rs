//! Validator tests: pattern checks and the algorithmic checks layered on
//! individual AIs, exercised end to end through a scan.
//!
//! Identifier resolution lives in `resolver.rs`.

mod common;

use common::{assert_clean, numbers, single};
use gs1_core::{Severity, codes};

// ─── Patterns ───────────────────────────────────────────────────────────────

#[test]
fn dates_must_have_a_valid_month_and_day() {
    assert_clean(&single("17251231"));
    assert_clean(&single("11250100"));
    assert_eq!(numbers(&single("17251301")), vec![2100, 2005]);
    assert_eq!(numbers(&single("17250132")), vec![2100, 2005]);
}

#[test]
fn character_set_82_is_enforced() {
    assert_clean(&single("21ABC-123/x%\"?_"));
    assert_eq!(numbers(&single("21ABC#1")), vec![2100, 2005]);
    assert_eq!(numbers(&single("10ÄB")), vec![2100, 2005]);
}

#[test]
fn length_limits_are_enforced() {
    assert_clean(&single(&format!("10{}", "A".repeat(20))));
    assert_eq!(
        numbers(&single(&format!("10{}", "A".repeat(21)))),
        vec![2100, 2005]
    );
}

#[test]
fn pattern_mismatch_is_an_error_and_value_invalid_is_fatal() {
    let field = single("37ABC");
    let ds = field.diagnostics();
    assert_eq!(ds[0].code, codes::PATTERN_MISMATCH);
    assert_eq!(ds[0].severity, Severity::Error);
    assert_eq!(ds[1].code, codes::VALUE_INVALID);
    assert_eq!(ds[1].severity, Severity::Fatal);
}

// ─── Check digits ───────────────────────────────────────────────────────────

#[test]
fn final_check_digit_keys() {
    for input in [
        "00106141412345678908",
        "0109506000134352",
        "40240123450000000009",
        "4144012345000009",
        "8017950123456789012341",
    ] {
        assert_clean(&single(input));
    }
    for input in [
        "00106141412345678909",
        "0109506000134351",
        "40240123450000000008",
        "4144012345000008",
        "8017950123456789012342",
    ] {
        assert_eq!(numbers(&single(input)), vec![2008, 2005], "{input}");
    }
}

#[test]
fn check_digit_message_names_the_value() {
    let field = single("0109506000134351");
    assert_eq!(
        field.diagnostics()[0].message,
        "check digit of '09506000134351' is invalid"
    );
}

#[test]
fn check_digit_in_position_13() {
    assert_clean(&single("2534012345000009"));
    assert_clean(&single("2534012345000009DOC-7"));
    assert_clean(&single("2554012345000009123"));
    assert_eq!(numbers(&single("2534012345000008ABC")), vec![2009, 2005]);
    assert_eq!(numbers(&single("2554012345000008")), vec![2009, 2005]);
}

#[test]
fn check_digit_in_position_14() {
    assert_clean(&single("800309506000134352RTN1"));
    assert_clean(&single("8006095060001343520102"));
    assert_clean(&single("8026095060001343520102"));
    assert_eq!(numbers(&single("800309506000134351RTN1")), vec![2010, 2005]);
    assert_eq!(numbers(&single("8006095060001343510102")), vec![2010, 2005]);
}

#[test]
fn short_leading_key_reports_only_the_pattern() {
    assert_eq!(numbers(&single("253401234500")), vec![2100, 2005]);
}

// ─── IBAN ───────────────────────────────────────────────────────────────────

#[test]
fn iban_accepts_issuing_country_accounts() {
    assert_clean(&single("8007GB82WEST12345698765432"));
    assert_clean(&single("8007DE89370400440532013000"));
}

#[test]
fn iban_rejections() {
    let cases = [
        ("8007gb82WEST12345698765432", 2012),
        ("8007GB8XWEST12345698765432", 2012),
        ("8007QQ82WEST12345698765432", 2013),
        ("8007GB82WEST1234569876543", 2013),
        ("8007DZ580002000200020002000200", 2014),
        ("8007GB83WEST12345698765432", 2015),
    ];
    for (input, expected) in cases {
        assert_eq!(numbers(&single(input)), vec![expected, 2005], "{input}");
    }
}

#[test]
fn iban_country_is_in_context() {
    let field = single("8007DZ580002000200020002000200");
    let ctx = field.diagnostics()[0].context.as_ref().expect("context");
    assert_eq!(ctx["country"], "DZ");
}

// ─── Coupons ────────────────────────────────────────────────────────────────

const NA_BASE: &str = "10614141123456250110123";

#[test]
fn north_american_coupons() {
    for optional in ["", "3251231425010190000", "1021012390614141", "50123456610614141"] {
        assert_clean(&single(&format!("8110{NA_BASE}{optional}")));
    }
    for input in [
        "81101061414".to_string(),
        format!("8110{NA_BASE}7"),
        format!("8110{NA_BASE}32512314260101"),
    ] {
        let field = single(&input);
        assert_eq!(numbers(&field), vec![2016, 2005], "{input}");
        assert_eq!(field.diagnostics()[0].code, codes::COUPON_NORTH_AMERICA_INVALID);
    }
}

#[test]
fn positive_offer_coupons() {
    assert_clean(&single("8112006141411234560123456"));
    assert_clean(&single("8112110614141123456212345678"));
    for input in ["8112206141411234560123456", "81120061414112345601234567"] {
        let field = single(input);
        assert_eq!(numbers(&field), vec![2017, 2005], "{input}");
        assert_eq!(
            field.diagnostics()[0].code,
            codes::COUPON_POSITIVE_OFFER_INVALID
        );
    }
}

// ─── Freight unit type ──────────────────────────────────────────────────────

#[test]
fn known_freight_unit_types_are_clean() {
    for code in ["PX", "1A", "8", "ZZ"] {
        assert_clean(&single(&format!("7041{code}")));
    }
}

#[test]
fn unknown_freight_unit_type_is_only_a_warning() {
    let field = single("7041QQQ");
    assert_eq!(numbers(&field), vec![2017]);
    let d = &field.diagnostics()[0];
    assert_eq!(d.code, codes::FREIGHT_UNIT_TYPE_UNKNOWN);
    assert_eq!(d.severity, Severity::Warn);
    assert!(field.is_error());
    assert!(!field.is_fatal());
}

#[test]
fn freight_unit_type_is_case_sensitive() {
    assert_eq!(numbers(&single("7041px")), vec![2017]);
}
