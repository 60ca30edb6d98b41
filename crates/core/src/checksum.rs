//! Check-digit primitives: GS1 weighted mod-10 and ISO 7064 mod-97 (IBAN).

/// Validate a GS1 check digit already embedded as the last digit of `s`.
///
/// Weights alternate 1, 3, 1, ... from the rightmost digit. Returns `false`
/// for blank input or any non-digit character.
pub fn gs1_checksum_is_valid(s: &str) -> bool {
    if s.trim().is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    weighted_sum(s.bytes().rev(), 0) % 10 == 0
}

/// Compute the GS1 check digit that makes `s` followed by the digit valid.
///
/// Returns `None` for blank input or any non-digit character.
pub fn gs1_check_digit(s: &str) -> Option<u8> {
    if s.trim().is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // The digit to be appended takes weight 1, so `s` starts at weight 3.
    let sum = weighted_sum(s.bytes().rev(), 1);
    Some(((10 - sum % 10) % 10) as u8)
}

fn weighted_sum(digits_right_to_left: impl Iterator<Item = u8>, start: usize) -> u32 {
    digits_right_to_left
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if (i + start) % 2 == 1 { d * 3 } else { d }
        })
        .sum()
}

/// ISO 7064 mod-97-10 check over an IBAN-shaped string.
///
/// The first four characters move to the end, letters become two-digit
/// numbers (`A` = 10 … `Z` = 35, case-insensitive) and the resulting decimal
/// number must leave remainder 1 modulo 97. The remainder is reduced one
/// character at a time, so arbitrarily long inputs never overflow.
pub fn iban_checksum_is_valid(s: &str) -> bool {
    if s.len() < 5 || !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return false;
    }
    let (head, tail) = s.split_at(4);
    let mut remainder: u32 = 0;
    for b in tail.bytes().chain(head.bytes()) {
        if b.is_ascii_digit() {
            remainder = (remainder * 10 + u32::from(b - b'0')) % 97;
        } else {
            let n = u32::from(b.to_ascii_uppercase() - b'A') + 10;
            remainder = (remainder * 100 + n) % 97;
        }
    }
    remainder == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_gs1_keys_validate() {
        assert!(gs1_checksum_is_valid("09506000134352"));
        assert!(gs1_checksum_is_valid("106141412345678908"));
        assert!(gs1_checksum_is_valid("4012345000009"));
        assert!(gs1_checksum_is_valid("0"));
    }

    #[test]
    fn flipped_check_digit_fails() {
        assert!(!gs1_checksum_is_valid("09506000134353"));
        assert!(!gs1_checksum_is_valid("4012345000008"));
    }

    #[test]
    fn non_digits_and_blank_fail() {
        assert!(!gs1_checksum_is_valid(""));
        assert!(!gs1_checksum_is_valid("   "));
        assert!(!gs1_checksum_is_valid("0950600013435A"));
        assert!(!gs1_checksum_is_valid(" 9506000134352"));
    }

    #[test]
    fn check_digit_computation() {
        assert_eq!(gs1_check_digit("0950600013435"), Some(2));
        assert_eq!(gs1_check_digit("10614141234567890"), Some(8));
        assert_eq!(gs1_check_digit("401234500000"), Some(9));
        assert_eq!(gs1_check_digit("12a"), None);
        assert_eq!(gs1_check_digit(""), None);
    }

    #[test]
    fn iban_reference_values() {
        assert!(iban_checksum_is_valid("GB82WEST12345698765432"));
        assert!(iban_checksum_is_valid("DE89370400440532013000"));
        assert!(iban_checksum_is_valid("NL91ABNA0417164300"));
        assert!(iban_checksum_is_valid("FR1420041010050500013M02606"));
        assert!(iban_checksum_is_valid("gb82west12345698765432"));
    }

    #[test]
    fn iban_rejects_bad_input() {
        assert!(!iban_checksum_is_valid("GB83WEST12345698765432"));
        assert!(!iban_checksum_is_valid("GB82"));
        assert!(!iban_checksum_is_valid("GB82 WEST 1234 5698 7654 32"));
        assert!(!iban_checksum_is_valid(""));
    }
}
