//! Composite coupon code grammars.
//!
//! Both grammars are driven by value length indicators (VLIs): a single digit
//! announcing how long the following sub-field is. Errors are returned as a
//! short reason string that ends up in the diagnostic message.

use chrono::NaiveDate;
use std::ops::RangeInclusive;

struct Cursor<'a> {
    digits: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(value: &'a str) -> Result<Self, String> {
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err("coupon codes contain digits only".into());
        }
        Ok(Self {
            digits: value,
            pos: 0,
        })
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.digits.len()
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a str, String> {
        let end = self.pos + n;
        let Some(part) = self.digits.get(self.pos..end) else {
            return Err(format!("{what} is truncated"));
        };
        self.pos = end;
        Ok(part)
    }

    fn digit(&mut self, what: &str) -> Result<u8, String> {
        let part = self.take(1, what)?;
        Ok(part.as_bytes()[0] - b'0')
    }

    fn digit_in(&mut self, what: &str, allowed: &[u8]) -> Result<u8, String> {
        let d = self.digit(what)?;
        if allowed.contains(&d) {
            Ok(d)
        } else {
            Err(format!("{what} {d} is not allowed"))
        }
    }

    /// A VLI digit in `vli` followed by `base + VLI` digits.
    fn vli_field(
        &mut self,
        what: &str,
        vli: RangeInclusive<u8>,
        base: usize,
    ) -> Result<&'a str, String> {
        let v = self.digit(what)?;
        if !vli.contains(&v) {
            return Err(format!("{what} length indicator {v} is out of range"));
        }
        self.take(base + usize::from(v), what)
    }

    fn date(&mut self, what: &str) -> Result<NaiveDate, String> {
        let s = self.take(6, what)?;
        let b = s.as_bytes();
        let two = |i: usize| u32::from(b[i] - b'0') * 10 + u32::from(b[i + 1] - b'0');
        // YY is read in the 2000s; only leap-year validity depends on it.
        NaiveDate::from_ymd_opt(2000 + two(0) as i32, two(2), two(4))
            .ok_or_else(|| format!("{what} {s} is not a valid calendar date"))
    }
}

const PURCHASE_REQUIREMENT_CODES: &[u8] = &[0, 1, 2, 3, 4, 9];

/// Validate an AI 8110 North American coupon code.
pub(crate) fn north_american(value: &str) -> Result<(), String> {
    let mut c = Cursor::new(value)?;
    c.vli_field("company prefix", 0..=6, 6)?;
    c.take(6, "offer code")?;
    c.vli_field("save value", 1..=5, 0)?;
    c.vli_field("primary purchase requirement", 1..=5, 0)?;
    c.digit_in(
        "primary purchase requirement code",
        PURCHASE_REQUIREMENT_CODES,
    )?;
    c.take(3, "primary purchase family code")?;

    let mut last_field = 0u8;
    let mut expiry = None;
    let mut start = None;
    while !c.is_exhausted() {
        let field = c.digit("optional field identifier")?;
        if !matches!(field, 1..=6 | 9) {
            return Err(format!("unknown optional field {field}"));
        }
        if field <= last_field {
            return Err(format!("optional field {field} is repeated or out of order"));
        }
        last_field = field;
        match field {
            1 => {
                c.digit_in("additional purchase rules code", &[0, 1, 2, 3])?;
                additional_purchase(&mut c, "second")?;
            }
            2 => additional_purchase(&mut c, "third")?,
            3 => expiry = Some(c.date("expiration date")?),
            4 => start = Some(c.date("start date")?),
            5 => {
                c.vli_field("serial number", 0..=9, 6)?;
            }
            6 => {
                c.vli_field("retailer ID", 1..=7, 6)?;
            }
            _ => {
                c.digit_in("save value code", &[0, 1, 2, 5, 6])?;
                c.digit_in("save value applies to item", &[0, 1, 2])?;
                c.digit("store coupon flag")?;
                c.digit_in("don't multiply flag", &[0, 1])?;
            }
        }
    }

    if let (Some(start), Some(expiry)) = (start, expiry)
        && start > expiry
    {
        return Err("start date follows expiration date".into());
    }
    Ok(())
}

fn additional_purchase(c: &mut Cursor<'_>, ordinal: &str) -> Result<(), String> {
    c.vli_field(&format!("{ordinal} purchase requirement"), 1..=5, 0)?;
    c.digit_in(
        &format!("{ordinal} purchase requirement code"),
        PURCHASE_REQUIREMENT_CODES,
    )?;
    c.take(3, &format!("{ordinal} purchase family code"))?;
    let what = format!("{ordinal} purchase company prefix");
    match c.digit(&what)? {
        // 9: same company prefix as the primary purchase.
        9 => Ok(()),
        v @ 0..=6 => c.take(usize::from(v) + 6, &what).map(|_| ()),
        v => Err(format!("{what} length indicator {v} is out of range")),
    }
}

/// Validate an AI 8112 positive offer file coupon code.
pub(crate) fn positive_offer(value: &str) -> Result<(), String> {
    let mut c = Cursor::new(value)?;
    c.digit_in("coupon format", &[0, 1])?;
    c.vli_field("coupon funder ID", 0..=6, 6)?;
    c.take(6, "offer code")?;
    c.vli_field("serial number", 0..=9, 6)?;
    if !c.is_exhausted() {
        return Err("unexpected data after serial number".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NA_BASE: &str = "10614141123456250110123";

    #[test]
    fn north_american_minimal() {
        assert_eq!(north_american(NA_BASE), Ok(()));
    }

    #[test]
    fn north_american_with_optional_fields() {
        let code = format!("{NA_BASE}3251231425010190000");
        assert_eq!(north_american(&code), Ok(()));
        let code = format!("{NA_BASE}1021012390614141");
        assert_eq!(north_american(&code), Ok(()));
        let code = format!("{NA_BASE}50123456610614141");
        assert_eq!(north_american(&code), Ok(()));
    }

    #[test]
    fn north_american_dates() {
        assert_eq!(north_american(&format!("{NA_BASE}3240229")), Ok(()));
        let err = north_american(&format!("{NA_BASE}3250229")).unwrap_err();
        assert!(err.contains("not a valid calendar date"), "{err}");
        let err = north_american(&format!("{NA_BASE}3250230")).unwrap_err();
        assert!(err.contains("expiration date"), "{err}");
        let err = north_american(&format!("{NA_BASE}32501014251231")).unwrap_err();
        assert!(err.contains("start date follows"), "{err}");
    }

    #[test]
    fn north_american_field_order() {
        let err = north_american(&format!("{NA_BASE}42501013251231")).unwrap_err();
        assert!(err.contains("out of order"), "{err}");
        let err = north_american(&format!("{NA_BASE}32512313251231")).unwrap_err();
        assert!(err.contains("repeated"), "{err}");
        let err = north_american(&format!("{NA_BASE}7")).unwrap_err();
        assert!(err.contains("unknown optional field 7"), "{err}");
    }

    #[test]
    fn north_american_truncation_and_ranges() {
        assert!(north_american("1061414").is_err());
        // Save value VLI 0 is not permitted.
        assert!(north_american("10614141123456011").is_err());
        assert!(north_american("1061414112345625011012A").is_err());
        let err = north_american(&format!("{NA_BASE}325123")).unwrap_err();
        assert!(err.contains("truncated"), "{err}");
    }

    #[test]
    fn positive_offer_grammar() {
        assert_eq!(positive_offer("006141411234560123456"), Ok(()));
        assert_eq!(positive_offer("110614141123456212345678"), Ok(()));
        assert!(positive_offer("206141411234560123456").is_err());
        assert!(positive_offer("0061414112345601234569").is_err());
        assert!(positive_offer("0061414112345601234").is_err());
        assert!(positive_offer("076141411234560123456").is_err());
    }
}
