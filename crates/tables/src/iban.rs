//! IBAN country structures.
//!
//! Each entry gives the total IBAN length and a regular-expression fragment
//! for the BBAN (everything after the two check digits). The validator wraps
//! the fragment as `^{country}\d{2}{bban}$`.

/// Registered IBAN structure for one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IbanFormat {
    /// ISO 3166-1 alpha-2 country code.
    pub country: &'static str,
    /// Total IBAN length in characters.
    pub length: usize,
    /// Regular-expression fragment for the BBAN.
    pub bban: &'static str,
}

const fn fmt(country: &'static str, length: usize, bban: &'static str) -> IbanFormat {
    IbanFormat {
        country,
        length,
        bban,
    }
}

/// Countries issuing IBANs, sorted by country code.
pub const IBAN_FORMATS: &[IbanFormat] = &[
    fmt("AD", 24, r"\d{8}[A-Z0-9]{12}"),
    fmt("AE", 23, r"\d{19}"),
    fmt("AL", 28, r"\d{8}[A-Z0-9]{16}"),
    fmt("AT", 20, r"\d{16}"),
    fmt("AZ", 28, r"[A-Z]{4}[A-Z0-9]{20}"),
    fmt("BA", 20, r"\d{16}"),
    fmt("BE", 16, r"\d{12}"),
    fmt("BG", 22, r"[A-Z]{4}\d{6}[A-Z0-9]{8}"),
    fmt("BH", 22, r"[A-Z]{4}[A-Z0-9]{14}"),
    fmt("BR", 29, r"\d{23}[A-Z][A-Z0-9]"),
    fmt("BY", 28, r"[A-Z0-9]{4}\d{4}[A-Z0-9]{16}"),
    fmt("CH", 21, r"\d{5}[A-Z0-9]{12}"),
    fmt("CR", 22, r"\d{18}"),
    fmt("CY", 28, r"\d{8}[A-Z0-9]{16}"),
    fmt("CZ", 24, r"\d{20}"),
    fmt("DE", 22, r"\d{18}"),
    fmt("DK", 18, r"\d{14}"),
    fmt("DO", 28, r"[A-Z0-9]{4}\d{20}"),
    fmt("EE", 20, r"\d{16}"),
    fmt("EG", 29, r"\d{25}"),
    fmt("ES", 24, r"\d{20}"),
    fmt("FI", 18, r"\d{14}"),
    fmt("FO", 18, r"\d{14}"),
    fmt("FR", 27, r"\d{10}[A-Z0-9]{11}\d{2}"),
    fmt("GB", 22, r"[A-Z]{4}\d{14}"),
    fmt("GE", 22, r"[A-Z]{2}\d{16}"),
    fmt("GI", 23, r"[A-Z]{4}[A-Z0-9]{15}"),
    fmt("GL", 18, r"\d{14}"),
    fmt("GR", 27, r"\d{7}[A-Z0-9]{16}"),
    fmt("GT", 28, r"[A-Z0-9]{24}"),
    fmt("HR", 21, r"\d{17}"),
    fmt("HU", 28, r"\d{24}"),
    fmt("IE", 22, r"[A-Z]{4}\d{14}"),
    fmt("IL", 23, r"\d{19}"),
    fmt("IQ", 23, r"[A-Z]{4}\d{15}"),
    fmt("IS", 26, r"\d{22}"),
    fmt("IT", 27, r"[A-Z]\d{10}[A-Z0-9]{12}"),
    fmt("JO", 30, r"[A-Z]{4}\d{4}[A-Z0-9]{18}"),
    fmt("KW", 30, r"[A-Z]{4}[A-Z0-9]{22}"),
    fmt("KZ", 20, r"\d{3}[A-Z0-9]{13}"),
    fmt("LB", 28, r"\d{4}[A-Z0-9]{20}"),
    fmt("LC", 32, r"[A-Z]{4}[A-Z0-9]{24}"),
    fmt("LI", 21, r"\d{5}[A-Z0-9]{12}"),
    fmt("LT", 20, r"\d{16}"),
    fmt("LU", 20, r"\d{3}[A-Z0-9]{13}"),
    fmt("LV", 21, r"[A-Z]{4}[A-Z0-9]{13}"),
    fmt("MC", 27, r"\d{10}[A-Z0-9]{11}\d{2}"),
    fmt("MD", 24, r"[A-Z0-9]{20}"),
    fmt("ME", 22, r"\d{18}"),
    fmt("MK", 19, r"\d{3}[A-Z0-9]{10}\d{2}"),
    fmt("MR", 27, r"\d{23}"),
    fmt("MT", 31, r"[A-Z]{4}\d{5}[A-Z0-9]{18}"),
    fmt("MU", 30, r"[A-Z]{4}\d{19}[A-Z]{3}"),
    fmt("NL", 18, r"[A-Z]{4}\d{10}"),
    fmt("NO", 15, r"\d{11}"),
    fmt("PK", 24, r"[A-Z]{4}[A-Z0-9]{16}"),
    fmt("PL", 28, r"\d{24}"),
    fmt("PS", 29, r"[A-Z]{4}[A-Z0-9]{21}"),
    fmt("PT", 25, r"\d{21}"),
    fmt("QA", 29, r"[A-Z]{4}[A-Z0-9]{21}"),
    fmt("RO", 24, r"[A-Z]{4}[A-Z0-9]{16}"),
    fmt("RS", 22, r"\d{18}"),
    fmt("SA", 24, r"\d{2}[A-Z0-9]{18}"),
    fmt("SC", 31, r"[A-Z]{4}\d{20}[A-Z]{3}"),
    fmt("SE", 24, r"\d{20}"),
    fmt("SI", 19, r"\d{15}"),
    fmt("SK", 24, r"\d{20}"),
    fmt("SM", 27, r"[A-Z]\d{10}[A-Z0-9]{12}"),
    fmt("ST", 25, r"\d{21}"),
    fmt("SV", 28, r"[A-Z]{4}\d{20}"),
    fmt("TL", 23, r"\d{19}"),
    fmt("TN", 24, r"\d{20}"),
    fmt("TR", 26, r"\d{5}[A-Z0-9]{17}"),
    fmt("UA", 29, r"\d{6}[A-Z0-9]{19}"),
    fmt("VA", 22, r"\d{18}"),
    fmt("VG", 24, r"[A-Z]{4}\d{16}"),
    fmt("XK", 20, r"\d{16}"),
];

/// Structures announced by countries that do not issue IBANs yet.
pub const ASPIRATIONAL_IBAN_FORMATS: &[IbanFormat] = &[
    fmt("AO", 25, r"\d{21}"),
    fmt("BF", 28, r"[A-Z0-9]{2}\d{22}"),
    fmt("BJ", 28, r"[A-Z0-9]{2}\d{22}"),
    fmt("CF", 27, r"\d{23}"),
    fmt("CG", 27, r"\d{23}"),
    fmt("CI", 28, r"[A-Z]\d{23}"),
    fmt("CM", 27, r"\d{23}"),
    fmt("CV", 25, r"\d{21}"),
    fmt("DZ", 26, r"\d{22}"),
    fmt("GA", 27, r"\d{23}"),
    fmt("GQ", 27, r"\d{23}"),
    fmt("GW", 25, r"[A-Z0-9]{2}\d{19}"),
    fmt("HN", 28, r"[A-Z]{4}\d{20}"),
    fmt("IR", 26, r"\d{22}"),
    fmt("KM", 27, r"\d{23}"),
    fmt("MA", 28, r"\d{24}"),
    fmt("MG", 27, r"\d{23}"),
    fmt("ML", 28, r"[A-Z0-9]{2}\d{22}"),
    fmt("MZ", 25, r"\d{21}"),
    fmt("NE", 28, r"[A-Z]{2}\d{22}"),
    fmt("NI", 32, r"[A-Z]{4}\d{24}"),
    fmt("SN", 28, r"[A-Z]\d{23}"),
    fmt("TD", 27, r"\d{23}"),
    fmt("TG", 28, r"[A-Z]{2}\d{22}"),
];

/// Look up the registered structure for `country`.
pub fn iban_format(country: &str) -> Option<&'static IbanFormat> {
    IBAN_FORMATS
        .binary_search_by(|f| f.country.cmp(country))
        .ok()
        .map(|i| &IBAN_FORMATS[i])
}

/// Look up an announced-but-not-adopted structure for `country`.
pub fn aspirational_iban_format(country: &str) -> Option<&'static IbanFormat> {
    ASPIRATIONAL_IBAN_FORMATS
        .binary_search_by(|f| f.country.cmp(country))
        .ok()
        .map(|i| &ASPIRATIONAL_IBAN_FORMATS[i])
}
