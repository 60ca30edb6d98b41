//! GS1 prefix allocation: the first three digits of a GTIN-13, GLN or SSCC
//! company prefix identify the GS1 member organisation that issued it.
//!
//! GTIN-8 prefixes follow a separate allocation and are not covered.

use serde::Serialize;

/// What a three-digit GS1 prefix is allocated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[non_exhaustive]
pub enum PrefixAllocation {
    /// A GS1 member organisation, identified by ISO 3166 alpha-2 country code.
    Member {
        /// ISO 3166-1 alpha-2 code of the member organisation's country.
        iso: &'static str,
        /// English name of the country or territory.
        name: &'static str,
    },
    /// Restricted circulation numbers (internal or regional use).
    RestrictedCirculation,
    /// Coupon identification.
    Coupon,
    /// Refund receipts.
    RefundReceipt,
    /// Serial publications (ISSN).
    Issn,
    /// Books (ISBN, Bookland).
    Isbn,
    /// GS1 Global Office special applications.
    GlobalOffice,
}

const fn member(iso: &'static str, name: &'static str) -> PrefixAllocation {
    PrefixAllocation::Member { iso, name }
}

/// Inclusive prefix ranges, sorted and non-overlapping.
const PREFIX_RANGES: &[(u16, u16, PrefixAllocation)] = &[
    (0, 19, member("US", "United States")),
    (20, 29, PrefixAllocation::RestrictedCirculation),
    (30, 39, member("US", "United States")),
    (40, 49, PrefixAllocation::RestrictedCirculation),
    (50, 59, PrefixAllocation::Coupon),
    (60, 139, member("US", "United States")),
    (200, 299, PrefixAllocation::RestrictedCirculation),
    (300, 379, member("FR", "France")),
    (380, 380, member("BG", "Bulgaria")),
    (383, 383, member("SI", "Slovenia")),
    (385, 385, member("HR", "Croatia")),
    (387, 387, member("BA", "Bosnia and Herzegovina")),
    (389, 389, member("ME", "Montenegro")),
    (390, 390, member("XK", "Kosovo")),
    (400, 440, member("DE", "Germany")),
    (450, 459, member("JP", "Japan")),
    (460, 469, member("RU", "Russia")),
    (470, 470, member("KG", "Kyrgyzstan")),
    (471, 471, member("TW", "Taiwan")),
    (474, 474, member("EE", "Estonia")),
    (475, 475, member("LV", "Latvia")),
    (476, 476, member("AZ", "Azerbaijan")),
    (477, 477, member("LT", "Lithuania")),
    (478, 478, member("UZ", "Uzbekistan")),
    (479, 479, member("LK", "Sri Lanka")),
    (480, 480, member("PH", "Philippines")),
    (481, 481, member("BY", "Belarus")),
    (482, 482, member("UA", "Ukraine")),
    (483, 483, member("TM", "Turkmenistan")),
    (484, 484, member("MD", "Moldova")),
    (485, 485, member("AM", "Armenia")),
    (486, 486, member("GE", "Georgia")),
    (487, 487, member("KZ", "Kazakhstan")),
    (488, 488, member("TJ", "Tajikistan")),
    (489, 489, member("HK", "Hong Kong")),
    (490, 499, member("JP", "Japan")),
    (500, 509, member("GB", "United Kingdom")),
    (520, 521, member("GR", "Greece")),
    (528, 528, member("LB", "Lebanon")),
    (529, 529, member("CY", "Cyprus")),
    (530, 530, member("AL", "Albania")),
    (531, 531, member("MK", "North Macedonia")),
    (535, 535, member("MT", "Malta")),
    (539, 539, member("IE", "Ireland")),
    (540, 549, member("BE", "Belgium")),
    (560, 560, member("PT", "Portugal")),
    (569, 569, member("IS", "Iceland")),
    (570, 579, member("DK", "Denmark")),
    (590, 590, member("PL", "Poland")),
    (594, 594, member("RO", "Romania")),
    (599, 599, member("HU", "Hungary")),
    (600, 601, member("ZA", "South Africa")),
    (603, 603, member("GH", "Ghana")),
    (604, 604, member("SN", "Senegal")),
    (608, 608, member("BH", "Bahrain")),
    (609, 609, member("MU", "Mauritius")),
    (611, 611, member("MA", "Morocco")),
    (613, 613, member("DZ", "Algeria")),
    (615, 615, member("NG", "Nigeria")),
    (616, 616, member("KE", "Kenya")),
    (618, 618, member("CI", "Côte d'Ivoire")),
    (619, 619, member("TN", "Tunisia")),
    (620, 620, member("TZ", "Tanzania")),
    (621, 621, member("SY", "Syria")),
    (622, 622, member("EG", "Egypt")),
    (623, 623, member("BN", "Brunei")),
    (624, 624, member("LY", "Libya")),
    (625, 625, member("JO", "Jordan")),
    (626, 626, member("IR", "Iran")),
    (627, 627, member("KW", "Kuwait")),
    (628, 628, member("SA", "Saudi Arabia")),
    (629, 629, member("AE", "United Arab Emirates")),
    (640, 649, member("FI", "Finland")),
    (690, 699, member("CN", "China")),
    (700, 709, member("NO", "Norway")),
    (729, 729, member("IL", "Israel")),
    (730, 739, member("SE", "Sweden")),
    (740, 740, member("GT", "Guatemala")),
    (741, 741, member("SV", "El Salvador")),
    (742, 742, member("HN", "Honduras")),
    (743, 743, member("NI", "Nicaragua")),
    (744, 744, member("CR", "Costa Rica")),
    (745, 745, member("PA", "Panama")),
    (746, 746, member("DO", "Dominican Republic")),
    (750, 750, member("MX", "Mexico")),
    (754, 755, member("CA", "Canada")),
    (759, 759, member("VE", "Venezuela")),
    (760, 769, member("CH", "Switzerland")),
    (770, 771, member("CO", "Colombia")),
    (773, 773, member("UY", "Uruguay")),
    (775, 775, member("PE", "Peru")),
    (777, 777, member("BO", "Bolivia")),
    (778, 779, member("AR", "Argentina")),
    (780, 780, member("CL", "Chile")),
    (784, 784, member("PY", "Paraguay")),
    (786, 786, member("EC", "Ecuador")),
    (789, 790, member("BR", "Brazil")),
    (800, 839, member("IT", "Italy")),
    (840, 849, member("ES", "Spain")),
    (850, 850, member("CU", "Cuba")),
    (858, 858, member("SK", "Slovakia")),
    (859, 859, member("CZ", "Czechia")),
    (860, 860, member("RS", "Serbia")),
    (865, 865, member("MN", "Mongolia")),
    (867, 867, member("KP", "North Korea")),
    (868, 869, member("TR", "Türkiye")),
    (870, 879, member("NL", "Netherlands")),
    (880, 880, member("KR", "South Korea")),
    (884, 884, member("KH", "Cambodia")),
    (885, 885, member("TH", "Thailand")),
    (888, 888, member("SG", "Singapore")),
    (890, 890, member("IN", "India")),
    (893, 893, member("VN", "Vietnam")),
    (896, 896, member("PK", "Pakistan")),
    (899, 899, member("ID", "Indonesia")),
    (900, 919, member("AT", "Austria")),
    (930, 939, member("AU", "Australia")),
    (940, 949, member("NZ", "New Zealand")),
    (950, 950, PrefixAllocation::GlobalOffice),
    (955, 955, member("MY", "Malaysia")),
    (958, 958, member("MO", "Macao")),
    (960, 969, PrefixAllocation::GlobalOffice),
    (977, 977, PrefixAllocation::Issn),
    (978, 979, PrefixAllocation::Isbn),
    (980, 980, PrefixAllocation::RefundReceipt),
    (981, 984, PrefixAllocation::Coupon),
    (990, 999, PrefixAllocation::Coupon),
];

/// Resolve the allocation of a GS1 company prefix (or any key starting with one).
///
/// Only the first three characters are inspected; they must be digits.
/// Callers holding a GTIN-14 or SSCC should drop the leading indicator or
/// extension digit first.
pub fn country_for(gtin_or_prefix: &str) -> Option<PrefixAllocation> {
    let head = gtin_or_prefix.get(..3)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let prefix: u16 = head.parse().ok()?;
    let idx = PREFIX_RANGES.partition_point(|(_, end, _)| *end < prefix);
    PREFIX_RANGES
        .get(idx)
        .filter(|(start, _, _)| *start <= prefix)
        .map(|(_, _, allocation)| *allocation)
}
