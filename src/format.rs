//! Formatting Oracle - Pure phone-number cleaning, masking, and parsing.
//!
//! Every function here is a synchronous pure computation over a digit string
//! and a country table slice. Absence is always an `Option`, never an error:
//! unknown dial codes degrade to a `+digits` rendering and `None` matches,
//! and the widget resolves them with explicit fallbacks.
//!
//! # API
//!
//! - `clean` / `raw_value` - strip non-digit characters
//! - `display_format` - apply the matched country's mask
//! - `match_by_digits` - longest dial-code prefix match
//! - `lookup_country` - find a record by ISO code
//! - `default_iso2` - region from the locale environment
//! - `parse_phone_number` - formatted string to metadata
//! - `check_validity` - strict/lenient number validity

use std::env;

use crate::types::{CountryRecord, PhoneMetadata};

/// Mask character marking a subscriber digit slot.
pub const SLOT: char = '.';

/// Minimum national significant number length accepted by lenient
/// validation (E.164 floor).
pub const MIN_NATIONAL_DIGITS: usize = 7;

// =============================================================================
// CLEANING
// =============================================================================

/// Strip everything that is not a phone digit.
///
/// Mask punctuation, `+`, spaces, and slot markers all drop out, so cleaning
/// a mask against itself yields the dial-code digits alone.
pub fn clean(raw: &str) -> Vec<char> {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// The flat digit string behind a formatted value.
pub fn raw_value(text: &str) -> String {
    clean(text).into_iter().collect()
}

// =============================================================================
// TABLE LOOKUPS
// =============================================================================

/// Match a digit sequence against the table by dial-code prefix.
///
/// The longest matching dial code wins; ties go to the earlier record, which
/// is how shared dial codes (NANP) resolve to their default country.
pub fn match_by_digits(digits: &str, table: &[CountryRecord]) -> Option<CountryRecord> {
    if digits.is_empty() {
        return None;
    }

    let mut best: Option<CountryRecord> = None;
    for record in table {
        if !digits.starts_with(record.dial_code) {
            continue;
        }
        let longer = best.is_none_or(|b| record.dial_code.len() > b.dial_code.len());
        if longer {
            best = Some(*record);
        }
    }
    best
}

/// Find a record by ISO code (case-insensitive).
pub fn lookup_country(iso2: &str, table: &[CountryRecord]) -> Option<CountryRecord> {
    if iso2.is_empty() {
        return None;
    }
    table
        .iter()
        .find(|c| c.iso2.eq_ignore_ascii_case(iso2))
        .copied()
}

/// Default ISO code from the locale environment.
///
/// Reads the region subtag of `LC_ALL` / `LANG` (e.g. `de_DE.UTF-8` → `DE`),
/// falling back to `US` when no usable region is present.
pub fn default_iso2() -> String {
    env::var("LC_ALL")
        .or_else(|_| env::var("LANG"))
        .ok()
        .and_then(|locale| locale_region(&locale))
        .unwrap_or_else(|| "US".to_string())
}

fn locale_region(locale: &str) -> Option<String> {
    let tag = locale.split('.').next().unwrap_or(locale);
    let region = tag.split(['_', '-']).nth(1)?;
    if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(region.to_ascii_uppercase())
    } else {
        None
    }
}

// =============================================================================
// DISPLAY FORMATTING
// =============================================================================

/// Apply the matched country's mask to a digit string.
///
/// Walks the mask, consuming one digit per literal-digit and slot position
/// and copying punctuation only while digits remain, so the result never
/// carries trailing punctuation and `clean(display_format(d)) == d` for any
/// digit string the mask accepts. Digits past the end of the mask are
/// dropped. Unknown dial codes render as `+digits`.
pub fn display_format(digits: &str, table: &[CountryRecord]) -> String {
    if digits.is_empty() {
        return String::new();
    }

    let Some(country) = match_by_digits(digits, table) else {
        let mut out = String::with_capacity(digits.len() + 1);
        out.push('+');
        out.push_str(digits);
        return out;
    };

    let mut out = String::with_capacity(country.mask.len());
    let mut pending = String::new();
    let mut rest = digits.chars();

    for m in country.mask.chars() {
        if m == SLOT || m.is_ascii_digit() {
            match rest.next() {
                Some(d) => {
                    out.push_str(&pending);
                    pending.clear();
                    out.push(d);
                }
                None => break,
            }
        } else {
            pending.push(m);
        }
    }

    out
}

// =============================================================================
// PARSING & VALIDITY
// =============================================================================

/// Parse a display-formatted string against a country table.
///
/// Always succeeds: with no dial-code match the metadata carries no country
/// and all digits count as the national number.
pub fn parse_phone_number(formatted: &str, table: &[CountryRecord]) -> PhoneMetadata {
    let digits = raw_value(formatted);
    let country = match_by_digits(&digits, table);

    let national_number = match country {
        Some(c) => digits[c.dial_code.len()..].to_string(),
        None => digits,
    };

    PhoneMetadata {
        country,
        national_number,
        formatted: formatted.to_string(),
    }
}

/// Number validity over parsed metadata.
///
/// Without a matched country the number is never valid. Strict validity
/// requires the national number to fill the mask's subscriber slots exactly;
/// lenient validity accepts any length from the E.164 floor up to the slot
/// count.
pub fn check_validity(metadata: &PhoneMetadata, strict: bool) -> bool {
    let Some(country) = metadata.country else {
        return false;
    };

    let slots = country.slot_count();
    let len = metadata.national_number.chars().count();

    if strict {
        len == slots
    } else {
        len >= MIN_NATIONAL_DIGITS.min(slots) && len <= slots
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::COUNTRIES;

    #[test]
    fn test_clean_strips_punctuation() {
        let cleaned: String = clean("+1 (555) 123-4567").into_iter().collect();
        assert_eq!(cleaned, "15551234567");
    }

    #[test]
    fn test_clean_mask_yields_dial_code() {
        let cleaned: String = clean("+44 .... ......").into_iter().collect();
        assert_eq!(cleaned, "44");
    }

    #[test]
    fn test_raw_value() {
        assert_eq!(raw_value("+49 (1522) 343-3333"), "4915223433333");
        assert_eq!(raw_value(""), "");
        assert_eq!(raw_value("no digits"), "");
    }

    #[test]
    fn test_match_by_digits_prefix() {
        assert_eq!(match_by_digits("4479", COUNTRIES).map(|c| c.iso2), Some("GB"));
        assert_eq!(match_by_digits("4", COUNTRIES), None);
    }

    #[test]
    fn test_match_by_digits_longest_wins() {
        // 420 is Czech Republic, not Egypt (20) mis-anchored or a 4-prefix
        assert_eq!(match_by_digits("420777", COUNTRIES).map(|c| c.iso2), Some("CZ"));
        // 7 alone is Russia
        assert_eq!(match_by_digits("7912", COUNTRIES).map(|c| c.iso2), Some("RU"));
    }

    #[test]
    fn test_match_by_digits_nanp_defaults_to_us() {
        assert_eq!(match_by_digits("15551234567", COUNTRIES).map(|c| c.iso2), Some("US"));
    }

    #[test]
    fn test_match_by_digits_empty() {
        assert_eq!(match_by_digits("", COUNTRIES), None);
    }

    #[test]
    fn test_lookup_country() {
        assert_eq!(lookup_country("GB", COUNTRIES).map(|c| c.name), Some("United Kingdom"));
        assert_eq!(lookup_country("gb", COUNTRIES).map(|c| c.iso2), Some("GB"));
        assert_eq!(lookup_country("XX", COUNTRIES), None);
        assert_eq!(lookup_country("", COUNTRIES), None);
    }

    #[test]
    fn test_locale_region() {
        assert_eq!(locale_region("de_DE.UTF-8"), Some("DE".to_string()));
        assert_eq!(locale_region("en-GB"), Some("GB".to_string()));
        assert_eq!(locale_region("C"), None);
        assert_eq!(locale_region("POSIX"), None);
        assert_eq!(locale_region("en_US"), Some("US".to_string()));
    }

    #[test]
    fn test_display_format_full_number() {
        assert_eq!(display_format("15551234567", COUNTRIES), "+1 (555) 123-4567");
        assert_eq!(display_format("447911123456", COUNTRIES), "+44 7911 123456");
    }

    #[test]
    fn test_display_format_partial_number() {
        assert_eq!(display_format("1", COUNTRIES), "+1");
        assert_eq!(display_format("1555", COUNTRIES), "+1 (555");
        assert_eq!(display_format("44", COUNTRIES), "+44");
    }

    #[test]
    fn test_display_format_never_trails_punctuation() {
        for len in 1..="15551234567".len() {
            let formatted = display_format(&"15551234567"[..len], COUNTRIES);
            let last = formatted.chars().last().unwrap();
            assert!(last.is_ascii_digit(), "trailing {last:?} in {formatted:?}");
        }
    }

    #[test]
    fn test_display_format_drops_surplus_digits() {
        // US mask holds 10 national digits; the rest are dropped
        assert_eq!(
            display_format("155512345679999", COUNTRIES),
            "+1 (555) 123-4567"
        );
    }

    #[test]
    fn test_display_format_unknown_dial_code() {
        assert_eq!(display_format("999123", COUNTRIES), "+999123");
    }

    #[test]
    fn test_display_format_empty() {
        assert_eq!(display_format("", COUNTRIES), "");
    }

    #[test]
    fn test_round_trip_formatting() {
        for digits in ["1", "1555", "15551234567", "447911123456", "4915223433333"] {
            let formatted = display_format(digits, COUNTRIES);
            assert_eq!(raw_value(&formatted), digits, "round trip of {digits:?}");
        }
    }

    #[test]
    fn test_parse_phone_number() {
        let meta = parse_phone_number("+44 7911 123456", COUNTRIES);
        assert_eq!(meta.iso_code(), Some("GB"));
        assert_eq!(meta.dial_code(), Some("44"));
        assert_eq!(meta.national_number, "7911123456");
        assert_eq!(meta.formatted, "+44 7911 123456");
    }

    #[test]
    fn test_parse_phone_number_no_match() {
        let meta = parse_phone_number("+999 123", COUNTRIES);
        assert_eq!(meta.country, None);
        assert_eq!(meta.national_number, "999123");
    }

    #[test]
    fn test_parse_respects_active_table() {
        // With a table restricted to GB, a US number has no match
        let gb_only: Vec<_> = COUNTRIES.iter().filter(|c| c.iso2 == "GB").copied().collect();
        let meta = parse_phone_number("+1 (555) 123-4567", &gb_only);
        assert_eq!(meta.country, None);
    }

    #[test]
    fn test_check_validity_strict() {
        let complete = parse_phone_number("+44 7911 123456", COUNTRIES);
        assert!(check_validity(&complete, true));

        let short = parse_phone_number("+44 7911 12345", COUNTRIES);
        assert!(!check_validity(&short, true));
    }

    #[test]
    fn test_check_validity_lenient() {
        // 8 national digits clears the E.164 floor but not the full mask
        let partial = parse_phone_number("+44 7911 1234", COUNTRIES);
        assert!(check_validity(&partial, false));
        assert!(!check_validity(&partial, true));

        // Dial code alone is valid in no mode
        let bare = parse_phone_number("+44", COUNTRIES);
        assert!(!check_validity(&bare, false));
        assert!(!check_validity(&bare, true));
    }

    #[test]
    fn test_check_validity_no_country() {
        let meta = parse_phone_number("+999 1234567", COUNTRIES);
        assert!(!check_validity(&meta, false));
        assert!(!check_validity(&meta, true));
    }
}
