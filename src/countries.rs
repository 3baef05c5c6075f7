//! Country Table - Built-in records and filter composition.
//!
//! The table is an ordered list of `(iso2, name, dial code, mask)` records.
//! Filtering is pure: the same table and filter always produce the same
//! ordered sequence, so the host can recompute it on every render.
//!
//! # Filter composition
//!
//! 1. Restrict to `only` when non-empty
//! 2. Remove `exclude`
//! 3. Stable-partition `preferred` to the front
//! 4. Keep records whose name contains `query` (case-insensitive)

use crate::types::CountryRecord;

// =============================================================================
// BUILT-IN TABLE
// =============================================================================

macro_rules! country {
    ($iso:literal, $name:literal, $dial:literal, $mask:literal) => {
        CountryRecord {
            iso2: $iso,
            name: $name,
            dial_code: $dial,
            mask: $mask,
        }
    };
}

/// The full built-in country table, ordered by name.
///
/// NANP countries share dial code `1`; the United States is listed first
/// among them so bare `1…` digit sequences resolve to US (area-code routing
/// is not modelled).
pub const COUNTRIES: &[CountryRecord] = &[
    country!("AR", "Argentina", "54", "+54 (...) ...-...."),
    country!("AU", "Australia", "61", "+61 ... ... ..."),
    country!("AT", "Austria", "43", "+43 (...) ...-...."),
    country!("BE", "Belgium", "32", "+32 ... .. .. .."),
    country!("BR", "Brazil", "55", "+55 (..) .....-...."),
    country!("CL", "Chile", "56", "+56 . .... ...."),
    country!("CN", "China", "86", "+86 (...) ....-...."),
    country!("CO", "Colombia", "57", "+57 (...) ...-...."),
    country!("CZ", "Czech Republic", "420", "+420 ... ... ..."),
    country!("DK", "Denmark", "45", "+45 .. .. .. .."),
    country!("EG", "Egypt", "20", "+20 (...) ...-...."),
    country!("FI", "Finland", "358", "+358 .. ... .. .."),
    country!("FR", "France", "33", "+33 . .. .. .. .."),
    country!("DE", "Germany", "49", "+49 (....) ...-...."),
    country!("GR", "Greece", "30", "+30 (...) ...-...."),
    country!("HK", "Hong Kong", "852", "+852 .... ...."),
    country!("HU", "Hungary", "36", "+36 (..) ...-...."),
    country!("IN", "India", "91", "+91 (.....) .-...."),
    country!("ID", "Indonesia", "62", "+62 (...) ...-..."),
    country!("IE", "Ireland", "353", "+353 .. ... ...."),
    country!("IL", "Israel", "972", "+972 ..-...-...."),
    country!("IT", "Italy", "39", "+39 (...) ....-..."),
    country!("JP", "Japan", "81", "+81 (..) ....-...."),
    country!("KE", "Kenya", "254", "+254 ... ......"),
    country!("MX", "Mexico", "52", "+52 (...) ...-...."),
    country!("NL", "Netherlands", "31", "+31 .. ... ...."),
    country!("NZ", "New Zealand", "64", "+64 (...) ...-..."),
    country!("NG", "Nigeria", "234", "+234 (...) ...-...."),
    country!("NO", "Norway", "47", "+47 ... .. ..."),
    country!("PK", "Pakistan", "92", "+92 (...) ...-...."),
    country!("PE", "Peru", "51", "+51 (...) ...-..."),
    country!("PH", "Philippines", "63", "+63 (...) ...-...."),
    country!("PL", "Poland", "48", "+48 ...-...-..."),
    country!("PT", "Portugal", "351", "+351 .. ... ...."),
    country!("RO", "Romania", "40", "+40 .. ... ...."),
    country!("RU", "Russia", "7", "+7 (...) ...-..-.."),
    country!("SA", "Saudi Arabia", "966", "+966 ..-...-...."),
    country!("SG", "Singapore", "65", "+65 ....-...."),
    country!("ZA", "South Africa", "27", "+27 .. ... ...."),
    country!("KR", "South Korea", "82", "+82 (..) ....-...."),
    country!("ES", "Spain", "34", "+34 (...) ...-..."),
    country!("SE", "Sweden", "46", "+46 .. ... .. .."),
    country!("CH", "Switzerland", "41", "+41 .. ... .. .."),
    country!("TH", "Thailand", "66", "+66 .. ... ...."),
    country!("TR", "Turkey", "90", "+90 (...) ...-...."),
    country!("UA", "Ukraine", "380", "+380 (..) ...-..-.."),
    country!("AE", "United Arab Emirates", "971", "+971 ..-...-...."),
    country!("GB", "United Kingdom", "44", "+44 .... ......"),
    // United States before Canada: bare +1 matches resolve to US
    country!("US", "United States", "1", "+1 (...) ...-...."),
    country!("CA", "Canada", "1", "+1 (...) ...-...."),
    country!("VN", "Vietnam", "84", "+84 (...) ....-..."),
];

// =============================================================================
// FILTER
// =============================================================================

/// Filter configuration applied to a country table.
///
/// ISO codes match case-insensitively; `query` matches the country name as
/// a case-insensitive substring.
#[derive(Clone, Debug, Default)]
pub struct CountryFilter {
    /// Allow-list of ISO codes; empty means "all".
    pub only: Vec<String>,
    /// Deny-list of ISO codes.
    pub exclude: Vec<String>,
    /// ISO codes moved to the front, stable within each partition.
    pub preferred: Vec<String>,
    /// Free-text search over country names.
    pub query: String,
}

fn contains_iso(list: &[String], iso: &str) -> bool {
    list.iter().any(|code| code.eq_ignore_ascii_case(iso))
}

/// Apply a [`CountryFilter`] to a table, producing the ordered sequence the
/// selector overlay shows.
pub fn filter_countries(table: &[CountryRecord], filter: &CountryFilter) -> Vec<CountryRecord> {
    let query = filter.query.trim().to_ascii_lowercase();

    let matches: Vec<CountryRecord> = table
        .iter()
        .filter(|c| filter.only.is_empty() || contains_iso(&filter.only, c.iso2))
        .filter(|c| !contains_iso(&filter.exclude, c.iso2))
        .filter(|c| query.is_empty() || c.name.to_ascii_lowercase().contains(&query))
        .copied()
        .collect();

    if filter.preferred.is_empty() {
        return matches;
    }

    // Stable partition: preferred first, original relative order kept
    let (preferred, rest): (Vec<CountryRecord>, Vec<CountryRecord>) = matches
        .into_iter()
        .partition(|c| contains_iso(&filter.preferred, c.iso2));

    let mut ordered = preferred;
    ordered.extend(rest);
    ordered
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn isos(records: &[CountryRecord]) -> Vec<&'static str> {
        records.iter().map(|c| c.iso2).collect()
    }

    fn strings(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_no_filter_returns_full_table() {
        let result = filter_countries(COUNTRIES, &CountryFilter::default());
        assert_eq!(result.len(), COUNTRIES.len());
        assert_eq!(result[0].iso2, "AR");
    }

    #[test]
    fn test_only_restricts_in_table_order() {
        let filter = CountryFilter {
            only: strings(&["GB", "FR", "US"]),
            ..Default::default()
        };

        // Order follows the table, not the allow-list
        assert_eq!(isos(&filter_countries(COUNTRIES, &filter)), ["FR", "GB", "US"]);
    }

    #[test]
    fn test_exclude_removes_records() {
        let filter = CountryFilter {
            only: strings(&["US", "GB", "FR"]),
            exclude: strings(&["FR"]),
            ..Default::default()
        };

        assert_eq!(isos(&filter_countries(COUNTRIES, &filter)), ["GB", "US"]);
    }

    #[test]
    fn test_filter_composition() {
        let filter = CountryFilter {
            only: strings(&["US", "GB", "FR"]),
            exclude: strings(&["FR"]),
            preferred: strings(&["GB"]),
            ..Default::default()
        };

        assert_eq!(isos(&filter_countries(COUNTRIES, &filter)), ["GB", "US"]);
    }

    #[test]
    fn test_preferred_is_stable_partition() {
        let filter = CountryFilter {
            preferred: strings(&["US", "GB"]),
            ..Default::default()
        };

        let result = filter_countries(COUNTRIES, &filter);
        // Preferred keep their table-relative order (GB before US in table)
        assert_eq!(&isos(&result)[..2], ["GB", "US"]);
        // Remaining records keep table order
        assert_eq!(result[2].iso2, "AR");
        assert_eq!(result.len(), COUNTRIES.len());
    }

    #[test]
    fn test_query_narrows_and_restores() {
        let filter = CountryFilter {
            query: "Ger".to_string(),
            ..Default::default()
        };

        let narrowed = filter_countries(COUNTRIES, &filter);
        assert!(narrowed.iter().any(|c| c.name == "Germany"));
        assert!(narrowed.iter().all(|c| c.name.to_ascii_lowercase().contains("ger")));

        // Clearing the query restores the unfiltered table
        let cleared = filter_countries(COUNTRIES, &CountryFilter::default());
        assert_eq!(cleared.len(), COUNTRIES.len());
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let filter = CountryFilter {
            query: "uNiTeD".to_string(),
            ..Default::default()
        };

        let result = filter_countries(COUNTRIES, &filter);
        assert_eq!(isos(&result), ["AE", "GB", "US"]);
    }

    #[test]
    fn test_iso_codes_match_case_insensitively() {
        let filter = CountryFilter {
            only: strings(&["gb", "us"]),
            ..Default::default()
        };

        assert_eq!(isos(&filter_countries(COUNTRIES, &filter)), ["GB", "US"]);
    }

    #[test]
    fn test_everything_excluded_yields_empty() {
        let filter = CountryFilter {
            only: strings(&["FR"]),
            exclude: strings(&["FR"]),
            ..Default::default()
        };

        assert!(filter_countries(COUNTRIES, &filter).is_empty());
    }

    #[test]
    fn test_us_precedes_canada_for_nanp() {
        let dial_one: Vec<&str> = COUNTRIES
            .iter()
            .filter(|c| c.dial_code == "1")
            .map(|c| c.iso2)
            .collect();
        assert_eq!(dial_one, ["US", "CA"]);
    }
}
