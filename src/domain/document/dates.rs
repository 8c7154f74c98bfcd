//! Date and place wording used in resolution text.

use chrono::{Datelike, NaiveDate};

/// Shown when the adoption place cannot be derived from the address.
pub const BLANK_PLACE: &str = "_____________________";

/// `March 5, 2025`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `March 2025`.
pub fn month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `14th`.
pub fn ordinal_day(date: NaiveDate) -> String {
    format!("{}{}", date.day(), ordinal_suffix(date.day()))
}

/// Place of adoption: the last two comma-separated segments of the address.
///
/// Assumes Philippine addresses ending in "City/Municipality, Province".
/// Addresses with fewer segments come back whole.
pub fn adoption_place(address: Option<&str>) -> String {
    let address = match address.map(str::trim).filter(|a| !a.is_empty()) {
        Some(address) => address,
        None => return BLANK_PLACE.to_string(),
    };
    let segments: Vec<&str> = address.split(',').collect();
    let tail = &segments[segments.len().saturating_sub(2)..];
    tail.join(",").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn long_date_has_no_zero_padding() {
        assert_eq!(long_date(date(2025, 3, 5)), "March 5, 2025");
    }

    #[test]
    fn month_year_format() {
        assert_eq!(month_year(date(2025, 3, 14)), "March 2025");
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (30, "th"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {}", day);
        }
        assert_eq!(ordinal_day(date(2025, 3, 14)), "14th");
    }

    #[test]
    fn adoption_place_uses_last_two_segments() {
        assert_eq!(
            adoption_place(Some("J. Gonzales St., Poblacion, Tanauan City, Batangas")),
            "Tanauan City, Batangas"
        );
    }

    #[test]
    fn adoption_place_short_address_is_kept_whole() {
        assert_eq!(adoption_place(Some("Tanauan City")), "Tanauan City");
    }

    #[test]
    fn adoption_place_missing_address_is_blank_line() {
        assert_eq!(adoption_place(None), BLANK_PLACE);
        assert_eq!(adoption_place(Some("  ")), BLANK_PLACE);
    }
}
