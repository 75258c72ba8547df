//! Amount rendering for the expense table (`¥1,500`).

use chrono::NaiveDate;

pub const DEFAULT_SYMBOL: &str = "¥";
const GROUPING_SEPARATOR: char = ',';

/// Groups a whole amount into thousands: `1234567` becomes `1,234,567`.
pub fn format_number(value: u64) -> String {
    group_digits(&value.to_string(), GROUPING_SEPARATOR)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

/// Prefixes the grouped amount with the configured currency symbol.
pub fn format_amount(value: u64, symbol: &str) -> String {
    format!("{}{}", symbol, format_number(value))
}

/// Screen-reader variant: no symbol glyph, unit spelled after the number.
pub fn spoken_amount(value: u64) -> String {
    format!("{} yen", format_number(value))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
