//! Value formatting helpers shared by the fake providers.

use chrono::NaiveDate;

/// Group the digits of `n` from the right into runs of `group` digits joined by `sep`.
///
/// A `group` of zero disables grouping.
pub fn format_number(n: i64, group: usize, sep: &str) -> String {
    let minus = if n < 0 { "-" } else { "" };
    let digits = n.unsigned_abs().to_string();

    if group == 0 || digits.len() <= group {
        return format!("{}{}", minus, digits);
    }

    let head = match digits.len() % group {
        0 => group,
        rem => rem,
    };

    let mut parts = Vec::with_capacity(digits.len() / group + 1);
    parts.push(&digits[..head]);
    let mut start = head;
    while start < digits.len() {
        parts.push(&digits[start..start + group]);
        start += group;
    }

    format!("{}{}", minus, parts.join(sep))
}

/// Format the first day of `year`/`month` as an upper-cased `%b%y` label, e.g. `JAN06`.
pub fn format_month_year(year: i32, month: u32) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(date.format("%b%y").to_string().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        let cases = [
            (1000, "1,000"),
            (1_000_000, "1,000,000"),
            (0, "0"),
            (-1000, "-1,000"),
            (999, "999"),
            (999_999, "999,999"),
            (12_345, "12,345"),
        ];
        for (input, expected) in cases {
            assert_eq!(format_number(input, 3, ","), expected, "input {}", input);
        }
    }

    #[test]
    fn test_format_number_custom_separator() {
        assert_eq!(format_number(1_234_567, 3, " "), "1 234 567");
        assert_eq!(format_number(1_234_567, 2, "."), "1.23.45.67");
        assert_eq!(format_number(1_234_567, 0, ","), "1234567");
    }

    #[test]
    fn test_format_number_extremes() {
        assert_eq!(
            format_number(i64::MIN, 3, ","),
            "-9,223,372,036,854,775,808"
        );
    }

    #[test]
    fn test_format_month_year() {
        assert_eq!(format_month_year(2006, 1).as_deref(), Some("JAN06"));
        assert_eq!(format_month_year(2025, 12).as_deref(), Some("DEC25"));
        assert_eq!(format_month_year(2000, 13), None);
    }
}
