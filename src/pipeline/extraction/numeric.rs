use std::sync::LazyLock;

use regex::Regex;

/// Regex fragment for an unsigned number with `.` or `,` separators
/// ("95", "4.2", "4,2", "1.234,5").
pub const NUMBER: &str = r"\d+(?:[.,]\d+)*";

/// Regex fragment for the separator between reference bounds.
pub const RANGE_SEPARATOR: &str = r"(?:[-\x{2013}\x{2014}]|to)";

/// Integer grouped by single commas in threes: "1,500", "250,000".
static COMMA_GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d{0,2}(?:,\d{3})+$").unwrap());

/// Normalize the value and both bounds of one row together.
///
/// A single comma is ambiguous ("1,500" vs "1,5"). When every comma-bearing
/// number of the row has the thousands shape (`250,000`, `150,000`), commas
/// are grouping for the whole row. Otherwise each token follows
/// `normalize_decimal`, so one `11,2` keeps `12,000` a decimal as well.
pub fn normalize_row_numbers(tokens: [&str; 3]) -> [String; 3] {
    // Tokens carrying both separators are unambiguous and take no part
    let lone_comma: Vec<&str> = tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| t.contains(',') && !t.contains('.'))
        .collect();
    let grouped = !lone_comma.is_empty() && lone_comma.iter().all(|t| COMMA_GROUPED.is_match(t));

    tokens.map(|token| {
        let token = token.trim();
        if grouped && COMMA_GROUPED.is_match(token) {
            token.replace(',', "")
        } else {
            normalize_decimal(token)
        }
    })
}

/// Rewrite a numeric token so that `str::parse::<f64>` accepts it.
///
/// A lone `,` is a decimal separator. When both `.` and `,` appear, the
/// right-most one is the decimal separator and the other groups thousands.
/// Tokens with other characters are returned trimmed and unchanged, to be
/// rejected by the record builder.
pub fn normalize_decimal(token: &str) -> String {
    let token = token.trim();
    if !token
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return token.to_string();
    }

    let last_dot = token.rfind('.');
    let last_comma = token.rfind(',');

    let (decimal, grouping) = match (last_dot, last_comma) {
        (Some(d), Some(c)) if c > d => (',', '.'),
        (Some(_), Some(_)) => ('.', ','),
        (None, Some(_)) => {
            if token.matches(',').count() > 1 {
                // "1,234,567": several commas can only be grouping
                return token.replace(',', "");
            }
            (',', '.')
        }
        _ => return token.to_string(),
    };

    token
        .chars()
        .filter(|c| *c != grouping)
        .map(|c| if c == decimal { '.' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(token: &str) -> f64 {
        normalize_decimal(token).parse().unwrap()
    }

    #[test]
    fn integers_pass_through() {
        assert_eq!(normalize_decimal("95"), "95");
        assert_eq!(normalize_decimal(" 140 "), "140");
    }

    #[test]
    fn dot_decimal_kept() {
        assert_eq!(normalize_decimal("4.2"), "4.2");
    }

    #[test]
    fn comma_decimal_converted() {
        assert_eq!(normalize_decimal("4,2"), "4.2");
        assert!((parsed("0,85") - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn european_grouping() {
        assert_eq!(normalize_decimal("1.234,5"), "1234.5");
    }

    #[test]
    fn english_grouping() {
        assert_eq!(normalize_decimal("1,234.5"), "1234.5");
    }

    #[test]
    fn repeated_commas_are_grouping() {
        assert_eq!(normalize_decimal("250,000,000"), "250000000");
    }

    #[test]
    fn thousands_grouping_agreed_across_row() {
        assert_eq!(
            normalize_row_numbers(["250,000", "150,000", "450,000"]),
            ["250000", "150000", "450000"]
        );
        assert_eq!(normalize_row_numbers(["1,500", "70", "100"]), ["1500", "70", "100"]);
    }

    #[test]
    fn decimal_comma_elsewhere_keeps_comma_decimal() {
        assert_eq!(
            normalize_row_numbers(["11,2", "12,000", "16,000"]),
            ["11.2", "12.000", "16.000"]
        );
    }

    #[test]
    fn english_grouping_with_decimal_does_not_block_row() {
        assert_eq!(
            normalize_row_numbers(["1,234.5", "1,000", "2,000"]),
            ["1234.5", "1000", "2000"]
        );
    }

    #[test]
    fn leading_zero_comma_is_decimal() {
        assert_eq!(
            normalize_row_numbers(["0,850", "0,700", "1,200"]),
            ["0.850", "0.700", "1.200"]
        );
    }

    #[test]
    fn rows_without_commas_unchanged() {
        assert_eq!(normalize_row_numbers(["4.2", "3.5", "5.0"]), ["4.2", "3.5", "5.0"]);
    }

    #[test]
    fn non_numeric_token_untouched() {
        assert_eq!(normalize_decimal("abc"), "abc");
        assert!(normalize_decimal("4.2x").parse::<f64>().is_err());
    }

    #[test]
    fn number_fragment_matches_variants() {
        let re = regex::Regex::new(&format!("^{NUMBER}$")).unwrap();
        for ok in ["95", "4.2", "4,2", "1.234,5"] {
            assert!(re.is_match(ok), "{ok} should match");
        }
        for bad in ["", ".5", "4.", "-3", "abc"] {
            assert!(!re.is_match(bad), "{bad} should not match");
        }
    }
}
