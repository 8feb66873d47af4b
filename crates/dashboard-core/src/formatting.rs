use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::Result;

/// Format a decimal amount with thousands separators and a fixed number of
/// decimal places. Midpoints round away from zero.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_number(Decimal::new(12345, 1), 1), "1,234.5");
/// assert_eq!(format_number(Decimal::new(1234567, 0), 0), "1,234,567");
/// assert_eq!(format_number(Decimal::ZERO, 2), "0.00");
/// assert_eq!(format_number(Decimal::new(-98765, 1), 1), "-9,876.5");
/// ```
pub fn format_number(value: Decimal, decimals: u32) -> String {
    let rounded = round_for_display(value, decimals);
    let negative = rounded.is_sign_negative();

    let fixed = format!("{:.prec$}", rounded.abs(), prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut result = group_thousands(int_part);
    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount as a USD string with two decimal places and
/// thousands separators. The sign goes after the dollar symbol.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456, 2)), "$1,234.56");
/// assert_eq!(format_currency(Decimal::ZERO), "$0.00");
/// assert_eq!(format_currency(Decimal::new(-999, 2)), "$-9.99");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", format_number(amount, 2))
}

/// Format a percentage value (already scaled to 0–100) with two decimals.
///
/// ```
/// use dashboard_core::formatting::format_percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_percentage(Decimal::new(3333, 3)), "3.33%");
/// ```
pub fn format_percentage(pct: Decimal) -> String {
    let rounded = round_for_display(pct, 2);
    format!("{:.2}%", rounded)
}

/// Format a profit margin, showing `"N/A"` when it is undefined.
pub fn format_margin(margin: &Result<Decimal>) -> String {
    match margin {
        Ok(pct) => format_percentage(*pct),
        Err(_) => "N/A".to_string(),
    }
}

/// Format a margin delta for the comparison metric, e.g. `"2.50% vs Overall"`.
pub fn format_delta(delta: &Result<Decimal>) -> String {
    match delta {
        Ok(d) => format!("{} vs Overall", format_percentage(*d)),
        Err(_) => "N/A".to_string(),
    }
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns zero if `whole` is zero or the result does not fit in a `Decimal`.
///
/// ```
/// use dashboard_core::formatting::percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(percentage(Decimal::new(50, 0), Decimal::new(200, 0), 1), Decimal::new(25, 0));
/// assert_eq!(percentage(Decimal::ZERO, Decimal::ZERO, 2), Decimal::ZERO);
/// ```
pub fn percentage(part: Decimal, whole: Decimal, decimal_places: u32) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Round for display and fold negative zero into zero so `-0.001` prints as `0.00`.
fn round_for_display(value: Decimal, decimals: u32) -> Decimal {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(Decimal::ZERO, 0), "0");
        assert_eq!(format_number(Decimal::ZERO, 2), "0.00");
    }

    #[test]
    fn test_format_number_no_thousands() {
        assert_eq!(format_number(dec("123.456"), 2), "123.46");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(dec("2297200.8603"), 2), "2,297,200.86");
    }

    #[test]
    fn test_format_number_pads_decimals() {
        assert_eq!(format_number(dec("1000"), 2), "1,000.00");
        assert_eq!(format_number(dec("1.5"), 3), "1.500");
    }

    #[test]
    fn test_format_number_midpoint_rounds_away_from_zero() {
        assert_eq!(format_number(dec("0.125"), 2), "0.13");
        assert_eq!(format_number(dec("-0.125"), 2), "-0.13");
    }

    #[test]
    fn test_format_number_negative_zero_folds() {
        assert_eq!(format_number(dec("-0.001"), 2), "0.00");
    }

    // ── format_currency ──────────────────────────────────────────────────────

    #[test]
    fn test_format_currency_positive() {
        assert_eq!(format_currency(dec("286397.0217")), "$286,397.02");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(dec("-17725.4811")), "$-17,725.48");
    }

    // ── format_percentage / margin / delta ───────────────────────────────────

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec("12.4567")), "12.46%");
        assert_eq!(format_percentage(dec("-3")), "-3.00%");
    }

    #[test]
    fn test_format_margin_na_on_division_by_zero() {
        assert_eq!(format_margin(&Err(DashboardError::DivisionByZero)), "N/A");
        assert_eq!(format_margin(&Ok(dec("10"))), "10.00%");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(&Ok(dec("2.5"))), "2.50% vs Overall");
        assert_eq!(format_delta(&Ok(dec("-1.234"))), "-1.23% vs Overall");
        assert_eq!(format_delta(&Err(DashboardError::DivisionByZero)), "N/A");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_basic() {
        assert_eq!(percentage(dec("50"), dec("200"), 1), dec("25"));
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(dec("10"), Decimal::ZERO, 2), Decimal::ZERO);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(dec("1"), dec("3"), 2), dec("33.33"));
    }

    #[test]
    fn test_percentage_out_of_range_is_zero() {
        let huge = Decimal::from_scientific("1e23").unwrap();
        assert_eq!(percentage(huge, dec("0.0001"), 2), Decimal::ZERO);
    }

    #[test]
    fn test_format_currency_at_decimal_bound() {
        let text = format_currency(Decimal::MAX);
        assert!(text.starts_with("$79,228,162,514,264,337,593,543,950,335"), "{text}");
    }

    // ── group_thousands ──────────────────────────────────────────────────────

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("5"), "5");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
