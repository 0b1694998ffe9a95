//! $ATOM amount parsing and formatting.
//!
//! On-chain amounts are `u64` smallest units with `ATOM_DECIMALS` decimals.
//! Parsing works on the decimal string directly so no precision is lost to
//! floating point; digits past the sixth decimal are truncated.

use crate::errors::{AtomIdError, AtomIdResult};

/// Decimals of the $ATOM mint.
pub const ATOM_DECIMALS: u32 = 6;

/// Smallest units per whole token.
pub const ATOM_UNIT: u64 = 10u64.pow(ATOM_DECIMALS);

/// Decimals shown for SOL reward amounts.
pub const SOL_DECIMALS: usize = 9;

/// Parse a user-entered token amount (e.g. `"1000.50"`) into smallest units.
pub fn parse_atom(input: &str) -> AtomIdResult<u64> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AtomIdError::invalid_argument("amount is empty"));
    }

    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(AtomIdError::invalid_argument(format!("not a number: {s}")));
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return Err(AtomIdError::invalid_argument(format!("not a number: {s}")));
    }

    let whole_units: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| AtomIdError::invalid_argument(format!("amount too large: {s}")))?
    };

    let mut frac_digits: String = frac.chars().take(ATOM_DECIMALS as usize).collect();
    while frac_digits.len() < ATOM_DECIMALS as usize {
        frac_digits.push('0');
    }
    // Six ASCII digits always fit.
    let frac_units: u64 = frac_digits.parse().unwrap_or(0);

    whole_units
        .checked_mul(ATOM_UNIT)
        .and_then(|v| v.checked_add(frac_units))
        .ok_or_else(|| AtomIdError::invalid_argument(format!("amount too large: {s}")))
}

/// Whole tokens, fraction truncated, grouped by thousands: `1_000_000_000` -> `"1,000"`.
pub fn format_atom(amount: u64) -> String {
    group_thousands((amount / ATOM_UNIT).into())
}

/// `format_atom` for aggregates wider than `u64`, e.g. protocol-wide burn totals.
pub fn format_atom_total(amount: u128) -> String {
    group_thousands(amount / u128::from(ATOM_UNIT))
}

/// Whole tokens plus any non-zero fraction: `1_500_000` -> `"1.5"`.
pub fn format_atom_precise(amount: u64) -> String {
    let whole = group_thousands((amount / ATOM_UNIT).into());
    let frac = amount % ATOM_UNIT;
    if frac == 0 {
        return whole;
    }
    let frac = format!("{frac:0width$}", width = ATOM_DECIMALS as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// SOL amount with fixed nine decimals. Non-finite values render as zero.
pub fn format_sol(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    format!("{:.*}", SOL_DECIMALS, amount)
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_decimal_strings() {
        assert_eq!(parse_atom("1000.00").unwrap(), 1_000 * ATOM_UNIT);
        assert_eq!(parse_atom("  42 ").unwrap(), 42 * ATOM_UNIT);
        assert_eq!(parse_atom("0.5").unwrap(), 500_000);
        assert_eq!(parse_atom(".25").unwrap(), 250_000);
        assert_eq!(parse_atom("7.").unwrap(), 7 * ATOM_UNIT);
    }

    #[test]
    fn truncates_extra_decimals() {
        assert_eq!(parse_atom("1.1234569").unwrap(), 1_123_456);
    }

    #[test]
    fn rejects_non_numeric() {
        for bad in ["", "   ", "abc", "12abc", "-5", "+5", "1e6", "1.2.3", ".", "1,000"] {
            assert!(parse_atom(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_atom("18446744073710").is_err());
        assert!(parse_atom("99999999999999999999999").is_err());
    }

    #[test]
    fn formats_grouped_whole_tokens() {
        assert_eq!(format_atom(0), "0");
        assert_eq!(format_atom(999_999), "0");
        assert_eq!(format_atom(1_000 * ATOM_UNIT), "1,000");
        assert_eq!(format_atom(1_234_567 * ATOM_UNIT + 900_000), "1,234,567");
        assert_eq!(format_atom(u64::MAX), "18,446,744,073,709");
    }

    #[test]
    fn formats_wide_totals() {
        let total = u128::from(u64::MAX) * 3;
        assert_eq!(format_atom_total(total), "55,340,232,221,128");
        assert_eq!(format_atom_total(0), "0");
    }

    #[test]
    fn formats_precise() {
        assert_eq!(format_atom_precise(1_500_000), "1.5");
        assert_eq!(format_atom_precise(12_000 * ATOM_UNIT + 1), "12,000.000001");
        assert_eq!(format_atom_precise(3 * ATOM_UNIT), "3");
    }

    #[test]
    fn formats_sol() {
        assert_eq!(format_sol(0.0), "0.000000000");
        assert_eq!(format_sol(1.25), "1.250000000");
        assert_eq!(format_sol(f64::NAN), "0.000000000");
    }

    proptest! {
        #[test]
        fn format_inverts_parse_up_to_truncation(whole in 0u64..1_000_000_000_000, frac in 0u32..1_000_000) {
            let input = format!("{whole}.{frac:06}");
            let parsed = parse_atom(&input).unwrap();
            prop_assert_eq!(parsed, whole * ATOM_UNIT + frac as u64);
            prop_assert_eq!(format_atom(parsed), group_thousands(whole.into()));
        }

        #[test]
        fn grouping_round_trips_digits(n in any::<u64>()) {
            let grouped = group_thousands(n.into());
            prop_assert_eq!(grouped.replace(',', ""), n.to_string());
        }
    }
}
