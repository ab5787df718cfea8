/// Format a float as a dollar amount with thousands separators: $1,234.56
///
/// A non-zero third decimal is kept ($50.004) since cost bounds are
/// compared at that precision.
pub fn money(val: f64) -> String {
    let fixed = format!("{:.3}", val.abs());
    let fixed = fixed.strip_suffix('0').unwrap_or(&fixed);
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed, "00"));
    let negative = val < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Render a numeric cell as text, dropping the `.0` of whole numbers
/// (ledger codes and activity names are often stored as numbers).
pub fn plain_number(val: f64) -> String {
    if val.fract() == 0.0 && val.abs() < 1e15 {
        format!("{}", val as i64)
    } else {
        val.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-500.00), "-$500.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(42.10), "$42.10");
    }

    #[test]
    fn test_money_keeps_third_decimal() {
        assert_eq!(money(50.004), "$50.004");
        assert_eq!(money(1234.5), "$1,234.50");
        assert_eq!(money(-0.125), "-$0.125");
        assert_eq!(money(-0.0001), "$0.00");
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number(4100.0), "4100");
        assert_eq!(plain_number(-3.0), "-3");
        assert_eq!(plain_number(12.5), "12.5");
    }
}
