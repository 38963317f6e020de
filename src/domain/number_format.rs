// Human-friendly scaling of metric values

const UNITS: [&str; 3] = ["", "thousand", "million"];

/// Scale `value` by thousands until it drops below 1000 or reaches millions,
/// then render it with two decimals, the unit suffix and an optional prefix.
///
/// ```text
/// format_number(950.0, "")          -> "950.00"
/// format_number(1_500.0, "R$")      -> "R$ 1.50 thousand"
/// format_number(2_500_000_000.0, "")-> "2500.00 million"
/// ```
pub fn format_number(value: f64, prefix: &str) -> String {
    let mut scaled = value;
    let mut idx = 0;
    while scaled >= 1000.0 && idx < UNITS.len() - 1 {
        scaled /= 1000.0;
        idx += 1;
    }

    [prefix, &format!("{:.2}", scaled), UNITS[idx]]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_thousand_has_no_suffix() {
        assert_eq!(format_number(0.0, ""), "0.00");
        assert_eq!(format_number(999.994, ""), "999.99");
        assert_eq!(format_number(42.5, "R$"), "R$ 42.50");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_number(1000.0, ""), "1.00 thousand");
        assert_eq!(format_number(1500.0, "R$"), "R$ 1.50 thousand");
        assert_eq!(format_number(999_999.0, ""), "1000.00 thousand");
    }

    #[test]
    fn test_millions_is_the_largest_unit() {
        assert_eq!(format_number(1_000_000.0, ""), "1.00 million");
        assert_eq!(format_number(12_345_678.9, "R$"), "R$ 12.35 million");
        assert_eq!(format_number(2_500_000_000.0, ""), "2500.00 million");
    }

    #[test]
    fn test_always_two_decimals() {
        for value in [3.0, 3_000.0, 3_000_000.0, 7.125, 45_678.0] {
            let formatted = format_number(value, "");
            let number = formatted.split(' ').next().unwrap();
            let decimals = number.split('.').nth(1).unwrap();
            assert_eq!(decimals.len(), 2, "{}", formatted);
        }
    }
}
