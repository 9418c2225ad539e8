//! Stat formatting helpers

/// Fixed decimals, e.g. `fixed(0.1234, 3) == "0.123"`
pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// One decimal with a percent sign, value already in percent units
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Ratio in `0..=1` shown as a one-decimal percentage
pub fn ratio_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Height in inches as feet and inches, e.g. `6'3"`
pub fn height(inches: u32) -> String {
    format!("{}'{}\"", inches / 12, inches % 12)
}

/// Round to `decimals` places for summary cards
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Truncate to at most `max` characters, respecting char boundaries
pub fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_heights() {
        assert_eq!(height(75), "6'3\"");
        assert_eq!(height(72), "6'0\"");
    }

    #[test]
    fn formats_decimals() {
        assert_eq!(fixed(1.23456, 3), "1.235");
        assert_eq!(percent(23.44), "23.4%");
        assert_eq!(ratio_percent(0.876), "87.6%");
        assert_eq!(round_to(-0.04567, 3), -0.046);
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate("Jürgen", 2), "Jü");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
