/// Renders a result the way the calculator display has always shown it.
///
/// Magnitudes in `[1e-3, 1e7)` use plain decimal notation and always keep a
/// fractional digit (`14.0`). Anything else uses `d.dddE±n` (`1.0E7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let text = value.to_string();
        return if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        };
    }

    let text = format!("{value:e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values_keep_fraction() {
        assert_eq!(format_number(14.0), "14.0");
        assert_eq!(format_number(1.0), "1.0");
        assert_eq!(format_number(-7.0), "-7.0");
        assert_eq!(format_number(9_999_999.0), "9999999.0");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(0.001), "0.001");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(-0.0), "-0.0");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format_number(1e7), "1.0E7");
        assert_eq!(format_number(12_345_678.9), "1.23456789E7");
        assert_eq!(format_number(0.00015), "1.5E-4");
        assert_eq!(format_number(-2e-9), "-2.0E-9");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }
}
