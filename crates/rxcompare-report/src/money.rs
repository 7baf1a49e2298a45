//! Money formatting.

/// Render an amount for display.
///
/// Whole amounts print without decimals (`220`), everything else with two
/// (`18.33`). Absent and non-finite amounts print as an empty string.
pub fn format_money(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if (v - v.trunc()).abs() < 1e-9 {
                format!("{}", v.trunc() as i64)
            } else {
                format!("{:.2}", v)
            }
        }
        _ => String::new(),
    }
}

/// [`format_money`] with a leading `$`, or empty when there is no amount.
pub fn dollars(value: Option<f64>) -> String {
    let amount = format_money(value);
    if amount.is_empty() {
        amount
    } else if let Some(magnitude) = amount.strip_prefix('-') {
        format!("-${magnitude}")
    } else {
        format!("${amount}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_drop_decimals() {
        assert_eq!(format_money(Some(220.0)), "220");
        assert_eq!(format_money(Some(0.0)), "0");
        assert_eq!(format_money(Some(-5096.0)), "-5096");
    }

    #[test]
    fn fractional_amounts_show_two_decimals() {
        assert_eq!(format_money(Some(220.0 / 12.0)), "18.33");
        assert_eq!(format_money(Some(4.5)), "4.50");
    }

    #[test]
    fn missing_and_nan_render_empty() {
        assert_eq!(format_money(None), "");
        assert_eq!(format_money(Some(f64::NAN)), "");
        assert_eq!(dollars(None), "");
    }

    #[test]
    fn dollars_places_sign_before_symbol() {
        assert_eq!(dollars(Some(721.0)), "$721");
        assert_eq!(dollars(Some(-12.5)), "-$12.50");
    }
}
