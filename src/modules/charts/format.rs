//! Spanish number formatting for axis labels

/// Formats as `es-ES` currency with two decimals.
///
/// Spanish locale only inserts thousands separators from five integer digits
/// on: `2000,00 €` but `25.000,00 €`.
pub fn format_eur(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let integer = cents / 100;
    let fraction = cents % 100;

    let digits = integer.to_string();
    let grouped = if digits.len() >= 5 {
        group_thousands(&digits)
    } else {
        digits
    };

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{fraction:02} €")
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(0.0), "0,00 €");
        assert_eq!(format_eur(500.0), "500,00 €");
        assert_eq!(format_eur(1234.0), "1234,00 €");
        assert_eq!(format_eur(2000.0), "2000,00 €");
        assert_eq!(format_eur(25000.0), "25.000,00 €");
        assert_eq!(format_eur(1234567.5), "1.234.567,50 €");
        assert_eq!(format_eur(-42.1), "-42,10 €");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(85.0), "85%");
        assert_eq!(format_percent(34.4), "34%");
    }
}
