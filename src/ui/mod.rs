pub mod cloud;
pub mod panels;
pub mod pie;
pub mod plot;

/// Format an amount as rupiah with thousands separators, e.g. `Rp 1,500,000`.
pub fn format_idr(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}Rp {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_idr() {
        assert_eq!(format_idr(0.0), "Rp 0");
        assert_eq!(format_idr(999.0), "Rp 999");
        assert_eq!(format_idr(1_500_000.0), "Rp 1,500,000");
        assert_eq!(format_idr(25_000_000.4), "Rp 25,000,000");
        assert_eq!(format_idr(-1234.0), "-Rp 1,234");
    }
}
