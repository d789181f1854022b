//! Форматирование чисел для таблиц костинга: разделитель тысяч "," и точка

/// Число с разделителем тысяч и заданным количеством знаков
/// Example: (1234.567, 2) -> "1,234.57"
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // "-0.00" не показываем
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Деньги: 2 знака
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Per-garment costs are small, they are shown with 4 decimals
pub fn format_cost(value: f64) -> String {
    format_number_with_decimals(value, 4)
}

/// Количества (unidades, kg por prenda)
pub fn format_quantity(value: f64) -> String {
    format_number_with_decimals(value, 3)
}

pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1,234.56");
        assert_eq!(format_money(1234567.89), "1,234,567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.56), "-1,234.56");
        assert_eq!(format_money(-0.001), "0.00");
    }

    #[test]
    fn test_format_cost_and_quantity() {
        assert_eq!(format_cost(0.12345), "0.1235");
        assert_eq!(format_quantity(1234.5), "1,234.500");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567.0), "1,234,567");
        assert_eq!(format_number_int(999.0), "999");
        assert_eq!(format_number_int(f64::NAN), "-");
    }
}
