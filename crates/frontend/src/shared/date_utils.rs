/// Utilities for date formatting
///
/// Fechas del backend llegan como ISO ("2024-03-15" o "2024-03-15T14:02:26Z").
use chrono::NaiveDate;

const MONTHS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Set", "Oct", "Nov", "Dic",
];

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Short label of a "YYYY-MM" month key
/// Example: "2024-09" -> "Set 2024"
pub fn format_month(month_key: &str) -> String {
    let Some((year, month)) = month_key.split_once('-') else {
        return month_key.to_string();
    };
    match month.parse::<usize>() {
        Ok(m) if (1..=12).contains(&m) => format!("{} {}", MONTHS[m - 1], year),
        _ => month_key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("2024-09"), "Set 2024");
        assert_eq!(format_month("2023-01"), "Ene 2023");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_month("2024-13"), "2024-13");
        assert_eq!(format_month("sin fecha"), "sin fecha");
    }
}
