//! Display Formatting
//!
//! Pure string helpers for the table and stat tiles (pt-BR conventions).

use chrono::{DateTime, Datelike, TimeZone};
use std::fmt::Display;

const MONTHS_PT_BR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a Brazilian phone number.
///
/// Non-digits are stripped first. 13 digits render as
/// `+55 (11) 98765-4321`, 11 digits as `(11) 98765-4321`; anything else is
/// returned unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        13 => format!(
            "+{} ({}) {}-{}",
            &digits[..2],
            &digits[2..4],
            &digits[4..9],
            &digits[9..]
        ),
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        _ => raw.to_string(),
    }
}

/// Group thousands with dots: `1234567` -> `1.234.567`
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `09 jan`
pub fn format_day_month<Tz: TimeZone>(ts: &DateTime<Tz>) -> String {
    format!("{:02} {}", ts.day(), MONTHS_PT_BR[ts.month0() as usize])
}

/// `14:05`
pub fn format_clock<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    ts.format("%H:%M").to_string()
}

/// Avatar letter for a name; `?` when the name is blank
pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// `1 encontrado` / `3 encontrados`
pub fn found_label(count: usize) -> String {
    let noun = if count == 1 { "encontrado" } else { "encontrados" };
    format!("{} {}", format_count(count), noun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("5511987654321"), "+55 (11) 98765-4321");
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("+55 (11) 98765-4321"), "+55 (11) 98765-4321");
        assert_eq!(format_phone("011 98765 4321"), "011 98765 4321");
        assert_eq!(format_phone("123"), "123");
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("ligar à tarde"), "ligar à tarde");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.000");
        assert_eq!(format_count(1234567), "1.234.567");
    }

    #[test]
    fn test_dates() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_day_month(&ts), "09 mar");
        assert_eq!(format_clock(&ts), "14:05");

        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let local = Utc.with_ymd_and_hms(2025, 1, 1, 1, 0, 0).unwrap().with_timezone(&brt);
        assert_eq!(format_day_month(&local), "31 dez");
        assert_eq!(format_clock(&local), "22:00");
    }

    #[test]
    fn test_labels() {
        assert_eq!(initial("  maria"), "M");
        assert_eq!(initial(""), "?");
        assert_eq!(initial("érica"), "É");
        assert_eq!(found_label(1), "1 encontrado");
        assert_eq!(found_label(0), "0 encontrados");
        assert_eq!(found_label(1500), "1.500 encontrados");
    }
}
