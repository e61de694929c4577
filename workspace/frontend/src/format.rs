//! Display helpers: Thai labels, Buddhist-era years and money.

use chrono::{Datelike, NaiveDate, Weekday};
use common::pending::{STATUS_OVERDUE, STATUS_PAID, STATUS_PENDING};
use common::{DisplayedPrice, ALL};
use rust_decimal::Decimal;

/// Buddhist era = Gregorian + 543.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

pub const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

const THAI_WEEKDAYS: [&str; 7] = ["จันทร์", "อังคาร", "พุธ", "พฤหัสบดี", "ศุกร์", "เสาร์", "อาทิตย์"];

pub fn to_buddhist_year(gregorian: i32) -> i32 {
    gregorian + BUDDHIST_ERA_OFFSET
}

/// Converts a year selector value to the `year` query parameter.
/// `all` passes through; anything unparsable is `None`.
pub fn year_param(buddhist: &str) -> Option<String> {
    let buddhist = buddhist.trim();
    if buddhist.eq_ignore_ascii_case(ALL) {
        return Some(ALL.to_string());
    }
    buddhist
        .parse::<i32>()
        .ok()
        .map(|year| (year - BUDDHIST_ERA_OFFSET).to_string())
}

/// Selector years, newest first, in Buddhist era.
pub fn year_options(current_gregorian: i32, count: i32) -> Vec<i32> {
    (0..count).map(|back| to_buddhist_year(current_gregorian - back)).collect()
}

/// `"01"`..`"12"` paired with the Thai month name.
pub fn month_options() -> Vec<(String, &'static str)> {
    THAI_MONTHS
        .iter()
        .enumerate()
        .map(|(index, name)| (format!("{:02}", index + 1), *name))
        .collect()
}

/// e.g. `วันเสาร์ที่ 15 มีนาคม 2568`
pub fn thai_date(date: NaiveDate) -> String {
    let weekday = THAI_WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = THAI_MONTHS[date.month0() as usize];
    format!("วัน{}ที่ {} {} {}", weekday, date.day(), month, to_buddhist_year(date.year()))
}

/// Two decimals with thousands separators.
pub fn amount(value: Decimal) -> String {
    let rounded = format!("{:.2}", value.round_dp(2));
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", sign, grouped, fraction)
}

pub fn baht(value: Decimal) -> String {
    format!("{} บาท", amount(value))
}

pub fn hours(value: Decimal) -> String {
    format!("{:.2} ชม.", value.round_dp(2))
}

pub fn price(price: &DisplayedPrice) -> String {
    match price {
        DisplayedPrice::None => "-".to_string(),
        DisplayedPrice::Single(value) => baht(*value),
        DisplayedPrice::Multiple => "หลายราคา".to_string(),
    }
}

/// Thai label and badge class for a payment status.
pub fn status_label(status: &str) -> (&'static str, &'static str) {
    match status.to_ascii_lowercase().as_str() {
        STATUS_PAID => ("ชำระแล้ว", "badge-success"),
        STATUS_PENDING => ("รอชำระ", "badge-warning"),
        STATUS_OVERDUE => ("เลยกำหนด", "badge-error"),
        _ => ("-", "badge-ghost"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_param_converts_buddhist_era() {
        assert_eq!(year_param("2568").as_deref(), Some("2025"));
        assert_eq!(year_param("all").as_deref(), Some("all"));
        assert_eq!(year_param(""), None);
        assert_eq!(year_options(2025, 3), vec![2568, 2567, 2566]);
    }

    #[test]
    fn test_month_options() {
        let months = month_options();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], ("01".to_string(), "มกราคม"));
        assert_eq!(months[11].0, "12");
    }

    #[test]
    fn test_amount_grouping() {
        assert_eq!(amount(Decimal::from(1100)), "1,100.00");
        assert_eq!(amount(Decimal::new(75, 1)), "7.50");
        assert_eq!(amount(Decimal::from(-1234567)), "-1,234,567.00");
        assert_eq!(price(&DisplayedPrice::Multiple), "หลายราคา");
    }

    #[test]
    fn test_thai_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(thai_date(date), "วันเสาร์ที่ 15 มีนาคม 2568");
        assert_eq!(status_label("OVERDUE").0, "เลยกำหนด");
    }
}
