use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Formats an amount as display currency: `UGX 1,234` (grouped, fractional
/// part shown only when present, at most two places).
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.trim_end_matches('0').to_string()),
        None => (text, String::new()),
    };

    let mut grouped = String::new();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    if frac_part.is_empty() {
        format!("UGX {}{}", sign, grouped)
    } else {
        format!("UGX {}{}.{}", sign, grouped, frac_part)
    }
}

/// Human date for lists and cards: `Jan 5, 2024`.
pub fn format_date(date: DateTime<Utc>) -> String {
    let local = date.with_timezone(&Local);
    format!("{} {}, {}", month_abbrev(local.month()), local.day(), local.year())
}

/// Date column used by the CSV export: `1/5/2024` (en-US short form).
pub fn csv_date(date: DateTime<Utc>) -> String {
    let local = date.with_timezone(&Local);
    format!("{}/{}/{}", local.month(), local.day(), local.year())
}

/// Local calendar-day bucket for a timestamp. Two sales a millisecond apart
/// that straddle local midnight land in different buckets.
pub fn day_key(date: DateTime<Utc>) -> NaiveDate {
    date.with_timezone(&Local).date_naive()
}

/// `rate × quantity` rendered to two decimal places, as shown in form previews.
pub fn amount_preview(rate: Decimal, quantity: Decimal) -> String {
    let mut total = (rate * quantity).round_dp(2);
    total.rescale(2);
    total.to_string()
}

/// Compact unique id: base-36 epoch millis plus a base-36 random suffix.
/// Used for transient, non-database identifiers (captured documents).
pub fn short_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let suffix: u64 = rand::random();
    format!("{}{}", to_base36(millis), to_base36(suffix & 0xffff_ffff))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    out.reverse();
    out.into_iter().collect()
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1234567)), "UGX 1,234,567");
        assert_eq!(format_currency(dec!(150)), "UGX 150");
        assert_eq!(format_currency(dec!(0)), "UGX 0");
    }

    #[test]
    fn currency_keeps_significant_fraction() {
        assert_eq!(format_currency(dec!(1234.50)), "UGX 1,234.5");
        assert_eq!(format_currency(dec!(1000.00)), "UGX 1,000");
    }

    #[test]
    fn preview_is_rate_times_quantity_at_two_places() {
        assert_eq!(amount_preview(dec!(15000), dec!(10)), "150000.00");
        assert_eq!(amount_preview(dec!(99.99), dec!(3)), "299.97");
    }

    #[test]
    fn short_ids_are_distinct() {
        let a = short_id();
        let b = short_id();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn base36_round_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
