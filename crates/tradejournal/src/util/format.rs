//! Display formatting for money, percentages and dates

use jiff::civil::Date;

fn group_thousands(whole: i64) -> String {
    let digits = whole.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// `-1234.5` -> `-$1,234.50`
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as i64;
    let dollars = group_thousands(cents_total / 100);
    let cents = cents_total % 100;

    if value < 0.0 && cents_total > 0 {
        format!("-${}.{:02}", dollars, cents)
    } else {
        format!("${}.{:02}", dollars, cents)
    }
}

/// Whole dollars, for tight columns and chart labels
pub fn format_currency_short(value: f64) -> String {
    let dollars = value.abs().round() as i64;
    if value < 0.0 && dollars > 0 {
        format!("-${}", group_thousands(dollars))
    } else {
        format!("${}", group_thousands(dollars))
    }
}

/// Currency with an explicit sign, used for P/L figures
pub fn format_signed_currency(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_currency(value))
    } else {
        format_currency(value)
    }
}

/// Compact form for axis labels ($2.1M, $45K, $50)
pub fn format_compact_currency(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs_value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{}${:.1}K", sign, abs_value / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs_value)
    }
}

/// Takes a value already on a 0-100 scale
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `2024-03-05` -> `Mar 05`
pub fn format_short_date(date: Date) -> String {
    date.strftime("%b %d").to_string()
}
