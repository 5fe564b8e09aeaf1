use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub negative_style: NegativeStyle,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            negative_style: NegativeStyle::Sign,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

/// Renders `value` with `precision` decimals and grouped thousands.
///
/// Halves round away from zero, matching how amounts are shown to users.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let scale = 10f64.powi(i32::from(precision));
    let mut rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        // Drops the sign of -0.0.
        rounded = 0.0;
    }
    let mut body = format!("{:.*}", precision as usize, rounded);
    if locale.decimal_separator != '.' {
        if let Some(pos) = body.find('.') {
            body.replace_range(pos..=pos, &locale.decimal_separator.to_string());
        }
    }
    if let Some(pos) = body.find(locale.decimal_separator) {
        let mut int_part = body[..pos].to_string();
        insert_grouping(&mut int_part, locale.grouping_separator);
        body = format!("{}{}", int_part, &body[pos..]);
    } else {
        insert_grouping(&mut body, locale.grouping_separator);
    }
    body
}

fn insert_grouping(int_part: &mut String, separator: char) {
    let mut cleaned = int_part.replace(separator, "");
    if cleaned.starts_with('-') {
        let sign = cleaned.remove(0);
        let grouped = group_digits(&cleaned, separator);
        *int_part = format!("{}{}", sign, grouped);
    } else {
        *int_part = group_digits(&cleaned, separator);
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Currency amount with the locale symbol, e.g. `$1,234.56` or `-$80`.
pub fn format_currency_value(amount: f64, locale: &LocaleConfig, precision: u8) -> String {
    let body = format_number(locale, amount.abs(), precision);
    let negative = amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0');
    let symbol = &locale.currency_symbol;
    match (negative, locale.negative_style) {
        (false, _) => format!("{symbol}{body}"),
        (true, NegativeStyle::Sign) => format!("-{symbol}{body}"),
        (true, NegativeStyle::Parentheses) => format!("({symbol}{body})"),
    }
}

/// Whole-dollar rendering in en-US style: `$1,235`.
pub fn format_dollars(amount: f64) -> String {
    format_currency_value(amount, &LocaleConfig::default(), 0)
}

/// Rendering with cents in en-US style: `$1,234.56`.
pub fn format_cents(amount: f64) -> String {
    format_currency_value(amount, &LocaleConfig::default(), 2)
}

/// Percentage with one decimal, e.g. `42.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(&LocaleConfig::default(), value, 1))
}

/// Medium date such as `Apr 15, 2025`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_label(date.month()), date.day(), date.year())
}

fn month_label(month: u32) -> &'static str {
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
        _ => "",
    }
}
