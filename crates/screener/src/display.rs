//! Market-aware number formatting for the table and detail view.

use market_core::Market;

const CRORE: f64 = 10_000_000.0;

/// Price in the security's home currency.
pub fn format_price(value: f64, market: Market) -> String {
    match market {
        Market::In => format!("₹{}", group_indian(value)),
        Market::Global => format!("${}", compact(value)),
    }
}

/// Market cap: crores for large IN values, compact dollars otherwise.
pub fn format_market_cap(value: f64, market: Market) -> String {
    match market {
        Market::In if value >= CRORE => format!("₹{:.2} Cr", value / CRORE),
        Market::In => format!("₹{}", group_indian(value)),
        Market::Global => format!("${}", compact(value)),
    }
}

/// One decimal place, e.g. `12.3%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Compact notation with at most two fraction digits: 1234 -> "1.23K".
fn compact(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    let magnitude = value.abs();
    for (threshold, suffix) in UNITS {
        if magnitude >= threshold {
            return format!("{}{}", trim_fraction(value / threshold), suffix);
        }
    }
    trim_fraction(value)
}

fn trim_fraction(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Indian digit grouping (last three digits, then pairs) with two decimals.
fn group_indian(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    if digits.len() > 3 {
        let (head, tail) = digits.split_at(digits.len() - 3);
        for (i, c) in head.iter().enumerate() {
            if i > 0 && (head.len() - i) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }
        grouped.push(',');
        grouped.extend(tail);
    } else {
        grouped.extend(digits);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}
