use chrono::NaiveDate;

/// Render an amount as Indian-locale rupees: `₹`-prefixed, rounded to whole
/// rupees, digits grouped Indian style (last three, then pairs).
///
/// Negative amounts put the sign before the symbol: `-₹410`.
#[must_use]
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let grouped = group_indian(rounded.unsigned_abs());
    if rounded < 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Render a date the way the stall reads it: short weekday, day number,
/// short month — `Mon, 5 Aug`.
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%a, %-d %b").to_string()
}

/// Indian digit grouping: 12,34,56,789.
fn group_indian(mut n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }

    let tail = n % 1000;
    n /= 1000;

    let mut pairs = Vec::new();
    while n > 0 {
        pairs.push(n % 100);
        n /= 100;
    }

    let mut out = String::new();
    for (i, pair) in pairs.iter().rev().enumerate() {
        if i == 0 {
            out.push_str(&pair.to_string());
        } else {
            out.push_str(&format!("{pair:02}"));
        }
        out.push(',');
    }
    out.push_str(&format!("{tail:03}"));
    out
}
