//! Display helpers for listing output.

/// Whole dollars with thousands separators, e.g. `$24,000`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = group_thousands(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Integer with thousands separators, e.g. `1,500`
pub fn format_number(number: u64) -> String {
    group_thousands(&number.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
