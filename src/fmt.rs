use crate::models::Kind;

/// Whole units with thousands separators and a currency label: 1,234 so'm
pub fn money(val: f64, currency: &str) -> String {
    let rounded = val.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    if currency.is_empty() {
        format!("{sign}{with_commas}")
    } else {
        format!("{sign}{with_commas} {currency}")
    }
}

/// The amount's effect on the balance, with `+` unless it lowers it.
pub fn signed_money(amount: f64, kind: Kind, currency: &str) -> String {
    let effect = match kind {
        Kind::Income => amount,
        Kind::Expense => -amount,
    };
    let text = money(effect, currency);
    if text.starts_with('-') {
        text
    } else {
        format!("+{text}")
    }
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
