use shared::units::to_fixed;

use super::constants::BALANCE_PLACES;

/// Insert thousands separators into the integer part of a decimal string.
pub fn group_thousands(value: &str) -> String {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}.{}", grouped, fraction),
        None => grouped,
    }
}

/// Balance for labels: four decimals, grouped, `0` when unknown.
pub fn format_balance(balance: &str) -> String {
    if balance.trim().is_empty() {
        return "0".to_string();
    }
    group_thousands(&to_fixed(balance, BALANCE_PLACES))
}

/// `0.5` -> `0.5%`
pub fn format_percentage(value: f64) -> String {
    format!("{}%", value)
}

/// `1 ETH = 2500.000000 USDC`
pub fn format_rate(from_symbol: &str, to_symbol: &str, rate: &str) -> String {
    format!("1 {} = {} {}", from_symbol, rate, to_symbol)
}
