//! Display helpers for money and minutes

/// Format an amount of money with two decimals.
///
/// Only presentation rounds; stored amounts keep full precision.
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Format a whole number of minutes, e.g. `75` -> `1h 15m`
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, rest)
    } else {
        format!("{}m", rest)
    }
}
