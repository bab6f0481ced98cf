//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `500, "USD"` → `"5.00 USD"`
pub fn format_amount(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, currency)
}

/// Cut to `max` chars, ending with "..." when something was removed.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Short form of a claim id for tables (first uuid group).
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
