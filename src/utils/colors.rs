/// ANSI color helper utilities for terminal output.
use crate::models::claim_status::ClaimStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Status color:
/// pending → yellow
/// approved → green
/// rejected → red
/// paid → cyan
pub fn color_for_status(status: ClaimStatus) -> &'static str {
    match status {
        ClaimStatus::Pending => YELLOW,
        ClaimStatus::Approved => GREEN,
        ClaimStatus::Rejected => RED,
        ClaimStatus::Paid => CYAN,
    }
}

pub fn colorize_status(status: ClaimStatus) -> String {
    format!("{}{}{}", color_for_status(status), status, RESET)
}

/// Grey placeholder for empty optional values, plain text otherwise.
///
/// Example:
/// `colorize_optional("")` → "<grey>--<reset>"
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
