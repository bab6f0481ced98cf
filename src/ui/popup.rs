//! Terminal rendering of the approval popup.

use crate::core::reconciler::NoticeSink;
use crate::errors::AppResult;
use crate::models::notice::ApprovalNotice;
use crate::utils::date;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

const INNER_WIDTH: usize = 52;

/// Boxed popup text for a notice, one string per line.
pub fn render(notice: &ApprovalNotice) -> Vec<String> {
    let body = format!(
        "Your cash offer of {} has been approved! The payment will be sent to {}.",
        notice.amount_display(),
        notice.paypal_email
    );

    let mut inner = vec!["🎉 Claim approved".to_string(), String::new()];
    inner.extend(
        textwrap::wrap(&body, INNER_WIDTH)
            .into_iter()
            .map(|l| l.into_owned()),
    );
    inner.push(String::new());
    inner.push(format!("Processed: {}", date::display(&notice.processed_at)));
    inner.push(format!("Claim id:  {}", notice.claim_id));

    let mut out = Vec::with_capacity(inner.len() + 2);
    out.push(format!("┌{}┐", "─".repeat(INNER_WIDTH + 2)));
    for line in inner {
        let pad = INNER_WIDTH.saturating_sub(line.width());
        out.push(format!("│ {}{} │", line, " ".repeat(pad)));
    }
    out.push(format!("└{}┘", "─".repeat(INNER_WIDTH + 2)));
    out
}

/// Writes the popup to stdout.
#[derive(Debug, Default)]
pub struct TerminalPopup;

impl NoticeSink for TerminalPopup {
    fn show(&mut self, notice: &ApprovalNotice) -> AppResult<()> {
        let mut out = io::stdout().lock();
        writeln!(out)?;
        for line in render(notice) {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
