//! Text rendering for currency and compliance reports.
//!
//! The core only computes dates and statuses; turning a date into an alert
//! severity by comparing it to "now" happens here, in the hosting layer.

use chrono::NaiveDate;
use flightline_core::currency::CheckrideGrace;

/// Days before an expiration at which a date is flagged as due soon
pub const DUE_SOON_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Expired,
    DueSoon,
    Current,
}

/// Severity of an expiration date relative to the as-of date.
pub fn alert_level(expiry: NaiveDate, as_of: NaiveDate) -> AlertLevel {
    let days = (expiry - as_of).num_days();
    if days < 0 {
        AlertLevel::Expired
    } else if days <= DUE_SOON_DAYS {
        AlertLevel::DueSoon
    } else {
        AlertLevel::Current
    }
}

/// Format a date for display, e.g. "Jun 30, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// One labeled expiration line for the currency report.
pub fn date_line(label: &str, expiry: Option<NaiveDate>, as_of: NaiveDate) -> String {
    let Some(expiry) = expiry else {
        return format!("  {:<18} not on file", label);
    };
    let days = (expiry - as_of).num_days();
    let status = match alert_level(expiry, as_of) {
        AlertLevel::Expired => format!("EXPIRED {} ({} days ago)", format_date(expiry), -days),
        AlertLevel::DueSoon => format!("due {} (in {} days)", format_date(expiry), days),
        AlertLevel::Current => format!("current through {}", format_date(expiry)),
    };
    format!("  {:<18} {}", label, status)
}

/// Checkride grace-window line, shown under the checkride date.
pub fn grace_line(grace: &CheckrideGrace) -> String {
    if grace.expired {
        format!("  {:<18} overdue by {} days", "grace window", -grace.days_remaining)
    } else if grace.in_early_window {
        format!(
            "  {:<18} open since {} ({} days to expiry)",
            "early window",
            format_date(grace.early_window_start),
            grace.days_remaining
        )
    } else {
        format!(
            "  {:<18} opens {}",
            "early window",
            format_date(grace.early_window_start)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
