//! Display helpers for dashboard output.

use time::macros::format_description;
use time::OffsetDateTime;

/// `"Jan 05, 2025, 14:03:09"` (UTC), or `"Never"` when absent.
pub fn format_timestamp(ts: Option<OffsetDateTime>) -> String {
    let Some(ts) = ts else {
        return "Never".to_string();
    };
    let fmt = format_description!("[month repr:short] [day], [year], [hour]:[minute]:[second]");
    ts.to_offset(time::UtcOffset::UTC)
        .format(fmt)
        .unwrap_or_else(|_| ts.to_string())
}
