//! Human-facing rendering of events, one line each.

use chrono::TimeZone;
use std::fmt::Display;

use crate::types::StackEvent;

pub const LOGICAL_ID_WIDTH: usize = 25;
pub const STATUS_WIDTH: usize = 20;

/// `HH:MM:SS <logical id> <status> <reason>` with the time shown in `tz`.
pub fn format_event<Tz>(event: &StackEvent, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time = event.timestamp.with_timezone(tz).format("%H:%M:%S");
    format!(
        "{} {:<id_w$} {:<st_w$} {}",
        time,
        event.logical_resource_id,
        truncate_status(&event.resource_status),
        event.status_reason.as_deref().unwrap_or(""),
        id_w = LOGICAL_ID_WIDTH,
        st_w = STATUS_WIDTH,
    )
}

pub fn format_watching(stack: &str) -> String {
    format!("Watching stack: {stack}")
}

/// Statuses longer than the column keep their first `STATUS_WIDTH - 1`
/// characters followed by an ellipsis.
pub fn truncate_status(status: &str) -> String {
    if status.chars().count() <= STATUS_WIDTH {
        return status.to_string();
    }
    let mut out: String = status.chars().take(STATUS_WIDTH - 1).collect();
    out.push('…');
    out
}
