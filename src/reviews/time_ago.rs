//! Relative review age

use jiff::Timestamp;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Formats the age of `created_at` relative to `now`, e.g. `"2 days ago"`.
///
/// Uses the largest whole unit of days, hours or minutes; anything under a minute (or in the future)
/// is `"Just now"`. Input that is not an RFC 3339 timestamp is returned unchanged.
pub fn time_ago(created_at: &str, now: Timestamp) -> String {
    let Ok(created) = created_at.parse::<Timestamp>() else {
        return created_at.to_string();
    };

    let elapsed = now.as_second().saturating_sub(created.as_second());

    let days = elapsed / SECONDS_PER_DAY;
    let hours = elapsed / SECONDS_PER_HOUR;
    let minutes = elapsed / SECONDS_PER_MINUTE;

    if days > 0 {
        format!("{days} day{} ago", plural(days))
    } else if hours > 0 {
        format!("{hours} hour{} ago", plural(hours))
    } else if minutes > 0 {
        format!("{minutes} minute{} ago", plural(minutes))
    } else {
        "Just now".to_string()
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 { "s" } else { "" }
}
