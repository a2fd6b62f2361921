//! Timestamp helpers for backups and mutation stamps.

use chrono::{DateTime, SecondsFormat, Utc};

/// Filesystem-safe instant for backup file names.
///
/// RFC 3339 in UTC with `:` and `.` replaced by `-`, so the result is valid
/// on every platform while staying sortable and human-readable.
#[must_use]
pub fn backup_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Current instant as epoch milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
