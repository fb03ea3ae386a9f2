//! Formatting helpers for the save file list.

use std::time::{SystemTime, UNIX_EPOCH};

use save::store::{SaveFileInfo, SAVE_FILE_PREFIX};

/// Short row label: the file's timestamp part and its modification time.
///
/// `savegame_1700000000000.bin` modified at that instant shows as
/// `1700000000000.bin  2023-11-14 22:13`.
pub fn format_slot_label(slot: &SaveFileInfo) -> String {
    let stem = slot
        .name
        .strip_prefix(SAVE_FILE_PREFIX)
        .unwrap_or(&slot.name);
    format!("{stem}  {}", format_modified(slot.modified))
}

/// UTC `YYYY-MM-DD HH:MM`, or "Unknown" for times before the epoch.
pub fn format_modified(modified: SystemTime) -> String {
    let Ok(since_epoch) = modified.duration_since(UNIX_EPOCH) else {
        return "Unknown".to_string();
    };
    let secs = since_epoch.as_secs();
    let (year, month, day) = days_to_ymd(secs / 86_400);
    let time_of_day = secs % 86_400;
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60
    )
}

/// Civil date for a day count since 1970-01-01 (proleptic Gregorian).
fn days_to_ymd(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}
