use chrono::{DateTime, Utc};

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Final path component, or the whole string when there is no separator.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// Short calendar date, e.g. "Mar 5, 2024".
pub fn format_date(time: &DateTime<Utc>) -> String {
    time.format("%b %-d, %Y").to_string()
}
