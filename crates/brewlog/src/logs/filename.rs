//! Filename — log file name validation.
//!
//! Only bare names of the form `NAME.log` are accepted, where NAME is made of
//! ASCII letters, digits, `_` and `-`. Anything with a path separator, a
//! leading dot or another extension is rejected before the filesystem is
//! touched.

use regex::Regex;
use std::sync::LazyLock;

/// Literal-dot pattern; `.` must not match an arbitrary character here.
pub const LOG_FILENAME_PATTERN: &str = r"^[A-Za-z0-9_-]+\.log$";

static LOG_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(LOG_FILENAME_PATTERN).expect("log filename pattern is valid")
});

/// Returns true when `name` is a plain log file name.
pub fn is_valid_log_filename(name: &str) -> bool {
    LOG_FILENAME.is_match(name)
}

/// File name of the series log for a data type and id, e.g. `sensor_3.log`.
pub fn series_filename(data_type: &str, data_id: &str) -> String {
    format!("{}_{}.log", data_type, data_id)
}
