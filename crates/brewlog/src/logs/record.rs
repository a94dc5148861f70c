//! Record — CSV row parsing for series and action logs.
//!
//! Every row is parsed on its own. A row that fails (missing column, bad
//! timestamp, non-numeric value, invalid UTF-8) is counted as skipped and
//! the remaining rows are still processed.

use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// Timestamp layout written by the brewing engine (naive, no timezone).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One sample of a numeric series, serialized as `[timestamp_ms, value]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRecord {
    pub timestamp_ms: i64,
    pub value: f64,
}

/// One brewing action, serialized as `[timestamp_ms, "action"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionLogRecord {
    pub timestamp_ms: i64,
    pub action: String,
}

impl Serialize for LogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.timestamp_ms, self.value).serialize(serializer)
    }
}

impl Serialize for ActionLogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.timestamp_ms, &self.action).serialize(serializer)
    }
}

/// Result of a best-effort parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Parse a numeric series log (`timestamp,value` rows).
pub fn parse_series(content: &[u8]) -> Parsed<LogRecord> {
    parse_rows(content, |timestamp_ms, value| {
        let value: f64 = value.trim().parse().ok()?;
        // JSON has no representation for NaN or infinity
        value.is_finite().then_some(LogRecord { timestamp_ms, value })
    })
}

/// Parse the action log (`timestamp,action` rows). Action text is kept verbatim.
pub fn parse_actions(content: &[u8]) -> Parsed<ActionLogRecord> {
    parse_rows(content, |timestamp_ms, action| {
        Some(ActionLogRecord {
            timestamp_ms,
            action: action.to_string(),
        })
    })
}

/// Convert an engine timestamp to Unix milliseconds, treating it as UTC.
///
/// Only the exact `YYYY-MM-DD HH:MM:SS` layout is accepted; the shape is
/// checked before chrono sees the field.
pub fn timestamp_millis(raw: &str) -> Option<i64> {
    if !has_timestamp_shape(raw.as_bytes()) {
        return None;
    }
    let parsed = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()?;
    // A parsed leap second carries its extra second in the nanoseconds
    if parsed.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(parsed.and_utc().timestamp() * 1000)
}

/// 19 bytes: digits everywhere except `-`, `-`, ` `, `:`, `:` at fixed offsets.
fn has_timestamp_shape(raw: &[u8]) -> bool {
    const SEPARATORS: [(usize, u8); 5] = [(4, b'-'), (7, b'-'), (10, b' '), (13, b':'), (16, b':')];

    raw.len() == 19
        && raw.iter().enumerate().all(|(i, b)| {
            match SEPARATORS.iter().find(|(pos, _)| *pos == i) {
                Some((_, sep)) => b == sep,
                None => b.is_ascii_digit(),
            }
        })
        && &raw[17..19] <= &b"59"[..]
}

fn parse_rows<T, F>(content: &[u8], mut convert: F) -> Parsed<T>
where
    F: FnMut(i64, &str) -> Option<T>,
{
    let mut records = Vec::new();
    let mut skipped = 0;

    for raw_line in content.split(|b| *b == b'\n') {
        let raw_line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);
        if raw_line.is_empty() {
            continue;
        }

        let record = std::str::from_utf8(raw_line).ok().and_then(|line| {
            let fields = split_fields(line);
            if fields.len() < 2 {
                return None;
            }
            let timestamp_ms = timestamp_millis(&fields[0])?;
            convert(timestamp_ms, &fields[1])
        });

        match record {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    Parsed { records, skipped }
}

/// Split one CSV line into fields.
///
/// A field that starts with `"` is quoted: commas inside it are literal and
/// `""` is an escaped quote. Quotes elsewhere are ordinary characters.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(std::mem::take(&mut current));
                at_field_start = true;
            }
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            _ => {
                current.push(c);
                at_field_start = false;
            }
        }
    }

    fields.push(current);
    fields
}
