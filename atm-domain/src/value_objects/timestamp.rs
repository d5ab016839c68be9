// Local wall-clock timestamps as stored in the report table

use chrono::{DateTime, Datelike, NaiveDateTime};

/// Layout written by the store, e.g. `2026-10-18 14:05:09`.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DAY_FORMAT: &str = "%Y-%m-%d";
pub const MIN_PLAUSIBLE_YEAR: i32 = 2020;
pub const MAX_PLAUSIBLE_YEAR: i32 = 2030;

const ISO_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    Valid(NaiveDateTime),
    Invalid,
}

impl ParsedTimestamp {
    pub fn unwrap_or(self, fallback: NaiveDateTime) -> NaiveDateTime {
        match self {
            ParsedTimestamp::Valid(value) => value,
            ParsedTimestamp::Invalid => fallback,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ParsedTimestamp::Valid(_))
    }
}

pub fn format_storage(value: &NaiveDateTime) -> String {
    value.format(STORAGE_FORMAT).to_string()
}

/// Accepts ISO-like layouts (optionally RFC 3339 with offset, kept as wall-clock)
/// and the `YYYY-MM-DD HH:MM:SS` storage layout. Years outside
/// 2020..=2030 are treated as corrupt.
pub fn parse_timestamp(raw: &str) -> ParsedTimestamp {
    let raw = raw.trim();
    let parsed = ISO_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|value| value.naive_local())
        })
        .or_else(|| NaiveDateTime::parse_from_str(raw, STORAGE_FORMAT).ok());

    match parsed {
        Some(value) if (MIN_PLAUSIBLE_YEAR..=MAX_PLAUSIBLE_YEAR).contains(&value.year()) => {
            ParsedTimestamp::Valid(value)
        }
        _ => ParsedTimestamp::Invalid,
    }
}
