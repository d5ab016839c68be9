// Derived read-side views over the report feed

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDateTime};

use crate::entities::{LocationCount, ReportEvent, ReportFeedEntry, ReportSummary};

/// Most-reported locations, highest count first. Ties are ordered by location name.
pub fn top_locations(reports: &[ReportEvent], limit: usize) -> Vec<LocationCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for report in reports {
        *counts.entry(report.location.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<LocationCount> = counts
        .into_iter()
        .map(|(location, count)| LocationCount {
            location: location.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.location.cmp(&b.location)));
    ranked.truncate(limit);
    ranked
}

pub fn summarize(reports: &[ReportEvent], now: NaiveDateTime) -> ReportSummary {
    let day = Duration::hours(24);
    let unique: HashSet<&str> = reports.iter().map(|r| r.location.as_str()).collect();
    let recent = reports
        .iter()
        .filter(|r| now.signed_duration_since(r.timestamp) < day)
        .count();
    ReportSummary {
        total_reports: reports.len() as u64,
        unique_locations: unique.len() as u64,
        reports_last_24h: recent as u64,
    }
}

/// "just now", "5 minutes ago", "1 hour ago", "3 days ago".
pub fn relative_age(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = now.signed_duration_since(timestamp);
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes == 1 {
        return "1 minute ago".to_string();
    }
    if minutes < 60 {
        return format!("{} minutes ago", minutes);
    }
    if hours == 1 {
        return "1 hour ago".to_string();
    }
    if hours < 24 {
        return format!("{} hours ago", hours);
    }
    if days == 1 {
        return "1 day ago".to_string();
    }
    format!("{} days ago", days)
}

pub fn to_feed(reports: Vec<ReportEvent>, now: NaiveDateTime) -> Vec<ReportFeedEntry> {
    reports
        .into_iter()
        .map(|report| ReportFeedEntry {
            age: relative_age(report.timestamp, now),
            report,
        })
        .collect()
}
