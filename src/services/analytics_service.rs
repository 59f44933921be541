use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};

use crate::models::{
    AnalyticsSnapshot, CategorySlice, DayBucket, Hotspot, MonthBucket, Report, ReportStatus,
    SeverityBucket, StatusCounts,
};

/// Derives the full dashboard snapshot from a report list. Pure and
/// stateless: the same list and `today` always produce the same snapshot.
/// `today` is the end of the 7-day window (the current UTC date in
/// production); all calendar bucketing is done in UTC.
pub fn aggregate(reports: &[Report], today: NaiveDate) -> AnalyticsSnapshot {
    let total = reports.len() as u64;
    let statuses = count_statuses(reports);
    let resolved = statuses
        .get(&ReportStatus::Resolved)
        .copied()
        .unwrap_or(0);

    AnalyticsSnapshot {
        total_reports: total,
        category_distribution: category_distribution(reports, total),
        monthly_trend: monthly_trend(reports),
        weekly_trend: weekly_trend(reports, today),
        status_distribution: StatusCounts {
            pending: statuses.get(&ReportStatus::Pending).copied().unwrap_or(0),
            in_progress: statuses
                .get(&ReportStatus::InProgress)
                .copied()
                .unwrap_or(0),
            resolved,
        },
        severity_histogram: severity_histogram(reports),
        hotspots: hotspots(reports),
        resolution_rate: percent(resolved, total),
        average_per_day: average_per_day(total),
    }
}

/// Raw status accumulator; zero-filling the three known statuses happens
/// at the snapshot layer.
fn count_statuses(reports: &[Report]) -> HashMap<ReportStatus, u64> {
    let mut counts = HashMap::new();
    for report in reports {
        *counts.entry(report.status).or_insert(0) += 1;
    }
    counts
}

/// Top-5 categories by count. Ties keep first-encountered order (the sort
/// is stable over an insertion-ordered accumulator).
fn category_distribution(reports: &[Report], total: u64) -> Vec<CategorySlice> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for report in reports {
        if report.category.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(name, _)| *name == report.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((report.category.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(5)
        .map(|(name, value)| CategorySlice {
            percentage: percent(value, total),
            name,
            value,
        })
        .collect()
}

/// Counts per UTC calendar month, ascending, most recent 6 buckets only.
/// Months with no reports are not padded in; records without a usable
/// timestamp are skipped.
fn monthly_trend(reports: &[Report]) -> Vec<MonthBucket> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for report in reports {
        if let Some(created_at) = report.created_at {
            *counts
                .entry(created_at.format("%Y-%m").to_string())
                .or_insert(0) += 1;
        }
    }
    let mut trend: Vec<MonthBucket> = counts
        .into_iter()
        .map(|(month, count)| MonthBucket { month, count })
        .collect();
    if trend.len() > 6 {
        trend.drain(..trend.len() - 6);
    }
    trend
}

/// Exactly 7 entries, one per calendar day ending on `today`, oldest first.
fn weekly_trend(reports: &[Report], today: NaiveDate) -> Vec<DayBucket> {
    (0..7)
        .rev()
        .map(|i| {
            let date = today - Duration::days(i);
            let count = reports
                .iter()
                .filter(|r| r.created_at.map(|ts| ts.date_naive() == date) == Some(true))
                .count() as u64;
            DayBucket {
                day: date.format("%a").to_string(),
                count,
            }
        })
        .collect()
}

/// Counts per severity level actually present, ascending. Only 1-5 are
/// valid levels; everything else (including severity-less reports) is
/// excluded rather than counted as a zero bucket.
fn severity_histogram(reports: &[Report]) -> Vec<SeverityBucket> {
    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
    for report in reports {
        if let Some(level) = report.severity {
            if (1..=5).contains(&level) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
    }
    counts
        .into_iter()
        .map(|(level, value)| SeverityBucket { level, value })
        .collect()
}

/// Top-5 coordinate clusters. The cluster key is latitude and longitude
/// each rounded to 2 decimal places; the first member seen for a key
/// supplies the representative coordinates.
fn hotspots(reports: &[Report]) -> Vec<Hotspot> {
    let mut clusters: Vec<(String, Hotspot)> = Vec::new();
    for report in reports {
        if let Some((longitude, latitude)) = report.coords() {
            let key = format!("{:.2},{:.2}", latitude, longitude);
            match clusters.iter_mut().find(|(k, _)| *k == key) {
                Some((_, hotspot)) => hotspot.count += 1,
                None => clusters.push((
                    key,
                    Hotspot {
                        latitude,
                        longitude,
                        count: 1,
                    },
                )),
            }
        }
    }
    clusters.sort_by(|a, b| b.1.count.cmp(&a.1.count));
    clusters.into_iter().take(5).map(|(_, h)| h).collect()
}

fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

fn average_per_day(total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((total as f64 / 30.0).round() as u32).max(1)
}
