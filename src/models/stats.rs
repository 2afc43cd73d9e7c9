//! Aggregate statistics over a date-filtered set of session records.
//!
//! Statistics are always recomputed from the current records, never
//! cached or persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::SessionRecord;

/// Aggregates derived from the filtered record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Sum of distances (km)
    pub total_distance_km: f64,
    /// Sum of durations (min)
    pub total_time_min: f64,
    /// Sum of calories (kcal)
    pub total_calories: f64,
    /// Arithmetic mean heart rate (bpm)
    pub avg_heart_rate_bpm: f64,
    /// `total_distance / (total_time / 60)`, or 0 when total time is 0
    pub avg_speed_kmh: f64,
}

/// Restrict records to `date ∈ [start_date, end_date]` inclusive,
/// preserving input order.
pub fn filter_records(
    records: &[SessionRecord],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<SessionRecord> {
    records
        .iter()
        .filter(|r| r.date >= start_date && r.date <= end_date)
        .cloned()
        .collect()
}

/// Compute aggregates over the records falling in the inclusive date range.
///
/// Returns `None` when no record falls in the range: "no data" is a
/// normal outcome, not an error. Sums and means are order-independent,
/// so the result is invariant under permutation of `records`.
pub fn compute_statistics(
    records: &[SessionRecord],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Option<Statistics> {
    let filtered: Vec<&SessionRecord> = records
        .iter()
        .filter(|r| r.date >= start_date && r.date <= end_date)
        .collect();

    if filtered.is_empty() {
        return None;
    }

    let total_distance_km: f64 = filtered.iter().map(|r| r.distance_km).sum();
    let total_time_min: f64 = filtered.iter().map(|r| r.time_min).sum();
    let total_calories: f64 = filtered.iter().map(|r| r.calories).sum();
    let avg_heart_rate_bpm = filtered
        .iter()
        .map(|r| f64::from(r.avg_heart_rate_bpm))
        .sum::<f64>()
        / filtered.len() as f64;

    // Guard divide-by-zero rather than fail: a range of zero-duration
    // sessions simply has no meaningful speed.
    let avg_speed_kmh = if total_time_min > 0.0 {
        total_distance_km / (total_time_min / 60.0)
    } else {
        0.0
    };

    Some(Statistics {
        total_distance_km,
        total_time_min,
        total_calories,
        avg_heart_rate_bpm,
        avg_speed_kmh,
    })
}
