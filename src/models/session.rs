// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout session record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged run.
///
/// Records are append-only and stored in insertion order, which is not
/// necessarily chronological. The serde renames match the legacy CSV
/// column headers of the original data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Calendar date of the run
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Distance in kilometers
    #[serde(rename = "Distance (km)")]
    pub distance_km: f64,
    /// Duration in minutes
    #[serde(rename = "Temps (min)")]
    pub time_min: f64,
    /// Energy burned in kilocalories
    #[serde(rename = "Calories (kcal)")]
    pub calories: f64,
    /// Average heart rate in beats per minute
    #[serde(rename = "FC Moyenne (bpm)")]
    pub avg_heart_rate_bpm: u32,
}

impl SessionRecord {
    /// Name of the first negative numeric field, if any.
    ///
    /// `avg_heart_rate_bpm` is unsigned and cannot go negative.
    pub fn first_negative_field(&self) -> Option<&'static str> {
        if self.distance_km < 0.0 {
            Some("distance_km")
        } else if self.time_min < 0.0 {
            Some("time_min")
        } else if self.calories < 0.0 {
            Some("calories")
        } else {
            None
        }
    }
}
