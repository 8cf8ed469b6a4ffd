//! Paint-drying batches: how long a batch takes to dry and how much is left.

use crate::error::TimeCodeError;
use crate::timecode::TimeCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Surface area of a sphere, `4πr²`.
pub fn sphere_surface_area(radius: f64) -> f64 {
    4.0 * PI * radius * radius
}

/// Drying time for `surface_area`: whole square units become seconds,
/// scaled by `seconds_per_unit`.
pub fn drying_time(surface_area: f64, seconds_per_unit: f64) -> Result<TimeCode, TimeCodeError> {
    if surface_area.is_nan() || surface_area < 0.0 {
        return Err(TimeCodeError::InvalidArgument(
            "surface area must be a non-negative number",
        ));
    }
    TimeCode::new(0, 0, surface_area.floor() as u64).scale(seconds_per_unit)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DryingBatch {
    pub name: String,
    pub batch_id: u32,
    pub started_at: DateTime<Utc>,
    pub time_to_dry: TimeCode,
}

impl DryingBatch {
    pub fn new(
        name: impl Into<String>,
        batch_id: u32,
        started_at: DateTime<Utc>,
        time_to_dry: TimeCode,
    ) -> Self {
        Self {
            name: name.into(),
            batch_id,
            started_at,
            time_to_dry,
        }
    }

    /// A batch of spheres of `radius` cm, drying at `seconds_per_cm2`.
    pub fn for_sphere(
        name: impl Into<String>,
        batch_id: u32,
        radius: f64,
        seconds_per_cm2: f64,
        started_at: DateTime<Utc>,
    ) -> Result<Self, TimeCodeError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(TimeCodeError::InvalidArgument(
                "radius must be a non-negative number",
            ));
        }
        let time_to_dry = drying_time(sphere_surface_area(radius), seconds_per_cm2)?;
        Ok(Self::new(name, batch_id, started_at, time_to_dry))
    }

    /// Time left at `now`, clamped at zero. A clock that reads earlier than
    /// `started_at` counts as no time elapsed.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> TimeCode {
        let elapsed = now
            .signed_duration_since(self.started_at)
            .num_seconds()
            .max(0) as u64;
        self.time_to_dry
            .subtract(TimeCode::from_seconds(elapsed))
            .unwrap_or_default()
    }

    pub fn is_dry(&self, now: DateTime<Utc>) -> bool {
        self.time_remaining(now) == TimeCode::default()
    }

    pub fn label(&self) -> String {
        format!("Batch-{} ({})", self.batch_id, self.name)
    }

    pub fn status_line(&self, now: DateTime<Utc>) -> String {
        let remaining = self.time_remaining(now);
        if remaining > TimeCode::default() {
            format!("{} drying. Time remaining: {}", self.label(), remaining)
        } else {
            format!("{} has finished drying!", self.label())
        }
    }
}

/// Batches currently drying, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DryingTracker {
    batches: Vec<DryingBatch>,
}

impl DryingTracker {
    pub fn add(&mut self, batch: DryingBatch) -> &DryingBatch {
        log::info!(
            "tracking {} for {}s",
            batch.label(),
            batch.time_to_dry.to_seconds()
        );
        self.batches.push(batch);
        &self.batches[self.batches.len() - 1]
    }

    /// Status of every batch at `now`. Batches that have finished drying are
    /// reported once and then dropped.
    pub fn view(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let lines = self.batches.iter().map(|b| b.status_line(now)).collect();
        self.batches.retain(|b| {
            let dry = b.is_dry(now);
            if dry {
                log::debug!("{} finished drying", b.label());
            }
            !dry
        });
        lines
    }

    pub fn batches(&self) -> &[DryingBatch] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_sphere_surface_area() {
        assert!((sphere_surface_area(1.0) - 4.0 * PI).abs() < 1e-12);
        assert_eq!(sphere_surface_area(0.0), 0.0);
    }

    #[test]
    fn test_drying_time_floors_area() {
        // r = 10 -> 1256.637... cm^2
        let tc = drying_time(sphere_surface_area(10.0), 1.0).unwrap();
        assert_eq!(tc.to_seconds(), 1256);
        assert_eq!(tc.to_string(), "0:20:56");
    }

    #[test]
    fn test_drying_time_scaled() {
        assert_eq!(drying_time(100.0, 2.5).unwrap().to_seconds(), 250);
        assert!(drying_time(100.0, -1.0).is_err());
        assert!(drying_time(-1.0, 1.0).is_err());
    }

    #[test]
    fn test_for_sphere() {
        let batch = DryingBatch::for_sphere("green", 9, 10.0, 1.0, t0()).unwrap();
        assert_eq!(batch.time_to_dry.to_seconds(), 1256);
        assert_eq!(batch.label(), "Batch-9 (green)");
        assert!(DryingBatch::for_sphere("green", 9, -1.0, 1.0, t0()).is_err());
        assert!(DryingBatch::for_sphere("green", 9, f64::NAN, 1.0, t0()).is_err());
    }

    #[test]
    fn test_time_remaining() {
        let batch = DryingBatch::new("red", 7, t0(), TimeCode::new(0, 2, 0));
        assert_eq!(batch.time_remaining(t0()), TimeCode::new(0, 2, 0));
        assert_eq!(
            batch.time_remaining(t0() + Duration::seconds(45)),
            TimeCode::new(0, 1, 15)
        );
        assert_eq!(
            batch.time_remaining(t0() + Duration::hours(1)),
            TimeCode::default()
        );
        assert_eq!(
            batch.time_remaining(t0() - Duration::seconds(30)),
            TimeCode::new(0, 2, 0)
        );
    }

    #[test]
    fn test_status_line() {
        let batch = DryingBatch::new("red", 7, t0(), TimeCode::new(0, 2, 0));
        assert_eq!(
            batch.status_line(t0() + Duration::seconds(5)),
            "Batch-7 (red) drying. Time remaining: 0:1:55"
        );
        assert_eq!(
            batch.status_line(t0() + Duration::seconds(120)),
            "Batch-7 (red) has finished drying!"
        );
    }

    #[test]
    fn test_view_drops_finished_batches() {
        let mut tracker = DryingTracker::default();
        tracker.add(DryingBatch::new("fast", 1, t0(), TimeCode::new(0, 0, 10)));
        tracker.add(DryingBatch::new("slow", 2, t0(), TimeCode::new(1, 0, 0)));

        let lines = tracker.view(t0() + Duration::seconds(10));
        assert_eq!(
            lines,
            vec![
                "Batch-1 (fast) has finished drying!".to_string(),
                "Batch-2 (slow) drying. Time remaining: 0:59:50".to_string(),
            ]
        );
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.batches()[0].batch_id, 2);
    }

    #[test]
    fn test_tracker_serializes_as_list() {
        let mut tracker = DryingTracker::default();
        tracker.add(DryingBatch::new("blue", 3, t0(), TimeCode::new(0, 0, 30)));

        let json = serde_json::to_value(&tracker).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["time_to_dry"], 30);

        let back: DryingTracker = serde_json::from_value(json).unwrap();
        assert_eq!(back, tracker);
    }
}
