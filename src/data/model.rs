use std::fmt;

use serde::Serialize;

use super::error::LoadError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a raw `class` cell. Accepts integral floats (`1.0`).
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 1.0 {
            Some(Outcome::Success)
        } else if code == 0.0 {
            Some(Outcome::Failure)
        } else {
            None
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Outcome::Failure => "failure",
            Outcome::Success => "success",
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.code()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// PayloadRange – closed interval in kilograms
// ---------------------------------------------------------------------------

/// Closed payload interval `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub lo: f64,
    pub hi: f64,
}

impl PayloadRange {
    /// Build a range; swapped endpoints are put back in order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { lo: a, hi: b }
        } else {
            PayloadRange { lo: b, hi: a }
        }
    }

    pub fn contains(&self, mass_kg: f64) -> bool {
        self.lo <= mass_kg && mass_kg <= self.hi
    }

    /// Intersect with `bounds`, collapsing to the nearest bound when disjoint.
    /// A NaN end falls back to the matching bound.
    pub fn clamp_to(&self, bounds: &PayloadRange) -> Self {
        let clamp = |v: f64, fallback: f64| {
            if v.is_nan() {
                fallback
            } else {
                v.clamp(bounds.lo, bounds.hi)
            }
        };
        PayloadRange::new(clamp(self.lo, bounds.lo), clamp(self.hi, bounds.hi))
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.0}, {:.0}] kg", self.lo, self.hi)
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable table plus its cached payload bounds.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    payload_bounds: PayloadRange,
}

impl LaunchTable {
    /// Wrap loaded records, computing the observed payload min/max.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        let mut iter = records.iter().map(|r| r.payload_mass_kg);
        let first = iter.next().ok_or(LoadError::Empty)?;
        let (lo, hi) = iter.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));

        Ok(LaunchTable {
            records,
            payload_bounds: PayloadRange { lo, hi },
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn payload_bounds(&self) -> PayloadRange {
        self.payload_bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Distinct booster categories in order of first appearance.
    pub fn booster_categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for r in &self.records {
            if !seen.contains(&r.booster_version_category) {
                seen.push(r.booster_version_category.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, mass: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: mass,
            outcome,
            booster_version_category: booster.to_string(),
        }
    }

    #[test]
    fn bounds_cover_observed_payloads() {
        let table = LaunchTable::from_records(vec![
            record("A", 2000.0, Outcome::Failure, "v1"),
            record("A", 500.0, Outcome::Success, "v2"),
            record("B", 9600.0, Outcome::Success, "v1"),
        ])
        .unwrap();

        assert_eq!(table.payload_bounds(), PayloadRange { lo: 500.0, hi: 9600.0 });
        assert_eq!(table.booster_categories(), vec!["v1", "v2"]);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            LaunchTable::from_records(Vec::new()),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn range_is_inclusive_and_ordered() {
        let r = PayloadRange::new(3000.0, 1000.0);
        assert_eq!(r.lo, 1000.0);
        assert!(r.contains(1000.0));
        assert!(r.contains(3000.0));
        assert!(!r.contains(3000.5));
    }

    #[test]
    fn clamp_keeps_range_inside_bounds() {
        let bounds = PayloadRange::new(0.0, 9600.0);
        assert_eq!(
            PayloadRange::new(-50.0, 20000.0).clamp_to(&bounds),
            bounds
        );
        assert_eq!(
            PayloadRange::new(12000.0, 15000.0).clamp_to(&bounds),
            PayloadRange::new(9600.0, 9600.0)
        );
    }

    #[test]
    fn clamp_replaces_nan_ends_with_bounds() {
        let bounds = PayloadRange::new(0.0, 9600.0);
        let r = PayloadRange { lo: f64::NAN, hi: 2000.0 }.clamp_to(&bounds);
        assert_eq!(r, PayloadRange::new(0.0, 2000.0));
        let r = PayloadRange { lo: 500.0, hi: f64::NAN }.clamp_to(&bounds);
        assert_eq!(r, PayloadRange::new(500.0, 9600.0));
        let r = PayloadRange { lo: f64::NEG_INFINITY, hi: f64::INFINITY }.clamp_to(&bounds);
        assert_eq!(r, bounds);
    }

    #[test]
    fn outcome_codes() {
        assert_eq!(Outcome::from_code(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_code(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_code(0.5), None);
        assert_eq!(Outcome::Success.to_string(), "1");
    }
}
