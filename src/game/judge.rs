use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Grade of a key press, from the distance between the object and the target line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitGrade {
    Perfect,
    Great,
    Good,
    /// Nothing in tolerance, or in tolerance but outside every window.
    Miss,
}

impl HitGrade {
    pub const ALL: [HitGrade; 4] = [Self::Perfect, Self::Great, Self::Good, Self::Miss];

    pub fn points(&self) -> u32 {
        match self {
            Self::Perfect => 100,
            Self::Great => 50,
            Self::Good => 20,
            Self::Miss => 0,
        }
    }
}

/// Distance bands, exclusive upper bounds, in lane units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitWindows {
    pub perfect: f64,
    pub great: f64,
    pub good: f64,
}

impl Default for HitWindows {
    fn default() -> Self {
        Self {
            perfect: 10.0,
            great: 20.0,
            good: 30.0,
        }
    }
}

impl HitWindows {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.perfect > 0.0 && self.perfect < self.great && self.great < self.good;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidHitWindows {
                perfect: self.perfect,
                great: self.great,
                good: self.good,
            })
        }
    }

    pub fn grade(&self, distance: f64) -> HitGrade {
        if distance < self.perfect {
            HitGrade::Perfect
        } else if distance < self.great {
            HitGrade::Great
        } else if distance < self.good {
            HitGrade::Good
        } else {
            HitGrade::Miss
        }
    }
}

/// Decides which objects a press can reach and how well it hit them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPolicy {
    /// Maximum distance (inclusive) at which an object counts as a candidate.
    pub tolerance: f64,
    pub windows: HitWindows,
}

impl Default for HitPolicy {
    fn default() -> Self {
        Self {
            tolerance: 50.0,
            windows: HitWindows::default(),
        }
    }
}

impl HitPolicy {
    pub fn new(tolerance: f64, windows: HitWindows) -> Self {
        Self { tolerance, windows }
    }

    pub fn in_tolerance(&self, distance: f64) -> bool {
        distance <= self.tolerance
    }

    /// Grade a candidate found at `distance`, or a press that matched nothing.
    pub fn evaluate(&self, distance: Option<f64>) -> HitOutcome {
        let grade = distance.map_or(HitGrade::Miss, |d| self.windows.grade(d));
        HitOutcome { grade, distance }
    }
}

/// Result of one key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOutcome {
    pub grade: HitGrade,
    /// Distance to the matched object, `None` when nothing was in tolerance.
    pub distance: Option<f64>,
}

impl HitOutcome {
    pub fn points(&self) -> u32 {
        self.grade.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges_are_exclusive() {
        let windows = HitWindows::default();
        assert_eq!(windows.grade(0.0), HitGrade::Perfect);
        assert_eq!(windows.grade(9.99), HitGrade::Perfect);
        assert_eq!(windows.grade(10.0), HitGrade::Great);
        assert_eq!(windows.grade(20.0), HitGrade::Good);
        assert_eq!(windows.grade(30.0), HitGrade::Miss);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let policy = HitPolicy::default();
        assert!(policy.in_tolerance(50.0));
        assert!(!policy.in_tolerance(50.01));
    }

    #[test]
    fn test_no_candidate_is_miss() {
        let outcome = HitPolicy::default().evaluate(None);
        assert_eq!(outcome.grade, HitGrade::Miss);
        assert_eq!(outcome.points(), 0);
    }

    #[test]
    fn test_points() {
        let points: Vec<u32> = HitGrade::ALL.iter().map(HitGrade::points).collect();
        assert_eq!(points, vec![100, 50, 20, 0]);
    }

    #[test]
    fn test_windows_must_increase() {
        let windows = HitWindows {
            perfect: 10.0,
            great: 10.0,
            good: 30.0,
        };
        assert!(windows.validate().is_err());
        assert!(HitWindows::default().validate().is_ok());
    }
}
