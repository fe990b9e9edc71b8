use super::judge::{HitGrade, HitOutcome};

/// Session score. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct ScoreCounter {
    total: u64,
    perfect_count: u32,
    great_count: u32,
    good_count: u32,
    miss_count: u32,
}

impl ScoreCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: HitOutcome) {
        match outcome.grade {
            HitGrade::Perfect => self.perfect_count += 1,
            HitGrade::Great => self.great_count += 1,
            HitGrade::Good => self.good_count += 1,
            HitGrade::Miss => self.miss_count += 1,
        }
        self.total += u64::from(outcome.points());
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, grade: HitGrade) -> u32 {
        match grade {
            HitGrade::Perfect => self.perfect_count,
            HitGrade::Great => self.great_count,
            HitGrade::Good => self.good_count,
            HitGrade::Miss => self.miss_count,
        }
    }

    pub fn presses(&self) -> u32 {
        self.perfect_count + self.great_count + self.good_count + self.miss_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(grade: HitGrade) -> HitOutcome {
        HitOutcome {
            grade,
            distance: None,
        }
    }

    #[test]
    fn test_accumulates() {
        let mut score = ScoreCounter::new();
        score.record(outcome(HitGrade::Perfect));
        score.record(outcome(HitGrade::Good));
        score.record(outcome(HitGrade::Miss));

        assert_eq!(score.total(), 120);
        assert_eq!(score.count(HitGrade::Perfect), 1);
        assert_eq!(score.count(HitGrade::Great), 0);
        assert_eq!(score.count(HitGrade::Miss), 1);
        assert_eq!(score.presses(), 3);
    }

    #[test]
    fn test_miss_does_not_decrease() {
        let mut score = ScoreCounter::new();
        score.record(outcome(HitGrade::Great));
        let before = score.total();
        score.record(outcome(HitGrade::Miss));
        assert_eq!(score.total(), before);
    }
}
