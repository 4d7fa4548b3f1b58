use serde::Serialize;

use super::catalog::{Subscale, ITEMS, ITEM_COUNT};
use super::level::{level_of, Level};
use super::responses::ResponseSet;
use super::validation::complete_values;
use crate::error::ScoringError;
use crate::locale::Locale;

/// Subscale and overall averages, each in [0, 6]. Not rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreReport {
    pub overall: f64,
    pub vigor: f64,
    pub dedication: f64,
    pub absorption: f64,
}

/// Which of the four scores a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    Overall,
    Subscale(Subscale),
}

impl ScoreKind {
    pub fn name(self, locale: Locale) -> &'static str {
        match self {
            ScoreKind::Overall => locale.pick("Overall", "総合スコア"),
            ScoreKind::Subscale(s) => s.name(locale),
        }
    }
}

impl ScoreReport {
    pub fn subscale(&self, subscale: Subscale) -> f64 {
        match subscale {
            Subscale::Vigor => self.vigor,
            Subscale::Dedication => self.dedication,
            Subscale::Absorption => self.absorption,
        }
    }

    pub fn get(&self, kind: ScoreKind) -> f64 {
        match kind {
            ScoreKind::Overall => self.overall,
            ScoreKind::Subscale(s) => self.subscale(s),
        }
    }

    pub fn overall_level(&self) -> Level {
        level_of(self.overall)
    }

    pub fn level(&self, kind: ScoreKind) -> Level {
        level_of(self.get(kind))
    }

    /// Scores in display order: overall, vigor, dedication, absorption.
    pub fn entries(&self) -> [(ScoreKind, f64); 4] {
        [
            (ScoreKind::Overall, self.overall),
            (ScoreKind::Subscale(Subscale::Vigor), self.vigor),
            (ScoreKind::Subscale(Subscale::Dedication), self.dedication),
            (ScoreKind::Subscale(Subscale::Absorption), self.absorption),
        ]
    }
}

/// Score a complete response set.
///
/// Fails with `IncompleteResponse` if any item is missing or out of range;
/// missing answers are never filled in.
pub fn compute_scores(responses: &ResponseSet) -> Result<ScoreReport, ScoringError> {
    let values = complete_values(responses)?;

    let mean_of = |subscale: Subscale| {
        let (sum, count) = ITEMS
            .iter()
            .zip(values.iter())
            .filter(|(item, _)| item.subscale == subscale)
            .fold((0u32, 0u32), |(sum, count), (_, value)| {
                (sum + u32::from(*value), count + 1)
            });
        f64::from(sum) / f64::from(count)
    };

    let total: u32 = values.iter().map(|v| u32::from(*v)).sum();

    Ok(ScoreReport {
        overall: f64::from(total) / ITEM_COUNT as f64,
        vigor: mean_of(Subscale::Vigor),
        dedication: mean_of(Subscale::Dedication),
        absorption: mean_of(Subscale::Absorption),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_all_zero() {
        let report = compute_scores(&ResponseSet::from([0; 9])).unwrap();
        for (kind, score) in report.entries() {
            assert_eq!(score, 0.0);
            assert_eq!(report.level(kind), Level::VeryLow);
        }
    }

    #[test]
    fn test_all_six() {
        let report = compute_scores(&ResponseSet::from([6; 9])).unwrap();
        for (kind, score) in report.entries() {
            assert_eq!(score, 6.0);
            assert_eq!(report.level(kind), Level::VeryHigh);
        }
    }

    #[test]
    fn test_mixed_example() {
        // Q1, Q2, Q5 answered 6, everything else 0
        let responses: ResponseSet = [
            (1, 6),
            (2, 6),
            (3, 0),
            (4, 0),
            (5, 6),
            (6, 0),
            (7, 0),
            (8, 0),
            (9, 0),
        ]
        .into_iter()
        .collect();
        let report = compute_scores(&responses).unwrap();

        assert_eq!(report.vigor, 6.0);
        assert_eq!(report.dedication, 0.0);
        assert_eq!(report.absorption, 0.0);
        assert!(approx(report.overall, 2.0));

        assert_eq!(report.level(ScoreKind::Subscale(Subscale::Vigor)), Level::VeryHigh);
        assert_eq!(report.level(ScoreKind::Subscale(Subscale::Dedication)), Level::VeryLow);
        assert_eq!(report.level(ScoreKind::Subscale(Subscale::Absorption)), Level::VeryLow);
        assert_eq!(report.overall_level(), Level::Low);
    }

    #[test]
    fn test_subscales_use_their_own_items() {
        // Dedication items (3, 4, 7) = 3, Absorption (6, 8, 9) = 5, Vigor = 1
        let report = compute_scores(&ResponseSet::from([1, 1, 3, 3, 1, 5, 3, 5, 5])).unwrap();
        assert_eq!(report.vigor, 1.0);
        assert_eq!(report.dedication, 3.0);
        assert_eq!(report.absorption, 5.0);
        assert!(approx(report.overall, 3.0));
    }

    #[test]
    fn test_no_internal_rounding() {
        let report = compute_scores(&ResponseSet::from([1, 0, 0, 0, 0, 0, 0, 0, 0])).unwrap();
        assert!(approx(report.vigor, 1.0 / 3.0));
        assert!(approx(report.overall, 1.0 / 9.0));
    }

    #[test]
    fn test_idempotent() {
        let responses = ResponseSet::from([4, 2, 6, 1, 0, 3, 5, 2, 4]);
        let first = compute_scores(&responses).unwrap();
        let second = compute_scores(&responses).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scores_stay_in_range() {
        // Walk a spread of complete sets, including all extremes per position
        for seed in 0u32..500 {
            let mut values = [0u8; 9];
            for (i, v) in values.iter_mut().enumerate() {
                *v = ((seed / 7u32.pow(i as u32 % 3) + i as u32 * 3) % 7) as u8;
            }
            let report = compute_scores(&ResponseSet::from(values)).unwrap();
            for (_, score) in report.entries() {
                assert!((0.0..=6.0).contains(&score), "{} out of range", score);
            }
        }
    }

    #[test]
    fn test_incomplete_produces_no_report() {
        let mut responses = ResponseSet::from([3; 9]);
        responses.remove(8);
        let result = compute_scores(&responses);
        assert_eq!(
            result,
            Err(ScoringError::IncompleteResponse {
                missing: vec![8],
                invalid: vec![],
            })
        );
    }

    #[test]
    fn test_out_of_range_produces_no_report() {
        let mut responses = ResponseSet::from([3; 9]);
        responses.insert(1, 7);
        assert!(compute_scores(&responses).is_err());
    }

    #[test]
    fn test_entries_order() {
        let report = compute_scores(&ResponseSet::from([6, 6, 0, 0, 6, 0, 0, 0, 0])).unwrap();
        let kinds: Vec<ScoreKind> = report.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                ScoreKind::Overall,
                ScoreKind::Subscale(Subscale::Vigor),
                ScoreKind::Subscale(Subscale::Dedication),
                ScoreKind::Subscale(Subscale::Absorption),
            ]
        );
        assert_eq!(ScoreKind::Overall.name(Locale::En), "Overall");
    }
}
