//! Mamdani inference over the satisfaction rule base.

use super::membership::MembershipFn;
use super::rules::{QualityTerm, SatisfactionTerm, TimeTerm, RULES};
use rayon::prelude::*;

/// Satisfaction returned when no rule fires at all.
pub const NEUTRAL_SATISFACTION: f64 = 5.0;

/// Membership degrees of one (time deviation, quality score) input pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Memberships {
    /// Indexed by [`TimeTerm`] discriminant.
    pub time: [f64; 5],
    /// Indexed by [`QualityTerm`] discriminant.
    pub quality: [f64; 3],
}

impl Memberships {
    pub fn time_degree(&self, term: TimeTerm) -> f64 {
        self.time[term as usize]
    }

    pub fn quality_degree(&self, term: QualityTerm) -> f64 {
        self.quality[term as usize]
    }
}

/// A fuzzy term set plus the fixed rule base.
///
/// The engine is immutable; [`FuzzyEngine::STANDARD`] holds the break
/// points the rest of the crate is calibrated against.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyEngine {
    time_terms: [MembershipFn; 5],
    quality_terms: [MembershipFn; 3],
}

impl FuzzyEngine {
    /// Standard term set.
    ///
    /// Time deviation (minutes): very early at or below -45 fading out by -30,
    /// early -45/-30/-15, punctual -20/0/20, late 15/30/45, very late from 30
    /// saturating at 45 and beyond. Quality (0 to 100): poor plateau 0..40
    /// fading by 60, good 40/60/80, excellent plateau 90..100.
    pub const STANDARD: FuzzyEngine = FuzzyEngine {
        time_terms: [
            MembershipFn::LeftShoulder { c: -45.0, d: -30.0 },
            MembershipFn::Triangle {
                a: -45.0,
                b: -30.0,
                c: -15.0,
            },
            MembershipFn::Triangle {
                a: -20.0,
                b: 0.0,
                c: 20.0,
            },
            MembershipFn::Triangle {
                a: 15.0,
                b: 30.0,
                c: 45.0,
            },
            MembershipFn::RightShoulder { a: 30.0, b: 45.0 },
        ],
        quality_terms: [
            MembershipFn::Trapezoid {
                a: -1.0,
                b: 0.0,
                c: 40.0,
                d: 60.0,
            },
            MembershipFn::Triangle {
                a: 40.0,
                b: 60.0,
                c: 80.0,
            },
            MembershipFn::Trapezoid {
                a: 70.0,
                b: 90.0,
                c: 100.0,
                d: 101.0,
            },
        ],
    };

    /// Builds an engine with custom membership shapes, indexed by term discriminant.
    pub fn new(time_terms: [MembershipFn; 5], quality_terms: [MembershipFn; 3]) -> Self {
        Self {
            time_terms,
            quality_terms,
        }
    }

    /// Fuzzifies both inputs.
    pub fn memberships(&self, time_deviation: f64, quality_score: f64) -> Memberships {
        Memberships {
            time: self.time_terms.map(|f| f.degree(time_deviation)),
            quality: self.quality_terms.map(|f| f.degree(quality_score)),
        }
    }

    /// Max-aggregated rule firing strength per output term (min for AND).
    pub fn firing_strengths(&self, time_deviation: f64, quality_score: f64) -> [f64; 5] {
        let mu = self.memberships(time_deviation, quality_score);
        let mut strengths = [0.0f64; 5];
        for rule in RULES.iter() {
            let fired = mu.time_degree(rule.time).min(mu.quality_degree(rule.quality));
            let slot = &mut strengths[rule.output as usize];
            *slot = slot.max(fired);
        }
        strengths
    }

    /// Crisp satisfaction in `[0, 10]` by centroid defuzzification.
    pub fn compute(&self, time_deviation: f64, quality_score: f64) -> f64 {
        let strengths = self.firing_strengths(time_deviation, quality_score);

        let (numerator, denominator) = SatisfactionTerm::ALL
            .iter()
            .zip(strengths.iter())
            .fold((0.0, 0.0), |(num, den), (term, &w)| {
                (num + w * term.centroid(), den + w)
            });

        if denominator <= 0.0 {
            return NEUTRAL_SATISFACTION;
        }
        numerator / denominator
    }
}

impl Default for FuzzyEngine {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Scores one delivery with the standard engine.
///
/// `time_deviation` is actual minus promised arrival in minutes (negative
/// means early); `quality_score` ranges over 0 to 100.
///
/// # Examples
///
/// ```
/// use qpso_route::fuzzy::compute_satisfaction;
///
/// let on_time = compute_satisfaction(0.0, 100.0);
/// assert!(on_time >= 8.0);
/// ```
pub fn compute_satisfaction(time_deviation: f64, quality_score: f64) -> f64 {
    FuzzyEngine::STANDARD.compute(time_deviation, quality_score)
}

/// A historical delivery to be scored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRecord {
    pub time_deviation: f64,
    pub quality_score: f64,
}

/// Scores a batch of records with the standard engine, preserving order.
pub fn score_records(records: &[DeliveryRecord]) -> Vec<f64> {
    records
        .par_iter()
        .map(|r| compute_satisfaction(r.time_deviation, r.quality_score))
        .collect()
}
