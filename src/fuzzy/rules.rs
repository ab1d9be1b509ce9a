//! Linguistic terms and the inference rule table.

/// Linguistic terms over the arrival-time deviation (minutes, actual minus promised).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeTerm {
    VeryEarly = 0,
    Early = 1,
    Punctual = 2,
    Late = 3,
    VeryLate = 4,
}

impl TimeTerm {
    pub const ALL: [TimeTerm; 5] = [
        TimeTerm::VeryEarly,
        TimeTerm::Early,
        TimeTerm::Punctual,
        TimeTerm::Late,
        TimeTerm::VeryLate,
    ];
}

/// Linguistic terms over the delivered-goods quality score (0 to 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityTerm {
    Poor = 0,
    Good = 1,
    Excellent = 2,
}

impl QualityTerm {
    pub const ALL: [QualityTerm; 3] = [QualityTerm::Poor, QualityTerm::Good, QualityTerm::Excellent];
}

/// Output terms over the satisfaction scale (0 to 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatisfactionTerm {
    VeryDissatisfied = 0,
    NotVerySatisfied = 1,
    Common = 2,
    MoreSatisfied = 3,
    GreatSatisfaction = 4,
}

impl SatisfactionTerm {
    pub const ALL: [SatisfactionTerm; 5] = [
        SatisfactionTerm::VeryDissatisfied,
        SatisfactionTerm::NotVerySatisfied,
        SatisfactionTerm::Common,
        SatisfactionTerm::MoreSatisfied,
        SatisfactionTerm::GreatSatisfaction,
    ];

    /// Representative value used during centroid defuzzification.
    pub fn centroid(self) -> f64 {
        match self {
            SatisfactionTerm::VeryDissatisfied => 1.0,
            SatisfactionTerm::NotVerySatisfied => 3.0,
            SatisfactionTerm::Common => 5.0,
            SatisfactionTerm::MoreSatisfied => 7.0,
            SatisfactionTerm::GreatSatisfaction => 9.0,
        }
    }
}

/// One `IF time IS t AND quality IS q THEN satisfaction IS s` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub time: TimeTerm,
    pub quality: QualityTerm,
    pub output: SatisfactionTerm,
}

const fn rule(time: TimeTerm, quality: QualityTerm, output: SatisfactionTerm) -> Rule {
    Rule {
        time,
        quality,
        output,
    }
}

use QualityTerm as Q;
use SatisfactionTerm as S;
use TimeTerm as T;

/// Complete rule base: every (time, quality) pair maps to exactly one output.
///
/// Poor quality always ends in `VeryDissatisfied` unless the delivery was
/// punctual. Off-time deliveries cap satisfaction at `MoreSatisfied`.
pub const RULES: [Rule; 15] = [
    rule(T::VeryEarly, Q::Excellent, S::NotVerySatisfied),
    rule(T::VeryEarly, Q::Good, S::NotVerySatisfied),
    rule(T::VeryEarly, Q::Poor, S::VeryDissatisfied),
    rule(T::Early, Q::Excellent, S::MoreSatisfied),
    rule(T::Early, Q::Good, S::Common),
    rule(T::Early, Q::Poor, S::VeryDissatisfied),
    rule(T::Punctual, Q::Excellent, S::GreatSatisfaction),
    rule(T::Punctual, Q::Good, S::GreatSatisfaction),
    rule(T::Punctual, Q::Poor, S::Common),
    rule(T::Late, Q::Excellent, S::MoreSatisfied),
    rule(T::Late, Q::Good, S::Common),
    rule(T::Late, Q::Poor, S::VeryDissatisfied),
    rule(T::VeryLate, Q::Excellent, S::NotVerySatisfied),
    rule(T::VeryLate, Q::Good, S::NotVerySatisfied),
    rule(T::VeryLate, Q::Poor, S::VeryDissatisfied),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rule_table_covers_every_pair_once() {
        let pairs: HashSet<(TimeTerm, QualityTerm)> =
            RULES.iter().map(|r| (r.time, r.quality)).collect();
        assert_eq!(pairs.len(), TimeTerm::ALL.len() * QualityTerm::ALL.len());
    }

    #[test]
    fn test_centroids_are_ordered() {
        for w in SatisfactionTerm::ALL.windows(2) {
            assert!(w[0].centroid() < w[1].centroid());
        }
    }
}
