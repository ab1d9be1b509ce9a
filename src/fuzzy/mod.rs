//! Fuzzy customer-satisfaction scoring.
//!
//! Converts an arrival-time deviation and a delivered-goods quality score
//! into a crisp 0 to 10 satisfaction value with Mamdani inference: min for
//! rule conjunction, max aggregation per output term, and centroid
//! defuzzification over fixed term representatives (1, 3, 5, 7, 9).
//!
//! The engine is side-effect free and usable on its own, e.g. for scoring
//! historical delivery records with [`score_records`].
//!
//! # References
//!
//! - Mamdani & Assilian (1975), "An experiment in linguistic synthesis
//!   with a fuzzy logic controller"

mod engine;
mod membership;
mod rules;

pub use engine::{
    compute_satisfaction, score_records, DeliveryRecord, FuzzyEngine, Memberships,
    NEUTRAL_SATISFACTION,
};
pub use membership::MembershipFn;
pub use rules::{QualityTerm, Rule, SatisfactionTerm, TimeTerm, RULES};
