//! Delivery route ordering with a hybrid metaheuristic.
//!
//! Orders a set of delivery destinations into a single visiting sequence
//! that minimizes a weighted combination of operating cost and customer
//! dissatisfaction:
//!
//! - **QPSO-SA** ([`qpso`]): a quantum-behaved particle swarm over
//!   real-valued position vectors, decoded to orders with the
//!   smallest-position-value rule, with Metropolis acceptance and
//!   geometric cooling on every move.
//! - **Fuzzy satisfaction** ([`fuzzy`]): Mamdani inference mapping an
//!   arrival-time deviation and a quality score to a 0 to 10
//!   satisfaction value. Usable on its own.
//! - **Cost oracle** ([`oracle`]): the narrow contract to external
//!   forecasting models, with fallback estimates and a closed-form
//!   heuristic implementation.
//!
//! # Architecture
//!
//! The crate contains no I/O. Forecasting models, persistence and any
//! network surface live with the caller and plug in through
//! [`oracle::CostOracle`].

pub mod error;
pub mod fuzzy;
pub mod oracle;
pub mod qpso;

pub use error::{OracleError, QpsoError};
