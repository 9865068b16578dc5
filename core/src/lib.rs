//! Deterministic Monte Carlo demand simulation.
//!
//! A linear congruential generator drives an inverse-CDF lookup against
//! a user-supplied discrete demand distribution.

pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod report;
pub mod rng;
pub mod types;

pub use config::{InputLimits, SimulationConfig};
pub use distribution::{CumulativeTable, DemandPoint, DistributionSpec, NormalizationOutcome};
pub use engine::{simulate, DayRecord, RunStatistics, SimEngine, SimulationRun};
pub use error::{SimError, SimResult};
pub use report::SimulationReport;
pub use rng::{generate, LcgParams, LcgSequence};
