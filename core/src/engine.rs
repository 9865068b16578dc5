//! The simulation engine: one demand draw per simulated day.
//!
//! EXECUTION ORDER (fixed):
//!   1. Normalize the distribution  -> InvalidDistribution
//!   2. Build the cumulative table
//!   3. Validate LCG params and day count -> InvalidParams
//!   4. Generate raw values, scale to uniforms, map to demand
//!   5. Assemble the run, days numbered from 1
//!
//! RULES:
//!   - Distribution errors surface before any LCG work.
//!   - A run is a pure function of (params, distribution, days).
//!   - A finished `SimulationRun` is never mutated. Statistics are
//!     read-only projections computed on demand.

use crate::{
    distribution::{CumulativeTable, DistributionSpec},
    error::{SimError, SimResult},
    rng::{self, LcgParams},
    types::{round_to, Day, Demand},
};
use serde::Serialize;

/// Days averaged for the short-horizon mean.
pub const SHORT_HORIZON_DAYS: usize = 6;

/// The day singled out in run summaries.
pub const SPOTLIGHT_DAY: Day = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub day: Day,
    pub raw_value: u64,
    pub uniform: f64,
    pub demand: Demand,
}

impl DayRecord {
    /// Uniform rounded to 4 decimals, for tables.
    pub fn uniform_rounded(&self) -> f64 {
        round_to(self.uniform, 4)
    }
}

/// The ordered result of one simulation. Always holds at least one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimulationRun {
    days: Vec<DayRecord>,
}

impl SimulationRun {
    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn demands(&self) -> impl Iterator<Item = Demand> + '_ {
        self.days.iter().map(|d| d.demand)
    }

    /// Mean demand of the first `k` days, or `None` if the run is shorter.
    pub fn mean_first(&self, k: usize) -> Option<f64> {
        if k == 0 || self.days.len() < k {
            return None;
        }
        Some(self.demands().take(k).sum::<f64>() / k as f64)
    }

    /// Mean of the first six days. `None` for runs under six days.
    pub fn mean_first_six(&self) -> Option<f64> {
        self.mean_first(SHORT_HORIZON_DAYS)
    }

    /// Mean demand over the whole run.
    pub fn mean_demand(&self) -> f64 {
        self.mean_first(self.days.len()).unwrap_or(0.0)
    }

    /// Demand on a 1-indexed day.
    pub fn demand_on_day(&self, day: Day) -> Option<Demand> {
        let index = usize::try_from(day).ok()?.checked_sub(1)?;
        self.days.get(index).map(|d| d.demand)
    }

    pub fn day_five_demand(&self) -> Option<Demand> {
        self.demand_on_day(SPOTLIGHT_DAY)
    }

    pub fn statistics(&self) -> RunStatistics {
        RunStatistics {
            days: self.days.len(),
            average_first_six: self.mean_first_six(),
            average_all: self.mean_demand(),
            day_five_demand: self.day_five_demand(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunStatistics {
    pub days: usize,
    pub average_first_six: Option<f64>,
    pub average_all: f64,
    pub day_five_demand: Option<Demand>,
}

/// A validated distribution bound to LCG parameters, ready to run.
#[derive(Debug, Clone)]
pub struct SimEngine {
    params: LcgParams,
    table: CumulativeTable,
}

impl SimEngine {
    /// Normalize the distribution, then check the params.
    pub fn build(params: LcgParams, spec: &DistributionSpec) -> SimResult<Self> {
        let table = CumulativeTable::from_spec(spec)?;
        params.validate()?;
        Ok(Self { params, table })
    }

    pub fn params(&self) -> &LcgParams {
        &self.params
    }

    pub fn table(&self) -> &CumulativeTable {
        &self.table
    }

    /// Simulate `days` days. Each call starts again from the seed.
    pub fn run(&self, days: Day) -> SimResult<SimulationRun> {
        if days < 1 {
            return Err(SimError::invalid_params("day count must be >= 1"));
        }

        log::debug!(
            "simulating {days} days: seed={} a={} c={} m={} buckets={}",
            self.params.seed,
            self.params.multiplier,
            self.params.increment,
            self.params.modulus,
            self.table.len(),
        );

        let days_out: Vec<DayRecord> = rng::generate(self.params, days as usize)?
            .with_uniforms()
            .zip(1..)
            .map(|((raw_value, uniform), day)| DayRecord {
                day,
                raw_value,
                uniform,
                demand: self.table.lookup(uniform),
            })
            .collect();

        let run = SimulationRun { days: days_out };
        log::info!(
            "simulated {} days: mean demand {:.2}",
            run.len(),
            run.mean_demand()
        );
        Ok(run)
    }
}

/// Build and run in one step.
pub fn simulate(params: LcgParams, spec: &DistributionSpec, days: Day) -> SimResult<SimulationRun> {
    SimEngine::build(params, spec)?.run(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_engine() -> SimEngine {
        SimEngine::build(LcgParams::new(35, 13, 7, 100), &DistributionSpec::default()).unwrap()
    }

    #[test]
    fn days_are_one_indexed() {
        let run = reference_engine().run(4).unwrap();
        let days: Vec<Day> = run.days().iter().map(|d| d.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4]);
    }

    #[test]
    fn zero_days_is_invalid() {
        let err = reference_engine().run(0).unwrap_err();
        assert!(matches!(err, SimError::InvalidParams { .. }));
    }

    #[test]
    fn distribution_error_wins_over_param_error() {
        let spec = DistributionSpec::from_columns(&[1.0, 2.0], &[0.0, 0.0]).unwrap();
        let err = simulate(LcgParams::new(1, 1, 1, 1), &spec, 0).unwrap_err();
        assert!(matches!(err, SimError::InvalidDistribution { .. }));
    }

    #[test]
    fn bad_modulus_rejected_at_build() {
        let err = SimEngine::build(LcgParams::new(1, 3, 1, 1), &DistributionSpec::default())
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidParams { .. }));
    }

    #[test]
    fn short_runs_omit_conditional_stats() {
        let run = reference_engine().run(4).unwrap();
        let stats = run.statistics();
        assert_eq!(stats.days, 4);
        assert_eq!(stats.average_first_six, None);
        assert_eq!(stats.day_five_demand, None);
    }

    #[test]
    fn demand_on_day_bounds() {
        let run = reference_engine().run(3).unwrap();
        assert_eq!(run.demand_on_day(0), None);
        assert_eq!(run.demand_on_day(1), Some(30.0));
        assert_eq!(run.demand_on_day(4), None);
    }

    #[test]
    fn uniform_rounding_for_display() {
        let record = DayRecord {
            day: 1,
            raw_value: 2,
            uniform: 2.0 / 3.0,
            demand: 0.0,
        };
        assert_eq!(record.uniform_rounded(), 0.6667);
    }
}
