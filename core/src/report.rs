//! Serializable summary of one simulation for display or export.

use crate::{
    config::SimulationConfig,
    distribution::{DistributionRow, NormalizationOutcome},
    engine::{RunStatistics, SimEngine, SimulationRun},
    error::SimResult,
    rng::LcgParams,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub params: LcgParams,
    pub normalization: NormalizationOutcome,
    pub distribution: Vec<DistributionRow>,
    pub run: SimulationRun,
    pub statistics: RunStatistics,
}

impl SimulationReport {
    pub fn build(config: &SimulationConfig) -> SimResult<Self> {
        let engine = SimEngine::build(config.lcg, &config.distribution)?;
        let run = engine.run(config.days)?;
        Ok(Self::from_run(&engine, run))
    }

    pub fn from_run(engine: &SimEngine, run: SimulationRun) -> Self {
        Self {
            params: *engine.params(),
            normalization: engine.table().outcome(),
            distribution: engine.table().rows(),
            statistics: run.statistics(),
            run,
        }
    }

    pub fn to_json_pretty(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
