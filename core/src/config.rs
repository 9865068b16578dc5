use crate::{
    distribution::DistributionSpec,
    error::{SimError, SimResult},
    rng::LcgParams,
    types::Day,
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Everything one simulation needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub lcg: LcgParams,
    pub days: Day,
    pub distribution: DistributionSpec,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lcg: LcgParams::new(35, 13, 7, 100),
            days: 10,
            distribution: DistributionSpec::default(),
        }
    }
}

impl SimulationConfig {
    /// Load a JSON config file. Missing fields are not defaulted.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: SimulationConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        log::debug!(
            "loaded config from {}: {} days, {} demand points",
            path.display(),
            config.days,
            config.distribution.len()
        );
        Ok(config)
    }

    /// Replace the distribution with the default one of `count` points.
    pub fn with_demand_count(mut self, count: usize) -> Self {
        self.distribution = DistributionSpec::resized(count);
        self
    }

    /// Check every input against `limits`.
    pub fn validate_limits(&self, limits: &InputLimits) -> SimResult<()> {
        check("seed", self.lcg.seed, &limits.seed)?;
        check("multiplier", self.lcg.multiplier, &limits.multiplier)?;
        check("increment", self.lcg.increment, &limits.increment)?;
        check("modulus", self.lcg.modulus, &limits.modulus)?;
        check("days", u64::from(self.days), &limits.days)?;

        let count = self.distribution.len();
        if !limits.demand_points.contains(&count) {
            return Err(SimError::invalid_distribution(format!(
                "{count} demand points outside {}..={}",
                limits.demand_points.start(),
                limits.demand_points.end()
            )));
        }
        Ok(())
    }

    /// Config with hardcoded values for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            days: 6,
            ..Self::default()
        }
    }
}

fn check(name: &str, value: u64, range: &RangeInclusive<u64>) -> SimResult<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SimError::invalid_params(format!(
            "{name} = {value} outside {}..={}",
            range.start(),
            range.end()
        )))
    }
}

/// Input bounds of the interactive front end. The engine itself only
/// needs modulus >= 2 and days >= 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLimits {
    pub seed: RangeInclusive<u64>,
    pub multiplier: RangeInclusive<u64>,
    pub increment: RangeInclusive<u64>,
    pub modulus: RangeInclusive<u64>,
    pub days: RangeInclusive<u64>,
    pub demand_points: RangeInclusive<usize>,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            seed: 0..=10_000,
            multiplier: 1..=1_000,
            increment: 0..=1_000,
            modulus: 2..=10_000,
            days: 1..=100,
            demand_points: 2..=10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_limits() {
        SimulationConfig::default()
            .validate_limits(&InputLimits::default())
            .unwrap();
    }

    #[test]
    fn out_of_range_params_are_rejected() {
        let mut config = SimulationConfig::default();
        config.lcg.multiplier = 0;
        let err = config.validate_limits(&InputLimits::default()).unwrap_err();
        assert!(matches!(err, SimError::InvalidParams { .. }));

        let mut config = SimulationConfig::default();
        config.days = 101;
        let err = config.validate_limits(&InputLimits::default()).unwrap_err();
        assert!(err.to_string().contains("days"), "{err}");
    }

    #[test]
    fn too_many_demand_points_are_rejected() {
        let config = SimulationConfig::default().with_demand_count(11);
        let err = config.validate_limits(&InputLimits::default()).unwrap_err();
        assert!(matches!(err, SimError::InvalidDistribution { .. }));
    }

    #[test]
    fn parses_json() {
        let json = r#"{
            "lcg": {"seed": 1, "multiplier": 5, "increment": 3, "modulus": 16},
            "days": 12,
            "distribution": [
                {"demand": 1, "probability": 0.25},
                {"demand": 2, "probability": 0.75}
            ]
        }"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.lcg, LcgParams::new(1, 5, 3, 16));
        assert_eq!(config.days, 12);
        assert_eq!(config.distribution.demands(), vec![1.0, 2.0]);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SimulationConfig::load("/nonexistent/demand.json").unwrap_err();
        assert!(err.to_string().contains("Cannot read"), "{err}");
    }
}
