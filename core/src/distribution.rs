//! Demand distributions: validation, normalization, and cumulative tables.
//!
//! A `CumulativeTable` is always derived from a `DistributionSpec`.
//! Any change to the distribution means building a new table; tables are never
//! patched in place.

use crate::{
    error::{SimError, SimResult},
    mapper,
    types::{round_to, Demand, Probability, CUMULATIVE_PRECISION, SUM_TOLERANCE},
};
use serde::{Deserialize, Serialize};

/// Demand values offered when a distribution is first sized.
pub const DEFAULT_DEMANDS: [Demand; 6] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];

/// Probabilities paired with `DEFAULT_DEMANDS`.
pub const DEFAULT_PROBABILITIES: [Probability; 6] = [0.01, 0.20, 0.15, 0.50, 0.12, 0.02];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub demand: Demand,
    pub probability: Probability,
}

/// Ordered `(demand, probability)` pairs as supplied by the caller.
/// Probabilities need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistributionSpec {
    pub points: Vec<DemandPoint>,
}

impl DistributionSpec {
    pub fn new(points: Vec<DemandPoint>) -> Self {
        Self { points }
    }

    /// Pair up parallel demand and probability columns.
    pub fn from_columns(demands: &[Demand], probabilities: &[Probability]) -> SimResult<Self> {
        if demands.len() != probabilities.len() {
            return Err(SimError::invalid_distribution(format!(
                "{} demand values but {} probabilities",
                demands.len(),
                probabilities.len()
            )));
        }
        let points = demands
            .iter()
            .zip(probabilities)
            .map(|(&demand, &probability)| DemandPoint { demand, probability })
            .collect();
        Ok(Self { points })
    }

    /// Default distribution with `count` points.
    ///
    /// Demands are padded with 0 and probabilities with `1/count` rounded
    /// to two decimals, then both are cut to `count`. The result usually
    /// needs renormalizing, which happens when the table is built.
    pub fn resized(count: usize) -> Self {
        let filler = if count == 0 {
            0.0
        } else {
            round_to(1.0 / count as f64, 2)
        };
        let points = (0..count)
            .map(|i| DemandPoint {
                demand: DEFAULT_DEMANDS.get(i).copied().unwrap_or(0.0),
                probability: DEFAULT_PROBABILITIES.get(i).copied().unwrap_or(filler),
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn demands(&self) -> Vec<Demand> {
        self.points.iter().map(|p| p.demand).collect()
    }

    pub fn probabilities(&self) -> Vec<Probability> {
        self.points.iter().map(|p| p.probability).collect()
    }
}

impl Default for DistributionSpec {
    fn default() -> Self {
        Self::resized(DEFAULT_DEMANDS.len())
    }
}

/// Whether normalization had to rescale the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizationOutcome {
    Unchanged,
    Rescaled { original_sum: f64 },
}

impl NormalizationOutcome {
    pub fn was_rescaled(&self) -> bool {
        matches!(self, Self::Rescaled { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub probabilities: Vec<Probability>,
    pub outcome: NormalizationOutcome,
}

/// Rescale `probabilities` to sum to 1.
///
/// Fails on an empty list, on negative or non-finite entries, when the
/// sum is exactly zero, and when the sum overflows. A sum further than `SUM_TOLERANCE` from 1 is
/// rescaled and reported as a warning, not an error.
pub fn normalize(probabilities: &[Probability]) -> SimResult<Normalized> {
    if probabilities.is_empty() {
        return Err(SimError::invalid_distribution("no demand points"));
    }
    if let Some((i, p)) = probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        return Err(SimError::invalid_distribution(format!(
            "probability {} at position {} must be finite and non-negative",
            p,
            i + 1
        )));
    }

    let sum: f64 = probabilities.iter().sum();
    if sum == 0.0 {
        return Err(SimError::invalid_distribution(
            "probabilities cannot all be zero",
        ));
    }
    if !sum.is_finite() {
        return Err(SimError::invalid_distribution(format!(
            "probabilities sum to {sum}, which cannot be normalized"
        )));
    }

    if (sum - 1.0).abs() > SUM_TOLERANCE {
        log::warn!("probabilities sum to {sum:.2}; normalizing automatically");
        return Ok(Normalized {
            probabilities: probabilities.iter().map(|p| p / sum).collect(),
            outcome: NormalizationOutcome::Rescaled { original_sum: sum },
        });
    }

    Ok(Normalized {
        probabilities: probabilities.to_vec(),
        outcome: NormalizationOutcome::Unchanged,
    })
}

/// Running sums of `probabilities`, each rounded to `CUMULATIVE_PRECISION`
/// digits. The unrounded sum is carried forward; only stored values are
/// rounded.
pub fn build_cumulative(probabilities: &[Probability]) -> Vec<Probability> {
    probabilities
        .iter()
        .scan(0.0, |running, p| {
            *running += p;
            Some(round_to(*running, CUMULATIVE_PRECISION))
        })
        .collect()
}

/// One display row of a prepared distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionRow {
    pub demand: Demand,
    pub probability: Probability,
    pub cumulative: Probability,
}

/// A normalized distribution and its cumulative thresholds.
///
/// Invariants: non-empty; all three columns have equal length;
/// `cumulative` is non-decreasing and ends within 1e-4 of 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeTable {
    demands: Vec<Demand>,
    probabilities: Vec<Probability>,
    cumulative: Vec<Probability>,
    outcome: NormalizationOutcome,
}

impl CumulativeTable {
    pub fn from_spec(spec: &DistributionSpec) -> SimResult<Self> {
        let normalized = normalize(&spec.probabilities())?;
        let cumulative = build_cumulative(&normalized.probabilities);
        Ok(Self {
            demands: spec.demands(),
            probabilities: normalized.probabilities,
            cumulative,
            outcome: normalized.outcome,
        })
    }

    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    pub fn probabilities(&self) -> &[Probability] {
        &self.probabilities
    }

    pub fn cumulative(&self) -> &[Probability] {
        &self.cumulative
    }

    pub fn outcome(&self) -> NormalizationOutcome {
        self.outcome
    }

    pub fn len(&self) -> usize {
        self.demands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demands.is_empty()
    }

    pub fn rows(&self) -> Vec<DistributionRow> {
        self.demands
            .iter()
            .zip(&self.probabilities)
            .zip(&self.cumulative)
            .map(|((&demand, &probability), &cumulative)| DistributionRow {
                demand,
                probability,
                cumulative,
            })
            .collect()
    }

    /// Inverse-CDF lookup of a uniform draw.
    pub fn lookup(&self, u: f64) -> Demand {
        self.demands[mapper::bucket_index(u, &self.cumulative)]
    }
}
