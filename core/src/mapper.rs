//! Inverse-CDF mapping from a uniform draw to a demand bucket.
//!
//! RULE: A draw belongs to the FIRST bucket whose cumulative probability
//! is >= the draw. A draw sitting exactly on a threshold goes to the
//! lower bucket. Comparisons use the rounded cumulative values.

use crate::{
    error::{SimError, SimResult},
    types::{Demand, Probability},
};

/// Index of the first threshold `u` does not exceed.
/// Falls back to the last index when `u` is above every threshold.
pub fn bucket_index(u: f64, cumulative: &[Probability]) -> usize {
    cumulative
        .iter()
        .position(|&cp| u <= cp)
        .unwrap_or_else(|| cumulative.len().saturating_sub(1))
}

/// Map `u` to a demand value using parallel `demands` and `cumulative` columns.
pub fn map_to_demand(u: f64, demands: &[Demand], cumulative: &[Probability]) -> SimResult<Demand> {
    if demands.is_empty() {
        return Err(SimError::invalid_distribution("no demand points"));
    }
    if demands.len() != cumulative.len() {
        return Err(SimError::invalid_distribution(format!(
            "{} demand values but {} cumulative probabilities",
            demands.len(),
            cumulative.len()
        )));
    }
    Ok(demands[bucket_index(u, cumulative)])
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMANDS: [Demand; 3] = [0.0, 10.0, 20.0];
    const CUMULATIVE: [Probability; 3] = [0.2, 0.7, 1.0];

    #[test]
    fn boundary_goes_to_lower_bucket() {
        assert_eq!(map_to_demand(0.2, &DEMANDS, &CUMULATIVE).unwrap(), 0.0);
        assert_eq!(map_to_demand(0.7, &DEMANDS, &CUMULATIVE).unwrap(), 10.0);
    }

    #[test]
    fn interior_values_map_to_next_bucket() {
        assert_eq!(map_to_demand(0.0, &DEMANDS, &CUMULATIVE).unwrap(), 0.0);
        assert_eq!(map_to_demand(0.21, &DEMANDS, &CUMULATIVE).unwrap(), 10.0);
        assert_eq!(map_to_demand(0.71, &DEMANDS, &CUMULATIVE).unwrap(), 20.0);
        assert_eq!(map_to_demand(0.9999, &DEMANDS, &CUMULATIVE).unwrap(), 20.0);
    }

    #[test]
    fn overshoot_falls_back_to_last_demand() {
        let cumulative = [0.2, 0.7, 0.9999];
        assert_eq!(map_to_demand(0.99995, &DEMANDS, &cumulative).unwrap(), 20.0);
        assert_eq!(bucket_index(5.0, &cumulative), 2);
    }

    #[test]
    fn zero_probability_bucket_is_skipped() {
        let demands = [1.0, 2.0, 3.0];
        let cumulative = [0.5, 0.5, 1.0];
        assert_eq!(map_to_demand(0.5, &demands, &cumulative).unwrap(), 1.0);
        assert_eq!(map_to_demand(0.51, &demands, &cumulative).unwrap(), 3.0);
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let err = map_to_demand(0.3, &DEMANDS, &[0.5, 1.0]).unwrap_err();
        assert!(matches!(err, SimError::InvalidDistribution { .. }));
        let err = map_to_demand(0.3, &[], &[]).unwrap_err();
        assert!(matches!(err, SimError::InvalidDistribution { .. }));
    }
}
