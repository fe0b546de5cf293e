//! Candidate ranking and filtering policies.

use serde::Deserialize;

use crate::error::ResolveError;
use crate::models::Settlement;
use crate::resolve::state::RunState;

/// Closed population band used by `PopulationBandNearest`.
pub const POPULATION_BAND: std::ops::RangeInclusive<u64> = 20_000..=50_000;

/// How a winner is chosen among parsed candidates.
///
/// Configured once per run; the three variants reflect different stages
/// of the pipeline's evolution and keep working side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// The single globally nearest candidate, population ignored. If that
    /// one candidate is excluded or used, the point fails; there is no
    /// fallback to the next-nearest.
    NearestOnly,
    /// Nearest eligible candidate among those with a population inside
    /// the closed band. Candidates without a population value are dropped
    /// by the band filter.
    PopulationBandNearest,
    /// Largest population first (missing counts as zero), distance as the
    /// tie-break, first eligible name wins.
    PopulationThenDistance,
}

/// Pick the winning candidate, or a typed reason why none qualifies.
///
/// Pure with respect to `state`: recording the winner in the used set is
/// the caller's job once the point is finally accepted. Name comparisons
/// are case-insensitive.
pub fn select<'a>(
    candidates: &'a [Settlement],
    state: &RunState,
    policy: SelectionPolicy,
) -> Result<&'a Settlement, ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::NoSettlementsRecognized);
    }

    match policy {
        SelectionPolicy::NearestOnly => {
            let nearest = candidates
                .iter()
                .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
                .ok_or(ResolveError::NoSettlementsRecognized)?;
            if state.is_eligible(&nearest.name) {
                Ok(nearest)
            } else {
                Err(ResolveError::AllCandidatesExcluded)
            }
        }
        SelectionPolicy::PopulationBandNearest => {
            let mut band: Vec<&Settlement> = candidates
                .iter()
                .filter(|c| c.population.map_or(false, |p| POPULATION_BAND.contains(&p)))
                .collect();
            if band.is_empty() {
                return Err(ResolveError::NoPopulationBandMatch);
            }
            band.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
            band.into_iter()
                .find(|c| state.is_eligible(&c.name))
                .ok_or(ResolveError::AllCandidatesExcluded)
        }
        SelectionPolicy::PopulationThenDistance => {
            let mut ordered: Vec<&Settlement> = candidates.iter().collect();
            ordered.sort_by(|a, b| {
                b.population
                    .unwrap_or(0)
                    .cmp(&a.population.unwrap_or(0))
                    .then_with(|| a.distance_km.total_cmp(&b.distance_km))
            });
            ordered
                .into_iter()
                .find(|c| state.is_eligible(&c.name))
                .ok_or(ResolveError::AllCandidatesExcluded)
        }
    }
}
