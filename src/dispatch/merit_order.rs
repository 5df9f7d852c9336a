use itertools::Itertools;
use ordered_float::OrderedFloat;

use super::{assemble, DispatchError, DispatchStrategy, OutputRange, Supply, LOAD_TOLERANCE_MW};
use crate::domain::{Allocation, LoadRequest};

/// Greedy merit-order dispatcher:
/// - Plants are walked from cheapest to most expensive unit cost
/// - Each plant takes as much of the remaining load as its range allows
/// - A plant whose minimum output exceeds the remaining load stays off
///
/// Fast, but neither load-matching nor cost-optimality is guaranteed; the
/// linear-program dispatcher is the authoritative strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeritOrderDispatcher;

impl DispatchStrategy for MeritOrderDispatcher {
    fn name(&self) -> &'static str {
        "merit-order"
    }

    fn dispatch(&self, request: &LoadRequest) -> Result<Vec<Allocation>, DispatchError> {
        Ok(dispatch_heuristic(request))
    }
}

/// Set-point for a plant given the load still to cover
pub fn assign_power(range: OutputRange, remaining_load: f64) -> f64 {
    if remaining_load < range.lo {
        0.0
    } else if remaining_load < range.hi {
        remaining_load
    } else {
        range.hi
    }
}

/// Fill the load cheapest-first. Equal costs keep their request order.
///
/// Always returns one allocation per plant, in request order, even when the
/// fleet cannot match the load exactly.
pub fn dispatch_heuristic(request: &LoadRequest) -> Vec<Allocation> {
    let supply = Supply::from_request(request);
    let mut powers = vec![0.0; request.plants.len()];
    let mut remaining_load = request.target_load;

    for candidate in supply
        .candidates
        .iter()
        .sorted_by_key(|c| OrderedFloat(c.cost))
    {
        let power = assign_power(candidate.range, remaining_load);
        powers[candidate.index] = power;
        remaining_load -= power;
    }

    if remaining_load.abs() > LOAD_TOLERANCE_MW {
        tracing::debug!(
            target_mw = request.target_load,
            unmatched_mw = remaining_load,
            "merit order did not match the load"
        );
    }

    assemble(request, &powers)
}
