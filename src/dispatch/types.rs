use super::{output_range, unit_cost, DispatchError, OutputRange};
use crate::domain::{Allocation, LoadRequest};

/// Slack allowed when comparing a load against summed plant bounds (MW)
pub const LOAD_TOLERANCE_MW: f64 = 1e-6;

/// A plant taking part in cost minimisation
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Position of the plant in the request
    pub index: usize,
    /// Unit cost (currency/MWh)
    pub cost: f64,
    pub range: OutputRange,
}

/// Per-plant (cost, range) pairs for one request, after the zero-wind carve-out.
///
/// When no wind is blowing every wind plant is pinned at 0 MW and kept out of
/// `candidates`; it still appears in the final allocation.
#[derive(Debug, Clone, Default)]
pub struct Supply {
    pub carved_out: Vec<usize>,
    pub candidates: Vec<Candidate>,
}

impl Supply {
    pub fn from_request(request: &LoadRequest) -> Self {
        let no_wind = request.fuels.wind_availability == 0;
        let mut supply = Supply::default();

        for (index, plant) in request.plants.iter().enumerate() {
            if no_wind && plant.kind.is_variable_resource() {
                supply.carved_out.push(index);
                continue;
            }
            supply.candidates.push(Candidate {
                index,
                cost: unit_cost(plant, &request.fuels),
                range: output_range(plant, &request.fuels),
            });
        }

        tracing::debug!(
            candidates = supply.candidates.len(),
            carved_out = supply.carved_out.len(),
            "prepared supply"
        );
        supply
    }

    /// Lowest total output the candidates can be dispatched at
    pub fn min_output(&self) -> f64 {
        self.candidates.iter().map(|c| c.range.lo).sum()
    }

    /// Highest total output the candidates can be dispatched at
    pub fn max_output(&self) -> f64 {
        self.candidates.iter().map(|c| c.range.hi).sum()
    }
}

/// Turn per-position set-points into allocations in request order
pub fn assemble(request: &LoadRequest, powers: &[f64]) -> Vec<Allocation> {
    request
        .plants
        .iter()
        .zip(powers)
        .map(|(plant, &power)| Allocation::new(plant.name.clone(), power))
        .collect()
}

/// Total generation cost of an allocation (currency/h).
///
/// `allocations` must be in request order, as returned by the dispatchers.
pub fn total_cost(request: &LoadRequest, allocations: &[Allocation]) -> f64 {
    request
        .plants
        .iter()
        .zip(allocations)
        .map(|(plant, allocation)| unit_cost(plant, &request.fuels) * allocation.power)
        .sum()
}

/// A way of turning a load request into per-plant set-points
pub trait DispatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Dispatch an already validated request
    fn dispatch(&self, request: &LoadRequest) -> Result<Vec<Allocation>, DispatchError>;
}

pub struct Dispatcher {
    pub strategy: Box<dyn DispatchStrategy>,
}

impl Dispatcher {
    pub fn new(strategy: impl DispatchStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Validate `request`, then run the strategy on it
    pub fn dispatch(&self, request: &LoadRequest) -> Result<Vec<Allocation>, DispatchError> {
        request.validate()?;
        let allocations = self.strategy.dispatch(request)?;
        tracing::debug!(
            strategy = self.name(),
            plants = allocations.len(),
            total_cost = total_cost(request, &allocations),
            "dispatch complete"
        );
        Ok(allocations)
    }
}
