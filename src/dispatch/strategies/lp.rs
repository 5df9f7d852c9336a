//! Linear-program dispatcher
//!
//! Exact cost-minimising dispatch. The formulation is the canonical economic
//! dispatch LP:
//! - minimise Σ cost_i · p_i
//! - subject to Σ p_i = target load
//! - and lo_i ≤ p_i ≤ hi_i for every plant
//!
//! Plants without controllable headroom (wind, or thermal plants with
//! pmin == pmax) are pinned at their only feasible value before the problem
//! is built; the remaining plants become bounded LP variables solved with the
//! pure-Rust simplex backend of `good_lp`.

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};

use crate::dispatch::{
    assemble, Candidate, DispatchError, DispatchStrategy, Supply, LOAD_TOLERANCE_MW,
};
use crate::domain::{Allocation, LoadRequest};

#[derive(Debug, Default, Clone, Copy)]
pub struct LinearProgramDispatcher;

impl DispatchStrategy for LinearProgramDispatcher {
    fn name(&self) -> &'static str {
        "linear-program"
    }

    fn dispatch(&self, request: &LoadRequest) -> Result<Vec<Allocation>, DispatchError> {
        dispatch_optimal(request)
    }
}

/// Cost-optimal allocation covering exactly the target load.
///
/// Fails with [`DispatchError::Infeasible`] when the load lies outside what
/// the fleet can deliver, and never returns a partial allocation.
pub fn dispatch_optimal(request: &LoadRequest) -> Result<Vec<Allocation>, DispatchError> {
    let supply = Supply::from_request(request);
    let target_mw = request.target_load;
    let min_mw = supply.min_output();
    let max_mw = supply.max_output();

    // With nothing left to dispatch only an exactly zero load is served
    let unserved = supply.candidates.is_empty() && target_mw != 0.0;
    if unserved
        || target_mw < min_mw - LOAD_TOLERANCE_MW
        || target_mw > max_mw + LOAD_TOLERANCE_MW
    {
        tracing::warn!(target_mw, min_mw, max_mw, "load outside achievable range");
        return Err(DispatchError::Infeasible {
            target_mw,
            min_mw,
            max_mw,
        });
    }

    let mut powers = vec![0.0; request.plants.len()];
    let (pinned, free): (Vec<&Candidate>, Vec<&Candidate>) =
        supply.candidates.iter().partition(|c| c.range.is_fixed());

    let mut residual_mw = target_mw;
    for candidate in &pinned {
        powers[candidate.index] = candidate.range.lo;
        residual_mw -= candidate.range.lo;
    }

    if !free.is_empty() {
        // Keep tolerance-level slack from the range check out of the LP
        let free_min: f64 = free.iter().map(|c| c.range.lo).sum();
        let free_max: f64 = free.iter().map(|c| c.range.hi).sum();
        let residual_mw = residual_mw.clamp(free_min, free_max);

        let solved = solve(&free, residual_mw).map_err(|e| match e {
            ResolutionError::Infeasible => {
                tracing::warn!(target_mw, "solver reported the dispatch infeasible");
                DispatchError::Infeasible {
                    target_mw,
                    min_mw,
                    max_mw,
                }
            }
            other => {
                tracing::error!(error = %other, "LP solve failed");
                DispatchError::Solver(other.to_string())
            }
        })?;

        for (candidate, value) in free.iter().zip(solved) {
            powers[candidate.index] = candidate.range.snap(value);
        }
    }

    tracing::debug!(
        target_mw,
        pinned = pinned.len(),
        variables = free.len(),
        "optimal dispatch solved"
    );
    Ok(assemble(request, &powers))
}

fn solve(free: &[&Candidate], residual_mw: f64) -> Result<Vec<f64>, ResolutionError> {
    let mut problem = ProblemVariables::new();

    // p[i] = output of the i-th free plant (MW)
    let outputs: Vec<Variable> = free
        .iter()
        .map(|c| problem.add(variable().min(c.range.lo).max(c.range.hi)))
        .collect();

    let objective = free
        .iter()
        .zip(&outputs)
        .map(|(c, &p)| p * c.cost)
        .sum::<Expression>();
    let total_output = outputs
        .iter()
        .map(|&p| Expression::from(p))
        .sum::<Expression>();

    let solution = problem
        .minimise(objective)
        .using(microlp)
        .with(constraint!(total_output == residual_mw))
        .solve()?;

    Ok(outputs.iter().map(|&p| solution.value(p)).collect())
}
