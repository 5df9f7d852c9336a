use thiserror::Error;

/// Failures surfaced by the dispatchers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// Malformed request, rejected before any dispatch work
    #[error("invalid load request: {0}")]
    Validation(String),

    /// No allocation satisfies the load equality and the plant bounds
    #[error(
        "no feasible allocation: target load {target_mw} MW is outside the achievable range [{min_mw}, {max_mw}] MW"
    )]
    Infeasible {
        target_mw: f64,
        min_mw: f64,
        max_mw: f64,
    },

    /// The LP solver gave up or hit a numerical fault
    #[error("LP solver failed: {0}")]
    Solver(String),
}
