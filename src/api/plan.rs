use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use crate::{
    api::{error::ApiError, payload::LoadPayload},
    controller::AppState,
    domain::{Allocation, LoadRequest},
};

/// Parse and check a wire payload into a dispatchable request
fn into_request(payload: Result<Json<LoadPayload>, JsonRejection>) -> Result<LoadRequest, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let request = LoadRequest::from(payload);
    request.validate()?;
    Ok(request)
}

/// POST /productionplan - Merit-order dispatch
///
/// Always answers with one set-point per plant; the load may not be matched
/// exactly.
pub async fn production_plan(
    State(st): State<AppState>,
    payload: Result<Json<LoadPayload>, JsonRejection>,
) -> Result<Json<Vec<Allocation>>, ApiError> {
    let request = into_request(payload)?;
    tracing::info!(
        load_mw = request.target_load,
        plants = request.plants.len(),
        "merit-order production plan requested"
    );
    let allocations = st.controller.dispatch_heuristic(&request)?;
    Ok(Json(allocations))
}

/// POST /productionplanlinprog - Cost-optimal dispatch
pub async fn production_plan_linprog(
    State(st): State<AppState>,
    payload: Result<Json<LoadPayload>, JsonRejection>,
) -> Result<Json<Vec<Allocation>>, ApiError> {
    let request = into_request(payload)?;
    tracing::info!(
        load_mw = request.target_load,
        plants = request.plants.len(),
        "optimal production plan requested"
    );
    let allocations = st.controller.dispatch_optimal(request).await?;
    Ok(Json(allocations))
}
