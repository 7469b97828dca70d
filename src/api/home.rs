use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};

use super::dto::{HouseholdInfoDto, MountingConditionsDto, PvConfigDto, UserResponseDto};
use super::error::ApiError;
use super::extract::ValidatedJson;
use crate::controller::{AppState, EstimatorService};
use crate::domain::PvConfig;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(generate_user))
        .route("/pv-configs", get(list_pv_configs))
        .route("/:user_id", get(get_user))
        .route("/:user_id/info", put(update_household_info))
        .route("/:user_id/conditions", put(update_mounting_conditions))
        .route("/:user_id/result", post(calculate_result))
}

/// POST /api/home - Create an empty user record
#[cfg_attr(feature = "swagger", utoipa::path(
    post, path = "/api/home", tag = "home",
    responses((status = 200, body = UserResponseDto))
))]
pub async fn generate_user(State(st): State<AppState>) -> Result<Json<UserResponseDto>, ApiError> {
    let record = st.service.generate_user().await?;
    Ok(Json(record.into()))
}

/// GET /api/home/pv-configs - List the PV configuration catalog
#[cfg_attr(feature = "swagger", utoipa::path(
    get, path = "/api/home/pv-configs", tag = "home",
    responses((status = 200, body = [PvConfigDto]))
))]
pub async fn list_pv_configs() -> Json<Vec<PvConfigDto>> {
    Json(PvConfig::all().map(PvConfigDto::from).collect())
}

/// GET /api/home/:user_id - Fetch a user record
#[cfg_attr(feature = "swagger", utoipa::path(
    get, path = "/api/home/{user_id}", tag = "home",
    params(("user_id" = String, Path)),
    responses((status = 200, body = UserResponseDto), (status = 404))
))]
pub async fn get_user(
    State(st): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponseDto>, ApiError> {
    let id = EstimatorService::parse_user_id(&user_id)?;
    let record = st.service.get_user(id).await?;
    Ok(Json(record.into()))
}

/// PUT /api/home/:user_id/info - Replace the household info
#[cfg_attr(feature = "swagger", utoipa::path(
    put, path = "/api/home/{user_id}/info", tag = "home",
    params(("user_id" = String, Path)),
    request_body = HouseholdInfoDto,
    responses((status = 200, body = UserResponseDto), (status = 400), (status = 404))
))]
pub async fn update_household_info(
    State(st): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(body): ValidatedJson<HouseholdInfoDto>,
) -> Result<Json<UserResponseDto>, ApiError> {
    let id = EstimatorService::parse_user_id(&user_id)?;
    let record = st
        .service
        .update_household_info(id, body.into_domain()?)
        .await?;
    Ok(Json(record.into()))
}

/// PUT /api/home/:user_id/conditions - Replace the mounting conditions
#[cfg_attr(feature = "swagger", utoipa::path(
    put, path = "/api/home/{user_id}/conditions", tag = "home",
    params(("user_id" = String, Path)),
    request_body = MountingConditionsDto,
    responses((status = 200, body = UserResponseDto), (status = 400), (status = 404))
))]
pub async fn update_mounting_conditions(
    State(st): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(body): ValidatedJson<MountingConditionsDto>,
) -> Result<Json<UserResponseDto>, ApiError> {
    let id = EstimatorService::parse_user_id(&user_id)?;
    let record = st
        .service
        .update_mounting_conditions(id, body.into_domain()?)
        .await?;
    Ok(Json(record.into()))
}

/// POST /api/home/:user_id/result - Calculate yield and savings
#[cfg_attr(feature = "swagger", utoipa::path(
    post, path = "/api/home/{user_id}/result", tag = "home",
    params(("user_id" = String, Path)),
    responses((status = 200, body = UserResponseDto), (status = 400), (status = 404))
))]
pub async fn calculate_result(
    State(st): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponseDto>, ApiError> {
    let id = EstimatorService::parse_user_id(&user_id)?;
    let record = st.service.calculate_result(id).await?;
    Ok(Json(record.into()))
}
