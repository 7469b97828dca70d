use utoipa::OpenApi;

use crate::api::dto::{
    CalculationResultDto, HouseholdInfoDto, MountingConditionsDto, PvConfigDto, UserResponseDto,
};
use crate::domain::{Direction, PvConfig};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::home::generate_user,
        crate::api::home::list_pv_configs,
        crate::api::home::get_user,
        crate::api::home::update_household_info,
        crate::api::home::update_mounting_conditions,
        crate::api::home::calculate_result,
    ),
    components(
        schemas(
            UserResponseDto,
            HouseholdInfoDto,
            MountingConditionsDto,
            CalculationResultDto,
            PvConfigDto,
            PvConfig,
            Direction
        )
    ),
    tags((name = "home", description = "PV yield & savings estimator"))
)]
pub struct ApiDoc;
