//! Request/response bodies of the HTTP API and their mapping to the domain.
//!
//! This is the presentation boundary: every floating-point figure leaving
//! the service is rounded to one decimal here and rates are rendered as
//! percentages.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::ApiError;
use crate::domain::{Direction, HouseholdInfo, MountingConditions, PvConfig, UserRecord};
use crate::engine::rounding::round1;
use crate::engine::{CalculationResult, NEVER_AMORTISES};

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInfoDto {
    #[validate(required, range(min = 1, max = 100))]
    pub electricity_rate_cents: Option<i64>,
    #[validate(required, range(min = 1, max = 20))]
    pub household_size: Option<i64>,
    #[validate(required, range(min = 1, max = 100000))]
    pub annual_consumption_kwh: Option<i64>,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MountingConditionsDto {
    #[validate(required)]
    pub pv_config: Option<PvConfig>,
    #[validate(required, range(min = 0, max = 90))]
    pub tilt_angle_deg: Option<i64>,
    #[validate(required)]
    pub direction: Option<Direction>,
    #[validate(required, range(min = 0.0, max = 1.0))]
    pub shade_factor: Option<f64>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{field} is required")))
}

fn narrow<T: TryFrom<i64>>(value: i64, field: &str) -> Result<T, ApiError> {
    T::try_from(value).map_err(|_| ApiError::BadRequest(format!("{field} is out of range")))
}

impl HouseholdInfoDto {
    pub fn into_domain(self) -> Result<HouseholdInfo, ApiError> {
        Ok(HouseholdInfo {
            electricity_rate_cents: narrow(
                required(self.electricity_rate_cents, "electricityRateCents")?,
                "electricityRateCents",
            )?,
            household_size: narrow(required(self.household_size, "householdSize")?, "householdSize")?,
            annual_consumption_kwh: narrow(
                required(self.annual_consumption_kwh, "annualConsumptionKwh")?,
                "annualConsumptionKwh",
            )?,
        })
    }
}

impl From<HouseholdInfo> for HouseholdInfoDto {
    fn from(info: HouseholdInfo) -> Self {
        Self {
            electricity_rate_cents: Some(i64::from(info.electricity_rate_cents)),
            household_size: Some(i64::from(info.household_size)),
            annual_consumption_kwh: Some(i64::from(info.annual_consumption_kwh)),
        }
    }
}

impl MountingConditionsDto {
    pub fn into_domain(self) -> Result<MountingConditions, ApiError> {
        Ok(MountingConditions {
            pv_config: required(self.pv_config, "pvConfig")?,
            tilt_angle_deg: narrow(required(self.tilt_angle_deg, "tiltAngleDeg")?, "tiltAngleDeg")?,
            direction: required(self.direction, "direction")?,
            shade_factor: required(self.shade_factor, "shadeFactor")?,
        })
    }
}

impl From<MountingConditions> for MountingConditionsDto {
    fn from(conditions: MountingConditions) -> Self {
        Self {
            pv_config: Some(conditions.pv_config),
            tilt_angle_deg: Some(i64::from(conditions.tilt_angle_deg)),
            direction: Some(conditions.direction),
            shade_factor: Some(conditions.shade_factor),
        }
    }
}

fn percent(rate: f64) -> f64 {
    round1(rate * 100.0)
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResultDto {
    pub possible_electricity_generation_kwh: i64,
    pub possible_savings_eur: i64,
    /// False when savings never cover the installation cost
    pub amortises: bool,
    pub amortisation_years: f64,
    pub lifetime_yield_kwh: f64,
    pub co2_savings_kg_per_year: f64,
    pub self_consumption_percent: f64,
    pub autarky_percent: f64,
    pub daily_yield_kwh: f64,
    pub daily_savings_eur: f64,
    pub homeoffice_coverage_percent: f64,
    #[serde(rename = "dailyEBikeRangeKm")]
    pub daily_ebike_range_km: f64,
    #[serde(rename = "dailyECarRangeKm")]
    pub daily_ecar_range_km: f64,
}

impl From<CalculationResult> for CalculationResultDto {
    fn from(r: CalculationResult) -> Self {
        Self {
            possible_electricity_generation_kwh: r.possible_electricity_generation_kwh,
            possible_savings_eur: r.possible_savings_eur,
            amortises: r.amortisation_years != NEVER_AMORTISES,
            amortisation_years: round1(r.amortisation_years),
            lifetime_yield_kwh: round1(r.lifetime_yield_kwh),
            co2_savings_kg_per_year: round1(r.co2_savings_kg_per_year),
            self_consumption_percent: percent(r.self_consumption_rate),
            autarky_percent: percent(r.autarky_rate),
            daily_yield_kwh: round1(r.daily_yield_kwh),
            daily_savings_eur: round1(r.daily_savings_eur),
            homeoffice_coverage_percent: percent(r.homeoffice_coverage_rate),
            daily_ebike_range_km: round1(r.daily_ebike_range_km),
            daily_ecar_range_km: round1(r.daily_ecar_range_km),
        }
    }
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub user_id: String,
    pub user_info: Option<HouseholdInfoDto>,
    pub user_conditions: Option<MountingConditionsDto>,
    pub user_result: Option<CalculationResultDto>,
}

impl From<UserRecord> for UserResponseDto {
    fn from(record: UserRecord) -> Self {
        Self {
            user_id: record.id.to_string(),
            user_info: record.info.map(Into::into),
            user_conditions: record.conditions.map(Into::into),
            user_result: record.result.map(Into::into),
        }
    }
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PvConfigDto {
    pub id: PvConfig,
    pub module_count: u32,
    pub module_watt_peak: u32,
    pub inverter_watt_peak: u32,
    pub installation_cost_eur: u32,
    pub clipping_factor: f64,
    pub total_module_kwp: f64,
    pub oversizing_ratio: f64,
}

impl From<PvConfig> for PvConfigDto {
    fn from(id: PvConfig) -> Self {
        let entry = id.entry();
        Self {
            id,
            module_count: entry.module_count,
            module_watt_peak: entry.module_watt_peak,
            inverter_watt_peak: entry.inverter_watt_peak,
            installation_cost_eur: entry.installation_cost_eur,
            clipping_factor: entry.clipping_factor,
            total_module_kwp: entry.total_module_kwp(),
            oversizing_ratio: entry.oversizing_ratio(),
        }
    }
}
