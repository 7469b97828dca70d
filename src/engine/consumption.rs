//! Self-consumption, autarky, CO2 and daily-equivalent metrics.

use super::constants::{ModelConstants, SelfConsumptionTable};
use super::rounding::round1;
use crate::domain::HouseholdInfo;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumptionMetrics {
    pub co2_savings_kg_per_year: f64,
    pub self_consumption_rate: f64,
    pub autarky_rate: f64,
    pub homeoffice_coverage_rate: f64,
    pub daily_ebike_range_km: f64,
    pub daily_ecar_range_km: f64,
}

/// Generation relative to annual consumption, 0 without consumption
pub fn generation_ratio(generation_kwh: i64, annual_consumption_kwh: u32) -> f64 {
    if annual_consumption_kwh == 0 {
        return 0.0;
    }
    generation_kwh as f64 / f64::from(annual_consumption_kwh)
}

pub fn self_consumption_rate(ratio: f64, table: SelfConsumptionTable) -> f64 {
    match table {
        SelfConsumptionTable::Current => match ratio {
            r if r < 0.6 => 0.35,
            r if r < 1.0 => 0.25,
            r if r < 1.5 => 0.20,
            _ => 0.15,
        },
        SelfConsumptionTable::Legacy => match ratio {
            r if r < 0.3 => 0.70,
            r if r < 0.7 => 0.50,
            r if r < 1.0 => 0.35,
            r if r < 1.5 => 0.25,
            _ => 0.20,
        },
    }
}

/// Share of the household consumption covered by self-consumed generation, capped at 1
pub fn autarky_rate(self_consumption_rate: f64, generation_kwh: i64, annual_consumption_kwh: u32) -> f64 {
    if annual_consumption_kwh == 0 {
        return 0.0;
    }
    let covered = self_consumption_rate * generation_kwh as f64;
    (covered / f64::from(annual_consumption_kwh)).clamp(0.0, 1.0)
}

pub fn estimate_consumption(
    info: &HouseholdInfo,
    possible_generation_kwh: i64,
    daily_yield_kwh: f64,
    constants: &ModelConstants,
) -> ConsumptionMetrics {
    let ratio = generation_ratio(possible_generation_kwh, info.annual_consumption_kwh);
    let self_consumption = self_consumption_rate(ratio, constants.self_consumption_table);

    ConsumptionMetrics {
        co2_savings_kg_per_year: possible_generation_kwh as f64 * constants.co2_kg_per_kwh,
        self_consumption_rate: self_consumption,
        autarky_rate: autarky_rate(self_consumption, possible_generation_kwh, info.annual_consumption_kwh),
        homeoffice_coverage_rate: (daily_yield_kwh / constants.home_office_daily_kwh).min(1.0),
        daily_ebike_range_km: round1(daily_yield_kwh / constants.ebike_kwh_per_km),
        daily_ecar_range_km: round1(daily_yield_kwh / constants.ecar_kwh_per_km),
    }
}
