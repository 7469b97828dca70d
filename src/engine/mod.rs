//! # PV Yield & Savings Estimation
//!
//! Turns household info and mounting conditions into generation, financial
//! and environmental figures. The pipeline runs orientation, generation,
//! economics and consumption in data-dependency order and holds no state
//! between calls beyond its model constants.

pub mod constants;
pub mod consumption;
pub mod economics;
pub mod generation;
pub mod orientation;
pub mod rounding;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use constants::{ModelConstants, SelfConsumptionTable};
pub use economics::NEVER_AMORTISES;

use crate::domain::{HouseholdInfo, MountingConditions};

/// Output of one estimation run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub possible_electricity_generation_kwh: i64,
    pub possible_savings_eur: i64,
    /// Years until savings cover the installation cost, `NEVER_AMORTISES` without savings
    pub amortisation_years: f64,
    pub lifetime_yield_kwh: f64,
    pub co2_savings_kg_per_year: f64,
    pub self_consumption_rate: f64,
    pub autarky_rate: f64,
    pub daily_yield_kwh: f64,
    pub daily_savings_eur: f64,
    /// Fraction of a home-office day covered, capped at 1.0
    pub homeoffice_coverage_rate: f64,
    pub daily_ebike_range_km: f64,
    pub daily_ecar_range_km: f64,
}

/// Stateless estimator; safe to share between concurrent requests
#[derive(Debug, Clone, Default)]
pub struct YieldEstimator {
    constants: ModelConstants,
}

impl YieldEstimator {
    pub fn new(constants: ModelConstants) -> Self {
        Self { constants }
    }

    pub fn estimate(&self, info: &HouseholdInfo, conditions: &MountingConditions) -> CalculationResult {
        let entry = conditions.pv_config.entry();
        let generation = generation::estimate_generation(conditions, &self.constants);
        let economics = economics::estimate_economics(
            info,
            &entry,
            generation.possible_generation_kwh,
            generation.daily_yield_kwh,
        );
        let consumption = consumption::estimate_consumption(
            info,
            generation.possible_generation_kwh,
            generation.daily_yield_kwh,
            &self.constants,
        );

        debug!(
            pv_config = %conditions.pv_config,
            direction = %conditions.direction,
            tilt_angle_deg = conditions.tilt_angle_deg,
            shade_factor = conditions.shade_factor,
            yearly_yield_kwh = generation.yearly_yield_kwh,
            savings_eur = economics.possible_savings_eur,
            "estimated PV yield"
        );

        CalculationResult {
            possible_electricity_generation_kwh: generation.possible_generation_kwh,
            possible_savings_eur: economics.possible_savings_eur,
            amortisation_years: economics.amortisation_years,
            lifetime_yield_kwh: generation.lifetime_yield_kwh,
            co2_savings_kg_per_year: consumption.co2_savings_kg_per_year,
            self_consumption_rate: consumption.self_consumption_rate,
            autarky_rate: consumption.autarky_rate,
            daily_yield_kwh: generation.daily_yield_kwh,
            daily_savings_eur: economics.daily_savings_eur,
            homeoffice_coverage_rate: consumption.homeoffice_coverage_rate,
            daily_ebike_range_km: consumption.daily_ebike_range_km,
            daily_ecar_range_km: consumption.daily_ecar_range_km,
        }
    }
}
