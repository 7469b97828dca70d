//! Monetary savings and amortisation.

use super::rounding::{round0, round1};
use crate::domain::{HouseholdInfo, PvConfigEntry};

/// Amortisation time reported when savings never cover the installation cost
pub const NEVER_AMORTISES: f64 = f64::MAX;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Economics {
    pub possible_savings_eur: i64,
    pub amortisation_years: f64,
    pub daily_savings_eur: f64,
}

/// Electricity price in EUR per kWh
pub fn price_per_kwh(info: &HouseholdInfo) -> f64 {
    f64::from(info.electricity_rate_cents) / 100.0
}

pub fn amortisation_years(installation_cost_eur: u32, savings_eur: i64) -> f64 {
    if savings_eur > 0 {
        f64::from(installation_cost_eur) / savings_eur as f64
    } else {
        NEVER_AMORTISES
    }
}

pub fn estimate_economics(
    info: &HouseholdInfo,
    entry: &PvConfigEntry,
    possible_generation_kwh: i64,
    daily_yield_kwh: f64,
) -> Economics {
    let price = price_per_kwh(info);
    let savings = round0(possible_generation_kwh as f64 * price);
    Economics {
        possible_savings_eur: savings,
        amortisation_years: amortisation_years(entry.installation_cost_eur, savings),
        daily_savings_eur: round1(daily_yield_kwh * price),
    }
}
