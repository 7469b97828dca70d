//! Annual, lifetime and daily energy generation.

use super::constants::ModelConstants;
use super::orientation::{angle_factor, direction_factor};
use super::rounding::{round0, round1};
use crate::domain::MountingConditions;

/// Generation figures derived from the mounting conditions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generation {
    /// Unrounded first-year yield
    pub yearly_yield_kwh: f64,
    pub possible_generation_kwh: i64,
    pub lifetime_yield_kwh: f64,
    pub daily_yield_kwh: f64,
}

pub fn yearly_yield_kwh(conditions: &MountingConditions, constants: &ModelConstants) -> f64 {
    let entry = conditions.pv_config.entry();
    entry.total_module_kwp()
        * direction_factor(conditions.direction)
        * angle_factor(conditions.tilt_angle_deg, constants)
        * (1.0 - conditions.shade_factor)
        * constants.solar_irradiance
        * entry.clipping_factor
}

/// Sum of yearly yields over the module lifetime, year 0 undegraded.
pub fn lifetime_yield_kwh(yearly_yield_kwh: f64, constants: &ModelConstants) -> f64 {
    let retention = 1.0 - constants.degradation_rate;
    let mut remaining = 1.0;
    let mut total = 0.0;
    for _ in 0..constants.lifetime_years {
        total += yearly_yield_kwh * remaining;
        remaining *= retention;
    }
    total
}

pub fn estimate_generation(conditions: &MountingConditions, constants: &ModelConstants) -> Generation {
    let yearly = yearly_yield_kwh(conditions, constants);
    Generation {
        yearly_yield_kwh: yearly,
        possible_generation_kwh: round0(yearly),
        lifetime_yield_kwh: lifetime_yield_kwh(yearly, constants),
        daily_yield_kwh: round1(yearly / constants.days_per_year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, PvConfig};

    fn conditions(pv_config: PvConfig, direction: Direction, angle: i32, shade: f64) -> MountingConditions {
        MountingConditions {
            pv_config,
            tilt_angle_deg: angle,
            direction,
            shade_factor: shade,
        }
    }

    #[test]
    fn test_ideal_cheap_config() {
        let generation = estimate_generation(
            &conditions(PvConfig::Cheap, Direction::South, 30, 0.0),
            &ModelConstants::default(),
        );
        assert_eq!(generation.possible_generation_kwh, 800);
        assert_eq!(generation.daily_yield_kwh, 2.2);
    }

    #[test]
    fn test_full_shade_generates_nothing() {
        let generation = estimate_generation(
            &conditions(PvConfig::Medium, Direction::North, 30, 1.0),
            &ModelConstants::default(),
        );
        assert_eq!(generation.possible_generation_kwh, 0);
        assert_eq!(generation.lifetime_yield_kwh, 0.0);
        assert_eq!(generation.daily_yield_kwh, 0.0);
    }

    #[test]
    fn test_shade_scales_linearly() {
        let constants = ModelConstants::default();
        let sunny = yearly_yield_kwh(&conditions(PvConfig::Medium, Direction::South, 30, 0.0), &constants);
        let shaded = yearly_yield_kwh(&conditions(PvConfig::Medium, Direction::South, 30, 0.25), &constants);
        assert!((shaded - sunny * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_lifetime_matches_geometric_series() {
        let constants = ModelConstants::default();
        let yearly = 970.0;
        let r: f64 = 1.0 - constants.degradation_rate;
        let closed_form = yearly * (1.0 - r.powi(constants.lifetime_years as i32)) / (1.0 - r);
        let lifetime = lifetime_yield_kwh(yearly, &constants);
        assert!((lifetime - closed_form).abs() / closed_form < 1e-9);
    }

    #[test]
    fn test_lifetime_bounds() {
        let constants = ModelConstants::default();
        let yearly = yearly_yield_kwh(&conditions(PvConfig::Premium, Direction::East, 45, 0.1), &constants);
        let lifetime = lifetime_yield_kwh(yearly, &constants);
        assert!(lifetime < yearly * 25.0);
        assert!(lifetime > yearly * 20.0);
    }

    #[test]
    fn test_first_year_is_undegraded() {
        let constants = ModelConstants {
            lifetime_years: 1,
            ..ModelConstants::default()
        };
        assert_eq!(lifetime_yield_kwh(500.0, &constants), 500.0);
    }
}
