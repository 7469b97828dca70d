use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Which self-consumption tier table to classify generation/consumption with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelfConsumptionTable {
    /// Four tiers: <0.6, <1.0, <1.5, >=1.5
    #[default]
    Current,
    /// Five tiers: <0.3, <0.7, <1.0, <1.5, >=1.5
    Legacy,
}

/// Model constants of the yield and savings estimate.
///
/// Every field has a default, so a partial `[model]` section in the
/// configuration only overrides what it names. Values used as divisors must
/// be strictly positive, otherwise the estimate would produce non-finite
/// figures that cannot be stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
#[validate(schema(function = "all_finite"))]
pub struct ModelConstants {
    /// Annual yield per installed kWp under ideal orientation (kWh/kWp)
    #[validate(range(min = 0.0, max = 10000.0))]
    pub solar_irradiance: f64,
    #[validate(range(min = 0, max = 90))]
    pub optimal_tilt_deg: i32,
    /// Efficiency lost per degree of deviation from the optimal tilt
    #[validate(range(min = 0.0, max = 1.0))]
    pub tilt_loss_per_degree: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_angle_factor: f64,
    /// Annual module degradation, compounding
    #[validate(range(min = 0.0, exclusive_max = 1.0))]
    pub degradation_rate: f64,
    #[validate(range(min = 1, max = 100))]
    pub lifetime_years: u32,
    #[validate(range(exclusive_min = 0.0, max = 366.0))]
    pub days_per_year: f64,
    /// kg CO2 avoided per kWh generated
    #[validate(range(min = 0.0, max = 10.0))]
    pub co2_kg_per_kwh: f64,
    #[validate(range(exclusive_min = 0.0, max = 1000.0))]
    pub home_office_daily_kwh: f64,
    #[validate(range(exclusive_min = 0.0, max = 10.0))]
    pub ebike_kwh_per_km: f64,
    #[validate(range(exclusive_min = 0.0, max = 10.0))]
    pub ecar_kwh_per_km: f64,
    pub self_consumption_table: SelfConsumptionTable,
}

/// Range checks let NaN through since every comparison with it is false
fn all_finite(c: &ModelConstants) -> Result<(), ValidationError> {
    let values = [
        c.solar_irradiance,
        c.tilt_loss_per_degree,
        c.min_angle_factor,
        c.degradation_rate,
        c.days_per_year,
        c.co2_kg_per_kwh,
        c.home_office_daily_kwh,
        c.ebike_kwh_per_km,
        c.ecar_kwh_per_km,
    ];
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ValidationError::new("non_finite_constant"))
    }
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            solar_irradiance: 1000.0,
            optimal_tilt_deg: 30,
            tilt_loss_per_degree: 0.01,
            min_angle_factor: 0.6,
            degradation_rate: 0.005,
            lifetime_years: 25,
            days_per_year: 365.0,
            co2_kg_per_kwh: 0.4,
            home_office_daily_kwh: 3.0,
            ebike_kwh_per_km: 0.015,
            ecar_kwh_per_km: 0.17,
            self_consumption_table: SelfConsumptionTable::Current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let constants: ModelConstants =
            serde_json::from_str(r#"{"solar_irradiance": 950.0, "self_consumption_table": "legacy"}"#)
                .unwrap();
        assert_eq!(constants.solar_irradiance, 950.0);
        assert_eq!(constants.self_consumption_table, SelfConsumptionTable::Legacy);
        assert_eq!(constants.lifetime_years, 25);
        assert_eq!(constants.co2_kg_per_kwh, 0.4);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(ModelConstants::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_divisors() {
        for field in ["days_per_year", "home_office_daily_kwh", "ebike_kwh_per_km", "ecar_kwh_per_km"] {
            let constants: ModelConstants =
                serde_json::from_str(&format!(r#"{{"{field}": 0.0}}"#)).unwrap();
            let errors = constants.validate().unwrap_err();
            assert!(errors.field_errors().contains_key(field), "{field}");
        }
    }

    #[test]
    fn test_rejects_out_of_range_factors() {
        let constants = ModelConstants {
            degradation_rate: 1.0,
            min_angle_factor: 1.5,
            lifetime_years: 0,
            ..ModelConstants::default()
        };
        let errors = constants.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("degradation_rate"));
        assert!(fields.contains_key("min_angle_factor"));
        assert!(fields.contains_key("lifetime_years"));
    }

    #[test]
    fn test_rejects_nan() {
        let constants = ModelConstants {
            ecar_kwh_per_km: f64::NAN,
            ..ModelConstants::default()
        };
        assert!(constants.validate().is_err());
    }
}
