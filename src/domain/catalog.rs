use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Raised when a PV configuration identifier is not part of the catalog.
///
/// Deserialization goes through [`PvConfig::from_str`], so request bodies
/// naming an unknown bundle fail with this error before the estimator runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown PV configuration: {0}")]
    UnknownPvConfig(String),
}

/// Fixed set of module/inverter bundles offered to the user
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum PvConfig {
    Cheap,
    Medium,
    Premium,
}

/// Physical and commercial constants of one catalog bundle
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PvConfigEntry {
    pub module_count: u32,
    pub module_watt_peak: u32,
    pub inverter_watt_peak: u32,
    pub installation_cost_eur: u32,
    /// Share of DC yield left after inverter clipping (0.0-1.0)
    pub clipping_factor: f64,
}

impl PvConfigEntry {
    /// Installed module capacity in kWp
    pub fn total_module_kwp(&self) -> f64 {
        f64::from(self.module_count * self.module_watt_peak) / 1000.0
    }

    /// Module capacity relative to inverter capacity
    pub fn oversizing_ratio(&self) -> f64 {
        f64::from(self.module_count * self.module_watt_peak) / f64::from(self.inverter_watt_peak)
    }
}

impl PvConfig {
    pub const fn entry(self) -> PvConfigEntry {
        match self {
            PvConfig::Cheap => PvConfigEntry {
                module_count: 2,
                module_watt_peak: 400,
                inverter_watt_peak: 800,
                installation_cost_eur: 500,
                clipping_factor: 1.0,
            },
            PvConfig::Medium => PvConfigEntry {
                module_count: 2,
                module_watt_peak: 500,
                inverter_watt_peak: 800,
                installation_cost_eur: 1000,
                clipping_factor: 0.97,
            },
            PvConfig::Premium => PvConfigEntry {
                module_count: 4,
                module_watt_peak: 400,
                inverter_watt_peak: 800,
                installation_cost_eur: 2000,
                clipping_factor: 0.90,
            },
        }
    }

    pub fn all() -> impl Iterator<Item = PvConfig> {
        PvConfig::iter()
    }
}

impl std::fmt::Display for PvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PvConfig::Cheap => write!(f, "CHEAP"),
            PvConfig::Medium => write!(f, "MEDIUM"),
            PvConfig::Premium => write!(f, "PREMIUM"),
        }
    }
}

impl std::str::FromStr for PvConfig {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CHEAP" | "CHEAP_PV_COMBI" => Ok(PvConfig::Cheap),
            "MEDIUM" | "MEDIUM_PV_COMBI" => Ok(PvConfig::Medium),
            "PREMIUM" | "PREMIUM_PV_COMBI" => Ok(PvConfig::Premium),
            _ => Err(CatalogError::UnknownPvConfig(s.to_string())),
        }
    }
}

impl TryFrom<String> for PvConfig {
    type Error = CatalogError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
