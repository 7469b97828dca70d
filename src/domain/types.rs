use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;
use uuid::Uuid;

use super::catalog::PvConfig;
use crate::engine::CalculationResult;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a stored user record
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// Eight-point compass direction the modules face
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "NORTH",
            Direction::Northeast => "NORTHEAST",
            Direction::East => "EAST",
            Direction::Southeast => "SOUTHEAST",
            Direction::South => "SOUTH",
            Direction::Southwest => "SOUTHWEST",
            Direction::West => "WEST",
            Direction::Northwest => "NORTHWEST",
        };
        write!(f, "{}", s)
    }
}

/// Household electricity data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HouseholdInfo {
    /// Electricity price in cents per kWh
    pub electricity_rate_cents: u32,
    pub household_size: u32,
    pub annual_consumption_kwh: u32,
}

/// Planned mounting of the PV modules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MountingConditions {
    pub pv_config: PvConfig,
    /// Tilt from horizontal, 0-90 degrees
    pub tilt_angle_deg: i32,
    pub direction: Direction,
    /// 0.0 = no shade, 1.0 = fully shaded
    pub shade_factor: f64,
}

// ============================================================================
// User record
// ============================================================================

/// The evolving per-user aggregate.
///
/// Each part is set independently; the result can only be produced once both
/// `info` and `conditions` are present and is replaced on every calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub info: Option<HouseholdInfo>,
    pub conditions: Option<MountingConditions>,
    pub result: Option<CalculationResult>,
}

/// The part of a record that still has to be supplied before calculating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    HouseholdInfo,
    MountingConditions,
}

impl UserRecord {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            info: None,
            conditions: None,
            result: None,
        }
    }

    pub fn with_info(self, info: HouseholdInfo) -> Self {
        Self {
            info: Some(info),
            ..self
        }
    }

    pub fn with_conditions(self, conditions: MountingConditions) -> Self {
        Self {
            conditions: Some(conditions),
            ..self
        }
    }

    pub fn with_result(self, result: CalculationResult) -> Self {
        Self {
            result: Some(result),
            ..self
        }
    }

    /// Both calculation inputs, or the first one that is missing.
    /// Household info is checked before mounting conditions.
    pub fn calculation_inputs(&self) -> Result<(&HouseholdInfo, &MountingConditions), MissingInput> {
        match (&self.info, &self.conditions) {
            (Some(info), Some(conditions)) => Ok((info, conditions)),
            (None, _) => Err(MissingInput::HouseholdInfo),
            (Some(_), None) => Err(MissingInput::MountingConditions),
        }
    }
}
