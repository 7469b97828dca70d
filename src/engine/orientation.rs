//! Orientation efficiency factors for compass direction and tilt angle.

use super::constants::ModelConstants;
use crate::domain::Direction;

pub const MIN_TILT_DEG: i32 = 0;
pub const MAX_TILT_DEG: i32 = 90;

/// Share of the south-facing yield reached when facing `direction`
pub fn direction_factor(direction: Direction) -> f64 {
    match direction {
        Direction::South => 1.0,
        Direction::Southeast | Direction::Southwest => 0.95,
        Direction::East | Direction::West => 0.80,
        Direction::Northeast | Direction::Northwest => 0.65,
        Direction::North => 0.50,
    }
}

/// Efficiency of a tilt angle relative to the optimum.
///
/// Out-of-range angles are clamped to 0-90 degrees rather than rejected.
/// The result never drops below `min_angle_factor`.
pub fn angle_factor(angle_deg: i32, constants: &ModelConstants) -> f64 {
    let angle = angle_deg.clamp(MIN_TILT_DEG, MAX_TILT_DEG);
    let diff = f64::from((angle - constants.optimal_tilt_deg).abs());
    let factor = 1.0 - diff * constants.tilt_loss_per_degree;
    factor.max(constants.min_angle_factor)
}
