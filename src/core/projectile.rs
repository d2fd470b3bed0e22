//! The falling drop
//!
//! Grid-space position, fall altitude and the mass model used at impact.

use bevy::prelude::*;

use crate::config::{DropParams, LAUNCH_MARGIN};
use crate::math::{Point, Real};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    /// Grid-space (x, z) of the drop
    pub position: Point,
    /// Height above the surface plane
    pub altitude: Real,
    pub fall_speed: Real,
    pub radius: Real,
    /// Degrees, only used to pick `position`
    pub angle: Real,
    pub has_impacted: bool,
}

impl Projectile {
    /// Resting drop over the grid centre at release altitude
    pub fn new(grid_size: usize, drop: &DropParams) -> Self {
        let center = (grid_size / 2) as Real;
        Self {
            position: Vec2::splat(center),
            altitude: drop.drop_height,
            fall_speed: drop.fall_speed,
            radius: drop.radius,
            angle: drop.angle,
            has_impacted: false,
        }
    }

    /// Re-arms the drop from the current parameters and places it on its
    /// launch point.
    pub fn launch(&mut self, grid_size: usize, drop: &DropParams) {
        *self = Self::new(grid_size, drop);
        self.position = launch_point(grid_size, drop.radius, drop.angle);
    }

    /// Moves the drop one tick toward the surface
    #[inline]
    pub fn advance(&mut self) {
        if !self.has_impacted {
            self.altitude -= self.fall_speed;
        }
    }

    #[inline]
    pub fn reached_surface(&self, impact_altitude: Real) -> bool {
        self.altitude <= impact_altitude
    }

    /// Volume-scaled mass: `(radius / reference_radius)^3 * base_mass`
    #[inline]
    pub fn effective_mass(&self, base_mass: Real, reference_radius: Real) -> Real {
        if reference_radius <= 0.0 {
            return 0.0;
        }
        (self.radius / reference_radius).powi(3) * base_mass
    }

    #[inline]
    pub fn kinetic_energy(&self, base_mass: Real, reference_radius: Real) -> Real {
        0.5 * self.effective_mass(base_mass, reference_radius) * self.fall_speed * self.fall_speed
    }
}

/// Grid point the drop lands on for a given size and angle.
///
/// Larger drops land closer to the centre:
/// `r = N/2 - floor(radius / 100 * (N/2 - margin))`, then the point sits at
/// `angle` degrees on a ring of radius `r`, truncated to whole cells.
pub fn launch_point(grid_size: usize, radius: Real, angle: Real) -> Point {
    let half = (grid_size / 2) as f64;
    let reach = (grid_size / 2).saturating_sub(LAUNCH_MARGIN) as f64;
    let ring = half - (radius as f64 / 100.0 * reach).floor();
    let theta = (angle as f64).to_radians();

    let x = (half + ring * theta.cos()).floor();
    let z = (half + ring * theta.sin()).floor();
    Vec2::new(x as Real, z as Real)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_drop_has_unit_mass() {
        let drop = DropParams {
            fall_speed: 8.0,
            radius: 18.0,
            base_mass: 1.0,
            reference_radius: 18.0,
            ..DropParams::default()
        };
        let projectile = Projectile::new(120, &drop);
        assert_eq!(projectile.effective_mass(1.0, 18.0), 1.0);
        assert_eq!(projectile.kinetic_energy(1.0, 18.0), 32.0);
    }

    #[test]
    fn mass_scales_with_volume() {
        let drop = DropParams {
            radius: 36.0,
            ..DropParams::default()
        };
        let projectile = Projectile::new(120, &drop);
        assert_eq!(projectile.effective_mass(1.0, 18.0), 8.0);
    }

    #[test]
    fn launch_point_follows_angle() {
        assert_eq!(launch_point(120, 18.0, 45.0), Vec2::new(96.0, 96.0));
        assert_eq!(launch_point(120, 18.0, 0.0), Vec2::new(111.0, 60.0));
        assert_eq!(launch_point(120, 18.0, 90.0), Vec2::new(60.0, 111.0));
        // The biggest drop lands nearer the centre
        assert_eq!(launch_point(120, 100.0, 0.0), Vec2::new(65.0, 60.0));
    }

    #[test]
    fn advance_stops_after_impact() {
        let mut projectile = Projectile::new(120, &DropParams::default());
        projectile.advance();
        assert_eq!(projectile.altitude, 192.0);
        projectile.has_impacted = true;
        projectile.advance();
        assert_eq!(projectile.altitude, 192.0);
    }
}
