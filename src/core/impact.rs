//! Drop state machine
//!
//! Idle -> Falling on start, Falling -> Impacted once the drop reaches the
//! surface plane, back to Idle only through reset. The impact injects energy
//! and emits the splash exactly once per fall.

use bevy::prelude::*;
use rand::Rng;

use crate::config::{
    IMPACT_RING_ALPHA, IMPACT_RING_FADE, IMPACT_RING_GROWTH, IMPACT_RING_SCALE, IMPACT_RING_TICKS,
    SimParams,
};
use crate::math::{Point, Real};

use super::height_field::HeightField;
use super::projectile::Projectile;
use super::splash::SplashParticleSystem;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropPhase {
    #[default]
    Idle,
    Falling,
    Impacted,
}

/// Summary of the single impact of a fall
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactEvent {
    pub grid_point: Point,
    pub render_point: Point,
    pub effective_mass: Real,
    pub kinetic_energy: Real,
    /// Total velocity added to the height field
    pub injected: Real,
    pub particles: usize,
}

/// Expanding ring drawn around the impact point for a few ticks
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactRing {
    pub center: Point,
    pub radius: Real,
    pub alpha: Real,
}

#[derive(Clone, Debug)]
pub struct ImpactProcessor {
    projectile: Projectile,
    phase: DropPhase,
    ticks_since_impact: u32,
    last_impact: Option<ImpactEvent>,
}

impl ImpactProcessor {
    pub fn new(params: &SimParams) -> Self {
        Self {
            projectile: Projectile::new(params.grid_size, &params.drop),
            phase: DropPhase::Idle,
            ticks_since_impact: 0,
            last_impact: None,
        }
    }

    pub fn phase(&self) -> DropPhase {
        self.phase
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn ticks_since_impact(&self) -> u32 {
        self.ticks_since_impact
    }

    pub fn last_impact(&self) -> Option<&ImpactEvent> {
        self.last_impact.as_ref()
    }

    /// Releases the drop. Only valid from Idle; returns whether it started.
    pub fn start(&mut self, params: &SimParams) -> bool {
        if self.phase != DropPhase::Idle {
            debug!("start ignored while {:?}", self.phase);
            return false;
        }
        self.projectile.launch(params.grid_size, &params.drop);
        self.phase = DropPhase::Falling;
        info!(
            "drop released at grid ({:.0}, {:.0}), radius {:.1}, angle {:.1}",
            self.projectile.position.x,
            self.projectile.position.y,
            self.projectile.radius,
            self.projectile.angle
        );
        true
    }

    pub fn reset(&mut self, params: &SimParams) {
        self.projectile = Projectile::new(params.grid_size, &params.drop);
        self.phase = DropPhase::Idle;
        self.ticks_since_impact = 0;
        self.last_impact = None;
    }

    /// One tick of drop motion. Returns the impact event on the tick the
    /// drop reaches the surface.
    pub fn advance<R: Rng>(
        &mut self,
        params: &SimParams,
        field: &mut HeightField,
        splash: &mut SplashParticleSystem,
        rng: &mut R,
    ) -> Option<ImpactEvent> {
        match self.phase {
            DropPhase::Idle => None,
            DropPhase::Falling => {
                self.projectile.advance();
                if self.projectile.reached_surface(params.drop.impact_altitude) {
                    self.impact(params, field, splash, rng)
                } else {
                    None
                }
            }
            DropPhase::Impacted => {
                self.ticks_since_impact = self.ticks_since_impact.saturating_add(1);
                None
            }
        }
    }

    /// Transfers the drop's kinetic energy into the field and emits the
    /// splash. Does nothing unless the drop is still falling, so a fall
    /// can never inject twice.
    pub fn impact<R: Rng>(
        &mut self,
        params: &SimParams,
        field: &mut HeightField,
        splash: &mut SplashParticleSystem,
        rng: &mut R,
    ) -> Option<ImpactEvent> {
        if self.phase != DropPhase::Falling || self.projectile.has_impacted {
            return None;
        }

        let drop = &params.drop;
        let projectile = &mut self.projectile;
        projectile.altitude = projectile.altitude.max(drop.impact_altitude);
        projectile.has_impacted = true;

        let effective_mass = projectile.effective_mass(drop.base_mass, drop.reference_radius);
        let kinetic_energy = projectile.kinetic_energy(drop.base_mass, drop.reference_radius);
        let injected = field.inject_energy(projectile.position, projectile.radius, kinetic_energy);

        let render_point = params
            .layout
            .grid_to_render(projectile.position, field.size());
        let count = params.splash.count;
        splash.emit(render_point, count, projectile.radius, rng);

        let event = ImpactEvent {
            grid_point: projectile.position,
            render_point,
            effective_mass,
            kinetic_energy,
            injected,
            particles: count,
        };
        info!(
            "impact at grid ({:.0}, {:.0}): mass {:.3}, energy {:.3}, {} particles",
            event.grid_point.x, event.grid_point.y, effective_mass, kinetic_energy, count
        );

        self.phase = DropPhase::Impacted;
        self.ticks_since_impact = 0;
        self.last_impact = Some(event);
        Some(event)
    }

    pub fn impact_ring(&self) -> Option<ImpactRing> {
        let event = self.last_impact.as_ref()?;
        if self.phase != DropPhase::Impacted || self.ticks_since_impact >= IMPACT_RING_TICKS {
            return None;
        }
        let ticks = self.ticks_since_impact as Real;
        Some(ImpactRing {
            center: event.render_point,
            radius: self.projectile.radius * IMPACT_RING_SCALE + ticks * IMPACT_RING_GROWTH,
            alpha: (IMPACT_RING_ALPHA - ticks * IMPACT_RING_FADE).max(0.0) / 255.0,
        })
    }
}
