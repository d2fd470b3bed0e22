//! Splash spray particles
//!
//! Short-lived ballistic points emitted on impact. They live in render space
//! (y-down) and never interact with the height field.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::config::SplashParams;
use crate::math::{Point, Real, Vector, sample_between};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplashParticle {
    pub position: Point,
    pub velocity: Vector,
    /// Remaining lifetime; the particle is removed once this reaches zero
    pub lifetime: Real,
    pub size: Real,
}

/// What a renderer needs to draw one particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleView {
    pub position: Point,
    /// Remaining lifetime over the maximum lifetime, in [0, 1]
    pub life_fraction: Real,
    pub size: Real,
}

impl ParticleView {
    /// Fade-out alpha, proportional to the remaining lifetime
    #[inline]
    pub fn alpha(&self) -> Real {
        self.life_fraction
    }
}

#[derive(Clone, Debug, Default)]
pub struct SplashParticleSystem {
    particles: Vec<SplashParticle>,
    params: SplashParams,
}

impl SplashParticleSystem {
    pub fn new(params: SplashParams) -> Self {
        Self {
            particles: Vec::new(),
            params,
        }
    }

    pub fn params(&self) -> &SplashParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SplashParams) {
        self.params = params;
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[SplashParticle] {
        &self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &SplashParticle> {
        self.particles.iter()
    }

    /// Spawns `count` particles around `origin`, each offset by up to
    /// `jitter_radius / 2` on both axes.
    pub fn emit<R: Rng>(
        &mut self,
        origin: Point,
        count: usize,
        jitter_radius: Real,
        rng: &mut R,
    ) {
        let (speed_min, speed_max) = self.params.speed_range();
        let half = jitter_radius.abs() * 0.5;

        self.particles.reserve(count);
        for _ in 0..count {
            let angle = rng.random_range(0.0..TAU);
            let speed = sample_between(rng, speed_min, speed_max);
            let lifetime = sample_between(rng, self.params.lifetime_min, self.params.lifetime_max);
            let size = sample_between(rng, self.params.size_min, self.params.size_max);
            let jitter = Vec2::new(
                sample_between(rng, -half, half),
                sample_between(rng, -half, half),
            );

            self.particles.push(SplashParticle {
                position: origin + jitter,
                // Negative y launches upward in render space
                velocity: Vec2::new(speed * angle.cos(), -speed * angle.sin()),
                lifetime,
                size,
            });
        }
    }

    /// Advances every particle one tick and drops the expired ones.
    ///
    /// `delta` is the lifetime removed per tick.
    pub fn step(&mut self, delta: Real) {
        let SplashParams {
            gravity,
            surface_line,
            restitution,
            ..
        } = self.params;

        self.particles.retain_mut(|particle| {
            particle.position += particle.velocity;
            particle.velocity.y += gravity;
            if particle.position.y > surface_line && particle.velocity.y > 0.0 {
                particle.velocity.y *= -restitution;
            }
            particle.lifetime -= delta;
            !SplashParams::is_expired(particle.lifetime, delta)
        });
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn views(&self) -> impl Iterator<Item = ParticleView> + '_ {
        let max_lifetime = self.params.lifetime_max;
        self.particles.iter().map(move |particle| ParticleView {
            position: particle.position,
            life_fraction: if max_lifetime > 0.0 {
                (particle.lifetime / max_lifetime).clamp(0.0, 1.0)
            } else {
                0.0
            },
            size: particle.size,
        })
    }
}
