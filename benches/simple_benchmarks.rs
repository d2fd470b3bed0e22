/// Simple custom benchmarking without criterion
use std::time::Instant;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ripple2d::{HeightField, RippleState, SimParams, SplashParams, SplashParticleSystem, WaveParams};

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

fn excited_field(size: usize) -> HeightField {
    let mut field = HeightField::new(size, WaveParams::default());
    let center = Vec2::splat((size / 2) as f32);
    field.inject_energy(center, size as f32 / 8.0, 100.0);
    field
}

fn main() {
    println!("\n=== Ripple2D Benchmarks ===\n");

    println!("--- Height Field Step ---");
    for &size in &[60, 120, 240, 480] {
        let mut field = excited_field(size);
        time_it(&format!("step (n={})", size), 100, || {
            field.step();
        });
    }

    println!("\n--- Energy Injection ---");
    for &radius in &[5.0, 18.0, 50.0] {
        let mut field = HeightField::new(120, WaveParams::default());
        time_it(&format!("inject_energy (r={})", radius), 100, || {
            field.inject_energy(Vec2::splat(60.0), radius, 32.0);
        });
    }

    println!("\n--- Splash Particles ---");
    for &count in &[30, 1000, 10000] {
        let mut rng = StdRng::seed_from_u64(1);
        let mut splash = SplashParticleSystem::new(SplashParams::default());
        time_it(&format!("emit (n={})", count), 20, || {
            splash.clear();
            splash.emit(Vec2::new(560.0, 640.0), count, 18.0, &mut rng);
        });

        let params = SplashParams {
            // Keep the batch alive for the whole run
            life_decrement: 0.0,
            ..SplashParams::default()
        };
        let mut splash = SplashParticleSystem::new(params);
        splash.emit(Vec2::new(560.0, 640.0), count, 18.0, &mut rng);
        time_it(&format!("step (n={})", count), 100, || {
            splash.step(params.life_decrement);
        });
    }

    println!("\n--- Full Tick ---");
    for &size in &[120, 240] {
        let mut state = RippleState::new(SimParams::default().with_grid_size(size).with_seed(7));
        state.start();
        // Land the drop before timing
        for _ in 0..30 {
            state.tick();
        }
        time_it(&format!("tick (n={})", size), 100, || {
            state.tick();
        });
    }

    println!("\n=== Benchmarks Complete ===\n");
}
