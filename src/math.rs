use bevy::math::Vec2;

pub type Real = f32;

pub type Vector = Vec2;
pub type Point = Vec2;

#[inline(always)]
pub fn lerp(a: Real, b: Real, t: Real) -> Real {
    a + (b - a) * t
}

/// Euclidean distance between two grid coordinates
#[inline(always)]
pub fn grid_distance(i: usize, j: usize, center: Point) -> Real {
    Vec2::new(i as Real, j as Real).distance(center)
}

/// Uniform sample from `[a, b]` regardless of argument order.
///
/// Degenerate ranges return the bound instead of panicking.
#[inline]
pub fn sample_between<R: rand::Rng>(rng: &mut R, a: Real, b: Real) -> Real {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi - lo <= Real::EPSILON {
        lo
    } else {
        rng.random_range(lo..=hi)
    }
}
