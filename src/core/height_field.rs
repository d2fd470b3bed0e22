//! Spring-coupled height field
//!
//! NxN grid of displacement cells advanced by an explicit 4-neighbour stencil.
//! Cells are stored row-major: index = i + j * size, where `i` runs along the
//! grid x axis and `j` along z.

use bevy::prelude::*;

use crate::config::WaveParams;
use crate::math::{Point, Real, grid_distance};

/// Number of neighbours in the full stencil
pub const NEIGHBOR_COUNT: usize = 4;

/// (di, dj) offsets of the 4-neighbour stencil
pub const STENCIL_OFFSETS: [(isize, isize); NEIGHBOR_COUNT] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct WaveCell {
    /// Signed displacement from rest
    pub height: Real,
    pub velocity: Real,
    /// Recomputed from neighbour heights every step, never carried over
    pub acceleration: Real,
}

impl WaveCell {
    #[inline(always)]
    pub fn zeroed() -> Self {
        Self {
            height: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
        }
    }

    #[inline(always)]
    pub fn zero(&mut self) {
        self.height = 0.0;
        self.velocity = 0.0;
        self.acceleration = 0.0;
    }
}

#[derive(Clone, Debug)]
pub struct HeightField {
    size: usize,
    cells: Vec<WaveCell>,
    // Heights from the previous step, read by the stencil
    snapshot: Vec<Real>,
    params: WaveParams,
}

impl HeightField {
    pub fn new(size: usize, params: WaveParams) -> Self {
        Self {
            size,
            cells: vec![WaveCell::zeroed(); size * size],
            snapshot: Vec::with_capacity(size * size),
            params,
        }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + j * self.size
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn set_params(&mut self, params: WaveParams) {
        self.params = params;
    }

    /// Get cell at grid coordinates (read-only)
    pub fn cell(&self, i: usize, j: usize) -> Option<&WaveCell> {
        if i < self.size && j < self.size {
            self.cells.get(self.index(i, j))
        } else {
            None
        }
    }

    pub fn cell_mut(&mut self, i: usize, j: usize) -> Option<&mut WaveCell> {
        if i < self.size && j < self.size {
            let index = self.index(i, j);
            self.cells.get_mut(index)
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[WaveCell] {
        &self.cells
    }

    /// Height at grid coordinates, zero outside the grid
    pub fn height_at(&self, i: usize, j: usize) -> Real {
        self.cell(i, j).map_or(0.0, |cell| cell.height)
    }

    /// Row-major copy of every cell height
    pub fn heights(&self) -> Vec<Real> {
        self.cells.iter().map(|cell| cell.height).collect()
    }

    /// Advances every cell by one explicit step.
    ///
    /// All cells read neighbour heights from the same snapshot, so the update
    /// order has no effect on the result. Neighbours outside the grid are
    /// dropped from both the sum and the count.
    pub fn step(&mut self) {
        let size = self.size;
        let WaveParams {
            spring_constant,
            spread_factor,
            damping_factor,
            ..
        } = self.params;

        self.snapshot.clear();
        self.snapshot.extend(self.cells.iter().map(|cell| cell.height));
        let snapshot = &self.snapshot;

        for j in 0..size {
            for i in 0..size {
                let index = i + j * size;
                let center = snapshot[index];

                let mut total = 0.0;
                let mut neighbors = 0.0;
                for &(di, dj) in &STENCIL_OFFSETS {
                    if let Some(neighbor) = neighbor_index(size, i, j, di, dj) {
                        total += snapshot[neighbor];
                        neighbors += 1.0;
                    }
                }

                let cell = &mut self.cells[index];
                cell.acceleration =
                    spring_constant * (-center) + spread_factor * (total - neighbors * center);
                cell.velocity += cell.acceleration;
                cell.velocity *= damping_factor;
                cell.height += cell.velocity;
            }
        }
    }

    /// Adds a radial momentum impulse around `center`.
    ///
    /// Every cell within `radius` receives
    /// `(1 - d / (radius + 1)) * energy * energy_scale` on its velocity.
    /// Returns the total velocity added.
    pub fn inject_energy(&mut self, center: Point, radius: Real, energy: Real) -> Real {
        if !(radius >= 0.0) || !energy.is_finite() {
            return 0.0;
        }

        let strength = energy * self.params.energy_scale;
        let size = self.size;
        let mut added = 0.0;

        for j in 0..size {
            for i in 0..size {
                let distance = grid_distance(i, j, center);
                if distance <= radius {
                    let delta = (1.0 - distance / (radius + 1.0)) * strength;
                    self.cells[i + j * size].velocity += delta;
                    added += delta;
                }
            }
        }

        added
    }

    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.zero());
        self.snapshot.clear();
    }

    /// Reallocates to a new size, discarding all state
    pub fn resize(&mut self, size: usize) {
        self.size = size;
        self.cells = vec![WaveCell::zeroed(); size * size];
        self.snapshot = Vec::with_capacity(size * size);
    }

    /// Central-difference slope (along i, along j) for shading.
    ///
    /// Zero on the outer ring, where one side of the difference is missing.
    pub fn gradient(&self, i: usize, j: usize) -> Vec2 {
        if i == 0 || j == 0 || i + 1 >= self.size || j + 1 >= self.size {
            return Vec2::ZERO;
        }
        let dx = (self.height_at(i + 1, j) - self.height_at(i - 1, j)) * 0.5;
        let dz = (self.height_at(i, j + 1) - self.height_at(i, j - 1)) * 0.5;
        Vec2::new(dx, dz)
    }

    /// Highlight in [0, 1] for a light straight above: 0.5 on flat water,
    /// brighter on slopes that fall away along +i and +j.
    pub fn shade(&self, i: usize, j: usize) -> Real {
        let slope = self.gradient(i, j);
        (0.5 - 0.5 * (slope.x + slope.y)).clamp(0.0, 1.0)
    }

    /// Side-view profile: for every `i`, the mean height over the rows
    /// `j - band ..= j + band`, clipped to the grid.
    pub fn cross_section(&self, j: usize, band: usize) -> Vec<Real> {
        if self.size == 0 {
            return Vec::new();
        }
        let j = j.min(self.size - 1);
        let lo = j.saturating_sub(band);
        let hi = (j + band + 1).min(self.size);
        let rows = (hi - lo) as Real;

        (0..self.size)
            .map(|i| {
                let sum: Real = (lo..hi).map(|row| self.cells[i + row * self.size].height).sum();
                sum / rows
            })
            .collect()
    }

    pub fn max_abs_height(&self) -> Real {
        self.cells
            .iter()
            .fold(0.0, |max: Real, cell| max.max(cell.height.abs()))
    }

    /// Kinetic plus spring potential energy proxy, for diagnostics
    pub fn total_energy(&self) -> Real {
        let k = self.params.spring_constant;
        self.cells
            .iter()
            .map(|cell| 0.5 * cell.velocity * cell.velocity + 0.5 * k * cell.height * cell.height)
            .sum()
    }

    pub fn is_at_rest(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.height == 0.0 && cell.velocity == 0.0 && cell.acceleration == 0.0)
    }
}

/// In-bounds neighbour index, `None` past the open boundary
#[inline(always)]
fn neighbor_index(size: usize, i: usize, j: usize, di: isize, dj: isize) -> Option<usize> {
    let ni = i.checked_add_signed(di)?;
    let nj = j.checked_add_signed(dj)?;
    (ni < size && nj < size).then_some(ni + nj * size)
}
