//! Stencil-update kernels for the FDTD integrator.
//!
//! Two implementations of one interface, chosen at configuration time: a
//! single-threaded sweep and a rayon-tiled variant. Both read only the two
//! frozen previous buffers and write disjoint cells of the next buffer, so
//! the tiled kernel needs no intra-step synchronisation; the barrier between
//! steps is the `for_each` join itself.

use rayon::prelude::*;

use drumgen_spec::StencilBackend;

/// Per-step constants and the update window, in padded-grid coordinates.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StencilPass {
    /// First coefficient, lambda^2.
    pub s0: f64,
    /// Second coefficient, 2 - 4 lambda^2.
    pub s1: f64,
    /// Decay coefficient d.
    pub decay: f64,
    /// Row length of the padded grid.
    pub stride: usize,
    /// Inclusive row range holding set mask cells.
    pub x_range: (usize, usize),
    /// Inclusive column range holding set mask cells.
    pub y_range: (usize, usize),
}

/// One leapfrog update over the masked cells.
pub(crate) trait StencilKernel: Send + Sync {
    fn step(&self, next: &mut [f64], prev: &[f64], prev2: &[f64], mask: &[bool], pass: &StencilPass);
}

/// Selects the kernel implementation for a configured backend.
pub(crate) fn kernel_for(backend: StencilBackend) -> Box<dyn StencilKernel> {
    match backend {
        StencilBackend::Sequential => Box::new(SequentialKernel),
        StencilBackend::Tiled => Box::new(TiledKernel { rows_per_tile: 16 }),
    }
}

fn update_row(
    next_row: &mut [f64],
    prev: &[f64],
    prev2: &[f64],
    mask: &[bool],
    x: usize,
    pass: &StencilPass,
) {
    let row = x * pass.stride;
    for y in pass.y_range.0..=pass.y_range.1 {
        let idx = row + y;
        // Dirichlet condition by omission: cells outside the mask are never
        // written and stay at zero.
        if mask[idx] {
            next_row[y] = pass.s0
                * (prev[idx + 1] + prev[idx - 1] + prev[idx + pass.stride] + prev[idx - pass.stride])
                + pass.s1 * prev[idx]
                - pass.decay * prev2[idx];
        }
    }
}

/// Single-threaded double-buffered sweep.
pub(crate) struct SequentialKernel;

impl StencilKernel for SequentialKernel {
    fn step(
        &self,
        next: &mut [f64],
        prev: &[f64],
        prev2: &[f64],
        mask: &[bool],
        pass: &StencilPass,
    ) {
        for x in pass.x_range.0..=pass.x_range.1 {
            let row = x * pass.stride;
            update_row(&mut next[row..row + pass.stride], prev, prev2, mask, x, pass);
        }
    }
}

/// Row-band tiles over the mask's bounding box, one rayon task per tile.
///
/// Each tile owns a disjoint slice of the next buffer and reads the shared
/// previous buffers, so tiles are embarrassingly parallel within a step.
pub(crate) struct TiledKernel {
    pub rows_per_tile: usize,
}

impl StencilKernel for TiledKernel {
    fn step(
        &self,
        next: &mut [f64],
        prev: &[f64],
        prev2: &[f64],
        mask: &[bool],
        pass: &StencilPass,
    ) {
        let (x0, x1) = pass.x_range;
        if x1 < x0 {
            return;
        }
        let band = self.rows_per_tile.max(1) * pass.stride;
        next[x0 * pass.stride..(x1 + 1) * pass.stride]
            .par_chunks_mut(band)
            .enumerate()
            .for_each(|(tile, chunk)| {
                let tile_row = x0 + tile * self.rows_per_tile.max(1);
                for (offset, next_row) in chunk.chunks_mut(pass.stride).enumerate() {
                    update_row(next_row, prev, prev2, mask, tile_row + offset, pass);
                }
            });
    }
}
