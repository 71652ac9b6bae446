use rayon::prelude::*;

use crate::{
    animation::rng::Rng64,
    assets::source::SourceImage,
    foundation::core::{Point, Range},
    sampling::point::FieldPoint,
};

/// Grid and per-point randomization parameters for [`sample_points`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleOpts {
    /// Cell edge in pixels. Must be non-zero; validated by the caller.
    pub grid: u32,
    /// Disc radius range.
    pub point_radius: Range,
    /// Orbit radius range.
    pub orbit_radius: Range,
}

/// Sample the opaque silhouette of `image` into a point set.
///
/// A `grid x grid` lattice is laid over the image, offset by half of the leftover
/// `width % grid` / `height % grid`. A cell yields a point when strictly more than half
/// of its `grid * grid` pixels have non-zero alpha; pixels past the image edge count as
/// transparent. Each point starts at a random position inside the image bounds.
#[tracing::instrument(skip(image, rng), fields(width = image.width(), height = image.height()))]
pub fn sample_points(image: &SourceImage, opts: &SampleOpts, rng: &mut Rng64) -> Vec<FieldPoint> {
    let g = opts.grid;
    debug_assert!(g > 0, "grid must be validated before sampling");
    let (w, h) = (image.width(), image.height());
    let margin_x = (w % g) / 2;
    let margin_y = (h % g) / 2;

    let cols: Vec<u32> = (margin_x..w).step_by(g as usize).collect();
    let rows: Vec<u32> = (margin_y..h).step_by(g as usize).collect();
    let cell_px = u64::from(g) * u64::from(g);

    // Opacity classification is independent per cell row; randomization below stays
    // sequential so a seed always yields the same field.
    let occupied: Vec<Vec<bool>> = rows
        .par_iter()
        .map(|&gy| {
            let mut counts = vec![0u64; cols.len()];
            for y in gy..gy.saturating_add(g).min(h) {
                let row = image.row(y);
                for (ci, &gx) in cols.iter().enumerate() {
                    let x_end = gx.saturating_add(g).min(w);
                    counts[ci] += row[gx as usize * 4..x_end as usize * 4]
                        .chunks_exact(4)
                        .filter(|px| px[3] > 0)
                        .count() as u64;
                }
            }
            counts.into_iter().map(|c| c * 2 > cell_px).collect()
        })
        .collect();

    let half = f64::from(g) / 2.0;
    let mut points = Vec::new();
    for (ri, &gy) in rows.iter().enumerate() {
        for (ci, &gx) in cols.iter().enumerate() {
            if !occupied[ri][ci] {
                continue;
            }
            let home = Point::new(f64::from(gx) + half, f64::from(gy) + half);
            let current = Point::new(rng.range(0.0, f64::from(w)), rng.range(0.0, f64::from(h)));
            let radius = opts.point_radius.sample(rng);
            let orbit_radius = opts.orbit_radius.sample(rng);
            points.push(FieldPoint::new(home, current, radius, orbit_radius));
        }
    }

    tracing::debug!(
        points = points.len(),
        cells = rows.len() * cols.len(),
        "sampled silhouette"
    );
    points
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/sampler.rs"]
mod tests;
