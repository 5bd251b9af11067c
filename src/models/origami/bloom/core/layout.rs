//! The coordinate transform pipeline.
//!
//! Pattern vertices carry grid identities; plotting needs 2D coordinates.
//! The pipeline maps one to the other in a fixed stage order:
//!
//! slant → translate → scale → radial duplicate → rotate
//!
//! Each stage consumes the previous stage's [`CoordinateMap`] and produces a
//! new one, so the ordering dependency is visible in the data flow rather
//! than hidden in shared mutable state. The stage order is load-bearing: the
//! slant shears the wedge grid into its angular footprint, the translation
//! centers the central polygon's side on the origin, the scale applies the
//! pattern size, and only then are wedge copies fanned out and rotated into
//! place.

use std::collections::BTreeMap;

use super::point::PointId;

/// A 2D plot coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Ordered association from vertex identity to its current 2D coordinate.
pub type CoordinateMap = BTreeMap<PointId, PlotPoint>;

/// Seeds the pipeline: each wedge vertex starts at its raw grid coordinate.
pub(crate) fn initial_map<'a>(points: impl IntoIterator<Item = &'a PointId>) -> CoordinateMap {
    points
        .into_iter()
        .map(|&id| {
            (
                id,
                PlotPoint {
                    x: id.grid_i(),
                    y: id.grid_j(),
                },
            )
        })
        .collect()
}

/// Shears the grid: the i-axis stays fixed, the j-axis slants by `alpha`.
///
/// Applies the basis `[[1, cos α], [0, sin α]]` to every coordinate.
pub(crate) fn slant(map: CoordinateMap, alpha: f64) -> CoordinateMap {
    let (cos, sin) = (alpha.cos(), alpha.sin());
    map.into_iter()
        .map(|(id, p)| {
            (
                id,
                PlotPoint {
                    x: p.x + p.y * cos,
                    y: p.y * sin,
                },
            )
        })
        .collect()
}

/// Translates every coordinate by `(dx, dy)`.
pub(crate) fn translate(map: CoordinateMap, dx: f64, dy: f64) -> CoordinateMap {
    map.into_iter()
        .map(|(id, p)| {
            (
                id,
                PlotPoint {
                    x: p.x + dx,
                    y: p.y + dy,
                },
            )
        })
        .collect()
}

/// Scales every coordinate uniformly by `factor`.
pub(crate) fn scale(map: CoordinateMap, factor: f64) -> CoordinateMap {
    map.into_iter()
        .map(|(id, p)| {
            (
                id,
                PlotPoint {
                    x: p.x * factor,
                    y: p.y * factor,
                },
            )
        })
        .collect()
}

/// Fans the wedge out into `sides` radial copies.
///
/// Every copy initially shares the wedge coordinate; the per-wedge rotation
/// is a separate stage.
pub(crate) fn duplicate_radially(map: CoordinateMap, sides: u32) -> CoordinateMap {
    let mut duplicated = CoordinateMap::new();
    for (id, p) in map {
        for k in 0..sides {
            duplicated.insert(id.in_wedge(k), p);
        }
    }
    duplicated
}

/// Rotates each vertex counterclockwise about the origin by `k · alpha`,
/// where `k` is the vertex's wedge index.
pub(crate) fn rotate_wedges(map: CoordinateMap, alpha: f64) -> CoordinateMap {
    map.into_iter()
        .map(|(id, p)| {
            let angle = alpha * f64::from(id.wedge());
            let (sin, cos) = angle.sin_cos();
            (
                id,
                PlotPoint {
                    x: p.x * cos - p.y * sin,
                    y: p.x * sin + p.y * cos,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_3, TAU};

    fn single_point_map(i: i32, j: i32) -> CoordinateMap {
        initial_map(&[PointId::full(i, j)])
    }

    #[test]
    fn slant_fixes_the_i_axis() {
        let map = slant(single_point_map(3, 0), FRAC_PI_3);
        let p = map.values().next().expect("map has one entry");
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn slant_shears_the_j_axis() {
        let map = slant(single_point_map(0, 1), FRAC_PI_3);
        let p = map.values().next().expect("map has one entry");
        assert_relative_eq!(p.x, FRAC_PI_3.cos());
        assert_relative_eq!(p.y, FRAC_PI_3.sin());
    }

    #[test]
    fn duplication_shares_the_wedge_coordinate() {
        let map = duplicate_radially(single_point_map(1, 1), 5);
        assert_eq!(map.len(), 5);

        let original = map[&PointId::full(1, 1)];
        for (id, p) in &map {
            assert_eq!(p.x, original.x, "wedge {} drifted", id.wedge());
            assert_eq!(p.y, original.y, "wedge {} drifted", id.wedge());
        }
    }

    #[test]
    fn rotation_leaves_wedge_zero_in_place() {
        let alpha = TAU / 6.0;
        let fanned = duplicate_radially(single_point_map(2, 0), 6);
        let rotated = rotate_wedges(fanned, alpha);

        let fixed = rotated[&PointId::full(2, 0)];
        assert_relative_eq!(fixed.x, 2.0);
        assert_relative_eq!(fixed.y, 0.0, epsilon = 1e-12);

        // Wedge 3 is half a turn around.
        let opposite = rotated[&PointId::full(2, 0).in_wedge(3)];
        assert_relative_eq!(opposite.x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(opposite.y, 0.0, epsilon = 1e-12);
    }
}
