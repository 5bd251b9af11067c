//! Bloom pattern construction core.
//!
//! Construction runs in a fixed order: the wedge vertex set is defined, the
//! crease set is derived from vertex adjacency, facets are closed from
//! crease triples, and only then does the coordinate pipeline run (slant,
//! translate, scale, radial duplication, per-wedge rotation). Classification
//! of the duplicated crease set is the last step and is where malformed
//! geometry surfaces as a hard error.

mod crease;
mod facet;
mod layout;
mod point;

pub use crease::{ClassifyError, Crease, CreaseClass, FoldDirection};
pub use facet::Facet;
pub use layout::{CoordinateMap, PlotPoint};
pub use point::PointId;

use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::TAU;

use super::BloomParams;

/// A fully constructed bloom pattern.
///
/// Holds the vertex, crease, and facet sets of the complete radial pattern
/// together with a 2D coordinate for every vertex. Vertices on wedge seams
/// belong to both wedges under distinct identities that share a coordinate.
#[derive(Debug, Clone)]
pub struct Pattern {
    sides: u32,
    height_order: u32,
    points: BTreeSet<PointId>,
    creases: BTreeMap<Crease, CreaseClass>,
    facets: BTreeSet<Facet>,
    coordinates: CoordinateMap,
}

impl Pattern {
    /// Number of sides of the central polygon.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Number of facet rings per wedge.
    #[must_use]
    pub fn height_order(&self) -> u32 {
        self.height_order
    }

    /// All vertices of the full radial pattern.
    #[must_use]
    pub fn points(&self) -> &BTreeSet<PointId> {
        &self.points
    }

    /// All creases with their classification.
    #[must_use]
    pub fn creases(&self) -> &BTreeMap<Crease, CreaseClass> {
        &self.creases
    }

    /// All triangular facets of the full radial pattern.
    #[must_use]
    pub fn facets(&self) -> &BTreeSet<Facet> {
        &self.facets
    }

    /// The vertex-to-coordinate map after the full transform pipeline.
    #[must_use]
    pub fn coordinates(&self) -> &CoordinateMap {
        &self.coordinates
    }

    /// The plot coordinate of a single vertex.
    #[must_use]
    pub fn coordinate(&self, point: PointId) -> Option<PlotPoint> {
        self.coordinates.get(&point).copied()
    }

    /// The central polygon, one vertex per wedge in wedge order.
    ///
    /// These are the `(0, 0, k)` vertices; consecutive entries are one
    /// polygon side (of length `scale`) apart.
    #[must_use]
    pub fn central_polygon(&self) -> Vec<PlotPoint> {
        (0..self.sides)
            .filter_map(|k| self.coordinate(PointId::full(0, 0).in_wedge(k)))
            .collect()
    }
}

/// Builds the full pattern for validated parameters.
///
/// # Errors
///
/// Returns [`ClassifyError`] if any generated crease fails classification,
/// which signals malformed geometry and never happens for parameters
/// accepted by [`BloomParams::new`].
pub(crate) fn generate(params: &BloomParams) -> Result<Pattern, ClassifyError> {
    let sides = params.sides();
    let height_order = params.height_order();
    let alpha = TAU / f64::from(sides);

    // Wedge topology first; the coordinate pipeline never changes it.
    let wedge_points = point::wedge_points(height_order);
    let wedge_creases = crease::wedge_creases(&wedge_points);
    let wedge_facets = facet::wedge_facets(&wedge_creases);

    let map = layout::initial_map(&wedge_points);
    let map = layout::slant(map, alpha);
    let map = layout::translate(map, -0.5, apothem(alpha));
    let map = layout::scale(map, params.scale());
    let map = layout::duplicate_radially(map, sides);
    let coordinates = layout::rotate_wedges(map, alpha);

    let points: BTreeSet<_> = wedge_points
        .iter()
        .flat_map(|p| (0..sides).map(move |k| p.in_wedge(k)))
        .collect();

    let facets: BTreeSet<_> = wedge_facets
        .iter()
        .flat_map(|f| (0..sides).map(move |k| f.in_wedge(k)))
        .collect();

    let mut creases = BTreeMap::new();
    for wedge_crease in &wedge_creases {
        for k in 0..sides {
            let duplicate = wedge_crease.in_wedge(k);
            let class = crease::classify(&duplicate, height_order)?;
            creases.insert(duplicate, class);
        }
    }

    Ok(Pattern {
        sides,
        height_order,
        points,
        creases,
        facets,
        coordinates,
    })
}

/// Apothem of the unit-side central polygon, `1 / (2·tan(α/2))`.
///
/// Translating the wedge up by this much puts the polygon center at the
/// origin before the radial fan-out.
fn apothem(alpha: f64) -> f64 {
    1.0 / (2.0 * (alpha / 2.0).tan())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn pattern(sides: u32, height_order: u32, scale: f64) -> Pattern {
        let params = BloomParams::new(sides, height_order, scale).expect("params are valid");
        generate(&params).expect("generation should succeed")
    }

    #[test]
    fn hexagonal_second_order_pattern_has_sixty_facets() {
        // facets = m·(h² + 3h) = 6·(4 + 6) = 60
        let pattern = pattern(6, 2, 1.0);

        assert_eq!(pattern.facets().len(), 60);

        // Ten of them belong to wedge 0.
        let wedge_zero = pattern
            .facets()
            .iter()
            .filter(|f| f.vertices()[0].wedge() == 0)
            .count();
        assert_eq!(wedge_zero, 10);
    }

    #[test]
    fn radial_duplication_multiplies_counts_exactly() {
        let sides = 7u32;
        let height_order = 3u32;

        let wedge_points = point::wedge_points(height_order);
        let wedge_creases = crease::wedge_creases(&wedge_points);
        let wedge_facets = facet::wedge_facets(&wedge_creases);

        let pattern = pattern(sides, height_order, 1.0);

        let n = sides as usize;
        assert_eq!(pattern.points().len(), n * wedge_points.len());
        assert_eq!(pattern.creases().len(), n * wedge_creases.len());
        assert_eq!(pattern.facets().len(), n * wedge_facets.len());
    }

    #[test]
    fn facet_counts_follow_formula_across_parameters() {
        for sides in [3u32, 4, 5, 6, 8, 12] {
            for height_order in 0..5u32 {
                let pattern = pattern(sides, height_order, 1.0);
                let expected = sides * (height_order * height_order + 3 * height_order);
                assert_eq!(
                    pattern.facets().len() as u32,
                    expected,
                    "m={sides} h={height_order}"
                );
            }
        }
    }

    #[test]
    fn every_crease_is_classified() {
        // Pattern construction classifies every crease or fails loudly, so a
        // successful build is itself the property; spot-check the partition
        // is complete and nonempty for a representative pattern.
        let pattern = pattern(6, 2, 1.0);

        let edges = pattern
            .creases()
            .values()
            .filter(|c| **c == CreaseClass::Edge)
            .count();
        let orthogonal = pattern
            .creases()
            .values()
            .filter(|c| **c == CreaseClass::Orthogonal)
            .count();
        let diagonal = pattern
            .creases()
            .values()
            .filter(|c| **c == CreaseClass::Diagonal)
            .count();

        assert!(edges > 0 && orthogonal > 0 && diagonal > 0);
        assert_eq!(edges + orthogonal + diagonal, pattern.creases().len());
    }

    #[test]
    fn transform_pipeline_round_trips() {
        let scale = 27.5;
        let sides = 6u32;
        let alpha = TAU / f64::from(sides);
        let pattern = pattern(sides, 2, scale);

        for &id in pattern.points() {
            let p = pattern.coordinate(id).expect("every point has a coordinate");

            // Invert each stage in reverse order: rotate, scale, translate, slant.
            let angle = -alpha * f64::from(id.wedge());
            let (sin, cos) = angle.sin_cos();
            let (x, y) = (p.x * cos - p.y * sin, p.x * sin + p.y * cos);

            let (x, y) = (x / scale, y / scale);
            let (x, y) = (x + 0.5, y - apothem(alpha));

            let j = y / alpha.sin();
            let i = x - j * alpha.cos();

            assert_relative_eq!(i, id.grid_i(), epsilon = 1e-9);
            assert_relative_eq!(j, id.grid_j(), epsilon = 1e-9);
        }
    }

    #[test]
    fn radial_duplication_is_rotation_equivariant() {
        let sides = 5u32;
        let alpha = TAU / f64::from(sides);
        let pattern = pattern(sides, 3, 4.0);

        for &id in pattern.points() {
            if id.wedge() != 0 {
                continue;
            }
            let base = pattern.coordinate(id).expect("wedge 0 coordinate");

            for k in 1..sides {
                let copy = pattern
                    .coordinate(id.in_wedge(k))
                    .expect("duplicate coordinate");

                let angle = alpha * f64::from(k);
                let (sin, cos) = angle.sin_cos();
                assert_relative_eq!(copy.x, base.x * cos - base.y * sin, epsilon = 1e-9);
                assert_relative_eq!(copy.y, base.x * sin + base.y * cos, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn central_polygon_has_unit_sides_times_scale() {
        let scale = 50.0;
        let pattern = pattern(8, 1, scale);
        let polygon = pattern.central_polygon();

        assert_eq!(polygon.len(), 8);
        for pair in polygon.windows(2) {
            let side = ((pair[1].x - pair[0].x).powi(2) + (pair[1].y - pair[0].y).powi(2)).sqrt();
            assert_relative_eq!(side, scale, epsilon = 1e-9);
        }
    }

    #[test]
    fn zeroth_order_pattern_is_the_bare_polygon() {
        let pattern = pattern(6, 0, 1.0);

        assert!(pattern.facets().is_empty());
        assert_eq!(pattern.points().len(), 12); // (0,0,k) and (1,0,k)
        assert_eq!(pattern.creases().len(), 6);
        assert!(
            pattern
                .creases()
                .values()
                .all(|class| *class == CreaseClass::Edge)
        );
    }
}
