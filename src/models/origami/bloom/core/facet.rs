//! Triangular facets derived from the crease set.

use std::collections::BTreeSet;

use super::{crease::Crease, point::PointId};

/// An unordered triple of vertices bounding a triangular face.
///
/// Vertices are stored sorted so that equality sees through orientation,
/// mirroring [`Crease`]'s unordered-pair identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Facet {
    vertices: [PointId; 3],
}

impl Facet {
    fn new(p: PointId, q: PointId, r: PointId) -> Self {
        let mut vertices = [p, q, r];
        vertices.sort_unstable();
        Self { vertices }
    }

    /// The three vertices, in canonical order.
    #[must_use]
    pub fn vertices(&self) -> [PointId; 3] {
        self.vertices
    }

    /// The same facet re-tagged into wedge `k`.
    pub(crate) fn in_wedge(&self, k: u32) -> Self {
        let [p, q, r] = self.vertices;
        Self::new(p.in_wedge(k), q.in_wedge(k), r.in_wedge(k))
    }
}

/// Derives the facet set of a single wedge from its creases.
///
/// Two creases sharing exactly one endpoint close a triangle when the crease
/// connecting their other two endpoints also exists. Quadratic in the crease
/// count, which stays in the low hundreds for realistic patterns.
///
/// Exactly collinear triples are rejected outright: a zero-area triple is
/// not a face, whatever crease set it came from.
pub(crate) fn wedge_facets(creases: &BTreeSet<Crease>) -> BTreeSet<Facet> {
    let mut facets = BTreeSet::new();

    for first in creases {
        for second in creases {
            let Some(shared) = first.shared_endpoint(second) else {
                continue;
            };
            let p = first.other_endpoint(shared);
            let q = second.other_endpoint(shared);
            if !collinear(shared, p, q) && creases.contains(&Crease::new(p, q)) {
                facets.insert(Facet::new(shared, p, q));
            }
        }
    }

    facets
}

/// Exact collinearity test on half-step grid coordinates.
fn collinear(p: PointId, q: PointId, r: PointId) -> bool {
    let (ax, ay) = (q.half_i() - p.half_i(), q.half_j() - p.half_j());
    let (bx, by) = (r.half_i() - p.half_i(), r.half_j() - p.half_j());
    ax * by - ay * bx == 0
}
