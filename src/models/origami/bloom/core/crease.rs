//! Creases and their classification.

use std::collections::BTreeSet;

use thiserror::Error;

use super::point::PointId;

/// Candidate neighbor offsets, in half-steps: the `+1/+1` diagonal, the
/// `+1` horizontal, the `+1` vertical, and the three half-length offsets.
const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(2, 2), (2, 0), (0, 2), (1, 1), (-1, 1), (1, -1)];

/// An unordered pair of vertices, `{A, B} = {B, A}`.
///
/// Endpoints are stored in sorted order so that equality and ordering see
/// through the orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Crease {
    a: PointId,
    b: PointId,
}

impl Crease {
    /// Creates a crease between two distinct vertices.
    pub(crate) fn new(p: PointId, q: PointId) -> Self {
        debug_assert!(p != q, "a crease cannot connect a vertex to itself");
        if p <= q {
            Self { a: p, b: q }
        } else {
            Self { a: q, b: p }
        }
    }

    /// Both endpoints, in canonical order.
    #[must_use]
    pub fn endpoints(&self) -> (PointId, PointId) {
        (self.a, self.b)
    }

    /// The endpoint shared with `other`, if the creases share exactly one.
    pub(crate) fn shared_endpoint(&self, other: &Self) -> Option<PointId> {
        if self == other {
            return None;
        }
        for p in [self.a, self.b] {
            if p == other.a || p == other.b {
                return Some(p);
            }
        }
        None
    }

    /// The endpoint that is not `p`.
    pub(crate) fn other_endpoint(&self, p: PointId) -> PointId {
        if self.a == p { self.b } else { self.a }
    }

    /// The same crease re-tagged into wedge `k`.
    pub(crate) fn in_wedge(&self, k: u32) -> Self {
        Self::new(self.a.in_wedge(k), self.b.in_wedge(k))
    }
}

/// Fold-pattern role of a crease.
///
/// Every crease belongs to exactly one class; a crease that fits none of the
/// classification rules is a construction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreaseClass {
    /// Pattern boundary: negative-diagonal wedge borders and the top row.
    Edge,
    /// Axis-aligned crease one grid unit long.
    Orthogonal,
    /// Diagonal crease, full or half length.
    Diagonal,
}

/// Mountain or valley fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldDirection {
    Mountain,
    Valley,
}

impl CreaseClass {
    /// The fold direction of this class, or `None` for boundary edges.
    ///
    /// Diagonal creases fold as mountains and orthogonal creases as valleys;
    /// `invert` swaps the assignment.
    #[must_use]
    pub fn fold_direction(self, invert: bool) -> Option<FoldDirection> {
        let direction = match self {
            Self::Edge => return None,
            Self::Orthogonal => FoldDirection::Valley,
            Self::Diagonal => FoldDirection::Mountain,
        };
        Some(match (direction, invert) {
            (d, false) => d,
            (FoldDirection::Mountain, true) => FoldDirection::Valley,
            (FoldDirection::Valley, true) => FoldDirection::Mountain,
        })
    }
}

/// A crease that matched none of the classification rules.
///
/// This signals malformed input geometry and is always fatal: the pattern
/// builder never drops an unclassifiable crease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("crease {a}–{b} matches no classification rule")]
pub struct ClassifyError {
    pub a: PointId,
    pub b: PointId,
}

/// Builds the crease set of a single wedge.
///
/// Each vertex proposes its six candidate neighbors; a crease exists exactly
/// when both endpoints are in the vertex set. Unordered storage rules out
/// duplicates.
pub(crate) fn wedge_creases(points: &BTreeSet<PointId>) -> BTreeSet<Crease> {
    let mut creases = BTreeSet::new();

    for &point in points {
        for (di, dj) in NEIGHBOR_OFFSETS {
            let neighbor = point.offset(di, dj);
            if points.contains(&neighbor) {
                creases.insert(Crease::new(point, neighbor));
            }
        }
    }

    creases
}

/// Classifies a crease into exactly one [`CreaseClass`].
///
/// The rules are applied in order, on grid coordinates only (the wedge index
/// is ignored, so classification commutes with radial duplication):
///
/// 1. equal coordinate sums → negative-diagonal [`Edge`](CreaseClass::Edge)
/// 2. both endpoints at `j = H` → top [`Edge`](CreaseClass::Edge)
/// 3. equal `j`, unit `i` gap → [`Orthogonal`](CreaseClass::Orthogonal)
/// 4. equal `i`, unit `j` gap → [`Orthogonal`](CreaseClass::Orthogonal)
/// 5. two taxi blocks apart → [`Diagonal`](CreaseClass::Diagonal)
/// 6. half-unit gap in both axes, one taxi block apart →
///    [`Diagonal`](CreaseClass::Diagonal)
///
/// # Errors
///
/// Returns [`ClassifyError`] if the crease matches none of the rules.
pub(crate) fn classify(crease: &Crease, height_order: u32) -> Result<CreaseClass, ClassifyError> {
    let (p, q) = crease.endpoints();
    let (i, j) = (p.half_i(), p.half_j());
    let (i2, j2) = (q.half_i(), q.half_j());
    // All gaps below are in half-steps: a grid unit is 2, a half unit is 1.
    let top = 2 * height_order as i32;

    if i + j == i2 + j2 {
        Ok(CreaseClass::Edge)
    } else if j == top && j2 == top {
        Ok(CreaseClass::Edge)
    } else if j == j2 && (i - i2).abs() == 2 {
        Ok(CreaseClass::Orthogonal)
    } else if i == i2 && (j - j2).abs() == 2 {
        Ok(CreaseClass::Orthogonal)
    } else if (i + j - i2 - j2).abs() == 4 {
        Ok(CreaseClass::Diagonal)
    } else if (i + j - i2 - j2).abs() == 2 && (i - i2).abs() == 1 && (j - j2).abs() == 1 {
        Ok(CreaseClass::Diagonal)
    } else {
        Err(ClassifyError { a: p, b: q })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::origami::bloom::core::point::wedge_points;

    fn full(i: i32, j: i32) -> PointId {
        PointId::full(i, j)
    }

    fn half(i: i32, j: i32) -> PointId {
        PointId::from_half_steps(i, j, 0)
    }

    #[test]
    fn crease_identity_is_unordered() {
        let forward = Crease::new(full(0, 0), full(1, 0));
        let backward = Crease::new(full(1, 0), full(0, 0));
        assert_eq!(forward, backward);
    }

    #[test]
    fn classification_by_rule() {
        let h = 2;

        // Negative-diagonal boundary: (3, 0)–(2.5, 0.5).
        let border = Crease::new(full(3, 0), half(5, 1));
        assert_eq!(classify(&border, h), Ok(CreaseClass::Edge));

        // Top row: (0, 2)–(1, 2).
        let top = Crease::new(full(0, 2), full(1, 2));
        assert_eq!(classify(&top, h), Ok(CreaseClass::Edge));

        // Horizontal and vertical unit creases.
        let horizontal = Crease::new(full(0, 1), full(1, 1));
        assert_eq!(classify(&horizontal, h), Ok(CreaseClass::Orthogonal));
        let vertical = Crease::new(full(1, 0), full(1, 1));
        assert_eq!(classify(&vertical, h), Ok(CreaseClass::Orthogonal));

        // Full diagonal: (0, 0)–(1, 1).
        let diagonal = Crease::new(full(0, 0), full(1, 1));
        assert_eq!(classify(&diagonal, h), Ok(CreaseClass::Diagonal));

        // Half diagonal: (2, 0)–(2.5, 0.5).
        let half_diagonal = Crease::new(full(2, 0), half(5, 1));
        assert_eq!(classify(&half_diagonal, h), Ok(CreaseClass::Diagonal));
    }

    #[test]
    fn malformed_crease_is_a_hard_error() {
        // Three grid units apart matches no rule.
        let stray = Crease::new(full(0, 0), full(3, 0));
        let err = classify(&stray, 2).expect_err("stray crease must not classify");
        assert_eq!(err.to_string(), "crease (0, 0, 0)–(3, 0, 0) matches no classification rule");
    }

    #[test]
    fn every_wedge_crease_classifies() {
        for h in 0..6 {
            let points = wedge_points(h);
            for crease in wedge_creases(&points) {
                classify(&crease, h).expect("generated crease must classify");
            }
        }
    }

    #[test]
    fn classification_ignores_wedge_index() {
        let crease = Crease::new(full(0, 0), full(1, 1));
        let rotated = crease.in_wedge(4);
        assert_eq!(classify(&crease, 2), classify(&rotated, 2));
    }

    #[test]
    fn fold_directions() {
        assert_eq!(CreaseClass::Edge.fold_direction(false), None);
        assert_eq!(
            CreaseClass::Diagonal.fold_direction(false),
            Some(FoldDirection::Mountain)
        );
        assert_eq!(
            CreaseClass::Diagonal.fold_direction(true),
            Some(FoldDirection::Valley)
        );
        assert_eq!(
            CreaseClass::Orthogonal.fold_direction(true),
            Some(FoldDirection::Mountain)
        );
    }
}
