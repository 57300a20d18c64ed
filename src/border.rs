//! Closing the diagram along the rectangle.
//!
//! The perimeter is walked counter-clockwise from the bottom-left corner. Every point where a
//! clipped edge meets a side splits that side, and each piece between two consecutive points
//! becomes a border edge owned by the cell it bounds.

use crate::bounds::{BoundingBox, Side};
use crate::diagram::{Edge, Point};
use crate::geometry::{dist_sq, Tolerance};

/// A point on one side of the rectangle, with the sites of the edges ending there.
struct WalkPoint {
    offset: f64,
    pos: [f64; 2],
    sites: Vec<usize>,
}

/// Border edges for the clipped `edges`, in walk order.
///
/// With no sites at all the four rectangle sides are returned without an owner.
pub fn make_border_edges(
    edges: &[Edge],
    sites: &[[f64; 2]],
    bounds: &BoundingBox,
    tol: &Tolerance,
) -> Vec<Edge> {
    let mut border = Vec::new();

    for side in Side::ALL {
        let walk = side_points(side, edges, bounds, tol);
        for pair in walk.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if tol.same_point(a.pos, b.pos) {
                continue;
            }
            let mid = [(a.pos[0] + b.pos[0]) * 0.5, (a.pos[1] + b.pos[1]) * 0.5];
            let owner = nearest(a.sites.iter().chain(&b.sites).copied(), sites, mid)
                .or_else(|| nearest(0..sites.len(), sites, mid));

            border.push(Edge {
                start: Point::classified(a.pos[0], a.pos[1], bounds, tol),
                end: Point::classified(b.pos[0], b.pos[1], bounds, tol),
                left: owner,
                right: None,
            });
        }
    }

    tracing::trace!(count = border.len(), "border edges");
    border
}

/// Corners and edge endpoints on `side`, sorted along the walk with coincident points merged.
fn side_points(side: Side, edges: &[Edge], bounds: &BoundingBox, tol: &Tolerance) -> Vec<WalkPoint> {
    let mut points = Vec::new();

    for corner in [side.start_corner(), side.end_corner()] {
        if let Some(pos) = bounds.corner(corner) {
            points.push(WalkPoint {
                offset: side.walk_offset(bounds, pos),
                pos,
                sites: Vec::new(),
            });
        }
    }

    for e in edges {
        for p in [e.start, e.end] {
            if p.border.sides().contains(&side) {
                points.push(WalkPoint {
                    offset: side.walk_offset(bounds, p.pos()),
                    pos: p.pos(),
                    sites: e.left.into_iter().chain(e.right).collect(),
                });
            }
        }
    }

    points.sort_by(|a, b| a.offset.total_cmp(&b.offset));

    let mut merged: Vec<WalkPoint> = Vec::with_capacity(points.len());
    for p in points {
        match merged.last_mut() {
            Some(last) if tol.approx_eq(last.offset, p.offset) => last.sites.extend(p.sites),
            _ => merged.push(p),
        }
    }
    merged
}

/// The candidate site closest to `p`; ties go to the first candidate.
fn nearest(candidates: impl Iterator<Item = usize>, sites: &[[f64; 2]], p: [f64; 2]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for i in candidates {
        let d = dist_sq(sites[i], p);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BorderLocation;

    fn bounds() -> BoundingBox {
        BoundingBox::new([0.0, 0.0], [10.0, 10.0])
    }

    #[test]
    fn test_empty_rectangle_gives_four_sides() {
        let tol = Tolerance::default();
        let border = make_border_edges(&[], &[], &bounds(), &tol);
        assert_eq!(border.len(), 4);
        assert!(border.iter().all(|e| e.left.is_none() && e.right.is_none()));
        assert_eq!(border[0].start.border, BorderLocation::BottomLeft);
        assert_eq!(border[0].end.border, BorderLocation::BottomRight);
        assert_eq!(border[3].end.border, BorderLocation::BottomLeft);
    }

    #[test]
    fn test_single_site_owns_every_side() {
        let tol = Tolerance::default();
        let border = make_border_edges(&[], &[[3.0, 3.0]], &bounds(), &tol);
        assert_eq!(border.len(), 4);
        assert!(border.iter().all(|e| e.left == Some(0)));
    }

    #[test]
    fn test_vertical_split() {
        let tol = Tolerance::default();
        let b = bounds();
        let sites = [[2.0, 5.0], [8.0, 5.0]];
        // Bisector x = 5, walked downwards with site 1 on its left.
        let split = Edge {
            start: Point::classified(5.0, 10.0, &b, &tol),
            end: Point::classified(5.0, 0.0, &b, &tol),
            left: Some(1),
            right: Some(0),
        };
        let border = make_border_edges(&[split], &sites, &b, &tol);
        assert_eq!(border.len(), 6);

        let owners: Vec<_> = border.iter().map(|e| e.left).collect();
        assert_eq!(
            owners,
            vec![Some(0), Some(1), Some(1), Some(1), Some(0), Some(0)]
        );
        assert_eq!(border[0].end.pos(), [5.0, 0.0]);
        assert_eq!(border[0].end.border, BorderLocation::Bottom);
    }

    #[test]
    fn test_edge_into_corner_does_not_split() {
        let tol = Tolerance::default();
        let b = bounds();
        let sites = [[2.0, 8.0], [8.0, 2.0]];
        let diagonal = Edge {
            start: Point::classified(0.0, 0.0, &b, &tol),
            end: Point::classified(10.0, 10.0, &b, &tol),
            left: Some(0),
            right: Some(1),
        };
        let border = make_border_edges(&[diagonal], &sites, &b, &tol);
        assert_eq!(border.len(), 4);
        assert_eq!(border[0].left, Some(1));
        assert_eq!(border[1].left, Some(1));
        assert_eq!(border[2].left, Some(0));
        assert_eq!(border[3].left, Some(0));
    }
}
