use crate::bounds::BoundingBox;
use crate::diagram::{Edge, Point};
use crate::geometry::{clip_line, point_at, Tolerance};
use crate::sweep::{RawDiagram, RawEdge};

/// Bounds every raw edge to the rectangle.
///
/// Vertices inside the rectangle are kept as they are, everything else is replaced by the
/// intersection with the rectangle sides. Edges that miss the rectangle or shrink to a single
/// point are dropped. Output order follows the raw edge order.
pub fn clip_edges(
    raw: &RawDiagram,
    sites: &[[f64; 2]],
    bounds: &BoundingBox,
    tol: &Tolerance,
) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(raw.edges.len());
    for e in &raw.edges {
        if let Some(edge) = clip_edge(e, raw, sites, bounds, tol) {
            edges.push(edge);
        }
    }
    tracing::trace!(raw = raw.edges.len(), kept = edges.len(), "clipped edges");
    edges
}

fn clip_edge(
    e: &RawEdge,
    raw: &RawDiagram,
    sites: &[[f64; 2]],
    bounds: &BoundingBox,
    tol: &Tolerance,
) -> Option<Edge> {
    let l = sites[e.left];
    let r = sites[e.right];
    // Bisector direction with `left` on the left-hand side.
    let bisector = [l[1] - r[1], r[0] - l[0]];

    let start = e.start.map(|v| raw.vertices[v]);
    let end = e.end.map(|v| raw.vertices[v]);

    let (origin, direction, t_min, t_max) = match (start, end) {
        (Some(a), Some(b)) => {
            if tol.same_point(a, b) {
                return None;
            }
            (a, [b[0] - a[0], b[1] - a[1]], 0.0, 1.0)
        }
        (Some(a), None) => (a, bisector, 0.0, f64::INFINITY),
        (None, Some(b)) => (b, bisector, f64::NEG_INFINITY, 0.0),
        (None, None) => {
            let mid = [(l[0] + r[0]) * 0.5, (l[1] + r[1]) * 0.5];
            (mid, bisector, f64::NEG_INFINITY, f64::INFINITY)
        }
    };

    let clip = clip_line(origin, direction, t_min, t_max, bounds, tol)?;

    let p0 = match start {
        Some(a) if clip.t0 == t_min => a,
        _ => point_at(origin, direction, clip.t0),
    };
    let p1 = match end {
        Some(b) if clip.t1 == t_max => b,
        _ => point_at(origin, direction, clip.t1),
    };

    let p0 = Point::classified(p0[0], p0[1], bounds, tol);
    let p1 = Point::classified(p1[0], p1[1], bounds, tol);
    if tol.same_point(p0.pos(), p1.pos()) {
        return None;
    }

    Some(Edge {
        start: p0,
        end: p1,
        left: Some(e.left),
        right: Some(e.right),
    })
}
