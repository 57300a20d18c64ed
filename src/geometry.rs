//! Geometric predicates shared by the sweep, the clipper and the border walk.
//!
//! All functions take the [`Tolerance`] explicitly so that results depend on nothing but
//! their arguments.

use crate::bounds::BoundingBox;
use crate::error::{Result, VoronoiError};

/// Comparison thresholds used by every predicate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Absolute distance under which two coordinates are considered equal.
    pub epsilon: f64,
    /// Threshold on twice the signed triangle area under which three sites count as collinear.
    pub collinear: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            collinear: 1e-12,
        }
    }
}

impl Tolerance {
    pub fn new(epsilon: f64, collinear: f64) -> Result<Self> {
        let tol = Self { epsilon, collinear };
        tol.validate()?;
        Ok(tol)
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.epsilon) || !ok(self.collinear) {
            return Err(VoronoiError::InvalidTolerance {
                epsilon: self.epsilon,
                collinear: self.collinear,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.epsilon
    }

    #[inline]
    pub fn same_point(&self, a: [f64; 2], b: [f64; 2]) -> bool {
        self.approx_eq(a[0], b[0]) && self.approx_eq(a[1], b[1])
    }
}

/// X coordinate where the arc of `left` meets the arc of `right` on the beach line when the
/// sweep line is at `sweep_y`.
///
/// The sweep moves towards decreasing y, so both sites satisfy `site.y >= sweep_y`. A site lying
/// on the sweep line has a degenerate arc (a vertical ray) and the breakpoint is its own x.
pub fn breakpoint_x(left: [f64; 2], right: [f64; 2], sweep_y: f64) -> f64 {
    let d_left = left[1] - sweep_y;
    let d_right = right[1] - sweep_y;

    if d_right <= 0.0 {
        return right[0];
    }
    if d_left <= 0.0 {
        return left[0];
    }
    if left[1] == right[1] {
        return (left[0] + right[0]) * 0.5;
    }

    // Solve in coordinates relative to `left` and pick the root where `left` is the lower
    // parabola on the left side. Each branch avoids cancellation for its sign of `dx`.
    let dx = right[0] - left[0];
    let dy = right[1] - left[1];
    let dist_sq = dx * dx + dy * dy;

    let u = if dx > 0.0 {
        (dx * dx + dy * d_right) / (dx + (d_right * dist_sq / d_left).sqrt())
    } else {
        ((d_left * d_right * dist_sq).sqrt() - dx * d_left) / dy
    };
    left[0] + u
}

/// Circumcenter of three points, or `None` when they are collinear.
pub fn circumcenter(a: [f64; 2], b: [f64; 2], c: [f64; 2], tol: &Tolerance) -> Option<[f64; 2]> {
    let bx = b[0] - a[0];
    let by = b[1] - a[1];
    let cx = c[0] - a[0];
    let cy = c[1] - a[1];
    let d = 2.0 * (bx * cy - by * cx);
    if d.abs() <= tol.collinear {
        return None;
    }
    let hb = bx * bx + by * by;
    let hc = cx * cx + cy * cy;
    Some([(cy * hb - by * hc) / d + a[0], (bx * hc - cx * hb) / d + a[1]])
}

/// A candidate Voronoi vertex produced by three consecutive beach-line arcs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: [f64; 2],
    /// Sweep position at which the middle arc vanishes: the lowest point of the circle.
    pub bottom: f64,
}

/// Circle event for the arcs of `a`, `b`, `c` (left to right on the beach line).
///
/// Returns `None` when the sites are collinear or when the two breakpoints around `b` move
/// apart, in which case the middle arc can never collapse.
pub fn circumcircle_bottom(a: [f64; 2], b: [f64; 2], c: [f64; 2], tol: &Tolerance) -> Option<Circle> {
    let ax = a[0] - b[0];
    let ay = a[1] - b[1];
    let cx = c[0] - b[0];
    let cy = c[1] - b[1];

    let d = 2.0 * (ax * cy - ay * cx);
    if d <= tol.collinear {
        return None;
    }

    let ha = ax * ax + ay * ay;
    let hc = cx * cx + cy * cy;
    let x = (cy * ha - ay * hc) / d;
    let y = (ax * hc - cx * ha) / d;
    let radius = (x * x + y * y).sqrt();

    Some(Circle {
        center: [x + b[0], y + b[1]],
        bottom: y + b[1] - radius,
    })
}

/// Parameter interval of a clipped line `origin + t * direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clip {
    pub t0: f64,
    pub t1: f64,
}

/// Liang–Barsky clipping of `origin + t * direction`, `t` in `[t_min, t_max]`, against the
/// rectangle. Infinite limits clip rays and full lines.
///
/// Returns `None` when no part of the line lies inside or on the rectangle.
pub fn clip_line(
    origin: [f64; 2],
    direction: [f64; 2],
    t_min: f64,
    t_max: f64,
    bounds: &BoundingBox,
    tol: &Tolerance,
) -> Option<Clip> {
    let mut t0 = t_min;
    let mut t1 = t_max;

    let checks = [
        (-direction[0], origin[0] - bounds.min[0]),
        (direction[0], bounds.max[0] - origin[0]),
        (-direction[1], origin[1] - bounds.min[1]),
        (direction[1], bounds.max[1] - origin[1]),
    ];

    for (p, q) in checks {
        if p == 0.0 {
            if q < -tol.epsilon {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }

    if !t0.is_finite() || !t1.is_finite() {
        return None;
    }
    Some(Clip { t0, t1 })
}

#[inline]
pub(crate) fn point_at(origin: [f64; 2], direction: [f64; 2], t: f64) -> [f64; 2] {
    [origin[0] + t * direction[0], origin[1] + t * direction[1]]
}

#[inline]
pub(crate) fn dist_sq(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}
