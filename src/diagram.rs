use crate::bounds::{BorderLocation, BoundingBox};
use crate::geometry::Tolerance;

/// An input point generating one Voronoi cell. Its handle is its index in the input slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub x: f64,
    pub y: f64,
}

impl Site {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn pos(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Site {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<(f64, f64)> for Site {
    fn from(p: (f64, f64)) -> Self {
        Self::new(p.0, p.1)
    }
}

/// An edge endpoint together with its position relative to the bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub border: BorderLocation,
}

impl Point {
    /// Classifies `(x, y)` against `bounds` and snaps it onto the side it was found on.
    pub fn classified(x: f64, y: f64, bounds: &BoundingBox, tol: &Tolerance) -> Self {
        let border = bounds.locate(x, y, tol);
        let [x, y] = bounds.snap(x, y, border);
        Self { x, y, border }
    }

    #[inline]
    pub fn pos(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// A finite edge of the bounded diagram.
///
/// `left` is the site whose cell lies to the left of the directed segment `start -> end`, and
/// `right` the one on its right. Border edges run counter-clockwise around the rectangle with
/// their cell on the left and nothing on the right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl Edge {
    pub fn is_border(&self) -> bool {
        self.right.is_none()
    }

    /// Returns true if the edge separates or bounds the cell of `site`.
    pub fn touches_site(&self, site: usize) -> bool {
        self.left == Some(site) || self.right == Some(site)
    }

    /// The site across this edge from `site`, if any.
    pub fn other_site(&self, site: usize) -> Option<usize> {
        if self.left == Some(site) {
            self.right
        } else if self.right == Some(site) {
            self.left
        } else {
            None
        }
    }

    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self) -> [f64; 2] {
        [
            (self.start.x + self.end.x) * 0.5,
            (self.start.y + self.end.y) * 0.5,
        ]
    }
}

/// Whether the rectangle perimeter is emitted as explicit edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderMode {
    /// Close every cell with edges along the rectangle sides.
    #[default]
    MakeBorderEdges,
    /// Return only the clipped bisectors; cells touching the rectangle stay open.
    DoNotMakeBorderEdges,
}
