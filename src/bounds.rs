use crate::error::{Result, VoronoiError};
use crate::geometry::Tolerance;

/// Axis-aligned bounding rectangle of the tessellation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// Creates a validated bounding box from its four extents.
    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let bounds = Self::new([min_x, min_y], [max_x, max_y]);
        bounds.validate()?;
        Ok(bounds)
    }

    /// Rejects non-finite or zero-area rectangles.
    pub fn validate(&self) -> Result<()> {
        let finite = self.min.iter().chain(self.max.iter()).all(|v| v.is_finite());
        if !finite || self.min[0] >= self.max[0] || self.min[1] >= self.max[1] {
            return Err(VoronoiError::InvalidBounds {
                min_x: self.min[0],
                min_y: self.min[1],
                max_x: self.max[0],
                max_y: self.max[1],
            });
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        ]
    }

    /// Returns true if the point lies inside or on the rectangle, up to `tol.epsilon`.
    pub fn contains(&self, x: f64, y: f64, tol: &Tolerance) -> bool {
        x >= self.min[0] - tol.epsilon
            && x <= self.max[0] + tol.epsilon
            && y >= self.min[1] - tol.epsilon
            && y <= self.max[1] + tol.epsilon
    }

    /// Coordinates of a rectangle corner.
    pub fn corner(&self, location: BorderLocation) -> Option<[f64; 2]> {
        match location {
            BorderLocation::BottomLeft => Some([self.min[0], self.min[1]]),
            BorderLocation::BottomRight => Some([self.max[0], self.min[1]]),
            BorderLocation::TopRight => Some([self.max[0], self.max[1]]),
            BorderLocation::TopLeft => Some([self.min[0], self.max[1]]),
            _ => None,
        }
    }

    /// Classifies a point against the rectangle sides.
    ///
    /// Corner tags are only given to points matching both coordinates of a corner.
    /// Any other point within `tol.epsilon` of a side gets that side's tag.
    pub fn locate(&self, x: f64, y: f64, tol: &Tolerance) -> BorderLocation {
        let left = tol.approx_eq(x, self.min[0]);
        let right = tol.approx_eq(x, self.max[0]);
        let bottom = tol.approx_eq(y, self.min[1]);
        let top = tol.approx_eq(y, self.max[1]);

        match (left, right, bottom, top) {
            (true, _, true, _) => BorderLocation::BottomLeft,
            (true, _, _, true) => BorderLocation::TopLeft,
            (_, true, true, _) => BorderLocation::BottomRight,
            (_, true, _, true) => BorderLocation::TopRight,
            (true, _, _, _) => BorderLocation::Left,
            (_, true, _, _) => BorderLocation::Right,
            (_, _, true, _) => BorderLocation::Bottom,
            (_, _, _, true) => BorderLocation::Top,
            _ => BorderLocation::NotOnBorder,
        }
    }

    /// Moves a classified point exactly onto the side(s) it was tagged with.
    pub fn snap(&self, x: f64, y: f64, location: BorderLocation) -> [f64; 2] {
        let mut p = [x, y];
        for side in location.sides() {
            match side {
                Side::Bottom => p[1] = self.min[1],
                Side::Right => p[0] = self.max[0],
                Side::Top => p[1] = self.max[1],
                Side::Left => p[0] = self.min[0],
            }
        }
        p
    }
}

/// Where a point lies relative to the bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorderLocation {
    NotOnBorder,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl BorderLocation {
    pub fn is_on_border(self) -> bool {
        self != BorderLocation::NotOnBorder
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            BorderLocation::TopLeft
                | BorderLocation::TopRight
                | BorderLocation::BottomLeft
                | BorderLocation::BottomRight
        )
    }

    /// The rectangle sides this location lies on: none, one, or two for a corner.
    pub fn sides(self) -> &'static [Side] {
        match self {
            BorderLocation::NotOnBorder => &[],
            BorderLocation::Left => &[Side::Left],
            BorderLocation::Right => &[Side::Right],
            BorderLocation::Top => &[Side::Top],
            BorderLocation::Bottom => &[Side::Bottom],
            BorderLocation::TopLeft => &[Side::Top, Side::Left],
            BorderLocation::TopRight => &[Side::Right, Side::Top],
            BorderLocation::BottomLeft => &[Side::Left, Side::Bottom],
            BorderLocation::BottomRight => &[Side::Bottom, Side::Right],
        }
    }
}

/// Neighbor ids reported for cell edges lying on the rectangle, one per side.
/// - Axis 0 (X) Min: -1
/// - Axis 0 (X) Max: -2
/// - Axis 1 (Y) Min: -3
/// - Axis 1 (Y) Max: -4
pub const BOX_ID_LEFT: i32 = -1;
pub const BOX_ID_RIGHT: i32 = -2;
pub const BOX_ID_BOTTOM: i32 = -3;
pub const BOX_ID_TOP: i32 = -4;

/// A rectangle side, listed in counter-clockwise walk order starting at the bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Bottom,
    Right,
    Top,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Right, Side::Top, Side::Left];

    /// Corner where the counter-clockwise walk enters this side.
    pub fn start_corner(self) -> BorderLocation {
        match self {
            Side::Bottom => BorderLocation::BottomLeft,
            Side::Right => BorderLocation::BottomRight,
            Side::Top => BorderLocation::TopRight,
            Side::Left => BorderLocation::TopLeft,
        }
    }

    /// Corner where the counter-clockwise walk leaves this side.
    pub fn end_corner(self) -> BorderLocation {
        match self {
            Side::Bottom => BorderLocation::BottomRight,
            Side::Right => BorderLocation::TopRight,
            Side::Top => BorderLocation::TopLeft,
            Side::Left => BorderLocation::BottomLeft,
        }
    }

    pub fn box_id(self) -> i32 {
        match self {
            Side::Bottom => BOX_ID_BOTTOM,
            Side::Right => BOX_ID_RIGHT,
            Side::Top => BOX_ID_TOP,
            Side::Left => BOX_ID_LEFT,
        }
    }

    /// Distance travelled along this side from its start corner to `p`.
    pub fn walk_offset(self, bounds: &BoundingBox, p: [f64; 2]) -> f64 {
        match self {
            Side::Bottom => p[0] - bounds.min[0],
            Side::Right => p[1] - bounds.min[1],
            Side::Top => bounds.max[0] - p[0],
            Side::Left => bounds.max[1] - p[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_degenerate_boxes() {
        assert!(BoundingBox::from_extents(0.0, 0.0, 10.0, 10.0).is_ok());
        assert!(BoundingBox::from_extents(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(BoundingBox::from_extents(0.0, 5.0, 10.0, 1.0).is_err());
        assert!(BoundingBox::from_extents(0.0, 0.0, f64::INFINITY, 1.0).is_err());
        assert!(BoundingBox::from_extents(f64::NAN, 0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_locate_sides_and_corners() {
        let bounds = BoundingBox::new([0.0, 0.0], [100.0, 50.0]);
        let tol = Tolerance::default();

        assert_eq!(bounds.locate(0.0, 0.0, &tol), BorderLocation::BottomLeft);
        assert_eq!(bounds.locate(100.0, 0.0, &tol), BorderLocation::BottomRight);
        assert_eq!(bounds.locate(100.0, 50.0, &tol), BorderLocation::TopRight);
        assert_eq!(bounds.locate(0.0, 50.0, &tol), BorderLocation::TopLeft);
        assert_eq!(bounds.locate(0.0, 25.0, &tol), BorderLocation::Left);
        assert_eq!(bounds.locate(100.0, 25.0, &tol), BorderLocation::Right);
        assert_eq!(bounds.locate(40.0, 0.0, &tol), BorderLocation::Bottom);
        assert_eq!(bounds.locate(40.0, 50.0, &tol), BorderLocation::Top);
        assert_eq!(bounds.locate(40.0, 25.0, &tol), BorderLocation::NotOnBorder);
        assert_eq!(bounds.locate(1e-12, 25.0, &tol), BorderLocation::Left);
    }

    #[test]
    fn test_snap_moves_onto_side() {
        let bounds = BoundingBox::new([0.0, 0.0], [10.0, 10.0]);
        let p = bounds.snap(9.999_999_999_9, 3.0, BorderLocation::Right);
        assert_eq!(p, [10.0, 3.0]);
        let c = bounds.snap(1e-11, 10.000_000_000_01, BorderLocation::TopLeft);
        assert_eq!(c, [0.0, 10.0]);
    }

    #[test]
    fn test_side_walk_is_counter_clockwise() {
        let bounds = BoundingBox::new([0.0, 0.0], [4.0, 2.0]);
        for side in Side::ALL {
            let start = bounds.corner(side.start_corner()).unwrap();
            let end = bounds.corner(side.end_corner()).unwrap();
            assert_eq!(side.walk_offset(&bounds, start), 0.0);
            assert!(side.walk_offset(&bounds, end) > 0.0);
        }
    }
}
