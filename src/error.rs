/// Errors raised before the sweep starts when the input cannot be tessellated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VoronoiError {
    #[error("invalid bounds: min ({min_x}, {min_y}) must be finite and strictly below max ({max_x}, {max_y})")]
    InvalidBounds {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    #[error("invalid tolerance: epsilon {epsilon} and collinear {collinear} must be finite and positive")]
    InvalidTolerance { epsilon: f64, collinear: f64 },

    #[error("site {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteSite { index: usize, x: f64, y: f64 },

    #[error("site {index} at ({x}, {y}) lies outside the bounding box")]
    SiteOutOfBounds { index: usize, x: f64, y: f64 },

    #[error("site {second} duplicates site {first} at ({x}, {y})")]
    DuplicateSite {
        first: usize,
        second: usize,
        x: f64,
        y: f64,
    },
}

pub type Result<T> = std::result::Result<T, VoronoiError>;
