use crate::border::make_border_edges;
use crate::bounds::BoundingBox;
use crate::cell::{build_cells, Cell2D};
use crate::clipper::clip_edges;
use crate::diagram::{BorderMode, Edge, Site};
use crate::error::{Result, VoronoiError};
use crate::geometry::Tolerance;
use crate::sweep::SweepLine;
use rand::prelude::*;
use rayon::prelude::*;

/// Computes the Voronoi edges of `sites` inside the rectangle `[min_x, max_x] × [min_y, max_y]`.
///
/// Site handles in the returned edges are indices into `sites`. With
/// [`BorderMode::MakeBorderEdges`] the clipped bisectors are followed by the border edges,
/// walking the rectangle counter-clockwise from its bottom-left corner.
///
/// ```
/// use vorosweep::{tessellate, BorderMode, Site};
///
/// let sites = [Site::new(250.0, 500.0), Site::new(750.0, 500.0)];
/// let edges = tessellate(&sites, 0.0, 0.0, 1000.0, 1000.0, BorderMode::MakeBorderEdges).unwrap();
/// assert_eq!(edges.len(), 7);
/// assert_eq!(edges[0].start.x, 500.0);
/// ```
pub fn tessellate(
    sites: &[Site],
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    mode: BorderMode,
) -> Result<Vec<Edge>> {
    let bounds = BoundingBox::from_extents(min_x, min_y, max_x, max_y)?;
    tessellate_with(sites, &bounds, mode, &Tolerance::default())
}

/// [`tessellate`] with an explicit rectangle and tolerance.
pub fn tessellate_with(
    sites: &[Site],
    bounds: &BoundingBox,
    mode: BorderMode,
    tol: &Tolerance,
) -> Result<Vec<Edge>> {
    let points: Vec<[f64; 2]> = sites.iter().map(Site::pos).collect();
    tessellate_points(&points, bounds, mode, tol)
}

/// Tessellates independent site sets in parallel, one result per set.
pub fn tessellate_batch(
    batches: &[Vec<Site>],
    bounds: &BoundingBox,
    mode: BorderMode,
) -> Vec<Result<Vec<Edge>>> {
    let tol = Tolerance::default();
    batches
        .par_iter()
        .map(|sites| tessellate_with(sites, bounds, mode, &tol))
        .collect()
}

pub(crate) fn tessellate_points(
    points: &[[f64; 2]],
    bounds: &BoundingBox,
    mode: BorderMode,
    tol: &Tolerance,
) -> Result<Vec<Edge>> {
    bounds.validate()?;
    tol.validate()?;
    validate_sites(points, bounds, tol)?;

    tracing::debug!(sites = points.len(), ?mode, "tessellating");

    let raw = SweepLine::new(points, *tol).finish();
    let mut edges = clip_edges(&raw, points, bounds, tol);
    let inner = edges.len();

    if mode == BorderMode::MakeBorderEdges {
        let border = make_border_edges(&edges, points, bounds, tol);
        edges.extend(border);
    }

    tracing::debug!(
        vertices = raw.vertices.len(),
        raw_edges = raw.edges.len(),
        inner_edges = inner,
        border_edges = edges.len() - inner,
        "tessellation done"
    );
    Ok(edges)
}

/// Rejects non-finite sites, sites outside `bounds` and coincident sites.
pub fn validate_sites(points: &[[f64; 2]], bounds: &BoundingBox, tol: &Tolerance) -> Result<()> {
    for (index, &[x, y]) in points.iter().enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(VoronoiError::NonFiniteSite { index, x, y });
        }
        if !bounds.contains(x, y, tol) {
            return Err(VoronoiError::SiteOutOfBounds { index, x, y });
        }
    }

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[a][0].total_cmp(&points[b][0]).then(a.cmp(&b)));

    for (k, &a) in order.iter().enumerate() {
        for &b in &order[k + 1..] {
            if points[b][0] - points[a][0] > tol.epsilon {
                break;
            }
            if tol.same_point(points[a], points[b]) {
                return Err(VoronoiError::DuplicateSite {
                    first: a.min(b),
                    second: a.max(b),
                    x: points[a][0],
                    y: points[a][1],
                });
            }
        }
    }
    Ok(())
}

/// A bounded 2D Voronoi tessellation over a flat list of generators.
///
/// Generators are stored as `[x, y, x, y, ...]`. Edges and cells are recomputed by
/// [`Tessellation::calculate`].
pub struct Tessellation {
    pub bounds: BoundingBox,
    pub generators: Vec<f64>,
    pub border_mode: BorderMode,
    pub tolerance: Tolerance,
    edges: Vec<Edge>,
    cells: Vec<Cell2D>,
}

impl Tessellation {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            generators: Vec::new(),
            border_mode: BorderMode::default(),
            tolerance: Tolerance::default(),
            edges: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn with_border_mode(mut self, mode: BorderMode) -> Self {
        self.border_mode = mode;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replaces all generators. Points outside the bounds or with non-finite coordinates are
    /// skipped, as is a trailing unpaired value.
    pub fn set_generators(&mut self, generators: &[f64]) {
        let mut valid = Vec::with_capacity(generators.len());
        for p in generators.chunks_exact(2) {
            let (x, y) = (p[0], p[1]);
            if x.is_finite() && y.is_finite() && self.bounds.contains(x, y, &self.tolerance) {
                valid.push(x);
                valid.push(y);
            }
        }
        if valid.len() < generators.len() - generators.len() % 2 {
            tracing::debug!(
                given = generators.len() / 2,
                kept = valid.len() / 2,
                "dropped generators outside the bounds"
            );
        }
        self.generators = valid;
        self.edges.clear();
        self.cells.clear();
    }

    /// Moves a single generator. Ignored when the index is out of range or the new position lies
    /// outside the bounds.
    pub fn set_generator(&mut self, index: usize, pos: &[f64; 2]) {
        let offset = index * 2;
        if offset + 1 < self.generators.len() && self.bounds.contains(pos[0], pos[1], &self.tolerance) {
            self.generators[offset] = pos[0];
            self.generators[offset + 1] = pos[1];
        }
    }

    pub fn get_generator(&self, index: usize) -> [f64; 2] {
        [self.generators[index * 2], self.generators[index * 2 + 1]]
    }

    pub fn generators(&self) -> Vec<f64> {
        self.generators.clone()
    }

    pub fn count_generators(&self) -> usize {
        self.generators.len() / 2
    }

    /// Generates random points within the bounds and sets them as generators.
    pub fn random_generators(&mut self, count: usize) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let w = self.bounds.width();
        let h = self.bounds.height();

        let mut points = Vec::with_capacity(count * 2);
        for _ in 0..count {
            points.push(self.bounds.min[0] + rng.r#gen::<f64>() * w);
            points.push(self.bounds.min[1] + rng.r#gen::<f64>() * h);
        }
        self.set_generators(&points);
    }

    fn sites(&self) -> Vec<[f64; 2]> {
        self.generators.chunks_exact(2).map(|p| [p[0], p[1]]).collect()
    }

    /// Computes edges and cells for the current generators.
    pub fn calculate(&mut self) -> Result<()> {
        let sites = self.sites();
        self.edges = tessellate_points(&sites, &self.bounds, self.border_mode, &self.tolerance)?;
        self.cells = build_cells(&self.edges, &sites, &self.bounds, &self.tolerance);
        Ok(())
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn cells(&self) -> Vec<Cell2D> {
        self.cells.clone()
    }

    pub fn get_cell(&self, index: usize) -> Option<Cell2D> {
        self.cells.get(index).cloned()
    }

    pub fn count_cells(&self) -> usize {
        self.cells.len()
    }

    /// Applies `f` to every cell in parallel.
    pub fn map<F, T>(&self, f: F) -> Vec<T>
    where
        F: Fn(&Cell2D) -> T + Sync + Send,
        T: Send,
    {
        self.cells.par_iter().map(f).collect()
    }

    /// One step of Lloyd's relaxation: every generator moves to the centroid of its cell.
    ///
    /// Cells are closed with border edges for this step whatever the configured border mode.
    /// Call [`Tessellation::calculate`] afterwards to refresh edges and cells.
    pub fn relax(&mut self) -> Result<()> {
        let sites = self.sites();
        let edges = tessellate_points(&sites, &self.bounds, BorderMode::MakeBorderEdges, &self.tolerance)?;
        let cells = build_cells(&edges, &sites, &self.bounds, &self.tolerance);

        let new_generators: Vec<f64> = cells
            .par_iter()
            .zip(sites.par_iter())
            .flat_map_iter(|(cell, original)| {
                if cell.is_empty() { *original } else { cell.centroid() }
            })
            .collect();

        self.set_generators(&new_generators);
        Ok(())
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> BoundingBox {
        BoundingBox::new([0.0, 0.0], [10.0, 10.0])
    }

    #[test]
    fn test_validate_sites() {
        let b = square();
        let tol = Tolerance::default();
        assert!(validate_sites(&[[1.0, 1.0], [2.0, 2.0]], &b, &tol).is_ok());
        assert!(matches!(
            validate_sites(&[[1.0, 1.0], [f64::NAN, 2.0]], &b, &tol),
            Err(VoronoiError::NonFiniteSite { index: 1, .. })
        ));
        assert_eq!(
            validate_sites(&[[11.0, 1.0]], &b, &tol),
            Err(VoronoiError::SiteOutOfBounds { index: 0, x: 11.0, y: 1.0 })
        );
        assert_eq!(
            validate_sites(&[[3.0, 3.0], [1.0, 1.0], [3.0, 3.0 + 1e-12]], &b, &tol),
            Err(VoronoiError::DuplicateSite { first: 0, second: 2, x: 3.0, y: 3.0 })
        );
        // Same x, different y is fine.
        assert!(validate_sites(&[[3.0, 3.0], [3.0, 4.0]], &b, &tol).is_ok());
    }

    #[test]
    fn test_container_calculate() {
        let mut t = Tessellation::new(square());
        t.set_generators(&[2.0, 5.0, 8.0, 5.0, 20.0, 20.0, 1.0]);
        assert_eq!(t.count_generators(), 2);
        t.calculate().unwrap();
        assert_eq!(t.edges().len(), 7);
        assert_eq!(t.count_cells(), 2);
        let areas = t.map(|c| c.area());
        assert!((areas[0] - 50.0).abs() < 1e-9);
        assert!((areas[1] - 50.0).abs() < 1e-9);
        assert!(t.get_cell(2).is_none());
    }

    #[test]
    fn test_set_generator_ignores_invalid() {
        let mut t = Tessellation::new(square());
        t.set_generators(&[2.0, 5.0]);
        t.set_generator(0, &[3.0, 3.0]);
        t.set_generator(0, &[30.0, 3.0]);
        t.set_generator(4, &[1.0, 1.0]);
        assert_eq!(t.generators(), vec![3.0, 3.0]);
    }

    #[test]
    fn test_random_generators_are_inside() {
        let mut t = Tessellation::new(square());
        t.random_generators(100);
        assert_eq!(t.count_generators(), 100);
        let tol = Tolerance::default();
        for i in 0..100 {
            let [x, y] = t.get_generator(i);
            assert!(t.bounds.contains(x, y, &tol));
        }
    }

    #[test]
    fn test_relax_moves_to_centroids() {
        let mut t = Tessellation::new(square()).with_border_mode(BorderMode::DoNotMakeBorderEdges);
        t.set_generators(&[1.0, 5.0, 9.0, 5.0]);
        t.relax().unwrap();
        let g = t.generators();
        assert!((g[0] - 2.5).abs() < 1e-9 && (g[1] - 5.0).abs() < 1e-9);
        assert!((g[2] - 7.5).abs() < 1e-9 && (g[3] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_reports_duplicates() {
        let mut t = Tessellation::new(square());
        t.set_generators(&[2.0, 2.0, 2.0, 2.0]);
        assert!(matches!(t.calculate(), Err(VoronoiError::DuplicateSite { .. })));
    }
}
