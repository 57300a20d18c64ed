use crate::bounds::{BoundingBox, Side, BOX_ID_BOTTOM};
use crate::diagram::Edge;
use crate::geometry::Tolerance;
use rayon::prelude::*;

/// The Voronoi cell of one site, assembled from the edges that bound it.
#[derive(Clone, Debug)]
pub struct Cell2D {
    pub(crate) id: usize,
    pub(crate) site: [f64; 2],
    // Indices into the edge list, counter-clockwise around the cell
    pub(crate) edges: Vec<usize>,
    // Flat array of vertices [x, y, x, y, ...], counter-clockwise
    pub(crate) vertices: Vec<f64>,
    // Neighbor for each entry of `edges`: the site across it, or a BOX_ID_* for border edges
    pub(crate) edge_neighbors: Vec<i32>,
    pub(crate) closed: bool,
}

impl Cell2D {
    pub(crate) fn from_edges(
        id: usize,
        site: [f64; 2],
        all: &[Edge],
        incident: &[usize],
        bounds: &BoundingBox,
        tol: &Tolerance,
    ) -> Cell2D {
        let mut points: Vec<[f64; 2]> = Vec::with_capacity(incident.len() * 2);
        let mut degree: Vec<usize> = Vec::with_capacity(incident.len() * 2);
        for &e in incident {
            for p in [all[e].start.pos(), all[e].end.pos()] {
                match points.iter().position(|&q| tol.same_point(p, q)) {
                    Some(i) => degree[i] += 1,
                    None => {
                        points.push(p);
                        degree.push(1);
                    }
                }
            }
        }

        let center = if points.is_empty() {
            site
        } else {
            let n = points.len() as f64;
            let sx: f64 = points.iter().map(|p| p[0]).sum();
            let sy: f64 = points.iter().map(|p| p[1]).sum();
            [sx / n, sy / n]
        };
        let angle = |p: [f64; 2]| (p[1] - center[1]).atan2(p[0] - center[0]);

        points.sort_by(|a, b| angle(*a).total_cmp(&angle(*b)));
        let vertices = points.iter().flat_map(|p| [p[0], p[1]]).collect();

        let mut edges = incident.to_vec();
        edges.sort_by(|&a, &b| angle(all[a].midpoint()).total_cmp(&angle(all[b].midpoint())));

        let edge_neighbors = edges
            .iter()
            .map(|&e| match all[e].other_site(id) {
                Some(j) => j as i32,
                None => border_side(&all[e], bounds, tol).map_or(BOX_ID_BOTTOM, Side::box_id),
            })
            .collect();

        let closed = edges.len() >= 3 && degree.iter().all(|&d| d == 2);

        Cell2D {
            id,
            site,
            edges,
            vertices,
            edge_neighbors,
            closed,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn site(&self) -> [f64; 2] {
        self.site
    }

    pub fn edges(&self) -> Vec<usize> {
        self.edges.clone()
    }

    pub fn vertices(&self) -> Vec<f64> {
        self.vertices.clone()
    }

    pub fn edge_neighbors(&self) -> Vec<i32> {
        self.edge_neighbors.clone()
    }

    /// True when the edges form a closed polygon, which requires border edges for cells
    /// touching the rectangle.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 6
    }

    pub fn area(&self) -> f64 {
        let n = self.vertices.len() / 2;
        if n < 3 { return 0.0; }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];
            area += xi * yj - xj * yi;
        }
        (area * 0.5).abs()
    }

    /// Polygon centroid; the site itself for degenerate cells.
    pub fn centroid(&self) -> [f64; 2] {
        let n = self.vertices.len() / 2;
        if n < 3 { return self.site; }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut area = 0.0;

        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];

            let cross = xi * yj - xj * yi;
            area += cross;
            cx += (xi + xj) * cross;
            cy += (yi + yj) * cross;
        }

        if area.abs() < 1e-9 {
            return self.site;
        }

        let factor = 1.0 / (3.0 * area);
        [cx * factor, cy * factor]
    }
}

/// The rectangle side a border edge runs along.
fn border_side(edge: &Edge, bounds: &BoundingBox, tol: &Tolerance) -> Option<Side> {
    let [x, y] = edge.midpoint();
    bounds.locate(x, y, tol).sides().first().copied()
}

/// Assembles one cell per site, in parallel.
pub fn build_cells(
    edges: &[Edge],
    sites: &[[f64; 2]],
    bounds: &BoundingBox,
    tol: &Tolerance,
) -> Vec<Cell2D> {
    let mut incident = vec![Vec::new(); sites.len()];
    for (i, e) in edges.iter().enumerate() {
        for s in e.left.into_iter().chain(e.right) {
            incident[s].push(i);
        }
    }

    (0..sites.len())
        .into_par_iter()
        .map(|i| Cell2D::from_edges(i, sites[i], edges, &incident[i], bounds, tol))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{BOX_ID_LEFT, BOX_ID_RIGHT, BOX_ID_TOP};
    use crate::diagram::Point;

    fn split_square() -> (Vec<Edge>, [[f64; 2]; 2], BoundingBox, Tolerance) {
        let b = BoundingBox::new([0.0, 0.0], [10.0, 10.0]);
        let tol = Tolerance::default();
        let p = |x: f64, y: f64| Point::classified(x, y, &b, &tol);
        let edge = |s: Point, e: Point, left: usize, right: Option<usize>| Edge {
            start: s,
            end: e,
            left: Some(left),
            right,
        };
        let edges = vec![
            edge(p(5.0, 10.0), p(5.0, 0.0), 1, Some(0)),
            edge(p(0.0, 0.0), p(5.0, 0.0), 0, None),
            edge(p(5.0, 0.0), p(10.0, 0.0), 1, None),
            edge(p(10.0, 0.0), p(10.0, 10.0), 1, None),
            edge(p(10.0, 10.0), p(5.0, 10.0), 1, None),
            edge(p(5.0, 10.0), p(0.0, 10.0), 0, None),
            edge(p(0.0, 10.0), p(0.0, 0.0), 0, None),
        ];
        (edges, [[2.0, 5.0], [8.0, 5.0]], b, tol)
    }

    #[test]
    fn test_cells_of_split_square() {
        let (edges, sites, b, tol) = split_square();
        let cells = build_cells(&edges, &sites, &b, &tol);
        assert_eq!(cells.len(), 2);

        for cell in &cells {
            assert!(cell.is_closed());
            assert!(!cell.is_empty());
            assert!((cell.area() - 50.0).abs() < 1e-9);
            assert_eq!(cell.vertices().len(), 8);
        }
        let c = cells[0].centroid();
        assert!((c[0] - 2.5).abs() < 1e-9 && (c[1] - 5.0).abs() < 1e-9);

        let mut n = cells[0].edge_neighbors();
        n.sort();
        assert_eq!(n, vec![BOX_ID_TOP, BOX_ID_BOTTOM, BOX_ID_LEFT, 1]);
        assert!(cells[1].edge_neighbors().contains(&BOX_ID_RIGHT));
    }

    #[test]
    fn test_vertices_are_counter_clockwise() {
        let (edges, sites, b, tol) = split_square();
        let cells = build_cells(&edges, &sites, &b, &tol);
        let v = cells[1].vertices();
        let n = v.len() / 2;
        let signed: f64 = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                v[i * 2] * v[j * 2 + 1] - v[j * 2] * v[i * 2 + 1]
            })
            .sum();
        assert!(signed > 0.0);
    }

    #[test]
    fn test_open_cell_without_border_edges() {
        let (edges, sites, b, tol) = split_square();
        let cells = build_cells(&edges[..1], &sites, &b, &tol);
        assert!(!cells[0].is_closed());
        assert!(cells[0].is_empty());
        assert_eq!(cells[0].centroid(), sites[0]);
        assert_eq!(cells[0].edge_neighbors(), vec![1]);
    }
}
