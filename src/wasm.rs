use crate::bounds::BoundingBox;
use crate::cell::Cell2D;
use crate::diagram::{BorderMode, Edge};
use crate::tessellation::Tessellation;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_BOUNDS: &'static str = r#"
export const BOX_ID_LEFT = -1;
export const BOX_ID_RIGHT = -2;
export const BOX_ID_BOTTOM = -3;
export const BOX_ID_TOP = -4;
export const NO_SITE = -1;
"#;

/// Values per edge in the flat buffers: start x, start y, end x, end y.
const EDGE_STRIDE: usize = 4;

// --- Bounding Box ---

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl BoundingBox2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox2D {
        BoundingBox2D { min_x, min_y, max_x, max_y }
    }
}

impl From<BoundingBox2D> for BoundingBox {
    fn from(b: BoundingBox2D) -> Self {
        Self { min: [b.min_x, b.min_y], max: [b.max_x, b.max_y] }
    }
}

// --- Cell Wrapper ---

#[wasm_bindgen(js_name = Cell2D)]
pub struct Cell2DWASM {
    inner: Cell2D,
}

#[wasm_bindgen(js_class = Cell2D)]
impl Cell2DWASM {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> usize { self.inner.id() }
    #[wasm_bindgen(getter)]
    pub fn site(&self) -> Vec<f64> { self.inner.site().to_vec() }
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> Vec<f64> { self.inner.vertices() }
    #[wasm_bindgen(getter)]
    pub fn edges(&self) -> Vec<u32> { self.inner.edges().into_iter().map(|e| e as u32).collect() }
    #[wasm_bindgen(getter)]
    pub fn edge_neighbors(&self) -> Vec<i32> { self.inner.edge_neighbors() }
    #[wasm_bindgen(getter)]
    pub fn closed(&self) -> bool { self.inner.is_closed() }
    pub fn area(&self) -> f64 { self.inner.area() }
    pub fn centroid(&self) -> Vec<f64> { self.inner.centroid().to_vec() }
}

// --- Tessellation ---

#[wasm_bindgen(js_name = Tessellation2D)]
pub struct Tessellation2D {
    inner: Tessellation,
}

#[wasm_bindgen(js_class = Tessellation2D)]
impl Tessellation2D {
    #[wasm_bindgen(constructor)]
    pub fn new(bounds: BoundingBox2D, border_edges: bool) -> Tessellation2D {
        let mode = if border_edges { BorderMode::MakeBorderEdges } else { BorderMode::DoNotMakeBorderEdges };
        Tessellation2D { inner: Tessellation::new(bounds.into()).with_border_mode(mode) }
    }
    pub fn set_generators(&mut self, generators: &[f64]) { self.inner.set_generators(generators); }
    pub fn set_generator(&mut self, index: usize, x: f64, y: f64) { self.inner.set_generator(index, &[x, y]); }
    pub fn random_generators(&mut self, count: usize) { self.inner.random_generators(count); }
    pub fn calculate(&mut self) -> Result<(), JsValue> { self.inner.calculate().map_err(to_js) }
    pub fn relax(&mut self) -> Result<(), JsValue> { self.inner.relax().map_err(to_js) }
    #[wasm_bindgen(getter)]
    pub fn count_generators(&self) -> usize { self.inner.count_generators() }
    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize { self.inner.count_cells() }
    #[wasm_bindgen(getter)]
    pub fn count_edges(&self) -> usize { self.inner.edges().len() }
    pub fn get_generator(&self, index: usize) -> Vec<f64> { self.inner.get_generator(index).to_vec() }
    pub fn get_cell(&self, index: usize) -> Option<Cell2DWASM> { self.inner.get_cell(index).map(|inner| Cell2DWASM { inner }) }
    #[wasm_bindgen(getter)]
    pub fn generators(&self) -> Vec<f64> { self.inner.generators() }
    #[wasm_bindgen(getter)]
    pub fn cells(&self) -> Vec<Cell2DWASM> { self.inner.cells().into_iter().map(|inner| Cell2DWASM { inner }).collect() }
    /// Edge coordinates as `[x0, y0, x1, y1, ...]`.
    #[wasm_bindgen(getter)]
    pub fn edges(&self) -> Vec<f64> { edge_coordinates(self.inner.edges()) }
    /// Left and right site per edge as `[left, right, ...]`, `-1` where there is none.
    #[wasm_bindgen(getter)]
    pub fn edge_sites(&self) -> Vec<i32> { edge_sites(self.inner.edges()) }
}

fn to_js(err: crate::VoronoiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn edge_coordinates(edges: &[Edge]) -> Vec<f64> {
    let mut out = Vec::with_capacity(edges.len() * EDGE_STRIDE);
    for e in edges {
        out.extend_from_slice(&[e.start.x, e.start.y, e.end.x, e.end.y]);
    }
    out
}

fn edge_sites(edges: &[Edge]) -> Vec<i32> {
    let id = |s: Option<usize>| s.map_or(-1, |s| s as i32);
    edges.iter().flat_map(|e| [id(e.left), id(e.right)]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_edge_buffers() {
        let mut t = Tessellation2D::new(BoundingBox2D::new(0.0, 0.0, 10.0, 10.0), true);
        t.set_generators(&[2.0, 5.0, 8.0, 5.0]);
        assert!(t.calculate().is_ok());
        assert_eq!(t.count_edges(), 7);
        assert_eq!(t.edges().len(), 7 * EDGE_STRIDE);
        let sites = t.edge_sites();
        assert_eq!(&sites[..2], &[0, 1]);
        assert!(sites[2..].chunks(2).all(|s| s[1] == -1 && s[0] >= 0));
    }
}
