use plotters::prelude::*;
use rand::Rng;
use vorosweep::{BorderMode, BoundingBox, Tessellation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_example("voronoi_cells.svg", BorderMode::MakeBorderEdges, 0)?;
    run_example("voronoi_edges.svg", BorderMode::DoNotMakeBorderEdges, 0)?;
    run_example("voronoi_relaxed.svg", BorderMode::MakeBorderEdges, 20)?;
    Ok(())
}

fn run_example(filename: &str, mode: BorderMode, relax_steps: usize) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(0.0..100.0, 0.0..100.0)?;

    let bounds = BoundingBox::new([0.0, 0.0], [100.0, 100.0]);
    let mut tess = Tessellation::new(bounds).with_border_mode(mode);

    let mut rng = rand::thread_rng();
    let mut generators = Vec::with_capacity(500 * 2);
    for _ in 0..500 {
        generators.push(rng.gen_range(0.0..100.0));
        generators.push(rng.gen_range(0.0..100.0));
    }
    tess.set_generators(&generators);

    for _ in 0..relax_steps {
        tess.relax()?;
    }
    tess.calculate()?;

    // Closed cells are filled
    for cell in tess.cells().iter().filter(|c| c.is_closed()) {
        let vertices = cell.vertices();
        let poly: Vec<(f64, f64)> = vertices.chunks(2).map(|c| (c[0], c[1])).collect();
        chart.draw_series(std::iter::once(Polygon::new(poly, BLUE.mix(0.1).filled())))?;
    }

    for edge in tess.edges() {
        let style = if edge.is_border() { BLACK.stroke_width(2) } else { BLACK.mix(0.5).stroke_width(1) };
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(edge.start.x, edge.start.y), (edge.end.x, edge.end.y)],
            style,
        )))?;
    }

    let points: Vec<(f64, f64)> = tess.generators().chunks(2).map(|c| (c[0], c[1])).collect();
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 2, RED.filled())))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}
