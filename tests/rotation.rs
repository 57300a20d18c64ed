use rand::{Rng, SeedableRng};
use vorosweep::{tessellate, BorderMode, Edge, Site};

const SIZE: f64 = 1000.0;

/// Quarter turn counter-clockwise about the rectangle center.
fn rotate(p: [f64; 2], quarters: usize) -> [f64; 2] {
    let c = SIZE * 0.5;
    (0..quarters).fold(p, |[x, y], _| [c - (y - c), c + (x - c)])
}

fn run(sites: &[Site]) -> Vec<Edge> {
    tessellate(sites, 0.0, 0.0, SIZE, SIZE, BorderMode::MakeBorderEdges).unwrap()
}

fn close(a: [f64; 2], b: [f64; 2]) -> bool {
    (a[0] - b[0]).abs() < 1e-6 && (a[1] - b[1]).abs() < 1e-6
}

fn assert_rotation_invariant(sites: &[Site]) {
    let original = run(sites);
    for quarters in 1..4 {
        let rotated_sites: Vec<Site> = sites.iter().map(|s| Site::from(rotate(s.pos(), quarters))).collect();
        let rotated = run(&rotated_sites);
        assert_eq!(original.len(), rotated.len(), "{} quarter turns", quarters);

        for e in &original {
            let a = rotate(e.start.pos(), quarters);
            let b = rotate(e.end.pos(), quarters);
            let found = rotated.iter().any(|r| {
                (close(r.start.pos(), a) && close(r.end.pos(), b))
                    || (close(r.start.pos(), b) && close(r.end.pos(), a))
            });
            assert!(found, "edge {:?} missing after {} quarter turns", e, quarters);
        }
    }
}

#[test]
fn test_five_sites_in_every_orientation() {
    let sites: Vec<Site> = [
        (500.0, 900.0),
        (300.0, 700.0),
        (300.0, 100.0),
        (700.0, 100.0),
        (700.0, 700.0),
    ]
    .into_iter()
    .map(Site::from)
    .collect();
    for quarters in 0..4 {
        let rotated: Vec<Site> = sites.iter().map(|s| Site::from(rotate(s.pos(), quarters))).collect();
        assert_eq!(run(&rotated).len(), 15);
    }
    assert_rotation_invariant(&sites);
}

#[test]
fn test_square_lattice() {
    let sites: Vec<Site> = (0..10)
        .flat_map(|i| (0..10).map(move |j| Site::new(i as f64 * 100.0 + 50.0, j as f64 * 100.0 + 50.0)))
        .collect();
    // 9 * 10 * 2 inner segments and 10 pieces per side.
    assert_eq!(run(&sites).len(), 220);
    assert_rotation_invariant(&sites);
}

#[test]
fn test_lattice_on_the_border() {
    let sites: Vec<Site> = (0..=10)
        .flat_map(|i| (0..=10).map(move |j| Site::new(i as f64 * 100.0, j as f64 * 100.0)))
        .collect();
    assert_rotation_invariant(&sites);
}

#[test]
fn test_corners_and_center() {
    let sites: Vec<Site> = [(0.0, 0.0), (SIZE, SIZE), (500.0, 500.0), (0.0, SIZE)]
        .into_iter()
        .map(Site::from)
        .collect();
    assert_rotation_invariant(&sites);
}

#[test]
fn test_random_sites() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    let sites: Vec<Site> = (0..50)
        .map(|_| Site::new(rng.gen_range(0.0..SIZE), rng.gen_range(0.0..SIZE)))
        .collect();
    assert_rotation_invariant(&sites);
}
