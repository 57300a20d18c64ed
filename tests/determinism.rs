use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use vorosweep::{tessellate, tessellate_batch, BorderMode, BoundingBox, Edge, Site};

fn random_sites(seed: u64, count: usize) -> Vec<Site> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Site::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect()
}

fn bits(edges: &[Edge]) -> Vec<u64> {
    edges
        .iter()
        .flat_map(|e| [e.start.x, e.start.y, e.end.x, e.end.y])
        .map(f64::to_bits)
        .collect()
}

#[test]
fn test_repeated_runs_are_bit_identical() {
    let sites = random_sites(11, 500);
    let first = tessellate(&sites, 0.0, 0.0, 100.0, 100.0, BorderMode::MakeBorderEdges).unwrap();
    for _ in 0..3 {
        let again = tessellate(&sites, 0.0, 0.0, 100.0, 100.0, BorderMode::MakeBorderEdges).unwrap();
        assert_eq!(first, again);
        assert_eq!(bits(&first), bits(&again));
    }
}

#[test]
fn test_parallel_calls_match_sequential() {
    let sites = random_sites(5, 300);
    let expected = tessellate(&sites, 0.0, 0.0, 100.0, 100.0, BorderMode::MakeBorderEdges).unwrap();

    let results: Vec<Vec<Edge>> = (0..16)
        .into_par_iter()
        .map(|_| tessellate(&sites, 0.0, 0.0, 100.0, 100.0, BorderMode::MakeBorderEdges).unwrap())
        .collect();

    for r in &results {
        assert_eq!(bits(r), bits(&expected));
    }
}

#[test]
fn test_batch_matches_individual_calls() {
    let bounds = BoundingBox::new([0.0, 0.0], [100.0, 100.0]);
    let mut batches: Vec<Vec<Site>> = (0..8).map(|seed| random_sites(seed, 100)).collect();
    batches.push(vec![Site::new(1.0, 1.0), Site::new(1.0, 1.0)]);

    let results = tessellate_batch(&batches, &bounds, BorderMode::DoNotMakeBorderEdges);
    assert_eq!(results.len(), batches.len());

    for (sites, result) in batches.iter().zip(&results).take(8) {
        let single = tessellate(sites, 0.0, 0.0, 100.0, 100.0, BorderMode::DoNotMakeBorderEdges).unwrap();
        assert_eq!(result.as_ref().unwrap(), &single);
    }
    assert!(results[8].is_err());
}
