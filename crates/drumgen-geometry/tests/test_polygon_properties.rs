//! Property sweeps over the polygon generators and the normaliser.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use drumgen_geometry::{
    generate_convex, generate_simple, generate_star, normalize, BoundaryMask, Point, Polygon,
};

const TRIALS: usize = 10_000;
const MAX_VERTICES: usize = 10;

fn assert_no_colinear_triples(polygon: &Polygon) {
    assert!(
        !polygon.has_colinear_triple(),
        "colinear triple in {:?}",
        polygon.vertices()
    );
}

#[test]
fn convex_generator_is_convex_across_trials() {
    let mut rng = Pcg32::seed_from_u64(0xC0FFEE);
    for _ in 0..TRIALS {
        let n = rng.gen_range(3..=MAX_VERTICES);
        let polygon = generate_convex(n, &mut rng).unwrap();
        assert_eq!(polygon.num_vertices(), n);
        assert!(polygon.is_convex());
        assert_no_colinear_triples(&polygon);
    }
}

#[test]
fn star_generator_is_simple_across_trials() {
    let mut rng = Pcg32::seed_from_u64(0xBEEF);
    for _ in 0..TRIALS {
        let n = rng.gen_range(3..=MAX_VERTICES);
        let polygon = generate_star(n, &mut rng).unwrap();
        assert!(polygon.is_simple());
        assert_no_colinear_triples(&polygon);
    }
}

#[test]
fn two_opt_generator_is_simple_across_trials() {
    let mut rng = Pcg32::seed_from_u64(0xDAD);
    // The 2-opt untangler is the slow path; a tenth of the sweep still gives
    // broad coverage of crossing configurations.
    for _ in 0..TRIALS / 10 {
        let n = rng.gen_range(3..=MAX_VERTICES);
        let polygon = generate_simple(n, &mut rng).unwrap();
        assert!(polygon.is_simple());
        assert_no_colinear_triples(&polygon);
    }
}

#[test]
fn normalised_convex_polygons_span_the_unit_interval() {
    let mut rng = Pcg32::seed_from_u64(0x5EED);
    for _ in 0..TRIALS / 10 {
        let n = rng.gen_range(3..=MAX_VERTICES);
        let polygon = normalize(&generate_convex(n, &mut rng).unwrap()).unwrap();

        let (min, max) = polygon.bounding_box();
        assert!(min.x.min(min.y).abs() < 1e-9);
        assert!((max.x.max(max.y) - 1.0).abs() < 1e-9);
        assert!(polygon.is_clockwise());

        // The longest diagonal spans [0, 1] along the canonical axis.
        let (length, (i, j)) = polygon.largest_vector();
        assert!((length - 1.0).abs() < 1e-9);
        assert!(polygon.vertices()[i].x.abs() < 1e-9);
        assert!((polygon.vertices()[j].x - 1.0).abs() < 1e-9);
    }
}

#[test]
fn normalisation_is_a_fixed_point() {
    let mut rng = Pcg32::seed_from_u64(0xFADE);
    for _ in 0..TRIALS / 10 {
        let n = rng.gen_range(3..=MAX_VERTICES);
        let once = normalize(&generate_convex(n, &mut rng).unwrap()).unwrap();
        let twice = normalize(&once).unwrap();
        for (a, b) in once.vertices().iter().zip(twice.vertices()) {
            assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
        }
    }
}

#[test]
fn shoelace_area_matches_rasterised_estimate() {
    let mut rng = Pcg32::seed_from_u64(0xACE);
    let resolution = 200;
    for _ in 0..50 {
        let convex = normalize(&generate_convex(8, &mut rng).unwrap()).unwrap();
        let concave = normalize(&generate_star(8, &mut rng).unwrap()).unwrap();
        for polygon in [convex, concave] {
            let mask = BoundaryMask::render(&polygon, resolution).unwrap();
            // The rasterised estimate carries a boundary band of order
            // perimeter / H; 4/H comfortably bounds it for unit shapes.
            let tolerance = 4.0 / resolution as f64;
            assert!(
                (mask.coverage() - polygon.area()).abs() < tolerance,
                "area {} vs coverage {}",
                polygon.area(),
                mask.coverage()
            );
        }
    }
}

#[test]
fn forced_unit_square_has_exact_area_and_centroid() {
    let square = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ])
    .unwrap();
    assert_eq!(square.area(), 1.0);
    assert_eq!(square.centroid(), Point::new(0.5, 0.5));

    // The canonical representative keeps the centroid and halves nothing:
    // the square's area is measured before normalisation rotates it.
    let normalized = normalize(&square).unwrap();
    assert!((normalized.centroid().x - 0.5).abs() < 1e-9);
    assert!((normalized.centroid().y - 0.5).abs() < 1e-9);
}
