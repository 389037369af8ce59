use kornia_essential::{
    solve_five_point, DegeneracyKind, EssentialMatrix, FivePointError, FivePointParams,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

type Points = Vec<[f64; 2]>;

/// Rotation matrix from an axis-angle vector (Rodrigues' formula).
fn rotation_from_axis_angle(w: [f64; 3]) -> [[f64; 3]; 3] {
    let theta = (w[0] * w[0] + w[1] * w[1] + w[2] * w[2]).sqrt();
    if theta < 1e-12 {
        return [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    }
    let k = [w[0] / theta, w[1] / theta, w[2] / theta];
    let (s, c) = theta.sin_cos();
    let v = 1.0 - c;
    [
        [
            c + k[0] * k[0] * v,
            k[0] * k[1] * v - k[2] * s,
            k[0] * k[2] * v + k[1] * s,
        ],
        [
            k[1] * k[0] * v + k[2] * s,
            c + k[1] * k[1] * v,
            k[1] * k[2] * v - k[0] * s,
        ],
        [
            k[2] * k[0] * v - k[1] * s,
            k[2] * k[1] * v + k[0] * s,
            c + k[2] * k[2] * v,
        ],
    ]
}

/// Project world points (given in the left camera frame) into both views.
fn project(world: &[[f64; 3]], r: &[[f64; 3]; 3], t: &[f64; 3]) -> (Points, Points) {
    let mut right = Vec::with_capacity(world.len());
    let mut left = Vec::with_capacity(world.len());
    for p in world {
        let q: [f64; 3] = std::array::from_fn(|i| {
            r[i][0] * p[0] + r[i][1] * p[1] + r[i][2] * p[2] + t[i]
        });
        left.push([p[0] / p[2], p[1] / p[2]]);
        right.push([q[0] / q[2], q[1] / q[2]]);
    }
    (right, left)
}

fn fixed_scene() -> (Points, Points, EssentialMatrix) {
    let r = rotation_from_axis_angle([0.05, -0.12, 0.08]);
    let t = [0.8, -0.3, 0.25];
    let world = [
        [-1.2, -0.9, 5.0],
        [1.1, -0.6, 4.2],
        [0.3, 1.2, 6.5],
        [-0.8, 0.9, 4.8],
        [0.9, 0.4, 3.9],
    ];
    let (right, left) = project(&world, &r, &t);
    (right, left, EssentialMatrix::from_pose(&r, &t))
}

fn random_scene(rng: &mut StdRng) -> (Points, Points, EssentialMatrix) {
    let w = [
        rng.random_range(-0.3..0.3),
        rng.random_range(-0.3..0.3),
        rng.random_range(-0.3..0.3),
    ];
    let r = rotation_from_axis_angle(w);
    let t = [
        rng.random_range(0.3..1.0),
        rng.random_range(-0.5..0.5),
        rng.random_range(-0.5..0.5),
    ];
    let world: Vec<[f64; 3]> = (0..5)
        .map(|_| {
            [
                rng.random_range(-1.5..1.5),
                rng.random_range(-1.5..1.5),
                rng.random_range(4.0..8.0),
            ]
        })
        .collect();
    let (right, left) = project(&world, &r, &t);
    (right, left, EssentialMatrix::from_pose(&r, &t))
}

#[test]
fn recovers_ground_truth_of_fixed_scene() -> Result<(), FivePointError> {
    let (right, left, truth) = fixed_scene();
    let ems = solve_five_point(&right, &left, &FivePointParams::default())?;

    assert!(!ems.is_empty() && ems.len() <= 10);
    assert!(
        ems.iter().any(|e| e.is_equivalent(&truth, 1e-6)),
        "ground truth not among {} candidates",
        ems.len()
    );
    Ok(())
}

#[test]
fn candidates_satisfy_essential_constraints() -> Result<(), FivePointError> {
    let (right, left, _) = fixed_scene();
    let ems = solve_five_point(&right, &left, &FivePointParams::default())?;

    for e in ems.iter() {
        // scaled by E(2, 2), or to unit norm when that entry vanishes
        let unit_corner = (e.as_array()[2][2] - 1.0).abs() < 1e-12;
        let unit_norm = (e.frobenius_norm() - 1.0).abs() < 1e-12;
        assert!(unit_corner || unit_norm, "unexpected scaling of {e:?}");

        let n = e.normalized();
        assert!(n.determinant().abs() < 1e-6, "det = {}", n.determinant());
        for v in n.trace_constraint().iter().flatten() {
            assert!(v.abs() < 1e-6, "trace constraint residual {v}");
        }
        for (r, l) in right.iter().zip(left.iter()) {
            assert!(n.epipolar_residual(r, l).abs() < 1e-9);
        }
    }
    Ok(())
}

#[test]
fn recovers_ground_truth_of_random_scenes() -> Result<(), FivePointError> {
    let mut rng = StdRng::seed_from_u64(7);
    for scene in 0..20 {
        let (right, left, truth) = random_scene(&mut rng);
        let ems = solve_five_point(&right, &left, &FivePointParams::default())?;
        assert!(ems.len() <= 10);
        assert!(
            ems.iter().any(|e| e.is_equivalent(&truth, 1e-6)),
            "scene #{scene}: ground truth not among {} candidates",
            ems.len()
        );
    }
    Ok(())
}

#[test]
fn solution_count_is_bounded_for_arbitrary_points() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let right: Points = (0..5)
            .map(|_| [rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)])
            .collect();
        let left: Points = (0..5)
            .map(|_| [rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)])
            .collect();
        if let Ok(ems) = solve_five_point(&right, &left, &FivePointParams::default()) {
            assert!(ems.len() <= 10);
            assert!(ems
                .iter()
                .all(|e| e.as_array().iter().flatten().all(|v| v.is_finite())));
        }
    }
}

#[test]
fn consistent_permutation_preserves_solution_set() -> Result<(), FivePointError> {
    let (right, left, _) = fixed_scene();
    let params = FivePointParams::default();
    let ems = solve_five_point(&right, &left, &params)?;

    let perm = [3, 0, 4, 2, 1];
    let right_p: Points = perm.iter().map(|&i| right[i]).collect();
    let left_p: Points = perm.iter().map(|&i| left[i]).collect();
    let ems_p = solve_five_point(&right_p, &left_p, &params)?;

    assert_eq!(ems.len(), ems_p.len());
    for e in ems_p.iter() {
        assert!(ems.iter().any(|o| o.is_equivalent(e, 1e-6)));
    }
    Ok(())
}

#[test]
fn wrong_point_counts_fail() {
    let (right, left, _) = fixed_scene();
    let params = FivePointParams::default();

    let res = solve_five_point(&right[..4], &left[..4], &params);
    assert!(matches!(
        res,
        Err(FivePointError::InvalidPointCount { right: 4, left: 4 })
    ));

    let mut right6 = right.clone();
    let mut left6 = left.clone();
    right6.push([0.1, 0.1]);
    left6.push([0.2, 0.1]);
    let res = solve_five_point(&right6, &left6, &params);
    assert!(matches!(
        res,
        Err(FivePointError::InvalidPointCount { right: 6, left: 6 })
    ));

    let res = solve_five_point(&right, &left6, &params);
    assert!(matches!(
        res,
        Err(FivePointError::InvalidPointCount { right: 5, left: 6 })
    ));
}

#[test]
fn collinear_points_are_degenerate() {
    // both point sets lie on lines (e.g. a single epipolar line pair)
    let left: Points = (0..5).map(|i| [0.1 * i as f64 - 0.2, 0.05 * i as f64]).collect();
    let right: Points = (0..5)
        .map(|i| [0.12 * i as f64 - 0.3, 0.1 - 0.02 * i as f64])
        .collect();

    let res = solve_five_point(&right, &left, &FivePointParams::new(true, 1e-4));
    assert!(matches!(
        res,
        Err(FivePointError::DegenerateConfiguration(
            DegeneracyKind::NullSpaceRank { .. }
        ))
    ));
}

#[test]
fn repeated_correspondence_is_degenerate() {
    let (mut right, mut left, _) = fixed_scene();
    right[4] = right[1];
    left[4] = left[1];

    let res = solve_five_point(&right, &left, &FivePointParams::default());
    assert!(matches!(
        res,
        Err(FivePointError::DegenerateConfiguration(_))
    ));
}

#[test]
fn recovers_translation_parallel_to_image_plane() -> Result<(), FivePointError> {
    // no rotation and t_z = 0, so the true E has a zero bottom-right entry
    let r = rotation_from_axis_angle([0.0, 0.0, 0.0]);
    let world = [
        [-1.0, -0.5, 5.0],
        [1.2, -0.7, 4.0],
        [0.2, 1.1, 6.0],
        [-0.6, 0.8, 4.4],
        [0.7, 0.3, 3.6],
    ];

    for t in [[0.0, 1.0, 0.0], [1.0, 0.5, 0.0]] {
        let (right, left) = project(&world, &r, &t);
        let truth = EssentialMatrix::from_pose(&r, &t);
        assert_eq!(truth.as_array()[2][2], 0.0);

        let ems = solve_five_point(&right, &left, &FivePointParams::default())?;
        assert!(ems
            .iter()
            .all(|e| e.as_array().iter().flatten().all(|v| v.is_finite())));
        assert!(
            ems.iter().any(|e| e.is_equivalent(&truth, 1e-6)),
            "t = {t:?}: ground truth not among {} candidates",
            ems.len()
        );
    }
    Ok(())
}
