use argh::FromArgs;
use std::path::PathBuf;

use kornia_essential::{solve_five_point, EssentialMatrix, FivePointParams};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(FromArgs)]
/// Solve the five-point problem on random synthetic scenes
struct Args {
    /// number of random scenes to solve
    #[argh(option, default = "10")]
    num_scenes: usize,

    /// seed of the scene generator
    #[argh(option, default = "0")]
    seed: u64,

    /// standard deviation of the noise added to the normalized image points
    #[argh(option, default = "0.0")]
    noise: f64,

    /// optional JSON file with the solver parameters
    #[argh(option)]
    config: Option<PathBuf>,

    /// report solver failures as warnings
    #[argh(switch)]
    verbose: bool,
}

fn rotation_from_axis_angle(w: [f64; 3]) -> [[f64; 3]; 3] {
    let theta = (w[0] * w[0] + w[1] * w[1] + w[2] * w[2]).sqrt();
    if theta < 1e-12 {
        return [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    }
    let k = w.map(|v| v / theta);
    let (s, c) = theta.sin_cos();
    let v = 1.0 - c;
    [
        [c + k[0] * k[0] * v, k[0] * k[1] * v - k[2] * s, k[0] * k[2] * v + k[1] * s],
        [k[1] * k[0] * v + k[2] * s, c + k[1] * k[1] * v, k[1] * k[2] * v - k[0] * s],
        [k[2] * k[0] * v - k[1] * s, k[2] * k[1] * v + k[0] * s, c + k[2] * k[2] * v],
    ]
}

/// Distance between two essential matrices after unit Frobenius normalization,
/// minimized over the sign ambiguity.
fn essential_distance(a: &EssentialMatrix, b: &EssentialMatrix) -> f64 {
    let (a, b) = (a.normalized(), b.normalized());
    let dist = |sign: f64| {
        a.as_array()
            .iter()
            .flatten()
            .zip(b.as_array().iter().flatten())
            .map(|(x, y)| (x - sign * y).powi(2))
            .sum::<f64>()
            .sqrt()
    };
    dist(1.0).min(dist(-1.0))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut params = match &args.config {
        Some(path) => FivePointParams::from_json(&std::fs::read_to_string(path)?)?,
        None => FivePointParams::default(),
    };
    params.verbose |= args.verbose;
    log::info!("solver parameters: {:?}", params);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut num_recovered = 0;

    for scene in 0..args.num_scenes {
        let w = [(); 3].map(|_| rng.random_range(-0.3..0.3));
        let r = rotation_from_axis_angle(w);
        let t = [
            rng.random_range(0.3..1.0),
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
        ];

        let mut right = Vec::with_capacity(5);
        let mut left = Vec::with_capacity(5);
        for _ in 0..5 {
            let p = [
                rng.random_range(-1.5..1.5),
                rng.random_range(-1.5..1.5),
                rng.random_range(4.0..8.0),
            ];
            let q: [f64; 3] =
                std::array::from_fn(|i| r[i][0] * p[0] + r[i][1] * p[1] + r[i][2] * p[2] + t[i]);
            let mut jitter = || args.noise * rng.random_range(-1.0..1.0);
            left.push([p[0] / p[2] + jitter(), p[1] / p[2] + jitter()]);
            right.push([q[0] / q[2] + jitter(), q[1] / q[2] + jitter()]);
        }

        let truth = EssentialMatrix::from_pose(&r, &t);
        match solve_five_point(&right, &left, &params) {
            Ok(ems) => {
                let best = ems
                    .iter()
                    .map(|e| essential_distance(e, &truth))
                    .fold(f64::INFINITY, f64::min);
                if best < 1e-6 {
                    num_recovered += 1;
                }
                println!(
                    "scene #{scene}: {} candidates, closest to ground truth: {best:.3e}",
                    ems.len()
                );
            }
            Err(err) => println!("scene #{scene}: failed: {err}"),
        }
    }

    println!(
        "recovered the ground truth in {num_recovered}/{} scenes",
        args.num_scenes
    );

    Ok(())
}
