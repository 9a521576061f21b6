use tvd_rk::{ModelState, OdeModel, SchemeConfig, StateVector};

/// Periodic first order upwind advection, `u_t + a u_x = 0`.
struct Advection {
    a: f64,
    dx: f64,
}

impl OdeModel for Advection {
    type State = StateVector;

    fn f(&self, _t: f64, u: &StateVector, du: &mut StateVector) {
        let n = u.len();
        for i in 0..n {
            du[i] = -self.a * (u[i] - u[(i + n - 1) % n]) / self.dx;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let n = 200;
    let dx = 1.0 / n as f64;
    let model = Advection { a: 1.0, dx };
    let dt = 0.8 * dx;
    let x0: Vec<f64> = (0..n)
        .map(|i| {
            let x = i as f64 * dx;
            if (0.25..0.5).contains(&x) { 1.0 } else { 0.0 }
        })
        .collect();

    for stages in [1, 2, 3, 5] {
        let config = SchemeConfig::from_ron(&format!("(stages: {stages}, stop_on_fail: true)"))?;
        let integrator = config.build()?;
        println!("{}", integrator.describe("# "));

        let mut u = ModelState::new(&model, StateVector::new(x0.clone()));
        let mut buffer = u.stage_buffer(integrator.stages());
        let mut t = 0.0;
        let steps = (0.5 / dt).round() as usize;
        for _ in 0..steps {
            integrator.integrate(&mut u, &mut buffer, dt, t)?;
            t += dt;
        }

        let (min, max) = u
            .value
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        println!(
            "{:12} t = {:6.3}   TV = {:10.6}   min = {:10.6}   max = {:10.6}",
            integrator.scheme().map(|s| s.name()).unwrap_or("?"),
            t,
            u.value.total_variation(),
            min,
            max
        );
    }

    // four stages has no scheme
    if let Err(e) = SchemeConfig::new(4).build() {
        println!("{e}");
    }
    Ok(())
}
