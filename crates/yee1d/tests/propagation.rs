//! End-to-end propagation checks against known analytic behavior

use approx::assert_abs_diff_eq;
use yee1d::{
    reflection_coefficient, transmission_coefficient, AbsorbingLayer, Boundary, BoundaryPair,
    GaussianPulse, Grid, Region, Simulation, SimulationError,
};

/// Gaussian pulse (σ = 0.1) centered in [-1, 1] on 401 nodes
fn cavity(boundaries: BoundaryPair) -> Simulation {
    let grid = Grid::uniform(-1.0, 1.0, 401).unwrap();
    let initial = GaussianPulse::new(0.0, 0.1).sample(&grid);
    let mut sim = Simulation::new(grid, boundaries);
    sim.set_initial_condition(&initial).unwrap();
    sim
}

fn half_courant_dt(sim: &Simulation) -> f64 {
    0.5 * sim.grid().dx()
}

fn run_steps(sim: &mut Simulation, steps: usize) {
    let dt = half_courant_dt(sim);
    for _ in 0..steps {
        sim.step(dt).unwrap();
    }
}

fn relative_spread(values: &[f64]) -> f64 {
    let max = values.iter().cloned().fold(f64::MIN, f64::max);
    let min = values.iter().cloned().fold(f64::MAX, f64::min);
    (max - min) / max
}

fn window_max(sim: &Simulation, from: f64, to: f64) -> f64 {
    window(sim, from, to).fold(f64::MIN, f64::max)
}

fn window_min(sim: &Simulation, from: f64, to: f64) -> f64 {
    window(sim, from, to).fold(f64::MAX, f64::min)
}

fn window<'a>(sim: &'a Simulation, from: f64, to: f64) -> impl Iterator<Item = f64> + 'a {
    sim.grid()
        .primary()
        .iter()
        .zip(sim.electric_field())
        .filter(move |&(&x, _)| x >= from && x <= to)
        .map(|(_, &e)| e)
}

#[test]
fn conductor_cavity_round_trip_inverts_pulse() {
    let mut sim = cavity(BoundaryPair::both(Boundary::Pec));
    let initial = sim.electric_field().to_vec();

    // Two half-pulses travel to the walls and back: 2 time units
    run_steps(&mut sim, 799);

    let e = sim.electric_field();
    assert_abs_diff_eq!(e[200], -1.0, epsilon = 0.02);

    let argmin = e
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert!((198..=202).contains(&argmin), "minimum at node {argmin}");

    let deviation = e
        .iter()
        .zip(&initial)
        .map(|(a, b)| (a + b).abs())
        .fold(0.0, f64::max);
    assert!(deviation < 0.05, "deviation from inverted pulse {deviation}");
}

#[test]
fn magnetic_cavity_round_trip_keeps_sign() {
    let mut sim = cavity(BoundaryPair::both(Boundary::Pmc));
    run_steps(&mut sim, 799);
    assert_abs_diff_eq!(sim.electric_field()[200], 1.0, epsilon = 0.02);
}

#[test]
fn lossless_cavity_conserves_energy() {
    let mut sim = cavity(BoundaryPair::both(Boundary::Pec));
    run_steps(&mut sim, 799);
    let total = sim.energy().total();
    assert_eq!(total.len(), 799);

    // Pulse away from the walls
    assert!(relative_spread(&total[150..231]) < 1e-5);
    // Across both wall reflections
    assert!(relative_spread(&total[50..]) < 0.05);
}

#[test]
fn dielectric_interface_matches_fresnel() {
    let grid = Grid::uniform(-3.0, 3.0, 1201).unwrap();
    let initial = GaussianPulse::new(-1.0, 0.1).sample(&grid);
    let mut sim = Simulation::new(grid, BoundaryPair::both(Boundary::Mur));
    sim.set_permittivity_regions(&[Region::new(0.0, 10.0, 2.0)]);
    assert_eq!(sim.materials().permittivity()[599], 1.0);
    assert_eq!(sim.materials().permittivity()[600], 2.0);
    sim.set_initial_condition(&initial).unwrap();

    run_steps(&mut sim, 640);

    // Left-going half never meets the interface
    let incident = window_max(&sim, -2.95, -2.2);
    assert_abs_diff_eq!(incident, 0.5, epsilon = 0.01);

    let reflected = window_min(&sim, -1.2, -0.2) / incident;
    let transmitted = window_max(&sim, 0.1, 1.0) / incident;
    assert_abs_diff_eq!(reflected, reflection_coefficient(1.0, 2.0), epsilon = 0.01);
    assert_abs_diff_eq!(transmitted, transmission_coefficient(1.0, 2.0), epsilon = 0.02);
}

#[test]
fn absorbing_layer_suppresses_wall_reflection() {
    let ratio = |layer: Option<AbsorbingLayer>| {
        let mut sim = cavity(BoundaryPair::both(Boundary::Pec));
        if let Some(layer) = layer {
            let dx = sim.grid().dx();
            sim.set_absorbing_layer(&layer, dx).unwrap();
        }
        run_steps(&mut sim, 900);
        let total = sim.energy().total();
        let returned = total[700..900].iter().cloned().fold(f64::MIN, f64::max);
        returned / total[100]
    };

    let reflection = 1e-2;
    let absorbed = ratio(Some(AbsorbingLayer::new(40, 3.0, reflection)));
    assert!(
        absorbed < 4.0 * reflection * reflection,
        "energy ratio with layer {absorbed}"
    );

    let bare = ratio(None);
    assert!(bare > 0.5, "energy ratio without layer {bare}");
}

#[test]
fn mur_ends_let_the_pulse_leave() {
    let mut sim = cavity(BoundaryPair::both(Boundary::Mur));
    run_steps(&mut sim, 1200);
    let total = sim.energy().total();
    assert!(total[1199] / total[100] < 1e-4);
    assert!(sim.electric_field().iter().all(|e| e.abs() < 1e-2));
}

#[test]
fn run_until_reports_missing_initial_condition() {
    let grid = Grid::uniform(0.0, 1.0, 11).unwrap();
    let mut sim = Simulation::new(grid, BoundaryPair::default());
    assert_eq!(sim.run_until(1.0, 0.05), Err(SimulationError::Uninitialized));
    assert!(sim.energy().is_empty());
}

#[test]
fn run_until_matches_manual_steps() {
    let boundaries = BoundaryPair::new(Boundary::Mur, Boundary::Periodic);
    let mut stepped = cavity(boundaries);
    let mut driven = cavity(boundaries);
    let dt = half_courant_dt(&stepped);

    let final_time = 0.3;
    let steps = yee1d::step_count(final_time, dt);
    for _ in 0..steps {
        stepped.step(dt).unwrap();
    }
    let field = driven.run_until(final_time, dt).unwrap().to_vec();

    assert_eq!(field, stepped.electric_field());
    assert_eq!(driven.energy(), stepped.energy());
    assert_eq!(driven.steps_taken(), steps);
}
