use solsys::gravity::{AU, SOLAR_MASS};
use solsys::kepler::orbits::{elements_from_state, Orbit, OrbitalElements};

fn elements(a: f64, e: f64) -> OrbitalElements {
    OrbitalElements {
        semi_major_axis: a,
        eccentricity: e,
        inclination: 0.0,
        long_asc_node: 0.0,
        arg_periapsis: 0.0,
        true_anomaly: 0.0,
        mean_anomaly: 0.0,
        epoch: 0.0,
    }
}

#[test]
fn kepler_equation_round_trips_across_eccentricities() {
    for e_step in 0..=19 {
        let e = e_step as f64 * 0.05;
        let orbit = Orbit::new(elements(AU, e), SOLAR_MASS);

        for m_step in 0..32 {
            let m = m_step as f64 * std::f64::consts::TAU / 32.0;
            let solution = orbit.solve_kepler(m);
            assert!(
                solution.converged,
                "solver failed to converge at e={e}, M={m}"
            );

            let ea = solution.eccentric_anomaly;
            let recovered = ea - e * ea.sin();
            assert!(
                (recovered - m).abs() < 1e-9,
                "round trip at e={e}, M={m}: got {recovered}"
            );
        }
    }
}

#[test]
fn circular_orbit_radius_is_constant() {
    let orbit = Orbit::new(elements(AU, 0.0), SOLAR_MASS);
    let period = orbit.period();

    for step in 0..48 {
        let t = step as f64 * period / 48.0;
        let r = orbit.position_at(t).norm();
        assert!(
            (r - AU).abs() / AU < 1e-9,
            "radius diverged from a at t={t}: {r}"
        );
    }
}

#[test]
fn period_follows_keplers_third_law() {
    let orbit = Orbit::new(elements(AU, 0.0167), SOLAR_MASS);
    let year = 365.25 * 86_400.0;
    // The solar-mass constant carries ~4 significant figures.
    assert!(
        (orbit.period() - year).abs() / year < 1e-3,
        "Earth-like orbit period was {}",
        orbit.period()
    );
}

#[test]
fn unbound_orbits_report_sentinels() {
    let orbit = Orbit::new(elements(AU, 1.2), SOLAR_MASS);
    assert_eq!(orbit.period(), -1.0);
    assert_eq!(orbit.apoapsis(), -1.0);
}

#[test]
fn apsides_bracket_the_semi_major_axis() {
    let orbit = Orbit::new(elements(AU, 0.3), SOLAR_MASS);
    assert!((orbit.periapsis() - AU * 0.7).abs() < 1.0);
    assert!((orbit.apoapsis() - AU * 1.3).abs() < 1.0);
}

#[test]
fn mean_anomaly_update_wraps() {
    let mut orbit = Orbit::new(elements(AU, 0.1), SOLAR_MASS);
    let period = orbit.period();

    orbit.update_mean_anomaly(period * 1.25);
    let m = orbit.elements().mean_anomaly;
    assert!(
        (m - std::f64::consts::FRAC_PI_2).abs() < 1e-6,
        "expected a quarter turn, got {m}"
    );
    assert!((0.0..std::f64::consts::TAU).contains(&m));
}

#[test]
fn velocity_matches_vis_viva_on_a_circle() {
    let orbit = Orbit::new(elements(AU, 0.0), SOLAR_MASS);
    let speed = orbit.velocity_at(0.0).norm();
    let circular = (orbit.mu() / AU).sqrt();
    assert!(
        (speed - circular).abs() < 1e-3,
        "circular speed was {speed}, expected {circular}"
    );
}

#[test]
fn elements_recovered_from_state_vector() {
    let source = Orbit::new(
        OrbitalElements {
            mean_anomaly: 1.0,
            ..elements(AU, 0.2)
        },
        SOLAR_MASS,
    );
    let position = source.position_at(0.0);
    let velocity = source.velocity_at(0.0);

    let recovered = elements_from_state(&position, &velocity, source.mu());
    assert!(
        (recovered.semi_major_axis - AU).abs() / AU < 1e-6,
        "a was {}",
        recovered.semi_major_axis
    );
    assert!(
        (recovered.eccentricity - 0.2).abs() < 1e-6,
        "e was {}",
        recovered.eccentricity
    );
    assert!(recovered.inclination.abs() < 1e-6);
}

#[test]
fn inclined_orbit_leaves_the_reference_plane() {
    let orbit = Orbit::new(
        OrbitalElements {
            inclination: 0.5,
            ..elements(AU, 0.0)
        },
        SOLAR_MASS,
    );
    let period = orbit.period();

    let max_z = (0..64)
        .map(|step| orbit.position_at(step as f64 * period / 64.0).z.abs())
        .fold(0.0f64, f64::max);
    // Peak out-of-plane excursion of a circular orbit is a·sin(i).
    let expected = AU * 0.5f64.sin();
    assert!(
        (max_z - expected).abs() / expected < 1e-2,
        "max |z| was {max_z}, expected {expected}"
    );
}
