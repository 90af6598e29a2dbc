use solsys::bodies::{
    Body, BodyKind, EvolutionaryStage, PlanetProperties, SpectralType, StarProperties,
};
use solsys::gravity::{AU, EARTH_MASS, SOLAR_MASS};
use solsys::kepler::orbits::{Orbit, OrbitalElements};
use solsys::math::Vec3;
use solsys::system::SolarSystem;
use solsys::time::{DAY, YEAR};

fn sun() -> Body {
    Body::new(
        "Sun",
        SOLAR_MASS,
        6.96e8,
        BodyKind::Star(StarProperties {
            luminosity: 3.828e26,
            surface_temperature: 5_778.0,
            radiation_reach: 1.5e13,
            spectral_type: SpectralType::G,
            evolutionary_stage: EvolutionaryStage::MainSequence,
            activity_level: 0.3,
            flare_probability: 0.1,
            flare_intensity: 0.2,
            flare_radius: 1.0e10,
            age: 4.6e9,
            lifespan: 1.0e10,
        }),
    )
}

fn earth() -> Body {
    Body::new(
        "Earth",
        EARTH_MASS,
        6.371e6,
        BodyKind::Planet(PlanetProperties {
            semi_major_axis: AU,
            eccentricity: 0.0167,
            orbital_period: YEAR,
            inclination: 0.0,
            atmospheric_pressure: 101_325.0,
            average_temperature: 288.0,
            has_rings: false,
            moon_count: 1,
        }),
    )
}

fn earth_orbit() -> Orbit {
    Orbit::new(
        OrbitalElements {
            semi_major_axis: AU,
            eccentricity: 0.0167,
            inclination: 0.0,
            long_asc_node: 0.0,
            arg_periapsis: 0.0,
            true_anomaly: 0.0,
            mean_anomaly: 0.0,
            epoch: 0.0,
        },
        SOLAR_MASS,
    )
}

/// Sun + Earth on its reference orbit, one-day steps.
fn sun_earth_system() -> (SolarSystem, solsys::bodies::BodyId) {
    let mut system = SolarSystem::new();
    system.set_star(sun());
    let earth_id = system.add_body(earth());
    system.set_orbit(earth_id, earth_orbit());
    system.clock_mut().set_time_step(DAY);
    (system, earth_id)
}

#[test]
fn registration_counts_star_and_bodies() {
    let (system, _) = sun_earth_system();
    assert_eq!(system.total_body_count(), 2);
    assert!(system.star().is_some());
    assert_eq!(system.planets().count(), 1);
}

#[test]
fn keplerian_mode_never_falls_back_to_origin() {
    let (mut system, earth_id) = sun_earth_system();
    assert!(system.use_keplerian_orbits());

    for _ in 0..365 {
        system.step();
        let position = system.body_position(earth_id);
        assert!(
            position.norm() > 0.9 * AU,
            "Earth fell to {position:?} at t={}",
            system.clock().seconds()
        );
    }
}

#[test]
fn keplerian_position_comes_back_around_in_a_year() {
    let (mut system, earth_id) = sun_earth_system();
    let start = system.body_position(earth_id);

    for _ in 0..365 {
        system.step();
    }
    // 365 days on a 365.25-day orbit: close to the start, not exact.
    let position = system.body_position(earth_id);
    assert!(
        (position - start).norm() < 0.05 * AU,
        "Earth ended a year at {position:?}"
    );
}

#[test]
fn unknown_body_resolves_to_origin() {
    let (system, _) = sun_earth_system();
    assert_eq!(
        system.body_position(solsys::bodies::BodyId(999)),
        Vec3::zeros()
    );
}

#[test]
fn mode_switch_builds_numerical_states() {
    let (mut system, earth_id) = sun_earth_system();
    assert!(system.body_states().is_empty());

    system.set_use_keplerian_orbits(false);
    let states = system.body_states();
    assert_eq!(states.len(), 2);

    let earth_state = states.iter().find(|s| s.id == earth_id).unwrap();
    assert!((earth_state.position.norm() - earth_orbit().periapsis()).abs() / AU < 1e-6);
    assert!(earth_state.velocity.norm() > 29_000.0);
    assert!(
        earth_state.acceleration.norm() > 0.0,
        "accelerations must be seeded for Verlet's first step"
    );

    // Switching back discards the numerical store.
    system.set_use_keplerian_orbits(true);
    assert!(system.body_states().is_empty());
}

#[test]
fn numerical_mode_moves_bodies() {
    let (mut system, earth_id) = sun_earth_system();
    system.clock_mut().set_time_step(3_600.0);
    system.set_use_keplerian_orbits(false);

    let before = system.body_position(earth_id);
    for _ in 0..24 {
        system.step();
    }
    let after = system.body_position(earth_id);

    // Near periapsis Earth runs a couple percent above the circular speed.
    let expected = 29_785.0 * DAY;
    let moved = (after - before).norm();
    assert!(
        (moved - expected).abs() / expected < 5e-2,
        "Earth moved {moved} m in a day"
    );
}

#[test]
fn numerical_energy_is_stable_under_verlet() {
    let (mut system, _) = sun_earth_system();
    system.clock_mut().set_time_step(3_600.0);
    system.set_use_keplerian_orbits(false);

    let initial = system.total_energy();
    for _ in 0..2_000 {
        system.step();
    }
    let drift = ((system.total_energy() - initial) / initial).abs();
    assert!(drift < 1e-3, "energy drifted {drift}");
}

#[test]
fn clock_pause_freezes_the_simulation() {
    let (mut system, _) = sun_earth_system();
    system.clock_mut().pause();

    system.step();
    assert_eq!(system.clock().seconds(), 0.0);
    assert_eq!(system.clock().tick_count(), 0);

    system.clock_mut().resume();
    system.step();
    assert!((system.clock().seconds() - DAY).abs() < 1e-9);
    assert_eq!(system.clock().tick_count(), 1);
}

#[test]
fn time_scale_multiplies_each_tick() {
    let (mut system, _) = sun_earth_system();
    system.clock_mut().set_time_scale(10.0);
    system.step();
    assert!((system.clock().seconds() - 10.0 * DAY).abs() < 1e-6);
    assert!((system.clock().days() - 10.0).abs() < 1e-9);
}

#[test]
fn reset_preserves_configuration() {
    let (mut system, _) = sun_earth_system();
    system.clock_mut().set_time_scale(2.0);
    for _ in 0..10 {
        system.step();
    }
    system.reset();

    assert_eq!(system.clock().seconds(), 0.0);
    assert_eq!(system.clock().tick_count(), 0);
    assert!((system.clock().time_step() - DAY).abs() < 1e-9);
    assert!((system.clock().time_scale() - 2.0).abs() < 1e-12);
}
