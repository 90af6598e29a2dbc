//! Keplerian orbits.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gravity;
use crate::math::{normalize_angle, Vec3};

/// Default convergence tolerance for the Kepler-equation solver.
pub const KEPLER_TOLERANCE: f64 = 1e-12;
/// Default iteration cap for the Kepler-equation solver.
pub const KEPLER_MAX_ITER: u32 = 100;

/// Classical Keplerian orbital elements.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis `a` (m). Infinite for a parabolic trajectory.
    pub semi_major_axis: f64,
    /// Eccentricity `e` (0 = circle, 0 < e < 1 ellipse, e ≥ 1 unbound).
    pub eccentricity: f64,
    /// Inclination `i` (radians).
    pub inclination: f64,
    /// Longitude of the ascending node `Ω` (radians).
    pub long_asc_node: f64,
    /// Argument of periapsis `ω` (radians).
    pub arg_periapsis: f64,
    /// True anomaly `ν` (radians).
    pub true_anomaly: f64,
    /// Mean anomaly `M` (radians).
    pub mean_anomaly: f64,
    /// Reference epoch `t₀` (seconds).
    pub epoch: f64,
}

/// Outcome of a Kepler-equation solve.
///
/// The eccentric anomaly is always usable: when the iteration cap is hit the
/// last iterate is returned and `converged` is false. Near `e = 1` callers
/// must treat the value as approximate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly `E` (radians).
    pub eccentric_anomaly: f64,
    pub converged: bool,
    pub iterations: u32,
}

/// One body's orbit around a central mass: elements plus the gravitational
/// parameter `μ = G·M` of the parent.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    elements: OrbitalElements,
    central_mass: f64,
    mu: f64,
}

impl Orbit {
    pub fn new(elements: OrbitalElements, central_mass: f64) -> Self {
        Self {
            elements,
            central_mass,
            mu: gravity::G * central_mass,
        }
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    /// Replace the orbital elements wholesale. The central mass (and `μ`)
    /// are unchanged.
    pub fn set_elements(&mut self, elements: OrbitalElements) {
        self.elements = elements;
    }

    pub fn central_mass(&self) -> f64 {
        self.central_mass
    }

    /// Standard gravitational parameter `μ` (m³/s²).
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Orbital period by Kepler's third law (seconds), or `-1.0` for an
    /// unbound orbit (`e ≥ 1`), which has no period.
    pub fn period(&self) -> f64 {
        if self.elements.eccentricity >= 1.0 {
            return -1.0;
        }
        std::f64::consts::TAU * libm::sqrt(self.elements.semi_major_axis.powi(3) / self.mu)
    }

    /// Mean motion `n = sqrt(μ/a³)` (radians per second).
    pub fn mean_motion(&self) -> f64 {
        libm::sqrt(self.mu / self.elements.semi_major_axis.powi(3))
    }

    /// Periapsis distance `a(1 − e)` (m).
    pub fn periapsis(&self) -> f64 {
        self.elements.semi_major_axis * (1.0 - self.elements.eccentricity)
    }

    /// Apoapsis distance `a(1 + e)` (m), or `-1.0` for an unbound orbit.
    pub fn apoapsis(&self) -> f64 {
        if self.elements.eccentricity >= 1.0 {
            return -1.0;
        }
        self.elements.semi_major_axis * (1.0 + self.elements.eccentricity)
    }

    /// Solve Kepler's equation `E − e·sin E = M` for the eccentric anomaly
    /// with the default tolerance and iteration cap.
    pub fn solve_kepler(&self, mean_anomaly: f64) -> KeplerSolution {
        self.solve_kepler_with(mean_anomaly, KEPLER_TOLERANCE, KEPLER_MAX_ITER)
    }

    /// Newton–Raphson solve of Kepler's equation, seeded with `E₀ = M`.
    ///
    /// Stops when the correction magnitude drops below `tolerance`;
    /// otherwise returns the last iterate after `max_iter` rounds with
    /// `converged` false.
    pub fn solve_kepler_with(&self, mean_anomaly: f64, tolerance: f64, max_iter: u32) -> KeplerSolution {
        let e = self.elements.eccentricity;
        let mut ea = mean_anomaly;

        for iter in 0..max_iter {
            let dea = (ea - e * libm::sin(ea) - mean_anomaly) / (1.0 - e * libm::cos(ea));
            ea -= dea;
            if dea.abs() < tolerance {
                return KeplerSolution {
                    eccentric_anomaly: ea,
                    converged: true,
                    iterations: iter + 1,
                };
            }
        }

        warn!(
            mean_anomaly,
            eccentricity = e,
            max_iter,
            "Kepler solver hit the iteration cap; returning last iterate"
        );
        KeplerSolution {
            eccentric_anomaly: ea,
            converged: false,
            iterations: max_iter,
        }
    }

    /// Convert eccentric anomaly to true anomaly via the half-angle
    /// relation; `atan2` keeps the quadrant correct.
    pub fn ecc_to_true_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        let e = self.elements.eccentricity;
        2.0 * libm::atan2(
            libm::sqrt(1.0 + e) * libm::sin(eccentric_anomaly / 2.0),
            libm::sqrt(1.0 - e) * libm::cos(eccentric_anomaly / 2.0),
        )
    }

    /// Inertial-frame position at simulated time `t` (m).
    pub fn position_at(&self, time: f64) -> Vec3 {
        let (ea, nu) = self.anomalies_at(time);
        let r = self.elements.semi_major_axis * (1.0 - self.elements.eccentricity * libm::cos(ea));

        let perifocal = Vec3::new(r * libm::cos(nu), r * libm::sin(nu), 0.0);
        self.perifocal_matrix() * perifocal
    }

    /// Inertial-frame velocity at simulated time `t` (m/s).
    pub fn velocity_at(&self, time: f64) -> Vec3 {
        let (_, nu) = self.anomalies_at(time);
        let e = self.elements.eccentricity;
        let a = self.elements.semi_major_axis;
        let h = libm::sqrt(self.mu * a * (1.0 - e * e));

        let perifocal = Vec3::new(
            -self.mu / h * libm::sin(nu),
            self.mu / h * (e + libm::cos(nu)),
            0.0,
        );
        self.perifocal_matrix() * perifocal
    }

    /// Advance the mean anomaly by `n·dt`, wrapped to `[0, 2π)`. This is the
    /// sole mutator used by the Keplerian propagation path.
    pub fn update_mean_anomaly(&mut self, dt: f64) {
        self.elements.mean_anomaly =
            normalize_angle(self.elements.mean_anomaly + self.mean_motion() * dt);
    }

    /// Eccentric and true anomaly at time `t`, from the epoch elements.
    fn anomalies_at(&self, time: f64) -> (f64, f64) {
        let n = self.mean_motion();
        let ma = normalize_angle(self.elements.mean_anomaly + n * (time - self.elements.epoch));
        let ea = self.solve_kepler(ma).eccentric_anomaly;
        (ea, self.ecc_to_true_anomaly(ea))
    }

    /// Rotation from the perifocal frame into the inertial frame: the
    /// classical 3-1-3 sequence over `Ω`, `i`, `ω`.
    fn perifocal_matrix(&self) -> Matrix3<f64> {
        let i = self.elements.inclination;
        let argpe = self.elements.arg_periapsis;
        let lan = self.elements.long_asc_node;

        let m11 = libm::cos(lan) * libm::cos(argpe) - libm::sin(lan) * libm::sin(argpe) * libm::cos(i);
        let m12 = -libm::cos(lan) * libm::sin(argpe) - libm::sin(lan) * libm::cos(argpe) * libm::cos(i);
        let m13 = libm::sin(lan) * libm::sin(i);
        let m21 = libm::sin(lan) * libm::cos(argpe) + libm::cos(lan) * libm::sin(argpe) * libm::cos(i);
        let m22 = -libm::sin(lan) * libm::sin(argpe) + libm::cos(lan) * libm::cos(argpe) * libm::cos(i);
        let m23 = -libm::cos(lan) * libm::sin(i);
        let m31 = libm::sin(argpe) * libm::sin(i);
        let m32 = libm::cos(argpe) * libm::sin(i);
        let m33 = libm::cos(i);

        Matrix3::new(m11, m12, m13, m21, m22, m23, m31, m32, m33)
    }
}

/// Specific orbital energy `−μ/2a` (J/kg); zero when `a` degenerates.
pub fn orbital_energy(mu: f64, semi_major_axis: f64) -> f64 {
    if semi_major_axis.abs() < 1e-10 {
        return 0.0;
    }
    -mu / (2.0 * semi_major_axis)
}

/// Specific angular momentum `h = sqrt(μ·a·(1 − e²))` (m²/s).
pub fn specific_angular_momentum(mu: f64, semi_major_axis: f64, eccentricity: f64) -> f64 {
    libm::sqrt(mu * semi_major_axis * (1.0 - eccentricity * eccentricity))
}

/// Recover orbital elements from an inertial state vector.
///
/// Degenerate geometries (equatorial, circular, parabolic) fall back to zero
/// angles / an infinite semi-major axis rather than erroring.
pub fn elements_from_state(position: &Vec3, velocity: &Vec3, mu: f64) -> OrbitalElements {
    let h = position.cross(velocity);
    let node = Vec3::new(-h.y, h.x, 0.0);

    let r = position.norm();
    let v = velocity.norm();

    let e_vec = (position * (v * v - mu / r) - velocity * position.dot(velocity)) / mu;
    let eccentricity = e_vec.norm();

    let energy = v * v / 2.0 - mu / r;
    let semi_major_axis = if (eccentricity - 1.0).abs() > 1e-10 {
        -mu / (2.0 * energy)
    } else {
        f64::INFINITY
    };

    let inclination = libm::acos(h.z / h.norm());

    let n_mag = node.norm();
    let long_asc_node = if n_mag > 1e-10 {
        let lan = libm::acos(node.x / n_mag);
        if node.y < 0.0 {
            std::f64::consts::TAU - lan
        } else {
            lan
        }
    } else {
        0.0
    };

    let arg_periapsis = if n_mag > 1e-10 && eccentricity > 1e-10 {
        let argpe = libm::acos(node.dot(&e_vec) / (n_mag * eccentricity));
        if e_vec.z < 0.0 {
            std::f64::consts::TAU - argpe
        } else {
            argpe
        }
    } else {
        0.0
    };

    let true_anomaly = if eccentricity > 1e-10 {
        let nu = libm::acos(e_vec.dot(position) / (eccentricity * r));
        if position.dot(velocity) < 0.0 {
            std::f64::consts::TAU - nu
        } else {
            nu
        }
    } else {
        0.0
    };

    let ea = 2.0
        * libm::atan(
            libm::sqrt((1.0 - eccentricity) / (1.0 + eccentricity)) * libm::tan(true_anomaly / 2.0),
        );
    let mean_anomaly = ea - eccentricity * libm::sin(ea);

    OrbitalElements {
        semi_major_axis,
        eccentricity,
        inclination,
        long_asc_node,
        arg_periapsis,
        true_anomaly,
        mean_anomaly,
        epoch: 0.0,
    }
}
