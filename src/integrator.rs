//! Fixed-step integration schemes for the N-body system.
//!
//! Each scheme advances one [`BodyState`] by `dt` against a frozen snapshot
//! of all body states; [`step_all`] takes that snapshot once and commits
//! every body's update against it, so results do not depend on body
//! iteration order.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::bodies::BodyId;
use crate::gravity;
use crate::math::Vec3;

/// The numerical stepping rules, in increasing order of accuracy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationMethod {
    /// Explicit Euler (order 1). Cheapest, largest energy drift.
    #[serde(rename = "euler")]
    Euler,
    /// Symplectic Euler (order 1, much better long-term energy behavior).
    #[serde(rename = "symplectic-euler")]
    SymplecticEuler,
    /// Velocity Verlet (order 2), the workhorse for orbital mechanics.
    #[serde(rename = "velocity-verlet")]
    VelocityVerlet,
    /// Classical 4th-order Runge–Kutta: four force evaluations per step.
    #[serde(rename = "rk4")]
    Rk4,
}

/// Mutable per-body record consumed by numerical integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub id: BodyId,
    /// Mass (kg).
    pub mass: f64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

/// Gravitational acceleration on `body` summed over every other body in the
/// snapshot, skipping self. O(n) per body, O(n²) per full step.
pub fn n_body_acceleration(body: &BodyState, all: &[BodyState]) -> Vec3 {
    all.iter()
        .filter(|other| other.id != body.id)
        .fold(Vec3::zeros(), |acc, other| {
            acc + gravity::acceleration(other.mass, &body.position, &other.position)
        })
}

/// Advance every body state one step of `dt` seconds.
///
/// All accelerations are evaluated against an immutable snapshot taken
/// before any write, then the updates are committed together.
pub fn step_all(states: &mut [BodyState], dt: f64, method: IntegrationMethod) {
    if states.is_empty() {
        return;
    }
    let snapshot = states.to_vec();
    for body in states.iter_mut() {
        match method {
            IntegrationMethod::Euler => euler(body, dt, &snapshot),
            IntegrationMethod::SymplecticEuler => symplectic_euler(body, dt, &snapshot),
            IntegrationMethod::VelocityVerlet => velocity_verlet(body, dt, &snapshot),
            IntegrationMethod::Rk4 => rk4(body, dt, &snapshot),
        }
    }
}

/// Explicit Euler: position from the old velocity, velocity from the
/// current acceleration.
pub fn euler(body: &mut BodyState, dt: f64, all: &[BodyState]) {
    body.acceleration = n_body_acceleration(body, all);
    body.position += body.velocity * dt;
    body.velocity += body.acceleration * dt;
}

/// Symplectic Euler: velocity first, then position from the updated
/// velocity.
pub fn symplectic_euler(body: &mut BodyState, dt: f64, all: &[BodyState]) {
    body.acceleration = n_body_acceleration(body, all);
    body.velocity += body.acceleration * dt;
    body.position += body.velocity * dt;
}

/// Velocity Verlet: drift on the old acceleration, re-evaluate at the new
/// position, finish the velocity with the averaged acceleration.
///
/// Uses the acceleration stored from the previous step; state
/// initialization must seed it (see the orchestrator).
pub fn velocity_verlet(body: &mut BodyState, dt: f64, all: &[BodyState]) {
    let old_accel = body.acceleration;
    body.position += body.velocity * dt + old_accel * (0.5 * dt * dt);

    body.acceleration = n_body_acceleration(body, all);
    body.velocity += (old_accel + body.acceleration) * (0.5 * dt);
}

/// Classical RK4 over the coupled position/velocity derivatives, evaluated
/// at `t`, twice at `t + dt/2`, and at `t + dt`.
pub fn rk4(body: &mut BodyState, dt: f64, all: &[BodyState]) {
    let mut probe = body.clone();

    let k1v = n_body_acceleration(body, all);
    let k1r = body.velocity;

    probe.position = body.position + k1r * (dt * 0.5);
    probe.velocity = body.velocity + k1v * (dt * 0.5);
    let k2v = n_body_acceleration(&probe, all);
    let k2r = probe.velocity;

    probe.position = body.position + k2r * (dt * 0.5);
    probe.velocity = body.velocity + k2v * (dt * 0.5);
    let k3v = n_body_acceleration(&probe, all);
    let k3r = probe.velocity;

    probe.position = body.position + k3r * dt;
    probe.velocity = body.velocity + k3v * dt;
    let k4v = n_body_acceleration(&probe, all);
    let k4r = probe.velocity;

    body.position += (k1r + k2r * 2.0 + k3r * 2.0 + k4r) * (dt / 6.0);
    body.velocity += (k1v + k2v * 2.0 + k3v * 2.0 + k4v) * (dt / 6.0);
    body.acceleration = n_body_acceleration(body, all);
}

/// Total mechanical energy: kinetic plus pairwise potential, each pair
/// counted once.
pub fn total_energy(states: &[BodyState]) -> f64 {
    let kinetic: f64 = states
        .iter()
        .map(|b| 0.5 * b.mass * b.velocity.norm_squared())
        .sum();
    let potential: f64 = states
        .iter()
        .tuple_combinations()
        .map(|(a, b)| gravity::potential_energy(a.mass, b.mass, &a.position, &b.position))
        .sum();
    kinetic + potential
}

/// Total angular momentum `Σ r × m·v` about the origin.
pub fn total_angular_momentum(states: &[BodyState]) -> Vec3 {
    states.iter().fold(Vec3::zeros(), |acc, b| {
        acc + b.position.cross(&(b.velocity * b.mass))
    })
}

/// Mass-weighted mean position; the origin when the system is massless.
pub fn center_of_mass(states: &[BodyState]) -> Vec3 {
    let total_mass: f64 = states.iter().map(|b| b.mass).sum();
    if total_mass < 1e-10 {
        return Vec3::zeros();
    }
    states
        .iter()
        .fold(Vec3::zeros(), |acc, b| acc + b.position * b.mass)
        / total_mass
}

/// Mass-weighted mean velocity; the origin when the system is massless.
pub fn center_of_mass_velocity(states: &[BodyState]) -> Vec3 {
    let total_mass: f64 = states.iter().map(|b| b.mass).sum();
    if total_mass < 1e-10 {
        return Vec3::zeros();
    }
    states
        .iter()
        .fold(Vec3::zeros(), |acc, b| acc + b.velocity * b.mass)
        / total_mass
}
