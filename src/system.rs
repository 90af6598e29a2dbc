//! The simulation orchestrator.
//!
//! [`SolarSystem`] is the sole owner of the body registry, the orbit map,
//! the numerical body states, and the clock. Each [`SolarSystem::step`]
//! advances the whole system one tick under the active propagation mode;
//! queries resolve from whichever store that mode makes authoritative.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::arena::Arena;
use crate::bodies::{Body, BodyId, BodyKind};
use crate::integrator::{self, BodyState, IntegrationMethod};
use crate::kepler::orbits::Orbit;
use crate::math::Vec3;
use crate::time::SimClock;

#[derive(Clone, Debug)]
pub struct SolarSystem {
    bodies: Arena<BodyId, Body>,
    star_id: Option<BodyId>,
    orbits: HashMap<BodyId, Orbit>,
    states: Vec<BodyState>,
    clock: SimClock,
    integration_method: IntegrationMethod,
    use_keplerian_orbits: bool,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            bodies: Arena::new(),
            star_id: None,
            orbits: HashMap::new(),
            states: Vec::new(),
            clock: SimClock::default(),
            integration_method: IntegrationMethod::VelocityVerlet,
            use_keplerian_orbits: true,
        }
    }

    /// Register the central star. Replaces any previous central body.
    pub fn set_star(&mut self, star: Body) -> BodyId {
        if !star.is_star() {
            warn!(name = %star.name, "central body registered with a non-star kind");
        }
        let id = self.bodies.push(star);
        self.star_id = Some(id);
        id
    }

    /// Register an orbiting body and return its id.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        self.bodies.push(body)
    }

    /// Register `orbit` as the Keplerian propagator for `id`.
    pub fn set_orbit(&mut self, id: BodyId, orbit: Orbit) {
        if !self.bodies.contains(id) {
            debug!(?id, "orbit registered for an id not in the body registry");
        }
        self.orbits.insert(id, orbit);
    }

    pub fn star(&self) -> Option<&Body> {
        self.star_id.and_then(|id| self.bodies.get(id))
    }

    pub fn star_mut(&mut self) -> Option<&mut Body> {
        self.star_id.and_then(|id| self.bodies.get_mut(id))
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter()
    }

    /// The registered planets, in no particular order.
    pub fn planets(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .filter(|(_, b)| matches!(b.kind, BodyKind::Planet(_)))
    }

    pub fn orbit(&self, id: BodyId) -> Option<&Orbit> {
        self.orbits.get(&id)
    }

    /// Number of registered bodies, central star included.
    pub fn total_body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    pub fn integration_method(&self) -> IntegrationMethod {
        self.integration_method
    }

    pub fn set_integration_method(&mut self, method: IntegrationMethod) {
        self.integration_method = method;
    }

    pub fn use_keplerian_orbits(&self) -> bool {
        self.use_keplerian_orbits
    }

    /// Switch between analytical and numerical propagation.
    ///
    /// Entering numerical mode rebuilds the body states from the registry
    /// and orbit map at the current simulated time; leaving it discards
    /// them. A no-op when the mode is unchanged.
    pub fn set_use_keplerian_orbits(&mut self, use_keplerian: bool) {
        if self.use_keplerian_orbits == use_keplerian {
            return;
        }
        self.use_keplerian_orbits = use_keplerian;
        if use_keplerian {
            self.states.clear();
        } else {
            self.initialize_body_states();
        }
        debug!(keplerian = use_keplerian, "propagation mode switched");
    }

    /// Advance the simulation one tick.
    ///
    /// Keplerian mode advances every registered orbit's mean anomaly by the
    /// clock's step; numerical mode advances every body state under the
    /// configured scheme. The clock then ticks once, applying the time
    /// scale.
    pub fn step(&mut self) {
        let dt = self.clock.time_step();

        if self.use_keplerian_orbits {
            for orbit in self.orbits.values_mut() {
                orbit.update_mean_anomaly(dt);
            }
        } else {
            integrator::step_all(&mut self.states, dt, self.integration_method);
        }

        self.clock.tick();
    }

    /// Current inertial position of `id`.
    ///
    /// In Keplerian mode a registered orbit is evaluated at the current
    /// simulated time; otherwise the body states are scanned. Unknown ids
    /// resolve to the origin.
    pub fn body_position(&self, id: BodyId) -> Vec3 {
        if self.use_keplerian_orbits {
            if let Some(orbit) = self.orbits.get(&id) {
                return orbit.position_at(self.clock.seconds());
            }
        }
        self.states
            .iter()
            .find(|s| s.id == id)
            .map_or_else(Vec3::zeros, |s| s.position)
    }

    /// Current inertial velocity of `id`, with the same resolution rules as
    /// [`SolarSystem::body_position`].
    pub fn body_velocity(&self, id: BodyId) -> Vec3 {
        if self.use_keplerian_orbits {
            if let Some(orbit) = self.orbits.get(&id) {
                return orbit.velocity_at(self.clock.seconds());
            }
        }
        self.states
            .iter()
            .find(|s| s.id == id)
            .map_or_else(Vec3::zeros, |s| s.velocity)
    }

    /// The numerical body states. Empty in Keplerian mode.
    pub fn body_states(&self) -> &[BodyState] {
        &self.states
    }

    /// Total mechanical energy of the numerical system (J).
    pub fn total_energy(&self) -> f64 {
        integrator::total_energy(&self.states)
    }

    /// Total angular momentum of the numerical system about the origin.
    pub fn total_angular_momentum(&self) -> Vec3 {
        integrator::total_angular_momentum(&self.states)
    }

    /// Zero the clock and rebuild (or discard) the numerical state.
    pub fn reset(&mut self) {
        self.clock.reset();
        if self.use_keplerian_orbits {
            self.states.clear();
        } else {
            self.initialize_body_states();
        }
    }

    /// Build the body states from the registry: the central star at the
    /// origin, every orbit-registered body at its propagated state.
    ///
    /// Bodies with neither role carry no spatial data and are skipped; a
    /// position query for them falls back to the origin. Accelerations are
    /// pre-accumulated so velocity Verlet's first drift sees a valid
    /// previous acceleration.
    fn initialize_body_states(&mut self) {
        self.states.clear();
        let t = self.clock.seconds();

        for (id, body) in self.bodies.iter() {
            let (position, velocity) = if Some(id) == self.star_id {
                (Vec3::zeros(), Vec3::zeros())
            } else if let Some(orbit) = self.orbits.get(&id) {
                (orbit.position_at(t), orbit.velocity_at(t))
            } else {
                debug!(?id, name = %body.name, "no orbit for body; skipping in numerical state");
                continue;
            };
            self.states.push(BodyState {
                id,
                mass: body.mass,
                position,
                velocity,
                acceleration: Vec3::zeros(),
            });
        }

        let snapshot = self.states.clone();
        for state in &mut self.states {
            state.acceleration = integrator::n_body_acceleration(state, &snapshot);
        }
        debug!(count = self.states.len(), "numerical body states initialized");
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}
