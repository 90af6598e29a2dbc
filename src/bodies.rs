//! Definitions of celestial bodies.
//!
//! Body kinds form a closed tagged variant over a common attribute record;
//! anything that needs per-kind behavior matches on [`BodyKind`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena::IdLike;

/// Identifier of a body in the simulation registry. Assigned by the
/// registry; the id is the key, bodies do not carry it themselves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

impl IdLike for BodyId {
    fn from_raw(index: u32) -> Self {
        Self(index)
    }

    fn into_raw(self) -> u32 {
        self.0
    }
}

/// A celestial body: shared physical attributes plus kind-specific data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    /// Mass (kg).
    pub mass: f64,
    /// Mean radius (m).
    pub radius: f64,
    pub kind: BodyKind,
}

impl Body {
    pub fn new(name: impl Into<String>, mass: f64, radius: f64, kind: BodyKind) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            kind,
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self.kind, BodyKind::Star(_))
    }
}

/// Closed set of body kinds with their extension records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BodyKind {
    Star(StarProperties),
    Planet(PlanetProperties),
    Moon(MoonProperties),
    DwarfPlanet(DwarfPlanetProperties),
    Asteroid(AsteroidProperties),
    Comet(CometProperties),
    Artificial(ArtificialProperties),
}

/// Morgan–Keenan spectral classes, hottest to coolest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralType {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionaryStage {
    Protostar,
    MainSequence,
    RedGiant,
    WhiteDwarf,
    NeutronStar,
    BlackHole,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarProperties {
    /// Luminosity (W).
    pub luminosity: f64,
    /// Surface temperature (K).
    pub surface_temperature: f64,
    /// Reach of significant radiation pressure (m).
    pub radiation_reach: f64,
    pub spectral_type: SpectralType,
    pub evolutionary_stage: EvolutionaryStage,
    /// 0.0 (calm) to 1.0 (violent).
    pub activity_level: f64,
    /// Per-event flare likelihood, scaled by activity.
    pub flare_probability: f64,
    pub flare_intensity: f64,
    /// Extent of flare effects (m).
    pub flare_radius: f64,
    /// Age (years).
    pub age: f64,
    /// Expected lifespan (years).
    pub lifespan: f64,
}

impl StarProperties {
    /// Roll one flare event against the given RNG.
    ///
    /// A flare raises the activity level (clamped at 1.0) and temporarily
    /// widens the radiation reach. Returns whether a flare fired. The RNG
    /// is caller-supplied so runs are reproducible under a fixed seed.
    pub fn simulate_flare_event(&mut self, rng: &mut impl Rng) -> bool {
        let roll: f64 = rng.gen_range(0.0..1.0);
        if roll < self.flare_probability * self.activity_level {
            self.activity_level = (self.activity_level + self.flare_intensity).min(1.0);
            self.radiation_reach *= 1.0 + self.flare_intensity * 0.5;
            return true;
        }
        false
    }

    /// Irradiance at `distance` meters (W/m²): the inverse-square law,
    /// nudged upward by the current activity level. Zero at degenerate
    /// distances.
    pub fn irradiance_at_distance(&self, distance: f64) -> f64 {
        if distance < 1e-10 {
            return 0.0;
        }
        let irradiance = self.luminosity / (4.0 * std::f64::consts::PI * distance * distance);
        irradiance * (1.0 + 0.001 * self.activity_level)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetProperties {
    /// Semi-major axis of the heliocentric orbit (m).
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// Orbital period (s).
    pub orbital_period: f64,
    /// Inclination (radians).
    pub inclination: f64,
    /// Surface pressure (Pa).
    pub atmospheric_pressure: f64,
    /// Mean surface temperature (K).
    pub average_temperature: f64,
    pub has_rings: bool,
    pub moon_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoonProperties {
    /// Semi-major axis of the orbit around the parent planet (m).
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// Orbital period (s).
    pub orbital_period: f64,
    /// Inclination (radians).
    pub inclination: f64,
    /// One side always faces the parent.
    pub tidally_locked: bool,
    /// Mean motion (radians/s).
    pub mean_motion: f64,
    pub parent: BodyId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DwarfPlanetProperties {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub orbital_period: f64,
    pub inclination: f64,
    /// Where it lives, e.g. "Kuiper Belt".
    pub region: String,
    /// Has cleared its orbital neighborhood.
    pub has_cleared: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsteroidProperties {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub orbital_period: f64,
    pub inclination: f64,
    /// e.g. "Carbonaceous", "Metallic", "Silicate".
    pub composition: String,
    /// Rotation period (s).
    pub rotation_period: f64,
    /// Taxonomic class, e.g. "C-type".
    pub classification: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CometProperties {
    pub semi_major_axis: f64,
    /// Typically > 0.9.
    pub eccentricity: f64,
    pub orbital_period: f64,
    pub inclination: f64,
    /// Closest approach to the star (m).
    pub perihelion: f64,
    /// Farthest point (m).
    pub aphelion: f64,
    /// Nucleus radius (m).
    pub nucleus_radius: f64,
    /// Extent of the coma (m).
    pub coma_radius: f64,
    pub has_active_tail: bool,
    /// e.g. "Oort Cloud", "Kuiper Belt".
    pub origin: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtificialProperties {
    /// Country or organization.
    pub owner: String,
    /// e.g. "Communication", "Navigation".
    pub purpose: String,
    /// Launch date (seconds since simulation epoch).
    pub launch_date: f64,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    /// e.g. "Active", "Decommissioned".
    pub status: String,
    /// Remaining propellant (kg).
    pub remaining_fuel: f64,
}
