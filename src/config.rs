//! Loading simulation settings from TOML.
//!
//! A thin, `serde`-deserializable layer over the orchestrator's knobs:
//!
//! ```toml
//! integrator = "velocity-verlet"   # or "euler", "symplectic-euler", "rk4"
//! keplerian-orbits = true          # false -> N-body integration
//! time-step = 3600.0               # seconds per tick
//! time-scale = 1.0                 # time multiplier per tick
//! ```

use color_eyre::eyre::{self, bail, WrapErr};
use serde::{Deserialize, Serialize};

use crate::integrator::IntegrationMethod;
use crate::system::SolarSystem;
use crate::time;

/// Orchestrator settings as found in a config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SimConfig {
    pub integrator: IntegrationMethod,
    /// `true` selects analytical Keplerian propagation, `false` N-body
    /// integration.
    pub keplerian_orbits: bool,
    /// Seconds of simulated time per tick.
    pub time_step: f64,
    /// Multiplier applied to each tick.
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            integrator: IntegrationMethod::VelocityVerlet,
            keplerian_orbits: true,
            time_step: time::HOUR,
            time_scale: 1.0,
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> eyre::Result<Self> {
        let config: SimConfig =
            toml::from_str(raw).wrap_err("failed to parse simulation config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            bail!("time-step must be a positive number of seconds, got {}", self.time_step);
        }
        if !self.time_scale.is_finite() {
            bail!("time-scale must be finite, got {}", self.time_scale);
        }
        Ok(())
    }

    /// Push these settings onto a system.
    pub fn apply(&self, system: &mut SolarSystem) {
        system.set_integration_method(self.integrator);
        system.set_use_keplerian_orbits(self.keplerian_orbits);
        system.clock_mut().set_time_step(self.time_step);
        system.clock_mut().set_time_scale(self.time_scale);
    }
}
