//! Thermostat-controlled furnace.
//!
//! A single temperature evolves under two discrete actions. `Heat` adds
//! `heat_rate`, `Cool` removes `cool_rate`, and every step is rewarded with
//! `+1.0` when the new temperature lies in the closed target band, `-1.0`
//! otherwise. Episodes last exactly `max_steps` steps; stepping a finished
//! episode is an error until the next `reset`.

use std::fmt;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::environment::{Environment, Info, Options, Space, Step};
use crate::error::{FurnaceError, Result};

mod config;

pub use config::{FurnaceConfig, HeatLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FurnaceAction {
    Heat,
    Cool,
}

impl FurnaceAction {
    pub fn index(self) -> usize {
        match self {
            FurnaceAction::Heat => 0,
            FurnaceAction::Cool => 1,
        }
    }
}

impl TryFrom<i128> for FurnaceAction {
    type Error = FurnaceError;

    fn try_from(value: i128) -> Result<Self> {
        match value {
            0 => Ok(FurnaceAction::Heat),
            1 => Ok(FurnaceAction::Cool),
            other => Err(FurnaceError::InvalidAction(other)),
        }
    }
}

impl TryFrom<i64> for FurnaceAction {
    type Error = FurnaceError;

    fn try_from(value: i64) -> Result<Self> {
        FurnaceAction::try_from(i128::from(value))
    }
}

impl TryFrom<usize> for FurnaceAction {
    type Error = FurnaceError;

    fn try_from(value: usize) -> Result<Self> {
        // usize is at most 64 bits wide on every supported target.
        FurnaceAction::try_from(value as u64 as i128)
    }
}

impl fmt::Display for FurnaceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FurnaceAction::Heat => write!(f, "heat"),
            FurnaceAction::Cool => write!(f, "cool"),
        }
    }
}

impl Space for FurnaceAction {
    fn sample<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            FurnaceAction::Cool
        } else {
            FurnaceAction::Heat
        }
    }
}

/// Single-element view of the furnace temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FurnaceObservation([f64; 1]);

impl FurnaceObservation {
    pub fn new(temperature: f64) -> Self {
        FurnaceObservation([temperature])
    }

    pub fn temperature(&self) -> f64 {
        self.0[0]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct FurnaceEnv {
    config: FurnaceConfig,
    temperature: f64,
    step_count: u64,
}

impl FurnaceEnv {
    pub(crate) fn from_config(config: FurnaceConfig) -> Self {
        let temperature = config.initial_temperature;
        FurnaceEnv {
            config,
            temperature,
            step_count: 0,
        }
    }

    pub fn config(&self) -> &FurnaceConfig {
        &self.config
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_terminated(&self) -> bool {
        self.step_count >= self.config.max_steps
    }

    pub fn observation(&self) -> FurnaceObservation {
        FurnaceObservation::new(self.temperature)
    }

    pub fn observation_space(&self) -> (f64, f64) {
        (self.config.observation_low, self.config.observation_high)
    }

    /// Steps with an untyped action, rejecting anything other than 0 or 1.
    pub fn step_raw(&mut self, action: i64) -> Result<Step<FurnaceObservation>> {
        let action = FurnaceAction::try_from(action).inspect_err(|err| warn!(%err))?;
        self.step(action)
    }
}

impl Environment for FurnaceEnv {
    type A = FurnaceAction;
    type O = FurnaceObservation;

    fn reset(&mut self, seed: Option<u64>, options: Option<&Options>) -> (Self::O, Info) {
        // Dynamics are deterministic, seed and options only show up in the logs.
        info!(
            ?seed,
            options = options.map_or(0, |options| options.len()),
            temperature = self.config.initial_temperature,
            "furnace reset"
        );
        self.temperature = self.config.initial_temperature;
        self.step_count = 0;
        (self.observation(), Info::new())
    }

    fn step(&mut self, action: Self::A) -> Result<Step<Self::O>> {
        if self.is_terminated() {
            let err = FurnaceError::EpisodeEnded {
                max_steps: self.config.max_steps,
            };
            warn!(%err, step = self.step_count);
            return Err(err);
        }

        match action {
            FurnaceAction::Heat => self.temperature += self.config.heat_rate,
            FurnaceAction::Cool => self.temperature -= self.config.cool_rate,
        }
        self.step_count += 1;

        let reward = self.config.reward_for(self.temperature);
        let terminated = self.is_terminated();
        debug!(
            step = self.step_count,
            %action,
            temperature = self.temperature,
            reward,
            terminated,
            "furnace step"
        );

        Ok(Step {
            observation: self.observation(),
            reward,
            terminated,
            truncated: false,
            info: Info::new(),
        })
    }
}
