use std::ops::RangeInclusive;

use burn::config::Config;

use crate::error::FurnaceError;

use super::FurnaceEnv;

/// Physical constants of the furnace. Fixed once the environment is built.
#[derive(Config, Debug)]
pub struct FurnaceConfig {
    /// Temperature every episode starts from.
    #[config(default = 150.0)]
    pub initial_temperature: f64,
    /// Degrees added by one `Heat` tick.
    #[config(default = 5.0)]
    pub heat_rate: f64,
    /// Degrees removed by one `Cool` tick.
    #[config(default = 3.0)]
    pub cool_rate: f64,
    /// Lower edge of the closed target band.
    #[config(default = 180.0)]
    pub target_low: f64,
    /// Upper edge of the closed target band.
    #[config(default = 220.0)]
    pub target_high: f64,
    #[config(default = 200)]
    pub max_steps: u64,
    /// Temperatures below this read as a cold furnace.
    #[config(default = 150.0)]
    pub cold_below: f64,
    #[config(default = 0.0)]
    pub observation_low: f64,
    #[config(default = 300.0)]
    pub observation_high: f64,
}

/// Coarse temperature classification used by visualizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatLevel {
    /// Below `cold_below`, the furnace reads as cold.
    Off,
    /// Warm but still below the target band.
    Low,
    InBand,
    High,
}

impl FurnaceConfig {
    pub fn init(&self) -> crate::Result<FurnaceEnv> {
        self.validate()?;
        Ok(FurnaceEnv::from_config(self.clone()))
    }

    pub fn validate(&self) -> crate::Result<()> {
        let values = [
            ("initial_temperature", self.initial_temperature),
            ("heat_rate", self.heat_rate),
            ("cool_rate", self.cool_rate),
            ("target_low", self.target_low),
            ("target_high", self.target_high),
            ("cold_below", self.cold_below),
            ("observation_low", self.observation_low),
            ("observation_high", self.observation_high),
        ];
        if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(FurnaceError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.heat_rate <= 0.0 || self.cool_rate <= 0.0 {
            return Err(FurnaceError::InvalidConfig(format!(
                "heat and cool rates must be positive, got {} and {}",
                self.heat_rate, self.cool_rate
            )));
        }
        if self.target_low > self.target_high {
            return Err(FurnaceError::InvalidConfig(format!(
                "target band is inverted: [{}, {}]",
                self.target_low, self.target_high
            )));
        }
        if self.observation_low >= self.observation_high {
            return Err(FurnaceError::InvalidConfig(format!(
                "observation bound is empty: [{}, {}]",
                self.observation_low, self.observation_high
            )));
        }
        if self.max_steps == 0 {
            return Err(FurnaceError::InvalidConfig(
                "max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn target_band(&self) -> RangeInclusive<f64> {
        self.target_low..=self.target_high
    }

    pub fn in_band(&self, temperature: f64) -> bool {
        self.target_band().contains(&temperature)
    }

    /// Reward for a post-update temperature. Depends on nothing else.
    pub fn reward_for(&self, temperature: f64) -> f64 {
        if self.in_band(temperature) {
            1.0
        } else {
            -1.0
        }
    }

    pub fn heat_level(&self, temperature: f64) -> HeatLevel {
        if temperature < self.cold_below {
            HeatLevel::Off
        } else if temperature < self.target_low {
            HeatLevel::Low
        } else if temperature <= self.target_high {
            HeatLevel::InBand
        } else {
            HeatLevel::High
        }
    }
}
