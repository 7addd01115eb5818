use crate::environment::furnace::{FurnaceAction, FurnaceConfig, FurnaceObservation};
use crate::module::component::Controller;

/// Bang-bang thermostat.
///
/// Heats below the target band and cools above it. Inside the band it keeps
/// heating: the action space has no hold action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleBasedController {
    target_low: f64,
    target_high: f64,
}

impl RuleBasedController {
    pub fn new(target_low: f64, target_high: f64) -> Self {
        RuleBasedController {
            target_low,
            target_high,
        }
    }

    pub fn from_config(config: &FurnaceConfig) -> Self {
        Self::new(config.target_low, config.target_high)
    }
}

impl Controller for RuleBasedController {
    type O = FurnaceObservation;
    type A = FurnaceAction;

    fn act(&self, observation: &FurnaceObservation) -> FurnaceAction {
        let temperature = observation.temperature();
        if temperature < self.target_low {
            FurnaceAction::Heat
        } else if temperature > self.target_high {
            FurnaceAction::Cool
        } else {
            FurnaceAction::Heat
        }
    }
}
