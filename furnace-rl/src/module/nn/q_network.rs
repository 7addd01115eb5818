use std::path::Path;

use burn::prelude::*;
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder};
use tracing::info;

use crate::environment::furnace::{FurnaceAction, FurnaceConfig, FurnaceObservation};
use crate::error::{FurnaceError, Result};
use crate::module::component::Controller;

use super::multi_layer_perceptron::{MultiLayerPerceptron, MultiLayerPerceptronConfig};

/// Greedy controller over a network scoring both actions.
///
/// The temperature is scaled into [0, 1] by the observation bound before the
/// forward pass. Ties resolve to `Heat`. Only inference lives here: trained
/// weights are loaded from a named MessagePack record with `load`.
pub struct QNetworkController<B: Backend> {
    model: MultiLayerPerceptron<B>,
    device: B::Device,
    observation_low: f64,
    observation_high: f64,
}

impl<B: Backend> QNetworkController<B> {
    /// Fresh network with layer sizes `[1, hidden..., 2]`.
    pub fn init(config: &FurnaceConfig, hidden: &[usize], device: &B::Device) -> Result<Self> {
        let mut sizes = Vec::with_capacity(hidden.len() + 2);
        sizes.push(1);
        sizes.extend_from_slice(hidden);
        sizes.push(2);
        let model = MultiLayerPerceptronConfig::new(sizes).init(device)?;
        Ok(Self::from_model(model, config, device))
    }

    pub fn from_model(
        model: MultiLayerPerceptron<B>,
        config: &FurnaceConfig,
        device: &B::Device,
    ) -> Self {
        QNetworkController {
            model,
            device: device.clone(),
            observation_low: config.observation_low,
            observation_high: config.observation_high,
        }
    }

    /// Network with layer sizes `[1, hidden..., 2]` and weights read from `path`.
    ///
    /// `hidden` must match the layout the record was saved with.
    pub fn load(
        config: &FurnaceConfig,
        hidden: &[usize],
        path: &Path,
        device: &B::Device,
    ) -> Result<Self> {
        let controller = Self::init(config, hidden, device)?;
        let model = controller
            .model
            .load_file(path.to_path_buf(), &recorder(), device)
            .map_err(|err| FurnaceError::Weights(format!("{}: {err:?}", path.display())))?;
        info!(path = %path.display(), "q-network weights loaded");
        Ok(Self::from_model(model, config, device))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.model
            .clone()
            .save_file(path.to_path_buf(), &recorder())
            .map_err(|err| FurnaceError::Weights(format!("{}: {err:?}", path.display())))
    }

    /// Scores indexed by `FurnaceAction::index`.
    pub fn q_values(&self, observation: &FurnaceObservation) -> Vec<f32> {
        let scaled = (observation.temperature() - self.observation_low)
            / (self.observation_high - self.observation_low);
        let input = Tensor::<B, 1>::from_floats([scaled as f32], &self.device);
        self.model
            .forward(input)
            .into_data()
            .iter::<f32>()
            .collect()
    }
}

fn recorder() -> NamedMpkFileRecorder<FullPrecisionSettings> {
    NamedMpkFileRecorder::<FullPrecisionSettings>::new()
}

impl<B: Backend> Controller for QNetworkController<B> {
    type O = FurnaceObservation;
    type A = FurnaceAction;

    fn act(&self, observation: &FurnaceObservation) -> FurnaceAction {
        let q_values = self.q_values(observation);
        match (
            q_values.get(FurnaceAction::Heat.index()),
            q_values.get(FurnaceAction::Cool.index()),
        ) {
            (Some(heat), Some(cool)) if cool > heat => FurnaceAction::Cool,
            _ => FurnaceAction::Heat,
        }
    }
}
