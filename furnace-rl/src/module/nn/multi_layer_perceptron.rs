use burn::module::Module;
use burn::nn::Linear;
use burn::prelude::*;
use nn::{LeakyRelu, LeakyReluConfig, LinearConfig};

use crate::error::FurnaceError;

#[derive(Config)]
pub struct MultiLayerPerceptronConfig {
    sizes: Vec<usize>,
}

#[derive(Module, Debug)]
pub struct MultiLayerPerceptron<B: Backend> {
    linear_layers: Vec<Linear<B>>,
    activation: LeakyRelu,
}

impl MultiLayerPerceptronConfig {
    /// Builds the network. `sizes` reads (input, hidden..., output).
    pub fn init<B: Backend>(&self, device: &B::Device) -> crate::Result<MultiLayerPerceptron<B>> {
        if self.sizes.len() < 2 {
            return Err(FurnaceError::InvalidConfig(format!(
                "multi layer perceptron needs an input and an output size, got {:?}",
                self.sizes
            )));
        }
        if self.sizes.contains(&0) {
            return Err(FurnaceError::InvalidConfig(format!(
                "multi layer perceptron layer sizes must be non-zero, got {:?}",
                self.sizes
            )));
        }

        let linear_layers = self
            .sizes
            .windows(2)
            .map(|pair| LinearConfig::new(pair[0], pair[1]).init(device))
            .collect();

        Ok(MultiLayerPerceptron {
            linear_layers,
            activation: LeakyReluConfig::new().init(),
        })
    }
}

impl<B: Backend> MultiLayerPerceptron<B> {
    pub fn forward<const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, D> {
        let mut x = input;

        match self.linear_layers.split_last() {
            Some((last, hidden)) => {
                for layer in hidden {
                    x = layer.forward(x);
                    x = self.activation.forward(x);
                }
                last.forward(x)
            }
            None => x,
        }
    }
}
