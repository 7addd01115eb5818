use std::collections::HashMap;

use rand::Rng;

use crate::error::Result;

pub type Reward = f64;

/// Free-form metadata attached to resets and steps.
pub type Info = HashMap<String, String>;

/// Reset options. Accepted for interface compatibility, environments may ignore them.
pub type Options = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct Step<O> {
    pub observation: O,
    pub reward: Reward,
    pub terminated: bool,
    pub truncated: bool,
    pub info: Info,
}

impl<O> Step<O> {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

pub trait Environment {
    type A: Space;
    type O: Clone;

    fn reset(&mut self, seed: Option<u64>, options: Option<&Options>) -> (Self::O, Info);

    fn step(&mut self, action: Self::A) -> Result<Step<Self::O>>;
}

pub trait Space: Clone {
    fn sample<R: Rng>(rng: &mut R) -> Self;
}

pub mod furnace;
