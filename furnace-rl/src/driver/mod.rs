//! Episode loop tying a controller, the furnace and a visualizer together.

use std::ops::ControlFlow;

use tracing::{debug, info};

use crate::data::memory::{History, Tick};
use crate::environment::furnace::{FurnaceAction, FurnaceEnv, FurnaceObservation};
use crate::environment::Environment;
use crate::error::Result;
use crate::logging::EpisodeSummary;
use crate::module::component::Controller;

/// One-way consumer of the simulation, typically a renderer.
///
/// Receives the temperature after each step and the action that produced it.
/// Returning `ControlFlow::Break` stops the episode before the next step.
pub trait Observer {
    /// Called once per episode with the starting temperature.
    fn on_reset(&mut self, _temperature: f64) {}

    fn observe(&mut self, temperature: f64, action: FurnaceAction) -> ControlFlow<()>;
}

impl<V: Observer + ?Sized> Observer for &mut V {
    fn on_reset(&mut self, temperature: f64) {
        (**self).on_reset(temperature)
    }

    fn observe(&mut self, temperature: f64, action: FurnaceAction) -> ControlFlow<()> {
        (**self).observe(temperature, action)
    }
}

impl Observer for () {
    fn observe(&mut self, _temperature: f64, _action: FurnaceAction) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl Observer for History<Tick> {
    fn on_reset(&mut self, _temperature: f64) {
        self.clear();
    }

    fn observe(&mut self, temperature: f64, action: FurnaceAction) -> ControlFlow<()> {
        self.push(Tick {
            temperature,
            action,
        });
        ControlFlow::Continue(())
    }
}

/// Owns everything an episode needs.
pub struct Simulation<C, V> {
    env: FurnaceEnv,
    controller: C,
    observer: V,
}

impl<C, V> Simulation<C, V>
where
    C: Controller<O = FurnaceObservation, A = FurnaceAction>,
    V: Observer,
{
    pub fn new(env: FurnaceEnv, controller: C, observer: V) -> Self {
        Simulation {
            env,
            controller,
            observer,
        }
    }

    pub fn env(&self) -> &FurnaceEnv {
        &self.env
    }

    pub fn observer(&self) -> &V {
        &self.observer
    }

    pub fn into_parts(self) -> (FurnaceEnv, C, V) {
        (self.env, self.controller, self.observer)
    }

    /// Resets the furnace and alternates act/step until termination or
    /// until the observer asks to stop.
    pub fn run_episode(&mut self, seed: Option<u64>) -> Result<EpisodeSummary<FurnaceObservation>> {
        let (mut observation, _) = self.env.reset(seed, None);
        self.observer.on_reset(observation.temperature());
        let mut summary = EpisodeSummary::start(observation);

        loop {
            let action = self.controller.act(&observation);
            let step = self.env.step(action)?;
            summary.record(step.reward, step.observation);
            observation = step.observation;

            let flow = self.observer.observe(observation.temperature(), action);
            if step.done() {
                break;
            }
            if flow.is_break() {
                debug!(step = self.env.step_count(), "observer stopped the episode");
                summary.interrupted = true;
                break;
            }
        }

        info!(
            total_reward = summary.total_reward,
            steps = summary.steps,
            positive_rewards = summary.positive_rewards,
            interrupted = summary.interrupted,
            "simulation episode finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::furnace::FurnaceConfig;
    use crate::module::rule_based::RuleBasedController;

    struct StopAfter {
        remaining: usize,
        seen: Vec<(f64, FurnaceAction)>,
    }

    impl Observer for StopAfter {
        fn observe(&mut self, temperature: f64, action: FurnaceAction) -> ControlFlow<()> {
            self.seen.push((temperature, action));
            self.remaining -= 1;
            if self.remaining == 0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    fn rule_based() -> (FurnaceEnv, RuleBasedController) {
        let config = FurnaceConfig::new();
        let controller = RuleBasedController::from_config(&config);
        (config.init().unwrap(), controller)
    }

    #[test]
    fn test_full_episode_is_observed() {
        let (env, controller) = rule_based();
        let mut simulation = Simulation::new(env, controller, History::new(8));
        let summary = simulation.run_episode(None).unwrap();

        assert_eq!(summary.steps, 200);
        assert_eq!(summary.total_reward, -44.0);
        assert!(!summary.interrupted);
        assert!(simulation.env().is_terminated());

        let history = simulation.observer();
        assert_eq!(history.len(), 8);
        assert_eq!(
            history.latest(),
            Some(&Tick {
                temperature: 222.0,
                action: FurnaceAction::Cool,
            })
        );
    }

    #[test]
    fn test_observer_can_stop() {
        let (env, controller) = rule_based();
        let observer = StopAfter {
            remaining: 3,
            seen: Vec::new(),
        };
        let mut simulation = Simulation::new(env, controller, observer);
        let summary = simulation.run_episode(Some(9)).unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.final_observation.temperature(), 165.0);
        assert_eq!(
            simulation.observer().seen,
            vec![
                (155.0, FurnaceAction::Heat),
                (160.0, FurnaceAction::Heat),
                (165.0, FurnaceAction::Heat),
            ]
        );
        assert!(!simulation.env().is_terminated());
    }

    #[test]
    fn test_episodes_restart_from_reset() {
        let (env, controller) = rule_based();
        let mut simulation = Simulation::new(env, &controller, ());
        let first = simulation.run_episode(None).unwrap();
        let second = simulation.run_episode(None).unwrap();
        assert_eq!(first, second);
    }
}
