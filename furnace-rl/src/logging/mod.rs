use tracing::info;

use crate::environment::Environment;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary<O> {
    pub total_reward: f64,
    pub steps: u64,
    /// Steps that earned a positive reward, i.e. ended inside the target band.
    pub positive_rewards: u64,
    pub final_observation: O,
    /// Set when the episode was stopped before it terminated.
    pub interrupted: bool,
}

impl<O> EpisodeSummary<O> {
    pub(crate) fn start(observation: O) -> Self {
        EpisodeSummary {
            total_reward: 0.0,
            steps: 0,
            positive_rewards: 0,
            final_observation: observation,
            interrupted: false,
        }
    }

    pub(crate) fn record(&mut self, reward: f64, observation: O) {
        self.total_reward += reward;
        self.steps += 1;
        if reward > 0.0 {
            self.positive_rewards += 1;
        }
        self.final_observation = observation;
    }
}

/// Plays one full episode with `policy` and reports how it went.
pub fn evaluate_episode<E: Environment, P: FnMut(&E::O) -> E::A>(
    env: &mut E,
    policy: &mut P,
    seed: u64,
) -> Result<EpisodeSummary<E::O>> {
    let (mut before, _) = env.reset(Some(seed), None);
    let mut summary = EpisodeSummary::start(before.clone());
    let mut not_done = true;
    while not_done {
        let action = policy(&before);
        let step = env.step(action)?;
        not_done = !step.done();
        summary.record(step.reward, step.observation.clone());
        before = step.observation;
    }
    info!(
        seed,
        total_reward = summary.total_reward,
        steps = summary.steps,
        positive_rewards = summary.positive_rewards,
        "episode finished"
    );
    Ok(summary)
}
