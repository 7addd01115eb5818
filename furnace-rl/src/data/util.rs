use crate::environment::Environment;
use crate::error::Result;

pub struct Transition<E: Environment> {
    pub before: E::O,
    pub action: E::A,
    pub after: E::O,
    pub reward: f64,
    pub terminated: bool,
}

impl<E: Environment> Clone for Transition<E> {
    fn clone(&self) -> Self {
        Self {
            before: self.before.clone(),
            action: self.action.clone(),
            after: self.after.clone(),
            reward: self.reward,
            terminated: self.terminated,
        }
    }
}

impl<E: Environment> std::fmt::Debug for Transition<E>
where
    E::O: std::fmt::Debug,
    E::A: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("before", &self.before)
            .field("action", &self.action)
            .field("after", &self.after)
            .field("reward", &self.reward)
            .field("terminated", &self.terminated)
            .finish()
    }
}

/// Runs `n_steps` transitions, resetting whenever an episode finishes.
///
/// Starts from `observation` when given, otherwise from a fresh reset.
pub fn collect_multiple<E: Environment, P: FnMut(&E::O) -> E::A>(
    env: &mut E,
    observation: Option<E::O>,
    policy: &mut P,
    n_steps: usize,
) -> Result<Vec<Transition<E>>> {
    let mut before = match observation {
        Some(observation) => observation,
        None => env.reset(None, None).0,
    };
    let mut result = Vec::with_capacity(n_steps);
    for _ in 0..n_steps {
        let action = policy(&before);
        let step = env.step(action.clone())?;
        let done = step.done();
        result.push(Transition {
            before,
            action,
            after: step.observation.clone(),
            reward: step.reward,
            terminated: step.terminated,
        });
        before = match done {
            true => env.reset(None, None).0,
            false => step.observation,
        };
    }
    Ok(result)
}

pub fn collect_single<E: Environment, P: FnMut(&E::O) -> E::A>(
    env: &mut E,
    observation: Option<E::O>,
    policy: &mut P,
) -> Result<Transition<E>> {
    let mut transitions = collect_multiple(env, observation, policy, 1)?;
    Ok(transitions.remove(0))
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;
    use crate::environment::furnace::{FurnaceAction, FurnaceConfig, FurnaceEnv};

    #[test]
    fn test_collect_resets_between_episodes() {
        let mut env = FurnaceConfig::new().with_max_steps(3).init().unwrap();
        let transitions =
            collect_multiple(&mut env, None, &mut |_| FurnaceAction::Heat, 7).unwrap();

        let temperatures: Vec<(f64, f64, bool)> = transitions
            .iter()
            .map(|t| (t.before.temperature(), t.after.temperature(), t.terminated))
            .collect();
        assert_eq!(
            temperatures,
            vec![
                (150.0, 155.0, false),
                (155.0, 160.0, false),
                (160.0, 165.0, true),
                (150.0, 155.0, false),
                (155.0, 160.0, false),
                (160.0, 165.0, true),
                (150.0, 155.0, false),
            ]
        );
    }

    #[test]
    fn test_collect_single() {
        let mut env: FurnaceEnv = FurnaceConfig::new().init().unwrap();
        let (observation, _) = env.reset(None, None);
        let transition =
            collect_single(&mut env, Some(observation), &mut |_| FurnaceAction::Cool).unwrap();
        let expected = expect![[r#"
            Transition {
                before: FurnaceObservation(
                    [
                        150.0,
                    ],
                ),
                action: Cool,
                after: FurnaceObservation(
                    [
                        147.0,
                    ],
                ),
                reward: -1.0,
                terminated: false,
            }
        "#]];
        expected.assert_debug_eq(&transition);
    }
}
