use furnace_rl::{
    environment::{
        furnace::{FurnaceAction, FurnaceConfig, FurnaceEnv},
        Environment,
    },
    FurnaceError,
};

fn furnace() -> FurnaceEnv {
    FurnaceConfig::new().init().unwrap()
}

#[test]
fn test_reset_then_heat() {
    let mut env = furnace();
    let (observation, _) = env.reset(None, None);
    assert_eq!(observation.as_slice(), &[150.0]);

    let step = env.step(FurnaceAction::Heat).unwrap();
    assert_eq!(step.observation.as_slice(), &[155.0]);
    assert_eq!(step.reward, -1.0);
    assert!(!step.terminated);
    assert!(!step.truncated);
}

#[test]
fn test_six_heats_reach_band() {
    let mut env = furnace();
    env.reset(None, None);
    for _ in 0..5 {
        assert_eq!(env.step(FurnaceAction::Heat).unwrap().reward, -1.0);
    }
    let step = env.step(FurnaceAction::Heat).unwrap();
    assert_eq!(step.observation.temperature(), 180.0);
    assert_eq!(step.reward, 1.0);
}

#[test]
fn test_episode_ends_after_max_steps() {
    let mut env = furnace();
    env.reset(None, None);
    for n in 1..=200u64 {
        let step = env.step(FurnaceAction::Heat).unwrap();
        assert_eq!(env.step_count(), n);
        assert_eq!(step.terminated, n == 200);
    }

    assert_eq!(
        env.step(FurnaceAction::Cool).unwrap_err(),
        FurnaceError::EpisodeEnded { max_steps: 200 }
    );
    assert_eq!(env.step_count(), 200);
    assert_eq!(env.temperature(), 1150.0);
}

#[test]
fn test_cool_lowers_temperature() {
    let mut env = furnace();
    env.reset(None, None);
    for n in 1..=10 {
        let step = env.step(FurnaceAction::Cool).unwrap();
        assert_eq!(step.observation.temperature(), 150.0 - 3.0 * n as f64);
        assert_eq!(step.reward, -1.0);
    }
}

#[test]
fn test_reset_after_finished_episode() {
    let mut env = furnace();
    env.reset(None, None);
    for _ in 0..200 {
        env.step(FurnaceAction::Heat).unwrap();
    }
    assert!(env.is_terminated());

    let (observation, info) = env.reset(Some(3), None);
    assert_eq!(observation.as_slice(), &[150.0]);
    assert!(info.is_empty());
    assert_eq!(env.step_count(), 0);
    assert!(!env.is_terminated());
    assert!(env.step(FurnaceAction::Heat).is_ok());
}

#[test]
fn test_invalid_raw_actions_leave_state_untouched() {
    let mut env = furnace();
    env.reset(None, None);
    env.step(FurnaceAction::Heat).unwrap();

    assert_eq!(env.step_raw(2).unwrap_err(), FurnaceError::InvalidAction(2));
    assert_eq!(env.step_raw(-1).unwrap_err(), FurnaceError::InvalidAction(-1));
    assert_eq!(env.step_count(), 1);
    assert_eq!(env.temperature(), 155.0);
}
