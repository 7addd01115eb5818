use std::cell::RefCell;

use furnace_rl::{
    environment::{
        furnace::{FurnaceAction, FurnaceObservation},
        Space,
    },
    module::component::Controller,
};
use rand::Rng;

/// Ignores the temperature and flips a fair coin every tick.
pub struct RandomController<R: Rng> {
    rng: RefCell<R>,
}

impl<R: Rng> RandomController<R> {
    pub fn new(rng: R) -> Self {
        RandomController {
            rng: RefCell::new(rng),
        }
    }
}

impl<R: Rng> Controller for RandomController<R> {
    type O = FurnaceObservation;
    type A = FurnaceAction;

    fn act(&self, _observation: &FurnaceObservation) -> FurnaceAction {
        FurnaceAction::sample(&mut *self.rng.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_random_controller_is_seeded() {
        let observation = FurnaceObservation::new(150.0);
        let actions = |seed| {
            let controller = RandomController::new(StdRng::seed_from_u64(seed));
            (0..64)
                .map(|_| controller.act(&observation))
                .collect::<Vec<_>>()
        };
        let first = actions(11);
        assert_eq!(first, actions(11));
        assert!(first.contains(&FurnaceAction::Heat));
        assert!(first.contains(&FurnaceAction::Cool));
    }
}
