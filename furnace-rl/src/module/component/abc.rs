/// Maps an observation to an action.
pub trait Controller {
    type O; // Observation
    type A; // Action

    fn act(&self, observation: &Self::O) -> Self::A;
}

impl<C: Controller + ?Sized> Controller for &C {
    type O = C::O;
    type A = C::A;

    fn act(&self, observation: &Self::O) -> Self::A {
        (**self).act(observation)
    }
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    type O = C::O;
    type A = C::A;

    fn act(&self, observation: &Self::O) -> Self::A {
        (**self).act(observation)
    }
}
