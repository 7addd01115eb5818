mod abc;

pub use abc::Controller;
