pub mod data;
pub mod driver;
pub mod environment;
pub mod error;
pub mod logging;
pub mod module;

pub use error::{FurnaceError, Result};
