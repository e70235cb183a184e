//! Core functionalities.
mod env;
mod raw_env;
mod step;
pub use env::Env;
pub use raw_env::{RawEnv, RawStep};
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation handed to an agent.
pub trait Obs: Clone + Debug {
    /// Returns the shape of the observation.
    fn shape(&self) -> &[usize];

    /// Returns the number of elements in the observation.
    fn len(&self) -> usize {
        self.shape().iter().product()
    }
}

/// An action of the environment.
pub trait Act: Clone + Debug {}
