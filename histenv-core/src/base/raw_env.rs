//! Raw environment, the provider of unprocessed observations.
use super::{Act, Info};
use crate::ActionSpace;
use anyhow::Result;
use ndarray::ArrayD;

/// Output of [`RawEnv::step`].
#[derive(Debug, Clone)]
pub struct RawStep<I> {
    /// Observation as produced by the environment.
    pub obs: ArrayD<u8>,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode is done.
    pub is_done: bool,

    /// Information defined by the environment.
    pub info: I,
}

/// An emulator-style environment producing pixel frames or RAM states.
///
/// Observations are either images of shape `[height, width, channels]` or
/// 1-dimensional RAM vectors. The shape returned by
/// [`RawEnv::observation_shape`] is queried once when a wrapper is built;
/// for images, the height and width of actual observations may differ from
/// the declared ones, but the number of channels may not.
pub trait RawEnv {
    /// Configurations.
    type Config: Clone;

    /// Action of the environment.
    type Act: Act;

    /// Information returned with each step.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Declared shape of observations.
    fn observation_shape(&self) -> Vec<usize>;

    /// Declared action space.
    fn action_space(&self) -> ActionSpace;

    /// The maximum number of steps in an episode, if any.
    fn max_episode_steps(&self) -> Option<usize>;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<ArrayD<u8>>;

    /// Performs an environment step.
    fn step(&mut self, act: &Self::Act) -> Result<RawStep<Self::Info>>;
}
