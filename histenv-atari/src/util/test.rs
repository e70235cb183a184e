//! Utilities for test.
//!
//! [`ScriptedEnv`] is a deterministic [`RawEnv`] standing in for an emulator.
//! At the `t`-th observation of an episode (`t = 0` for the observation
//! returned by `reset`), every element of the observation equals
//! `seed + t + 1` modulo 256. The reward of a step is the index of the action
//! and the episode ends after `episode_length` steps.
use crate::{HistEnv, HistEnvAct, HistEnvConfig};
use anyhow::{bail, Result};
use histenv_core::{ActionSpace, RawEnv, RawStep};
use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type Act = HistEnvAct;
pub type Env = HistEnv<ScriptedEnv>;
pub type EnvConfig = HistEnvConfig<ScriptedEnv>;

/// Configuration of [`ScriptedEnv`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEnvConfig {
    /// Declared observation shape.
    pub obs_shape: Vec<usize>,

    /// Shape of emitted observations; the declared shape when `None`.
    pub emitted_shape: Option<Vec<usize>>,

    /// Number of steps in an episode.
    pub episode_length: usize,

    /// Number of actions.
    pub n_acts: usize,

    /// Step limit reported as metadata.
    pub max_episode_steps: Option<usize>,
}

impl Default for ScriptedEnvConfig {
    fn default() -> Self {
        Self {
            obs_shape: vec![128],
            emitted_shape: None,
            episode_length: 10,
            n_acts: 4,
            max_episode_steps: None,
        }
    }
}

impl ScriptedEnvConfig {
    /// RAM observations of the given size.
    pub fn ram(size: usize) -> Self {
        Self {
            obs_shape: vec![size],
            ..Self::default()
        }
    }

    /// Pixel observations of the given shape.
    pub fn pixel(height: usize, width: usize, channels: usize) -> Self {
        Self {
            obs_shape: vec![height, width, channels],
            ..Self::default()
        }
    }

    pub fn emitted_shape(mut self, shape: Vec<usize>) -> Self {
        self.emitted_shape = Some(shape);
        self
    }

    pub fn episode_length(mut self, v: usize) -> Self {
        self.episode_length = v;
        self
    }

    pub fn n_acts(mut self, v: usize) -> Self {
        self.n_acts = v;
        self
    }

    pub fn max_episode_steps(mut self, v: Option<usize>) -> Self {
        self.max_episode_steps = v;
        self
    }
}

/// A deterministic raw environment for tests.
pub struct ScriptedEnv {
    config: ScriptedEnvConfig,
    seed: i64,
    t: usize,
    done: bool,
}

impl ScriptedEnv {
    /// Value of every element of the `t`-th observation of an episode.
    pub fn value_at(&self, t: usize) -> u8 {
        (self.seed + t as i64 + 1).rem_euclid(256) as u8
    }

    fn obs(&self) -> ArrayD<u8> {
        let shape = self
            .config
            .emitted_shape
            .as_ref()
            .unwrap_or(&self.config.obs_shape);
        ArrayD::from_elem(IxDyn(shape), self.value_at(self.t))
    }
}

impl RawEnv for ScriptedEnv {
    type Config = ScriptedEnvConfig;
    type Act = HistEnvAct;
    type Info = HashMap<String, f32>;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            seed,
            t: 0,
            done: true,
        })
    }

    fn observation_shape(&self) -> Vec<usize> {
        self.config.obs_shape.clone()
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::Discrete(self.config.n_acts)
    }

    fn max_episode_steps(&self) -> Option<usize> {
        self.config.max_episode_steps
    }

    fn reset(&mut self) -> Result<ArrayD<u8>> {
        self.t = 0;
        self.done = false;
        Ok(self.obs())
    }

    fn step(&mut self, act: &Self::Act) -> Result<RawStep<Self::Info>> {
        if act.act as usize >= self.config.n_acts {
            bail!("Invalid action: {}", act.act);
        }
        if self.done {
            bail!("Step on a finished episode");
        }

        self.t += 1;
        self.done = self.t >= self.config.episode_length;

        Ok(RawStep {
            obs: self.obs(),
            reward: act.act as f32,
            is_done: self.done,
            info: HashMap::from([("t".to_string(), self.t as f32)]),
        })
    }
}
