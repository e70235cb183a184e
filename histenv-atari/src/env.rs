mod config;
use crate::{EpisodeMonitor, HistEnvObs, HistoryObservationBuilder};
use anyhow::Result;
use histenv_core::{
    error::HistEnvError,
    record::{Record, RecordValue},
    ActionSpace, BoxSpace, Env, RawEnv, RawStep, Step,
};
use log::{info, trace};
use std::path::Path;
pub use config::HistEnvConfig;

/// A wrapper of a raw environment replacing its observations with the
/// history of the last `K` observations.
///
/// Rewards, termination flags and information pass through unchanged, as do
/// errors of the raw environment.
pub struct HistEnv<E: RawEnv> {
    // Raw environment
    env: E,

    // Builder of stacked observations
    builder: HistoryObservationBuilder,

    action_space: ActionSpace,

    horizon: Option<usize>,

    // Monitor, if enabled in the configuration
    monitor: Option<EpisodeMonitor>,

    force_reset: bool,

    // Statistics of the current episode
    episode_reward: f32,
    episode_length: usize,
}

impl<E: RawEnv> HistEnv<E> {
    /// Wraps an already constructed raw environment.
    ///
    /// The configuration of the raw environment in `config` is not used.
    pub fn from_raw(config: &HistEnvConfig<E>, env: E) -> Result<Self> {
        let builder = HistoryObservationBuilder::new(
            config.history_length,
            config.screen_dims,
            &env.observation_shape(),
        )?;
        info!("observation space: {}", builder.observation_space());

        let action_space = env.action_space();
        info!("action space: {}", action_space);

        let horizon = env.max_episode_steps();
        let monitor = EpisodeMonitor::build(&config.monitor)?;

        Ok(Self {
            env,
            builder,
            action_space,
            horizon,
            monitor,
            force_reset: config.force_reset,
            episode_reward: 0.0,
            episode_length: 0,
        })
    }

    /// Observation space of stacked observations.
    pub fn observation_space(&self) -> BoxSpace {
        self.builder.observation_space()
    }

    /// Action space of the raw environment.
    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    /// The maximum number of steps in an episode, if any.
    pub fn horizon(&self) -> Option<usize> {
        self.horizon
    }

    /// Returns `true` if episodes are monitored.
    pub fn is_monitoring(&self) -> bool {
        self.monitor.is_some()
    }

    /// Directory of monitoring outputs.
    pub fn log_dir(&self) -> Option<&Path> {
        self.monitor.as_ref().map(|m| m.log_dir())
    }

    pub fn monitor(&self) -> Option<&EpisodeMonitor> {
        self.monitor.as_ref()
    }

    /// The builder of stacked observations, giving access to the history.
    pub fn builder(&self) -> &HistoryObservationBuilder {
        &self.builder
    }

    pub fn raw_env(&self) -> &E {
        &self.env
    }

    /// Writes pending monitoring outputs.
    pub fn close(&mut self) -> Result<()> {
        match self.monitor.as_mut() {
            Some(monitor) => monitor.flush(),
            None => Ok(()),
        }
    }

    fn episode_record(&self) -> Record {
        Record::from_slice(&[
            ("episode_reward", RecordValue::Scalar(self.episode_reward)),
            (
                "episode_length",
                RecordValue::Scalar(self.episode_length as f32),
            ),
        ])
    }
}

impl<E: RawEnv> Env for HistEnv<E> {
    type Config = HistEnvConfig<E>;
    type Obs = HistEnvObs;
    type Act = E::Act;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let env = E::build(&config.raw_env_config, seed)?;
        Self::from_raw(config, env)
    }

    fn reset(&mut self) -> Result<HistEnvObs> {
        trace!("HistEnv::reset()");

        if let Some(monitor) = self.monitor.as_mut() {
            monitor.before_reset(self.force_reset)?;
        }

        let raw_obs = self.env.reset()?;
        let obs = self.builder.on_reset(&raw_obs)?;

        if let Some(monitor) = self.monitor.as_mut() {
            monitor.after_reset(&raw_obs)?;
        }
        self.episode_reward = 0.0;
        self.episode_length = 0;

        Ok(obs)
    }

    fn step(&mut self, act: &Self::Act) -> Result<(Step<Self>, Record)> {
        trace!("HistEnv::step()");

        if !self.builder.is_ready() {
            return Err(HistEnvError::Uninitialized.into());
        }

        let RawStep {
            obs: raw_obs,
            reward,
            is_done,
            info,
        } = self.env.step(act)?;
        let obs = self.builder.on_step(&raw_obs)?;

        if let Some(monitor) = self.monitor.as_mut() {
            monitor.after_step(&raw_obs, reward, is_done)?;
        }
        self.episode_reward += reward;
        self.episode_length += 1;

        let record = if is_done {
            self.episode_record()
        } else {
            Record::empty()
        };

        Ok((Step::new(obs, act.clone(), reward, is_done, info), record))
    }
}

impl<E: RawEnv> Drop for HistEnv<E> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Failed to write monitoring outputs: {}", e);
        }
    }
}
