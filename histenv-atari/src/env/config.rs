//! Configuration of [`HistEnv`](super::HistEnv).
use crate::MonitorConfig;
use anyhow::Result;
use histenv_core::RawEnv;
use log::info;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    default::Default,
    fmt,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "E::Config: Serialize",
    deserialize = "E::Config: DeserializeOwned"
))]
/// Configurations of [`HistEnv`](super::HistEnv).
pub struct HistEnvConfig<E: RawEnv> {
    pub(super) raw_env_config: E::Config,
    pub(super) history_length: usize,
    pub(super) screen_dims: (usize, usize),
    #[serde(default)]
    pub(super) monitor: MonitorConfig,
    #[serde(default)]
    pub(super) force_reset: bool,
}

impl<E: RawEnv> Clone for HistEnvConfig<E> {
    fn clone(&self) -> Self {
        Self {
            raw_env_config: self.raw_env_config.clone(),
            history_length: self.history_length,
            screen_dims: self.screen_dims,
            monitor: self.monitor.clone(),
            force_reset: self.force_reset,
        }
    }
}

impl<E> fmt::Debug for HistEnvConfig<E>
where
    E: RawEnv,
    E::Config: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistEnvConfig")
            .field("raw_env_config", &self.raw_env_config)
            .field("history_length", &self.history_length)
            .field("screen_dims", &self.screen_dims)
            .field("monitor", &self.monitor)
            .field("force_reset", &self.force_reset)
            .finish()
    }
}

impl<E> PartialEq for HistEnvConfig<E>
where
    E: RawEnv,
    E::Config: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.raw_env_config == other.raw_env_config
            && self.history_length == other.history_length
            && self.screen_dims == other.screen_dims
            && self.monitor == other.monitor
            && self.force_reset == other.force_reset
    }
}

impl<E> Default for HistEnvConfig<E>
where
    E: RawEnv,
    E::Config: Default,
{
    fn default() -> Self {
        Self {
            raw_env_config: Default::default(),
            history_length: 4,
            screen_dims: (84, 84),
            monitor: Default::default(),
            force_reset: false,
        }
    }
}

impl<E: RawEnv> HistEnvConfig<E> {
    /// Constructs a configuration with default values around the given raw environment configuration.
    pub fn new(raw_env_config: E::Config) -> Self {
        Self {
            raw_env_config,
            history_length: 4,
            screen_dims: (84, 84),
            monitor: Default::default(),
            force_reset: false,
        }
    }

    /// Sets the configuration of the raw environment.
    pub fn raw_env_config(mut self, v: E::Config) -> Self {
        self.raw_env_config = v;
        self
    }

    /// Sets the number of observations in the history.
    pub fn history_length(mut self, v: usize) -> Self {
        self.history_length = v;
        self
    }

    /// Sets the size `(height, width)` of resized frames.
    pub fn screen_dims(mut self, v: (usize, usize)) -> Self {
        self.screen_dims = v;
        self
    }

    /// Sets the configuration of episode monitoring.
    pub fn monitor(mut self, v: MonitorConfig) -> Self {
        self.monitor = v;
        self
    }

    /// Allows resets in the middle of monitored episodes.
    pub fn force_reset(mut self, v: bool) -> Self {
        self.force_reset = v;
        self
    }
}

impl<E> HistEnvConfig<E>
where
    E: RawEnv,
    E::Config: Serialize + DeserializeOwned,
{
    /// Loads [`HistEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of HistEnv from {}", path_.display());
        Ok(b)
    }

    /// Saves [`HistEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of HistEnv into {}", path_.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        util::test::{EnvConfig, ScriptedEnvConfig},
        MonitorConfig, VideoSchedule,
    };
    use anyhow::Result;
    use tempdir::TempDir;

    #[test]
    fn test_save_and_load() -> Result<()> {
        let tmp_dir = TempDir::new("hist_env_config")?;
        let path = tmp_dir.path().join("env.yaml");

        let config = EnvConfig::new(ScriptedEnvConfig::pixel(210, 160, 3))
            .history_length(3)
            .screen_dims((42, 42))
            .force_reset(true)
            .monitor(
                MonitorConfig::default()
                    .snapshot_dir("/tmp/snapshot")
                    .video_schedule(VideoSchedule::Never),
            );
        config.save(&path)?;
        let config_ = EnvConfig::load(&path)?;

        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_defaults() {
        let config = EnvConfig::default();
        assert_eq!(config.history_length, 4);
        assert_eq!(config.screen_dims, (84, 84));
        assert!(!config.force_reset);
        assert_eq!(config.monitor, MonitorConfig::default());
    }
}
