//! Configuration of [`EpisodeMonitor`](super::EpisodeMonitor).
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Selects the episodes whose frames are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoSchedule {
    /// No episode is recorded.
    Never,

    /// Episodes `0, 1, 8, 27, ..., 729` and then every 1000th episode.
    CappedCubic,
}

impl VideoSchedule {
    /// Returns `true` if the episode with the given id is recorded.
    pub fn should_record(&self, episode_id: usize) -> bool {
        match self {
            Self::Never => false,
            Self::CappedCubic => {
                if episode_id < 1000 {
                    let root = (episode_id as f64).cbrt().round() as usize;
                    root * root * root == episode_id
                } else {
                    episode_id % 1000 == 0
                }
            }
        }
    }
}

/// Configuration of episode monitoring.
///
/// The log directory is `log_dir` if given, otherwise `gym_log` under
/// `snapshot_dir`. Monitoring is disabled when neither is given or
/// `record_log` is `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub(crate) log_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) snapshot_dir: Option<PathBuf>,
    pub(crate) record_log: bool,
    pub(crate) record_video: bool,
    #[serde(default)]
    pub(crate) video_schedule: Option<VideoSchedule>,
    pub(crate) train: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            snapshot_dir: None,
            record_log: true,
            record_video: true,
            video_schedule: None,
            train: true,
        }
    }
}

impl MonitorConfig {
    /// Sets the log directory.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Sets the snapshot directory, used when no log directory is given.
    pub fn snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    pub fn record_log(mut self, v: bool) -> Self {
        self.record_log = v;
        self
    }

    /// Enables recording frames. Requires `record_log`.
    pub fn record_video(mut self, v: bool) -> Self {
        self.record_video = v;
        self
    }

    /// Sets the video schedule, [`VideoSchedule::CappedCubic`] if not given.
    pub fn video_schedule(mut self, v: VideoSchedule) -> Self {
        self.video_schedule = Some(v);
        self
    }

    /// Marks episodes as evaluation episodes.
    pub fn eval(mut self) -> Self {
        self.train = false;
        self
    }
}
