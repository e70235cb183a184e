//! Episode monitoring.
//!
//! When enabled, [`EpisodeMonitor`] keeps statistics of finished episodes in
//! `stats.json` under the log directory and stores the raw frames of the
//! episodes selected by a [`VideoSchedule`] as PNG files:
//!
//! ```text
//! <log_dir>/stats.json
//! <log_dir>/video/episode_000000/frame_000000.png
//! <log_dir>/video/episode_000000/frame_000001.png
//! ...
//! ```
mod config;
pub use config::{MonitorConfig, VideoSchedule};

use anyhow::Result;
use chrono::Local;
use histenv_core::error::HistEnvError;
use image::ColorType;
use log::{debug, info, warn};
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use std::{
    fs::{create_dir_all, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

/// Statistics of finished episodes, written to `stats.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Unix time of the first reset in seconds.
    pub initial_reset_timestamp: Option<f64>,

    /// Unix time at the end of each episode in seconds.
    pub timestamps: Vec<f64>,

    pub episode_lengths: Vec<usize>,

    pub episode_rewards: Vec<f32>,

    /// `"t"` for training episodes, `"e"` for evaluation episodes.
    pub episode_types: Vec<String>,
}

impl EpisodeStats {
    /// Loads statistics from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Records statistics and frames of episodes.
pub struct EpisodeMonitor {
    log_dir: PathBuf,
    schedule: VideoSchedule,
    train: bool,

    // Id of the current or last episode. `None` before the first reset.
    episode_id: Option<usize>,
    in_progress: bool,
    episode_reward: f32,
    episode_length: usize,
    n_frames: usize,
    recording: bool,
    stats: EpisodeStats,

    // Set when `stats` differs from `stats.json`
    dirty: bool,
}

impl EpisodeMonitor {
    /// Builds a monitor from the configuration.
    ///
    /// Returns `None` if monitoring is disabled, either explicitly or because
    /// no log directory is configured.
    pub fn build(config: &MonitorConfig) -> Result<Option<Self>> {
        let log_dir = match (&config.log_dir, &config.snapshot_dir) {
            (Some(dir), _) => Some(dir.clone()),
            (None, Some(dir)) => Some(dir.join("gym_log")),
            (None, None) => {
                warn!("Skipping environment monitoring since snapshot_dir is not configured");
                None
            }
        };

        if config.record_video && !config.record_log {
            return Err(HistEnvError::InvalidMonitorConfig(
                "record_video requires record_log".to_string(),
            )
            .into());
        }

        let log_dir = match log_dir {
            Some(dir) if config.record_log => dir,
            _ => return Ok(None),
        };

        let schedule = if config.record_video {
            config.video_schedule.unwrap_or(VideoSchedule::CappedCubic)
        } else {
            VideoSchedule::Never
        };

        create_dir_all(&log_dir)?;
        info!("Monitoring episodes in {:?} ({:?})", log_dir, schedule);

        Ok(Some(Self {
            log_dir,
            schedule,
            train: config.train,
            episode_id: None,
            in_progress: false,
            episode_reward: 0.0,
            episode_length: 0,
            n_frames: 0,
            recording: false,
            stats: EpisodeStats::default(),
            dirty: false,
        }))
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn schedule(&self) -> VideoSchedule {
        self.schedule
    }

    /// Id of the current episode, counted from zero.
    pub fn episode_id(&self) -> Option<usize> {
        self.episode_id
    }

    /// Returns `true` while frames of the current episode are being stored.
    pub fn is_recording(&self) -> bool {
        self.in_progress && self.recording
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// Path of the statistics file.
    pub fn stats_path(&self) -> PathBuf {
        self.log_dir.join("stats.json")
    }

    /// Directory of the frames of an episode.
    pub fn video_dir(&self, episode_id: usize) -> PathBuf {
        self.log_dir
            .join("video")
            .join(format!("episode_{:06}", episode_id))
    }

    /// Checks that the environment may be reset.
    ///
    /// An unfinished episode is closed and recorded if `force` is `true`,
    /// otherwise an error is returned.
    pub fn before_reset(&mut self, force: bool) -> Result<()> {
        if !self.in_progress {
            return Ok(());
        }

        let id = self.episode_id.unwrap_or_default();
        if force {
            debug!("Closing episode {} before reset", id);
            self.end_episode()
        } else {
            Err(HistEnvError::EpisodeInProgress(id).into())
        }
    }

    /// Starts a new episode with its first raw observation.
    pub fn after_reset(&mut self, obs: &ArrayD<u8>) -> Result<()> {
        if self.stats.initial_reset_timestamp.is_none() {
            self.stats.initial_reset_timestamp = Some(now());
            self.dirty = true;
        }

        let id = self.episode_id.map_or(0, |id| id + 1);
        self.episode_id = Some(id);
        self.in_progress = true;
        self.episode_reward = 0.0;
        self.episode_length = 0;
        self.n_frames = 0;
        self.recording = self.schedule.should_record(id);

        self.capture_frame(obs)
    }

    /// Accumulates a step of the current episode.
    pub fn after_step(&mut self, obs: &ArrayD<u8>, reward: f32, is_done: bool) -> Result<()> {
        if !self.in_progress {
            return Ok(());
        }

        self.episode_reward += reward;
        self.episode_length += 1;
        self.capture_frame(obs)?;

        if is_done {
            self.end_episode()?;
        }
        Ok(())
    }

    /// Writes statistics of finished episodes.
    ///
    /// Nothing is written if the statistics are unchanged since the last call.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let file = File::create(self.stats_path())?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.stats)?;
        self.dirty = false;
        Ok(())
    }

    fn end_episode(&mut self) -> Result<()> {
        self.in_progress = false;
        self.stats.timestamps.push(now());
        self.stats.episode_lengths.push(self.episode_length);
        self.stats.episode_rewards.push(self.episode_reward);
        self.stats
            .episode_types
            .push(if self.train { "t" } else { "e" }.to_string());
        self.dirty = true;
        debug!(
            "Episode {:?}: reward = {}, length = {}",
            self.episode_id, self.episode_reward, self.episode_length
        );
        self.flush()
    }

    fn capture_frame(&mut self, obs: &ArrayD<u8>) -> Result<()> {
        if !self.recording {
            return Ok(());
        }

        let color = match obs.shape() {
            [_, _, 1] => ColorType::L8,
            [_, _, 3] => ColorType::Rgb8,
            [_, _, 4] => ColorType::Rgba8,
            shape => {
                warn!("Frames of shape {:?} are not recorded", shape);
                self.recording = false;
                return Ok(());
            }
        };
        let (h, w) = (obs.shape()[0] as u32, obs.shape()[1] as u32);

        let dir = self.video_dir(self.episode_id.unwrap_or_default());
        if self.n_frames == 0 {
            create_dir_all(&dir)?;
        }
        let path = dir.join(format!("frame_{:06}.png", self.n_frames));
        let buf = obs.iter().copied().collect::<Vec<_>>();
        image::save_buffer(&path, &buf, w, h, color)?;
        self.n_frames += 1;

        Ok(())
    }
}

fn now() -> f64 {
    Local::now().timestamp_millis() as f64 / 1000.0
}
