//! History-stacked observations for emulator environments.
//!
//! [`HistEnv`] wraps a [`RawEnv`](histenv_core::RawEnv), typically an Atari
//! emulator, and replaces each raw observation with the concatenation of the
//! last `K` observations. Screen frames of shape `[height, width, channels]`
//! are first resized to a fixed size, by default 84x84; RAM states are kept as
//! they are. Observations older than the start of the episode are zero.
//!
//! Here is an example with [`ScriptedEnv`](util::test::ScriptedEnv), a
//! deterministic raw environment emitting 128-byte RAM states:
//!
//! ```
//! use anyhow::Result;
//! use histenv_atari::{
//!     util::test::{ScriptedEnv, ScriptedEnvConfig},
//!     HistEnv, HistEnvAct, HistEnvConfig,
//! };
//! use histenv_core::{Env as _, Obs as _};
//!
//! fn main() -> Result<()> {
//!     let config = HistEnvConfig::<ScriptedEnv>::new(ScriptedEnvConfig::ram(128))
//!         .history_length(4);
//!     let mut env = HistEnv::<ScriptedEnv>::build(&config, 42)?;
//!
//!     let obs = env.reset()?;
//!     assert_eq!(obs.shape(), &[4 * 128]);
//!
//!     let (step, _record) = env.step(&HistEnvAct::new(1))?;
//!     assert_eq!(step.obs.shape(), &[4 * 128]);
//!     assert_eq!(step.reward, 1.0);
//!
//!     Ok(())
//! }
//! ```
//!
//! Episode statistics and frames can be stored under a log directory, see
//! [`MonitorConfig`].
mod act;
mod env;
mod history;
mod monitor;
mod obs;
mod resize;
pub mod util;
pub use act::HistEnvAct;
pub use env::{HistEnv, HistEnvConfig};
pub use history::{HistoryObservationBuilder, ObservationMode};
pub use monitor::{EpisodeMonitor, EpisodeStats, MonitorConfig, VideoSchedule};
pub use obs::HistEnvObs;
pub use resize::resize_frame;
