#![warn(missing_docs)]
//! Core traits and types for environments emitting history-stacked observations.
//!
//! An environment wrapper sits between a raw environment, typically an emulator
//! implementing [`RawEnv`], and an agent loop driving an [`Env`]. The raw
//! environment emits one observation per step; the wrapper replaces it with
//! whatever the agent consumes, while rewards, termination flags and
//! [`Info`] pass through unchanged.
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Env, Info, Obs, RawEnv, RawStep, Step};

mod space;
pub use space::{ActionSpace, BoxSpace};
