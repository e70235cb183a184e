//! Key-value records emitted alongside environment steps.
//!
//! An environment returns a [`Record`] from every step. Most steps carry an
//! empty record; the step that ends an episode carries episode statistics
//! which the caller may forward to whatever logging backend it uses.
//!
//! ```rust
//! use histenv_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode_reward", RecordValue::Scalar(21.0));
//! record.insert("episode_length", RecordValue::Scalar(812.0));
//!
//! assert_eq!(record.get_scalar("episode_reward").unwrap(), 21.0);
//! ```
mod base;
pub use base::{Record, RecordValue};
