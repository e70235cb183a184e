//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// Errors raised by a raw environment are not represented here. They are
/// propagated to the caller as they are.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistEnvError {
    /// The length of the observation history is not positive.
    #[error("Configuration error: history length must be positive, got {0}")]
    InvalidHistoryLength(usize),

    /// The target size of resized frames has a zero dimension.
    #[error("Configuration error: invalid target size {0:?}")]
    InvalidTargetSize((usize, usize)),

    /// The declared observation shape is neither a RAM vector nor an image.
    #[error("Configuration error: observation shape {0:?} must have rank 1 or 3")]
    UnsupportedObservationRank(Vec<usize>),

    /// Monitoring options contradict each other.
    #[error("Configuration error: {0}")]
    InvalidMonitorConfig(String),

    /// An observation was pushed before the history was initialized.
    #[error("State error: reset must be called before step")]
    Uninitialized,

    /// The environment was reset during a monitored episode.
    #[error("State error: episode {0} is in progress, set force_reset to reset it")]
    EpisodeInProgress(usize),

    /// A raw observation does not agree with the declared observation shape.
    #[error("Observation shape error: expected {expected:?}, got {actual:?}")]
    ObservationShape {
        /// Expected shape. A zero stands for a dimension of arbitrary size.
        expected: Vec<usize>,
        /// Shape of the observation.
        actual: Vec<usize>,
    },

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),
}

impl HistEnvError {
    /// Returns `true` if the error was raised while validating a configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidHistoryLength(_)
                | Self::InvalidTargetSize(_)
                | Self::UnsupportedObservationRank(_)
                | Self::InvalidMonitorConfig(_)
        )
    }

    /// Returns `true` if the operation is not allowed in the current state.
    pub fn is_state_error(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::EpisodeInProgress(_))
    }
}
