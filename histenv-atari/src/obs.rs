//! Observation for [`HistEnv`](crate::HistEnv).
use histenv_core::Obs;
use ndarray::ArrayD;

/// Stacked observation handed to agents.
///
/// For pixel observations the shape is `[height, width, channels * K]`, where
/// channels `[i * channels, (i + 1) * channels)` hold the `i`-th oldest frame of
/// the `K` frames in the history. For RAM observations the shape is
/// `[ram_size * K]` with the same oldest-first layout.
#[derive(Debug, Clone, PartialEq)]
pub struct HistEnvObs {
    pub frames: ArrayD<u8>,
}

impl HistEnvObs {
    /// Returns the elements in row-major order, scaled into `[0, 1]`.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.frames.iter().map(|&v| v as f32 / 255.0).collect()
    }

    /// Consumes the observation and returns the elements in row-major order.
    pub fn into_vec(self) -> Vec<u8> {
        self.frames.iter().copied().collect()
    }
}

impl From<ArrayD<u8>> for HistEnvObs {
    fn from(frames: ArrayD<u8>) -> Self {
        Self { frames }
    }
}

impl Obs for HistEnvObs {
    fn shape(&self) -> &[usize] {
        self.frames.shape()
    }
}
