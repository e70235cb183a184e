//! Rolling history of processed observations.
use crate::{resize::resize_frame, HistEnvObs};
use histenv_core::{error::HistEnvError, BoxSpace};
use ndarray::{ArrayD, ArrayViewD, Axis, Ix3, IxDyn, Slice};

/// How raw observations are turned into processed observations.
///
/// Resolved once from the declared observation shape of the raw environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationMode {
    /// Images of shape `[height, width, channels]`, resized to `target_size = (height, width)`.
    Pixel { target_size: (usize, usize) },

    /// 1-dimensional RAM states, kept as they are.
    Ram,
}

// Ring over the first axis of `slots`. `head` is the slot of the oldest entry.
#[derive(Debug, Clone)]
struct HistoryBuffer {
    slots: ArrayD<u8>,
    head: usize,
}

impl HistoryBuffer {
    fn len(&self) -> usize {
        self.slots.len_of(Axis(0))
    }

    /// Overwrites the oldest entry, which then becomes the newest one.
    fn push(&mut self, obs: &ArrayD<u8>) {
        let n = self.len();
        self.slots.index_axis_mut(Axis(0), self.head).assign(obs);
        self.head = (self.head + 1) % n;
    }

    /// Entries from oldest to newest.
    fn iter(&self) -> impl Iterator<Item = ArrayViewD<'_, u8>> {
        let n = self.len();
        (0..n).map(move |i| self.slots.index_axis(Axis(0), (self.head + i) % n))
    }
}

/// Builds history-stacked observations from a stream of raw observations.
///
/// The builder keeps the last `K` processed observations, `K` being the
/// history length. Before the first call of
/// [`on_reset`](HistoryObservationBuilder::on_reset) no history exists and
/// [`on_step`](HistoryObservationBuilder::on_step) fails.
///
/// ```
/// use histenv_atari::HistoryObservationBuilder;
/// use ndarray::{arr1, ArrayD};
///
/// let mut builder = HistoryObservationBuilder::new(4, (84, 84), &[2]).unwrap();
/// let ram = |v: [u8; 2]| -> ArrayD<u8> { arr1(&v).into_dyn() };
///
/// builder.on_reset(&ram([1, 2])).unwrap();
/// builder.on_step(&ram([3, 4])).unwrap();
/// let obs = builder.on_step(&ram([5, 6])).unwrap();
///
/// assert_eq!(obs.into_vec(), vec![0, 0, 1, 2, 3, 4, 5, 6]);
/// ```
#[derive(Debug, Clone)]
pub struct HistoryObservationBuilder {
    history_length: usize,
    mode: ObservationMode,
    declared_shape: Vec<usize>,
    processed_shape: Vec<usize>,
    history_shape: Vec<usize>,
    output_shape: Vec<usize>,
    buffer: Option<HistoryBuffer>,
}

impl HistoryObservationBuilder {
    /// Constructs a builder for observations of `declared_shape`.
    ///
    /// A declared shape of rank 1 selects [`ObservationMode::Ram`] and
    /// `target_size` is ignored. A declared shape of rank 3 selects
    /// [`ObservationMode::Pixel`].
    pub fn new(
        history_length: usize,
        target_size: (usize, usize),
        declared_shape: &[usize],
    ) -> Result<Self, HistEnvError> {
        if history_length < 1 {
            return Err(HistEnvError::InvalidHistoryLength(history_length));
        }

        let mode = match declared_shape.len() {
            1 => ObservationMode::Ram,
            3 => {
                if target_size.0 == 0 || target_size.1 == 0 {
                    return Err(HistEnvError::InvalidTargetSize(target_size));
                }
                ObservationMode::Pixel { target_size }
            }
            _ => {
                return Err(HistEnvError::UnsupportedObservationRank(
                    declared_shape.to_vec(),
                ))
            }
        };

        let mut processed_shape = declared_shape.to_vec();
        if let ObservationMode::Pixel { target_size: (h, w) } = mode {
            processed_shape[0] = h;
            processed_shape[1] = w;
        }

        let history_shape = std::iter::once(history_length)
            .chain(processed_shape.iter().copied())
            .collect::<Vec<_>>();

        let mut output_shape = processed_shape.clone();
        if let Some(last) = output_shape.last_mut() {
            *last = last
                .checked_mul(history_length)
                .ok_or(HistEnvError::InvalidHistoryLength(history_length))?;
        }
        if output_shape
            .iter()
            .try_fold(1usize, |n, &d| n.checked_mul(d))
            .is_none()
        {
            return Err(HistEnvError::InvalidHistoryLength(history_length));
        }

        Ok(Self {
            history_length,
            mode,
            declared_shape: declared_shape.to_vec(),
            processed_shape,
            history_shape,
            output_shape,
            buffer: None,
        })
    }

    /// Number of observations kept in the history.
    pub fn history_length(&self) -> usize {
        self.history_length
    }

    pub fn mode(&self) -> ObservationMode {
        self.mode
    }

    /// Shape of an observation after resizing.
    pub fn processed_shape(&self) -> &[usize] {
        &self.processed_shape
    }

    /// Shape of the history, `[K] + processed_shape`.
    pub fn history_shape(&self) -> &[usize] {
        &self.history_shape
    }

    /// Shape of stacked observations, fixed for the lifetime of the builder.
    pub fn output_shape(&self) -> &[usize] {
        &self.output_shape
    }

    /// Observation space of stacked observations.
    pub fn observation_space(&self) -> BoxSpace {
        BoxSpace::bytes(self.output_shape.clone())
    }

    /// Returns `true` after the first reset.
    pub fn is_ready(&self) -> bool {
        self.buffer.is_some()
    }

    /// Processed observations in the history, oldest first.
    pub fn history(&self) -> Option<Vec<ArrayViewD<'_, u8>>> {
        self.buffer.as_ref().map(|b| b.iter().collect())
    }

    /// Starts a new history with `raw` as its newest entry; older entries are zero.
    pub fn on_reset(&mut self, raw: &ArrayD<u8>) -> Result<HistEnvObs, HistEnvError> {
        let obs = self.process(raw)?;
        let mut slots = ArrayD::<u8>::zeros(IxDyn(&self.history_shape));
        slots
            .index_axis_mut(Axis(0), self.history_length - 1)
            .assign(&obs);
        self.buffer = Some(HistoryBuffer { slots, head: 0 });
        self.stack()
    }

    /// Drops the oldest entry of the history and appends `raw` as the newest.
    pub fn on_step(&mut self, raw: &ArrayD<u8>) -> Result<HistEnvObs, HistEnvError> {
        if self.buffer.is_none() {
            return Err(HistEnvError::Uninitialized);
        }
        let obs = self.process(raw)?;
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.push(&obs);
        }
        self.stack()
    }

    /// Resizes an image to the target size. RAM states are returned as they are.
    pub fn process(&self, raw: &ArrayD<u8>) -> Result<ArrayD<u8>, HistEnvError> {
        match self.mode {
            ObservationMode::Ram => {
                if raw.shape() != self.declared_shape.as_slice() {
                    return Err(self.shape_error(raw));
                }
                Ok(raw.clone())
            }
            ObservationMode::Pixel { target_size } => {
                let frame = raw
                    .view()
                    .into_dimensionality::<Ix3>()
                    .map_err(|_| self.shape_error(raw))?;
                let (h, w, c) = frame.dim();
                if h == 0 || w == 0 || c != self.declared_shape[2] {
                    return Err(self.shape_error(raw));
                }
                Ok(resize_frame(frame, target_size).into_dyn())
            }
        }
    }

    /// Concatenates the history along the last axis, oldest first.
    pub fn stack(&self) -> Result<HistEnvObs, HistEnvError> {
        let buffer = self.buffer.as_ref().ok_or(HistEnvError::Uninitialized)?;
        let axis = Axis(self.processed_shape.len() - 1);
        let width = self.processed_shape[axis.index()];
        let mut frames = ArrayD::<u8>::zeros(IxDyn(&self.output_shape));

        for (i, obs) in buffer.iter().enumerate() {
            frames
                .slice_axis_mut(axis, Slice::from(i * width..(i + 1) * width))
                .assign(&obs);
        }

        Ok(frames.into())
    }

    fn shape_error(&self, raw: &ArrayD<u8>) -> HistEnvError {
        let expected = match self.mode {
            ObservationMode::Ram => self.declared_shape.clone(),
            ObservationMode::Pixel { .. } => vec![0, 0, self.declared_shape[2]],
        };
        HistEnvError::ObservationShape {
            expected,
            actual: raw.shape().to_vec(),
        }
    }
}
