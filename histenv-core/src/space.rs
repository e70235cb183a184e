//! Descriptors of observation and action spaces.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A box in `R^n` with identical bounds on every element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    /// Lower bound of elements.
    pub low: f32,

    /// Upper bound of elements.
    pub high: f32,

    /// Shape of elements.
    pub shape: Vec<usize>,
}

impl BoxSpace {
    /// Constructs a box space.
    pub fn new(low: f32, high: f32, shape: Vec<usize>) -> Self {
        Self { low, high, shape }
    }

    /// A box of bytes, i.e., pixels or RAM values.
    pub fn bytes(shape: Vec<usize>) -> Self {
        Self::new(0.0, 255.0, shape)
    }

    /// Returns the number of elements.
    pub fn flat_dim(&self) -> usize {
        self.shape.iter().product()
    }
}

impl fmt::Display for BoxSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Box({}, {}, {:?})", self.low, self.high, self.shape)
    }
}

/// Action space of an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionSpace {
    /// `n` discrete actions.
    Discrete(usize),

    /// Continuous actions.
    Box(BoxSpace),
}

impl fmt::Display for ActionSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discrete(n) => write!(f, "Discrete({})", n),
            Self::Box(b) => b.fmt(f),
        }
    }
}
