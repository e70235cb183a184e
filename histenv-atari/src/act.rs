//! Discrete action for emulator environments.
use histenv_core::Act;
use serde::{Deserialize, Serialize};

/// Index into the set of actions available in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistEnvAct {
    pub act: u8,
}

impl HistEnvAct {
    pub fn new(act: u8) -> Self {
        Self { act }
    }
}

impl Act for HistEnvAct {}

impl From<u8> for HistEnvAct {
    fn from(act: u8) -> Self {
        Self { act }
    }
}
