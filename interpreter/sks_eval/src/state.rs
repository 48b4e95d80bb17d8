//! Program state: one operand stack plus one environment.

use sks_runtime::{Environment, Stack};

/// The mutable state a script runs against.
#[derive(Clone, Debug, Default)]
pub struct ProgramState {
    pub stack: Stack,
    pub env: Environment,
}

impl ProgramState {
    pub fn new() -> Self {
        ProgramState {
            stack: Stack::with_capacity(256),
            env: Environment::new(),
        }
    }
}
