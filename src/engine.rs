// Driver-facing boundary. Frontends (the CLI, simulators, tests) advance and
// inspect a game through this trait without reaching into `GameEngine`
// internals. It is implemented for the core `GameEngine` type.

use crate::game::{EngineError, GameEngine, Stage};
use crate::snapshot::GameState;

pub trait Engine {
    fn step(&mut self) -> Result<(), EngineError>;
    fn snapshot(&self) -> GameState;
    fn stage(&self) -> &Stage;
    fn announcement_count(&self) -> usize;

    fn is_over(&self) -> bool {
        self.stage().is_done()
    }

    /// Step until the log grows or the game ends. Returns the number of steps taken.
    fn step_until_announcement(&mut self, limit: usize) -> Result<usize, EngineError> {
        let mark = self.announcement_count();
        for taken in 1..=limit {
            self.step()?;
            if self.announcement_count() > mark || self.is_over() {
                return Ok(taken);
            }
        }
        Err(EngineError::StepLimitExceeded { limit })
    }

    /// Step until `Done`. Returns the number of steps taken.
    fn run_to_end(&mut self, limit: usize) -> Result<usize, EngineError> {
        let mut taken = 0;
        while !self.is_over() {
            if taken == limit {
                return Err(EngineError::StepLimitExceeded { limit });
            }
            self.step()?;
            taken += 1;
        }
        Ok(taken)
    }
}

impl Engine for GameEngine {
    fn step(&mut self) -> Result<(), EngineError> {
        self.step()
    }
    fn snapshot(&self) -> GameState {
        self.snapshot()
    }
    fn stage(&self) -> &Stage {
        self.stage()
    }
    fn announcement_count(&self) -> usize {
        self.announcements().len()
    }
}
