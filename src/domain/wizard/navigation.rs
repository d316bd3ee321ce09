//! Step navigation as an explicit value instead of ambient globals.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Where a wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    current_step: usize,
    total_steps: usize,
}

/// What the chrome should show for a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepVisibility {
    pub active_step: usize,
    pub back_visible: bool,
    pub next_visible: bool,
    /// The review step re-derives the document when it is entered.
    pub is_review: bool,
}

/// Pure visibility rule: back hidden on the first step, next hidden on the last.
pub fn compute_visibility(step: usize, total_steps: usize) -> StepVisibility {
    StepVisibility {
        active_step: step,
        back_visible: step > 1,
        next_visible: step < total_steps,
        is_review: step == total_steps,
    }
}

impl WizardState {
    /// Starts at step 1.
    pub fn new(total_steps: usize) -> Self {
        Self {
            current_step: 1,
            total_steps: total_steps.max(1),
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn visibility(&self) -> StepVisibility {
        compute_visibility(self.current_step, self.total_steps)
    }

    pub fn is_review(&self) -> bool {
        self.current_step == self.total_steps
    }

    /// Advances one step when the current step's guard passed.
    ///
    /// Returns true if the step changed.
    pub fn advance(&mut self, step_is_valid: bool) -> bool {
        if !step_is_valid || self.current_step >= self.total_steps {
            return false;
        }
        self.current_step += 1;
        true
    }

    /// Goes back one step; never guarded.
    pub fn back(&mut self) -> bool {
        if self.current_step <= 1 {
            return false;
        }
        self.current_step -= 1;
        true
    }

    /// Sidebar jump. Skips step guards, only the range is checked.
    pub fn jump_to(&mut self, step: usize) -> Result<(), ValidationError> {
        if step == 0 || step > self.total_steps {
            return Err(ValidationError::out_of_range(
                "step",
                1,
                self.total_steps as i64,
                step as i64,
            ));
        }
        self.current_step = step;
        Ok(())
    }
}
