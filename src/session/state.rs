//! Session state machine
//!
//! Valid transitions:
//!
//! ```text
//! CollectingInput  → Predicting       (on: InputComplete)
//! Predicting       → DisplayingResult (on: PredictionReady)
//! DisplayingResult → AskingContinue   (on: ResultShown)
//! AskingContinue   → CollectingInput  (on: Continue)
//! AskingContinue   → Done             (on: Stop)
//! any state        → Done             (on: EndOfInput)
//! Done             → Done             (terminal state)
//! ```

use crate::errors::{AssistantError, Result};

/// Interactive session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Reading age, gender and symptoms
    CollectingInput,

    /// Waiting on the prediction gateway
    Predicting,

    /// Showing diagnosis and explanation
    DisplayingResult,

    /// Asking whether to run another prediction
    AskingContinue,

    /// Session finished (terminal)
    Done,
}

/// Events that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// All five fields are valid
    InputComplete,

    /// Gateway returned a result (real or sentinel)
    PredictionReady,

    /// Result has been shown to the operator
    ResultShown,

    /// Operator asked for another prediction
    Continue,

    /// Operator declined another prediction
    Stop,

    /// Terminal closed (Ctrl-D)
    EndOfInput,
}

/// Operator's answer to the "another prediction?" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueDecision {
    Continue,
    Stop,
}

impl ContinueDecision {
    /// `y` in either case continues; anything else stops
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim().eq_ignore_ascii_case("y") {
            ContinueDecision::Continue
        } else {
            ContinueDecision::Stop
        }
    }
}

impl From<ContinueDecision> for SessionEvent {
    fn from(decision: ContinueDecision) -> Self {
        match decision {
            ContinueDecision::Continue => SessionEvent::Continue,
            ContinueDecision::Stop => SessionEvent::Stop,
        }
    }
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Done)
    }

    /// Attempt state transition with validation
    pub fn transition(&self, event: SessionEvent) -> Result<SessionState> {
        use SessionEvent::*;
        use SessionState::*;

        if event == EndOfInput {
            return Ok(Done);
        }

        let next_state = match (self, event) {
            (CollectingInput, InputComplete) => Predicting,
            (Predicting, PredictionReady) => DisplayingResult,
            (DisplayingResult, ResultShown) => AskingContinue,
            (AskingContinue, Continue) => CollectingInput,
            (AskingContinue, Stop) => Done,

            (Done, _) => Done,

            (from, event) => {
                return Err(AssistantError::InvalidTransition {
                    from: format!("{:?}", from),
                    to: format!("(via {:?})", event),
                    reason: format!("No valid transition from {:?} on {:?}", from, event),
                });
            }
        };

        Ok(next_state)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::CollectingInput
    }
}
