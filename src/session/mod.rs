//! Interactive prediction session
//!
//! Collects operator input, runs it through the prediction gateway and
//! shows the result, repeating until the operator declines or input ends.

pub mod input;
pub mod state;
pub mod terminal;

use chrono::{DateTime, Local};

use crate::errors::{AssistantError, Result};
use crate::prediction::PredictionGateway;
use crate::service::AnalyticsService;
use crate::types::{PredictionRequest, PredictionResult};

pub use input::{collect_request, parse_age, parse_gender, InputError};
pub use state::{ContinueDecision, SessionEvent, SessionState};
pub use terminal::{ConsoleTerminal, Terminal};

/// What happened during one session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub started_at: DateTime<Local>,
    pub predictions: usize,
    /// Predictions that came back as sentinel results
    pub unresolved: usize,
}

impl SessionSummary {
    fn new() -> Self {
        Self {
            started_at: Local::now(),
            predictions: 0,
            unresolved: 0,
        }
    }

    fn record(&mut self, result: &PredictionResult) {
        self.predictions += 1;
        if result.is_sentinel() {
            self.unresolved += 1;
        }
    }

    /// One-line closing summary
    pub fn describe(&self) -> String {
        format!(
            "{} prediction(s) since {} ({} without a result)",
            self.predictions,
            self.started_at.format("%H:%M:%S"),
            self.unresolved
        )
    }
}

/// Drives the session state machine against a terminal
pub struct SessionLoop<'a, S: AnalyticsService + ?Sized> {
    service: &'a S,
    gateway: &'a PredictionGateway,
    state: SessionState,
}

impl<'a, S: AnalyticsService + ?Sized> SessionLoop<'a, S> {
    pub fn new(service: &'a S, gateway: &'a PredictionGateway) -> Self {
        Self {
            service,
            gateway,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run until the session reaches `Done`
    pub async fn run<T: Terminal + ?Sized>(&mut self, terminal: &mut T) -> Result<SessionSummary> {
        let mut summary = SessionSummary::new();
        let mut request: Option<PredictionRequest> = None;
        let mut result: Option<PredictionResult> = None;

        while !self.state.is_terminal() {
            let event = match self.state {
                SessionState::CollectingInput => {
                    terminal.show_header();
                    match collect_request(terminal)? {
                        Some(collected) => {
                            request = Some(collected);
                            SessionEvent::InputComplete
                        }
                        None => SessionEvent::EndOfInput,
                    }
                }
                SessionState::Predicting => {
                    let pending = request.take().ok_or_else(|| {
                        AssistantError::Generic("prediction started without a request".to_string())
                    })?;
                    let prediction = self.gateway.predict(self.service, &pending).await;
                    summary.record(&prediction);
                    result = Some(prediction);
                    SessionEvent::PredictionReady
                }
                SessionState::DisplayingResult => {
                    if let Some(shown) = result.take() {
                        terminal.show_prediction(&shown);
                    }
                    SessionEvent::ResultShown
                }
                SessionState::AskingContinue => match terminal.read_line(input::CONTINUE_PROMPT)? {
                    Some(answer) => ContinueDecision::from_answer(&answer).into(),
                    None => SessionEvent::EndOfInput,
                },
                SessionState::Done => break,
            };

            self.state = self.state.transition(event)?;
        }

        Ok(summary)
    }
}
