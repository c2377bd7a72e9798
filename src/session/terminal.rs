//! Terminal abstraction for the session loop
//!
//! [`ConsoleTerminal`] reads lines with rustyline and renders results with
//! colored output. Tests drive the loop through a scripted implementation.

use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::errors::{AssistantError, Result};
use crate::types::PredictionResult;

/// Line-oriented operator terminal
pub trait Terminal {
    /// Read one line after showing `prompt`
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Show a validation message before a reprompt
    fn show_notice(&mut self, message: &str);

    /// Show the header that opens each prediction round
    fn show_header(&mut self);

    /// Show a prediction to the operator
    fn show_prediction(&mut self, result: &PredictionResult);
}

/// Interactive terminal backed by rustyline
pub struct ConsoleTerminal {
    editor: DefaultEditor,
}

impl ConsoleTerminal {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| AssistantError::Generic(format!("Readline error: {}", e)))?;
        Ok(ConsoleTerminal { editor })
    }
}

impl Terminal for ConsoleTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => return Ok(Some(line)),
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C only cancels the current line
                    println!("{}", "Answer 'n' at the end of a prediction or press Ctrl-D to quit".dimmed());
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => {
                    return Err(AssistantError::Generic(format!("Readline error: {}", err)));
                }
            }
        }
    }

    fn show_notice(&mut self, message: &str) {
        println!("{}", message.yellow());
    }

    fn show_header(&mut self) {
        println!("\n{}", "Healthcare Diagnosis Assistant".bold().cyan());
    }

    fn show_prediction(&mut self, result: &PredictionResult) {
        let diagnosis = if result.is_sentinel() {
            result.diagnosis.red().bold()
        } else {
            result.diagnosis.green().bold()
        };
        println!("\n{} {}", "Predicted diagnosis:".bold(), diagnosis);
        println!("{} {}", "Explanation:".bold(), result.diagnosis_explain);
    }
}
