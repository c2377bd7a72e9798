//! Operator input validation
//!
//! Only age and gender are validated; symptoms are free text.

use std::num::IntErrorKind;
use thiserror::Error;

use crate::errors::Result;
use crate::session::terminal::Terminal;
use crate::types::{Gender, PredictionRequest};

pub const AGE_PROMPT: &str = "Enter patient's age: ";
pub const GENDER_PROMPT: &str = "Enter patient's gender (M/F): ";
pub const SYMPTOM_PROMPTS: [&str; 3] = [
    "Enter first symptom: ",
    "Enter second symptom: ",
    "Enter third symptom: ",
];
pub const CONTINUE_PROMPT: &str = "Do you want to make another prediction? (y/n): ";

/// Rejected operator input; only ever triggers a reprompt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid input for age. Please enter a valid integer.")]
    AgeNotInteger,

    #[error("Age cannot be negative. Please try again.")]
    AgeNegative,

    #[error("Age is out of range. Please enter a realistic age.")]
    AgeOutOfRange,

    #[error("Invalid input for gender. Please enter 'M' or 'F'.")]
    InvalidGender,
}

/// Parse a non-negative integer age
pub fn parse_age(input: &str) -> std::result::Result<u32, InputError> {
    let value: i64 = input.trim().parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => InputError::AgeOutOfRange,
        IntErrorKind::NegOverflow => InputError::AgeNegative,
        _ => InputError::AgeNotInteger,
    })?;
    if value < 0 {
        return Err(InputError::AgeNegative);
    }
    u32::try_from(value).map_err(|_| InputError::AgeOutOfRange)
}

/// Parse `M`/`F` in either case
pub fn parse_gender(input: &str) -> std::result::Result<Gender, InputError> {
    input.parse().map_err(|_| InputError::InvalidGender)
}

/// Read one validated field, reprompting that field until it parses
///
/// Returns `None` when the terminal reaches end of input.
pub fn read_validated<T, V, P>(terminal: &mut T, prompt: &str, parse: P) -> Result<Option<V>>
where
    T: Terminal + ?Sized,
    P: Fn(&str) -> std::result::Result<V, InputError>,
{
    loop {
        let line = match terminal.read_line(prompt)? {
            Some(line) => line,
            None => return Ok(None),
        };
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => terminal.show_notice(&e.to_string()),
        }
    }
}

/// Collect a complete prediction request
///
/// Returns `None` if input ends before all five fields are read.
pub fn collect_request<T: Terminal + ?Sized>(terminal: &mut T) -> Result<Option<PredictionRequest>> {
    let age = match read_validated(terminal, AGE_PROMPT, parse_age)? {
        Some(age) => age,
        None => return Ok(None),
    };
    let gender = match read_validated(terminal, GENDER_PROMPT, parse_gender)? {
        Some(gender) => gender,
        None => return Ok(None),
    };

    let mut symptoms = Vec::with_capacity(SYMPTOM_PROMPTS.len());
    for prompt in SYMPTOM_PROMPTS {
        match terminal.read_line(prompt)? {
            Some(symptom) => symptoms.push(symptom),
            None => return Ok(None),
        }
    }
    let [symptom1, symptom2, symptom3]: [String; 3] = match symptoms.try_into() {
        Ok(symptoms) => symptoms,
        Err(_) => return Ok(None),
    };

    Ok(Some(PredictionRequest {
        age,
        gender,
        symptom1,
        symptom2,
        symptom3,
    }))
}
