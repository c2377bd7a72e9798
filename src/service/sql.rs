//! Statement text sent to MindsDB
//!
//! The SQL endpoint has no bound parameters, so every value that reaches a
//! statement is formatted here. String values go through [`quote_literal`];
//! names are expected to be identifiers already checked by config validation.

use crate::service::types::ModelRef;
use crate::types::PredictionRequest;

/// Lists integrations and projects
pub const SHOW_DATABASES: &str = "SHOW DATABASES";

/// Single-quoted SQL string literal with embedded quotes doubled
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Register a file-backed integration
pub fn create_database(name: &str, engine: &str, file_path: &str) -> String {
    let parameters = serde_json::json!({ "db_file": file_path });
    format!(
        "CREATE DATABASE {} WITH ENGINE = {}, PARAMETERS = {}",
        name,
        quote_literal(engine),
        parameters
    )
}

pub fn create_project(name: &str) -> String {
    format!("CREATE PROJECT {}", name)
}

/// Train `model` over `integration` using `training_query`
pub fn create_model(model: &ModelRef, engine: &str, integration: &str, training_query: &str) -> String {
    format!(
        "CREATE MODEL {}\nPREDICT {}\nUSING\n    engine = {},\n    integration = {},\n    query = {}",
        model.qualified(),
        model.target,
        quote_literal(engine),
        quote_literal(integration),
        quote_literal(training_query)
    )
}

pub fn model_status(model: &ModelRef) -> String {
    format!(
        "SELECT status, error FROM {}.models WHERE name = {}",
        model.project,
        quote_literal(&model.model)
    )
}

/// Equality lookup on all five request fields; symptoms are trimmed
pub fn prediction_query(model: &ModelRef, request: &PredictionRequest) -> String {
    let [symptom1, symptom2, symptom3] = request.trimmed_symptoms();
    format!(
        "SELECT {target}, {explain}\nFROM {model}\nWHERE age = {age}\nAND gender = {gender}\nAND symptom1 = {s1}\nAND symptom2 = {s2}\nAND symptom3 = {s3}",
        target = model.target,
        explain = model.explain_column(),
        model = model.qualified(),
        age = request.age,
        gender = quote_literal(request.gender.as_str()),
        s1 = quote_literal(symptom1),
        s2 = quote_literal(symptom2),
        s3 = quote_literal(symptom3),
    )
}
