//! JSON Schema validation for converted registry datasets.
//!
//! The converter writes an array of flat objects whose values are all
//! strings or `null`. This module checks a document against that shape
//! (JSON Schema Draft 7) so a bad file is caught before it is served.
//!
//! The schema is embedded at compile time from `schemas/operadoras.json`.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use cadop::validation::validate_dataset;
//!
//! let dataset = json!([
//!     { "Registro_ANS": "419761", "Cidade": "São Paulo", "UF": "SP" }
//! ]);
//! assert!(validate_dataset(&dataset).is_ok());
//! ```

use serde_json::Value;

/// Validate a JSON document against a JSON schema.
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(Vec<String>)` with one message per violation
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator.iter_errors(data).map(|e| e.to_string()).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Even simpler version: just true/false.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a document against the registry dataset schema.
pub fn validate_dataset(data: &Value) -> Result<(), Vec<String>> {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/operadoras.json"))
        .expect("Invalid embedded schema");
    validate(&schema, data)
}

/// Quick check against the registry dataset schema.
pub fn is_valid_dataset(data: &Value) -> bool {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/operadoras.json"))
        .expect("Invalid embedded schema");
    is_valid(&schema, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_converted_dataset_validates() {
        let dataset = json!([
            {"Registro_ANS": "419761", "CNPJ": "19541931000125", "Cidade": "São Paulo",
             "UF": "SP", "Modalidade": "Cooperativa Médica", "DDD": "11"},
            {"Registro_ANS": "123456", "CNPJ": null, "Cidade": null,
             "UF": "MG", "Modalidade": "Odontologia de Grupo"}
        ]);

        assert!(validate_dataset(&dataset).is_ok());
        assert!(is_valid_dataset(&dataset));
    }

    #[test]
    fn test_empty_array_validates() {
        assert!(validate_dataset(&json!([])).is_ok());
    }

    #[test]
    fn test_non_array_fails() {
        let errors = validate_dataset(&json!({"Registro_ANS": "419761"})).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_numeric_values_fail() {
        let dataset = json!([{"Registro_ANS": 419761}]);
        assert!(!is_valid_dataset(&dataset));
        assert!(validate_dataset(&dataset).is_err());
    }
}
