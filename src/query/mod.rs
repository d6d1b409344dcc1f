//! Query engine - exact-match filtering over the operator collection.
//!
//! A query is a conjunction of up to five criteria. Matching is a linear
//! scan preserving input order.
//!
//! # Matching Rules
//!
//! Both operands are trimmed of surrounding whitespace before comparison.
//!
//! | Field          | Comparison                                |
//! |----------------|-------------------------------------------|
//! | `Registro_ANS` | case-sensitive                            |
//! | `CNPJ`         | case-sensitive                            |
//! | `Cidade`       | case-insensitive (Unicode simple folding) |
//! | `UF`           | case-insensitive                          |
//! | `Modalidade`   | case-insensitive (Unicode simple folding) |
//!
//! A record that lacks a filtered field (null cell in the export) is a
//! non-match for that criterion, never an error.

use serde::Deserialize;

use crate::error::{QueryError, QueryResult};
use crate::models::Operator;

// =============================================================================
// Search Criteria
// =============================================================================

/// Filter criteria for an operator search.
///
/// `None` fields are wildcards. The struct deserializes directly from the
/// `/buscar` query string, so the field names double as parameter names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    /// ANS registration code (trim-only, case-sensitive).
    pub registro: Option<String>,
    /// Tax ID (trim-only, case-sensitive).
    pub cnpj: Option<String>,
    /// City name (case-insensitive).
    pub cidade: Option<String>,
    /// State code (case-insensitive).
    pub uf: Option<String>,
    /// Operator category (case-insensitive).
    pub modalidade: Option<String>,
}

impl SearchCriteria {
    /// True when every field is a wildcard.
    pub fn is_empty(&self) -> bool {
        self.registro.is_none()
            && self.cnpj.is_none()
            && self.cidade.is_none()
            && self.uf.is_none()
            && self.modalidade.is_none()
    }

    /// True when the operator satisfies every supplied criterion.
    pub fn matches(&self, operator: &Operator) -> bool {
        matches_exact(operator.registro_ans.as_deref(), self.registro.as_deref())
            && matches_exact(operator.cnpj.as_deref(), self.cnpj.as_deref())
            && matches_folded(operator.cidade.as_deref(), self.cidade.as_deref())
            && matches_folded(operator.uf.as_deref(), self.uf.as_deref())
            && matches_folded(operator.modalidade.as_deref(), self.modalidade.as_deref())
    }
}

// =============================================================================
// Field Predicates
// =============================================================================

/// Trim-only, case-sensitive comparison. A missing field never matches.
fn matches_exact(field: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => match field {
            Some(value) => value.trim() == wanted.trim(),
            None => false,
        },
    }
}

/// Trimmed, case-insensitive comparison using Unicode simple case folding,
/// so accented names ("SÃO PAULO" / "são paulo") compare equal.
fn matches_folded(field: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => match field {
            Some(value) => value.trim().to_lowercase() == wanted.trim().to_lowercase(),
            None => false,
        },
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Apply the conjunction of all supplied criteria to the collection.
///
/// Returns the ordered subsequence of matching records. An empty input
/// collection short-circuits to [`QueryError::EmptyCollection`]; an empty
/// result is [`QueryError::NoMatch`]. "No data at all" and "no data matching
/// the filter" deliberately collapse into a failed lookup either way.
pub fn filter(records: &[Operator], criteria: &SearchCriteria) -> QueryResult<Vec<Operator>> {
    if records.is_empty() {
        return Err(QueryError::EmptyCollection);
    }

    let hits: Vec<Operator> = records
        .iter()
        .filter(|op| criteria.matches(op))
        .cloned()
        .collect();

    if hits.is_empty() {
        return Err(QueryError::NoMatch);
    }

    Ok(hits)
}

// =============================================================================
// Named Lookups
// =============================================================================

/// The full collection, or a failed lookup when it is empty.
pub fn todos(records: &[Operator]) -> QueryResult<Vec<Operator>> {
    filter(records, &SearchCriteria::default())
}

/// Lookup by ANS registration code.
pub fn by_registro(records: &[Operator], registro: &str) -> QueryResult<Vec<Operator>> {
    filter(
        records,
        &SearchCriteria {
            registro: Some(registro.to_string()),
            ..Default::default()
        },
    )
}

/// Lookup by tax ID.
pub fn by_cnpj(records: &[Operator], cnpj: &str) -> QueryResult<Vec<Operator>> {
    filter(
        records,
        &SearchCriteria {
            cnpj: Some(cnpj.to_string()),
            ..Default::default()
        },
    )
}

/// Lookup by city, case-insensitive.
pub fn by_cidade(records: &[Operator], cidade: &str) -> QueryResult<Vec<Operator>> {
    filter(
        records,
        &SearchCriteria {
            cidade: Some(cidade.to_string()),
            ..Default::default()
        },
    )
}

/// Lookup by state code, case-insensitive.
pub fn by_uf(records: &[Operator], uf: &str) -> QueryResult<Vec<Operator>> {
    filter(
        records,
        &SearchCriteria {
            uf: Some(uf.to_string()),
            ..Default::default()
        },
    )
}

/// Lookup by operator category, case-insensitive.
pub fn by_modalidade(records: &[Operator], modalidade: &str) -> QueryResult<Vec<Operator>> {
    filter(
        records,
        &SearchCriteria {
            modalidade: Some(modalidade.to_string()),
            ..Default::default()
        },
    )
}

// =============================================================================
// Tests
// =============================================================================
