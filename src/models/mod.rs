//! Domain models for the cadop registry.
//!
//! This module contains the core data structures used throughout the crate:
//!
//! - [`Operator`] - one registered health plan operator (one row of the
//!   registry export)
//!
//! The registry export carries far more columns than the ones the query
//! engine filters on (address lines, phone numbers, representative names...).
//! Those travel through untouched in an open field bag, so a converted file
//! round-trips byte-for-byte in content.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Operator Record
// =============================================================================

/// A registered operator record.
///
/// The five named fields are the ones the query engine can filter on. Every
/// field is optional: the source export leaves cells empty, and the converter
/// writes those as `null`. All remaining columns land in [`Operator::extra`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Operator {
    /// ANS registration code (unique per operator, but uniqueness is not
    /// enforced here).
    #[serde(rename = "Registro_ANS")]
    pub registro_ans: Option<String>,

    /// National business tax ID.
    #[serde(rename = "CNPJ")]
    pub cnpj: Option<String>,

    /// City of the operator's registered address.
    #[serde(rename = "Cidade")]
    pub cidade: Option<String>,

    /// Two-letter state code.
    #[serde(rename = "UF")]
    pub uf: Option<String>,

    /// Operator category label (e.g. "Cooperativa Médica").
    #[serde(rename = "Modalidade")]
    pub modalidade: Option<String>,

    /// Passthrough columns not used in filtering.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Operator {
    /// Create an operator with only the filterable fields set.
    pub fn new(
        registro_ans: impl Into<String>,
        cnpj: impl Into<String>,
        cidade: impl Into<String>,
        uf: impl Into<String>,
        modalidade: impl Into<String>,
    ) -> Self {
        Self {
            registro_ans: Some(registro_ans.into()),
            cnpj: Some(cnpj.into()),
            cidade: Some(cidade.into()),
            uf: Some(uf.into()),
            modalidade: Some(modalidade.into()),
            extra: Map::new(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
