//! Operator store - loads the converted registry file from disk.
//!
//! The store is a thin handle around the data file location. It holds no
//! records: every [`OperatorStore::load`] call re-reads and re-parses the
//! file, so concurrent requests never share mutable state and an updated
//! file is picked up on the next request.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::models::Operator;

/// Default data file location (relative to current dir).
pub const DEFAULT_DATA_FILE: &str = "Relatorio_cadop.json";

/// Handle to the converted registry JSON file.
#[derive(Debug, Clone)]
pub struct OperatorStore {
    /// Location of the backing JSON array.
    path: PathBuf,
}

impl OperatorStore {
    /// Create a store reading from the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full operator collection from disk.
    ///
    /// Fails with [`StoreError::Missing`] if the file does not exist and
    /// [`StoreError::Json`] if its content is not a JSON array of records.
    pub fn load(&self) -> StoreResult<Vec<Operator>> {
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let records: Vec<Operator> = serde_json::from_str(&content)?;
        Ok(records)
    }
}

impl Default for OperatorStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write_fixture(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("operadoras.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let store = OperatorStore::new(dir.path().join("nope.json"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
    }

    #[test]
    fn test_load_preserves_order_and_fields() {
        let dir = tempdir().unwrap();
        let fixture = json!([
            {"Registro_ANS": "419761", "CNPJ": "19541931000125", "Cidade": "São Paulo",
             "UF": "SP", "Modalidade": "Cooperativa Médica", "DDD": "11"},
            {"Registro_ANS": "123456", "CNPJ": null, "Cidade": "Belo Horizonte",
             "UF": "MG", "Modalidade": "Odontologia de Grupo"}
        ]);
        let path = write_fixture(&dir, &fixture.to_string());

        let store = OperatorStore::new(path);
        let records = store.load().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].registro_ans.as_deref(), Some("419761"));
        assert_eq!(records[0].extra["DDD"], "11");
        assert_eq!(records[1].uf.as_deref(), Some("MG"));
        assert!(records[1].cnpj.is_none());
    }

    #[test]
    fn test_empty_array_loads_as_empty_collection() {
        let dir = tempdir().unwrap();
        let path = write_fixture(&dir, "[]");

        let store = OperatorStore::new(path);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_corrupt_data() {
        let dir = tempdir().unwrap();
        let path = write_fixture(&dir, "{\"not\": \"an array\"");

        let store = OperatorStore::new(path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn test_reload_sees_file_changes() {
        let dir = tempdir().unwrap();
        let path = write_fixture(&dir, "[]");
        let store = OperatorStore::new(&path);

        assert!(store.load().unwrap().is_empty());

        fs::write(&path, json!([{"Registro_ANS": "1"}]).to_string()).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
