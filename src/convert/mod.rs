//! Registry CSV to JSON conversion with encoding and delimiter auto-detection.
//!
//! Turns the semicolon-delimited registry export into the JSON array the
//! query layer consumes. Each row becomes a flat JSON object keyed by the
//! column headers; empty cells become `null`. No operator-specific logic
//! here.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};

/// Result of a conversion with metadata.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Converted records as flat JSON objects.
    pub records: Vec<Value>,
    /// Detected or used encoding.
    pub encoding: String,
    /// Detected or used delimiter.
    pub delimiter: char,
    /// Column headers.
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ConvertResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8_lossy(bytes).to_string()),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        // Fallback: UTF-8 with lossy conversion
        _ => Ok(String::from_utf8_lossy(bytes).to_string()),
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Registry exports use `;`, which is also the tie-break default.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Convert a registry CSV file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let conversion = convert_csv_file("Relatorio_cadop.csv", None)?;
/// println!("{} records ({}, '{}')", conversion.records.len(),
///     conversion.encoding, conversion.delimiter);
/// ```
pub fn convert_csv_file<P: AsRef<Path>>(
    path: P,
    delimiter: Option<char>,
) -> ConvertResult<Conversion> {
    let bytes = std::fs::read(path.as_ref())?;
    convert_bytes(&bytes, delimiter)
}

/// Convert registry CSV bytes to JSON records.
///
/// Encoding is auto-detected; the delimiter is auto-detected unless given.
pub fn convert_bytes(bytes: &[u8], delimiter: Option<char>) -> ConvertResult<Conversion> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;

    if content.trim().is_empty() {
        return Err(ConvertError::EmptyFile);
    }

    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ConvertError::NoHeaders);
    }

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let mut obj = Map::new();

        for (i, header) in headers.iter().enumerate() {
            let cell = row.get(i).map(str::trim).unwrap_or("");
            // Empty source cells become null, matching the served file format
            let value = if cell.is_empty() { Value::Null } else { json!(cell) };
            obj.insert(header.clone(), value);
        }

        records.push(Value::Object(obj));
    }

    Ok(Conversion {
        records,
        encoding,
        delimiter,
        headers,
    })
}

/// Write converted records as a pretty-printed UTF-8 JSON array.
pub fn write_json<P: AsRef<Path>>(records: &[Value], path: P) -> ConvertResult<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path.as_ref(), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_semicolon_csv() {
        let csv = "Registro_ANS;Cidade;UF\n419761;São Paulo;SP\n123456;Belo Horizonte;MG";
        let conversion = convert_bytes(csv.as_bytes(), None).unwrap();

        assert_eq!(conversion.delimiter, ';');
        assert_eq!(conversion.records.len(), 2);
        assert_eq!(conversion.records[0]["Registro_ANS"], "419761");
        assert_eq!(conversion.records[1]["Cidade"], "Belo Horizonte");
        assert_eq!(conversion.headers, vec!["Registro_ANS", "Cidade", "UF"]);
    }

    #[test]
    fn test_empty_cells_become_null() {
        let csv = "Registro_ANS;CNPJ;Cidade\n419761;;São Paulo";
        let conversion = convert_bytes(csv.as_bytes(), None).unwrap();

        assert_eq!(conversion.records[0]["CNPJ"], Value::Null);
        assert_eq!(conversion.records[0]["Cidade"], "São Paulo");
    }

    #[test]
    fn test_short_row_missing_cells_become_null() {
        let csv = "a;b;c\n1;2";
        let conversion = convert_bytes(csv.as_bytes(), None).unwrap();

        assert_eq!(conversion.records[0]["a"], "1");
        assert_eq!(conversion.records[0]["c"], Value::Null);
    }

    #[test]
    fn test_quoted_values_unwrapped() {
        let csv = "Cidade;Modalidade\n\"São Paulo\";\"Cooperativa Médica\"";
        let conversion = convert_bytes(csv.as_bytes(), None).unwrap();

        assert_eq!(conversion.records[0]["Cidade"], "São Paulo");
        assert_eq!(conversion.records[0]["Modalidade"], "Cooperativa Médica");
    }

    #[test]
    fn test_explicit_delimiter_overrides_detection() {
        let csv = "a,b\n1;x,2";
        let conversion = convert_bytes(csv.as_bytes(), Some(',')).unwrap();

        assert_eq!(conversion.records[0]["a"], "1;x");
        assert_eq!(conversion.records[0]["b"], "2");
    }

    #[test]
    fn test_empty_input_error() {
        let result = convert_bytes(b"", None);
        assert!(matches!(result, Err(ConvertError::EmptyFile)));
    }

    #[test]
    fn test_detect_delimiter_defaults_to_semicolon() {
        assert_eq!(detect_delimiter("one column only"), ';');
        assert_eq!(detect_delimiter("a;b;c"), ';');
        assert_eq!(detect_delimiter("a,b,c"), ',');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
    }

    #[test]
    fn test_latin1_decoding() {
        // "Operadoras de Saúde" with 'ú' in ISO-8859-1
        let bytes: &[u8] = &[
            0x43, 0x69, 0x64, 0x61, 0x64, 0x65, 0x0A, 0x53, 0x61, 0xFA, 0x64, 0x65,
        ];
        let encoding = detect_encoding(bytes);
        let decoded = decode_content(bytes, &encoding).unwrap();
        assert!(decoded.contains("Cidade"));
    }

    #[test]
    fn test_write_json_roundtrip() {
        let csv = "Registro_ANS;UF\n419761;SP";
        let conversion = convert_bytes(csv.as_bytes(), None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&conversion.records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, conversion.records);
    }
}
